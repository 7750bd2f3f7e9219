use log::{LevelFilter, SetLoggerError};

/// Install the pretty logger at `Info`, with `RUST_LOG` layered on top.
pub fn init() -> Result<(), SetLoggerError> {
    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter(None, LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.try_init()
}
