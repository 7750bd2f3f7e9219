pub mod billboard;
pub mod chart;
pub mod error;
pub mod export;
pub mod jobs;
pub mod logging;

pub use billboard::BillboardSource;
pub use chart::{ChartEntry, ChartSource, Song};
pub use error::{ExportError, RetrievalError};
pub use export::{export_chart, render_songs};
pub use jobs::{default_jobs, run_jobs, ChartExportJob};
