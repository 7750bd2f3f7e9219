use anyhow::Result;
use chartdump::{default_jobs, run_jobs, BillboardSource};

fn main() -> Result<()> {
    chartdump::logging::init()?;

    let source = BillboardSource::new();
    run_jobs(&source, &default_jobs())?;

    Ok(())
}
