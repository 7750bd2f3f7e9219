use anyhow::{Context, Result};
use chartdump::{export_chart, BillboardSource};
use chrono::NaiveDate;
use std::env::args;

fn main() -> Result<()> {
    chartdump::logging::init()?;

    let chart = args().nth(1).context("missing chart")?;
    let path = args().nth(2).context("missing path")?;

    let mut source = BillboardSource::new();
    if let Some(date) = args().nth(3) {
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .with_context(|| format!("invalid date {:?}", date))?;
        source = source.with_date(date);
    }

    export_chart(&source, &chart, &path)
        .with_context(|| format!("couldn't dump {} to {}", chart, path))?;

    Ok(())
}
