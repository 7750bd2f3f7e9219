use crate::chart::ChartSource;
use crate::error::ExportError;
use crate::export::export_chart;
use log::info;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartExportJob {
    pub identifier: String,
    pub destination: PathBuf,
}

impl ChartExportJob {
    pub fn new(identifier: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        ChartExportJob {
            identifier: identifier.into(),
            destination: destination.into(),
        }
    }
}

const DEFAULT_JOBS: [(&str, &str); 11] = [
    ("hot-100", "billboard_hot_100.json"),
    ("greatest-hot-100-singles", "billboard_greatest_hot_100.json"),
    ("adult-pop-songs", "billboard_adult_pop.json"),
    ("adult-contemporary", "billboard_adult_contemporary.json"),
    ("country-songs", "billboard_country.json"),
    ("rock-songs", "billboard_rock.json"),
    ("alternative-songs", "billboard_alternative.json"),
    ("rap-song", "billboard_rap.json"),
    ("r-and-b-songs", "billboard_r&b.json"),
    ("dance-electronic-songs", "billboard_electronic.json"),
    ("jazz-songs", "billboard_jazz.json"),
];

/// The Billboard charts dumped by default, relative to the working directory.
pub fn default_jobs() -> Vec<ChartExportJob> {
    DEFAULT_JOBS
        .iter()
        .map(|&(identifier, destination)| ChartExportJob::new(identifier, destination))
        .collect()
}

/// Run every job in order. Stops at the first failure; later jobs don't run.
pub fn run_jobs<'a>(
    source: &impl ChartSource,
    jobs: impl IntoIterator<Item = &'a ChartExportJob>,
) -> Result<(), ExportError> {
    for job in jobs {
        info!("{} -> {:?}", job.identifier, job.destination);
        export_chart(source, &job.identifier, &job.destination)?;
    }

    Ok(())
}
