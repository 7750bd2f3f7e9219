use crate::error::RetrievalError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One ranked item of a chart, as returned by a [`ChartSource`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub title: String,
    pub artist: String,
    pub rank: Option<u32>,
    pub last_pos: Option<u32>,
    pub peak_pos: Option<u32>,
    pub weeks: Option<u32>,
    pub is_new: bool,
}

impl ChartEntry {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        ChartEntry {
            title: title.into(),
            artist: artist.into(),
            ..Default::default()
        }
    }
}

/// The exported form of an entry.
///
/// Fields are declared in lexicographic order so the serialized keys come out
/// sorted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Song {
    pub artist: String,
    pub title: String,
}

impl From<ChartEntry> for Song {
    fn from(entry: ChartEntry) -> Self {
        Song {
            artist: entry.artist,
            title: entry.title,
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// Anything that can look up a chart by its slug and return its entries in
/// rank order.
pub trait ChartSource {
    fn fetch(&self, identifier: &str) -> Result<Vec<ChartEntry>, RetrievalError>;
}

impl<S: ChartSource + ?Sized> ChartSource for &S {
    fn fetch(&self, identifier: &str) -> Result<Vec<ChartEntry>, RetrievalError> {
        (**self).fetch(identifier)
    }
}
