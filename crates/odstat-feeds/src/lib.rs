//! odstat-feeds: line sources for odstat.
//!
//! Each feed hands the pipeline a buffered reader over JSON-lines submission
//! data. The pipeline never sees where the bytes came from.

pub mod file;
pub mod latest;

pub use file::FileFeed;
pub use latest::{LatestFeed, SNAPSHOT_EXTENSION};

use std::io::BufRead;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("download from {url} failed: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid snapshot archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("no .jsonl member in snapshot archive")]
    NoJsonl,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Trait implemented by each submission source.
pub trait Feed {
    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;

    /// Open the source for line-by-line reading.
    fn open(&self) -> Result<Box<dyn BufRead>, FeedError>;
}
