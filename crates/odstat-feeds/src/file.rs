//! Local JSON-lines file feed.

use crate::{Feed, FeedError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Feed for FileFeed {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> Result<Box<dyn BufRead>, FeedError> {
        let file = File::open(&self.path).map_err(|source| FeedError::Open {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "opened submission file");
        Ok(Box::new(BufReader::new(file)))
    }
}
