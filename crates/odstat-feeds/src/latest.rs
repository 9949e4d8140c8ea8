//! Latest open-data snapshot feed.
//!
//! The snapshot is a zip archive holding one `.jsonl` member. It is downloaded
//! in full, then either streamed from memory ([`Feed::open`]) or written to
//! disk ([`LatestFeed::save_to`]).

use crate::{Feed, FeedError};
use std::io::{BufRead, Cursor, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Extension of the submission member inside a snapshot archive.
pub const SNAPSHOT_EXTENSION: &str = ".jsonl";

#[derive(Debug, Clone)]
pub struct LatestFeed {
    url: String,
}

impl LatestFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the whole archive.
    pub fn download(&self) -> Result<Vec<u8>, FeedError> {
        tracing::info!(url = %self.url, "downloading snapshot");
        let body = reqwest::blocking::get(&self.url)
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(|source| FeedError::Download {
                url: self.url.clone(),
                source,
            })?;
        tracing::info!(bytes = body.len(), "download complete");
        Ok(body.to_vec())
    }

    /// Download the archive and extract its `.jsonl` member under `dir`.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, FeedError> {
        save_jsonl(self.download()?, dir)
    }
}

impl Feed for LatestFeed {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn open(&self) -> Result<Box<dyn BufRead>, FeedError> {
        let (name, contents) = extract_jsonl(self.download()?)?;
        tracing::info!(member = %name, "extracted snapshot member");
        Ok(Box::new(Cursor::new(contents)))
    }
}

// ---------------------------------------------------------------------------
// Archive helpers
// ---------------------------------------------------------------------------

/// Upper bound on the buffer reserved from a member's declared size. The
/// header is untrusted; larger members still grow the buffer while reading.
const MAX_PREALLOC: usize = 64 * 1024 * 1024;

fn capacity_hint(declared: u64) -> usize {
    usize::try_from(declared).map_or(MAX_PREALLOC, |n| n.min(MAX_PREALLOC))
}

/// Return the name and contents of the first `.jsonl` member of `archive`.
pub fn extract_jsonl(archive: Vec<u8>) -> Result<(String, Vec<u8>), FeedError> {
    let mut zip = ZipArchive::new(Cursor::new(archive))?;
    for i in 0..zip.len() {
        let mut member = zip.by_index(i)?;
        if !member.name().ends_with(SNAPSHOT_EXTENSION) {
            continue;
        }
        let name = member.name().to_string();
        let mut contents = Vec::with_capacity(capacity_hint(member.size()));
        member.read_to_end(&mut contents)?;
        return Ok((name, contents));
    }
    Err(FeedError::NoJsonl)
}

/// Write the first `.jsonl` member of `archive` below `dir`, keeping its
/// archive path. Members whose path escapes `dir` are skipped.
pub fn save_jsonl(archive: Vec<u8>, dir: &Path) -> Result<PathBuf, FeedError> {
    let mut zip = ZipArchive::new(Cursor::new(archive))?;
    for i in 0..zip.len() {
        let mut member = zip.by_index(i)?;
        if !member.name().ends_with(SNAPSHOT_EXTENSION) {
            continue;
        }
        let Some(relative) = member.enclosed_name() else {
            tracing::warn!(member = member.name(), "skipping member with unsafe path");
            continue;
        };

        let dest = dir.join(relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = std::fs::File::create(&dest)?;
        std::io::copy(&mut member, &mut out)?;
        tracing::info!(member = member.name(), dest = %dest.display(), "extracted snapshot member");
        return Ok(dest);
    }
    Err(FeedError::NoJsonl)
}
