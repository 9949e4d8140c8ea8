//! Filter & aggregator: keeps the records of interest and groups them by scene.
//!
//! A record survives [`Filter::matches`] when its device is a target device,
//! its OS is a target OS, and its version fully matches one of the version
//! patterns (or no pattern was given). Survivors are appended to a
//! [`ResultSet`] in arrival order; [`ResultSet::finalize`] sorts each scene
//! once, stably, by render time.

use crate::stats::SceneStats;
use crate::types::BenchmarkRecord;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("invalid version pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Device / OS / version predicate applied in aggregate mode.
#[derive(Debug, Clone)]
pub struct Filter {
    target_os: HashSet<String>,
    target_devices: HashSet<String>,
    version_patterns: Vec<Regex>,
}

impl Filter {
    /// Build a filter. Every version pattern must match the whole version
    /// string, so each is compiled anchored.
    pub fn new<O, D, P>(target_os: O, target_devices: D, version_patterns: P) -> Result<Self, FilterError>
    where
        O: IntoIterator,
        O::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let version_patterns = version_patterns
            .into_iter()
            .map(|p| {
                let pattern = p.as_ref();
                Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
                    FilterError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, FilterError>>()?;

        Ok(Self {
            target_os: target_os.into_iter().map(Into::into).collect(),
            target_devices: target_devices.into_iter().map(Into::into).collect(),
            version_patterns,
        })
    }

    /// `true` when no version pattern was supplied.
    pub fn matches_all_versions(&self) -> bool {
        self.version_patterns.is_empty()
    }

    pub fn matches_version(&self, version: &str) -> bool {
        self.matches_all_versions() || self.version_patterns.iter().any(|re| re.is_match(version))
    }

    /// Device and OS half of the predicate; shared by every result of a submission.
    pub fn matches_machine(&self, device: &str, os: &str) -> bool {
        self.target_devices.contains(device) && self.target_os.contains(os)
    }

    pub fn matches(&self, record: &BenchmarkRecord) -> bool {
        self.matches_machine(&record.device, &record.os) && self.matches_version(&record.version)
    }
}

// ---------------------------------------------------------------------------
// ResultSet
// ---------------------------------------------------------------------------

/// Retained records grouped by scene. Scenes iterate in name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    scenes: BTreeMap<String, Vec<BenchmarkRecord>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its scene, creating the scene on first use.
    pub fn push(&mut self, record: BenchmarkRecord) {
        self.scenes.entry(record.scene.clone()).or_default().push(record);
    }

    /// Sort each scene ascending by render time. Ties keep arrival order.
    pub fn finalize(&mut self) {
        for records in self.scenes.values_mut() {
            records.sort_by(|a, b| a.render_time.total_cmp(&b.render_time));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Number of distinct scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn get(&self, scene: &str) -> Option<&[BenchmarkRecord]> {
        self.scenes.get(scene).map(Vec::as_slice)
    }

    pub fn scenes(&self) -> impl Iterator<Item = (&str, &[BenchmarkRecord])> {
        self.scenes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Render times of one scene, in stored order.
    pub fn times(&self, scene: &str) -> Vec<f64> {
        self.get(scene)
            .map(|records| records.iter().map(|r| r.render_time).collect())
            .unwrap_or_default()
    }

    /// Statistics for one scene. Meaningful after [`ResultSet::finalize`].
    pub fn stats(&self, scene: &str) -> Option<SceneStats> {
        SceneStats::from_sorted(&self.times(scene))
    }
}

/// Filter `records`, group survivors by scene and finalize.
pub fn aggregate<I>(records: I, filter: &Filter) -> ResultSet
where
    I: IntoIterator<Item = BenchmarkRecord>,
{
    let mut results = ResultSet::new();
    for record in records.into_iter().filter(|r| filter.matches(r)) {
        results.push(record);
    }
    results.finalize();
    results
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
