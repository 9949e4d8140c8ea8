//! Core types for odstat-core.
//!
//! This module defines the data structures shared across the pipeline
//! layers: the normalised [`BenchmarkRecord`], the per-run [`Submission`] it
//! is flattened from, the declared [`SchemaVersion`] of an input line, and the
//! run [`Mode`] selected before the pass begins.

use serde::Serialize;

/// Distribution sentinel used when a submission reports no Linux distribution.
pub const NO_DISTRIBUTION: &str = "-";

/// One successful scene render, normalised across all schema versions.
///
/// A record is only ever built for a result that reported success and a
/// positive, finite render time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRecord {
    /// Scene identifier (`koro`, `classroom`, …).
    pub scene: String,
    /// Compute device name with any `" (Display)"` suffix removed.
    pub device: String,
    /// `"{system}-{bitness}"`, e.g. `Linux-64bit`.
    pub os: String,
    /// `"{dist_name}-{dist_version}"`, or [`NO_DISTRIBUTION`].
    pub distribution: String,
    /// Render time in seconds.
    pub render_time: f64,
    /// Blender version that produced the result.
    pub version: String,
}

/// A single accepted scene result inside a [`Submission`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneTime {
    pub scene: String,
    pub render_time: f64,
}

/// One benchmark run: the machine identity plus every scene result that
/// passed validation.
///
/// A v1/v2 line is exactly one submission. Each element of a v3 `data` list
/// is its own submission carrying at most one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub device: String,
    pub os: String,
    pub distribution: String,
    pub version: String,
    pub results: Vec<SceneTime>,
}

impl Submission {
    /// Value of this submission along an inventory dimension.
    pub fn value(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Os => &self.os,
            Dimension::Device => &self.device,
            Dimension::Version => &self.version,
        }
    }

    /// Flatten into one [`BenchmarkRecord`] per accepted scene result.
    pub fn into_records(self) -> Vec<BenchmarkRecord> {
        let Submission {
            device,
            os,
            distribution,
            version,
            results,
        } = self;
        results
            .into_iter()
            .map(|r| BenchmarkRecord {
                scene: r.scene,
                device: device.clone(),
                os: os.clone(),
                distribution: distribution.clone(),
                render_time: r.render_time,
                version: version.clone(),
            })
            .collect()
    }
}

/// Declared `schema_version` of an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    V1,
    V2,
    V3,
}

impl SchemaVersion {
    /// Map a raw `schema_version` value onto a known schema, if any.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "v1" => Some(SchemaVersion::V1),
            "v2" => Some(SchemaVersion::V2),
            "v3" => Some(SchemaVersion::V3),
            _ => None,
        }
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaVersion::V1 => write!(f, "v1"),
            SchemaVersion::V2 => write!(f, "v2"),
            SchemaVersion::V3 => write!(f, "v3"),
        }
    }
}

/// Which submission attribute an inventory run tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Os,
    Device,
    Version,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Os => write!(f, "os"),
            Dimension::Device => write!(f, "device"),
            Dimension::Version => write!(f, "version"),
        }
    }
}

/// Run mode, fixed for the whole pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Filter records and aggregate per-scene statistics.
    #[default]
    Aggregate,
    /// Tally distinct values along one dimension; no filtering.
    Count(Dimension),
}
