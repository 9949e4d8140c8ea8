//! odstat-core: normalization and aggregation of benchmark submissions.
//!
//! # Architecture
//!
//! ```text
//! lines ──► Normalizer ──► Filter & Aggregator ──► ResultSet ──► SceneStats
//!               │
//!               └────────► Inventory Counter ──► InventoryCounts
//! ```
//!
//! Everything runs on the caller's thread in a single forward pass. The
//! [`pipeline::Pipeline`] accumulator is owned by the caller.

pub mod aggregate;
pub mod config;
pub mod inventory;
pub mod normalizer;
pub mod pipeline;
pub mod stats;
pub mod types;

pub use aggregate::{aggregate, Filter, FilterError, ResultSet};
pub use inventory::{count_distinct, InventoryCounts};
pub use normalizer::normalize;
pub use pipeline::{Diagnostics, LineOutcome, Outcome, Pipeline, RunOutput};
pub use stats::SceneStats;
pub use types::{BenchmarkRecord, Dimension, Mode, SceneTime, SchemaVersion, Submission};
