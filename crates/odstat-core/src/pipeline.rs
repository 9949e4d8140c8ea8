//! Pipeline: the single-pass accumulator owned by the caller.
//!
//! ```text
//! line ──► JSON ──► schema check ──► normalizer ──► filter ──► ResultSet
//!                        │                  │
//!                        ▼                  └──────────────► InventoryCounts
//!                  Diagnostics
//! ```
//!
//! The [`Mode`] is fixed when the pipeline is built. Lines are fed one at a
//! time; nothing fed to the pipeline can abort the pass. [`Pipeline::finish`]
//! consumes the accumulator, sorts each scene, and hands back the result.

use crate::aggregate::{Filter, ResultSet};
use crate::inventory::InventoryCounts;
use crate::normalizer;
use crate::types::{Dimension, Mode, Submission};
use serde_json::Value;

/// Side-channel counters kept alongside the accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Lines fed, blank ones included.
    pub lines: usize,
    /// Entries visited in supported lines, including ones later dropped.
    pub entries: usize,
    /// Entries dropped for an empty device or OS, or a missing version.
    pub incomplete: usize,
    /// Lines whose `schema_version` was missing or unknown.
    pub unsupported_schema: usize,
    /// Lines that were not valid JSON.
    pub malformed: usize,
}

/// What happened to one fed line.
#[derive(Debug)]
pub enum LineOutcome {
    /// A supported line; `submissions` is how many it held.
    Parsed { submissions: usize },
    Blank,
    /// Declared schema is not v1, v2 or v3. The parsed line is handed back so
    /// the caller can surface it.
    Unsupported { schema: String, raw: Value },
    Malformed(serde_json::Error),
}

/// Finished result of a pass, one variant per mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Aggregate(ResultSet),
    Inventory(InventoryCounts),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub outcome: Outcome,
    pub diagnostics: Diagnostics,
}

enum Accumulator {
    Aggregate { filter: Filter, results: ResultSet },
    Count(InventoryCounts),
}

pub struct Pipeline {
    acc: Accumulator,
    diagnostics: Diagnostics,
}

impl Pipeline {
    /// Build a pipeline for `mode`. The filter is only consulted in
    /// [`Mode::Aggregate`].
    pub fn new(mode: Mode, filter: Filter) -> Self {
        match mode {
            Mode::Aggregate => Self::aggregate(filter),
            Mode::Count(dimension) => Self::count(dimension),
        }
    }

    pub fn aggregate(filter: Filter) -> Self {
        Self {
            acc: Accumulator::Aggregate {
                filter,
                results: ResultSet::new(),
            },
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn count(dimension: Dimension) -> Self {
        Self {
            acc: Accumulator::Count(InventoryCounts::new(dimension)),
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        match &self.acc {
            Accumulator::Aggregate { .. } => Mode::Aggregate,
            Accumulator::Count(counts) => Mode::Count(counts.dimension()),
        }
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Parse and feed one raw input line.
    pub fn feed_line(&mut self, line: &str) -> LineOutcome {
        self.feed_bytes(line.as_bytes())
    }

    /// Parse and feed one undecoded input line. Invalid UTF-8 is reported as
    /// a malformed line like any other JSON error.
    pub fn feed_bytes(&mut self, line: &[u8]) -> LineOutcome {
        self.diagnostics.lines += 1;
        let line = line.trim_ascii();
        if line.is_empty() {
            tracing::debug!(line = self.diagnostics.lines, "skipping blank line");
            return LineOutcome::Blank;
        }

        match serde_json::from_slice::<Value>(line) {
            Ok(raw) => self.feed_parsed(raw),
            Err(err) => {
                self.diagnostics.malformed += 1;
                tracing::warn!(line = self.diagnostics.lines, error = %err, "skipping malformed line");
                LineOutcome::Malformed(err)
            }
        }
    }

    /// Feed one already-parsed line.
    pub fn feed_value(&mut self, raw: Value) -> LineOutcome {
        self.diagnostics.lines += 1;
        self.feed_parsed(raw)
    }

    fn feed_parsed(&mut self, raw: Value) -> LineOutcome {
        let schema = match normalizer::schema_of(&raw) {
            Ok(schema) => schema,
            Err(schema) => {
                self.diagnostics.unsupported_schema += 1;
                tracing::warn!(line = self.diagnostics.lines, schema = %schema, "unsupported schema");
                return LineOutcome::Unsupported { schema, raw };
            }
        };

        let visited = normalizer::entry_count(&raw, schema);
        let submissions = normalizer::submissions(&raw, schema);
        let n = submissions.len();
        self.diagnostics.entries += visited;
        self.diagnostics.incomplete += visited.saturating_sub(n);
        for submission in submissions {
            self.accept(submission);
        }
        LineOutcome::Parsed { submissions: n }
    }

    /// Route one normalised submission into the accumulator.
    pub fn accept(&mut self, submission: Submission) {
        match &mut self.acc {
            Accumulator::Aggregate { filter, results } => {
                for record in submission.into_records() {
                    if filter.matches(&record) {
                        results.push(record);
                    }
                }
            }
            Accumulator::Count(counts) => counts.record(&submission),
        }
    }

    /// Feed every line and finish. Per-line outcomes are only logged.
    pub fn run<I, S>(mut self, lines: I) -> RunOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.feed_line(line.as_ref());
        }
        self.finish()
    }

    /// End the pass: sort every scene and release the accumulator.
    pub fn finish(self) -> RunOutput {
        let outcome = match self.acc {
            Accumulator::Aggregate { mut results, .. } => {
                results.finalize();
                Outcome::Aggregate(results)
            }
            Accumulator::Count(counts) => Outcome::Inventory(counts),
        };
        tracing::info!(
            lines = self.diagnostics.lines,
            entries = self.diagnostics.entries,
            incomplete = self.diagnostics.incomplete,
            unsupported = self.diagnostics.unsupported_schema,
            malformed = self.diagnostics.malformed,
            "pass complete"
        );
        RunOutput {
            outcome,
            diagnostics: self.diagnostics,
        }
    }
}
