//! Console report rendering.
//!
//! Every renderer writes to an [`io::Write`] so the output can be captured
//! in tests.

use odstat_core::{Dimension, InventoryCounts, ResultSet};
use serde_json::Value;
use std::io::{self, Write};
use std::time::Duration;

/// Context printed above the per-scene statistics.
#[derive(Debug, Clone, Copy)]
pub struct Header<'a> {
    pub target_os: &'a [String],
    pub target_devices: &'a [String],
    pub entries: usize,
    pub elapsed: Duration,
}

impl Header<'_> {
    fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.entries as f64 / secs
        } else {
            0.0
        }
    }
}

pub fn write_results(
    out: &mut impl Write,
    header: &Header<'_>,
    results: &ResultSet,
    verbose: bool,
) -> io::Result<()> {
    writeln!(out, "Target OS: {}", header.target_os.join(", "))?;
    writeln!(out, "Target Devices: {}", header.target_devices.join(", "))?;
    writeln!(
        out,
        "Parsed Entries: {} ({:.0} entries/second)",
        header.entries,
        header.rate()
    )?;
    writeln!(out)?;

    for (scene, records) in results.scenes() {
        writeln!(out, "Render time for '{scene}' (fastest to slowest):")?;
        if verbose {
            for r in records {
                writeln!(
                    out,
                    "Scene: {:20}  Device: {:36}  RenderTime: {:10.2}  OS: {}/{:20}  V: {}",
                    r.scene, r.device, r.render_time, r.os, r.distribution, r.version
                )?;
            }
        }
        let Some(stats) = results.stats(scene) else {
            continue;
        };
        writeln!(out, "Sample Count:             {:10}", stats.count)?;
        writeln!(out, "Mean RenderTime:          {:10.2}", stats.mean)?;
        writeln!(out, "Median RenderTime:        {:10.2}", stats.median)?;
        writeln!(out, "Min RenderTime:           {:10.2}", stats.min)?;
        writeln!(out, "Max RenderTime:           {:10.2}", stats.max)?;
        if let Some(sd) = stats.std_dev {
            writeln!(out, "Std Deviation RenderTime: {sd:10.2}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn inventory_label(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Os => "Operating Systems:",
        Dimension::Device => "Render Devices:",
        Dimension::Version => "Blender Versions:",
    }
}

/// `entries` is every entry visited, including ones too incomplete to count.
pub fn write_inventory(out: &mut impl Write, counts: &InventoryCounts, entries: usize) -> io::Result<()> {
    let label = inventory_label(counts.dimension());
    let width = label.len().max("Parsed Entries:".len());
    writeln!(out, "{label:width$} {:7}", counts.distinct())?;
    writeln!(out, "{:width$} {:7}", "Parsed Entries:", entries)?;
    writeln!(out)?;
    for (value, n) in counts.sorted() {
        writeln!(out, "{n:7} {value}")?;
    }
    Ok(())
}

/// Echo a line whose schema version is not understood.
pub fn write_unsupported(out: &mut impl Write, schema: &str, raw: &Value) -> io::Result<()> {
    writeln!(out, "Unsupported schema : {schema}")?;
    let pretty = serde_json::to_string_pretty(raw).map_err(io::Error::other)?;
    writeln!(out, "{pretty}")
}
