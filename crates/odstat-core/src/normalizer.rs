//! Normalizer: turns one parsed submission line into [`Submission`] values.
//!
//! Three schema generations exist in the open-data corpus:
//!
//! | schema | layout |
//! |--------|--------|
//! | `v1`   | one run per line, `compute_devices` holds plain strings |
//! | `v2`   | one run per line, `compute_devices` holds `{ "name": … }` objects |
//! | `v3`   | `data` is a list of runs, one scene result each |
//!
//! Extraction is best-effort. Anything that cannot be read is dropped rather
//! than reported: a submission without a device or OS disappears entirely, a
//! failed or non-positive result disappears from its submission.

use crate::types::{BenchmarkRecord, SceneTime, SchemaVersion, Submission, NO_DISTRIBUTION};
use serde_json::Value;

/// Suffix Blender appends to the device that also drives the display.
pub const DISPLAY_SUFFIX: &str = " (Display)";

/// Status string of a successful v1/v2 scene render.
const RESULT_OK: &str = "OK";

// ---------------------------------------------------------------------------
// Compute device
// ---------------------------------------------------------------------------

/// First entry of a `compute_devices` list.
///
/// v1 stores the device name directly; v2 and v3 wrap it in an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeDevice<'a> {
    Plain(&'a str),
    Composite { name: &'a str },
}

impl<'a> ComputeDevice<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(ComputeDevice::Plain(name)),
            Value::Object(map) => Some(ComputeDevice::Composite {
                name: map.get("name").and_then(Value::as_str).unwrap_or_default(),
            }),
            _ => None,
        }
    }

    pub fn name(&self) -> &'a str {
        match *self {
            ComputeDevice::Plain(name) => name,
            ComputeDevice::Composite { name } => name,
        }
    }
}

/// Strip a trailing `" (Display)"` marker from a device name.
pub fn clean_device_name(name: &str) -> &str {
    name.strip_suffix(DISPLAY_SUFFIX).unwrap_or(name)
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Read the declared `schema_version` of a line.
///
/// `Err` carries the raw value (empty when the field is missing or not a
/// string) so the caller can report it.
pub fn schema_of(raw: &Value) -> Result<SchemaVersion, String> {
    let declared = raw
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default();
    SchemaVersion::parse(declared).ok_or_else(|| declared.to_string())
}

/// Extract every submission held by one line.
///
/// v1/v2 yield at most one submission, v3 yields one per `data` element.
pub fn submissions(raw: &Value, schema: SchemaVersion) -> Vec<Submission> {
    match schema {
        SchemaVersion::V1 | SchemaVersion::V2 => {
            raw.get("data").and_then(parse_v1_v2).into_iter().collect()
        }
        SchemaVersion::V3 => raw
            .get("data")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(parse_v3).collect())
            .unwrap_or_default(),
    }
}

/// Number of entries a line holds, whether or not they normalise cleanly.
///
/// A v1/v2 line is one entry; a v3 line holds one per `data` element.
pub fn entry_count(raw: &Value, schema: SchemaVersion) -> usize {
    match schema {
        SchemaVersion::V1 | SchemaVersion::V2 => 1,
        SchemaVersion::V3 => raw
            .get("data")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
    }
}

/// Extract every accepted scene result held by one line as flat records.
pub fn normalize(raw: &Value, schema: SchemaVersion) -> Vec<BenchmarkRecord> {
    submissions(raw, schema)
        .into_iter()
        .flat_map(Submission::into_records)
        .collect()
}

// ---------------------------------------------------------------------------
// Per-schema parsers
// ---------------------------------------------------------------------------

fn parse_v1_v2(data: &Value) -> Option<Submission> {
    let device = first_compute_device(data)?;
    let mut submission = identity(device.name(), data)?;

    submission.results = data
        .get("scenes")
        .and_then(Value::as_array)
        .map(|scenes| scenes.iter().filter_map(parse_v1_v2_scene).collect())
        .unwrap_or_default();

    Some(submission)
}

fn parse_v1_v2_scene(scene: &Value) -> Option<SceneTime> {
    let stats = scene.get("stats")?;
    if stats.get("result").and_then(Value::as_str) != Some(RESULT_OK) {
        return None;
    }
    Some(SceneTime {
        scene: scene.get("name")?.as_str()?.to_string(),
        render_time: positive_time(stats.get("total_render_time")?)?,
    })
}

fn parse_v3(entry: &Value) -> Option<Submission> {
    // v3 devices are always objects; a bare string here is a broken entry.
    let name = match first_compute_device(entry)? {
        ComputeDevice::Composite { name } => name,
        ComputeDevice::Plain(_) => return None,
    };
    let mut submission = identity(name, entry)?;

    let result = entry
        .pointer("/scene/label")
        .and_then(Value::as_str)
        .zip(entry.pointer("/stats/total_render_time").and_then(positive_time))
        .map(|(scene, render_time)| SceneTime {
            scene: scene.to_string(),
            render_time,
        });
    submission.results.extend(result);

    Some(submission)
}

// ---------------------------------------------------------------------------
// Shared field helpers
// ---------------------------------------------------------------------------

fn first_compute_device(node: &Value) -> Option<ComputeDevice<'_>> {
    node.pointer("/device_info/compute_devices/0")
        .and_then(ComputeDevice::from_value)
}

/// Build the machine identity shared by v1, v2 and v3. Returns `None` when
/// the device or OS is empty, or the version is missing.
fn identity(device: &str, node: &Value) -> Option<Submission> {
    let device = clean_device_name(device);
    let system_info = node.get("system_info")?;
    let os = os_name(system_info)?;
    if device.is_empty() || os.is_empty() {
        return None;
    }

    Some(Submission {
        device: device.to_string(),
        os,
        distribution: distribution(system_info),
        version: node
            .pointer("/blender_version/version")
            .and_then(Value::as_str)?
            .to_string(),
        results: Vec::new(),
    })
}

fn os_name(system_info: &Value) -> Option<String> {
    let system = system_info.get("system")?.as_str()?;
    let bitness = system_info.get("bitness")?.as_str()?;
    Some(format!("{system}-{bitness}"))
}

/// `"{dist_name}-{dist_version}"` when both are present, else the sentinel.
fn distribution(system_info: &Value) -> String {
    let name = system_info.get("dist_name").and_then(Value::as_str);
    let version = system_info.get("dist_version").and_then(Value::as_str);
    match name.zip(version) {
        Some((name, version)) => format!("{name}-{version}"),
        None => NO_DISTRIBUTION.to_string(),
    }
}

fn positive_time(value: &Value) -> Option<f64> {
    value.as_f64().filter(|t| t.is_finite() && *t > 0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
