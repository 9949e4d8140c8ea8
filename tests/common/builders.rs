//! Test builders: ergonomic constructors for submission lines and records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use odstat_core::types::NO_DISTRIBUTION;
use odstat_core::BenchmarkRecord;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// v1 / v2 lines
// ---------------------------------------------------------------------------

/// Fluent builder for one v1 or v2 submission line.
///
/// # Example
///
/// ```rust
/// let line = RunLine::v1("GeForce GTX 950 (Display)")
///     .scene("koro", 120.5)
///     .failed_scene("classroom")
///     .to_line();
/// ```
#[derive(Debug, Clone)]
pub struct RunLine {
    schema: &'static str,
    device: Value,
    system: String,
    bitness: String,
    dist_name: Option<String>,
    dist_version: Option<String>,
    version: String,
    scenes: Vec<Value>,
}

impl RunLine {
    /// v1 line: the compute device is a bare string.
    pub fn v1(device: &str) -> Self {
        Self::with_device("v1", json!(device))
    }

    /// v2 line: the compute device is an object with a `name`.
    pub fn v2(device: &str) -> Self {
        Self::with_device("v2", json!({ "type": "CUDA", "name": device }))
    }

    fn with_device(schema: &'static str, device: Value) -> Self {
        Self {
            schema,
            device,
            system: "Linux".to_string(),
            bitness: "64bit".to_string(),
            dist_name: None,
            dist_version: None,
            version: "2.83.0".to_string(),
            scenes: Vec::new(),
        }
    }

    /// Override the declared schema, e.g. to build an unsupported line.
    pub fn schema(mut self, schema: &'static str) -> Self {
        self.schema = schema;
        self
    }

    pub fn os(mut self, system: &str, bitness: &str) -> Self {
        self.system = system.to_string();
        self.bitness = bitness.to_string();
        self
    }

    pub fn dist(self, name: &str, version: &str) -> Self {
        self.dist_name(name).dist_version(version)
    }

    /// Set only `dist_name`, leaving `dist_version` as it is.
    pub fn dist_name(mut self, name: &str) -> Self {
        self.dist_name = Some(name.to_string());
        self
    }

    /// Set only `dist_version`, leaving `dist_name` as it is.
    pub fn dist_version(mut self, version: &str) -> Self {
        self.dist_version = Some(version.to_string());
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn scene(self, name: &str, total_render_time: f64) -> Self {
        self.scene_with_result(name, "OK", total_render_time)
    }

    pub fn failed_scene(self, name: &str) -> Self {
        self.scene_with_result(name, "CRASH", 0.0)
    }

    pub fn scene_with_result(mut self, name: &str, result: &str, total_render_time: f64) -> Self {
        self.scenes.push(json!({
            "name": name,
            "stats": {
                "result": result,
                "total_render_time": total_render_time,
                "render_time_no_sync": total_render_time,
            }
        }));
        self
    }

    pub fn to_value(&self) -> Value {
        let mut system_info = json!({
            "system": self.system,
            "bitness": self.bitness,
            "machine": "x86_64",
        });
        if let Some(name) = &self.dist_name {
            system_info["dist_name"] = json!(name);
        }
        if let Some(version) = &self.dist_version {
            system_info["dist_version"] = json!(version);
        }
        json!({
            "schema_version": self.schema,
            "data": {
                "blender_version": { "version": self.version, "build_date": "2020-06-03" },
                "device_info": {
                    "device_type": "CUDA",
                    "compute_devices": [self.device],
                },
                "system_info": system_info,
                "scenes": self.scenes,
            }
        })
    }

    pub fn to_line(&self) -> String {
        self.to_value().to_string()
    }
}

// ---------------------------------------------------------------------------
// v3 entries
// ---------------------------------------------------------------------------

/// Builder for one element of a v3 `data` list.
#[derive(Debug, Clone)]
pub struct V3Entry {
    device: String,
    system: String,
    bitness: String,
    dist_name: Option<String>,
    dist_version: Option<String>,
    version: String,
    scene: String,
    total_render_time: f64,
}

impl V3Entry {
    pub fn new(device: &str, scene: &str, total_render_time: f64) -> Self {
        Self {
            device: device.to_string(),
            system: "Linux".to_string(),
            bitness: "64bit".to_string(),
            dist_name: None,
            dist_version: None,
            version: "2.90.0".to_string(),
            scene: scene.to_string(),
            total_render_time,
        }
    }

    pub fn os(mut self, system: &str, bitness: &str) -> Self {
        self.system = system.to_string();
        self.bitness = bitness.to_string();
        self
    }

    pub fn dist(self, name: &str, version: &str) -> Self {
        self.dist_name(name).dist_version(version)
    }

    /// Set only `dist_name`, leaving `dist_version` as it is.
    pub fn dist_name(mut self, name: &str) -> Self {
        self.dist_name = Some(name.to_string());
        self
    }

    /// Set only `dist_version`, leaving `dist_name` as it is.
    pub fn dist_version(mut self, version: &str) -> Self {
        self.dist_version = Some(version.to_string());
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn to_value(&self) -> Value {
        let mut system_info = json!({ "system": self.system, "bitness": self.bitness });
        if let Some(name) = &self.dist_name {
            system_info["dist_name"] = json!(name);
        }
        if let Some(version) = &self.dist_version {
            system_info["dist_version"] = json!(version);
        }
        json!({
            "blender_version": { "version": self.version },
            "device_info": {
                "device_type": "CUDA",
                "compute_devices": [{ "type": "CUDA", "name": self.device }],
            },
            "system_info": system_info,
            "scene": { "label": self.scene },
            "stats": { "total_render_time": self.total_render_time },
        })
    }
}

/// One v3 line holding every entry.
pub fn v3_line(entries: &[V3Entry]) -> String {
    json!({
        "schema_version": "v3",
        "data": entries.iter().map(V3Entry::to_value).collect::<Vec<_>>(),
    })
    .to_string()
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Build a record directly, bypassing the normalizer.
pub fn record(scene: &str, device: &str, os: &str, render_time: f64, version: &str) -> BenchmarkRecord {
    BenchmarkRecord {
        scene: scene.to_string(),
        device: device.to_string(),
        os: os.to_string(),
        distribution: NO_DISTRIBUTION.to_string(),
        render_time,
        version: version.to_string(),
    }
}
