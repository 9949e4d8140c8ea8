//! Static submission corpora used across harnesses.
//!
//! The raw lines mirror the shape of real open-data snapshots, including the
//! fields the normalizer ignores.

use odstat_core::Filter;

/// A v1 submission: plain-string device with the display marker, one failed scene.
pub const RAW_V1: &str = r#"{"schema_version":"v1","data":{"timestamp":"2018-09-10T12:41:27","blender_version":{"version":"2.79","build_date":"2018-03-22","checksum":"f4dc9f9d68b"},"benchmark_client":{"client_version":"1.0b2"},"device_info":{"device_type":"CUDA","compute_devices":["GeForce GTX 950 (Display)"],"num_cpu_threads":12},"system_info":{"system":"Linux","bitness":"64bit","machine":"x86_64","dist_name":"Ubuntu","dist_version":"18.04","num_cpu_cores":6},"scenes":[{"name":"bmw27","stats":{"result":"OK","total_render_time":145.21,"render_time_no_sync":143.9}},{"name":"classroom","stats":{"result":"CRASH"}},{"name":"koro","stats":{"result":"OK","total_render_time":301.5}}]}}"#;

/// A v2 submission: object device, no distribution.
pub const RAW_V2: &str = r#"{"schema_version":"v2","data":{"blender_version":{"version":"2.80","build_date":"2019-07-29"},"device_info":{"device_type":"CPU","compute_devices":[{"type":"CPU","name":"AMD Ryzen 5 1600 Six-Core Processor"}],"num_cpu_threads":12},"system_info":{"system":"Windows","bitness":"64bit","machine":"AMD64"},"scenes":[{"name":"bmw27","stats":{"result":"OK","total_render_time":420.0}},{"name":"fishy_cat","stats":{"result":"OK","total_render_time":512.75}}]}}"#;

/// A v3 line with three runs, one of which has a zero render time.
pub const RAW_V3: &str = r#"{"schema_version":"v3","data":[{"timestamp":"2020-10-01T08:00:00","blender_version":{"version":"2.90.0","build_date":"2020-08-31"},"benchmark_launcher":{"label":"2.0.5"},"device_info":{"device_type":"OPTIX","compute_devices":[{"type":"OPTIX","name":"GeForce GTX 1650 SUPER"}],"num_cpu_threads":12},"system_info":{"system":"Linux","bitness":"64bit","machine":"x86_64","dist_name":"Fedora","dist_version":"32"},"scene":{"label":"bmw27","checksum":"c9a1e"},"stats":{"device_peak_memory":1200.5,"total_render_time":35.5,"render_time_no_sync":35.1}},{"blender_version":{"version":"2.90.0"},"device_info":{"device_type":"OPTIX","compute_devices":[{"type":"OPTIX","name":"GeForce GTX 1650 SUPER"}]},"system_info":{"system":"Linux","bitness":"64bit"},"scene":{"label":"koro"},"stats":{"total_render_time":0.0}},{"blender_version":{"version":"2.93.1"},"device_info":{"device_type":"CPU","compute_devices":[{"type":"CPU","name":"AMD Ryzen 5 3600 6-Core Processor"}]},"system_info":{"system":"Windows","bitness":"64bit"},"scene":{"label":"koro"},"stats":{"total_render_time":98.25}}]}"#;

/// A line from a schema generation this tool does not understand.
pub const RAW_V4: &str = r#"{"schema_version":"v4","payload":{"runs":[]}}"#;

/// Every raw fixture line, in order, with a blank line and a malformed line mixed in.
pub const CORPUS_MIXED: &[&str] = &[RAW_V1, "", RAW_V2, RAW_V4, "{\"schema_version\":", RAW_V3];

pub const LINUX: &str = "Linux-64bit";
pub const WINDOWS: &str = "Windows-64bit";

pub const GTX_950: &str = "GeForce GTX 950";
pub const GTX_1650_SUPER: &str = "GeForce GTX 1650 SUPER";
pub const RYZEN_1600: &str = "AMD Ryzen 5 1600 Six-Core Processor";
pub const RYZEN_3600: &str = "AMD Ryzen 5 3600 6-Core Processor";

/// A filter that keeps every device and OS in the fixtures.
pub fn filter_everything(patterns: &[&str]) -> Filter {
    Filter::new(
        [LINUX, WINDOWS],
        [GTX_950, GTX_1650_SUPER, RYZEN_1600, RYZEN_3600],
        patterns.iter().copied(),
    )
    .expect("fixture patterns must compile")
}
