//! Domain-specific assertion helpers for odstat harnesses.

use odstat_core::{BenchmarkRecord, ResultSet};

/// Assert the render times stored for a scene, in order.
///
/// ```rust
/// assert_times!(results, "koro", [98.0, 120.5]);
/// ```
#[macro_export]
macro_rules! assert_times {
    ($results:expr, $scene:expr, [$($t:expr),* $(,)?]) => {{
        let results: &odstat_core::ResultSet = &$results;
        let scene: &str = $scene;
        let expected: Vec<f64> = vec![$($t),*];
        if results.get(scene).is_none() {
            panic!(
                "assert_times! failed: scene {:?} missing.\n  Available: {:?}",
                scene,
                results.scenes().map(|(s, _)| s).collect::<Vec<_>>()
            );
        }
        pretty_assertions::assert_eq!(results.times(scene), expected, "scene {:?}", scene);
    }};
}

/// Assert two floats agree to within `1e-9`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Every record in every scene, as `(scene, device, os, version, time)` tuples
/// sorted for order-independent comparison.
pub fn flatten(results: &ResultSet) -> Vec<(String, String, String, String, u64)> {
    let mut all: Vec<_> = results
        .scenes()
        .flat_map(|(_, records)| records.iter().map(key))
        .collect();
    all.sort();
    all
}

fn key(r: &BenchmarkRecord) -> (String, String, String, String, u64) {
    (
        r.scene.clone(),
        r.device.clone(),
        r.os.clone(),
        r.version.clone(),
        r.render_time.to_bits(),
    )
}
