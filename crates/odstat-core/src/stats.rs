//! Order statistics over a scene's render times.

use serde::Serialize;

/// Summary of one scene's retained render times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation; `None` for a single sample.
    pub std_dev: Option<f64>,
}

impl SceneStats {
    /// Compute statistics over render times already sorted ascending.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_sorted(times: &[f64]) -> Option<Self> {
        let (&min, &max) = (times.first()?, times.last()?);
        let count = times.len();
        let mean = times.iter().sum::<f64>() / count as f64;

        Some(Self {
            count,
            mean,
            median: median(times),
            min,
            max,
            std_dev: (count > 1).then(|| sample_std_dev(times, mean)),
        })
    }
}

fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn sample_std_dev(times: &[f64], mean: f64) -> f64 {
    let ss: f64 = times.iter().map(|t| (t - mean).powi(2)).sum();
    (ss / (times.len() - 1) as f64).sqrt()
}
