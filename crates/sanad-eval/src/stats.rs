//! Summary statistics over latency samples

use serde::{Deserialize, Serialize};

/// Distribution summary of one metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of samples
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Middle value (mean of the two middle values for even counts)
    pub median: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Sample standard deviation, 0 for fewer than two samples
    pub std_dev: f64,
    /// 50th percentile
    pub p50: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
}

impl Stats {
    /// Summarize `samples`; `None` when empty
    #[must_use]
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();

        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        let std_dev = if n > 1 {
            let variance =
                sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        Some(Self {
            count: n,
            mean,
            median,
            min: sorted[0],
            max: sorted[n - 1],
            std_dev,
            p50: sorted[n * 50 / 100],
            p95: sorted[(n * 95 / 100).min(n - 1)],
            p99: sorted[(n * 99 / 100).min(n - 1)],
        })
    }
}

/// Mean of `samples`, 0 when empty
#[must_use]
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(Stats::from_samples(&[]).is_none());
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_single_sample() {
        let stats = Stats::from_samples(&[2.5]).unwrap();
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.p99, 2.5);
    }

    #[test]
    fn test_summary() {
        let stats = Stats::from_samples(&[4.0, 1.0, 3.0, 2.0]).unwrap();

        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.std_dev - 1.290_994).abs() < 1e-6);
        assert_eq!(stats.p50, 3.0);
        assert_eq!(stats.p95, 4.0);
    }

    #[test]
    fn test_percentiles_on_hundred_samples() {
        let samples: Vec<f64> = (1..=100).map(f64::from).collect();
        let stats = Stats::from_samples(&samples).unwrap();

        assert_eq!(stats.p50, 51.0);
        assert_eq!(stats.p95, 96.0);
        assert_eq!(stats.p99, 100.0);
    }
}
