//! Convergence of the benchmark Q-value
//!
//! Every time training updates the benchmark entry, the absolute change is
//! recorded together with the global step index. A learner whose values
//! settle produces differences that shrink toward zero.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// One update of the benchmark entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergencePoint {
    /// Global step index at which the update happened
    pub step: u64,
    /// |Q_after - Q_before|
    pub difference: f64,
}

/// Ordered record of benchmark updates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceSeries {
    points: Vec<ConvergencePoint>,
}

impl ConvergenceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: ConvergencePoint) {
        self.points.push(point);
    }

    pub fn record(&mut self, step: u64, difference: f64) {
        self.push(ConvergencePoint { step, difference });
    }

    pub fn points(&self) -> &[ConvergencePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Aggregate statistics; `window` is clamped to the series length
    pub fn summary(&self, window: usize) -> ConvergenceSummary {
        let window = window.clamp(1, self.points.len().max(1));
        let differences: Vec<f64> = self.points.iter().map(|p| p.difference).collect();
        let head = &differences[..window.min(differences.len())];
        let tail = &differences[differences.len().saturating_sub(window)..];

        ConvergenceSummary {
            count: differences.len(),
            window,
            max: differences.iter().copied().fold(0.0, f64::max),
            mean: mean_or_zero(&differences),
            first_window_mean: mean_or_zero(head),
            last_window_mean: mean_or_zero(tail),
        }
    }
}

impl FromIterator<ConvergencePoint> for ConvergenceSeries {
    fn from_iter<I: IntoIterator<Item = ConvergencePoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.mean()
    }
}

/// Summary of a [`ConvergenceSeries`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceSummary {
    pub count: usize,
    pub window: usize,
    pub max: f64,
    pub mean: f64,
    pub first_window_mean: f64,
    pub last_window_mean: f64,
}

impl ConvergenceSummary {
    /// Whether the late updates are no larger on average than the early ones
    pub fn is_converging(&self) -> bool {
        self.count > 0 && self.last_window_mean <= self.first_window_mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(differences: &[f64]) -> ConvergenceSeries {
        differences
            .iter()
            .enumerate()
            .map(|(i, &difference)| ConvergencePoint {
                step: i as u64 * 10,
                difference,
            })
            .collect()
    }

    #[test]
    fn test_summary_of_shrinking_series() {
        let summary = series(&[4.0, 2.0, 1.0, 0.5, 0.25, 0.125]).summary(2);
        assert_eq!(summary.count, 6);
        assert_eq!(summary.max, 4.0);
        assert!((summary.first_window_mean - 3.0).abs() < 1e-12);
        assert!((summary.last_window_mean - 0.1875).abs() < 1e-12);
        assert!((summary.mean - 7.875 / 6.0).abs() < 1e-12);
        assert!(summary.is_converging());
    }

    #[test]
    fn test_growing_series_is_not_converging() {
        let summary = series(&[0.1, 0.2, 5.0, 6.0]).summary(2);
        assert!(!summary.is_converging());
    }

    #[test]
    fn test_window_is_clamped() {
        let summary = series(&[1.0, 3.0]).summary(100);
        assert_eq!(summary.window, 2);
        assert_eq!(summary.first_window_mean, summary.last_window_mean);
    }

    #[test]
    fn test_empty_series() {
        let summary = ConvergenceSeries::new().summary(10);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, 0.0);
        assert!(!summary.is_converging());
    }
}
