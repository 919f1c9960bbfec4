//! Learning-rate decay

use serde::{Deserialize, Serialize};

/// Shape of the decay curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayKind {
    /// `alpha_t = alpha_0 / (1 + decay * t)`
    Hyperbolic,
    /// `alpha_t = alpha_{t-1} / (1 + decay * t)`
    Compounding,
}

/// Learning rate owned by a single table
///
/// The step counter moves only through [`LearningRate::advance`], which the
/// owning table calls once per update. Reading the rate never changes it.
/// The rate never increases and never drops below `floor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningRate {
    initial: f64,
    decay: f64,
    floor: f64,
    kind: DecayKind,
    alpha: f64,
    steps: u64,
}

impl LearningRate {
    pub fn new(initial: f64, decay: f64, floor: f64, kind: DecayKind) -> Self {
        Self {
            initial,
            decay,
            floor,
            kind,
            alpha: initial.max(floor),
            steps: 0,
        }
    }

    /// Fixed rate, e.g. for hand-checked updates in tests
    pub fn constant(alpha: f64) -> Self {
        Self::new(alpha, 0.0, alpha, DecayKind::Hyperbolic)
    }

    pub fn current(&self) -> f64 {
        self.alpha
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn advance(&mut self) {
        self.steps += 1;
        let t = self.steps as f64;
        let next = match self.kind {
            DecayKind::Hyperbolic => self.initial / (1.0 + self.decay * t),
            DecayKind::Compounding => self.alpha / (1.0 + self.decay * t),
        };
        self.alpha = next.max(self.floor).min(self.alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_monotone_with_floor(mut rate: LearningRate, steps: usize) {
        let mut previous = rate.current();
        for _ in 0..steps {
            rate.advance();
            let alpha = rate.current();
            assert!(alpha <= previous, "{alpha} > {previous}");
            assert!(alpha >= rate.floor());
            previous = alpha;
        }
    }

    #[test]
    fn test_hyperbolic_matches_closed_form() {
        let mut rate = LearningRate::new(0.2, 1e-5, 0.001, DecayKind::Hyperbolic);
        for _ in 0..1000 {
            rate.advance();
        }
        let expected = 0.2 / (1.0 + 1e-5 * 1000.0);
        assert!((rate.current() - expected).abs() < 1e-12);
        assert_eq!(rate.steps(), 1000);
    }

    #[test]
    fn test_reading_does_not_decay() {
        let rate = LearningRate::new(0.2, 0.5, 0.001, DecayKind::Hyperbolic);
        let first = rate.current();
        let second = rate.current();
        assert_eq!(first, second);
        assert_eq!(rate.steps(), 0);
    }

    #[test]
    fn test_schedules_are_monotone_and_floored() {
        assert_monotone_with_floor(
            LearningRate::new(0.2, 0.01, 0.001, DecayKind::Hyperbolic),
            100_000,
        );
        assert_monotone_with_floor(
            LearningRate::new(0.2, 0.01, 0.001, DecayKind::Compounding),
            10_000,
        );
        assert_monotone_with_floor(
            LearningRate::new(0.2, 1e-10, 0.001, DecayKind::Compounding),
            10_000,
        );
    }

    #[test]
    fn test_floor_is_reached_and_held() {
        let mut rate = LearningRate::new(0.2, 1.0, 0.0001, DecayKind::Hyperbolic);
        for _ in 0..100_000 {
            rate.advance();
        }
        assert_eq!(rate.current(), 0.0001);
    }

    #[test]
    fn test_initial_below_floor_starts_at_floor() {
        let rate = LearningRate::new(0.0005, 1e-5, 0.001, DecayKind::Hyperbolic);
        assert_eq!(rate.current(), 0.001);
    }

    #[test]
    fn test_compounding_decays_slowly() {
        let mut rate = LearningRate::new(0.2, 1e-10, 0.001, DecayKind::Compounding);
        for _ in 0..10_000 {
            rate.advance();
        }
        // sum of t for t in 1..=10_000 is ~5e7, so the product is ~exp(-5e-3)
        assert!(rate.current() < 0.2);
        assert!(rate.current() > 0.198);
    }

    fn advances_until_floor(mut rate: LearningRate) -> u64 {
        while rate.current() > rate.floor() {
            rate.advance();
        }
        rate.steps()
    }

    #[test]
    fn test_compounding_floor_crossing() {
        // ln(0.2 / 0.001) ~= decay * t^2 / 2
        let default = LearningRate::new(0.2, 1e-10, 0.001, DecayKind::Compounding);
        let steps = advances_until_floor(default);
        assert!((320_000..330_000).contains(&steps), "{steps}");

        let tripled = LearningRate::new(0.2, 9e-10, 0.001, DecayKind::Compounding);
        let steps = advances_until_floor(tripled);
        assert!((105_000..112_000).contains(&steps), "{steps}");
    }
}
