use crate::game::settings::ProximityThresholds;
use crate::model::{Classification, Direction, Tier};

#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackClassifier {
    thresholds: ProximityThresholds,
}

impl FeedbackClassifier {
    pub fn new(thresholds: ProximityThresholds) -> Self {
        Self { thresholds }
    }

    /// Largest distance still rated hot; never below 1 so small ranges get a hot zone.
    pub fn hot_limit(&self, bound: u32) -> u32 {
        ((bound as f64 * self.thresholds.hot).floor() as u32).max(1)
    }

    pub fn warm_limit(&self, bound: u32) -> u32 {
        (bound as f64 * self.thresholds.warm).floor() as u32
    }

    pub fn classify(&self, guess: u32, secret: u32, bound: u32) -> Classification {
        let direction = match guess.cmp(&secret) {
            std::cmp::Ordering::Greater => Direction::Higher,
            std::cmp::Ordering::Less => Direction::Lower,
            std::cmp::Ordering::Equal => Direction::Exact,
        };
        let distance = guess.abs_diff(secret);
        let tier = if distance <= self.hot_limit(bound) {
            Tier::Hot
        } else if distance <= self.warm_limit(bound) {
            Tier::Warm
        } else {
            Tier::Cold
        };
        Classification {
            direction,
            tier,
            distance,
        }
    }
}

/// Classification with the default 5% / 15% thresholds.
pub fn classify(guess: u32, secret: u32, bound: u32) -> Classification {
    FeedbackClassifier::default().classify(guess, secret, bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_follows_sign() {
        for secret in 1..=10 {
            for guess in 1..=10 {
                let direction = classify(guess, secret, 10).direction;
                let expected = if guess == secret {
                    Direction::Exact
                } else if secret < guess {
                    Direction::Higher
                } else {
                    Direction::Lower
                };
                assert_eq!(direction, expected, "guess {} secret {}", guess, secret);
            }
        }
    }

    #[test]
    fn test_small_bound_tiers() {
        // bound 10: hot within 1, warm limit also 1, so anything further is cold
        assert_eq!(classify(6, 7, 10).tier, Tier::Hot);
        assert_eq!(classify(5, 7, 10).tier, Tier::Cold);
        assert_eq!(classify(9, 7, 10).tier, Tier::Cold);
    }

    #[test]
    fn test_large_bound_tiers() {
        assert_eq!(classify(45, 50, 100).tier, Tier::Hot);
        assert_eq!(classify(44, 50, 100).tier, Tier::Warm);
        assert_eq!(classify(35, 50, 100).tier, Tier::Warm);
        assert_eq!(classify(34, 50, 100).tier, Tier::Cold);
    }

    #[test]
    fn test_medium_bound_tiers() {
        assert_eq!(classify(22, 20, 50).tier, Tier::Hot);
        assert_eq!(classify(23, 20, 50).tier, Tier::Warm);
        assert_eq!(classify(27, 20, 50).tier, Tier::Warm);
        assert_eq!(classify(28, 20, 50).tier, Tier::Cold);
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = FeedbackClassifier::new(ProximityThresholds {
            hot: 0.1,
            warm: 0.5,
        });
        assert_eq!(classifier.classify(9, 1, 20).tier, Tier::Warm);
        assert_eq!(classifier.classify(3, 1, 20).tier, Tier::Hot);
        assert_eq!(classifier.classify(12, 1, 20).tier, Tier::Cold);
    }

    #[test]
    fn test_distance() {
        let c = classify(3, 9, 10);
        assert_eq!(c.distance, 6);
        assert_eq!(c.direction, Direction::Lower);
    }
}
