//! Quality figures reported next to each strategy's recommendations.
//!
//! These are fixed per strategy. They are not computed from the
//! recommendations or from any held-out data, and they don't change from
//! one user to the next.

use crate::types::StrategyKind;
use serde::{Deserialize, Serialize};

/// Upper bound of the satisfaction scale
pub const SATISFACTION_SCALE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// 0 to 5
    pub satisfaction: f64,
    /// 0 to 1
    pub diversity: f64,
    /// 0 to 1
    pub coverage: f64,
}

impl Metrics {
    /// The figures reported for a strategy
    pub fn reported(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::ContentBased => Self {
                precision: 0.78,
                recall: 0.65,
                f1_score: 0.71,
                satisfaction: 3.8,
                diversity: 0.62,
                coverage: 0.45,
            },
            StrategyKind::Collaborative => Self {
                precision: 0.82,
                recall: 0.71,
                f1_score: 0.76,
                satisfaction: 4.1,
                diversity: 0.58,
                coverage: 0.68,
            },
            StrategyKind::Hybrid => Self {
                precision: 0.85,
                recall: 0.74,
                f1_score: 0.79,
                satisfaction: 4.3,
                diversity: 0.65,
                coverage: 0.72,
            },
            StrategyKind::Bandit => Self {
                precision: 0.73,
                recall: 0.68,
                f1_score: 0.70,
                satisfaction: 3.9,
                diversity: 0.71,
                coverage: 0.58,
            },
        }
    }

    /// Every figure scaled to [0, 1] (satisfaction divided by 5), labelled
    pub fn normalized(&self) -> [(&'static str, f64); 6] {
        [
            ("Precision", self.precision),
            ("Recall", self.recall),
            ("F1-Score", self.f1_score),
            ("Satisfaction", self.satisfaction / SATISFACTION_SCALE),
            ("Diversity", self.diversity),
            ("Coverage", self.coverage),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_values() {
        let cb = Metrics::reported(StrategyKind::ContentBased);
        assert_eq!(cb.precision, 0.78);
        assert_eq!(cb.coverage, 0.45);

        let mab = Metrics::reported(StrategyKind::Bandit);
        assert_eq!(mab.f1_score, 0.70);
        assert_eq!(mab.diversity, 0.71);
    }

    #[test]
    fn test_hybrid_reports_best_precision() {
        let hybrid = Metrics::reported(StrategyKind::Hybrid).precision;
        for kind in StrategyKind::ALL {
            assert!(Metrics::reported(kind).precision <= hybrid);
        }
    }

    #[test]
    fn test_normalized_stays_in_unit_range() {
        for kind in StrategyKind::ALL {
            for (label, value) in Metrics::reported(kind).normalized() {
                assert!((0.0..=1.0).contains(&value), "{} {}", label, value);
            }
        }
        let collab = Metrics::reported(StrategyKind::Collaborative).normalized();
        assert_eq!(collab[3], ("Satisfaction", 4.1 / 5.0));
    }
}
