//! # Recommendation Engine
//!
//! Runs the strategies against one shared, read-only dataset:
//! 1. Look up the strategy for the requested kind
//! 2. Run it for the user with the caller's RNG
//! 3. Log what came back and how long it took
//!
//! `compare` does the same for every strategy, one after the other, and
//! collects the outcomes by kind.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::RngCore;
use serde::Serialize;
use tracing::{info, warn};

use dataset::{Dataset, UserId};
use strategies::{ScoredMovie, Strategy, StrategyKind, StrategyOutcome};

/// Outcomes of every strategy for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub user_id: UserId,
    pub outcomes: BTreeMap<StrategyKind, StrategyOutcome>,
}

/// One metric across all strategies, on a [0, 1] scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: &'static str,
    pub values: BTreeMap<StrategyKind, f64>,
}

impl Comparison {
    pub fn get(&self, kind: StrategyKind) -> Option<&StrategyOutcome> {
        self.outcomes.get(&kind)
    }

    /// False when the user id matched nothing
    pub fn is_found(&self) -> bool {
        self.outcomes.values().all(StrategyOutcome::is_found)
    }

    /// First `n` recommendations of a strategy (empty if it has none)
    pub fn top(&self, kind: StrategyKind, n: usize) -> &[ScoredMovie] {
        let recs = self
            .get(kind)
            .map(StrategyOutcome::recommendations)
            .unwrap_or(&[]);
        &recs[..n.min(recs.len())]
    }

    /// One row per metric with every strategy's value.
    ///
    /// Satisfaction is divided by 5 so all rows share the [0, 1] scale.
    /// Strategies without metrics (unknown user) are left out of the rows.
    pub fn metric_rows(&self) -> Vec<MetricRow> {
        let mut rows: Vec<MetricRow> = Vec::new();
        for (&kind, outcome) in &self.outcomes {
            let Some(metrics) = outcome.metrics() else {
                continue;
            };
            for (idx, (metric, value)) in metrics.normalized().into_iter().enumerate() {
                if rows.len() <= idx {
                    rows.push(MetricRow {
                        metric,
                        values: BTreeMap::new(),
                    });
                }
                rows[idx].values.insert(kind, value);
            }
        }
        rows
    }
}

/// Holds the dataset and one configured strategy per kind
pub struct RecommendationEngine {
    dataset: Arc<Dataset>,
    strategies: BTreeMap<StrategyKind, Box<dyn Strategy>>,
}

impl RecommendationEngine {
    /// Create an engine with every strategy in its default configuration
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let strategies = StrategyKind::ALL
            .into_iter()
            .map(|kind| (kind, kind.strategy()))
            .collect();
        Self {
            dataset,
            strategies,
        }
    }

    /// Replace the strategy of the same kind (builder pattern)
    pub fn with_strategy(mut self, strategy: impl Strategy + 'static) -> Self {
        self.strategies.insert(strategy.kind(), Box::new(strategy));
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Run one strategy for a user
    pub fn run(
        &self,
        kind: StrategyKind,
        user_id: UserId,
        rng: &mut dyn RngCore,
    ) -> Result<StrategyOutcome> {
        let strategy = self
            .strategies
            .get(&kind)
            .with_context(|| format!("No strategy registered for {}", kind))?;

        let start = Instant::now();
        let outcome = strategy
            .recommend(&self.dataset, user_id, rng)
            .with_context(|| format!("{} failed for user {}", strategy.name(), user_id))?;

        match &outcome {
            StrategyOutcome::Found {
                recommendations, ..
            } => info!(
                "{} returned {} recommendations for user {} in {:.2?}",
                strategy.name(),
                recommendations.len(),
                user_id,
                start.elapsed()
            ),
            StrategyOutcome::UserNotFound => {
                warn!("{}: user {} not found", strategy.name(), user_id)
            }
        }
        Ok(outcome)
    }

    /// Run every strategy for a user, in `StrategyKind` order
    pub fn compare(&self, user_id: UserId, rng: &mut dyn RngCore) -> Result<Comparison> {
        let start = Instant::now();
        let mut outcomes = BTreeMap::new();
        for &kind in self.strategies.keys() {
            let outcome = self.run(kind, user_id, rng)?;
            outcomes.insert(kind, outcome);
        }
        info!(
            "Compared {} strategies for user {} in {:.2?}",
            outcomes.len(),
            user_id,
            start.elapsed()
        );
        Ok(Comparison { user_id, outcomes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::{DatasetGenerator, Genre, Movie, User};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use strategies::{CollaborativeStrategy, Metrics};

    fn build_engine() -> RecommendationEngine {
        RecommendationEngine::new(Arc::new(DatasetGenerator::new().generate_seeded(42)))
    }

    // ============================================================================
    // Unit Tests: run
    // ============================================================================

    #[test]
    fn test_run_returns_found_for_known_user() {
        let engine = build_engine();
        let outcome = engine
            .run(StrategyKind::ContentBased, 1, &mut StdRng::seed_from_u64(1))
            .expect("run failed");

        assert!(outcome.is_found());
        assert!(outcome.recommendations().len() <= 5);
    }

    #[test]
    fn test_run_unknown_user_is_not_an_error() {
        let engine = build_engine();
        let outcome = engine
            .run(StrategyKind::Hybrid, 999, &mut StdRng::seed_from_u64(1))
            .expect("run failed");
        assert_eq!(outcome, StrategyOutcome::UserNotFound);
    }

    #[test]
    fn test_run_broken_dataset_is_an_error() {
        let movies = vec![Movie::new(1, "Only", Genre::Drama, 4.0, 2000, &[])];
        let users = vec![User::new(1).with_rating(3, 4.0)];
        let engine = RecommendationEngine::new(Arc::new(Dataset::new(movies, users)));

        let err = engine
            .run(StrategyKind::ContentBased, 1, &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Missing reference: Movie with id 3"));
    }

    #[test]
    fn test_with_strategy_replaces_default() {
        let engine = build_engine().with_strategy(CollaborativeStrategy::new().with_limit(2));
        let outcome = engine
            .run(StrategyKind::Collaborative, 1, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert!(outcome.recommendations().len() <= 2);
    }

    // ============================================================================
    // Unit Tests: compare
    // ============================================================================

    #[test]
    fn test_compare_runs_every_strategy() {
        let engine = build_engine();
        let comparison = engine.compare(3, &mut StdRng::seed_from_u64(5)).unwrap();

        assert_eq!(comparison.user_id, 3);
        assert!(comparison.is_found());
        let kinds: Vec<_> = comparison.outcomes.keys().copied().collect();
        assert_eq!(kinds, StrategyKind::ALL.to_vec());
    }

    #[test]
    fn test_compare_unknown_user() {
        let engine = build_engine();
        let comparison = engine.compare(0, &mut StdRng::seed_from_u64(5)).unwrap();

        assert!(!comparison.is_found());
        assert!(comparison.metric_rows().is_empty());
        assert!(comparison.top(StrategyKind::Bandit, 3).is_empty());
    }

    #[test]
    fn test_metric_rows_shape() {
        let engine = build_engine();
        let comparison = engine.compare(2, &mut StdRng::seed_from_u64(5)).unwrap();
        let rows = comparison.metric_rows();

        let names: Vec<_> = rows.iter().map(|r| r.metric).collect();
        assert_eq!(
            names,
            vec!["Precision", "Recall", "F1-Score", "Satisfaction", "Diversity", "Coverage"]
        );
        for row in &rows {
            assert_eq!(row.values.len(), 4);
        }

        let satisfaction = &rows[3].values;
        let expected = Metrics::reported(StrategyKind::Hybrid).satisfaction / 5.0;
        assert_eq!(satisfaction[&StrategyKind::Hybrid], expected);
    }

    #[test]
    fn test_top_truncates() {
        let engine = build_engine();
        let comparison = engine.compare(4, &mut StdRng::seed_from_u64(5)).unwrap();

        for kind in StrategyKind::ALL {
            let top = comparison.top(kind, 3);
            assert!(top.len() <= 3);
            assert_eq!(top, &comparison.get(kind).unwrap().recommendations()[..top.len()]);
        }
    }
}
