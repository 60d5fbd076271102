//! The `Strategy` trait every recommender implements.

use crate::bandit::BanditStrategy;
use crate::collaborative::CollaborativeStrategy;
use crate::content_based::ContentBasedStrategy;
use crate::hybrid::HybridStrategy;
use crate::types::{StrategyKind, StrategyOutcome};
use dataset::{Dataset, Result, UserId};
use rand::RngCore;

/// A recommendation strategy.
///
/// ## Design Note
/// - Strategies hold only configuration, so one instance can serve any
///   number of calls against any dataset
/// - The RNG is a parameter: deterministic strategies ignore it, the bandit
///   draws from it, and tests pass a seeded `StdRng`
/// - An unknown user is `Ok(StrategyOutcome::UserNotFound)`; `Err` means the
///   dataset itself is broken (a rating for a movie that doesn't exist)
pub trait Strategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Returns the name of this strategy (for logging/display)
    fn name(&self) -> &str {
        self.kind().display_name()
    }

    /// Rank movies the user hasn't rated yet
    fn recommend(
        &self,
        dataset: &Dataset,
        user_id: UserId,
        rng: &mut dyn RngCore,
    ) -> Result<StrategyOutcome>;
}

impl StrategyKind {
    /// A strategy of this kind with default configuration
    pub fn strategy(&self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::ContentBased => Box::new(ContentBasedStrategy::new()),
            StrategyKind::Collaborative => Box::new(CollaborativeStrategy::new()),
            StrategyKind::Hybrid => Box::new(HybridStrategy::new()),
            StrategyKind::Bandit => Box::new(BanditStrategy::new()),
        }
    }
}
