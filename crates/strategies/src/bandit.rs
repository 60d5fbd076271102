//! Multi-Armed Bandit ranker
//!
//! Treats every unrated movie as an arm and ranks arms by an upper
//! confidence bound (UCB1).
//!
//! ## Algorithm
//! For every movie the user hasn't rated:
//! 1. Draw a simulated pull count uniformly from [10, 29]
//! 2. `average_reward = base_rating / 5`
//! 3. `exploration_bonus = sqrt(2 * ln(100) / pulls)`
//! 4. `score = average_reward + exploration_bonus`
//!
//! Then sort descending and keep the top 5. The pull counts come from the
//! injected RNG and are not backed by any interaction log, so two calls
//! with differently seeded RNGs may order the same movies differently.

use crate::metrics::Metrics;
use crate::traits::Strategy;
use crate::types::{rank_top, BanditArm, ScoredMovie, StrategyKind, StrategyOutcome, TOP_K};
use dataset::{Dataset, Result, User, UserId, MAX_RATING};
use rand::{Rng, RngCore};
use std::ops::Range;
use tracing::{debug, instrument};

/// Total number of rounds the exploration bonus is computed against
pub const TOTAL_ROUNDS: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct BanditStrategy {
    /// Range the simulated pull counts are drawn from
    pulls: Range<u32>,
    total_rounds: f64,
    limit: usize,
}

impl BanditStrategy {
    pub fn new() -> Self {
        Self {
            pulls: 10..30,
            total_rounds: TOTAL_ROUNDS,
            limit: TOP_K,
        }
    }

    /// Configure the simulated pull count range (default: 10..30)
    pub fn with_pulls(mut self, pulls: Range<u32>) -> Self {
        self.pulls = pulls;
        self
    }

    /// Configure the number of rounds in the exploration term (default: 100)
    pub fn with_total_rounds(mut self, rounds: f64) -> Self {
        self.total_rounds = rounds;
        self
    }

    /// Configure how many movies are returned (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Build the arm for one movie from a pull count
    pub fn arm(&self, base_rating: f64, pulls: u32) -> BanditArm {
        BanditArm {
            pulls,
            average_reward: base_rating / MAX_RATING,
            exploration_bonus: exploration_bonus(pulls, self.total_rounds),
        }
    }

    /// Ranked list for a known user
    pub fn rank(&self, dataset: &Dataset, user: &User, rng: &mut dyn RngCore) -> Vec<ScoredMovie> {
        let mut scored: Vec<ScoredMovie> = dataset
            .movies()
            .iter()
            .filter(|movie| !user.has_rated(movie.id))
            .map(|movie| {
                let pulls = rng.random_range(self.pulls.clone());
                let arm = self.arm(movie.base_rating, pulls);
                ScoredMovie {
                    movie: movie.clone(),
                    score: arm.average_reward + arm.exploration_bonus,
                    arm: Some(arm),
                }
            })
            .collect();

        debug!("Scored {} arms", scored.len());
        rank_top(&mut scored, self.limit);
        scored
    }
}

impl Default for BanditStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for BanditStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Bandit
    }

    #[instrument(skip(self, dataset, rng))]
    fn recommend(
        &self,
        dataset: &Dataset,
        user_id: UserId,
        rng: &mut dyn RngCore,
    ) -> Result<StrategyOutcome> {
        let Some(user) = dataset.get_user(user_id) else {
            debug!("User {} not found", user_id);
            return Ok(StrategyOutcome::UserNotFound);
        };

        Ok(StrategyOutcome::Found {
            recommendations: self.rank(dataset, user, rng),
            metrics: Metrics::reported(self.kind()),
        })
    }
}

/// UCB1 exploration term: `sqrt(2 * ln(total_rounds) / pulls)`
pub fn exploration_bonus(pulls: u32, total_rounds: f64) -> f64 {
    ((2.0 * total_rounds.ln()) / pulls as f64).sqrt()
}

/// Average reward (`base_rating / 5`) plus the exploration bonus
pub fn ucb_score(base_rating: f64, pulls: u32, total_rounds: f64) -> f64 {
    base_rating / MAX_RATING + exploration_bonus(pulls, total_rounds)
}
