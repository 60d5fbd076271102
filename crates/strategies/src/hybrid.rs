//! Hybrid strategy
//!
//! Blends the content-based and collaborative top lists by rank.
//!
//! ## Algorithm
//! 1. Run both strategies
//! 2. A movie at position `i` of a list earns `(5 - i)` rank points,
//!    scaled by 0.4 for content-based and 0.6 for collaborative
//! 3. Points add up for movies on both lists
//! 4. Sort the union descending, ties by ascending movie id, keep the top 5

use crate::collaborative::CollaborativeStrategy;
use crate::content_based::ContentBasedStrategy;
use crate::metrics::Metrics;
use crate::traits::Strategy;
use crate::types::{rank_top, ScoredMovie, StrategyKind, StrategyOutcome, TOP_K};
use dataset::{Dataset, MovieId, Result, User, UserId};
use rand::RngCore;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct HybridStrategy {
    content: ContentBasedStrategy,
    collaborative: CollaborativeStrategy,
    content_weight: f64,
    collaborative_weight: f64,
    limit: usize,
}

impl HybridStrategy {
    pub fn new() -> Self {
        Self {
            content: ContentBasedStrategy::new(),
            collaborative: CollaborativeStrategy::new(),
            content_weight: 0.4,
            collaborative_weight: 0.6,
            limit: TOP_K,
        }
    }

    /// Configure the per-list weights (default: 0.4 content, 0.6 collaborative)
    pub fn with_weights(mut self, content_weight: f64, collaborative_weight: f64) -> Self {
        self.content_weight = content_weight;
        self.collaborative_weight = collaborative_weight;
        self
    }

    /// Replace the underlying strategies
    pub fn with_components(
        mut self,
        content: ContentBasedStrategy,
        collaborative: CollaborativeStrategy,
    ) -> Self {
        self.content = content;
        self.collaborative = collaborative;
        self
    }

    /// Configure how many movies are returned (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Weighted rank points of a content-based list position
    pub fn content_points(&self, position: usize) -> f64 {
        rank_points(self.content.limit(), position) * self.content_weight
    }

    /// Weighted rank points of a collaborative list position
    pub fn collaborative_points(&self, position: usize) -> f64 {
        rank_points(self.collaborative.limit(), position) * self.collaborative_weight
    }

    /// Ranked list for a known user
    pub fn rank(&self, dataset: &Dataset, user: &User) -> Result<Vec<ScoredMovie>> {
        let content = self.content.rank(dataset, user)?;
        let collaborative = self.collaborative.rank(dataset, user)?;
        Ok(self.combine(content, collaborative))
    }

    /// Merge two ranked lists into one by weighted rank points
    pub fn combine(
        &self,
        content: Vec<ScoredMovie>,
        collaborative: Vec<ScoredMovie>,
    ) -> Vec<ScoredMovie> {
        let content_len = content.len();
        let collaborative_len = collaborative.len();

        let mut combined: BTreeMap<MovieId, ScoredMovie> = BTreeMap::new();
        for (position, rec) in content.into_iter().enumerate() {
            let points = self.content_points(position);
            combined.insert(rec.movie_id(), ScoredMovie::new(rec.movie, points));
        }
        for (position, rec) in collaborative.into_iter().enumerate() {
            let points = self.collaborative_points(position);
            match combined.entry(rec.movie_id()) {
                Entry::Occupied(mut existing) => existing.get_mut().score += points,
                Entry::Vacant(slot) => {
                    slot.insert(ScoredMovie::new(rec.movie, points));
                }
            }
        }

        let mut scored: Vec<ScoredMovie> = combined.into_values().collect();
        debug!(
            "Combined lists: content={}, collaborative={}, union={}",
            content_len,
            collaborative_len,
            scored.len()
        );
        rank_top(&mut scored, self.limit);
        scored
    }
}

impl Default for HybridStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for HybridStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Hybrid
    }

    #[instrument(skip(self, dataset, _rng))]
    fn recommend(
        &self,
        dataset: &Dataset,
        user_id: UserId,
        _rng: &mut dyn RngCore,
    ) -> Result<StrategyOutcome> {
        let Some(user) = dataset.get_user(user_id) else {
            debug!("User {} not found", user_id);
            return Ok(StrategyOutcome::UserNotFound);
        };

        Ok(StrategyOutcome::Found {
            recommendations: self.rank(dataset, user)?,
            metrics: Metrics::reported(self.kind()),
        })
    }
}

/// `(list_len - position)`: 5 for the head of a top-5 list, 1 for its tail
fn rank_points(list_len: usize, position: usize) -> f64 {
    list_len.saturating_sub(position) as f64
}
