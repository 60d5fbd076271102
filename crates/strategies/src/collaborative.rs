//! Collaborative Filtering
//!
//! "Users who rated like you also liked these movies."
//!
//! ## Algorithm
//! 1. Score every other user by rating agreement on the movies both rated:
//!    `similarity = 1 / (1 + mean |r_target - r_other|)`, 0 with nothing in common
//! 2. Keep the 5 most similar users as neighbours
//! 3. For each movie a neighbour rated and the target didn't, sum
//!    `neighbour_rating * similarity` over the neighbours who rated it
//! 4. Sort descending, ties by ascending movie id, and keep the top 5
//!
//! The sum in step 3 is not normalised: a movie rated by several neighbours
//! outranks one rated by a single, equally similar neighbour.

use crate::metrics::Metrics;
use crate::traits::Strategy;
use crate::types::{rank_top, ScoredMovie, StrategyKind, StrategyOutcome, TOP_K};
use dataset::{Dataset, MovieId, Result, User, UserId};
use rand::RngCore;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Another user and how closely their ratings track the target's
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub user: &'a User,
    pub similarity: f64,
}

#[derive(Debug, Clone)]
pub struct CollaborativeStrategy {
    /// How many similar users feed the candidate scores
    neighbor_count: usize,
    limit: usize,
}

impl CollaborativeStrategy {
    pub fn new() -> Self {
        Self {
            neighbor_count: 5,
            limit: TOP_K,
        }
    }

    /// Configure how many neighbours are consulted (default: 5)
    pub fn with_neighbor_count(mut self, count: usize) -> Self {
        self.neighbor_count = count;
        self
    }

    /// Configure how many movies are returned (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The most similar other users, most similar first.
    ///
    /// Users are visited in dataset order and the sort is stable, so equally
    /// similar users keep that order.
    pub fn find_neighbors<'a>(&self, dataset: &'a Dataset, user: &User) -> Vec<Neighbor<'a>> {
        let mut neighbors: Vec<Neighbor<'a>> = dataset
            .users()
            .iter()
            .filter(|other| other.id != user.id)
            .map(|other| Neighbor {
                user: other,
                similarity: user_similarity(user, other),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        neighbors.truncate(self.neighbor_count);
        neighbors
    }

    /// Weighted sum of neighbour ratings for every movie the user hasn't rated
    pub fn candidate_scores(&self, neighbors: &[Neighbor<'_>], user: &User) -> BTreeMap<MovieId, f64> {
        let mut scores: BTreeMap<MovieId, f64> = BTreeMap::new();

        // A zero-similarity neighbour shares no movie with the user and adds nothing
        for neighbor in neighbors.iter().filter(|n| n.similarity > 0.0) {
            for (&movie_id, &rating) in &neighbor.user.ratings {
                if !user.has_rated(movie_id) {
                    *scores.entry(movie_id).or_insert(0.0) += rating * neighbor.similarity;
                }
            }
        }
        scores
    }

    /// Ranked list for a known user
    pub fn rank(&self, dataset: &Dataset, user: &User) -> Result<Vec<ScoredMovie>> {
        let neighbors = self.find_neighbors(dataset, user);
        debug!(
            "Found {} neighbours, {} with shared ratings",
            neighbors.len(),
            neighbors.iter().filter(|n| n.similarity > 0.0).count()
        );

        let scores = self.candidate_scores(&neighbors, user);
        let mut scored = scores
            .into_iter()
            .map(|(movie_id, score)| {
                let movie = dataset.require_movie(movie_id)?;
                Ok(ScoredMovie::new(movie.clone(), score))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Scored {} candidate movies", scored.len());
        rank_top(&mut scored, self.limit);
        Ok(scored)
    }
}

impl Default for CollaborativeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for CollaborativeStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Collaborative
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

/// Rating agreement between two users over the movies both rated.
///
/// 1.0 when every shared rating matches, 0.0 when nothing is shared.
pub fn user_similarity(target: &User, other: &User) -> f64 {
    let (total_difference, common) = target
        .ratings
        .iter()
        .filter_map(|(&movie_id, &rating)| {
            other.rating_for(movie_id).map(|theirs| (rating - theirs).abs())
        })
        .fold((0.0, 0usize), |(sum, count), diff| (sum + diff, count + 1));

    if common == 0 {
        return 0.0;
    }
    1.0 / (1.0 + total_difference / common as f64)
}
