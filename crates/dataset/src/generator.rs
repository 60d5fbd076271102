//! Synthetic dataset generation.
//!
//! The catalog is fixed; users and their ratings are drawn from the RNG the
//! caller hands in. Pass a seeded `StdRng` for reproducible datasets.

use crate::catalog::movie_catalog;
use crate::types::{Dataset, MovieId, User, UserId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use tracing::debug;

/// Number of users in a default dataset
pub const DEFAULT_USER_COUNT: usize = 20;

/// How many movies each user rates
pub const RATINGS_PER_USER: RangeInclusive<usize> = 5..=12;

/// Generates a dataset: the fixed catalog plus random users
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    user_count: usize,
}

impl DatasetGenerator {
    pub fn new() -> Self {
        Self {
            user_count: DEFAULT_USER_COUNT,
        }
    }

    /// Configure the number of synthetic users (default: 20)
    pub fn with_user_count(mut self, count: usize) -> Self {
        self.user_count = count;
        self
    }

    /// Generate with the thread-local RNG
    pub fn generate(&self) -> Dataset {
        self.generate_with(&mut rand::rng())
    }

    /// Generate reproducibly from a seed
    pub fn generate_seeded(&self, seed: u64) -> Dataset {
        self.generate_with(&mut StdRng::seed_from_u64(seed))
    }

    /// Generate using the given RNG.
    ///
    /// ## Algorithm
    /// For each user:
    /// 1. Draw a rating count in [5, 12]
    /// 2. Shuffle the catalog ids and take that many
    /// 3. Give each a rating `round((u * 2 + 3) * 10) / 10`, `u` uniform in [0, 1)
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Dataset {
        let movies = movie_catalog();
        let mut movie_ids: Vec<MovieId> = movies.iter().map(|m| m.id).collect();

        let mut users = Vec::with_capacity(self.user_count);
        for id in 1..=self.user_count as UserId {
            let count = rng.random_range(RATINGS_PER_USER).min(movie_ids.len());
            movie_ids.shuffle(&mut *rng);

            let mut user = User::new(id);
            for &movie_id in &movie_ids[..count] {
                user.ratings.insert(movie_id, random_rating(&mut *rng));
            }
            users.push(user);
        }

        let dataset = Dataset::new(movies, users);
        let (users, movies, ratings) = dataset.counts();
        debug!("Generated dataset: {} users, {} movies, {} ratings", users, movies, ratings);
        dataset
    }
}

impl Default for DatasetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// A rating in [3.0, 5.0] with one decimal place
fn random_rating<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw: f64 = rng.random::<f64>() * 2.0 + 3.0;
    (raw * 10.0).round() / 10.0
}
