//! Content-Based Filtering
//!
//! Scores unseen movies by how much the user liked the movie's genre.
//!
//! ## Algorithm
//! 1. Average the user's ratings per genre
//! 2. For every movie the user hasn't rated:
//!    `score = genre_average * 0.7 + base_rating * 0.3`
//!    (a genre the user never rated counts as 3.0)
//! 3. Sort descending, ties in catalog order, and keep the top 5

use crate::metrics::Metrics;
use crate::traits::Strategy;
use crate::types::{rank_top, ScoredMovie, StrategyKind, StrategyOutcome, TOP_K};
use dataset::{Dataset, Genre, Result, User, UserId};
use rand::RngCore;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Genre preference assumed for genres the user has not rated
pub const FALLBACK_GENRE_SCORE: f64 = 3.0;

#[derive(Debug, Clone)]
pub struct ContentBasedStrategy {
    /// Weight of the user's genre average
    genre_weight: f64,
    /// Weight of the movie's own base rating
    rating_weight: f64,
    fallback_genre_score: f64,
    limit: usize,
}

impl ContentBasedStrategy {
    pub fn new() -> Self {
        Self {
            genre_weight: 0.7,
            rating_weight: 0.3,
            fallback_genre_score: FALLBACK_GENRE_SCORE,
            limit: TOP_K,
        }
    }

    /// Configure the genre/base-rating blend (default: 0.7 / 0.3)
    pub fn with_weights(mut self, genre_weight: f64, rating_weight: f64) -> Self {
        self.genre_weight = genre_weight;
        self.rating_weight = rating_weight;
        self
    }

    /// Configure the score used for unrated genres (default: 3.0)
    pub fn with_fallback_genre_score(mut self, score: f64) -> Self {
        self.fallback_genre_score = score;
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

    /// Blend a genre preference with a movie's base rating
    pub fn score(&self, genre_preference: f64, base_rating: f64) -> f64 {
        genre_preference * self.genre_weight + base_rating * self.rating_weight
    }

    /// Ranked list for a known user
    pub fn rank(&self, dataset: &Dataset, user: &User) -> Result<Vec<ScoredMovie>> {
        let preferences = genre_averages(dataset, user)?;

        let mut scored: Vec<ScoredMovie> = dataset
            .movies()
            .iter()
            .filter(|movie| !user.has_rated(movie.id))
            .map(|movie| {
                let preference = preferences
                    .get(&movie.genre)
                    .copied()
                    .unwrap_or(self.fallback_genre_score);
                ScoredMovie::new(movie.clone(), self.score(preference, movie.base_rating))
            })
            .collect();

        debug!(
            "Scored {} unrated movies over {} rated genres",
            scored.len(),
            preferences.len()
        );
        rank_top(&mut scored, self.limit);
        Ok(scored)
    }
}

impl Default for ContentBasedStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for ContentBasedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ContentBased
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

/// Average rating the user gave per genre.
///
/// Genres the user never rated are absent from the map. A rating for a
/// movie missing from the catalog is a `MissingReference` error.
pub fn genre_averages(dataset: &Dataset, user: &User) -> Result<HashMap<Genre, f64>> {
    let mut genre_stats: HashMap<Genre, (f64, u32)> = HashMap::new();
    for (&movie_id, &rating) in &user.ratings {
        let movie = dataset.require_movie(movie_id)?;
        let entry = genre_stats.entry(movie.genre).or_insert((0.0, 0));
        entry.0 += rating;
        entry.1 += 1;
    }

    Ok(genre_stats
        .into_iter()
        .map(|(genre, (sum, count))| (genre, sum / count as f64))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_close, fixture_dataset, ids, seeded_rng};
    use dataset::{DatasetError, Movie};

    #[test]
    fn test_genre_averages() {
        let dataset = fixture_dataset();
        let user = dataset.get_user(3).unwrap();
        let averages = genre_averages(&dataset, user).unwrap();

        assert_eq!(averages.len(), 2);
        assert_close(averages[&Genre::Drama], 4.0);
        assert_close(averages[&Genre::Comedy], 5.0);
    }

    #[test]
    fn test_ranking_for_fixture_user() {
        let dataset = fixture_dataset();
        let outcome = ContentBasedStrategy::new()
            .recommend(&dataset, 1, &mut seeded_rng())
            .unwrap();

        let recs = outcome.recommendations();
        assert_eq!(ids(recs), vec![2, 7, 4, 6, 5]);
        assert_close(recs[0].score, 5.0 * 0.7 + 4.0 * 0.3);
        assert_close(recs[2].score, 3.0 * 0.7 + 4.7 * 0.3);
        assert_eq!(
            outcome.metrics(),
            Some(&Metrics::reported(StrategyKind::ContentBased))
        );
    }

    #[test]
    fn test_unrated_genre_falls_back_to_three() {
        let dataset = fixture_dataset();
        let strategy = ContentBasedStrategy::new();
        let user = dataset.get_user(1).unwrap();
        let recs = strategy.rank(&dataset, user).unwrap();

        // User 1 never rated a comedy
        let comedy = recs.iter().find(|r| r.movie.genre == Genre::Comedy).unwrap();
        assert_close(comedy.score, strategy.score(3.0, comedy.movie.base_rating));
    }

    #[test]
    fn test_user_without_ratings_single_movie() {
        let movies = vec![Movie::new(1, "Lonely Drama", Genre::Drama, 5.0, 2001, &[])];
        let dataset = Dataset::new(movies, vec![dataset::User::new(1)]);

        let outcome = ContentBasedStrategy::new()
            .recommend(&dataset, 1, &mut seeded_rng())
            .unwrap();

        let recs = outcome.recommendations();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].movie.title, "Lonely Drama");
        assert_close(recs[0].score, 3.0 * 0.7 + 5.0 * 0.3);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let movies = vec![
            Movie::new(3, "C", Genre::Action, 4.0, 2000, &[]),
            Movie::new(1, "A", Genre::Action, 4.0, 2000, &[]),
            Movie::new(2, "B", Genre::Action, 4.0, 2000, &[]),
        ];
        let dataset = Dataset::new(movies, vec![dataset::User::new(1)]);
        let recs = ContentBasedStrategy::new()
            .recommend(&dataset, 1, &mut seeded_rng())
            .unwrap()
            .into_recommendations();

        assert_eq!(ids(&recs), vec![3, 1, 2]);
    }

    #[test]
    fn test_limit_and_excludes_rated() {
        let dataset = fixture_dataset();
        let strategy = ContentBasedStrategy::new().with_limit(2);
        let user = dataset.get_user(2).unwrap();
        let recs = strategy.rank(&dataset, user).unwrap();

        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| !user.has_rated(r.movie_id())));
    }

    #[test]
    fn test_unknown_user() {
        let dataset = fixture_dataset();
        let outcome = ContentBasedStrategy::new()
            .recommend(&dataset, 404, &mut seeded_rng())
            .unwrap();
        assert_eq!(outcome, StrategyOutcome::UserNotFound);
    }

    #[test]
    fn test_dangling_rating_is_an_error() {
        let movies = vec![Movie::new(1, "Only", Genre::Drama, 4.0, 2000, &[])];
        let users = vec![dataset::User::new(1).with_rating(9, 4.0)];
        let dataset = Dataset::new(movies, users);

        let err = ContentBasedStrategy::new()
            .recommend(&dataset, 1, &mut seeded_rng())
            .unwrap_err();
        assert_eq!(err, DatasetError::missing_movie(9));
    }
}
