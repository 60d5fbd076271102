//! Core domain types for the synthetic movie dataset.
//!
//! The dataset is built once and then only read: every strategy borrows a
//! `&Dataset` and clones the movies it recommends.

use crate::error::{DatasetError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user (1-20 in a generated dataset)
pub type UserId = u32;

/// Unique identifier for a movie (1-15 in the built-in catalog)
pub type MovieId = u32;

/// Lowest rating a user can give
pub const MIN_RATING: f64 = 0.0;

/// Highest rating a user can give
pub const MAX_RATING: f64 = 5.0;

// =============================================================================
// Movie-related Types
// =============================================================================

/// Movie genres of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    SciFi,
    Romance,
    Thriller,
    Horror,
    Documentary,
}

impl Genre {
    /// Every genre, in catalog order
    pub const ALL: [Genre; 8] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::SciFi,
        Genre::Romance,
        Genre::Thriller,
        Genre::Horror,
        Genre::Documentary,
    ];

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::SciFi => "Sci-Fi",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Horror => "Horror",
            Genre::Documentary => "Documentary",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Represents a movie in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genre: Genre,
    /// Catalog-wide rating in [0, 5], independent of any user
    pub base_rating: f64,
    pub year: u16,
    pub tags: BTreeSet<String>,
}

impl Movie {
    pub fn new(
        id: MovieId,
        title: impl Into<String>,
        genre: Genre,
        base_rating: f64,
        year: u16,
        tags: &[&str],
    ) -> Self {
        Self {
            id,
            title: title.into(),
            genre,
            base_rating,
            year,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

// =============================================================================
// User-related Types
// =============================================================================

/// A synthetic user and the ratings they gave.
///
/// Ratings live in a `BTreeMap` so iteration runs in ascending movie id
/// order. Collaborative scoring relies on that order to break ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub ratings: BTreeMap<MovieId, f64>,
}

impl User {
    /// Create a user with no ratings, named "User {id}"
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            name: format!("User {}", id),
            ratings: BTreeMap::new(),
        }
    }

    /// Builder-style helper used by tests and hand-made datasets
    pub fn with_rating(mut self, movie_id: MovieId, rating: f64) -> Self {
        self.ratings.insert(movie_id, rating);
        self
    }

    pub fn rating_for(&self, movie_id: MovieId) -> Option<f64> {
        self.ratings.get(&movie_id).copied()
    }

    pub fn has_rated(&self, movie_id: MovieId) -> bool {
        self.ratings.contains_key(&movie_id)
    }

    pub fn rating_count(&self) -> usize {
        self.ratings.len()
    }
}

// =============================================================================
// Dataset - the read-only in-memory store
// =============================================================================

/// Catalog plus users. Built once, never mutated afterwards.
///
/// Movies keep their catalog order; `movie_index` maps ids to positions for
/// O(1) lookups.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    movies: Vec<Movie>,
    users: Vec<User>,
    #[serde(skip)]
    movie_index: HashMap<MovieId, usize>,
    #[serde(skip)]
    user_index: HashMap<UserId, usize>,
}

impl Dataset {
    /// Build a dataset from movies and users.
    ///
    /// No validation happens here; call [`Dataset::validate`] when the input
    /// comes from somewhere other than the generator.
    pub fn new(movies: Vec<Movie>, users: Vec<User>) -> Self {
        let movie_index = movies
            .iter()
            .enumerate()
            .map(|(pos, movie)| (movie.id, pos))
            .collect();
        let user_index = users
            .iter()
            .enumerate()
            .map(|(pos, user)| (user.id, pos))
            .collect();

        Self {
            movies,
            users,
            movie_index,
            user_index,
        }
    }

    /// Movies in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movie_index.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Like [`Dataset::get_movie`] but a miss is an error
    pub fn require_movie(&self, id: MovieId) -> Result<&Movie> {
        self.get_movie(id).ok_or_else(|| DatasetError::missing_movie(id))
    }

    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.user_index.get(&id).map(|&pos| &self.users[pos])
    }

    /// (users, movies, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let ratings = self.users.iter().map(User::rating_count).sum();
        (self.users.len(), self.movies.len(), ratings)
    }

    /// Check the dataset invariants.
    ///
    /// - movie and user ids are unique
    /// - base ratings and user ratings lie in [0, 5]
    /// - every rating refers to a movie in the catalog
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for movie in &self.movies {
            if !seen.insert(movie.id) {
                return Err(DatasetError::DuplicateId {
                    entity: "Movie".to_string(),
                    id: movie.id,
                });
            }
            check_rating_range("base_rating", movie.base_rating)?;
        }

        let mut seen = HashSet::new();
        for user in &self.users {
            if !seen.insert(user.id) {
                return Err(DatasetError::DuplicateId {
                    entity: "User".to_string(),
                    id: user.id,
                });
            }
            for (&movie_id, &rating) in &user.ratings {
                self.require_movie(movie_id)?;
                check_rating_range("rating", rating)?;
            }
        }
        Ok(())
    }
}

fn check_rating_range(field: &str, value: f64) -> Result<()> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(())
    } else {
        Err(DatasetError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_dataset() -> Dataset {
        let movies = vec![
            Movie::new(1, "First", Genre::Drama, 4.0, 2000, &["a"]),
            Movie::new(2, "Second", Genre::SciFi, 3.5, 2001, &["b", "c"]),
        ];
        let users = vec![User::new(1).with_rating(2, 4.5), User::new(2)];
        Dataset::new(movies, users)
    }

    #[test]
    fn test_lookups() {
        let dataset = small_dataset();

        assert_eq!(dataset.get_movie(2).unwrap().title, "Second");
        assert_eq!(dataset.get_user(1).unwrap().name, "User 1");
        assert!(dataset.get_movie(99).is_none());
        assert!(dataset.get_user(99).is_none());
        assert_eq!(dataset.counts(), (2, 2, 1));
    }

    #[test]
    fn test_require_movie_reports_missing_reference() {
        let dataset = small_dataset();
        let err = dataset.require_movie(7).unwrap_err();
        assert_eq!(err, DatasetError::missing_movie(7));
    }

    #[test]
    fn test_validate_ok() {
        assert!(small_dataset().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_dangling_rating() {
        let movies = vec![Movie::new(1, "Only", Genre::Action, 4.0, 1999, &[])];
        let users = vec![User::new(1).with_rating(5, 4.0)];
        let err = Dataset::new(movies, users).validate().unwrap_err();

        assert!(matches!(
            err,
            DatasetError::MissingReference { id: 5, .. }
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_rating() {
        let movies = vec![Movie::new(1, "Only", Genre::Action, 4.0, 1999, &[])];
        let users = vec![User::new(1).with_rating(1, 7.5)];
        let err = Dataset::new(movies, users).validate().unwrap_err();

        assert!(matches!(err, DatasetError::InvalidValue { .. }));
    }

    #[test]
    fn test_validate_rejects_duplicate_user() {
        let users = vec![User::new(3), User::new(3)];
        let err = Dataset::new(Vec::new(), users).validate().unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateId { id: 3, .. }));
    }

    #[test]
    fn test_genre_labels() {
        assert_eq!(Genre::SciFi.to_string(), "Sci-Fi");
        assert_eq!(Genre::ALL.len(), 8);
    }

    #[test]
    fn test_movie_serializes_tags_sorted() {
        let movie = Movie::new(1, "Tagged", Genre::Comedy, 4.2, 2009, &["vegas", "party"]);
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["tags"], serde_json::json!(["party", "vegas"]));
        assert_eq!(json["genre"], "Comedy");
    }
}
