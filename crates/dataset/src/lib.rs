//! # Dataset Crate
//!
//! Synthetic data for the recommendation engine: a fixed catalog of 15
//! movies and a set of randomly generated users with ratings.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (User, Movie, Genre, Dataset)
//! - **catalog**: The fixed movie catalog
//! - **generator**: Random users and ratings on top of the catalog
//! - **error**: Error types for broken dataset invariants
//!
//! ## Example Usage
//!
//! ```ignore
//! use dataset::DatasetGenerator;
//!
//! // Same seed, same users and ratings
//! let dataset = DatasetGenerator::new().generate_seeded(42);
//!
//! let user = dataset.get_user(1).unwrap();
//! println!("{} rated {} movies", user.name, user.rating_count());
//! ```

pub mod catalog;
pub mod error;
pub mod generator;
pub mod types;

pub use catalog::movie_catalog;
pub use error::{DatasetError, Result};
pub use generator::{DatasetGenerator, DEFAULT_USER_COUNT, RATINGS_PER_USER};
pub use types::{Dataset, Genre, Movie, MovieId, User, UserId, MAX_RATING, MIN_RATING};
