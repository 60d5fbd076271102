//! # Strategies Crate
//!
//! The four recommendation strategies the engine compares.
//!
//! ## Components
//!
//! ### Content-Based Filtering
//! Genre affinity: the user's average rating per genre blended with each
//! movie's base rating.
//!
//! ### Collaborative Filtering
//! "Users who rated like you also liked...": the five most similar users
//! vote for the movies they rated, weighted by similarity.
//!
//! ### Hybrid
//! Rank points from the two lists above, weighted 0.4 / 0.6.
//!
//! ### Multi-Armed Bandit
//! UCB1 over simulated pull counts: base rating as the reward, plus an
//! exploration bonus that shrinks with the number of pulls.
//!
//! ## Example Usage
//!
//! ```ignore
//! use dataset::DatasetGenerator;
//! use rand::{rngs::StdRng, SeedableRng};
//! use strategies::{Strategy, StrategyKind};
//!
//! let dataset = DatasetGenerator::new().generate_seeded(42);
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let outcome = StrategyKind::Collaborative
//!     .strategy()
//!     .recommend(&dataset, 1, &mut rng)?;
//!
//! for rec in outcome.recommendations() {
//!     println!("{} ({:.2})", rec.movie.title, rec.score);
//! }
//! ```
//!
//! Every strategy returns at most five movies and never one the user has
//! already rated. An unknown user id yields `StrategyOutcome::UserNotFound`.

pub mod bandit;
pub mod collaborative;
pub mod content_based;
pub mod hybrid;
pub mod metrics;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use bandit::BanditStrategy;
pub use collaborative::{user_similarity, CollaborativeStrategy};
pub use content_based::ContentBasedStrategy;
pub use hybrid::HybridStrategy;
pub use metrics::Metrics;
pub use traits::Strategy;
pub use types::{BanditArm, ScoredMovie, StrategyKind, StrategyOutcome, UnknownStrategy, TOP_K};


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded_rng;
    use dataset::DatasetGenerator;

    #[test]
    fn test_every_strategy_respects_top_k_and_history() {
        let mut rng = seeded_rng();
        for seed in 0..10 {
            let dataset = DatasetGenerator::new().generate_seeded(seed);
            for kind in StrategyKind::ALL {
                let strategy = kind.strategy();
                for user in dataset.users() {
                    let outcome = strategy.recommend(&dataset, user.id, &mut rng).unwrap();
                    let recs = outcome.recommendations();

                    assert!(recs.len() <= TOP_K, "{} returned {}", kind, recs.len());
                    assert!(
                        recs.iter().all(|r| !user.has_rated(r.movie_id())),
                        "{} recommended a rated movie to user {}",
                        kind,
                        user.id
                    );
                    assert_eq!(outcome.metrics(), Some(&Metrics::reported(kind)));
                }
            }
        }
    }

    #[test]
    fn test_every_strategy_handles_unknown_user() {
        let dataset = DatasetGenerator::new().generate_seeded(1);
        let mut rng = seeded_rng();
        for kind in StrategyKind::ALL {
            let outcome = kind.strategy().recommend(&dataset, 21, &mut rng).unwrap();
            assert_eq!(outcome, StrategyOutcome::UserNotFound);
            assert!(outcome.recommendations().is_empty());
            assert!(outcome.metrics().is_none());
        }
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(StrategyKind::Hybrid.strategy().name(), "Hybrid Approach");
        assert_eq!(StrategyKind::Bandit.strategy().kind(), StrategyKind::Bandit);
    }
}
