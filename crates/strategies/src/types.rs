//! Result types shared by every strategy.

use crate::metrics::Metrics;
use dataset::{Movie, MovieId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Number of recommendations a strategy returns by default
pub const TOP_K: usize = 5;

/// The four recommendation strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrategyKind {
    #[serde(rename = "content-based")]
    ContentBased,
    #[serde(rename = "collaborative")]
    Collaborative,
    #[serde(rename = "hybrid")]
    Hybrid,
    #[serde(rename = "mab")]
    Bandit,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::ContentBased,
        StrategyKind::Collaborative,
        StrategyKind::Hybrid,
        StrategyKind::Bandit,
    ];

    /// Stable key used on the command line and in JSON output
    pub fn key(&self) -> &'static str {
        match self {
            StrategyKind::ContentBased => "content-based",
            StrategyKind::Collaborative => "collaborative",
            StrategyKind::Hybrid => "hybrid",
            StrategyKind::Bandit => "mab",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StrategyKind::ContentBased => "Content-Based Filtering",
            StrategyKind::Collaborative => "Collaborative Filtering",
            StrategyKind::Hybrid => "Hybrid Approach",
            StrategyKind::Bandit => "Multi-Armed Bandit",
        }
    }

    /// First word of the display name, for narrow table columns
    pub fn short_name(&self) -> &'static str {
        match self {
            StrategyKind::ContentBased => "Content-Based",
            StrategyKind::Collaborative => "Collaborative",
            StrategyKind::Hybrid => "Hybrid",
            StrategyKind::Bandit => "MAB",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::ContentBased => "Recommends based on item features and user preferences",
            StrategyKind::Collaborative => "Finds similar users and recommends their favorites",
            StrategyKind::Hybrid => "Combines multiple algorithms for better accuracy",
            StrategyKind::Bandit => "Balances exploration and exploitation dynamically",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a strategy key doesn't name any strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = StrategyKind::ALL.iter().map(|k| k.key()).collect();
        write!(f, "unknown strategy '{}' (expected one of: {})", self.0, keys.join(", "))
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "content-based" | "content" | "contentbased" | "cb" => Ok(StrategyKind::ContentBased),
            "collaborative" | "cf" => Ok(StrategyKind::Collaborative),
            "hybrid" => Ok(StrategyKind::Hybrid),
            "mab" | "bandit" => Ok(StrategyKind::Bandit),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// Exploration statistics attached to bandit recommendations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BanditArm {
    pub pulls: u32,
    pub average_reward: f64,
    pub exploration_bonus: f64,
}

/// A recommended movie together with the score that ranked it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMovie {
    pub movie: Movie,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm: Option<BanditArm>,
}

impl ScoredMovie {
    pub fn new(movie: Movie, score: f64) -> Self {
        Self {
            movie,
            score,
            arm: None,
        }
    }

    pub fn movie_id(&self) -> MovieId {
        self.movie.id
    }
}

/// Result of running a strategy for one user.
///
/// `UserNotFound` carries neither recommendations nor metrics; callers get
/// an empty slice and `None` from the accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StrategyOutcome {
    Found {
        recommendations: Vec<ScoredMovie>,
        metrics: Metrics,
    },
    UserNotFound,
}

impl StrategyOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, StrategyOutcome::Found { .. })
    }

    pub fn recommendations(&self) -> &[ScoredMovie] {
        match self {
            StrategyOutcome::Found {
                recommendations, ..
            } => recommendations,
            StrategyOutcome::UserNotFound => &[],
        }
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        match self {
            StrategyOutcome::Found { metrics, .. } => Some(metrics),
            StrategyOutcome::UserNotFound => None,
        }
    }

    pub fn into_recommendations(self) -> Vec<ScoredMovie> {
        match self {
            StrategyOutcome::Found {
                recommendations, ..
            } => recommendations,
            StrategyOutcome::UserNotFound => Vec::new(),
        }
    }
}

/// Sort by score DESC and keep the first `limit`.
///
/// `sort_by` is stable, so equal scores keep their incoming order.
pub(crate) fn rank_top(scored: &mut Vec<ScoredMovie>, limit: usize) {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
}
