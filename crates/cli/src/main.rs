use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dataset::{Dataset, DatasetGenerator, UserId};
use engine::{Comparison, RecommendationEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::Arc;
use strategies::{ScoredMovie, StrategyKind, StrategyOutcome};
use tracing::debug;

/// Comparative movie recommender
#[derive(Parser)]
#[command(name = "rec-compare")]
#[command(about = "Compare recommendation strategies on a synthetic movie dataset", long_about = None)]
struct Cli {
    /// Seed for the dataset and the bandit draws (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of synthetic users to generate
    #[arg(long, global = true, default_value = "20")]
    users: usize,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one strategy for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long, default_value = "1")]
        user_id: UserId,

        /// Strategy key: content-based, collaborative, hybrid or mab
        #[arg(long, default_value = "collaborative")]
        strategy: StrategyKind,

        /// Show how each score was made up
        #[arg(long)]
        explain: bool,
    },

    /// Run every strategy for a user and compare their metrics
    Compare {
        /// User ID to compare strategies for
        #[arg(long, default_value = "1")]
        user_id: UserId,
    },

    /// Show the movie catalog and a sample of users
    Dataset {
        /// How many users to list
        #[arg(long, default_value = "5")]
        sample: usize,
    },

    /// List every user with their rating count
    Users,

    /// Describe the available strategies
    Strategies,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let dataset = Arc::new(
        DatasetGenerator::new()
            .with_user_count(cli.users)
            .generate_with(&mut rng),
    );
    dataset.validate().context("Generated dataset is inconsistent")?;
    debug!("Dataset ready (seed: {:?})", cli.seed);

    let engine = RecommendationEngine::new(dataset.clone());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            user_id,
            strategy,
            explain,
        } => handle_recommend(&engine, &mut rng, user_id, strategy, explain, cli.json)?,
        Commands::Compare { user_id } => handle_compare(&engine, &mut rng, user_id, cli.json)?,
        Commands::Dataset { sample } => handle_dataset(&dataset, sample, cli.json)?,
        Commands::Users => handle_users(&dataset, cli.json)?,
        Commands::Strategies => handle_strategies(cli.json)?,
    }

    Ok(())
}

#[derive(Serialize)]
struct RecommendOutput<'a> {
    strategy: StrategyKind,
    user_id: UserId,
    #[serde(flatten)]
    outcome: &'a StrategyOutcome,
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &RecommendationEngine,
    rng: &mut StdRng,
    user_id: UserId,
    strategy: StrategyKind,
    explain: bool,
    json: bool,
) -> Result<()> {
    let outcome = engine.run(strategy, user_id, rng)?;

    if json {
        return print_json(&RecommendOutput {
            strategy,
            user_id,
            outcome: &outcome,
        });
    }

    println!(
        "{}",
        format!("{} for User {}", strategy.display_name(), user_id).bold().blue()
    );
    let StrategyOutcome::Found {
        recommendations,
        metrics,
    } = &outcome
    else {
        print_user_not_found(user_id);
        return Ok(());
    };

    print_recommendations(recommendations, explain);

    println!("\n{}", "Metrics:".bold());
    println!("{}Precision: {:.2}", "• ".cyan(), metrics.precision);
    println!("{}Recall: {:.2}", "• ".cyan(), metrics.recall);
    println!("{}F1-Score: {:.2}", "• ".cyan(), metrics.f1_score);
    println!("{}Satisfaction: {:.1}/5", "• ".cyan(), metrics.satisfaction);
    println!("{}Diversity: {:.0}%", "• ".cyan(), metrics.diversity * 100.0);
    println!("{}Coverage: {:.0}%", "• ".cyan(), metrics.coverage * 100.0);
    Ok(())
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    #[serde(flatten)]
    comparison: &'a Comparison,
    metric_rows: Vec<engine::MetricRow>,
}

/// Handle the 'compare' command
fn handle_compare(
    engine: &RecommendationEngine,
    rng: &mut StdRng,
    user_id: UserId,
    json: bool,
) -> Result<()> {
    let comparison = engine.compare(user_id, rng)?;

    if json {
        return print_json(&CompareOutput {
            comparison: &comparison,
            metric_rows: comparison.metric_rows(),
        });
    }

    println!("{}", format!("Strategy comparison for User {}", user_id).bold().blue());
    if !comparison.is_found() {
        print_user_not_found(user_id);
        return Ok(());
    }

    // Metrics table, every value on a 0-1 scale
    print!("{:<14}", "");
    for kind in comparison.outcomes.keys() {
        print!("{:>15}", kind.short_name());
    }
    println!();
    for row in comparison.metric_rows() {
        print!("{:<14}", row.metric);
        for value in row.values.values() {
            print!("{:>15.2}", value);
        }
        println!();
    }

    // Top picks per strategy
    for kind in comparison.outcomes.keys() {
        println!("\n{}", kind.display_name().bold());
        for (idx, rec) in comparison.top(*kind, 3).iter().enumerate() {
            println!(
                "  {}. {} ({:.2})",
                (idx + 1).to_string().green(),
                rec.movie.title,
                rec.score
            );
        }
    }
    Ok(())
}

/// Handle the 'dataset' command
fn handle_dataset(dataset: &Dataset, sample: usize, json: bool) -> Result<()> {
    if json {
        return print_json(dataset);
    }

    let (users, movies, ratings) = dataset.counts();
    println!(
        "{}",
        format!("Dataset: {} movies, {} users, {} ratings", movies, users, ratings)
            .bold()
            .blue()
    );

    println!("\n{}", "Movies:".bold());
    for movie in dataset.movies() {
        let tags = movie.tags.iter().cloned().collect::<Vec<_>>().join(", ");
        println!(
            "  {:>2}. {} ({}) [{}] ★ {:.1}  {}",
            movie.id,
            movie.title,
            movie.year,
            movie.genre,
            movie.base_rating,
            tags.dimmed()
        );
    }

    println!("\n{}", "Users:".bold());
    for user in dataset.users().iter().take(sample) {
        println!("  {} - Rated {} movies", user.name, user.rating_count());
    }
    Ok(())
}

#[derive(Serialize)]
struct UserSummary<'a> {
    id: UserId,
    name: &'a str,
    rating_count: usize,
}

/// Handle the 'users' command
fn handle_users(dataset: &Dataset, json: bool) -> Result<()> {
    let summaries: Vec<UserSummary> = dataset
        .users()
        .iter()
        .map(|user| UserSummary {
            id: user.id,
            name: &user.name,
            rating_count: user.rating_count(),
        })
        .collect();

    if json {
        return print_json(&summaries);
    }

    for summary in summaries {
        println!("User {} ({} ratings)", summary.id, summary.rating_count);
    }
    Ok(())
}

#[derive(Serialize)]
struct StrategySummary {
    key: StrategyKind,
    name: &'static str,
    description: &'static str,
}

/// Handle the 'strategies' command
fn handle_strategies(json: bool) -> Result<()> {
    let summaries: Vec<StrategySummary> = StrategyKind::ALL
        .into_iter()
        .map(|kind| StrategySummary {
            key: kind,
            name: kind.display_name(),
            description: kind.description(),
        })
        .collect();

    if json {
        return print_json(&summaries);
    }

    for summary in summaries {
        println!("{} ({})", summary.name.bold(), summary.key.key().green());
        println!("  {}", summary.description);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", rendered);
    Ok(())
}

fn print_user_not_found(user_id: UserId) {
    println!("{}", format!("No result: user {} does not exist", user_id).yellow());
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[ScoredMovie], explain: bool) {
    if recommendations.is_empty() {
        println!("{}", "No recommendations".yellow());
        return;
    }

    for (idx, rec) in recommendations.iter().enumerate() {
        let movie = &rec.movie;
        println!(
            "{}. {} ({}) [{}] - Score: {:.2}",
            (idx + 1).to_string().green(),
            movie.title,
            movie.year,
            movie.genre,
            rec.score
        );
        if explain {
            match &rec.arm {
                Some(arm) => println!(
                    "   Pulls: {}, average reward: {:.3}, exploration bonus: {:.3}",
                    arm.pulls, arm.average_reward, arm.exploration_bonus
                ),
                None => println!("   Base rating: {:.1}", movie.base_rating),
            }
        }
    }
}
