use clap::{Parser, Subcommand};
use scoring::{
    CuisineClassifier, InMemoryEntryRepository, WeightRebalancer, build_dashboard,
    recompute_all_scores,
};
use std::path::{Path, PathBuf};
use toolkit::{Snapshot, SnapshotValidator, ToolkitError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "foodlog")]
#[command(about = "Dining log scoring and analytics toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "FOODLOG_SNAPSHOT", default_value = "./foodlog.json")]
    snapshot: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the snapshot's categories and entries
    Validate,
    /// Print summary stats, leaderboard, time series and behavior traits
    Dashboard {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Re-score every entry with the current category weights
    Recompute {
        #[arg(long)]
        dry_run: bool,
    },
    /// Detect the cuisine of a meal
    Classify {
        #[arg(short, long = "dish", required = true)]
        dishes: Vec<String>,

        #[arg(long)]
        venue: Option<String>,
    },
    /// Edit the category set
    Rebalance {
        #[command(subcommand)]
        edit: RebalanceEdit,
    },
}

#[derive(Subcommand)]
enum RebalanceEdit {
    /// Add a category and spread weights evenly
    Add { name: String },
    /// Remove a category and spread weights evenly
    Remove { name: String },
    /// Set weights in percent, e.g. `Taste=70 Value=30`
    Set {
        #[arg(required = true, value_parser = parse_weight)]
        weights: Vec<(String, u32)>,
    },
    /// Spread weights evenly without adding or removing
    Even,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "foodlog={},toolkit={},scoring={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Validate => {
            handle_validate(&cli.snapshot).await?;
        }
        Commands::Dashboard { output } => {
            handle_dashboard(&cli.snapshot, output).await?;
        }
        Commands::Recompute { dry_run } => {
            handle_recompute(&cli.snapshot, dry_run).await?;
        }
        Commands::Classify { dishes, venue } => {
            handle_classify(&dishes, venue.as_deref());
        }
        Commands::Rebalance { edit } => {
            handle_rebalance(&cli.snapshot, edit).await?;
        }
    }

    Ok(())
}

async fn handle_validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading snapshot from: {}", path.display());
    let snapshot = Snapshot::load(path).await?;

    tracing::info!(
        "Validating {} categories and {} entries...",
        snapshot.categories.len(),
        snapshot.entries.len()
    );
    let report = SnapshotValidator::validate(&snapshot)?;
    report.log_warnings();
    tracing::info!("✓ Validation successful ({} warning(s))", report.warnings.len());

    Ok(())
}

async fn handle_dashboard(
    path: &Path,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = Snapshot::load(path).await?;
    let dashboard = build_dashboard(&snapshot.entries);
    let json_content = serde_json::to_string_pretty(&dashboard)?;

    match output {
        Some(output) => {
            tokio::fs::write(&output, json_content).await?;
            tracing::info!("Dashboard written to {}", output.display());
        }
        None => println!("{}", json_content),
    }

    Ok(())
}

async fn handle_recompute(path: &Path, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = Snapshot::load(path).await?;
    tracing::info!(
        "Recomputing {} entries with {} categories (historical scores will be overwritten)",
        snapshot.entries.len(),
        snapshot.categories.len()
    );

    let repo = InMemoryEntryRepository::new(snapshot.entries);
    let report = recompute_all_scores(&repo, &snapshot.categories).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if dry_run {
        tracing::info!("Dry run, snapshot left untouched");
        return Ok(());
    }

    let updated = Snapshot {
        categories: snapshot.categories,
        entries: repo.snapshot().await,
    };
    updated.save(path).await?;
    tracing::info!("✓ Snapshot updated: {}", path.display());

    Ok(())
}

fn handle_classify(dishes: &[String], venue: Option<&str>) {
    let classifier = CuisineClassifier::default();

    for (label, points) in classifier.score_cuisines(dishes, venue) {
        tracing::debug!("{}: {} keyword hit(s)", label, points);
    }

    match classifier.classify(dishes, venue) {
        Some(cuisine) => println!("{}", cuisine),
        None => println!("No cuisine detected"),
    }
}

async fn handle_rebalance(
    path: &Path,
    edit: RebalanceEdit,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = Snapshot::load(path).await?;
    let mut rebalancer = WeightRebalancer::from_categories(&snapshot.categories);

    match edit {
        RebalanceEdit::Add { name } => {
            rebalancer.add_category(&name)?;
        }
        RebalanceEdit::Remove { name } => {
            let category = snapshot
                .category_by_name(&name)
                .ok_or_else(|| ToolkitError::UnknownCategory(name.clone()))?;
            rebalancer.remove_category(category.category_id)?;
        }
        RebalanceEdit::Set { weights } => {
            for (name, percent) in weights {
                let category = snapshot
                    .category_by_name(&name)
                    .ok_or_else(|| ToolkitError::UnknownCategory(name.clone()))?;
                rebalancer.set_weight(category.category_id, percent)?;
            }
        }
        RebalanceEdit::Even => rebalancer.distribute_evenly()?,
    }

    for draft in rebalancer.categories() {
        tracing::info!("{}: {}%", draft.name, draft.percent);
    }

    let commit = rebalancer.commit()?;
    let offers_recompute = commit.offers_recompute();
    snapshot.categories = commit.categories;
    snapshot.save(path).await?;
    tracing::info!("✓ Category set saved");

    if offers_recompute {
        tracing::info!(
            "Weights changed. Existing scores still use the old weights; run `foodlog recompute` to rescore them"
        );
    }

    Ok(())
}

fn parse_weight(s: &str) -> Result<(String, u32), String> {
    let (name, percent) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PERCENT, got '{}'", s))?;
    let percent = percent
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid percent '{}': {}", percent, e))?;
    Ok((name.trim().to_string(), percent))
}
