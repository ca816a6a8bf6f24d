use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dto::recompute::RecomputeReport;
use crate::error::{Result, ScoringError};
use crate::models::RatingCategory;
use crate::repository::EntryRepository;
use crate::services::composite::{ScoringWeights, composite_score};

enum Outcome {
    Updated,
    Unchanged,
}

/// Re-scores every stored entry with `categories` and overwrites its
/// composite score.
///
/// This replaces historical scores and is never run implicitly by a weight
/// change; callers offer it after committing new weights. An incomplete
/// category set is rejected before anything is written. A missing entry is
/// skipped and any other per-entry failure is recorded, so an interrupted or
/// partially failed run can simply be repeated.
pub async fn recompute_all_scores<R>(
    repo: &R,
    categories: &[RatingCategory],
) -> Result<RecomputeReport>
where
    R: EntryRepository + ?Sized,
{
    let weights = ScoringWeights::from_categories(categories);
    weights.ensure_complete()?;

    let entry_ids = repo.list_entry_ids().await?;
    info!("Recomputing composite scores for {} entries", entry_ids.len());

    let mut report = RecomputeReport::default();
    for entry_id in entry_ids {
        match recompute_entry(repo, entry_id, &weights).await {
            Ok(Outcome::Updated) => report.updated += 1,
            Ok(Outcome::Unchanged) => report.unchanged += 1,
            Err(ScoringError::NotFound(what)) => {
                warn!("Skipping {}: no longer exists", what);
                report.skipped.push(entry_id);
            }
            Err(e) => {
                warn!("Failed to recompute entry {}: {}", entry_id, e);
                report.failed.push(entry_id);
            }
        }
    }

    info!(
        "Recompute finished: {} processed ({} updated, {} unchanged), {} skipped, {} failed",
        report.processed(),
        report.updated,
        report.unchanged,
        report.skipped.len(),
        report.failed.len()
    );

    Ok(report)
}

async fn recompute_entry<R>(repo: &R, entry_id: Uuid, weights: &ScoringWeights) -> Result<Outcome>
where
    R: EntryRepository + ?Sized,
{
    let ratings = repo.load_ratings(entry_id).await?;
    let score = composite_score(&ratings, weights);
    let previous = repo.update_composite_score(entry_id, score).await?;

    if previous == Some(score) {
        Ok(Outcome::Unchanged)
    } else {
        debug!("Entry {} rescored {:?} -> {}", entry_id, previous, score);
        Ok(Outcome::Updated)
    }
}
