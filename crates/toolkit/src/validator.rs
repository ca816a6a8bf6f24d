use std::collections::HashSet;

use scoring::{ScoringWeights, WeightCollection, WeightedCategory, composite_score};
use tracing::warn;

use crate::snapshot::Snapshot;
use crate::{Result, ToolkitError};

pub struct SnapshotValidator;

impl SnapshotValidator {
    pub fn validate(snapshot: &Snapshot) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if snapshot.categories.is_empty() {
            report
                .errors
                .push("At least one rating category is required".to_string());
        }

        let collection = WeightCollection::new(
            snapshot
                .categories
                .iter()
                .map(|c| WeightedCategory::new(c.name.clone(), c.weight_percent()))
                .collect(),
        );
        if let Err(e) = collection {
            report.errors.push(e.to_string());
        }

        let weights = ScoringWeights::from_categories(&snapshot.categories);
        if !snapshot.categories.is_empty() && !weights.is_complete() {
            report.errors.push(format!(
                "Category weights sum to {}, expected 1.0",
                weights.total()
            ));
        }

        let mut entry_ids = HashSet::new();
        for (idx, entry) in snapshot.entries.iter().enumerate() {
            let entry_label = format!("{}. {}", idx + 1, entry.restaurant_name);

            if !entry_ids.insert(entry.entry_id) {
                report
                    .errors
                    .push(format!("Duplicate entry id: {}", entry.entry_id));
            }

            if entry.restaurant_name.trim().is_empty() {
                report
                    .errors
                    .push(format!("Entry {} has an empty restaurant name", idx + 1));
            }
            if entry.city.trim().is_empty() {
                report
                    .errors
                    .push(format!("Entry '{}' has an empty city", entry_label));
            }

            if entry.cost.is_some_and(|c| c.is_sign_negative()) {
                report
                    .errors
                    .push(format!("Entry '{}' has a negative cost", entry_label));
            }

            if entry.dishes.is_empty() {
                report
                    .warnings
                    .push(format!("Entry '{}' has no dishes", entry_label));
            }

            for rating in &entry.ratings {
                if rating.score > 5 {
                    report.errors.push(format!(
                        "Entry '{}' has invalid score {}. Must be 0-5",
                        entry_label, rating.score
                    ));
                }
                if !weights.contains(&rating.category_id) {
                    report.errors.push(format!(
                        "Entry '{}' rates unknown category {}",
                        entry_label, rating.category_id
                    ));
                }
            }

            if !entry.has_rated_categories() {
                report
                    .warnings
                    .push(format!("Entry '{}' has no rated categories", entry_label));
            }

            match entry.composite_score {
                None => report
                    .warnings
                    .push(format!("Entry '{}' has no composite score", entry_label)),
                Some(stored) => {
                    let current = composite_score(&entry.ratings, &weights);
                    if stored != current {
                        report.warnings.push(format!(
                            "Entry '{}' has a stale composite score ({} stored, {} with current weights)",
                            entry_label, stored, current
                        ));
                    }
                }
            }
        }

        if !report.errors.is_empty() {
            Err(ToolkitError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}
