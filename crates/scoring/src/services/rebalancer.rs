use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, ScoringError};
use crate::models::weights::FULL_WEIGHT;
use crate::models::{RatingCategory, WeightCollection, WeightedCategory};

/// A category being edited, weighted in whole percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftCategory {
    pub category_id: Uuid,
    pub name: String,
    pub percent: u32,
}

/// Result of committing an edited category set.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightCommit {
    pub categories: Vec<RatingCategory>,
    pub weights_changed: bool,
}

impl WeightCommit {
    /// Whether a bulk recompute of historical scores should be offered.
    pub fn offers_recompute(&self) -> bool {
        self.weights_changed
    }
}

/// Edit session over one category set.
///
/// Adding or removing a category spreads the weights evenly again so the set
/// stays complete. Manual weight edits are applied as given and may leave the
/// set incomplete until the user fixes it; [`WeightRebalancer::commit`]
/// refuses such a set.
#[derive(Debug, Clone, Default)]
pub struct WeightRebalancer {
    drafts: Vec<DraftCategory>,
    committed: Vec<(Uuid, u32)>,
}

impl WeightRebalancer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_categories(categories: &[RatingCategory]) -> Self {
        let mut sorted: Vec<&RatingCategory> = categories.iter().collect();
        sorted.sort_by_key(|c| c.sort_order);

        let drafts: Vec<DraftCategory> = sorted
            .into_iter()
            .map(|c| DraftCategory {
                category_id: c.category_id,
                name: c.name.clone(),
                percent: c.weight_percent(),
            })
            .collect();
        let committed = drafts.iter().map(|d| (d.category_id, d.percent)).collect();

        Self { drafts, committed }
    }

    pub fn categories(&self) -> &[DraftCategory] {
        &self.drafts
    }

    pub fn total(&self) -> u32 {
        self.drafts.iter().map(|d| d.percent).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.total() == FULL_WEIGHT
    }

    /// Appends a category with weight 0, then splits 100 evenly across all
    /// categories.
    pub fn add_category(&mut self, name: &str) -> Result<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScoringError::Validation(
                "Category name cannot be empty".to_string(),
            ));
        }
        if self.drafts.iter().any(|d| d.name == name) {
            return Err(ScoringError::Validation(format!(
                "Duplicate category name: '{}'",
                name
            )));
        }

        let category_id = Uuid::new_v4();
        self.drafts.push(DraftCategory {
            category_id,
            name: name.to_string(),
            percent: 0,
        });
        if let Err(err) = self.distribute_evenly() {
            self.drafts.pop();
            return Err(err);
        }

        debug!("Added category '{}', {} in set", name, self.drafts.len());
        Ok(category_id)
    }

    /// Removes a category, then splits 100 evenly across the rest.
    pub fn remove_category(&mut self, category_id: Uuid) -> Result<DraftCategory> {
        let position = self.position(category_id)?;
        let removed = self.drafts.remove(position);
        if let Err(err) = self.distribute_evenly() {
            self.drafts.insert(position, removed);
            return Err(err);
        }

        debug!("Removed category '{}', {} left", removed.name, self.drafts.len());
        Ok(removed)
    }

    /// Sets one weight without touching the others.
    pub fn set_weight(&mut self, category_id: Uuid, percent: u32) -> Result<()> {
        if percent > FULL_WEIGHT {
            return Err(ScoringError::Validation(format!(
                "Weight must be between 0 and 100, got {}",
                percent
            )));
        }

        let position = self.position(category_id)?;
        self.drafts[position].percent = percent;
        Ok(())
    }

    /// Splits 100 evenly across the current categories.
    ///
    /// Fails only when the set itself is invalid, e.g. duplicate names loaded
    /// through [`WeightRebalancer::from_categories`].
    pub fn distribute_evenly(&mut self) -> Result<()> {
        let even = self.weights()?.distribute_evenly();
        for (draft, member) in self.drafts.iter_mut().zip(even.members()) {
            draft.percent = member.weight;
        }
        Ok(())
    }

    pub fn weights(&self) -> Result<WeightCollection> {
        WeightCollection::new(
            self.drafts
                .iter()
                .map(|d| WeightedCategory::new(d.name.clone(), d.percent))
                .collect(),
        )
    }

    /// Validates the set and converts it to fractional weights.
    ///
    /// Fails with [`ScoringError::InvalidWeightSet`] unless the weights sum to
    /// exactly 100, and with [`ScoringError::Validation`] if any category
    /// still has a weight of 0. Committing does not touch stored scores.
    pub fn commit(&mut self) -> Result<WeightCommit> {
        let weights = self.weights()?;
        weights.ensure_complete()?;
        if let Some(empty) = weights.members().iter().find(|m| m.weight == 0) {
            return Err(ScoringError::Validation(format!(
                "Category '{}' must have a weight above 0%",
                empty.name
            )));
        }

        let snapshot: Vec<(Uuid, u32)> = self
            .drafts
            .iter()
            .map(|d| (d.category_id, d.percent))
            .collect();
        let weights_changed = snapshot != self.committed;

        let categories = self
            .drafts
            .iter()
            .zip(weights.to_fractions())
            .enumerate()
            .map(|(position, (d, (name, weight)))| RatingCategory {
                category_id: d.category_id,
                name,
                weight,
                sort_order: i32::try_from(position).unwrap_or(i32::MAX),
            })
            .collect();

        self.committed = snapshot;
        info!(
            "Committed category set of {} categories (weights changed: {})",
            self.drafts.len(),
            weights_changed
        );

        Ok(WeightCommit {
            categories,
            weights_changed,
        })
    }

    fn position(&self, category_id: Uuid) -> Result<usize> {
        self.drafts
            .iter()
            .position(|d| d.category_id == category_id)
            .ok_or_else(|| ScoringError::NotFound(format!("category {}", category_id)))
    }
}
