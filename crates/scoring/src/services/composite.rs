use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, ScoringError};
use crate::models::{CategoryScore, RatingCategory};
use crate::services::numeric::round_half_away;

/// How far a fractional category set may drift from 1.0 and still count as
/// complete.
pub const WEIGHT_SUM_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 3);

/// Decimal places kept on a composite score.
pub const COMPOSITE_SCALE: u32 = 2;

/// Fractional category weights keyed by category id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringWeights {
    weights: HashMap<Uuid, Decimal>,
}

impl ScoringWeights {
    pub fn from_categories(categories: &[RatingCategory]) -> Self {
        Self {
            weights: categories
                .iter()
                .map(|c| (c.category_id, c.weight))
                .collect(),
        }
    }

    pub fn get(&self, category_id: &Uuid) -> Option<Decimal> {
        self.weights.get(category_id).copied()
    }

    pub fn contains(&self, category_id: &Uuid) -> bool {
        self.weights.contains_key(category_id)
    }

    pub fn total(&self) -> Decimal {
        self.weights.values().copied().sum()
    }

    /// True when the weights sum to 1.0 within [`WEIGHT_SUM_TOLERANCE`].
    pub fn is_complete(&self) -> bool {
        (self.total() - Decimal::ONE).abs() <= WEIGHT_SUM_TOLERANCE
    }

    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }

        let total = round_half_away(self.total() * Decimal::ONE_HUNDRED, 0)
            .to_u32()
            .unwrap_or(0);
        Err(ScoringError::InvalidWeightSet { total })
    }
}

impl From<&[RatingCategory]> for ScoringWeights {
    fn from(categories: &[RatingCategory]) -> Self {
        Self::from_categories(categories)
    }
}

/// Weighted sum of `(score, weight)` pairs, rounded to two places.
///
/// Pairs with a score of 0 are unrated and skipped. Weights are used as given:
/// leaving a category unrated lowers the result instead of inflating the
/// categories that were rated.
pub fn weighted_score<I>(pairs: I) -> Decimal
where
    I: IntoIterator<Item = (u8, Decimal)>,
{
    let sum: Decimal = pairs
        .into_iter()
        .filter(|(score, _)| *score > 0)
        .map(|(score, weight)| Decimal::from(score) * weight)
        .sum();

    round_half_away(sum, COMPOSITE_SCALE)
}

/// Composite score of one entry's ratings under `weights`.
///
/// Never fails: an empty or fully unrated list scores 0 and ratings for
/// categories missing from `weights` contribute nothing. Callers persisting
/// the result validate the inputs first.
pub fn composite_score(ratings: &[CategoryScore], weights: &ScoringWeights) -> Decimal {
    let pairs = ratings.iter().filter(|r| r.is_rated()).filter_map(|rating| {
        match weights.get(&rating.category_id) {
            Some(weight) => Some((rating.score, weight)),
            None => {
                debug!(
                    "Ignoring rating for unknown category {}",
                    rating.category_id
                );
                None
            }
        }
    });

    weighted_score(pairs)
}
