use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A named rating dimension (Taste, Value, ...) within a category set.
///
/// `weight` is the fractional share (0-1) the category contributes to the
/// composite score. The editing surface works with whole percentages instead,
/// see [`crate::models::WeightCollection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RatingCategory {
    pub category_id: Uuid,
    pub name: String,
    pub weight: Decimal,
    pub sort_order: i32,
}

impl RatingCategory {
    pub fn new(name: impl Into<String>, weight: Decimal, sort_order: i32) -> Self {
        Self {
            category_id: Uuid::new_v4(),
            name: name.into(),
            weight,
            sort_order,
        }
    }

    /// Weight as a whole percentage, rounded half away from zero.
    pub fn weight_percent(&self) -> u32 {
        (self.weight * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    }
}

/// A 1-5 star score a user gave one category for one entry.
///
/// A score of 0 means "not rated" and is ignored by the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryScore {
    pub category_id: Uuid,
    pub score: u8,
}

impl CategoryScore {
    pub fn new(category_id: Uuid, score: u8) -> Self {
        Self { category_id, score }
    }

    pub fn is_rated(&self) -> bool {
        self.score > 0
    }
}
