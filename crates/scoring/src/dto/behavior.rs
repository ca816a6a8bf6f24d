use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Dining behavior traits, each between 0 and 5 with one decimal place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BehavioralMetrics {
    /// Share of visits that went to a different restaurant.
    pub adventurousness: Decimal,
    /// Variety of orders. `None` when no entry records what was ordered.
    pub diverse_palate: Option<Decimal>,
    /// Spread of composite scores.
    pub discernment: Decimal,
    /// Share of visits that went to the most visited restaurant.
    pub loyalty: Decimal,
}
