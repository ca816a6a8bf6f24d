use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SummaryStats {
    pub total_entries: usize,
    pub total_spent: Decimal,
    pub unique_restaurants: usize,
    pub unique_cities: usize,
}

/// One row of the top restaurants board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub restaurant_name: String,
    pub average_score: Decimal,
    pub visit_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyActivity {
    pub year: i32,
    pub month: u32,
    /// e.g. "Mar 2024"
    pub label: String,
    pub entry_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlySpend {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub total_spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BreakdownSlice {
    pub label: String,
    pub count: usize,
}

/// Price against quality for a single entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CostRatingPoint {
    pub cost: Decimal,
    pub rating: Decimal,
    pub label: String,
}
