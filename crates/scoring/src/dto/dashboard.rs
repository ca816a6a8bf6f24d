use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::analytics::{
    BreakdownSlice, CostRatingPoint, LeaderboardEntry, MonthlyActivity, MonthlySpend,
    SummaryStats,
};
use super::behavior::BehavioralMetrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dashboard {
    pub summary: SummaryStats,
    pub top_restaurants: Vec<LeaderboardEntry>,
    pub monthly_activity: Vec<MonthlyActivity>,
    pub monthly_spend: Vec<MonthlySpend>,
    pub subtype_breakdown: Vec<BreakdownSlice>,
    pub cuisine_breakdown: Vec<BreakdownSlice>,
    pub cost_vs_rating: Vec<CostRatingPoint>,
    pub behavior: BehavioralMetrics,
}
