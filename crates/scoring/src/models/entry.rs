use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::CategoryScore;

/// A logged meal.
///
/// `composite_score` is derived from `ratings` and the category weights in
/// force when the entry was last saved. It goes stale when either changes and
/// is only refreshed through an explicit recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Entry {
    pub entry_id: Uuid,
    pub restaurant_name: String,
    pub city: String,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<i32>,
    pub eaten_at: NaiveDateTime,
    #[serde(default)]
    pub cuisine: Option<String>,
    /// What was ordered when the entry tracks a specific food (e.g. "Spicy").
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub composite_score: Option<Decimal>,
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub ratings: Vec<CategoryScore>,
}

impl Entry {
    pub fn rated_categories(&self) -> impl Iterator<Item = &CategoryScore> {
        self.ratings.iter().filter(|r| r.is_rated())
    }

    pub fn has_rated_categories(&self) -> bool {
        self.rated_categories().next().is_some()
    }

    pub fn dish_names(&self) -> Vec<&str> {
        self.dishes.iter().map(|d| d.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    pub name: String,
    #[serde(default)]
    pub rating: Option<u8>,
}

/// Write-time request for a new entry, checked before anything is scored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewEntry {
    #[validate(length(min = 1, message = "Restaurant name is required"))]
    pub restaurant_name: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[serde(default)]
    pub quantity: Option<i32>,
    pub eaten_at: NaiveDateTime,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[validate(length(min = 1, message = "At least one dish is required"))]
    pub dishes: Vec<NewDish>,
    #[serde(default)]
    pub ratings: Vec<CategoryScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewDish {
    #[validate(length(min = 1, message = "Dish name is required"))]
    pub name: String,
    #[validate(range(min = 1, max = 5, message = "Dish rating must be between 1 and 5"))]
    #[serde(default)]
    pub rating: Option<u8>,
}

impl From<NewDish> for Dish {
    fn from(dish: NewDish) -> Self {
        Self {
            name: dish.name.trim().to_string(),
            rating: dish.rating,
        }
    }
}
