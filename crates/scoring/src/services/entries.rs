use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::error::{Result, ScoringError};
use crate::models::{CategoryScore, Dish, Entry, NewEntry, RatingCategory};
use crate::services::composite::{ScoringWeights, composite_score};
use crate::services::cuisine::CuisineClassifier;

const MAX_SCORE: u8 = 5;

/// Turns a request into a scored entry.
///
/// Everything is validated before scoring. When the request carries no
/// cuisine, one is detected from the dish and restaurant names.
pub fn prepare_entry(
    request: NewEntry,
    categories: &[RatingCategory],
    classifier: &CuisineClassifier<'_>,
) -> Result<Entry> {
    request.validate()?;

    let restaurant_name = required_text(&request.restaurant_name, "Restaurant name")?;
    let city = required_text(&request.city, "City")?;

    for dish in &request.dishes {
        dish.validate()?;
        required_text(&dish.name, "Dish name")?;
    }

    if let Some(cost) = request.cost
        && cost.is_sign_negative()
    {
        return Err(ScoringError::Validation(format!(
            "Cost cannot be negative, got {}",
            cost
        )));
    }

    let weights = ScoringWeights::from_categories(categories);
    weights.ensure_complete()?;
    validate_ratings(&request.ratings, &weights)?;

    let dishes: Vec<Dish> = request.dishes.into_iter().map(Dish::from).collect();
    let cuisine = match non_blank(request.cuisine) {
        Some(cuisine) => Some(cuisine),
        None => {
            let names: Vec<&str> = dishes.iter().map(|d| d.name.as_str()).collect();
            classifier.classify(&names, Some(restaurant_name.as_str()))
        }
    };

    let composite = composite_score(&request.ratings, &weights);
    debug!(
        "Prepared entry at '{}' with composite score {}",
        restaurant_name, composite
    );

    Ok(Entry {
        entry_id: Uuid::new_v4(),
        restaurant_name,
        city,
        cost: request.cost,
        quantity: request.quantity,
        eaten_at: request.eaten_at,
        cuisine,
        subtype: non_blank(request.subtype),
        composite_score: Some(composite),
        dishes,
        ratings: request.ratings,
    })
}

/// Replaces an entry's ratings and refreshes its cached composite score.
pub fn apply_rating_edit(
    entry: &mut Entry,
    ratings: Vec<CategoryScore>,
    categories: &[RatingCategory],
) -> Result<Decimal> {
    let weights = ScoringWeights::from_categories(categories);
    weights.ensure_complete()?;
    validate_ratings(&ratings, &weights)?;

    entry.ratings = ratings;
    Ok(refresh_score(entry, &weights))
}

/// Recomputes the cached composite score from the entry's own ratings.
pub fn refresh_score(entry: &mut Entry, weights: &ScoringWeights) -> Decimal {
    let score = composite_score(&entry.ratings, weights);
    entry.composite_score = Some(score);
    score
}

/// Scores must be 0-5, name a category of the set at most once, and at least
/// one must be rated.
pub fn validate_ratings(ratings: &[CategoryScore], weights: &ScoringWeights) -> Result<()> {
    let mut seen = HashSet::new();
    for rating in ratings {
        if rating.score > MAX_SCORE {
            return Err(ScoringError::Validation(format!(
                "Score for category {} must be between 1 and 5, got {}",
                rating.category_id, rating.score
            )));
        }
        if !weights.contains(&rating.category_id) {
            return Err(ScoringError::Validation(format!(
                "Rating refers to unknown category {}",
                rating.category_id
            )));
        }
        if !seen.insert(rating.category_id) {
            return Err(ScoringError::Validation(format!(
                "Category {} is rated more than once",
                rating.category_id
            )));
        }
    }

    if !ratings.iter().any(CategoryScore::is_rated) {
        return Err(ScoringError::Validation(
            "At least one category must be rated".to_string(),
        ));
    }

    Ok(())
}

fn required_text(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ScoringError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
