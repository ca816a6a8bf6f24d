pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use error::{Result, ScoringError};
pub use models::{
    CategoryScore, Dish, Entry, NewDish, NewEntry, RatingCategory, WeightCollection,
    WeightedCategory,
};
pub use repository::{EntryRepository, InMemoryEntryRepository};
pub use services::aggregation::build_dashboard;
pub use services::composite::{ScoringWeights, composite_score};
pub use services::cuisine::CuisineClassifier;
pub use services::entries::prepare_entry;
pub use services::rebalancer::{WeightCommit, WeightRebalancer};
pub use services::recompute::recompute_all_scores;

#[cfg(test)]
pub(crate) mod test_support;
