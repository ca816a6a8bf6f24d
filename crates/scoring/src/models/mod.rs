pub mod category;
pub mod entry;
pub mod weights;

pub use category::{CategoryScore, RatingCategory};
pub use entry::{Dish, Entry, NewDish, NewEntry};
pub use weights::{WeightCollection, WeightedCategory};
