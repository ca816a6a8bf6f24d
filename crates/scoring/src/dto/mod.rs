pub mod analytics;
pub mod behavior;
pub mod dashboard;
pub mod recompute;
