pub mod aggregation;
pub mod behavior;
pub mod composite;
pub mod cuisine;
pub mod entries;
pub mod numeric;
pub mod rebalancer;
pub mod recompute;
