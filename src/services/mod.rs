pub mod candidates;
pub mod climate;
pub mod providers;
pub mod recommendations;
pub mod scoring;
pub mod seasonal;
pub mod trait_table;
pub mod watering;

pub use recommendations::RecommendationEngine;
