//! Per-customer campaign material: the recommendation bundle and the
//! channel-specific message. Both generators are pure and never touch a
//! store; resolving the customer is the caller's job.

pub mod content;
pub mod manager;
pub mod recommendations;

pub use content::personalize_content;
pub use recommendations::{generate_recommendations, RecommendationBundle};
