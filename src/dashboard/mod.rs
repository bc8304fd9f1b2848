use serde::{Deserialize, Serialize};

pub mod endpoints;
pub mod manager;
pub use endpoints::*;

/// Headline counts for the operator's landing page.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Dashboard {
    pub total_customers: u64,
    pub total_campaigns: u64,
    pub active_campaigns: u64,
}
