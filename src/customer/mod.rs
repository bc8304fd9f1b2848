use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type CustomerId = TypedId<Customer>;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    // tag that drives personalized content, e.g. "fitness"
    pub preferences: Option<String>,
    #[serde(default)]
    pub purchase_history: Vec<String>,
    pub lifetime_value: f64,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl TypedIdMarker for Customer {
    fn tag() -> &'static str {
        "CST"
    }
}
