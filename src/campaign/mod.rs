use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::personalization::RecommendationBundle;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type CampaignId = TypedId<Campaign>;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: CampaignId,
    pub name: String,
    pub channel_type: ChannelType,
    // as submitted, including ids that never resolved
    pub target_customer_ids: Vec<String>,
    pub status: CampaignStatus,
    pub personalized_content: BTreeMap<String, String>,
    pub recommendations: BTreeMap<String, RecommendationBundle>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl TypedIdMarker for Campaign {
    fn tag() -> &'static str {
        "CPN"
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    // reserved, nothing transitions a campaign here yet
    Completed,
    Cancelled,
}

/// The medium a campaign's messages are rendered for. Unrecognized values
/// are kept verbatim in `Other` and get the generic message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelType {
    Email,
    Sms,
    Push,
    Other(String),
}

impl ChannelType {
    pub fn as_str(&self) -> &str {
        match self {
            ChannelType::Email => "email",
            ChannelType::Sms => "sms",
            ChannelType::Push => "push",
            ChannelType::Other(other) => other,
        }
    }
}

impl FromStr for ChannelType {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let channel_type = match s {
            "email" => ChannelType::Email,
            "sms" => ChannelType::Sms,
            "push" => ChannelType::Push,
            other => ChannelType::Other(other.to_string()),
        };

        Ok(channel_type)
    }
}

impl Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChannelType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChannelType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        match s.parse() {
            Ok(channel_type) => Ok(channel_type),
            Err(never) => match never {},
        }
    }
}
