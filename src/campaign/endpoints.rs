use std::collections::BTreeMap;

use actix_web::web::{Data, Json, Path};
use actix_web::{get, post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AssemblyConfig;
use crate::database::Database;
use crate::error::Error;
use crate::personalization::RecommendationBundle;

use super::{manager, Campaign, CampaignId, CampaignStatus, ChannelType};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCampaignBody {
    pub name: String,
    pub channel_type: ChannelType,
    pub target_customer_ids: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignBody {
    pub id: CampaignId,
    pub name: String,
    pub channel_type: ChannelType,
    pub target_customer_ids: Vec<String>,
    pub status: CampaignStatus,
    pub personalized_content: BTreeMap<String, String>,
    pub recommendations: BTreeMap<String, RecommendationBundle>,
    pub created_at: DateTime<Utc>,
}

impl CampaignBody {
    pub fn render(campaign: Campaign) -> CampaignBody {
        CampaignBody {
            id: campaign.id,
            name: campaign.name,
            channel_type: campaign.channel_type,
            target_customer_ids: campaign.target_customer_ids,
            status: campaign.status,
            personalized_content: campaign.personalized_content,
            recommendations: campaign.recommendations,
            created_at: campaign.created_at,
        }
    }
}

#[post("/campaigns")]
#[tracing::instrument(skip(db, assembly))]
pub async fn create_campaign(
    db: Data<dyn Database>,
    assembly: Data<AssemblyConfig>,
    body: Json<CreateCampaignBody>,
) -> Result<Json<CampaignBody>, Error> {
    let body = body.into_inner();

    let campaign = manager::create_campaign(
        db.get_ref(),
        body.name,
        body.channel_type,
        body.target_customer_ids,
        assembly.concurrency,
    )
    .await?;

    Ok(Json(CampaignBody::render(campaign)))
}

#[get("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: Data<dyn Database>) -> Result<Json<Vec<CampaignBody>>, Error> {
    let campaigns = manager::get_campaigns(db.get_ref()).await?;

    let body = campaigns.into_iter().map(CampaignBody::render).collect();

    Ok(Json(body))
}

#[get("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: Data<dyn Database>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();

    let campaign = manager::get_campaign_by_id(db.get_ref(), campaign_id).await?;

    Ok(Json(CampaignBody::render(campaign)))
}
