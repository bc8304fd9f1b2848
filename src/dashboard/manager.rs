use crate::campaign::CampaignStatus;
use crate::database::Database;
use crate::error::Error;

use super::Dashboard;

#[tracing::instrument(skip(db))]
pub async fn get_dashboard(db: &dyn Database) -> Result<Dashboard, Error> {
    let total_customers = db.customers().count_customers().await?;
    let total_campaigns = db.campaigns().count_campaigns().await?;
    let active_campaigns = db
        .campaigns()
        .count_campaigns_by_status(CampaignStatus::Active)
        .await?;

    Ok(Dashboard {
        total_customers,
        total_campaigns,
        active_campaigns,
    })
}
