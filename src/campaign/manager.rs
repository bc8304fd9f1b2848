use std::collections::BTreeMap;

use chrono::Utc;
use futures::{stream, StreamExt};
use tracing::{debug, info, warn};

use crate::customer::CustomerId;
use crate::database::Database;
use crate::error::Error;
use crate::personalization::{generate_recommendations, personalize_content, RecommendationBundle};

use super::{Campaign, CampaignId, CampaignStatus, ChannelType};

/// What became of a single target during assembly.
#[derive(Debug)]
pub enum TargetOutcome {
    Personalized {
        target: String,
        content: String,
        recommendations: RecommendationBundle,
    },
    Skipped {
        target: String,
        reason: SkipReason,
    },
}

#[derive(Debug)]
pub enum SkipReason {
    UnknownCustomer,
    MissingPreferences,
    StoreFault(Error),
}

/// Validates the request and assembles the campaign. An empty name or an
/// empty target list is rejected before anything is read or written.
#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: &dyn Database,
    name: String,
    channel_type: ChannelType,
    target_customer_ids: Vec<String>,
    concurrency: usize,
) -> Result<Campaign, Error> {
    if name.trim().is_empty() {
        return Err(Error::CampaignNameMissing);
    }
    if target_customer_ids.is_empty() {
        return Err(Error::CampaignTargetsMissing);
    }

    assemble_campaign(db, name, channel_type, target_customer_ids, concurrency).await
}

/// Builds a campaign by personalizing every target that resolves to a
/// stored customer, then writes it in a single insert.
///
/// Targets are processed up to `concurrency` at a time but their outcomes
/// are folded in input order. A target that cannot be personalized is left
/// out of both maps and the rest of the batch carries on; only the final
/// write can fail the call.
#[tracing::instrument(skip(db))]
pub async fn assemble_campaign(
    db: &dyn Database,
    name: String,
    channel_type: ChannelType,
    target_customer_ids: Vec<String>,
    concurrency: usize,
) -> Result<Campaign, Error> {
    let mut campaign = Campaign {
        id: CampaignId::new(),
        name,
        channel_type,
        target_customer_ids,
        status: CampaignStatus::Active,
        personalized_content: BTreeMap::new(),
        recommendations: BTreeMap::new(),
        created_at: Utc::now(),
    };

    let channel_type = &campaign.channel_type;
    let outcomes: Vec<TargetOutcome> = stream::iter(campaign.target_customer_ids.clone())
        .map(|target| personalize_target(db, target, channel_type))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut skipped = 0;
    for outcome in outcomes {
        match outcome {
            TargetOutcome::Personalized {
                target,
                content,
                recommendations,
            } => {
                campaign.personalized_content.insert(target.clone(), content);
                campaign.recommendations.insert(target, recommendations);
            }
            TargetOutcome::Skipped { target, reason } => {
                skipped += 1;
                match reason {
                    SkipReason::StoreFault(err) => {
                        warn!(%target, error = %err, "skipping target, customer lookup failed")
                    }
                    reason => debug!(%target, ?reason, "skipping target"),
                }
            }
        }
    }

    db.campaigns().insert_campaign(&campaign).await?;

    info!(
        campaign_id = %campaign.id,
        personalized = campaign.personalized_content.len(),
        skipped,
        "assembled campaign"
    );

    Ok(campaign)
}

async fn personalize_target(
    db: &dyn Database,
    target: String,
    channel_type: &ChannelType,
) -> TargetOutcome {
    let skip = |target, reason| TargetOutcome::Skipped { target, reason };

    let customer_id: CustomerId = match target.parse() {
        Ok(customer_id) => customer_id,
        Err(_) => return skip(target, SkipReason::UnknownCustomer),
    };

    let customer = match db.customers().fetch_customer_by_id(customer_id).await {
        Ok(Some(customer)) => customer,
        Ok(None) => return skip(target, SkipReason::UnknownCustomer),
        Err(err) => return skip(target, SkipReason::StoreFault(err)),
    };

    let content = match personalize_content(&customer, channel_type) {
        Some(content) => content,
        None => return skip(target, SkipReason::MissingPreferences),
    };

    TargetOutcome::Personalized {
        target,
        content,
        recommendations: generate_recommendations(customer.id),
    }
}

#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: &dyn Database) -> Result<Vec<Campaign>, Error> {
    let campaigns = db.campaigns().fetch_campaigns().await?;

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: &dyn Database,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let campaign = db
        .campaigns()
        .fetch_campaign_by_id(campaign_id)
        .await?
        .ok_or(Error::CampaignDoesNotExist { campaign_id })?;

    Ok(campaign)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::Customer;
    use crate::database::test::MockDatabase;
    use std::collections::HashMap;
    use std::io::{Error as IoError, ErrorKind};
    use std::sync::{Arc, Mutex};

    fn customer(name: &str, preferences: Option<&str>) -> Customer {
        Customer {
            id: CustomerId::new(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            preferences: preferences.map(String::from),
            purchase_history: vec![],
            lifetime_value: 0.0,
            created_at: Utc::now(),
        }
    }

    fn database_with(customers: Vec<Customer>) -> MockDatabase {
        let mut db = MockDatabase::new();
        let customers: HashMap<CustomerId, Customer> =
            customers.into_iter().map(|c| (c.id, c)).collect();
        db.customers.on_fetch_customer_by_id =
            Box::new(move |customer_id| Ok(customers.get(&customer_id).cloned()));
        db.campaigns.on_insert_campaign = Box::new(|_| Ok(()));
        db
    }

    #[tokio::test]
    async fn assembles_only_resolvable_targets() {
        let ava = customer("Ava", Some("fitness"));
        let ava_id = ava.id.to_string();
        let missing_id = CustomerId::new().to_string();
        let db = database_with(vec![ava]);

        let campaign = assemble_campaign(
            &db,
            "SummerSale".into(),
            ChannelType::Email,
            vec![ava_id.clone(), missing_id.clone()],
            1,
        )
        .await
        .unwrap();

        assert_eq!(campaign.target_customer_ids, vec![ava_id.clone(), missing_id]);
        assert_eq!(campaign.status, CampaignStatus::Active);
        assert_eq!(campaign.personalized_content.len(), 1);
        assert_eq!(
            campaign.personalized_content[&ava_id],
            "Hi Ava, fitness lovers unite! Get 30% OFF our premium collection."
        );
        assert_eq!(campaign.recommendations.len(), 1);
        assert_eq!(campaign.recommendations[&ava_id].products.len(), 3);
    }

    #[tokio::test]
    async fn assembling_without_targets_produces_empty_maps() {
        let db = database_with(vec![]);

        let campaign = assemble_campaign(&db, "Empty".into(), ChannelType::Sms, vec![], 4)
            .await
            .unwrap();

        assert!(campaign.personalized_content.is_empty());
        assert!(campaign.recommendations.is_empty());
    }

    #[tokio::test]
    async fn skips_malformed_ids_and_customers_without_preferences() {
        let ava = customer("Ava", Some("fitness"));
        let ben = customer("Ben", None);
        let ava_id = ava.id.to_string();
        let ben_id = ben.id.to_string();
        let db = database_with(vec![ava, ben]);

        let campaign = assemble_campaign(
            &db,
            "Flash".into(),
            ChannelType::Sms,
            vec!["c2".into(), ben_id.clone(), ava_id.clone()],
            8,
        )
        .await
        .unwrap();

        let content_keys: Vec<_> = campaign.personalized_content.keys().cloned().collect();
        let recommendation_keys: Vec<_> = campaign.recommendations.keys().cloned().collect();
        assert_eq!(content_keys, vec![ava_id]);
        assert_eq!(recommendation_keys, content_keys);
        assert_eq!(campaign.target_customer_ids.len(), 3);
    }

    #[tokio::test]
    async fn lookup_faults_skip_the_target_not_the_campaign() {
        let ava = customer("Ava", Some("fitness"));
        let ava_id = ava.id;
        let mut db = database_with(vec![]);
        db.customers.on_fetch_customer_by_id = Box::new(move |customer_id| {
            if customer_id == ava_id {
                Ok(Some(ava.clone()))
            } else {
                Err(Error::IoError(IoError::new(ErrorKind::Other, "unreachable")))
            }
        });

        let campaign = assemble_campaign(
            &db,
            "Resilient".into(),
            ChannelType::Push,
            vec![CustomerId::new().to_string(), ava_id.to_string()],
            2,
        )
        .await
        .unwrap();

        assert_eq!(campaign.personalized_content.len(), 1);
        assert!(campaign
            .personalized_content
            .contains_key(&ava_id.to_string()));
    }

    #[tokio::test]
    async fn persists_exactly_once_and_fails_if_persisting_fails() {
        let ava = customer("Ava", Some("fitness"));
        let ava_id = ava.id.to_string();
        let mut db = database_with(vec![ava]);
        let insert_calls = Arc::new(Mutex::new(0));
        let insert_calls_clone = Arc::clone(&insert_calls);
        db.campaigns.on_insert_campaign = Box::new(move |campaign| {
            *insert_calls_clone.lock().unwrap() += 1;
            assert_eq!(campaign.personalized_content.len(), 1);
            Err(Error::IoError(IoError::new(ErrorKind::Other, "disk full")))
        });

        let result =
            assemble_campaign(&db, "Doomed".into(), ChannelType::Email, vec![ava_id], 1).await;

        assert!(matches!(result, Err(Error::IoError(_))));
        assert_eq!(*insert_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn repeated_assembly_differs_only_by_id() {
        let ava = customer("Ava", Some("fitness"));
        let targets = vec![ava.id.to_string(), "c2".to_string()];
        let db = database_with(vec![ava]);

        let first = assemble_campaign(
            &db,
            "Twice".into(),
            ChannelType::Email,
            targets.clone(),
            1,
        )
        .await
        .unwrap();
        let second = assemble_campaign(&db, "Twice".into(), ChannelType::Email, targets, 3)
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.personalized_content, second.personalized_content);
        assert_eq!(first.recommendations, second.recommendations);
    }

    #[tokio::test]
    async fn create_campaign_rejects_missing_name_and_targets() {
        let db = MockDatabase::new();

        let no_name = create_campaign(
            &db,
            "  ".into(),
            ChannelType::Email,
            vec![CustomerId::new().to_string()],
            1,
        )
        .await;
        let no_targets = create_campaign(&db, "Sale".into(), ChannelType::Email, vec![], 1).await;

        assert_eq!(no_name.unwrap_err(), Error::CampaignNameMissing);
        assert_eq!(no_targets.unwrap_err(), Error::CampaignTargetsMissing);
    }

    #[tokio::test]
    async fn get_campaign_by_id_returns_error_if_doesnt_exist() {
        let mut db = MockDatabase::new();
        let test_campaign_id = CampaignId::new();
        let called_get_by_id = Arc::new(Mutex::new(false));
        let called_get_by_id_clone = Arc::clone(&called_get_by_id);
        db.campaigns.on_fetch_campaign_by_id = Box::new(move |campaign_id| {
            *called_get_by_id_clone.lock().unwrap() = true;
            assert_eq!(campaign_id, test_campaign_id);
            Ok(None)
        });

        let campaign_result = get_campaign_by_id(&db, test_campaign_id).await;

        assert_eq!(
            campaign_result.unwrap_err(),
            Error::CampaignDoesNotExist {
                campaign_id: test_campaign_id
            }
        );
        assert!(
            *called_get_by_id.lock().unwrap(),
            "db.fetch_campaign_by_id was not called"
        );
    }
}
