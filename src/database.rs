use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::{bson, Collection, Database as MongoHandle};
use tracing::info;

use crate::campaign::db::CampaignStore;
use crate::campaign::{Campaign, CampaignId};
use crate::customer::db::CustomerStore;
use crate::customer::{Customer, CustomerId};
use crate::error::Error;

const CAMPAIGNS: &str = "campaigns";
const CUSTOMERS: &str = "customers";

pub type MongoCampaignStore = Collection<Campaign>;
pub type MongoCustomerStore = Collection<Customer>;
pub type MemoryCampaignStore = DashMap<CampaignId, Campaign>;
pub type MemoryCustomerStore = DashMap<CustomerId, Customer>;

/// The keyed record stores the service reads from and writes to. Customers
/// and campaigns are independent stores; nothing spans both.
#[async_trait]
pub trait Database: Send + Sync {
    fn customers(&self) -> &dyn CustomerStore;

    fn campaigns(&self) -> &dyn CampaignStore;

    async fn drop(&self) -> Result<(), Error>;
}

#[derive(Debug, Clone)]
pub struct MongoDatabase {
    customers: Collection<Customer>,
    campaigns: Collection<Campaign>,
    db: MongoHandle,
}

impl MongoDatabase {
    pub fn new(db: MongoHandle) -> MongoDatabase {
        MongoDatabase {
            customers: db.collection(CUSTOMERS),
            campaigns: db.collection(CAMPAIGNS),
            db,
        }
    }

    pub async fn initialize(db: MongoHandle) -> Result<MongoDatabase, Error> {
        // ping the database to ensure connection is established
        db.run_command(bson::doc! { "ping": 1 }, None).await?;

        db.run_command(
            bson::doc! {
                "createIndexes": CUSTOMERS,
                "indexes": [
                    { "key": { "created_at": 1 }, "name": "by_created_at" },
                ]
            },
            None,
        )
        .await?;

        db.run_command(
            bson::doc! {
                "createIndexes": CAMPAIGNS,
                "indexes": [
                    { "key": { "created_at": -1 }, "name": "by_created_at" },
                    { "key": { "status": 1 }, "name": "by_status" },
                ]
            },
            None,
        )
        .await?;

        info!("initialized mongo database: {}", db.name());

        Ok(MongoDatabase::new(db))
    }
}

#[async_trait]
impl Database for MongoDatabase {
    fn customers(&self) -> &dyn CustomerStore {
        &self.customers
    }

    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }

    async fn drop(&self) -> Result<(), Error> {
        self.db.drop(None).await?;
        Ok(())
    }
}

/// Process-local stores for development and tests. Nothing survives a
/// restart.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    customers: MemoryCustomerStore,
    campaigns: MemoryCampaignStore,
}

impl MemoryDatabase {
    pub fn new() -> MemoryDatabase {
        info!("initialized in-memory database");
        MemoryDatabase::default()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    fn customers(&self) -> &dyn CustomerStore {
        &self.customers
    }

    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }

    async fn drop(&self) -> Result<(), Error> {
        self.customers.clear();
        self.campaigns.clear();
        Ok(())
    }
}
