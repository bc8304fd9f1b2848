use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson;
use mongodb::options::FindOptions;

use crate::database::{MemoryCustomerStore, MongoCustomerStore};
use crate::error::Error;

use super::{Customer, CustomerId};

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn insert_customer(&self, customer: &Customer) -> Result<(), Error>;

    async fn fetch_customers(&self) -> Result<Vec<Customer>, Error>;

    async fn fetch_customer_by_id(&self, customer_id: CustomerId)
        -> Result<Option<Customer>, Error>;

    async fn count_customers(&self) -> Result<u64, Error>;
}

#[async_trait]
impl CustomerStore for MongoCustomerStore {
    #[tracing::instrument(skip(self))]
    async fn insert_customer(&self, customer: &Customer) -> Result<(), Error> {
        self.insert_one(customer, None).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_customers(&self) -> Result<Vec<Customer>, Error> {
        let options = FindOptions::builder()
            .sort(bson::doc! { "created_at": 1 })
            .build();

        let customers: Vec<Customer> = self
            .find(bson::doc! {}, options)
            .await?
            .try_collect()
            .await?;

        Ok(customers)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_customer_by_id(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Customer>, Error> {
        let customer: Option<Customer> = self
            .find_one(bson::doc! { "_id": customer_id }, None)
            .await?;

        Ok(customer)
    }

    #[tracing::instrument(skip(self))]
    async fn count_customers(&self) -> Result<u64, Error> {
        let count = self.count_documents(bson::doc! {}, None).await?;

        Ok(count)
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    #[tracing::instrument(skip(self))]
    async fn insert_customer(&self, customer: &Customer) -> Result<(), Error> {
        self.insert(customer.id, customer.clone());

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_customers(&self) -> Result<Vec<Customer>, Error> {
        let mut customers: Vec<Customer> = self.iter().map(|r| r.value().clone()).collect();
        customers.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(customers)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_customer_by_id(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Customer>, Error> {
        Ok(self.get(&customer_id).map(|r| r.value().clone()))
    }

    #[tracing::instrument(skip(self))]
    async fn count_customers(&self) -> Result<u64, Error> {
        Ok(self.len() as u64)
    }
}
