use chrono::Utc;

use crate::database::Database;
use crate::error::Error;

use super::{Customer, CustomerId};

#[tracing::instrument(skip(db))]
pub async fn create_customer(
    db: &dyn Database,
    name: String,
    email: String,
    preferences: Option<String>,
    lifetime_value: f64,
) -> Result<Customer, Error> {
    if name.trim().is_empty() {
        return Err(Error::CustomerNameMissing);
    }
    if email.trim().is_empty() {
        return Err(Error::CustomerEmailMissing);
    }
    // also rejects NaN
    if !(lifetime_value >= 0.0) {
        return Err(Error::NegativeLifetimeValue { lifetime_value });
    }

    let customer = Customer {
        id: CustomerId::new(),
        name,
        email,
        preferences: preferences.filter(|p| !p.trim().is_empty()),
        purchase_history: vec![],
        lifetime_value,
        created_at: Utc::now(),
    };

    db.customers().insert_customer(&customer).await?;

    Ok(customer)
}

#[tracing::instrument(skip(db))]
pub async fn get_customers(db: &dyn Database) -> Result<Vec<Customer>, Error> {
    let customers = db.customers().fetch_customers().await?;

    Ok(customers)
}

/// Looks up a customer by the id as the caller wrote it. Ids that are not
/// even well-formed are reported the same way as ids that are absent.
#[tracing::instrument(skip(db))]
pub async fn get_customer_by_id(db: &dyn Database, customer_id: &str) -> Result<Customer, Error> {
    let not_found = || Error::CustomerDoesNotExist {
        customer_id: customer_id.to_string(),
    };

    let parsed_id: CustomerId = customer_id.parse().map_err(|_| not_found())?;

    let customer = db
        .customers()
        .fetch_customer_by_id(parsed_id)
        .await?
        .ok_or_else(not_found)?;

    Ok(customer)
}
