use crate::customer;
use crate::database::Database;
use crate::error::Error;

use super::{generate_recommendations, RecommendationBundle};

/// Generates a fresh recommendation bundle for a stored customer. Campaign
/// records are never consulted, even if the customer was targeted before.
#[tracing::instrument(skip(db))]
pub async fn fetch_recommendations(
    db: &dyn Database,
    customer_id: &str,
) -> Result<RecommendationBundle, Error> {
    let customer = customer::manager::get_customer_by_id(db, customer_id).await?;

    Ok(generate_recommendations(customer.id))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::customer::{Customer, CustomerId};
    use crate::database::test::MockDatabase;

    #[tokio::test]
    async fn fetch_recommendations_for_known_customer() {
        let mut db = MockDatabase::new();
        let test_customer_id = CustomerId::new();
        db.customers.on_fetch_customer_by_id = Box::new(move |customer_id| {
            Ok(Some(Customer {
                id: customer_id,
                name: "Ava".to_string(),
                email: "ava@example.com".to_string(),
                preferences: Some("fitness".to_string()),
                purchase_history: vec![],
                lifetime_value: 0.0,
                created_at: Utc::now(),
            }))
        });

        let bundle = fetch_recommendations(&db, &test_customer_id.to_string())
            .await
            .unwrap();

        assert_eq!(bundle.products.len(), 3);
    }

    #[tokio::test]
    async fn fetch_recommendations_for_unknown_customer() {
        let mut db = MockDatabase::new();
        db.customers.on_fetch_customer_by_id = Box::new(|_| Ok(None));

        let result = fetch_recommendations(&db, &CustomerId::new().to_string()).await;

        assert!(matches!(result, Err(Error::CustomerDoesNotExist { .. })));
    }
}
