use chrono::{Duration, Utc};
use tracing::info;

use crate::customer::Customer;
use crate::database::Database;
use crate::error::Error;

pub async fn seed(db: &dyn Database) -> Result<(), Error> {
    db.drop().await?;

    let now = Utc::now();
    let customers = vec![
        Customer {
            id: "CST-6F1D2C0A-4B7E-4D35-9A51-3C8E2F7B1A90".parse().unwrap(),
            name: "Ava".to_string(),
            email: "ava@example.com".to_string(),
            preferences: Some("fitness".to_string()),
            purchase_history: vec!["Yoga Mat".to_string(), "Resistance Bands".to_string()],
            lifetime_value: 240.0,
            created_at: now - Duration::days(30),
        },
        Customer {
            id: "CST-0B9A7E42-1C3D-4F6A-8E2B-5D7C9A1E3F48".parse().unwrap(),
            name: "Ben".to_string(),
            email: "ben@example.com".to_string(),
            preferences: Some("gaming".to_string()),
            purchase_history: vec![],
            lifetime_value: 75.5,
            created_at: now - Duration::days(12),
        },
        Customer {
            id: "CST-D45E8B13-7A2F-4C90-B6E1-29F0A8C3D7B5".parse().unwrap(),
            name: "Chloe".to_string(),
            email: "chloe@example.com".to_string(),
            preferences: None,
            purchase_history: vec![],
            lifetime_value: 0.0,
            created_at: now,
        },
    ];

    for customer in &customers {
        db.customers().insert_customer(customer).await?;
    }

    info!("seeded {} customers", customers.len());

    Ok(())
}
