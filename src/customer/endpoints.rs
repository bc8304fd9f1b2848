use actix_web::web::{Data, Json, Path};
use actix_web::{get, post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::personalization::{self, RecommendationBundle};

use super::{manager, Customer, CustomerId};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCustomerBody {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub preferences: Option<String>,
    #[serde(default)]
    pub lifetime_value: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomerBody {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub preferences: Option<String>,
    pub purchase_history: Vec<String>,
    pub lifetime_value: f64,
    pub created_at: DateTime<Utc>,
}

impl CustomerBody {
    pub fn render(customer: Customer) -> CustomerBody {
        CustomerBody {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            preferences: customer.preferences,
            purchase_history: customer.purchase_history,
            lifetime_value: customer.lifetime_value,
            created_at: customer.created_at,
        }
    }
}

#[post("/customers")]
#[tracing::instrument(skip(db))]
pub async fn create_customer(
    db: Data<dyn Database>,
    body: Json<CreateCustomerBody>,
) -> Result<Json<CustomerBody>, Error> {
    let body = body.into_inner();

    let customer = manager::create_customer(
        db.get_ref(),
        body.name,
        body.email,
        body.preferences,
        body.lifetime_value,
    )
    .await?;

    Ok(Json(CustomerBody::render(customer)))
}

#[get("/customers")]
#[tracing::instrument(skip(db))]
pub async fn get_customers(db: Data<dyn Database>) -> Result<Json<Vec<CustomerBody>>, Error> {
    let customers = manager::get_customers(db.get_ref()).await?;

    let body = customers.into_iter().map(CustomerBody::render).collect();

    Ok(Json(body))
}

#[get("/customers/{customer_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_customer_by_id(
    db: Data<dyn Database>,
    params: Path<String>,
) -> Result<Json<CustomerBody>, Error> {
    let customer_id = params.into_inner();

    let customer = manager::get_customer_by_id(db.get_ref(), &customer_id).await?;

    Ok(Json(CustomerBody::render(customer)))
}

#[get("/customers/{customer_id}/recommendations")]
#[tracing::instrument(skip(db))]
pub async fn get_customer_recommendations(
    db: Data<dyn Database>,
    params: Path<String>,
) -> Result<Json<RecommendationBundle>, Error> {
    let customer_id = params.into_inner();

    let recommendations =
        personalization::manager::fetch_recommendations(db.get_ref(), &customer_id).await?;

    Ok(Json(recommendations))
}
