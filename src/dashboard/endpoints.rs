use actix_web::get;
use actix_web::web::{Data, Json};

use crate::database::Database;
use crate::error::Error;

use super::{manager, Dashboard};

#[get("/dashboard")]
#[tracing::instrument(skip(db))]
pub async fn get_dashboard(db: Data<dyn Database>) -> Result<Json<Dashboard>, Error> {
    let dashboard = manager::get_dashboard(db.get_ref()).await?;

    Ok(Json(dashboard))
}
