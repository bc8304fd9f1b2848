use std::sync::Arc;

use actix_web::web::{self, Data, FormConfig, JsonConfig, PathConfig, QueryConfig};
use actix_web::{App, HttpServer, ResponseError};
use mongodb::Client;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod campaign;
pub mod config;
pub mod customer;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod personalization;
pub mod seed;
pub mod typedid;

use crate::config::{AppConfig, DatabaseBackend};
use crate::database::{Database, MemoryDatabase, MongoDatabase};
use crate::error::Error;

/// Registers request decoding, the routes, and the fallback for unknown
/// paths. Callers add the `Database` and `AssemblyConfig` app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .app_data(FormConfig::default().error_handler(|err, _req| {
        // format form errors with custom format
        Error::InvalidForm(err).into()
    }))
    .app_data(QueryConfig::default().error_handler(|err, _req| {
        // format query errors with custom format
        Error::InvalidQuery(err).into()
    }))
    .service(customer::endpoints::create_customer)
    .service(customer::endpoints::get_customers)
    .service(customer::endpoints::get_customer_by_id)
    .service(customer::endpoints::get_customer_recommendations)
    .service(campaign::endpoints::create_campaign)
    .service(campaign::endpoints::get_campaigns)
    .service(campaign::endpoints::get_campaign_by_id)
    .service(dashboard::endpoints::get_dashboard)
    .default_service(web::to(|| async { Error::PathDoesNotExist.error_response() }));
}

pub async fn connect(config: &AppConfig) -> Result<Arc<dyn Database>, Error> {
    let db: Arc<dyn Database> = match config.database.backend {
        DatabaseBackend::Mongo => {
            info!("connecting to db: {}", config.database.uri);
            let client = Client::with_uri_str(&config.database.uri).await?;
            let db = MongoDatabase::initialize(client.database(&config.database.name)).await?;
            Arc::new(db)
        }
        DatabaseBackend::Memory => Arc::new(MemoryDatabase::new()),
    };

    Ok(db)
}

pub async fn run(config: AppConfig) -> Result<(), Error> {
    let db = connect(&config).await?;

    if config.seed {
        seed::seed(db.as_ref()).await?;
    }

    let db = Data::from(db);
    let assembly = Data::new(config.assembly.clone());

    info!("listening on {}", config.server.bind);
    HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .app_data(assembly.clone())
            .wrap(TracingLogger::default())
            .configure(configure)
    })
    .bind(&config.server.bind)?
    .run()
    .await?;

    Ok(())
}
