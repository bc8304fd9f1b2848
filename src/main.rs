use campaigner::config::{AppConfig, DatabaseBackend};
use campaigner::error::Error;
use clap::Parser;
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "campaigner")]
#[command(about = "Customer roster and personalized campaign service")]
#[command(version)]
struct Cli {
    /// TOML config file; missing files are ignored
    #[arg(long, env = "CAMPAIGNER_CONFIG", default_value = "campaigner.toml")]
    config: String,

    /// Address to listen on (overrides config)
    #[arg(long)]
    bind: Option<String>,

    /// Use the in-memory store instead of MongoDB
    #[arg(long, default_value_t = false)]
    memory: bool,

    /// Drop all data and insert demo customers on startup
    #[arg(long, default_value_t = false)]
    seed: bool,
}

#[actix_web::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if cli.memory {
        config.database.backend = DatabaseBackend::Memory;
    }
    if cli.seed {
        config.seed = true;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_span_events(FmtSpan::NEW)
        .compact()
        .init();

    info!(
        bind = %config.server.bind,
        backend = ?config.database.backend,
        concurrency = config.assembly.concurrency,
        seed = config.seed,
        "configuration loaded"
    );

    campaigner::run(config).await
}
