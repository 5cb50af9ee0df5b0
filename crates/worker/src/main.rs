use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use export_worker::archive::clean_staging_dir;
use export_worker::config::Config;
use export_worker::coordinator::InstanceCoordinator;
use export_worker::logging::init_logging;
use export_worker::notifier::JobStatusNotifier;
use export_worker::pipeline::ExportPipeline;
use export_worker::poller::JobPoller;
use export_worker::services::{PgControlBus, S3ObjectStore};
use persistence::repositories::{ContentRepository, ExportJobRepository, UploadRepository};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting export worker v{}", env!("CARGO_PKG_VERSION"));

    // Create database pools: main content store plus the uploads store
    let pool = persistence::db::create_pool(&config.database.to_pool_config()).await?;
    let uploads_pool =
        persistence::db::create_pool(&config.uploads_database.to_pool_config()).await?;

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    sqlx::migrate!("../persistence/src/migrations_uploads")
        .run(&uploads_pool)
        .await?;
    info!("Migrations completed");

    // Leftovers from an interrupted predecessor are unusable
    clean_staging_dir(&config.export.staging_dir)?;

    // Wire collaborators
    let jobs = Arc::new(ExportJobRepository::new(pool.clone()));
    let content = Arc::new(ContentRepository::new(pool.clone()));
    let uploads = Arc::new(UploadRepository::new(uploads_pool));
    let objects = Arc::new(S3ObjectStore::new(&config.storage));
    let bus = Arc::new(PgControlBus::new(
        pool,
        config.export.control_channel.clone(),
        config.export.inbox_channel.clone(),
    ));

    let pipeline = ExportPipeline::new(content, uploads, objects, config.export.staging_dir);
    let notifier = JobStatusNotifier::new(jobs.clone(), bus.clone());
    let poller = JobPoller::new(jobs, pipeline, notifier);
    let coordinator = InstanceCoordinator::new(bus, poller);

    coordinator.run().await?;

    Ok(())
}
