use std::sync::Arc;

use taskhive_config::Settings;
use taskhive_db::{connect, indexes::ensure_indexes};
use taskhive_services::dao::MongoStore;
use taskhive_services::notify::NotificationEngine;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "taskhive_sweeper=debug,taskhive_services=debug,taskhive_db=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let settings = Settings::load()?;
    info!(
        schedule = %settings.sweep.schedule,
        window_hours = settings.sweep.near_due_window_hours,
        "Starting due-date sweeper"
    );

    // Connect to MongoDB
    let db = connect(&settings).await?;

    // Ensure indexes
    ensure_indexes(&db).await?;

    let store = Arc::new(MongoStore::new(&db));
    let engine = Arc::new(NotificationEngine::new(
        store,
        chrono::Duration::hours(settings.sweep.near_due_window_hours),
    ));

    let mut scheduler = JobScheduler::new().await?;
    let job = Job::new_async(settings.sweep.schedule.as_str(), move |_id, _scheduler| {
        let engine = Arc::clone(&engine);
        Box::pin(async move {
            match engine.run_due_sweep(bson::DateTime::now()).await {
                Ok(report) => info!(
                    near_due = report.near_due_created,
                    overdue = report.overdue_created,
                    "Due-date sweep finished"
                ),
                Err(error) => error!(%error, "Due-date sweep failed"),
            }
        })
    })?;
    scheduler.add(job).await?;
    scheduler.start().await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    scheduler.shutdown().await?;

    Ok(())
}
