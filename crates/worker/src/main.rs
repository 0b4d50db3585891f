use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boostline_worker=debug,boostline_db=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = boostline_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    boostline_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    match boostline_worker::progression::run_monthly(&pool).await {
        Ok(summary) => {
            tracing::info!(
                period = %summary.period,
                processed = summary.processed,
                "Tier progression completed"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Tier progression failed");
            std::process::exit(1);
        }
    }
}
