use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use user_api::config::AppConfig;
use user_api::context::AppContext;
use user_api::routes;
use user_api::store::PgUserStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and TOKEN_SECRET.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let store = PgUserStore::new(pool);
    store.ensure_schema().await.context("failed to prepare users table")?;

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let ctx = AppContext::new(Arc::new(store), config);
    let app = routes::app(ctx);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("user-api listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
