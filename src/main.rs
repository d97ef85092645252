use anyhow::Context;
use blog_axum_sqlx::config::Config;
use blog_axum_sqlx::{http, logging};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // This returns an error if the `.env` file doesn't exist, but that's not what we want
    // since we're not going to use a `.env` file if we deploy this application.
    dotenvy::dotenv().ok();

    // Parse our configuration from the environment.
    // This will exit with a help message if required values are missing.
    let config = Config::parse();

    logging::init(&config)?;

    // We create a single connection pool for SQLx that's shared across the whole application.
    // This saves us from opening a new connection for every API call, which is wasteful.
    let db = PgPoolOptions::new()
        .max_connections(50)
        .connect(&config.database_url)
        .await
        .context("could not connect to database_url")?;

    // This embeds database migrations in the application binary so we can ensure the database
    // is migrated correctly on startup.
    sqlx::migrate!().run(&db).await?;

    http::serve(config, db).await?;

    Ok(())
}
