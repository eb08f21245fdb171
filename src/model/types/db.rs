use super::Error;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Db {
    pub pool: sqlx::PgPool,
}

impl Db {
    pub async fn new(url: &str, max_connections: u32) -> Result<Self, Error> {
        tracing::info!(max_connections, "creating db pool");
        let pool = sqlx::postgres::PgPoolOptions::new()
            .idle_timeout(Some(Duration::from_secs(60 * 15)))
            .acquire_timeout(Duration::from_secs(30))
            .max_connections(max_connections)
            .min_connections(1)
            .max_lifetime(Some(Duration::from_secs(60 * 60 * 24)))
            .connect(url)
            .await?;

        tracing::info!("running migrations");
        sqlx::migrate!("db/migrations").run(&pool).await?;
        tracing::info!("migrations ran");

        Ok(Db { pool })
    }
}
