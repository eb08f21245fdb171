use crate::model::types::*;
use axum::extract::FromRef;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(FromRef, Clone, Debug)]
pub struct AppState {
    pub db: Db,
    pub leptos_options: leptos::prelude::LeptosOptions,
}

impl AppState {
    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS` and connects.
    pub async fn new(leptos_options: leptos::prelude::LeptosOptions) -> Result<Self, Error> {
        let db_url = std::env::var("DATABASE_URL")?;
        let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value.parse().map_err(|e| {
                Error::InvalidRequest(format!("DATABASE_MAX_CONNECTIONS={value}: {e}"))
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        tracing::info!("connecting to database");
        let db = Db::new(&db_url, max_connections).await?;
        tracing::info!("connected to database");

        Ok(Self { db, leptos_options })
    }
}
