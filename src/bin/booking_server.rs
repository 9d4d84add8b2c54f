//! Restaurant booking API server
//!
//! Reads its settings from the environment (and an optional `.env` file or
//! YAML file named by `BOOKING_CONFIG`), connects the record store and
//! serves until SIGTERM or Ctrl+C.

use anyhow::{Context, Result};
use booking::config::{AppConfig, StorageBackend};
use booking::core::{BookingService, BookingStore};
use booking::demo::seed_demo_bookings;
use booking::media::LiveKitTokenIssuer;
use booking::server::ServerBuilder;
use booking::storage::InMemoryBookingStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::load().context("invalid configuration")?;
    tracing::info!(storage = ?config.storage, addr = %config.bind_addr(), "Starting booking server");

    let store = open_store(&config).await?;

    if config.seed_demo {
        let service = BookingService::new(store.clone());
        let seeded = seed_demo_bookings(&service)
            .await
            .context("failed to seed demo bookings")?;
        tracing::info!(count = seeded.len(), "Demo bookings inserted");
    }

    if config.livekit.api_key.is_none() || config.livekit.api_secret.is_none() {
        tracing::warn!("LiveKit credentials are not configured; /api/token will fail");
    }
    let tokens = LiveKitTokenIssuer::new(
        config.livekit.api_key.clone(),
        config.livekit.api_secret.clone(),
        config.livekit.url.clone(),
    );

    ServerBuilder::new()
        .with_shared_store(store)
        .with_token_issuer(tokens)
        .serve(&config.bind_addr())
        .await
}

async fn open_store(config: &AppConfig) -> Result<Arc<dyn BookingStore>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory booking store");
            Ok(Arc::new(InMemoryBookingStore::new()))
        }
        #[cfg(feature = "mongodb_backend")]
        StorageBackend::Mongodb => {
            let uri = config
                .mongo
                .connection_string
                .as_deref()
                .context("MONGO_CONNECTION_STRING is not set")?;
            let store =
                booking::storage::MongoBookingStore::connect(uri, &config.mongo.database)
                    .await
                    .context("invalid MongoDB connection string")?;
            tracing::info!(database = %config.mongo.database, "Using MongoDB booking store");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb_backend"))]
        StorageBackend::Mongodb => {
            anyhow::bail!("built without the mongodb_backend feature")
        }
    }
}
