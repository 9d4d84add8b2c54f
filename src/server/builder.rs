//! ServerBuilder for fluent API to build the HTTP server

use super::handlers::AppState;
use super::router::build_routes;
use crate::core::service::BookingService;
use crate::core::store::BookingStore;
use crate::media::{LiveKitTokenIssuer, TokenIssuer};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the booking API router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryBookingStore::new())
///     .with_token_issuer(LiveKitTokenIssuer::new(key, secret, url))
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn BookingStore>>,
    token_issuer: Option<Arc<dyn TokenIssuer>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            token_issuer: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the booking store (required)
    pub fn with_store(mut self, store: impl BookingStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared booking store (required)
    pub fn with_shared_store(mut self, store: Arc<dyn BookingStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the token issuer
    ///
    /// Without one, `/api/token` answers 500 until credentials are configured.
    pub fn with_token_issuer(mut self, issuer: impl TokenIssuer + 'static) -> Self {
        self.token_issuer = Some(Arc::new(issuer));
        self
    }

    /// Add routes that sit next to the booking API
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared handler state
    pub fn build_state(&mut self) -> Result<AppState> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("BookingStore is required. Call .with_store()"))?;

        let tokens = self
            .token_issuer
            .take()
            .unwrap_or_else(|| Arc::new(LiveKitTokenIssuer::new(None, None, None)));

        Ok(AppState {
            bookings: BookingService::new(store),
            tokens,
        })
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;
        let mut app = build_routes(state);
        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }
        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server is running on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
