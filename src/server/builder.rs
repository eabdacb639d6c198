//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_product_routes, health_routes};
use super::templates;
use crate::core::ProductService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_product_service(InMemoryProductService::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    product_service: Option<Arc<dyn ProductService>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            product_service: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the product service (required)
    pub fn with_product_service(self, service: impl ProductService + 'static) -> Self {
        self.with_shared_product_service(Arc::new(service))
    }

    /// Set an already shared product service
    pub fn with_shared_product_service(mut self, service: Arc<dyn ProductService>) -> Self {
        self.product_service = Some(service);
        self
    }

    /// Add custom routes to the server
    ///
    /// # Example
    ///
    /// ```ignore
    /// let admin = Router::new().route("/admin/stats", get(stats));
    ///
    /// ServerBuilder::new()
    ///     .with_product_service(service)
    ///     .with_custom_routes(admin)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    ///
    /// Merges health routes, catalog routes and custom routes, then wraps
    /// everything in HTTP tracing.
    pub fn build(self) -> Result<Router> {
        let service = self.product_service.ok_or_else(|| {
            anyhow::anyhow!("ProductService is required. Call .with_product_service()")
        })?;
        let state = AppState::new(service, templates::load()?);
        let mut app = health_routes().merge(build_product_routes(state));

        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr` and serves until SIGTERM or Ctrl+C.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

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

/// Wait for SIGTERM or Ctrl+C
///
/// A signal handler that cannot be installed never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
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
