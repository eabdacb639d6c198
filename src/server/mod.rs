//! HTTP server: handlers, routes, templates and the `ServerBuilder`

pub mod builder;
pub mod handlers;
pub mod router;
pub mod templates;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::SERVICE_NAME;
