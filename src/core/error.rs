//! Typed error handling
//!
//! # Error Categories
//!
//! - [`MarketError`]: everything a request handler can fail with
//! - [`StorageError`]: failures of a storage backend
//! - [`ConfigError`]: failures while loading or checking configuration
//!
//! Validation problems are not errors in this sense: they are reported back to
//! the user on the re-rendered form (see [`FormErrors`](crate::core::validation::FormErrors)).
//!
//! # Example
//!
//! ```rust,ignore
//! async fn load(service: &dyn ProductService, id: Uuid) -> Result<Product, MarketError> {
//!     service.get(&id).await?.ok_or_else(|| MarketError::not_found(id))
//! }
//! ```

use crate::core::query::PageError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use uuid::Uuid;

/// The main error type for request handling
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    /// The identifier does not resolve to a product
    #[error("product '{id}' not found")]
    NotFound { id: String },

    /// The requested listing page does not exist
    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),
}

impl MarketError {
    pub fn not_found(id: impl ToString) -> Self {
        MarketError::NotFound { id: id.to_string() }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            MarketError::NotFound { .. } | MarketError::Page(_) => StatusCode::NOT_FOUND,
            MarketError::Storage(_) | MarketError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            MarketError::NotFound { .. } => "PRODUCT_NOT_FOUND",
            MarketError::Page(_) => "PAGE_NOT_FOUND",
            MarketError::Storage(e) => e.error_code(),
            MarketError::Template(_) => "TEMPLATE_ERROR",
        }
    }

    /// Message safe to show to the user
    ///
    /// Server-side failures are reported generically; their detail goes to the log.
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            "Something went wrong on our side. Please try again later.".to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }

        let title = status.canonical_reason().unwrap_or("Error");
        let body = format!(
            "<!DOCTYPE html>\n<html><head><title>{title}</title></head>\
             <body><h1>{title}</h1><p>{message}</p><p><a href=\"/\">Back to catalog</a></p></body></html>",
            title = title,
            message = tera::escape_html(&self.public_message()),
        );
        (status, Html(body)).into_response()
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{backend} connection error: {message}")]
    Connection { backend: String, message: String },

    #[error("{backend} query failed: {message}")]
    Query { backend: String, message: String },

    /// A stored row could not be mapped back to a product
    #[error("stored product '{id}' is invalid: {message}")]
    CorruptRow { id: Uuid, message: String },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Connection { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::Query { .. } => "STORAGE_QUERY_ERROR",
            StorageError::CorruptRow { .. } => "STORAGE_CORRUPT_ROW",
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StorageError::Connection {
                    backend: "PostgreSQL".to_string(),
                    message: err.to_string(),
                }
            }
            other => StorageError::Query {
                backend: "PostgreSQL".to_string(),
                message: other.to_string(),
            },
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StorageError::Query {
            backend: "PostgreSQL".to_string(),
            message: format!("migration failed: {}", err),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_404() {
        let err = MarketError::not_found(Uuid::nil());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "PRODUCT_NOT_FOUND");
        assert!(err.public_message().contains(&Uuid::nil().to_string()));
    }

    #[test]
    fn test_storage_error_hides_detail() {
        let err = MarketError::from(StorageError::Query {
            backend: "PostgreSQL".to_string(),
            message: "relation \"products\" does not exist".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORAGE_QUERY_ERROR");
        assert!(!err.public_message().contains("relation"));
    }

    #[test]
    fn test_into_response_escapes_message() {
        let err = MarketError::not_found("<script>");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
