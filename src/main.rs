use anyhow::{Context, Result};
use market::config::{AppConfig, StorageBackend, StorageConfig};
use market::server::ServerBuilder;
use market::storage::{InMemoryProductService, seed::demo_products};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_yaml_file(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        None => AppConfig::default(),
    }
    .with_env_overrides();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    config.validate()?;

    let builder = match config.storage.backend {
        StorageBackend::InMemory => {
            let service = if config.storage.seed {
                let products = demo_products();
                tracing::info!(count = products.len(), "seeding in-memory catalog");
                InMemoryProductService::with_products(products)
            } else {
                InMemoryProductService::new()
            };
            ServerBuilder::new().with_product_service(service)
        }
        StorageBackend::Postgres => postgres_builder(&config.storage).await?,
    };

    tracing::info!(backend = ?config.storage.backend, "storage ready");
    builder.serve(&config.server.bind_address()).await
}

#[cfg(feature = "postgres")]
async fn postgres_builder(storage: &StorageConfig) -> Result<ServerBuilder> {
    use market::storage::PostgresProductService;

    let url = storage
        .url
        .as_deref()
        .context("storage.url is required for the postgres backend")?;
    let service = PostgresProductService::connect(url, storage.max_connections).await?;
    service.migrate().await?;

    if storage.seed {
        tracing::warn!("storage.seed only applies to the in-memory backend");
    }

    Ok(ServerBuilder::new().with_product_service(service))
}

#[cfg(not(feature = "postgres"))]
async fn postgres_builder(_storage: &StorageConfig) -> Result<ServerBuilder> {
    anyhow::bail!("the postgres backend requires building with `--features postgres`")
}
