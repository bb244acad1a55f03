use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Context;
use axum::{Extension, Router};
use log::info;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
pub use error::ApiError;
use crate::db::ArticleDb;
use crate::storage::{FileStorage, InMemoryStorage, StorageBackend};

mod error;
mod controllers;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Reference implementation of the article store API.
#[derive(Debug, Clone)]
pub struct StoreServerConfig {
    pub addr: SocketAddr,
    /// JSON-lines operation log; `None` keeps articles in memory only.
    pub log_path: Option<PathBuf>,
}

#[derive(Clone)]
pub struct ApiContext {
    pub db: Arc<RwLock<ArticleDb<StorageBackend>>>,
}

impl ApiContext {
    pub async fn open(log_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let storage = match log_path {
            Some(path) => {
                info!("article log: {}", path.display());
                StorageBackend::File(FileStorage::new(path)?)
            }
            None => {
                info!("article log: in memory");
                StorageBackend::InMemory(InMemoryStorage::default())
            }
        };
        let mut db = ArticleDb::new(storage);
        db.init().await.context("failed to replay article log")?;
        Ok(Self { db: Arc::new(RwLock::new(db)) })
    }
}

pub fn app(ctx: ApiContext) -> Router {
    controllers::router()
        .layer(CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any))
        .layer(
            ServiceBuilder::new()
                .layer(Extension(ctx))
                .layer(TraceLayer::new_for_http()),
        )
}

pub async fn serve(config: StoreServerConfig) -> anyhow::Result<()> {
    let ctx = ApiContext::open(config.log_path).await?;
    let listener = TcpListener::bind(config.addr).await
        .with_context(|| format!("failed to bind to {}", config.addr))?;
    serve_on(listener, ctx).await
}

pub async fn serve_on(listener: TcpListener, ctx: ApiContext) -> anyhow::Result<()> {
    info!("article store listening on {}", listener.local_addr()?);
    axum::serve(listener, app(ctx))
        .await
        .context("error running HTTP server")
}
