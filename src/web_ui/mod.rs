mod pages;

use std::net::IpAddr;
use std::sync::Arc;
use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use axum_macros::FromRef;
use log::info;
use random_port::{PortPicker, Protocol};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use crate::client::StoreBackend;
use crate::config::AppConfig;
use crate::web_ui::pages::*;

#[derive(Clone, FromRef)]
pub struct AppState {
    config: Arc<AppConfig>,
    store: StoreBackend,
}

impl AppState {
    pub fn new(config: AppConfig, store: StoreBackend) -> Self {
        Self { config: Arc::new(config), store }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/admin", get(admin_page))
        .route("/admin/articles", post(create_article))
        .route("/admin/articles/:article_id", post(update_article))
        .route("/admin/articles/:article_id/delete", post(delete_article))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

/// Serves the web UI. Without a port a free one is picked.
pub async fn serve(app_state: AppState, host: IpAddr, port: Option<u16>) -> anyhow::Result<()> {
    let port = match port {
        Some(port) => port,
        None => PortPicker::new().protocol(Protocol::Tcp).pick()
            .map_err(|e| anyhow::anyhow!("failed to pick a free port: {:?}", e))?,
    };
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!("blog listening on http://{}", &addr);
    axum::serve(listener, router(app_state)).await?;
    Ok(())
}

struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
    where
        T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template. Error: {}", err),
            ).into_response(),
        }
    }
}
