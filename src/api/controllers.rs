use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use log::info;
use serde::Deserialize;
use serde_json::{json, Value};
use crate::api::error::ApiError;
use crate::api::{ApiContext, Result};
use crate::entities::{Article, ArticleId, ArticleRecord, Tag};

pub fn router() -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/articles", get(get_all_articles).post(create_article))
        .route("/articles/:article_id", put(update_article).delete(delete_article))
}

async fn ping() -> String {
    "pong".to_string()
}

/// Write body as received. Absent fields default to empty so `validate` can report
/// them alongside blank ones.
#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase", default)]
struct ArticleRequest {
    title: String,
    excerpt: String,
    image: String,
    tags: Vec<Tag>,
    date: String,
    read_time: String,
}

impl ArticleRequest {
    fn validate(self) -> Result<ArticleRecord> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("title", &self.title),
            ("excerpt", &self.excerpt),
            ("image", &self.image),
            ("date", &self.date),
            ("readTime", &self.read_time),
        ] {
            if value.trim().is_empty() {
                errors.push((name, "must not be empty"));
            }
        }
        if self.tags.is_empty() {
            errors.push(("tags", "must contain at least one tag"));
        }
        if self.tags.iter().any(|x| x.trim().is_empty()) {
            errors.push(("tags", "must not contain empty tags"));
        }
        if !errors.is_empty() {
            return Err(ApiError::unprocessable_entity(errors));
        }
        Ok(ArticleRecord {
            title: self.title,
            excerpt: self.excerpt,
            image: self.image,
            tags: self.tags,
            date: self.date,
            read_time: self.read_time,
        })
    }
}

async fn get_all_articles(
    ctx: Extension<ApiContext>,
) -> Result<Json<Vec<Article>>> {
    let db = ctx.db.read().await;
    Ok(Json(db.list()))
}

async fn create_article(
    ctx: Extension<ApiContext>,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Article>)> {
    let Json(request) = payload?;
    let record = request.validate()?;
    let mut db = ctx.db.write().await;
    let article = db.create(record).await?;
    info!("Article created: {}", article.id);
    Ok((StatusCode::CREATED, Json(article)))
}

async fn update_article(
    ctx: Extension<ApiContext>,
    Path(article_id): Path<ArticleId>,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> Result<Json<Article>> {
    let Json(request) = payload?;
    let record = request.validate()?;
    let mut db = ctx.db.write().await;
    let article = db.update(article_id, record).await?
        .ok_or(ApiError::NotFound)?;
    info!("Article updated: {}", article.id);
    Ok(Json(article))
}

async fn delete_article(
    ctx: Extension<ApiContext>,
    Path(article_id): Path<ArticleId>,
) -> Result<Json<Value>> {
    let mut db = ctx.db.write().await;
    if db.delete(article_id).await?.is_some() {
        info!("Article deleted: {}", article_id);
    }
    Ok(Json(json!({ "success": true })))
}
