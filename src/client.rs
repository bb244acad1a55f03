use std::sync::Arc;
use std::time::Duration;
use log::debug;
use reqwest::{Client, Response};
use tokio::sync::RwLock;
use crate::entities::{Article, ArticleId, ArticleRecord};
use crate::error::StoreError;

/// The remote article collection the views read from and write to.
///
/// Success of a write is decided by the transport alone; response bodies of writes
/// are never inspected.
pub trait ArticleStore {
    async fn list(&self) -> Result<Vec<Article>, StoreError>;
    async fn create(&self, record: &ArticleRecord) -> Result<(), StoreError>;
    async fn update(&self, article_id: ArticleId, record: &ArticleRecord) -> Result<(), StoreError>;
    async fn delete(&self, article_id: ArticleId) -> Result<(), StoreError>;
}

#[derive(Debug)]
struct HttpStoreConfig {
    api_url: String,
}

#[derive(Clone, Debug)]
pub struct HttpArticleStore {
    client: Client,
    config: Arc<HttpStoreConfig>,
}

impl HttpArticleStore {
    pub fn new(api_url: &str, request_timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        let api_url = api_url.trim_end_matches('/').to_string();
        Ok(Self { client, config: Arc::new(HttpStoreConfig { api_url }) })
    }

    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    fn articles_url(&self) -> String {
        format!("{}/articles", self.config.api_url)
    }

    fn article_url(&self, article_id: ArticleId) -> String {
        format!("{}/articles/{}", self.config.api_url, article_id)
    }
}

fn accepted(res: Response) -> Result<Response, StoreError> {
    let status = res.status();
    if !status.is_success() {
        return Err(StoreError::Rejected(status.as_u16()));
    }
    Ok(res)
}

impl ArticleStore for HttpArticleStore {
    async fn list(&self) -> Result<Vec<Article>, StoreError> {
        let url = self.articles_url();
        debug!("GET {}", url);
        let res = accepted(self.client.get(&url).send().await?)?;
        let articles: Vec<Article> = res.json().await?;
        Ok(articles)
    }

    async fn create(&self, record: &ArticleRecord) -> Result<(), StoreError> {
        let url = self.articles_url();
        debug!("POST {}", url);
        accepted(self.client.post(&url).json(record).send().await?)?;
        Ok(())
    }

    async fn update(&self, article_id: ArticleId, record: &ArticleRecord) -> Result<(), StoreError> {
        let url = self.article_url(article_id);
        debug!("PUT {}", url);
        accepted(self.client.put(&url).json(record).send().await?)?;
        Ok(())
    }

    async fn delete(&self, article_id: ArticleId) -> Result<(), StoreError> {
        let url = self.article_url(article_id);
        debug!("DELETE {}", url);
        accepted(self.client.delete(&url).send().await?)?;
        Ok(())
    }
}

/// In-process store for running without a backing service.
///
/// New articles get `max(id) + 1` and are prepended. Clones share the same collection.
#[derive(Clone, Debug, Default)]
pub struct LocalArticleStore {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl LocalArticleStore {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self { articles: Arc::new(RwLock::new(articles)) }
    }
}

impl ArticleStore for LocalArticleStore {
    async fn list(&self) -> Result<Vec<Article>, StoreError> {
        Ok(self.articles.read().await.clone())
    }

    async fn create(&self, record: &ArticleRecord) -> Result<(), StoreError> {
        let mut articles = self.articles.write().await;
        let id = articles.iter().map(|x| x.id).max().unwrap_or(0) + 1;
        articles.insert(0, Article::from_record(id, record.clone()));
        Ok(())
    }

    async fn update(&self, article_id: ArticleId, record: &ArticleRecord) -> Result<(), StoreError> {
        let mut articles = self.articles.write().await;
        let existing = articles.iter_mut().find(|x| x.id == article_id)
            .ok_or(StoreError::NotFound(article_id))?;
        *existing = Article::from_record(article_id, record.clone());
        Ok(())
    }

    async fn delete(&self, article_id: ArticleId) -> Result<(), StoreError> {
        self.articles.write().await.retain(|x| x.id != article_id);
        Ok(())
    }
}

/// The store selected by configuration.
#[derive(Clone, Debug)]
pub enum StoreBackend {
    Http(HttpArticleStore),
    Local(LocalArticleStore),
}

impl ArticleStore for StoreBackend {
    async fn list(&self) -> Result<Vec<Article>, StoreError> {
        match self {
            StoreBackend::Http(store) => store.list().await,
            StoreBackend::Local(store) => store.list().await,
        }
    }

    async fn create(&self, record: &ArticleRecord) -> Result<(), StoreError> {
        match self {
            StoreBackend::Http(store) => store.create(record).await,
            StoreBackend::Local(store) => store.create(record).await,
        }
    }

    async fn update(&self, article_id: ArticleId, record: &ArticleRecord) -> Result<(), StoreError> {
        match self {
            StoreBackend::Http(store) => store.update(article_id, record).await,
            StoreBackend::Local(store) => store.update(article_id, record).await,
        }
    }

    async fn delete(&self, article_id: ArticleId) -> Result<(), StoreError> {
        match self {
            StoreBackend::Http(store) => store.delete(article_id).await,
            StoreBackend::Local(store) => store.delete(article_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> ArticleRecord {
        ArticleRecord { title: title.to_string(), tags: vec!["A".to_string()], ..Default::default() }
    }

    #[tokio::test]
    async fn test_local_store_prepends_with_next_id() {
        let store = LocalArticleStore::with_articles(vec![
            Article { id: 7, title: "seven".to_string(), ..Default::default() },
            Article { id: 2, title: "two".to_string(), ..Default::default() },
        ]);
        store.create(&record("new")).await.unwrap();
        let articles = store.list().await.unwrap();
        assert_eq!(articles[0].id, 8);
        assert_eq!(articles[0].title, "new");
        assert_eq!(articles.len(), 3);
    }

    #[tokio::test]
    async fn test_local_store_starts_ids_at_one() {
        let store = LocalArticleStore::default();
        store.create(&record("first")).await.unwrap();
        assert_eq!(store.list().await.unwrap()[0].id, 1);
    }

    #[tokio::test]
    async fn test_local_store_update_and_delete() {
        let store = LocalArticleStore::default();
        store.create(&record("first")).await.unwrap();
        store.update(1, &record("renamed")).await.unwrap();
        assert_eq!(store.list().await.unwrap()[0].title, "renamed");
        assert!(matches!(store.update(9, &record("ghost")).await, Err(StoreError::NotFound(9))));
        store.delete(1).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_local_store_clones_share_state() {
        let store = LocalArticleStore::default();
        let backend = StoreBackend::Local(store.clone());
        backend.create(&record("shared")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[test]
    fn test_http_store_urls() {
        let store = HttpArticleStore::new("http://localhost:1698/", Duration::from_secs(1)).unwrap();
        assert_eq!(store.api_url(), "http://localhost:1698");
        assert_eq!(store.articles_url(), "http://localhost:1698/articles");
        assert_eq!(store.article_url(4), "http://localhost:1698/articles/4");
    }
}
