use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use chrono::NaiveDate;
use crate::client::{ArticleStore, LocalArticleStore};
use crate::entities::{Article, ArticleId, ArticleRecord};
use crate::error::StoreError;
use crate::locale::Clock;
use crate::view::ViewLifecycle;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    List,
    Create(ArticleRecord),
    Update(ArticleId, ArticleRecord),
    Delete(ArticleId),
}

/// Local store that records requests and can be told to fail or to tear a view down
/// while a request is in flight.
#[derive(Clone, Default)]
pub struct ScriptedStore {
    inner: LocalArticleStore,
    requests: Arc<Mutex<Vec<Request>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    teardown_during_request: Arc<Mutex<Option<ViewLifecycle>>>,
    list_calls: Arc<AtomicUsize>,
}

impl ScriptedStore {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self { inner: LocalArticleStore::with_articles(articles), ..Default::default() }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn teardown_during_next_request(&self, lifecycle: ViewLifecycle) {
        *self.teardown_during_request.lock().unwrap() = Some(lifecycle);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn record(&self, request: Request) {
        self.requests.lock().unwrap().push(request);
        if let Some(lifecycle) = self.teardown_during_request.lock().unwrap().take() {
            lifecycle.teardown();
        }
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected(500));
        }
        Ok(())
    }
}

impl ArticleStore for ScriptedStore {
    async fn list(&self) -> Result<Vec<Article>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.record(Request::List);
        self.check(&self.fail_reads)?;
        self.inner.list().await
    }

    async fn create(&self, record: &ArticleRecord) -> Result<(), StoreError> {
        self.record(Request::Create(record.clone()));
        self.check(&self.fail_writes)?;
        self.inner.create(record).await
    }

    async fn update(&self, article_id: ArticleId, record: &ArticleRecord) -> Result<(), StoreError> {
        self.record(Request::Update(article_id, record.clone()));
        self.check(&self.fail_writes)?;
        self.inner.update(article_id, record).await
    }

    async fn delete(&self, article_id: ArticleId) -> Result<(), StoreError> {
        self.record(Request::Delete(article_id));
        self.check(&self.fail_writes)?;
        self.inner.delete(article_id).await
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn article(id: ArticleId, title: &str, tags: &[&str]) -> Article {
    Article {
        id,
        title: title.to_string(),
        excerpt: format!("About {}", title),
        image: format!("https://example.com/{}.jpg", id),
        tags: tags.iter().map(|x| x.to_string()).collect(),
        date: "15 December 2024".to_string(),
        read_time: "5 min".to_string(),
    }
}
