use log::{debug, info};
use crate::entities::{Article, ArticleId, ArticleRecord};
use crate::error::StoreError;
use crate::storage::{Storage, StoreOperation};

/// Article table behind the reference store server.
///
/// Articles are kept newest-first. Every mutation is appended to the operation log
/// and only then applied in memory; `init` replays the log on start-up. Ids come from a
/// sequence and are never handed out twice, even after a delete.
pub struct ArticleDb<S: Storage> {
    storage: S,
    articles: Vec<Article>,
    next_id: ArticleId,
}

impl<S: Storage> ArticleDb<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            articles: Vec::new(),
            next_id: 1,
        }
    }

    pub async fn init(&mut self) -> Result<(), StoreError> {
        info!("Starting article import from log...");
        let operations = self.storage.read_all().await?;
        let count = operations.len();
        for operation in operations {
            self.apply_no_log(operation);
        }
        info!("Imported {} operations, {} articles", count, self.articles.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn list(&self) -> Vec<Article> {
        self.articles.clone()
    }

    pub fn get(&self, article_id: ArticleId) -> Option<&Article> {
        self.articles.iter().find(|x| x.id == article_id)
    }

    pub async fn create(&mut self, record: ArticleRecord) -> Result<Article, StoreError> {
        let article = Article::from_record(self.next_id, record);
        self.write_log(StoreOperation::Create { article: article.clone() }).await?;
        self.apply_no_log(StoreOperation::Create { article: article.clone() });
        Ok(article)
    }

    pub async fn update(&mut self, article_id: ArticleId, record: ArticleRecord) -> Result<Option<Article>, StoreError> {
        if self.get(article_id).is_none() {
            return Ok(None);
        }
        let article = Article::from_record(article_id, record);
        self.write_log(StoreOperation::Update { article: article.clone() }).await?;
        self.apply_no_log(StoreOperation::Update { article: article.clone() });
        Ok(Some(article))
    }

    pub async fn delete(&mut self, article_id: ArticleId) -> Result<Option<Article>, StoreError> {
        let maybe_article = self.get(article_id).cloned();
        if maybe_article.is_some() {
            self.write_log(StoreOperation::Delete { article_id }).await?;
            self.apply_no_log(StoreOperation::Delete { article_id });
        }
        Ok(maybe_article)
    }

    fn apply_no_log(&mut self, operation: StoreOperation) {
        match operation {
            StoreOperation::Create { article } => {
                self.next_id = self.next_id.max(article.id + 1);
                self.articles.retain(|x| x.id != article.id);
                self.articles.insert(0, article);
            }
            StoreOperation::Update { article } => {
                if let Some(existing) = self.articles.iter_mut().find(|x| x.id == article.id) {
                    *existing = article;
                }
            }
            StoreOperation::Delete { article_id } => {
                self.articles.retain(|x| x.id != article_id);
            }
        }
    }

    async fn write_log(&mut self, operation: StoreOperation) -> Result<(), StoreError> {
        debug!("Writing to log: {:?}", operation);
        self.storage.write(operation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, InMemoryStorage};

    fn record(title: &str) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            excerpt: "excerpt".to_string(),
            image: "https://example.com/a.jpg".to_string(),
            tags: vec!["Rust".to_string()],
            date: "1 May 2024".to_string(),
            read_time: "5 min".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_is_newest_first() {
        let mut db = ArticleDb::new(InMemoryStorage::default());
        let first = db.create(record("first")).await.unwrap();
        let second = db.create(record("second")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        let titles = db.list().into_iter().map(|x| x.title).collect::<Vec<String>>();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let mut db = ArticleDb::new(InMemoryStorage::default());
        db.create(record("first")).await.unwrap();
        db.create(record("second")).await.unwrap();

        let updated = db.update(1, record("first, revised")).await.unwrap().unwrap();
        assert_eq!(updated.id, 1);
        let titles = db.list().into_iter().map(|x| x.title).collect::<Vec<String>>();
        assert_eq!(titles, vec!["second", "first, revised"]);

        assert!(db.update(42, record("ghost")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let mut db = ArticleDb::new(InMemoryStorage::default());
        db.create(record("first")).await.unwrap();
        db.create(record("second")).await.unwrap();
        assert!(db.delete(2).await.unwrap().is_some());
        assert!(db.delete(2).await.unwrap().is_none());
        let third = db.create(record("third")).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_init_replays_file_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.log.json");
        {
            let mut db = ArticleDb::new(FileStorage::new(path.clone()).unwrap());
            db.init().await.unwrap();
            db.create(record("first")).await.unwrap();
            db.create(record("second")).await.unwrap();
            db.update(1, record("first, revised")).await.unwrap();
            db.delete(2).await.unwrap();
        }

        let mut db = ArticleDb::new(FileStorage::new(path).unwrap());
        db.init().await.unwrap();
        assert_eq!(db.len(), 1);
        assert_eq!(db.get(1).unwrap().title, "first, revised");
        let next = db.create(record("third")).await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn test_failed_log_append_leaves_table_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.log.json");
        let mut db = ArticleDb::new(FileStorage::new(path.clone()).unwrap());
        db.init().await.unwrap();
        db.create(record("first")).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(db.create(record("second")).await.is_err());
        assert!(db.update(1, record("first, revised")).await.is_err());
        assert!(db.delete(1).await.is_err());
        assert_eq!(db.len(), 1);
        assert_eq!(db.get(1).unwrap().title, "first");

        std::fs::write(&path, "").unwrap();
        assert_eq!(db.create(record("second")).await.unwrap().id, 2);
    }
}
