use log::{debug, error};
use crate::client::ArticleStore;
use crate::entities::Article;
use crate::notify::{Notification, Notifications};
use crate::view::{Outcome, ViewLifecycle};

/// Holds a view's working set: the articles from its last successful read.
pub struct CollectionLoader<S: ArticleStore> {
    store: S,
    lifecycle: ViewLifecycle,
    working_set: Vec<Article>,
    loading: bool,
}

impl<S: ArticleStore> CollectionLoader<S> {
    pub fn new(store: S, lifecycle: ViewLifecycle) -> Self {
        Self {
            store,
            lifecycle,
            working_set: Vec::new(),
            loading: true,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn lifecycle(&self) -> &ViewLifecycle {
        &self.lifecycle
    }

    pub fn working_set(&self) -> &[Article] {
        &self.working_set
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Reads the whole collection. On failure the working set is left as it was.
    pub async fn load(&mut self, notifications: &mut Notifications) -> Outcome {
        self.loading = true;
        let activation = self.lifecycle.current();
        let result = self.store.list().await;
        self.loading = false;

        if !self.lifecycle.is_current(activation) {
            debug!("Dropping article list for a torn-down view");
            return Outcome::Stale;
        }
        match result {
            Ok(articles) => {
                debug!("Loaded {} articles", articles.len());
                self.working_set = articles;
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to load articles: {}", e);
                notifications.push(Notification::LOAD_FAILED);
                Outcome::Failed
            }
        }
    }
}
