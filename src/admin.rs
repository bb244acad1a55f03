use std::sync::Arc;
use log::{error, info};
use crate::client::ArticleStore;
use crate::entities::{Article, ArticleId, ArticleRecord};
use crate::error::{FormError, StoreError};
use crate::form::{ArticleForm, FormMode, FormState};
use crate::loader::CollectionLoader;
use crate::locale::{Clock, DisplayLocale, SystemClock};
use crate::notify::{Notification, Notifications};
use crate::view::{Activation, Outcome, ViewLifecycle};

/// Admin page controller: working set, article form and write coordination.
///
/// Every successful write is followed by a full reload; the working set is never
/// patched locally.
pub struct AdminView<S: ArticleStore> {
    loader: CollectionLoader<S>,
    form: FormState,
    notifications: Notifications,
    locale: DisplayLocale,
    clock: Arc<dyn Clock>,
}

impl<S: ArticleStore> AdminView<S> {
    pub fn new(store: S, locale: DisplayLocale) -> Self {
        Self::with_clock(store, locale, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, locale: DisplayLocale, clock: Arc<dyn Clock>) -> Self {
        Self {
            loader: CollectionLoader::new(store, ViewLifecycle::default()),
            form: FormState::default(),
            notifications: Notifications::default(),
            locale,
            clock,
        }
    }

    /// Builds the view and performs its single load.
    pub async fn activate(store: S, locale: DisplayLocale) -> Self {
        let mut view = Self::new(store, locale);
        view.load().await;
        view
    }

    pub async fn load(&mut self) -> Outcome {
        self.loader.load(&mut self.notifications).await
    }

    pub fn lifecycle(&self) -> ViewLifecycle {
        self.loader.lifecycle().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn articles(&self) -> &[Article] {
        self.loader.working_set()
    }

    pub fn article(&self, article_id: ArticleId) -> Option<&Article> {
        self.articles().iter().find(|x| x.id == article_id)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    /// Opens the form bound to an article of the working set. Returns false when the
    /// article is not there.
    pub fn open_edit(&mut self, article_id: ArticleId) -> bool {
        match self.loader.working_set().iter().find(|x| x.id == article_id) {
            Some(article) => {
                self.form.open_edit(article);
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, fields: ArticleForm) -> Result<(), FormError> {
        self.form.fill(fields)
    }

    pub fn cancel(&mut self) {
        self.form.cancel();
    }

    /// Turns the open form into one create or update request.
    ///
    /// Validation errors leave the form open and send nothing. Otherwise the form is
    /// closed before the request goes out, whatever its result.
    pub async fn submit(&mut self) -> Result<Outcome, FormError> {
        let (mode, fields) = self.form.take_submission()?;
        let date = self.locale.format_date(self.clock.today());
        let record = fields.to_record(date);
        let outcome = match mode {
            FormMode::Create => self.create(record).await,
            FormMode::Edit(article_id) => self.update(article_id, record).await,
            FormMode::Closed => return Err(FormError::NotOpen),
        };
        Ok(outcome)
    }

    pub async fn create(&mut self, record: ArticleRecord) -> Outcome {
        self.form.cancel();
        let activation = self.loader.lifecycle().current();
        let result = self.loader.store().create(&record).await;
        self.finish_write(activation, result, "create", Notification::CREATED, Notification::SAVE_FAILED).await
    }

    pub async fn update(&mut self, article_id: ArticleId, record: ArticleRecord) -> Outcome {
        self.form.cancel();
        let activation = self.loader.lifecycle().current();
        let result = self.loader.store().update(article_id, &record).await;
        self.finish_write(activation, result, "update", Notification::UPDATED, Notification::SAVE_FAILED).await
    }

    pub async fn delete(&mut self, article_id: ArticleId) -> Outcome {
        let activation = self.loader.lifecycle().current();
        let result = self.loader.store().delete(article_id).await;
        self.finish_write(activation, result, "delete", Notification::DELETED, Notification::DELETE_FAILED).await
    }

    async fn finish_write(
        &mut self,
        activation: Activation,
        result: Result<(), StoreError>,
        action: &str,
        on_success: Notification,
        on_failure: Notification,
    ) -> Outcome {
        if !self.loader.lifecycle().is_current(activation) {
            info!("Dropping {} completion for a torn-down view", action);
            return Outcome::Stale;
        }
        match result {
            Ok(()) => {
                self.notifications.push(on_success);
                self.load().await;
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to {} article: {}", action, e);
                self.notifications.push(on_failure);
                Outcome::Failed
            }
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.pending()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}
