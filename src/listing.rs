use crate::client::ArticleStore;
use crate::entities::{Article, Tag};
use crate::loader::CollectionLoader;
use crate::notify::{Notification, Notifications};
use crate::tags;
use crate::view::{Outcome, ViewLifecycle};

const CARD_TAG_LIMIT: usize = 2;
const FOOTER_TAG_LIMIT: usize = 4;

/// Read-only public listing: featured article, tag vocabulary and tag filter.
pub struct ListingView<S: ArticleStore> {
    loader: CollectionLoader<S>,
    selected_tag: Option<Tag>,
    notifications: Notifications,
}

impl<S: ArticleStore> ListingView<S> {
    pub fn new(store: S) -> Self {
        Self::with_lifecycle(store, ViewLifecycle::default())
    }

    pub fn with_lifecycle(store: S, lifecycle: ViewLifecycle) -> Self {
        Self {
            loader: CollectionLoader::new(store, lifecycle),
            selected_tag: None,
            notifications: Notifications::default(),
        }
    }

    /// Builds the view and performs its single load.
    pub async fn activate(store: S) -> Self {
        let mut view = Self::new(store);
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

    pub fn tag_index(&self) -> Vec<Tag> {
        tags::tag_index(self.articles())
    }

    /// Tags shown in the footer category list.
    pub fn footer_tags(&self) -> Vec<Tag> {
        self.tag_index().into_iter().take(FOOTER_TAG_LIMIT).collect()
    }

    pub fn featured(&self) -> Option<&Article> {
        tags::featured(self.articles())
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.selected_tag.as_deref()
    }

    /// `None` clears the selection. Also used by the tag badges on article cards.
    pub fn select_tag(&mut self, tag: Option<Tag>) {
        self.selected_tag = tag;
    }

    pub fn visible(&self) -> Vec<&Article> {
        tags::filter_by_tag(self.articles(), self.selected_tag())
    }

    pub fn card_tags(article: &Article) -> &[Tag] {
        &article.tags[..article.tags.len().min(CARD_TAG_LIMIT)]
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}
