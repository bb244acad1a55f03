use log::{info, warn};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A dismissible message for the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub description: &'static str,
}

impl Notification {
    pub const LOAD_FAILED: Notification = Notification::failure("Failed to load", "Could not load articles");
    pub const CREATED: Notification = Notification::success("Article created", "A new article was added to the blog");
    pub const UPDATED: Notification = Notification::success("Article updated", "Changes were saved");
    pub const DELETED: Notification = Notification::success("Article deleted", "The article was removed from the blog");
    pub const SAVE_FAILED: Notification = Notification::failure("Failed to save", "Could not save the article");
    pub const DELETE_FAILED: Notification = Notification::failure("Failed to delete", "Could not delete the article");

    const fn success(title: &'static str, description: &'static str) -> Self {
        Self { kind: NotificationKind::Success, title, description }
    }

    const fn failure(title: &'static str, description: &'static str) -> Self {
        Self { kind: NotificationKind::Failure, title, description }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == NotificationKind::Failure
    }
}

/// Notifications a view has raised and the surface has not shown yet.
#[derive(Debug, Default)]
pub struct Notifications {
    pending: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!("{}: {}", notification.title, notification.description),
            NotificationKind::Failure => warn!("{}: {}", notification.title, notification.description),
        }
        self.pending.push(notification);
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}
