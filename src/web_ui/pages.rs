use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Form;
use chrono::Datelike;
use serde::Deserialize;
use crate::admin::AdminView;
use crate::client::StoreBackend;
use crate::entities::{Article, ArticleId};
use crate::form::{ArticleForm, FormMode};
use crate::listing::ListingView;
use crate::notify::{Notification, NotificationKind};
use crate::tags::{bg_color, fg_color};
use crate::web_ui::{AppState, HtmlTemplate};

#[derive(Debug, Clone)]
pub struct TagBadge {
    pub name: String,
    pub url: String,
    pub bg_color: String,
    pub fg_color: &'static str,
    pub is_selected: bool,
}

impl TagBadge {
    fn new(name: &str, selected: Option<&str>) -> Self {
        let bg_color = bg_color(name);
        let fg_color = fg_color(&bg_color);
        Self {
            name: name.to_string(),
            url: tag_url(name),
            bg_color,
            fg_color,
            is_selected: selected == Some(name),
        }
    }
}

fn tag_url(tag: &str) -> String {
    format!("/?tag={}#articles", urlencoding::encode(tag))
}

#[derive(Debug, Clone)]
pub struct ArticleCard {
    pub id: ArticleId,
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub date: String,
    pub read_time: String,
    pub tags: Vec<TagBadge>,
}

impl ArticleCard {
    fn new(article: &Article, tags: &[String], selected: Option<&str>) -> Self {
        Self {
            id: article.id,
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            image: article.image.clone(),
            date: article.date.clone(),
            read_time: article.read_time.clone(),
            tags: tags.iter().map(|x| TagBadge::new(x, selected)).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub class: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl From<Notification> for Toast {
    fn from(value: Notification) -> Self {
        let class = match value.kind {
            NotificationKind::Success => "toast toast-success",
            NotificationKind::Failure => "toast toast-failure",
        };
        Self { class, title: value.title, description: value.description }
    }
}

fn toasts(notifications: Vec<Notification>) -> Vec<Toast> {
    notifications.into_iter().map(Toast::from).collect()
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[derive(Deserialize, Default)]
pub struct ListingQuery {
    tag: Option<String>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    featured: Option<ArticleCard>,
    tags: Vec<TagBadge>,
    no_tag_selected: bool,
    cards: Vec<ArticleCard>,
    footer_tags: Vec<TagBadge>,
    toasts: Vec<Toast>,
    year: i32,
}

impl IndexTemplate {
    fn from_view(view: &mut ListingView<StoreBackend>) -> Self {
        let selected = view.selected_tag().map(|x| x.to_string());
        let selected = selected.as_deref();
        let featured = view.featured().map(|x| ArticleCard::new(x, &x.tags, selected));
        let tags = view.tag_index().iter().map(|x| TagBadge::new(x, selected)).collect();
        let cards = view.visible().into_iter()
            .map(|x| ArticleCard::new(x, ListingView::<StoreBackend>::card_tags(x), selected))
            .collect();
        let footer_tags = view.footer_tags().iter().map(|x| TagBadge::new(x, None)).collect();
        Self {
            featured,
            tags,
            no_tag_selected: selected.is_none(),
            cards,
            footer_tags,
            toasts: toasts(view.drain_notifications()),
            year: current_year(),
        }
    }
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let mut view = ListingView::activate(state.store.clone()).await;
    view.select_tag(query.tag.filter(|x| !x.is_empty()));
    HtmlTemplate(IndexTemplate::from_view(&mut view))
}

#[derive(Debug, Clone)]
pub struct AdminRow {
    pub id: ArticleId,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub read_time: String,
    pub tags: Vec<TagBadge>,
}

#[derive(Debug, Clone)]
pub struct FormPanel {
    pub heading: &'static str,
    pub action: String,
    pub fields: ArticleForm,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    count: usize,
    rows: Vec<AdminRow>,
    form: Option<FormPanel>,
    toasts: Vec<Toast>,
    year: i32,
}

impl AdminTemplate {
    fn from_view(view: &mut AdminView<StoreBackend>, error: Option<String>, mut extra: Vec<Notification>) -> Self {
        let rows = view.articles().iter().map(|x| AdminRow {
            id: x.id,
            title: x.title.clone(),
            excerpt: x.excerpt.clone(),
            date: x.date.clone(),
            read_time: x.read_time.clone(),
            tags: x.tags.iter().map(|tag| TagBadge::new(tag, None)).collect(),
        }).collect();
        let form = match view.form().mode() {
            FormMode::Closed => None,
            FormMode::Create => Some(FormPanel {
                heading: "New article",
                action: "/admin/articles".to_string(),
                fields: view.form().fields().clone(),
                error,
            }),
            FormMode::Edit(article_id) => Some(FormPanel {
                heading: "Edit article",
                action: format!("/admin/articles/{}", article_id),
                fields: view.form().fields().clone(),
                error,
            }),
        };
        let mut notifications = view.drain_notifications();
        notifications.append(&mut extra);
        Self {
            count: view.articles().len(),
            rows,
            form,
            toasts: toasts(notifications),
            year: current_year(),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct AdminQuery {
    new: Option<String>,
    edit: Option<ArticleId>,
}

pub async fn admin_page(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> impl IntoResponse {
    let mut view = AdminView::activate(state.store.clone(), state.config.display.locale).await;
    if let Some(article_id) = query.edit {
        view.open_edit(article_id);
    } else if query.new.is_some() {
        view.open_create();
    }
    HtmlTemplate(AdminTemplate::from_view(&mut view, None, Vec::new()))
}

pub async fn create_article(
    State(state): State<AppState>,
    Form(fields): Form<ArticleForm>,
) -> impl IntoResponse {
    let mut view = AdminView::activate(state.store.clone(), state.config.display.locale).await;
    view.open_create();
    submit(view, fields).await
}

pub async fn update_article(
    State(state): State<AppState>,
    Path(article_id): Path<ArticleId>,
    Form(fields): Form<ArticleForm>,
) -> impl IntoResponse {
    let mut view = AdminView::activate(state.store.clone(), state.config.display.locale).await;
    if !view.open_edit(article_id) {
        return HtmlTemplate(AdminTemplate::from_view(&mut view, None, vec![Notification::SAVE_FAILED]));
    }
    submit(view, fields).await
}

async fn submit(mut view: AdminView<StoreBackend>, fields: ArticleForm) -> HtmlTemplate<AdminTemplate> {
    let error = match view.fill(fields) {
        Ok(()) => view.submit().await.err(),
        Err(e) => Some(e),
    };
    HtmlTemplate(AdminTemplate::from_view(&mut view, error.map(|x| x.to_string()), Vec::new()))
}

pub async fn delete_article(
    State(state): State<AppState>,
    Path(article_id): Path<ArticleId>,
) -> impl IntoResponse {
    let mut view = AdminView::activate(state.store.clone(), state.config.display.locale).await;
    view.delete(article_id).await;
    HtmlTemplate(AdminTemplate::from_view(&mut view, None, Vec::new()))
}
