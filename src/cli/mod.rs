use std::process::ExitCode;
use colored::Colorize;
use crate::admin::AdminView;
use crate::client::{HttpArticleStore, StoreBackend};
use crate::config::{self, AppConfig};
use crate::entities::{Article, ArticleId};
use crate::form::ArticleForm;
use crate::listing::ListingView;
use crate::locale::DisplayLocale;
use crate::notify::{Notification, NotificationKind};
use crate::view::Outcome;

/// Optional field overrides for `edit`; `create` requires all of them.
#[derive(Debug, Default, Clone)]
pub struct FieldArgs {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    pub tags: Option<String>,
    pub read_time: Option<String>,
}

impl FieldArgs {
    fn apply(self, mut form: ArticleForm) -> ArticleForm {
        if let Some(title) = self.title { form.title = title; }
        if let Some(excerpt) = self.excerpt { form.excerpt = excerpt; }
        if let Some(image) = self.image { form.image = image; }
        if let Some(tags) = self.tags { form.tags = tags; }
        if let Some(read_time) = self.read_time { form.read_time = read_time; }
        form
    }
}

pub fn http_store(config: &AppConfig) -> anyhow::Result<StoreBackend> {
    let store = HttpArticleStore::new(&config.store.api_url, config.store.request_timeout)?;
    Ok(StoreBackend::Http(store))
}

fn print_notifications(notifications: Vec<Notification>) {
    for notification in notifications {
        let line = format!("{}: {}", notification.title, notification.description);
        match notification.kind {
            NotificationKind::Success => println!("{}", line.green()),
            NotificationKind::Failure => eprintln!("{}", line.red()),
        }
    }
}

fn print_article(article: &Article, featured: bool) {
    let marker = if featured { "★".yellow().to_string() } else { " ".to_string() };
    println!("{} [{}] {}", marker, article.id, article.title.bold());
    println!("      {}", article.excerpt);
    println!("      {} · {} · {}", article.date, article.read_time, article.tags.join(", ").cyan());
}

fn exit_code(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Applied => ExitCode::SUCCESS,
        Outcome::Failed | Outcome::Stale => ExitCode::FAILURE,
    }
}

pub async fn list_articles(store: StoreBackend, tag: Option<String>) -> ExitCode {
    let mut view = ListingView::new(store);
    let outcome = view.load().await;
    view.select_tag(tag);
    let featured_id = view.featured().map(|x| x.id);
    let visible = view.visible();
    if outcome == Outcome::Applied && visible.is_empty() {
        println!("No articles");
    }
    for article in visible {
        print_article(article, Some(article.id) == featured_id);
    }
    print_notifications(view.drain_notifications());
    exit_code(outcome)
}

pub async fn list_tags(store: StoreBackend) -> ExitCode {
    let mut view = ListingView::new(store);
    let outcome = view.load().await;
    for tag in view.tag_index() {
        println!("{}", tag);
    }
    print_notifications(view.drain_notifications());
    exit_code(outcome)
}

pub async fn create_article(store: StoreBackend, locale: DisplayLocale, fields: FieldArgs) -> ExitCode {
    let mut view = AdminView::new(store, locale);
    view.load().await;
    view.open_create();
    submit(view, fields).await
}

pub async fn edit_article(store: StoreBackend, locale: DisplayLocale, article_id: ArticleId, fields: FieldArgs) -> ExitCode {
    let mut view = AdminView::new(store, locale);
    if view.load().await != Outcome::Applied {
        print_notifications(view.drain_notifications());
        return ExitCode::FAILURE;
    }
    if !view.open_edit(article_id) {
        eprintln!("{}", format!("Article not found: {}", article_id).red());
        return ExitCode::FAILURE;
    }
    submit(view, fields).await
}

async fn submit(mut view: AdminView<StoreBackend>, fields: FieldArgs) -> ExitCode {
    let form = fields.apply(view.form().fields().clone());
    let result = match view.fill(form) {
        Ok(()) => view.submit().await,
        Err(e) => Err(e),
    };
    print_notifications(view.drain_notifications());
    match result {
        Ok(outcome) => exit_code(outcome),
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        }
    }
}

pub async fn delete_article(store: StoreBackend, locale: DisplayLocale, article_id: ArticleId) -> ExitCode {
    let mut view = AdminView::new(store, locale);
    view.load().await;
    let outcome = view.delete(article_id).await;
    print_notifications(view.drain_notifications());
    exit_code(outcome)
}

pub fn get_config_value(config: &AppConfig, key: &str) -> ExitCode {
    match key {
        "api-url" => {
            println!("{}", config.store.api_url);
            ExitCode::SUCCESS
        },
        "locale" => {
            println!("{}", config.display.locale);
            ExitCode::SUCCESS
        },
        _ => {
            eprintln!("Invalid key: {}", key);
            ExitCode::FAILURE
        }
    }
}

pub fn set_config_value(config: &AppConfig, key: &str, value: &str) -> anyhow::Result<ExitCode> {
    let mut file_config = config.file_config.clone();
    match key {
        "api-url" => {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                eprintln!("Invalid URL: {}", value);
                return Ok(ExitCode::FAILURE);
            }
            file_config.api_url = Some(value.trim_end_matches('/').to_string());
        },
        "locale" => {
            match value.parse::<DisplayLocale>() {
                Ok(locale) => file_config.locale = Some(locale),
                Err(e) => {
                    eprintln!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        },
        _ => {
            eprintln!("Invalid key: {}", key);
            return Ok(ExitCode::FAILURE);
        }
    }
    config::write_file_config(&config.settings_path, &file_config)?;
    println!("{} set to: {}", key, value);
    Ok(ExitCode::SUCCESS)
}
