use serde::{Deserialize, Serialize};
use crate::entities::{Article, ArticleId, ArticleRecord, Tag};
use crate::error::FormError;

const TAGS_SEPARATOR: char = ',';
const TAGS_DISPLAY_SEPARATOR: &str = ", ";

/// Editable fields of the admin form. Tags are a single comma-separated string.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct ArticleForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub read_time: String,
}

impl From<&Article> for ArticleForm {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            image: article.image.clone(),
            tags: article.tags.join(TAGS_DISPLAY_SEPARATOR),
            read_time: article.read_time.clone(),
        }
    }
}

impl ArticleForm {
    /// Every field is required; the tags field must also yield at least one tag.
    pub fn validate(&self) -> Result<(), FormError> {
        let fields = [
            ("title", &self.title),
            ("excerpt", &self.excerpt),
            ("image", &self.image),
            ("tags", &self.tags),
            ("read_time", &self.read_time),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(FormError::Required(*name));
        }
        if split_tags(&self.tags).is_empty() {
            return Err(FormError::Required("tags"));
        }
        Ok(())
    }

    /// Builds the write body. `date` is whatever the caller stamps, never a previous value.
    pub fn to_record(&self, date: String) -> ArticleRecord {
        ArticleRecord {
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            image: self.image.clone(),
            tags: split_tags(&self.tags),
            date,
            read_time: self.read_time.clone(),
        }
    }
}

pub fn split_tags(input: &str) -> Vec<Tag> {
    input.split(TAGS_SEPARATOR)
        .map(|x| x.trim())
        .filter(|x| !x.is_empty())
        .map(|x| x.to_string())
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Closed,
    Create,
    Edit(ArticleId),
}

#[derive(Clone, Debug, Default)]
pub struct FormState {
    mode: FormMode,
    fields: ArticleForm,
}

impl FormState {
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    pub fn fields(&self) -> &ArticleForm {
        &self.fields
    }

    pub fn open_create(&mut self) {
        self.mode = FormMode::Create;
        self.fields = ArticleForm::default();
    }

    pub fn open_edit(&mut self, article: &Article) {
        self.mode = FormMode::Edit(article.id);
        self.fields = ArticleForm::from(article);
    }

    /// Replaces the field values of an open form.
    pub fn fill(&mut self, fields: ArticleForm) -> Result<(), FormError> {
        if !self.is_open() {
            return Err(FormError::NotOpen);
        }
        self.fields = fields;
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.mode = FormMode::Closed;
        self.fields = ArticleForm::default();
    }

    /// Validates and closes the form, handing back what was bound and typed.
    /// A form that fails validation stays open.
    pub fn take_submission(&mut self) -> Result<(FormMode, ArticleForm), FormError> {
        if !self.is_open() {
            return Err(FormError::NotOpen);
        }
        self.fields.validate()?;
        let mode = std::mem::take(&mut self.mode);
        let fields = std::mem::take(&mut self.fields);
        Ok((mode, fields))
    }
}
