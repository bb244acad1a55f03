use serde::{Deserialize, Serialize};

pub type ArticleId = i64;
pub type Tag = String;

/// A blog article as the article store returns it.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub tags: Vec<Tag>,
    pub date: String,
    pub read_time: String,
}

/// Every article field except `id`. This is the body of create and update requests.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub tags: Vec<Tag>,
    pub date: String,
    pub read_time: String,
}

impl Article {
    pub fn from_record(id: ArticleId, record: ArticleRecord) -> Self {
        Self {
            id,
            title: record.title,
            excerpt: record.excerpt,
            image: record.image,
            tags: record.tags,
            date: record.date,
            read_time: record.read_time,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|x| x == tag)
    }
}

impl From<Article> for ArticleRecord {
    fn from(value: Article) -> Self {
        Self {
            title: value.title,
            excerpt: value.excerpt,
            image: value.image,
            tags: value.tags,
            date: value.date,
            read_time: value.read_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_wire_format() {
        let json = r#"{"id":3,"title":"T","excerpt":"E","image":"https://x/y.jpg","tags":["A","A"],"date":"1 May 2024","readTime":"5 min"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, 3);
        assert_eq!(article.tags, vec!["A", "A"]);
        assert_eq!(article.read_time, "5 min");

        let record: ArticleRecord = article.into();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["readTime"], "5 min");
    }

    #[test]
    fn test_has_tag_is_exact() {
        let article = Article { tags: vec!["Design".to_string()], ..Default::default() };
        assert!(article.has_tag("Design"));
        assert!(!article.has_tag("design"));
        assert!(!article.has_tag("Des"));
    }
}
