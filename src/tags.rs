use std::hash::Hasher;
use itertools::Itertools;
use crate::entities::{Article, Tag};

/// Distinct tags of `articles`, in the order they are first met while scanning.
pub fn tag_index(articles: &[Article]) -> Vec<Tag> {
    articles.iter()
        .flat_map(|x| x.tags.iter())
        .unique()
        .cloned()
        .collect()
}

/// Articles carrying `selected`, or all of them when nothing is selected.
pub fn filter_by_tag<'a>(articles: &'a [Article], selected: Option<&str>) -> Vec<&'a Article> {
    match selected {
        Some(tag) => articles.iter().filter(|x| x.has_tag(tag)).collect(),
        None => articles.iter().collect(),
    }
}

pub fn featured(articles: &[Article]) -> Option<&Article> {
    articles.first()
}

/// Stable badge color for a tag.
pub fn bg_color(tag: &str) -> String {
    const MAX_VALUE: u64 = 0xFFFFFF;
    let mut hasher = twox_hash::XxHash64::default();
    hasher.write(tag.as_bytes());
    let color = hasher.finish() % MAX_VALUE;
    format!("#{:06x}", color)
}

/// Black or white, whichever reads better on `bg_color` (YIQ contrast).
pub fn fg_color(bg_color: &str) -> &'static str {
    let bg_color = bg_color.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        bg_color.get(range).and_then(|x| u8::from_str_radix(x, 16).ok()).unwrap_or(0) as f32
    };
    let yiq = (channel(0..2) * 299.0 + channel(2..4) * 587.0 + channel(4..6) * 114.0) / 1000.0;
    if yiq >= 128.0 { "black" } else { "white" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: i64, tags: &[&str]) -> Article {
        Article { id, tags: tags.iter().map(|x| x.to_string()).collect(), ..Default::default() }
    }

    #[test]
    fn test_tag_index_first_seen_order() {
        let articles = vec![
            article(1, &["Tech", "Web", "Trends"]),
            article(2, &["Design", "UX/UI", "Tools"]),
            article(3, &["Design", "Web", "Web"]),
            article(4, &["Animation", "Design", "UX/UI"]),
        ];
        assert_eq!(
            tag_index(&articles),
            vec!["Tech", "Web", "Trends", "Design", "UX/UI", "Tools", "Animation"],
        );
    }

    #[test]
    fn test_empty_collection() {
        let articles: Vec<Article> = vec![];
        assert!(tag_index(&articles).is_empty());
        assert!(featured(&articles).is_none());
        assert!(filter_by_tag(&articles, None).is_empty());
    }

    #[test]
    fn test_single_article_filter() {
        let articles = vec![article(1, &["Design", "UX"])];
        assert_eq!(tag_index(&articles), vec!["Design", "UX"]);
        let visible = filter_by_tag(&articles, Some("UX"));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn test_filter_is_exact_and_keeps_order() {
        let articles = vec![
            article(1, &["Design"]),
            article(2, &["design"]),
            article(3, &["Web", "Design"]),
        ];
        let ids = filter_by_tag(&articles, Some("Design")).iter().map(|x| x.id).collect::<Vec<i64>>();
        assert_eq!(ids, vec![1, 3]);
        assert!(filter_by_tag(&articles, Some("Des")).is_empty());
        assert_eq!(filter_by_tag(&articles, None).len(), 3);
    }

    #[test]
    fn test_featured_is_first_unfiltered() {
        let articles = vec![article(5, &["A"]), article(1, &["B"])];
        assert_eq!(featured(&articles).map(|x| x.id), Some(5));
    }

    #[test]
    fn test_badge_colors() {
        let color = bg_color("Design");
        assert_eq!(color, bg_color("Design"));
        assert_eq!(color.len(), 7);
        assert_eq!(fg_color("#ffffff"), "black");
        assert_eq!(fg_color("#000000"), "white");
    }
}
