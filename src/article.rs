// src/article.rs
//! Article record consumed by the analysis pipeline, plus intake normalization.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Max characters kept when a summary is derived from the content.
pub const SUMMARY_DERIVE_CHARS: usize = 300;

/// A news article as handed over by the crawler.
///
/// Immutable inside the pipeline; translation produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawArticle")]
pub struct Article {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    pub author: String,
    pub published_date: String,
}

/// Wire shape: every field optional, unknown crawler fields ignored.
#[derive(Debug, Default, Deserialize)]
struct RawArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    published_date: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        let clean = |v: Option<String>| v.map(|s| normalize_text(&s)).unwrap_or_default();
        let content = clean(raw.content);
        let summary = match clean(raw.summary) {
            s if s.is_empty() => derive_summary(&content),
            s => s,
        };
        Self {
            title: clean(raw.title),
            content,
            summary,
            source: clean(raw.source),
            url: raw.url.map(|u| u.trim().to_string()).unwrap_or_default(),
            author: clean(raw.author),
            published_date: clean(raw.published_date),
        }
    }
}

impl Article {
    /// Build an article from title + content; the summary is derived from the content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        RawArticle {
            title: Some(title.into()),
            content: Some(content.into()),
            ..Default::default()
        }
        .into()
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = normalize_text(&summary.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>, url: impl Into<String>) -> Self {
        self.source = source.into();
        self.url = url.into();
        self
    }

    /// Content if present, otherwise the summary.
    pub fn body(&self) -> &str {
        if self.content.trim().is_empty() {
            &self.summary
        } else {
            &self.content
        }
    }

    /// Short anonymized id for log lines (we never log raw article text).
    pub fn log_id(&self) -> String {
        let key = if self.url.is_empty() {
            &self.title
        } else {
            &self.url
        };
        anon_hash(key)
    }
}

/// First `SUMMARY_DERIVE_CHARS` characters of the content, with `...` when cut.
pub fn derive_summary(content: &str) -> String {
    if content.chars().count() > SUMMARY_DERIVE_CHARS {
        let head: String = content.chars().take(SUMMARY_DERIVE_CHARS).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}

/// Normalize scraped text: decode entities, strip tags, collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[a-z][^>]*>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    // Collapse whitespace (incl. the NBSP left by &nbsp;)
    out.split(|c: char| c.is_whitespace() || c == '\u{00A0}')
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_summary_is_derived_from_content() {
        let long = "x".repeat(310);
        let a = Article::new("t", long.clone());
        assert_eq!(a.summary.chars().count(), SUMMARY_DERIVE_CHARS + 3);
        assert!(a.summary.ends_with("..."));

        let short = Article::new("t", "short body");
        assert_eq!(short.summary, "short body");
    }

    #[test]
    fn deserialize_tolerates_missing_and_extra_fields() {
        let json = r#"{"title":" OpenAI &amp; friends ","content":"<p>Hello   world</p>","crawled_at":"2024-01-01"}"#;
        let a: Article = serde_json::from_str(json).unwrap();
        assert_eq!(a.title, "OpenAI & friends");
        assert_eq!(a.content, "Hello world");
        assert_eq!(a.summary, "Hello world");
        assert!(a.author.is_empty());
        assert!(a.url.is_empty());
    }

    #[test]
    fn body_falls_back_to_summary() {
        let a = Article::new("t", "").with_summary("only summary");
        assert_eq!(a.body(), "only summary");
    }

    #[test]
    fn log_id_is_short_hex() {
        let a = Article::new("t", "c").with_source("TechCrunch", "https://techcrunch.com/x");
        let id = a.log_id();
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
