use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ArticleId = i64;

/// A scraped news item as it lives in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    /// Source URL. Unique across the store.
    pub link: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Article {
    pub fn content_or_empty(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Insert payload. The store assigns the id and creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub link: String,
    pub content: Option<String>,
}

/// One entry found on the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub text: String,
    pub value: usize,
}

impl WordFrequency {
    pub fn new(text: impl Into<String>, value: usize) -> Self {
        Self {
            text: text.into(),
            value,
        }
    }
}

impl From<ListingEntry> for NewArticle {
    fn from(entry: ListingEntry) -> Self {
        Self {
            title: entry.title,
            link: entry.link,
            content: None,
        }
    }
}
