pub mod error;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use storage::ArticleStorage;
pub use types::{Article, ArticleId, ListingEntry, NewArticle, WordFrequency};

pub mod prelude {
    pub use crate::{Article, ArticleId, ArticleStorage, Error, ListingEntry, NewArticle, Result};
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_article_serializes_created_at_as_iso8601() {
        let article = Article {
            id: 7,
            title: "Statement".to_string(),
            link: "https://example.com/statement".to_string(),
            content: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["created_at"], "2024-03-01T12:30:00Z");
        assert_eq!(article.content_or_empty(), "");
    }

    #[test]
    fn test_not_found_is_recognised() {
        assert!(Error::NotFound { id: 3 }.is_not_found());
        assert!(!Error::Database("boom".to_string()).is_not_found());
    }
}
