use async_trait::async_trait;
use crate::types::{Article, ArticleId, NewArticle};
use crate::Result;

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// All stored articles, newest first
    async fn list_all(&self) -> Result<Vec<Article>>;

    /// Returns true if an article with this exact link is stored
    async fn exists(&self, link: &str) -> Result<bool>;

    /// Store a new article, stamping it with an id and the current time.
    ///
    /// Fails with [`crate::Error::DuplicateLink`] if the link is taken.
    async fn insert(&self, article: NewArticle) -> Result<Article>;

    /// Fetch one article, or [`crate::Error::NotFound`]
    async fn get(&self, id: ArticleId) -> Result<Article>;
}
