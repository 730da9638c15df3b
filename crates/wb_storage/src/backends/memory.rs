use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use wb_core::{Article, ArticleId, ArticleStorage, Error, NewArticle, Result};

use crate::{StorageBackend, StorageConfig};

#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: Vec<Article>,
    last_id: ArticleId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_all(&self) -> Vec<Article> {
        let mut articles = self.articles.clone();
        articles.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        articles
    }

    pub fn exists(&self, link: &str) -> bool {
        self.articles.iter().any(|a| a.link == link)
    }

    pub fn insert(&mut self, article: NewArticle) -> Result<Article> {
        if self.exists(&article.link) {
            return Err(Error::DuplicateLink(article.link));
        }
        self.last_id += 1;
        let stored = Article {
            id: self.last_id,
            title: article.title,
            link: article.link,
            content: article.content,
            created_at: Utc::now(),
        };
        self.articles.push(stored.clone());
        Ok(stored)
    }

    pub fn get(&self, id: ArticleId) -> Result<Article> {
        self.articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(Error::NotFound { id })
    }
}

/// Process-local store, lost on shutdown.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for InMemoryStorage {
    fn get_error_message() -> &'static str {
        "Memory storage should be available"
    }

    async fn open(_config: &StorageConfig) -> Result<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl ArticleStorage for InMemoryStorage {
    async fn list_all(&self) -> Result<Vec<Article>> {
        Ok(self.store.read().await.list_all())
    }

    async fn exists(&self, link: &str) -> Result<bool> {
        Ok(self.store.read().await.exists(link))
    }

    async fn insert(&self, article: NewArticle) -> Result<Article> {
        self.store.write().await.insert(article)
    }

    async fn get(&self, id: ArticleId) -> Result<Article> {
        self.store.read().await.get(id)
    }
}
