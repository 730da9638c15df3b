use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use wb_core::{ArticleStorage, Error, ListingEntry, NewArticle};

use crate::scrapers::ArticleExtractor;

/// Listing entries considered per refresh.
pub const DEFAULT_REFRESH_LIMIT: usize = 5;

/// What one refresh cycle did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    pub listed: usize,
    pub skipped_existing: usize,
    pub skipped_empty: usize,
    pub failed: usize,
    pub inserted: usize,
}

impl fmt::Display for RefreshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} listed, {} inserted, {} already stored, {} without content, {} failed",
            self.listed, self.inserted, self.skipped_existing, self.skipped_empty, self.failed
        )
    }
}

enum EntryOutcome {
    Inserted,
    Existing,
    Empty,
}

pub struct ScraperManager {
    storage: Arc<dyn ArticleStorage>,
    extractor: Arc<dyn ArticleExtractor>,
    refresh_limit: usize,
}

impl ScraperManager {
    pub fn new(storage: Arc<dyn ArticleStorage>, extractor: Arc<dyn ArticleExtractor>) -> Self {
        Self {
            storage,
            extractor,
            refresh_limit: DEFAULT_REFRESH_LIMIT,
        }
    }

    pub fn with_refresh_limit(mut self, refresh_limit: usize) -> Self {
        self.refresh_limit = refresh_limit;
        self
    }

    pub fn extractor(&self) -> &Arc<dyn ArticleExtractor> {
        &self.extractor
    }

    pub fn storage(&self) -> &Arc<dyn ArticleStorage> {
        &self.storage
    }

    /// Pulls the newest listing entries and stores the ones not seen before.
    ///
    /// Only the first `refresh_limit` entries are looked at. Entries whose
    /// link is already stored are not fetched again, and pages that yield no
    /// text are dropped. Per-entry failures are logged and counted, never
    /// returned.
    pub async fn refresh(&self) -> RefreshReport {
        let source = self.extractor.source().to_string();
        info!(%source, limit = self.refresh_limit, "🦗 Refreshing articles");

        let entries = self.extractor.list_articles().await;
        let mut report = RefreshReport::default();

        for entry in entries.into_iter().take(self.refresh_limit) {
            report.listed += 1;
            let link = entry.link.clone();
            match self.process_entry(entry).await {
                Ok(EntryOutcome::Inserted) => report.inserted += 1,
                Ok(EntryOutcome::Existing) => report.skipped_existing += 1,
                Ok(EntryOutcome::Empty) => report.skipped_empty += 1,
                Err(e) => {
                    warn!(%link, error = %e, "Failed to store article");
                    report.failed += 1;
                }
            }
        }

        info!(%source, %report, "✅ Refresh finished");
        report
    }

    async fn process_entry(&self, entry: ListingEntry) -> Result<EntryOutcome, Error> {
        if self.storage.exists(&entry.link).await? {
            debug!(link = %entry.link, "⏭️ Already stored");
            return Ok(EntryOutcome::Existing);
        }

        let content = match self.extractor.fetch_content(&entry.link).await {
            Some(content) if !content.trim().is_empty() => content,
            _ => {
                debug!(link = %entry.link, "No content, skipping");
                return Ok(EntryOutcome::Empty);
            }
        };

        let article = self
            .storage
            .insert(NewArticle {
                content: Some(content),
                ..entry.into()
            })
            .await?;
        info!(id = article.id, title = %article.title, "🆕 Stored article");
        Ok(EntryOutcome::Inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use wb_core::{Article, ArticleId, Result};
    use wb_storage::InMemoryStorage;

    #[derive(Default)]
    struct MockExtractor {
        listing: Vec<ListingEntry>,
        pages: HashMap<String, String>,
        fetched: Mutex<Vec<String>>,
    }

    impl MockExtractor {
        fn with_entries(count: usize) -> Self {
            let mut extractor = Self::default();
            for i in 1..=count {
                let link = format!("https://example.com/articles/{}", i);
                extractor.listing.push(ListingEntry {
                    title: format!("Article {}", i),
                    link: link.clone(),
                });
                extractor
                    .pages
                    .insert(link, format!("Body of article number {}", i));
            }
            extractor
        }

        fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ArticleExtractor for MockExtractor {
        fn source(&self) -> &str {
            "mock"
        }

        async fn list_articles(&self) -> Vec<ListingEntry> {
            self.listing.clone()
        }

        async fn fetch_content(&self, link: &str) -> Option<String> {
            self.fetched.lock().unwrap().push(link.to_string());
            self.pages.get(link).cloned()
        }
    }

    struct FailingStorage;

    #[async_trait]
    impl ArticleStorage for FailingStorage {
        async fn list_all(&self) -> Result<Vec<Article>> {
            Ok(Vec::new())
        }

        async fn exists(&self, _link: &str) -> Result<bool> {
            Err(Error::Database("disk full".to_string()))
        }

        async fn insert(&self, _article: NewArticle) -> Result<Article> {
            Err(Error::Database("disk full".to_string()))
        }

        async fn get(&self, id: ArticleId) -> Result<Article> {
            Err(Error::NotFound { id })
        }
    }

    #[tokio::test]
    async fn test_refresh_only_takes_first_five() {
        let storage = Arc::new(InMemoryStorage::new());
        let extractor = Arc::new(MockExtractor::with_entries(8));
        let manager = ScraperManager::new(storage.clone(), extractor.clone());

        let report = manager.refresh().await;
        assert_eq!(report.listed, 5);
        assert_eq!(report.inserted, 5);
        assert_eq!(extractor.fetched().len(), 5);

        let titles: Vec<String> = storage
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        for i in 1..=5 {
            assert!(titles.contains(&format!("Article {}", i)));
        }
        assert!(!titles.contains(&"Article 6".to_string()));
    }

    #[tokio::test]
    async fn test_refresh_twice_inserts_no_duplicates() {
        let storage = Arc::new(InMemoryStorage::new());
        let extractor = Arc::new(MockExtractor::with_entries(3));
        let manager = ScraperManager::new(storage.clone(), extractor.clone());

        let first = manager.refresh().await;
        let second = manager.refresh().await;

        assert_eq!(first.inserted, 3);
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped_existing, 3);
        // known links are not fetched again
        assert_eq!(extractor.fetched().len(), 3);
        assert_eq!(storage.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_refresh_skips_entries_without_content() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut extractor = MockExtractor::with_entries(3);
        extractor.pages.remove("https://example.com/articles/2");
        extractor
            .pages
            .insert("https://example.com/articles/3".to_string(), "   ".to_string());
        let manager = ScraperManager::new(storage.clone(), Arc::new(extractor));

        let report = manager.refresh().await;
        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped_empty, 2);

        let stored = storage.list_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].link, "https://example.com/articles/1");
        assert_eq!(stored[0].content.as_deref(), Some("Body of article number 1"));
    }

    #[tokio::test]
    async fn test_refresh_with_empty_listing() {
        let storage = Arc::new(InMemoryStorage::new());
        let manager = ScraperManager::new(storage.clone(), Arc::new(MockExtractor::default()));

        assert_eq!(manager.refresh().await, RefreshReport::default());
        assert!(storage.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_counts_storage_failures() {
        let extractor = Arc::new(MockExtractor::with_entries(2));
        let manager = ScraperManager::new(Arc::new(FailingStorage), extractor.clone());

        let report = manager.refresh().await;
        assert_eq!(report.failed, 2);
        assert_eq!(report.inserted, 0);
        assert!(extractor.fetched().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_limit_is_configurable() {
        let storage = Arc::new(InMemoryStorage::new());
        let manager = ScraperManager::new(storage.clone(), Arc::new(MockExtractor::with_entries(4)))
            .with_refresh_limit(2);

        assert_eq!(manager.refresh().await.inserted, 2);
        assert_eq!(storage.list_all().await.unwrap().len(), 2);
    }
}
