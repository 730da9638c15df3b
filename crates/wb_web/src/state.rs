use std::sync::Arc;
use wb_core::ArticleStorage;
use wb_scrapers::ScraperManager;
use wb_text::{WordFrequencyAnalyzer, DEFAULT_MAX_WORDS};

pub struct AppState {
    pub storage: Arc<dyn ArticleStorage>,
    pub manager: Arc<ScraperManager>,
    pub analyzer: WordFrequencyAnalyzer,
    /// Word-frequency entries returned per article
    pub max_words: usize,
}

impl AppState {
    /// State sharing the manager's store.
    pub fn new(manager: ScraperManager) -> Self {
        Self {
            storage: manager.storage().clone(),
            manager: Arc::new(manager),
            analyzer: WordFrequencyAnalyzer::default(),
            max_words: DEFAULT_MAX_WORDS,
        }
    }

    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }
}
