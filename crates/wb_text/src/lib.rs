//! Text processing for scraped articles: cleanup of extracted text and
//! word-frequency ranking.

pub mod frequency;
pub mod normalize;

pub use frequency::{WordFrequencyAnalyzer, DEFAULT_MAX_WORDS, STOP_WORDS};
pub use normalize::clean_text;

pub mod prelude {
    pub use super::frequency::WordFrequencyAnalyzer;
    pub use super::normalize::clean_text;
    pub use wb_core::WordFrequency;
}
