pub mod cli;
pub mod manager;
pub mod scrapers;

pub use cli::{handle_command, ScraperArgs, ScraperCommands};
pub use manager::{RefreshReport, ScraperManager, DEFAULT_REFRESH_LIMIT};
pub use scrapers::{ArticleExtractor, BriefingRoomScraper, ScraperConfig};

pub mod prelude {
    pub use super::scrapers::ArticleExtractor;
    pub use super::manager::ScraperManager;
    pub use wb_core::{ListingEntry, Result, Error};
}
