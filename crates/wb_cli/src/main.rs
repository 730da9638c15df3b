use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use wb_core::ArticleStorage;
use wb_scrapers::scrapers::briefing_room::DEFAULT_LISTING_URL;
use wb_scrapers::{
    handle_command, ArticleExtractor, BriefingRoomScraper, ScraperArgs, ScraperConfig,
    ScraperManager, DEFAULT_REFRESH_LIMIT,
};
use wb_storage::{StorageConfig, StorageKind};
use wb_text::{WordFrequencyAnalyzer, DEFAULT_MAX_WORDS};
use wb_web::AppState;

mod duration;
mod logging;

use duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scrape a news listing and serve word-frequency summaries", long_about = None)]
pub struct Cli {
    /// Storage backend: sqlite or memory
    #[arg(long, env = "WORDBRIEF_STORAGE", default_value = "sqlite")]
    storage: StorageKind,
    /// SQLite database file
    #[arg(long, env = "WORDBRIEF_DB_PATH", default_value = "articles.db")]
    db_path: PathBuf,
    /// Delete all stored articles on startup
    #[arg(long, env = "WORDBRIEF_RESET")]
    reset: bool,
    /// Listing page to scrape
    #[arg(long, env = "WORDBRIEF_LISTING_URL", default_value = DEFAULT_LISTING_URL)]
    listing_url: String,
    /// Listing entries considered per refresh
    #[arg(long, env = "WORDBRIEF_REFRESH_LIMIT", default_value_t = DEFAULT_REFRESH_LIMIT)]
    refresh_limit: usize,
    /// Word-frequency entries returned per article
    #[arg(long, env = "WORDBRIEF_MAX_WORDS", default_value_t = DEFAULT_MAX_WORDS)]
    max_words: usize,
    /// HTTP timeout for upstream fetches (e.g. 30s, 1m)
    #[arg(long, env = "WORDBRIEF_TIMEOUT", default_value = "30s")]
    timeout: HumanDuration,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "WORDBRIEF_LISTEN", default_value = "127.0.0.1:5000")]
        listen: SocketAddr,
        /// Directory holding the prebuilt frontend, served at /
        #[arg(long, env = "WORDBRIEF_STATIC_DIR")]
        static_dir: Option<PathBuf>,
    },
    /// Scraper commands
    Scrape(ScraperArgs),
    /// Print stored articles with their most frequent words
    List {
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

async fn list_articles(storage: &dyn ArticleStorage, top: usize) -> anyhow::Result<()> {
    let analyzer = WordFrequencyAnalyzer::default();
    let articles = storage.list_all().await?;
    println!("{} stored articles", articles.len());
    for article in articles {
        let words = analyzer
            .analyze(article.content_or_empty(), top)
            .into_iter()
            .map(|w| format!("{} ({})", w.text, w.value))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "#{} {} [{}]\n    {}\n    {}",
            article.id,
            article.title,
            article.created_at.format("%Y-%m-%d %H:%M"),
            article.link,
            words
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let storage_config = StorageConfig {
        kind: cli.storage,
        path: cli.db_path.clone(),
        reset: cli.reset,
    };
    let storage = wb_storage::create_storage(&storage_config)
        .await
        .with_context(|| format!("Failed to open {} storage", cli.storage))?;

    let scraper_config = ScraperConfig {
        listing_url: cli.listing_url.clone(),
        timeout: cli.timeout.0,
        ..ScraperConfig::default()
    };
    let extractor = BriefingRoomScraper::new(scraper_config)
        .with_context(|| format!("Invalid listing URL {}", cli.listing_url))?;
    info!(source = extractor.source(), url = %extractor.listing_url(), "🦗 Scraper initialized");

    let manager = ScraperManager::new(storage.clone(), Arc::new(extractor))
        .with_refresh_limit(cli.refresh_limit);

    match cli.command {
        Commands::Serve { listen, static_dir } => {
            let state = AppState::new(manager).with_max_words(cli.max_words);
            let app = wb_web::create_app(state, static_dir);
            let listener = TcpListener::bind(listen)
                .await
                .with_context(|| format!("Failed to bind {}", listen))?;
            wb_web::serve(listener, app).await?;
        }
        Commands::Scrape(args) => handle_command(args, &manager).await?,
        Commands::List { top } => list_articles(storage.as_ref(), top).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["wordbrief", "serve"]).unwrap();
        assert_eq!(cli.storage, StorageKind::SQLite);
        assert_eq!(cli.db_path, PathBuf::from("articles.db"));
        assert_eq!(cli.refresh_limit, 5);
        assert_eq!(cli.max_words, 100);
        assert_eq!(cli.listing_url, DEFAULT_LISTING_URL);
        assert!(!cli.reset);
        match cli.command {
            Commands::Serve { listen, static_dir } => {
                assert_eq!(listen, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
                assert!(static_dir.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_scrape_subcommands() {
        let cli = Cli::try_parse_from([
            "wordbrief",
            "--storage",
            "memory",
            "--timeout",
            "1m",
            "scrape",
            "refresh",
        ])
        .unwrap();
        assert_eq!(cli.storage, StorageKind::Memory);
        assert_eq!(cli.timeout.0.as_secs(), 60);
        assert!(matches!(
            cli.command,
            Commands::Scrape(ScraperArgs {
                command: wb_scrapers::ScraperCommands::Refresh
            })
        ));

        assert!(Cli::try_parse_from(["wordbrief", "--storage", "qdrant", "list"]).is_err());
    }

    #[tokio::test]
    async fn test_list_articles_on_empty_store() {
        let storage = wb_storage::InMemoryStorage::new();
        list_articles(&storage, 5).await.unwrap();
    }
}
