use clap::{Args, Subcommand};
use wb_core::Result;

use crate::manager::ScraperManager;

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Run one refresh cycle and store new articles
    Refresh,
    /// Show the entries currently on the listing page without storing anything
    Listing,
    /// Fetch and print the cleaned text of a single article page
    Url {
        /// Article URL
        url: String,
    },
}

pub async fn handle_command(args: ScraperArgs, manager: &ScraperManager) -> Result<()> {
    match args.command {
        ScraperCommands::Refresh => {
            let report = manager.refresh().await;
            println!("{}", report);
        }
        ScraperCommands::Listing => {
            let extractor = manager.extractor();
            let entries = extractor.list_articles().await;
            println!("{}: {} entries", extractor.source(), entries.len());
            for entry in entries {
                println!("- {} - {}", entry.title, entry.link);
            }
        }
        ScraperCommands::Url { url } => match manager.extractor().fetch_content(&url).await {
            Some(content) => println!("{}", content),
            None => eprintln!("No content found at {}", url),
        },
    }
    Ok(())
}
