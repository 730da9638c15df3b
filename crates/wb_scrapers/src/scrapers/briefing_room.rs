use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;
use wb_core::{Error, ListingEntry, Result};
use wb_text::clean_text;

use super::utils;
use super::ArticleExtractor;

pub const DEFAULT_LISTING_URL: &str = "https://www.whitehouse.gov/briefing-room/";
pub const DEFAULT_USER_AGENT: &str = concat!("wordbrief/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ARTICLE_SELECTOR: &str = "article";
const HEADING_SELECTOR: &str = "h2";
const LINK_SELECTOR: &str = "a";
const CONTENT_SELECTOR: &str = "#content > article > section";

lazy_static! {
    static ref ARTICLE: Selector = Selector::parse(ARTICLE_SELECTOR).expect("valid selector");
    static ref HEADING: Selector = Selector::parse(HEADING_SELECTOR).expect("valid selector");
    static ref LINK: Selector = Selector::parse(LINK_SELECTOR).expect("valid selector");
    static ref CONTENT: Selector = Selector::parse(CONTENT_SELECTOR).expect("valid selector");
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub listing_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ScraperConfig {
    pub fn with_listing_url(mut self, url: impl Into<String>) -> Self {
        self.listing_url = url.into();
        self
    }
}

/// Scrapes the White House briefing room listing and its article pages.
#[derive(Debug, Clone)]
pub struct BriefingRoomScraper {
    client: Client,
    listing_url: Url,
}

impl BriefingRoomScraper {
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let listing_url = utils::parse_url(&config.listing_url)?;
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            listing_url,
        })
    }

    pub fn listing_url(&self) -> &Url {
        &self.listing_url
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    /// Like [`ArticleExtractor::list_articles`] but keeps the failure.
    pub async fn try_list_articles(&self) -> Result<Vec<ListingEntry>> {
        let html = self.fetch_html(self.listing_url.as_str()).await?;
        Ok(parse_listing(&html, &self.listing_url))
    }

    /// Like [`ArticleExtractor::fetch_content`] but keeps the failure.
    pub async fn try_fetch_content(&self, link: &str) -> Result<String> {
        let html = self.fetch_html(link).await?;
        parse_content(&html)
    }
}

/// Pulls `(title, link)` pairs out of a listing page.
///
/// Every `article` block contributes the first anchor inside its first `h2`.
/// Blocks without a heading, anchor or `href` are skipped. An anchor with no
/// text still yields an entry with an empty title.
pub fn parse_listing(html: &str, base: &Url) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);

    let mut entries = Vec::new();
    for block in document.select(&ARTICLE) {
        let Some(anchor) = block
            .select(&HEADING)
            .next()
            .and_then(|heading| heading.select(&LINK).next())
        else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(link) = utils::resolve_link(base, href) else {
            debug!(%href, "Skipping unresolvable link");
            continue;
        };
        let title = anchor.text().collect::<String>().trim().to_string();
        entries.push(ListingEntry { title, link });
    }
    entries
}

/// Extracts the cleaned body text of an article page.
pub fn parse_content(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let section = document
        .select(&CONTENT)
        .next()
        .ok_or(Error::MarkupMismatch {
            selector: CONTENT_SELECTOR,
        })?;
    Ok(clean_text(&utils::visible_text(section)))
}

#[async_trait]
impl ArticleExtractor for BriefingRoomScraper {
    fn source(&self) -> &str {
        "White House Briefing Room"
    }

    #[instrument(level = "info", skip_all, fields(url = %self.listing_url))]
    async fn list_articles(&self) -> Vec<ListingEntry> {
        match self.try_list_articles().await {
            Ok(entries) => {
                info!(count = entries.len(), "Indexed listing page");
                entries
            }
            Err(e) => {
                warn!(error = %e, "Listing fetch failed");
                Vec::new()
            }
        }
    }

    #[instrument(level = "info", skip_all, fields(%link))]
    async fn fetch_content(&self, link: &str) -> Option<String> {
        match self.try_fetch_content(link).await {
            Ok(content) => {
                debug!(bytes = content.len(), "Parsed article");
                Some(content)
            }
            Err(e) => {
                warn!(error = %e, "Article fetch produced no content");
                None
            }
        }
    }
}
