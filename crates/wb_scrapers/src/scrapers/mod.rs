use async_trait::async_trait;
use wb_core::ListingEntry;

pub mod briefing_room;

pub use briefing_room::{parse_content, parse_listing, BriefingRoomScraper, ScraperConfig};

/// Source of articles for a refresh cycle.
///
/// Implementations swallow their own failures: a listing that cannot be
/// fetched or parsed yields an empty list and an article page without the
/// expected markup yields `None`. Callers only ever see the empty case.
#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    /// Returns the name of the news source
    fn source(&self) -> &str;

    /// Entries on the listing page, in page order
    async fn list_articles(&self) -> Vec<ListingEntry>;

    /// Cleaned body text of one article page
    async fn fetch_content(&self, link: &str) -> Option<String>;
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use scraper::node::Node;
    use scraper::ElementRef;
    use url::Url;
    use wb_core::Result;

    pub fn parse_url(url: &str) -> Result<Url> {
        Ok(Url::parse(url)?)
    }

    /// Resolves `href` against the page it was found on.
    pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
        base.join(href.trim()).ok().map(String::from)
    }

    /// Text of an element with `script` and `style` contents skipped.
    ///
    /// Each text node is trimmed, empty ones are dropped and the rest are
    /// joined with single spaces.
    pub fn visible_text(element: ElementRef<'_>) -> String {
        let mut parts = Vec::new();
        for node in element.descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };
            let hidden = node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != element.id())
                .any(|ancestor| {
                    matches!(
                        ancestor.value(),
                        Node::Element(el) if matches!(el.name(), "script" | "style")
                    )
                });
            if hidden {
                continue;
            }
            let text = text.trim();
            if !text.is_empty() {
                parts.push(text);
            }
        }
        parts.join(" ")
    }
}
