pub mod extract;

use std::sync::Arc;
use std::time::Duration;

use ce_core::{ArticleStore, Error, NewArticle, Result};
use tracing::{error, info, warn};

pub use extract::ScrapedArticle;

/// Article URLs from the oldest pages of the source blog.
pub const SOURCE_URLS: &[&str] = &[
    "https://beyondchats.com/blogs/introduction-to-chatbots/",
    "https://beyondchats.com/blogs/live-chatbot/",
    "https://beyondchats.com/blogs/virtual-assistant/",
    "https://beyondchats.com/blogs/lead-generation-chatbots/",
    "https://beyondchats.com/blogs/chatbots-for-small-business-growth/",
];

// Desktop UA so the blog serves the full page instead of a bot wall.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);
const REQUEST_DELAY: Duration = Duration::from_secs(2);

/// Counts for one scrape run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeReport {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct BlogScraper {
    client: reqwest::Client,
}

impl BlogScraper {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(NAVIGATION_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch one page and extract title/content. Fails on navigation
    /// timeout, HTTP error status or insufficient extracted text.
    pub async fn scrape_article(&self, url: &str) -> Result<ScrapedArticle> {
        info!("📄 Scraping: {}", url);
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()
            .map_err(Error::Http)?
            .text()
            .await?;

        let article = extract::extract_article(&html, url)?;
        info!(
            "✅ Scraped: \"{}\" ({} chars)",
            article.title,
            article.content.chars().count()
        );
        Ok(article)
    }

    /// Scrape the fixed URL list and persist new articles. Per-URL
    /// failures are logged and skipped; duplicates are left untouched.
    pub async fn run(&self, store: Arc<dyn ArticleStore>) -> Result<ScrapeReport> {
        info!("🚀 Starting blog scraper ({} URLs)", SOURCE_URLS.len());
        let mut report = ScrapeReport::default();

        for (i, url) in SOURCE_URLS.iter().enumerate() {
            match self.scrape_article(url).await {
                Ok(article) => persist_scraped(store.as_ref(), article, &mut report).await,
                Err(e) => {
                    warn!("⚠️ {}", e);
                    report.failed += 1;
                }
            }

            // Small delay between requests
            if i + 1 < SOURCE_URLS.len() {
                tokio::time::sleep(REQUEST_DELAY).await;
            }
        }

        info!(
            "📊 Scrape summary: {} saved, {} skipped, {} failed",
            report.saved, report.skipped, report.failed
        );
        Ok(report)
    }
}

/// Store one scraped article and tally the outcome. A duplicate
/// `source_url` means a previous run already saved it.
async fn persist_scraped(store: &dyn ArticleStore, article: ScrapedArticle, report: &mut ScrapeReport) {
    let new = NewArticle::scraped(article.title, article.content, article.url);
    match store.create_article(new).await {
        Ok(stored) => {
            info!("💾 Saved: \"{}\"", stored.title);
            report.saved += 1;
        }
        Err(Error::Duplicate(url)) => {
            info!("⏭️ Skipped (already exists): {}", url);
            report.skipped += 1;
        }
        Err(e) => {
            error!("❌ Error saving article: {}", e);
            report.failed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ce_storage::MemoryStorage;

    fn scraped(url: &str) -> ScrapedArticle {
        ScrapedArticle {
            title: "Test Article".to_string(),
            content: "Long enough content about chatbots.".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_source_urls_are_unique() {
        let mut urls: Vec<_> = SOURCE_URLS.to_vec();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), SOURCE_URLS.len());
    }

    #[tokio::test]
    async fn test_persist_counts_saved_and_skipped() {
        let store = MemoryStorage::new();
        let mut report = ScrapeReport::default();

        persist_scraped(&store, scraped("http://example.com/a"), &mut report).await;
        persist_scraped(&store, scraped("http://example.com/b"), &mut report).await;
        // Second scrape of the same URL is a skip, not an overwrite.
        persist_scraped(&store, scraped("http://example.com/a"), &mut report).await;

        assert_eq!(report, ScrapeReport { saved: 2, skipped: 1, failed: 0 });
        assert_eq!(store.list_articles().await.unwrap().len(), 2);
    }
}
