pub mod gemini;
pub mod prompt;
pub mod references;

use std::sync::Arc;
use std::time::Duration;

use ce_core::{Article, ArticleStore, Error, Result, RewriteModel};
use tracing::{error, info};

pub use gemini::GeminiModel;

/// A rewrite shorter than this is treated as a failed enrichment.
const MIN_RESPONSE_CHARS: usize = 100;

/// Pause between LLM calls to respect the API's request-rate limits.
const ARTICLE_DELAY: Duration = Duration::from_secs(2);

/// Counts for one enrichment run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentReport {
    pub enriched: usize,
    pub failed: usize,
    pub total: usize,
}

/// Walks all pending articles: match references, build prompt, call
/// the model, persist. Per-article failures leave the article pending
/// and the run continues.
pub struct Enricher {
    store: Arc<dyn ArticleStore>,
    model: Arc<dyn RewriteModel>,
    delay: Duration,
}

impl Enricher {
    pub fn new(store: Arc<dyn ArticleStore>, model: Arc<dyn RewriteModel>) -> Self {
        Self {
            store,
            model,
            delay: ARTICLE_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn run(&self) -> Result<EnrichmentReport> {
        info!("🔌 Testing {} connection...", self.model.name());
        self.model
            .check_connection()
            .await
            .map_err(|e| Error::Llm(format!("Cannot proceed without working LLM connection: {}", e)))?;

        let pending = self.store.pending_articles().await?;
        info!("📚 Found {} articles to enrich", pending.len());

        let mut report = EnrichmentReport {
            total: pending.len(),
            ..Default::default()
        };

        for (i, article) in pending.iter().enumerate() {
            info!("📄 Processing: \"{}\"", article.title);
            match self.enrich_one(article).await {
                Ok(reference_count) => {
                    info!("✅ Enriched \"{}\" with {} references", article.title, reference_count);
                    report.enriched += 1;
                }
                Err(e) => {
                    error!("❌ Error processing \"{}\": {}", article.title, e);
                    report.failed += 1;
                }
            }

            // Rate limiting between API calls
            if i + 1 < pending.len() {
                tokio::time::sleep(self.delay).await;
            }
        }

        info!(
            "📊 Enrichment summary: {} enriched, {} failed, {} total",
            report.enriched, report.failed, report.total
        );
        Ok(report)
    }

    /// One article end to end. Nothing is written unless the rewrite
    /// passed the length check, so a failure leaves no partial state.
    async fn enrich_one(&self, article: &Article) -> Result<usize> {
        let references = references::match_references(&article.title);

        let rewritten = self
            .model
            .rewrite_article(&article.title, &article.original_content, &references)
            .await?;

        if rewritten.chars().count() < MIN_RESPONSE_CHARS {
            return Err(Error::Llm(format!(
                "LLM returned empty or too short response ({} chars)",
                rewritten.chars().count()
            )));
        }

        let reference_urls: Vec<String> = references.iter().map(|r| r.url.clone()).collect();
        self.store
            .mark_enriched(&article.id, &rewritten, &reference_urls)
            .await?;
        Ok(reference_urls.len())
    }
}
