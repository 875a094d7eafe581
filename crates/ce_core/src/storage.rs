use async_trait::async_trait;
use crate::types::{Article, NewArticle, UpdateArticle};
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// All articles, newest first.
    async fn list_articles(&self) -> Result<Vec<Article>>;

    /// A single article by id, or `Error::NotFound`.
    async fn get_article(&self, id: &str) -> Result<Article>;

    /// Store a new article. Fails with `Error::Duplicate` when an
    /// article with the same `source_url` already exists.
    async fn create_article(&self, new: NewArticle) -> Result<Article>;

    /// Whole-record replace, or `Error::NotFound` for an unknown id.
    async fn update_article(&self, id: &str, update: UpdateArticle) -> Result<Article>;

    /// Articles still awaiting enrichment (`updated_content == None`),
    /// oldest first.
    async fn pending_articles(&self) -> Result<Vec<Article>>;

    /// Record the enrichment result for one article. Only touches
    /// `updated_content` and `references`.
    async fn mark_enriched(&self, id: &str, updated_content: &str, references: &[String]) -> Result<Article>;
}
