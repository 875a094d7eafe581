use async_trait::async_trait;
use crate::types::ReferenceArticle;
use crate::Result;

#[async_trait]
pub trait RewriteModel: Send + Sync {
    /// Model label for logs.
    fn name(&self) -> &str;

    /// Rewrite an article using the given competitor references as
    /// context. Returns the rewritten Markdown body.
    async fn rewrite_article(
        &self,
        title: &str,
        original_content: &str,
        references: &[ReferenceArticle],
    ) -> Result<String>;

    /// Cheap round-trip to verify the model is reachable before a run.
    async fn check_connection(&self) -> Result<()>;
}
