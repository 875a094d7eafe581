use async_trait::async_trait;
use ce_core::{Article, ArticleStore, Error, NewArticle, Result, UpdateArticle};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store. Backs `--storage memory` runs and tests.
pub struct MemoryStorage {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            articles: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleStore for MemoryStorage {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        let mut all = articles.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn get_article(&self, id: &str) -> Result<Article> {
        let articles = self.articles.read().await;
        articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    async fn create_article(&self, new: NewArticle) -> Result<Article> {
        let mut articles = self.articles.write().await;
        if articles.iter().any(|a| a.source_url == new.source_url) {
            return Err(Error::Duplicate(new.source_url));
        }
        let article = new.into_article();
        articles.push(article.clone());
        Ok(article)
    }

    async fn update_article(&self, id: &str, update: UpdateArticle) -> Result<Article> {
        let mut articles = self.articles.write().await;
        let article = articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        article.title = update.title;
        article.original_content = update.original_content;
        article.updated_content = update.updated_content;
        article.source_url = update.source_url;
        article.references = update.references;
        Ok(article.clone())
    }

    async fn pending_articles(&self) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        let mut pending: Vec<Article> = articles
            .iter()
            .filter(|a| a.updated_content.is_none())
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(pending)
    }

    async fn mark_enriched(&self, id: &str, updated_content: &str, references: &[String]) -> Result<Article> {
        let mut articles = self.articles.write().await;
        let article = articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        article.updated_content = Some(updated_content.to_string());
        article.references = references.to_vec();
        Ok(article.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(url: &str) -> NewArticle {
        NewArticle::scraped("Test Article", "This is a test article about chatbots.", url)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let storage = MemoryStorage::new();
        storage.create_article(sample("http://example.com/a")).await.unwrap();
        storage.create_article(sample("http://example.com/b")).await.unwrap();

        let all = storage.list_articles().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].created_at >= all[1].created_at);
    }

    #[tokio::test]
    async fn test_duplicate_source_url_rejected() {
        let storage = MemoryStorage::new();
        storage.create_article(sample("http://example.com/a")).await.unwrap();
        let err = storage.create_article(sample("http://example.com/a")).await.unwrap_err();
        assert!(matches!(err, Error::Duplicate(_)));
        assert_eq!(storage.list_articles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let storage = MemoryStorage::new();
        let err = storage.get_article("missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_mark_enriched_clears_pending() {
        let storage = MemoryStorage::new();
        let article = storage.create_article(sample("http://example.com/a")).await.unwrap();

        assert_eq!(storage.pending_articles().await.unwrap().len(), 1);

        let refs = vec!["http://ref.example.com".to_string()];
        let updated = storage.mark_enriched(&article.id, "Rewritten body", &refs).await.unwrap();
        assert_eq!(updated.updated_content.as_deref(), Some("Rewritten body"));
        assert_eq!(updated.references, refs);

        assert!(storage.pending_articles().await.unwrap().is_empty());
        // Original content untouched
        let stored = storage.get_article(&article.id).await.unwrap();
        assert_eq!(stored.original_content, article.original_content);
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let storage = MemoryStorage::new();
        let article = storage.create_article(sample("http://example.com/a")).await.unwrap();

        let updated = storage
            .update_article(
                &article.id,
                UpdateArticle {
                    title: "New Title".to_string(),
                    original_content: "New content".to_string(),
                    updated_content: Some("Enhanced".to_string()),
                    source_url: "http://example.com/a".to_string(),
                    references: vec!["http://ref.example.com".to_string()],
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "New Title");
        assert_eq!(updated.updated_content.as_deref(), Some("Enhanced"));

        let err = storage
            .update_article(
                "missing",
                UpdateArticle {
                    title: String::new(),
                    original_content: String::new(),
                    updated_content: None,
                    source_url: String::new(),
                    references: vec![],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
