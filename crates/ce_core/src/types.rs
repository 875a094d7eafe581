use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scraped blog article and, once enriched, its rewritten version.
///
/// `updated_content == None` means the article is still pending
/// enrichment. Once set it is never cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub original_content: String,
    pub updated_content: Option<String>,
    pub source_url: String,
    pub references: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create an article. The store assigns the id and
/// timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub original_content: String,
    pub source_url: String,
    #[serde(default)]
    pub updated_content: Option<String>,
    #[serde(default)]
    pub references: Vec<String>,
}

impl NewArticle {
    pub fn scraped(title: impl Into<String>, content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            original_content: content.into(),
            source_url: url.into(),
            updated_content: None,
            references: Vec::new(),
        }
    }

    /// Assign a fresh id and timestamp. Used by storage backends on
    /// create.
    pub fn into_article(self) -> Article {
        Article {
            id: uuid::Uuid::new_v4().to_string(),
            title: self.title,
            original_content: self.original_content,
            updated_content: self.updated_content,
            source_url: self.source_url,
            references: self.references,
            created_at: Utc::now(),
        }
    }
}

/// Whole-record replacement used by the PUT endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateArticle {
    pub title: String,
    pub original_content: String,
    pub updated_content: Option<String>,
    pub source_url: String,
    #[serde(default)]
    pub references: Vec<String>,
}

/// A competitor article used as rewrite context. Produced by the
/// static reference table, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceArticle {
    pub title: String,
    pub content: String,
    pub url: String,
}
