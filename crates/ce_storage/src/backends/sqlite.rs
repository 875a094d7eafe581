use async_trait::async_trait;
use ce_core::{Article, ArticleStore, Error, NewArticle, Result, UpdateArticle};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:articles.db";

// `references` is reserved in SQL, hence `refs`.
const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        original_content TEXT NOT NULL,
        updated_content TEXT,
        source_url TEXT NOT NULL UNIQUE,
        refs TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL
    )
    "#,
];

pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| Error::Database(format!("Invalid database URL {}: {}", url, e)))?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Database(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self { pool })
    }

    fn row_to_article(row: &SqliteRow) -> Result<Article> {
        let refs: String = row.get("refs");
        let references: Vec<String> = serde_json::from_str(&refs)?;
        let created_at: String = row.get("created_at");
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| Error::Database(format!("Failed to parse created_at: {}", e)))?
            .with_timezone(&chrono::Utc);

        Ok(Article {
            id: row.get("id"),
            title: row.get("title"),
            original_content: row.get("original_content"),
            updated_content: row.get("updated_content"),
            source_url: row.get("source_url"),
            references,
            created_at,
        })
    }
}

#[async_trait]
impl ArticleStore for SqliteStorage {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query("SELECT * FROM articles ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to list articles: {}", e)))?;

        rows.iter().map(Self::row_to_article).collect()
    }

    async fn get_article(&self, id: &str) -> Result<Article> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to get article: {}", e)))?;

        match row {
            Some(row) => Self::row_to_article(&row),
            None => Err(Error::NotFound(id.to_string())),
        }
    }

    async fn create_article(&self, new: NewArticle) -> Result<Article> {
        let article = new.into_article();
        let refs = serde_json::to_string(&article.references)?;

        let result = sqlx::query(
            r#"
            INSERT INTO articles
            (id, title, original_content, updated_content, source_url, refs, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.id)
        .bind(&article.title)
        .bind(&article.original_content)
        .bind(article.updated_content.as_deref())
        .bind(&article.source_url)
        .bind(refs)
        .bind(article.created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(article),
            Err(e) if e.as_database_error().is_some_and(|d| d.is_unique_violation()) => {
                Err(Error::Duplicate(article.source_url))
            }
            Err(e) => Err(Error::Database(format!("Failed to store article: {}", e))),
        }
    }

    async fn update_article(&self, id: &str, update: UpdateArticle) -> Result<Article> {
        let refs = serde_json::to_string(&update.references)?;

        let result = sqlx::query(
            r#"
            UPDATE articles
            SET title = ?, original_content = ?, updated_content = ?, source_url = ?, refs = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.title)
        .bind(&update.original_content)
        .bind(update.updated_content.as_deref())
        .bind(&update.source_url)
        .bind(refs)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to update article: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        self.get_article(id).await
    }

    async fn pending_articles(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            "SELECT * FROM articles WHERE updated_content IS NULL ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to list pending articles: {}", e)))?;

        rows.iter().map(Self::row_to_article).collect()
    }

    async fn mark_enriched(&self, id: &str, updated_content: &str, references: &[String]) -> Result<Article> {
        let refs = serde_json::to_string(references)?;

        let result = sqlx::query("UPDATE articles SET updated_content = ?, refs = ? WHERE id = ?")
            .bind(updated_content)
            .bind(refs)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to mark article enriched: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        self.get_article(id).await
    }
}
