use std::path::Path;
use std::sync::Arc;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use bg_core::{Blog, BlogStore, Error, Result};
use crate::StorageBackend;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS blogs (
        search TEXT PRIMARY KEY,
        created_at TEXT NOT NULL,
        keywords TEXT NOT NULL,
        related_questions TEXT NOT NULL,
        articles TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

pub struct SQLiteStorage {
    pool: Arc<SqlitePool>,
}

#[async_trait]
impl StorageBackend for SQLiteStorage {
    fn get_error_message() -> &'static str {
        "SQLite database should be available at the configured path"
    }

    async fn open(path: &Path) -> Result<Self> {
        Self::new_with_path(path).await
    }
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create database directory: {}", e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Storage(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Storage(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    fn row_to_blog(row: &SqliteRow) -> Result<Blog> {
        let created_at: String = row.get("created_at");
        Ok(Blog {
            search: row.get("search"),
            created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| Error::Storage(format!("Failed to parse date: {}", e)))?
                .with_timezone(&chrono::Utc),
            keywords: serde_json::from_str(row.get::<&str, _>("keywords"))?,
            related_questions: serde_json::from_str(row.get::<&str, _>("related_questions"))?,
            articles: serde_json::from_str(row.get::<&str, _>("articles"))?,
        })
    }
}

#[async_trait]
impl BlogStore for SQLiteStorage {
    async fn get(&self, search: &str) -> Result<Option<Blog>> {
        let row = sqlx::query("SELECT * FROM blogs WHERE search = ?")
            .bind(search)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to get blog: {}", e)))?;

        row.as_ref().map(Self::row_to_blog).transpose()
    }

    async fn insert(&self, blog: &Blog) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO blogs (search, created_at, keywords, related_questions, articles)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&blog.search)
        .bind(blog.created_at.to_rfc3339())
        .bind(serde_json::to_string(&blog.keywords)?)
        .bind(serde_json::to_string(&blog.related_questions)?)
        .bind(serde_json::to_string(&blog.articles)?)
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Storage(format!("Failed to insert blog: {}", e)))?;

        Ok(())
    }

    async fn update(&self, blog: &Blog, search: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE blogs
            SET search = ?, created_at = ?, keywords = ?, related_questions = ?, articles = ?
            WHERE search = ?
            "#,
        )
        .bind(&blog.search)
        .bind(blog.created_at.to_rfc3339())
        .bind(serde_json::to_string(&blog.keywords)?)
        .bind(serde_json::to_string(&blog.related_questions)?)
        .bind(serde_json::to_string(&blog.articles)?)
        .bind(search)
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Storage(format!("Failed to update blog: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(Error::Storage(format!("No blog stored for: {}", search)));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Blog>> {
        let rows = sqlx::query("SELECT * FROM blogs ORDER BY rowid")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to list blogs: {}", e)))?;

        rows.iter().map(Self::row_to_blog).collect()
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM blogs")
            .execute(&*self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to clear blogs: {}", e)))?;
        Ok(())
    }
}
