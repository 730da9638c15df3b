use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use wb_core::{Article, ArticleId, ArticleStorage, Error, NewArticle, Result};

use crate::{StorageBackend, StorageConfig};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        link TEXT NOT NULL UNIQUE,
        content TEXT,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_articles_created_at ON articles (created_at)
    "#,
    // Add future migrations here
];

pub struct SQLiteStorage {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

#[async_trait]
impl StorageBackend for SQLiteStorage {
    fn get_error_message() -> &'static str {
        "SQLite database should be writable at the configured --db-path"
    }

    async fn open(config: &StorageConfig) -> Result<Self> {
        if config.reset {
            Self::reset(&config.path).await?;
        }
        Self::new_with_path(&config.path).await
    }
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Database(format!("Failed to run migration {}: {}", i, e)))?;
        }
        debug!(path = %db_path.display(), migrations = MIGRATIONS.len(), "SQLite schema ready");

        Ok(Self {
            pool: Arc::new(pool),
            db_path: db_path.to_path_buf(),
        })
    }

    /// Deletes the database file so the next open starts empty.
    pub async fn reset(db_path: &Path) -> Result<()> {
        match tokio::fs::remove_file(db_path).await {
            Ok(()) => {
                info!(path = %db_path.display(), "🧹 Removed existing database");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }
}

// Fixed-width UTC timestamps so text ordering matches time ordering.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| Error::Database(format!("Failed to parse date {:?}: {}", raw, e)))
}

fn row_to_article(row: &SqliteRow) -> Result<Article> {
    let column = |e: sqlx::Error| Error::Database(format!("Failed to read article row: {}", e));
    let created_at: String = row.try_get("created_at").map_err(column)?;
    Ok(Article {
        id: row.try_get("id").map_err(column)?,
        title: row.try_get("title").map_err(column)?,
        link: row.try_get("link").map_err(column)?,
        content: row.try_get("content").map_err(column)?,
        created_at: parse_timestamp(&created_at)?,
    })
}

#[async_trait]
impl ArticleStorage for SQLiteStorage {
    async fn list_all(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, link, content, created_at FROM articles
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to list articles: {}", e)))?;

        rows.iter().map(row_to_article).collect()
    }

    async fn exists(&self, link: &str) -> Result<bool> {
        let count: i64 = sqlx::query("SELECT COUNT(*) FROM articles WHERE link = ?")
            .bind(link)
            .fetch_one(&*self.pool)
            .await
            .and_then(|row| row.try_get(0))
            .map_err(|e| Error::Database(format!("Failed to look up link: {}", e)))?;
        Ok(count > 0)
    }

    async fn insert(&self, article: NewArticle) -> Result<Article> {
        let created_at = Utc::now().trunc_subsecs(6);

        let result = sqlx::query(
            r#"
            INSERT INTO articles (title, link, content, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&article.title)
        .bind(&article.link)
        .bind(article.content.as_deref())
        .bind(format_timestamp(created_at))
        .execute(&*self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::DuplicateLink(article.link.clone())
            }
            e => Error::Database(format!("Failed to store article: {}", e)),
        })?;

        Ok(Article {
            id: result.last_insert_rowid(),
            title: article.title,
            link: article.link,
            content: article.content,
            created_at,
        })
    }

    async fn get(&self, id: ArticleId) -> Result<Article> {
        let row = sqlx::query(
            r#"
            SELECT id, title, link, content, created_at FROM articles
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to get article {}: {}", id, e)))?;

        match row {
            Some(row) => row_to_article(&row),
            None => Err(Error::NotFound { id }),
        }
    }
}
