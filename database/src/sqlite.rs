use crate::{validate_post, PostRepository};
use chrono::Utc;
use matjip_core::{CoreError, Post, PostSource, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use tracing::{debug, info};

pub struct SqlitePostStore {
    connection_string: String,
    pool: Option<SqlitePool>,
}

impl SqlitePostStore {
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            pool: None,
        }
    }

    pub async fn connect(&mut self) -> Result<(), CoreError> {
        let options = SqliteConnectOptions::from_str(&self.connection_string)
            .map_err(|e| StorageError::ConnectionFailed {
                reason: e.to_string(),
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                reason: e.to_string(),
            })?;

        info!(database = %self.connection_string, "connected to post store");
        self.pool = Some(pool);
        Ok(())
    }

    pub async fn run_migrations(&self) -> Result<(), CoreError> {
        sqlx::migrate!("./migrations")
            .run(self.pool()?)
            .await
            .map_err(StorageError::from)?;
        debug!("post store migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }

    fn pool(&self) -> Result<&SqlitePool, CoreError> {
        self.pool.as_ref().ok_or_else(|| {
            StorageError::ConnectionFailed {
                reason: "post store is not connected".to_string(),
            }
            .into()
        })
    }
}

fn post_from_row(row: &SqliteRow) -> Result<Post, sqlx::Error> {
    let source: String = row.try_get("source")?;
    Ok(Post {
        url: row.try_get("url")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        thumbnail: row.try_get("thumbnail")?,
        source: PostSource::parse(&source),
    })
}

fn storage_error(error: sqlx::Error, post: &Post) -> CoreError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return StorageError::DuplicateKey {
                url: post.url.clone(),
            }
            .into();
        }
        if db_error.message().contains("locked") {
            return StorageError::DatabaseLocked.into();
        }
    }
    StorageError::Sql(error).into()
}

impl PostRepository for SqlitePostStore {
    async fn save_post(&self, venue: &str, post: &Post) -> Result<(), CoreError> {
        validate_post(venue, post)?;
        sqlx::query(
            "INSERT INTO posts (venue, url, title, content, thumbnail, source, collected_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(venue)
        .bind(&post.url)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.thumbnail)
        .bind(post.source.as_str())
        .bind(Utc::now())
        .execute(self.pool()?)
        .await
        .map_err(|e| storage_error(e, post))?;

        debug!(venue, url = %post.url, "stored post");
        Ok(())
    }

    async fn posts_for_venue(&self, venue: &str) -> Result<Vec<Post>, CoreError> {
        let rows = sqlx::query(
            "SELECT url, title, content, thumbnail, source FROM posts \
             WHERE venue = ? ORDER BY id",
        )
        .bind(venue)
        .fetch_all(self.pool()?)
        .await
        .map_err(StorageError::from)?;

        let posts = rows
            .iter()
            .map(post_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;
        Ok(posts)
    }

    async fn venues(&self) -> Result<Vec<String>, CoreError> {
        let rows = sqlx::query("SELECT DISTINCT venue FROM posts ORDER BY venue")
            .fetch_all(self.pool()?)
            .await
            .map_err(StorageError::from)?;

        let venues = rows
            .iter()
            .map(|row| row.try_get::<String, _>("venue"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;
        Ok(venues)
    }
}
