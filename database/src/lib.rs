mod memory;
mod sqlite;

#[cfg(test)]
mod tests;

pub use memory::MemoryPostStore;
pub use sqlite::SqlitePostStore;

use matjip_core::{CoreError, Post};

/// Storage capability for scraped posts, grouped by venue.
///
/// Callers receive a repository explicitly; nothing in the workspace holds a
/// global client.
pub trait PostRepository {
    /// Store a post under `venue`. A second post with the same url is a
    /// `StorageError::DuplicateKey`.
    async fn save_post(&self, venue: &str, post: &Post) -> Result<(), CoreError>;

    /// Posts for `venue` in insertion order. Unknown venues yield an empty list.
    async fn posts_for_venue(&self, venue: &str) -> Result<Vec<Post>, CoreError>;

    /// Every venue with at least one post, sorted.
    async fn venues(&self) -> Result<Vec<String>, CoreError>;
}

impl<T: PostRepository> PostRepository for &T {
    async fn save_post(&self, venue: &str, post: &Post) -> Result<(), CoreError> {
        (**self).save_post(venue, post).await
    }

    async fn posts_for_venue(&self, venue: &str) -> Result<Vec<Post>, CoreError> {
        (**self).posts_for_venue(venue).await
    }

    async fn venues(&self) -> Result<Vec<String>, CoreError> {
        (**self).venues().await
    }
}

pub(crate) fn validate_post(venue: &str, post: &Post) -> Result<(), CoreError> {
    if venue.trim().is_empty() {
        return Err(CoreError::invalid_input("venue must not be blank"));
    }
    url::Url::parse(&post.url)
        .map_err(|e| CoreError::invalid_input(format!("post url '{}': {}", post.url, e)))?;
    Ok(())
}
