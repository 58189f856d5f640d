use crate::{validate_post, PostRepository};
use matjip_core::{CoreError, Post, StorageError};
use std::collections::{BTreeSet, HashSet};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    posts: Vec<(String, Post)>,
    urls: HashSet<String>,
}

/// In-process store, mainly for tests and one-shot batches.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    state: RwLock<MemoryState>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl PostRepository for MemoryPostStore {
    async fn save_post(&self, venue: &str, post: &Post) -> Result<(), CoreError> {
        validate_post(venue, post)?;
        let mut state = self.state.write().await;
        if !state.urls.insert(post.url.clone()) {
            return Err(StorageError::DuplicateKey {
                url: post.url.clone(),
            }
            .into());
        }
        state.posts.push((venue.to_string(), post.clone()));
        Ok(())
    }

    async fn posts_for_venue(&self, venue: &str) -> Result<Vec<Post>, CoreError> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .iter()
            .filter(|(stored_venue, _)| stored_venue == venue)
            .map(|(_, post)| post.clone())
            .collect())
    }

    async fn venues(&self) -> Result<Vec<String>, CoreError> {
        let state = self.state.read().await;
        let venues: BTreeSet<&String> = state.posts.iter().map(|(venue, _)| venue).collect();
        Ok(venues.into_iter().cloned().collect())
    }
}
