#[cfg(test)]
mod tests {
    use crate::{MemoryPostStore, PostRepository, SqlitePostStore};
    use matjip_core::{CoreError, Post, PostSource, StorageError};
    use std::env;

    async fn setup_test_db() -> SqlitePostStore {
        let db_path = env::temp_dir().join(format!("test_matjip_{}.db", uuid::Uuid::new_v4()));
        let db_url = format!("sqlite://{}", db_path.display());

        let mut db = SqlitePostStore::new(db_url);
        db.connect()
            .await
            .expect("Failed to connect to test database");
        db.run_migrations().await.expect("Failed to run migrations");

        db
    }

    fn sample_post(n: usize) -> Post {
        Post::new(format!("https://blog.example/post/{n}"), PostSource::Blog)
            .with_title(format!("방문 후기 {n}"))
            .with_content("상호: 온기카페\n맛 5점")
    }

    async fn exercise_repository<R: PostRepository>(repo: &R) {
        let first = sample_post(1);
        let second = Post::new("https://kin.example/q/2", PostSource::Knowledge);
        let other = sample_post(3).with_thumbnail("https://img.example/3.jpg");

        repo.save_post("온기카페", &first).await.unwrap();
        repo.save_post("온기카페", &second).await.unwrap();
        repo.save_post("달빛제과", &other).await.unwrap();

        let posts = repo.posts_for_venue("온기카페").await.unwrap();
        assert_eq!(posts, vec![first.clone(), second]);

        let posts = repo.posts_for_venue("달빛제과").await.unwrap();
        assert_eq!(posts, vec![other]);

        assert!(repo.posts_for_venue("없는가게").await.unwrap().is_empty());

        let venues = repo.venues().await.unwrap();
        assert_eq!(venues, vec!["달빛제과".to_string(), "온기카페".to_string()]);

        let err = repo.save_post("달빛제과", &first).await.unwrap_err();
        assert!(err.is_duplicate());
        assert!(matches!(
            err,
            CoreError::Storage(StorageError::DuplicateKey { ref url }) if url == &first.url
        ));

        let err = repo.save_post("  ", &sample_post(4)).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));

        let bad_url = Post::new("not a url", PostSource::Other);
        let err = repo.save_post("온기카페", &bad_url).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_database_connection_and_migrations() {
        let db = setup_test_db().await;

        // Running migrations twice must be harmless.
        db.run_migrations().await.expect("Failed to rerun migrations");
        assert!(db.venues().await.unwrap().is_empty());
        db.close().await;
    }

    #[tokio::test]
    async fn test_sqlite_repository() {
        let db = setup_test_db().await;
        exercise_repository(&db).await;
        db.close().await;
    }

    #[tokio::test]
    async fn test_memory_repository() {
        let store = MemoryPostStore::new();
        assert!(store.is_empty().await);
        exercise_repository(&store).await;
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_closed_store_rejects_queries() {
        let db = setup_test_db().await;
        db.save_post("온기카페", &sample_post(1)).await.unwrap();
        db.close().await;

        let err = db.posts_for_venue("온기카페").await.unwrap_err();
        assert!(matches!(err, CoreError::Storage(StorageError::Sql(_))));
    }

    #[tokio::test]
    async fn test_unconnected_store_fails() {
        let db = SqlitePostStore::new("sqlite::memory:".to_string());
        let err = db.venues().await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Storage(StorageError::ConnectionFailed { .. })
        ));
    }
}
