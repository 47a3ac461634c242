use deadpool_redis::{Config, Runtime};
use uuid::Uuid;

use cache_cell::{CacheProvider, RedisCacheProvider};

// Runs against a live Redis when REDIS_URL is set.
fn redis_url() -> Option<String> {
    std::env::var("REDIS_URL").ok().filter(|url| !url.is_empty())
}

#[tokio::test]
async fn test_redis_save_invalidate_and_invalidate_prefix() {
    let Some(url) = redis_url() else {
        println!("Skipping Redis cache test (REDIS_URL not set)");
        return;
    };

    let pool = Config::from_url(url)
        .create_pool(Some(Runtime::Tokio1))
        .unwrap();
    let cache = RedisCacheProvider::from_pool(pool);

    let scope = format!("provider-appointments-test-{}", Uuid::new_v4());
    let sibling_scope = format!("{}-other", scope);
    let key = format!("{}:P1:2025-6-10", scope);
    let other_day = format!("{}:P1:2025-6-11", scope);
    let sibling_key = format!("{}:P1:2025-6-10", sibling_scope);

    cache.save(&key, "[]").await.unwrap();
    assert_eq!(cache.recover(&key).await.unwrap().as_deref(), Some("[]"));

    cache.invalidate(&key).await.unwrap();
    assert_eq!(cache.recover(&key).await.unwrap(), None);

    // Deleting an absent key is not an error.
    cache.invalidate(&key).await.unwrap();

    cache.save(&key, "[]").await.unwrap();
    cache.save(&other_day, "[]").await.unwrap();
    cache.save(&sibling_key, "[]").await.unwrap();

    cache.invalidate_prefix(&scope).await.unwrap();

    assert_eq!(cache.recover(&key).await.unwrap(), None);
    assert_eq!(cache.recover(&other_day).await.unwrap(), None);
    assert_eq!(cache.recover(&sibling_key).await.unwrap().as_deref(), Some("[]"));

    cache.invalidate(&sibling_key).await.unwrap();
}
