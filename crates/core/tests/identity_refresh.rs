//! Identity index refresh behavior.
//!
//! These tests verify the conditional-caching contract end to end:
//! content-tier hits cost zero network calls, a revalidation costs exactly
//! one, and a transport failure with a warm cache degrades to the stale
//! snapshot instead of failing the lookup.

use std::sync::Arc;
use std::time::Duration;

use animusub_core::cache::{CacheTtl, MemoryCacheStore, RevalidatingCache};
use animusub_core::crossref::{CrossRefRecord, IdSystem, IdValue, IdentityIndex};
use animusub_core::testing::{fixtures, MockDataset};

const DATASET_KEY: &str = "crossref:dataset";

fn index_over(
    store: Arc<MemoryCacheStore>,
    dataset: Arc<MockDataset>,
    ttl: CacheTtl,
) -> IdentityIndex {
    IdentityIndex::new(RevalidatingCache::new(DATASET_KEY, ttl, store, dataset))
}

/// Content tier long enough to stay warm across the whole test.
fn warm_ttl() -> CacheTtl {
    CacheTtl::new(Duration::from_secs(3600), Duration::from_secs(86_400))
}

/// Content tier that is immediately stale, validator tier long-lived.
fn stale_content_ttl() -> CacheTtl {
    CacheTtl::new(Duration::ZERO, Duration::from_secs(86_400))
}

#[tokio::test]
async fn two_lookups_cost_one_network_request() {
    let store = Arc::new(MemoryCacheStore::new());
    let dataset = Arc::new(MockDataset::new());
    dataset.push_fresh(vec![fixtures::tv_record()], "etag-1").await;

    let index = index_over(store, dataset.clone(), warm_ttl());

    let first = index
        .lookup(IdSystem::Tmdb, &IdValue::Numeric(66875))
        .await
        .unwrap();
    let second = index
        .lookup(IdSystem::Tmdb, &IdValue::Numeric(66875))
        .await
        .unwrap();

    assert_eq!(first.unwrap().anilist_id, Some(17549));
    assert_eq!(second.unwrap().anilist_id, Some(17549));
    assert_eq!(dataset.calls(), 1, "second lookup must be a pure cache hit");
}

#[tokio::test]
async fn warm_store_makes_a_fresh_index_free() {
    let store = Arc::new(MemoryCacheStore::new());
    let dataset = Arc::new(MockDataset::new());
    dataset.push_fresh(vec![fixtures::tv_record()], "etag-1").await;

    let first_index = index_over(store.clone(), dataset.clone(), warm_ttl());
    first_index
        .lookup(IdSystem::Tmdb, &IdValue::Numeric(66875))
        .await
        .unwrap();

    // A new index over the same store (a later process run, in effect)
    // resolves entirely from the content tier.
    let second_index = index_over(store, dataset.clone(), warm_ttl());
    let found = second_index
        .lookup(IdSystem::Tmdb, &IdValue::Numeric(66875))
        .await
        .unwrap();

    assert!(found.is_some());
    assert_eq!(dataset.calls(), 1);
}

#[tokio::test]
async fn stale_content_revalidates_with_exactly_one_request() {
    let store = Arc::new(MemoryCacheStore::new());
    let dataset = Arc::new(MockDataset::new());
    dataset.push_fresh(vec![fixtures::tv_record()], "etag-1").await;
    dataset.push_not_modified().await;

    let first_index = index_over(store.clone(), dataset.clone(), stale_content_ttl());
    first_index
        .lookup(IdSystem::Tmdb, &IdValue::Numeric(66875))
        .await
        .unwrap();

    let second_index = index_over(store, dataset.clone(), stale_content_ttl());
    let found = second_index
        .lookup(IdSystem::Tmdb, &IdValue::Numeric(66875))
        .await
        .unwrap()
        .unwrap();

    // The previously cached value, unchanged.
    assert_eq!(found, fixtures::tv_record());
    assert_eq!(dataset.calls(), 2, "revalidation is one request, no more");

    // The second fetch presented the stored validator.
    let validators = dataset.seen_validators().await;
    assert_eq!(validators[1].as_deref(), Some("etag-1"));
}

#[tokio::test]
async fn changed_dataset_replaces_the_snapshot() {
    let store = Arc::new(MemoryCacheStore::new());
    let dataset = Arc::new(MockDataset::new());

    let mut updated = fixtures::tv_record();
    updated.anilist_id = Some(99_999);

    dataset.push_fresh(vec![fixtures::tv_record()], "etag-1").await;
    dataset.push_fresh(vec![updated], "etag-2").await;

    let first_index = index_over(store.clone(), dataset.clone(), stale_content_ttl());
    let before = first_index
        .lookup(IdSystem::Tmdb, &IdValue::Numeric(66875))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(before.anilist_id, Some(17549));

    let second_index = index_over(store, dataset, stale_content_ttl());
    let after = second_index
        .lookup(IdSystem::Tmdb, &IdValue::Numeric(66875))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.anilist_id, Some(99_999));
}

#[tokio::test]
async fn transport_failure_with_warm_cache_serves_stale_snapshot() {
    let store = Arc::new(MemoryCacheStore::new());
    let dataset = Arc::new(MockDataset::new());
    dataset.push_fresh(vec![fixtures::tv_record()], "etag-1").await;
    dataset.push_error().await;

    let first_index = index_over(store.clone(), dataset.clone(), stale_content_ttl());
    first_index
        .lookup(IdSystem::Tmdb, &IdValue::Numeric(66875))
        .await
        .unwrap();

    // Refresh fails, but the validator-tier snapshot is still within TTL:
    // the lookup degrades to the stale data instead of erroring.
    let second_index = index_over(store, dataset, stale_content_ttl());
    let found = second_index
        .lookup(IdSystem::Tmdb, &IdValue::Numeric(66875))
        .await
        .unwrap();

    assert_eq!(found.unwrap().anilist_id, Some(17549));
}

#[tokio::test]
async fn transport_failure_with_cold_cache_fails_the_lookup() {
    let store = Arc::new(MemoryCacheStore::new());
    let dataset = Arc::new(MockDataset::new());
    dataset.push_error().await;

    let index = index_over(store, dataset, warm_ttl());
    let result = index.lookup(IdSystem::Tmdb, &IdValue::Numeric(66875)).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn lookup_returns_the_last_record_on_duplicate_ids() {
    let store = Arc::new(MemoryCacheStore::new());
    let dataset = Arc::new(MockDataset::new());

    let first = CrossRefRecord {
        anilist_id: Some(1),
        tmdb_id: Some(555),
        ..Default::default()
    };
    let last = CrossRefRecord {
        anilist_id: Some(2),
        tmdb_id: Some(555),
        ..Default::default()
    };
    dataset.push_fresh(vec![first, last], "etag-1").await;

    let index = index_over(store, dataset, warm_ttl());
    let found = index
        .lookup(IdSystem::Tmdb, &IdValue::Numeric(555))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.anilist_id, Some(2));
}

#[tokio::test]
async fn missing_id_is_not_an_error() {
    let store = Arc::new(MemoryCacheStore::new());
    let dataset = Arc::new(MockDataset::new());
    dataset.push_fresh(vec![fixtures::tv_record()], "etag-1").await;

    let index = index_over(store, dataset, warm_ttl());
    let found = index
        .lookup(IdSystem::Tmdb, &IdValue::Numeric(42))
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn lookups_work_across_id_systems() {
    let store = Arc::new(MemoryCacheStore::new());
    let dataset = Arc::new(MockDataset::new());
    dataset
        .push_fresh(vec![fixtures::tv_record(), fixtures::movie_record()], "etag-1")
        .await;

    let index = index_over(store, dataset.clone(), warm_ttl());

    let by_imdb = index
        .lookup(IdSystem::Imdb, &IdValue::Text("tt0382868".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_imdb.anilist_id, Some(1209));

    let by_mal = index
        .lookup(IdSystem::MyAnimeList, &IdValue::Numeric(17549))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_mal.tmdb_id, Some(66875));

    // Both lookups rode the same snapshot.
    assert_eq!(dataset.calls(), 1);
}
