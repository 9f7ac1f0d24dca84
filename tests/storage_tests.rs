//! SeaOrmStorage tests against a real SQLite file

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use tempfile::TempDir;

use privalytics::config::{DatabaseConfig, TrackingConfig};
use privalytics::services::{TrackRequest, TrackingService};
use privalytics::storage::{NewEvent, SeaOrmStorage, Site, TimeseriesMetric};
use privalytics::utils::session_pseudonym;

fn db_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig {
        path: dir.path().join("storage.db").display().to_string(),
        ..DatabaseConfig::default()
    }
}

fn site(id: &str, api_key: &str) -> Site {
    Site {
        id: id.to_string(),
        name: "Blog".to_string(),
        domain: "blog.example".to_string(),
        api_key: api_key.to_string(),
        created_at: Utc::now(),
    }
}

fn pageview(site_id: &str, session: &str, path: &str) -> NewEvent {
    NewEvent {
        site_id: site_id.to_string(),
        session_hash: session.to_string(),
        event_type: "pageview".to_string(),
        path: path.to_string(),
        referrer_domain: None,
        country: None,
        browser: "Firefox".to_string(),
        device_type: "desktop".to_string(),
        screen_bucket: None,
        timestamp: Utc::now(),
    }
}

#[tokio::test]
async fn test_reopen_keeps_data_and_migrations_are_idempotent() {
    let dir = TempDir::new().unwrap();
    let config = db_config(&dir);

    let storage = SeaOrmStorage::new(&config).await.unwrap();
    storage.create_site(&site("s1", "k1")).await.unwrap();
    storage.insert_event(&pageview("s1", "aaaa", "/")).await.unwrap();
    storage.close().await.unwrap();

    let reopened = SeaOrmStorage::new(&config).await.unwrap();
    assert_eq!(reopened.count_sites().await.unwrap(), 1);
    assert_eq!(reopened.count_pageviews("s1").await.unwrap(), 1);
    let found = reopened.find_site_by_api_key("k1").await.unwrap().unwrap();
    assert_eq!(found.id, "s1");
}

#[tokio::test]
async fn test_empty_path_is_config_error() {
    let config = DatabaseConfig {
        path: "  ".to_string(),
        ..DatabaseConfig::default()
    };
    let err = SeaOrmStorage::new(&config).await.err().unwrap();
    assert_eq!(err.code(), "E001");
}

#[tokio::test]
async fn test_api_key_is_unique() {
    let dir = TempDir::new().unwrap();
    let storage = SeaOrmStorage::new(&db_config(&dir)).await.unwrap();

    storage.create_site(&site("s1", "same")).await.unwrap();
    let err = storage.create_site(&site("s2", "same")).await.unwrap_err();
    assert_eq!(err.code(), "E003");
    assert_eq!(storage.count_sites().await.unwrap(), 1);
}

#[tokio::test]
async fn test_site_lookups() {
    let dir = TempDir::new().unwrap();
    let storage = SeaOrmStorage::new(&db_config(&dir)).await.unwrap();
    let s = site("s1", "k1");
    storage.create_site(&s).await.unwrap();

    assert!(storage.site_exists("s1").await.unwrap());
    assert!(!storage.site_exists("s2").await.unwrap());
    assert!(storage.find_site_by_api_key("nope").await.unwrap().is_none());

    let found = storage.find_site_by_api_key("k1").await.unwrap().unwrap();
    assert_eq!(found.name, s.name);
    assert_eq!(found.domain, s.domain);
}

#[tokio::test]
async fn test_concurrent_inserts_are_all_committed() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(SeaOrmStorage::new(&db_config(&dir)).await.unwrap());

    let mut handles = Vec::new();
    for i in 0..32 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            let session = format!("{:016x}", i % 4);
            storage
                .insert_event(&pageview("s1", &session, "/"))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(storage.count_pageviews("s1").await.unwrap(), 32);
    assert_eq!(storage.count_visitors("s1").await.unwrap(), 4);
}

#[tokio::test]
async fn test_pseudonym_rolls_over_at_utc_midnight() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(SeaOrmStorage::new(&db_config(&dir)).await.unwrap());
    let tracking = TrackingService::new(storage.clone(), TrackingConfig::default());

    let day_one = Utc.with_ymd_and_hms(2026, 10, 16, 23, 59, 0).unwrap();
    let day_two = day_one + Duration::minutes(2);

    for (ip, at) in [
        ("1.1.1.1", day_one),
        ("1.1.1.1", day_one),
        ("1.1.1.1", day_two),
        ("2.2.2.2", day_two),
    ] {
        let req = TrackRequest {
            site_id: Some("s1".to_string()),
            ..Default::default()
        };
        tracking.track(req, ip, None, at).await.unwrap();
    }

    // Same IP on two days counts twice
    assert_eq!(storage.count_visitors("s1").await.unwrap(), 3);

    let daily = storage
        .timeseries("s1", TimeseriesMetric::Visitors)
        .await
        .unwrap();
    let daily: Vec<(String, i64)> = daily.into_iter().map(|r| (r.day, r.count)).collect();
    assert_eq!(
        daily,
        vec![("2026-10-16".to_string(), 1), ("2026-10-17".to_string(), 2)]
    );

    let expected = session_pseudonym("1.1.1.1", "2026-10-16");
    assert_ne!(expected, session_pseudonym("1.1.1.1", "2026-10-17"));
}

#[tokio::test]
async fn test_top_pages_respects_limit() {
    let dir = TempDir::new().unwrap();
    let storage = SeaOrmStorage::new(&db_config(&dir)).await.unwrap();

    for i in 0..25 {
        let path = format!("/p{:02}", i);
        for _ in 0..=(i % 3) {
            storage
                .insert_event(&pageview("s1", "aaaa", &path))
                .await
                .unwrap();
        }
    }

    let pages = storage.top_pages("s1", 20).await.unwrap();
    assert_eq!(pages.len(), 20);
    assert!(pages.windows(2).all(|w| w[0].views >= w[1].views));
    assert_eq!(pages[0].views, 3);
}
