//! Event ingestion
//!
//! Turns a raw beacon plus request context into a stored event: session
//! pseudonym from IP and UTC date, UA classification, referrer domain.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::TrackingConfig;
use crate::errors::{PrivalyticsError, Result};
use crate::storage::{NewEvent, PAGEVIEW_EVENT, SeaOrmStorage};
use crate::utils::{
    classify_user_agent, date_string, extract_registrable_domain, session_pseudonym,
};

/// Beacon payload as sent by the tracking snippet
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackRequest {
    /// Numbers are kept as their decimal text; other non-string values
    /// count as missing.
    #[serde(rename = "siteId", default, deserialize_with = "lenient_site_id")]
    pub site_id: Option<String>,
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub referrer: Option<String>,
}

fn lenient_site_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub struct TrackingService {
    storage: Arc<SeaOrmStorage>,
    config: TrackingConfig,
}

impl TrackingService {
    pub fn new(storage: Arc<SeaOrmStorage>, config: TrackingConfig) -> Self {
        Self { storage, config }
    }

    /// 记录一个事件
    ///
    /// `now` is both the stored timestamp and the day used for the pseudonym.
    pub async fn track(
        &self,
        req: TrackRequest,
        client_ip: &str,
        user_agent: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let event = build_event(req, client_ip, user_agent, now)?;

        if self.config.verify_site && !self.storage.site_exists(&event.site_id).await? {
            warn!("Event for unknown site {} rejected", event.site_id);
            return Err(PrivalyticsError::not_found("Site not found"));
        }

        self.storage.insert_event(&event).await
    }
}

fn build_event(
    req: TrackRequest,
    client_ip: &str,
    user_agent: Option<&str>,
    now: DateTime<Utc>,
) -> Result<NewEvent> {
    let site_id = req
        .site_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| PrivalyticsError::validation("Site ID required"))?;

    let client = classify_user_agent(user_agent);
    let session_hash = session_pseudonym(client_ip, &date_string(now));
    let referrer_domain = extract_registrable_domain(req.referrer.as_deref());

    debug!(
        "Track: site={} browser={} device={} referrer={:?}",
        site_id, client.browser, client.device_type, referrer_domain
    );

    Ok(NewEvent {
        site_id,
        session_hash,
        event_type: req.event_type.unwrap_or_else(|| PAGEVIEW_EVENT.to_string()),
        path: req.path.unwrap_or_else(|| "/".to_string()),
        referrer_domain,
        country: None,
        browser: client.browser.to_string(),
        device_type: client.device_type.to_string(),
        screen_bucket: None,
        timestamp: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_track_request_field_names() {
        let req: TrackRequest = serde_json::from_str(
            r#"{"siteId":"s1","type":"signup","path":"/join","referrer":"https://x.io/"}"#,
        )
        .unwrap();
        assert_eq!(req.site_id.as_deref(), Some("s1"));
        assert_eq!(req.event_type.as_deref(), Some("signup"));
        assert_eq!(req.path.as_deref(), Some("/join"));
        assert_eq!(req.referrer.as_deref(), Some("https://x.io/"));
    }

    #[test]
    fn test_track_request_site_id_types() {
        let req: TrackRequest = serde_json::from_str(r#"{"siteId":42}"#).unwrap();
        assert_eq!(req.site_id.as_deref(), Some("42"));

        for body in [
            r#"{"siteId":true}"#,
            r#"{"siteId":null}"#,
            r#"{"siteId":{"id":"s1"}}"#,
            r#"{"siteId":["s1"]}"#,
        ] {
            let req: TrackRequest = serde_json::from_str(body).unwrap();
            assert_eq!(req.site_id, None, "{}", body);
            assert_eq!(
                build_event(req, "203.0.113.7", None, Utc::now())
                    .unwrap_err()
                    .message(),
                "Site ID required"
            );
        }
    }

    #[test]
    fn test_build_event_defaults() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap();
        let req = TrackRequest {
            site_id: Some("s1".into()),
            ..Default::default()
        };
        let event = build_event(req, "203.0.113.7", None, now).unwrap();

        assert_eq!(event.event_type, "pageview");
        assert_eq!(event.path, "/");
        assert_eq!(event.referrer_domain, None);
        assert_eq!(event.browser, "Unknown");
        assert_eq!(event.device_type, "desktop");
        assert_eq!(event.session_hash, session_pseudonym("203.0.113.7", "2026-10-17"));
        assert!(event.country.is_none() && event.screen_bucket.is_none());
        assert_eq!(event.timestamp, now);
    }

    #[test]
    fn test_build_event_requires_site_id() {
        let now = Utc::now();
        for site_id in [None, Some(String::new())] {
            let req = TrackRequest {
                site_id,
                ..Default::default()
            };
            let err = build_event(req, "1.2.3.4", None, now).unwrap_err();
            assert_eq!(err.message(), "Site ID required");
        }
    }

    #[test]
    fn test_build_event_keeps_explicit_fields() {
        let req = TrackRequest {
            site_id: Some("s1".into()),
            event_type: Some("signup".into()),
            path: Some("/pricing".into()),
            referrer: Some("https://www.news.example/story".into()),
        };
        let event = build_event(req, "1.2.3.4", Some("Firefox/120"), Utc::now()).unwrap();
        assert_eq!(event.event_type, "signup");
        assert_eq!(event.path, "/pricing");
        assert_eq!(event.referrer_domain.as_deref(), Some("news.example"));
        assert_eq!(event.browser, "Firefox");
    }
}
