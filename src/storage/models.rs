use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered site. `api_key` is the bearer credential for the stats API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

/// A fully derived event, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub site_id: String,
    pub session_hash: String,
    pub event_type: String,
    pub path: String,
    pub referrer_domain: Option<String>,
    pub country: Option<String>,
    pub browser: String,
    pub device_type: String,
    pub screen_bucket: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// 时间序列统计口径
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeseriesMetric {
    /// Distinct session pseudonyms per day, across all event types
    #[default]
    Visitors,
    /// Pageview rows per day
    Views,
}

impl TimeseriesMetric {
    /// `"views"` selects pageview counts; anything else (or nothing) counts visitors.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("views") => Self::Views,
            _ => Self::Visitors,
        }
    }
}
