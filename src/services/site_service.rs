//! Site provisioning and API key resolution

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{PrivalyticsError, Result};
use crate::storage::{SeaOrmStorage, Site};

/// Registration payload. Both fields are required and must be non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterSiteRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

/// Returned once on registration
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegisteredSite {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub api_key: String,
}

impl From<Site> for RegisteredSite {
    fn from(site: Site) -> Self {
        Self {
            id: site.id,
            name: site.name,
            domain: site.domain,
            api_key: site.api_key,
        }
    }
}

pub struct SiteService {
    storage: Arc<SeaOrmStorage>,
}

impl SiteService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 注册站点，生成 UUID 与 API key
    pub async fn register(&self, req: RegisterSiteRequest) -> Result<RegisteredSite> {
        let (Some(name), Some(domain)) = (non_empty(req.name), non_empty(req.domain)) else {
            return Err(PrivalyticsError::validation("Name and domain required"));
        };

        let site = Site {
            id: Uuid::new_v4().to_string(),
            name,
            domain,
            api_key: generate_api_key(),
            created_at: Utc::now(),
        };

        self.storage.create_site(&site).await?;
        info!("New site {} for domain {}", site.id, site.domain);

        Ok(site.into())
    }

    /// 通过 API key 查找站点
    pub async fn authenticate(&self, api_key: &str) -> Result<Site> {
        match self.storage.find_site_by_api_key(api_key).await? {
            Some(site) => Ok(site),
            None => {
                debug!("Rejected unknown API key");
                Err(PrivalyticsError::unauthorized("Invalid API key"))
            }
        }
    }
}

/// 32 lowercase hex chars: a v4 UUID without dashes
pub fn generate_api_key() -> String {
    Uuid::new_v4().simple().to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_shape() {
        let key = generate_api_key();
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(key, generate_api_key());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("a".into())), Some("a".to_string()));
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
    }
}
