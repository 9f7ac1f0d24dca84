//! Point lookups for SeaOrmStorage

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use super::SeaOrmStorage;
use super::converters::model_to_site;
use crate::errors::{PrivalyticsError, Result};
use crate::storage::Site;

use migration::entities::site;

impl SeaOrmStorage {
    /// Resolve an API key through the unique `api_key` index.
    pub async fn find_site_by_api_key(&self, api_key: &str) -> Result<Option<Site>> {
        let model = site::Entity::find()
            .filter(site::Column::ApiKey.eq(api_key))
            .one(&self.db)
            .await
            .map_err(|e| {
                PrivalyticsError::database_operation(format!("Failed to look up API key: {}", e))
            })?;

        Ok(model.map(model_to_site))
    }

    pub async fn site_exists(&self, site_id: &str) -> Result<bool> {
        let count = site::Entity::find_by_id(site_id.to_string())
            .count(&self.db)
            .await
            .map_err(|e| {
                PrivalyticsError::database_operation(format!("Failed to look up site: {}", e))
            })?;

        Ok(count > 0)
    }

    pub async fn count_sites(&self) -> Result<u64> {
        site::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| PrivalyticsError::database_operation(format!("Failed to count sites: {}", e)))
    }
}
