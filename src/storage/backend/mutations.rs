//! Write operations for SeaOrmStorage
//!
//! Every write takes the write gate and commits in its own transaction.

use sea_orm::{EntityTrait, TransactionTrait};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{new_event_to_active_model, site_to_active_model};
use crate::errors::{PrivalyticsError, Result};
use crate::storage::{NewEvent, Site};

use migration::entities::{event, site};

impl SeaOrmStorage {
    pub async fn create_site(&self, new_site: &Site) -> Result<()> {
        let _guard = self.write_gate.lock().await;

        let txn = self.db.begin().await.map_err(|e| {
            PrivalyticsError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        site::Entity::insert(site_to_active_model(new_site))
            .exec(&txn)
            .await
            .map_err(|e| PrivalyticsError::database_operation(format!("Failed to insert site: {}", e)))?;

        txn.commit().await.map_err(|e| {
            PrivalyticsError::database_operation(format!("Failed to commit transaction: {}", e))
        })?;

        info!("Site registered: {} ({})", new_site.id, new_site.domain);
        Ok(())
    }

    pub async fn insert_event(&self, new_event: &NewEvent) -> Result<()> {
        let _guard = self.write_gate.lock().await;

        let txn = self.db.begin().await.map_err(|e| {
            PrivalyticsError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        event::Entity::insert(new_event_to_active_model(new_event))
            .exec(&txn)
            .await
            .map_err(|e| {
                PrivalyticsError::database_operation(format!("Failed to insert event: {}", e))
            })?;

        txn.commit().await.map_err(|e| {
            PrivalyticsError::database_operation(format!("Failed to commit transaction: {}", e))
        })?;

        debug!(
            "Event stored: site={} type={} path={}",
            new_event.site_id, new_event.event_type, new_event.path
        );
        Ok(())
    }
}
