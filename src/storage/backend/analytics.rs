//! Aggregate queries over the events table
//!
//! Every query is scoped to a single site. Counts come back from SQLite as
//! i64 and are clamped to u64 by the service layer.

use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, sea_query::Expr,
};

use super::SeaOrmStorage;
use crate::errors::{PrivalyticsError, Result};
use crate::storage::{PAGEVIEW_EVENT, TimeseriesMetric};

use migration::entities::event;

const DISTINCT_SESSIONS: &str = "COUNT(DISTINCT session_hash)";
const EVENT_DAY: &str = "strftime('%Y-%m-%d', \"timestamp\")";

// ============ 查询结果类型 ============

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

/// 时间序列行
#[derive(Debug, FromQueryResult)]
pub struct DailyCountRow {
    pub day: String,
    pub count: i64,
}

/// 页面统计行
#[derive(Debug, FromQueryResult)]
pub struct PageRow {
    pub path: String,
    pub views: i64,
    pub visitors: i64,
}

/// 来源统计行
#[derive(Debug, FromQueryResult)]
pub struct ReferrerRow {
    pub referrer_domain: Option<String>,
    pub views: i64,
}

/// 设备统计行
#[derive(Debug, FromQueryResult)]
pub struct DeviceRow {
    pub device_type: String,
    pub browser: String,
    pub views: i64,
    pub visitors: i64,
}

fn query_failed(what: &str, e: sea_orm::DbErr) -> PrivalyticsError {
    PrivalyticsError::database_operation(format!("{} query failed: {}", what, e))
}

// ============ SeaOrmStorage Analytics 方法 ============

impl SeaOrmStorage {
    /// 站点的独立访客数（不同 session_hash 的数量）
    pub async fn count_visitors(&self, site_id: &str) -> Result<u64> {
        let row = event::Entity::find()
            .select_only()
            .column_as(Expr::cust(DISTINCT_SESSIONS), "count")
            .filter(event::Column::SiteId.eq(site_id))
            .into_model::<CountRow>()
            .one(&self.db)
            .await
            .map_err(|e| query_failed("Visitor count", e))?;

        Ok(row.map(|r| r.count.max(0) as u64).unwrap_or(0))
    }

    /// 站点的 pageview 数
    pub async fn count_pageviews(&self, site_id: &str) -> Result<u64> {
        event::Entity::find()
            .filter(event::Column::SiteId.eq(site_id))
            .filter(event::Column::EventType.eq(PAGEVIEW_EVENT))
            .count(&self.db)
            .await
            .map_err(|e| query_failed("Pageview count", e))
    }

    /// 按 UTC 日期分组的时间序列，日期升序
    pub async fn timeseries(
        &self,
        site_id: &str,
        metric: TimeseriesMetric,
    ) -> Result<Vec<DailyCountRow>> {
        let mut query = event::Entity::find()
            .select_only()
            .column_as(Expr::cust(EVENT_DAY), "day")
            .filter(event::Column::SiteId.eq(site_id));

        query = match metric {
            TimeseriesMetric::Views => query
                .column_as(event::Column::Id.count(), "count")
                .filter(event::Column::EventType.eq(PAGEVIEW_EVENT)),
            TimeseriesMetric::Visitors => query.column_as(Expr::cust(DISTINCT_SESSIONS), "count"),
        };

        query
            .group_by(Expr::cust(EVENT_DAY))
            .order_by_asc(Expr::cust("day"))
            .into_model::<DailyCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| query_failed("Timeseries", e))
    }

    /// 热门页面（仅 pageview），按浏览量降序，同浏览量按 path 降序
    pub async fn top_pages(&self, site_id: &str, limit: u64) -> Result<Vec<PageRow>> {
        event::Entity::find()
            .select_only()
            .column(event::Column::Path)
            .column_as(event::Column::Id.count(), "views")
            .column_as(Expr::cust(DISTINCT_SESSIONS), "visitors")
            .filter(event::Column::SiteId.eq(site_id))
            .filter(event::Column::EventType.eq(PAGEVIEW_EVENT))
            .group_by(event::Column::Path)
            .order_by_desc(Expr::cust("views"))
            .order_by_desc(event::Column::Path)
            .limit(limit)
            .into_model::<PageRow>()
            .all(&self.db)
            .await
            .map_err(|e| query_failed("Top pages", e))
    }

    /// 来源域名统计（忽略无来源的事件）
    pub async fn top_referrers(&self, site_id: &str, limit: u64) -> Result<Vec<ReferrerRow>> {
        event::Entity::find()
            .select_only()
            .column(event::Column::ReferrerDomain)
            .column_as(event::Column::Id.count(), "views")
            .filter(event::Column::SiteId.eq(site_id))
            .filter(event::Column::ReferrerDomain.is_not_null())
            .group_by(event::Column::ReferrerDomain)
            .order_by_desc(Expr::cust("views"))
            .order_by_asc(event::Column::ReferrerDomain)
            .limit(limit)
            .into_model::<ReferrerRow>()
            .all(&self.db)
            .await
            .map_err(|e| query_failed("Top referrers", e))
    }

    /// 设备 + 浏览器分布，按访客数降序
    pub async fn device_breakdown(&self, site_id: &str) -> Result<Vec<DeviceRow>> {
        event::Entity::find()
            .select_only()
            .column(event::Column::DeviceType)
            .column(event::Column::Browser)
            .column_as(event::Column::Id.count(), "views")
            .column_as(Expr::cust(DISTINCT_SESSIONS), "visitors")
            .filter(event::Column::SiteId.eq(site_id))
            .group_by(event::Column::DeviceType)
            .group_by(event::Column::Browser)
            .order_by_desc(Expr::cust("visitors"))
            .order_by_desc(Expr::cust("views"))
            .order_by_asc(event::Column::DeviceType)
            .order_by_asc(event::Column::Browser)
            .into_model::<DeviceRow>()
            .all(&self.db)
            .await
            .map_err(|e| query_failed("Device breakdown", e))
    }
}
