//! Analytics service layer
//!
//! Site-scoped aggregates over stored events. The API layer only ever sees
//! the response types defined here.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::storage::{SeaOrmStorage, TimeseriesMetric};

/// 热门页面 / 来源的返回上限
pub const TOP_LIMIT: u64 = 20;

// ============ 公共类型定义 ============

/// 站点总览
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StatsSummary {
    pub visitors: u64,
    pub views: u64,
}

/// 时间序列数据点
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimeseriesPoint {
    pub date: String,
    pub count: u64,
}

/// 页面统计
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageStats {
    pub path: String,
    pub views: u64,
    pub visitors: u64,
}

/// 来源统计
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReferrerStats {
    pub domain: String,
    pub views: u64,
}

/// 设备统计
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeviceStats {
    pub device: String,
    pub browser: String,
    pub views: u64,
    pub visitors: u64,
}

fn to_count(value: i64) -> u64 {
    value.max(0) as u64
}

pub struct AnalyticsService {
    storage: Arc<SeaOrmStorage>,
}

impl AnalyticsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn summary(&self, site_id: &str) -> Result<StatsSummary> {
        let visitors = self.storage.count_visitors(site_id).await?;
        let views = self.storage.count_pageviews(site_id).await?;
        Ok(StatsSummary { visitors, views })
    }

    /// 按 UTC 日期的时间序列
    ///
    /// `start` and `end` are accepted but not applied yet; the full history
    /// is always returned.
    pub async fn timeseries(
        &self,
        site_id: &str,
        start: Option<&str>,
        end: Option<&str>,
        metric: TimeseriesMetric,
    ) -> Result<Vec<TimeseriesPoint>> {
        if start.is_some() || end.is_some() {
            debug!(
                "Timeseries range ignored: start={:?} end={:?}",
                start, end
            );
        }

        let rows = self.storage.timeseries(site_id, metric).await?;
        Ok(rows
            .into_iter()
            .map(|r| TimeseriesPoint {
                date: r.day,
                count: to_count(r.count),
            })
            .collect())
    }

    pub async fn top_pages(&self, site_id: &str) -> Result<Vec<PageStats>> {
        let rows = self.storage.top_pages(site_id, TOP_LIMIT).await?;
        Ok(rows
            .into_iter()
            .map(|r| PageStats {
                path: r.path,
                views: to_count(r.views),
                visitors: to_count(r.visitors),
            })
            .collect())
    }

    pub async fn top_referrers(&self, site_id: &str) -> Result<Vec<ReferrerStats>> {
        let rows = self.storage.top_referrers(site_id, TOP_LIMIT).await?;
        Ok(rows
            .into_iter()
            .filter_map(|r| {
                r.referrer_domain.map(|domain| ReferrerStats {
                    domain,
                    views: to_count(r.views),
                })
            })
            .collect())
    }

    pub async fn devices(&self, site_id: &str) -> Result<Vec<DeviceStats>> {
        let rows = self.storage.device_breakdown(site_id).await?;
        Ok(rows
            .into_iter()
            .map(|r| DeviceStats {
                device: r.device_type,
                browser: r.browser,
                views: to_count(r.views),
                visitors: to_count(r.visitors),
            })
            .collect())
    }
}
