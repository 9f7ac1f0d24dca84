//! Business logic shared by the HTTP handlers and the auth middleware

pub mod analytics_service;
pub mod site_service;
pub mod tracking_service;

pub use analytics_service::{
    AnalyticsService, DeviceStats, PageStats, ReferrerStats, StatsSummary, TimeseriesPoint,
};
pub use site_service::{RegisterSiteRequest, RegisteredSite, SiteService};
pub use tracking_service::{TrackRequest, TrackingService};
