pub mod backend;
pub mod models;

pub use backend::{DailyCountRow, DeviceRow, PageRow, ReferrerRow, SeaOrmStorage};
pub use models::{NewEvent, Site, TimeseriesMetric};

/// Only `event_type` value counted as a view
pub const PAGEVIEW_EVENT: &str = "pageview";
