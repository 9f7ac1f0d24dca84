//! Coarse user-agent classification
//!
//! Substring rules, first match wins. Order matters: Chrome UAs also contain
//! `Safari`, and Edge UAs contain both `Chrome` and `Safari`, so Edge traffic
//! is reported as Chrome.

pub const UNKNOWN_BROWSER: &str = "Unknown";
pub const DESKTOP: &str = "desktop";

const DEVICE_RULES: &[(&[&str], &str)] = &[
    (&["Mobile", "Android"], "mobile"),
    (&["Tablet", "iPad"], "tablet"),
];

const BROWSER_RULES: &[(&str, &str)] = &[
    ("Firefox", "Firefox"),
    ("Chrome", "Chrome"),
    ("Safari", "Safari"),
    ("Edge", "Edge"),
];

/// Browser family and device class of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientKind {
    pub browser: &'static str,
    pub device_type: &'static str,
}

impl Default for ClientKind {
    fn default() -> Self {
        Self {
            browser: UNKNOWN_BROWSER,
            device_type: DESKTOP,
        }
    }
}

/// 解析 User-Agent，缺失时返回 (Unknown, desktop)
pub fn classify_user_agent(user_agent: Option<&str>) -> ClientKind {
    let Some(ua) = user_agent else {
        return ClientKind::default();
    };

    let device_type = DEVICE_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| ua.contains(n)))
        .map(|(_, device)| *device)
        .unwrap_or(DESKTOP);

    let browser = BROWSER_RULES
        .iter()
        .find(|(needle, _)| ua.contains(needle))
        .map(|(_, browser)| *browser)
        .unwrap_or(UNKNOWN_BROWSER);

    ClientKind {
        browser,
        device_type,
    }
}
