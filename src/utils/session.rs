//! Daily session pseudonyms
//!
//! A visitor is approximated by `SHA-256(ip ":" date)`, truncated. The same
//! IP on the same UTC day maps to the same pseudonym; nothing else is kept.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// 伪名长度（十六进制字符）
pub const PSEUDONYM_LEN: usize = 16;

/// 由 IP 与 UTC 日期生成会话伪名
pub fn session_pseudonym(ip: &str, date: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hasher.update(b":");
    hasher.update(date.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..PSEUDONYM_LEN].to_string()
}

/// 今天的 UTC 日期，`YYYY-MM-DD`
pub fn current_date_string() -> String {
    date_string(Utc::now())
}

pub fn date_string(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pseudonym_is_stable() {
        let a = session_pseudonym("203.0.113.7", "2026-10-17");
        let b = session_pseudonym("203.0.113.7", "2026-10-17");
        assert_eq!(a, b);
        assert_eq!(a.len(), PSEUDONYM_LEN);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_pseudonym_matches_sha256_prefix() {
        let mut hasher = Sha256::new();
        hasher.update("1.2.3.4:2024-01-01".as_bytes());
        let full = format!("{:x}", hasher.finalize());
        assert_eq!(session_pseudonym("1.2.3.4", "2024-01-01"), full[..16]);
    }

    #[test]
    fn test_pseudonym_changes_with_ip_and_day() {
        let base = session_pseudonym("203.0.113.7", "2026-10-17");
        assert_ne!(base, session_pseudonym("203.0.113.8", "2026-10-17"));
        assert_ne!(base, session_pseudonym("203.0.113.7", "2026-10-18"));
    }

    #[test]
    fn test_date_string() {
        let at = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();
        assert_eq!(date_string(at), "2024-02-29");
        assert_eq!(current_date_string().len(), 10);
    }
}
