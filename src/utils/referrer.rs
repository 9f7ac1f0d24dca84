use url::Url;

/// 提取来源 URL 的域名，去掉开头的 `www.`
///
/// Not public-suffix aware: `blog.example.com` stays as-is. Missing, empty,
/// relative or host-less input yields `None`.
pub fn extract_registrable_domain(referrer: Option<&str>) -> Option<String> {
    let raw = referrer?.trim();
    if raw.is_empty() {
        return None;
    }

    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?;
    if host.is_empty() {
        return None;
    }

    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_www() {
        assert_eq!(
            extract_registrable_domain(Some("https://www.news.example/story")),
            Some("news.example".to_string())
        );
        assert_eq!(
            extract_registrable_domain(Some("https://www.google.com/search?q=x")),
            Some("google.com".to_string())
        );
    }

    #[test]
    fn test_keeps_other_subdomains() {
        assert_eq!(
            extract_registrable_domain(Some("https://blog.example.com/post")),
            Some("blog.example.com".to_string())
        );
        assert_eq!(
            extract_registrable_domain(Some("http://cdn.www.example.com/")),
            Some("cdn.www.example.com".to_string())
        );
    }

    #[test]
    fn test_host_is_lowercased_and_port_dropped() {
        assert_eq!(
            extract_registrable_domain(Some("HTTPS://WWW.Example.COM:8443/x")),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_rejects_unusable_input() {
        assert_eq!(extract_registrable_domain(None), None);
        assert_eq!(extract_registrable_domain(Some("")), None);
        assert_eq!(extract_registrable_domain(Some("not a url")), None);
        assert_eq!(extract_registrable_domain(Some("/relative/path")), None);
        assert_eq!(extract_registrable_domain(Some("mailto:someone@example.com")), None);
    }
}
