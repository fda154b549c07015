//! Path rewriting from the gateway namespace to the upstream namespace.
//!
//! # Responsibilities
//! - Strip the mount prefix from the inbound path
//! - Apply the trailing-slash exceptions
//! - Join base URL, rewritten path and the untouched query string

use crate::routing::trailing_slash::normalize_trailing_slash;

/// Path and query bound for the upstream, before being joined with the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    pub path: String,
    pub query: Option<String>,
}

impl UpstreamTarget {
    /// Rewrite an inbound path (and raw query) mounted under `prefix`.
    ///
    /// Returns `None` when the path does not live under the prefix. The prefix
    /// must be followed by `/` or by nothing at all, so `/proxyfoo` never matches
    /// `/proxy`.
    pub fn from_inbound(prefix: &str, path: &str, query: Option<&str>) -> Option<Self> {
        let rest = path.strip_prefix(prefix)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }

        Some(Self {
            path: normalize_trailing_slash(rest),
            query: query.map(str::to_string),
        })
    }

    /// `base + path + ("?" + query)`.
    pub fn url(&self, base: &str) -> String {
        match &self.query {
            Some(q) => format!("{}{}?{}", base, self.path, q),
            None => format!("{}{}", base, self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.example.org/api/v1";

    #[test]
    fn test_strips_prefix_verbatim() {
        let target = UpstreamTarget::from_inbound("/proxy", "/proxy/admin/extensionists/", Some("page=2&name=Ana%20Maria"))
            .unwrap();
        assert_eq!(target.path, "/admin/extensionists/");
        assert_eq!(
            target.url(BASE),
            "https://api.example.org/api/v1/admin/extensionists/?page=2&name=Ana%20Maria"
        );
    }

    #[test]
    fn test_summary_gets_slash_and_keeps_query() {
        let target = UpstreamTarget::from_inbound("/proxy", "/proxy/extensionists/42/summary", Some("x=1")).unwrap();
        assert_eq!(target.url(BASE), format!("{}/extensionists/42/summary/?x=1", BASE));
    }

    #[test]
    fn test_no_query_means_no_question_mark() {
        let target = UpstreamTarget::from_inbound("/proxy", "/proxy/admin/login", None).unwrap();
        assert_eq!(target.url(BASE), format!("{}/admin/login", BASE));
    }

    #[test]
    fn test_empty_query_is_preserved() {
        let target = UpstreamTarget::from_inbound("/proxy", "/proxy/admin/login", Some("")).unwrap();
        assert_eq!(target.url(BASE), format!("{}/admin/login?", BASE));
    }

    #[test]
    fn test_prefix_alone_maps_to_base() {
        let target = UpstreamTarget::from_inbound("/proxy", "/proxy", None).unwrap();
        assert_eq!(target.path, "");
        assert_eq!(target.url(BASE), BASE);
    }

    #[test]
    fn test_foreign_paths_rejected() {
        assert!(UpstreamTarget::from_inbound("/proxy", "/proxyfoo/admin", None).is_none());
        assert!(UpstreamTarget::from_inbound("/proxy", "/status", None).is_none());
    }
}
