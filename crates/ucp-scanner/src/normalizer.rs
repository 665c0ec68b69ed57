//! Turns arbitrary user input into the bare origin every probe is anchored to.

use crate::error::NormalizationError;
use serde::Serialize;
use ucp_core::Jurisdiction;
use url::Url;

/// Canonical scan target derived once from raw user input.
///
/// `origin_url` is `scheme://host[:port]` with no path, query, fragment or
/// trailing slash. Values are only produced by [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTarget {
    raw_input: String,
    origin_url: String,
    hostname: String,
    top_level_label: String,
    jurisdiction: Jurisdiction,
}

impl NormalizedTarget {
    #[must_use]
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    #[must_use]
    pub fn origin_url(&self) -> &str {
        &self.origin_url
    }

    /// Hostname as written by the caller, case preserved, without port or userinfo.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Last dot-separated label of the hostname, lower-cased.
    #[must_use]
    pub fn top_level_label(&self) -> &str {
        &self.top_level_label
    }

    #[must_use]
    pub fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction
    }
}

/// Normalize raw input into a [`NormalizedTarget`].
///
/// Input without an `http://` or `https://` prefix is treated as `https://`.
/// Any path, query or fragment is discarded. Failure never substitutes a
/// default host.
pub fn normalize(input: &str) -> Result<NormalizedTarget, NormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NormalizationError::EmptyInput {
            raw: input.to_string(),
        });
    }

    let malformed = |reason: String| NormalizationError::MalformedUrl {
        raw: input.to_string(),
        reason,
    };

    // The URL parser drops ASCII tab and newline anywhere in the input.
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();
    let with_scheme = if has_http_scheme(&cleaned) {
        cleaned
    } else {
        format!("https://{cleaned}")
    };

    let parsed = Url::parse(&with_scheme).map_err(|e| malformed(e.to_string()))?;
    let parsed_host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(malformed("no hostname".to_string())),
    };

    let authority = raw_authority(&with_scheme);
    let hostname = host_of(authority);
    if hostname.is_empty() {
        return Err(malformed("no hostname".to_string()));
    }
    if authority[hostname.len()..] == *":" {
        return Err(malformed("empty port".to_string()));
    }
    // Internationalized names are probed in their punycode form, anything
    // else must reach the probes exactly as written.
    let idn = !hostname.is_ascii() && !hostname.contains('%');
    if !idn && !hostname.eq_ignore_ascii_case(parsed_host) {
        return Err(malformed(format!(
            "hostname '{hostname}' does not match parsed host '{parsed_host}'"
        )));
    }

    let origin_url = format!("{}://{}", parsed.scheme(), authority);
    Url::parse(&origin_url).map_err(|e| malformed(format!("origin '{origin_url}': {e}")))?;

    let top_level_label = hostname
        .rsplit_once('.')
        .map_or(hostname, |(_, last)| last)
        .to_ascii_lowercase();
    let jurisdiction = Jurisdiction::from_top_level_label(&top_level_label);

    tracing::debug!(
        origin = %origin_url,
        tld = %top_level_label,
        "Normalized scan target"
    );

    Ok(NormalizedTarget {
        raw_input: trimmed.to_string(),
        origin_url,
        hostname: hostname.to_string(),
        top_level_label,
        jurisdiction,
    })
}

fn has_http_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// The authority exactly as written, minus any userinfo.
fn raw_authority(url: &str) -> &str {
    let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let end = after_scheme
        .find(['/', '?', '#', '\\'])
        .unwrap_or(after_scheme.len());
    let authority = &after_scheme[..end];
    authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port)
}

fn host_of(authority: &str) -> &str {
    if authority.starts_with('[') {
        return authority
            .find(']')
            .map_or(authority, |end| &authority[..=end]);
    }
    authority
        .split_once(':')
        .map_or(authority, |(host, _)| host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_https_when_scheme_missing() {
        let target = normalize("example.com").expect("normalize bare host");
        assert_eq!(target.origin_url(), "https://example.com");
        assert_eq!(target.hostname(), "example.com");
        assert_eq!(target.top_level_label(), "com");
        assert_eq!(target.jurisdiction(), Jurisdiction::Other);
    }

    #[test]
    fn test_keeps_http_scheme() {
        let target = normalize("http://example.org").expect("normalize http url");
        assert_eq!(target.origin_url(), "http://example.org");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            normalize(""),
            Err(NormalizationError::EmptyInput { .. })
        ));
        let err = normalize("   ").expect_err("whitespace only");
        assert!(matches!(err, NormalizationError::EmptyInput { .. }));
        assert_eq!(err.raw(), "   ");
    }

    #[test]
    fn test_discards_path_query_fragment() {
        let target = normalize("https://Example.COM/path?x=1").expect("normalize with path");
        assert_eq!(target.origin_url(), "https://Example.COM");
        assert_eq!(target.hostname(), "Example.COM");
        assert_eq!(target.top_level_label(), "com");

        let target = normalize("  example.com/a/b#frag  ").expect("normalize with fragment");
        assert_eq!(target.origin_url(), "https://example.com");
        assert_eq!(target.raw_input(), "example.com/a/b#frag");
    }

    #[test]
    fn test_keeps_port_drops_userinfo() {
        let target = normalize("http://user:pw@localhost:8080/x").expect("normalize with port");
        assert_eq!(target.origin_url(), "http://localhost:8080");
        assert_eq!(target.hostname(), "localhost");
        assert_eq!(target.top_level_label(), "localhost");
    }

    #[test]
    fn test_ipv6_host() {
        let target = normalize("http://[::1]:3000/").expect("normalize ipv6");
        assert_eq!(target.origin_url(), "http://[::1]:3000");
        assert_eq!(target.hostname(), "[::1]");
    }

    #[test]
    fn test_jurisdiction_guess() {
        assert_eq!(
            normalize("site.us").expect("normalize").jurisdiction(),
            Jurisdiction::Us
        );
        assert_eq!(
            normalize("shop.example.US").expect("normalize").jurisdiction(),
            Jurisdiction::Us
        );
        assert_eq!(
            normalize("site.com").expect("normalize").jurisdiction(),
            Jurisdiction::Other
        );
        assert_eq!(
            normalize("us").expect("normalize").jurisdiction(),
            Jurisdiction::Us
        );
        assert_eq!(
            normalize("site.usa").expect("normalize").jurisdiction(),
            Jurisdiction::Other
        );
    }

    #[test]
    fn test_scheme_prefix_is_case_insensitive() {
        let target = normalize("HTTPS://example.com").expect("normalize upper-case scheme");
        assert_eq!(target.origin_url(), "https://example.com");
    }

    #[test]
    fn test_malformed_input() {
        for input in ["http://", "https://:80", "exa mple.com", "https://exa mple.com/x"] {
            let err = normalize(input).expect_err(input);
            assert!(
                matches!(err, NormalizationError::MalformedUrl { .. }),
                "expected MalformedUrl for {input:?}, got {err:?}"
            );
            assert_eq!(err.raw(), input);
        }
    }

    #[test]
    fn test_control_characters_are_dropped_before_splitting() {
        let target = normalize("exa\tmple.com").expect("normalize with tab");
        assert_eq!(target.origin_url(), "https://example.com");
        assert_eq!(target.hostname(), "example.com");

        let target = normalize("https://user@exa\nmple.us/x").expect("normalize with newline");
        assert_eq!(target.origin_url(), "https://example.us");
        assert_eq!(target.jurisdiction(), Jurisdiction::Us);
    }

    #[test]
    fn test_host_must_match_what_gets_requested() {
        for input in ["http:/example.com", "https://%65xample.com", "https://%65xample.com/x"] {
            let err = normalize(input).expect_err(input);
            assert!(
                matches!(err, NormalizationError::MalformedUrl { .. }),
                "expected MalformedUrl for {input:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_empty_port_rejected() {
        let err = normalize("example.com:/path").expect_err("empty port");
        assert!(matches!(err, NormalizationError::MalformedUrl { .. }));
    }

    #[test]
    fn test_internationalized_hostname_kept_as_written() {
        let target = normalize("bücher.de").expect("normalize idn");
        assert_eq!(target.origin_url(), "https://bücher.de");
        assert_eq!(target.hostname(), "bücher.de");
        assert_eq!(target.top_level_label(), "de");
    }

    #[test]
    fn test_origin_has_no_trailing_slash() {
        for input in ["example.com/", "https://example.com/", "example.com:8443/"] {
            let target = normalize(input).expect(input);
            assert!(!target.origin_url().ends_with('/'), "{input}");
            assert!(Url::parse(target.origin_url()).is_ok());
        }
    }
}
