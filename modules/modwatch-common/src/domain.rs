use serde::{Deserialize, Serialize};
use url::Url;

/// A host name as stored and compared by the service (`example.com`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased, without a leading `www.` label. Every lookup and every
    /// stored row uses this form.
    pub fn canonical(&self) -> Domain {
        let lower = self.0.to_lowercase();
        let host = lower.strip_prefix("www.").unwrap_or(&lower);
        Domain(host.to_string())
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Domain {
    fn from(raw: &str) -> Self {
        normalize_domain(raw)
    }
}

/// Reduce user input to a host.
///
/// Full URLs (`https://www.example.com/some/path`) yield their host without a
/// leading `www.` label. Anything without a scheme marker is taken to be a
/// bare host already and returned as-is, and so is any URL that fails to
/// parse or has no host.
pub fn normalize_domain(raw: &str) -> Domain {
    if !raw.contains("://") {
        return Domain(raw.to_string());
    }

    let host = Url::parse(raw)
        .ok()
        .and_then(|url| url.host_str().map(str::to_lowercase));

    match host {
        Some(host) => {
            let host = host.strip_prefix("www.").unwrap_or(&host);
            Domain(host.to_string())
        }
        None => Domain(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_and_path() {
        assert_eq!(
            normalize_domain("https://example.com/test/test2").as_str(),
            "example.com"
        );
    }

    #[test]
    fn strips_www_label() {
        assert_eq!(
            normalize_domain("http://www.example.com").as_str(),
            "example.com"
        );
    }

    #[test]
    fn keeps_other_subdomains() {
        assert_eq!(
            normalize_domain("https://consent.google.com/test").as_str(),
            "consent.google.com"
        );
    }

    #[test]
    fn drops_port_and_query() {
        assert_eq!(
            normalize_domain("https://www.example.com:8443/a?b=c#d").as_str(),
            "example.com"
        );
    }

    #[test]
    fn lowercases_url_host() {
        assert_eq!(
            normalize_domain("HTTPS://WWW.Example.COM/Path").as_str(),
            "example.com"
        );
    }

    #[test]
    fn bare_host_is_unchanged() {
        assert_eq!(normalize_domain("example.com").as_str(), "example.com");
        assert_eq!(normalize_domain("www.example.com").as_str(), "www.example.com");
    }

    #[test]
    fn malformed_url_falls_back_to_input() {
        assert_eq!(normalize_domain("https://").as_str(), "https://");
        assert_eq!(normalize_domain("http://exa mple.com").as_str(), "http://exa mple.com");
    }

    #[test]
    fn hostless_url_falls_back_to_input() {
        assert_eq!(normalize_domain("file:///etc/hosts").as_str(), "file:///etc/hosts");
    }

    #[test]
    fn canonical_form_folds_case_and_www() {
        assert_eq!(normalize_domain("www.Listed.Example").canonical().as_str(), "listed.example");
        assert_eq!(normalize_domain("Dup.Example").canonical().as_str(), "dup.example");
        assert_eq!(normalize_domain("wwwsite.example").canonical().as_str(), "wwwsite.example");
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let once = normalize_domain("https://www.example.com/x");
        let twice = normalize_domain(once.as_str());
        assert_eq!(once, twice);
    }
}
