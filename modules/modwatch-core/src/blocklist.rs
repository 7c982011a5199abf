use std::collections::HashSet;

use modwatch_common::Domain;

/// The published blocklist as a set of hosts.
///
/// Membership is exact: `site.com` does not match `notsite.com` or
/// `sub.site.com`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocklist {
    domains: HashSet<String>,
}

impl Blocklist {
    /// Parse the plain-text list. Entries are separated by newlines or commas;
    /// blank entries and `#` comments are skipped; hosts-file lines
    /// (`0.0.0.0 example.com`) contribute their last field.
    pub fn parse(text: &str) -> Self {
        let domains = text
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default())
            .flat_map(|line| line.split(','))
            .filter_map(|entry| {
                let host = entry.split_whitespace().last()?;
                let host = host.trim_end_matches('.').to_lowercase();
                let host = host.strip_prefix("www.").map(String::from).unwrap_or(host);
                (!host.is_empty()).then_some(host)
            })
            .collect();
        Self { domains }
    }

    pub fn contains(&self, domain: &Domain) -> bool {
        self.domains.contains(domain.canonical().as_str())
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Blocklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let text = iter
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self::parse(&text)
    }
}
