use std::collections::HashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

const WINDOW: Duration = Duration::from_secs(3600);

/// Prune idle IPs once the map grows past this many entries.
const PRUNE_THRESHOLD: usize = 1000;

/// Per-IP sliding one-hour window over submissions.
pub struct RateLimiter {
    max_per_hour: usize,
    entries: Mutex<HashMap<IpAddr, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_per_hour: usize) -> Self {
        Self {
            max_per_hour,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record a submission from `ip`. Returns false if it is over the limit.
    pub async fn allow(&self, ip: IpAddr) -> bool {
        let mut limiter = self.entries.lock().await;
        if limiter.len() > PRUNE_THRESHOLD {
            prune_empty_entries(&mut limiter, Instant::now());
        }
        let entries = limiter.entry(ip).or_default();
        check_rate_limit(entries, Instant::now(), self.max_per_hour)
    }

    pub fn max_per_hour(&self) -> usize {
        self.max_per_hour
    }
}

/// Returns true if the request is allowed. Prunes expired entries and records
/// the new request if allowed.
pub fn check_rate_limit(entries: &mut Vec<Instant>, now: Instant, max_per_hour: usize) -> bool {
    let cutoff = now.checked_sub(WINDOW);
    entries.retain(|t| cutoff.map_or(true, |c| *t > c));
    if entries.len() >= max_per_hour {
        return false;
    }
    entries.push(now);
    true
}

fn prune_empty_entries(limiter: &mut HashMap<IpAddr, Vec<Instant>>, now: Instant) {
    let cutoff = now.checked_sub(WINDOW);
    limiter.retain(|_, entries| {
        entries.retain(|t| cutoff.map_or(true, |c| *t > c));
        !entries.is_empty()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_limit() {
        let mut entries = Vec::new();
        let now = Instant::now();
        for _ in 0..10 {
            assert!(check_rate_limit(&mut entries, now, 10));
        }
        assert!(!check_rate_limit(&mut entries, now, 10));
        assert_eq!(entries.len(), 10);
    }

    #[test]
    fn old_entries_expire() {
        let now = Instant::now() + WINDOW + Duration::from_secs(10);
        let old = now - WINDOW - Duration::from_secs(1);
        let mut entries = vec![old; 10];
        assert!(check_rate_limit(&mut entries, now, 10));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn prune_drops_idle_ips() {
        let now = Instant::now() + WINDOW + Duration::from_secs(10);
        let mut limiter = HashMap::new();
        limiter.insert(IpAddr::from([10, 0, 0, 1]), vec![now - WINDOW - Duration::from_secs(1)]);
        limiter.insert(IpAddr::from([10, 0, 0, 2]), vec![now]);
        prune_empty_entries(&mut limiter, now);
        assert_eq!(limiter.len(), 1);
        assert!(limiter.contains_key(&IpAddr::from([10, 0, 0, 2])));
    }

    #[tokio::test]
    async fn limits_each_ip_separately() {
        let limiter = RateLimiter::new(1);
        let a = IpAddr::from([192, 0, 2, 1]);
        let b = IpAddr::from([192, 0, 2, 2]);
        assert!(limiter.allow(a).await);
        assert!(!limiter.allow(a).await);
        assert!(limiter.allow(b).await);
    }
}
