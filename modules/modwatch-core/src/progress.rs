use serde::Serialize;

use crate::records::Records;

/// Review progress over the `reports` collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub reviewed: usize,
    pub total: usize,
    pub percent: u8,
}

impl Progress {
    /// Truncated integer percentage; an empty collection is 0%.
    pub fn new(reviewed: usize, total: usize) -> Self {
        let reviewed = reviewed.min(total);
        let percent = if total == 0 {
            0
        } else {
            (reviewed as u128 * 100 / total as u128) as u8
        };
        Self {
            reviewed,
            total,
            percent,
        }
    }

    pub async fn load(records: &Records) -> anyhow::Result<Self> {
        let total = records.count_reports().await?;
        let reviewed = records.count_reviewed_reports().await?;
        Ok(Self::new(reviewed, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_percent() {
        assert_eq!(Progress::new(3, 10).percent, 30);
    }

    #[test]
    fn empty_is_zero() {
        let p = Progress::new(0, 0);
        assert_eq!(p.percent, 0);
        assert_eq!(p.total, 0);
    }

    #[test]
    fn truncates() {
        assert_eq!(Progress::new(1, 3).percent, 33);
        assert_eq!(Progress::new(2, 3).percent, 66);
        assert_eq!(Progress::new(29, 100).percent, 29);
    }

    #[test]
    fn all_reviewed() {
        assert_eq!(Progress::new(7, 7).percent, 100);
    }

    #[test]
    fn reviewed_never_exceeds_total() {
        // Counts come from two separate queries and can drift apart.
        let p = Progress::new(12, 10);
        assert_eq!(p.reviewed, 10);
        assert_eq!(p.percent, 100);
    }
}
