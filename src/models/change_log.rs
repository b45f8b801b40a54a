//! Subscription change log entries
//!
//! Each entry records that a fixed set of members split the cost of one
//! service from a start date until an end date, or until now when the entry
//! is still open.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{ChangeLogId, MemberId, ServiceId};

/// One membership interval for a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    /// Record identifier
    pub id: ChangeLogId,

    /// The service being shared; `None` when the source left it blank
    pub service_id: Option<ServiceId>,

    /// Members splitting the cost (never empty)
    pub members: Vec<MemberId>,

    /// First day of the interval
    pub start_date: NaiveDate,

    /// Last day of the interval, if closed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl ChangeLogEntry {
    /// Create an open-ended entry
    pub fn new(
        id: impl Into<ChangeLogId>,
        service_id: impl Into<ServiceId>,
        members: Vec<MemberId>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            service_id: Some(service_id.into()),
            members,
            start_date,
            end_date: None,
        }
    }

    /// Close the entry at `end_date`
    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Check whether a member takes part in this interval
    pub fn includes(&self, member: &MemberId) -> bool {
        self.members.contains(member)
    }

    /// End of the interval, or `now` when still open
    pub fn effective_end(&self, now: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_effective_end() {
        let now = date(2024, 5, 10);
        let entry = ChangeLogEntry::new(
            "recLog1",
            "recSpotify",
            vec![MemberId::from("recA")],
            date(2024, 1, 1),
        );
        assert_eq!(entry.effective_end(now), now);

        let closed = entry.ending(date(2024, 3, 31));
        assert_eq!(closed.effective_end(now), date(2024, 3, 31));
    }

    #[test]
    fn test_includes() {
        let entry = ChangeLogEntry::new(
            "recLog1",
            "recSpotify",
            vec![MemberId::from("recA"), MemberId::from("recB")],
            date(2024, 1, 1),
        );
        assert!(entry.includes(&MemberId::from("recB")));
        assert!(!entry.includes(&MemberId::from("recC")));
    }
}
