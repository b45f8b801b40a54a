//! Cost allocator
//!
//! Splits a service's price across the members of a change log entry and
//! accrues that share for every calendar month the entry has been active.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use super::pricing::ServiceCatalog;
use crate::models::period::calendar_months_between;
use crate::models::{ChangeLogEntry, ChangeLogId, MemberId, Money, ServiceId};

/// A change log entry with its cost share resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostAllocation {
    pub entry_id: ChangeLogId,
    pub service_id: Option<ServiceId>,
    pub members: Vec<MemberId>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,

    /// `None` when the service could not be resolved
    pub service_name: Option<String>,

    /// Share of one billing period; `None` when the service could not be resolved
    pub price_per_head: Option<Money>,

    /// Share accrued over the entry's elapsed months
    pub total_price_per_head: Option<Money>,

    /// Day of month the service bills on
    pub billing_day: Option<u32>,
}

/// Per-head share of a price
///
/// The price is divided by one more than the number of listed members, then
/// rounded to whole currency units.
pub fn price_per_head(price: Money, member_count: usize) -> Option<Money> {
    let parts = i64::try_from(member_count).ok()?.checked_add(1)?;
    price.split_rounded(parts)
}

/// Whole calendar months between `start` and `end`; never negative
pub fn elapsed_months(start: NaiveDate, end: NaiveDate) -> i64 {
    calendar_months_between(start, end).max(0)
}

/// Share accrued from `start` to `end`; `None` when the total overflows
pub fn total_price_per_head(
    price_per_head: Money,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<Money> {
    price_per_head.checked_times(elapsed_months(start, end))
}

/// Applies the pricing rules to change log entries at a fixed "now"
#[derive(Debug, Clone, Copy)]
pub struct CostAllocator<'a> {
    catalog: ServiceCatalog<'a>,
    now: NaiveDate,
}

impl<'a> CostAllocator<'a> {
    /// Create an allocator
    pub fn new(catalog: ServiceCatalog<'a>, now: NaiveDate) -> Self {
        Self { catalog, now }
    }

    /// Allocate the cost of one entry
    pub fn allocate(&self, entry: &ChangeLogEntry) -> CostAllocation {
        let service = entry.service_id.as_ref().and_then(|id| self.catalog.get(id));

        if service.is_none() {
            debug!(entry = %entry.id, "change log entry references an unknown service");
        }

        let per_head = service.and_then(|s| price_per_head(s.price, entry.members.len()));
        if service.is_some() && per_head.is_none() {
            warn!(entry = %entry.id, "per-head price is out of range");
        }
        if per_head.is_some_and(|m| m.is_zero()) {
            warn!(entry = %entry.id, "per-head price rounds to zero");
        }

        let end = entry.effective_end(self.now);
        let total = per_head.and_then(|p| total_price_per_head(p, entry.start_date, end));
        if per_head.is_some() && total.is_none() {
            warn!(entry = %entry.id, "accrued share is out of range");
        }

        CostAllocation {
            entry_id: entry.id.clone(),
            service_id: entry.service_id.clone(),
            members: entry.members.clone(),
            start_date: entry.start_date,
            end_date: entry.end_date,
            service_name: service.map(|s| s.name.clone()),
            price_per_head: per_head,
            total_price_per_head: total,
            billing_day: service.and_then(|s| s.billing_day()),
        }
    }

    /// Allocate every entry, in order
    pub fn allocate_all(&self, entries: &[ChangeLogEntry]) -> Vec<CostAllocation> {
        entries.iter().map(|entry| self.allocate(entry)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Service;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn members(n: usize) -> Vec<MemberId> {
        (0..n).map(|i| MemberId::new(format!("rec{}", i))).collect()
    }

    #[test]
    fn test_price_per_head_adds_one_share() {
        let price = Money::from_units(300);
        assert_eq!(price_per_head(price, 3), Some(Money::from_units(75)));
        assert_eq!(price_per_head(price, 1), Some(Money::from_units(150)));
        assert_eq!(price_per_head(Money::from_units(279), 2), Some(Money::from_units(93)));
        assert_eq!(price_per_head(Money::from_units(279), 3), Some(Money::from_units(70)));
    }

    #[test]
    fn test_total_is_zero_within_same_month() {
        let pph = Money::from_units(75);
        assert_eq!(
            total_price_per_head(pph, date(2024, 5, 1), date(2024, 5, 31)),
            Some(Money::zero())
        );
    }

    #[test]
    fn test_total_counts_calendar_months() {
        let pph = Money::from_units(75);
        assert_eq!(
            total_price_per_head(pph, date(2024, 1, 31), date(2024, 2, 1)),
            Some(Money::from_units(75))
        );
        assert_eq!(
            total_price_per_head(pph, date(2024, 1, 1), date(2024, 5, 10)),
            Some(Money::from_units(300))
        );
    }

    #[test]
    fn test_total_is_monotonic() {
        let pph = Money::from_units(75);
        let start = date(2023, 6, 15);
        let mut previous = Money::zero();
        for months in 0..24 {
            let end = crate::models::period::shift_months(start, months).unwrap();
            let total = total_price_per_head(pph, start, end).unwrap();
            assert!(total >= previous);
            previous = total;
        }
    }

    #[test]
    fn test_future_start_accrues_nothing() {
        let pph = Money::from_units(75);
        assert_eq!(
            total_price_per_head(pph, date(2024, 8, 1), date(2024, 5, 10)),
            Some(Money::zero())
        );
    }

    #[test]
    fn test_total_overflow_is_absent() {
        let pph = Money::from_cents(i64::MAX / 2);
        assert_eq!(total_price_per_head(pph, date(2024, 1, 1), date(2024, 5, 10)), None);
    }

    #[test]
    fn test_allocate_open_entry() {
        let services = vec![Service::new("recSpotify", "Spotify", Money::from_units(300))
            .with_billing_anchor(date(2021, 3, 17))];
        let allocator = CostAllocator::new(ServiceCatalog::new(&services), date(2024, 5, 10));
        let entry = ChangeLogEntry::new("recL1", "recSpotify", members(3), date(2024, 1, 1));

        let allocation = allocator.allocate(&entry);
        assert_eq!(allocation.service_name.as_deref(), Some("Spotify"));
        assert_eq!(allocation.price_per_head, Some(Money::from_units(75)));
        assert_eq!(allocation.total_price_per_head, Some(Money::from_units(300)));
        assert_eq!(allocation.billing_day, Some(17));
        assert_eq!(allocation.members.len(), 3);
    }

    #[test]
    fn test_allocate_closed_entry_uses_end_date() {
        let services = vec![Service::new("recYouTube", "YouTube Premium", Money::from_units(279))];
        let allocator = CostAllocator::new(ServiceCatalog::new(&services), date(2024, 5, 10));
        let entry = ChangeLogEntry::new("recL2", "recYouTube", members(2), date(2023, 12, 15))
            .ending(date(2024, 3, 31));

        let allocation = allocator.allocate(&entry);
        assert_eq!(allocation.price_per_head, Some(Money::from_units(93)));
        assert_eq!(allocation.total_price_per_head, Some(Money::from_units(279)));
    }

    #[test]
    fn test_allocate_unknown_service_propagates_absence() {
        let allocator = CostAllocator::new(ServiceCatalog::new(&[]), date(2024, 5, 10));
        let entry = ChangeLogEntry::new("recL1", "recDeleted", members(2), date(2024, 1, 1));

        let allocation = allocator.allocate(&entry);
        assert_eq!(allocation.service_id.as_ref().map(|s| s.as_str()), Some("recDeleted"));
        assert!(allocation.service_name.is_none());
        assert!(allocation.price_per_head.is_none());
        assert!(allocation.total_price_per_head.is_none());
    }

    #[test]
    fn test_allocate_huge_price_degrades_to_absence() {
        let services = vec![Service::new("recBig", "Big", Money::from_cents(i64::MAX / 2))];
        let allocator = CostAllocator::new(ServiceCatalog::new(&services), date(2024, 5, 10));
        let entry = ChangeLogEntry::new("recL1", "recBig", members(1), date(2023, 1, 1));

        let allocation = allocator.allocate(&entry);
        assert_eq!(allocation.service_name.as_deref(), Some("Big"));
        assert!(allocation.price_per_head.is_some());
        assert!(allocation.total_price_per_head.is_none());
    }
}
