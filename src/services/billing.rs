//! Billing summarizer
//!
//! Joins members, their membership intervals, the allocated costs and what
//! they paid. Two views are produced from the same building blocks:
//!
//! - [`calculate_payment_summary`]: per payer, what they paid and what they
//!   owe for each service they have paid towards.
//! - [`get_payment_summary`]: per service, every member's bill with credit,
//!   overdue flag and how long their payments cover them.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

use super::allocation::{CostAllocation, CostAllocator};
use super::grouping::group_ordered;
use super::payments::{PaymentAggregator, ServiceAmount};
use super::pricing::ServiceCatalog;
use super::shaper::{regroup_by_service, ServiceReport};
use crate::models::period::{humanize_distance, shift_months, with_day_clamped};
use crate::models::{ChangeLogEntry, ChangeLogId, Member, MemberId, Money, Service, Transaction};

/// Format of [`AvailableUntil::display_date`]
pub const AVAILABLE_UNTIL_FORMAT: &str = "%b %d";

// === Owed view ===

/// Paid and owed amounts for one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceOwed {
    pub service: String,
    pub total_paid: Money,
    pub need_to_pay: Money,
}

impl ServiceOwed {
    /// Paid minus owed; negative means the member is behind
    pub fn balance(&self) -> Money {
        self.total_paid - self.need_to_pay
    }
}

/// One payer's paid and owed amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberOwedReport {
    pub owner_id: MemberId,
    /// `None` when the payer is not in the member table
    pub member_name: Option<String>,
    pub subscribed_services: Vec<ServiceOwed>,
}

/// Amount owed by a member for a service across all their intervals
///
/// `allocations` must be the allocation of `change_log`, entry for entry.
fn need_to_pay(
    change_log: &[ChangeLogEntry],
    allocations: &[CostAllocation],
    member: &MemberId,
    service_name: &str,
) -> Money {
    change_log
        .iter()
        .zip(allocations)
        .filter(|(entry, _)| entry.includes(member))
        .filter(|(_, a)| a.service_name.as_deref() == Some(service_name))
        .filter_map(|(_, a)| a.total_price_per_head)
        .sum()
}

/// Per payer and service: total paid and total owed
pub fn calculate_payment_summary(
    transactions: &[Transaction],
    services: &[Service],
    change_log: &[ChangeLogEntry],
    members: &[Member],
    now: NaiveDate,
) -> Vec<MemberOwedReport> {
    let catalog = ServiceCatalog::new(services);
    let allocations = CostAllocator::new(catalog, now).allocate_all(change_log);
    let payments = PaymentAggregator::new(catalog, transactions).by_owner();

    payments
        .into_iter()
        .map(|owner| {
            let subscribed_services = owner
                .services
                .into_iter()
                .map(|paid| ServiceOwed {
                    need_to_pay: need_to_pay(
                        change_log,
                        &allocations,
                        &owner.owner_id,
                        &paid.service,
                    ),
                    service: paid.service,
                    total_paid: paid.total_paid,
                })
                .collect();

            let member_name = members
                .iter()
                .find(|m| m.id == owner.owner_id)
                .map(|m| m.name.clone());

            MemberOwedReport {
                owner_id: owner.owner_id,
                member_name,
                subscribed_services,
            }
        })
        .collect()
}

// === Status view ===

/// A member's accrued cost for one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillLine {
    pub service_name: String,
    pub price_per_head: Money,
    pub total_price_per_head: Money,
    pub billing_day: Option<u32>,
}

/// Paid minus owed, with its display form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credit {
    pub amount: Money,
    /// Signed amount, `+` prefixed when positive
    pub display: String,
}

impl Credit {
    /// Create a credit from a signed amount
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            display: amount.format_signed(),
        }
    }
}

/// The date a member's payments cover them until
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableUntil {
    pub date: NaiveDate,
    /// Date formatted as e.g. "Jul 17"
    pub display_date: String,
    /// Distance from now, e.g. "about 2 months"
    pub relative: String,
}

/// Billing status of one member for one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentInfo {
    pub service_name: String,
    pub price_per_head: Money,
    pub total_price_per_head: Money,
    pub paid: Money,
    pub available_until: Option<AvailableUntil>,
    pub credit: Credit,
    pub is_overdue: bool,
}

/// One member's billing status across services
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberPaymentSummary {
    pub member_id: MemberId,
    pub name: String,
    pub payment_summary: Vec<PaymentInfo>,
}

impl MemberPaymentSummary {
    /// Status for a service, if the member is billed for it
    pub fn for_service(&self, service_name: &str) -> Option<&PaymentInfo> {
        self.payment_summary
            .iter()
            .find(|info| info.service_name == service_name)
    }
}

/// Project how far `credit` carries a member past this month's billing day
///
/// Returns `None` when there is nothing to project: the member is overdue or
/// the per-head price is zero.
pub fn available_until(
    credit: Money,
    price_per_head: Money,
    billing_day: Option<u32>,
    now: NaiveDate,
) -> Option<AvailableUntil> {
    if credit.is_negative() {
        return None;
    }
    let months = credit.whole_multiples_of(price_per_head)?;
    let anchor = with_day_clamped(now, billing_day.unwrap_or_else(|| now.day()));
    let date = shift_months(anchor, months)?;

    Some(AvailableUntil {
        date,
        display_date: date.format(AVAILABLE_UNTIL_FORMAT).to_string(),
        relative: humanize_distance(date, now),
    })
}

/// Group a member's allocations into one bill line per service
pub fn build_bill(
    change_log_ids: &[ChangeLogId],
    allocations: &HashMap<&ChangeLogId, &CostAllocation>,
) -> Vec<BillLine> {
    let lines = change_log_ids.iter().filter_map(|id| {
        let Some(allocation) = allocations.get(id) else {
            debug!(entry = %id, "member lists a change log entry that does not exist");
            return None;
        };
        let line = BillLine {
            service_name: allocation.service_name.clone()?,
            price_per_head: allocation.price_per_head?,
            total_price_per_head: allocation.total_price_per_head?,
            billing_day: allocation.billing_day,
        };
        Some((line.service_name.clone(), line))
    });

    group_ordered(lines, |acc, line| {
        acc.price_per_head += line.price_per_head;
        acc.total_price_per_head += line.total_price_per_head;
    })
    .into_iter()
    .map(|(_, line)| line)
    .collect()
}

/// Join a bill against payments
pub fn summarize_bill(
    bill: &[BillLine],
    paid: &[ServiceAmount],
    now: NaiveDate,
) -> Vec<PaymentInfo> {
    bill.iter()
        .map(|line| {
            let paid = paid
                .iter()
                .find(|p| p.service_name == line.service_name)
                .map(|p| p.amount)
                .unwrap_or_default();
            let credit = paid - line.total_price_per_head;
            let is_overdue = credit.is_negative();

            PaymentInfo {
                service_name: line.service_name.clone(),
                price_per_head: line.price_per_head,
                total_price_per_head: line.total_price_per_head,
                paid,
                available_until: available_until(
                    credit,
                    line.price_per_head,
                    line.billing_day,
                    now,
                ),
                credit: Credit::new(credit),
                is_overdue,
            }
        })
        .collect()
}

/// Per member: billing status for every service they are billed for
pub fn member_payment_summaries(
    transactions: &[Transaction],
    services: &[Service],
    change_log: &[ChangeLogEntry],
    members: &[Member],
    now: NaiveDate,
) -> Vec<MemberPaymentSummary> {
    let catalog = ServiceCatalog::new(services);
    let allocations = CostAllocator::new(catalog, now).allocate_all(change_log);
    let allocations_by_id: HashMap<&ChangeLogId, &CostAllocation> =
        allocations.iter().map(|a| (&a.entry_id, a)).collect();
    let payments = PaymentAggregator::new(catalog, transactions);

    members
        .iter()
        .map(|member| {
            let bill = build_bill(&member.change_log_ids, &allocations_by_id);
            let paid = payments.for_member(&member.transaction_ids);

            MemberPaymentSummary {
                member_id: member.id.clone(),
                name: member.name.clone(),
                payment_summary: summarize_bill(&bill, &paid, now),
            }
        })
        .collect()
}

/// Per service: every billed member's status
pub fn get_payment_summary(
    transactions: &[Transaction],
    services: &[Service],
    change_log: &[ChangeLogEntry],
    members: &[Member],
    now: NaiveDate,
) -> Vec<ServiceReport> {
    let summaries = member_payment_summaries(transactions, services, change_log, members, now);
    regroup_by_service(services, &summaries)
}
