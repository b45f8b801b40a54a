//! Billing pipeline for subsplit
//!
//! Pure functions over a snapshot of the source tables: price resolution,
//! per-head cost allocation, payment aggregation, billing summaries and the
//! regrouping used for display. Nothing here performs I/O or keeps state
//! between calls; "now" is always passed in.

pub mod allocation;
pub mod billing;
pub mod grouping;
pub mod payments;
pub mod pricing;
pub mod shaper;

pub use allocation::{CostAllocation, CostAllocator};
pub use billing::{
    calculate_payment_summary, get_payment_summary, member_payment_summaries, AvailableUntil,
    Credit, MemberOwedReport, MemberPaymentSummary, PaymentInfo, ServiceOwed,
};
pub use payments::{OwnerPayments, PaymentAggregator, ServiceAmount, ServicePaid};
pub use pricing::ServiceCatalog;
pub use shaper::{regroup_by_service, MemberPaymentEntry, ServiceReport};
