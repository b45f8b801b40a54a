//! Reports module for subsplit
//!
//! Renders the billing summaries for the terminal and for CSV export:
//! outstanding balances per member, subscription status per service, and
//! subscription status per member.

pub mod member_status;
pub mod outstanding;
pub mod service_overview;

pub use member_status::MemberStatusReport;
pub use outstanding::OutstandingReport;
pub use service_overview::ServiceOverviewReport;
