//! Report shaper
//!
//! Turns the member-centric billing status into a service-centric list for
//! display.

use serde::Serialize;

use super::billing::{MemberPaymentSummary, PaymentInfo};
use crate::models::Service;

/// One member's status within a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberPaymentEntry {
    pub name: String,
    pub payment_info: PaymentInfo,
}

/// Every billed member of one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceReport {
    pub service_name: String,
    pub members: Vec<MemberPaymentEntry>,
}

/// Regroup member summaries by service, in service table order
///
/// Members with no bill for a service are left out of that service.
pub fn regroup_by_service(
    services: &[Service],
    summaries: &[MemberPaymentSummary],
) -> Vec<ServiceReport> {
    services
        .iter()
        .map(|service| ServiceReport {
            service_name: service.name.clone(),
            members: summaries
                .iter()
                .filter_map(|summary| {
                    summary
                        .for_service(&service.name)
                        .map(|info| MemberPaymentEntry {
                            name: summary.name.clone(),
                            payment_info: info.clone(),
                        })
                })
                .collect(),
        })
        .collect()
}
