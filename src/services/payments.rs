//! Payment aggregator
//!
//! Sums what members have paid, either grouped by payer and service across
//! the whole transaction table, or for one member's own transaction list.
//! A transaction whose service reference does not resolve is left out.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::grouping::group_ordered;
use super::pricing::ServiceCatalog;
use crate::models::{MemberId, Money, Transaction, TransactionId};

/// Total paid towards one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServicePaid {
    pub service: String,
    pub total_paid: Money,
}

/// Everything one payer has paid, per service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerPayments {
    pub owner_id: MemberId,
    pub services: Vec<ServicePaid>,
}

/// An amount attributed to a service by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceAmount {
    pub service_name: String,
    pub amount: Money,
}

/// Aggregates payments against a service catalog
pub struct PaymentAggregator<'a> {
    catalog: ServiceCatalog<'a>,
    transactions: &'a [Transaction],
    by_id: HashMap<&'a TransactionId, &'a Transaction>,
}

impl<'a> PaymentAggregator<'a> {
    /// Create an aggregator over the transaction table
    pub fn new(catalog: ServiceCatalog<'a>, transactions: &'a [Transaction]) -> Self {
        let by_id = transactions.iter().map(|t| (&t.id, t)).collect();
        Self {
            catalog,
            transactions,
            by_id,
        }
    }

    /// Display name of the service a transaction pays for
    fn service_name(&self, transaction: &Transaction) -> Option<&'a str> {
        let reference = transaction.service.as_deref()?;
        let resolved = self.catalog.resolve_reference(reference);
        if resolved.is_none() {
            debug!(
                transaction = %transaction.id,
                service = reference,
                "payment references an unknown service"
            );
        }
        resolved.map(|s| s.name.as_str())
    }

    /// Group all transactions by payer, then by service, summing amounts
    ///
    /// Payers come out in order of their first transaction. A payer whose
    /// payments all reference unknown services is listed with no services.
    pub fn by_owner(&self) -> Vec<OwnerPayments> {
        let per_owner = self.transactions.iter().filter_map(|txn| {
            let owner = txn.payer.clone()?;
            let paid = match (self.service_name(txn), txn.amount) {
                (Some(name), Some(amount)) => vec![(name.to_string(), amount)],
                _ => Vec::new(),
            };
            Some((owner, paid))
        });

        group_ordered(per_owner, |acc, more| acc.extend(more))
            .into_iter()
            .map(|(owner_id, paid)| OwnerPayments {
                owner_id,
                services: group_ordered(paid, |total, amount| *total += amount)
                    .into_iter()
                    .map(|(service, total_paid)| ServicePaid {
                        service,
                        total_paid,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Sum one member's payments by service name
    ///
    /// Unknown transaction ids, blank or zero amounts and unresolvable
    /// services are skipped.
    pub fn for_member(&self, transaction_ids: &[TransactionId]) -> Vec<ServiceAmount> {
        let pairs = transaction_ids.iter().filter_map(|id| {
            let Some(txn) = self.by_id.get(id) else {
                debug!(transaction = %id, "member lists a transaction that does not exist");
                return None;
            };
            let amount = txn.countable_amount()?;
            let name = self.service_name(txn)?;
            Some((name.to_string(), amount))
        });

        group_ordered(pairs, |total, amount| *total += amount)
            .into_iter()
            .map(|(service_name, amount)| ServiceAmount {
                service_name,
                amount,
            })
            .collect()
    }
}
