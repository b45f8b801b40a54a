//! Payment (transaction) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{MemberId, TransactionId};
use super::money::Money;

/// A payment a member made towards a service
///
/// The service is referenced the way the source stores it: usually the
/// service's display name, sometimes its record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Record identifier
    pub id: TransactionId,

    /// Member who paid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<MemberId>,

    /// Service name or id the payment was for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// Amount paid; `None` when the source left it blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    /// Payment date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Transaction {
    /// Create a payment
    pub fn new(
        id: impl Into<TransactionId>,
        payer: impl Into<MemberId>,
        service: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            id: id.into(),
            payer: Some(payer.into()),
            service: Some(service.into()),
            amount: Some(amount),
            date: None,
        }
    }

    /// Amount, when present and non-zero
    pub fn countable_amount(&self) -> Option<Money> {
        self.amount.filter(|a| !a.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countable_amount() {
        let paid = Transaction::new("recT1", "recA", "Spotify", Money::from_units(75));
        assert_eq!(paid.countable_amount(), Some(Money::from_units(75)));

        let zero = Transaction::new("recT2", "recA", "Spotify", Money::zero());
        assert_eq!(zero.countable_amount(), None);

        let mut blank = paid.clone();
        blank.amount = None;
        assert_eq!(blank.countable_amount(), None);
    }
}
