//! Subscription service model
//!
//! A service is something the household pays for jointly (a music or video
//! plan, for example) with a flat monthly price and a fixed billing day.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ids::ServiceId;
use super::money::Money;

/// A shared subscription service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Record identifier
    pub id: ServiceId,

    /// Display name, also used by transactions to reference the service
    pub name: String,

    /// Flat price per billing period
    pub price: Money,

    /// Date the subscription started billing; only the day of month is used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_anchor: Option<NaiveDate>,
}

impl Service {
    /// Create a new service
    pub fn new(id: impl Into<ServiceId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            billing_anchor: None,
        }
    }

    /// Set the billing anchor date
    pub fn with_billing_anchor(mut self, anchor: NaiveDate) -> Self {
        self.billing_anchor = Some(anchor);
        self
    }

    /// Day of month the service bills on
    pub fn billing_day(&self) -> Option<u32> {
        self.billing_anchor.map(|d| d.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_day() {
        let service = Service::new("recSpotify", "Spotify", Money::from_units(300))
            .with_billing_anchor(NaiveDate::from_ymd_opt(2021, 3, 17).unwrap());
        assert_eq!(service.billing_day(), Some(17));

        let unanchored = Service::new("recYouTube", "YouTube Premium", Money::from_units(279));
        assert_eq!(unanchored.billing_day(), None);
    }
}
