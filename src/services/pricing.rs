//! Service pricing resolver
//!
//! Looks up services by record id or display name, and resolves the loose
//! service references carried by transactions.

use crate::models::{Service, ServiceId};

/// Read-only view over the service table
#[derive(Debug, Clone, Copy)]
pub struct ServiceCatalog<'a> {
    services: &'a [Service],
}

impl<'a> ServiceCatalog<'a> {
    /// Create a catalog over a service list
    pub fn new(services: &'a [Service]) -> Self {
        Self { services }
    }

    /// Get a service by record id
    pub fn get(&self, id: &ServiceId) -> Option<&'a Service> {
        self.services.iter().find(|s| &s.id == id)
    }

    /// Get a service by display name
    pub fn by_name(&self, name: &str) -> Option<&'a Service> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Resolve a transaction's service reference
    ///
    /// The reference is tried as a record id first, then as a display name.
    pub fn resolve_reference(&self, reference: &str) -> Option<&'a Service> {
        self.get(&ServiceId::from(reference))
            .or_else(|| self.by_name(reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn services() -> Vec<Service> {
        vec![
            Service::new("recSpotify", "Spotify", Money::from_units(300))
                .with_billing_anchor(NaiveDate::from_ymd_opt(2021, 3, 17).unwrap()),
            Service::new("recYouTube", "YouTube Premium", Money::from_units(279)),
        ]
    }

    #[test]
    fn test_lookup_by_id() {
        let services = services();
        let catalog = ServiceCatalog::new(&services);
        let id = ServiceId::from("recSpotify");

        let service = catalog.get(&id).unwrap();
        assert_eq!(service.price, Money::from_units(300));
        assert_eq!(service.name, "Spotify");
        assert_eq!(service.billing_day(), Some(17));
    }

    #[test]
    fn test_unknown_service_is_absent() {
        let services = services();
        let catalog = ServiceCatalog::new(&services);
        let id = ServiceId::from("recDeleted");

        assert!(catalog.get(&id).is_none());
        assert!(catalog.by_name("Netflix").is_none());
    }

    #[test]
    fn test_resolve_reference() {
        let services = services();
        let catalog = ServiceCatalog::new(&services);

        assert_eq!(catalog.resolve_reference("recYouTube").unwrap().name, "YouTube Premium");
        assert_eq!(catalog.resolve_reference("Spotify").unwrap().id.as_str(), "recSpotify");
        assert!(catalog.resolve_reference("Netflix").is_none());
    }
}
