//! Company and registry types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShuttleError};

/// A pickup point: a company with a number of employees waiting to be
/// carried to the destination, located some distance from the depot.
///
/// # Examples
///
/// ```
/// use u_shuttle::registry::Company;
///
/// let c = Company::new("Acme", 12, 4.5);
/// assert_eq!(c.name(), "Acme");
/// assert_eq!(c.employees(), 12);
/// assert_eq!(c.distance_km(), 4.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    name: String,
    employees: u32,
    distance_km: f64,
}

impl Company {
    /// Creates a new company. Validation happens on registration.
    pub fn new(name: impl Into<String>, employees: u32, distance_km: f64) -> Self {
        Self {
            name: name.into(),
            employees,
            distance_km,
        }
    }

    /// Unique company name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of employees waiting at this company.
    pub fn employees(&self) -> u32 {
        self.employees
    }

    /// Distance from the depot in kilometres.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }
}

/// Registered companies keyed by name, plus the order in which they were
/// registered. That order is the initial (unoptimized) route.
///
/// # Examples
///
/// ```
/// use u_shuttle::registry::{Company, CompanyRegistry};
///
/// let registry = CompanyRegistry::from_companies(vec![
///     Company::new("A", 10, 2.0),
///     Company::new("B", 15, 5.0),
/// ])
/// .unwrap();
///
/// assert_eq!(registry.order(), ["A", "B"]);
/// assert_eq!(registry.total_employees(), 25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompanyRegistry {
    companies: HashMap<String, Company>,
    order: Vec<String>,
}

impl CompanyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from companies in route order.
    pub fn from_companies<I>(companies: I) -> Result<Self>
    where
        I: IntoIterator<Item = Company>,
    {
        let mut registry = Self::new();
        for company in companies {
            registry.register(company)?;
        }
        Ok(registry)
    }

    /// Appends a company to the route order.
    ///
    /// Rejects blank names, names already registered, and distances that
    /// are negative or not finite.
    pub fn register(&mut self, company: Company) -> Result<()> {
        let name = company.name.trim();
        if name.is_empty() {
            return Err(ShuttleError::EmptyCompanyName);
        }
        if self.companies.contains_key(name) {
            return Err(ShuttleError::DuplicateCompany(name.to_string()));
        }
        if !company.distance_km.is_finite() || company.distance_km < 0.0 {
            return Err(ShuttleError::InvalidDistance {
                name: name.to_string(),
                distance: company.distance_km,
            });
        }

        let company = Company {
            name: name.to_string(),
            ..company
        };
        self.order.push(company.name.clone());
        self.companies.insert(company.name.clone(), company);
        Ok(())
    }

    /// Number of registered companies.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Looks up a company by name.
    pub fn get(&self, name: &str) -> Option<&Company> {
        self.companies.get(name)
    }

    /// Company names in registration (initial route) order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Companies in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Company> {
        self.order.iter().filter_map(|name| self.companies.get(name))
    }

    /// Total number of employees across all companies.
    pub fn total_employees(&self) -> u64 {
        self.iter().map(|c| u64::from(c.employees)).sum()
    }

    /// Name → employee count.
    pub fn employee_counts(&self) -> HashMap<String, u32> {
        self.iter()
            .map(|c| (c.name.clone(), c.employees))
            .collect()
    }

    /// Name → distance from the depot (km).
    pub fn distances(&self) -> HashMap<String, f64> {
        self.iter()
            .map(|c| (c.name.clone(), c.distance_km))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompanyRegistry {
        CompanyRegistry::from_companies(vec![
            Company::new("A", 10, 5.0),
            Company::new("B", 15, 10.0),
            Company::new("C", 8, 20.0),
        ])
        .expect("valid registry")
    }

    #[test]
    fn test_registration_order_is_route_order() {
        let registry = sample();
        assert_eq!(registry.order(), ["A", "B", "C"]);
        let names: Vec<&str> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_lookup_and_totals() {
        let registry = sample();
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert_eq!(registry.get("B").map(|c| c.employees()), Some(15));
        assert!(registry.get("Z").is_none());
        assert_eq!(registry.total_employees(), 33);
        assert_eq!(registry.employee_counts()["C"], 8);
        assert_eq!(registry.distances()["B"], 10.0);
    }

    #[test]
    fn test_names_are_trimmed() {
        let registry =
            CompanyRegistry::from_companies(vec![Company::new("  Acme ", 3, 1.0)]).expect("valid");
        assert_eq!(registry.order(), ["Acme"]);
        assert!(registry.get("Acme").is_some());
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = CompanyRegistry::from_companies(vec![Company::new("   ", 3, 1.0)]);
        assert_eq!(err.unwrap_err(), ShuttleError::EmptyCompanyName);
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let mut registry = sample();
        let err = registry.register(Company::new("A", 1, 1.0)).unwrap_err();
        assert_eq!(err, ShuttleError::DuplicateCompany("A".into()));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_rejects_bad_distance() {
        let mut registry = CompanyRegistry::new();
        assert!(registry.register(Company::new("X", 1, -1.0)).is_err());
        assert!(registry.register(Company::new("Y", 1, f64::NAN)).is_err());
        assert!(registry.register(Company::new("Z", 1, f64::INFINITY)).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_zero_employee_company_is_allowed() {
        let registry =
            CompanyRegistry::from_companies(vec![Company::new("Idle", 0, 0.0)]).expect("valid");
        assert_eq!(registry.total_employees(), 0);
    }
}
