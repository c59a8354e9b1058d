//! Static configuration for variable resolution.
//!
//! Provides the two-way registry mapping human-readable variable
//! descriptions to backend variable codes. The default registry carries the
//! flight-route dataset; deployments against other systems can supply their
//! own mapping.

use crate::constants::{var_codes, var_names};
use crate::error::{Result, RouteframeError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Two-way mapping between variable descriptions and backend codes
///
/// Lookups return `Option` so callers can render an "encoding not defined"
/// diagnostic and continue; the `require_*` variants return a typed error
/// for call sites where an unknown variable is fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableRegistry {
    by_name: HashMap<String, String>,
    by_code: HashMap<String, String>,
}

impl VariableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
            by_code: HashMap::new(),
        }
    }

    /// Build a registry from (description, code) pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (name, code) in pairs {
            registry.insert(name, code);
        }
        registry
    }

    /// Register a description/code pair, replacing any previous entry
    pub fn insert(&mut self, name: impl Into<String>, code: impl Into<String>) {
        let name = name.into();
        let code = code.into();
        self.by_name.insert(name.clone(), code.clone());
        self.by_code.insert(code, name);
    }

    /// Look up the backend code for a variable description
    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Look up the description for a backend code
    pub fn description_for(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(String::as_str)
    }

    /// Like [`code_for`](Self::code_for), but an unknown description is an error
    pub fn require_code(&self, name: &str) -> Result<&str> {
        self.code_for(name)
            .ok_or_else(|| RouteframeError::EncodingNotFound {
                name: name.to_string(),
            })
    }

    /// Like [`description_for`](Self::description_for), but an unknown code is an error
    pub fn require_description(&self, code: &str) -> Result<&str> {
        self.description_for(code)
            .ok_or_else(|| RouteframeError::EncodingNotFound {
                name: code.to_string(),
            })
    }

    /// Number of registered variables
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for VariableRegistry {
    /// Registry for the flight-route dataset
    fn default() -> Self {
        Self::from_pairs([
            (var_names::REPORTING_AIRPORT, var_codes::REPORTING_AIRPORT),
            (var_names::AIRLINE_NAME, var_codes::AIRLINE_NAME),
            (var_names::ORIGIN_DESTINATION, var_codes::ORIGIN_DESTINATION),
            (var_names::REPORTING_PERIOD, var_codes::REPORTING_PERIOD),
            (
                var_names::REPORTING_PERIOD_YEARS,
                var_codes::REPORTING_PERIOD_YEARS,
            ),
            (var_names::ROUTE_NAME, var_codes::ROUTE_NAME),
            (
                var_names::ORIGIN_AIRPORT_LONGITUDE,
                var_codes::ORIGIN_AIRPORT_LONGITUDE,
            ),
            (
                var_names::ORIGIN_AIRPORT_LATITUDE,
                var_codes::ORIGIN_AIRPORT_LATITUDE,
            ),
            (
                var_names::REPORTING_AIRPORT_LONGITUDE,
                var_codes::REPORTING_AIRPORT_LONGITUDE,
            ),
            (
                var_names::REPORTING_AIRPORT_LATITUDE,
                var_codes::REPORTING_AIRPORT_LATITUDE,
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_round_trip() {
        let registry = VariableRegistry::default();
        assert_eq!(registry.code_for("Reporting Airport"), Some("reRepor1"));
        assert_eq!(registry.description_for("flAirlin"), Some("Airline Name"));
        assert_eq!(registry.code_for("Destination"), Some("flOrigi1"));
    }

    #[test]
    fn test_unknown_variable_is_recoverable() {
        let registry = VariableRegistry::default();
        assert_eq!(registry.code_for("Cabin Class"), None);

        let err = registry.require_code("Cabin Class").unwrap_err();
        assert!(matches!(
            err,
            RouteframeError::EncodingNotFound { ref name } if name == "Cabin Class"
        ));
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut registry = VariableRegistry::new();
        registry.insert("Destination", "old1Code");
        registry.insert("Destination", "new1Code");
        assert_eq!(registry.code_for("Destination"), Some("new1Code"));
        assert_eq!(registry.description_for("new1Code"), Some("Destination"));
    }
}
