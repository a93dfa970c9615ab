//! EDR API response types.
//!
//! This module contains types for the landing page, conformance,
//! and other metadata responses.

use serde::{Deserialize, Serialize};

use crate::conformance;
use crate::types::Link;

/// Landing page response for the EDR API root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandingPage {
    /// Title of the API.
    pub title: String,

    /// Description of the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Keywords for discovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Organisation providing the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,

    /// Point of contact for the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,

    /// Links to related resources.
    pub links: Vec<Link>,
}

impl LandingPage {
    /// Create a new landing page with standard links.
    pub fn new(title: impl Into<String>, description: impl Into<String>, base_url: &str) -> Self {
        let links = vec![
            Link::new(base_url, "self")
                .with_type("application/json")
                .with_title("This document"),
            Link::new(format!("{}/conformance", base_url), "conformance")
                .with_type("application/json")
                .with_title("Conformance classes"),
            Link::new(format!("{}/collections", base_url), "data")
                .with_type("application/json")
                .with_title("Collections"),
        ];

        Self {
            title: title.into(),
            description: Some(description.into()),
            keywords: None,
            provider: None,
            contact: None,
            links,
        }
    }

    /// Set the keywords.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        if !keywords.is_empty() {
            self.keywords = Some(keywords);
        }
        self
    }

    /// Set the provider.
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the contact.
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }
}

/// Organisation providing the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Provider {
    /// Provider name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Provider home page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Contact details for the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Contact {
    /// Contact e-mail address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Conformance declaration response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConformanceClasses {
    /// List of conformance class URIs.
    #[serde(rename = "conformsTo")]
    pub conforms_to: Vec<String>,
}

impl ConformanceClasses {
    /// Create conformance classes for the current implementation.
    ///
    /// Includes: Core, Collections, Locations, Area, CoverageJSON, GeoJSON
    pub fn current() -> Self {
        Self {
            conforms_to: vec![
                conformance::CORE.to_string(),
                conformance::COLLECTIONS.to_string(),
                conformance::LOCATIONS.to_string(),
                conformance::AREA.to_string(),
                conformance::COVJSON.to_string(),
                conformance::GEOJSON.to_string(),
            ],
        }
    }

    /// Check if a conformance class is declared.
    pub fn contains(&self, class: &str) -> bool {
        self.conforms_to.iter().any(|c| c == class)
    }
}

/// Exception response for errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExceptionResponse {
    /// Exception type identifier.
    #[serde(rename = "type")]
    pub type_: String,

    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// HTTP status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Detailed error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI of the request that caused the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ExceptionResponse {
    /// Create a new exception response.
    pub fn new(type_: impl Into<String>, status: u16, detail: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            title: None,
            status: Some(status),
            detail: Some(detail.into()),
            instance: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Create a 404 Not Found exception.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(
            "http://www.opengis.net/def/exceptions/ogcapi-edr-1/1.0/not-found",
            404,
            detail,
        )
        .with_title("Not Found")
    }

    /// Create a 400 Bad Request exception.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(
            "http://www.opengis.net/def/exceptions/ogcapi-edr-1/1.0/invalid-parameter-value",
            400,
            detail,
        )
        .with_title("Bad Request")
    }

    /// Create a 406 Not Acceptable exception.
    pub fn not_acceptable(detail: impl Into<String>) -> Self {
        Self::new(
            "http://www.opengis.net/def/exceptions/ogcapi-edr-1/1.0/invalid-parameter-value",
            406,
            detail,
        )
        .with_title("Not Acceptable")
    }

    /// Create a 500 Internal Server Error exception.
    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::new(
            "http://www.opengis.net/def/exceptions/ogcapi-edr-1/1.0/server-error",
            500,
            detail,
        )
        .with_title("Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_page() {
        let landing = LandingPage::new(
            "Station EDR API",
            "Observations from weather stations",
            "http://localhost:8083/edr",
        );

        assert_eq!(landing.title, "Station EDR API");
        assert!(landing.description.is_some());
        assert!(landing.links.iter().any(|l| l.rel == "self"));
        assert!(landing.links.iter().any(|l| l.rel == "conformance"));
        assert!(landing
            .links
            .iter()
            .any(|l| l.rel == "data" && l.href == "http://localhost:8083/edr/collections"));
    }

    #[test]
    fn test_landing_page_provider_contact() {
        let landing = LandingPage::new("T", "D", "http://localhost:8083/edr")
            .with_keywords(vec!["weather".to_string(), "wind".to_string()])
            .with_provider(Provider {
                name: Some("RODEO".to_string()),
                url: Some("https://rodeo-project.eu/".to_string()),
            })
            .with_contact(Contact {
                email: Some("info@example.org".to_string()),
                phone: None,
            });

        let json = serde_json::to_value(&landing).unwrap();
        assert_eq!(json["keywords"], serde_json::json!(["weather", "wind"]));
        assert_eq!(json["provider"]["name"], "RODEO");
        assert_eq!(json["contact"]["email"], "info@example.org");
        assert!(json["contact"].get("phone").is_none());
    }

    #[test]
    fn test_landing_page_omits_empty_keywords() {
        let landing = LandingPage::new("T", "D", "http://x").with_keywords(Vec::new());
        let json = serde_json::to_string(&landing).unwrap();
        assert!(!json.contains("keywords"));
        assert!(!json.contains("provider"));
    }

    #[test]
    fn test_conformance_current() {
        let conf = ConformanceClasses::current();

        assert!(conf.contains(conformance::CORE));
        assert!(conf.contains(conformance::COLLECTIONS));
        assert!(conf.contains(conformance::LOCATIONS));
        assert!(conf.contains(conformance::AREA));
        assert!(conf.contains(conformance::COVJSON));
        assert!(conf.contains(conformance::GEOJSON));
    }

    #[test]
    fn test_conformance_serialization() {
        let json = serde_json::to_string(&ConformanceClasses::current()).unwrap();
        assert!(json.contains("\"conformsTo\""));
        assert!(json.contains("conf/locations"));
    }

    #[test]
    fn test_exception_not_found() {
        let exc = ExceptionResponse::not_found("Location not found: 99999");

        assert_eq!(exc.status, Some(404));
        assert_eq!(exc.title, Some("Not Found".to_string()));
        assert!(exc.detail.unwrap().contains("99999"));
    }

    #[test]
    fn test_exception_variants() {
        assert_eq!(ExceptionResponse::bad_request("x").status, Some(400));
        assert_eq!(ExceptionResponse::not_acceptable("x").status, Some(406));
        assert_eq!(ExceptionResponse::internal_error("x").status, Some(500));
    }

    #[test]
    fn test_exception_serialization() {
        let exc = ExceptionResponse::not_found("Collection not found");

        let json = serde_json::to_value(&exc).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["title"], "Not Found");
        assert!(json.get("instance").is_none());
        assert!(json["type"].as_str().unwrap().ends_with("not-found"));
    }
}
