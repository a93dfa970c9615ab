//! Parameter metadata types for EDR collections.
//!
//! Parameters describe the observed variables available within a collection,
//! including their units, observed properties, and descriptive metadata.
//! The same shape is used in collection metadata, GeoJSON listings and
//! CoverageJSON documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base URI of the NERC vocabulary for CF standard names.
pub const STANDARD_NAME_VOCABULARY: &str = "https://vocab.nerc.ac.uk/standard_name/";

/// A parameter (observed property) available in a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Parameter {
    /// The type of parameter (always "Parameter").
    #[serde(rename = "type")]
    pub type_: String,

    /// Unique identifier for the parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Multi-language description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<I18nString>,

    /// The observed property.
    #[serde(rename = "observedProperty")]
    pub observed_property: ObservedProperty,

    /// Unit of measurement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl Parameter {
    /// Create a new parameter.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            type_: "Parameter".to_string(),
            id: Some(id.into()),
            label: Some(label.clone()),
            description: None,
            observed_property: ObservedProperty::new(label),
            unit: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(I18nString::english(&desc.into()));
        self
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Replace the observed property.
    pub fn with_observed_property(mut self, observed_property: ObservedProperty) -> Self {
        self.observed_property = observed_property;
        self
    }
}

/// Internationalized string supporting multiple languages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum I18nString {
    /// Simple string (assumes English).
    Simple(String),
    /// Map of language codes to strings.
    Localized(BTreeMap<String, String>),
}

impl I18nString {
    /// Create an English-only i18n string.
    pub fn english(s: &str) -> Self {
        let mut map = BTreeMap::new();
        map.insert("en".to_string(), s.to_string());
        I18nString::Localized(map)
    }

    /// Get the English text, or any available text.
    pub fn text(&self) -> &str {
        match self {
            I18nString::Simple(s) => s,
            I18nString::Localized(map) => map
                .get("en")
                .or_else(|| map.values().next())
                .map(|s| s.as_str())
                .unwrap_or(""),
        }
    }
}

/// The observed property being measured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservedProperty {
    /// URI identifier for the property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<I18nString>,

    /// Description of the property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<I18nString>,
}

impl ObservedProperty {
    /// Create a new observed property with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: Some(I18nString::english(&label.into())),
            description: None,
        }
    }

    /// Observed property identified by a CF standard name.
    pub fn from_standard_name(standard_name: &str) -> Self {
        Self::new(standard_name).with_id(format!("{}{}", STANDARD_NAME_VOCABULARY, standard_name))
    }

    /// Set the ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(I18nString::english(&desc.into()));
        self
    }
}

/// Unit of measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    /// Human-readable label for the unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<I18nString>,

    /// Symbol or abbreviation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<UnitSymbol>,
}

impl Unit {
    /// Create a unit with label and symbol.
    pub fn new(label: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            label: Some(I18nString::english(&label.into())),
            symbol: Some(UnitSymbol::Simple(symbol.into())),
        }
    }
}

/// Unit symbol representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum UnitSymbol {
    /// Simple string symbol.
    Simple(String),
    /// Structured symbol with type and value.
    Structured {
        /// Symbol value.
        value: String,
        /// Symbol type (e.g., "<http://www.opengis.net/def/uom/UCUM/>").
        #[serde(rename = "type")]
        type_: Option<String>,
    },
}

impl UnitSymbol {
    /// Get the symbol string.
    pub fn value(&self) -> &str {
        match self {
            UnitSymbol::Simple(s) => s,
            UnitSymbol::Structured { value, .. } => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_creation() {
        let param = Parameter::new("ff", "Wind Speed")
            .with_description("10 minute mean wind speed")
            .with_unit(Unit::new("m s-1", "m s-1"));

        assert_eq!(param.type_, "Parameter");
        assert_eq!(param.id, Some("ff".to_string()));
        assert_eq!(param.label, Some("Wind Speed".to_string()));
        assert_eq!(
            param.description.as_ref().map(|d| d.text()),
            Some("10 minute mean wind speed")
        );
        assert_eq!(
            param.unit.unwrap().symbol.unwrap().value(),
            "m s-1"
        );
    }

    #[test]
    fn test_observed_property_from_standard_name() {
        let prop = ObservedProperty::from_standard_name("wind_speed");
        assert_eq!(
            prop.id,
            Some("https://vocab.nerc.ac.uk/standard_name/wind_speed".to_string())
        );
        assert_eq!(prop.label.unwrap().text(), "wind_speed");
    }

    #[test]
    fn test_i18n_string() {
        let s = I18nString::english("Hello");
        assert_eq!(s.text(), "Hello");

        let simple = I18nString::Simple("World".to_string());
        assert_eq!(simple.text(), "World");

        let mut map = BTreeMap::new();
        map.insert("nl".to_string(), "Windsnelheid".to_string());
        assert_eq!(I18nString::Localized(map).text(), "Windsnelheid");
    }

    #[test]
    fn test_parameter_serialization() {
        let param = Parameter::new("ta", "Air Temperature").with_unit(Unit::new("degrees Celsius", "degrees C"));

        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "Parameter");
        assert_eq!(json["observedProperty"]["label"]["en"], "Air Temperature");
        assert_eq!(json["unit"]["symbol"], "degrees C");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_unit_symbol_structured() {
        let json = r#"{"value": "K", "type": "http://www.opengis.net/def/uom/UCUM/"}"#;
        let symbol: UnitSymbol = serde_json::from_str(json).unwrap();
        assert_eq!(symbol.value(), "K");
    }
}
