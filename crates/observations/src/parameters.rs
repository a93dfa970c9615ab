//! Resolution of the `parameter-name` query parameter.

use std::collections::{BTreeMap, HashSet};

use edr_protocol::parameters::{ObservedProperty, Parameter, Unit};

use crate::dataset::{Dataset, Variable};
use crate::error::QueryError;

/// Parse parameter-name query parameter.
pub fn parse_parameter_names(param: &str) -> Vec<String> {
    param
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Resolve a requested parameter list against a reference set.
///
/// Without a request (or with only blank names) the whole reference set is
/// returned in its own order. Otherwise the requested ids are returned in
/// request order with duplicates dropped. Every requested id missing from
/// the reference set is reported in a single [`QueryError::UnknownParameter`].
pub fn resolve_parameters<'a>(
    requested: Option<&str>,
    available: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<String>, QueryError> {
    let available: Vec<&str> = available.into_iter().collect();
    let names = requested.map(parse_parameter_names).unwrap_or_default();

    if names.is_empty() {
        return Ok(available.into_iter().map(str::to_string).collect());
    }

    let mut seen = HashSet::new();
    let names: Vec<String> = names.into_iter().filter(|n| seen.insert(n.clone())).collect();

    let unknown: Vec<String> = names
        .iter()
        .filter(|n| !available.contains(&n.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(QueryError::UnknownParameter(unknown));
    }

    Ok(names)
}

/// CoverageJSON/EDR parameter description of a dataset variable.
pub fn parameter_for(variable: &Variable) -> Parameter {
    let mut observed_property = match &variable.standard_name {
        Some(standard_name) => ObservedProperty::from_standard_name(standard_name),
        None => ObservedProperty::new(&variable.long_name),
    };
    if let Some(comment) = &variable.comment {
        observed_property = observed_property.with_description(comment);
    }

    Parameter::new(&variable.id, &variable.long_name)
        .with_description(&variable.long_name)
        .with_observed_property(observed_property)
        .with_unit(Unit::new(&variable.units, &variable.units))
}

/// Parameter dictionary for the given ids. Unknown ids are skipped.
pub fn parameter_dictionary<'a>(
    dataset: &Dataset,
    ids: impl IntoIterator<Item = &'a str>,
) -> BTreeMap<String, Parameter> {
    ids.into_iter()
        .filter_map(|id| dataset.variable(id))
        .map(|v| (v.id.clone(), parameter_for(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVAILABLE: [&str; 3] = ["dd", "ff", "ta"];

    #[test]
    fn test_parse_parameter_names() {
        assert_eq!(parse_parameter_names("ff, dd"), vec!["ff", "dd"]);
        assert_eq!(parse_parameter_names(" ff ,, ,dd "), vec!["ff", "dd"]);
        assert!(parse_parameter_names(" , ").is_empty());
    }

    #[test]
    fn test_absent_returns_reference_set() {
        assert_eq!(resolve_parameters(None, AVAILABLE).unwrap(), vec!["dd", "ff", "ta"]);
        assert_eq!(resolve_parameters(Some(" , "), AVAILABLE).unwrap(), vec!["dd", "ff", "ta"]);
    }

    #[test]
    fn test_request_order_and_dedup() {
        assert_eq!(
            resolve_parameters(Some("ta, ff, ta"), AVAILABLE).unwrap(),
            vec!["ta", "ff"]
        );
    }

    #[test]
    fn test_unknown_parameters_all_reported() {
        let err = resolve_parameters(Some("foo, ff, bar, foo"), AVAILABLE).unwrap_err();
        assert_eq!(
            err,
            QueryError::UnknownParameter(vec!["foo".to_string(), "bar".to_string()])
        );
    }

    #[test]
    fn test_empty_reference_set() {
        assert!(resolve_parameters(None, []).unwrap().is_empty());
        assert!(resolve_parameters(Some("ff"), []).is_err());
    }

    #[test]
    fn test_parameter_for_variable() {
        let variable = Variable {
            id: "ff".to_string(),
            long_name: "Wind Speed at 10m 10 Min Average".to_string(),
            standard_name: Some("wind_speed".to_string()),
            units: "m s-1".to_string(),
            comment: None,
        };

        let param = parameter_for(&variable);
        assert_eq!(param.id.as_deref(), Some("ff"));
        assert_eq!(
            param.observed_property.id.as_deref(),
            Some("https://vocab.nerc.ac.uk/standard_name/wind_speed")
        );
        assert_eq!(
            param.description.as_ref().map(|d| d.text()),
            Some("Wind Speed at 10m 10 Min Average")
        );
        assert_eq!(param.unit.unwrap().symbol.unwrap().value(), "m s-1");
    }

    #[test]
    fn test_parameter_without_standard_name() {
        let variable = Variable {
            id: "ww".to_string(),
            long_name: "Present weather".to_string(),
            standard_name: None,
            units: "code".to_string(),
            comment: Some("WMO code table 4680".to_string()),
        };

        let param = parameter_for(&variable);
        assert!(param.observed_property.id.is_none());
        assert_eq!(
            param.observed_property.description.unwrap().text(),
            "WMO code table 4680"
        );
    }
}
