//! EDR Collection types.
//!
//! Collections represent datasets available through the EDR API.
//! A station observation collection advertises the `locations` and
//! `area` data queries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::parameters::Parameter;
use crate::types::{Extent, Link};

/// Output format name advertised for CoverageJSON responses.
pub const COVERAGE_JSON_FORMAT: &str = "CoverageJSON";

/// A list of collections available from the EDR API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionList {
    /// Links to related resources.
    pub links: Vec<Link>,

    /// The collections.
    pub collections: Vec<Collection>,
}

impl CollectionList {
    /// Create a new collection list.
    pub fn new(collections: Vec<Collection>, base_url: &str) -> Self {
        Self {
            links: vec![Link::new(format!("{}/collections", base_url), "self")
                .with_type("application/json")],
            collections,
        }
    }
}

/// An EDR collection representing a dataset or data source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    /// Unique identifier for the collection.
    pub id: String,

    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Detailed description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Keywords for discovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Links to related resources.
    pub links: Vec<Link>,

    /// Spatial and temporal extent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,

    /// Available query types and their links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_queries: Option<DataQueries>,

    /// Coordinate reference systems supported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs: Option<Vec<String>>,

    /// Output formats supported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_formats: Option<Vec<String>>,

    /// Parameters available in this collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_names: Option<BTreeMap<String, Parameter>>,
}

impl Collection {
    /// Create a new collection with required fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            keywords: None,
            links: Vec::new(),
            extent: None,
            data_queries: None,
            crs: None,
            output_formats: None,
            parameter_names: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the keywords.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// Set the extent.
    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Set the data queries.
    pub fn with_data_queries(mut self, queries: DataQueries) -> Self {
        self.data_queries = Some(queries);
        self
    }

    /// Set supported CRS.
    pub fn with_crs(mut self, crs: Vec<String>) -> Self {
        self.crs = Some(crs);
        self
    }

    /// Set output formats.
    pub fn with_output_formats(mut self, formats: Vec<String>) -> Self {
        self.output_formats = Some(formats);
        self
    }

    /// Set parameters.
    pub fn with_parameters(mut self, params: BTreeMap<String, Parameter>) -> Self {
        self.parameter_names = Some(params);
        self
    }

    /// Build standard links for a collection.
    pub fn build_links(&mut self, base_url: &str) {
        let collection_url = format!("{}/collections/{}", base_url, self.id);
        self.links = vec![
            Link::new(&collection_url, "self").with_type("application/json"),
            Link::new(base_url, "root").with_type("application/json"),
            Link::new(format!("{}/locations", collection_url), "data")
                .with_type("application/geo+json")
                .with_title("Locations"),
        ];
    }
}

/// Supported data query types for a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DataQueries {
    /// Area query (polygon sampling).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<QueryDescription>,

    /// Locations query (named locations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<QueryDescription>,
}

impl DataQueries {
    /// Create a new DataQueries with the locations query enabled.
    pub fn with_locations(base_url: &str, collection_id: &str) -> Self {
        Self {
            locations: Some(QueryDescription::new(
                format!("{}/collections/{}/locations", base_url, collection_id),
                "locations",
                "Locations query",
            )),
            ..Default::default()
        }
    }

    /// Add area query support.
    pub fn with_area(mut self, base_url: &str, collection_id: &str) -> Self {
        self.area = Some(QueryDescription::new(
            format!("{}/collections/{}/area", base_url, collection_id),
            "area",
            "Area query",
        ));
        self
    }
}

/// Description of a query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryDescription {
    /// Link to the query endpoint.
    pub link: QueryLink,
}

impl QueryDescription {
    /// Describe a query that answers in CoverageJSON.
    pub fn new(href: impl Into<String>, query_type: &str, title: &str) -> Self {
        Self {
            link: QueryLink {
                link: Link::new(href, "data")
                    .with_type("application/vnd.cov+json")
                    .with_title(title),
                variables: QueryVariables::new(query_type),
            },
        }
    }
}

/// A query link together with its query variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryLink {
    /// The link itself.
    #[serde(flatten)]
    pub link: Link,

    /// Settings specific to this query type.
    pub variables: QueryVariables,
}

/// Variables/settings specific to a query type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryVariables {
    /// The query type (e.g. "locations", "area").
    pub query_type: String,

    /// Output formats the query can produce.
    pub output_formats: Vec<String>,

    /// Format returned when none is requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_output_format: Option<String>,
}

impl QueryVariables {
    /// Variables for a query producing CoverageJSON only.
    pub fn new(query_type: impl Into<String>) -> Self {
        Self {
            query_type: query_type.into(),
            output_formats: vec![COVERAGE_JSON_FORMAT.to_string()],
            default_output_format: Some(COVERAGE_JSON_FORMAT.to_string()),
        }
    }
}
