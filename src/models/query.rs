use garde::Validate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::QueryInput;

pub const MAX_PER_PAGE: u32 = 50;
pub const MAX_RANDOM_SIZE: u32 = 10;

/// Input for `brewery/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, JsonSchema)]
pub struct SearchQuery {
    /// Search query (brewery name, city, etc.)
    #[garde(skip)]
    #[serde(default)]
    pub query: Option<String>,

    /// Filter by city name
    #[garde(skip)]
    #[serde(default)]
    pub by_city: Option<String>,

    /// Filter by state (full name or abbreviation)
    #[garde(skip)]
    #[serde(default)]
    pub by_state: Option<String>,

    /// Filter by brewery type (micro, nano, regional, brewpub, large, planning, bar, contract, proprietor, closed)
    #[garde(skip)]
    #[serde(default)]
    pub by_type: Option<String>,

    /// Number of results per page (default: 20, max: 50)
    #[garde(range(min = 1, max = MAX_PER_PAGE))]
    #[serde(default)]
    pub per_page: Option<u32>,

    /// Page number (default: 1)
    #[garde(range(min = 1))]
    #[serde(default)]
    pub page: Option<u64>,
}

impl SearchQuery {
    /// Upstream query parameters, in a stable order.
    ///
    /// Absent and empty filters are left out entirely.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let filters = [
            ("by_name", self.query.as_deref()),
            ("by_city", self.by_city.as_deref()),
            ("by_state", self.by_state.as_deref()),
            ("by_type", self.by_type.as_deref()),
        ];

        let mut params: Vec<(&'static str, String)> = filters
            .into_iter()
            .filter_map(|(key, value)| match value {
                Some(v) if !v.is_empty() => Some((key, v.to_string())),
                _ => None,
            })
            .collect();

        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}

impl QueryInput for SearchQuery {
    const NAME: &'static str = "search query";

    fn normalize(mut self) -> Self {
        self.query = self.query.map(|q| q.trim().to_string());
        self
    }
}

/// Input for `brewery/by-id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, JsonSchema)]
pub struct ByIdQuery {
    /// Brewery ID
    #[garde(custom(not_blank))]
    pub id: String,
}

impl ByIdQuery {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl QueryInput for ByIdQuery {
    const NAME: &'static str = "brewery id query";

    fn normalize(mut self) -> Self {
        self.id = self.id.trim().to_string();
        self
    }
}

/// Input for `brewery/random`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, JsonSchema)]
pub struct RandomQuery {
    /// Number of random breweries to return (default: 1, max: 10)
    #[garde(range(min = 1, max = MAX_RANDOM_SIZE))]
    #[serde(default = "default_random_size")]
    pub size: u32,
}

impl Default for RandomQuery {
    fn default() -> Self {
        Self {
            size: default_random_size(),
        }
    }
}

impl QueryInput for RandomQuery {
    const NAME: &'static str = "random query";
}

fn default_random_size() -> u32 {
    1
}

fn not_blank(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;
    use serde_json::json;

    #[test]
    fn test_search_query_accepts_bounds() {
        for per_page in [1, 25, 50] {
            let query =
                SearchQuery::from_value(json!({ "per_page": per_page, "page": 1 })).unwrap();
            assert_eq!(query.per_page, Some(per_page));
        }
        let query = SearchQuery::from_value(json!({ "page": 9000 })).unwrap();
        assert_eq!(query.page, Some(9000));
        assert_eq!(SearchQuery::from_value(json!({})).unwrap(), SearchQuery::default());
    }

    #[test]
    fn test_search_query_accepts_page_beyond_u32() {
        let query = SearchQuery::from_value(json!({ "page": 5_000_000_000u64 })).unwrap();
        assert_eq!(query.page, Some(5_000_000_000));
        assert_eq!(query.to_params(), vec![("page", "5000000000".to_string())]);
    }

    #[test]
    fn test_search_query_treats_null_as_absent() {
        let query = SearchQuery::from_value(json!({
            "query": null,
            "by_city": null,
            "by_state": null,
            "by_type": null,
            "per_page": null,
            "page": null
        }))
        .unwrap();
        assert_eq!(query, SearchQuery::default());
        assert!(query.to_params().is_empty());
    }

    #[test]
    fn test_search_query_rejects_out_of_range() {
        for raw in [
            json!({ "per_page": 0 }),
            json!({ "per_page": 51 }),
            json!({ "page": 0 }),
            json!({ "page": -1 }),
        ] {
            assert!(SearchQuery::from_value(raw.clone()).is_err(), "{raw} should fail");
        }
        assert!(matches!(
            SearchQuery::from_value(json!({ "per_page": 51 })),
            Err(ValidationError::Constraint { .. })
        ));
    }

    #[test]
    fn test_search_query_rejects_wrong_types() {
        assert!(SearchQuery::from_value(json!({ "query": 42 })).is_err());
        assert!(SearchQuery::from_value(json!({ "by_city": true })).is_err());
        assert!(SearchQuery::from_value(json!({ "per_page": "10" })).is_err());
        assert!(SearchQuery::from_value(json!("dog")).is_err());
    }

    #[test]
    fn test_search_query_trims_query() {
        let query = SearchQuery::from_value(json!({ "query": "  Dog Fish  " })).unwrap();
        assert_eq!(query.query.as_deref(), Some("Dog Fish"));
    }

    #[test]
    fn test_search_params_mapping() {
        let query = SearchQuery {
            query: Some("Test".into()),
            by_city: Some("Austin".into()),
            by_state: None,
            by_type: Some("micro".into()),
            per_page: Some(10),
            page: Some(2),
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("by_name", "Test".to_string()),
                ("by_city", "Austin".to_string()),
                ("by_type", "micro".to_string()),
                ("per_page", "10".to_string()),
                ("page", "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_params_skip_empty_strings() {
        let query = SearchQuery::from_value(json!({
            "query": "   ", "by_city": "", "by_state": "", "by_type": ""
        }))
        .unwrap();
        assert!(query.to_params().is_empty());
    }

    #[test]
    fn test_by_id_query() {
        assert_eq!(ByIdQuery::from_value(json!({ "id": "abc" })).unwrap().id, "abc");
        assert_eq!(ByIdQuery::from_value(json!({ "id": " abc " })).unwrap().id, "abc");
        assert!(ByIdQuery::from_value(json!({ "id": "" })).is_err());
        assert!(ByIdQuery::from_value(json!({ "id": " " })).is_err());
        assert!(ByIdQuery::from_value(json!({})).is_err());
        assert!(ByIdQuery::from_value(json!({ "id": 7 })).is_err());
    }

    #[test]
    fn test_by_id_query_validated_directly() {
        assert!(ByIdQuery::new("\t\n").validated().is_err());
        assert_eq!(ByIdQuery::new(" x").validated().unwrap(), ByIdQuery::new("x"));
    }

    #[test]
    fn test_random_query_defaults_to_one() {
        assert_eq!(RandomQuery::from_value(json!({})).unwrap().size, 1);
        assert_eq!(RandomQuery::default().size, 1);
    }

    #[test]
    fn test_random_query_bounds() {
        for size in 1..=MAX_RANDOM_SIZE {
            assert_eq!(RandomQuery::from_value(json!({ "size": size })).unwrap().size, size);
        }
        assert!(RandomQuery::from_value(json!({ "size": 0 })).is_err());
        assert!(RandomQuery::from_value(json!({ "size": 11 })).is_err());
        assert!(RandomQuery::from_value(json!({ "size": 10.0001 })).is_err());
        assert!(RandomQuery { size: 11 }.validated().is_err());
    }
}
