use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use super::{json_kind, ValidationError};

/// Brewery classification used by Open Brewery DB.
///
/// `Large` and `Bar` are deprecated upstream but still valid tags.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BreweryType {
    Micro,
    Nano,
    Regional,
    Brewpub,
    Large,
    Planning,
    Bar,
    Contract,
    Proprietor,
    Closed,
}

impl BreweryType {
    pub fn description(self) -> &'static str {
        match self {
            Self::Micro => {
                "Most craft breweries. For example, Samual Adams is still considered a micro brewery."
            }
            Self::Nano => "An extremely small brewery which typically only distributes locally.",
            Self::Regional => {
                "A regional location of an expanded brewery. Ex. Sierra Nevada Asheville."
            }
            Self::Brewpub => {
                "A beer-focused restaurant or restaurant/bar with a brewery on-premise."
            }
            Self::Large => {
                "(DEPRECATED) A very large brewery. Likely not for visitors. Ex. Miller-Coors."
            }
            Self::Planning => "A brewery in planning or not yet opened to the public.",
            Self::Bar => "(DEPRECATED) A bar. No brewery equipment on premise.",
            Self::Contract => "A brewery that uses another brewery's equipment.",
            Self::Proprietor => "Similar to contract brewing but refers to a brewery incubator.",
            Self::Closed => "A location which has been closed.",
        }
    }

    /// `"<tag> - <description>"` for every type, in declaration order.
    pub fn details() -> Vec<String> {
        Self::iter()
            .map(|kind| format!("{kind} - {}", kind.description()))
            .collect()
    }
}

/// A brewery as returned by Open Brewery DB.
///
/// Unknown upstream fields are ignored so new upstream additions never break
/// decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brewery {
    pub id: String,
    pub name: String,
    pub brewery_type: BreweryType,
    #[serde(default)]
    pub address_1: Option<String>,
    #[serde(default)]
    pub address_2: Option<String>,
    #[serde(default)]
    pub address_3: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_province: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub country: String,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
}

impl Brewery {
    /// Minimal record with every optional field unset.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        brewery_type: BreweryType,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brewery_type,
            address_1: None,
            address_2: None,
            address_3: None,
            city: None,
            state_province: None,
            postal_code: None,
            country: country.into(),
            longitude: None,
            latitude: None,
            phone: None,
            website_url: None,
            state: None,
            street: None,
        }
    }

    /// Validate one decoded upstream value as a brewery record.
    pub fn from_value(raw: Value) -> Result<Self, ValidationError> {
        if !raw.is_object() {
            return Err(ValidationError::UnexpectedType {
                target: "brewery",
                expected: "object",
                found: json_kind(&raw),
            });
        }
        serde_json::from_value(raw).map_err(|source| ValidationError::Shape {
            target: "brewery",
            source,
        })
    }

    /// Validate a decoded upstream value as a list of breweries.
    ///
    /// All-or-nothing: the first invalid element rejects the whole list.
    pub fn list_from_value(raw: Value) -> Result<Vec<Self>, ValidationError> {
        let items = match raw {
            Value::Array(items) => items,
            other => {
                return Err(ValidationError::UnexpectedType {
                    target: "brewery list",
                    expected: "array",
                    found: json_kind(&other),
                })
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                Self::from_value(item).map_err(|e| ValidationError::Element {
                    index,
                    source: Box::new(e),
                })
            })
            .collect()
    }
}
