use rmcp::model::{AnnotateAble, RawResource, Resource, ResourceContents};

use crate::models::BreweryType;
use crate::services::format::format_brewery_types;

pub const BREWERY_TYPES_URI: &str = "brewery://types";
pub const BREWERY_TYPES_NAME: &str = "brewery/types";

/// Every resource the server publishes.
pub fn list() -> Vec<Resource> {
    let mut types = RawResource::new(BREWERY_TYPES_URI, BREWERY_TYPES_NAME);
    types.description = Some("Available brewery types and what they mean".to_string());
    types.mime_type = Some("text/plain".to_string());
    vec![types.no_annotation()]
}

/// Contents for `uri`, or `None` when the URI is not served here.
pub fn read(uri: &str) -> Option<Vec<ResourceContents>> {
    match uri {
        BREWERY_TYPES_URI => Some(vec![ResourceContents::text(
            format_brewery_types(&BreweryType::details()),
            uri,
        )]),
        _ => None,
    }
}
