//! Text rendering of brewery records for tool replies.
//!
//! Output is markdown-flavored plain text and fully deterministic.

use crate::models::Brewery;

pub const UNKNOWN_BREWERY: &str = "Unknown brewery!";
pub const NO_BREWERIES: &str = "No breweries found.";

const SEPARATOR: &str = "\n\n---\n\n";

/// Render one brewery as a multi-line block.
///
/// Lines for absent data are left out rather than rendered empty. Coordinates
/// only appear when both are non-zero, so a brewery at exactly 0/0 shows none.
pub fn format_brewery(brewery: &Brewery) -> String {
    if brewery.name.is_empty() || brewery.id.is_empty() {
        return UNKNOWN_BREWERY.to_string();
    }

    let address = join_present(&[
        brewery.address_1.as_deref(),
        brewery.address_2.as_deref(),
        brewery.address_3.as_deref(),
    ]);

    let region = non_empty(brewery.state_province.as_deref()).or(brewery.state.as_deref());
    let location = join_present(&[
        brewery.city.as_deref(),
        region,
        brewery.postal_code.as_deref(),
        Some(brewery.country.as_str()),
    ]);

    let mut lines = vec![
        format!("🍺 **{}**", brewery.name),
        format!("**Type:** {}", brewery.brewery_type),
        format!("**ID:** {}", brewery.id),
    ];

    if !address.is_empty() {
        lines.push(format!("**Address:** {address}"));
    }
    if !location.is_empty() {
        lines.push(format!("**Location:** {location}"));
    }
    if let Some(phone) = non_empty(brewery.phone.as_deref()) {
        lines.push(format!("**Phone:** {phone}"));
    }
    if let Some(website) = non_empty(brewery.website_url.as_deref()) {
        lines.push(format!("**Website:** {website}"));
    }
    if let (Some(latitude), Some(longitude)) = (
        non_zero(brewery.latitude),
        non_zero(brewery.longitude),
    ) {
        lines.push(format!("**Coordinates:** {latitude}, {longitude}"));
    }

    lines.join("\n")
}

/// Render a result list with a count header, blocks separated by `---`.
pub fn format_breweries(breweries: &[Brewery]) -> String {
    if breweries.is_empty() {
        return NO_BREWERIES.to_string();
    }

    let noun = if breweries.len() == 1 {
        "brewery"
    } else {
        "breweries"
    };
    let blocks: Vec<String> = breweries.iter().map(format_brewery).collect();

    format!(
        "Found {} {noun}:\n\n{}",
        breweries.len(),
        blocks.join(SEPARATOR)
    )
}

/// Bulleted listing of the brewery type descriptions.
pub fn format_brewery_types(types: &[String]) -> String {
    let bullets: Vec<String> = types.iter().map(|t| format!("• {t}")).collect();
    format!("Available brewery types:\n\n{}", bullets.join("\n"))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

fn join_present(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .filter_map(|part| non_empty(*part))
        .collect::<Vec<_>>()
        .join(", ")
}
