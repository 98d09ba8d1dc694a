//! Query string parsing.

use crate::request::Params;

/// Parses a query string into a flat map.
///
/// A single leading `?` is ignored. Pairs are `application/x-www-form-urlencoded`
/// decoded; a key without `=` maps to an empty value and the last occurrence
/// of a repeated key wins.
///
/// # Example
///
/// ```
/// use waypoint::parse_query_string;
///
/// let query = parse_query_string("?name=John+Doe&city=New%20York");
/// assert_eq!(query.get("name"), Some("John Doe"));
/// assert_eq!(query.get("city"), Some("New York"));
/// ```
#[must_use]
pub fn parse_query_string(query: &str) -> Params {
    let query = query.strip_prefix('?').unwrap_or(query);

    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
