//! Search query validation.
//!
//! A query is accepted when it is present and contains at least one
//! non-whitespace character. The value forwarded upstream is the caller's
//! text as given; trimming only decides whether it is blank.
//!
//! Blankness uses the whitespace set of browser and JavaScript clients
//! (`String.prototype.trim`): Unicode `White_Space` plus U+FEFF (BOM), minus
//! U+0085 (NEL).

use crate::error::{Result, SearchError};

/// Validate a raw `q` value.
///
/// # Examples
///
/// ```
/// use geoproxy::query::validate_query;
///
/// assert_eq!(validate_query(Some("Paris")).unwrap(), "Paris");
/// assert_eq!(validate_query(Some(" Paris ")).unwrap(), " Paris ");
/// assert!(validate_query(Some("   ")).is_err());
/// assert!(validate_query(None).is_err());
/// ```
pub fn validate_query(raw: Option<&str>) -> Result<&str> {
    match raw {
        Some(q) if !q.trim_matches(is_query_whitespace).is_empty() => Ok(q),
        _ => Err(SearchError::InvalidQuery),
    }
}

/// Whitespace ignored when deciding whether a query is blank.
fn is_query_whitespace(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        _ => c.is_whitespace(),
    }
}

/// Pick the single `q` value out of decoded query-string pairs.
///
/// Returns `None` when `q` is absent or appears more than once; a repeated
/// key is a list, not a string, and is rejected like a missing one.
///
/// # Examples
///
/// ```
/// use geoproxy::query::single_param;
///
/// let pairs = vec![("q".to_string(), "Paris".to_string())];
/// assert_eq!(single_param(&pairs, "q"), Some("Paris"));
///
/// let repeated = vec![
///     ("q".to_string(), "Paris".to_string()),
///     ("q".to_string(), "Lyon".to_string()),
/// ];
/// assert_eq!(single_param(&repeated, "q"), None);
/// ```
pub fn single_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    let mut values = pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v);
    match (values.next(), values.next()) {
        (Some(value), None) => Some(value.as_str()),
        _ => None,
    }
}
