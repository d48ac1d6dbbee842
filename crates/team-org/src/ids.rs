//! Identifier validation
//!
//! Workspace and user identifiers travel as hyphenated UUID strings.

use uuid::Uuid;

const HYPHENATED_LEN: usize = 36;

/// Parse a hyphenated UUID identifier.
///
/// Only the canonical `8-4-4-4-12` form is accepted; simple, braced and URN
/// forms are rejected.
///
/// # Examples
///
/// ```
/// use team_org::ids::parse_uid;
///
/// assert!(parse_uid("67e55044-10b1-426f-9247-bb680e5fe0c8").is_some());
/// assert!(parse_uid("67e5504410b1426f9247bb680e5fe0c8").is_none());
/// assert!(parse_uid("ns-team").is_none());
/// ```
pub fn parse_uid(s: &str) -> Option<Uuid> {
    if s.len() != HYPHENATED_LEN {
        return None;
    }
    Uuid::try_parse(s).ok()
}

/// Parse an optional identifier, treating absence as invalid.
pub fn parse_optional_uid(s: Option<&str>) -> Option<Uuid> {
    s.and_then(parse_uid)
}
