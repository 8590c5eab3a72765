//! Parsing of the persisted entity-permission string.
//!
//! The upstream stores a role's entity restriction as one comma-delimited
//! string: the first token is the numeric entity-kind tag, the rest are raw
//! entity ids. Anything malformed degrades to "no entity restriction" and
//! the editor keeps the restriction section hidden.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::EntityKind;

lazy_static! {
    /// Kind tag followed by at least one id, all integer tokens.
    static ref ENTITY_PERMISSION_RE: Regex =
        Regex::new(r"^\s*\d+\s*(?:,\s*-?\d+\s*)+$").expect("valid entity permission regex");
}

/// A successfully parsed entity restriction, not yet resolved against a
/// pick list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntityRestriction {
    pub kind: EntityKind,
    pub ids: Vec<i64>,
}

/// Parse `"<kind>,<id>,<id>,..."`. Returns `None` for an unknown kind tag,
/// an unparsable token, or an empty id list.
pub fn parse(raw: &str) -> Option<ParsedEntityRestriction> {
    if !ENTITY_PERMISSION_RE.is_match(raw) {
        tracing::debug!(raw, "entity permission string did not parse, treating role as unrestricted");
        return None;
    }

    let mut tokens = raw.split(',').map(str::trim);
    let kind = tokens
        .next()
        .and_then(|tag| tag.parse::<i64>().ok())
        .and_then(EntityKind::from_tag)?;

    let ids: Vec<i64> = tokens.map(|t| t.parse::<i64>().ok()).collect::<Option<_>>()?;
    if ids.is_empty() {
        return None;
    }

    Some(ParsedEntityRestriction { kind, ids })
}
