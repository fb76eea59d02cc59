//! Template↔instance resolution: fills `{token}` patterns with a
//! customer's field values, producing concrete strings for the compositor.
//!
//! Matching is case- and format-insensitive on both sides: token names and
//! customer field keys are normalized to lowercase ASCII with `_`, `-`, and
//! spaces stripped, so `{companyname}`, `companyName`, and `company_name`
//! all meet at `companyname`. A token with no matching field resolves to
//! the empty string (the compositor then skips it); a string that is not a
//! `{...}` pattern is design-time sample text and passes through verbatim.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Dimensions, Point};
use crate::template::{Placeholder, TextAlign, TextStyle};

/// A placeholder whose token has been substituted with a concrete value,
/// ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPlaceholder {
    pub key: String,
    /// Concrete text to draw. Empty means "unset field, draw nothing".
    pub text: String,
    pub position: Point,
    pub size: Dimensions,
    pub style: TextStyle,
    pub text_align: TextAlign,
}

impl ResolvedPlaceholder {
    fn from_placeholder(placeholder: &Placeholder, text: String) -> Self {
        Self {
            key: placeholder.key.clone(),
            text,
            position: placeholder.position,
            size: placeholder.size,
            style: placeholder.style.clone(),
            text_align: placeholder.text_align,
        }
    }
}

/// Normalize a token name or customer field key for matching.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|&c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The name inside a `{...}` token, or `None` for literal sample text.
/// Empty braces are not a token.
fn token_name(token: &str) -> Option<&str> {
    let inner = token.strip_prefix('{')?.strip_suffix('}')?;
    if inner.is_empty() { None } else { Some(inner) }
}

/// Substitute a customer's field values into a template's placeholders.
///
/// Never fails: unresolvable tokens become empty strings, non-token text
/// passes through unchanged, and output order follows input order (draw
/// order for the compositor).
pub fn resolve(
    placeholders: &[Placeholder],
    customer_fields: &HashMap<String, String>,
) -> Vec<ResolvedPlaceholder> {
    let normalized: HashMap<String, &str> = customer_fields
        .iter()
        .map(|(k, v)| (normalize_key(k), v.as_str()))
        .collect();

    placeholders
        .iter()
        .map(|placeholder| {
            let text = match token_name(&placeholder.token) {
                Some(name) => normalized
                    .get(&normalize_key(name))
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                None => placeholder.token.clone(),
            };
            ResolvedPlaceholder::from_placeholder(placeholder, text)
        })
        .collect()
}

/// Resolve every placeholder to its literal design-time text.
///
/// Used by the editor preview, where tokens are shown as typed instead of
/// substituted against a customer.
pub fn resolve_literal(placeholders: &[Placeholder]) -> Vec<ResolvedPlaceholder> {
    placeholders
        .iter()
        .map(|p| ResolvedPlaceholder::from_placeholder(p, p.token.clone()))
        .collect()
}
