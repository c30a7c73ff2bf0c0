//! Taxonomy normalization: raw vendor brand/category strings to canonical labels.
//!
//! Both the raw input and every rule variant go through the same cleaning
//! before comparison:
//!
//! 1. `+` becomes a space (form-encoded spaces).
//! 2. Percent-escapes are decoded. A string with a malformed escape
//!    (`"50% Off"`) or escapes that decode to invalid UTF-8 is kept as-is.
//! 3. Lowercase, then trim.
//!
//! Comparison is exact equality on the cleaned strings. Substring matching is
//! not used: short variants like `"new"` or `"con"` would otherwise claim
//! half the catalogue.

use std::borrow::Cow;

use omni_core::{RuleTable, UNCLASSIFIED_LABEL};
use percent_encoding::percent_decode_str;

/// A rule table with its variants pre-cleaned for repeated matching.
#[derive(Debug, Clone)]
pub struct Normalizer {
    entries: Vec<(String, Vec<String>)>,
}

impl Normalizer {
    #[must_use]
    pub fn new(table: &RuleTable) -> Self {
        let entries = table
            .rules()
            .iter()
            .map(|rule| {
                let variants = rule.variants.iter().map(|v| clean_label(v)).collect();
                (rule.label.clone(), variants)
            })
            .collect();
        Self { entries }
    }

    /// Resolves `raw` to its canonical label.
    ///
    /// Labels are tried in declaration order and, within a label, variants in
    /// declaration order; the first exact match wins. Missing or empty input,
    /// and input matching no variant, resolve to [`UNCLASSIFIED_LABEL`].
    #[must_use]
    pub fn normalize(&self, raw: Option<&str>) -> &str {
        let Some(raw) = raw.filter(|s| !s.is_empty()) else {
            return UNCLASSIFIED_LABEL;
        };

        let cleaned = clean_label(raw);
        self.entries
            .iter()
            .find(|(_, variants)| variants.iter().any(|v| *v == cleaned))
            .map_or(UNCLASSIFIED_LABEL, |(label, _)| label.as_str())
    }
}

/// One-shot form of [`Normalizer::normalize`].
///
/// Prefer building a [`Normalizer`] once when normalizing a whole feed.
#[must_use]
pub fn normalize_label(raw: Option<&str>, rules: &RuleTable) -> String {
    Normalizer::new(rules).normalize(raw).to_owned()
}

/// Applies the shared cleaning steps to a raw label or rule variant.
#[must_use]
pub fn clean_label(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let decoded = decode_component(&spaced).unwrap_or(Cow::Borrowed(spaced.as_str()));
    decoded.to_lowercase().trim().to_owned()
}

/// Strict percent-decoding: every `%` must start a two-hex-digit escape and
/// the decoded bytes must be UTF-8. Returns `None` otherwise.
fn decode_component(s: &str) -> Option<Cow<'_, str>> {
    let bytes = s.as_bytes();
    let well_formed = s.match_indices('%').all(|(idx, _)| {
        bytes.get(idx + 1).is_some_and(u8::is_ascii_hexdigit)
            && bytes.get(idx + 2).is_some_and(u8::is_ascii_hexdigit)
    });
    if !well_formed {
        return None;
    }
    percent_decode_str(s).decode_utf8().ok()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
