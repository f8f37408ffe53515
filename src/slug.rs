//! URL slugs derived from human-readable titles.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

static DISALLOWED: OnceLock<Regex> = OnceLock::new();
static SEPARATORS: OnceLock<Regex> = OnceLock::new();
static VALID_SLUG: OnceLock<Regex> = OnceLock::new();

pub const SLUG_MAX: usize = 255;

/// Converts a title into a lowercase, hyphen-separated ASCII slug.
///
/// Accented letters are decomposed and reduced to their ASCII base; characters
/// with no ASCII form are dropped. Runs of spaces and hyphens collapse into a
/// single `-`, and leading or trailing `-`/`_` are trimmed.
pub fn slugify(title: &str) -> String {
    let disallowed = DISALLOWED.get_or_init(|| Regex::new(r"[^\w\s-]").expect("valid regex"));
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[-\s]+").expect("valid regex"));

    let ascii: String = title.nfkd().filter(char::is_ascii).collect();
    let lowered = ascii.to_lowercase();
    let cleaned = disallowed.replace_all(&lowered, "");
    separators
        .replace_all(&cleaned, "-")
        .trim_matches(|c| c == '-' || c == '_')
        .to_string()
}

/// True when `slug` is unset or blank, i.e. it should be derived from the title.
pub fn is_blank(slug: Option<&str>) -> bool {
    slug.map_or(true, |s| s.trim().is_empty())
}

/// Returns the existing slug when one is set, otherwise derives it from `title`.
pub fn ensure_slug(slug: Option<String>, title: &str) -> String {
    match slug {
        Some(s) if !is_blank(Some(&s)) => s,
        _ => slugify(title),
    }
}

/// Letters, digits, hyphens and underscores only, at most [`SLUG_MAX`] long.
pub fn is_valid_slug(slug: &str) -> bool {
    let valid = VALID_SLUG.get_or_init(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid regex"));
    slug.len() <= SLUG_MAX && valid.is_match(slug)
}
