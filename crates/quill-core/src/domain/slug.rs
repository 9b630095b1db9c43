//! Slugs and the id-or-slug addressing of blog posts.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

/// Lowercase alphanumerics and hyphens, at least one character.
pub static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("Valid slug pattern"));

/// Derive a slug from a post title.
///
/// The title is lowercased, every character outside `[a-z0-9]` and
/// whitespace is dropped, whitespace runs become a single hyphen and
/// hyphens at either end are trimmed. The result can be empty when the
/// title has no ASCII alphanumerics; validation rejects that afterwards.
pub fn derive_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let kept = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace());

    let mut slug = String::with_capacity(title.len());
    let mut in_gap = false;
    for c in kept {
        if c.is_whitespace() {
            in_gap = true;
            continue;
        }
        if in_gap && !slug.is_empty() {
            slug.push('-');
        }
        in_gap = false;
        slug.push(c);
    }
    slug
}

/// A path key addressing a blog post either by id or by slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogKey {
    Id(Uuid),
    Slug(String),
}

impl BlogKey {
    /// Anything that parses as a UUID is an id, everything else a slug.
    pub fn parse(raw: &str) -> Self {
        match Uuid::parse_str(raw) {
            Ok(id) => BlogKey::Id(id),
            Err(_) => BlogKey::Slug(raw.to_string()),
        }
    }
}

impl fmt::Display for BlogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlogKey::Id(id) => write!(f, "{id}"),
            BlogKey::Slug(slug) => f.write_str(slug),
        }
    }
}
