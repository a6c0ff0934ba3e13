// src/shared/slug.rs

use uuid::Uuid;

/// Turns a title into a lowercase, hyphen-separated, URL-safe token.
///
/// Characters other than ASCII letters, digits, whitespace and `-` are
/// dropped; whitespace runs become one hyphen, hyphen runs collapse, and
/// leading/trailing hyphens are trimmed. Titles made only of punctuation
/// yield an empty string, which callers treat as "no usable slug".
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        }
    }

    slug
}

/// `slugify(title)`, or the record identifier when the title has no
/// usable characters.
pub fn slug_or_id(title: &str, id: Uuid) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        id.to_string()
    } else {
        slug
    }
}

/// A slug is considered usable when it is non-empty after trimming.
pub fn has_usable_slug(slug: Option<&str>) -> bool {
    slug.map(|s| !s.trim().is_empty()).unwrap_or(false)
}
