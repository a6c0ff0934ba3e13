use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::shared::slug::slugify;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3})\s+(.+)$").expect("heading pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TocHeading {
    /// Anchor id: the slug of the heading text, with `-2`, `-3`, ...
    /// appended to repeats so every id in one document is distinct.
    pub id: String,
    pub text: String,
    /// 1 to 3.
    pub level: u8,
}

/// Table of contents for a markdown body: `#`, `##` and `###` headings in
/// document order. Lines inside fenced code blocks are ignored.
pub fn extract_toc(markdown: &str) -> Vec<TocHeading> {
    let mut headings = Vec::new();
    let mut taken = HashSet::new();
    let mut in_fence = false;

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let Some(caps) = HEADING.captures(line.trim_end()) else {
            continue;
        };

        let text = strip_closing_hashes(caps[2].trim()).to_string();
        if text.is_empty() {
            continue;
        }

        headings.push(TocHeading {
            id: unique_anchor(&mut taken, &text),
            level: caps[1].len() as u8,
            text,
        });
    }

    headings
}

fn unique_anchor(taken: &mut HashSet<String>, text: &str) -> String {
    let mut base = slugify(text);
    if base.is_empty() {
        base = "section".to_string();
    }

    let mut id = base.clone();
    let mut n = 2;
    while taken.contains(&id) {
        id = format!("{base}-{n}");
        n += 1;
    }

    taken.insert(id.clone());
    id
}

// "## Title ##" -> "Title", but "# C#" keeps its hash.
fn strip_closing_hashes(text: &str) -> &str {
    match text.rsplit_once(char::is_whitespace) {
        Some((head, tail)) if tail.chars().all(|c| c == '#') => head.trim_end(),
        _ => text,
    }
}
