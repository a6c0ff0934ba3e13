// src/shared/tags.rs

use serde::{Deserialize, Deserializer, Serialize};

/// Ordered list of tags (repeats allowed) as submitted by the admin forms.
///
/// Accepts either a JSON array of strings or a single comma-separated
/// string (`"Rust, Actix ,  SQL"`). Entries are trimmed and empty entries
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn from_csv(raw: &str) -> Self {
        Self::from_items(raw.split(','))
    }

    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            items
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<TagList> for Vec<String> {
    fn from(tags: TagList) -> Self {
        tags.0
    }
}

impl<'de> Deserialize<'de> for TagList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            List(Vec<String>),
            Csv(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::List(items) => TagList::from_items(items),
            Raw::Csv(raw) => TagList::from_csv(&raw),
        })
    }
}
