// src/shared/patch_field.rs

use serde::{Deserialize, Serialize};

//
// ──────────────────────────────────────────────────────────
// PatchField (explicit PATCH semantics)
// ──────────────────────────────────────────────────────────
// Meaning:
// - Unset: field not provided => keep stored value
// - Null: explicitly null => clear the column (nullable fields only)
// - Value(v): replace with v
//
// Serde behavior (fields must carry #[serde(default)]):
// - omitted field => Unset
// - null => Null
// - value => Value(value)
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatchField<T> {
    #[serde(skip)]
    Unset,
    Null,
    Value(T),
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        PatchField::Unset
    }
}

impl<T> PatchField<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, PatchField::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PatchField::Null)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PatchField<U> {
        match self {
            PatchField::Unset => PatchField::Unset,
            PatchField::Null => PatchField::Null,
            PatchField::Value(v) => PatchField::Value(f(v)),
        }
    }
}

impl PatchField<String> {
    /// Rejects `null` and blank values for a column that must stay non-empty.
    pub fn require_text(&self, field: &str) -> Result<(), String> {
        match self {
            PatchField::Unset => Ok(()),
            PatchField::Null => Err(format!("{field} cannot be null")),
            PatchField::Value(v) if v.trim().is_empty() => Err(format!("{field} cannot be empty")),
            PatchField::Value(_) => Ok(()),
        }
    }
}

impl<T> PatchField<Vec<T>> {
    /// Lists may be replaced with an empty list but never nulled.
    pub fn require_list(&self, field: &str) -> Result<(), String> {
        if self.is_null() {
            Err(format!("{field} cannot be null"))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        title: PatchField<String>,
        #[serde(default)]
        image_url: PatchField<String>,
    }

    #[test]
    fn omitted_field_is_unset_and_null_is_null() {
        let body: Body = serde_json::from_str(r#"{ "image_url": null }"#).unwrap();
        assert!(body.title.is_unset());
        assert!(body.image_url.is_null());
    }

    #[test]
    fn value_is_value() {
        let body: Body = serde_json::from_str(r#"{ "title": "New" }"#).unwrap();
        assert!(matches!(body.title, PatchField::Value(ref t) if t == "New"));
    }

    #[test]
    fn require_text_rejects_null_and_blank() {
        assert!(PatchField::<String>::Unset.require_text("title").is_ok());
        assert!(PatchField::<String>::Null.require_text("title").is_err());
        assert!(PatchField::Value("  ".to_string()).require_text("title").is_err());
        assert!(PatchField::Value("ok".to_string()).require_text("title").is_ok());
    }

    #[test]
    fn require_list_allows_empty_but_not_null() {
        assert!(PatchField::Value(Vec::<String>::new()).require_list("tags").is_ok());
        assert!(PatchField::<Vec<String>>::Null.require_list("tags").is_err());
    }

    #[test]
    fn map_preserves_state() {
        let p = PatchField::Value(2).map(|v| v * 2);
        assert_eq!(p, PatchField::Value(4));
        assert_eq!(PatchField::<i32>::Null.map(|v| v * 2), PatchField::Null);
    }
}
