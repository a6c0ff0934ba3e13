use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::content::domain::ContentRecord;
use crate::shared::patch_field::PatchField;

//
// ──────────────────────────────────────────────────────────
// Category
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ArticleCategory {
    Engineering,
    Tutorial,
    Career,
    Personal,
}

impl ArticleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleCategory::Engineering => "engineering",
            ArticleCategory::Tutorial => "tutorial",
            ArticleCategory::Career => "career",
            ArticleCategory::Personal => "personal",
        }
    }
}

impl fmt::Display for ArticleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "engineering" => Ok(ArticleCategory::Engineering),
            "tutorial" => Ok(ArticleCategory::Tutorial),
            "career" => Ok(ArticleCategory::Career),
            "personal" => Ok(ArticleCategory::Personal),
            other => Err(format!("unknown article category '{other}'")),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Article
// ──────────────────────────────────────────────────────────
//

/// `slug` is `None` for rows created before slugs existed; every read
/// path fills it in before the article leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    /// Markdown body.
    pub content: String,
    pub image_url: Option<String>,
    pub read_time: String,
    pub category: ArticleCategory,
    pub slug: Option<String>,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Option<String>,
    pub read_time: String,
    pub category: ArticleCategory,
    pub slug: Option<String>,
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    pub title: PatchField<String>,
    pub excerpt: PatchField<String>,
    pub content: PatchField<String>,
    pub image_url: PatchField<String>,
    pub read_time: PatchField<String>,
    pub category: PatchField<ArticleCategory>,
    /// `Null` clears the slug; it is regenerated on the next read.
    pub slug: PatchField<String>,
    pub visible: PatchField<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub category: Option<ArticleCategory>,
    pub include_hidden: bool,
}

impl ArticleFilter {
    pub fn public(category: Option<ArticleCategory>) -> Self {
        Self {
            category,
            include_hidden: false,
        }
    }

    pub fn admin(category: Option<ArticleCategory>) -> Self {
        Self {
            category,
            include_hidden: true,
        }
    }
}

impl ContentRecord for Article {
    type Draft = NewArticle;
    type Patch = ArticlePatch;
    type Filter = ArticleFilter;

    const KIND: &'static str = "article";
    const LABEL: &'static str = "Article";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn validate_draft(draft: &NewArticle) -> Result<(), String> {
        if draft.title.trim().is_empty() {
            return Err("title cannot be empty".to_string());
        }
        if draft.content.trim().is_empty() {
            return Err("content cannot be empty".to_string());
        }
        Ok(())
    }

    fn validate_patch(patch: &ArticlePatch) -> Result<(), String> {
        patch.title.require_text("title")?;
        patch.content.require_text("content")?;

        if patch.excerpt.is_null() {
            return Err("excerpt cannot be null".to_string());
        }
        if patch.read_time.is_null() {
            return Err("read_time cannot be null".to_string());
        }
        if patch.category.is_null() {
            return Err("category cannot be null".to_string());
        }
        if patch.visible.is_null() {
            return Err("visible cannot be null".to_string());
        }
        Ok(())
    }
}
