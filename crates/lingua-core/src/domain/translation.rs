use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, PostWithTerms, SeoData, SeoFields, SeoWrite, Tag};

/// Per-locale rendition of a post.
///
/// At most one translation exists per `(post_id, locale)` and its slug is
/// unique among translations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub id: i32,
    pub post_id: i32,
    pub locale: String,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub seo: Option<SeoData>,
}

/// Data for inserting a translation (and its SEO record, if any).
#[derive(Debug, Clone)]
pub struct NewTranslation {
    pub post_id: i32,
    pub locale: String,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub seo: Option<SeoFields>,
}

/// Partial translation update.
#[derive(Debug, Clone)]
pub struct TranslationUpdate {
    pub id: i32,
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub slug: Option<String>,
    pub seo: Option<SeoWrite>,
}

impl TranslationUpdate {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            title: None,
            content: None,
            excerpt: None,
            slug: None,
            seo: None,
        }
    }
}

/// A translation joined with its parent post, categories and tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedPost {
    #[serde(flatten)]
    pub translation: Translation,
    pub post: PostWithTerms,
}

/// Parent-post fields shown next to a published translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostProjection {
    pub slug: String,
    pub excerpt: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub featured_image: Option<String>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

impl From<PostWithTerms> for PostProjection {
    fn from(value: PostWithTerms) -> Self {
        Self {
            slug: value.post.slug,
            excerpt: value.post.excerpt,
            published_at: value.post.published_at,
            featured_image: value.post.featured_image,
            categories: value.categories,
            tags: value.tags,
        }
    }
}

/// Entry of the published listing for one locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedTranslation {
    #[serde(flatten)]
    pub translation: Translation,
    pub post: PostProjection,
}

impl From<LocalizedPost> for PublishedTranslation {
    fn from(value: LocalizedPost) -> Self {
        Self {
            translation: value.translation,
            post: value.post.into(),
        }
    }
}
