//! Data Transfer Objects - request bodies of the API.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Body of `POST /posts`. The author comes from the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    pub category_ids: Vec<i32>,
    pub tag_names: Vec<String>,
}

/// Body of `PUT /posts/{id}`. Absent fields stay untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    /// One of `DRAFT`, `PENDING`, `PUBLISHED`, `PRIVATE`.
    pub status: Option<String>,
    pub category_ids: Option<Vec<i32>>,
    pub tag_names: Option<Vec<String>>,
}

/// SEO block of a translation request. Event dates are ISO-8601 strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoDataRequest {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical_url: Option<String>,
    pub robots: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_type: Option<String>,
    pub og_url: Option<String>,
    pub og_image_url: Option<String>,
    pub og_image_alt: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_site: Option<String>,
    pub twitter_creator: Option<String>,
    pub event_name: Option<String>,
    pub event_description: Option<String>,
    pub event_start_date: Option<String>,
    pub event_end_date: Option<String>,
    pub event_url: Option<String>,
    pub event_image_url: Option<String>,
    pub event_location_name: Option<String>,
    pub event_location_street: Option<String>,
    pub event_location_city: Option<String>,
    pub event_location_region: Option<String>,
    pub event_location_postal: Option<String>,
    pub event_location_country: Option<String>,
}

/// Body of `POST /posts/{id}/translation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTranslationRequest {
    /// e.g. "en", "ru"
    pub locale: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub seo_data: Option<SeoDataRequest>,
}

/// Body of `PUT /posts/{id}/translation/{locale}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTranslationRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub slug: Option<String>,
    pub seo_data: Option<SeoDataRequest>,
}

/// Body of `POST /categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i32>,
}

/// Body of `PATCH /categories/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}
