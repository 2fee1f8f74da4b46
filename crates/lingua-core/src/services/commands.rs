//! Service inputs. These are already validated by the caller.

use crate::domain::{PostStatus, SeoFields};

/// Input for `PostService::create_draft`.
#[derive(Debug, Clone, Default)]
pub struct CreateDraft {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category_ids: Vec<i32>,
    pub tag_names: Vec<String>,
}

/// Input for `PostService::update_post`. Absent fields are left untouched;
/// present lists replace the current associations.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<PostStatus>,
    pub category_ids: Option<Vec<i32>>,
    pub tag_names: Option<Vec<String>>,
}

/// Input for `PostService::create_translation`.
#[derive(Debug, Clone, Default)]
pub struct CreateTranslation {
    pub title: String,
    pub content: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub seo: Option<SeoFields>,
}

/// Input for `PostService::update_translation`.
#[derive(Debug, Clone, Default)]
pub struct TranslationPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub slug: Option<String>,
    /// Merged column-by-column into the existing SEO record, or stored as a
    /// new record when the translation has none.
    pub seo: Option<SeoFields>,
}
