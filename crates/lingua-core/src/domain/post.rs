use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, NewTag, Tag, Translation};
use crate::error::DomainError;

/// Lifecycle status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    #[default]
    Draft,
    Pending,
    Published,
    Private,
}

impl PostStatus {
    pub const ALL: [PostStatus; 4] = [
        PostStatus::Draft,
        PostStatus::Pending,
        PostStatus::Published,
        PostStatus::Private,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::Pending => "PENDING",
            PostStatus::Published => "PUBLISHED",
            PostStatus::Private => "PRIVATE",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                DomainError::Validation(
                    "Status must be one of DRAFT, PENDING, PUBLISHED, PRIVATE".to_string(),
                )
            })
    }
}

/// Post entity - the language-neutral root of a blog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Data for inserting a post. Posts always start as drafts.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    /// Connected as-is; the store rejects dangling ids.
    pub category_ids: Vec<i32>,
    /// Connected by slug, created when missing.
    pub tags: Vec<NewTag>,
    pub created_at: DateTime<Utc>,
}

/// Partial post update.
///
/// Scalar fields are written only when `Some`. `category_ids` and `tags`
/// replace the whole association set when `Some`.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: i32,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<PostStatus>,
    pub published_at: Option<DateTime<Utc>>,
    pub category_ids: Option<Vec<i32>>,
    pub tags: Option<Vec<NewTag>>,
    pub updated_at: DateTime<Utc>,
}

impl PostUpdate {
    pub fn new(id: i32, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            content: None,
            excerpt: None,
            featured_image: None,
            status: None,
            published_at: None,
            category_ids: None,
            tags: None,
            updated_at,
        }
    }

    /// Apply the scalar fields to a loaded post.
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(slug) = &self.slug {
            post.slug = slug.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(excerpt) = &self.excerpt {
            post.excerpt = Some(excerpt.clone());
        }
        if let Some(image) = &self.featured_image {
            post.featured_image = Some(image.clone());
        }
        if let Some(status) = self.status {
            post.status = status;
        }
        if let Some(published_at) = self.published_at {
            post.published_at = Some(published_at);
        }
        post.updated_at = self.updated_at;
    }
}

/// A post together with its categories and tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithTerms {
    #[serde(flatten)]
    pub post: Post,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

/// A post with every relation loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetails {
    #[serde(flatten)]
    pub post: Post,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub translations: Vec<Translation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_upper_case_names() {
        assert_eq!("PUBLISHED".parse::<PostStatus>().unwrap(), PostStatus::Published);
        assert_eq!("PRIVATE".parse::<PostStatus>().unwrap(), PostStatus::Private);
        assert!("published".parse::<PostStatus>().is_err());
    }

    #[test]
    fn status_serializes_as_upper_case() {
        let json = serde_json::to_string(&PostStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
    }

    #[test]
    fn update_applies_only_present_fields() {
        let now = Utc::now();
        let mut post = Post {
            id: 1,
            author_id: 1,
            title: "Old".to_string(),
            slug: "old".to_string(),
            content: "body".to_string(),
            excerpt: Some("short".to_string()),
            featured_image: None,
            status: PostStatus::Draft,
            published_at: None,
            created_at: now,
            updated_at: now,
        };

        let mut update = PostUpdate::new(1, now);
        update.title = Some("New".to_string());
        update.apply_to(&mut post);

        assert_eq!(post.title, "New");
        assert_eq!(post.slug, "old");
        assert_eq!(post.excerpt.as_deref(), Some("short"));
    }
}
