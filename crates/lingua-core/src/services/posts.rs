use std::sync::Arc;

use crate::domain::{
    LocalizedPost, NewPost, NewTag, NewTranslation, Post, PostDetails, PostStatus, PostUpdate,
    PublishedTranslation, SeoWrite, Translation, TranslationUpdate,
};
use crate::error::{DomainError, DomainResult};
use crate::ports::{Clock, PostRepository, TranslationRepository};

use super::commands::{CreateDraft, CreateTranslation, PostPatch, TranslationPatch};

/// Owns the post aggregate: posts, their category/tag links, lifecycle and
/// per-locale translations with SEO data.
///
/// Uniqueness is checked here first so callers get a precise `Conflict`; the
/// store's unique constraints remain the final guard and surface as
/// `Conflict` too.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    translations: Arc<dyn TranslationRepository>,
    clock: Arc<dyn Clock>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        translations: Arc<dyn TranslationRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            translations,
            clock,
        }
    }

    /// Create a new post in `DRAFT` status.
    pub async fn create_draft(&self, author_id: i32, input: CreateDraft) -> DomainResult<Post> {
        self.ensure_post_slug_free(&input.slug).await?;

        let post = self
            .posts
            .insert(NewPost {
                author_id,
                title: input.title,
                slug: input.slug,
                content: input.content,
                excerpt: input.excerpt,
                featured_image: input.featured_image,
                category_ids: dedupe_ids(input.category_ids),
                tags: resolve_tags(input.tag_names),
                created_at: self.clock.now(),
            })
            .await?;

        tracing::info!(post_id = post.id, slug = %post.slug, "Draft created");
        Ok(post)
    }

    pub async fn get_post_by_id(&self, id: i32) -> DomainResult<PostDetails> {
        self.posts
            .find_details(id)
            .await?
            .ok_or_else(|| post_not_found(id))
    }

    /// Apply a partial update. Category and tag lists replace the current sets.
    pub async fn update_post(&self, id: i32, patch: PostPatch) -> DomainResult<Post> {
        let existing = self.require_post(id).await?;

        if let Some(slug) = &patch.slug {
            if *slug != existing.slug {
                self.ensure_post_slug_free(slug).await?;
            }
        }

        let now = self.clock.now();
        let mut update = PostUpdate::new(id, now);
        update.title = patch.title;
        update.slug = patch.slug;
        update.content = patch.content;
        update.excerpt = patch.excerpt;
        update.featured_image = patch.featured_image;
        update.status = patch.status;
        if patch.status == Some(PostStatus::Published) && !existing.is_published() {
            update.published_at = Some(now);
        }
        update.category_ids = patch.category_ids.map(dedupe_ids);
        update.tags = patch.tag_names.map(resolve_tags);

        Ok(self.posts.update(update).await?)
    }

    /// Publish a post. Publishing an already published post is a no-op.
    ///
    /// Any other status, `PRIVATE` included, may be published.
    pub async fn publish_post(&self, id: i32) -> DomainResult<Post> {
        let existing = self.require_post(id).await?;
        if existing.is_published() {
            return Ok(existing);
        }

        let now = self.clock.now();
        let mut update = PostUpdate::new(id, now);
        update.status = Some(PostStatus::Published);
        update.published_at = Some(now);

        let post = self.posts.update(update).await?;
        tracing::info!(post_id = post.id, "Post published");
        Ok(post)
    }

    /// Delete a post together with its translations and their SEO records.
    pub async fn delete_post(&self, id: i32) -> DomainResult<()> {
        self.require_post(id).await?;
        self.posts.delete(id).await?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    /// Published translations for a locale, newest post first.
    pub async fn list_published_posts(
        &self,
        locale: &str,
    ) -> DomainResult<Vec<PublishedTranslation>> {
        let entries = self.translations.list_published(locale).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_slug_and_locale(
        &self,
        slug: &str,
        locale: &str,
    ) -> DomainResult<LocalizedPost> {
        self.translations
            .find_by_slug_and_locale(slug, locale)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("Post", format!("slug=\"{slug}\", locale=\"{locale}\""))
            })
    }

    /// All translations of a post.
    pub async fn list_translations(&self, post_id: i32) -> DomainResult<Vec<Translation>> {
        self.require_post(post_id).await?;
        Ok(self.translations.list_by_post(post_id).await?)
    }

    pub async fn create_translation(
        &self,
        post_id: i32,
        locale: &str,
        input: CreateTranslation,
    ) -> DomainResult<Translation> {
        self.require_post(post_id).await?;

        if self
            .translations
            .find_by_post_and_locale(post_id, locale)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(format!(
                "Translation for locale \"{locale}\" already exists"
            )));
        }
        self.ensure_translation_slug_free(&input.slug).await?;

        let translation = self
            .translations
            .insert(NewTranslation {
                post_id,
                locale: locale.to_string(),
                slug: input.slug,
                title: input.title,
                content: input.content,
                excerpt: input.excerpt,
                seo: input.seo,
            })
            .await?;

        tracing::info!(post_id, locale, translation_id = translation.id, "Translation created");
        Ok(translation)
    }

    pub async fn update_translation(
        &self,
        post_id: i32,
        locale: &str,
        patch: TranslationPatch,
    ) -> DomainResult<Translation> {
        let existing = self.require_translation(post_id, locale).await?;

        if let Some(slug) = &patch.slug {
            if *slug != existing.slug {
                self.ensure_translation_slug_free(slug).await?;
            }
        }

        let seo = patch.seo.map(|incoming| match existing.seo {
            Some(current) => {
                let mut fields = current.fields;
                fields.merge(incoming);
                SeoWrite::Update {
                    id: current.id,
                    fields,
                }
            }
            None => SeoWrite::Create(incoming),
        });

        let mut update = TranslationUpdate::new(existing.id);
        update.title = patch.title;
        update.content = patch.content;
        update.excerpt = patch.excerpt;
        update.slug = patch.slug;
        update.seo = seo;

        Ok(self.translations.update(update).await?)
    }

    /// Delete a translation. Its SEO record goes first.
    pub async fn delete_translation(&self, post_id: i32, locale: &str) -> DomainResult<()> {
        let existing = self.require_translation(post_id, locale).await?;
        self.translations.delete(&existing).await?;
        tracing::info!(post_id, locale, "Translation deleted");
        Ok(())
    }

    async fn require_post(&self, id: i32) -> DomainResult<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| post_not_found(id))
    }

    async fn require_translation(&self, post_id: i32, locale: &str) -> DomainResult<Translation> {
        self.translations
            .find_by_post_and_locale(post_id, locale)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    "Translation",
                    format!("postId={post_id}, locale=\"{locale}\""),
                )
            })
    }

    async fn ensure_post_slug_free(&self, slug: &str) -> DomainResult<()> {
        if self.posts.find_by_slug(slug).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Post with slug \"{slug}\" already exists"
            )));
        }
        Ok(())
    }

    async fn ensure_translation_slug_free(&self, slug: &str) -> DomainResult<()> {
        if self.translations.find_by_slug(slug).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Translation with slug \"{slug}\" already exists"
            )));
        }
        Ok(())
    }
}

fn post_not_found(id: i32) -> DomainError {
    DomainError::not_found("Post", format!("id={id}"))
}

fn dedupe_ids(ids: Vec<i32>) -> Vec<i32> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

fn resolve_tags(names: Vec<String>) -> Vec<NewTag> {
    let mut tags: Vec<NewTag> = Vec::with_capacity(names.len());
    for tag in names.into_iter().map(NewTag::from_name) {
        // "Rust" and "rust " are the same tag; the first spelling wins.
        if !tags.iter().any(|t| t.slug == tag.slug) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_tags_dedupes_by_slug() {
        let tags = resolve_tags(vec![
            "Rust".to_string(),
            "rust ".to_string(),
            "Web Dev".to_string(),
        ]);
        let slugs: Vec<_> = tags.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["rust", "web-dev"]);
        assert_eq!(tags[0].name, "Rust");
    }

    #[test]
    fn dedupe_ids_keeps_first_occurrence() {
        assert_eq!(dedupe_ids(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }
}
