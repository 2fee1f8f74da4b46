use async_trait::async_trait;

use crate::domain::{
    Category, CategoryChanges, LocalizedPost, NewCategory, NewPost, NewTranslation, Post,
    PostDetails, PostUpdate, Translation, TranslationUpdate,
};
use crate::error::RepoError;

/// Generic repository trait defining the standard read/delete operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Load every entity.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i32> {
    async fn insert(&self, category: NewCategory) -> Result<Category, RepoError>;

    async fn update(&self, id: i32, changes: CategoryChanges) -> Result<Category, RepoError>;
}

/// Post repository.
///
/// Multi-row writes (tag connect-or-create, association replacement, cascade
/// deletes) are atomic per call.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Post with categories, tags and translations.
    async fn find_details(&self, id: i32) -> Result<Option<PostDetails>, RepoError>;

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    async fn update(&self, update: PostUpdate) -> Result<Post, RepoError>;

    /// Delete the post with its translations, their SEO records and its
    /// category/tag links.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Translation repository. Translations are always returned with their SEO record.
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    async fn find_by_post_and_locale(
        &self,
        post_id: i32,
        locale: &str,
    ) -> Result<Option<Translation>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Translation>, RepoError>;

    async fn find_by_slug_and_locale(
        &self,
        slug: &str,
        locale: &str,
    ) -> Result<Option<LocalizedPost>, RepoError>;

    async fn list_by_post(&self, post_id: i32) -> Result<Vec<Translation>, RepoError>;

    /// Translations in `locale` whose post is published, newest post first.
    async fn list_published(&self, locale: &str) -> Result<Vec<LocalizedPost>, RepoError>;

    /// Insert the SEO record (if any) and the translation.
    async fn insert(&self, translation: NewTranslation) -> Result<Translation, RepoError>;

    async fn update(&self, update: TranslationUpdate) -> Result<Translation, RepoError>;

    /// Delete the SEO record first, then the translation row.
    async fn delete(&self, translation: &Translation) -> Result<(), RepoError>;
}
