//! In-memory blog store - used as fallback when PostgreSQL is unavailable.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use lingua_core::domain::{
    Category, CategoryChanges, LocalizedPost, NewCategory, NewPost, NewTag, NewTranslation, Post,
    PostDetails, PostStatus, PostUpdate, PostWithTerms, SeoData, SeoFields, SeoWrite, Tag,
    Translation, TranslationUpdate,
};
use lingua_core::error::RepoError;
use lingua_core::ports::{
    BaseRepository, CategoryRepository, PostRepository, TranslationRepository,
};

struct TranslationRow {
    id: i32,
    post_id: i32,
    locale: String,
    slug: String,
    title: String,
    content: String,
    excerpt: Option<String>,
    seo_id: Option<i32>,
}

#[derive(Default)]
struct Sequences {
    category: i32,
    tag: i32,
    post: i32,
    translation: i32,
    seo: i32,
}

fn next_id(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

#[derive(Default)]
struct State {
    seq: Sequences,
    categories: BTreeMap<i32, Category>,
    tags: BTreeMap<i32, Tag>,
    posts: BTreeMap<i32, Post>,
    /// (post_id, category_id)
    post_categories: BTreeSet<(i32, i32)>,
    /// (post_id, tag_id)
    post_tags: BTreeSet<(i32, i32)>,
    translations: BTreeMap<i32, TranslationRow>,
    seo: BTreeMap<i32, SeoFields>,
}

fn unique_violation(what: &str, value: &str) -> RepoError {
    RepoError::Constraint(format!("Unique constraint violated: {what} '{value}'"))
}

fn links_of(set: &BTreeSet<(i32, i32)>, post_id: i32) -> impl Iterator<Item = i32> + '_ {
    set.range((post_id, i32::MIN)..=(post_id, i32::MAX))
        .map(|&(_, other)| other)
}

impl State {
    fn check_category_slug(&self, slug: &str, except: Option<i32>) -> Result<(), RepoError> {
        let taken = self
            .categories
            .values()
            .any(|c| c.slug == slug && Some(c.id) != except);
        if taken {
            return Err(unique_violation("category slug", slug));
        }
        Ok(())
    }

    fn check_category_exists(&self, id: i32) -> Result<(), RepoError> {
        if !self.categories.contains_key(&id) {
            return Err(RepoError::Constraint(format!(
                "Referenced record does not exist: category {id}"
            )));
        }
        Ok(())
    }

    fn check_post_slug(&self, slug: &str, except: Option<i32>) -> Result<(), RepoError> {
        let taken = self
            .posts
            .values()
            .any(|p| p.slug == slug && Some(p.id) != except);
        if taken {
            return Err(unique_violation("post slug", slug));
        }
        Ok(())
    }

    fn check_translation_slug(&self, slug: &str, except: Option<i32>) -> Result<(), RepoError> {
        let taken = self
            .translations
            .values()
            .any(|t| t.slug == slug && Some(t.id) != except);
        if taken {
            return Err(unique_violation("translation slug", slug));
        }
        Ok(())
    }

    fn terms(&self, post_id: i32) -> (Vec<Category>, Vec<Tag>) {
        let categories = links_of(&self.post_categories, post_id)
            .filter_map(|id| self.categories.get(&id).cloned())
            .collect();
        let tags = links_of(&self.post_tags, post_id)
            .filter_map(|id| self.tags.get(&id).cloned())
            .collect();
        (categories, tags)
    }

    fn post_with_terms(&self, post: &Post) -> PostWithTerms {
        let (categories, tags) = self.terms(post.id);
        PostWithTerms {
            post: post.clone(),
            categories,
            tags,
        }
    }

    fn translation(&self, row: &TranslationRow) -> Translation {
        let seo = row.seo_id.and_then(|id| {
            self.seo.get(&id).map(|fields| SeoData {
                id,
                fields: fields.clone(),
            })
        });
        Translation {
            id: row.id,
            post_id: row.post_id,
            locale: row.locale.clone(),
            slug: row.slug.clone(),
            title: row.title.clone(),
            content: row.content.clone(),
            excerpt: row.excerpt.clone(),
            seo,
        }
    }

    fn localized(&self, row: &TranslationRow) -> Result<LocalizedPost, RepoError> {
        let post = self.posts.get(&row.post_id).ok_or(RepoError::NotFound)?;
        Ok(LocalizedPost {
            translation: self.translation(row),
            post: self.post_with_terms(post),
        })
    }

    fn set_categories(&mut self, post_id: i32, category_ids: &[i32]) {
        self.post_categories.retain(|&(p, _)| p != post_id);
        self.post_categories
            .extend(category_ids.iter().map(|&c| (post_id, c)));
    }

    /// Connect tags by slug, creating the missing ones.
    fn set_tags(&mut self, post_id: i32, tags: &[NewTag]) {
        self.post_tags.retain(|&(p, _)| p != post_id);
        for new_tag in tags {
            let existing = self
                .tags
                .values()
                .find(|t| t.slug == new_tag.slug)
                .map(|t| t.id);
            let tag_id = match existing {
                Some(id) => id,
                None => {
                    let id = next_id(&mut self.seq.tag);
                    self.tags.insert(
                        id,
                        Tag {
                            id,
                            name: new_tag.name.clone(),
                            slug: new_tag.slug.clone(),
                        },
                    );
                    id
                }
            };
            self.post_tags.insert((post_id, tag_id));
        }
    }

    fn insert_seo(&mut self, fields: SeoFields) -> i32 {
        let id = next_id(&mut self.seq.seo);
        self.seo.insert(id, fields);
        id
    }
}

/// In-memory implementation of every repository port.
///
/// All state sits behind one async `RwLock`, so each call is atomic. Writes
/// check every constraint before touching state; a rejected write leaves
/// nothing behind.
/// Note: Data is lost on process restart.
pub struct InMemoryBlogStore {
    state: RwLock<State>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }
}

impl Default for InMemoryBlogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Category, i32> for InMemoryBlogStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError> {
        let state = self.state.read().await;
        Ok(state.categories.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        let state = self.state.read().await;
        Ok(state.categories.values().cloned().collect())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        if state.categories.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        for child in state.categories.values_mut() {
            if child.parent_id == Some(id) {
                child.parent_id = None;
            }
        }
        state.post_categories.retain(|&(_, c)| c != id);
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryBlogStore {
    async fn insert(&self, category: NewCategory) -> Result<Category, RepoError> {
        let mut state = self.state.write().await;
        state.check_category_slug(&category.slug, None)?;
        if let Some(parent_id) = category.parent_id {
            state.check_category_exists(parent_id)?;
        }

        let id = next_id(&mut state.seq.category);
        let created = Category {
            id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            parent_id: category.parent_id,
        };
        state.categories.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, changes: CategoryChanges) -> Result<Category, RepoError> {
        let mut state = self.state.write().await;
        let mut category = state.categories.get(&id).cloned().ok_or(RepoError::NotFound)?;

        if let Some(slug) = &changes.slug {
            state.check_category_slug(slug, Some(id))?;
        }
        if let Some(parent_id) = changes.parent_id {
            state.check_category_exists(parent_id)?;
        }

        changes.apply_to(&mut category);
        state.categories.insert(id, category.clone());
        Ok(category)
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn find_details(&self, id: i32) -> Result<Option<PostDetails>, RepoError> {
        let state = self.state.read().await;
        let Some(post) = state.posts.get(&id) else {
            return Ok(None);
        };

        let (categories, tags) = state.terms(id);
        let translations = state
            .translations
            .values()
            .filter(|t| t.post_id == id)
            .map(|t| state.translation(t))
            .collect();

        Ok(Some(PostDetails {
            post: post.clone(),
            categories,
            tags,
            translations,
        }))
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        state.check_post_slug(&new_post.slug, None)?;
        for &category_id in &new_post.category_ids {
            state.check_category_exists(category_id)?;
        }

        let id = next_id(&mut state.seq.post);
        let post = Post {
            id,
            author_id: new_post.author_id,
            title: new_post.title,
            slug: new_post.slug,
            content: new_post.content,
            excerpt: new_post.excerpt,
            featured_image: new_post.featured_image,
            status: PostStatus::Draft,
            published_at: None,
            created_at: new_post.created_at,
            updated_at: new_post.created_at,
        };
        state.posts.insert(id, post.clone());
        state.set_categories(id, &new_post.category_ids);
        state.set_tags(id, &new_post.tags);
        Ok(post)
    }

    async fn update(&self, update: PostUpdate) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        let mut post = state.posts.get(&update.id).cloned().ok_or(RepoError::NotFound)?;

        if let Some(slug) = &update.slug {
            state.check_post_slug(slug, Some(update.id))?;
        }
        if let Some(category_ids) = &update.category_ids {
            for &category_id in category_ids {
                state.check_category_exists(category_id)?;
            }
        }

        update.apply_to(&mut post);
        state.posts.insert(post.id, post.clone());
        if let Some(category_ids) = &update.category_ids {
            state.set_categories(post.id, category_ids);
        }
        if let Some(tags) = &update.tags {
            state.set_tags(post.id, tags);
        }
        Ok(post)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        if state.posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        let removed: Vec<TranslationRow> = {
            let ids: Vec<i32> = state
                .translations
                .values()
                .filter(|t| t.post_id == id)
                .map(|t| t.id)
                .collect();
            ids.into_iter()
                .filter_map(|tid| state.translations.remove(&tid))
                .collect()
        };
        for row in &removed {
            if let Some(seo_id) = row.seo_id {
                state.seo.remove(&seo_id);
            }
        }
        state.post_categories.retain(|&(p, _)| p != id);
        state.post_tags.retain(|&(p, _)| p != id);

        tracing::debug!(post_id = id, translations = removed.len(), "Post rows removed");
        Ok(())
    }
}

#[async_trait]
impl TranslationRepository for InMemoryBlogStore {
    async fn find_by_post_and_locale(
        &self,
        post_id: i32,
        locale: &str,
    ) -> Result<Option<Translation>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .translations
            .values()
            .find(|t| t.post_id == post_id && t.locale == locale)
            .map(|t| state.translation(t)))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Translation>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .translations
            .values()
            .find(|t| t.slug == slug)
            .map(|t| state.translation(t)))
    }

    async fn find_by_slug_and_locale(
        &self,
        slug: &str,
        locale: &str,
    ) -> Result<Option<LocalizedPost>, RepoError> {
        let state = self.state.read().await;
        state
            .translations
            .values()
            .find(|t| t.slug == slug && t.locale == locale)
            .map(|t| state.localized(t))
            .transpose()
    }

    async fn list_by_post(&self, post_id: i32) -> Result<Vec<Translation>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .translations
            .values()
            .filter(|t| t.post_id == post_id)
            .map(|t| state.translation(t))
            .collect())
    }

    async fn list_published(&self, locale: &str) -> Result<Vec<LocalizedPost>, RepoError> {
        let state = self.state.read().await;
        let mut entries = state
            .translations
            .values()
            .filter(|t| t.locale == locale)
            .filter(|t| state.posts.get(&t.post_id).is_some_and(Post::is_published))
            .map(|t| state.localized(t))
            .collect::<Result<Vec<_>, _>>()?;

        // Newest first; posts never stamped go last.
        entries.sort_by_key(|e| (Reverse(e.post.post.published_at), e.translation.id));
        Ok(entries)
    }

    async fn insert(&self, new_translation: NewTranslation) -> Result<Translation, RepoError> {
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&new_translation.post_id) {
            return Err(RepoError::Constraint(format!(
                "Referenced record does not exist: post {}",
                new_translation.post_id
            )));
        }
        let duplicate_locale = state
            .translations
            .values()
            .any(|t| t.post_id == new_translation.post_id && t.locale == new_translation.locale);
        if duplicate_locale {
            return Err(unique_violation("translation locale", &new_translation.locale));
        }
        state.check_translation_slug(&new_translation.slug, None)?;

        let seo_id = new_translation.seo.map(|fields| state.insert_seo(fields));
        let id = next_id(&mut state.seq.translation);
        let row = TranslationRow {
            id,
            post_id: new_translation.post_id,
            locale: new_translation.locale,
            slug: new_translation.slug,
            title: new_translation.title,
            content: new_translation.content,
            excerpt: new_translation.excerpt,
            seo_id,
        };
        let created = state.translation(&row);
        state.translations.insert(id, row);
        Ok(created)
    }

    async fn update(&self, update: TranslationUpdate) -> Result<Translation, RepoError> {
        let mut state = self.state.write().await;
        if !state.translations.contains_key(&update.id) {
            return Err(RepoError::NotFound);
        }
        if let Some(slug) = &update.slug {
            state.check_translation_slug(slug, Some(update.id))?;
        }
        if let Some(SeoWrite::Update { id, .. }) = &update.seo {
            if !state.seo.contains_key(id) {
                return Err(RepoError::NotFound);
            }
        }

        let new_seo_id = match update.seo {
            Some(SeoWrite::Update { id, fields }) => {
                state.seo.insert(id, fields);
                None
            }
            Some(SeoWrite::Create(fields)) => Some(state.insert_seo(fields)),
            None => None,
        };

        let row = state
            .translations
            .get_mut(&update.id)
            .ok_or(RepoError::NotFound)?;
        if let Some(title) = update.title {
            row.title = title;
        }
        if let Some(content) = update.content {
            row.content = content;
        }
        if let Some(excerpt) = update.excerpt {
            row.excerpt = Some(excerpt);
        }
        if let Some(slug) = update.slug {
            row.slug = slug;
        }
        if new_seo_id.is_some() {
            row.seo_id = new_seo_id;
        }

        let state = &*state;
        let row = state
            .translations
            .get(&update.id)
            .ok_or(RepoError::NotFound)?;
        Ok(state.translation(row))
    }

    async fn delete(&self, existing: &Translation) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let row = state
            .translations
            .remove(&existing.id)
            .ok_or(RepoError::NotFound)?;
        if let Some(seo_id) = row.seo_id {
            state.seo.remove(&seo_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn new_post(slug: &str, category_ids: Vec<i32>, tags: &[&str]) -> NewPost {
        NewPost {
            author_id: 1,
            title: format!("Title {slug}"),
            slug: slug.to_string(),
            content: "Body".to_string(),
            excerpt: None,
            featured_image: None,
            category_ids,
            tags: tags.iter().map(|t| NewTag::from_name(*t)).collect(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn new_translation(post_id: i32, locale: &str, slug: &str) -> NewTranslation {
        NewTranslation {
            post_id,
            locale: locale.to_string(),
            slug: slug.to_string(),
            title: format!("Title {slug}"),
            content: "Body".to_string(),
            excerpt: None,
            seo: None,
        }
    }

    async fn category(store: &InMemoryBlogStore, slug: &str, parent_id: Option<i32>) -> Category {
        CategoryRepository::insert(
            store,
            NewCategory {
                name: slug.to_uppercase(),
                slug: slug.to_string(),
                description: None,
                parent_id,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn tags_are_shared_by_slug() {
        let store = InMemoryBlogStore::new();
        let a = PostRepository::insert(&store, new_post("a", vec![], &["Rust Lang"]))
            .await
            .unwrap();
        let b = PostRepository::insert(&store, new_post("b", vec![], &["rust lang", "Web"]))
            .await
            .unwrap();

        let a = store.find_details(a.id).await.unwrap().unwrap();
        let b = store.find_details(b.id).await.unwrap().unwrap();
        assert_eq!(a.tags.len(), 1);
        assert_eq!(b.tags.len(), 2);
        assert_eq!(a.tags[0].id, b.tags[0].id);
        // The first spelling is kept.
        assert_eq!(b.tags[0].name, "Rust Lang");
    }

    #[tokio::test]
    async fn rejected_post_insert_leaves_no_rows() {
        let store = InMemoryBlogStore::new();
        let result = PostRepository::insert(&store, new_post("a", vec![99], &["fresh"])).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert!(PostRepository::find_by_slug(&store, "a").await.unwrap().is_none());
        assert!(store.state.read().await.tags.is_empty());
    }

    #[tokio::test]
    async fn category_delete_detaches_children_and_posts() {
        let store = InMemoryBlogStore::new();
        let parent = category(&store, "parent", None).await;
        let child = category(&store, "child", Some(parent.id)).await;
        let post = PostRepository::insert(&store, new_post("a", vec![parent.id], &[]))
            .await
            .unwrap();

        BaseRepository::<Category, i32>::delete(&store, parent.id)
            .await
            .unwrap();

        let child = BaseRepository::<Category, i32>::find_by_id(&store, child.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(child.parent_id, None);
        let details = store.find_details(post.id).await.unwrap().unwrap();
        assert!(details.categories.is_empty());
    }

    #[tokio::test]
    async fn duplicate_category_slug_is_a_constraint_error() {
        let store = InMemoryBlogStore::new();
        category(&store, "news", None).await;

        let result = CategoryRepository::insert(
            &store,
            NewCategory {
                name: "Other".to_string(),
                slug: "news".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn post_delete_removes_translations_and_seo() {
        let store = InMemoryBlogStore::new();
        let post = PostRepository::insert(&store, new_post("a", vec![], &[]))
            .await
            .unwrap();
        let mut en = new_translation(post.id, "en", "a-en");
        en.seo = Some(SeoFields {
            meta_title: Some("A".to_string()),
            ..Default::default()
        });
        TranslationRepository::insert(&store, en).await.unwrap();

        PostRepository::delete(&store, post.id).await.unwrap();

        let state = store.state.read().await;
        assert!(state.translations.is_empty());
        assert!(state.seo.is_empty());
    }

    #[tokio::test]
    async fn duplicate_locale_is_rejected() {
        let store = InMemoryBlogStore::new();
        let post = PostRepository::insert(&store, new_post("a", vec![], &[]))
            .await
            .unwrap();
        TranslationRepository::insert(&store, new_translation(post.id, "en", "a-en"))
            .await
            .unwrap();

        let result =
            TranslationRepository::insert(&store, new_translation(post.id, "en", "a-en-2")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn update_replaces_seo_in_place() {
        let store = InMemoryBlogStore::new();
        let post = PostRepository::insert(&store, new_post("a", vec![], &[]))
            .await
            .unwrap();
        let mut en = new_translation(post.id, "en", "a-en");
        en.seo = Some(SeoFields {
            meta_title: Some("Old".to_string()),
            ..Default::default()
        });
        let created = TranslationRepository::insert(&store, en).await.unwrap();
        let seo_id = created.seo.as_ref().unwrap().id;

        let mut update = TranslationUpdate::new(created.id);
        update.seo = Some(SeoWrite::Update {
            id: seo_id,
            fields: SeoFields {
                meta_title: Some("New".to_string()),
                ..Default::default()
            },
        });
        let updated = TranslationRepository::update(&store, update).await.unwrap();

        let seo = updated.seo.unwrap();
        assert_eq!(seo.id, seo_id);
        assert_eq!(seo.fields.meta_title.as_deref(), Some("New"));
    }

    #[tokio::test]
    async fn published_listing_orders_newest_first() {
        let store = InMemoryBlogStore::new();
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        for (slug, offset) in [("old", 0), ("new", 2), ("mid", 1)] {
            let post = PostRepository::insert(&store, new_post(slug, vec![], &[]))
                .await
                .unwrap();
            let mut update = PostUpdate::new(post.id, base);
            update.status = Some(PostStatus::Published);
            update.published_at = Some(base + Duration::days(offset));
            PostRepository::update(&store, update).await.unwrap();
            TranslationRepository::insert(&store, new_translation(post.id, "en", &format!("{slug}-en")))
                .await
                .unwrap();
        }
        let draft = PostRepository::insert(&store, new_post("draft", vec![], &[]))
            .await
            .unwrap();
        TranslationRepository::insert(&store, new_translation(draft.id, "en", "draft-en"))
            .await
            .unwrap();

        let listed = store.list_published("en").await.unwrap();
        let slugs: Vec<&str> = listed.iter().map(|e| e.translation.slug.as_str()).collect();
        assert_eq!(slugs, ["new-en", "mid-en", "old-en"]);
        assert!(store.list_published("fr").await.unwrap().is_empty());
    }
}
