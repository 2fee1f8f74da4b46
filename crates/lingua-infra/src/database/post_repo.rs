//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, NotSet, QueryFilter, Set,
    TransactionTrait,
};

use lingua_core::domain::{NewPost, Post, PostDetails, PostUpdate};
use lingua_core::error::RepoError;
use lingua_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::entity::{post_category, post_tag, seo, translation};
use super::errors::map_db_err;
use super::loaders::{load_terms, load_translations, set_categories, set_tags};

/// PostgreSQL post repository. Every write runs in its own transaction.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_details(&self, id: i32) -> Result<Option<PostDetails>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let (categories, tags) = load_terms(&self.db, &model).await?;
        let translations =
            load_translations(&self.db, translation::Column::PostId.eq(model.id)).await?;

        Ok(Some(PostDetails {
            post: model.into(),
            categories,
            tags,
            translations,
        }))
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = post::ActiveModel {
            id: NotSet,
            author_id: Set(new_post.author_id),
            title: Set(new_post.title),
            slug: Set(new_post.slug),
            content: Set(new_post.content),
            excerpt: Set(new_post.excerpt),
            featured_image: Set(new_post.featured_image),
            status: Set(post::Status::Draft),
            published_at: Set(None),
            created_at: Set(new_post.created_at.into()),
            updated_at: Set(new_post.created_at.into()),
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        set_categories(&txn, model.id, &new_post.category_ids).await?;
        set_tags(&txn, model.id, &new_post.tags).await?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn update(&self, update: PostUpdate) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = PostEntity::find_by_id(update.id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active: post::ActiveModel = model.into();
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(slug) = update.slug {
            active.slug = Set(slug);
        }
        if let Some(content) = update.content {
            active.content = Set(content);
        }
        if let Some(excerpt) = update.excerpt {
            active.excerpt = Set(Some(excerpt));
        }
        if let Some(image) = update.featured_image {
            active.featured_image = Set(Some(image));
        }
        if let Some(status) = update.status {
            active.status = Set(status.into());
        }
        if let Some(published_at) = update.published_at {
            active.published_at = Set(Some(published_at.into()));
        }
        active.updated_at = Set(update.updated_at.into());

        let model = active.update(&txn).await.map_err(map_db_err)?;

        if let Some(category_ids) = &update.category_ids {
            set_categories(&txn, model.id, category_ids).await?;
        }
        if let Some(tags) = &update.tags {
            set_tags(&txn, model.id, tags).await?;
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let translations = translation::Entity::find()
            .filter(translation::Column::PostId.eq(id))
            .all(&txn)
            .await
            .map_err(map_db_err)?;
        let seo_ids: Vec<i32> = translations.iter().filter_map(|t| t.seo_id).collect();

        if !seo_ids.is_empty() {
            seo::Entity::delete_many()
                .filter(seo::Column::Id.is_in(seo_ids))
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
        }
        translation::Entity::delete_many()
            .filter(translation::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        post_category::Entity::delete_many()
            .filter(post_category::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(post_id = id, translations = translations.len(), "Post rows removed");
        Ok(())
    }
}
