//! PostgreSQL translation repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, ModelTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait, Unchanged,
    sea_query::{Condition, NullOrdering, Order},
};

use lingua_core::domain::{
    LocalizedPost, NewTranslation, SeoWrite, Translation, TranslationUpdate,
};
use lingua_core::error::RepoError;
use lingua_core::ports::TranslationRepository;

use super::entity::{post, seo, translation};
use super::errors::map_db_err;
use super::loaders::{load_post_with_terms, load_translation, load_translations};

/// PostgreSQL translation repository.
pub struct PostgresTranslationRepository {
    db: DbConn,
}

impl PostgresTranslationRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TranslationRepository for PostgresTranslationRepository {
    async fn find_by_post_and_locale(
        &self,
        post_id: i32,
        locale: &str,
    ) -> Result<Option<Translation>, RepoError> {
        load_translation(
            &self.db,
            Condition::all()
                .add(translation::Column::PostId.eq(post_id))
                .add(translation::Column::Locale.eq(locale)),
        )
        .await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Translation>, RepoError> {
        load_translation(&self.db, translation::Column::Slug.eq(slug)).await
    }

    async fn find_by_slug_and_locale(
        &self,
        slug: &str,
        locale: &str,
    ) -> Result<Option<LocalizedPost>, RepoError> {
        let Some(found) = load_translation(
            &self.db,
            Condition::all()
                .add(translation::Column::Slug.eq(slug))
                .add(translation::Column::Locale.eq(locale)),
        )
        .await?
        else {
            return Ok(None);
        };

        let parent = post::Entity::find_by_id(found.post_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        Ok(Some(LocalizedPost {
            translation: found,
            post: load_post_with_terms(&self.db, parent).await?,
        }))
    }

    async fn list_by_post(&self, post_id: i32) -> Result<Vec<Translation>, RepoError> {
        load_translations(&self.db, translation::Column::PostId.eq(post_id)).await
    }

    async fn list_published(&self, locale: &str) -> Result<Vec<LocalizedPost>, RepoError> {
        let rows = translation::Entity::find()
            .find_also_related(post::Entity)
            .filter(translation::Column::Locale.eq(locale))
            .filter(post::Column::Status.eq(post::Status::Published))
            .order_by_with_nulls(post::Column::PublishedAt, Order::Desc, NullOrdering::Last)
            .order_by_asc(translation::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut entries = Vec::with_capacity(rows.len());
        for (row, parent) in rows {
            // The inner join on a NOT NULL foreign key always yields a parent.
            let Some(parent) = parent else { continue };
            let seo = row
                .find_related(seo::Entity)
                .one(&self.db)
                .await
                .map_err(map_db_err)?;
            entries.push(LocalizedPost {
                translation: row.into_domain(seo),
                post: load_post_with_terms(&self.db, parent).await?,
            });
        }

        tracing::debug!(locale, count = entries.len(), "Listed published translations");
        Ok(entries)
    }

    async fn insert(&self, new_translation: NewTranslation) -> Result<Translation, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let seo = match new_translation.seo {
            Some(fields) => Some(
                seo::ActiveModel::from(fields)
                    .insert(&txn)
                    .await
                    .map_err(map_db_err)?,
            ),
            None => None,
        };

        let row = translation::ActiveModel {
            id: NotSet,
            post_id: Set(new_translation.post_id),
            locale: Set(new_translation.locale),
            slug: Set(new_translation.slug),
            title: Set(new_translation.title),
            content: Set(new_translation.content),
            excerpt: Set(new_translation.excerpt),
            seo_id: Set(seo.as_ref().map(|s| s.id)),
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(row.into_domain(seo))
    }

    async fn update(&self, update: TranslationUpdate) -> Result<Translation, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let row = translation::Entity::find_by_id(update.id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active: translation::ActiveModel = row.into();

        let seo = match update.seo {
            Some(SeoWrite::Update { id, fields }) => {
                let mut seo_active = seo::ActiveModel::from(fields);
                seo_active.id = Unchanged(id);
                Some(seo_active.update(&txn).await.map_err(map_db_err)?)
            }
            Some(SeoWrite::Create(fields)) => {
                let created = seo::ActiveModel::from(fields)
                    .insert(&txn)
                    .await
                    .map_err(map_db_err)?;
                active.seo_id = Set(Some(created.id));
                Some(created)
            }
            None => None,
        };

        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(content) = update.content {
            active.content = Set(content);
        }
        if let Some(excerpt) = update.excerpt {
            active.excerpt = Set(Some(excerpt));
        }
        if let Some(slug) = update.slug {
            active.slug = Set(slug);
        }

        let row = if active.is_changed() {
            active.update(&txn).await.map_err(map_db_err)?
        } else {
            translation::Entity::find_by_id(update.id)
                .one(&txn)
                .await
                .map_err(map_db_err)?
                .ok_or(RepoError::NotFound)?
        };

        // Untouched SEO still belongs in the response.
        let seo = match (seo, row.seo_id) {
            (Some(seo), _) => Some(seo),
            (None, Some(seo_id)) => seo::Entity::find_by_id(seo_id)
                .one(&txn)
                .await
                .map_err(map_db_err)?,
            (None, None) => None,
        };

        txn.commit().await.map_err(map_db_err)?;
        Ok(row.into_domain(seo))
    }

    async fn delete(&self, existing: &Translation) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if let Some(seo) = &existing.seo {
            seo::Entity::delete_by_id(seo.id)
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
        }

        let result = translation::Entity::delete_by_id(existing.id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }
}
