//! PostgreSQL category repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, NotSet, Set};

use lingua_core::domain::{Category, CategoryChanges, NewCategory};
use lingua_core::error::RepoError;
use lingua_core::ports::CategoryRepository;

use super::entity::category::{self, Entity as CategoryEntity};
use super::errors::map_db_err;
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn insert(&self, category: NewCategory) -> Result<Category, RepoError> {
        let model = category::ActiveModel {
            id: NotSet,
            name: Set(category.name),
            slug: Set(category.slug),
            description: Set(category.description),
            parent_id: Set(category.parent_id),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: CategoryChanges) -> Result<Category, RepoError> {
        let model = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let unchanged = model.clone();
        let mut active: category::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(slug) = changes.slug {
            active.slug = Set(slug);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(parent_id) = changes.parent_id {
            active.parent_id = Set(Some(parent_id));
        }

        if !active.is_changed() {
            return Ok(unchanged.into());
        }

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}
