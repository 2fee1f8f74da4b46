use std::sync::Arc;

use crate::domain::{Category, CategoryChanges, NewCategory};
use crate::error::{DomainError, DomainResult};
use crate::ports::CategoryRepository;

/// Plain CRUD over categories with existence checks.
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// The parent, if any, is linked directly without looking it up.
    pub async fn create(&self, category: NewCategory) -> DomainResult<Category> {
        let created = self.categories.insert(category).await?;
        tracing::info!(category_id = created.id, slug = %created.slug, "Category created");
        Ok(created)
    }

    pub async fn list(&self) -> DomainResult<Vec<Category>> {
        Ok(self.categories.find_all().await?)
    }

    pub async fn get(&self, id: i32) -> DomainResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| category_not_found(id))
    }

    pub async fn update(&self, id: i32, changes: CategoryChanges) -> DomainResult<Category> {
        self.get(id).await?;
        Ok(self.categories.update(id, changes).await?)
    }

    /// Delete a category and return it as it was.
    pub async fn delete(&self, id: i32) -> DomainResult<Category> {
        let category = self.get(id).await?;
        self.categories.delete(id).await?;
        Ok(category)
    }
}

fn category_not_found(id: i32) -> DomainError {
    DomainError::not_found("Category", format!("id={id}"))
}
