//! Category handlers.

use actix_web::{HttpResponse, web};

use lingua_core::domain::{CategoryChanges, NewCategory};
use lingua_shared::Validate;
use lingua_shared::dto::{CreateCategoryRequest, UpdateCategoryRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/categories
pub async fn create_category(
    state: web::Data<AppState>,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let category = state
        .categories
        .create(NewCategory {
            name: req.name,
            slug: req.slug,
            description: req.description,
            parent_id: req.parent_id,
        })
        .await?;

    Ok(HttpResponse::Created().json(category))
}

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.categories.list().await?))
}

/// GET /api/categories/{id}
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let category = state.categories.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

/// PATCH /api/categories/{id}
pub async fn update_category(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let category = state
        .categories
        .update(
            path.into_inner(),
            CategoryChanges {
                name: req.name,
                slug: req.slug,
                description: req.description,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(category))
}

/// DELETE /api/categories/{id}
///
/// Responds with the deleted category.
pub async fn delete_category(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let category = state.categories.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}
