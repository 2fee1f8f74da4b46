//! Post and translation handlers.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};

use lingua_core::domain::{PostStatus, SeoFields};
use lingua_core::services::{CreateDraft, CreateTranslation, PostPatch, TranslationPatch};
use lingua_shared::SuccessResponse;
use lingua_shared::Validate;
use lingua_shared::dto::{
    CreatePostRequest, CreateTranslationRequest, SeoDataRequest, UpdatePostRequest,
    UpdateTranslationRequest,
};
use lingua_shared::validation::parse_iso8601;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn event_date(value: Option<String>, field: &str) -> AppResult<Option<DateTime<Utc>>> {
    value
        .map(|raw| {
            parse_iso8601(&raw)
                .ok_or_else(|| AppError::BadRequest(format!("{field} must be an ISO-8601 date")))
        })
        .transpose()
}

fn seo_fields(seo: SeoDataRequest) -> AppResult<SeoFields> {
    Ok(SeoFields {
        event_start_date: event_date(seo.event_start_date, "eventStartDate")?,
        event_end_date: event_date(seo.event_end_date, "eventEndDate")?,
        meta_title: seo.meta_title,
        meta_description: seo.meta_description,
        canonical_url: seo.canonical_url,
        robots: seo.robots,
        og_title: seo.og_title,
        og_description: seo.og_description,
        og_type: seo.og_type,
        og_url: seo.og_url,
        og_image_url: seo.og_image_url,
        og_image_alt: seo.og_image_alt,
        twitter_card: seo.twitter_card,
        twitter_site: seo.twitter_site,
        twitter_creator: seo.twitter_creator,
        event_name: seo.event_name,
        event_description: seo.event_description,
        event_url: seo.event_url,
        event_image_url: seo.event_image_url,
        event_location_name: seo.event_location_name,
        event_location_street: seo.event_location_street,
        event_location_city: seo.event_location_city,
        event_location_region: seo.event_location_region,
        event_location_postal: seo.event_location_postal,
        event_location_country: seo.event_location_country,
    })
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    tracing::debug!(author_id = identity.user_id, roles = ?identity.roles, "Creating post");

    let post = state
        .posts
        .create_draft(
            identity.user_id,
            CreateDraft {
                title: req.title,
                slug: req.slug,
                content: req.content,
                excerpt: req.excerpt,
                featured_image: req.featured_image,
                category_ids: req.category_ids,
                tag_names: req.tag_names,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// GET /api/posts/id/{post_id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let details = state.posts.get_post_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(details))
}

/// PUT /api/posts/{post_id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let status = req
        .status
        .as_deref()
        .map(str::parse::<PostStatus>)
        .transpose()?;

    let post = state
        .posts
        .update_post(
            path.into_inner(),
            PostPatch {
                title: req.title,
                slug: req.slug,
                content: req.content,
                excerpt: req.excerpt,
                featured_image: req.featured_image,
                status,
                category_ids: req.category_ids,
                tag_names: req.tag_names,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/posts/{post_id}/publish
pub async fn publish_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = state.posts.publish_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state.posts.delete_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// GET /api/posts/published/{locale}
pub async fn list_published(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let entries = state.posts.list_published_posts(&path).await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /api/posts/{slug}/{locale}
pub async fn get_by_slug_and_locale(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (slug, locale) = path.into_inner();
    let localized = state.posts.find_by_slug_and_locale(&slug, &locale).await?;
    Ok(HttpResponse::Ok().json(localized))
}

/// GET /api/posts/{post_id}/translations
pub async fn list_translations(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let translations = state.posts.list_translations(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(translations))
}

/// POST /api/posts/{post_id}/translation
pub async fn create_translation(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<CreateTranslationRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let seo = req.seo_data.map(seo_fields).transpose()?;
    let translation = state
        .posts
        .create_translation(
            path.into_inner(),
            &req.locale,
            CreateTranslation {
                title: req.title,
                content: req.content,
                slug: req.slug,
                excerpt: req.excerpt,
                seo,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(translation))
}

/// PUT /api/posts/{post_id}/translation/{locale}
pub async fn update_translation(
    state: web::Data<AppState>,
    path: web::Path<(i32, String)>,
    body: web::Json<UpdateTranslationRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, locale) = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let seo = req.seo_data.map(seo_fields).transpose()?;
    let translation = state
        .posts
        .update_translation(
            post_id,
            &locale,
            TranslationPatch {
                title: req.title,
                content: req.content,
                excerpt: req.excerpt,
                slug: req.slug,
                seo,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(translation))
}

/// DELETE /api/posts/{post_id}/translation/{locale}
pub async fn delete_translation(
    state: web::Data<AppState>,
    path: web::Path<(i32, String)>,
) -> AppResult<HttpResponse> {
    let (post_id, locale) = path.into_inner();
    state.posts.delete_translation(post_id, &locale).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}
