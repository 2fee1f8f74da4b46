//! HTTP handlers and route configuration.

mod categories;
mod health;
mod posts;


use actix_web::{guard, web};

use crate::middleware::error::{json_error_handler, path_error_handler};

/// Configure all application routes.
///
/// Resources are matched in registration order, so every fixed-segment post
/// route is registered before the catch-all `/{slug}/{locale}`. A GET for a
/// numeric slug with the locale `translations` lists the post's translations.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(posts::create_post))
                        .route("/published/{locale}", web::get().to(posts::list_published))
                        .route("/id/{post_id}", web::get().to(posts::get_post))
                        // Method guards on the resource let other verbs fall
                        // through to the slug lookup below.
                        .service(
                            web::resource("/{post_id}/publish")
                                .guard(guard::Put())
                                .route(web::put().to(posts::publish_post)),
                        )
                        .route(
                            r"/{post_id:\d+}/translations",
                            web::get().to(posts::list_translations),
                        )
                        .service(
                            web::resource("/{post_id}/translation")
                                .guard(guard::Post())
                                .route(web::post().to(posts::create_translation)),
                        )
                        .service(
                            web::resource("/{post_id}/translation/{locale}")
                                .route(web::put().to(posts::update_translation))
                                .route(web::delete().to(posts::delete_translation)),
                        )
                        .service(
                            web::resource("/{post_id}")
                                .route(web::put().to(posts::update_post))
                                .route(web::delete().to(posts::delete_post)),
                        )
                        .route("/{slug}/{locale}", web::get().to(posts::get_by_slug_and_locale)),
                )
                .service(
                    web::scope("/categories")
                        .service(
                            web::resource("")
                                .route(web::post().to(categories::create_category))
                                .route(web::get().to(categories::list_categories)),
                        )
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(categories::get_category))
                                .route(web::patch().to(categories::update_category))
                                .route(web::delete().to(categories::delete_category)),
                        ),
                ),
        );
}
