//! Domain entities - the core business objects.

mod category;
mod post;
mod seo;
mod tag;
mod translation;

pub use category::{Category, CategoryChanges, NewCategory};
pub use post::{NewPost, Post, PostDetails, PostStatus, PostUpdate, PostWithTerms};
pub use seo::{SeoData, SeoFields, SeoWrite};
pub use tag::{NewTag, Tag, slugify};
pub use translation::{
    LocalizedPost, NewTranslation, PostProjection, PublishedTranslation, Translation,
    TranslationUpdate,
};
