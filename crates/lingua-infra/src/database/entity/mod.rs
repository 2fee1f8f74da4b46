//! SeaORM entities mirroring the migration schema.

pub mod category;
pub mod post;
pub mod post_category;
pub mod post_tag;
pub mod seo;
pub mod tag;
pub mod translation;
