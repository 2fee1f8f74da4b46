//! Database connection management and the SeaORM repositories.

mod connections;

#[cfg(feature = "postgres")]
mod category_repo;
#[cfg(feature = "postgres")]
mod errors;
#[cfg(feature = "postgres")]
mod loaders;
#[cfg(feature = "postgres")]
mod post_repo;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
mod translation_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use category_repo::PostgresCategoryRepository;
#[cfg(feature = "postgres")]
pub use post_repo::PostgresPostRepository;
#[cfg(feature = "postgres")]
pub use postgres_base::PostgresBaseRepository;
#[cfg(feature = "postgres")]
pub use translation_repo::PostgresTranslationRepository;

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
