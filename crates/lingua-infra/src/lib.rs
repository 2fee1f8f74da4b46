//! # Lingua Infrastructure
//!
//! Concrete implementations of the ports defined in `lingua-core`:
//! SeaORM repositories, the in-memory fallback store, JWT tokens and the
//! system clock.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT bearer tokens

pub mod database;
pub mod memory;
pub mod time;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::DatabaseConfig;
pub use memory::InMemoryBlogStore;
pub use time::SystemClock;

#[cfg(feature = "postgres")]
pub use database::{
    PostgresCategoryRepository, PostgresPostRepository, PostgresTranslationRepository,
};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
