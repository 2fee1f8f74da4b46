//! In-memory store used when no database is configured.

mod blog_store;

pub use blog_store::InMemoryBlogStore;
