//! # Lingua Core
//!
//! The domain layer of the Lingua blog backend.
//! Entities, ports and the services that keep posts and their translations
//! consistent. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, DomainResult};
pub use services::{CategoryService, PostService};
