//! # Lingua Shared
//!
//! Wire types of the HTTP API: request bodies, their validation rules and
//! the response envelopes. Kept free of server dependencies so API clients
//! can reuse it.

pub mod dto;
pub mod response;
pub mod validation;

pub use response::{ErrorResponse, SuccessResponse};
pub use validation::{Validate, ValidationErrors};
