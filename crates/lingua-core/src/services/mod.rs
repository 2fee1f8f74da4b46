//! Application services - the consistency rules over the repository ports.

mod categories;
mod commands;
mod posts;

pub use categories::CategoryService;
pub use commands::{CreateDraft, CreateTranslation, PostPatch, TranslationPatch};
pub use posts::PostService;
