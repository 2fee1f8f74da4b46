use serde::{Deserialize, Serialize};

/// Tag entity. Tags are identified by their slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

/// A tag reference to connect by slug, or create with `name` if absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub slug: String,
}

impl NewTag {
    /// Build a connect-or-create reference from a human-readable name.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self { name, slug }
    }
}

/// Lower-case, trim and collapse each whitespace run into a single hyphen.
///
/// Characters are not otherwise filtered: "C++ Tips" becomes "c++-tips".
pub fn slugify(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_whitespace() {
        assert_eq!(slugify("  New   Tag "), "new-tag");
        assert_eq!(slugify("Rust\tand\nWeb"), "rust-and-web");
    }

    #[test]
    fn slugify_keeps_other_characters() {
        assert_eq!(slugify("C++ Tips"), "c++-tips");
        assert_eq!(slugify("Привет Мир"), "привет-мир");
    }

    #[test]
    fn new_tag_keeps_original_name() {
        let tag = NewTag::from_name("New Tag");
        assert_eq!(tag.name, "New Tag");
        assert_eq!(tag.slug, "new-tag");
    }
}
