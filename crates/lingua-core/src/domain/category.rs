use serde::{Deserialize, Serialize};

/// Category entity - a node in the (optional) category tree.
///
/// `parent_id` is taken as given: neither existence nor acyclicity of the
/// parent chain is checked above the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}

/// Data for inserting a category.
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}

/// Partial category update. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}

impl CategoryChanges {
    /// Apply the present fields to an existing category.
    pub fn apply_to(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(slug) = self.slug {
            category.slug = slug;
        }
        if let Some(description) = self.description {
            category.description = Some(description);
        }
        if let Some(parent_id) = self.parent_id {
            category.parent_id = Some(parent_id);
        }
    }
}
