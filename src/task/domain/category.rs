//! Task categories.

use super::{CategoryId, TaskDomainError};
use serde::{Deserialize, Serialize};

/// Display colour assigned to categories created implicitly.
pub const DEFAULT_CATEGORY_COLOR: &str = "#9E9E9E";

/// Named grouping for tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    color: String,
}

impl Category {
    /// Creates a category, deriving its identifier from the name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCategoryName`] when the name is blank.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyCategoryName);
        }
        Ok(Self {
            id: CategoryId::from_name(trimmed),
            name: trimmed.to_owned(),
            color: color.into(),
        })
    }

    fn seeded(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: CategoryId::from(id),
            name: name.to_owned(),
            color: color.to_owned(),
        }
    }

    /// Returns the category identifier.
    #[must_use]
    pub const fn id(&self) -> &CategoryId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display colour.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Renames the category. The identifier is kept.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCategoryName`] when the name is blank.
    pub fn rename(&mut self, name: &str) -> Result<(), TaskDomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyCategoryName);
        }
        trimmed.clone_into(&mut self.name);
        Ok(())
    }

    /// Replaces the display colour.
    pub fn recolor(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }
}

/// Categories available before the user has created any.
///
/// The first entry is the fallback category named by
/// [`CategoryId::DEFAULT`].
#[must_use]
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::seeded(CategoryId::DEFAULT, "Work", "#FF5733"),
        Category::seeded("personal", "Personal", "#33FF57"),
        Category::seeded("learning", "Learning", "#3357FF"),
        Category::seeded("health", "Health", "#F033FF"),
        Category::seeded("errands", "Errands", "#FF9F33"),
    ]
}
