//! Category operations of the task repository.

use super::repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
use crate::task::{
    domain::{Category, CategoryId, DEFAULT_CATEGORY_COLOR, default_categories},
    ports::{BlobKey, BlobStore},
};
use mockable::Clock;
use tracing::info;

impl<S, C> TaskRepository<S, C>
where
    S: BlobStore,
    C: Clock + Send + Sync,
{
    /// Returns every category.
    ///
    /// An absent or unparsable category blob yields the default categories.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when the blob store cannot be
    /// read.
    pub fn list_categories(&self) -> TaskRepositoryResult<Vec<Category>> {
        Ok(self
            .load_collection::<Category>(&BlobKey::categories())?
            .unwrap_or_else(default_categories))
    }

    /// Creates a category whose identifier is derived from `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Domain`] for a blank name,
    /// [`TaskRepositoryError::DuplicateCategory`] when the derived identifier
    /// is taken, or a store error when the collection cannot be written.
    pub fn create_category(
        &self,
        name: &str,
        color: &str,
    ) -> TaskRepositoryResult<Category> {
        let category = Category::new(name, color)?;
        let _guard = self.lock_writes()?;
        let mut categories = self.list_categories()?;
        if categories.iter().any(|existing| existing.id() == category.id()) {
            return Err(TaskRepositoryError::DuplicateCategory(category.id().clone()));
        }
        categories.push(category.clone());
        self.persist(&BlobKey::categories(), &categories)?;
        Ok(category)
    }

    /// Returns the category whose identifier derives from `name`, creating
    /// it with the neutral colour when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Domain`] for a blank name or a store
    /// error when the collection cannot be read or written.
    pub fn ensure_category(&self, name: &str) -> TaskRepositoryResult<Category> {
        let candidate = Category::new(name, DEFAULT_CATEGORY_COLOR)?;
        let _guard = self.lock_writes()?;
        let mut categories = self.list_categories()?;
        if let Some(existing) = categories
            .iter()
            .find(|existing| existing.id() == candidate.id())
        {
            return Ok(existing.clone());
        }
        categories.push(candidate.clone());
        self.persist(&BlobKey::categories(), &categories)?;
        info!(category_id = %candidate.id(), "created category on demand");
        Ok(candidate)
    }

    /// Renames and/or recolours a category. The identifier never changes.
    ///
    /// Returns `Ok(None)` when no category has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Domain`] for a blank name or a store
    /// error when the collection cannot be read or written.
    pub fn update_category(
        &self,
        id: &CategoryId,
        name: Option<&str>,
        color: Option<&str>,
    ) -> TaskRepositoryResult<Option<Category>> {
        let _guard = self.lock_writes()?;
        let mut categories = self.list_categories()?;
        let Some(category) = categories.iter_mut().find(|category| category.id() == id) else {
            return Ok(None);
        };
        if let Some(new_name) = name {
            category.rename(new_name)?;
        }
        if let Some(new_color) = color {
            category.recolor(new_color);
        }
        let updated = category.clone();
        self.persist(&BlobKey::categories(), &categories)?;
        Ok(Some(updated))
    }

    /// Deletes a category and moves its tasks into the default category.
    ///
    /// Tasks are reassigned and written before the category list, so an
    /// interrupted call never leaves a task pointing at a removed category.
    /// Returns `Ok(false)` when no category has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DefaultCategoryProtected`] for the
    /// default category, or a store error when a collection cannot be read
    /// or written.
    pub fn delete_category(&self, id: &CategoryId) -> TaskRepositoryResult<bool> {
        if id.is_default() {
            return Err(TaskRepositoryError::DefaultCategoryProtected(id.clone()));
        }
        let _guard = self.lock_writes()?;
        let mut categories = self.list_categories()?;
        let before = categories.len();
        categories.retain(|category| category.id() != id);
        if categories.len() == before {
            return Ok(false);
        }

        let mut tasks = self.list()?;
        let mut reassigned = 0_usize;
        for task in tasks.iter_mut().filter(|task| task.category() == id) {
            task.reassign_category(CategoryId::default_category(), self.clock());
            reassigned += 1;
        }
        if reassigned > 0 {
            self.persist(&BlobKey::tasks(), &tasks)?;
        }
        if !categories.iter().any(|category| category.id().is_default()) {
            let fallback = default_categories()
                .into_iter()
                .filter(|category| category.id().is_default());
            categories.splice(0..0, fallback);
        }
        self.persist(&BlobKey::categories(), &categories)?;
        info!(category_id = %id, reassigned, "deleted category");
        Ok(true)
    }
}
