use crate::{
    abstract_trait::{DynCategoryCommandRepository, DynCategoryQueryRepository},
    domain::requests::CreateCategoryRequest,
    errors::RepositoryError,
};
use std::collections::HashMap;
use tracing::{info, warn};

/// Case-insensitive name → id index over the category table, private to one
/// import run. Misses create the category immediately so later rows in the
/// same run reuse the new id.
pub struct CategoryDirectory {
    index: HashMap<String, i32>,
    query: DynCategoryQueryRepository,
    command: DynCategoryCommandRepository,
}

impl CategoryDirectory {
    /// Loads the full current category set up front; one query per run, no
    /// per-row lookups against the store on the hit path.
    pub async fn preload(
        query: DynCategoryQueryRepository,
        command: DynCategoryCommandRepository,
    ) -> Result<Self, RepositoryError> {
        let categories = query.find_all().await?;

        let index = categories
            .into_iter()
            .map(|c| (c.name.to_lowercase(), c.category_id))
            .collect::<HashMap<_, _>>();

        info!("📇 Category directory preloaded with {} entries", index.len());

        Ok(Self {
            index,
            query,
            command,
        })
    }

    pub async fn resolve(&mut self, name: &str) -> Result<i32, RepositoryError> {
        let key = name.to_lowercase();

        if let Some(id) = self.index.get(&key) {
            return Ok(*id);
        }

        let id = match self
            .command
            .create_category(&CreateCategoryRequest {
                name: name.to_string(),
            })
            .await
        {
            Ok(category) => category.category_id,
            // A concurrent import created the same name first; the unique
            // index rejected ours, so the winner's row is authoritative.
            Err(RepositoryError::AlreadyExists(_)) => {
                warn!("⚠️ Lost create race for category '{name}', re-resolving");
                self.query
                    .find_by_name(name)
                    .await?
                    .map(|c| c.category_id)
                    .ok_or_else(|| {
                        RepositoryError::Conflict(format!(
                            "category '{name}' exists but could not be re-resolved"
                        ))
                    })?
            }
            Err(err) => return Err(err),
        };

        self.index.insert(key, id);
        Ok(id)
    }
}
