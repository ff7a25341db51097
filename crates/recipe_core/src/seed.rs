use std::{collections::HashSet, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shared::{domain::Recipe, error::CoreError};
use tracing::info;

const BUILTIN_CATALOG: &str = include_str!("../data/recipes.json");

/// Startup data: the recipe list plus the tags promoted on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedCatalog {
    #[serde(default)]
    pub trending_tags: Vec<String>,
    pub recipes: Vec<Recipe>,
}

impl SeedCatalog {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG).context("built-in recipe catalog is invalid")
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let catalog: SeedCatalog =
            serde_json::from_str(raw).context("failed to parse recipe catalog")?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read recipe catalog {}", path.display()))?;
        let catalog = Self::from_json(&raw)
            .with_context(|| format!("invalid recipe catalog {}", path.display()))?;
        info!(
            path = %path.display(),
            recipes = catalog.recipes.len(),
            "seed: loaded catalog from file"
        );
        Ok(catalog)
    }

    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for recipe in &self.recipes {
            if !seen.insert(recipe.id) {
                return Err(CoreError::DuplicateRecipeId(recipe.id));
            }
            recipe.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/seed_tests.rs"]
mod tests;
