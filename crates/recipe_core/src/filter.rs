use std::{collections::BTreeSet, sync::Arc};

use serde::{Deserialize, Serialize};
use shared::domain::{Category, Difficulty, Recipe};

pub const DEFAULT_RECENT_LIMIT: usize = 4;

/// Active filter predicates. Empty collections and `None` mean the
/// predicate is switched off.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub categories: BTreeSet<Category>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Upper bound on prep plus cook time, in minutes. Zero means no bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time: Option<u32>,
    #[serde(default)]
    pub favorites_only: bool,
}

/// Partial criteria merged over the current ones. `None` leaves a field
/// untouched; `Some(None)` clears an optional predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub query: Option<String>,
    pub categories: Option<BTreeSet<Category>>,
    pub tags: Option<BTreeSet<String>>,
    pub difficulty: Option<Option<Difficulty>>,
    pub max_time: Option<Option<u32>>,
    pub favorites_only: Option<bool>,
}

impl FilterCriteria {
    pub fn merged(&self, update: FilterUpdate) -> FilterCriteria {
        FilterCriteria {
            query: update.query.unwrap_or_else(|| self.query.clone()),
            categories: update
                .categories
                .unwrap_or_else(|| self.categories.clone()),
            tags: update.tags.unwrap_or_else(|| self.tags.clone()),
            difficulty: update.difficulty.unwrap_or(self.difficulty),
            max_time: update
                .max_time
                .unwrap_or(self.max_time)
                .filter(|minutes| *minutes > 0),
            favorites_only: update.favorites_only.unwrap_or(self.favorites_only),
        }
    }

    pub fn with_category_toggled(&self, category: Category) -> FilterCriteria {
        let mut categories = self.categories.clone();
        if !categories.remove(&category) {
            categories.insert(category);
        }
        self.merged(FilterUpdate {
            categories: Some(categories),
            ..FilterUpdate::default()
        })
    }

    pub fn with_tag_toggled(&self, tag: &str) -> FilterCriteria {
        let mut tags = self.tags.clone();
        if !tags.remove(tag) {
            tags.insert(tag.to_string());
        }
        self.merged(FilterUpdate {
            tags: Some(tags),
            ..FilterUpdate::default()
        })
    }

    /// Selecting the difficulty that is already active clears it.
    pub fn with_difficulty_toggled(&self, difficulty: Difficulty) -> FilterCriteria {
        let next = (self.difficulty != Some(difficulty)).then_some(difficulty);
        self.merged(FilterUpdate {
            difficulty: Some(next),
            ..FilterUpdate::default()
        })
    }

    /// Dashboard shortcut: browsing a category card narrows to just it.
    pub fn with_only_category(&self, category: Category) -> FilterCriteria {
        self.merged(FilterUpdate {
            categories: Some(BTreeSet::from([category])),
            ..FilterUpdate::default()
        })
    }

    pub fn with_only_tag(&self, tag: &str) -> FilterCriteria {
        self.merged(FilterUpdate {
            tags: Some(BTreeSet::from([tag.to_string()])),
            ..FilterUpdate::default()
        })
    }

    /// Number shown on the filter badge. The text query and time bound are
    /// not counted.
    pub fn active_filter_count(&self) -> usize {
        self.categories.len()
            + self.tags.len()
            + usize::from(self.favorites_only)
            + usize::from(self.difficulty.is_some())
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }

    pub fn is_identity(&self) -> bool {
        self.query.is_empty()
            && self.categories.is_empty()
            && self.tags.is_empty()
            && self.difficulty.is_none()
            && self.time_bound().is_none()
            && !self.favorites_only
    }

    /// The effective time bound; `Some(0)` is treated as unset.
    pub fn time_bound(&self) -> Option<u32> {
        self.max_time.filter(|minutes| *minutes > 0)
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_query(recipe, &self.query.to_lowercase())
    }

    fn matches_query(&self, recipe: &Recipe, query: &str) -> bool {
        if !query.is_empty() {
            let hit = recipe.title.to_lowercase().contains(query)
                || recipe.description.to_lowercase().contains(query)
                || recipe
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(query));
            if !hit {
                return false;
            }
        }
        if !self.categories.is_empty() && !self.categories.contains(&recipe.category) {
            return false;
        }
        if let Some(difficulty) = self.difficulty {
            if recipe.difficulty != difficulty {
                return false;
            }
        }
        if let Some(max_time) = self.time_bound() {
            if recipe.total_time() > max_time {
                return false;
            }
        }
        if !self.tags.is_empty() && !recipe.tags.iter().any(|tag| self.tags.contains(tag)) {
            return false;
        }
        if self.favorites_only && !recipe.is_favorite {
            return false;
        }
        true
    }
}

/// Order-preserving subset of `recipes` accepted by `criteria`.
pub fn compute_filtered_view(
    recipes: &[Arc<Recipe>],
    criteria: &FilterCriteria,
) -> Vec<Arc<Recipe>> {
    if criteria.is_identity() {
        return recipes.to_vec();
    }
    let query = criteria.query.to_lowercase();
    recipes
        .iter()
        .filter(|recipe| criteria.matches_query(recipe, &query))
        .cloned()
        .collect()
}

pub fn favorites_view(filtered: &[Arc<Recipe>]) -> Vec<Arc<Recipe>> {
    filtered
        .iter()
        .filter(|recipe| recipe.is_favorite)
        .cloned()
        .collect()
}

/// Newest first. Ties keep their filtered order.
pub fn recent_view(filtered: &[Arc<Recipe>], limit: usize) -> Vec<Arc<Recipe>> {
    let mut recent = filtered.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(limit);
    recent
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
