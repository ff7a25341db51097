use std::sync::Arc;

use shared::{
    domain::{IngredientId, Recipe, RecipeId, StepId},
    protocol::StoreAction,
};
use tracing::{debug, warn};

/// Immutable view of every recipe in the session.
///
/// Mutations return a new snapshot that shares untouched records with the
/// old one. A mutation that matches nothing returns a clone of the same
/// `Arc`, so `ptr_eq` tells callers whether anything changed.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    recipes: Arc<Vec<Arc<Recipe>>>,
}

impl StoreSnapshot {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: Arc::new(recipes.into_iter().map(Arc::new).collect()),
        }
    }

    pub fn recipes(&self) -> &[Arc<Recipe>] {
        &self.recipes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Recipe>> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, recipe_id: RecipeId) -> Option<&Arc<Recipe>> {
        self.recipes.iter().find(|recipe| recipe.id == recipe_id)
    }

    pub fn ptr_eq(&self, other: &StoreSnapshot) -> bool {
        Arc::ptr_eq(&self.recipes, &other.recipes)
    }

    pub fn apply(&self, action: &StoreAction) -> StoreSnapshot {
        match action {
            StoreAction::ToggleFavorite { recipe_id } => self.toggle_favorite(*recipe_id),
            StoreAction::ToggleIngredientCheck {
                recipe_id,
                ingredient_id,
            } => self.toggle_ingredient_check(*recipe_id, *ingredient_id),
            StoreAction::ToggleStepCompleted { recipe_id, step_id } => {
                self.toggle_step_completed(*recipe_id, *step_id)
            }
            StoreAction::UpdateStepNotes {
                recipe_id,
                step_id,
                notes,
            } => self.update_step_notes(*recipe_id, *step_id, notes),
            StoreAction::AddRecipe { recipe } => self.add_recipe(recipe.as_ref().clone()),
            StoreAction::DeleteRecipe { recipe_id } => self.delete_recipe(*recipe_id),
            StoreAction::UpdateRecipe { recipe } => self.update_recipe(recipe.as_ref().clone()),
        }
    }

    pub fn toggle_favorite(&self, recipe_id: RecipeId) -> StoreSnapshot {
        self.replace_with(recipe_id, |recipe| {
            let mut next = recipe.clone();
            next.is_favorite = !next.is_favorite;
            Some(next)
        })
    }

    pub fn toggle_ingredient_check(
        &self,
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
    ) -> StoreSnapshot {
        self.replace_with(recipe_id, |recipe| {
            let index = recipe
                .ingredients
                .iter()
                .position(|ingredient| ingredient.id == ingredient_id)?;
            let mut next = recipe.clone();
            next.ingredients[index].checked = !next.ingredients[index].checked;
            Some(next)
        })
    }

    pub fn toggle_step_completed(&self, recipe_id: RecipeId, step_id: StepId) -> StoreSnapshot {
        self.replace_with(recipe_id, |recipe| {
            let index = recipe.steps.iter().position(|step| step.id == step_id)?;
            let mut next = recipe.clone();
            next.steps[index].completed = !next.steps[index].completed;
            Some(next)
        })
    }

    /// Stores `notes` verbatim; an empty string is kept as an empty note.
    pub fn update_step_notes(
        &self,
        recipe_id: RecipeId,
        step_id: StepId,
        notes: &str,
    ) -> StoreSnapshot {
        self.replace_with(recipe_id, |recipe| {
            let index = recipe.steps.iter().position(|step| step.id == step_id)?;
            let mut next = recipe.clone();
            next.steps[index].notes = Some(notes.to_string());
            Some(next)
        })
    }

    pub fn add_recipe(&self, recipe: Recipe) -> StoreSnapshot {
        if self.get(recipe.id).is_some() {
            warn!(recipe_id = recipe.id.0, "store: ignoring add of duplicate recipe id");
            return self.clone();
        }
        if let Err(err) = recipe.validate() {
            warn!(recipe_id = recipe.id.0, "store: ignoring add of invalid recipe: {err}");
            return self.clone();
        }
        let mut recipes = self.recipes.as_ref().clone();
        recipes.push(Arc::new(recipe));
        Self {
            recipes: Arc::new(recipes),
        }
    }

    pub fn delete_recipe(&self, recipe_id: RecipeId) -> StoreSnapshot {
        if self.get(recipe_id).is_none() {
            debug!(recipe_id = recipe_id.0, "store: delete matched no recipe");
            return self.clone();
        }
        let recipes = self
            .recipes
            .iter()
            .filter(|recipe| recipe.id != recipe_id)
            .cloned()
            .collect();
        Self {
            recipes: Arc::new(recipes),
        }
    }

    pub fn update_recipe(&self, recipe: Recipe) -> StoreSnapshot {
        if let Err(err) = recipe.validate() {
            warn!(recipe_id = recipe.id.0, "store: ignoring invalid recipe update: {err}");
            return self.clone();
        }
        self.replace_with(recipe.id, move |_| Some(recipe))
    }

    fn replace_with(
        &self,
        recipe_id: RecipeId,
        update: impl FnOnce(&Recipe) -> Option<Recipe>,
    ) -> StoreSnapshot {
        let Some(index) = self
            .recipes
            .iter()
            .position(|recipe| recipe.id == recipe_id)
        else {
            debug!(recipe_id = recipe_id.0, "store: mutation matched no recipe");
            return self.clone();
        };
        let Some(next) = update(&self.recipes[index]) else {
            debug!(recipe_id = recipe_id.0, "store: mutation matched no nested record");
            return self.clone();
        };

        let mut recipes = self.recipes.as_ref().clone();
        recipes[index] = Arc::new(next);
        Self {
            recipes: Arc::new(recipes),
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
