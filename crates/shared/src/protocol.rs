use serde::{Deserialize, Serialize};

use crate::domain::{IngredientId, Recipe, RecipeId, StepId};

/// Mutations accepted by the recipe store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StoreAction {
    ToggleFavorite {
        recipe_id: RecipeId,
    },
    ToggleIngredientCheck {
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
    },
    ToggleStepCompleted {
        recipe_id: RecipeId,
        step_id: StepId,
    },
    UpdateStepNotes {
        recipe_id: RecipeId,
        step_id: StepId,
        notes: String,
    },
    AddRecipe {
        recipe: Box<Recipe>,
    },
    DeleteRecipe {
        recipe_id: RecipeId,
    },
    UpdateRecipe {
        recipe: Box<Recipe>,
    },
}

impl StoreAction {
    pub fn name(&self) -> &'static str {
        match self {
            StoreAction::ToggleFavorite { .. } => "toggle_favorite",
            StoreAction::ToggleIngredientCheck { .. } => "toggle_ingredient_check",
            StoreAction::ToggleStepCompleted { .. } => "toggle_step_completed",
            StoreAction::UpdateStepNotes { .. } => "update_step_notes",
            StoreAction::AddRecipe { .. } => "add_recipe",
            StoreAction::DeleteRecipe { .. } => "delete_recipe",
            StoreAction::UpdateRecipe { .. } => "update_recipe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Click,
    Toggle,
    Complete,
    Success,
    Timer,
}

/// One-way notifications for presentation collaborators. Nothing in the core
/// waits on their delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CookEvent {
    FavoriteToggled {
        recipe_id: RecipeId,
        is_favorite: bool,
    },
    IngredientChecked {
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
        checked: bool,
    },
    StepCompleted {
        recipe_id: RecipeId,
        step_id: StepId,
        completed: bool,
    },
    StepNotesSaved {
        recipe_id: RecipeId,
        step_id: StepId,
    },
    StepsReordered {
        recipe_id: RecipeId,
        order: Vec<StepId>,
    },
    AllStepsCompleted {
        recipe_id: RecipeId,
    },
    TimerCompleted {
        recipe_id: RecipeId,
        step_id: StepId,
    },
}

impl CookEvent {
    pub fn sound_cue(&self) -> SoundCue {
        match self {
            CookEvent::FavoriteToggled {
                is_favorite: true, ..
            } => SoundCue::Success,
            CookEvent::FavoriteToggled { .. } => SoundCue::Toggle,
            CookEvent::IngredientChecked { .. } => SoundCue::Toggle,
            CookEvent::StepCompleted {
                completed: true, ..
            } => SoundCue::Complete,
            CookEvent::StepCompleted { .. } => SoundCue::Toggle,
            CookEvent::StepNotesSaved { .. } => SoundCue::Success,
            CookEvent::StepsReordered { .. } => SoundCue::Click,
            CookEvent::AllStepsCompleted { .. } => SoundCue::Success,
            CookEvent::TimerCompleted { .. } => SoundCue::Timer,
        }
    }
}
