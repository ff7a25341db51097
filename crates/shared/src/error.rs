use thiserror::Error;

use crate::domain::RecipeId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("timer duration must be greater than zero")]
    ZeroDuration,
    #[error("recipe {0} already exists")]
    DuplicateRecipeId(RecipeId),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("recipe {recipe_id} has rating {rating} outside 0-5")]
    InvalidRating { recipe_id: RecipeId, rating: f32 },
    #[error("recipe {recipe_id} must serve at least one person")]
    InvalidServings { recipe_id: RecipeId },
}
