use crate::{
    domain::{Category, Difficulty, Recipe, RecipeId, StepId},
    error::CoreError,
    protocol::{CookEvent, SoundCue, StoreAction},
};

fn recipe_json() -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "title": "Shakshuka",
        "description": "Eggs poached in spiced tomato sauce",
        "category": "breakfast",
        "tags": ["eggs", "spicy"],
        "difficulty": "medium",
        "prepTime": 10,
        "cookTime": 25,
        "servings": 2,
        "rating": 4.5,
        "isFavorite": true,
        "createdAt": "2024-03-01T08:00:00Z",
        "ingredients": [
            { "id": 1, "name": "Eggs", "amount": 4.0, "unit": "pcs" }
        ],
        "steps": [
            { "id": 1, "description": "Simmer sauce", "timerDuration": 600, "hasTimer": true }
        ]
    })
}

#[test]
fn recipe_deserializes_from_camel_case_record() {
    let recipe: Recipe = serde_json::from_value(recipe_json()).expect("recipe");
    assert_eq!(recipe.id, RecipeId(7));
    assert_eq!(recipe.category, Category::Breakfast);
    assert_eq!(recipe.difficulty, Difficulty::Medium);
    assert_eq!(recipe.total_time(), 35);
    assert!(!recipe.ingredients[0].checked);
    assert_eq!(recipe.steps[0].timer_duration, Some(600));
    assert!(!recipe.steps[0].completed);
    assert!(recipe.notes.is_none());
}

#[test]
fn recipe_validation_rejects_out_of_range_rating() {
    let mut recipe: Recipe = serde_json::from_value(recipe_json()).expect("recipe");
    recipe.validate().expect("valid recipe");

    recipe.rating = Some(5.5);
    assert!(matches!(
        recipe.validate(),
        Err(CoreError::InvalidRating { recipe_id: RecipeId(7), .. })
    ));

    recipe.rating = None;
    recipe.servings = 0;
    assert_eq!(
        recipe.validate(),
        Err(CoreError::InvalidServings {
            recipe_id: RecipeId(7)
        })
    );
}

#[test]
fn category_and_difficulty_parse_case_insensitively() {
    assert_eq!("Dessert".parse::<Category>(), Ok(Category::Dessert));
    assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
    assert_eq!(
        "brunch".parse::<Category>(),
        Err(CoreError::UnknownCategory("brunch".into()))
    );
    assert!("extreme".parse::<Difficulty>().is_err());
}

#[test]
fn store_action_uses_tagged_payload_shape() {
    let action = StoreAction::ToggleStepCompleted {
        recipe_id: RecipeId(3),
        step_id: StepId(2),
    };
    let value = serde_json::to_value(&action).expect("serialize");
    assert_eq!(value["type"], "toggle_step_completed");
    assert_eq!(value["payload"]["recipe_id"], 3);
    assert_eq!(action.name(), "toggle_step_completed");
}

#[test]
fn events_map_to_sound_cues() {
    let favorited = CookEvent::FavoriteToggled {
        recipe_id: RecipeId(1),
        is_favorite: true,
    };
    let unfavorited = CookEvent::FavoriteToggled {
        recipe_id: RecipeId(1),
        is_favorite: false,
    };
    let timer = CookEvent::TimerCompleted {
        recipe_id: RecipeId(1),
        step_id: StepId(4),
    };
    assert_eq!(favorited.sound_cue(), SoundCue::Success);
    assert_eq!(unfavorited.sound_cue(), SoundCue::Toggle);
    assert_eq!(timer.sound_cue(), SoundCue::Timer);
}
