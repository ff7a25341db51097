use chrono::{TimeZone, Utc};
use shared::domain::{
    Category, Difficulty, Ingredient, IngredientId, Recipe, RecipeId, Step, StepId,
};

pub(crate) fn recipe(id: i64, title: &str) -> Recipe {
    Recipe {
        id: RecipeId(id),
        title: title.to_string(),
        description: format!("{title} description"),
        category: Category::Dinner,
        tags: Vec::new(),
        difficulty: Difficulty::Easy,
        prep_time: 10,
        cook_time: 10,
        servings: 2,
        rating: None,
        is_favorite: false,
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp")
            + chrono::Duration::days(id),
        image_url: None,
        ingredients: vec![ingredient(1, "Salt"), ingredient(2, "Pepper")],
        steps: vec![step(1, "Prep"), step(2, "Cook"), step(3, "Serve")],
        notes: None,
    }
}

pub(crate) fn ingredient(id: i64, name: &str) -> Ingredient {
    Ingredient {
        id: IngredientId(id),
        name: name.to_string(),
        amount: 1.0,
        unit: "tsp".to_string(),
        checked: false,
    }
}

pub(crate) fn step(id: i64, description: &str) -> Step {
    Step {
        id: StepId(id),
        description: description.to_string(),
        estimated_time: None,
        timer_duration: None,
        has_timer: false,
        completed: false,
        notes: None,
    }
}

/// The two-recipe catalog used throughout the filter examples.
pub(crate) fn pasta_and_curry() -> Vec<Recipe> {
    let mut pasta = recipe(1, "Pasta");
    pasta.difficulty = Difficulty::Easy;
    pasta.prep_time = 10;
    pasta.cook_time = 20;
    pasta.tags = vec!["italian".to_string()];

    let mut curry = recipe(2, "Curry");
    curry.difficulty = Difficulty::Hard;
    curry.prep_time = 15;
    curry.cook_time = 30;
    curry.tags = vec!["spicy".to_string()];

    vec![pasta, curry]
}
