use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::matching::PantryIndex;
use crate::recipe_model::{Difficulty, Ingredient, Recipe};

/// How well a pantry covers one recipe. Recomputed whenever the pantry or the
/// recipe list changes; it borrows from the recipe and is never stored.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMatch<'a> {
    pub recipe: &'a Recipe,
    pub match_score: f64,
    pub owned_ingredients: Vec<&'a Ingredient>,
    pub missing_ingredients: Vec<&'a Ingredient>,
    pub substitutable_ingredients: Vec<&'a Ingredient>,
}

impl<'a> RecipeMatch<'a> {
    pub fn is_cook_now(&self) -> bool {
        self.missing_ingredients.is_empty()
    }

    // owned + substitutable, i.e. the numerator of the score
    pub fn available_count(&self) -> usize {
        self.owned_ingredients.len() + self.substitutable_ingredients.len()
    }
}

fn has_pantry_substitute(ingredient: &Ingredient, pantry: &PantryIndex) -> bool {
    ingredient
        .substitutes
        .iter()
        .any(|substitute| pantry.covers(&substitute.name))
}

/// Scores a recipe against a pantry that has already been indexed.
pub fn score_with_index<'a>(recipe: &'a Recipe, pantry: &PantryIndex) -> RecipeMatch<'a> {
    let mut owned = Vec::new();
    let mut substitutable = Vec::new();
    let mut missing = Vec::new();

    for ingredient in &recipe.ingredients {
        if pantry.covers(&ingredient.name) {
            owned.push(ingredient);
        } else if has_pantry_substitute(ingredient, pantry) {
            substitutable.push(ingredient);
        } else {
            missing.push(ingredient);
        }
    }

    let total = recipe.ingredients.len();
    // A recipe without ingredients is trivially available.
    let match_score = if total == 0 {
        1.0
    } else {
        (owned.len() + substitutable.len()) as f64 / total as f64
    };

    debug!(
        recipe_id = %recipe.id,
        owned = owned.len(),
        substitutable = substitutable.len(),
        missing = missing.len(),
        match_score,
        "Scored recipe"
    );

    RecipeMatch {
        recipe,
        match_score,
        owned_ingredients: owned,
        missing_ingredients: missing,
        substitutable_ingredients: substitutable,
    }
}

/// Partitions a recipe's ingredients into owned, substitutable and missing.
pub fn score_recipe<'a, S: AsRef<str>>(
    recipe: &'a Recipe,
    pantry_names: &[S],
) -> RecipeMatch<'a> {
    score_with_index(recipe, &PantryIndex::from_names(pantry_names))
}

/// Scores every recipe and orders them best match first. Recipes with equal scores
/// keep their input order.
pub fn rank_recipes<'a, S: AsRef<str>>(
    recipes: &'a [Recipe],
    pantry_names: &[S],
) -> Vec<RecipeMatch<'a>> {
    let pantry = PantryIndex::from_names(pantry_names);
    let mut matches: Vec<RecipeMatch<'a>> = recipes
        .iter()
        .map(|recipe| score_with_index(recipe, &pantry))
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));

    debug!(
        recipes = matches.len(),
        pantry_items = pantry.len(),
        "Ranked recipes against pantry"
    );
    matches
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeFilter {
    #[default]
    All,
    CookNow,
    Difficulty(Difficulty),
}

impl RecipeFilter {
    pub fn label(&self) -> &'static str {
        match self {
            RecipeFilter::All => "All",
            RecipeFilter::CookNow => "Cook Now",
            RecipeFilter::Difficulty(difficulty) => difficulty.label(),
        }
    }

    pub fn accepts(&self, recipe_match: &RecipeMatch<'_>) -> bool {
        match self {
            RecipeFilter::All => true,
            RecipeFilter::CookNow => recipe_match.is_cook_now(),
            RecipeFilter::Difficulty(difficulty) => recipe_match.recipe.difficulty == *difficulty,
        }
    }
}

impl fmt::Display for RecipeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilterError(pub String);

impl fmt::Display for UnknownFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown recipe filter '{}'. Expected one of: All, Cook Now, Easy, Medium, Hard",
            self.0
        )
    }
}

impl std::error::Error for UnknownFilterError {}

impl FromStr for RecipeFilter {
    type Err = UnknownFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();

        match key.as_str() {
            "all" => Ok(RecipeFilter::All),
            "cooknow" => Ok(RecipeFilter::CookNow),
            _ => key
                .parse::<Difficulty>()
                .map(RecipeFilter::Difficulty)
                .map_err(|_| UnknownFilterError(s.to_string())),
        }
    }
}

/// Applies a filter to an already ranked collection. `All` hands the collection back untouched.
pub fn filter_matches<'a>(
    matches: Vec<RecipeMatch<'a>>,
    filter: RecipeFilter,
) -> Vec<RecipeMatch<'a>> {
    if filter == RecipeFilter::All {
        return matches;
    }
    matches
        .into_iter()
        .filter(|recipe_match| filter.accepts(recipe_match))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::Substitute;

    fn names<'a>(ingredients: &[&'a Ingredient]) -> Vec<&'a str> {
        ingredients.iter().map(|ingredient| ingredient.name.as_str()).collect()
    }

    #[test]
    fn test_substitution_counts_toward_score() {
        let recipe = Recipe::new(
            "stir-fry",
            "Vegetable Stir Fry",
            vec![
                Ingredient::new("Garlic", "2 cloves"),
                Ingredient::new("Soy Sauce", "2 tbsp"),
                Ingredient::new("Sesame Oil", "1 tbsp")
                    .with_substitutes(vec![Substitute::named("Vegetable Oil")]),
                Ingredient::new("Bok Choy", "1 head"),
            ],
        );
        let pantry = ["garlic", "soy sauce", "vegetable oil"];

        let result = score_recipe(&recipe, &pantry);

        assert_eq!(result.match_score, 0.75);
        assert_eq!(names(&result.owned_ingredients), vec!["Garlic", "Soy Sauce"]);
        assert_eq!(names(&result.substitutable_ingredients), vec!["Sesame Oil"]);
        assert_eq!(names(&result.missing_ingredients), vec!["Bok Choy"]);
    }

    #[test]
    fn test_owned_wins_over_substitute() {
        let recipe = Recipe::new(
            "r",
            "Rice Bowl",
            vec![Ingredient::new("Rice", "1 cup")
                .with_substitutes(vec![Substitute::named("Quinoa")])],
        );
        let result = score_recipe(&recipe, &["rice", "quinoa"]);
        assert_eq!(result.owned_ingredients.len(), 1);
        assert!(result.substitutable_ingredients.is_empty());
    }

    #[test]
    fn test_empty_recipe_is_fully_available() {
        let recipe = Recipe::new("empty", "Water", Vec::new());
        let result = score_recipe(&recipe, &["salt"]);
        assert_eq!(result.match_score, 1.0);
        assert!(result.owned_ingredients.is_empty());
        assert!(result.missing_ingredients.is_empty());
        assert!(result.substitutable_ingredients.is_empty());
        assert!(result.is_cook_now());
    }

    #[test]
    fn test_empty_pantry_marks_everything_missing() {
        let recipe = Recipe::new("r", "Toast", vec![Ingredient::new("Bread", "2 slices")]);
        let no_pantry: [&str; 0] = [];
        let result = score_recipe(&recipe, &no_pantry);
        assert_eq!(result.match_score, 0.0);
        assert_eq!(result.missing_ingredients.len(), 1);
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let recipes = vec![
            Recipe::new("a", "A", vec![Ingredient::new("Beef", "1 lb")]),
            Recipe::new("b", "B", vec![Ingredient::new("Egg", "2")]),
            Recipe::new("c", "C", vec![Ingredient::new("Lamb", "1 lb")]),
            Recipe::new("d", "D", vec![Ingredient::new("Eggs", "3")]),
        ];
        let ranked = rank_recipes(&recipes, &["egg"]);
        let ids: Vec<&str> = ranked.iter().map(|m| m.recipe.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_filter_labels_parse() {
        assert_eq!("All".parse::<RecipeFilter>(), Ok(RecipeFilter::All));
        assert_eq!("Cook Now".parse::<RecipeFilter>(), Ok(RecipeFilter::CookNow));
        assert_eq!("cook-now".parse::<RecipeFilter>(), Ok(RecipeFilter::CookNow));
        assert_eq!(
            "hard".parse::<RecipeFilter>(),
            Ok(RecipeFilter::Difficulty(Difficulty::Hard))
        );
        assert!("Spicy".parse::<RecipeFilter>().is_err());
    }

    #[test]
    fn test_filters() {
        let recipes = vec![
            Recipe::new("easy-ready", "Toast", vec![Ingredient::new("Bread", "2 slices")])
                .with_difficulty(Difficulty::Easy),
            Recipe::new("hard-missing", "Souffle", vec![Ingredient::new("Gruyere", "100g")])
                .with_difficulty(Difficulty::Hard),
            Recipe::new("easy-missing", "Salad", vec![Ingredient::new("Lettuce", "1 head")])
                .with_difficulty(Difficulty::Easy),
        ];
        let pantry = ["bread"];

        let all = filter_matches(rank_recipes(&recipes, &pantry), RecipeFilter::All);
        assert_eq!(all, rank_recipes(&recipes, &pantry));

        let cook_now = filter_matches(rank_recipes(&recipes, &pantry), RecipeFilter::CookNow);
        assert_eq!(cook_now.len(), 1);
        assert_eq!(cook_now[0].recipe.id, "easy-ready");

        let easy = filter_matches(
            rank_recipes(&recipes, &pantry),
            RecipeFilter::Difficulty(Difficulty::Easy),
        );
        let ids: Vec<&str> = easy.iter().map(|m| m.recipe.id.as_str()).collect();
        assert_eq!(ids, vec!["easy-ready", "easy-missing"]);
    }
}
