use serde::Serialize;
use std::collections::BTreeMap;

use crate::recipe_model::Ingredient;
use crate::recipe_scorer::RecipeMatch;

pub const DEFAULT_READY_THRESHOLD: f64 = 0.8;
pub const UNCATEGORIZED: &str = "Other";

const HIGH_MATCH_PERCENT: u32 = 80;
const MEDIUM_MATCH_PERCENT: u32 = 50;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

impl MatchTier {
    pub fn from_percent(percent: u32) -> Self {
        if percent >= HIGH_MATCH_PERCENT {
            MatchTier::High
        } else if percent >= MEDIUM_MATCH_PERCENT {
            MatchTier::Medium
        } else {
            MatchTier::Low
        }
    }
}

/// Match score as a whole percentage, rounded half up.
pub fn score_percent(recipe_match: &RecipeMatch<'_>) -> u32 {
    (recipe_match.match_score.clamp(0.0, 1.0) * 100.0).round() as u32
}

pub fn match_tier(recipe_match: &RecipeMatch<'_>) -> MatchTier {
    MatchTier::from_percent(score_percent(recipe_match))
}

/// Groups ingredients by category, alphabetically. Ingredients without a category
/// (or with a blank one) land under "Other". Order inside a group follows the input.
pub fn group_by_category<'a>(
    ingredients: &[&'a Ingredient],
) -> BTreeMap<String, Vec<&'a Ingredient>> {
    let mut groups: BTreeMap<String, Vec<&'a Ingredient>> = BTreeMap::new();
    for &ingredient in ingredients {
        let category = ingredient
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(UNCATEGORIZED);
        groups.entry(category.to_string()).or_default().push(ingredient);
    }
    groups
}

/// Splits a ranked list into recipes that are ready to cook (score at or above
/// `threshold`) and those that need a shopping trip. Relative order is kept on both sides.
pub fn split_ready<'m, 'a>(
    matches: &'m [RecipeMatch<'a>],
    threshold: f64,
) -> (Vec<&'m RecipeMatch<'a>>, Vec<&'m RecipeMatch<'a>>) {
    matches
        .iter()
        .partition(|recipe_match| recipe_match.match_score >= threshold)
}

/// Names of the ingredients still to buy, in recipe order. This is what gets handed to
/// the store finder.
pub fn shopping_list(recipe_match: &RecipeMatch<'_>) -> Vec<String> {
    recipe_match
        .missing_ingredients
        .iter()
        .map(|ingredient| ingredient.name.clone())
        .collect()
}
