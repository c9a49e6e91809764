use std::collections::HashSet;

use super::normalizer::{normalize, NormalizedPhrase};

/// Character-level edit distance used by the fuzzy fallback.
pub use strsim::levenshtein;

// Fuzzy fallback thresholds. The fallback only runs when the normalized strings differ
// in length by strictly less than FUZZY_MAX_LENGTH_GAP characters.
pub const FUZZY_MAX_LENGTH_GAP: usize = 3;
// Recipe-side strings longer than this tolerate FUZZY_LONG_EDITS, others FUZZY_SHORT_EDITS.
pub const FUZZY_LONG_PHRASE_MIN_LEN: usize = 5;
pub const FUZZY_SHORT_EDITS: usize = 1;
pub const FUZZY_LONG_EDITS: usize = 2;

fn fuzzy_match(recipe: &NormalizedPhrase, pantry: &NormalizedPhrase) -> bool {
    if recipe.len().abs_diff(pantry.len()) >= FUZZY_MAX_LENGTH_GAP {
        return false;
    }

    let allowed_edits = if recipe.len() > FUZZY_LONG_PHRASE_MIN_LEN {
        FUZZY_LONG_EDITS
    } else {
        FUZZY_SHORT_EDITS
    };

    levenshtein(recipe.as_str(), pantry.as_str()) <= allowed_edits
}

/// Rule cascade over already-normalized phrases. Structural rules win before the
/// fuzzy fallback is ever consulted.
pub fn matches_normalized(recipe: &NormalizedPhrase, pantry: &NormalizedPhrase) -> bool {
    if recipe.is_empty() || pantry.is_empty() {
        return false;
    }

    if recipe == pantry {
        return true;
    }

    let recipe_tokens: HashSet<&str> = recipe.tokens().collect();
    let pantry_tokens: HashSet<&str> = pantry.tokens().collect();

    // Generic pantry entry covers a specific recipe need: "rice" -> "jasmine rice".
    if pantry_tokens.is_subset(&recipe_tokens) {
        return true;
    }

    // Specific pantry entry covers a generic recipe need: "whole wheat flour" -> "flour".
    if recipe_tokens.is_subset(&pantry_tokens) {
        return true;
    }

    fuzzy_match(recipe, pantry)
}

/// Decides whether a pantry item counts as owning a recipe ingredient.
pub fn is_match(recipe_ingredient: &str, pantry_item: &str) -> bool {
    matches_normalized(&normalize(recipe_ingredient), &normalize(pantry_item))
}

/// A pantry with every item name normalized once up front.
///
/// Scoring a batch of recipes asks the same pantry the same question many times;
/// this keeps the answers identical to [`is_match`] without renormalizing the pantry.
#[derive(Debug, Clone, Default)]
pub struct PantryIndex {
    entries: Vec<NormalizedPhrase>,
}

impl PantryIndex {
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let entries = names
            .iter()
            .map(|name| normalize(name.as_ref()))
            // Empty phrases can never match, so there is no point keeping them.
            .filter(|phrase| !phrase.is_empty())
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn covers(&self, recipe_ingredient: &str) -> bool {
        let recipe = normalize(recipe_ingredient);
        if recipe.is_empty() {
            return false;
        }
        self.entries
            .iter()
            .any(|pantry| matches_normalized(&recipe, pantry))
    }
}
