//! Turns recipe JSON produced by the generation service into [`Recipe`] values.
//!
//! Older payloads list substitutes as bare strings while newer ones use objects with a
//! name, quantity and note. Both shapes are folded into [`Substitute`] here so the
//! matching engine only ever sees one.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use super::error::{read_file, LoadError};
use crate::recipe_model::{Difficulty, Ingredient, Recipe, RecipeType, Substitute};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSubstitute {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        quantity: Option<String>,
        #[serde(default)]
        note: Option<String>,
    },
}

impl From<RawSubstitute> for Substitute {
    fn from(raw: RawSubstitute) -> Self {
        match raw {
            RawSubstitute::Name(name) => Substitute::named(name),
            RawSubstitute::Detailed { name, quantity, note } => Substitute { name, quantity, note },
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawIngredient {
    name: String,
    #[serde(default)]
    quantity: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    substitutes: Option<Vec<RawSubstitute>>,
}

impl From<RawIngredient> for Ingredient {
    fn from(raw: RawIngredient) -> Self {
        Ingredient {
            name: raw.name,
            quantity: raw.quantity.unwrap_or_default(),
            category: raw.category,
            substitutes: raw
                .substitutes
                .unwrap_or_default()
                .into_iter()
                .map(Substitute::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecipe {
    #[serde(default)]
    id: Option<String>,
    #[serde(alias = "title")]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    cuisine: Option<String>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
    #[serde(default)]
    recipe_type: Option<RecipeType>,
    #[serde(default)]
    time_minutes: Option<u32>,
    #[serde(default)]
    ingredients: Option<Vec<RawIngredient>>,
    #[serde(default)]
    instructions: Option<Vec<String>>,
    #[serde(default)]
    tips: Option<Vec<String>>,
    #[serde(default)]
    beverage_pairing: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

impl RawRecipe {
    fn into_recipe(self, position: usize) -> Recipe {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("recipe-{}", position + 1));

        Recipe {
            id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            cuisine: self.cuisine.unwrap_or_default(),
            difficulty: self.difficulty.unwrap_or_default(),
            recipe_type: self.recipe_type,
            time_minutes: self.time_minutes.unwrap_or_default(),
            ingredients: self
                .ingredients
                .unwrap_or_default()
                .into_iter()
                .map(Ingredient::from)
                .collect(),
            instructions: self.instructions.unwrap_or_default(),
            tips: self.tips.unwrap_or_default(),
            beverage_pairing: self.beverage_pairing,
            image_url: self.image_url,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeDocument {
    List(Vec<RawRecipe>),
    Wrapped { recipes: Vec<RawRecipe> },
}

pub fn parse_recipes_json(json: &str) -> Result<Vec<Recipe>, LoadError> {
    let raw_recipes = match serde_json::from_str::<RecipeDocument>(json)? {
        RecipeDocument::List(recipes) => recipes,
        RecipeDocument::Wrapped { recipes } => recipes,
    };

    let recipes: Vec<Recipe> = raw_recipes
        .into_iter()
        .enumerate()
        .map(|(position, raw)| raw.into_recipe(position))
        .collect();

    debug!(count = recipes.len(), "Parsed recipe document");
    Ok(recipes)
}

pub async fn load_recipes(path: &Path) -> Result<Vec<Recipe>, LoadError> {
    let content = read_file(path).await?;
    let recipes = parse_recipes_json(&content)?;
    info!(path = ?path, count = recipes.len(), "Loaded recipes");
    Ok(recipes)
}
