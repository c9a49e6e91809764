use anyhow::{anyhow, Context, Result};
use pantry_match::cli::{parse_args, Command};
use pantry_match::config::Config;
use pantry_match::loaders::{
    load_pantry, load_recipes, pantry_names, restock_pantry, save_pantry, PantryItem,
};
use pantry_match::match_summary::{
    group_by_category, match_tier, score_percent, shopping_list, split_ready,
};
use pantry_match::matching::{is_match, normalize};
use pantry_match::recipe_model::Recipe;
use pantry_match::recipe_scorer::{
    filter_matches, rank_recipes, score_recipe, RecipeFilter, RecipeMatch,
};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(default_level: &str) -> Result<()> {
    // RUST_LOG wins when set, otherwise the configured level applies to this crate.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("pantry_match={}", default_level)))
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))
}

async fn read_recipes(path: &Path) -> Result<Vec<Recipe>> {
    load_recipes(path)
        .await
        .with_context(|| format!("Failed to load recipes from '{}'", path.display()))
}

async fn read_pantry(path: &Path) -> Result<Vec<PantryItem>> {
    let items = load_pantry(path)
        .await
        .with_context(|| format!("Failed to load pantry from '{}'", path.display()))?;
    if items.is_empty() {
        warn!("Pantry is empty; every ingredient will be reported as missing");
    }
    Ok(items)
}

fn print_match(recipe_match: &RecipeMatch<'_>) {
    let recipe = recipe_match.recipe;
    println!(
        "  [{:>3}%] {} ({}, {:?}) - {}/{} available",
        score_percent(recipe_match),
        recipe.name,
        recipe.difficulty,
        match_tier(recipe_match),
        recipe_match.available_count(),
        recipe.ingredients.len()
    );
    if !recipe_match.substitutable_ingredients.is_empty() {
        let names: Vec<&str> = recipe_match
            .substitutable_ingredients
            .iter()
            .map(|ingredient| ingredient.name.as_str())
            .collect();
        println!("         substitute for: {}", names.join(", "));
    }
    if !recipe_match.missing_ingredients.is_empty() {
        println!("         missing: {}", shopping_list(recipe_match).join(", "));
    }
}

fn print_ranking(matches: &[RecipeMatch<'_>], filter: RecipeFilter, ready_threshold: f64) {
    if matches.is_empty() {
        match filter {
            RecipeFilter::CookNow => println!(
                "No recipes matched exactly. Try the 'All' filter to see what you can make \
                 with a quick shopping trip!"
            ),
            other => println!(
                "No {} recipes found. Try a different filter.",
                other.label().to_lowercase()
            ),
        }
        return;
    }

    let (ready, needs_shopping) = split_ready(matches, ready_threshold);
    if !ready.is_empty() {
        println!("Ready to cook");
        ready.iter().for_each(|recipe_match| print_match(recipe_match));
    }
    if !needs_shopping.is_empty() {
        println!("Needs shopping");
        needs_shopping.iter().for_each(|recipe_match| print_match(recipe_match));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // .env is optional

    let cli_args = parse_args();
    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(level) = &cli_args.log_level {
        config.log_level = level.to_lowercase();
        config.validate().context("Invalid --log-level")?;
    }
    init_tracing(&config.log_level)?;

    match cli_args.command {
        Command::Rank { recipes, pantry, filter, ready_threshold, json } => {
            if let Some(threshold) = ready_threshold {
                config = config
                    .with_ready_threshold(threshold)
                    .context("Invalid --ready-threshold")?;
            }

            let recipes = read_recipes(&recipes).await?;
            let pantry_items = read_pantry(&pantry).await?;
            let names = pantry_names(&pantry_items);

            let ranked = filter_matches(rank_recipes(&recipes, &names), filter);
            info!(shown = ranked.len(), filter = %filter, "Ranking complete");

            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                print_ranking(&ranked, filter, config.ready_threshold);
            }
        }
        Command::Shop { recipes, pantry, recipe_id, bought } => {
            let recipes = read_recipes(&recipes).await?;
            let pantry_items = read_pantry(&pantry).await?;
            let names = pantry_names(&pantry_items);

            let recipe = recipes
                .iter()
                .find(|recipe| recipe.id == recipe_id)
                .ok_or_else(|| anyhow!("No recipe with id '{}'", recipe_id))?;
            let recipe_match = score_recipe(recipe, &names);

            if recipe_match.missing_ingredients.is_empty() {
                println!("Nothing to buy for {}: everything is in the pantry.", recipe.name);
                return Ok(());
            }

            println!("Shopping list for {}:", recipe.name);
            for (category, ingredients) in group_by_category(&recipe_match.missing_ingredients) {
                println!("{}", category);
                for ingredient in ingredients {
                    if ingredient.quantity.is_empty() {
                        println!("  - {}", ingredient.name);
                    } else {
                        println!("  - {} ({})", ingredient.name, ingredient.quantity);
                    }
                }
            }

            if bought {
                let before = pantry_items.len();
                let restocked = restock_pantry(pantry_items, &shopping_list(&recipe_match));
                save_pantry(&pantry, &restocked)
                    .await
                    .with_context(|| format!("Failed to save pantry to '{}'", pantry.display()))?;
                println!("Added {} item(s) to the pantry.", restocked.len() - before);
            }
        }
        Command::Match { recipe_ingredient, pantry_item } => {
            let matched = is_match(&recipe_ingredient, &pantry_item);
            println!("recipe: '{}' -> '{}'", recipe_ingredient, normalize(&recipe_ingredient));
            println!("pantry: '{}' -> '{}'", pantry_item, normalize(&pantry_item));
            println!("{}", if matched { "match" } else { "no match" });
        }
        Command::Normalize { text } => {
            println!("{}", normalize(&text));
        }
    }

    Ok(())
}
