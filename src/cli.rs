use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::recipe_scorer::RecipeFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error). Overrides PANTRY_LOG_LEVEL.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank recipes by how much of each one the pantry already covers
    Rank {
        /// Path to the recipes JSON file
        #[arg(short, long)]
        recipes: PathBuf,
        /// Path to the pantry file (.csv with a Name column, or one item per line)
        #[arg(short, long)]
        pantry: PathBuf,
        /// All, "Cook Now", Easy, Medium or Hard
        #[arg(short, long, default_value = "All")]
        filter: RecipeFilter,
        /// Score at which a recipe is listed as ready to cook.
        /// Overrides PANTRY_READY_THRESHOLD.
        #[arg(long)]
        ready_threshold: Option<f64>,
        /// Print the ranked matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the shopping list for one recipe
    Shop {
        #[arg(short, long)]
        recipes: PathBuf,
        #[arg(short, long)]
        pantry: PathBuf,
        #[arg(long)]
        recipe_id: String,
        /// Add the missing ingredients to the pantry file once they are bought
        #[arg(long)]
        bought: bool,
    },
    /// Check whether a pantry item satisfies a recipe ingredient
    Match {
        recipe_ingredient: String,
        pantry_item: String,
    },
    /// Show the normalized form of an ingredient phrase
    Normalize { text: String },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
