pub mod error;
pub mod pantry_loader;
pub mod recipe_loader;

pub use error::LoadError;
pub use pantry_loader::{
    format_pantry, load_pantry, pantry_names, parse_pantry, restock_pantry, save_pantry,
    PantryItem,
};
pub use recipe_loader::{load_recipes, parse_recipes_json};
