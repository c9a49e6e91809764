pub mod cli;
pub mod config;
pub mod loaders;
pub mod match_summary;
pub mod matching;
pub mod recipe_model;
pub mod recipe_scorer;
