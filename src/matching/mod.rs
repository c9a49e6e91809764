pub mod matcher;
pub mod normalizer;

pub use matcher::{is_match, levenshtein, matches_normalized, PantryIndex};
pub use normalizer::{normalize, singularize, NormalizedPhrase};
