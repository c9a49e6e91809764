use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

// Measurement units, containers and portion words. Quantities never identify the food itself.
#[rustfmt::skip]
const UNIT_WORDS: &[&str] = &[
    "cup", "cups", "c",
    "teaspoon", "teaspoons", "tsp",
    "tablespoon", "tablespoons", "tbsp",
    "ounce", "ounces", "oz",
    "pound", "pounds", "lb", "lbs",
    "gram", "grams", "g",
    "kilogram", "kilograms", "kg",
    "liter", "liters", "l",
    "milliliter", "milliliters", "ml",
    "pinch", "pinches",
    "dash", "dashes",
    "clove", "cloves",
    "can", "cans",
    "bunch", "bunches",
    "slice", "slices",
    "piece", "pieces",
    "package", "packages", "pkg",
    "stick", "sticks",
    "bottle", "bottles",
    "jar", "jars",
    "head", "heads",
    "stalk", "stalks",
    "sprig", "sprigs",
    "handful", "handfuls",
    "fillet", "fillets",
    "leaf", "leaves",
];

// Preparation methods, sizes, qualities and connectives.
#[rustfmt::skip]
const DESCRIPTOR_WORDS: &[&str] = &[
    "chopped", "sliced", "diced", "minced", "grated", "shredded", "crushed", "ground",
    "fresh", "dried", "frozen", "canned", "cooked", "raw",
    "large", "medium", "small", "whole",
    "organic", "natural",
    "beaten", "melted", "softened",
    "boneless", "skinless",
    "lean", "extra", "virgin",
    "unsalted", "salted",
    "sweet", "dry",
    "style", "type",
    "all", "purpose", "all-purpose",
    "and", "or", "of", "in", "with",
];

lazy_static! {
    static ref UNITS: HashSet<&'static str> = UNIT_WORDS.iter().copied().collect();
    static ref DESCRIPTORS: HashSet<&'static str> = DESCRIPTOR_WORDS.iter().copied().collect();
    static ref SEPARATORS: Regex = Regex::new(r"[-/]").expect("separator pattern should be valid");
    // Anything that is not an ASCII letter, underscore or whitespace. Digits go too.
    static ref NON_WORD_OR_DIGIT: Regex =
        Regex::new(r"[^A-Za-z_\s]").expect("punctuation pattern should be valid");
}

/// Canonical form of an ingredient or pantry phrase: lowercase, singular content
/// tokens joined by single spaces. An empty phrase never matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct NormalizedPhrase(String);

impl NormalizedPhrase {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters. Normalized text is ASCII, so this is also the byte length.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|token| !token.is_empty())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for NormalizedPhrase {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedPhrase {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl AsRef<str> for NormalizedPhrase {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn is_unit(token: &str) -> bool {
    UNITS.contains(token)
}

pub fn is_descriptor(token: &str) -> bool {
    DESCRIPTORS.contains(token)
}

fn is_stopword(token: &str) -> bool {
    is_unit(token) || is_descriptor(token)
}

/// Heuristic English plural stripping.
///
/// `cherries` -> `cherry`, `tomatoes` -> `tomato`, `boxes` -> `box`, `eggs` -> `egg`.
/// Words ending in `ss` (`glass`, `grass`) are left alone.
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{}y", stem);
    }

    if word.ends_with("oes")
        || word.ends_with("xes")
        || word.ends_with("shes")
        || word.ends_with("ches")
    {
        return word[..word.len() - 2].to_string();
    }

    if word.ends_with("ss") {
        return word.to_string();
    }

    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

/// Reduces a free-text phrase to its [`NormalizedPhrase`].
///
/// Units, quantities and descriptor words are dropped, punctuation is removed and each
/// remaining token is singularized. Tokens that singularize into nothing or into a
/// stopword (`"s"`, `"tsps"`) are dropped as well, which keeps the function idempotent.
pub fn normalize(text: &str) -> NormalizedPhrase {
    let lowered = text.to_lowercase();
    let spaced = SEPARATORS.replace_all(&lowered, " ");
    let cleaned = NON_WORD_OR_DIGIT.replace_all(&spaced, "");

    let tokens: Vec<String> = cleaned
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(singularize)
        .filter(|token| !token.is_empty() && !is_stopword(token))
        .collect();

    NormalizedPhrase(tokens.join(" "))
}
