use csv::{ReaderBuilder, Writer};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use super::error::{read_file, write_file, LoadError};
use crate::matching::normalize;

const NAME_COL: &str = "Name";
const EXPIRY_COL: &str = "Expiry";

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PantryItem {
    pub name: String,
    pub expiry: Option<String>,
}

impl PantryItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expiry: None,
        }
    }
}

// The pantry behaves as a set: keep the first spelling of each name, ignoring case.
fn dedup_items(items: Vec<PantryItem>) -> Vec<PantryItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.name.to_lowercase()))
        .collect()
}

fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Adds bought items to the pantry under their normalized, title-cased name.
///
/// `"2 cups chopped bok choy"` is stored as `"Bok Choy"`. Items that normalize to
/// nothing, or that the pantry already holds (ignoring case), are skipped.
pub fn restock_pantry<S: AsRef<str>>(pantry: Vec<PantryItem>, bought: &[S]) -> Vec<PantryItem> {
    let mut seen: HashSet<String> = pantry.iter().map(|item| item.name.to_lowercase()).collect();
    let mut items = pantry;

    for raw in bought {
        let normalized = normalize(raw.as_ref());
        if normalized.is_empty() {
            warn!(item = raw.as_ref(), "Skipping bought item with no ingredient words");
            continue;
        }

        let name = title_case(normalized.as_str());
        if seen.insert(name.to_lowercase()) {
            items.push(PantryItem::new(name));
        }
    }

    items
}

/// One item per line. Blank lines and `#` comments are skipped.
pub fn parse_pantry_text(content: &str) -> Vec<PantryItem> {
    let items = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PantryItem::new)
        .collect();
    dedup_items(items)
}

/// CSV with a `Name` column and an optional `Expiry` column (kept verbatim).
pub fn parse_pantry_csv(content: &str) -> Result<Vec<PantryItem>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = rdr.headers()?.clone();
    let name_idx = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(NAME_COL))
        .ok_or_else(|| LoadError::MissingColumn(NAME_COL.to_string()))?;
    let expiry_idx = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(EXPIRY_COL));

    let mut items = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result?;
        let name = record.get(name_idx).map(str::trim).unwrap_or_default();
        if name.is_empty() {
            warn!(row = row_index + 1, "Skipping pantry row without a name");
            continue;
        }

        let expiry = expiry_idx
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        items.push(PantryItem {
            name: name.to_string(),
            expiry,
        });
    }

    Ok(dedup_items(items))
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Parses pantry content, choosing the CSV reader for `.csv` paths and the
/// line-per-item reader for everything else.
pub fn parse_pantry(path: &Path, content: &str) -> Result<Vec<PantryItem>, LoadError> {
    if is_csv(path) {
        parse_pantry_csv(content)
    } else {
        Ok(parse_pantry_text(content))
    }
}

pub async fn load_pantry(path: &Path) -> Result<Vec<PantryItem>, LoadError> {
    let content = read_file(path).await?;
    let items = parse_pantry(path, &content)?;
    info!(path = ?path, count = items.len(), "Loaded pantry");
    Ok(items)
}

/// Renders items in the format [`parse_pantry`] reads back for the same path.
pub fn format_pantry(path: &Path, items: &[PantryItem]) -> Result<String, LoadError> {
    if !is_csv(path) {
        return Ok(items.iter().map(|item| format!("{}\n", item.name)).collect());
    }

    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record([NAME_COL, EXPIRY_COL])?;
    for item in items {
        wtr.write_record([item.name.as_str(), item.expiry.as_deref().unwrap_or_default()])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|err| LoadError::CsvWriteError(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| LoadError::CsvWriteError(err.to_string()))
}

pub async fn save_pantry(path: &Path, items: &[PantryItem]) -> Result<(), LoadError> {
    let content = format_pantry(path, items)?;
    write_file(path, &content).await?;
    info!(path = ?path, count = items.len(), "Saved pantry");
    Ok(())
}

pub fn pantry_names(items: &[PantryItem]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_text_pantry_skips_comments_and_duplicates() {
        let content = "# staples\nRice\n\n  soy sauce  \nrice\nQuinoa\n";
        let items = parse_pantry_text(content);
        assert_eq!(pantry_names(&items), vec!["Rice", "soy sauce", "Quinoa"]);
    }

    #[tokio::test]
    async fn test_csv_pantry_reads_name_and_expiry() -> anyhow::Result<()> {
        let mut file = Builder::new().suffix(".csv").tempfile()?;
        writeln!(file, "{},{},Quantity", NAME_COL, EXPIRY_COL)?;
        writeln!(file, "Milk,2026-10-25,1L")?;
        writeln!(file, "Eggs,,12")?;
        writeln!(file, ",2026-11-01,1")?; // no name
        writeln!(file, "milk,2026-10-30,1L")?; // duplicate
        file.flush()?;

        let items = load_pantry(file.path()).await?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Milk");
        assert_eq!(items[0].expiry.as_deref(), Some("2026-10-25"));
        assert_eq!(items[1].name, "Eggs");
        assert_eq!(items[1].expiry, None);
        Ok(())
    }

    #[test]
    fn test_csv_pantry_missing_name_column() {
        let result = parse_pantry_csv("Item,Expiry\nMilk,2026-10-25\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Column 'Name' not found"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = load_pantry(Path::new("this_pantry_does_not_exist.txt")).await;
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_restock_normalizes_and_title_cases_bought_items() {
        let pantry = vec![PantryItem::new("Rice")];
        let bought = ["2 cups chopped bok choy", "Fresh Scallions", "1 tbsp"];

        let items = restock_pantry(pantry, &bought);

        assert_eq!(pantry_names(&items), vec!["Rice", "Bok Choy", "Scallion"]);
    }

    #[test]
    fn test_restock_skips_items_already_in_the_pantry() {
        let pantry = vec![PantryItem {
            name: "bok choy".to_string(),
            expiry: Some("2026-10-25".to_string()),
        }];
        let bought = ["Bok Choy", "eggs", "2 large eggs"];

        let items = restock_pantry(pantry, &bought);

        assert_eq!(pantry_names(&items), vec!["bok choy", "Egg"]);
        assert_eq!(items[0].expiry.as_deref(), Some("2026-10-25"));
    }

    #[test]
    fn test_formatted_pantry_reads_back() -> anyhow::Result<()> {
        let items = vec![
            PantryItem {
                name: "Milk".to_string(),
                expiry: Some("2026-10-25".to_string()),
            },
            PantryItem::new("Soy Sauce, Low Sodium"),
        ];

        for path in [Path::new("pantry.csv"), Path::new("pantry.txt")] {
            let content = format_pantry(path, &items)?;
            let parsed = parse_pantry(path, &content)?;
            assert_eq!(pantry_names(&parsed), pantry_names(&items), "{:?}", path);
        }

        let csv = format_pantry(Path::new("pantry.csv"), &items)?;
        assert!(csv.starts_with("Name,Expiry\n"));
        assert_eq!(parse_pantry_csv(&csv)?[0].expiry.as_deref(), Some("2026-10-25"));
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_restocked_items() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pantry.txt");

        let items = restock_pantry(vec![PantryItem::new("Rice")], &["fresh basil leaves"]);
        save_pantry(&path, &items).await?;

        let loaded = load_pantry(&path).await?;
        assert_eq!(pantry_names(&loaded), vec!["Rice", "Basil Leave"]);
        Ok(())
    }
}
