//! Column alias resolution and text cleaning for raw table rows

use serde_json::Value;

use crate::types::RawRow;

/// Column labels used for the country name, highest priority first
const COUNTRY_ALIASES: &[&str] = &["Country / dependency", "Country/Territory", "Country"];
/// Column labels used for the capital name, highest priority first
const CAPITAL_ALIASES: &[&str] = &["Capital", "City"];
/// Any column whose label contains this holds the latitude
const LATITUDE_MARKER: &str = "Latitude";
const POPULATION_KEY: &str = "Population";
const AREA_KEY: &str = "Area";
/// Footnote asterisk, narrow no-break space, zero-width space
const DECORATIVE_CHARS: &[char] = &['*', '\u{202f}', '\u{200b}'];

/// Maps the column labels of every known source table onto canonical fields.
///
/// New source schemas are supported by adding labels here; the merge logic
/// never looks at column names directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    pub country: Vec<String>,
    pub capital: Vec<String>,
    pub latitude_marker: String,
    pub population: String,
    pub area: String,
    pub decorative_chars: Vec<char>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            country: COUNTRY_ALIASES.iter().map(|s| s.to_string()).collect(),
            capital: CAPITAL_ALIASES.iter().map(|s| s.to_string()).collect(),
            latitude_marker: LATITUDE_MARKER.to_string(),
            population: POPULATION_KEY.to_string(),
            area: AREA_KEY.to_string(),
            decorative_chars: DECORATIVE_CHARS.to_vec(),
        }
    }
}

/// A raw row resolved onto canonical fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub country: String,
    pub capital: String,
    pub population: Option<String>,
    pub area: Option<String>,
    pub latitude: Option<String>,
}

impl AliasTable {
    /// Resolve a row, or `None` when it has no usable country or capital
    pub fn normalize(&self, row: &RawRow) -> Option<NormalizedRow> {
        let country = first_alias(row, &self.country)
            .and_then(cell_text)
            .and_then(|name| self.clean_name(name))?;
        let capital = first_alias(row, &self.capital)
            .and_then(cell_text)
            .and_then(|name| self.clean_name(name))?;

        Some(NormalizedRow {
            country,
            capital,
            population: row.get(&self.population).and_then(non_empty),
            area: row.get(&self.area).and_then(non_empty),
            latitude: self.latitude_column(row).and_then(non_empty),
        })
    }

    /// Strip decorative characters and surrounding whitespace
    pub fn clean_name(&self, name: &str) -> Option<String> {
        let stripped: String = name
            .chars()
            .filter(|c| !self.decorative_chars.contains(c))
            .collect();
        let trimmed = stripped.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn latitude_column<'a>(&self, row: &'a RawRow) -> Option<&'a Value> {
        row.iter()
            .find(|(label, _)| label.contains(self.latitude_marker.as_str()))
            .map(|(_, value)| value)
    }
}

/// Value of the first alias present in the row, even if that value is null
fn first_alias<'a>(row: &'a RawRow, aliases: &[String]) -> Option<&'a Value> {
    aliases.iter().find_map(|label| row.get(label))
}

fn cell_text(value: &Value) -> Option<&str> {
    value.as_str()
}

fn non_empty(value: &Value) -> Option<String> {
    cell_text(value)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
