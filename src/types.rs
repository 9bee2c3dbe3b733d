//! Scraped page dumps and consolidated country records

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Written in place of a table when the page has no `wikitable`
pub const NO_TABLE_SENTINEL: &str = "Nenhuma tabela encontrada";
/// Written in place of a table when the `wikitable` has no headers or no data rows
pub const EMPTY_TABLE_SENTINEL: &str = "Tabela sem dados estruturados";

/// One table row: column label as it appeared on the page -> cell text (or null)
pub type RawRow = Map<String, Value>;

/// Table contents of one scraped page
#[derive(Debug, Clone, PartialEq)]
pub enum TableData {
    Table(Vec<RawRow>),
    NoTable,
    EmptyTable,
}

impl Serialize for TableData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TableData::Table(rows) => rows.serialize(serializer),
            TableData::NoTable => serializer.serialize_str(NO_TABLE_SENTINEL),
            TableData::EmptyTable => serializer.serialize_str(EMPTY_TABLE_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for TableData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => {
                let rows = items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(row) => Ok(row),
                        other => Err(<D::Error as de::Error>::custom(format!(
                            "expected a table row object, found {}",
                            other
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TableData::Table(rows))
            }
            Value::String(s) if s == EMPTY_TABLE_SENTINEL => Ok(TableData::EmptyTable),
            // Anything else that isn't a list of rows carries no data
            _ => Ok(TableData::NoTable),
        }
    }
}

/// Everything scraped from a single page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDump {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub header: String,
    pub url: String,
    pub table: TableData,
}

/// Consolidated capital-city data for one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Capital")]
    pub capital: String,
    #[serde(rename = "Population")]
    pub population: Option<String>,
    #[serde(rename = "Area")]
    pub area: Option<String>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<String>,
    /// Source pages that contributed at least one field, in first-contribution order
    #[serde(rename = "URLs")]
    pub urls: Vec<String>,
}
