//! Merge partial rows from several scraped tables into one record per country

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::normalize::{AliasTable, NormalizedRow};
use crate::store::{load_dataset, save_json};
use crate::types::{CountryRecord, SourceDump, TableData};

/// Records in first-appearance order, indexed by cleaned country name
#[derive(Debug, Default)]
struct Consolidator {
    records: Vec<CountryRecord>,
    index: HashMap<String, usize>,
}

impl Consolidator {
    fn add_row(&mut self, row: NormalizedRow, url: &str) {
        let slot = match self.index.get(&row.country) {
            Some(&slot) => slot,
            None => {
                let slot = self.records.len();
                self.index.insert(row.country.clone(), slot);
                self.records.push(CountryRecord {
                    country: row.country.clone(),
                    capital: row.capital.clone(),
                    population: None,
                    area: None,
                    latitude: None,
                    urls: Vec::new(),
                });
                slot
            }
        };

        // Capital is fixed at first sighting; the optional fields take the
        // latest non-empty value.
        let record = &mut self.records[slot];
        if row.population.is_some() {
            record.population = row.population;
        }
        if row.area.is_some() {
            record.area = row.area;
        }
        if row.latitude.is_some() {
            record.latitude = row.latitude;
        }
        if !record.urls.iter().any(|seen| seen == url) {
            record.urls.push(url.to_string());
        }
    }

    fn finish(self) -> Vec<CountryRecord> {
        self.records
    }
}

/// Consolidate dumps using the known column labels
pub fn consolidate(dumps: &[SourceDump]) -> Vec<CountryRecord> {
    consolidate_with(dumps, &AliasTable::default())
}

/// Consolidate dumps in order, resolving columns through `aliases`
pub fn consolidate_with(dumps: &[SourceDump], aliases: &AliasTable) -> Vec<CountryRecord> {
    let mut consolidator = Consolidator::default();

    for dump in dumps {
        info!("Processing: {}", dump.url);
        let rows = match &dump.table {
            TableData::Table(rows) => rows,
            TableData::NoTable | TableData::EmptyTable => {
                debug!(url = %dump.url, "No table rows, skipping source");
                continue;
            }
        };

        for row in rows {
            if let Some(resolved) = aliases.normalize(row) {
                consolidator.add_row(resolved, &dump.url);
            }
        }
    }

    consolidator.finish()
}

/// Read the scraped dataset, consolidate it and write the result
pub fn run_consolidate(input: &Path, output: &Path) -> Result<()> {
    let dumps = load_dataset(input)?;
    let records = consolidate(&dumps);
    save_json(output, &records)?;
    info!(
        "Consolidation complete! {} countries saved to '{}'",
        records.len(),
        output.display()
    );
    Ok(())
}
