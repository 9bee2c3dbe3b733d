use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

use crate::fetch::{MarkupSource, PageClient};
use crate::store::save_json;
use crate::types::{RawRow, SourceDump, TableData};
use crate::SOURCE_URLS;

/// Data table style used on Wikipedia list pages
const TABLE_SELECTOR: &str = "table.wikitable";
const NOT_AVAILABLE: &str = "N/A";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {:?}: {:?}", css, e))
}

/// Trimmed text of all text nodes under a cell
fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn first_text(document: &Html, css: &str) -> Result<String> {
    Ok(document
        .select(&selector(css)?)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string()))
}

/// Pair each row's cells with the header labels. Later duplicates of a label
/// overwrite the value but keep the label's first position.
fn rows_to_records(headers: &[String], rows: Vec<Vec<Option<String>>>) -> Vec<RawRow> {
    rows.into_iter()
        .map(|cells| {
            let mut record = RawRow::new();
            for (label, cell) in headers.iter().zip(cells) {
                record.insert(label.clone(), cell.map_or(Value::Null, Value::String));
            }
            record
        })
        .collect()
}

/// Extract the first `wikitable` on the page
pub fn extract_table(document: &Html) -> Result<TableData> {
    let Some(table) = document.select(&selector(TABLE_SELECTOR)?).next() else {
        return Ok(TableData::NoTable);
    };

    let th = selector("th")?;
    let tr = selector("tr")?;
    let td = selector("td")?;

    let headers: Vec<String> = table.select(&th).map(cell_text).collect();

    let mut rows = Vec::new();
    for row in table.select(&tr) {
        let mut cells: Vec<Option<String>> = row.select(&td).map(|c| Some(cell_text(c))).collect();
        // Header-only rows have no data cells
        if cells.is_empty() {
            continue;
        }
        // Pad short rows with nulls, cut long rows down to the header count
        cells.resize(headers.len(), None);
        rows.push(cells);
    }

    if headers.is_empty() || rows.is_empty() {
        return Ok(TableData::EmptyTable);
    }
    Ok(TableData::Table(rows_to_records(&headers, rows)))
}

/// Build the dump for one fetched page
pub fn extract_page(html: &str, url: &str) -> Result<SourceDump> {
    let document = Html::parse_document(html);
    Ok(SourceDump {
        title: first_text(&document, "title")?,
        header: first_text(&document, "h1")?,
        url: url.to_string(),
        table: extract_table(&document)?,
    })
}

/// Fetch and extract each page in order. Pages that fail to fetch are logged and left out.
pub fn scrape_sources<S: MarkupSource>(source: &S, urls: &[&str]) -> Result<Vec<SourceDump>> {
    let mut dataset = Vec::new();
    for url in urls {
        info!("Processing: {}", url);
        let html = match source.fetch_markup(url) {
            Ok(html) => html,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };
        dataset.push(extract_page(&html, url)?);
    }
    Ok(dataset)
}

pub fn run_scrape(output: &Path) -> Result<()> {
    let client = PageClient::new()?;
    let dataset = scrape_sources(&client, SOURCE_URLS)?;
    save_json(output, &dataset)?;
    info!(
        "Scraped {} of {} sources into '{}'",
        dataset.len(),
        SOURCE_URLS.len(),
        output.display()
    );
    Ok(())
}
