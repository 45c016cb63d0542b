//! Population list: one `wikitable sortable` table, country link in the
//! first cell, population count in the second.

use anyhow::{Context, Result};
use scraper::Html;
use serde::{Deserialize, Serialize};

use super::{table, Scraped};
use crate::normalize::{clean_name, parse_count};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationEntry {
    pub country_name: String,
    pub country_population: i64,
}

pub fn parse_population_page(html: &str) -> Result<Scraped<PopulationEntry>> {
    let doc = Html::parse_document(html);
    let data_table = table::table_by_class(&doc, "wikitable.sortable")
        .context("Population table not found")?;

    let mut scraped = Scraped::default();

    for row in table::rows(data_table) {
        let cells = table::cells(row);
        // Header and spacer rows have fewer cells.
        if cells.len() <= 2 {
            continue;
        }

        let Some(name) = table::first_link_text(cells[0]) else {
            scraped.skipped += 1;
            continue;
        };

        match parse_count(table::leading_text(cells[1])) {
            Ok(population) => scraped.entries.push(PopulationEntry {
                country_name: clean_name(&name),
                country_population: population,
            }),
            Err(_) => scraped.skipped += 1,
        }
    }

    Ok(scraped)
}
