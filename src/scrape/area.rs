//! Area list: one `wikitable sortable` table, rank in the first cell,
//! country link in the second, total area in the third.

use anyhow::{Context, Result};
use scraper::Html;
use serde::{Deserialize, Serialize};

use super::{table, Scraped};
use crate::normalize::{clean_name, parse_quantity, strip_name_prefixes};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaEntry {
    pub country_name: String,
    pub country_area: f64,
}

pub fn parse_area_page(html: &str) -> Result<Scraped<AreaEntry>> {
    let doc = Html::parse_document(html);
    let data_table =
        table::table_by_class(&doc, "wikitable.sortable").context("Area table not found")?;

    let mut scraped = Scraped::default();

    for row in table::rows(data_table) {
        let cells = table::cells(row);
        if cells.len() <= 2 {
            continue;
        }

        let Some(name) = table::first_link_text(cells[1]) else {
            scraped.skipped += 1;
            continue;
        };

        match parse_quantity(table::leading_text(cells[2])) {
            Ok(area) => scraped.entries.push(AreaEntry {
                country_name: strip_name_prefixes(&clean_name(&name)).to_string(),
                country_area: area,
            }),
            Err(_) => scraped.skipped += 1,
        }
    }

    Ok(scraped)
}
