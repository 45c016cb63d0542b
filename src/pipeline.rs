//! Phase orchestration: three fetch phases writing JSON artifacts, then
//! five load phases against the SQLite store. Every phase is independently
//! callable so a partial run can be resumed from its artifacts. There is
//! no rollback; updates are set-based and re-runnable, base inserts need a
//! fresh database file.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::ToSql;
use std::path::Path;

use crate::fetch::{
    ArtifactStore, WikiClient, AREA_ARTIFACT, AREA_URL, BASE_URL, CODES_ARTIFACT,
    COUNTRY_CODES_URL, POPULATION_ARTIFACT, POPULATION_URL,
};
use crate::geometry;
use crate::scrape::{self, AreaEntry, CodeEntry, PopulationEntry};
use crate::store::{CountryStore, Field, InsertOutcome};

/// Per-phase outcome counters for the run summary.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub inserted: u64,
    pub updated: u64,
    pub duplicates: u64,
    pub skipped: u64,
    /// Names whose enrichment update matched zero stored rows.
    pub unmatched: Vec<String>,
}

impl LoadReport {
    fn print(&self, phase: &str) {
        println!(
            "{}: {} inserted, {} updated, {} duplicates, {} skipped, {} unmatched",
            phase,
            self.inserted,
            self.updated,
            self.duplicates,
            self.skipped,
            self.unmatched.len()
        );
        if !self.unmatched.is_empty() {
            println!(
                "Warning: {} name(s) reconciled to no stored row: {}",
                self.unmatched.len(),
                self.unmatched.join(", ")
            );
        }
    }
}

fn progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:24} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message(label.to_string());
    pb
}

// ---------------------------------------------------------------------------
// Fetch phases
// ---------------------------------------------------------------------------

/// Scrape the country code index and every per-letter page into the codes
/// artifact. Returns the number of entries written.
pub fn fetch_codes(client: &WikiClient, artifacts: &ArtifactStore) -> Result<usize> {
    println!("Fetching country codes...");
    let index = client.fetch_page(COUNTRY_CODES_URL)?;
    let links = scrape::index_links(&index);

    let pb = progress_bar(links.len() as u64, "Code pages");
    let mut entries: Vec<CodeEntry> = Vec::new();
    let mut skipped = 0;

    for link in &links {
        let page = client.fetch_page(&format!("{}{}", BASE_URL, link))?;
        let scraped = scrape::parse_code_page(&page);
        entries.extend(scraped.entries);
        skipped += scraped.skipped;
        pb.inc(1);
    }
    pb.finish_with_message(format!("Code pages: {} entries", entries.len()));

    if skipped > 0 {
        println!("Skipped {} malformed code sections", skipped);
    }

    artifacts.save(CODES_ARTIFACT, &entries)?;
    Ok(entries.len())
}

/// Scrape the population list into the population artifact.
pub fn fetch_population(client: &WikiClient, artifacts: &ArtifactStore) -> Result<usize> {
    println!("Fetching population...");
    let page = client.fetch_page(POPULATION_URL)?;
    let scraped = scrape::parse_population_page(&page)?;

    println!(
        "Population: {} entries, {} rows skipped",
        scraped.entries.len(),
        scraped.skipped
    );
    artifacts.save(POPULATION_ARTIFACT, &scraped.entries)?;
    Ok(scraped.entries.len())
}

/// Scrape the area list into the area artifact.
pub fn fetch_area(client: &WikiClient, artifacts: &ArtifactStore) -> Result<usize> {
    println!("Fetching area...");
    let page = client.fetch_page(AREA_URL)?;
    let scraped = scrape::parse_area_page(&page)?;

    println!(
        "Area: {} entries, {} rows skipped",
        scraped.entries.len(),
        scraped.skipped
    );
    artifacts.save(AREA_ARTIFACT, &scraped.entries)?;
    Ok(scraped.entries.len())
}

// ---------------------------------------------------------------------------
// Load phases
// ---------------------------------------------------------------------------

/// Insert base (id, name) rows from the codes artifact. Duplicate ids are
/// counted and reported; the remaining rows still load.
pub fn load_codes(store: &CountryStore, artifacts: &ArtifactStore) -> Result<LoadReport> {
    let entries: Vec<CodeEntry> = artifacts.load(CODES_ARTIFACT)?;

    let pb = progress_bar(entries.len() as u64, "Insert codes");
    let mut report = LoadReport::default();

    for entry in &entries {
        match store.insert_base(&entry.iso3, &entry.country_name)? {
            InsertOutcome::Inserted => report.inserted += 1,
            InsertOutcome::Duplicate => {
                pb.println(format!("Duplicate id {} ({})", entry.iso3, entry.country_name));
                report.duplicates += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message(format!("Insert codes: {} rows", report.inserted));
    report.print("Codes");

    Ok(report)
}

/// Apply one name-keyed enrichment batch, tallying unmatched names.
fn enrich_by_name<T, V, N, F>(
    store: &CountryStore,
    entries: &[T],
    field: Field,
    label: &str,
    name_of: N,
    value_of: F,
) -> Result<LoadReport>
where
    V: ToSql,
    N: Fn(&T) -> &str,
    F: Fn(&T) -> V,
{
    let pb = progress_bar(entries.len() as u64, label);
    let mut report = LoadReport::default();

    for entry in entries {
        let name = name_of(entry);
        let touched = store.update_by_name(name, field, value_of(entry))?;
        if touched == 0 {
            report.unmatched.push(name.to_string());
        } else {
            report.updated += touched as u64;
        }
        pb.inc(1);
    }
    pb.finish_with_message(format!("{}: {} rows updated", label, report.updated));
    report.print(label);

    Ok(report)
}

pub fn load_population(store: &CountryStore, artifacts: &ArtifactStore) -> Result<LoadReport> {
    let entries: Vec<PopulationEntry> = artifacts.load(POPULATION_ARTIFACT)?;
    enrich_by_name(
        store,
        &entries,
        Field::Population,
        "Population",
        |e| &e.country_name,
        |e| e.country_population,
    )
}

pub fn load_area(store: &CountryStore, artifacts: &ArtifactStore) -> Result<LoadReport> {
    let entries: Vec<AreaEntry> = artifacts.load(AREA_ARTIFACT)?;
    enrich_by_name(
        store,
        &entries,
        Field::Area,
        "Area",
        |e| &e.country_name,
        |e| e.country_area,
    )
}

/// Apply sovereignty types from the GeoJSON features, keyed by id.
pub fn load_sovereignty(store: &CountryStore, geojson_path: &Path) -> Result<LoadReport> {
    let scraped = geometry::extract_sovereignty(geojson_path)?;

    let pb = progress_bar(scraped.entries.len() as u64, "Sovereignty");
    let mut report = LoadReport::default();
    report.skipped = scraped.skipped as u64;

    for entry in &scraped.entries {
        let touched = store.update_by_id(&entry.iso3, Field::Type, entry.country_type.as_str())?;
        if touched == 0 {
            report.unmatched.push(entry.iso3.clone());
        } else {
            report.updated += touched as u64;
        }
        pb.inc(1);
    }
    pb.finish_with_message(format!("Sovereignty: {} rows updated", report.updated));
    report.print("Sovereignty");

    Ok(report)
}

/// Fetch every source, then load every phase into a fresh database.
/// Returns the total number of unmatched enrichment names for the final
/// summary.
pub fn run_build(
    client: &WikiClient,
    artifacts: &ArtifactStore,
    store: &CountryStore,
    geojson_path: &Path,
) -> Result<Vec<String>> {
    fetch_codes(client, artifacts)?;
    fetch_population(client, artifacts)?;
    fetch_area(client, artifacts)?;

    println!("\nCreating schema...");
    store.create_schema()?;

    let mut unmatched = Vec::new();
    load_codes(store, artifacts)?;
    unmatched.extend(load_population(store, artifacts)?.unmatched);
    unmatched.extend(load_area(store, artifacts)?.unmatched);
    unmatched.extend(load_sovereignty(store, geojson_path)?.unmatched);

    Ok(unmatched)
}
