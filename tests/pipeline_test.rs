//! Integration tests that run the load phases end to end against a
//! file-backed database, starting from scraped HTML fixtures.
//!
//! These tests:
//! 1. Scrape small HTML fixtures into intermediate artifacts
//! 2. Run the load phases in pipeline order against a temp database
//! 3. Query rows back and compare field values

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use countries_to_sqlite::fetch::{
    ArtifactStore, AREA_ARTIFACT, CODES_ARTIFACT, POPULATION_ARTIFACT,
};
use countries_to_sqlite::pipeline::{load_area, load_codes, load_population, load_sovereignty};
use countries_to_sqlite::scrape::{parse_area_page, parse_code_page, parse_population_page};
use countries_to_sqlite::store::{CountryStore, CountryType};

// =============================================================================
// Fixtures
// =============================================================================

const CODES_PAGE: &str = r#"
    <h3><span class="mw-headline"><a href="/wiki/France">France</a></span></h3>
    <table>
        <tr>
            <td><a href="/wiki/ISO_3166-1_alpha-2">ISO 3166-1 alpha-2</a> <span>FR</span></td>
            <td><a href="/wiki/ISO_3166-1_alpha-3">ISO 3166-1 alpha-3</a> <span>FRA</span></td>
        </tr>
    </table>
    <h3><span class="mw-headline"><a href="/wiki/The_Bahamas">Bahamas</a></span></h3>
    <table>
        <tr><td><a href="/wiki/ISO_3166-1_alpha-3">ISO 3166-1 alpha-3</a> <span>BHS</span></td></tr>
    </table>
    <h3><span class="mw-headline"><a href="/wiki/Notes">Notes</a></span></h3>
    <p>A section without a code table.</p>
"#;

const POPULATION_PAGE: &str = r#"
    <table class="wikitable sortable">
        <tr><th>Country</th><th>Population</th><th>Date</th></tr>
        <tr>
            <td><a href="/wiki/France">France</a></td>
            <td>68,042,591<sup>[1]</sup></td>
            <td>2023</td>
        </tr>
        <tr>
            <td><a href="/wiki/Bahamas">Bahamas</a></td>
            <td>393,000</td>
            <td>2020</td>
        </tr>
        <tr>
            <td><a href="/wiki/Elbonia">Elbonia</a></td>
            <td>12,000</td>
            <td>2020</td>
        </tr>
    </table>
"#;

const AREA_PAGE: &str = r#"
    <table class="wikitable sortable">
        <tr><th>Rank</th><th>Country</th><th>Area</th></tr>
        <tr>
            <td>1</td>
            <td><a href="/wiki/France">France</a></td>
            <td>643,801 (248,573)</td>
        </tr>
        <tr>
            <td>2</td>
            <td><a href="/wiki/The_Bahamas">The Bahamas</a></td>
            <td>13,943</td>
        </tr>
    </table>
"#;

const GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"ADM0_A3": "FRA", "TYPE": "Sovereign country"},
            "geometry": {"type": "Point", "coordinates": [2.0, 47.0]}
        },
        {
            "type": "Feature",
            "properties": {"ADM0_A3": "BHS", "TYPE": "Some new label"},
            "geometry": {"type": "Point", "coordinates": [-77.0, 24.0]}
        }
    ]
}"#;

// =============================================================================
// Setup
// =============================================================================

struct TestRun {
    _dir: TempDir,
    artifacts: ArtifactStore,
    store: CountryStore,
    geojson_path: PathBuf,
}

fn scrape_and_load() -> TestRun {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let artifacts = ArtifactStore::new(dir.path().join("data")).unwrap();
    let codes = parse_code_page(CODES_PAGE);
    artifacts.save(CODES_ARTIFACT, &codes.entries).unwrap();
    let population = parse_population_page(POPULATION_PAGE).unwrap();
    artifacts
        .save(POPULATION_ARTIFACT, &population.entries)
        .unwrap();
    let area = parse_area_page(AREA_PAGE).unwrap();
    artifacts.save(AREA_ARTIFACT, &area.entries).unwrap();

    let geojson_path = dir.path().join("countries.json");
    fs::write(&geojson_path, GEOJSON).unwrap();

    let db_path = dir.path().join("countries.db");
    let store = CountryStore::create(&db_path).unwrap();
    store.create_schema().unwrap();

    load_codes(&store, &artifacts).unwrap();
    load_population(&store, &artifacts).unwrap();
    load_area(&store, &artifacts).unwrap();
    load_sovereignty(&store, &geojson_path).unwrap();

    TestRun {
        _dir: dir,
        artifacts,
        store,
        geojson_path,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_full_load_produces_enriched_rows() {
    let run = scrape_and_load();

    let france = run.store.fetch_by_id("FRA").unwrap().unwrap();
    assert_eq!(france.country_name, "France");
    assert_eq!(france.country_population, Some(68_042_591));
    assert_eq!(france.country_area, Some(643_801.0));
    assert_eq!(france.country_type, Some(CountryType::Sovereign));

    // area name "The Bahamas" reconciles after prefix stripping, and the
    // unknown sovereignty label maps to `other`
    let bahamas = run.store.fetch_by_id("BHS").unwrap().unwrap();
    assert_eq!(bahamas.country_name, "Bahamas");
    assert_eq!(bahamas.country_population, Some(393_000));
    assert_eq!(bahamas.country_area, Some(13_943.0));
    assert_eq!(bahamas.country_type, Some(CountryType::Other));

    assert_eq!(run.store.row_count().unwrap(), 2);
}

#[test]
fn test_enrichment_with_no_match_is_observable_not_fatal() {
    let run = scrape_and_load();

    // Elbonia exists only in the population source
    let report = load_population(&run.store, &run.artifacts).unwrap();
    assert_eq!(report.updated, 2);
    assert_eq!(report.unmatched, vec!["Elbonia".to_string()]);
}

#[test]
fn test_load_phases_are_rerunnable() {
    let run = scrape_and_load();

    // set-based updates apply cleanly a second time
    load_population(&run.store, &run.artifacts).unwrap();
    load_area(&run.store, &run.artifacts).unwrap();
    load_sovereignty(&run.store, &run.geojson_path).unwrap();

    // re-running the insert phase reports every row as a duplicate
    let report = load_codes(&run.store, &run.artifacts).unwrap();
    assert_eq!(report.inserted, 0);
    assert_eq!(report.duplicates, 2);
    assert_eq!(run.store.row_count().unwrap(), 2);
}

#[test]
fn test_scrape_counts_match_fixture_shape() {
    let codes = parse_code_page(CODES_PAGE);
    assert_eq!(codes.entries.len(), 2);
    assert_eq!(codes.skipped, 1);

    let population = parse_population_page(POPULATION_PAGE).unwrap();
    assert_eq!(population.entries.len(), 3);
    assert_eq!(population.skipped, 0);

    let area = parse_area_page(AREA_PAGE).unwrap();
    assert_eq!(area.entries.len(), 2);
    assert_eq!(area.entries[1].country_name, "Bahamas");
}
