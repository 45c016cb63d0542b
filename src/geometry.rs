//! Sovereignty classification from the Natural Earth admin-0 countries
//! GeoJSON. Each feature carries the ISO3 id (`ADM0_A3`) and a free-text
//! `TYPE` description; classification is an exact match against the known
//! labels, everything else maps to `other`. Updates key on the id, so this
//! path does not depend on name reconciliation.

use anyhow::{Context, Result};
use geojson::{FeatureCollection, GeoJson};
use std::fs;
use std::path::Path;

use crate::scrape::Scraped;
use crate::store::CountryType;

#[derive(Debug, Clone)]
pub struct SovereigntyEntry {
    pub iso3: String,
    pub country_type: CountryType,
}

pub fn classify(type_desc: &str) -> CountryType {
    match type_desc {
        "Sovereign country" => CountryType::Sovereign,
        "Country" => CountryType::Autonomous,
        "Dependency" => CountryType::DependentTerritory,
        _ => CountryType::Other,
    }
}

/// Read the feature collection and derive (id, type) pairs. Features
/// missing either property are skipped and counted.
pub fn extract_sovereignty(geojson_path: &Path) -> Result<Scraped<SovereigntyEntry>> {
    let raw = fs::read_to_string(geojson_path)
        .with_context(|| format!("Failed to read {:?}", geojson_path))?;
    let collection = parse_feature_collection(&raw)?;

    let mut scraped = Scraped::default();

    for feature in &collection.features {
        let properties = match &feature.properties {
            Some(props) => props,
            None => {
                scraped.skipped += 1;
                continue;
            }
        };

        let iso3 = properties.get("ADM0_A3").and_then(|v| v.as_str());
        let type_desc = properties.get("TYPE").and_then(|v| v.as_str());

        match (iso3, type_desc) {
            (Some(iso3), Some(type_desc)) => scraped.entries.push(SovereigntyEntry {
                iso3: iso3.to_string(),
                country_type: classify(type_desc),
            }),
            _ => scraped.skipped += 1,
        }
    }

    Ok(scraped)
}

pub fn parse_feature_collection(raw: &str) -> Result<FeatureCollection> {
    match raw.parse::<GeoJson>().context("Failed to parse GeoJSON")? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        _ => anyhow::bail!("Expected a GeoJSON FeatureCollection"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_labels() {
        assert_eq!(classify("Sovereign country"), CountryType::Sovereign);
        assert_eq!(classify("Country"), CountryType::Autonomous);
        assert_eq!(classify("Dependency"), CountryType::DependentTerritory);
        assert_eq!(classify("Disputed"), CountryType::Other);
        assert_eq!(classify("Indeterminate"), CountryType::Other);
    }

    #[test]
    fn test_extract_sovereignty() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"ADM0_A3": "FRA", "TYPE": "Sovereign country"},
                    "geometry": {"type": "Point", "coordinates": [2.0, 47.0]}
                },
                {
                    "type": "Feature",
                    "properties": {"ADM0_A3": "GRL", "TYPE": "Country"},
                    "geometry": {"type": "Point", "coordinates": [-42.0, 72.0]}
                },
                {
                    "type": "Feature",
                    "properties": {"TYPE": "Sovereign country"},
                    "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
                }
            ]
        }"#;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.json");
        fs::write(&path, geojson).unwrap();

        let scraped = extract_sovereignty(&path).unwrap();
        assert_eq!(scraped.entries.len(), 2);
        assert_eq!(scraped.entries[0].iso3, "FRA");
        assert_eq!(scraped.entries[0].country_type, CountryType::Sovereign);
        assert_eq!(scraped.entries[1].country_type, CountryType::Autonomous);
        assert_eq!(scraped.skipped, 1);
    }
}
