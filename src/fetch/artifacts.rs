//! Intermediate artifacts: each scrape phase writes its rows to a JSON
//! file so the load phases can be re-run without re-fetching.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

pub const CODES_ARTIFACT: &str = "country_code_data.json";
pub const POPULATION_ARTIFACT: &str = "country_population_data.json";
pub const AREA_ARTIFACT: &str = "country_area_data.json";

pub struct ArtifactStore {
    data_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir).context("Failed to create artifact directory")?;
        Ok(Self { data_dir })
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    pub fn save<T: Serialize>(&self, name: &str, records: &[T]) -> Result<()> {
        let path = self.path(name);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create artifact: {:?}", path))?;
        serde_json::to_writer(BufWriter::new(file), records)
            .with_context(|| format!("Failed to write artifact: {:?}", path))
    }

    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.path(name);
        let file = File::open(&path)
            .with_context(|| format!("Failed to open artifact: {:?} (run fetch first)", path))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse artifact: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::CodeEntry;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf()).unwrap();

        let records = vec![CodeEntry {
            country_name: "Bahamas".to_string(),
            iso3: "BHS".to_string(),
        }];
        store.save(CODES_ARTIFACT, &records).unwrap();

        let loaded: Vec<CodeEntry> = store.load(CODES_ARTIFACT).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].iso3, "BHS");
    }

    #[test]
    fn test_load_missing_artifact_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf()).unwrap();
        let result: Result<Vec<CodeEntry>> = store.load(AREA_ARTIFACT);
        assert!(result.is_err());
    }
}
