//! The `country` table: one row per ISO3 code, enriched in place by the
//! population, area, and sovereignty phases.

use serde::{Deserialize, Serialize};

pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS country (
    country_id TEXT PRIMARY KEY,
    country_name TEXT NOT NULL,
    country_type TEXT,
    country_population INTEGER,
    country_area REAL
)";

/// Sovereignty classification, stored as a named TEXT tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryType {
    Sovereign,
    Autonomous,
    DependentTerritory,
    Other,
}

impl CountryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountryType::Sovereign => "sovereign",
            CountryType::Autonomous => "autonomous",
            CountryType::DependentTerritory => "dependent_territory",
            CountryType::Other => "other",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "sovereign" => Some(CountryType::Sovereign),
            "autonomous" => Some(CountryType::Autonomous),
            "dependent_territory" => Some(CountryType::DependentTerritory),
            "other" => Some(CountryType::Other),
            _ => None,
        }
    }
}

/// Enrichment target column. Keeps column names out of call sites so an
/// update can never interpolate arbitrary SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Population,
    Area,
    Type,
}

impl Field {
    pub fn column(&self) -> &'static str {
        match self {
            Field::Population => "country_population",
            Field::Area => "country_area",
            Field::Type => "country_type",
        }
    }
}
