use anyhow::{Context, Result};
use reqwest::blocking::Client;

pub const BASE_URL: &str = "https://en.wikipedia.org";
pub const COUNTRY_CODES_URL: &str = "https://en.wikipedia.org/wiki/Country_code";
pub const POPULATION_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_countries_and_dependencies_by_population";
pub const AREA_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_countries_and_dependencies_by_area";

pub struct WikiClient {
    client: Client,
}

impl WikiClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent("countries-to-sqlite")
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch a page body. Any network or HTTP error is fatal; there is no
    /// retry.
    pub fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?
            .error_for_status()
            .with_context(|| format!("Bad status fetching {}", url))?;

        response
            .text()
            .with_context(|| format!("Failed to read response body from {}", url))
    }
}
