pub mod area;
pub mod codes;
pub mod population;
pub mod table;

pub use area::{parse_area_page, AreaEntry};
pub use codes::{index_links, parse_code_page, CodeEntry};
pub use population::{parse_population_page, PopulationEntry};

/// Result of scraping one source: the well-formed entries plus a count of
/// rows dropped for structural or numeric problems.
#[derive(Debug)]
pub struct Scraped<T> {
    pub entries: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Scraped<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            skipped: 0,
        }
    }
}
