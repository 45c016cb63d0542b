//! Country code pages: one section heading per country, followed by a
//! table of label/value cells (`<td><a>label</a> ... <span>value</span>`).

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use super::{table, Scraped};
use crate::normalize::clean_name;

/// The cell label carrying the code we key the whole table on.
const ISO3_LABEL: &str = "ISO 3166-1 alpha-3";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeEntry {
    pub country_name: String,
    pub iso3: String,
}

/// Collect the per-letter code page links from the index page
/// (hrefs starting with `/wiki/Country_codes`).
pub fn index_links(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let link_sel = Selector::parse("a").unwrap();

    let mut links: Vec<String> = doc
        .select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.starts_with("/wiki/Country_codes"))
        .map(|href| href.to_string())
        .collect();
    links.dedup();
    links
}

/// Parse one code page into (name, ISO3) entries. Headings without a
/// country link, a following table, or an alpha-3 cell are skipped.
pub fn parse_code_page(html: &str) -> Scraped<CodeEntry> {
    let doc = Html::parse_document(html);
    let heading_sel = Selector::parse("span.mw-headline").unwrap();
    let link_sel = Selector::parse("a").unwrap();
    let cell_sel = Selector::parse("td").unwrap();
    let value_sel = Selector::parse("span").unwrap();

    let mut scraped = Scraped::default();

    for heading in doc.select(&heading_sel) {
        let Some(name_link) = heading.select(&link_sel).next() else {
            scraped.skipped += 1;
            continue;
        };
        let country_name = clean_name(&name_link.text().collect::<String>());

        let Some(code_table) = table::table_after_heading(heading) else {
            scraped.skipped += 1;
            continue;
        };

        // Each cell pairs a linked label with a span value.
        let mut iso3 = None;
        for cell in code_table.select(&cell_sel) {
            let label = match cell.select(&link_sel).next() {
                Some(a) => a.text().collect::<String>(),
                None => continue,
            };
            let value = match cell.select(&value_sel).next() {
                Some(span) => span.text().collect::<String>(),
                None => continue,
            };
            if label == ISO3_LABEL {
                iso3 = Some(value.trim().to_string());
            }
        }

        match iso3 {
            Some(iso3) if !iso3.is_empty() => {
                scraped.entries.push(CodeEntry { country_name, iso3 });
            }
            _ => scraped.skipped += 1,
        }
    }

    scraped
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <h3><span class="mw-headline"><a href="/wiki/Albania">Albania</a></span></h3>
        <table>
            <tr>
                <td><a href="/wiki/ISO_3166-1_alpha-2">ISO 3166-1 alpha-2</a> <span>AL</span></td>
                <td><a href="/wiki/ISO_3166-1_alpha-3">ISO 3166-1 alpha-3</a> <span>ALB</span></td>
            </tr>
        </table>
        <h3><span class="mw-headline"><a href="/wiki/Algeria">Algeria</a></span></h3>
        <table>
            <tr><td><a href="/wiki/ISO_3166-1_alpha-3">ISO 3166-1 alpha-3</a> <span>DZA</span></td></tr>
        </table>
        <h3><span class="mw-headline"><a href="/wiki/Nowhere">Nowhere</a></span></h3>
        <p>No table follows this heading.</p>
    "#;

    #[test]
    fn test_parse_code_page() {
        let scraped = parse_code_page(PAGE);
        assert_eq!(scraped.entries.len(), 2);
        assert_eq!(scraped.entries[0].country_name, "Albania");
        assert_eq!(scraped.entries[0].iso3, "ALB");
        assert_eq!(scraped.entries[1].iso3, "DZA");
        assert_eq!(scraped.skipped, 1);
    }

    #[test]
    fn test_heading_without_alpha3_is_skipped() {
        let page = r#"
            <h3><span class="mw-headline"><a href="/wiki/X">X</a></span></h3>
            <table><tr><td><a href="/y">Some other label</a> <span>42</span></td></tr></table>
        "#;
        let scraped = parse_code_page(page);
        assert!(scraped.entries.is_empty());
        assert_eq!(scraped.skipped, 1);
    }

    #[test]
    fn test_index_links() {
        let html = r#"
            <a href="/wiki/Country_codes:_A">A</a>
            <a href="/wiki/Country_codes:_B">B</a>
            <a href="/wiki/Unrelated">nope</a>
        "#;
        let links = index_links(html);
        assert_eq!(
            links,
            vec!["/wiki/Country_codes:_A", "/wiki/Country_codes:_B"]
        );
    }
}
