//! Structural helpers for pulling rows out of wiki tables.
//!
//! Two location strategies cover the source pages: walking forward from a
//! section heading to the next table sibling (country code pages), and
//! matching a table directly by CSS class (population and area lists).

use scraper::{ElementRef, Html, Selector};

// Selectors built from compile-time constants; parse cannot fail.
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Find the first table following a heading, scanning the siblings of the
/// heading's parent element.
pub fn table_after_heading<'a>(heading: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let parent = heading.parent()?;
    parent
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}

/// Find the first table carrying the given CSS classes, e.g.
/// `"wikitable.sortable"`.
pub fn table_by_class<'a>(doc: &'a Html, classes: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(&format!("table.{}", classes)).ok()?;
    doc.select(&sel).next()
}

/// All `tr` elements of a table in document order.
pub fn rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    table.select(&selector("tr")).collect()
}

/// All `td` cells of a row.
pub fn cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.select(&selector("td")).collect()
}

/// The first text node of a cell, which skips trailing footnote markup.
pub fn leading_text(cell: ElementRef<'_>) -> &str {
    cell.text().next().unwrap_or("")
}

/// Text of the first link in a cell whose text is non-empty. Wiki rows
/// often lead with an empty flag-icon link before the country link.
pub fn first_link_text(cell: ElementRef<'_>) -> Option<String> {
    cell.select(&selector("a"))
        .map(|a| a.text().collect::<String>())
        .find(|text| !text.trim().is_empty())
}
