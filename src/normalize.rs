use anyhow::{Context, Result};

/// Clean a scraped display name: drop embedded newlines, trim whitespace.
pub fn clean_name(raw: &str) -> String {
    raw.replace('\n', "").trim().to_string()
}

/// Strip prefix noise used by the area table ("The Gambia", "State of
/// Palestine") so names line up with the other sources.
pub fn strip_name_prefixes(name: &str) -> &str {
    let name = name.strip_prefix("The ").unwrap_or(name);
    name.strip_prefix("State of ").unwrap_or(name)
}

/// Parse an integer cell such as `"1,402,112,000"`.
pub fn parse_count(raw: &str) -> Result<i64> {
    let cleaned = strip_numeric_noise(raw);
    cleaned
        .parse::<i64>()
        .with_context(|| format!("Not a valid integer cell: {:?}", raw))
}

/// Parse a decimal cell such as `"9,596,961 (3,705,407)"`.
pub fn parse_quantity(raw: &str) -> Result<f64> {
    let cleaned = strip_numeric_noise(raw);
    cleaned
        .parse::<f64>()
        .with_context(|| format!("Not a valid numeric cell: {:?}", raw))
}

/// Remove the noise wiki cells wrap around numbers: thousands separators,
/// `<` markers on approximate values, and parenthetical annotations.
fn strip_numeric_noise(raw: &str) -> String {
    let base = raw.split('(').next().unwrap_or("");
    base.replace(',', "").replace('<', "").trim().to_string()
}
