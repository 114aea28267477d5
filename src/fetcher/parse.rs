/// Extract a numeric price from a scraped price string, e.g.
/// `"$1,234.56"` -> `1234.56` or `"€999"` -> `999.0`.
///
/// Keeps digits, `.` and `,`, then strips `,` as a thousands separator and
/// parses the rest as a decimal. This is a heuristic, not a currency parser:
/// European comma-decimal formats ("1.234,56") come out wrong and are a
/// known limitation. Anything that does not survive the final parse
/// (currency-only strings, multiple decimal points) yields `None`.
pub fn normalize_price(price_str: &str) -> Option<f64> {
    let filtered: String = price_str
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let filtered = filtered.replace(',', "");
    filtered.parse().ok()
}
