//! Rendering of command results as tables, JSON or CSV.

use clap::ValueEnum;
use comfy_table::{presets, Attribute, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON of the full API objects
    Json,
    /// Comma-separated values with a header row
    Csv,
}

/// The tabular view of a result. JSON output ignores it and serializes the
/// underlying value instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Listing {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.headers.len());
        self.rows.push(cells);
    }
}

pub fn render<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    listing: &Listing,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(value)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Table => Ok(format!("{}\n", table(listing))),
        OutputFormat::Csv => Ok(csv(listing)),
    }
}

fn table(listing: &Listing) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(listing.headers.iter().map(|header| {
            Cell::new(header)
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Left)
        }));

    for row in &listing.rows {
        table.add_row(row.iter().map(Cell::new));
    }
    table
}

fn csv(listing: &Listing) -> String {
    let mut out = String::new();
    let header: Vec<String> = listing.headers.iter().map(|h| csv_field(h)).collect();
    out.push_str(&header.join(","));
    out.push_str("\r\n");
    for row in &listing.rows {
        let fields: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }
    out
}

/// Quotes a field per RFC 4180 when it contains a comma, quote or line break.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Formats seconds as `H:MM:SS.mmm`, dropping the hours and milliseconds when
/// they are zero.
pub fn format_seconds(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    let (hours, rest) = (total_ms / 3_600_000, total_ms % 3_600_000);
    let (minutes, rest) = (rest / 60_000, rest % 60_000);
    let (secs, millis) = (rest / 1000, rest % 1000);

    let mut out = if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    };
    if millis > 0 {
        out.push_str(&format!(".{millis:03}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Listing {
        let mut listing = Listing::new(&["Place", "Players", "Time"]);
        listing.row(vec!["1".into(), "cheese".into(), "1:38:03".into()]);
        listing.row(vec!["2".into(), "Couch, \"Coop\"".into(), "1:39:10".into()]);
        listing
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        let out = render(OutputFormat::Csv, &(), &listing()).unwrap();
        assert_eq!(
            out,
            "Place,Players,Time\r\n\
             1,cheese,1:38:03\r\n\
             2,\"Couch, \"\"Coop\"\"\",1:39:10\r\n"
        );
    }

    #[test]
    fn csv_quotes_line_breaks() {
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn json_serializes_the_value_not_the_listing() {
        let value = serde_json::json!({"id": "o1y9wo6q"});
        let out = render(OutputFormat::Json, &value, &listing()).unwrap();
        assert_eq!(out, "{\n  \"id\": \"o1y9wo6q\"\n}\n");
    }

    #[test]
    fn table_contains_headers_and_cells() {
        let out = render(OutputFormat::Table, &(), &listing()).unwrap();
        assert!(out.contains("Players"));
        assert!(out.contains("cheese"));
    }

    #[test]
    fn seconds_formatting() {
        assert_eq!(format_seconds(5883.0), "1:38:03");
        assert_eq!(format_seconds(59.5), "0:59.500");
        assert_eq!(format_seconds(754.23), "12:34.230");
    }
}
