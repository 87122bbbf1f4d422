//! Turns tokenized sheet rows into typed pivot tables, scoreboards and
//! general metadata.
//!
//! Columns are sliced by position, not matched by header name: the festival
//! workbook has a fixed `[serial, name, ...scores..., total]` layout and
//! [`ColumnWindow`] is the one place that knows about it.

use std::collections::HashMap;

use tracing::debug;

use super::csv::{self, RawRow};
use super::models::{GeneralData, PivotRow, PivotTableData, ProgramStatus};

/// Index of the name column in every data sheet
const NAME_COLUMN: usize = 1;

/// Index of the total column on the scoreboard sheet
const SCOREBOARD_TOTAL_COLUMN: usize = 2;

pub const FLASH_NEWS_KEY: &str = "Flash News";
pub const SCROLL_NEWS_KEY: &str = "Scroll News";
pub const PROGRAM_STATUS_KEY: &str = "Program Status";
pub const AD_IMAGE_KEY: &str = "Ad Image";

/// Positional layout of a pivot sheet: how many leading columns (serial,
/// name) and trailing columns (declared total) surround the score columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWindow {
    pub leading: usize,
    pub trailing: usize,
}

impl Default for ColumnWindow {
    fn default() -> Self {
        Self {
            leading: 2,
            trailing: 1,
        }
    }
}

impl ColumnWindow {
    /// The score columns of `row`; empty when the row is too short.
    pub fn values<'a>(&self, row: &'a [String]) -> &'a [String] {
        let end = row.len().saturating_sub(self.trailing);
        if end > self.leading {
            &row[self.leading..end]
        } else {
            &[]
        }
    }

    /// The declared-total cell, if the row reaches past its leading columns.
    pub fn declared_total<'a>(&self, row: &'a [String]) -> Option<&'a str> {
        if self.trailing > 0 && row.len() > self.leading {
            row.last().map(String::as_str)
        } else {
            None
        }
    }
}

/// Parses the numeric prefix of `text` the way spreadsheet exports are
/// usually read: leading whitespace is skipped, trailing garbage ignored
/// (`"12 pts"` is 12). Returns `None` when no number starts the string.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        let sign = if s.starts_with('-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Numeric coercion for a score cell: unparseable means 0.
fn coerce(text: &str) -> f64 {
    parse_number(text).filter(|v| !v.is_nan()).unwrap_or(0.0)
}

/// Row has a usable name column.
fn has_name(row: &RawRow) -> bool {
    row.get(NAME_COLUMN).is_some_and(|name| !name.trim().is_empty())
}

/// Stable descending sort by total.
fn sort_by_total_desc(rows: &mut [PivotRow]) {
    rows.sort_by(|a, b| b.total.total_cmp(&a.total));
}

/// Builds a category table from raw CSV text.
pub fn format_pivot_table_data(csv_text: &str, title: &str) -> PivotTableData {
    format_pivot_rows(csv::parse(csv_text.trim()), title, ColumnWindow::default())
}

/// Builds a category table from tokenized rows.
///
/// Row 0 is the sheet banner and is dropped; row 1 supplies the headers
/// (through `window`); every further row with a name becomes a [`PivotRow`].
/// A non-empty declared total always wins over the sum of the values.
pub fn format_pivot_rows(rows: Vec<RawRow>, title: &str, window: ColumnWindow) -> PivotTableData {
    let mut rows = rows.into_iter();
    rows.next();

    let headers: Vec<String> = rows
        .next()
        .map(|header_row| window.values(&header_row).to_vec())
        .unwrap_or_default();

    let mut data_rows: Vec<PivotRow> = rows
        .filter(has_name)
        .map(|row| {
            let category = row[NAME_COLUMN].trim().to_string();

            let mut values: Vec<f64> = window.values(&row).iter().map(|v| coerce(v)).collect();
            values.resize(headers.len(), 0.0);

            let total = match window.declared_total(&row) {
                Some(declared) if !declared.is_empty() => coerce(declared),
                _ => values.iter().sum(),
            };

            PivotRow {
                category,
                values,
                total: if total.is_nan() { 0.0 } else { total },
            }
        })
        .filter(|row| !row.category.is_empty())
        .collect();

    sort_by_total_desc(&mut data_rows);

    debug!(
        "Formatted pivot table '{}': {} headers, {} rows",
        title,
        headers.len(),
        data_rows.len()
    );

    PivotTableData {
        title: title.to_string(),
        headers,
        rows: data_rows,
    }
}

/// Builds the overall scoreboard from raw CSV text.
pub fn format_scoreboard_data(csv_text: &str, title: &str) -> PivotTableData {
    format_scoreboard_rows(csv::parse(csv_text.trim()), title)
}

/// Builds the scoreboard from tokenized `[serial, name, total]` rows.
/// Headers and per-row values are always empty.
pub fn format_scoreboard_rows(rows: Vec<RawRow>, title: &str) -> PivotTableData {
    let mut data_rows: Vec<PivotRow> = rows
        .into_iter()
        .skip(1)
        .filter(has_name)
        .map(|row| PivotRow {
            category: row[NAME_COLUMN].trim().to_string(),
            values: Vec::new(),
            total: row
                .get(SCOREBOARD_TOTAL_COLUMN)
                .map(|total| coerce(total))
                .unwrap_or(0.0),
        })
        .collect();

    sort_by_total_desc(&mut data_rows);

    debug!("Formatted scoreboard '{}': {} rows", title, data_rows.len());

    PivotTableData {
        title: title.to_string(),
        headers: Vec::new(),
        rows: data_rows,
    }
}

/// Parses the key-value general sheet.
pub fn parse_general_data(csv_text: &str) -> GeneralData {
    parse_general_rows(csv::parse(csv_text.trim()))
}

/// Builds [`GeneralData`] from tokenized `[key, value]` rows. The last
/// occurrence of a duplicated key wins.
pub fn parse_general_rows(rows: Vec<RawRow>) -> GeneralData {
    let entries: HashMap<String, String> = rows
        .into_iter()
        .skip(1)
        .filter(|row| row.len() >= 2)
        .map(|row| (row[0].trim().to_string(), row[1].trim().to_string()))
        .collect();

    let lookup = |key: &str| entries.get(key).cloned().unwrap_or_default();

    let scroll_news = lookup(SCROLL_NEWS_KEY)
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    GeneralData {
        flash_news: lookup(FLASH_NEWS_KEY),
        scroll_news,
        program_status: ProgramStatus::parse(&lookup(PROGRAM_STATUS_KEY)),
        ad_image_url: lookup(AD_IMAGE_KEY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIDS_CSV: &str = "\
KIDS - SARGAMELA 2025,,,,,
S/No.,Name,\"Quran\nRecitation\",Hifz,Song,TOTAL
\"1\",\"Chaliyam\",\"3\",\"5\",\"0\",\"8\"
2,Kadalundi,2,4,,
3,,10,10,10,30
4,Feroke Town,abc,1,1,20
5,Karad,1,1,1,
";

    #[test]
    fn test_parse_number_prefixes() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("  3.5"), Some(3.5));
        assert_eq!(parse_number("12 pts"), Some(12.0));
        assert_eq!(parse_number("-7"), Some(-7.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("2e"), Some(2.0));
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("."), None);
    }

    #[test]
    fn test_column_window_values() {
        let window = ColumnWindow::default();
        let row: Vec<String> = ["1", "A", "3", "5", "8"].iter().map(|s| s.to_string()).collect();
        assert_eq!(window.values(&row), &row[2..4]);
        assert_eq!(window.declared_total(&row), Some("8"));

        let short: Vec<String> = ["1", "A"].iter().map(|s| s.to_string()).collect();
        assert!(window.values(&short).is_empty());
        assert_eq!(window.declared_total(&short), None);
    }

    #[test]
    fn test_pivot_headers_drop_serial_name_and_total() {
        let table = format_pivot_table_data(KIDS_CSV, "Kids");
        assert_eq!(table.title, "Kids");
        assert_eq!(table.headers, vec!["Quran\nRecitation", "Hifz", "Song"]);
    }

    #[test]
    fn test_pivot_declared_total_row() {
        let table = format_pivot_table_data(KIDS_CSV, "Kids");
        let chaliyam = table.rows.iter().find(|r| r.category == "Chaliyam").unwrap();
        assert_eq!(chaliyam.values, vec![3.0, 5.0, 0.0]);
        assert_eq!(chaliyam.total, 8.0);
    }

    #[test]
    fn test_pivot_missing_total_sums_values() {
        let table = format_pivot_table_data(KIDS_CSV, "Kids");
        let kadalundi = table.rows.iter().find(|r| r.category == "Kadalundi").unwrap();
        assert_eq!(kadalundi.values, vec![2.0, 4.0, 0.0]);
        assert_eq!(kadalundi.total, 6.0);
    }

    #[test]
    fn test_pivot_declared_total_wins_over_sum() {
        let table = format_pivot_table_data(KIDS_CSV, "Kids");
        let feroke = table.rows.iter().find(|r| r.category == "Feroke Town").unwrap();
        assert_eq!(feroke.values, vec![0.0, 1.0, 1.0]);
        assert_eq!(feroke.total, 20.0);
    }

    #[test]
    fn test_pivot_blank_name_rows_are_dropped() {
        let table = format_pivot_table_data(KIDS_CSV, "Kids");
        assert_eq!(table.rows.len(), 4);
        assert!(table.rows.iter().all(|r| !r.category.is_empty()));
        assert!(table.rows.iter().all(|r| r.total != 30.0));
    }

    #[test]
    fn test_pivot_rows_sorted_descending() {
        let table = format_pivot_table_data(KIDS_CSV, "Kids");
        let names: Vec<&str> = table.rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["Feroke Town", "Chaliyam", "Kadalundi", "Karad"]);
        for pair in table.rows.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
    }

    #[test]
    fn test_pivot_values_match_header_count() {
        let csv = "banner\nS/No.,Name,A,B,Total\n1,Short,4\n2,Long,1,2,3,4,10";
        let table = format_pivot_table_data(csv, "Ragged");
        assert!(table.rows.iter().all(|r| r.values.len() == table.headers.len()));
        let long = table.rows.iter().find(|r| r.category == "Long").unwrap();
        assert_eq!(long.values, vec![1.0, 2.0]);
        assert_eq!(long.total, 10.0);
    }

    #[test]
    fn test_pivot_unparseable_total_is_zero() {
        let csv = "banner\nS/No.,Name,A,Total\n1,Chungam,5,n/a";
        let table = format_pivot_table_data(csv, "Kids");
        assert_eq!(table.rows[0].total, 0.0);
    }

    #[test]
    fn test_pivot_ties_keep_input_order() {
        let csv = "banner\nS/No.,Name,A,Total\n1,First,1,5\n2,Second,2,5\n3,Third,3,5";
        let table = format_pivot_table_data(csv, "Ties");
        let names: Vec<&str> = table.rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_pivot_empty_and_header_only_input() {
        let empty = format_pivot_table_data("", "Empty");
        assert!(empty.headers.is_empty());
        assert!(empty.rows.is_empty());

        let header_only = format_pivot_table_data("banner\nS/No.,Name,A,B,Total", "Header");
        assert_eq!(header_only.headers, vec!["A", "B"]);
        assert!(header_only.rows.is_empty());
    }

    #[test]
    fn test_pivot_formatting_is_repeatable() {
        assert_eq!(
            format_pivot_table_data(KIDS_CSV, "Kids"),
            format_pivot_table_data(KIDS_CSV, "Kids")
        );
    }

    #[test]
    fn test_scoreboard_shape() {
        let csv = "S/No.,Name,Total\n\n1,Chaliyam,120\n2,Kunnathpadi,x\n3,,50\n4,Anagadi\n5,Keezhiyil,130.5";
        let table = format_scoreboard_data(csv, "Scoreboard");
        assert!(table.headers.is_empty());
        assert!(table.rows.iter().all(|r| r.values.is_empty()));
        let ranking: Vec<(&str, f64)> = table
            .rows
            .iter()
            .map(|r| (r.category.as_str(), r.total))
            .collect();
        assert_eq!(
            ranking,
            vec![
                ("Keezhiyil", 130.5),
                ("Chaliyam", 120.0),
                ("Kunnathpadi", 0.0),
                ("Anagadi", 0.0),
            ]
        );
    }

    #[test]
    fn test_general_data_keys() {
        let csv = "Key,Value\n\
Flash News, Stage 3 closed \n\
\"Scroll News\",\"First item\n\n  Second item  \nThird\"\n\
Program Status,live\n\
Ad Image,https://example.com/ad.png\n\
Unrelated,ignored";
        let general = parse_general_data(csv);
        assert_eq!(general.flash_news, "Stage 3 closed");
        assert_eq!(general.scroll_news, vec!["First item", "Second item", "Third"]);
        assert_eq!(general.program_status, ProgramStatus::Live);
        assert_eq!(general.ad_image_url, "https://example.com/ad.png");
    }

    #[test]
    fn test_general_data_last_duplicate_wins() {
        let csv = "Key,Value\nFlash News,old\nFlash News,new";
        assert_eq!(parse_general_data(csv).flash_news, "new");
    }

    #[test]
    fn test_general_data_defaults() {
        let general = parse_general_data("Key,Value\nsingle-column-row");
        assert_eq!(general, GeneralData::default());
    }
}
