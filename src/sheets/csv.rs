//! Lenient CSV tokenizer for published spreadsheet exports.
//!
//! Handles RFC-4180-style quoting: quoted fields may contain commas,
//! newlines and doubled (`""`) quotes. Malformed input never fails; it
//! degrades to best-effort splitting.

/// One tokenized CSV record.
pub type RawRow = Vec<String>;

/// Whether the logical row being accumulated still has an open quoted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowState {
    RowOpen,
    RowClosed,
}

impl RowState {
    /// State after scanning `line`, toggling once per quote character.
    fn after_line(self, line: &str) -> RowState {
        line.chars().filter(|&c| c == '"').fold(self, |state, _| match state {
            RowState::RowOpen => RowState::RowClosed,
            RowState::RowClosed => RowState::RowOpen,
        })
    }
}

/// Splits raw CSV text into rows of trimmed fields.
///
/// Physical lines are joined while a quoted field is still open, so a
/// multi-line cell stays inside its row. Blank rows are dropped. An
/// unterminated quote at the end of input flushes whatever was accumulated.
pub fn parse(raw_text: &str) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut pending = String::new();
    let mut has_pending = false;
    let mut state = RowState::RowClosed;

    for line in raw_text.split('\n') {
        state = state.after_line(line);

        if has_pending {
            pending.push('\n');
        }
        pending.push_str(line);
        has_pending = true;

        if state == RowState::RowClosed {
            flush_row(&mut rows, &pending);
            pending.clear();
            has_pending = false;
        }
    }

    if has_pending {
        flush_row(&mut rows, &pending);
    }

    rows
}

fn flush_row(rows: &mut Vec<RawRow>, record: &str) {
    if !record.trim().is_empty() {
        rows.push(parse_record(record));
    }
}

/// Splits one logical record into fields.
fn parse_record(record: &str) -> RawRow {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_rows() {
        let rows = parse("a,b,c\n1,2,3");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let rows = parse("  a , b ,c  \r\n1,2,3\r\n");
        assert_eq!(rows[0], vec!["a", "b", "c"]);
        assert_eq!(rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_quoted_comma_stays_in_field() {
        let rows = parse(r#"1,"Feroke, Town",42"#);
        assert_eq!(rows, vec![vec!["1", "Feroke, Town", "42"]]);
    }

    #[test]
    fn test_multiline_quoted_field() {
        let text = "S/No.,Name,\"Quran\nRecitation\",Total\n1,Chaliyam,5,5";
        let rows = parse(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["S/No.", "Name", "Quran\nRecitation", "Total"]);
        assert_eq!(rows[1], vec!["1", "Chaliyam", "5", "5"]);
    }

    #[test]
    fn test_escaped_quotes() {
        let rows = parse(r#"key,"He said ""hello"", twice""#);
        assert_eq!(rows, vec![vec!["key", r#"He said "hello", twice"#]]);
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let rows = parse("a,b\n\n   \n,\nc,d\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["", ""], vec!["c", "d"]]);
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let rows = parse("1,,3,");
        assert_eq!(rows, vec![vec!["1", "", "3", ""]]);
    }

    #[test]
    fn test_unterminated_quote_flushes_remaining_text() {
        let rows = parse("a,b\n1,\"never closed\n2,3");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["a", "b"]);
        assert_eq!(rows[1], vec!["1", "never closed\n2,3"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
    }

    #[test]
    fn test_quoted_fields_reconstruct_original_values() {
        let values = [
            "plain",
            "with, comma",
            "multi\nline\ncell",
            "quote \"inside\" here",
            "",
        ];
        let record: Vec<String> = values
            .iter()
            .map(|v| format!("\"{}\"", v.replace('"', "\"\"")))
            .collect();
        let text = format!("{}\n{}", record.join(","), record.join(","));

        let rows = parse(&text);
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row, values.iter().map(|v| v.to_string()).collect::<Vec<_>>());
        }
    }
}
