//! One-shot output of the whole cache for `--once`.

use std::io::Write;

use serde::Serialize;

use super::frame::{StyledLine, scoreboard_lines, table_lines};
use super::text::wrap_text;
use crate::error::AppError;
use crate::sheets::cache::CacheSnapshot;
use crate::sheets::models::{GeneralData, Madrasa, ProgramStatus};
use crate::slideshow::slides::{resolve_flash_text, resolve_ticker_items};

/// Printout width in columns
pub const PRINT_WIDTH: usize = 80;

/// JSON document for consumers such as the mobile site.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument<'a> {
    #[serde(flatten)]
    pub snapshot: &'a CacheSnapshot,
    pub madrasas: Vec<Madrasa>,
    pub flash_news: String,
    pub scroll_news: Vec<String>,
    pub program_status: ProgramStatus,
}

impl<'a> SnapshotDocument<'a> {
    pub fn new(snapshot: &'a CacheSnapshot, flash_fallback: &str) -> Self {
        let general = snapshot.general.as_deref();
        Self {
            snapshot,
            madrasas: snapshot.madrasas(),
            flash_news: resolve_flash_text(general, flash_fallback),
            scroll_news: resolve_ticker_items(general),
            program_status: general.map(|g: &GeneralData| g.program_status).unwrap_or_default(),
        }
    }
}

pub fn write_json<W: Write>(out: &mut W, snapshot: &CacheSnapshot, flash_fallback: &str) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, &SnapshotDocument::new(snapshot, flash_fallback))?;
    writeln!(out)?;
    Ok(())
}

fn write_lines<W: Write>(out: &mut W, lines: &[StyledLine]) -> Result<(), AppError> {
    for line in lines {
        writeln!(out, "{}", line.text.trim_end())?;
    }
    Ok(())
}

fn write_section<W: Write>(out: &mut W, title: &str) -> Result<(), AppError> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    Ok(())
}

/// Plain-text rendering of every loaded dataset.
pub fn write_plain<W: Write>(out: &mut W, snapshot: &CacheSnapshot, flash_fallback: &str) -> Result<(), AppError> {
    let general = snapshot.general.as_deref();

    write_section(out, "FLASH NEWS")?;
    let flash = resolve_flash_text(general, flash_fallback);
    for line in wrap_text(flash.trim(), PRINT_WIDTH) {
        writeln!(out, "{line}")?;
    }

    write_section(out, "OVERALL CHAMPIONSHIP")?;
    write_lines(out, &scoreboard_lines(&snapshot.madrasas(), PRINT_WIDTH))?;

    for loaded in &snapshot.categories {
        write_section(out, &loaded.table.title.to_uppercase())?;
        write_lines(out, &table_lines(&loaded.table, PRINT_WIDTH))?;
    }

    write_section(out, "NEWS")?;
    for item in resolve_ticker_items(general) {
        writeln!(out, "- {item}")?;
    }

    if !snapshot.failing.is_empty() {
        let names: Vec<String> = snapshot.failing.iter().map(|d| d.to_string()).collect();
        writeln!(out)?;
        writeln!(out, "Unavailable: {}", names.join(", "))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::cache::CategoryTable;
    use crate::sheets::models::{Category, Dataset, PivotRow, PivotTableData};
    use std::sync::Arc;

    fn snapshot() -> CacheSnapshot {
        CacheSnapshot {
            categories: vec![CategoryTable {
                category: Category::SubJuniors,
                table: Arc::new(PivotTableData {
                    title: "Sub Juniors".to_string(),
                    headers: vec!["Speech".to_string()],
                    rows: vec![PivotRow {
                        category: "Karad".to_string(),
                        values: vec![9.0],
                        total: 9.0,
                    }],
                }),
            }],
            scoreboard: Some(Arc::new(PivotTableData {
                title: "Scoreboard".to_string(),
                headers: vec![],
                rows: vec![PivotRow {
                    category: "Karad".to_string(),
                    values: vec![],
                    total: 42.0,
                }],
            })),
            general: Some(Arc::new(GeneralData {
                flash_news: "Stage 2 closed".to_string(),
                program_status: ProgramStatus::Live,
                ..GeneralData::default()
            })),
            failing: vec![Dataset::Category(Category::Kids)],
            loading: vec![],
        }
    }

    #[test]
    fn test_plain_printout() {
        let mut out = Vec::new();
        write_plain(&mut out, &snapshot(), "fallback").unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Stage 2 closed"));
        assert!(text.contains("1.  KARAD"));
        assert!(text.contains("SUB JUNIORS"));
        assert!(text.contains("Speech"));
        assert!(text.contains("Unavailable: kids"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_json_document() {
        let mut out = Vec::new();
        write_json(&mut out, &snapshot(), "fallback").unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["madrasas"][0]["id"], "m1");
        assert_eq!(value["madrasas"][0]["name"], "KARAD");
        assert_eq!(value["flashNews"], "Stage 2 closed");
        assert_eq!(value["programStatus"], "Live");
        assert_eq!(value["categories"][0]["category"], "subJuniors");
        assert_eq!(value["categories"][0]["table"]["rows"][0]["total"], 9.0);
        assert!(value["scrollNews"].as_array().unwrap().len() > 1);
        assert!(value.get("failing").is_none());
    }
}
