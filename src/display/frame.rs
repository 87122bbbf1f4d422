//! Full-screen rendering of a single slide.
//!
//! Slide bodies are built as [`StyledLine`]s so the same layout serves the
//! big screen (positioned ANSI output) and the `--once` printout (plain text).
//! A frame is assembled into one string buffer and written in a single
//! operation to avoid flicker.

use std::io::{Stdout, Write};

use chrono::{DateTime, Local};
use crossterm::{execute, style::Color, style::Print};

use super::colors::*;
use super::text::{center, display_width, format_score, pad_left, pad_right, truncate_to_width, wrap_text};
use super::ticker::Ticker;
use crate::constants::FESTIVAL_TITLE;
use crate::error::AppError;
use crate::sheets::cache::CacheSnapshot;
use crate::sheets::models::{GeneralData, Madrasa, PivotTableData, ProgramStatus};
use crate::slideshow::slides::SlideDescriptor;

const MARGIN: usize = 1;
const TITLE_WIDTH: usize = 20;
const RANK_WIDTH: usize = 4;
const TOTAL_WIDTH: usize = 7;
const MIN_NAME_WIDTH: usize = 10;
const MAX_NAME_WIDTH: usize = 24;
const MIN_COLUMN_WIDTH: usize = 4;
const MAX_COLUMN_WIDTH: usize = 10;
const MAX_HEADER_LINES: usize = 4;

/// One line of slide body text in a single color.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    pub text: String,
    pub fg: Color,
}

impl StyledLine {
    pub fn new(text: impl Into<String>, fg: Color) -> Self {
        Self {
            text: text.into(),
            fg,
        }
    }

    pub fn blank() -> Self {
        Self::new("", text_fg())
    }
}

/// Everything besides the slide itself that goes into a frame.
pub struct FrameContext<'a> {
    pub snapshot: &'a CacheSnapshot,
    pub flash_text: &'a str,
    /// 0-based index of the slide in the rotation
    pub position: usize,
    pub slide_count: usize,
    pub table_count: usize,
    pub ticker: &'a Ticker,
    pub now: DateTime<Local>,
}

pub fn intro_lines(general: Option<&GeneralData>, now: DateTime<Local>, width: usize) -> Vec<StyledLine> {
    let status = general.map(|g| g.program_status).unwrap_or_default();
    vec![
        StyledLine::blank(),
        StyledLine::blank(),
        StyledLine::new(center(FESTIVAL_TITLE, width), leader_fg()),
        StyledLine::blank(),
        StyledLine::new(center("LIVE RESULTS", width), subheader_fg()),
        StyledLine::blank(),
        StyledLine::new(center(&format!("Program status: {status}"), width), status_color(status)),
        StyledLine::new(center(&now.format("%A %d %B %Y").to_string(), width), text_fg()),
    ]
}

pub fn flash_lines(flash_text: &str, width: usize) -> Vec<StyledLine> {
    let mut lines = vec![
        StyledLine::blank(),
        StyledLine::new(center("*** FLASH NEWS ***", width), flash_fg()),
        StyledLine::blank(),
    ];
    let text_width = width.saturating_sub(8).max(10);
    lines.extend(
        wrap_text(flash_text.trim(), text_width)
            .into_iter()
            .map(|line| StyledLine::new(center(&line, width), leader_fg())),
    );
    lines
}

pub fn scoreboard_lines(madrasas: &[Madrasa], width: usize) -> Vec<StyledLine> {
    if madrasas.is_empty() {
        return vec![
            StyledLine::blank(),
            StyledLine::new(center("Scores will appear here shortly", width), text_fg()),
        ];
    }

    let name_width = width.saturating_sub(RANK_WIDTH + TOTAL_WIDTH);
    madrasas
        .iter()
        .enumerate()
        .map(|(index, madrasa)| {
            let rank = format!("{}.", index + 1);
            let text = format!(
                "{}{}{}",
                pad_right(&rank, RANK_WIDTH),
                pad_right(&madrasa.name, name_width),
                pad_left(&format_score(madrasa.score), TOTAL_WIDTH)
            );
            let fg = if index == 0 { leader_fg() } else { text_fg() };
            StyledLine::new(text, fg)
        })
        .collect()
}

/// Column widths for one table on a screen `width` columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub name_width: usize,
    pub column_width: usize,
    pub visible_columns: usize,
}

impl TableLayout {
    pub fn new(table: &PivotTableData, width: usize) -> Self {
        let longest_name = table
            .rows
            .iter()
            .map(|row| display_width(&row.category))
            .max()
            .unwrap_or(0);
        let name_width = longest_name.clamp(MIN_NAME_WIDTH, MAX_NAME_WIDTH);
        let remaining = width.saturating_sub(RANK_WIDTH + name_width + TOTAL_WIDTH);

        let columns = table.headers.len();
        if columns == 0 {
            return Self {
                name_width,
                column_width: 0,
                visible_columns: 0,
            };
        }

        let column_width = (remaining / columns).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        Self {
            name_width,
            column_width,
            visible_columns: columns.min(remaining / column_width),
        }
    }
}

/// Splits every visible header into lines of at most `width - 1` columns,
/// honouring embedded newlines, and bottom-aligns them.
fn header_rows(headers: &[String], width: usize) -> Vec<Vec<String>> {
    let wrapped: Vec<Vec<String>> = headers
        .iter()
        .map(|header| {
            let mut lines: Vec<String> = header
                .split('\n')
                .flat_map(|line| wrap_text(line.trim(), width.saturating_sub(1)))
                .filter(|line| !line.is_empty())
                .collect();
            lines.truncate(MAX_HEADER_LINES);
            lines
        })
        .collect();

    let height = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
    (0..height)
        .map(|row| {
            wrapped
                .iter()
                .map(|lines| {
                    let offset = height - lines.len();
                    if row >= offset {
                        lines[row - offset].clone()
                    } else {
                        String::new()
                    }
                })
                .collect()
        })
        .collect()
}

pub fn table_lines(table: &PivotTableData, width: usize) -> Vec<StyledLine> {
    let layout = TableLayout::new(table, width);
    let headers = &table.headers[..layout.visible_columns];
    let header_rows = header_rows(headers, layout.column_width);
    let last_header_row = header_rows.len().saturating_sub(1);

    let mut lines: Vec<StyledLine> = header_rows
        .iter()
        .enumerate()
        .map(|(index, cells)| {
            let is_last = index == last_header_row;
            let mut text = " ".repeat(RANK_WIDTH);
            text.push_str(&pad_right(if is_last { "Madrasa" } else { "" }, layout.name_width));
            for cell in cells {
                text.push_str(&center(cell, layout.column_width));
            }
            text.push_str(&pad_left(if is_last { "Total" } else { "" }, TOTAL_WIDTH));
            StyledLine::new(text, subheader_fg())
        })
        .collect();

    if table.rows.is_empty() {
        lines.push(StyledLine::new("No results published yet", text_fg()));
        return lines;
    }

    for (index, row) in table.rows.iter().enumerate() {
        let mut text = pad_right(&format!("{}.", index + 1), RANK_WIDTH);
        text.push_str(&pad_right(&row.category, layout.name_width));
        for value in row.values.iter().take(layout.visible_columns) {
            text.push_str(&pad_left(&format_score(*value), layout.column_width));
        }
        text.push_str(&pad_left(&format_score(row.total), TOTAL_WIDTH));
        let fg = if index == 0 { leader_fg() } else { text_fg() };
        lines.push(StyledLine::new(text, fg));
    }

    let hidden = table.headers.len() - layout.visible_columns;
    if hidden > 0 {
        lines.push(StyledLine::new(
            format!("+{hidden} more items not shown"),
            subheader_fg(),
        ));
    }

    lines
}

/// Second header line: what the slide is about, and its page position.
pub fn slide_heading(slide: &SlideDescriptor, table_count: usize) -> (String, String) {
    match slide {
        SlideDescriptor::Intro => ("WELCOME".to_string(), String::new()),
        SlideDescriptor::Flash => ("ANNOUNCEMENT".to_string(), String::new()),
        SlideDescriptor::Scoreboard => ("OVERALL CHAMPIONSHIP".to_string(), String::new()),
        SlideDescriptor::Table {
            data, page_index, ..
        } => (
            data.title.to_uppercase(),
            format!("Page {page_index} of {table_count}"),
        ),
    }
}

pub fn slide_body(slide: &SlideDescriptor, ctx: &FrameContext<'_>, width: usize) -> Vec<StyledLine> {
    match slide {
        SlideDescriptor::Intro => intro_lines(ctx.snapshot.general.as_deref(), ctx.now, width),
        SlideDescriptor::Flash => flash_lines(ctx.flash_text, width),
        SlideDescriptor::Scoreboard => scoreboard_lines(&ctx.snapshot.madrasas(), width),
        SlideDescriptor::Table { data, .. } => table_lines(data, width),
    }
}

/// Footer text: slide position plus a data health marker.
pub fn footer_text(ctx: &FrameContext<'_>) -> (String, bool) {
    let position = format!("Slide {}/{}", ctx.position + 1, ctx.slide_count);
    if !ctx.snapshot.failing.is_empty() {
        let names: Vec<String> = ctx.snapshot.failing.iter().map(|d| d.to_string()).collect();
        return (format!("{position}  ! offline: {}", names.join(", ")), true);
    }
    if !ctx.snapshot.loading.is_empty() {
        return (format!("{position}  loading..."), false);
    }
    (format!("{position}  {}", ctx.now.format("%H:%M")), false)
}

fn status_color(status: ProgramStatus) -> Color {
    match status {
        ProgramStatus::Live => flash_fg(),
        ProgramStatus::Upcoming => leader_fg(),
        ProgramStatus::Completed => subheader_fg(),
    }
}

/// Builds the whole screen for `slide` as one ANSI buffer.
pub fn render_frame(slide: &SlideDescriptor, ctx: &FrameContext<'_>, width: usize, height: usize) -> String {
    let mut buffer = String::with_capacity(width * height * 2);
    buffer.push_str("\x1b[H\x1b[2J");

    let status = ctx
        .snapshot
        .general
        .as_deref()
        .map(|g| g.program_status)
        .unwrap_or_default();
    let header_right = format!("{}  {}", status.to_string().to_uppercase(), ctx.now.format("%H:%M"));
    buffer.push_str(&format!(
        "\x1b[1;1H\x1b[48;5;{}m\x1b[38;5;{}m{}\x1b[48;5;{}m\x1b[38;5;231m{}\x1b[0m",
        ansi_code(title_bg(), 46),
        ansi_code(title_fg(), 21),
        pad_right(&format!(" {FESTIVAL_TITLE}"), TITLE_WIDTH),
        ansi_code(header_bg(), 21),
        pad_left(&format!("{header_right} "), width.saturating_sub(TITLE_WIDTH)),
    ));

    let (heading, page) = slide_heading(slide, ctx.table_count);
    let page_width = display_width(&page);
    buffer.push_str(&format!(
        "\x1b[2;1H\x1b[38;5;{}m{}{}\x1b[0m",
        ansi_code(subheader_fg(), 46),
        pad_right(&format!(" {heading}"), width.saturating_sub(page_width + MARGIN)),
        page,
    ));

    let content_width = width.saturating_sub(MARGIN * 2);
    let body_rows = height.saturating_sub(5);
    for (offset, line) in slide_body(slide, ctx, content_width)
        .into_iter()
        .take(body_rows)
        .enumerate()
    {
        buffer.push_str(&format!(
            "\x1b[{};{}H\x1b[38;5;{}m{}\x1b[0m",
            offset + 4,
            MARGIN + 1,
            ansi_code(line.fg, 231),
            truncate_to_width(&line.text, content_width),
        ));
    }

    buffer.push_str(&render_ticker_line(ctx.ticker, width, height));

    let (footer, warning) = footer_text(ctx);
    let footer_fg = if warning { ansi_code(warning_fg(), 208) } else { 231 };
    buffer.push_str(&format!(
        "\x1b[{};1H\x1b[48;5;{}m\x1b[38;5;{}m{}\x1b[38;5;231m{}\x1b[0m",
        height.max(1),
        ansi_code(header_bg(), 21),
        footer_fg,
        pad_right(&format!(" {footer}"), width.saturating_sub(10)),
        pad_left("q=Quit ", 10.min(width)),
    ));

    buffer
}

/// Just the ticker row, for marquee steps between full frames.
pub fn render_ticker_line(ticker: &Ticker, width: usize, height: usize) -> String {
    if height < 2 {
        return String::new();
    }
    format!(
        "\x1b[{};1H\x1b[48;5;{}m\x1b[38;5;{}m{}\x1b[0m",
        height - 1,
        ansi_code(ticker_bg(), 226),
        ansi_code(ticker_fg(), 16),
        ticker.window(width),
    )
}

/// Writes a prepared frame in one operation.
pub fn present(stdout: &mut Stdout, frame: &str) -> Result<(), AppError> {
    execute!(stdout, crossterm::cursor::Hide, Print(frame))?;
    stdout.flush()?;
    Ok(())
}
