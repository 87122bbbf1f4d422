//! Bottom ticker marquee

use unicode_width::UnicodeWidthChar;

const SEPARATOR: &str = "   ◆   ";

/// Continuously scrolling strip of announcement items.
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    items: Vec<String>,
    strip: Vec<char>,
    offset: usize,
}

impl Ticker {
    pub fn new(items: Vec<String>) -> Self {
        let mut ticker = Self::default();
        ticker.set_items(items);
        ticker
    }

    /// Replaces the items. The scroll position survives when the items are
    /// unchanged.
    pub fn set_items(&mut self, items: Vec<String>) {
        if items == self.items {
            return;
        }
        self.strip = items
            .iter()
            .flat_map(|item| item.chars().chain(SEPARATOR.chars()))
            .collect();
        self.items = items;
        self.offset = if self.strip.is_empty() {
            0
        } else {
            self.offset % self.strip.len()
        };
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Moves the strip one column to the left.
    pub fn step(&mut self) {
        if !self.strip.is_empty() {
            self.offset = (self.offset + 1) % self.strip.len();
        }
    }

    /// The visible `width` columns of the strip, wrapping around its end.
    pub fn window(&self, width: usize) -> String {
        let mut out = String::new();
        if self.strip.is_empty() {
            return " ".repeat(width);
        }

        let mut used = 0;
        for ch in self.strip.iter().cycle().skip(self.offset) {
            let w = ch.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            out.push(*ch);
        }
        out.push_str(&" ".repeat(width - used));
        out
    }
}
