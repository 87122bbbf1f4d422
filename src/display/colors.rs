use crossterm::style::Color;

// Big-screen palette
pub fn header_bg() -> Color {
    Color::AnsiValue(21)
} // Bright blue
pub fn title_bg() -> Color {
    Color::AnsiValue(46)
} // Bright green
pub fn title_fg() -> Color {
    Color::AnsiValue(21)
} // Bright blue
pub fn subheader_fg() -> Color {
    Color::AnsiValue(46)
} // Bright green
pub fn text_fg() -> Color {
    Color::AnsiValue(231)
} // Pure white
pub fn score_fg() -> Color {
    Color::AnsiValue(51)
} // Bright cyan
pub fn leader_fg() -> Color {
    Color::AnsiValue(226)
} // Bright yellow
pub fn flash_fg() -> Color {
    Color::AnsiValue(201)
} // Bright magenta
pub fn warning_fg() -> Color {
    Color::AnsiValue(208)
} // Orange
pub fn ticker_bg() -> Color {
    Color::AnsiValue(226)
} // Bright yellow
pub fn ticker_fg() -> Color {
    Color::AnsiValue(16)
} // Black

/// ANSI 256-color code of `color`, or `fallback` for non-indexed colors.
pub fn ansi_code(color: Color, fallback: u8) -> u8 {
    match color {
        Color::AnsiValue(val) => val,
        _ => fallback,
    }
}
