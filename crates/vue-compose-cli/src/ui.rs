//! Terminal output helpers for the vue-compose CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Palette
pub mod colors {
    use console::Color;

    pub const GREEN: Color = Color::Color256(42);  // Vue green
    pub const NAVY: Color = Color::Color256(67);   // Slate blue
    pub const PINK: Color = Color::Color256(205);  // GraphQL pink
    pub const DIM: Color = Color::Color256(240);   // Dim gray
}

pub mod symbols {
    pub const CHECK: &str = "\u{2714}";            // ✔
    pub const CROSS: &str = "\u{2716}";            // ✖
    pub const DIAMOND: &str = "\u{25C6}";          // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}";  // ◇
    pub const TRIANGLE: &str = "\u{25B8}";         // ▸
    pub const DOT: &str = "\u{00B7}";              // ·
}

/// Create a clickable file link (OSC 8 hyperlink)
pub fn file_link(path: &Path) -> String {
    let abs_path = std::fs::canonicalize(path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string());
    format!(
        "\x1b]8;;file://{}\x07{}\x1b]8;;\x07",
        abs_path,
        path.display()
    )
}

/// Print a success message
pub fn success(msg: &str) {
    println!("  {} {}", style(symbols::CHECK).fg(colors::GREEN), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::CROSS).fg(colors::PINK),
        style(msg).fg(colors::PINK)
    );
}

/// Print an info message
pub fn info(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::DIAMOND_OUTLINE).fg(colors::NAVY),
        msg
    );
}

pub fn dim(msg: &str) {
    println!("  {}", style(msg).fg(colors::DIM));
}

/// Print a written file, one per line
pub fn file_line(path: &Path) {
    println!(
        "    {} {}",
        style(symbols::TRIANGLE).fg(colors::GREEN),
        file_link(path)
    );
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars("\u{25C7}\u{25C6}\u{25C7}\u{25C6}") // ◇◆◇◆
        .template("  {spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Print a box header
pub fn box_header(title: &str) {
    let width = 55;
    let title_padded = format!(" {} ", title);
    let dashes = width - title_padded.chars().count().min(width - 4) - 4;

    println!(
        "  {}{}{}{}",
        style("\u{256D}\u{2500}").fg(colors::GREEN), // ╭─
        style(title_padded).fg(colors::GREEN).bold(),
        style("\u{2500}".repeat(dashes)).fg(colors::GREEN),
        style("\u{256E}").fg(colors::GREEN) // ╮
    );
}

/// Print a box line
pub fn box_line(content: &str) {
    let width: usize = 53;
    let padding = width.saturating_sub(content.chars().count());
    println!(
        "  {} {}{}{}",
        style("\u{2502}").fg(colors::GREEN), // │
        content,
        " ".repeat(padding),
        style("\u{2502}").fg(colors::GREEN)
    );
}

/// Print a box footer
pub fn box_footer() {
    let width = 55;
    println!(
        "  {}{}{}",
        style("\u{2570}").fg(colors::GREEN), // ╰
        style("\u{2500}".repeat(width - 2)).fg(colors::GREEN),
        style("\u{256F}").fg(colors::GREEN) // ╯
    );
}

/// Summary line: operation and fragment counts.
pub fn counts_line(operations: usize, fragments: usize) -> String {
    format!(
        "{} {} {} {} {}",
        plural(operations, "operation"),
        symbols::DOT,
        plural(fragments, "fragment"),
        symbols::DOT,
        "composition functions ready"
    )
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Print timing information
pub fn timing(label: &str, duration_ms: u128) {
    println!(
        "  {} {} in {}ms",
        style(symbols::DIAMOND_OUTLINE).fg(colors::NAVY),
        label,
        duration_ms
    );
}

/// Print the failure header for `generate` and `check`
pub fn failed_header() {
    println!();
    println!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::PINK).bold(),
        style("Generation failed.").fg(colors::PINK).bold()
    );
    println!();
}

/// Print the success line for `check`
pub fn looking_good() {
    println!(
        "  {} {}",
        style(symbols::CHECK).fg(colors::GREEN),
        style("Documents are valid.").bold()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_line() {
        assert_eq!(
            counts_line(1, 3),
            "1 operation \u{00B7} 3 fragments \u{00B7} composition functions ready"
        );
        assert_eq!(plural(0, "operation"), "0 operations");
    }

    #[test]
    fn test_file_link_format() {
        let link = file_link(Path::new("feed.generated.ts"));
        assert!(link.contains("feed.generated.ts"));
        assert!(link.starts_with("\x1b]8;;file://"));
    }
}
