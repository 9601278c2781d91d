//! Terminal rendering of plan markdown.
//!
//! Rich mode colors section and card headers, marks completed goals, and
//! styles inline markdown with termimad. Plain mode prints the markdown
//! untouched, which is also what `--output` writes to disk.

use termimad::{crossterm::style::Color, MadSkin};

const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_fg(Color::Cyan);
        skin.quote_mark.set_fg(Color::Magenta);

        Self { rich_enabled, skin }
    }

    /// Render markdown to stdout
    pub fn render(&self, markdown: &str) {
        if !self.rich_enabled {
            print!("{markdown}");
            return;
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("{BLUE}{line}{RESET}");
            } else if let Some(goal) = line.strip_prefix("- [x] ") {
                println!("{GREEN}- [x] {goal}{RESET}");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
    }

    /// Render a failure message to stderr
    pub fn render_error(&self, message: &str) {
        if self.rich_enabled {
            eprintln!("{RED}{message}{RESET}");
        } else {
            eprintln!("{message}");
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
