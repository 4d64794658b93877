//! User-facing status lines.
//!
//! Everything here is meant for a human watching the terminal. Diagnostics go through `tracing`
//! instead.

use std::io::{self, Stdout, Write};

use colored::Colorize;
use crossterm::{
    cursor::MoveTo,
    terminal::{Clear, ClearType},
    ExecutableCommand,
};

const BANNER: &str = r"
  ___        _          _____
 / _ \      | |        |_   _|
/ /_\ \_   _| |_ ___     | |_  __
|  _  | | | | __/ _ \    | \ \/ /
| | | | |_| | || (_) |   | |>  <
\_| |_/\__,_|\__\___/    \_/_/\_\
";

/// Colored line printer over any writer. Write failures are ignored, as the console is purely
/// informational.
pub struct Console<W: Write = Stdout> {
    out: W,
}

impl Console<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    /// Clears the screen and moves the cursor to the top-left corner.
    pub fn clear(&mut self) {
        let _ = self
            .out
            .execute(Clear(ClearType::All))
            .and_then(|out| out.execute(MoveTo(0, 0)));
    }

    pub fn banner(&mut self) {
        self.line(BANNER.cyan().bold());
    }

    pub fn heading(&mut self, text: &str) {
        self.line(text.bold().underline());
    }

    pub fn option(&mut self, key: &str, text: &str) {
        self.line(format!("{} {text}", format!("[{key}]").yellow().bold()));
    }

    pub fn info(&mut self, text: impl AsRef<str>) {
        self.line(text.as_ref());
    }

    pub fn success(&mut self, text: impl AsRef<str>) {
        self.line(format!("✅ {}", text.as_ref().green()));
    }

    pub fn failure(&mut self, text: impl AsRef<str>) {
        self.line(format!("❌ {}", text.as_ref().red()));
    }

    pub fn waiting(&mut self, text: impl AsRef<str>) {
        self.line(format!("⌛ {}", text.as_ref().yellow()));
    }

    pub fn celebrate(&mut self, text: impl AsRef<str>) {
        self.line(format!("🎉 {} 🎉", text.as_ref().magenta().bold()));
    }
}

#[cfg(test)]
mod tests {
    use assert2::assert;

    use super::*;

    #[test]
    fn status_lines_carry_markers() {
        let mut console = Console::new(Vec::new());

        console.success("sent");
        console.failure("rejected");
        console.waiting("paused");

        let printed = String::from_utf8(console.into_inner()).expect("utf-8 output");
        let lines: Vec<_> = printed.lines().collect();
        assert!(lines.len() == 3);
        assert!(lines[0].starts_with("✅") && lines[0].contains("sent"));
        assert!(lines[1].starts_with("❌") && lines[1].contains("rejected"));
        assert!(lines[2].starts_with("⌛") && lines[2].contains("paused"));
    }

    #[test]
    fn clear_wipes_screen_and_homes_cursor() {
        let mut console = Console::new(Vec::new());

        console.clear();

        let printed = String::from_utf8(console.into_inner()).expect("utf-8 output");
        assert!(printed == "\x1B[2J\x1B[1;1H");
    }
}
