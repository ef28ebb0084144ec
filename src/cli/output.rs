//! Colored terminal output for operator-facing messages.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes status lines to the terminal, honoring verbose and quiet modes.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    color_choice: ColorChoice,
}

impl OutputManager {
    /// Creates an output manager.
    ///
    /// `quiet` wins over `verbose` for everything except errors.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        let color_choice = if std::env::var_os("NO_COLOR").is_some() {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        Self {
            verbose,
            quiet,
            color_choice,
        }
    }

    /// Whether verbose output is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Whether output is suppressed.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn write_line(
        &self,
        mut stream: StandardStream,
        prefix: &str,
        color: Option<Color>,
        bold: bool,
        message: &str,
    ) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(color).set_bold(bold);
        stream.set_color(&spec)?;
        write!(stream, "{}", prefix)?;
        stream.reset()?;
        writeln!(stream, "{}", message)
    }

    fn stdout(&self) -> StandardStream {
        StandardStream::stdout(self.color_choice)
    }

    fn stderr(&self) -> StandardStream {
        StandardStream::stderr(self.color_choice)
    }

    /// Print message only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.is_verbose() {
            return Ok(());
        }
        self.write_line(self.stdout(), "  ", Some(Color::Cyan), false, message)
    }

    /// Print a warning unless quiet.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(self.stderr(), "⚠ ", Some(Color::Yellow), true, message)
    }

    /// Print a success line unless quiet.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(self.stdout(), "✓ ", Some(Color::Green), true, message)
    }

    /// Print an error line. Never suppressed.
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.write_line(self.stderr(), "✗ ", Some(Color::Red), true, message)
    }

    /// Print a progress line unless quiet.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(self.stdout(), "→ ", Some(Color::Blue), false, message)
    }

    /// Print a section header unless quiet.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = self.stdout();
        writeln!(stream)?;
        stream.set_color(ColorSpec::new().set_bold(true).set_underline(true))?;
        write!(stream, "{}", title)?;
        stream.reset()?;
        writeln!(stream)
    }

    /// Print indented text unless quiet.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(self.stdout(), "    ", None, false, message)
    }

    /// Print a plain line, ignoring quiet mode.
    ///
    /// Used for machine-readable output such as `--list-files`.
    pub fn plain(&self, message: &str) -> io::Result<()> {
        let mut stream = io::stdout().lock();
        writeln!(stream, "{}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        let output = OutputManager::new(true, true);
        assert!(!output.is_verbose());
        assert!(output.is_quiet());

        let output = OutputManager::new(true, false);
        assert!(output.is_verbose());
    }
}
