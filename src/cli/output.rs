//! Colored operator output.
//!
//! Status lines are decoration: a failed write (closed stdout, broken pipe) is
//! ignored rather than aborting the build.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::packager::Progress;

/// Writes status lines for the operator, honoring verbose and quiet modes.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    ///
    /// `quiet` suppresses every status line and wins over `verbose`.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Section header.
    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }
        write_line(&mut StandardStream::stdout(color_choice()), Color::Cyan, true, title);
    }

    /// Progress line, prefixed with `[info]`.
    pub fn progress(&self, message: &str) {
        if self.quiet {
            return;
        }
        write_line(
            &mut StandardStream::stdout(color_choice()),
            Color::Blue,
            false,
            &progress_line(message),
        );
    }

    /// Detail line, only in verbose mode.
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            let _ = writeln!(std::io::stdout(), "  {message}");
        }
    }

    /// Success line.
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        write_line(
            &mut StandardStream::stdout(color_choice()),
            Color::Green,
            true,
            &format!("✓ {message}"),
        );
    }

    /// Warning line on stderr.
    pub fn warn(&self, message: &str) {
        if self.quiet {
            return;
        }
        write_line(
            &mut StandardStream::stderr(color_choice()),
            Color::Yellow,
            true,
            &format!("warning: {message}"),
        );
    }
}

impl Progress for OutputManager {
    fn step(&self, message: &str) {
        log::info!("{message}");
        self.progress(message);
    }
}

fn progress_line(message: &str) -> String {
    format!("[info] {message}")
}

fn write_line<W: WriteColor>(stream: &mut W, color: Color, bold: bool, line: &str) {
    let _ = stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
    let _ = write!(stream, "{line}");
    let _ = stream.reset();
    let _ = writeln!(stream);
}

fn color_choice() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}
