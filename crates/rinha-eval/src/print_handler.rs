//! Destinations for `print` output.
//!
//! The evaluator never writes to stdout directly; every emitted line goes
//! through a [`PrintHandler`] so tests can capture output and callers can
//! silence it.

use std::io::{self, Write};

/// Where `print` lines go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PrintHandler {
    /// Write each line to stdout.
    #[default]
    Stdout,
    /// Capture lines in memory.
    Buffer(Vec<String>),
    /// Discard everything.
    Silent,
}

impl PrintHandler {
    /// A handler that captures lines in memory.
    pub fn buffer() -> Self {
        PrintHandler::Buffer(Vec::new())
    }

    /// Emit one line.
    pub fn println(&mut self, line: &str) -> io::Result<()> {
        match self {
            PrintHandler::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{line}")?;
                out.flush()
            }
            PrintHandler::Buffer(lines) => {
                lines.push(line.to_string());
                Ok(())
            }
            PrintHandler::Silent => Ok(()),
        }
    }

    /// Captured lines. Empty for handlers that do not capture.
    pub fn lines(&self) -> &[String] {
        match self {
            PrintHandler::Buffer(lines) => lines,
            PrintHandler::Stdout | PrintHandler::Silent => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_captures_lines_in_order() {
        let mut handler = PrintHandler::buffer();
        handler.println("first").unwrap();
        handler.println("second").unwrap();
        assert_eq!(handler.lines(), ["first", "second"]);
    }

    #[test]
    fn test_silent_discards() {
        let mut handler = PrintHandler::Silent;
        handler.println("ignored").unwrap();
        assert!(handler.lines().is_empty());
    }

    #[test]
    fn test_default_is_stdout() {
        assert_eq!(PrintHandler::default(), PrintHandler::Stdout);
    }
}
