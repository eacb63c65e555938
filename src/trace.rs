/*!
# Trace Recorder

Both solvers narrate their progress as a sequence of human-readable lines. A [`Trace`] is an
append-only log of these lines; it never influences the computation.

Every recorded line is additionally emitted through the `log` facade at `trace` level, so the
narration can also be followed with `RUST_LOG=bimatch=trace` without inspecting the result.
A disabled trace drops lines right away, which is useful when only the matching is of interest.
*/

use std::fmt::Display;

use log::trace;

/// Append-only log of progress lines in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    lines: Vec<String>,
    disabled: bool,
}

impl Trace {
    /// Creates a new, empty and enabled trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a trace that does not store any lines
    pub fn disabled() -> Self {
        Self {
            lines: Vec::new(),
            disabled: true,
        }
    }

    /// Returns *true* if lines are stored
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Appends a line
    pub fn record<S: Display>(&mut self, line: S) {
        trace!("{line}");
        if !self.disabled {
            self.lines.push(line.to_string());
        }
    }

    /// Returns the recorded lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the number of recorded lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns *true* if no line was recorded
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates over the recorded lines
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }

    /// Consumes the trace and returns its lines
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut trace = Trace::new();
        trace.record("first");
        trace.record(format_args!("second {}", 2));

        assert_eq!(trace.lines(), ["first", "second 2"]);
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn disabled_drops_lines() {
        let mut trace = Trace::disabled();
        trace.record("ignored");

        assert!(!trace.is_enabled());
        assert!(trace.is_empty());
    }
}
