//! # Headers
//!
//! A header(-line) of an instance file is defined by a series of whitespace separated tokens
//! giving the size of both sides and the number of edges that follow.
//!
//! The default format is
//!     "p assign {workers} {tasks} {edges}"

use itertools::Itertools;
use smallvec::{SmallVec, smallvec};

use super::*;

/// Defining a single token in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderToken {
    /// Ignore entry
    Any,
    /// Match entry to str
    Str(String),
    /// Parse number of workers
    NumWorkers,
    /// Parse number of tasks
    NumTasks,
    /// Parse number of edges
    NumEdges,
    /// Ensure that there are no more entries
    End,
    /// Ignore all further entries
    Rest,
}

impl HeaderToken {
    /// When writing a header, this is the representation for HeaderToken::Any
    fn any_string() -> String {
        "0".to_string()
    }
}

/// Sizes parsed from a header line
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct HeaderInfo {
    pub number_of_workers: NumNodes,
    pub number_of_tasks: NumNodes,
    pub number_of_edges: NumEdges,
}

/// Defines the complete format of the header.
///
/// Use the Builder-Pattern to define the format.
/// The following defines the default format:
/// ```
/// use bimatch::io::*;
///
/// let format = HeaderFormat::new()
///     .str("p").str("assign").number_of_workers().number_of_tasks().number_of_edges().end();
/// assert_eq!(format, Header::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFormat<
    // Set to *true* if the position for number of workers was set
    const WORKERS_SET: bool = false,
    // Set to *true* if the position for number of tasks was set
    const TASKS_SET: bool = false,
    // Set to *true* if the position for number of edges was set
    const EDGES_SET: bool = false,
    // Set to *true* if all sizes are set and the last entry is `HeaderToken::End | HeaderToken::Rest`
    const END: bool = false,
>(SmallVec<[HeaderToken; 6]>);

/// A header is defined as a format that satisfies all prerequisites.
pub type Header = HeaderFormat<true, true, true, true>;

impl Default for Header {
    fn default() -> Self {
        Self::new_problem("assign")
    }
}

impl Header {
    /// Creates a new HeaderFormat `p {problem} {workers} {tasks} {edges}`
    pub fn new_problem<S: Into<String>>(problem: S) -> Self {
        Self(smallvec![
            HeaderToken::Str("p".to_string()),
            HeaderToken::Str(problem.into()),
            HeaderToken::NumWorkers,
            HeaderToken::NumTasks,
            HeaderToken::NumEdges,
            HeaderToken::End,
        ])
    }

    /// Tries to parse the header and extract the number of workers, tasks and edges.
    pub fn parse_header(&self, line: &str) -> Result<HeaderInfo> {
        let mut info = HeaderInfo::default();
        let mut parts = line.split_whitespace();

        for token in &self.0 {
            match token {
                HeaderToken::Any => {
                    raise_error_unless!(
                        parts.next().is_some(),
                        ErrorKind::InvalidData,
                        "Header is shorter than expected"
                    );
                }
                HeaderToken::Str(s) => {
                    let entry = parts.next();
                    raise_error_unless!(
                        entry == Some(s.as_str()),
                        ErrorKind::InvalidData,
                        format!("Invalid header found: expected `{s}`")
                    );
                }
                HeaderToken::NumWorkers => {
                    info.number_of_workers = parse_next_value!(parts, "Header>Number of workers");
                }
                HeaderToken::NumTasks => {
                    info.number_of_tasks = parse_next_value!(parts, "Header>Number of tasks");
                }
                HeaderToken::NumEdges => {
                    info.number_of_edges = parse_next_value!(parts, "Header>Number of edges");
                }
                HeaderToken::Rest => break,
                HeaderToken::End => {
                    raise_error_unless!(
                        parts.next().is_none(),
                        ErrorKind::InvalidData,
                        "Header is longer than expected"
                    );
                }
            }
        }

        Ok(info)
    }

    /// Writes the header for the given sizes
    pub fn write_header<W: Write>(&self, writer: &mut W, info: HeaderInfo) -> Result<()> {
        let header_str = self
            .0
            .iter()
            .filter_map(|token| match token {
                HeaderToken::Any => Some(HeaderToken::any_string()),
                HeaderToken::Str(s) => Some(s.to_string()),
                HeaderToken::NumWorkers => Some(info.number_of_workers.to_string()),
                HeaderToken::NumTasks => Some(info.number_of_tasks.to_string()),
                HeaderToken::NumEdges => Some(info.number_of_edges.to_string()),
                HeaderToken::End | HeaderToken::Rest => None,
            })
            .join(" ");
        writeln!(writer, "{header_str}")
    }
}

impl HeaderFormat {
    /// Creates a new empty format
    pub fn new() -> Self {
        HeaderFormat(smallvec![])
    }
}

impl<const W: bool, const T: bool, const E: bool> HeaderFormat<W, T, E, false> {
    /// Pushes a token that can be ignored onto the stack
    pub fn any(mut self) -> Self {
        self.0.push(HeaderToken::Any);
        self
    }

    /// Pushes a token that should match a string onto the stack
    pub fn str<S: Into<String>>(mut self, s: S) -> Self {
        self.0.push(HeaderToken::Str(s.into()));
        self
    }
}

impl<const T: bool, const E: bool> HeaderFormat<false, T, E, false> {
    /// Adds the number of workers token onto the stack
    pub fn number_of_workers(mut self) -> HeaderFormat<true, T, E, false> {
        self.0.push(HeaderToken::NumWorkers);
        HeaderFormat(self.0)
    }
}

impl<const W: bool, const E: bool> HeaderFormat<W, false, E, false> {
    /// Adds the number of tasks token onto the stack
    pub fn number_of_tasks(mut self) -> HeaderFormat<W, true, E, false> {
        self.0.push(HeaderToken::NumTasks);
        HeaderFormat(self.0)
    }
}

impl<const W: bool, const T: bool> HeaderFormat<W, T, false, false> {
    /// Adds the number of edges token onto the stack
    pub fn number_of_edges(mut self) -> HeaderFormat<W, T, true, false> {
        self.0.push(HeaderToken::NumEdges);
        HeaderFormat(self.0)
    }
}

impl HeaderFormat<true, true, true, false> {
    /// Marks the header as finished ensuring that no further tokens follow
    pub fn end(mut self) -> Header {
        self.0.push(HeaderToken::End);
        HeaderFormat(self.0)
    }

    /// Marks the header as finished ignoring all further tokens
    pub fn ignore_rest(mut self) -> Header {
        self.0.push(HeaderToken::Rest);
        HeaderFormat(self.0)
    }
}
