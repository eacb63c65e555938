/*!
# IO

Utilities for reading and writing assignment instances and their solutions.

## Instance Format

Instances are stored as a header line followed by one line per edge:
```text
c optional comments
p assign <workers> <tasks> <edges>
<worker> <task>
```
All identifiers are 1-based. The header is described by a configurable [`HeaderFormat`].
See [`InstanceReader`] and [`InstanceWriter`].

Alternatively, instances can be stored as JSON documents with the fields `workers`, `tasks`
and `edges` (see [`JsonReader`] and [`JsonWriter`]).

## Output Formats

- **Report**: the size of the computed matching followed by its pairs and optionally the trace
  of the solver (see [`ReportWriter`]).
- **Json**: the same information as a document with the fields `maxMatching`, `matches` and
  `steps` (see [`JsonWriter::try_write_report`]).
- **Dot**: The [DOT language](https://graphviz.org/doc/info/lang.html) of [GraphViz](https://graphviz.org/)
  with workers and tasks in separate ranks and matched edges highlighted (see [`DotWriter`]).

## Traits

To generalize over reading/writing:
- [`GraphReader`] and [`GraphWriter`] are implemented by readers and writers for a specific format.
- [`InstanceRead`], [`InstanceWrite`] and [`DotWrite`] are shorthands using default settings.
- [`GraphRead`] reads an instance in a [`FileFormat`] chosen at runtime.
*/

pub mod dot;
pub mod header;
pub mod instance;
pub mod json;
pub mod report;

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, ErrorKind, Result, Write},
    path::Path,
    str::FromStr,
};

use crate::prelude::*;

pub use dot::*;
pub use header::*;
pub use instance::*;
pub use json::*;
pub use report::*;

/// Supported instance formats
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FileFormat {
    /// Header line followed by one line per edge
    #[default]
    Instance,
    /// JSON document
    Json,
}

impl FileFormat {
    /// Guesses the format from the extension of `path`; anything but `.json` is [`FileFormat::Instance`]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Instance,
        }
    }
}

impl FromStr for FileFormat {
    type Err = std::io::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "instance" | "text" | "txt" => Ok(FileFormat::Instance),
            "json" => Ok(FileFormat::Json),
            _ => Err(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("Unknown Format: {s}"),
            )),
        }
    }
}

/// Reads an instance in a format chosen at runtime with default settings
pub trait GraphRead: Sized {
    /// Tries to read an instance in the given format
    fn try_read_graph<R: BufRead>(reader: R, format: FileFormat) -> Result<Self>;

    /// Tries to read an instance from a file in the given format
    fn try_read_graph_file<P: AsRef<Path>>(path: P, format: FileFormat) -> Result<Self> {
        Self::try_read_graph(BufReader::new(File::open(path)?), format)
    }
}

impl GraphRead for BipartiteGraph {
    fn try_read_graph<R: BufRead>(reader: R, format: FileFormat) -> Result<Self> {
        match format {
            FileFormat::Instance => InstanceReader::default().try_read_graph(reader),
            FileFormat::Json => JsonReader::new().try_read_graph(reader),
        }
    }
}

/// Reader of assignment instances in a specific format.
///
/// Implementors only parse from a [`BufRead`]; reading from a path is provided.
pub trait GraphReader<G> {
    /// Parses an instance according to the settings in `self`.
    ///
    /// # Errors
    /// Fails with [`ErrorKind::InvalidData`] on malformed headers or edge lines and
    /// propagates errors of the underlying reader.
    fn try_read_graph<R>(&self, reader: R) -> Result<G>
    where
        R: BufRead;

    /// Opens `path` and parses its contents as an instance.
    fn try_read_graph_file<P>(&self, path: P) -> Result<G>
    where
        P: AsRef<Path>,
    {
        self.try_read_graph(BufReader::new(File::open(path)?))
    }
}

/// Writer of assignment instances (or renderings thereof) in a specific format.
///
/// Implementors only write to a [`Write`]; writing to a path is provided.
pub trait GraphWriter<G: ?Sized> {
    /// Writes `graph` according to the settings in `self`.
    fn try_write_graph<W>(&self, graph: &G, writer: W) -> Result<()>
    where
        W: Write;

    /// Creates (or truncates) `path` and writes `graph` into it.
    fn try_write_graph_file<P>(&self, graph: &G, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.try_write_graph(graph, BufWriter::new(File::create(path)?))
    }
}

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

/// Shorthand for returning `Err(std::io::Error)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(io_error!($kind, $info));
        }
    };
}

/// Tries to parse the next value in an iterator and returns early if it fails
macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {
        match $iterator.next().map(|value| value.parse()) {
            Some(Ok(value)) => value,
            Some(Err(_)) => {
                return Err(io_error!(
                    ErrorKind::InvalidData,
                    format!("Invalid value found. Cannot parse {}.", $name)
                ));
            }
            None => {
                return Err(io_error!(
                    ErrorKind::InvalidData,
                    format!("Premature end of line when parsing {}.", $name)
                ));
            }
        }
    };
}

use io_error;
use parse_next_value;
use raise_error_unless;
