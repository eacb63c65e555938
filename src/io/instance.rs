//! # Instances
//!
//! An instance file consists of a header (see [`HeaderFormat`]), followed by exactly `m`
//! non-comment-lines `w t` each representing an edge `Edge(w, t)` between worker `w` and task `t`.
//! Identifiers are 1-based and are not checked against the declared sizes when reading.
//!
//! ```
//! use bimatch::{prelude::*, io::*};
//!
//! let input = "c three workers, two tasks\np assign 3 2 3\n1 1\n2 1\n3 2\n";
//! let graph = BipartiteGraph::try_read_instance(input.as_bytes()).unwrap();
//!
//! assert_eq!(graph.number_of_workers(), 3);
//! assert_eq!(graph.edges_as_slice(), &[Edge(1, 1), Edge(2, 1), Edge(3, 2)]);
//! ```

use std::io::Lines;

use super::*;

/// A GraphReader for the instance format
#[derive(Debug, Clone)]
pub struct InstanceReader {
    /// HeaderFormat
    header: Header,
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
}

impl Default for InstanceReader {
    fn default() -> Self {
        Self {
            header: Header::default(),
            comment_identifier: "c".to_string(),
        }
    }
}

impl InstanceReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the header format
    pub fn header_format(mut self, format: Header) -> InstanceReader {
        self.header = format;
        self
    }

    /// Updates the comment identifier
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> InstanceReader {
        self.comment_identifier = c.into();
        self
    }
}

impl GraphReader<BipartiteGraph> for InstanceReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<BipartiteGraph> {
        let edges_reader =
            InstanceEdgesReader::try_new(reader, &self.header, &self.comment_identifier)?;
        let info = edges_reader.header_info();

        let mut graph = BipartiteGraph::new(info.number_of_workers, info.number_of_tasks);
        for edge in edges_reader {
            let Edge(worker, task) = edge?;
            graph.add_edge(worker, task);
        }

        raise_error_unless!(
            graph.number_of_edges() == info.number_of_edges,
            ErrorKind::InvalidData,
            format!(
                "Header announces {} edges but {} were found",
                info.number_of_edges,
                graph.number_of_edges()
            )
        );

        Ok(graph)
    }
}

/// Trait for creating graphs from an InstanceReader.
/// Used as shorthand for default InstanceReader settings
pub trait InstanceRead: Sized {
    /// Tries to read the graph from a given reader
    fn try_read_instance<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the graph from a given file
    fn try_read_instance_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_instance(BufReader::new(File::open(path)?))
    }
}

impl InstanceRead for BipartiteGraph {
    fn try_read_instance<R: BufRead>(reader: R) -> Result<Self> {
        InstanceReader::default().try_read_graph(reader)
    }
}

/// Lazily parses the edge lines of an instance after its header
pub struct InstanceEdgesReader<'a, R> {
    /// Lines in the reader
    lines: Lines<R>,
    /// Sizes parsed from the header
    info: HeaderInfo,
    /// Comment identifier
    comment_identifier: &'a str,
}

impl<'a, R: BufRead> InstanceEdgesReader<'a, R> {
    /// Creates a new InstanceEdgesReader and tries to parse the first non-comment-line as the header
    pub fn try_new(reader: R, header_format: &Header, comment_identifier: &'a str) -> Result<Self> {
        let mut edges_reader = Self {
            lines: reader.lines(),
            info: HeaderInfo::default(),
            comment_identifier,
        };

        let line = edges_reader
            .next_non_comment_line()?
            .ok_or_else(|| io_error!(ErrorKind::NotFound, "Header not found"))?;
        edges_reader.info = header_format.parse_header(&line)?;

        Ok(edges_reader)
    }

    /// Returns the sizes parsed from the header
    pub fn header_info(&self) -> HeaderInfo {
        self.info
    }

    /// Returns the next non-empty non-comment-line if it exists or propagate an error
    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        for line in self.lines.by_ref() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with(self.comment_identifier) {
                continue;
            }
            return Ok(Some(line));
        }
        Ok(None)
    }

    /// Tries to parse an edge from the next non-comment-line
    fn parse_edge_line(&mut self) -> Result<Option<Edge>> {
        let Some(line) = self.next_non_comment_line()? else {
            return Ok(None);
        };

        let mut parts = line.split_whitespace();
        let worker = parse_next_value!(parts, "Worker");
        let task = parse_next_value!(parts, "Task");

        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            format!("Edge line `{line}` has more than two entries")
        );

        Ok(Some(Edge(worker, task)))
    }
}

impl<R: BufRead> Iterator for InstanceEdgesReader<'_, R> {
    type Item = Result<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_edge_line().transpose()
    }
}

/// A writer for the instance format
#[derive(Debug, Clone, Default)]
pub struct InstanceWriter {
    /// HeaderFormat
    header: Header,
}

impl InstanceWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the header format
    pub fn header_format(mut self, format: Header) -> InstanceWriter {
        self.header = format;
        self
    }
}

impl<G: WorkerTaskGraph + ?Sized> GraphWriter<G> for InstanceWriter {
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        self.header.write_header(
            &mut writer,
            HeaderInfo {
                number_of_workers: graph.number_of_workers(),
                number_of_tasks: graph.number_of_tasks(),
                number_of_edges: graph.number_of_edges(),
            },
        )?;

        for Edge(worker, task) in graph.edges() {
            writeln!(writer, "{worker} {task}")?;
        }

        writer.flush()
    }
}

/// Trait for writing a graph to a writer in the instance format.
/// Shorthand for default settings.
pub trait InstanceWrite {
    /// Tries to write the graph to a writer
    fn try_write_instance<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a file
    fn try_write_instance_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_instance(writer)
    }
}

impl<G: WorkerTaskGraph> InstanceWrite for G {
    fn try_write_instance<W: Write>(&self, writer: W) -> Result<()> {
        InstanceWriter::default().try_write_graph(self, writer)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::gens::*;

    #[test]
    fn read_with_comments() {
        let input = "c header follows\n\
                     p assign 2 3 3\n\
                     c first edge\n\
                     1 3\n\
                     \n\
                     2   1\n\
                     2 3\n";
        let graph = BipartiteGraph::try_read_instance(input.as_bytes()).unwrap();

        assert_eq!(graph.number_of_workers(), 2);
        assert_eq!(graph.number_of_tasks(), 3);
        assert_eq!(graph.edges_as_slice(), &[Edge(1, 3), Edge(2, 1), Edge(2, 3)]);
    }

    #[test]
    fn ids_are_not_checked() {
        let graph = BipartiteGraph::try_read_instance("p assign 1 1 1\n1 5\n".as_bytes()).unwrap();
        assert_eq!(graph.edges_as_slice(), &[Edge(1, 5)]);
        assert!(graph.validate().is_err());
    }

    #[test]
    fn invalid_inputs() {
        for input in [
            "",
            "c only a comment\n",
            "p assign 2 2 2\n1 1\n",
            "p assign 2 2 1\n1 1\n2 2\n",
            "p assign 2 2 1\n1\n",
            "p assign 2 2 1\n1 x\n",
            "p assign 2 2 1\n1 2 3\n",
            "p flow 2 2 1\n1 2\n",
        ] {
            assert!(
                BipartiteGraph::try_read_instance(input.as_bytes()).is_err(),
                "{input:?}"
            );
        }

        let err = BipartiteGraph::try_read_instance("p assign 2 2 2\n1 1\n".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn custom_reader() {
        let reader = InstanceReader::new()
            .comment_identifier("%")
            .header_format(Header::new_problem("bm"));

        let graph: BipartiteGraph = reader
            .try_read_graph("% comment\np bm 1 2 2\n1 2\n1 1\n".as_bytes())
            .unwrap();
        assert_eq!(graph.edges_as_slice(), &[Edge(1, 2), Edge(1, 1)]);
    }

    #[test]
    fn write_then_read() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for (w, t) in [(0, 0), (1, 4), (6, 3), (10, 10)] {
            let graph = RandomBipartite::new().workers(w).tasks(t).prob(0.4).generate(rng);

            let mut buffer = Vec::new();
            graph.try_write_instance(&mut buffer).unwrap();

            let read = BipartiteGraph::try_read_instance(buffer.as_slice()).unwrap();
            assert_eq!(graph, read);
        }
    }

    #[test]
    fn write_format() {
        let graph = BipartiteGraph::from_edges(2, 2, [(2, 1), (1, 2)]);

        let mut buffer = Vec::new();
        graph.try_write_instance(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "p assign 2 2 2\n2 1\n1 2\n");
    }
}
