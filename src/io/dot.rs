//! # Dot
//!
//! The Dot-Format is a very extensive format used by [GraphViz](https://graphviz.org/) to allow
//! for detailed visualizations. We only use basic functionality: workers and tasks are drawn as
//! two ranks, and edges of a given assignment are highlighted.
//!
//! ```
//! use bimatch::{prelude::*, io::*};
//!
//! let graph = BipartiteGraph::from_edges(2, 2, [(1, 1), (1, 2), (2, 1)]);
//! let result = graph.maximum_bipartite_matching().unwrap();
//!
//! let mut buffer = Vec::new();
//! DotWriter::new().try_write_assignment(&graph, result.pairs(), &mut buffer).unwrap();
//!
//! let dot = String::from_utf8(buffer).unwrap();
//! assert!(dot.starts_with("graph {"));
//! assert!(dot.contains("w1 -- t2 [color=red, penwidth=2];"));
//! ```
//!
//! Note that a pair occurring multiple times in the edge list is highlighted only once.

use std::fmt::Display;

use fxhash::FxHashSet;

use super::*;

/// A writer for the Dot-Format
#[derive(Debug, Clone)]
pub struct DotWriter {
    /// Prefix of a worker (default: 'w')
    worker_prefix: String,
    /// Prefix of a task (default: 't')
    task_prefix: String,
    /// Color of matched edges
    matched_color: DotColor,
    /// Color of all other edges
    unmatched_color: DotColor,
}

impl Default for DotWriter {
    fn default() -> Self {
        Self {
            worker_prefix: "w".to_string(),
            task_prefix: "t".to_string(),
            matched_color: DotColor::Red,
            unmatched_color: DotColor::Gray,
        }
    }
}

impl DotWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix of workers (`w` by default)
    pub fn worker_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.worker_prefix = prefix.into();
        self
    }

    /// Set the prefix of tasks (`t` by default)
    pub fn task_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.task_prefix = prefix.into();
        self
    }

    /// Set the color of matched edges (`red` by default)
    pub fn matched_color(mut self, color: DotColor) -> Self {
        self.matched_color = color;
        self
    }

    /// Set the color of unmatched edges (`gray` by default)
    pub fn unmatched_color(mut self, color: DotColor) -> Self {
        self.unmatched_color = color;
        self
    }

    /// Writes `graph` with all edges contained in `pairs` highlighted
    pub fn try_write_assignment<G, W>(&self, graph: &G, pairs: &[Edge], mut writer: W) -> Result<()>
    where
        G: WorkerTaskGraph + ?Sized,
        W: Write,
    {
        let mut matched: FxHashSet<Edge> = pairs.iter().copied().collect();

        writeln!(writer, "graph {{")?;
        self.write_rank(&mut writer, "workers", &self.worker_prefix, graph.workers())?;
        self.write_rank(&mut writer, "tasks", &self.task_prefix, graph.tasks())?;

        for edge in graph.edges() {
            let Edge(worker, task) = edge;
            if matched.remove(&edge) {
                writeln!(
                    writer,
                    "  {}{worker} -- {}{task} [color={}, penwidth=2];",
                    self.worker_prefix, self.task_prefix, self.matched_color
                )?;
            } else {
                writeln!(
                    writer,
                    "  {}{worker} -- {}{task} [color={}];",
                    self.worker_prefix, self.task_prefix, self.unmatched_color
                )?;
            }
        }

        writeln!(writer, "}}")?;
        writer.flush()
    }

    /// Writes the assignment to a file
    pub fn try_write_assignment_file<G, P>(&self, graph: &G, pairs: &[Edge], path: P) -> Result<()>
    where
        G: WorkerTaskGraph + ?Sized,
        P: AsRef<Path>,
    {
        self.try_write_assignment(graph, pairs, BufWriter::new(File::create(path)?))
    }

    /// Writes one side of the graph as a cluster of equal rank
    fn write_rank<W, I>(&self, writer: &mut W, name: &str, prefix: &str, nodes: I) -> Result<()>
    where
        W: Write,
        I: IntoIterator<Item = Node>,
    {
        write!(writer, "  subgraph cluster_{name} {{ label=\"{name}\"; rank=same;")?;
        for u in nodes {
            write!(writer, " {prefix}{u};")?;
        }
        writeln!(writer, " }}")
    }
}

impl<G> GraphWriter<G> for DotWriter
where
    G: WorkerTaskGraph + ?Sized,
{
    fn try_write_graph<W>(&self, graph: &G, writer: W) -> Result<()>
    where
        W: Write,
    {
        self.try_write_assignment(graph, &[], writer)
    }
}

/// Trait for writing a graph to a writer in the Dot-Format.
/// Shorthand for default settings.
pub trait DotWrite {
    /// Tries to write the graph to a writer
    fn try_write_dot<W>(&self, writer: W) -> Result<()>
    where
        W: Write;

    /// Tries to write the graph to a file
    fn try_write_dot_file<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_dot(writer)
    }
}

impl<G> DotWrite for G
where
    G: WorkerTaskGraph,
{
    fn try_write_dot<W>(&self, writer: W) -> Result<()>
    where
        W: Write,
    {
        DotWriter::default().try_write_graph(self, writer)
    }
}

impl Display for DotColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").to_lowercase())
    }
}

/// Colors of the Svg-Dot scheme usable for edges,
/// see `https://graphviz.gitlab.io/doc/info/colors.html#svg`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DotColor {
    Black,
    Blue,
    Brown,
    Crimson,
    DarkGreen,
    DarkOrange,
    Gold,
    Gray,
    Green,
    LightGray,
    Magenta,
    Navy,
    Orange,
    Purple,
    Red,
    Teal,
}
