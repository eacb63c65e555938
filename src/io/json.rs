//! # Json
//!
//! Instances and results as JSON documents. An instance lists both side sizes and its edges:
//! ```json
//! { "workers": 2, "tasks": 2, "edges": [{ "from": 1, "to": 1 }, { "from": 2, "to": 1 }] }
//! ```
//! A result carries the size of the assignment, its pairs and the trace of the solver:
//! ```json
//! { "maxMatching": 1, "matches": [{ "from": 1, "to": 1 }], "steps": ["..."] }
//! ```
//! Identifiers are 1-based and, as in the text format, not checked when reading.
//!
//! ```
//! use bimatch::{prelude::*, io::*};
//!
//! let input = r#"{"workers": 3, "tasks": 2, "edges": [{"from": 1, "to": 2}, {"from": 3, "to": 1}]}"#;
//! let graph: BipartiteGraph = JsonReader::new().try_read_graph(input.as_bytes()).unwrap();
//!
//! assert_eq!(graph.edges_as_slice(), &[Edge(1, 2), Edge(3, 1)]);
//! ```

use serde::{Deserialize, Serialize};

use super::*;

/// A single edge `from -> to`, i.e. `Edge(worker, task)`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonEdge {
    pub from: Node,
    pub to: Node,
}

impl From<Edge> for JsonEdge {
    fn from(Edge(from, to): Edge) -> Self {
        Self { from, to }
    }
}

impl From<JsonEdge> for Edge {
    fn from(edge: JsonEdge) -> Self {
        Edge(edge.from, edge.to)
    }
}

/// Document layout of an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonInstance {
    pub workers: NumNodes,
    pub tasks: NumNodes,
    #[serde(default)]
    pub edges: Vec<JsonEdge>,
}

/// Document layout of a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub max_matching: usize,
    pub matches: Vec<JsonEdge>,
    pub steps: Vec<String>,
}

/// A GraphReader for JSON instances
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader;

impl JsonReader {
    /// Shorthand for default
    pub fn new() -> Self {
        Self
    }
}

impl GraphReader<BipartiteGraph> for JsonReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<BipartiteGraph> {
        let instance: JsonInstance = serde_json::from_reader(reader)?;
        Ok(BipartiteGraph::from_edges(
            instance.workers,
            instance.tasks,
            instance.edges,
        ))
    }
}

/// A writer for JSON instances and results
#[derive(Debug, Clone)]
pub struct JsonWriter {
    /// Indent the output
    pretty: bool,
    /// Store the trace of the solver as `steps`
    include_trace: bool,
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self {
            pretty: true,
            include_trace: true,
        }
    }
}

impl JsonWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// If *false*, the document is written in a single line
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// If *false*, `steps` is left empty even if the result carries a trace
    pub fn include_trace(mut self, include_trace: bool) -> Self {
        self.include_trace = include_trace;
        self
    }

    /// Writes `result` as a [`JsonReport`]
    pub fn try_write_report<W: Write>(&self, result: &MatchingResult, writer: W) -> Result<()> {
        let steps = if self.include_trace {
            result.trace().lines().to_vec()
        } else {
            Vec::new()
        };

        self.write_document(
            &JsonReport {
                max_matching: result.size(),
                matches: result.pairs().iter().map(|&e| e.into()).collect(),
                steps,
            },
            writer,
        )
    }

    /// Writes the report to a file
    pub fn try_write_report_file<P: AsRef<Path>>(
        &self,
        result: &MatchingResult,
        path: P,
    ) -> Result<()> {
        self.try_write_report(result, BufWriter::new(File::create(path)?))
    }

    fn write_document<T: Serialize, W: Write>(&self, document: &T, mut writer: W) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, document)?;
        } else {
            serde_json::to_writer(&mut writer, document)?;
        }
        writeln!(writer)?;
        writer.flush()
    }
}

impl<G: WorkerTaskGraph + ?Sized> GraphWriter<G> for JsonWriter {
    fn try_write_graph<W: Write>(&self, graph: &G, writer: W) -> Result<()> {
        self.write_document(
            &JsonInstance {
                workers: graph.number_of_workers(),
                tasks: graph.number_of_tasks(),
                edges: graph.edges().map(JsonEdge::from).collect(),
            },
            writer,
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::gens::*;

    #[test]
    fn read_field_names() {
        let input = r#"{
            "workers": 3,
            "tasks": 3,
            "edges": [
                {"from": 1, "to": 1}, {"from": 1, "to": 2}, {"from": 2, "to": 1},
                {"from": 2, "to": 3}, {"from": 3, "to": 2}
            ]
        }"#;
        let graph = JsonReader::new().try_read_graph(input.as_bytes()).unwrap();

        assert_eq!(graph, BipartiteGraph::from_edges(3, 3, [(1, 1), (1, 2), (2, 1), (2, 3), (3, 2)]));
        assert_eq!(graph.maximum_bipartite_matching().unwrap().size(), 3);
    }

    #[test]
    fn invalid_documents() {
        for input in [
            "",
            "p assign 1 1 1\n1 1\n",
            r#"{"workers": 1, "edges": []}"#,
            r#"{"workers": 1, "tasks": 1, "edges": [{"from": 1}]}"#,
            r#"{"workers": 1, "tasks": 1, "edges": [{"from": -1, "to": 1}]}"#,
            r#"{"workers": "one", "tasks": 1, "edges": []}"#,
        ] {
            let read: Result<BipartiteGraph> = JsonReader::new().try_read_graph(input.as_bytes());
            assert!(read.is_err(), "{input}");
        }

        // missing edge list is an instance without edges
        let graph: BipartiteGraph = JsonReader::new()
            .try_read_graph(r#"{"workers": 2, "tasks": 1}"#.as_bytes())
            .unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn instance_write_then_read() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        for (w, t) in [(0, 0), (2, 5), (8, 8)] {
            for pretty in [false, true] {
                let graph = RandomBipartite::new().workers(w).tasks(t).prob(0.5).generate(rng);

                let mut buffer = Vec::new();
                JsonWriter::new().pretty(pretty).try_write_graph(&graph, &mut buffer).unwrap();

                let read: BipartiteGraph = JsonReader::new().try_read_graph(buffer.as_slice()).unwrap();
                assert_eq!(graph, read);
            }
        }
    }

    #[test]
    fn report_field_names() {
        let graph = BipartiteGraph::from_edges(2, 2, [(1, 1), (2, 1)]);
        let result = graph.maximum_flow_matching().unwrap();

        let mut buffer = Vec::new();
        JsonWriter::new().pretty(false).try_write_report(&result, &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["maxMatching"], 1);
        assert_eq!(value["matches"], serde_json::json!([{"from": 1, "to": 1}]));
        assert_eq!(value["steps"].as_array().unwrap().len(), result.trace().len());
        assert_eq!(value["steps"][0], "Create residual network with source (0) and sink (5)");

        let report: JsonReport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(report.max_matching, result.size());
        assert_eq!(report.steps, result.trace().lines());
    }

    #[test]
    fn report_without_trace() {
        let graph = BipartiteGraph::from_edges(1, 1, [(1, 1)]);
        let result = graph.maximum_bipartite_matching().unwrap();

        let mut buffer = Vec::new();
        JsonWriter::new()
            .include_trace(false)
            .try_write_report(&result, &mut buffer)
            .unwrap();

        let report: JsonReport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(
            report,
            JsonReport {
                max_matching: 1,
                matches: vec![JsonEdge { from: 1, to: 1 }],
                steps: Vec::new(),
            }
        );
    }
}
