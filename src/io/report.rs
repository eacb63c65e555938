//! # Reports
//!
//! A report describes the outcome of a solver run:
//! ```text
//! s <algorithm> <size> [<flow value>]
//! m <worker> <task>
//! c <trace line>
//! ```
//! The solution line is followed by one `m`-line per matched pair (sorted by worker) and,
//! if enabled, one comment line per trace entry.

use super::*;

/// A writer for solver reports
#[derive(Debug, Clone)]
pub struct ReportWriter {
    /// Append the trace of the solver as comment lines
    include_trace: bool,
    /// Prefix of trace lines
    comment_identifier: String,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self {
            include_trace: true,
            comment_identifier: "c".to_string(),
        }
    }
}

impl ReportWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// If *false*, the trace is omitted even if the result carries one
    pub fn include_trace(mut self, include_trace: bool) -> Self {
        self.include_trace = include_trace;
        self
    }

    /// Updates the comment identifier used for trace lines
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> Self {
        self.comment_identifier = c.into();
        self
    }

    /// Writes the report of `result` computed by `algorithm` to `writer`
    pub fn try_write_report<W>(
        &self,
        algorithm: Algorithm,
        result: &MatchingResult,
        mut writer: W,
    ) -> Result<()>
    where
        W: Write,
    {
        write!(writer, "s {algorithm} {}", result.size())?;
        if let Some(flow) = result.flow_value() {
            write!(writer, " {flow}")?;
        }
        writeln!(writer)?;

        for Edge(worker, task) in result.pairs() {
            writeln!(writer, "m {worker} {task}")?;
        }

        if self.include_trace {
            for line in result.trace() {
                writeln!(writer, "{} {line}", self.comment_identifier)?;
            }
        }

        writer.flush()
    }

    /// Writes the report to a file
    pub fn try_write_report_file<P>(
        &self,
        algorithm: Algorithm,
        result: &MatchingResult,
        path: P,
    ) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.try_write_report(algorithm, result, BufWriter::new(File::create(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(algorithm: Algorithm, result: &MatchingResult, writer: ReportWriter) -> String {
        let mut buffer = Vec::new();
        writer.try_write_report(algorithm, result, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn matching_report() {
        let graph = BipartiteGraph::from_edges(2, 2, [(1, 1), (2, 2)]);
        let result = graph.maximum_bipartite_matching().unwrap();

        let text = report(Algorithm::HopcroftKarp, &result, ReportWriter::new());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[..3], ["s hopcroft-karp 2", "m 1 1", "m 2 2"]);
        assert_eq!(lines.len(), 3 + result.trace().len());
        assert!(lines[3..].iter().all(|l| l.starts_with("c ")));
        assert_eq!(lines.last(), Some(&"c Maximum bipartite matching size = 2"));
    }

    #[test]
    fn flow_report_without_trace() {
        let graph = BipartiteGraph::from_edges(2, 1, [(1, 1), (2, 1)]);
        let result = graph.maximum_flow_matching().unwrap();

        let text = report(
            Algorithm::EdmondsKarp,
            &result,
            ReportWriter::new().include_trace(false),
        );
        assert_eq!(text, "s edmonds-karp 1 1\nm 1 1\n");
    }

    #[test]
    fn empty_report() {
        let graph = BipartiteGraph::new(0, 0);
        let result = graph.maximum_bipartite_matching().unwrap();

        let text = report(
            Algorithm::HopcroftKarp,
            &result,
            ReportWriter::new().comment_identifier("#"),
        );
        assert!(text.starts_with("s hopcroft-karp 0\n# "));
    }
}
