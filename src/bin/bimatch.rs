use std::{
    io::{BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use bimatch::{io::*, prelude::*};
use clap::Parser;
use log::{LevelFilter, error, info};

/// Computes a maximum assignment of workers to tasks
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    /// Solver to use: `hopcroft-karp` (`hk`) or `edmonds-karp` (`ek`)
    #[clap(value_parser, required = true)]
    algorithm: Algorithm,

    /// Instance file (`p assign <workers> <tasks> <edges>` followed by one `<worker> <task>` line per edge,
    /// or a JSON document with `workers`, `tasks` and `edges`)
    #[clap(value_parser, required = true)]
    input: PathBuf,

    /// Report file; the report is written to stdout if omitted
    #[clap(value_parser)]
    output: Option<PathBuf>,

    /// Format of instance and report: `instance` or `json`.
    /// If omitted, it is derived from the file extensions (`.json`)
    #[clap(short, long, value_parser)]
    format: Option<FileFormat>,

    /// Additionally write a GraphViz rendering with the assignment highlighted
    #[clap(long, value_parser)]
    dot: Option<PathBuf>,

    /// Do not record the solver trace
    #[clap(long)]
    no_trace: bool,

    /// Fail on instances without edges
    #[clap(long)]
    reject_empty: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> std::io::Result<()> {
    let input_format = args
        .format
        .unwrap_or_else(|| FileFormat::from_path(&args.input));
    let output_format = args.format.unwrap_or_else(|| match &args.output {
        Some(path) => FileFormat::from_path(path),
        None => input_format,
    });

    let graph = BipartiteGraph::try_read_graph_file(&args.input, input_format)?;
    info!(
        "Read {input_format:?} instance {:?} with {} workers, {} tasks and {} edges",
        args.input,
        graph.number_of_workers(),
        graph.number_of_tasks(),
        graph.number_of_edges()
    );

    let config = SolverConfig::new()
        .record_trace(!args.no_trace)
        .reject_empty(args.reject_empty);
    let result = args.algorithm.solve_with(&graph, config)?;
    info!("{} found an assignment of size {}", args.algorithm, result.size());

    match (&args.output, output_format) {
        (Some(path), FileFormat::Instance) => {
            ReportWriter::new().try_write_report_file(args.algorithm, &result, path)?
        }
        (Some(path), FileFormat::Json) => JsonWriter::new().try_write_report_file(&result, path)?,
        (None, format) => {
            let mut stdout = BufWriter::new(std::io::stdout().lock());
            match format {
                FileFormat::Instance => {
                    ReportWriter::new().try_write_report(args.algorithm, &result, &mut stdout)?
                }
                FileFormat::Json => JsonWriter::new().try_write_report(&result, &mut stdout)?,
            }
            stdout.flush()?;
        }
    }

    if let Some(path) = &args.dot {
        DotWriter::new().try_write_assignment_file(&graph, result.pairs(), path)?;
        info!("Wrote GraphViz rendering to {path:?}");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
