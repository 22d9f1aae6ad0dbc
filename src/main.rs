use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use netlist_rs::config::{TableConfig, DEFAULT_MAX_INPUTS};
use netlist_rs::graph::NodeGraph;
use netlist_rs::parser;
use netlist_rs::render;
use netlist_rs::table::TruthTable;

#[derive(Parser)]
#[command(author, version, about = "Print the truth table of a combinational netlist")]
struct Cli {
    /// Netlist file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Evaluate rows on all cores (the whole table is kept in memory)
    #[arg(long)]
    parallel: bool,

    /// Refuse netlists with more INPUT nodes than this
    #[arg(
        long,
        value_name = "INT",
        default_value_t = DEFAULT_MAX_INPUTS,
        value_parser = clap::value_parser!(u32).range(0..=63),
    )]
    max_inputs: u32,

    /// Also write the netlist as a Graphviz DOT file
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,

    /// More log output on stderr (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> simplelog::LevelFilter {
        if self.quiet {
            return simplelog::LevelFilter::Error;
        }
        match self.verbose {
            0 => simplelog::LevelFilter::Warn,
            1 => simplelog::LevelFilter::Info,
            2 => simplelog::LevelFilter::Debug,
            _ => simplelog::LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Logs go to stderr: stdout carries only the table.
    simplelog::TermLogger::init(
        cli.log_level(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let nodes = parser::load(&cli.input).wrap_err("Failed to load netlist")?;
    let graph = NodeGraph::new(nodes).wrap_err("Invalid netlist")?;
    log::info!(
        "Loaded {} nodes ({} inputs, {} outputs)",
        graph.len(),
        graph.input_nodes().len(),
        graph.output_nodes().len()
    );

    if let Some(path) = &cli.dot {
        let dot = graph.to_dot()?;
        std::fs::write(path, dot).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        log::info!("DOT in {}", path.display());
    }

    let config = TableConfig::default().with_max_inputs(cli.max_inputs);
    let table = TruthTable::with_config(&graph, config).wrap_err("Cannot build truth table")?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if cli.parallel {
        let rows = table.par_rows().wrap_err("Evaluation failed")?;
        render::write_rows(&mut out, &table, rows.into_iter().map(Ok))?;
    } else {
        render::write_table(&mut out, &table).wrap_err("Evaluation failed")?;
    }
    out.flush()?;

    log::info!(
        "{} rows in {:.3} s",
        table.num_rows(),
        time_total.elapsed().as_secs_f64()
    );

    Ok(())
}
