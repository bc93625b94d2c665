use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, event};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use gatecrack::config::GatecrackConfig;
use gatecrack::config::meta::GatecrackLogLevel;
use gatecrack::synthesis::DecisionResult;

/// Printed when no kind assignment reproduces the truth table.
const NO_SOLUTION: &str = "INVALID";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct GatecrackParams {
    /// Netlist with a target truth table and gates of unknown kind
    netlist: PathBuf,
    /// TOML file with [meta] and [report] settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the config's log level
    #[arg(long, value_enum)]
    log_level: Option<GatecrackLogLevel>,
}

fn init_tracing(level: Level) -> anyhow::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .from_env()?
        .add_directive(format!("gatecrack={level}").parse()?);
    let indicatif_layer = IndicatifLayer::new();
    let writer = indicatif_layer.get_stderr_writer();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(indicatif_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let params = GatecrackParams::parse();
    let mut config = match &params.config {
        Some(path) => GatecrackConfig::load(path)?,
        None => GatecrackConfig::default(),
    };
    if let Some(level) = params.log_level {
        config.meta.log_level = level;
    }
    init_tracing(Level::from(config.meta.log_level))?;

    let mut synthesis = config.resolve(&params.netlist)?.build()?;
    match synthesis.decide() {
        DecisionResult::AssignmentFound(solution) => {
            event!(Level::INFO, "Synthesis successful :)");
            print!("{}", solution.assignment.report());
            if config.report.show_circuit {
                print!("{}", solution.circuit);
            }
            if config.report.show_truth_table {
                print!("{}", solution.outputs);
            }
        }
        DecisionResult::Unsat(stats) => {
            event!(Level::INFO, "Synthesis unsuccessful: {:?}", stats);
            print!("{NO_SOLUTION}");
        }
    }
    Ok(())
}
