use thiserror::Error;

use crate::config::error::GatecrackConfigError;
use crate::netlist::error::NetlistError;
use crate::synthesis::builder::SynthesisParamsBuilderError;

#[derive(Debug, Error)]
pub enum GatecrackError {
    #[error("Netlist error: {0}")]
    Netlist(#[from] NetlistError),
    #[error("Config error: {0}")]
    Config(#[from] GatecrackConfigError),
    #[error("Invalid synthesis params")]
    SynthesisParams(#[from] SynthesisParamsBuilderError),
    #[error("Output '{name}' has {found} truth table entries, expected {expected}")]
    TruthTableLength {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("{unspecified} unspecified gates are too many to enumerate")]
    SearchSpaceOverflow { unspecified: usize },
}
