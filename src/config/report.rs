use serde::{Deserialize, Serialize};

/// What the binary prints beyond the per-gate kinds once a solution is found.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportConfig {
    /// The circuit with every unspecified gate resolved, in netlist syntax.
    #[serde(default)]
    pub show_circuit: bool,
    /// One row per output holding its generated truth table column.
    #[serde(default)]
    pub show_truth_table: bool,
}
