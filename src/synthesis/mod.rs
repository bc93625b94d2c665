use tracing::{Level, event, instrument};

use crate::circuit::Circuit;
use crate::error::GatecrackError;
use crate::evaluation::error::EvalError;
use crate::evaluation::evaluate_pattern;
use crate::evaluation::outcomes::Outcomes;
use crate::evaluation::outputs::OutputSpec;
use crate::evaluation::symbol_table::SymbolTable;
use crate::netlist::error::NetlistError;
use crate::synthesis::assignment::KindAssignment;
use crate::synthesis::builder::SynthesisParams;
use crate::synthesis::odometer::KindOdometer;

pub mod assignment;
pub mod builder;
pub mod odometer;

/// Counters for one run of [GateSynthesis::decide].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Steps explored, including the initial assignment.
    pub steps: usize,
    /// Steps whose odometer bump carried and was not evaluated.
    pub skipped: usize,
    /// Trials that evaluated at least one input pattern.
    pub evaluated: usize,
    /// Trials rejected because a gate's wiring did not fit its kind.
    pub structural_rejections: usize,
}

/// An accepted kind assignment.
#[derive(Clone, Debug)]
pub struct Solution {
    pub assignment: KindAssignment,
    /// The netlist's circuit with every unspecified gate replaced by its kind.
    pub circuit: Circuit,
    /// Generated columns equal to the targets.
    pub outputs: OutputSpec,
    pub stats: SearchStats,
}

#[derive(Clone, Debug)]
pub enum DecisionResult {
    AssignmentFound(Solution),
    Unsat(SearchStats),
}

enum Trial {
    Accepted,
    Mismatch,
    NoGates,
    Structural(EvalError),
    Aborted(EvalError),
}

/// Searches the kind assignments of a netlist's unspecified gates for one
/// whose circuit reproduces the target truth table.
pub struct GateSynthesis {
    circuit: Circuit,
    table: SymbolTable,
    outputs: OutputSpec,
    patterns: Outcomes,
    odometer: KindOdometer,
}

impl GateSynthesis {
    #[instrument(skip_all)]
    pub fn new(params: &SynthesisParams) -> Result<Self, GatecrackError> {
        let netlist = &params.netlist;
        let table = netlist.symbol_table()?;
        let patterns = Outcomes::new(netlist.inputs.len()).ok_or(NetlistError::TooManyInputs {
            count: netlist.inputs.len(),
        })?;
        for output in &netlist.outputs {
            if output.target.len() != patterns.len() {
                return Err(GatecrackError::TruthTableLength {
                    name: output.name.to_string(),
                    expected: patterns.len(),
                    found: output.target.len(),
                });
            }
        }
        let unspecified = netlist.circuit.num_unspecified();
        let odometer = KindOdometer::new(unspecified)
            .ok_or(GatecrackError::SearchSpaceOverflow { unspecified })?;
        event!(
            Level::DEBUG,
            "{} unspecified gates, {} odometer steps, {} input patterns",
            unspecified,
            odometer.len(),
            patterns.len()
        );
        Ok(Self {
            circuit: netlist.circuit.clone(),
            table,
            outputs: netlist.output_spec(),
            patterns,
            odometer,
        })
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn odometer(&self) -> &KindOdometer {
        &self.odometer
    }

    /// Runs every input pattern through the circuit under `assignment`,
    /// starting from zeroed generated columns.
    fn trial(&mut self, assignment: &KindAssignment) -> Trial {
        self.outputs.reset();
        let shapes = match self.circuit.shapes(assignment.kinds()) {
            Ok(shapes) => shapes,
            Err(e) => return Trial::Structural(e),
        };
        if shapes.is_empty() {
            return Trial::NoGates;
        }
        for (index, pattern) in self.patterns.clone().enumerate() {
            if let Err(e) = evaluate_pattern(
                &shapes,
                &mut self.table,
                &mut self.outputs,
                index,
                pattern,
            ) {
                return Trial::Aborted(e);
            }
        }
        if self.outputs.matches() {
            Trial::Accepted
        } else {
            Trial::Mismatch
        }
    }

    #[instrument(skip_all)]
    pub fn decide(&mut self) -> DecisionResult {
        let mut assignment = KindAssignment::initial(self.odometer.digits());
        let mut stats = SearchStats::default();
        for step in 0..=self.odometer.len() {
            stats.steps += 1;
            if let Some(previous) = step.checked_sub(1) {
                if self.odometer.advance(previous, &mut assignment) {
                    event!(Level::TRACE, "Step {step}: carried to {assignment}, skipping");
                    stats.skipped += 1;
                    continue;
                }
            }
            event!(Level::DEBUG, "Step {step}: trying {assignment}");
            match self.trial(&assignment) {
                Trial::Accepted => match self.circuit.resolve(assignment.kinds()) {
                    Ok(circuit) => {
                        stats.evaluated += 1;
                        event!(
                            Level::INFO,
                            "{assignment} reproduces the truth table after {} steps",
                            stats.steps
                        );
                        return DecisionResult::AssignmentFound(Solution {
                            assignment,
                            circuit,
                            outputs: self.outputs.clone(),
                            stats,
                        });
                    }
                    Err(e) => {
                        stats.structural_rejections += 1;
                        event!(Level::TRACE, "{assignment} rejected: {e}");
                    }
                },
                Trial::Mismatch => {
                    stats.evaluated += 1;
                    event!(
                        Level::TRACE,
                        "{}",
                        assignment.display_mismatch(&self.outputs)
                    );
                }
                Trial::NoGates => {
                    event!(Level::TRACE, "Circuit has no gates to drive the outputs");
                }
                Trial::Structural(e) => {
                    stats.structural_rejections += 1;
                    event!(Level::TRACE, "{assignment} rejected: {e}");
                }
                Trial::Aborted(e) => {
                    stats.evaluated += 1;
                    event!(Level::TRACE, "{assignment} aborted: {e}");
                }
            }
        }
        event!(
            Level::INFO,
            "No assignment exists after {} steps ({} skipped, {} evaluated, {} structurally rejected)",
            stats.steps,
            stats.skipped,
            stats.evaluated,
            stats.structural_rejections
        );
        DecisionResult::Unsat(stats)
    }
}
