use thiserror::Error;

use crate::circuit::kind::GateKind;
use crate::circuit::signature::SignalName;

/// Failures local to a single trial. The search recovers from all of these by
/// rejecting the trial and moving on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error(
        "{kind} gate cannot take {inputs} input(s), {outputs} output(s) and {selectors} selector(s)"
    )]
    StructuralMismatch {
        kind: GateKind,
        inputs: usize,
        outputs: usize,
        selectors: usize,
    },
    #[error("Signal '{0}' is already bound")]
    SignalAlreadyBound(SignalName),
    #[error("Unspecified gate #{index} has no kind assigned")]
    UnassignedGate { index: usize },
}
