use crate::circuit::kind::GateKind;
use crate::circuit::signature::{GateShape, GateSignature};
use crate::evaluation::error::EvalError;

mod display;
pub mod kind;
pub mod signature;

/// One line of the netlist's gate section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    /// A gate whose function is given by the netlist.
    Declared {
        kind: GateKind,
        signature: GateSignature,
    },
    /// A gate whose function is searched for. The signature was partitioned
    /// into inputs and outputs by which names were already known.
    Unspecified {
        label: String,
        signature: GateSignature,
    },
}

impl Gate {
    pub fn signature(&self) -> &GateSignature {
        match self {
            Gate::Declared { signature, .. } | Gate::Unspecified { signature, .. } => signature,
        }
    }

    pub fn kind(&self) -> Option<GateKind> {
        match self {
            Gate::Declared { kind, .. } => Some(*kind),
            Gate::Unspecified { .. } => None,
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Gate::Unspecified { .. })
    }
}

/// The gate network in evaluation order, which is the order the gates
/// appeared in the netlist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Circuit {
    gates: Vec<Gate>,
    unspecified: Vec<usize>,
}

impl Circuit {
    pub fn new(gates: Vec<Gate>) -> Self {
        let unspecified = gates
            .iter()
            .enumerate()
            .filter(|(_, g)| g.is_unspecified())
            .map(|(i, _)| i)
            .collect();
        Self { gates, unspecified }
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Positions (in [Circuit::gates]) of the unspecified gates, in netlist order.
    pub fn unspecified_indices(&self) -> &[usize] {
        &self.unspecified
    }

    pub fn num_unspecified(&self) -> usize {
        self.unspecified.len()
    }

    pub fn unspecified_labels(&self) -> impl Iterator<Item = &str> {
        self.unspecified.iter().filter_map(|i| match &self.gates[*i] {
            Gate::Unspecified { label, .. } => Some(label.as_str()),
            Gate::Declared { .. } => None,
        })
    }

    /// Validates every gate against its kind, taking the kind of the `n`th
    /// unspecified gate from `kinds[n]`.
    pub fn shapes(&self, kinds: &[GateKind]) -> Result<Vec<GateShape>, EvalError> {
        let mut slot = 0;
        let mut shapes = Vec::with_capacity(self.gates.len());
        for (index, gate) in self.gates.iter().enumerate() {
            let kind = match gate {
                Gate::Declared { kind, .. } => *kind,
                Gate::Unspecified { .. } => {
                    let kind = kinds
                        .get(slot)
                        .copied()
                        .ok_or(EvalError::UnassignedGate { index })?;
                    slot += 1;
                    kind
                }
            };
            shapes.push(gate.signature().shape(kind)?);
        }
        Ok(shapes)
    }

    /// A copy of this circuit with each unspecified gate turned into a
    /// declared gate of the corresponding kind from `kinds`.
    pub fn resolve(&self, kinds: &[GateKind]) -> Result<Circuit, EvalError> {
        let mut slot = 0;
        let mut gates = Vec::with_capacity(self.gates.len());
        for (index, gate) in self.gates.iter().enumerate() {
            let resolved = match gate {
                Gate::Declared { .. } => gate.clone(),
                Gate::Unspecified { signature, .. } => {
                    let kind = kinds
                        .get(slot)
                        .copied()
                        .ok_or(EvalError::UnassignedGate { index })?;
                    slot += 1;
                    Gate::Declared {
                        kind,
                        signature: signature.clone(),
                    }
                }
            };
            gates.push(resolved);
        }
        Ok(Circuit::new(gates))
    }
}
