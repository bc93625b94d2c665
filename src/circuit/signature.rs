use std::sync::Arc;

use crate::circuit::kind::GateKind;
use crate::evaluation::error::EvalError;

pub type SignalName = Arc<str>;

/// The raw wiring of a gate line: names only, no arity guarantees.
///
/// Declared gates and unspecified gates both carry one of these; it only
/// becomes a [GateShape] once a [GateKind] has been chosen for it and the
/// counts have been checked against that kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateSignature {
    pub inputs: Vec<SignalName>,
    pub outputs: Vec<SignalName>,
    pub selectors: Vec<SignalName>,
}

impl GateSignature {
    pub fn new<I, O>(inputs: I, outputs: O) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SignalName>,
        O: IntoIterator,
        O::Item: Into<SignalName>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
            selectors: vec![],
        }
    }

    pub fn with_selectors<S>(mut self, selectors: S) -> Self
    where
        S: IntoIterator,
        S::Item: Into<SignalName>,
    {
        self.selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    fn mismatch(&self, kind: GateKind) -> EvalError {
        EvalError::StructuralMismatch {
            kind,
            inputs: self.inputs.len(),
            outputs: self.outputs.len(),
            selectors: self.selectors.len(),
        }
    }

    fn binary(&self, kind: GateKind) -> Result<([SignalName; 2], SignalName), EvalError> {
        match (
            self.inputs.as_slice(),
            self.outputs.as_slice(),
            self.selectors.is_empty(),
        ) {
            ([a, b], [out], true) => Ok(([a.clone(), b.clone()], out.clone())),
            _ => Err(self.mismatch(kind)),
        }
    }

    /// Checks this wiring against `kind` and produces the evaluable shape.
    pub fn shape(&self, kind: GateKind) -> Result<GateShape, EvalError> {
        match kind {
            GateKind::Or => {
                let (inputs, output) = self.binary(kind)?;
                Ok(GateShape::Or { inputs, output })
            }
            GateKind::And => {
                let (inputs, output) = self.binary(kind)?;
                Ok(GateShape::And { inputs, output })
            }
            GateKind::Xor => {
                let (inputs, output) = self.binary(kind)?;
                Ok(GateShape::Xor { inputs, output })
            }
            GateKind::Not => match (
                self.inputs.as_slice(),
                self.outputs.as_slice(),
                self.selectors.is_empty(),
            ) {
                ([input], [output], true) => Ok(GateShape::Not {
                    input: input.clone(),
                    output: output.clone(),
                }),
                _ => Err(self.mismatch(kind)),
            },
            GateKind::Decoder => {
                let width = address_width(self.inputs.len()).ok_or_else(|| self.mismatch(kind))?;
                if self.inputs.is_empty() || self.outputs.len() != width || !self.selectors.is_empty()
                {
                    return Err(self.mismatch(kind));
                }
                Ok(GateShape::Decoder {
                    address: self.inputs.clone(),
                    outputs: self.outputs.clone(),
                })
            }
            GateKind::Multiplexer => {
                let [output] = self.outputs.as_slice() else {
                    return Err(self.mismatch(kind));
                };
                if self.inputs.len() < 2 {
                    return Err(self.mismatch(kind));
                }
                let selectors = if self.selectors.is_empty() {
                    let count = trailing_selector_count(self.inputs.len())
                        .ok_or_else(|| self.mismatch(kind))?;
                    Selectors::Trailing(count)
                } else {
                    // every selectable position must exist among the data inputs
                    match address_width(self.selectors.len()) {
                        Some(width) if width <= self.inputs.len() => {}
                        _ => return Err(self.mismatch(kind)),
                    }
                    Selectors::Explicit(self.selectors.clone())
                };
                Ok(GateShape::Multiplexer {
                    inputs: self.inputs.clone(),
                    selectors,
                    output: output.clone(),
                })
            }
        }
    }
}

/// `2^bits`, or `None` when that does not fit in a `usize`.
pub(crate) fn address_width(bits: usize) -> Option<usize> {
    u32::try_from(bits)
        .ok()
        .filter(|b| *b < usize::BITS - 1)
        .map(|b| 1usize << b)
}

/// The unique `s` with `2^s + s == inputs`, used when a multiplexer's
/// selectors are folded into the tail of its input list.
pub fn trailing_selector_count(inputs: usize) -> Option<usize> {
    if inputs < 3 {
        return None;
    }
    let mut s = 1;
    loop {
        let total = address_width(s)?.checked_add(s)?;
        if total >= inputs {
            return (total == inputs).then_some(s);
        }
        s += 1;
    }
}

/// Where a multiplexer reads its address bits from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selectors {
    /// Dedicated selector signals, most significant first.
    Explicit(Vec<SignalName>),
    /// The last `n` data inputs double as the selectors.
    Trailing(usize),
}

/// A gate whose arity has been validated for its kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateShape {
    Or {
        inputs: [SignalName; 2],
        output: SignalName,
    },
    And {
        inputs: [SignalName; 2],
        output: SignalName,
    },
    Xor {
        inputs: [SignalName; 2],
        output: SignalName,
    },
    Not {
        input: SignalName,
        output: SignalName,
    },
    Decoder {
        address: Vec<SignalName>,
        outputs: Vec<SignalName>,
    },
    Multiplexer {
        inputs: Vec<SignalName>,
        selectors: Selectors,
        output: SignalName,
    },
}

impl GateShape {
    pub fn kind(&self) -> GateKind {
        match self {
            GateShape::Or { .. } => GateKind::Or,
            GateShape::And { .. } => GateKind::And,
            GateShape::Xor { .. } => GateKind::Xor,
            GateShape::Not { .. } => GateKind::Not,
            GateShape::Decoder { .. } => GateKind::Decoder,
            GateShape::Multiplexer { .. } => GateKind::Multiplexer,
        }
    }

    pub fn outputs(&self) -> &[SignalName] {
        match self {
            GateShape::Or { output, .. }
            | GateShape::And { output, .. }
            | GateShape::Xor { output, .. }
            | GateShape::Not { output, .. }
            | GateShape::Multiplexer { output, .. } => std::slice::from_ref(output),
            GateShape::Decoder { outputs, .. } => outputs,
        }
    }
}
