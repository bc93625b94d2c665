use std::fmt::{Display, Formatter};

use crate::circuit::kind::GateKind;
use crate::circuit::signature::{GateShape, GateSignature, Selectors};
use crate::circuit::{Circuit, Gate};

fn write_names<'a, T: IntoIterator<Item = &'a std::sync::Arc<str>>>(
    f: &mut Formatter<'_>,
    names: T,
) -> std::fmt::Result {
    for name in names {
        write!(f, " {name}")?;
    }
    Ok(())
}

fn write_declared(
    f: &mut Formatter<'_>,
    kind: GateKind,
    signature: &GateSignature,
) -> std::fmt::Result {
    match signature.shape(kind) {
        Ok(GateShape::Or { inputs, output })
        | Ok(GateShape::And { inputs, output })
        | Ok(GateShape::Xor { inputs, output }) => {
            write!(f, "{kind}")?;
            write_names(f, inputs.iter().chain([&output]))
        }
        Ok(GateShape::Not { input, output }) => write!(f, "{kind} {input} {output}"),
        Ok(GateShape::Decoder { address, outputs }) => {
            write!(f, "{kind} {}", address.len())?;
            write_names(f, address.iter().chain(&outputs))
        }
        Ok(GateShape::Multiplexer {
            inputs,
            selectors: Selectors::Explicit(selectors),
            output,
        }) => {
            write!(f, "{kind} {}", inputs.len())?;
            write_names(f, inputs.iter().chain(&selectors).chain([&output]))
        }
        // written with explicit selectors so the line reads back the same way
        Ok(GateShape::Multiplexer {
            inputs,
            selectors: Selectors::Trailing(count),
            output,
        }) => {
            write!(f, "{kind} {}", inputs.len() - count)?;
            write_names(f, inputs.iter().chain([&output]))
        }
        Err(_) => {
            write!(
                f,
                "{kind} {}",
                signature.inputs.len() + signature.outputs.len() + signature.selectors.len()
            )?;
            write_names(
                f,
                signature
                    .inputs
                    .iter()
                    .chain(&signature.selectors)
                    .chain(&signature.outputs),
            )
        }
    }
}

impl Display for Gate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Gate::Declared { kind, signature } => write_declared(f, *kind, signature),
            Gate::Unspecified { label, signature } => {
                write!(
                    f,
                    "{label} {}",
                    signature.inputs.len() + signature.outputs.len()
                )?;
                write_names(f, signature.inputs.iter().chain(&signature.outputs))
            }
        }
    }
}

impl Display for Circuit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for gate in &self.gates {
            writeln!(f, "{gate}")?;
        }
        Ok(())
    }
}
