use crate::circuit::kind::GateKind;
use crate::circuit::signature::{GateShape, Selectors, SignalName};
use crate::evaluation::error::EvalError;
use crate::evaluation::outcomes::Outcomes;
use crate::evaluation::outputs::OutputSpec;
use crate::evaluation::symbol_table::SymbolTable;

pub mod error;
pub mod outcomes;
pub mod outputs;
pub mod symbol_table;

/// Sends a gate result either to its declared output column or, for an
/// intermediate signal, into the symbol table. Never both.
fn drive(
    name: &SignalName,
    value: bool,
    table: &mut SymbolTable,
    outputs: &mut OutputSpec,
    pattern: usize,
) -> Result<(), EvalError> {
    if outputs.record(name, value, pattern) {
        Ok(())
    } else {
        table.append(name.clone(), value)
    }
}

/// The pattern in `0..2^names.len()` whose bits (most significant first)
/// equal the current values of `names`.
fn select(
    kind: GateKind,
    names: &[SignalName],
    table: &SymbolTable,
) -> Result<Option<usize>, EvalError> {
    let bits = names.len();
    let outcomes = Outcomes::new(bits).ok_or(EvalError::StructuralMismatch {
        kind,
        inputs: bits,
        outputs: 0,
        selectors: 0,
    })?;
    Ok(outcomes.into_iter().find(|p| {
        names
            .iter()
            .enumerate()
            .all(|(i, name)| Outcomes::bit(*p, bits, i) == table.lookup(name))
    }))
}

/// Evaluates one gate for input pattern `pattern`.
pub fn evaluate(
    gate: &GateShape,
    table: &mut SymbolTable,
    outputs: &mut OutputSpec,
    pattern: usize,
) -> Result<(), EvalError> {
    match gate {
        GateShape::Or { inputs: [a, b], output } => {
            let value = table.lookup(a) | table.lookup(b);
            drive(output, value, table, outputs, pattern)
        }
        GateShape::And { inputs: [a, b], output } => {
            let value = table.lookup(a) & table.lookup(b);
            drive(output, value, table, outputs, pattern)
        }
        GateShape::Xor { inputs: [a, b], output } => {
            let value = table.lookup(a) ^ table.lookup(b);
            drive(output, value, table, outputs, pattern)
        }
        GateShape::Not { input, output } => {
            let value = !table.lookup(input);
            drive(output, value, table, outputs, pattern)
        }
        GateShape::Decoder {
            address,
            outputs: lines,
        } => {
            let hot = select(GateKind::Decoder, address, table)?;
            for (line, name) in lines.iter().enumerate() {
                drive(name, hot == Some(line), table, outputs, pattern)?;
            }
            Ok(())
        }
        GateShape::Multiplexer {
            inputs,
            selectors,
            output,
        } => {
            let select_lines = match selectors {
                Selectors::Explicit(names) => names.as_slice(),
                Selectors::Trailing(count) => &inputs[inputs.len() - count..],
            };
            // no pattern matched cannot happen for boolean selects; leave the
            // output unbound like an unresolved signal
            if let Some(chosen) = select(GateKind::Multiplexer, select_lines, table)? {
                let value = inputs.get(chosen).map(|n| table.lookup(n)).unwrap_or(false);
                drive(output, value, table, outputs, pattern)?;
            }
            Ok(())
        }
    }
}

/// Loads `pattern` into `table` and evaluates every gate in order, stopping
/// at the first failure.
pub fn evaluate_pattern(
    gates: &[GateShape],
    table: &mut SymbolTable,
    outputs: &mut OutputSpec,
    pattern_index: usize,
    pattern: usize,
) -> Result<(), EvalError> {
    table.load_pattern(pattern);
    for gate in gates {
        evaluate(gate, table, outputs, pattern_index)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::circuit::kind::GateKind;
    use crate::circuit::signature::{GateShape, GateSignature, SignalName};
    use crate::evaluation::evaluate;
    use crate::evaluation::outputs::{OutputSpec, OutputVector};
    use crate::evaluation::symbol_table::SymbolTable;

    fn table_with(bindings: &[(&str, bool)]) -> SymbolTable {
        let mut t = SymbolTable::new(Vec::<SignalName>::new()).unwrap();
        for (name, value) in bindings {
            t.append((*name).into(), *value).unwrap();
        }
        t
    }

    fn shape(kind: GateKind, sig: GateSignature) -> GateShape {
        sig.shape(kind).unwrap()
    }

    #[test]
    fn test_binary_gates() {
        let sig = GateSignature::new(["a", "b"], ["z"]);
        for (kind, expected) in [
            (GateKind::Or, [false, true, true, true]),
            (GateKind::And, [false, false, false, true]),
            (GateKind::Xor, [false, true, true, false]),
        ] {
            for (i, want) in expected.iter().enumerate() {
                let mut t = table_with(&[("a", i & 2 != 0), ("b", i & 1 != 0)]);
                let mut o = OutputSpec::default();
                evaluate(&shape(kind, sig.clone()), &mut t, &mut o, 0).unwrap();
                assert_eq!(t.lookup("z"), *want, "{kind} on pattern {i}");
            }
        }
    }

    #[test]
    fn test_not() {
        let sig = GateSignature::new(["a"], ["z"]);
        let mut t = table_with(&[("a", false)]);
        let mut o = OutputSpec::default();
        evaluate(&shape(GateKind::Not, sig), &mut t, &mut o, 0).unwrap();
        assert!(t.lookup("z"));
    }

    #[test]
    fn test_final_output_is_not_bound() {
        let sig = GateSignature::new(["a", "b"], ["Z"]);
        let mut t = table_with(&[("a", true), ("b", false)]);
        let mut o = OutputSpec::new([OutputVector::new("Z".into(), vec![false, true])]);
        evaluate(&shape(GateKind::Or, sig), &mut t, &mut o, 1).unwrap();
        assert!(!t.contains("Z"));
        assert_eq!(o.outputs()[0].generated, vec![false, true]);
        assert!(o.matches());
    }

    #[test]
    fn test_decoder_one_hot() {
        let sig = GateSignature::new(["a1", "a0"], ["o0", "o1", "o2", "o3"]);
        let mut t = table_with(&[("a1", true), ("a0", false)]);
        let mut o = OutputSpec::default();
        evaluate(&shape(GateKind::Decoder, sig), &mut t, &mut o, 0).unwrap();
        assert!(!t.lookup("o0"));
        assert!(!t.lookup("o1"));
        assert!(t.lookup("o2"));
        assert!(!t.lookup("o3"));
        // all outputs were written
        assert!(["o0", "o1", "o2", "o3"].iter().all(|n| t.contains(n)));
    }

    #[test]
    fn test_decoder_into_final_outputs() {
        let sig = GateSignature::new(["a"], ["Y", "Z"]);
        let mut t = table_with(&[("a", true)]);
        let mut o = OutputSpec::new([
            OutputVector::new("Y".into(), vec![true, false]),
            OutputVector::new("Z".into(), vec![false, true]),
        ]);
        evaluate(&shape(GateKind::Decoder, sig), &mut t, &mut o, 1).unwrap();
        assert_eq!(o.outputs()[0].generated, vec![false, false]);
        assert_eq!(o.outputs()[1].generated, vec![false, true]);
    }

    #[test]
    fn test_multiplexer_explicit_selectors() {
        let sig = GateSignature::new(["d0", "d1", "d2", "d3"], ["z"]).with_selectors(["s1", "s0"]);
        for d1 in [false, true] {
            let mut t = table_with(&[
                ("d0", !d1),
                ("d1", d1),
                ("d2", !d1),
                ("d3", !d1),
                ("s1", false),
                ("s0", true),
            ]);
            let mut o = OutputSpec::default();
            evaluate(&shape(GateKind::Multiplexer, sig.clone()), &mut t, &mut o, 0).unwrap();
            assert_eq!(t.lookup("z"), d1);
        }
    }

    #[test]
    fn test_multiplexer_trailing_selectors() {
        let sig = GateSignature::new(["d0", "d1", "d2", "d3", "s1", "s0"], ["z"]);
        let gate = shape(GateKind::Multiplexer, sig);
        for select in 0..4usize {
            let mut bindings: Vec<(&str, bool)> = ["d0", "d1", "d2", "d3"]
                .iter()
                .enumerate()
                .map(|(i, n)| (*n, i == select))
                .collect();
            bindings.push(("s1", select & 2 != 0));
            bindings.push(("s0", select & 1 != 0));
            let mut t = table_with(&bindings);
            let mut o = OutputSpec::default();
            evaluate(&gate, &mut t, &mut o, 0).unwrap();
            assert!(t.lookup("z"), "select {select}");
        }
    }

    #[test]
    fn test_rebinding_fails() {
        let sig = GateSignature::new(["a", "b"], ["a"]);
        let mut t = table_with(&[("a", true), ("b", true)]);
        let mut o = OutputSpec::default();
        assert!(evaluate(&shape(GateKind::And, sig), &mut t, &mut o, 0).is_err());
    }
}
