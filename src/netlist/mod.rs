use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::{Level, event};

use crate::circuit::kind::GateKind;
use crate::circuit::signature::{GateSignature, SignalName, address_width};
use crate::circuit::{Circuit, Gate};
use crate::evaluation::error::EvalError;
use crate::evaluation::outputs::{OutputSpec, OutputVector};
use crate::evaluation::symbol_table::{CONSTANT_HIGH, CONSTANT_LOW, SymbolTable};
use crate::netlist::error::NetlistError;

pub mod error;

const INPUT_HEADER: &str = "INPUTVAR";
const OUTPUT_HEADER: &str = "OUTPUTVAR";
const TRUTH_TABLE_HEADER: &str = "OUTPUTVAL";

/// A parsed netlist: the primary inputs, the target truth table of every
/// declared output, and the gate network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Netlist {
    pub inputs: Vec<SignalName>,
    pub outputs: Vec<OutputVector>,
    pub circuit: Circuit,
}

impl Netlist {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NetlistError> {
        let text = fs::read_to_string(path)?;
        text.parse()
    }

    /// A symbol table holding just the primary inputs and the constants.
    pub fn symbol_table(&self) -> Result<SymbolTable, NetlistError> {
        SymbolTable::new(self.inputs.iter().cloned()).map_err(|e| match e {
            EvalError::SignalAlreadyBound(name) => NetlistError::DuplicateSignal {
                name: name.to_string(),
            },
            e => NetlistError::SymbolTable(e),
        })
    }

    pub fn output_spec(&self) -> OutputSpec {
        OutputSpec::new(self.outputs.iter().cloned())
    }
}

struct Line<'a> {
    number: usize,
    tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    fn expect_len(&self, expected: usize) -> Result<(), NetlistError> {
        if self.tokens.len() != expected {
            return Err(NetlistError::TokenCount {
                line: self.number,
                expected,
                found: self.tokens.len(),
            });
        }
        Ok(())
    }

    /// Like [Line::expect_len] for a length given as a sum of parts. A sum
    /// that overflows can only come from an absurd count token.
    fn expect_len_sum(&self, parts: &[usize]) -> Result<(), NetlistError> {
        let expected = parts
            .iter()
            .try_fold(0usize, |total, part| total.checked_add(*part))
            .ok_or_else(|| NetlistError::InvalidCount {
                line: self.number,
                token: self.tokens.get(1).unwrap_or(&"").to_string(),
            })?;
        self.expect_len(expected)
    }

    fn count(&self) -> Result<usize, NetlistError> {
        let token = self.tokens.get(1).ok_or(NetlistError::TokenCount {
            line: self.number,
            expected: 2,
            found: self.tokens.len(),
        })?;
        token.parse().map_err(|_| NetlistError::InvalidCount {
            line: self.number,
            token: token.to_string(),
        })
    }

    fn header(&self, expected: &'static str) -> Result<&[&'a str], NetlistError> {
        if self.tokens.first() != Some(&expected) {
            return Err(NetlistError::MissingHeader {
                line: self.number,
                expected,
            });
        }
        let count = self.count()?;
        self.expect_len_sum(&[2, count])?;
        Ok(&self.tokens[2..])
    }
}

fn names(tokens: &[&str]) -> Vec<SignalName> {
    tokens.iter().map(|t| SignalName::from(*t)).collect()
}

fn parse_row(line: &Line, name: &SignalName, patterns: usize) -> Result<Vec<bool>, NetlistError> {
    line.expect_len(patterns + 1)?;
    if line.tokens[0] != &**name {
        event!(
            Level::WARN,
            "Line {}: truth table row labelled '{}' is taken as output '{}'",
            line.number,
            line.tokens[0],
            name
        );
    }
    line.tokens[1..]
        .iter()
        .map(|t| match *t {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(NetlistError::InvalidBit {
                line: line.number,
                token: t.to_string(),
            }),
        })
        .collect()
}

/// Parses one gate line, recording the names it introduces in `known`.
fn parse_gate(line: &Line, known: &mut HashSet<String>) -> Result<Gate, NetlistError> {
    let tokens = &line.tokens;
    let gate = match tokens[0].parse::<GateKind>() {
        Ok(kind @ (GateKind::Or | GateKind::And | GateKind::Xor)) => {
            line.expect_len(4)?;
            Gate::Declared {
                kind,
                signature: GateSignature::new(names(&tokens[1..3]), names(&tokens[3..])),
            }
        }
        Ok(GateKind::Not) => {
            line.expect_len(3)?;
            Gate::Declared {
                kind: GateKind::Not,
                signature: GateSignature::new(names(&tokens[1..2]), names(&tokens[2..])),
            }
        }
        Ok(GateKind::Decoder) => {
            let width = line.count()?;
            let lines = address_width(width).ok_or(NetlistError::DecoderTooWide {
                line: line.number,
                width,
            })?;
            line.expect_len_sum(&[2, width, lines])?;
            let (address, outputs) = tokens[2..].split_at(width);
            Gate::Declared {
                kind: GateKind::Decoder,
                signature: GateSignature::new(names(address), names(outputs)),
            }
        }
        Ok(GateKind::Multiplexer) => {
            let data = line.count()?;
            let selectors = data.checked_ilog2().unwrap_or(0) as usize;
            line.expect_len_sum(&[2, data, selectors, 1])?;
            let (inputs, rest) = tokens[2..].split_at(data);
            let (selectors, output) = rest.split_at(selectors);
            Gate::Declared {
                kind: GateKind::Multiplexer,
                signature: GateSignature::new(names(inputs), names(output))
                    .with_selectors(names(selectors)),
            }
        }
        Err(()) => {
            let total = line.count()?;
            line.expect_len_sum(&[2, total])?;
            let (inputs, outputs): (Vec<&str>, Vec<&str>) =
                tokens[2..].iter().partition(|t| known.contains(**t));
            Gate::Unspecified {
                label: tokens[0].to_string(),
                signature: GateSignature::new(inputs, outputs),
            }
        }
    };
    for output in &gate.signature().outputs {
        known.insert(output.to_string());
    }
    Ok(gate)
}

impl FromStr for Netlist {
    type Err = NetlistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, l)| Line {
                number: i + 1,
                tokens: l.split_whitespace().collect(),
            })
            .filter(|l| !l.tokens.is_empty())
            .peekable();
        let end = s.lines().count() + 1;
        let eof = || Line {
            number: end,
            tokens: vec![],
        };

        let line = lines.next().unwrap_or_else(eof);
        let inputs = names(line.header(INPUT_HEADER)?);
        let patterns = address_width(inputs.len()).ok_or(NetlistError::TooManyInputs {
            count: inputs.len(),
        })?;

        let line = lines.next().unwrap_or_else(eof);
        let output_names = names(line.header(OUTPUT_HEADER)?);

        let mut seen = HashSet::new();
        for name in inputs.iter().chain(&output_names) {
            if !seen.insert(name.clone()) || [CONSTANT_LOW, CONSTANT_HIGH].contains(&&**name)
            {
                return Err(NetlistError::DuplicateSignal {
                    name: name.to_string(),
                });
            }
        }

        if lines
            .peek()
            .is_some_and(|l| l.tokens[0] == TRUTH_TABLE_HEADER)
        {
            lines.next();
        }

        let mut outputs = Vec::with_capacity(output_names.len());
        for name in output_names {
            let line = lines.next().ok_or_else(|| NetlistError::MissingTruthTable {
                name: name.to_string(),
            })?;
            let target = parse_row(&line, &name, patterns)?;
            outputs.push(OutputVector::new(name, target));
        }

        let mut known: HashSet<String> = inputs
            .iter()
            .map(|i| i.to_string())
            .chain([CONSTANT_LOW.to_string(), CONSTANT_HIGH.to_string()])
            .collect();
        let gates = lines
            .map(|line| parse_gate(&line, &mut known))
            .collect::<Result<Vec<Gate>, NetlistError>>()?;
        let circuit = Circuit::new(gates);

        event!(
            Level::DEBUG,
            "Parsed netlist: {} inputs, {} outputs, {} gates, unspecified [{}]",
            inputs.len(),
            outputs.len(),
            circuit.len(),
            circuit.unspecified_labels().collect::<Vec<_>>().join(", ")
        );
        Ok(Netlist {
            inputs,
            outputs,
            circuit,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::circuit::Gate;
    use crate::circuit::kind::GateKind;
    use crate::circuit::signature::{GateSignature, SignalName};
    use crate::netlist::Netlist;
    use crate::netlist::error::NetlistError;

    const XOR: &str = "INPUTVAR 2 A B\nOUTPUTVAR 1 Z\nOUTPUTVAL\nZ 0 1 1 0\nXOR A B Z\n";

    #[test]
    fn test_declared_gate() {
        let n: Netlist = XOR.parse().unwrap();
        assert_eq!(n.inputs, vec![SignalName::from("A"), SignalName::from("B")]);
        assert_eq!(n.outputs.len(), 1);
        assert_eq!(n.outputs[0].target, vec![false, true, true, false]);
        assert_eq!(
            n.circuit.gates(),
            &[Gate::Declared {
                kind: GateKind::Xor,
                signature: GateSignature::new(["A", "B"], ["Z"]),
            }]
        );
    }

    #[test]
    fn test_truth_table_header_is_optional() {
        let n: Netlist = "INPUTVAR 1 A\nOUTPUTVAR 1 Z\n\nZ 1 0\nNOT A Z"
            .parse()
            .unwrap();
        assert_eq!(n.outputs[0].target, vec![true, false]);
        assert_eq!(n.circuit.len(), 1);
    }

    #[test]
    fn test_unspecified_partition() {
        let text = "INPUTVAR 2 A B
OUTPUTVAR 1 Z
OUTPUTVAL
Z 0 0 0 1
NOT A na
G1 3 na B t
G2 4 t 1 Z W
";
        let n: Netlist = text.parse().unwrap();
        assert_eq!(n.circuit.unspecified_indices(), &[1, 2]);
        assert_eq!(
            n.circuit.gates()[1],
            Gate::Unspecified {
                label: "G1".to_string(),
                signature: GateSignature::new(["na", "B"], ["t"]),
            }
        );
        assert_eq!(
            n.circuit.gates()[2],
            Gate::Unspecified {
                label: "G2".to_string(),
                signature: GateSignature::new(["t", "1"], ["Z", "W"]),
            }
        );
    }

    #[test]
    fn test_decoder_and_multiplexer_lines() {
        let text = "INPUTVAR 2 A B
OUTPUTVAR 1 Z
OUTPUTVAL
Z 0 1 1 0
DECODER 2 A B d0 d1 d2 d3
MULTIPLEXER 4 0 d1 d2 0 A B Z
";
        let n: Netlist = text.parse().unwrap();
        assert_eq!(
            n.circuit.gates()[0],
            Gate::Declared {
                kind: GateKind::Decoder,
                signature: GateSignature::new(["A", "B"], ["d0", "d1", "d2", "d3"]),
            }
        );
        assert_eq!(
            n.circuit.gates()[1],
            Gate::Declared {
                kind: GateKind::Multiplexer,
                signature: GateSignature::new(["0", "d1", "d2", "0"], ["Z"])
                    .with_selectors(["A", "B"]),
            }
        );
    }

    #[test]
    fn test_missing_header() {
        let err = "OUTPUTVAR 1 Z\n".parse::<Netlist>().unwrap_err();
        assert!(matches!(
            err,
            NetlistError::MissingHeader {
                line: 1,
                expected: "INPUTVAR"
            }
        ));
        let err = "".parse::<Netlist>().unwrap_err();
        assert!(matches!(err, NetlistError::MissingHeader { .. }));
    }

    #[test]
    fn test_bad_rows() {
        let short = "INPUTVAR 2 A B\nOUTPUTVAR 1 Z\nOUTPUTVAL\nZ 0 1 1\n";
        assert!(matches!(
            short.parse::<Netlist>(),
            Err(NetlistError::TokenCount {
                line: 4,
                expected: 5,
                found: 4
            })
        ));
        let bad = "INPUTVAR 1 A\nOUTPUTVAR 1 Z\nOUTPUTVAL\nZ 0 2\n";
        assert!(matches!(
            bad.parse::<Netlist>(),
            Err(NetlistError::InvalidBit { line: 4, .. })
        ));
        let missing = "INPUTVAR 1 A\nOUTPUTVAR 2 Y Z\nOUTPUTVAL\nY 0 1\n";
        assert!(matches!(
            missing.parse::<Netlist>(),
            Err(NetlistError::MissingTruthTable { .. })
        ));
    }

    #[test]
    fn test_bad_gate_lines() {
        let head = "INPUTVAR 1 A\nOUTPUTVAR 1 Z\nOUTPUTVAL\nZ 0 1\n";
        assert!(matches!(
            format!("{head}AND A Z").parse::<Netlist>(),
            Err(NetlistError::TokenCount { line: 5, .. })
        ));
        assert!(matches!(
            format!("{head}G1 x A Z").parse::<Netlist>(),
            Err(NetlistError::InvalidCount { line: 5, .. })
        ));
        assert!(matches!(
            format!("{head}G1").parse::<Netlist>(),
            Err(NetlistError::TokenCount { line: 5, .. })
        ));
    }

    #[test]
    fn test_huge_counts() {
        let huge = usize::MAX;
        assert!(matches!(
            format!("INPUTVAR {huge} A\n").parse::<Netlist>(),
            Err(NetlistError::InvalidCount { line: 1, .. })
        ));
        let head = "INPUTVAR 1 A\nOUTPUTVAR 1 Z\nOUTPUTVAL\nZ 0 1\n";
        assert!(matches!(
            format!("{head}MULTIPLEXER {huge} A Z").parse::<Netlist>(),
            Err(NetlistError::InvalidCount { line: 5, .. })
        ));
        assert!(matches!(
            format!("{head}G1 {huge} A Z").parse::<Netlist>(),
            Err(NetlistError::InvalidCount { line: 5, .. })
        ));
    }

    #[test]
    fn test_duplicate_names() {
        assert!(matches!(
            "INPUTVAR 2 A A\nOUTPUTVAR 1 Z\nZ 0 0 0 0\n".parse::<Netlist>(),
            Err(NetlistError::DuplicateSignal { .. })
        ));
        assert!(matches!(
            "INPUTVAR 1 1\nOUTPUTVAR 1 Z\nZ 0 0\n".parse::<Netlist>(),
            Err(NetlistError::DuplicateSignal { .. })
        ));
    }
}
