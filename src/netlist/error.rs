use thiserror::Error;

use crate::evaluation::error::EvalError;

#[derive(Debug, Error)]
pub enum NetlistError {
    #[error("An error reading the netlist file")]
    Io(#[from] std::io::Error),
    #[error("Line {line}: expected a '{expected}' header")]
    MissingHeader { line: usize, expected: &'static str },
    #[error("Line {line}: '{token}' is not a valid count")]
    InvalidCount { line: usize, token: String },
    #[error("Line {line}: expected {expected} tokens, found {found}")]
    TokenCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: truth table entry '{token}' is neither 0 nor 1")]
    InvalidBit { line: usize, token: String },
    #[error("{count} primary inputs is more than this platform can enumerate")]
    TooManyInputs { count: usize },
    #[error("Line {line}: a {width}-input decoder is too wide")]
    DecoderTooWide { line: usize, width: usize },
    #[error("Signal '{name}' is declared more than once")]
    DuplicateSignal { name: String },
    #[error("Invalid primary inputs: {0}")]
    SymbolTable(EvalError),
    #[error("No truth table row for output '{name}'")]
    MissingTruthTable { name: String },
}
