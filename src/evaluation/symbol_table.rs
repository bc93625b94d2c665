use std::collections::HashMap;

use crate::circuit::signature::SignalName;
use crate::evaluation::error::EvalError;
use crate::evaluation::outcomes::Outcomes;

pub const CONSTANT_LOW: &str = "0";
pub const CONSTANT_HIGH: &str = "1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signal {
    pub name: SignalName,
    pub value: bool,
}

/// Signal bindings visible to the gates of one input pattern.
///
/// The first entries are the primary inputs followed by the constants `0` and
/// `1`; that prefix is fixed for the lifetime of the table. Derived signals
/// are appended behind it while a pattern is evaluated and dropped again by
/// [SymbolTable::truncate_to_prefix].
#[derive(Clone, Debug)]
pub struct SymbolTable {
    signals: Vec<Signal>,
    index: HashMap<SignalName, usize>,
    primary_inputs: usize,
}

impl SymbolTable {
    /// Fails if an input name repeats or collides with a constant.
    pub fn new<T: IntoIterator<Item = SignalName>>(primary_inputs: T) -> Result<Self, EvalError> {
        let mut table = Self {
            signals: vec![],
            index: HashMap::new(),
            primary_inputs: 0,
        };
        for name in primary_inputs {
            table.append(name, false)?;
            table.primary_inputs += 1;
        }
        table.append(SignalName::from(CONSTANT_LOW), false)?;
        table.append(SignalName::from(CONSTANT_HIGH), true)?;
        Ok(table)
    }

    pub fn primary_inputs(&self) -> usize {
        self.primary_inputs
    }

    /// Primary inputs plus the two constants.
    pub fn prefix_len(&self) -> usize {
        self.primary_inputs + 2
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Unbound names read as low.
    pub fn lookup(&self, name: &str) -> bool {
        self.index
            .get(name)
            .map(|i| self.signals[*i].value)
            .unwrap_or(false)
    }

    pub fn append(&mut self, name: SignalName, value: bool) -> Result<(), EvalError> {
        if self.index.contains_key(&name) {
            return Err(EvalError::SignalAlreadyBound(name));
        }
        self.index.insert(name.clone(), self.signals.len());
        self.signals.push(Signal { name, value });
        Ok(())
    }

    pub fn truncate_to_prefix(&mut self) {
        let prefix = self.prefix_len();
        for signal in self.signals.drain(prefix..) {
            self.index.remove(&signal.name);
        }
    }

    /// Truncates to the prefix and drives the primary inputs with `pattern`,
    /// the first declared input taking the most significant bit.
    pub fn load_pattern(&mut self, pattern: usize) {
        self.truncate_to_prefix();
        let bits = self.primary_inputs;
        for (position, signal) in self.signals[..bits].iter_mut().enumerate() {
            signal.value = Outcomes::bit(pattern, bits, position);
        }
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }
}
