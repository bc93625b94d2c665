use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::circuit::signature::SignalName;

/// Target and generated truth-table columns for one declared output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputVector {
    pub name: SignalName,
    pub target: Vec<bool>,
    pub generated: Vec<bool>,
}

impl OutputVector {
    pub fn new(name: SignalName, target: Vec<bool>) -> Self {
        let generated = vec![false; target.len()];
        Self {
            name,
            target,
            generated,
        }
    }

    pub fn matches(&self) -> bool {
        self.target == self.generated
    }

    /// Pattern indices where the generated value differs from the target.
    pub fn mismatches(&self) -> impl Iterator<Item = usize> + '_ {
        self.target
            .iter()
            .zip(&self.generated)
            .enumerate()
            .filter(|(_, (t, g))| t != g)
            .map(|(i, _)| i)
    }
}

/// The declared outputs of the netlist. Gates that drive one of these names
/// write into its generated column instead of the symbol table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputSpec {
    outputs: Vec<OutputVector>,
    index: HashMap<SignalName, usize>,
}

impl OutputSpec {
    pub fn new<T: IntoIterator<Item = OutputVector>>(outputs: T) -> Self {
        let outputs: Vec<OutputVector> = outputs.into_iter().collect();
        let mut index = HashMap::with_capacity(outputs.len());
        for (i, o) in outputs.iter().enumerate() {
            index.entry(o.name.clone()).or_insert(i);
        }
        Self { outputs, index }
    }

    pub fn outputs(&self) -> &[OutputVector] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Records `value` for pattern `pattern` if `name` is a declared output.
    /// Returns whether it was.
    pub fn record(&mut self, name: &str, value: bool, pattern: usize) -> bool {
        match self.index.get(name) {
            Some(i) => {
                if let Some(slot) = self.outputs[*i].generated.get_mut(pattern) {
                    *slot = value;
                }
                true
            }
            None => false,
        }
    }

    /// Zeroes every generated column.
    pub fn reset(&mut self) {
        for output in &mut self.outputs {
            output.generated.fill(false);
        }
    }

    pub fn matches(&self) -> bool {
        self.outputs.iter().all(OutputVector::matches)
    }
}

/// A truth table row of the generated column, in netlist syntax.
impl Display for OutputVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for bit in &self.generated {
            write!(f, " {}", u8::from(*bit))?;
        }
        Ok(())
    }
}

impl Display for OutputSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for output in &self.outputs {
            writeln!(f, "{output}")?;
        }
        Ok(())
    }
}
