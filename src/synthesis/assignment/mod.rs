use std::fmt::{Display, Formatter};

use crate::circuit::kind::GateKind;
use crate::evaluation::outputs::OutputSpec;
use crate::synthesis::assignment::display::{KindAssignmentMismatchDisplay, KindAssignmentReport};

mod display;

/// One [GateKind] per unspecified gate, in netlist order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KindAssignment {
    kinds: Vec<GateKind>,
}

impl KindAssignment {
    /// Every gate starts as [GateKind::Or].
    pub fn initial(len: usize) -> Self {
        Self {
            kinds: vec![GateKind::ALL[0]; len],
        }
    }

    pub fn kinds(&self) -> &[GateKind] {
        self.kinds.as_slice()
    }

    pub fn kind(&self, idx: usize) -> Option<GateKind> {
        self.kinds.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Moves gate `idx` to the next kind. Returns whether it wrapped; an
    /// index with no gate is left alone and reported as wrapped.
    pub fn bump(&mut self, idx: usize) -> bool {
        match self.kinds.get_mut(idx) {
            Some(kind) => {
                let (next, carried) = kind.next();
                *kind = next;
                carried
            }
            None => true,
        }
    }

    /// `G<i> <KIND>` lines, numbering the gates from one.
    pub fn report(&self) -> KindAssignmentReport<'_> {
        KindAssignmentReport { assignment: self }
    }

    pub(crate) fn display_mismatch<'a>(
        &'a self,
        outputs: &'a OutputSpec,
    ) -> KindAssignmentMismatchDisplay<'a> {
        KindAssignmentMismatchDisplay {
            assignment: self,
            outputs,
        }
    }
}

impl From<Vec<GateKind>> for KindAssignment {
    fn from(kinds: Vec<GateKind>) -> Self {
        Self { kinds }
    }
}

impl Display for KindAssignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, kind) in self.kinds.iter().enumerate() {
            if i > 0 {
                write!(f, ", {kind}")?;
            } else {
                write!(f, "{kind}")?;
            }
        }
        write!(f, "]")
    }
}
