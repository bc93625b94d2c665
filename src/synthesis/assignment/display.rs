use std::fmt::{Display, Formatter};

use colored::Colorize;

use crate::evaluation::outputs::OutputSpec;
use crate::synthesis::assignment::KindAssignment;

pub struct KindAssignmentReport<'a> {
    pub(crate) assignment: &'a KindAssignment,
}

impl Display for KindAssignmentReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, kind) in self.assignment.kinds().iter().enumerate() {
            writeln!(f, "G{} {kind}", i + 1)?;
        }
        Ok(())
    }
}

/// The assignment followed by each output's generated column, with the
/// outputs and bits that differ from the target highlighted.
pub(crate) struct KindAssignmentMismatchDisplay<'a> {
    pub(crate) assignment: &'a KindAssignment,
    pub(crate) outputs: &'a OutputSpec,
}

impl Display for KindAssignmentMismatchDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.assignment)?;
        for output in self.outputs.outputs() {
            let name = if output.matches() {
                output.name.normal()
            } else {
                output.name.red()
            };
            write!(f, " {name}:")?;
            for (generated, target) in output.generated.iter().zip(&output.target) {
                let bit = if *generated { "1" } else { "0" };
                if generated == target {
                    write!(f, " {}", bit.normal())?;
                } else {
                    write!(f, " {}", bit.yellow())?;
                }
            }
        }
        Ok(())
    }
}
