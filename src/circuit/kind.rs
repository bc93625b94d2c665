use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The concrete gate functions a netlist line can name, and the alphabet the
/// search draws from when resolving an unspecified gate.
///
/// The declaration order is the odometer order: an unspecified gate starts as
/// [GateKind::Or] and is bumped one variant at a time up to
/// [GateKind::Multiplexer], after which it wraps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    Or,
    And,
    Xor,
    Not,
    Decoder,
    Multiplexer,
}

impl GateKind {
    pub const ALL: [GateKind; 6] = [
        GateKind::Or,
        GateKind::And,
        GateKind::Xor,
        GateKind::Not,
        GateKind::Decoder,
        GateKind::Multiplexer,
    ];

    /// Radix of the kind odometer.
    pub const COUNT: usize = GateKind::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    /// Advances to the next kind. Returns `true` as the second element when the
    /// kind wrapped back around to the first one.
    pub fn next(self) -> (GateKind, bool) {
        let next = self.index() + 1;
        match GateKind::ALL.get(next) {
            Some(kind) => (*kind, false),
            None => (GateKind::ALL[0], true),
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            GateKind::Or => "OR",
            GateKind::And => "AND",
            GateKind::Xor => "XOR",
            GateKind::Not => "NOT",
            GateKind::Decoder => "DECODER",
            GateKind::Multiplexer => "MULTIPLEXER",
        }
    }
}

impl Display for GateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl FromStr for GateKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateKind::ALL
            .iter()
            .copied()
            .find(|k| k.keyword() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use crate::circuit::kind::GateKind;

    #[test]
    fn test_next_walks_declaration_order() {
        let mut kind = GateKind::Or;
        let mut seen = vec![kind];
        loop {
            let (next, carried) = kind.next();
            if carried {
                assert_eq!(next, GateKind::Or);
                break;
            }
            seen.push(next);
            kind = next;
        }
        assert_eq!(seen, GateKind::ALL.to_vec());
    }

    #[test]
    fn test_keywords() {
        for kind in GateKind::ALL {
            assert_eq!(kind.keyword().parse::<GateKind>(), Ok(kind));
        }
        assert!("or".parse::<GateKind>().is_err());
        assert!("G1".parse::<GateKind>().is_err());
    }
}
