use std::ops::Range;

use crate::circuit::signature::address_width;

/// Every `bits`-wide pattern, `0..2^bits`, in increasing order.
///
/// Used both for the primary-input patterns of a trial and for the address
/// patterns a decoder or multiplexer compares its select lines against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcomes {
    bits: usize,
    range: Range<usize>,
}

impl Outcomes {
    /// `None` when `2^bits` would not fit in a `usize` with a bit to spare.
    pub fn new(bits: usize) -> Option<Self> {
        address_width(bits).map(|count| Self {
            bits,
            range: 0..count,
        })
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Bit `position` of `pattern`, counting from the most significant of
    /// `bits` bits.
    pub fn bit(pattern: usize, bits: usize, position: usize) -> bool {
        (pattern >> (bits - 1 - position)) & 1 == 1
    }
}

impl Iterator for Outcomes {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl ExactSizeIterator for Outcomes {}
