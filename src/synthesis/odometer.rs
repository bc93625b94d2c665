use crate::circuit::kind::GateKind;
use crate::synthesis::assignment::KindAssignment;

/// The precomputed sequence of which unspecified gate to bump at each step of
/// the kind search.
///
/// The last unspecified gate is the fastest digit. Every time a digit wraps
/// back to [GateKind::Or] the next slower digit is bumped once, so starting
/// from the all-[GateKind::Or] assignment the non-carrying steps reach every
/// assignment exactly once. Carrying steps land on an assignment that was
/// already tried and are skipped by the solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KindOdometer {
    digits: usize,
    steps: Vec<usize>,
}

impl KindOdometer {
    /// Number of steps in the trace for `digits` digits of base `radix`:
    /// `radix` for one digit, then `(len + 1) * radix` for each further one.
    /// `None` on overflow.
    pub fn trace_len(radix: usize, digits: usize) -> Option<usize> {
        if digits == 0 {
            return Some(0);
        }
        let mut len = radix;
        for _ in 1..digits {
            len = len.checked_add(1)?.checked_mul(radix)?;
        }
        Some(len)
    }

    /// `None` when the trace length overflows a `usize` or the trace cannot
    /// be allocated.
    pub fn new(digits: usize) -> Option<Self> {
        let radix = GateKind::COUNT;
        let len = Self::trace_len(radix, digits)?;
        let mut steps = Vec::new();
        steps.try_reserve_exact(len).ok()?;
        if let Some(mut digit) = digits.checked_sub(1) {
            steps.push(digit);
            let mut last = 0;
            loop {
                for _ in 1..radix {
                    steps.extend_from_within(..=last);
                }
                if digit == 0 {
                    break;
                }
                digit -= 1;
                steps.push(digit);
                last = steps.len() - 1;
            }
        }
        Some(Self { digits, steps })
    }

    /// Number of unspecified gates the trace was built for.
    pub fn digits(&self) -> usize {
        self.digits
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// Applies step `step` to `assignment` and returns whether it carried.
    /// Steps past the end of the trace change nothing and count as a carry.
    pub fn advance(&self, step: usize, assignment: &mut KindAssignment) -> bool {
        self.steps
            .get(step)
            .is_none_or(|digit| assignment.bump(*digit))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::circuit::kind::GateKind;
    use crate::synthesis::assignment::KindAssignment;
    use crate::synthesis::odometer::KindOdometer;

    #[test]
    fn test_trace_len() {
        assert_eq!(KindOdometer::trace_len(6, 0), Some(0));
        assert_eq!(KindOdometer::trace_len(6, 1), Some(6));
        assert_eq!(KindOdometer::trace_len(6, 2), Some(42));
        assert_eq!(KindOdometer::trace_len(6, 3), Some(258));
        assert_eq!(KindOdometer::trace_len(6, 64), None);
        for g in 0..=4 {
            let o = KindOdometer::new(g).unwrap();
            assert_eq!(Some(o.len()), KindOdometer::trace_len(GateKind::COUNT, g));
            assert_eq!(o.digits(), g);
        }
    }

    #[test]
    fn test_unallocatable_trace() {
        assert!(KindOdometer::trace_len(GateKind::COUNT, 24).is_some());
        assert!(KindOdometer::new(24).is_none());
    }

    #[test]
    fn test_single_digit_trace() {
        let o = KindOdometer::new(1).unwrap();
        assert_eq!(o.steps(), &[0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_two_digit_trace_prefix() {
        let o = KindOdometer::new(2).unwrap();
        assert_eq!(&o.steps()[..8], &[1, 1, 1, 1, 1, 1, 0, 1]);
    }

    #[test]
    fn test_full_coverage() {
        for g in 1..=3u32 {
            let o = KindOdometer::new(g as usize).unwrap();
            let mut a = KindAssignment::initial(g as usize);
            let mut seen = HashSet::from([a.clone()]);
            let mut fresh = 1;
            for step in 0..o.len() {
                if !o.advance(step, &mut a) {
                    fresh += 1;
                    assert!(seen.insert(a.clone()), "{a} visited twice");
                } else {
                    assert!(seen.contains(&a), "carry reached unseen {a}");
                }
            }
            assert_eq!(fresh, GateKind::COUNT.pow(g));
            assert_eq!(seen.len(), GateKind::COUNT.pow(g));
        }
    }

    #[test]
    fn test_advance_past_end_carries() {
        let o = KindOdometer::new(1).unwrap();
        let mut a = KindAssignment::initial(1);
        assert!(o.advance(o.len(), &mut a));
        assert_eq!(a, KindAssignment::initial(1));
    }
}
