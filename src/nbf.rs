use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::dialect::{Dialect, Op};

/// NucleotideBF: a DNA-alphabet dialect.
///
/// The four unambiguous bases map onto increment, decrement, forward and
/// backward; the eleven IUPAC ambiguity codes each resolve to one of
/// their constituent operations by a fresh uniform draw at every
/// execution, so re-running the same program need not reproduce the same
/// tape. There are no loops and no input instruction; `.` is the only way
/// a program leaves a trace in the output list.
pub struct Nbf {
    rng: SmallRng,
}

impl Nbf {
    /// A dialect whose ambiguous draws replay deterministically for the
    /// given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

const BASES: &[u8] = b"ATGC";
const AMBIGUITY_CODES: &[u8] = b"RYSWKMBDHVN";

/// Resolve one ambiguity code to a concrete operation.
///
/// Two-way codes split the unit interval at 0.5, three-way codes at 0.33
/// and 0.67, and `N` quarters it.
pub(crate) fn wobble(code: u8, rng: &mut SmallRng) -> Op {
    let r: f64 = rng.r#gen();
    match code {
        b'R' => {
            if r < 0.5 { Op::Increment } else { Op::Forward }
        }
        b'Y' => {
            if r < 0.5 { Op::Decrement } else { Op::Backward }
        }
        b'S' => {
            if r < 0.5 { Op::Forward } else { Op::Backward }
        }
        b'W' => {
            if r < 0.5 { Op::Increment } else { Op::Decrement }
        }
        b'K' => {
            if r < 0.5 { Op::Decrement } else { Op::Forward }
        }
        b'M' => {
            if r < 0.5 { Op::Increment } else { Op::Backward }
        }
        b'B' => {
            if r < 0.33 {
                Op::Forward
            } else if r < 0.67 {
                Op::Decrement
            } else {
                Op::Backward
            }
        }
        b'D' => {
            if r < 0.33 {
                Op::Increment
            } else if r < 0.67 {
                Op::Decrement
            } else {
                Op::Forward
            }
        }
        b'H' => {
            if r < 0.33 {
                Op::Increment
            } else if r < 0.67 {
                Op::Decrement
            } else {
                Op::Backward
            }
        }
        b'V' => {
            if r < 0.33 {
                Op::Increment
            } else if r < 0.67 {
                Op::Forward
            } else {
                Op::Backward
            }
        }
        // 'N' stands for any base at all.
        _ => {
            if r < 0.25 {
                Op::Increment
            } else if r < 0.5 {
                Op::Decrement
            } else if r < 0.75 {
                Op::Forward
            } else {
                Op::Backward
            }
        }
    }
}

impl Dialect for Nbf {
    fn token_width(&self) -> usize {
        1
    }

    fn recognizes(&self, token: &[u8]) -> bool {
        matches!(token, &[symbol] if symbol == b'.'
            || BASES.contains(&symbol)
            || AMBIGUITY_CODES.contains(&symbol))
    }

    fn resolve(&mut self, token: &[u8]) -> Option<Op> {
        let &[symbol] = token else { return None };
        match symbol {
            b'A' => Some(Op::Increment),
            b'T' => Some(Op::Decrement),
            b'G' => Some(Op::Forward),
            b'C' => Some(Op::Backward),
            b'.' => Some(Op::Output),
            code if AMBIGUITY_CODES.contains(&code) => Some(wobble(code, &mut self.rng)),
            _ => None,
        }
    }
}
