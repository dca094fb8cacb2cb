use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::dialect::{Dialect, Op};
use crate::nbf;

/// A three-symbols-per-token dialect over a decimal opcode space.
///
/// Tokens are exactly three digits. The low numbers extend the eight
/// canonical operations with multi-cell moves, bulk accumulation, source
/// skips, output-list editing and the nucleotide ambiguity codes
/// (050-060 mirror R through N). Codes outside the implemented set are
/// not instructions and are stripped before execution like any other
/// junk.
pub struct Ragaraja {
    rng: SmallRng,
}

impl Ragaraja {
    /// A dialect whose ambiguous draws replay deterministically for the
    /// given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Decode a token into its numeric opcode.
    fn opcode(token: &[u8]) -> Option<u16> {
        match token {
            &[a, b, c] if a.is_ascii_digit() && b.is_ascii_digit() && c.is_ascii_digit() => Some(
                (a - b'0') as u16 * 100 + (b - b'0') as u16 * 10 + (c - b'0') as u16,
            ),
            _ => None,
        }
    }
}

/// What a recognized opcode dispatches to.
enum Decoded {
    Fixed(Op),
    /// Ambiguous opcode, tagged with its nucleotide-code equivalent.
    Wobble(u8),
}

fn decode(opcode: u16) -> Option<Decoded> {
    use Decoded::{Fixed, Wobble};
    let decoded = match opcode {
        0 => Fixed(Op::Forward),
        1 => Fixed(Op::MoveBy(5)),
        2 => Fixed(Op::MoveBy(10)),
        4 => Fixed(Op::Backward),
        5 => Fixed(Op::MoveBy(-5)),
        6 => Fixed(Op::MoveBy(-10)),
        8 => Fixed(Op::Increment),
        9 => Fixed(Op::AddBy(5)),
        10 => Fixed(Op::AddBy(10)),
        11 => Fixed(Op::Decrement),
        12 => Fixed(Op::AddBy(-5)),
        13 => Fixed(Op::AddBy(-10)),
        14 => Fixed(Op::LoopOpen),
        15 => Fixed(Op::LoopClose),
        20 => Fixed(Op::Output),
        21 => Fixed(Op::OutputDataPointer),
        22 => Fixed(Op::OutputProgramPointer),
        23 => Fixed(Op::SkipForward(1)),
        24 => Fixed(Op::SkipForward(5)),
        25 => Fixed(Op::SkipForward(10)),
        26 => Fixed(Op::SkipBackward(1)),
        27 => Fixed(Op::SkipBackward(5)),
        28 => Fixed(Op::SkipBackward(10)),
        32 => Fixed(Op::Double),
        33 => Fixed(Op::Halve),
        41 => Fixed(Op::DropOutputFront),
        42 => Fixed(Op::DropOutputBack),
        43 => Fixed(Op::MoveToFirst),
        44 => Fixed(Op::MoveToLast),
        46 => Fixed(Op::ReverseTape),
        47 => Fixed(Op::ReverseOutput),
        50 => Wobble(b'R'),
        51 => Wobble(b'Y'),
        52 => Wobble(b'S'),
        53 => Wobble(b'W'),
        54 => Wobble(b'K'),
        55 => Wobble(b'M'),
        56 => Wobble(b'B'),
        57 => Wobble(b'D'),
        58 => Wobble(b'H'),
        59 => Wobble(b'V'),
        60 => Wobble(b'N'),
        61 => Fixed(Op::MoveByCell),
        62 => Fixed(Op::MoveBackByCell),
        63 => Fixed(Op::Input),
        82 => Fixed(Op::SkipIfZero),
        83 => Fixed(Op::SkipByCell),
        84 => Fixed(Op::SetCell(0)),
        85 => Fixed(Op::SetCell(-1)),
        86 => Fixed(Op::SetCell(1)),
        _ => return None,
    };
    Some(decoded)
}

impl Dialect for Ragaraja {
    fn token_width(&self) -> usize {
        3
    }

    fn recognizes(&self, token: &[u8]) -> bool {
        Self::opcode(token).and_then(decode).is_some()
    }

    fn resolve(&mut self, token: &[u8]) -> Option<Op> {
        match Self::opcode(token).and_then(decode)? {
            Decoded::Fixed(op) => Some(op),
            Decoded::Wobble(code) => Some(nbf::wobble(code, &mut self.rng)),
        }
    }

    fn loop_tokens(&self) -> Option<(&'static [u8], &'static [u8])> {
        Some((b"014", b"015"))
    }
}
