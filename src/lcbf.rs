use crate::dialect::{Dialect, Op};

/// Loose Circular Brainfuck: the eight canonical tokens over a circular
/// tape of signed cells.
///
/// "Loose" because cells are unbounded and loops run on positive values
/// only, so a decrement can push a cell below zero and straight out of
/// any loop.
pub struct Lcbf;

const INCREMENT: u8 = b'+';
const DECREMENT: u8 = b'-';
const FORWARD: u8 = b'>';
const BACKWARD: u8 = b'<';
const OUTPUT: u8 = b'.';
const INPUT: u8 = b',';
const LOOP_OPEN: u8 = b'[';
const LOOP_CLOSE: u8 = b']';

impl Dialect for Lcbf {
    fn token_width(&self) -> usize {
        1
    }

    fn recognizes(&self, token: &[u8]) -> bool {
        matches!(
            token,
            [INCREMENT | DECREMENT | FORWARD | BACKWARD | OUTPUT | INPUT | LOOP_OPEN | LOOP_CLOSE]
        )
    }

    fn resolve(&mut self, token: &[u8]) -> Option<Op> {
        match token {
            [INCREMENT] => Some(Op::Increment),
            [DECREMENT] => Some(Op::Decrement),
            [FORWARD] => Some(Op::Forward),
            [BACKWARD] => Some(Op::Backward),
            [OUTPUT] => Some(Op::Output),
            [INPUT] => Some(Op::Input),
            [LOOP_OPEN] => Some(Op::LoopOpen),
            [LOOP_CLOSE] => Some(Op::LoopClose),
            _ => None,
        }
    }

    fn loop_tokens(&self) -> Option<(&'static [u8], &'static [u8])> {
        Some((b"[", b"]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{MachineConfig, interpret};

    fn run(program: &str) -> crate::machine::Machine {
        interpret(program, &mut Lcbf, MachineConfig::default())
    }

    #[test]
    fn test_token_mapping() {
        assert_eq!(Lcbf.resolve(b"+"), Some(Op::Increment));
        assert_eq!(Lcbf.resolve(b"]"), Some(Op::LoopClose));
        assert_eq!(Lcbf.resolve(b"x"), None);
        assert!(Lcbf.recognizes(b","));
        assert!(!Lcbf.recognizes(b"!"));
    }

    #[test]
    fn test_countdown_is_printed() {
        // Cell 0 counts down from 10; each pass prints it before the
        // decrement, while cell 1 accumulates five per pass.
        let machine = run("++++++++++[>+++++<.-]");
        assert_eq!(machine.output, (1..=10).rev().collect::<Vec<i64>>());
        assert_eq!(machine.tape[0], 0);
        assert_eq!(machine.tape[1], 50);
    }

    #[test]
    fn test_close_exit_skips_following_instruction() {
        // "++[>+++++<.-]>>>+++."
        // Two loop passes print 2 then 1 and leave cell 1 at 10. When the
        // close sees cell 0 at zero it steps past itself AND the first
        // '>' after it, so only two of the three moves land: the trailing
        // increments hit cell 2, and '.' prints its 3.
        let machine = run("++[>+++++<.-]>>>+++.");
        assert_eq!(machine.output, vec![2, 1, 3]);
        assert_eq!(machine.tape[0], 0);
        assert_eq!(machine.tape[1], 10);
        assert_eq!(machine.tape[2], 3);
        assert_eq!(machine.data_pointer, 2);
    }

    #[test]
    fn test_stray_close_recovers_and_continues() {
        // "++>+++++<.-]>>>+++."
        // No matching open anywhere: the backward scan runs off the
        // start, the ']' becomes a forward no-op, and the tail still
        // executes.
        let machine = run("++>+++++<.-]>>>+++.");
        assert_eq!(machine.output, vec![2, 3]);
        assert_eq!(machine.tape[0], 1);
        assert_eq!(machine.tape[1], 5);
        assert_eq!(machine.tape[3], 3);
        assert_eq!(machine.data_pointer, 3);
    }

    #[test]
    fn test_unterminated_open_skips_rest() {
        // "++>[+++++<.->>>+++."
        // Cell 1 is zero at the '[', the forward scan never finds a
        // close, parks on the last position, and the advance halts the
        // machine with everything after the '[' unexecuted.
        let machine = run("++>[+++++<.->>>+++.");
        assert!(machine.output.is_empty());
        assert_eq!(machine.tape[0], 2);
        assert_eq!(machine.data_pointer, 1);
        assert_eq!(machine.program_pointer, 19);
    }

    #[test]
    fn test_nested_loops() {
        // "+++++[>++++[>+++.<-].<-]"
        // Outer loop runs five times; each pass reloads cell 1 with four
        // and the inner loop adds three to cell 2 per pass, printing the
        // running total. Every inner exit skips the '.' that follows its
        // ']', so only the in-loop prints appear: 3, 6, ..., 60.
        let machine = run("+++++[>++++[>+++.<-].<-]");
        assert_eq!(machine.output, (1..=20).map(|k| 3 * k).collect::<Vec<i64>>());
        assert_eq!(machine.tape[0], 0);
        assert_eq!(machine.tape[1], 0);
        assert_eq!(machine.tape[2], 60);
        assert_eq!(machine.data_pointer, 0);
    }
}
