use std::collections::VecDeque;

use crate::dialect::{Dialect, Op};

/// Filler appended to a program whose length is not a whole number of
/// tokens. It is not an instruction in any dialect, so the padded tail is
/// stripped again by the preprocessing filter.
pub const FILLER: u8 = b'!';

/// Configuration for one [`interpret`] call.
pub struct MachineConfig {
    /// Number of cells on the tape.
    pub tape_size: usize,
    /// Pre-seeded tape. Truncated or zero-extended to `tape_size`.
    pub tape: Option<Vec<i64>>,
    /// Values consumed front-to-back by the input instruction.
    pub input: Vec<i64>,
    /// Upper bound on dispatch steps. `None` runs until the program halts.
    pub max_steps: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            tape_size: 30,
            tape: None,
            input: Vec::new(),
            max_steps: None,
        }
    }
}

/// Non-fatal diagnostic recorded when a token survives preprocessing but
/// fails lookup at dispatch. Execution continues at the next position
/// with the machine untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown function {token} at source position {position}")]
pub struct UnknownToken {
    pub token: String,
    pub position: usize,
}

/// The full state of one register-machine run.
///
/// Created fresh per [`interpret`] call and returned whole when the
/// program pointer runs off the end of the program. Nothing persists
/// across calls except what the caller threads through (a final tape
/// passed back in as the next seed tape, or one run's output used as the
/// next run's input).
pub struct Machine {
    /// Fixed-size circular tape of signed cells.
    pub tape: Vec<i64>,
    /// Index into `tape`. Handlers may leave it out of range; it is
    /// wrapped back into `[0, tape len)` after every step.
    pub data_pointer: i64,
    /// Values not yet consumed by the input instruction.
    pub input: VecDeque<i64>,
    /// Values produced so far. Never read by the machine except through
    /// the explicit output-editing operations.
    pub output: Vec<i64>,
    /// The program after padding and filtering. Fixed for the run.
    pub program: Vec<u8>,
    /// Index of the next token to dispatch.
    pub program_pointer: usize,
    /// Dispatch steps taken, counting unmatched tokens.
    pub steps: usize,
    /// Unknown-token diagnostics collected during the run.
    pub warnings: Vec<UnknownToken>,
}

/// Run `program` against `dialect` until the program pointer passes the
/// end of the filtered program.
///
/// The program is padded with [`FILLER`] to a whole number of tokens and
/// stripped of every token the dialect does not recognize, so unsupported
/// symbols never reach dispatch. Each step resolves one token, executes
/// it, wraps the data pointer back into range, and advances the program
/// pointer by one token width; loop and skip operations overwrite the
/// pointer first and their targets account for the advance that follows.
/// Malformed programs never raise: anomalies are recovered in place and
/// at worst recorded as [`Machine::warnings`].
pub fn interpret<D: Dialect>(program: &str, dialect: &mut D, config: MachineConfig) -> Machine {
    let width = dialect.token_width().max(1);
    let size = config.tape_size.max(1);

    let mut tape = config.tape.unwrap_or_default();
    tape.resize(size, 0);

    let mut machine = Machine {
        tape,
        data_pointer: 0,
        input: config.input.into(),
        output: Vec::new(),
        program: preprocess(program.as_bytes(), dialect, width),
        program_pointer: 0,
        steps: 0,
        warnings: Vec::new(),
    };

    let loop_tokens = dialect.loop_tokens();
    let limit = config.max_steps.unwrap_or(usize::MAX);

    while machine.program_pointer < machine.program.len() && machine.steps < limit {
        machine.steps += 1;

        let at = machine.program_pointer;
        let end = (at + width).min(machine.program.len());
        let token = machine.program[at..end].to_vec();

        match dialect.resolve(&token) {
            Some(op) => machine.execute(op, width, loop_tokens),
            None => machine.warnings.push(UnknownToken {
                token: String::from_utf8_lossy(&token).into_owned(),
                position: at,
            }),
        }

        machine.data_pointer = machine.data_pointer.rem_euclid(size as i64);
        machine.program_pointer += width;
    }

    machine
}

/// Pad `source` with [`FILLER`] to a whole number of tokens, then keep
/// only the tokens the dialect recognizes. Idempotent: every surviving
/// token is recognized, so a second pass keeps everything.
fn preprocess<D: Dialect>(source: &[u8], dialect: &D, width: usize) -> Vec<u8> {
    let mut padded = source.to_vec();
    while padded.len() % width != 0 {
        padded.push(FILLER);
    }
    let mut program = Vec::with_capacity(padded.len());
    for token in padded.chunks(width) {
        if dialect.recognizes(token) {
            program.extend_from_slice(token);
        }
    }
    program
}

impl Machine {
    /// The cell under the data pointer. Valid only between steps, when
    /// the pointer has been wrapped back into range.
    fn cell(&self) -> i64 {
        self.tape[self.data_pointer as usize]
    }

    fn cell_mut(&mut self) -> &mut i64 {
        &mut self.tape[self.data_pointer as usize]
    }

    fn execute(&mut self, op: Op, width: usize, loop_tokens: Option<(&[u8], &[u8])>) {
        match op {
            Op::Increment => {
                let cell = self.cell_mut();
                *cell = cell.wrapping_add(1);
            }
            Op::Decrement => {
                let cell = self.cell_mut();
                *cell = cell.wrapping_sub(1);
            }
            Op::Forward => self.data_pointer += 1,
            Op::Backward => self.data_pointer -= 1,
            Op::Output => self.output.push(self.cell()),
            Op::Input => *self.cell_mut() = self.input.pop_front().unwrap_or(0),
            Op::LoopOpen => {
                if let Some((open, close)) = loop_tokens {
                    self.loop_open(open, close, width);
                }
            }
            Op::LoopClose => {
                if let Some((open, close)) = loop_tokens {
                    self.loop_close(open, close, width);
                }
            }
            Op::MoveBy(delta) => self.data_pointer = self.data_pointer.wrapping_add(delta),
            Op::MoveToFirst => self.data_pointer = 0,
            Op::MoveToLast => self.data_pointer = self.tape.len() as i64 - 1,
            Op::MoveByCell => self.data_pointer = self.data_pointer.wrapping_add(self.cell()),
            Op::MoveBackByCell => self.data_pointer = self.data_pointer.wrapping_sub(self.cell()),
            Op::AddBy(n) => {
                let cell = self.cell_mut();
                *cell = cell.wrapping_add(n);
            }
            Op::Double => {
                let cell = self.cell_mut();
                *cell = cell.wrapping_mul(2);
            }
            Op::Halve => *self.cell_mut() /= 2,
            Op::SetCell(value) => *self.cell_mut() = value,
            Op::OutputDataPointer => self.output.push(self.data_pointer),
            Op::OutputProgramPointer => self.output.push(self.program_pointer as i64),
            Op::DropOutputFront => {
                if !self.output.is_empty() {
                    self.output.remove(0);
                }
            }
            Op::DropOutputBack => {
                self.output.pop();
            }
            Op::ReverseTape => self.tape.reverse(),
            Op::ReverseOutput => self.output.reverse(),
            Op::SkipForward(n) => self.skip_forward(n, width),
            Op::SkipBackward(n) => self.skip_backward(n, width),
            Op::SkipIfZero => {
                if self.cell() == 0 && self.program_pointer + width <= self.program.len() {
                    self.program_pointer += width;
                }
            }
            Op::SkipByCell => self.skip_forward(self.cell().unsigned_abs() as usize, width),
        }
    }

    /// Move the program pointer forward by `n` instructions, only when
    /// the destination is still strictly inside the program.
    fn skip_forward(&mut self, n: usize, width: usize) {
        let Some(dest) = n
            .checked_mul(width)
            .and_then(|delta| self.program_pointer.checked_add(delta))
        else {
            return;
        };
        if dest < self.program.len() {
            self.program_pointer = dest;
        }
    }

    /// Move the program pointer back by `n` instructions, only when the
    /// destination does not precede the program start.
    fn skip_backward(&mut self, n: usize, width: usize) {
        let Some(dest) = n
            .checked_mul(width)
            .and_then(|delta| self.program_pointer.checked_sub(delta))
        else {
            return;
        };
        self.program_pointer = dest;
    }

    /// Jump past the matching close token when the current cell is not
    /// positive. Scans forward counting nested opens and closes; a scan
    /// that runs off the end parks the pointer on the last position so
    /// the advance that follows halts the machine.
    fn loop_open(&mut self, open: &[u8], close: &[u8], width: usize) {
        if self.cell() > 0 {
            return;
        }
        let mut depth = 1usize;
        let mut pos = self.program_pointer;
        loop {
            pos += width;
            if pos + width > self.program.len() {
                self.program_pointer = self.program.len().saturating_sub(1);
                return;
            }
            let token = &self.program[pos..pos + width];
            if token == close {
                depth -= 1;
            } else if token == open {
                depth += 1;
            }
            if depth == 0 {
                self.program_pointer = pos;
                return;
            }
        }
    }

    /// Jump back to the matching open token while the current cell is
    /// positive; the advance that follows re-enters the body without
    /// re-testing the open. A cell below one steps past the close
    /// instead. A backward scan that runs off the start restores the
    /// pre-scan pointer, so a stray close becomes a forward no-op.
    fn loop_close(&mut self, open: &[u8], close: &[u8], width: usize) {
        if self.cell() < 1 {
            self.program_pointer += width;
            return;
        }
        let origin = self.program_pointer;
        let mut depth = 1usize;
        let mut pos = origin;
        loop {
            if pos < width {
                self.program_pointer = origin;
                return;
            }
            pos -= width;
            let token = &self.program[pos..pos + width];
            if token == close {
                depth += 1;
            } else if token == open {
                depth -= 1;
            }
            if depth == 0 {
                self.program_pointer = pos;
                return;
            }
        }
    }
}
