mod weights;

#[cfg(test)]
mod test;

use std::fmt;

use log::debug;
use num_bigint::RandBigInt;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::errors::RexgenError;
use crate::program::{outer_bounds, parse, Compiler, Opcode, Program};
use weights::{inst_states, match_counts, InstState};

pub use weights::Mode;

/// Produces random strings matching a regular expression.
///
/// Construction compiles the pattern into an instruction program, weighs
/// every program point by the number of strings reachable from it, and
/// precomputes a sampler for every character class. Each [`generate`] call
/// then walks the program once, choosing at every branch with probability
/// proportional to the branch weights, so the cost of a call is linear in
/// the length of the produced string.
///
/// The generator owns its random source. Repeated calls reuse an internal
/// scratch buffer and advance the PRNG; nothing else mutates, which is what
/// makes a freshly cloned generator with an equally seeded PRNG produce an
/// identical stream.
///
/// [`generate`]: Generator::generate
pub struct Generator<R: Rng = SmallRng> {
    pattern: String,
    program: Program,
    min: u32,
    max: Option<u32>,
    states: Vec<InstState>,
    rng: R,
    scratch: Vec<char>,
}

impl Generator<SmallRng> {
    /// Builds a generator sampling uniformly over every path through the
    /// pattern, weighted by how many completions each branch admits. The
    /// PRNG is seeded from system entropy.
    pub fn new(pattern: &str, flags: &str) -> Result<Self, RexgenError> {
        Self::with_rng(pattern, flags, Mode::Uniform, SmallRng::from_entropy())
    }

    /// Builds a generator sampling uniformly over every distinct string the
    /// pattern matches, counting each character-class choice separately.
    pub fn new_distinct_runes(pattern: &str, flags: &str) -> Result<Self, RexgenError> {
        Self::with_rng(pattern, flags, Mode::DistinctRunes, SmallRng::from_entropy())
    }

    /// Builds a generator where every branch instruction independently takes
    /// its primary edge with probability `p / i64::MAX`. `p` must lie in
    /// `[0, i64::MAX)`.
    pub fn new_with_probability(pattern: &str, flags: &str, p: i64) -> Result<Self, RexgenError> {
        Self::with_rng(pattern, flags, Mode::Probability(p), SmallRng::from_entropy())
    }
}

impl<R: Rng> Generator<R> {
    /// Builds a generator in any mode on top of a caller-supplied PRNG.
    /// Equal pattern, flags, mode, and PRNG state give equal output streams.
    pub fn with_rng(
        pattern: &str,
        flags: &str,
        mode: Mode,
        rng: R,
    ) -> Result<Generator<R>, RexgenError> {
        let hir = parse(pattern, flags)?;
        let (min, max) = outer_bounds(&hir);
        let program = Compiler::compile(&hir)?;
        // Cycle detection happens here, so every mode runs the weight pass.
        let weights = match_counts(&program, mode == Mode::DistinctRunes)?;
        let states = inst_states(&program, &weights, mode)?;
        debug!("compiled {:?} into {} instructions", pattern, program.len());

        Ok(Generator {
            pattern: pattern.to_owned(),
            program,
            min,
            max,
            states,
            rng,
            scratch: Vec::new(),
        })
    }

    /// Produces one random string matching the pattern.
    pub fn generate(&mut self) -> String {
        self.scratch.clear();
        let mut pc = self.program.start;
        loop {
            let inst = &self.program[pc];
            match inst.op {
                Opcode::Rune => {
                    match &self.states[pc] {
                        InstState::Rune(sampler) => {
                            self.scratch.push(sampler.generate(&mut self.rng))
                        }
                        _ => panic!("BUG: rune instruction without a sampler"),
                    }
                    pc = inst.out;
                }
                Opcode::Rune1 => {
                    self.scratch.push(inst.runes[0]);
                    pc = inst.out;
                }
                Opcode::Alt => match &self.states[pc] {
                    InstState::Alt { pick, total } => {
                        let draw = self.rng.gen_biguint_below(total);
                        pc = if draw < *pick { inst.out } else { inst.arg };
                    }
                    _ => panic!("BUG: branch with zero outgoing weight reached"),
                },
                Opcode::Capture => pc = inst.out,
                Opcode::Match => return self.scratch.iter().collect(),
                Opcode::Fail | Opcode::Nop => {
                    panic!("BUG: {:?} instruction reached during generation", inst.op)
                }
            }
        }
    }

    /// The pattern this generator was built from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Repetition bounds of the outermost quantifier as reported by the
    /// parser, `None` meaning unbounded. Informational; output length is
    /// bounded by the compiled program itself.
    pub fn repetition_bounds(&self) -> (u32, Option<u32>) {
        (self.min, self.max)
    }
}

impl<R: Rng> fmt::Display for Generator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
