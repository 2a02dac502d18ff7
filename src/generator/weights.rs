use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::errors::RexgenError;
use crate::program::{InstPtr, Opcode, Program};
use crate::sampler::RuneSampler;

/// How branch weights are assigned at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Every path through the program is equally likely. Alternation
    /// branches are weighted by how many completions they admit, with each
    /// character class counting as a single choice.
    Uniform,
    /// Every distinct output string is equally likely. Character classes
    /// contribute their cardinality to the weights.
    DistinctRunes,
    /// Every branch takes its primary edge with fixed probability
    /// `p / i64::MAX`, regardless of subtree sizes.
    Probability(i64),
}

/// Per-instruction state materialized after weighting: a sampler for each
/// `Rune`, a `(pick, total)` pair for each reachable `Alt`.
pub(crate) enum InstState {
    None,
    Rune(RuneSampler),
    Alt { pick: BigUint, total: BigUint },
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unseen,
    Active,
    Done,
}

/// Counts, for every instruction, the number of distinct ways of reaching
/// `Match` from it. Instructions that cannot reach `Match` (or are not
/// reachable from `start` at all) keep weight zero.
///
/// The traversal is a memoized depth-first walk using an explicit stack;
/// expanded quantifiers produce instruction chains deep enough that
/// recursing per instruction would risk the call stack. Popping an
/// instruction that is still in progress means the program graph has a
/// cycle, i.e. the pattern admits unboundedly many strings.
pub(crate) fn match_counts(
    prog: &Program,
    distinct_runes: bool,
) -> Result<Vec<BigUint>, RexgenError> {
    let mut weights = vec![BigUint::zero(); prog.len()];
    let mut marks = vec![Mark::Unseen; prog.len()];

    // (pc, true) frames compute the weight once every successor is done.
    let mut stack: Vec<(InstPtr, bool)> = vec![(prog.start, false)];
    while let Some((pc, children_done)) = stack.pop() {
        let inst = &prog[pc];

        if children_done {
            weights[pc] = match inst.op {
                Opcode::Match => BigUint::one(),
                Opcode::Rune if distinct_runes => &weights[inst.out] * inst.num_runes(),
                Opcode::Rune | Opcode::Rune1 | Opcode::Capture => weights[inst.out].clone(),
                Opcode::Alt => &weights[inst.out] + &weights[inst.arg],
                Opcode::Fail | Opcode::Nop => BigUint::zero(),
            };
            marks[pc] = Mark::Done;
            continue;
        }

        match marks[pc] {
            Mark::Done => continue,
            Mark::Active => return Err(RexgenError::TooManyRepeat),
            Mark::Unseen => {}
        }
        marks[pc] = Mark::Active;
        stack.push((pc, true));
        match inst.op {
            Opcode::Rune | Opcode::Rune1 | Opcode::Capture => stack.push((inst.out, false)),
            Opcode::Alt => {
                stack.push((inst.out, false));
                stack.push((inst.arg, false));
            }
            Opcode::Match | Opcode::Fail | Opcode::Nop => {}
        }
    }

    Ok(weights)
}

/// Builds the per-instruction state consumed by the generation loop.
///
/// An `Alt` whose combined branch weight is zero cannot be reached by any
/// sampled path and gets no state; reaching one anyway is a bug the
/// generation loop treats as fatal.
pub(crate) fn inst_states(
    prog: &Program,
    weights: &[BigUint],
    mode: Mode,
) -> Result<Vec<InstState>, RexgenError> {
    if let Mode::Probability(p) = mode {
        if !(0..i64::MAX).contains(&p) {
            return Err(RexgenError::InvalidProbability(p));
        }
    }

    let states = prog
        .iter()
        .map(|inst| match inst.op {
            Opcode::Rune => InstState::Rune(RuneSampler::new(&inst.runes)),
            Opcode::Alt => match mode {
                Mode::Probability(p) => InstState::Alt {
                    pick: BigUint::from(p as u64),
                    total: BigUint::from(i64::MAX as u64),
                },
                Mode::Uniform | Mode::DistinctRunes => {
                    let total = &weights[inst.out] + &weights[inst.arg];
                    if total.is_zero() {
                        InstState::None
                    } else {
                        InstState::Alt { pick: weights[inst.out].clone(), total }
                    }
                }
            },
            _ => InstState::None,
        })
        .collect();

    Ok(states)
}
