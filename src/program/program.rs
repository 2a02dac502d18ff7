mod compile;

#[cfg(test)]
mod test;

use std::fmt;
use std::ops::Deref;

use itertools::Itertools;

pub(crate) use compile::{outer_bounds, parse, Compiler};

/// The index of an instruction in a program.
pub type InstPtr = usize;

/// Operation performed by a single instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    /// Emit one codepoint drawn from a multi-range character class.
    Rune,
    /// Emit exactly one known codepoint.
    Rune1,
    /// Branch to one of two successor instructions.
    Alt,
    /// Capture-group marker. Transparent for generation.
    Capture,
    /// The program has produced a complete string.
    Match,
    /// Dead end. Never emitted by the compiler in this crate.
    Fail,
    /// No-op. Never emitted by the compiler in this crate.
    Nop,
}

/// An instruction, the underlying unit of a compiled pattern.
///
/// `out` is the next instruction on the primary path. `arg` is the secondary
/// successor for [`Opcode::Alt`]; for [`Opcode::Capture`] it holds the
/// capture slot instead. `runes` stores inclusive codepoint ranges flattened
/// into `[lo0, hi0, lo1, hi1, ...]` pairs for `Rune`, or a single codepoint
/// for `Rune1`. Ranges are sorted and disjoint as produced by the parser.
#[derive(Clone, Debug)]
pub struct Inst {
    pub op: Opcode,
    pub out: InstPtr,
    pub arg: InstPtr,
    pub runes: Vec<char>,
}

impl Inst {
    fn new(op: Opcode) -> Inst {
        Inst { op, out: 0, arg: 0, runes: Vec::new() }
    }

    /// The number of distinct codepoints this instruction can emit.
    pub fn num_runes(&self) -> u64 {
        if self.runes.len() == 1 {
            1
        } else {
            self.runes
                .iter()
                .tuples()
                .map(|(lo, hi)| *hi as u64 - *lo as u64 + 1)
                .sum()
        }
    }
}

/// A compiled pattern: a flat sequence of instructions whose `out`/`arg`
/// fields form a (possibly cyclic) directed graph, plus the entry point.
///
/// The whole pattern is wrapped in capture slots 0 and 1 followed by a
/// single `Match`, so `num_cap` is at least 2.
#[derive(Clone)]
pub struct Program {
    pub insts: Vec<Inst>,
    pub start: InstPtr,
    pub num_cap: usize,
}

impl Deref for Program {
    type Target = [Inst];

    fn deref(&self) -> &Self::Target {
        &self.insts
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn with_goto(cur: usize, goto: usize, fmtd: String) -> String {
            if goto == cur + 1 {
                fmtd
            } else {
                format!("{} (goto: {})", fmtd, goto)
            }
        }

        for (pc, inst) in self.iter().enumerate() {
            match inst.op {
                Opcode::Match => write!(f, "{:04} Match", pc)?,
                Opcode::Fail => write!(f, "{:04} Fail", pc)?,
                Opcode::Nop => write!(f, "{:04} {}", pc, with_goto(pc, inst.out, "Nop".to_owned()))?,
                Opcode::Alt => write!(f, "{:04} Alt({}, {})", pc, inst.out, inst.arg)?,
                Opcode::Capture => {
                    let s = format!("Capture({})", inst.arg);
                    write!(f, "{:04} {}", pc, with_goto(pc, inst.out, s))?;
                }
                Opcode::Rune1 => {
                    let s = format!("{:?}", inst.runes[0]);
                    write!(f, "{:04} {}", pc, with_goto(pc, inst.out, s))?;
                }
                Opcode::Rune => {
                    let ranges = inst
                        .runes
                        .iter()
                        .tuples()
                        .map(|(lo, hi)| format!("{:?}-{:?}", lo, hi))
                        .join(" ");
                    write!(f, "{:04} {}", pc, with_goto(pc, inst.out, format!("[{}]", ranges)))?;
                }
            }
            if pc == self.start {
                write!(f, " (start)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
