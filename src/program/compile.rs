use regex_syntax::hir::{Class, GroupKind, Hir, HirKind, Literal, RepetitionKind, RepetitionRange};
use regex_syntax::ParserBuilder;

use super::{Inst, InstPtr, Opcode, Program};
use crate::errors::RexgenError;

/// Parse a pattern under the given flag characters.
///
/// Flags map onto `ParserBuilder` options: `i` (case insensitive), `m`
/// (multi line), `s` (dot matches newline), `U` (swap greed), `x` (ignore
/// whitespace), `o` (octal escapes).
pub(crate) fn parse(pattern: &str, flags: &str) -> Result<Hir, RexgenError> {
    let mut parser = ParserBuilder::new();
    for flag in flags.chars() {
        match flag {
            'o' => parser.octal(true),
            'x' => parser.ignore_whitespace(true),
            'i' => parser.case_insensitive(true),
            'm' => parser.multi_line(true),
            's' => parser.dot_matches_new_line(true),
            'U' => parser.swap_greed(true),
            _ => return Err(RexgenError::UnknownFlag(flag)),
        };
    }
    Ok(parser.build().parse(pattern)?)
}

/// Repetition bounds of the outermost expression, `None` meaning unbounded.
/// Informational only; the compiled program is what bounds output length.
pub(crate) fn outer_bounds(hir: &Hir) -> (u32, Option<u32>) {
    match hir.kind() {
        HirKind::Repetition(rep) => match &rep.kind {
            RepetitionKind::ZeroOrOne => (0, Some(1)),
            RepetitionKind::ZeroOrMore => (0, None),
            RepetitionKind::OneOrMore => (1, None),
            RepetitionKind::Range(RepetitionRange::Exactly(n)) => (*n, Some(*n)),
            RepetitionKind::Range(RepetitionRange::AtLeast(n)) => (*n, None),
            RepetitionKind::Range(RepetitionRange::Bounded(n, m)) => (*n, Some(*m)),
        },
        _ => (0, Some(0)),
    }
}

/// An instruction field that still needs its target filled in once the
/// following instruction is known.
#[derive(Clone, Copy)]
enum Hole {
    Out(InstPtr),
    Arg(InstPtr),
}

/// A compiled subexpression: its entry point plus the dangling exits that
/// must be patched to whatever comes next. `start` is `None` for fragments
/// that emitted no instructions at all (empty subexpressions), which are
/// fully transparent to their surroundings.
struct Frag {
    start: Option<InstPtr>,
    ends: Vec<Hole>,
}

impl Frag {
    fn empty() -> Frag {
        Frag { start: None, ends: Vec::new() }
    }
}

/// Compiles a parsed pattern into an instruction program.
///
/// Instructions are appended linearly and wired up by patching holes, the
/// same way a backtracking matcher's compiler lays out split instructions.
/// Bounded repetitions `x{n,m}` become `x^n (x (x ...)?)?` so that each
/// possible repetition count corresponds to exactly one path through the
/// program.
pub(crate) struct Compiler {
    insts: Vec<Inst>,
    num_cap: usize,
}

impl Compiler {
    pub(crate) fn compile(hir: &Hir) -> Result<Program, RexgenError> {
        let mut c = Compiler { insts: Vec::new(), num_cap: 2 };

        let open = c.emit(Opcode::Capture);
        c.insts[open].arg = 0;
        let body = c.c(hir)?;
        let close = c.emit(Opcode::Capture);
        c.insts[close].arg = 1;
        match body.start {
            Some(start) => {
                c.insts[open].out = start;
                c.patch(&body.ends, close);
            }
            None => c.insts[open].out = close,
        }
        let mat = c.emit(Opcode::Match);
        c.insts[close].out = mat;

        Ok(Program { insts: c.insts, start: open, num_cap: c.num_cap })
    }

    fn c(&mut self, hir: &Hir) -> Result<Frag, RexgenError> {
        match hir.kind() {
            HirKind::Empty => Ok(Frag::empty()),
            HirKind::Literal(Literal::Unicode(ch)) => Ok(self.rune1(*ch)),
            HirKind::Literal(Literal::Byte(_)) => {
                Err(RexgenError::Unsupported("byte literal".to_owned()))
            }
            HirKind::Class(Class::Unicode(class)) => {
                let ranges = class.ranges();
                if ranges.len() == 1 && ranges[0].start() == ranges[0].end() {
                    return Ok(self.rune1(ranges[0].start()));
                }
                let mut runes = Vec::with_capacity(ranges.len() * 2);
                for r in ranges {
                    runes.push(r.start());
                    runes.push(r.end());
                }
                let pc = self.emit(Opcode::Rune);
                self.insts[pc].runes = runes;
                Ok(Frag { start: Some(pc), ends: vec![Hole::Out(pc)] })
            }
            HirKind::Class(Class::Bytes(_)) => {
                Err(RexgenError::Unsupported("byte class".to_owned()))
            }
            HirKind::Anchor(_) | HirKind::WordBoundary(_) => {
                Err(RexgenError::Unsupported(hir.to_string()))
            }
            HirKind::Group(group) => match &group.kind {
                GroupKind::NonCapturing => self.c(&group.hir),
                GroupKind::CaptureIndex(i) | GroupKind::CaptureName { index: i, .. } => {
                    let slot = 2 * *i as usize;
                    self.num_cap = self.num_cap.max(slot + 2);
                    let open = self.emit(Opcode::Capture);
                    self.insts[open].arg = slot;
                    let body = self.c(&group.hir)?;
                    let close = self.emit(Opcode::Capture);
                    self.insts[close].arg = slot + 1;
                    match body.start {
                        Some(start) => {
                            self.insts[open].out = start;
                            self.patch(&body.ends, close);
                        }
                        None => self.insts[open].out = close,
                    }
                    Ok(Frag { start: Some(open), ends: vec![Hole::Out(close)] })
                }
            },
            HirKind::Concat(subs) => {
                let mut frag = Frag::empty();
                for sub in subs {
                    let next = self.c(sub)?;
                    frag = self.cat(frag, next);
                }
                Ok(frag)
            }
            HirKind::Alternation(subs) => {
                let mut frag = Frag::empty();
                for (i, sub) in subs.iter().enumerate() {
                    let next = self.c(sub)?;
                    frag = if i == 0 { next } else { self.alt(frag, next) };
                }
                Ok(frag)
            }
            HirKind::Repetition(rep) => {
                let greedy = rep.greedy;
                match &rep.kind {
                    RepetitionKind::ZeroOrOne => {
                        let body = self.c(&rep.hir)?;
                        Ok(self.question(body, greedy))
                    }
                    RepetitionKind::ZeroOrMore => self.star(&rep.hir, greedy),
                    RepetitionKind::OneOrMore => self.plus(&rep.hir, greedy),
                    RepetitionKind::Range(RepetitionRange::Exactly(n)) => {
                        self.repeat_exact(&rep.hir, *n)
                    }
                    RepetitionKind::Range(RepetitionRange::AtLeast(n)) => {
                        let head = self.repeat_exact(&rep.hir, *n)?;
                        let tail = self.star(&rep.hir, greedy)?;
                        Ok(self.cat(head, tail))
                    }
                    RepetitionKind::Range(RepetitionRange::Bounded(n, m)) => {
                        let head = self.repeat_exact(&rep.hir, *n)?;
                        // Innermost optional first: x{1,3} ends up as x(x(x)?)?.
                        let mut tail = Frag::empty();
                        for _ in *n..*m {
                            let body = self.c(&rep.hir)?;
                            let inner = self.cat(body, tail);
                            tail = self.question(inner, greedy);
                        }
                        Ok(self.cat(head, tail))
                    }
                }
            }
        }
    }

    /// Joins two fragments in sequence, patching `a`'s exits to `b`'s entry.
    fn cat(&mut self, a: Frag, b: Frag) -> Frag {
        match (a.start, b.start) {
            (None, _) => b,
            (Some(_), None) => a,
            (Some(start), Some(next)) => {
                self.patch(&a.ends, next);
                Frag { start: Some(start), ends: b.ends }
            }
        }
    }

    /// Branches between two fragments. A transparent branch leaves the
    /// corresponding edge dangling so it flows to whatever follows.
    fn alt(&mut self, x: Frag, y: Frag) -> Frag {
        let pc = self.emit(Opcode::Alt);
        let mut ends = Vec::with_capacity(x.ends.len() + y.ends.len());
        match x.start {
            Some(start) => {
                self.insts[pc].out = start;
                ends.extend(x.ends);
            }
            None => ends.push(Hole::Out(pc)),
        }
        match y.start {
            Some(start) => {
                self.insts[pc].arg = start;
                ends.extend(y.ends);
            }
            None => ends.push(Hole::Arg(pc)),
        }
        Frag { start: Some(pc), ends }
    }

    fn question(&mut self, body: Frag, greedy: bool) -> Frag {
        if greedy {
            self.alt(body, Frag::empty())
        } else {
            self.alt(Frag::empty(), body)
        }
    }

    fn star(&mut self, hir: &Hir, greedy: bool) -> Result<Frag, RexgenError> {
        let pc = self.emit(Opcode::Alt);
        let body = self.c(hir)?;
        match body.start {
            Some(start) => {
                // Loop back to the branch point after each iteration.
                self.patch(&body.ends, pc);
                if greedy {
                    self.insts[pc].out = start;
                    Ok(Frag { start: Some(pc), ends: vec![Hole::Arg(pc)] })
                } else {
                    self.insts[pc].arg = start;
                    Ok(Frag { start: Some(pc), ends: vec![Hole::Out(pc)] })
                }
            }
            None => Ok(Frag { start: Some(pc), ends: vec![Hole::Out(pc), Hole::Arg(pc)] }),
        }
    }

    fn plus(&mut self, hir: &Hir, greedy: bool) -> Result<Frag, RexgenError> {
        let body = self.c(hir)?;
        match body.start {
            Some(start) => {
                let pc = self.emit(Opcode::Alt);
                self.patch(&body.ends, pc);
                if greedy {
                    self.insts[pc].out = start;
                    Ok(Frag { start: Some(start), ends: vec![Hole::Arg(pc)] })
                } else {
                    self.insts[pc].arg = start;
                    Ok(Frag { start: Some(start), ends: vec![Hole::Out(pc)] })
                }
            }
            None => Ok(Frag::empty()),
        }
    }

    fn repeat_exact(&mut self, hir: &Hir, n: u32) -> Result<Frag, RexgenError> {
        let mut frag = Frag::empty();
        for _ in 0..n {
            let body = self.c(hir)?;
            frag = self.cat(frag, body);
        }
        Ok(frag)
    }

    fn rune1(&mut self, ch: char) -> Frag {
        let pc = self.emit(Opcode::Rune1);
        self.insts[pc].runes = vec![ch];
        Frag { start: Some(pc), ends: vec![Hole::Out(pc)] }
    }

    /// Appends a new instruction and returns its index. `out`/`arg` start
    /// out as placeholders to be patched.
    fn emit(&mut self, op: Opcode) -> InstPtr {
        self.insts.push(Inst::new(op));
        self.insts.len() - 1
    }

    fn patch(&mut self, holes: &[Hole], target: InstPtr) {
        for hole in holes {
            match *hole {
                Hole::Out(pc) => self.insts[pc].out = target,
                Hole::Arg(pc) => self.insts[pc].arg = target,
            }
        }
    }
}
