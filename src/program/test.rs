use super::{parse, Compiler, Opcode, Program};
use crate::errors::RexgenError;

fn compile(pattern: &str) -> Result<Program, RexgenError> {
    Compiler::compile(&parse(pattern, "")?)
}

/// Follows the `out` chain from `start`, returning the opcodes visited.
fn straight_line_ops(prog: &Program) -> Vec<Opcode> {
    let mut ops = Vec::new();
    let mut pc = prog.start;
    loop {
        let inst = &prog[pc];
        ops.push(inst.op);
        if inst.op == Opcode::Match {
            return ops;
        }
        assert_ne!(inst.op, Opcode::Alt, "straight-line walk hit a branch");
        pc = inst.out;
    }
}

#[test]
fn test_literal_chain() {
    let prog = compile("abc").unwrap();
    assert_eq!(
        straight_line_ops(&prog),
        vec![
            Opcode::Capture,
            Opcode::Rune1,
            Opcode::Rune1,
            Opcode::Rune1,
            Opcode::Capture,
            Opcode::Match,
        ]
    );
    assert_eq!(prog.num_cap, 2);
}

#[test]
fn test_empty_pattern_compiles() {
    let prog = compile("").unwrap();
    assert_eq!(
        straight_line_ops(&prog),
        vec![Opcode::Capture, Opcode::Capture, Opcode::Match]
    );
}

#[test]
fn test_single_codepoint_class_becomes_rune1() {
    let prog = compile("[a]").unwrap();
    assert!(prog.iter().any(|inst| inst.op == Opcode::Rune1));
    assert!(prog.iter().all(|inst| inst.op != Opcode::Rune));
}

#[test]
fn test_class_ranges_flattened_in_order() {
    let prog = compile("[a-z0-9]").unwrap();
    let rune = prog.iter().find(|inst| inst.op == Opcode::Rune).unwrap();
    assert_eq!(rune.runes, vec!['0', '9', 'a', 'z']);
    assert_eq!(rune.num_runes(), 36);
}

#[test]
fn test_capture_slots() {
    let prog = compile("(a)|b").unwrap();
    assert_eq!(prog.num_cap, 4);
    let slots: Vec<usize> = prog
        .iter()
        .filter(|inst| inst.op == Opcode::Capture)
        .map(|inst| inst.arg)
        .collect();
    assert_eq!(slots, vec![0, 2, 3, 1]);
}

#[test]
fn test_alternation_folds_left() {
    let prog = compile("a|b|c").unwrap();
    let alts = prog.iter().filter(|inst| inst.op == Opcode::Alt).count();
    assert_eq!(alts, 2);
}

#[test]
fn test_bounded_repeat_is_nested_optionals() {
    // a{1,3} lowers to a(a(a)?)?: three Rune1s, two Alts, no cycles.
    let prog = compile("a{1,16}").unwrap();
    let rune1s = prog.iter().filter(|inst| inst.op == Opcode::Rune1).count();
    let alts = prog.iter().filter(|inst| inst.op == Opcode::Alt).count();
    assert_eq!(rune1s, 16);
    assert_eq!(alts, 15);
}

#[test]
fn test_unbounded_repeat_compiles_to_cycle() {
    // The cycle is rejected later, by the weight pass; compilation itself
    // must produce the back-edge.
    let prog = compile("a*").unwrap();
    let alt = prog.iter().position(|inst| inst.op == Opcode::Alt).unwrap();
    let body = prog[alt].out;
    assert_eq!(prog[body].op, Opcode::Rune1);
    assert_eq!(prog[body].out, alt);
}

#[test]
fn test_anchors_rejected() {
    assert!(matches!(compile("^a"), Err(RexgenError::Unsupported(_))));
    assert!(matches!(compile("a$"), Err(RexgenError::Unsupported(_))));
    assert!(matches!(compile(r"\babc\b"), Err(RexgenError::Unsupported(_))));
}

#[test]
fn test_parse_errors_surface() {
    assert!(matches!(parse("[a-z", ""), Err(RexgenError::Parse(_))));
    assert!(matches!(parse("a{2,1}", ""), Err(RexgenError::Parse(_))));
}

#[test]
fn test_unknown_flag() {
    assert!(matches!(parse("abc", "iq"), Err(RexgenError::UnknownFlag('q'))));
}

#[test]
fn test_program_debug_dump() {
    let prog = compile("a|b").unwrap();
    let dump = format!("{:?}", prog);
    assert!(dump.contains("Alt"));
    assert!(dump.contains("(start)"));
}
