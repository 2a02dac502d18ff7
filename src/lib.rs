//! Random string generation driven by regular expressions.
//!
//! A pattern is compiled into a small instruction program (an NFA encoded as
//! a flat vector of branching instructions), every program point is weighted
//! by the number of matching strings reachable from it, and generation walks
//! the program sampling branches in proportion to those weights. Character
//! classes are sampled in O(1) with Walker's alias method, and weights use
//! arbitrary-precision integers so wide quantifiers like `[a-z]{16}` don't
//! overflow.
//!
//! ```
//! use rexgen::Generator;
//!
//! let mut generator = Generator::new(r"\d{2,3}-\d{3,4}-\d{3,4}", "").unwrap();
//! let phone = generator.generate();
//! assert!(phone.chars().filter(|c| *c == '-').count() == 2);
//! ```
//!
//! Patterns whose language is infinite (`a*`, `.+`) are rejected at
//! construction time with [`RexgenError::TooManyRepeat`]; everything a
//! constructor returns is guaranteed to terminate on every `generate` call.

// This module style is chosen to keep all related files grouped in the same folder
// without introducing many files named "mod.rs".

#[path = "generator/generator.rs"]
pub mod generator;

#[path = "program/program.rs"]
pub mod program;

#[path = "sampler/sampler.rs"]
pub mod sampler;

pub mod errors;

pub use errors::RexgenError;
pub use generator::{Generator, Mode};
pub use sampler::RuneSampler;
