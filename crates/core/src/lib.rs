//! robolang-core: front-end for the robot control language.
//!
//! Turns program text into a verdict: lex, parse one top-level item at a
//! time, register declarations in a run-scoped symbol table and validate
//! every statement of every nested block.
//!
//! # Public API
//!
//! - [`check_source()`] -- validate a whole program, returning a [`Verdict`]
//! - [`Session`] -- interactive line-by-line validation
//! - [`check_path()`] -- read through a [`SourceProvider`] and validate
//! - [`CheckError`] -- the error taxonomy
//! - AST types: [`Program`], [`Declaration`], [`Block`], [`Statement`],
//!   [`Value`], [`Condition`]
//!
//! The individual stages ([`lexer::lex`], [`parser::parse`],
//! [`validate::validate_block`]) are public for selective use.

/// Verdict text for an accepted program.
pub const ACCEPT: &str = "si";
/// Prefix of every rejection message.
pub const REJECT_PREFIX: &str = "no: ";

/// Robot state names that can be enabled as undeclared values.
pub const ROBOT_STATE_VALUES: &[&str] = &[
    "size",
    "myX",
    "myY",
    "myChips",
    "myBalloons",
    "balloonsHere",
    "chipsHere",
    "roomForChips",
];

/// Remaining stack below which block recursion grows a new segment.
pub(crate) const STACK_RED_ZONE_BYTES: usize = 64 * 1024;
/// Size of each stack segment allocated for deep nesting.
pub(crate) const STACK_GROW_BYTES: usize = 1024 * 1024;

pub mod ast;
pub mod check;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod symbols;
pub mod validate;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{
    Block, CommandCall, CompassOrientation, Condition, Declaration, Item, MacroDecl, Program,
    Provenance, SimpleDirection, Statement, Value, VariableDecl,
};
pub use check::{CheckOptions, Session, Verdict};
pub use error::CheckError;
pub use source::{FileSystemProvider, InMemoryProvider, SourceProvider};
pub use symbols::{ResolvedValue, Scope, SymbolTable};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use check::{check_item, check_source, check_source_with};
pub use parser::parse;
pub use source::check_path;
