//! Validation driver: parses one top-level item at a time, registers
//! declarations, validates bodies, and maps the first error to a verdict.

use std::fmt;

use crate::ast::{Declaration, Item};
use crate::error::CheckError;
use crate::lexer::{Lexer, Spanned};
use crate::parser::Parser;
use crate::symbols::{Scope, SymbolTable};
use crate::validate::validate_block;
use crate::{ACCEPT, REJECT_PREFIX, ROBOT_STATE_VALUES};

/// Knobs for one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Names accepted as values without a declaration
    pub builtin_values: Vec<String>,
}

impl CheckOptions {
    /// Also accept the robot's state names (`myX`, `chipsHere`, ...) as values.
    pub fn with_robot_values(mut self) -> Self {
        for name in ROBOT_STATE_VALUES {
            if !self.builtin_values.iter().any(|v| v.as_str() == *name) {
                self.builtin_values.push((*name).to_owned());
            }
        }
        self
    }
}

// ──────────────────────────────────────────────
// Verdict
// ──────────────────────────────────────────────

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted,
    Rejected(CheckError),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn error(&self) -> Option<&CheckError> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(e) => Some(e),
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Verdict::Accepted => serde_json::json!({
                "verdict": ACCEPT,
                "error":   null,
            }),
            Verdict::Rejected(e) => serde_json::json!({
                "verdict": "no",
                "error":   e.to_json_value(),
            }),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted => f.write_str(ACCEPT),
            // I/O failures are reported as-is, not as a rejected program.
            Verdict::Rejected(e) if e.stage() == "io" => write!(f, "{}", e),
            Verdict::Rejected(e) => write!(f, "{}{}", REJECT_PREFIX, e),
        }
    }
}

impl From<Result<(), CheckError>> for Verdict {
    fn from(result: Result<(), CheckError>) -> Self {
        match result {
            Ok(()) => Verdict::Accepted,
            Err(e) => Verdict::Rejected(e),
        }
    }
}

// ──────────────────────────────────────────────
// Entry points
// ──────────────────────────────────────────────

/// Validate a complete program with default options.
pub fn check_source(src: &str) -> Verdict {
    check_source_with(src, &CheckOptions::default())
}

pub fn check_source_with(src: &str, options: &CheckOptions) -> Verdict {
    let verdict = Verdict::from(run(src, options));
    match verdict.error() {
        None => tracing::debug!("program accepted"),
        Some(e) => tracing::debug!(stage = e.stage(), line = ?e.line(), "program rejected: {}", e),
    }
    verdict
}

/// Each top-level item is checked as soon as it is parsed, so errors are
/// reported in item order. Within one item the whole item is parsed first,
/// so a syntax error anywhere in it wins over an earlier semantic one.
///
/// Tokens before an unrecognized character are still parsed and checked;
/// the lex error only wins if nothing earlier fails first.
fn run(src: &str, options: &CheckOptions) -> Result<(), CheckError> {
    let mut tokens: Vec<Spanned> = Vec::new();
    let mut lex_error = None;
    for tok in Lexer::new(src) {
        match tok {
            Ok(t) => tokens.push(t),
            Err(e) => {
                lex_error = Some(e);
                break;
            }
        }
    }

    let result = check_tokens(&tokens, options);
    match lex_error {
        None => result,
        Some(lex) => match result {
            Err(e) if !e.is_end_of_input() => Err(e),
            _ => Err(lex),
        },
    }
}

fn check_tokens(tokens: &[Spanned], options: &CheckOptions) -> Result<(), CheckError> {
    let mut symbols = SymbolTable::new();
    let mut parser = Parser::new(tokens);
    while let Some(item) = parser.next_item()? {
        check_item(&item, &mut symbols, options)?;
    }
    tracing::trace!(
        variables = symbols.variable_count(),
        macros = symbols.macro_count(),
        "all items checked"
    );
    Ok(())
}

/// Register a declaration or validate an EXEC block against `symbols`.
///
/// A macro is registered before its body is validated, so the body may
/// call the macro itself.
pub fn check_item(
    item: &Item,
    symbols: &mut SymbolTable,
    options: &CheckOptions,
) -> Result<(), CheckError> {
    match item {
        Item::Declaration(Declaration::Var(v)) => symbols.declare_variable(&v.name, v.value, v.prov),
        Item::Declaration(Declaration::Macro(m)) => {
            symbols.declare_macro(&m.name, m.params.clone(), m.prov)?;
            let scope = Scope::global(symbols)
                .with_params(&m.params)
                .with_builtins(&options.builtin_values);
            validate_block(&m.body, &scope)
        }
        Item::Exec(block) => {
            let scope = Scope::global(symbols).with_builtins(&options.builtin_values);
            validate_block(block, &scope)
        }
    }
}

// ──────────────────────────────────────────────
// Interactive session
// ──────────────────────────────────────────────

/// Line-by-line input. Every new line re-validates everything entered so far
/// with fresh symbol tables.
#[derive(Debug, Clone, Default)]
pub struct Session {
    lines: Vec<String>,
    options: CheckOptions,
}

impl Session {
    pub fn new(options: CheckOptions) -> Self {
        Session {
            lines: Vec::new(),
            options,
        }
    }

    pub fn push_line(&mut self, line: &str) -> Verdict {
        self.lines.push(line.trim_end_matches(['\r', '\n']).to_owned());
        check_source_with(&self.source(), &self.options)
    }

    pub fn source(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn reset(&mut self) {
        self.lines.clear();
    }
}
