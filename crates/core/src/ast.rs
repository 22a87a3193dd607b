//! Program representation produced by the parser.
//!
//! Blocks nest structurally: every brace-delimited region is a [`Block`]
//! owned by the statement or declaration that introduced it.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::{STACK_GROW_BYTES, STACK_RED_ZONE_BYTES};

// ──────────────────────────────────────────────
// Provenance
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub line: u32,
    pub col: u32,
}

// ──────────────────────────────────────────────
// Program and declarations
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub execs: Vec<Block>,
}

/// One top-level unit, in the order it appears in the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum Item {
    Declaration(Declaration),
    Exec(Block),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Var(VariableDecl),
    Macro(MacroDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Var(v) => &v.name,
            Declaration::Macro(m) => &m.name,
        }
    }

    pub fn prov(&self) -> Provenance {
        match self {
            Declaration::Var(v) => v.prov,
            Declaration::Macro(m) => m.prov,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDecl {
    pub name: String,
    pub value: i64,
    pub prov: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
    pub prov: Provenance,
}

// ──────────────────────────────────────────────
// Blocks and statements
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    /// Position of the opening brace
    pub prov: Provenance,
}

/// Nested blocks are torn down through a worklist so that dropping a
/// deeply nested program does not recurse once per level.
impl Drop for Block {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.statements);
        while let Some(mut stmt) = pending.pop() {
            stmt.take_nested_statements(&mut pending);
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(STACK_RED_ZONE_BYTES, STACK_GROW_BYTES, || {
            let mut state = serializer.serialize_struct("Block", 2)?;
            state.serialize_field("statements", &self.statements)?;
            state.serialize_field("prov", &self.prov)?;
            state.end()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandCall {
    pub name: String,
    pub args: Vec<Value>,
    pub prov: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Command(CommandCall),
    SafeExe {
        inner: CommandCall,
        prov: Provenance,
    },
    Conditional {
        negated: bool,
        condition: Condition,
        then_block: Block,
        else_block: Option<Block>,
        prov: Provenance,
    },
    DoLoop {
        condition: Condition,
        body: Block,
        prov: Provenance,
    },
    RepLoop {
        count: Value,
        body: Block,
        prov: Provenance,
    },
    Nop {
        prov: Provenance,
    },
}

impl Statement {
    pub fn prov(&self) -> Provenance {
        match self {
            Statement::Command(c) => c.prov,
            Statement::SafeExe { prov, .. }
            | Statement::Conditional { prov, .. }
            | Statement::DoLoop { prov, .. }
            | Statement::RepLoop { prov, .. }
            | Statement::Nop { prov } => *prov,
        }
    }

    /// Move the statements of every directly nested block into `into`,
    /// leaving those blocks empty.
    fn take_nested_statements(&mut self, into: &mut Vec<Statement>) {
        match self {
            Statement::Conditional {
                then_block,
                else_block,
                ..
            } => {
                into.append(&mut then_block.statements);
                if let Some(else_block) = else_block {
                    into.append(&mut else_block.statements);
                }
            }
            Statement::DoLoop { body, .. } | Statement::RepLoop { body, .. } => {
                into.append(&mut body.statements)
            }
            Statement::Command(_) | Statement::SafeExe { .. } | Statement::Nop { .. } => {}
        }
    }

    /// Nested blocks directly owned by this statement.
    pub fn blocks(&self) -> Vec<&Block> {
        match self {
            Statement::Conditional {
                then_block,
                else_block,
                ..
            } => std::iter::once(then_block).chain(else_block.iter()).collect(),
            Statement::DoLoop { body, .. } | Statement::RepLoop { body, .. } => vec![body],
            Statement::Command(_) | Statement::SafeExe { .. } | Statement::Nop { .. } => vec![],
        }
    }
}

// ──────────────────────────────────────────────
// Values and conditions
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Value {
    Number { value: i64, prov: Provenance },
    VarRef { name: String, prov: Provenance },
}

impl Value {
    pub fn prov(&self) -> Provenance {
        match self {
            Value::Number { prov, .. } | Value::VarRef { prov, .. } => *prov,
        }
    }

    /// The identifier, if this is a name rather than a numeral.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Value::VarRef { name, .. } => Some(name),
            Value::Number { .. } => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number { value, .. } => write!(f, "{}", value),
            Value::VarRef { name, .. } => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    IsBlocked { direction: SimpleDirection },
    IsFacing { orientation: CompassOrientation },
    IsZero { value: Value },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleDirection {
    Forward,
    Left,
    Right,
    Back,
    Backwards,
}

impl SimpleDirection {
    pub const ALL: [SimpleDirection; 5] = [
        SimpleDirection::Forward,
        SimpleDirection::Left,
        SimpleDirection::Right,
        SimpleDirection::Back,
        SimpleDirection::Backwards,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SimpleDirection::Forward => "forward",
            SimpleDirection::Left => "left",
            SimpleDirection::Right => "right",
            SimpleDirection::Back => "back",
            SimpleDirection::Backwards => "backwards",
        }
    }
}

impl FromStr for SimpleDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SimpleDirection::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for SimpleDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompassOrientation {
    North,
    South,
    East,
    West,
}

impl CompassOrientation {
    pub const ALL: [CompassOrientation; 4] = [
        CompassOrientation::North,
        CompassOrientation::South,
        CompassOrientation::East,
        CompassOrientation::West,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CompassOrientation::North => "north",
            CompassOrientation::South => "south",
            CompassOrientation::East => "east",
            CompassOrientation::West => "west",
        }
    }
}

impl FromStr for CompassOrientation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompassOrientation::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for CompassOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
