//! Semantic validation -- command argument domains, condition operands and
//! identifier resolution, applied to every statement of every nested block.

mod commands;

pub use commands::{
    builtin_commands, is_builtin_command, COMPASS_ORIENTATIONS, MOVE_DIRECTIONS, TURN_DIRECTIONS,
};

use crate::ast::{Block, Condition, Statement};
use crate::error::CheckError;
use crate::symbols::{resolve_value, Scope};
use crate::{STACK_GROW_BYTES, STACK_RED_ZONE_BYTES};

pub fn validate_block(block: &Block, scope: &Scope<'_>) -> Result<(), CheckError> {
    stacker::maybe_grow(STACK_RED_ZONE_BYTES, STACK_GROW_BYTES, || {
        block
            .statements
            .iter()
            .try_for_each(|stmt| validate_statement(stmt, scope))
    })
}

/// Check one statement, then every block nested inside it in source order.
pub fn validate_statement(stmt: &Statement, scope: &Scope<'_>) -> Result<(), CheckError> {
    match stmt {
        Statement::Command(call) | Statement::SafeExe { inner: call, .. } => {
            commands::validate_command(call, scope)?
        }
        Statement::Conditional { condition, .. } | Statement::DoLoop { condition, .. } => {
            validate_condition(condition, scope)?
        }
        Statement::RepLoop { count, .. } => {
            resolve_value(count, scope)?;
        }
        Statement::Nop { .. } => {}
    }
    for block in stmt.blocks() {
        validate_block(block, scope)?;
    }
    Ok(())
}

/// Directions and orientations are checked by the parser; only `zero?`
/// has an operand left to resolve.
pub fn validate_condition(condition: &Condition, scope: &Scope<'_>) -> Result<(), CheckError> {
    match condition {
        Condition::IsBlocked { .. } | Condition::IsFacing { .. } => Ok(()),
        Condition::IsZero { value } => resolve_value(value, scope).map(|_| ()),
    }
}
