//! Command vocabulary and per-command argument checks.

use crate::ast::{CommandCall, Value};
use crate::error::CheckError;
use crate::symbols::{resolve_value, Scope};

/// Directions accepted by `turnToMy`.
pub const TURN_DIRECTIONS: &[&str] = &["left", "right", "back"];
/// Orientations accepted by `turnToThe`.
pub const COMPASS_ORIENTATIONS: &[&str] = &["north", "south", "east", "west"];
/// Steps accepted by `moves`.
pub const MOVE_DIRECTIONS: &[&str] = &["forward", "right", "left", "backwards", "back"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    /// One word out of a fixed list
    Word(&'static [&'static str]),
    /// Numeral or resolvable identifier
    Value,
    /// Any number of words out of a fixed list
    Words(&'static [&'static str]),
    Nothing,
}

struct CommandSpec {
    name: &'static str,
    domain: Domain,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec { name: "turnToMy", domain: Domain::Word(TURN_DIRECTIONS) },
    CommandSpec { name: "turnToThe", domain: Domain::Word(COMPASS_ORIENTATIONS) },
    CommandSpec { name: "walk", domain: Domain::Value },
    CommandSpec { name: "jump", domain: Domain::Value },
    CommandSpec { name: "drop", domain: Domain::Value },
    CommandSpec { name: "pick", domain: Domain::Value },
    CommandSpec { name: "grab", domain: Domain::Value },
    CommandSpec { name: "letGo", domain: Domain::Value },
    CommandSpec { name: "pop", domain: Domain::Value },
    CommandSpec { name: "moves", domain: Domain::Words(MOVE_DIRECTIONS) },
    CommandSpec { name: "nop", domain: Domain::Nothing },
];

/// Built-in command names, including `safeExe`.
pub fn builtin_commands() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name).chain(std::iter::once("safeExe"))
}

pub fn is_builtin_command(name: &str) -> bool {
    builtin_commands().any(|c| c == name)
}

pub(super) fn validate_command(call: &CommandCall, scope: &Scope<'_>) -> Result<(), CheckError> {
    if let Some(spec) = COMMANDS.iter().find(|c| c.name == call.name) {
        return check_domain(call, spec.domain, scope);
    }
    if let Some(entry) = scope.symbols.macro_entry(&call.name) {
        check_arity(call, entry.params.len())?;
        for arg in &call.args {
            resolve_value(arg, scope)?;
        }
        return Ok(());
    }
    Err(CheckError::validation(
        call.prov.line,
        call.prov.col,
        format!("unknown command '{}'", call.name),
    ))
}

fn check_domain(call: &CommandCall, domain: Domain, scope: &Scope<'_>) -> Result<(), CheckError> {
    match domain {
        Domain::Word(words) => {
            check_arity(call, 1)?;
            check_word(call, &call.args[0], words)
        }
        Domain::Value => {
            check_arity(call, 1)?;
            resolve_value(&call.args[0], scope).map(|_| ())
        }
        Domain::Words(words) => call
            .args
            .iter()
            .try_for_each(|arg| check_word(call, arg, words)),
        Domain::Nothing => check_arity(call, 0),
    }
}

fn check_word(call: &CommandCall, arg: &Value, words: &[&str]) -> Result<(), CheckError> {
    match arg.as_name() {
        Some(w) if words.contains(&w) => Ok(()),
        _ => {
            let prov = arg.prov();
            Err(CheckError::validation(
                prov.line,
                prov.col,
                format!(
                    "invalid argument '{}' for {}; expected one of {}",
                    arg,
                    call.name,
                    words.join(", ")
                ),
            ))
        }
    }
}

fn check_arity(call: &CommandCall, expected: usize) -> Result<(), CheckError> {
    if call.args.len() == expected {
        return Ok(());
    }
    Err(CheckError::validation(
        call.prov.line,
        call.prov.col,
        format!(
            "'{}' takes {} argument{}, got {}",
            call.name,
            expected,
            if expected == 1 { "" } else { "s" },
            call.args.len()
        ),
    ))
}
