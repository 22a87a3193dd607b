//! Run-scoped symbol tables for variables and macros, plus the lookup
//! scope used when resolving values.

use std::collections::HashMap;

use crate::ast::{Provenance, Value};
use crate::error::CheckError;
use crate::validate::is_builtin_command;

#[derive(Debug, Clone, PartialEq)]
pub struct VariableEntry {
    pub value: i64,
    pub prov: Provenance,
}

/// A declared macro's signature. The body stays in the AST and is
/// validated once, at declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroEntry {
    pub params: Vec<String>,
    pub prov: Provenance,
}

/// Declared variables and macros for one validation run.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    variables: HashMap<String, VariableEntry>,
    macros: HashMap<String, MacroEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_variable(
        &mut self,
        name: &str,
        value: i64,
        prov: Provenance,
    ) -> Result<(), CheckError> {
        if let Some(first) = self.variables.get(name) {
            return Err(CheckError::DuplicateDefinition {
                what: "variable",
                name: name.to_owned(),
                line: prov.line,
                first_line: Some(first.prov.line),
            });
        }
        tracing::debug!(%name, value, line = prov.line, "declared variable");
        self.variables
            .insert(name.to_owned(), VariableEntry { value, prov });
        Ok(())
    }

    pub fn declare_macro(
        &mut self,
        name: &str,
        params: Vec<String>,
        prov: Provenance,
    ) -> Result<(), CheckError> {
        if is_builtin_command(name) {
            return Err(CheckError::DuplicateDefinition {
                what: "built-in command",
                name: name.to_owned(),
                line: prov.line,
                first_line: None,
            });
        }
        if let Some(first) = self.macros.get(name) {
            return Err(CheckError::DuplicateDefinition {
                what: "macro",
                name: name.to_owned(),
                line: prov.line,
                first_line: Some(first.prov.line),
            });
        }
        tracing::debug!(%name, params = params.len(), line = prov.line, "declared macro");
        self.macros
            .insert(name.to_owned(), MacroEntry { params, prov });
        Ok(())
    }

    pub fn variable(&self, name: &str) -> Option<&VariableEntry> {
        self.variables.get(name)
    }

    pub fn macro_entry(&self, name: &str) -> Option<&MacroEntry> {
        self.macros.get(name)
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn macro_count(&self) -> usize {
        self.macros.len()
    }

    pub fn clear(&mut self) {
        self.variables.clear();
        self.macros.clear();
    }
}

// ──────────────────────────────────────────────
// Scope and resolution
// ──────────────────────────────────────────────

/// Names visible to a value at one point of the program.
///
/// Macro parameters and global variables are separate namespaces; a
/// reference is accepted if it is found in either.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub symbols: &'a SymbolTable,
    /// Parameters of the macro whose body is being checked
    pub params: Option<&'a [String]>,
    /// Extra names accepted as values without a declaration
    pub builtins: &'a [String],
}

impl<'a> Scope<'a> {
    pub fn global(symbols: &'a SymbolTable) -> Self {
        Scope {
            symbols,
            params: None,
            builtins: &[],
        }
    }

    pub fn with_params(self, params: &'a [String]) -> Self {
        Scope {
            params: Some(params),
            ..self
        }
    }

    pub fn with_builtins(self, builtins: &'a [String]) -> Self {
        Scope { builtins, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedValue {
    Number(i64),
    Variable(i64),
    /// Position in the enclosing macro's parameter list
    Parameter(usize),
    Builtin,
}

pub fn resolve_value(value: &Value, scope: &Scope<'_>) -> Result<ResolvedValue, CheckError> {
    let (name, prov) = match value {
        Value::Number { value, .. } => return Ok(ResolvedValue::Number(*value)),
        Value::VarRef { name, prov } => (name, prov),
    };
    if let Some(idx) = scope
        .params
        .and_then(|params| params.iter().position(|p| p == name))
    {
        return Ok(ResolvedValue::Parameter(idx));
    }
    if let Some(var) = scope.symbols.variable(name) {
        return Ok(ResolvedValue::Variable(var.value));
    }
    if scope.builtins.iter().any(|b| b == name) {
        return Ok(ResolvedValue::Builtin);
    }
    Err(CheckError::UnknownIdentifier {
        name: name.clone(),
        line: prov.line,
        col: prov.col,
    })
}
