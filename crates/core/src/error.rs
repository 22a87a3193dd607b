use serde::Serialize;

use crate::lexer::Token;

/// A check error. The first one raised ends the validation run.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckError {
    /// Unrecognized character or malformed literal.
    #[error("line {line}, column {col}: {message}")]
    Lex { line: u32, col: u32, message: String },

    /// Grammar violation at a specific token.
    #[error("line {line}, column {col}: expected {expected}, got {found}")]
    Syntax {
        line: u32,
        col: u32,
        expected: String,
        found: String,
    },

    /// Input ended with `{` still open.
    #[error("line {line}, column {col}: block opened here is never closed")]
    UnterminatedBlock { line: u32, col: u32 },

    /// Variable or macro declared twice.
    #[error("line {line}: {what} '{name}' is already defined{}", first_seen(.first_line))]
    DuplicateDefinition {
        what: &'static str,
        name: String,
        line: u32,
        first_line: Option<u32>,
    },

    /// Identifier used as a value that resolves nowhere in scope.
    #[error("line {line}, column {col}: unknown identifier '{name}'")]
    UnknownIdentifier { name: String, line: u32, col: u32 },

    /// Argument outside a command's domain, wrong arity, unknown command.
    #[error("line {line}, column {col}: {message}")]
    Validation { line: u32, col: u32, message: String },

    /// Source file does not exist.
    #[error("file not found: {path}")]
    NotFound { path: String },

    /// Source file exists but could not be read.
    #[error("could not read '{path}': {message}")]
    Io { path: String, message: String },
}

fn first_seen(first_line: &Option<u32>) -> String {
    match first_line {
        Some(l) => format!(" (first declared at line {})", l),
        None => String::new(),
    }
}

impl CheckError {
    pub fn lex(line: u32, col: u32, message: impl Into<String>) -> Self {
        CheckError::Lex {
            line,
            col,
            message: message.into(),
        }
    }

    pub fn syntax(line: u32, col: u32, expected: impl Into<String>, found: impl Into<String>) -> Self {
        CheckError::Syntax {
            line,
            col,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn validation(line: u32, col: u32, message: impl Into<String>) -> Self {
        CheckError::Validation {
            line,
            col,
            message: message.into(),
        }
    }

    /// The front-end stage that raised this error.
    pub fn stage(&self) -> &'static str {
        match self {
            CheckError::Lex { .. } => "lex",
            CheckError::Syntax { .. } | CheckError::UnterminatedBlock { .. } => "parse",
            CheckError::DuplicateDefinition { .. } | CheckError::UnknownIdentifier { .. } => {
                "symbols"
            }
            CheckError::Validation { .. } => "validate",
            CheckError::NotFound { .. } | CheckError::Io { .. } => "io",
        }
    }

    /// Source line of the error, if it has one.
    pub fn line(&self) -> Option<u32> {
        match self {
            CheckError::Lex { line, .. }
            | CheckError::Syntax { line, .. }
            | CheckError::UnterminatedBlock { line, .. }
            | CheckError::DuplicateDefinition { line, .. }
            | CheckError::UnknownIdentifier { line, .. }
            | CheckError::Validation { line, .. } => Some(*line),
            CheckError::NotFound { .. } | CheckError::Io { .. } => None,
        }
    }

    /// True when the parser ran out of tokens rather than meeting a wrong one.
    pub fn is_end_of_input(&self) -> bool {
        match self {
            CheckError::UnterminatedBlock { .. } => true,
            CheckError::Syntax { found, .. } => *found == Token::Eof.to_string(),
            _ => false,
        }
    }

    /// Render as a flat JSON object. Always includes every field (null for missing).
    pub fn to_json_value(&self) -> serde_json::Value {
        let col = match self {
            CheckError::Lex { col, .. }
            | CheckError::Syntax { col, .. }
            | CheckError::UnterminatedBlock { col, .. }
            | CheckError::UnknownIdentifier { col, .. }
            | CheckError::Validation { col, .. } => Some(*col),
            CheckError::DuplicateDefinition { .. }
            | CheckError::NotFound { .. }
            | CheckError::Io { .. } => None,
        };
        serde_json::json!({
            "stage":   self.stage(),
            "line":    self.line(),
            "col":     col,
            "message": self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_mentions_first_line() {
        let e = CheckError::DuplicateDefinition {
            what: "variable",
            name: "x".into(),
            line: 4,
            first_line: Some(1),
        };
        assert_eq!(
            e.to_string(),
            "line 4: variable 'x' is already defined (first declared at line 1)"
        );
        assert_eq!(e.stage(), "symbols");
    }

    #[test]
    fn json_value_has_all_fields() {
        let e = CheckError::NotFound {
            path: "missing.txt".into(),
        };
        let v = e.to_json_value();
        assert_eq!(v["stage"], "io");
        assert!(v["line"].is_null());
        assert!(v["col"].is_null());
        assert_eq!(v["message"], "file not found: missing.txt");
    }
}
