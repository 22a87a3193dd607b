//! Recursive-descent parser producing the program AST.
//! Every node carries the provenance of its first token.
//! No name resolution is done here -- that is the validator's job.

use crate::ast::{Item, Program, Provenance};
use crate::error::CheckError;
use crate::lexer::{Spanned, Token, TokenKind};

mod declarations;
mod statements;
mod values;

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

pub struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    /// Opening braces not yet matched, innermost last
    open_braces: Vec<Provenance>,
    seen_exec: bool,
    eof: Spanned,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Spanned]) -> Self {
        let eof = match tokens.last() {
            Some(last) => Spanned {
                token: Token::Eof,
                line: last.line,
                col: last.col,
            },
            None => Spanned {
                token: Token::Eof,
                line: 1,
                col: 1,
            },
        };
        Parser {
            tokens,
            pos: 0,
            open_braces: Vec::new(),
            seen_exec: false,
            eof,
        }
    }

    fn cur(&self) -> &Spanned {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn prov(&self) -> Provenance {
        let s = self.cur();
        Provenance {
            line: s.line,
            col: s.col,
        }
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Current nesting depth of braces.
    pub fn depth(&self) -> usize {
        self.open_braces.len()
    }

    /// Build an error for an unmet expectation at the current token.
    ///
    /// Running out of input inside a block reports the innermost open
    /// brace instead of the missing token.
    fn err(&self, expected: impl Into<String>) -> CheckError {
        if self.peek() == &Token::Eof {
            if let Some(open) = self.open_braces.last() {
                return CheckError::UnterminatedBlock {
                    line: open.line,
                    col: open.col,
                };
            }
        }
        let s = self.cur();
        CheckError::syntax(s.line, s.col, expected, self.peek().to_string())
    }

    fn expect(&mut self, tok: Token) -> Result<(), CheckError> {
        if self.peek() == &tok {
            self.advance();
            Ok(())
        } else {
            Err(self.err(tok.to_string()))
        }
    }

    fn is_word(&self, w: &str) -> bool {
        matches!(self.peek(), Token::Word(x) if x == w)
    }

    fn expect_word(&mut self, expected: &str) -> Result<(), CheckError> {
        if self.is_word(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("'{}'", expected)))
        }
    }

    /// Take a non-keyword word.
    fn take_ident(&mut self, what: &str) -> Result<String, CheckError> {
        let cur = self.cur();
        if let (TokenKind::Identifier, Token::Word(w)) = (cur.kind(), &cur.token) {
            let w = w.clone();
            self.advance();
            return Ok(w);
        }
        Err(self.err(what.to_owned()))
    }

    fn take_int(&mut self) -> Result<i64, CheckError> {
        if let Token::Int(n) = self.peek() {
            let n = *n;
            self.advance();
            Ok(n)
        } else {
            Err(self.err("integer"))
        }
    }

    // -- Top level ----------------------------------------------

    /// Parse the next top-level item, or `None` at end of input.
    pub fn next_item(&mut self) -> Result<Option<Item>, CheckError> {
        if self.peek() == &Token::Eof {
            return Ok(None);
        }
        if self.is_word("NEW") {
            if self.seen_exec {
                return Err(self.err("EXEC block (declarations must precede the first EXEC)"));
            }
            return Ok(Some(Item::Declaration(self.parse_declaration()?)));
        }
        if self.is_word("EXEC") {
            self.advance();
            let block = self.parse_block()?;
            self.seen_exec = true;
            return Ok(Some(Item::Exec(block)));
        }
        Err(self.err("'NEW' declaration or 'EXEC' block"))
    }

    pub fn parse_program(&mut self) -> Result<Program, CheckError> {
        let mut program = Program::default();
        while let Some(item) = self.next_item()? {
            match item {
                Item::Declaration(d) => program.declarations.push(d),
                Item::Exec(b) => program.execs.push(b),
            }
        }
        Ok(program)
    }
}

pub fn parse(tokens: &[Spanned]) -> Result<Program, CheckError> {
    Parser::new(tokens).parse_program()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
