use super::Parser;
use crate::ast::{Declaration, MacroDecl, VariableDecl};
use crate::error::CheckError;
use crate::lexer::Token;

impl<'a> Parser<'a> {
    // -- Declarations -------------------------------------------

    pub(super) fn parse_declaration(&mut self) -> Result<Declaration, CheckError> {
        let prov = self.prov();
        self.expect_word("NEW")?;
        if self.is_word("VAR") {
            self.advance();
            let name = self.take_ident("variable name")?;
            self.expect(Token::Eq)?;
            let value = self.take_int()?;
            tracing::trace!(line = prov.line, %name, value, "parsed variable declaration");
            return Ok(Declaration::Var(VariableDecl { name, value, prov }));
        }
        if self.is_word("MACRO") {
            self.advance();
            let name = self.take_ident("macro name")?;
            let params = self.parse_params()?;
            let body = self.parse_block()?;
            tracing::trace!(line = prov.line, %name, params = params.len(), "parsed macro declaration");
            return Ok(Declaration::Macro(MacroDecl {
                name,
                params,
                body,
                prov,
            }));
        }
        Err(self.err("'VAR' or 'MACRO'"))
    }

    /// `( ident (, ident)* )` or `()`. Names must be distinct.
    fn parse_params(&mut self) -> Result<Vec<String>, CheckError> {
        self.expect(Token::LParen)?;
        let mut params: Vec<String> = Vec::new();
        if self.peek() == &Token::RParen {
            self.advance();
            return Ok(params);
        }
        loop {
            let at = self.prov();
            let name = self.take_ident("parameter name")?;
            if params.contains(&name) {
                return Err(CheckError::syntax(
                    at.line,
                    at.col,
                    "distinct parameter name",
                    format!("duplicate parameter '{}'", name),
                ));
            }
            params.push(name);
            match self.peek() {
                Token::Comma => self.advance(),
                Token::RParen => {
                    self.advance();
                    return Ok(params);
                }
                _ => return Err(self.err("',' or ')'")),
            }
        }
    }
}
