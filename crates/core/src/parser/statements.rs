use super::Parser;
use crate::ast::{Block, CommandCall, Statement};
use crate::error::CheckError;
use crate::lexer::Token;
use crate::{STACK_GROW_BYTES, STACK_RED_ZONE_BYTES};

impl<'a> Parser<'a> {
    // -- Blocks -------------------------------------------------

    /// `{ stmt (; stmt)* }`. An empty slot between separators is a `Nop`.
    pub(super) fn parse_block(&mut self) -> Result<Block, CheckError> {
        stacker::maybe_grow(STACK_RED_ZONE_BYTES, STACK_GROW_BYTES, || {
            self.parse_block_inner()
        })
    }

    fn parse_block_inner(&mut self) -> Result<Block, CheckError> {
        let prov = self.prov();
        self.expect(Token::LBrace)?;
        self.open_braces.push(prov);
        tracing::trace!(line = prov.line, depth = self.depth(), "enter block");

        let mut statements = Vec::new();
        loop {
            statements.push(self.parse_statement()?);
            match self.peek() {
                Token::Semi => self.advance(),
                Token::RBrace => {
                    self.advance();
                    self.open_braces.pop();
                    return Ok(Block { statements, prov });
                }
                _ => return Err(self.err("';' or '}'")),
            }
        }
    }

    // -- Statements ---------------------------------------------

    fn parse_statement(&mut self) -> Result<Statement, CheckError> {
        let prov = self.prov();
        match self.peek() {
            Token::Semi | Token::RBrace => return Ok(Statement::Nop { prov }),
            Token::Word(_) => {}
            _ => return Err(self.err("statement")),
        }

        if self.is_word("safeExe") {
            self.advance();
            self.expect(Token::LParen)?;
            let inner = self.parse_command_call()?;
            self.expect(Token::RParen)?;
            return Ok(Statement::SafeExe { inner, prov });
        }
        if self.is_word("if") {
            return self.parse_conditional();
        }
        if self.is_word("do") {
            self.advance();
            let condition = self.parse_condition()?;
            let body = self.parse_block()?;
            return Ok(Statement::DoLoop {
                condition,
                body,
                prov,
            });
        }
        if self.is_word("rep") {
            self.advance();
            let count = self.parse_value()?;
            let body = self.parse_block()?;
            return Ok(Statement::RepLoop { count, body, prov });
        }
        let next_is_paren = self.tokens.get(self.pos + 1).map(|s| &s.token) == Some(&Token::LParen);
        if self.is_word("nop") && !next_is_paren {
            self.advance();
            return Ok(Statement::Nop { prov });
        }
        Ok(Statement::Command(self.parse_command_call()?))
    }

    fn parse_conditional(&mut self) -> Result<Statement, CheckError> {
        let prov = self.prov();
        self.expect_word("if")?;
        let negated = if self.is_word("not") {
            self.advance();
            true
        } else {
            false
        };
        self.expect(Token::LParen)?;
        let condition = self.parse_condition()?;
        self.expect(Token::RParen)?;
        self.expect_word("then")?;
        let then_block = self.parse_block()?;
        let else_block = if self.is_word("else") {
            self.advance();
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Statement::Conditional {
            negated,
            condition,
            then_block,
            else_block,
            prov,
        })
    }

    /// `name ( args )`. `nop` is the only keyword allowed as a name.
    fn parse_command_call(&mut self) -> Result<CommandCall, CheckError> {
        let prov = self.prov();
        if self.is_word("safeExe") {
            return Err(self.err("command (safeExe wraps exactly one plain command)"));
        }
        let name = if self.is_word("nop") {
            self.advance();
            "nop".to_owned()
        } else {
            self.take_ident("command")?
        };
        let args = self.parse_args()?;
        Ok(CommandCall { name, args, prov })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Block, Condition, SimpleDirection, Statement, Value};
    use crate::error::CheckError;
    use crate::lexer;
    use crate::parser::parse;

    fn exec_block(src: &str) -> Result<Block, CheckError> {
        let tokens = lexer::lex(src)?;
        let mut program = parse(&tokens)?;
        Ok(program.execs.remove(0))
    }

    #[test]
    fn commands_separated_by_semicolons() {
        let block = exec_block("EXEC { walk(1); turnToMy(left); moves(forward, back) }").unwrap();
        assert_eq!(block.statements.len(), 3);
        match &block.statements[2] {
            Statement::Command(c) => {
                assert_eq!(c.name, "moves");
                assert_eq!(c.args.len(), 2);
            }
            other => panic!("expected command, got {:?}", other),
        }
    }

    #[test]
    fn empty_slots_are_nops() {
        let block = exec_block("EXEC { walk(1); }").unwrap();
        assert!(matches!(block.statements[1], Statement::Nop { .. }));
        let block = exec_block("EXEC {}").unwrap();
        assert_eq!(block.statements.len(), 1);
        assert!(matches!(block.statements[0], Statement::Nop { .. }));
    }

    #[test]
    fn bare_nop_and_nop_call() {
        let block = exec_block("EXEC { nop; nop() }").unwrap();
        assert!(matches!(block.statements[0], Statement::Nop { .. }));
        assert!(matches!(&block.statements[1], Statement::Command(c) if c.name == "nop"));
    }

    #[test]
    fn safe_exe_wraps_one_command() {
        let block = exec_block("EXEC { safeExe(walk(3)) }").unwrap();
        match &block.statements[0] {
            Statement::SafeExe { inner, .. } => assert_eq!(inner.name, "walk"),
            other => panic!("expected safeExe, got {:?}", other),
        }
    }

    #[test]
    fn nested_safe_exe_is_rejected() {
        let err = exec_block("EXEC { safeExe(safeExe(walk(1))) }").unwrap_err();
        assert!(matches!(err, CheckError::Syntax { col: 16, .. }), "{:?}", err);
    }

    #[test]
    fn conditional_with_not_and_else() {
        let block =
            exec_block("EXEC { if not (isBlocked?(left)) then { walk(1) } else { jump(1) } }")
                .unwrap();
        match &block.statements[0] {
            Statement::Conditional {
                negated,
                condition,
                else_block,
                ..
            } => {
                assert!(*negated);
                assert_eq!(
                    condition,
                    &Condition::IsBlocked {
                        direction: SimpleDirection::Left
                    }
                );
                assert!(else_block.is_some());
            }
            other => panic!("expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn loops() {
        let block = exec_block("EXEC { do isFacing?(north) { walk(1) }; rep 3 { jump(1) } }").unwrap();
        assert!(matches!(block.statements[0], Statement::DoLoop { .. }));
        match &block.statements[1] {
            Statement::RepLoop { count, body, .. } => {
                assert!(matches!(count, Value::Number { value: 3, .. }));
                assert_eq!(body.statements.len(), 1);
            }
            other => panic!("expected rep loop, got {:?}", other),
        }
    }

    #[test]
    fn separators_inside_nested_blocks_stay_inside() {
        let src = "EXEC { if (zero?(0)) then { walk(1); rep 2 { jump(1); if (isFacing?(east)) then { drop(1); pick(1) } } }; nop }";
        let block = exec_block(src).unwrap();
        assert_eq!(block.statements.len(), 2);
        let Statement::Conditional { then_block, .. } = &block.statements[0] else {
            panic!("expected conditional");
        };
        assert_eq!(then_block.statements.len(), 2);
        let Statement::RepLoop { body, .. } = &then_block.statements[1] else {
            panic!("expected rep loop");
        };
        assert_eq!(body.statements.len(), 2);
        let Statement::Conditional { then_block, .. } = &body.statements[1] else {
            panic!("expected inner conditional");
        };
        assert_eq!(then_block.statements.len(), 2);
    }

    #[test]
    fn missing_then_is_syntax_error() {
        let err = exec_block("EXEC { if (zero?(1)) { walk(1) } }").unwrap_err();
        match err {
            CheckError::Syntax { expected, found, .. } => {
                assert_eq!(expected, "'then'");
                assert_eq!(found, "'{'");
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn unclosed_brace_reports_innermost_opening() {
        let err = exec_block("EXEC {\n  rep 2 {\n    walk(1)\n").unwrap_err();
        assert_eq!(err, CheckError::UnterminatedBlock { line: 2, col: 9 });
    }

    #[test]
    fn eof_mid_statement_is_unterminated_block() {
        let err = exec_block("EXEC { walk(").unwrap_err();
        assert_eq!(err, CheckError::UnterminatedBlock { line: 1, col: 6 });
    }

    #[test]
    fn missing_separator_between_statements() {
        let err = exec_block("EXEC { walk(1) jump(1) }").unwrap_err();
        match err {
            CheckError::Syntax { expected, col, .. } => {
                assert_eq!(expected, "';' or '}'");
                assert_eq!(col, 16);
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn deep_nesting_parses() {
        let depth = 100_000;
        let mut src = String::from("EXEC ");
        for _ in 0..depth {
            src.push_str("{ rep 1 ");
        }
        src.push_str("{ walk(1) }");
        for _ in 0..depth {
            src.push_str(" }");
        }
        assert!(exec_block(&src).is_ok());
    }
}
