use super::Parser;
use crate::ast::{CompassOrientation, Condition, SimpleDirection, Value};
use crate::error::CheckError;
use crate::lexer::Token;

impl<'a> Parser<'a> {
    // -- Values -------------------------------------------------

    pub(super) fn parse_value(&mut self) -> Result<Value, CheckError> {
        let prov = self.prov();
        if let Token::Int(n) = self.peek() {
            let value = *n;
            self.advance();
            return Ok(Value::Number { value, prov });
        }
        let name = self.take_ident("number or identifier")?;
        Ok(Value::VarRef { name, prov })
    }

    /// Comma-separated values up to and including the closing `)`.
    pub(super) fn parse_args(&mut self) -> Result<Vec<Value>, CheckError> {
        self.expect(Token::LParen)?;
        let mut args = Vec::new();
        if self.peek() == &Token::RParen {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_value()?);
            match self.peek() {
                Token::Comma => self.advance(),
                Token::RParen => {
                    self.advance();
                    return Ok(args);
                }
                _ => return Err(self.err("',' or ')'")),
            }
        }
    }

    // -- Conditions ---------------------------------------------

    pub(super) fn parse_condition(&mut self) -> Result<Condition, CheckError> {
        if self.is_word("isBlocked?") {
            self.advance();
            self.expect(Token::LParen)?;
            let words = SimpleDirection::ALL.map(SimpleDirection::as_str);
            let direction = self.parse_vocab::<SimpleDirection>(&words)?;
            self.expect(Token::RParen)?;
            return Ok(Condition::IsBlocked { direction });
        }
        if self.is_word("isFacing?") {
            self.advance();
            self.expect(Token::LParen)?;
            let words = CompassOrientation::ALL.map(CompassOrientation::as_str);
            let orientation = self.parse_vocab::<CompassOrientation>(&words)?;
            self.expect(Token::RParen)?;
            return Ok(Condition::IsFacing { orientation });
        }
        if self.is_word("zero?") {
            self.advance();
            self.expect(Token::LParen)?;
            let value = self.parse_value()?;
            self.expect(Token::RParen)?;
            return Ok(Condition::IsZero { value });
        }
        Err(self.err("condition ('isBlocked?', 'isFacing?' or 'zero?')"))
    }

    /// One word from a fixed vocabulary.
    fn parse_vocab<T: std::str::FromStr>(&mut self, words: &[&str]) -> Result<T, CheckError> {
        if let Token::Word(w) = self.peek() {
            if let Ok(v) = w.parse::<T>() {
                self.advance();
                return Ok(v);
            }
        }
        Err(self.err(format!("one of {}", words.join(", "))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;

    fn condition(src: &str) -> Result<Condition, CheckError> {
        let tokens = lexer::lex(src)?;
        Parser::new(&tokens).parse_condition()
    }

    #[test]
    fn blocked_direction() {
        assert_eq!(
            condition("isBlocked?(backwards)").unwrap(),
            Condition::IsBlocked {
                direction: SimpleDirection::Backwards
            }
        );
    }

    #[test]
    fn facing_orientation() {
        assert_eq!(
            condition("isFacing?(west)").unwrap(),
            Condition::IsFacing {
                orientation: CompassOrientation::West
            }
        );
    }

    #[test]
    fn facing_rejects_simple_direction() {
        let err = condition("isFacing?(left)").unwrap_err();
        match err {
            CheckError::Syntax { expected, .. } => {
                assert_eq!(expected, "one of north, south, east, west")
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn zero_takes_a_value() {
        match condition("zero?(count)").unwrap() {
            Condition::IsZero {
                value: Value::VarRef { name, .. },
            } => assert_eq!(name, "count"),
            other => panic!("unexpected condition {:?}", other),
        }
        assert!(matches!(
            condition("zero?(0)").unwrap(),
            Condition::IsZero {
                value: Value::Number { value: 0, .. }
            }
        ));
    }

    #[test]
    fn unknown_predicate() {
        assert!(condition("isOpen?(left)").is_err());
    }

    #[test]
    fn args_accept_mixed_values() {
        let tokens = lexer::lex("(1, x, -2)").unwrap();
        let args = Parser::new(&tokens).parse_args().unwrap();
        let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        assert_eq!(rendered, vec!["1", "x", "-2"]);
    }
}
