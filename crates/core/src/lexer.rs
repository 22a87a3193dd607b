use std::fmt;

use crate::error::CheckError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifiers and keywords; the parser tells them apart.
    /// A trailing `?` belongs to the word (`isBlocked?`).
    Word(String),
    /// Integer literal
    Int(i64),
    // Punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    Semi,
    Comma,
    Eq,
    // End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "'{}'", w),
            Token::Int(n) => write!(f, "'{}'", n),
            Token::LBrace => f.write_str("'{'"),
            Token::RBrace => f.write_str("'}'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Semi => f.write_str("';'"),
            Token::Comma => f.write_str("','"),
            Token::Eq => f.write_str("'='"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

/// Reserved words of the language. Command names are not reserved.
pub const KEYWORDS: &[&str] = &[
    "NEW", "VAR", "MACRO", "EXEC", "if", "not", "then", "else", "do", "rep", "safeExe", "nop",
    "isBlocked?", "isFacing?", "zero?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Integer,
    Punctuation,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: u32,
    pub col: u32,
}

impl Spanned {
    pub fn kind(&self) -> TokenKind {
        match &self.token {
            Token::Word(w) if KEYWORDS.contains(&w.as_str()) => TokenKind::Keyword,
            Token::Word(_) => TokenKind::Identifier,
            Token::Int(_) => TokenKind::Integer,
            Token::Eof => TokenKind::Eof,
            _ => TokenKind::Punctuation,
        }
    }
}

/// Lazy token stream over a source string.
///
/// A clone continues from the same position as the original.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: u32,
    col: u32,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer {
            src,
            chars: src.char_indices().peekable(),
            line: 1,
            col: 1,
            done: false,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, c)) = next {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        next
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map(|&(i, _)| i).unwrap_or(self.src.len())
    }

    fn next_token(&mut self) -> Result<Spanned, CheckError> {
        while let Some(c) = self.peek_char() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }

        let (line, col) = (self.line, self.col);
        let spanned = |token| Spanned { token, line, col };

        let Some((start, c)) = self.bump() else {
            self.done = true;
            return Ok(spanned(Token::Eof));
        };

        let punct = match c {
            '{' => Some(Token::LBrace),
            '}' => Some(Token::RBrace),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            ';' => Some(Token::Semi),
            ',' => Some(Token::Comma),
            '=' => Some(Token::Eq),
            _ => None,
        };
        if let Some(tok) = punct {
            return Ok(spanned(tok));
        }

        // Number
        if c.is_ascii_digit() || (c == '-' && self.peek_char().is_some_and(|d| d.is_ascii_digit())) {
            while self.peek_char().is_some_and(|d| d.is_ascii_digit()) {
                self.bump();
            }
            let end = self.offset();
            let text = &self.src[start..end];
            if self.peek_char().is_some_and(|d| d.is_alphabetic() || d == '_') {
                return Err(CheckError::lex(
                    line,
                    col,
                    format!("invalid number literal starting '{}'", text),
                ));
            }
            let n: i64 = text.parse().map_err(|_| {
                CheckError::lex(line, col, format!("integer literal '{}' is out of range", text))
            })?;
            return Ok(spanned(Token::Int(n)));
        }

        // Identifier / keyword
        if c.is_alphabetic() || c == '_' {
            while self
                .peek_char()
                .is_some_and(|d| d.is_alphanumeric() || d == '_')
            {
                self.bump();
            }
            if self.peek_char() == Some('?') {
                self.bump();
            }
            let end = self.offset();
            return Ok(spanned(Token::Word(self.src[start..end].to_owned())));
        }

        Err(CheckError::lex(
            line,
            col,
            format!("unexpected character '{}'", c),
        ))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Spanned, CheckError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

/// Tokenize the whole source. The result always ends with `Token::Eof`.
pub fn lex(src: &str) -> Result<Vec<Spanned>, CheckError> {
    Lexer::new(src).collect()
}
