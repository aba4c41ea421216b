//! Lexer (tokenizer) for declaration-language source code
//!
//! Converts raw source text into a lazy [`Token`] stream consumed by the parser.
//! The lexer is fail-fast: the first unrecognized character (or malformed number)
//! is yielded as an error and the stream ends there.

use super::ast::{SourceLocation, Type};
use std::fmt;
use thiserror::Error;

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Int,
    Float,
    Double,
    Char,

    Identifier,
    Number,

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;
    Equals,    // =

    // End of input
    Eof,
}

impl TokenKind {
    /// Look up a reserved word. Applied after matching a maximal identifier run.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "int" => Some(TokenKind::Int),
            "float" => Some(TokenKind::Float),
            "double" => Some(TokenKind::Double),
            "char" => Some(TokenKind::Char),
            _ => None,
        }
    }

    /// The primitive type named by a keyword token
    pub fn as_type(self) -> Option<Type> {
        match self {
            TokenKind::Int => Some(Type::Int),
            TokenKind::Float => Some(Type::Float),
            TokenKind::Double => Some(Type::Double),
            TokenKind::Char => Some(Type::Char),
            _ => None,
        }
    }

    pub fn is_type_keyword(self) -> bool {
        self.as_type().is_some()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int => write!(f, "'int'"),
            TokenKind::Float => write!(f, "'float'"),
            TokenKind::Double => write!(f, "'double'"),
            TokenKind::Char => write!(f, "'char'"),
            TokenKind::Identifier => write!(f, "Identifier"),
            TokenKind::Number => write!(f, "Number"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Equals => write!(f, "'='"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A classified lexical unit.
///
/// `lexeme` is the exact matched text (empty for [`TokenKind::Eof`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenKind::Eof, "", location)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Number => write!(f, "number {}", self.lexeme),
            kind => write!(f, "{}", kind),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// Any character outside the token set, including non-ASCII input
    #[error("unexpected character {character:?} at {location}")]
    UnexpectedCharacter {
        character: char,
        location: SourceLocation,
    },
    /// A number literal with a second decimal point; `location` is that point
    #[error("malformed number literal '{literal}': unexpected {character:?} at {location}")]
    MalformedNumber {
        literal: String,
        character: char,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn character(&self) -> char {
        match self {
            LexError::UnexpectedCharacter { character, .. }
            | LexError::MalformedNumber { character, .. } => *character,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnexpectedCharacter { location, .. }
            | LexError::MalformedNumber { location, .. } => *location,
        }
    }
}

/// Lexer for declaration-language source code
///
/// Iterating yields tokens up to and including a single [`TokenKind::Eof`],
/// then `None`. After an error the iterator is exhausted.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Ok(Token::eof(loc));
        };

        let kind = match ch {
            '0'..='9' => return self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => return Ok(self.identifier_or_keyword(ch, loc)),
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            '=' => TokenKind::Equals,
            _ => {
                return Err(LexError::UnexpectedCharacter {
                    character: ch,
                    location: loc,
                })
            }
        };

        Ok(Token::new(kind, ch, loc))
    }

    /// Parse numeric literal: digits with at most one decimal point
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);
        let mut seen_point = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else if ch == '.' {
                if seen_point {
                    return Err(LexError::MalformedNumber {
                        literal: num_str,
                        character: ch,
                        location: self.current_location(),
                    });
                }
                seen_point = true;
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Ok(Token::new(TokenKind::Number, num_str, loc))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = TokenKind::keyword(&ident).unwrap_or(TokenKind::Identifier);
        Token::new(kind, ident, loc)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) if token.kind != TokenKind::Eof => {}
            _ => self.finished = true,
        }
        Some(result)
    }
}
