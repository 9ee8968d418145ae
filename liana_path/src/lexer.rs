// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The path lexer.
//!
//! A path string is scanned on demand into identifiers, decimal numbers,
//! quoted string literals, and the punctuation `. [ ] = &`. Whitespace is
//! discarded. Any other character is a [`GrammarError`]: grammar errors are
//! fatal and never suppressed by an existence policy.

use core::fmt;

/// One token and the byte offset it starts at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token's content.
    pub kind: TokenKind<'a>,
    /// Byte offset of the token's first character in the path.
    pub pos: usize,
}

/// The token vocabulary of the path grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// An identifier: `[A-Za-z_$][A-Za-z_$0-9]*`.
    Ident(&'a str),
    /// A decimal integer.
    Num(i64),
    /// A single- or double-quoted string, contents only. No escape
    /// processing is performed.
    StrLit(&'a str),
    /// `.`
    Dot,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `=`
    Eq,
    /// `&`
    Amp,
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => write!(f, "`{name}`"),
            Self::Num(n) => write!(f, "`{n}`"),
            Self::StrLit(s) => write!(f, "`'{s}'`"),
            Self::Dot => f.write_str("`.`"),
            Self::LBracket => f.write_str("`[`"),
            Self::RBracket => f.write_str("`]`"),
            Self::Eq => f.write_str("`=`"),
            Self::Amp => f.write_str("`&`"),
        }
    }
}

/// Errors produced while tokenizing a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrammarError {
    /// A character matched no lexical rule.
    Unrecognized {
        /// Byte offset of the offending character.
        pos: usize,
        /// The character itself.
        found: char,
    },
    /// A numeric literal does not fit in an `i64`.
    MalformedNumber {
        /// Byte offset of the literal's first digit.
        pos: usize,
    },
    /// A string literal was opened but never closed.
    Unterminated {
        /// Byte offset of the opening quote.
        pos: usize,
    },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized { pos, found } => {
                write!(f, "unrecognized character `{found}` at offset {pos}")
            }
            Self::MalformedNumber { pos } => {
                write!(f, "numeric literal at offset {pos} is out of range")
            }
            Self::Unterminated { pos } => {
                write!(f, "unterminated string literal starting at offset {pos}")
            }
        }
    }
}

impl core::error::Error for GrammarError {}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// A streaming tokenizer over one path string.
///
/// Tokens borrow from the source; the lexer itself holds no allocation.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer at the start of `src`.
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// The byte offset the next token would start at (after whitespace).
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Scans the next token, or `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, GrammarError> {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return Ok(None);
        }

        let start = self.pos;
        let kind = match bytes[start] {
            b'.' => {
                self.pos += 1;
                TokenKind::Dot
            }
            b'[' => {
                self.pos += 1;
                TokenKind::LBracket
            }
            b']' => {
                self.pos += 1;
                TokenKind::RBracket
            }
            b'=' => {
                self.pos += 1;
                TokenKind::Eq
            }
            b'&' => {
                self.pos += 1;
                TokenKind::Amp
            }
            quote @ (b'\'' | b'"') => {
                self.pos += 1;
                let content_start = self.pos;
                while self.pos < bytes.len() && bytes[self.pos] != quote {
                    self.pos += 1;
                }
                if self.pos >= bytes.len() {
                    return Err(GrammarError::Unterminated { pos: start });
                }
                let content = &self.src[content_start..self.pos];
                self.pos += 1;
                TokenKind::StrLit(content)
            }
            b'0'..=b'9' => {
                while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
                match self.src[start..self.pos].parse::<i64>() {
                    Ok(n) => TokenKind::Num(n),
                    Err(_) => return Err(GrammarError::MalformedNumber { pos: start }),
                }
            }
            b if is_ident_start(b) => {
                self.pos += 1;
                while self.pos < bytes.len() && is_ident_continue(bytes[self.pos]) {
                    self.pos += 1;
                }
                TokenKind::Ident(&self.src[start..self.pos])
            }
            _ => {
                let found = match self.src[start..].chars().next() {
                    Some(c) => c,
                    None => '\u{fffd}',
                };
                return Err(GrammarError::Unrecognized { pos: start, found });
            }
        };
        Ok(Some(Token { kind, pos: start }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn kinds(src: &str) -> Vec<TokenKind<'_>> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        while let Some(token) = lexer.next_token().unwrap() {
            out.push(token.kind);
        }
        out
    }

    #[test]
    fn punctuation_and_segments() {
        assert_eq!(
            kinds("canvas.paths[3]"),
            [
                TokenKind::Ident("canvas"),
                TokenKind::Dot,
                TokenKind::Ident("paths"),
                TokenKind::LBracket,
                TokenKind::Num(3),
                TokenKind::RBracket,
            ]
        );
        assert_eq!(
            kinds("mode=EDIT"),
            [TokenKind::Ident("mode"), TokenKind::Eq, TokenKind::Ident("EDIT")]
        );
        assert_eq!(
            kinds("flags & ENABLED"),
            [TokenKind::Ident("flags"), TokenKind::Amp, TokenKind::Ident("ENABLED")]
        );
    }

    #[test]
    fn identifiers_allow_dollar_and_underscore() {
        assert_eq!(
            kinds("$ctx._hidden9"),
            [
                TokenKind::Ident("$ctx"),
                TokenKind::Dot,
                TokenKind::Ident("_hidden9"),
            ]
        );
    }

    #[test]
    fn string_literals_take_both_quote_styles() {
        assert_eq!(kinds("['abc']"), [
            TokenKind::LBracket,
            TokenKind::StrLit("abc"),
            TokenKind::RBracket,
        ]);
        assert_eq!(kinds("[\"a.b\"]"), [
            TokenKind::LBracket,
            TokenKind::StrLit("a.b"),
            TokenKind::RBracket,
        ]);
        // No escape processing: the backslash is content.
        assert_eq!(kinds("'a\\b'"), [TokenKind::StrLit("a\\b")]);
    }

    #[test]
    fn whitespace_is_discarded_and_positions_are_bytes() {
        let mut lexer = Lexer::new("  a . b");
        let a = lexer.next_token().unwrap().unwrap();
        assert_eq!(a.kind, TokenKind::Ident("a"));
        assert_eq!(a.pos, 2);
        let dot = lexer.next_token().unwrap().unwrap();
        assert_eq!(dot.pos, 4);
        let b = lexer.next_token().unwrap().unwrap();
        assert_eq!(b.pos, 6);
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn unrecognized_character_is_fatal() {
        let mut lexer = Lexer::new("list[{0}]");
        assert_eq!(lexer.next_token().unwrap().unwrap().kind, TokenKind::Ident("list"));
        assert_eq!(lexer.next_token().unwrap().unwrap().kind, TokenKind::LBracket);
        assert_eq!(
            lexer.next_token().unwrap_err(),
            GrammarError::Unrecognized { pos: 5, found: '{' }
        );
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let mut lexer = Lexer::new("x['abc");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        assert_eq!(
            lexer.next_token().unwrap_err(),
            GrammarError::Unterminated { pos: 2 }
        );
    }

    #[test]
    fn oversized_number_is_malformed() {
        let mut lexer = Lexer::new("99999999999999999999");
        assert_eq!(
            lexer.next_token().unwrap_err(),
            GrammarError::MalformedNumber { pos: 0 }
        );
    }
}
