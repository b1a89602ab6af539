//! # Lexer
//!
//! Turns Datalog source text into a flat token stream for [`crate::parser`].
//! Keywords are case-sensitive (`Schemes`, `Facts`, `Rules`, `Queries`);
//! everything else that starts with a letter is an identifier, everything
//! inside `"..."` (quotes included in the lexeme, per spec.md §3's "opaque
//! string literal") is a string constant. `#` starts a line comment — the
//! grammar in spec.md §6.1 doesn't specify one, so this follows the most
//! common convention in the retrieved pack rather than inventing new syntax
//! the original C++ tool never had.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Schemes,
    Facts,
    Rules,
    Queries,
    Colon,
    ColonDash,
    Comma,
    Period,
    QMark,
    LeftParen,
    RightParen,
    Id,
    String,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Schemes => "SCHEMES",
            TokenKind::Facts => "FACTS",
            TokenKind::Rules => "RULES",
            TokenKind::Queries => "QUERIES",
            TokenKind::Colon => "COLON",
            TokenKind::ColonDash => "COLON_DASH",
            TokenKind::Comma => "COMMA",
            TokenKind::Period => "PERIOD",
            TokenKind::QMark => "Q_MARK",
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::Id => "ID",
            TokenKind::String => "STRING",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub lexeme: String,
    pub line: usize,
}

/// Lex `source` into tokens, terminated by a single trailing `Eof` token.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut line = 1usize;
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\n' => {
                line += 1;
                i += 1;
            }
            c if c.is_whitespace() => {
                i += 1;
            }
            '#' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            ':' => {
                if chars.get(i + 1) == Some(&'-') {
                    tokens.push(Token { kind: TokenKind::ColonDash, lexeme: ":-".to_string(), line });
                    i += 2;
                } else {
                    tokens.push(Token { kind: TokenKind::Colon, lexeme: ":".to_string(), line });
                    i += 1;
                }
            }
            ',' => {
                tokens.push(Token { kind: TokenKind::Comma, lexeme: ",".to_string(), line });
                i += 1;
            }
            '.' => {
                tokens.push(Token { kind: TokenKind::Period, lexeme: ".".to_string(), line });
                i += 1;
            }
            '?' => {
                tokens.push(Token { kind: TokenKind::QMark, lexeme: "?".to_string(), line });
                i += 1;
            }
            '(' => {
                tokens.push(Token { kind: TokenKind::LeftParen, lexeme: "(".to_string(), line });
                i += 1;
            }
            ')' => {
                tokens.push(Token { kind: TokenKind::RightParen, lexeme: ")".to_string(), line });
                i += 1;
            }
            '"' => {
                let start = i;
                let start_line = line;
                i += 1;
                while i < chars.len() && chars[i] != '"' {
                    if chars[i] == '\n' {
                        line += 1;
                    }
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(LexError {
                        lexeme: chars[start..i].iter().collect(),
                        line: start_line,
                    });
                }
                i += 1; // closing quote
                let lexeme: String = chars[start..i].iter().collect();
                tokens.push(Token { kind: TokenKind::String, lexeme, line: start_line });
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let lexeme: String = chars[start..i].iter().collect();
                let kind = match lexeme.as_str() {
                    "Schemes" => TokenKind::Schemes,
                    "Facts" => TokenKind::Facts,
                    "Rules" => TokenKind::Rules,
                    "Queries" => TokenKind::Queries,
                    _ => TokenKind::Id,
                };
                tokens.push(Token { kind, lexeme, line });
            }
            other => {
                return Err(LexError { lexeme: other.to_string(), line });
            }
        }
    }

    tokens.push(Token { kind: TokenKind::Eof, lexeme: "EOF".to_string(), line });
    Ok(tokens)
}
