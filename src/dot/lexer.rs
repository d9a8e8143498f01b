//! Tokenizer for the DOT subset.

use super::DotError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TokenKind {
    /// Identifier, numeral, or the unquoted contents of a quoted string.
    Id(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Equals,
    Colon,
    /// `->`
    Arrow,
    /// `--`
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

/// Split the input into tokens, tracking line/column for diagnostics.
pub(super) fn tokenize(text: &str) -> Result<Vec<Token>, DotError> {
    Lexer::new(text).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek2(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> DotError {
        DotError::new(line, column, message)
    }

    fn run(mut self) -> Result<Vec<Token>, DotError> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            let (line, column) = (self.line, self.column);
            match c {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '#' => self.skip_line(),
                '/' if self.peek2() == Some('/') => self.skip_line(),
                '/' if self.peek2() == Some('*') => self.skip_block_comment(line, column)?,
                '{' => tokens.push(self.punct(TokenKind::LBrace)),
                '}' => tokens.push(self.punct(TokenKind::RBrace)),
                '[' => tokens.push(self.punct(TokenKind::LBracket)),
                ']' => tokens.push(self.punct(TokenKind::RBracket)),
                ';' => tokens.push(self.punct(TokenKind::Semicolon)),
                ',' => tokens.push(self.punct(TokenKind::Comma)),
                '=' => tokens.push(self.punct(TokenKind::Equals)),
                ':' => tokens.push(self.punct(TokenKind::Colon)),
                '-' => tokens.push(self.edge_op_or_numeral(line, column)?),
                '"' => tokens.push(self.quoted(line, column)?),
                '<' => {
                    return Err(self.error(line, column, "HTML-like labels are not supported"));
                }
                c if c.is_ascii_digit() || c == '.' => {
                    tokens.push(self.numeral(line, column));
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    tokens.push(self.identifier(line, column));
                }
                c => {
                    return Err(self.error(line, column, format!("unexpected character {c:?}")));
                }
            }
        }
        Ok(tokens)
    }

    fn punct(&mut self, kind: TokenKind) -> Token {
        let (line, column) = (self.line, self.column);
        self.bump();
        Token { kind, line, column }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self, line: usize, column: usize) -> Result<(), DotError> {
        self.bump(); // '/'
        self.bump(); // '*'
        loop {
            match self.peek() {
                Some('*') if self.peek2() == Some('/') => {
                    self.bump();
                    self.bump();
                    return Ok(());
                }
                Some(_) => {
                    self.bump();
                }
                None => return Err(self.error(line, column, "unterminated block comment")),
            }
        }
    }

    /// `-` starts `->`, `--`, or a negative numeral.
    fn edge_op_or_numeral(&mut self, line: usize, column: usize) -> Result<Token, DotError> {
        match self.peek2() {
            Some('>') => {
                self.bump();
                self.bump();
                Ok(Token {
                    kind: TokenKind::Arrow,
                    line,
                    column,
                })
            }
            Some('-') => {
                self.bump();
                self.bump();
                Ok(Token {
                    kind: TokenKind::Line,
                    line,
                    column,
                })
            }
            Some(c) if c.is_ascii_digit() || c == '.' => Ok(self.numeral(line, column)),
            _ => Err(self.error(line, column, "unexpected character '-'")),
        }
    }

    /// Numeral identifier: `[-] ( . digits | digits [ . digits ] )`.
    fn numeral(&mut self, line: usize, column: usize) -> Token {
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Token {
            kind: TokenKind::Id(text),
            line,
            column,
        }
    }

    fn identifier(&mut self, line: usize, column: usize) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Token {
            kind: TokenKind::Id(text),
            line,
            column,
        }
    }

    /// Double-quoted string. `\"` and `\\` unescape; a backslash-newline
    /// is a line continuation; any other escape is preserved verbatim,
    /// which is what Graphviz does with unknown escapes.
    fn quoted(&mut self, line: usize, column: usize) -> Result<Token, DotError> {
        self.bump(); // opening quote
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('"') => break,
                Some('\\') => match self.bump() {
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some('\n') => {}
                    Some(c) => {
                        text.push('\\');
                        text.push(c);
                    }
                    None => return Err(self.error(line, column, "unterminated string")),
                },
                Some(c) => text.push(c),
                None => return Err(self.error(line, column, "unterminated string")),
            }
        }
        Ok(Token {
            kind: TokenKind::Id(text),
            line,
            column,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation_and_ops() {
        assert_eq!(
            kinds("{ } [ ] ; , = -> --"),
            vec![
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::Equals,
                TokenKind::Arrow,
                TokenKind::Line,
            ]
        );
    }

    #[test]
    fn test_identifiers_and_numerals() {
        assert_eq!(
            kinds("alpha _x2 3.14 -7 .5"),
            vec![
                TokenKind::Id("alpha".into()),
                TokenKind::Id("_x2".into()),
                TokenKind::Id("3.14".into()),
                TokenKind::Id("-7".into()),
                TokenKind::Id(".5".into()),
            ]
        );
    }

    #[test]
    fn test_quoted_strings() {
        assert_eq!(
            kinds(r#""hello world" "a\"b" "back\\slash""#),
            vec![
                TokenKind::Id("hello world".into()),
                TokenKind::Id("a\"b".into()),
                TokenKind::Id("back\\slash".into()),
            ]
        );
    }

    #[test]
    fn test_unknown_escape_preserved() {
        assert_eq!(kinds(r#""a\nb""#), vec![TokenKind::Id("a\\nb".into())]);
    }

    #[test]
    fn test_comments() {
        let text = "a // line\n# hash\nb /* block\nstill */ c";
        assert_eq!(
            kinds(text),
            vec![
                TokenKind::Id("a".into()),
                TokenKind::Id("b".into()),
                TokenKind::Id("c".into()),
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("a\n  bc").unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("\"abc").unwrap_err();
        assert!(err.message.contains("unterminated string"));
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = tokenize("a /* b").unwrap_err();
        assert!(err.message.contains("unterminated block comment"));
    }

    #[test]
    fn test_html_label_rejected() {
        let err = tokenize("a [label=<b>]").unwrap_err();
        assert!(err.message.contains("HTML-like"));
    }

    #[test]
    fn test_stray_dash() {
        assert!(tokenize("a - b").is_err());
    }
}
