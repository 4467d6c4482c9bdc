use std::fmt;
use std::fmt::{Display, Formatter};

use crate::rsrock::common;
use crate::rsrock::common::error::{ErrorInfo, ErrorKind, RockError, RockResult};
use crate::rsrock::common::strings::{is_numeric_literal, is_punctuation, split_punctuation, strip_separators};

/// Inserted where source files are joined; closes every open block as if at end of file.
pub const END_ALL_BLOCKS_MARKER: char = '⏎';

pub fn tokenize(source: &str) -> RockResult<Vec<Token>> {
    common::error::convert_error(Lexer::new(source).get_lexems())
}

// Only failure possible during lexing is an unterminated comment or string literal, and lexing stops
// at the first one.
type LexResult<A> = Result<A, LexError>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenType {
    Word,
    Linebreak,
    Comment,
    StringLiteral,
    NumericLiteral,
    EndAllBlocks,
    // Only produced by the parser's preprocessing, never by the lexer.
    BlankLine,
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:?}", self))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub r#type: TokenType,
    pub text: String,
    pub trailing_punctuation: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new<S1: Into<String>, S2: Into<String>>(
        r#type: TokenType, text: S1, trailing_punctuation: S2, line: usize, column: usize,
    ) -> Self {
        Token { r#type, text: text.into(), trailing_punctuation: trailing_punctuation.into(), line, column }
    }
    pub fn get_type(&self) -> TokenType { self.r#type }

    pub fn error_info(&self) -> ErrorInfo {
        ErrorInfo::new(self.line, self.column)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.r#type, TokenType::StringLiteral | TokenType::NumericLiteral)
    }

    pub fn is_line_end(&self) -> bool {
        matches!(self.r#type, TokenType::Linebreak | TokenType::BlankLine | TokenType::EndAllBlocks)
    }

    /// Keywords are matched case-insensitively.
    pub fn lowercase(&self) -> String { self.text.to_lowercase() }

    pub fn ends_with(&self, c: char) -> bool { self.trailing_punctuation.contains(c) }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.r#type {
            TokenType::Linebreak | TokenType::BlankLine => write!(f, "end of line"),
            TokenType::StringLiteral => write!(f, "\"{}\"{}", self.text, self.trailing_punctuation),
            TokenType::Comment => write!(f, "({})", self.text),
            _ => write!(f, "'{}{}'", self.text, self.trailing_punctuation),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct LexError {
    line: usize,
    column: usize,
    message: String,
}

impl LexError {
    fn error<S: Into<String>>(line: usize, column: usize, message: S) -> LexError {
        LexError { line, column, message: message.into() }
    }
}

impl RockError for LexError {
    fn get_info(&self) -> Option<ErrorInfo> {
        Some(ErrorInfo::new(self.line, self.column))
    }

    fn get_message(&self) -> String {
        self.message.to_owned()
    }

    fn kind(&self) -> ErrorKind { ErrorKind::Lexical }
}

impl Display for LexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}, column {}] Error: {}", self.line, self.column, self.message)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Mode {
    Default,
    Comment,
    StringLiteral,
}

struct Lexer {
    source: Vec<char>,
    line: usize,
    column: usize,
    mode: Mode,
    // Text of the token being built and where it started.
    text: String,
    start: (usize, usize),
    // Set right after a string literal closes, so punctuation glued to the closing quote is kept.
    collect_punctuation: bool,
    lexems: Vec<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut source: Vec<char> = source.chars().collect();
        if source.last() != Some(&'\n') {
            source.push('\n');
        }
        Lexer {
            source,
            line: 1,
            column: 1,
            mode: Mode::Default,
            text: String::new(),
            start: (1, 1),
            collect_punctuation: false,
            lexems: Vec::new(),
        }
    }

    pub fn get_lexems(mut self) -> LexResult<Vec<Token>> {
        for i in 0..self.source.len() {
            let c = self.source[i];
            self.scan_char(c)?;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        Ok(self.lexems)
    }

    fn scan_char(&mut self, c: char) -> LexResult<()> {
        if self.collect_punctuation {
            if is_punctuation(c) {
                if let Some(last) = self.lexems.last_mut() {
                    last.trailing_punctuation.push(c);
                }
                return Ok(());
            }
            self.collect_punctuation = false;
        }
        match self.mode {
            Mode::Default => {
                self.scan_default(c);
                Ok(())
            }
            Mode::Comment => self.scan_delimited(c, ')', TokenType::Comment, "Unterminated comment"),
            Mode::StringLiteral =>
                self.scan_delimited(c, '"', TokenType::StringLiteral, "Unterminated string literal"),
        }
    }

    fn scan_default(&mut self, c: char) {
        match c {
            '\n' => {
                self.complete_word();
                self.add_token(TokenType::Linebreak, "\n");
            }
            END_ALL_BLOCKS_MARKER => {
                self.complete_word();
                self.add_token(TokenType::EndAllBlocks, END_ALL_BLOCKS_MARKER.to_string());
            }
            '(' | '"' => {
                self.complete_word();
                self.mode = if c == '(' { Mode::Comment } else { Mode::StringLiteral };
                self.start = (self.line, self.column);
            }
            c if c.is_whitespace() || c.is_control() => self.complete_word(),
            c => {
                if self.text.is_empty() {
                    self.start = (self.line, self.column);
                }
                self.text.push(c);
            }
        }
    }

    fn scan_delimited(
        &mut self, c: char, closing: char, r#type: TokenType, unterminated: &str,
    ) -> LexResult<()> {
        if c == closing {
            let text = std::mem::take(&mut self.text);
            self.lexems.push(Token::new(r#type, text, "", self.start.0, self.start.1));
            self.mode = Mode::Default;
            self.collect_punctuation = r#type == TokenType::StringLiteral;
            Ok(())
        } else if c == '\n' {
            Err(LexError::error(self.start.0, self.start.1, unterminated))
        } else {
            self.text.push(c);
            Ok(())
        }
    }

    fn add_token<S: Into<String>>(&mut self, r#type: TokenType, text: S) {
        self.lexems.push(Token::new(r#type, text, "", self.line, self.column));
    }

    fn complete_word(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let word = std::mem::take(&mut self.text);
        let (base, punctuation) = split_punctuation(&word);
        let (r#type, text) = if is_numeric_literal(base) {
            (TokenType::NumericLiteral, strip_separators(base))
        } else {
            (TokenType::Word, base.to_owned())
        };
        self.lexems.push(Token::new(r#type, text, punctuation, self.start.0, self.start.1));
    }
}
