use crate::rsrock::common::error::{ErrorInfo, ErrorKind, ParserError, RockError};
use crate::rsrock::common::lexer::{Token, TokenType};

/// A replayable view over a token slice. Only the position moves; tokens are never touched, so
/// everything handed out borrows from the slice itself, not from the cursor.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    current: usize,
}

#[derive(Debug, PartialEq, Clone)]
pub enum CursorError {
    // Carries the last non-whitespace token seen, if any.
    UnexpectedEnd(Option<Token>),
    UnexpectedLiteral(Token),
    InvalidRewind(Token),
}

impl RockError for CursorError {
    fn get_info(&self) -> Option<ErrorInfo> {
        match self {
            CursorError::UnexpectedEnd(t) => t.as_ref().map(|t| t.error_info()),
            CursorError::UnexpectedLiteral(t) => Some(t.error_info()),
            CursorError::InvalidRewind(t) => Some(t.error_info()),
        }
    }

    fn get_message(&self) -> String {
        match self {
            CursorError::UnexpectedEnd(None) => "Unexpected end of input".to_owned(),
            CursorError::UnexpectedEnd(Some(t)) => format!("Unexpected end of input after {}", t),
            CursorError::UnexpectedLiteral(t) => format!("Unexpected literal {}, expected a word", t),
            CursorError::InvalidRewind(t) =>
                format!("Cannot rewind to {}: it was not yielded by this cursor", t),
        }
    }

    fn kind(&self) -> ErrorKind { ErrorKind::Parse }
}

impl From<CursorError> for ParserError {
    fn from(e: CursorError) -> Self {
        let token = match &e {
            CursorError::UnexpectedEnd(t) => t.clone(),
            CursorError::UnexpectedLiteral(t) | CursorError::InvalidRewind(t) => Some(t.clone()),
        };
        ParserError::new(e.get_message(), token)
    }
}

pub type CursorResult<A> = Result<A, CursorError>;

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        TokenCursor { tokens, current: 0 }
    }

    pub fn more(&self, skip_linebreaks: bool) -> bool {
        self.next_index(skip_linebreaks).is_some()
    }

    pub fn peek(&self, skip_linebreaks: bool) -> CursorResult<&'a Token> {
        self.next_index(skip_linebreaks)
            .map(|i| &self.tokens[i])
            .ok_or_else(|| self.unexpected_end())
    }

    pub fn peek_many(&self, count: usize, skip_linebreaks: bool) -> Vec<&'a Token> {
        self.tokens[self.current..]
            .iter()
            .filter(|t| !skip_linebreaks || t.get_type() != TokenType::Linebreak)
            .take(count)
            .collect()
    }

    pub fn pop(&mut self, disallow_literal: bool, skip_linebreaks: bool) -> CursorResult<&'a Token> {
        let index = self.next_index(skip_linebreaks).ok_or_else(|| self.unexpected_end())?;
        let token = &self.tokens[index];
        if disallow_literal && token.is_literal() {
            return Err(CursorError::UnexpectedLiteral(token.to_owned()));
        }
        self.current = index + 1;
        Ok(token)
    }

    /// Consumes the rest of the current line, including the linebreak ending it.
    pub fn pop_line(&mut self) -> Vec<&'a Token> {
        let rest = &self.tokens[self.current..];
        let length = rest.iter().position(|t| t.get_type() == TokenType::Linebreak);
        self.current += length.map(|l| l + 1).unwrap_or(rest.len());
        rest[..length.unwrap_or(rest.len())].iter().collect()
    }

    /// Moves back to a token this cursor already reached. Tokens are compared by identity, so an
    /// equal token from another slice is rejected.
    pub fn rewind(&mut self, token: &Token) -> CursorResult<()> {
        let reached = (self.current + 1).min(self.tokens.len());
        match self.tokens[..reached].iter().position(|t| std::ptr::eq(t, token)) {
            Some(index) => {
                self.current = index;
                Ok(())
            }
            None => Err(CursorError::InvalidRewind(token.to_owned())),
        }
    }

    /// The most recently consumed token that is not a line ending.
    pub fn last_token(&self) -> Option<&'a Token> {
        self.tokens[..self.current].iter().rev().find(|t| !t.is_line_end())
    }

    fn next_index(&self, skip_linebreaks: bool) -> Option<usize> {
        (self.current..self.tokens.len())
            .find(|i| !skip_linebreaks || self.tokens[*i].get_type() != TokenType::Linebreak)
    }

    fn unexpected_end(&self) -> CursorError {
        CursorError::UnexpectedEnd(self.last_token().cloned())
    }
}
