use std::fmt::Debug;

use nonempty::NonEmpty;

use crate::rsrock::common::lexer::Token;

/// Which stage of the pipeline produced an error. Lexical and parse errors point at a source
/// position; runtime errors are about program logic and carry no position.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    Lexical,
    Parse,
    Runtime,
}

pub trait RockError: Debug {
    fn get_info(&self) -> Option<ErrorInfo>;
    fn get_message(&self) -> String;
    fn kind(&self) -> ErrorKind;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ErrorInfo {
    pub line: usize,
    pub column: usize,
}

impl ErrorInfo {
    pub fn new(line: usize, column: usize) -> Self { ErrorInfo { line, column } }
}

pub type RockResult<A> = Result<A, NonEmpty<Box<dyn RockError>>>;

pub fn convert_errors<A, E: RockError + 'static>(result: Result<A, NonEmpty<E>>) -> RockResult<A> {
    result.map_err(|e| e.map::<Box<dyn RockError>, _>(|a| Box::new(a)))
}

pub fn convert_error<A, E: RockError + 'static>(result: Result<A, E>) -> RockResult<A> {
    convert_errors(result.map_err(|e| NonEmpty::new(e)))
}

/// A syntax error found by the grammar matcher. `token` is `None` when the input ran out.
#[derive(Debug, PartialEq, Clone)]
pub struct ParserError {
    pub message: String,
    pub token: Option<Token>,
}

impl ParserError {
    pub fn new<S: Into<String>>(message: S, token: Option<Token>) -> Self {
        ParserError { message: message.into(), token }
    }
    pub fn at<S: Into<String>>(message: S, token: &Token) -> Self {
        ParserError::new(message, Some(token.to_owned()))
    }
}

impl RockError for ParserError {
    fn get_info(&self) -> Option<ErrorInfo> {
        self.token.as_ref().map(|t| t.error_info())
    }

    fn get_message(&self) -> String {
        self.message.to_owned()
    }

    fn kind(&self) -> ErrorKind { ErrorKind::Parse }
}
