use crate::rsrock::common::error::{ErrorInfo, ErrorKind, RockError};
use crate::rsrock::interpreted::ast::BinaryOperator;
use crate::rsrock::interpreted::interpreter::rock_value::RockValue;

/// Mistakes in the running program. These are reported to the user; they never indicate a defect
/// in the interpreter itself.
#[derive(Debug, PartialEq, Clone)]
pub enum RuntimeError {
    TypeError(String),
    DivisionByZero,
    DivisionByNull,
    NegativeRepetition(f64),
    RepetitionTooLarge(f64),
    Uninitialized(String),
    UndefinedFunction(String),
    Input(String),
    Output(String),
}

impl RockError for RuntimeError {
    fn get_info(&self) -> Option<ErrorInfo> { None }

    fn get_message(&self) -> String {
        match self {
            RuntimeError::TypeError(m) => format!("Type error: {}", m),
            RuntimeError::DivisionByZero => "Division by zero".to_owned(),
            RuntimeError::DivisionByNull => "Division by null".to_owned(),
            RuntimeError::NegativeRepetition(n) =>
                format!("Cannot repeat a string a negative number of times ({})", n),
            RuntimeError::RepetitionTooLarge(n) =>
                format!("Cannot repeat a string {} times: the result would be too long", n),
            RuntimeError::Uninitialized(name) => format!("Variable '{}' was never initialized", name),
            RuntimeError::UndefinedFunction(name) => format!("Undefined function '{}'", name),
            RuntimeError::Input(m) => format!("Failed to read input: {}", m),
            RuntimeError::Output(m) => format!("Failed to write output: {}", m),
        }
    }

    fn kind(&self) -> ErrorKind { ErrorKind::Runtime }
}

pub type InterpretResult<A> = Result<A, RuntimeError>;

/// What a statement asks of the blocks enclosing it.
#[derive(Debug, PartialEq, Clone)]
pub enum Signal {
    Completed,
    Break,
    Continue,
    Return(RockValue),
}

pub fn unary_type_error<A>(action: &str, v: &RockValue) -> InterpretResult<A> {
    Err(RuntimeError::TypeError(format!("Cannot {} a value of type {}", action, v.type_name())))
}

pub fn binary_type_error<A>(op: &BinaryOperator, v1: &RockValue, v2: &RockValue) -> InterpretResult<A> {
    Err(RuntimeError::TypeError(format!(
        "Cannot apply operator '{}' to {} and {}",
        op.symbol(),
        v1.type_name(),
        v2.type_name(),
    )))
}
