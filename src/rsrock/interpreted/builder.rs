//! Validated construction of statement trees. The grammar matcher can only reach the tree through
//! these types, and every shape rule the interpreter relies on is checked here.

use crate::rsrock::common::error::{ErrorInfo, ErrorKind, RockError};
use crate::rsrock::interpreted::ast::{BinaryOperator, Literal, OperatorKind};

pub mod argument_list;
pub mod expression;
pub mod tree;

#[derive(Debug, PartialEq, Clone)]
pub enum BuilderError {
    InvalidName(String),
    LiteralInDeclaration(Literal),
    WrongArgumentList { for_call: bool },
    MisplacedOperand,
    MisplacedOperator(BinaryOperator),
    WrongOperatorKind { operator: BinaryOperator, expected: OperatorKind },
    InvalidPrecedence(u8),
    IncompleteExpression,
    OutsideLoop(&'static str),
    OutsideFunction,
    NotAtRoot,
    DanglingElse,
}

impl RockError for BuilderError {
    fn get_info(&self) -> Option<ErrorInfo> { None }

    fn get_message(&self) -> String {
        match self {
            BuilderError::InvalidName(name) => format!("Invalid variable or function name '{}'", name),
            BuilderError::LiteralInDeclaration(lit) =>
                format!("Function parameters must be names, got literal {}", lit.pretty_print()),
            BuilderError::WrongArgumentList { for_call: true } =>
                "Expected a parameter list, got a call argument list".to_owned(),
            BuilderError::WrongArgumentList { for_call: false } =>
                "Expected a call argument list, got a parameter list".to_owned(),
            BuilderError::MisplacedOperand => "Expected an operator between operands".to_owned(),
            BuilderError::MisplacedOperator(op) =>
                format!("Operator '{}' is missing its left operand", op.symbol()),
            BuilderError::WrongOperatorKind { operator, expected } =>
                format!("'{}' is not a {:?} operator", operator.symbol(), expected),
            BuilderError::InvalidPrecedence(p) => format!("Invalid operator precedence {}", p),
            BuilderError::IncompleteExpression => "Incomplete expression".to_owned(),
            BuilderError::OutsideLoop(statement) => format!("'{}' outside of a loop", statement),
            BuilderError::OutsideFunction => "Return outside of a function".to_owned(),
            BuilderError::NotAtRoot => "Functions can only be declared outside any block".to_owned(),
            BuilderError::DanglingElse => "Else without a preceding if".to_owned(),
        }
    }

    fn kind(&self) -> ErrorKind { ErrorKind::Parse }
}

pub type BuilderResult<A> = Result<A, BuilderError>;

fn checked_name<S: Into<String>>(name: S) -> BuilderResult<String> {
    let name = name.into();
    if name.trim().is_empty() {
        Err(BuilderError::InvalidName(name))
    } else {
        Ok(name)
    }
}
