use crate::rsrock::interpreted::ast::{Argument, Literal};
use crate::rsrock::interpreted::builder::{BuilderError, BuilderResult, checked_name};

/// Arguments of a call, or parameters of a declaration. Only call lists may hold literals.
#[derive(Debug, PartialEq, Clone)]
pub struct ArgumentList {
    for_call: bool,
    args: Vec<Argument>,
}

impl ArgumentList {
    pub fn new(for_call: bool) -> Self { ArgumentList { for_call, args: Vec::new() } }
    pub fn for_call() -> Self { ArgumentList::new(true) }
    pub fn for_declaration() -> Self { ArgumentList::new(false) }

    pub fn add_argument<S: Into<String>>(&mut self, name: S) -> BuilderResult<&mut Self> {
        self.args.push(Argument::Variable(checked_name(name)?));
        Ok(self)
    }

    pub fn add_argument_with_literal(&mut self, lit: Literal) -> BuilderResult<&mut Self> {
        if !self.for_call {
            return Err(BuilderError::LiteralInDeclaration(lit));
        }
        self.args.push(Argument::Literal(lit));
        Ok(self)
    }

    pub(super) fn into_arguments(self) -> BuilderResult<Vec<Argument>> {
        if self.for_call {
            Ok(self.args)
        } else {
            Err(BuilderError::WrongArgumentList { for_call: false })
        }
    }

    pub(super) fn into_parameters(self) -> BuilderResult<Vec<String>> {
        if self.for_call {
            return Err(BuilderError::WrongArgumentList { for_call: true });
        }
        Ok(self.args
            .into_iter()
            .filter_map(|a| match a {
                Argument::Variable(name) => Some(name),
                Argument::Literal(_) => None,
            })
            .collect())
    }
}
