use either::Either;
use either::Either::{Left, Right};
use num_traits::FromPrimitive;

use crate::rsrock::common::utils::VecExt;
use crate::rsrock::interpreted::ast;
use crate::rsrock::interpreted::ast::{BinaryOperator, Literal, Operand, OperatorKind, Precedence};
use crate::rsrock::interpreted::builder::{BuilderError, BuilderResult, checked_name};
use crate::rsrock::interpreted::builder::argument_list::ArgumentList;

type Term = Either<Operand, (BinaryOperator, Precedence)>;

/// Collects expression terms in source order and groups them by precedence.
///
/// Terms must alternate, starting and ending with an operand. That is checked as each term is
/// added, so the reduction in [`ExpressionBuilder::to_tree`] never sees a malformed list.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ExpressionBuilder {
    terms: Vec<Term>,
}

impl ExpressionBuilder {
    pub fn new() -> Self { ExpressionBuilder { terms: Vec::new() } }

    pub fn add_variable_operand<S: Into<String>>(&mut self, name: S) -> BuilderResult<&mut Self> {
        let name = checked_name(name)?;
        self.add_operand(Operand::Variable(name))
    }

    pub fn add_literal_operand(&mut self, lit: Literal) -> BuilderResult<&mut Self> {
        self.add_operand(Operand::Literal(lit))
    }

    pub fn add_function_call_operand<S: Into<String>>(
        &mut self, name: S, args: ArgumentList,
    ) -> BuilderResult<&mut Self> {
        let name = checked_name(name)?;
        let args = args.into_arguments()?;
        self.add_operand(Operand::Call { name, args })
    }

    pub fn add_arithmetic_operator(&mut self, op: BinaryOperator, precedence: u8) -> BuilderResult<&mut Self> {
        self.add_operator(op, OperatorKind::Arithmetic, precedence)
    }

    pub fn add_comparison_operator(&mut self, op: BinaryOperator, precedence: u8) -> BuilderResult<&mut Self> {
        self.add_operator(op, OperatorKind::Comparison, precedence)
    }

    pub fn add_boolean_operator(&mut self, op: BinaryOperator, precedence: u8) -> BuilderResult<&mut Self> {
        self.add_operator(op, OperatorKind::Boolean, precedence)
    }

    pub fn to_tree(self) -> BuilderResult<ast::Expression> {
        if self.expects_operand() {
            return Err(BuilderError::IncompleteExpression);
        }
        Ok(reduce(self.terms))
    }

    fn expects_operand(&self) -> bool {
        self.terms.last().map(|t| t.is_right()).unwrap_or(true)
    }

    fn add_operand(&mut self, operand: Operand) -> BuilderResult<&mut Self> {
        if !self.expects_operand() {
            return Err(BuilderError::MisplacedOperand);
        }
        self.terms.push(Left(operand));
        Ok(self)
    }

    fn add_operator(
        &mut self, op: BinaryOperator, expected: OperatorKind, precedence: u8,
    ) -> BuilderResult<&mut Self> {
        if op.kind() != expected {
            return Err(BuilderError::WrongOperatorKind { operator: op, expected });
        }
        let precedence = Precedence::from_u8(precedence)
            .filter(|p| *p != Precedence::TopLevel)
            .ok_or(BuilderError::InvalidPrecedence(precedence))?;
        if self.expects_operand() {
            return Err(BuilderError::MisplacedOperator(op));
        }
        self.terms.push(Right((op, precedence)));
        Ok(self)
    }
}

// Two-stack reduction. Popping every stacked operator whose precedence is at least the incoming
// one makes equal precedences group to the left.
fn reduce(terms: Vec<Term>) -> ast::Expression {
    let mut operands: Vec<ast::Expression> = Vec::new();
    let mut operators: Vec<(BinaryOperator, Precedence)> = Vec::new();
    for term in terms {
        match term {
            Left(operand) => operands.push(ast::Expression::Operand(operand)),
            Right((op, precedence)) => {
                while operators.last().map(|(_, top)| *top >= precedence).unwrap_or(false) {
                    bind_top(&mut operands, &mut operators);
                }
                operators.push((op, precedence));
            }
        }
    }
    while !operators.is_empty() {
        bind_top(&mut operands, &mut operators);
    }
    operands.into_single()
}

fn bind_top(operands: &mut Vec<ast::Expression>, operators: &mut Vec<(BinaryOperator, Precedence)>) {
    let (op, _) = operators.pop().expect("No operator to bind");
    let right = operands.pop().expect("Operator without a right operand");
    let left = operands.pop().expect("Operator without a left operand");
    operands.push(ast::Expression::binary(op, left, right));
}
