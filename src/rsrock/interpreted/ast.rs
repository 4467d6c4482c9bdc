use crate::rsrock::interpreted::ast::Statement::{
    Assign, Break, Call, Continue, Decrement, Else, ElseIf, Function, If, Increment, Input, Output,
    Return, While,
};

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Mysterious,
}

impl Literal {
    pub fn string<S: Into<String>>(str: S) -> Self { Literal::String(str.into()) }

    pub fn pretty_print(&self) -> String {
        match self {
            Literal::String(s) => format!("\"{}\"", s),
            Literal::Number(n) => n.to_string(),
            Literal::Boolean(b) => b.to_string(),
            Literal::Null => "null".to_owned(),
            Literal::Mysterious => "mysterious".to_owned(),
        }
    }
}

/// An argument in a call, or a returned value: a variable reference or a literal.
#[derive(Debug, PartialEq, Clone)]
pub enum Argument {
    Variable(String),
    Literal(Literal),
}

impl Argument {
    pub fn variable<S: Into<String>>(str: S) -> Self { Argument::Variable(str.into()) }

    pub fn pretty_print(&self) -> String {
        match self {
            Argument::Variable(name) => name.to_owned(),
            Argument::Literal(lit) => lit.pretty_print(),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Operand {
    Variable(String),
    Literal(Literal),
    Call { name: String, args: Vec<Argument> },
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Operand(Operand),
    Binary(BinaryOperator, Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn pretty_print(&self) -> String {
        fn aux(e: &Expression, depth: usize) -> String {
            let indent = |s: &str| -> String {
                format!("{}{}", "\t".repeat(depth), s.to_owned())
            };
            match e {
                Expression::Operand(Operand::Variable(name)) => indent(name),
                Expression::Operand(Operand::Literal(lit)) => indent(lit.pretty_print().as_ref()),
                Expression::Operand(Operand::Call { name, args }) =>
                    indent(format!(
                        "{}({})",
                        name,
                        args.iter().map(|a| a.pretty_print()).collect::<Vec<_>>().join(", "),
                    ).as_ref()),
                Expression::Binary(op, e1, e2) =>
                    indent(
                        format!("{}(\n{},\n{})",
                                op.symbol(),
                                aux(e1, depth + 1),
                                aux(e2, depth + 1),
                        ).as_ref()),
            }
        }
        aux(self, 0)
    }
    pub fn variable<S: Into<String>>(str: S) -> Self {
        Expression::Operand(Operand::Variable(str.into()))
    }
    pub fn literal(lit: Literal) -> Self { Expression::Operand(Operand::Literal(lit)) }
    pub fn binary(op: BinaryOperator, e1: Expression, e2: Expression) -> Self {
        Expression::Binary(op, Box::new(e1), Box::new(e2))
    }
}

/// The operator families the expression builder accepts separately.
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum OperatorKind {
    Arithmetic,
    Comparison,
    Boolean,
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Mult,
    Div,

    EqualEqual,
    BangEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    And,
    Or,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &str {
        match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Mult => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::EqualEqual => "==",
            BinaryOperator::BangEqual => "!=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        }
    }

    pub fn kind(&self) -> OperatorKind {
        match self {
            BinaryOperator::Plus | BinaryOperator::Minus | BinaryOperator::Mult | BinaryOperator::Div =>
                OperatorKind::Arithmetic,
            BinaryOperator::And | BinaryOperator::Or => OperatorKind::Boolean,
            _ => OperatorKind::Comparison,
        }
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            BinaryOperator::Or => Precedence::Or,
            BinaryOperator::And => Precedence::And,
            BinaryOperator::EqualEqual | BinaryOperator::BangEqual => Precedence::Equality,
            BinaryOperator::Greater
            | BinaryOperator::GreaterEqual
            | BinaryOperator::Less
            | BinaryOperator::LessEqual => Precedence::Comparison,
            BinaryOperator::Plus | BinaryOperator::Minus => Precedence::Term,
            BinaryOperator::Mult | BinaryOperator::Div => Precedence::Factor,
        }
    }
}

/// Binding strength of operators, weakest first. Operators carry it as a plain integer.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, FromPrimitive)]
pub enum Precedence {
    TopLevel,
    Or,
    And,
    Equality /* is, is not */,
    Comparison /* higher than, as low as... */,
    Term /* plus minus */,
    Factor /* times over */,
}

impl Precedence {
    pub fn level(&self) -> u8 { *self as u8 }
}

#[derive(Debug, PartialEq, Clone)]
pub enum AssignedValue {
    Expression(Expression),
    Literal(Literal),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Conditional {
    pub cond: Expression,
    pub body: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Statement>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BlockKind {
    If,
    ElseIf,
    Else,
    While,
    Function,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Assign { target: String, value: AssignedValue },
    Increment(String),
    Decrement(String),
    If(Conditional),
    ElseIf(Conditional),
    Else(Vec<Statement>),
    While { cond: Expression, invert: bool, body: Vec<Statement> },
    Break,
    Continue,
    Function(FunctionDef),
    Call { name: String, args: Vec<Argument> },
    // Nothing means mysterious.
    Return(Option<Argument>),
    Input(Option<String>),
    Output(Expression),
}

impl Statement {
    pub fn block_kind(&self) -> Option<BlockKind> {
        match self {
            If(_) => Some(BlockKind::If),
            ElseIf(_) => Some(BlockKind::ElseIf),
            Else(_) => Some(BlockKind::Else),
            While { .. } => Some(BlockKind::While),
            Function(_) => Some(BlockKind::Function),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Vec<Statement>> {
        match self {
            If(c) | ElseIf(c) => Some(&c.body),
            Else(body) | While { body, .. } => Some(body),
            Function(f) => Some(&f.body),
            _ => None,
        }
    }

    pub fn body_mut(&mut self) -> Option<&mut Vec<Statement>> {
        match self {
            If(c) | ElseIf(c) => Some(&mut c.body),
            Else(body) | While { body, .. } => Some(body),
            Function(f) => Some(&mut f.body),
            _ => None,
        }
    }

    pub fn pretty_print(&self) -> String {
        fn aux(s: &Statement, depth: usize) -> String {
            let indent = |s: &str| -> String {
                format!("{}{}", "\t".repeat(depth), s.to_owned())
            };
            let header = match s {
                Assign { target, value: AssignedValue::Literal(lit) } =>
                    format!("{} := {}", target, lit.pretty_print()),
                Assign { target, value: AssignedValue::Expression(e) } =>
                    format!("{} := (\n{})", target, indented(e, depth + 1)),
                Increment(name) => format!("{}++", name),
                Decrement(name) => format!("{}--", name),
                If(c) => format!("if (\n{})", indented(&c.cond, depth + 1)),
                ElseIf(c) => format!("else if (\n{})", indented(&c.cond, depth + 1)),
                Else(_) => "else".to_owned(),
                While { cond, invert, .. } => format!(
                    "{} (\n{})",
                    if *invert { "until" } else { "while" },
                    indented(cond, depth + 1),
                ),
                Break => "break".to_owned(),
                Continue => "continue".to_owned(),
                Function(f) => format!("function {}({})", f.name, f.params.join(", ")),
                Call { name, args } => format!(
                    "call {}({})",
                    name,
                    args.iter().map(|a| a.pretty_print()).collect::<Vec<_>>().join(", "),
                ),
                Return(None) => "return".to_owned(),
                Return(Some(arg)) => format!("return {}", arg.pretty_print()),
                Input(None) => "input".to_owned(),
                Input(Some(name)) => format!("input -> {}", name),
                Output(e) => format!("output (\n{})", indented(e, depth + 1)),
            };
            match s.body() {
                None => indent(header.as_ref()),
                Some(body) => {
                    let mut lines = vec![indent(format!("{} {{", header).as_ref())];
                    lines.extend(body.iter().map(|child| aux(child, depth + 1)));
                    lines.push(indent("}"));
                    lines.join("\n")
                }
            }
        }
        fn indented(e: &Expression, depth: usize) -> String {
            e.pretty_print()
                .lines()
                .map(|l| format!("{}{}", "\t".repeat(depth), l))
                .collect::<Vec<_>>()
                .join("\n")
        }
        aux(self, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_levels_are_ordered() {
        assert!(Precedence::Or < Precedence::And);
        assert!(Precedence::Term < Precedence::Factor);
        assert_eq!(BinaryOperator::Mult.precedence().level(), 6);
        assert_eq!(BinaryOperator::Or.precedence().level(), 1);
    }

    #[test]
    fn operator_kinds() {
        assert_eq!(BinaryOperator::Div.kind(), OperatorKind::Arithmetic);
        assert_eq!(BinaryOperator::GreaterEqual.kind(), OperatorKind::Comparison);
        assert_eq!(BinaryOperator::BangEqual.kind(), OperatorKind::Comparison);
        assert_eq!(BinaryOperator::And.kind(), OperatorKind::Boolean);
    }

    #[test]
    fn only_blocks_have_bodies() {
        assert_eq!(Statement::Break.block_kind(), None);
        assert_eq!(Statement::Break.body(), None);
        let mut function = Statement::Function(FunctionDef {
            name: "f".to_owned(),
            params: vec![],
            body: vec![],
        });
        assert_eq!(function.block_kind(), Some(BlockKind::Function));
        function.body_mut().unwrap().push(Statement::Return(None));
        assert_eq!(function.body(), Some(&vec![Statement::Return(None)]));
    }

    #[test]
    fn pretty_print_nests_blocks() {
        let statement = Statement::While {
            cond: Expression::binary(
                BinaryOperator::Less,
                Expression::variable("my heart"),
                Expression::literal(Literal::Number(10.0)),
            ),
            invert: false,
            body: vec![Statement::Increment("my heart".to_owned())],
        };
        assert_eq!(
            statement.pretty_print(),
            "while (\n\t<(\n\t\tmy heart,\n\t\t10)) {\n\tmy heart++\n}",
        );
    }
}
