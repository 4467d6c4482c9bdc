use crate::rsrock::interpreted::ast::Literal;
use crate::rsrock::interpreted::interpreter::rock_value::RockValue::{Boolean, Mysterious, Null, Number};

#[derive(Debug, PartialEq, Clone)]
pub enum RockValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    // Anything never assigned, or a function that gave nothing back.
    Mysterious,
}

impl From<&Literal> for RockValue {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::String(s) => RockValue::String(s.to_owned()),
            Literal::Number(n) => Number(*n),
            Literal::Boolean(b) => Boolean(*b),
            Literal::Null => Null,
            Literal::Mysterious => Mysterious,
        }
    }
}

impl RockValue {
    pub fn string<S: Into<String>>(str: S) -> Self { RockValue::String(str.into()) }

    pub fn type_name(&self) -> &'static str {
        match self {
            RockValue::String(_) => "String",
            Number(_) => "Number",
            Boolean(_) => "Boolean",
            Null => "Null",
            Mysterious => "Mysterious",
        }
    }

    pub fn stringify(&self) -> String {
        match self {
            RockValue::String(s) => s.to_owned(),
            // Avoids printing "-0".
            Number(n) if *n == 0.0 => "0".to_owned(),
            Number(n) => n.to_string(),
            Boolean(b) => b.to_string(),
            Null => "null".to_owned(),
            Mysterious => "mysterious".to_owned(),
        }
    }

    pub fn truthiness(&self) -> bool {
        match self {
            RockValue::String(s) => !s.is_empty(),
            Number(n) => *n != 0.0,
            Boolean(b) => *b,
            Null | Mysterious => false,
        }
    }
}
