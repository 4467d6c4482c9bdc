//! How operators treat mixed types. Only `add` and `multiply` ever produce strings, and only the
//! comparison operators look inside strings for numbers or booleans.

use std::cmp::Ordering;

use crate::rsrock::common::strings::parse_numeric;
use crate::rsrock::interpreted::ast::BinaryOperator;
use crate::rsrock::interpreted::interpreter::result::{binary_type_error, InterpretResult, RuntimeError};
use crate::rsrock::interpreted::interpreter::rock_value::RockValue;
use crate::rsrock::interpreted::interpreter::rock_value::RockValue::{Boolean, Mysterious, Null, Number};
use crate::rsrock::interpreted::keywords::string_as_boolean;

/// Longest string (in bytes) that repetition may build.
pub const MAX_STRING_LENGTH: usize = 1 << 30;

pub fn arithmetic(op: &BinaryOperator, v1: &RockValue, v2: &RockValue) -> InterpretResult<RockValue> {
    match op {
        BinaryOperator::Plus => add(v1, v2),
        BinaryOperator::Minus => subtract(v1, v2),
        BinaryOperator::Mult => multiply(v1, v2),
        BinaryOperator::Div => divide(v1, v2),
        _ => panic!("'{}' is not an arithmetic operator", op.symbol()),
    }
}

pub fn comparison(op: &BinaryOperator, v1: &RockValue, v2: &RockValue) -> bool {
    let ordering = compare(v1, v2);
    match op {
        BinaryOperator::EqualEqual => equal(v1, v2),
        BinaryOperator::BangEqual => !equal(v1, v2),
        BinaryOperator::Less => ordering == Some(Ordering::Less),
        BinaryOperator::Greater => ordering == Some(Ordering::Greater),
        BinaryOperator::LessEqual =>
            ordering.map(|o| o != Ordering::Greater).unwrap_or_else(|| equal(v1, v2)),
        BinaryOperator::GreaterEqual =>
            ordering.map(|o| o != Ordering::Less).unwrap_or_else(|| equal(v1, v2)),
        _ => panic!("'{}' is not a comparison operator", op.symbol()),
    }
}

pub fn add(v1: &RockValue, v2: &RockValue) -> InterpretResult<RockValue> {
    match (v1, v2) {
        (Number(n1), Number(n2)) => Ok(Number(n1 + n2)),
        (RockValue::String(_), _) | (_, RockValue::String(_)) =>
            Ok(RockValue::String(format!("{}{}", v1.stringify(), v2.stringify()))),
        _ => binary_type_error(&BinaryOperator::Plus, v1, v2),
    }
}

pub fn subtract(v1: &RockValue, v2: &RockValue) -> InterpretResult<RockValue> {
    match (v1, v2) {
        (Number(n1), Number(n2)) => Ok(Number(n1 - n2)),
        _ => binary_type_error(&BinaryOperator::Minus, v1, v2),
    }
}

pub fn multiply(v1: &RockValue, v2: &RockValue) -> InterpretResult<RockValue> {
    match (v1, v2) {
        (Number(n1), Number(n2)) => Ok(Number(n1 * n2)),
        (RockValue::String(s), Number(n)) | (Number(n), RockValue::String(s)) => repeat(s, *n),
        _ => binary_type_error(&BinaryOperator::Mult, v1, v2),
    }
}

// The count is truncated toward zero.
fn repeat(s: &str, n: f64) -> InterpretResult<RockValue> {
    if n < 0.0 {
        return Err(RuntimeError::NegativeRepetition(n));
    }
    let count = n.trunc();
    if !count.is_finite() || count > MAX_STRING_LENGTH as f64 {
        return Err(RuntimeError::RepetitionTooLarge(n));
    }
    let count = count as usize;
    match s.len().checked_mul(count) {
        Some(length) if length <= MAX_STRING_LENGTH => Ok(RockValue::String(s.repeat(count))),
        _ => Err(RuntimeError::RepetitionTooLarge(n)),
    }
}

pub fn divide(v1: &RockValue, v2: &RockValue) -> InterpretResult<RockValue> {
    match (v1, v2) {
        (_, Null) => Err(RuntimeError::DivisionByNull),
        (Number(_), Number(n2)) if *n2 == 0.0 => Err(RuntimeError::DivisionByZero),
        (Number(n1), Number(n2)) => Ok(Number(n1 / n2)),
        _ => binary_type_error(&BinaryOperator::Div, v1, v2),
    }
}

pub fn equal(v1: &RockValue, v2: &RockValue) -> bool {
    match (v1, v2) {
        (RockValue::String(s1), RockValue::String(s2)) => s1 == s2,
        (Number(n1), Number(n2)) => n1 == n2,
        (Boolean(b1), Boolean(b2)) => b1 == b2,
        (Null, Null) | (Mysterious, Mysterious) => true,
        (RockValue::String(s), Boolean(b)) | (Boolean(b), RockValue::String(s)) =>
            string_as_boolean(s).map(|sb| sb == *b).unwrap_or(false),
        (RockValue::String(s), Number(n)) | (Number(n), RockValue::String(s)) =>
            parse_numeric(s).map(|sn| sn == *n).unwrap_or(false),
        (Number(n), Null) | (Null, Number(n)) => *n == 0.0,
        (Boolean(b), Null) | (Null, Boolean(b)) => !*b,
        _ => false,
    }
}

/// `None` when the two values have no order, e.g. booleans or a non-numeric string and a number.
pub fn compare(v1: &RockValue, v2: &RockValue) -> Option<Ordering> {
    match (v1, v2) {
        (Number(n1), Number(n2)) => n1.partial_cmp(n2),
        (RockValue::String(s1), RockValue::String(s2)) => Some(s1.cmp(s2)),
        (Null, Null) => Some(Ordering::Equal),
        (Number(n), Null) => n.partial_cmp(&0.0),
        (Null, Number(n)) => 0f64.partial_cmp(n),
        (RockValue::String(s), Number(n)) => parse_numeric(s).and_then(|sn| sn.partial_cmp(n)),
        (Number(n), RockValue::String(s)) => parse_numeric(s).and_then(|sn| n.partial_cmp(&sn)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_msg_contains;
    use crate::rsrock::common::error::RockError;
    use crate::rsrock::interpreted::ast::BinaryOperator::{
        BangEqual, Div, EqualEqual, Greater, GreaterEqual, Less, LessEqual, Minus, Mult, Plus,
    };

    use super::*;

    fn s(str: &str) -> RockValue { RockValue::string(str) }

    #[test]
    fn add_numbers_or_concatenate() {
        assert_eq!(add(&Number(2.0), &Number(3.5)), Ok(Number(5.5)));
        assert_eq!(add(&s("Tommy"), &s(" Gun")), Ok(s("Tommy Gun")));
        assert_eq!(add(&s("x"), &Mysterious), Ok(s("xmysterious")));
        assert_eq!(add(&Boolean(true), &s("!")), Ok(s("true!")));
        assert_eq!(add(&Null, &s("")), Ok(s("null")));
    }

    #[test]
    fn numeric_strings_concatenate_with_numbers() {
        assert_eq!(add(&Number(5.0), &s("3")), Ok(s("53")));
    }

    #[test]
    fn add_without_strings_needs_numbers() {
        let error = add(&Null, &Number(1.0)).unwrap_err();
        assert_msg_contains!(error.get_message(), "'+'");
        assert!(add(&Boolean(true), &Boolean(true)).is_err());
        assert!(add(&Mysterious, &Number(1.0)).is_err());
    }

    #[test]
    fn subtract_only_numbers() {
        assert_eq!(subtract(&Number(2.0), &Number(3.0)), Ok(Number(-1.0)));
        assert!(matches!(subtract(&Number(5.0), &s("3")), Err(RuntimeError::TypeError(_))));
        assert!(subtract(&Null, &Number(1.0)).is_err());
    }

    #[test]
    fn multiply_repeats_strings() {
        assert_eq!(multiply(&Number(4.0), &Number(0.5)), Ok(Number(2.0)));
        assert_eq!(multiply(&s("ab"), &Number(3.0)), Ok(s("ababab")));
        assert_eq!(multiply(&Number(2.9), &s("ab")), Ok(s("abab")));
        assert_eq!(multiply(&s("ab"), &Number(0.0)), Ok(s("")));
        assert_eq!(multiply(&s("ab"), &Number(-1.0)), Err(RuntimeError::NegativeRepetition(-1.0)));
        assert!(multiply(&s("ab"), &s("2")).is_err());
    }

    #[test]
    fn huge_repetitions_are_errors() {
        assert_eq!(multiply(&s("ab"), &Number(1e19)), Err(RuntimeError::RepetitionTooLarge(1e19)));
        assert_eq!(
            multiply(&Number(f64::INFINITY), &s("ab")),
            Err(RuntimeError::RepetitionTooLarge(f64::INFINITY)),
        );
        assert!(matches!(multiply(&s("ab"), &Number(f64::NAN)), Err(RuntimeError::RepetitionTooLarge(_))));
        let half = (MAX_STRING_LENGTH / 2 + 1) as f64;
        assert_eq!(multiply(&s("ab"), &Number(half)), Err(RuntimeError::RepetitionTooLarge(half)));
        assert_msg_contains!(multiply(&s("ab"), &Number(1e19)).unwrap_err().get_message(), "too long");
    }

    #[test]
    fn divide_by_zero_or_null() {
        assert_eq!(divide(&Number(1.0), &Number(4.0)), Ok(Number(0.25)));
        assert_eq!(divide(&Number(1.0), &Number(0.0)), Err(RuntimeError::DivisionByZero));
        assert_eq!(divide(&Number(1.0), &Null), Err(RuntimeError::DivisionByNull));
        assert_eq!(divide(&s("x"), &Null), Err(RuntimeError::DivisionByNull));
        assert!(matches!(divide(&s("6"), &Number(2.0)), Err(RuntimeError::TypeError(_))));
        assert!(matches!(divide(&Number(6.0), &s("3")), Err(RuntimeError::TypeError(_))));
    }

    #[test]
    fn same_kinds_are_equal_natively() {
        assert!(equal(&Number(1.0), &Number(1.0)));
        assert!(!equal(&s("a"), &s("A")));
        assert!(equal(&Null, &Null));
        assert!(equal(&Mysterious, &Mysterious));
        assert!(!equal(&Boolean(true), &Boolean(false)));
    }

    #[test]
    fn strings_equal_booleans_through_aliases() {
        assert!(equal(&s("true"), &Boolean(true)));
        assert!(equal(&Boolean(true), &s("Yes")));
        assert!(equal(&s("LIES"), &Boolean(false)));
        assert!(!equal(&s("raw"), &Boolean(true)));
        assert!(!equal(&s("raw"), &Boolean(false)));
    }

    #[test]
    fn strings_equal_numbers_when_numeric() {
        assert!(equal(&s("3.0"), &Number(3.0)));
        assert!(equal(&Number(1000.0), &s("1,000")));
        assert!(!equal(&s("three"), &Number(3.0)));
    }

    #[test]
    fn null_is_zero_or_false() {
        assert!(equal(&Null, &Number(0.0)));
        assert!(!equal(&Number(1.0), &Null));
        assert!(equal(&Boolean(false), &Null));
        assert!(!equal(&Null, &Boolean(true)));
        assert!(!equal(&Null, &Mysterious));
        assert!(!equal(&Null, &s("")));
    }

    #[test]
    fn ordering() {
        assert_eq!(compare(&Number(1.0), &Number(2.0)), Some(Ordering::Less));
        assert_eq!(compare(&s("b"), &s("a")), Some(Ordering::Greater));
        assert_eq!(compare(&s("10"), &Number(9.0)), Some(Ordering::Greater));
        assert_eq!(compare(&Number(-1.0), &Null), Some(Ordering::Less));
        assert_eq!(compare(&s("ten"), &Number(9.0)), None);
        assert_eq!(compare(&Boolean(true), &Boolean(false)), None);
        assert_eq!(compare(&Mysterious, &Number(1.0)), None);
    }

    #[test]
    fn comparison_operators() {
        assert!(comparison(&Less, &Null, &Number(5.0)));
        assert!(!comparison(&Less, &Boolean(true), &Boolean(false)));
        assert!(!comparison(&Greater, &Boolean(true), &Boolean(false)));
        assert!(comparison(&GreaterEqual, &Number(3.0), &Number(3.0)));
        assert!(comparison(&LessEqual, &s("2"), &Number(3.0)));
        assert!(comparison(&EqualEqual, &s("ok"), &Boolean(true)));
        assert!(comparison(&BangEqual, &Null, &Mysterious));
    }

    #[test]
    fn non_strict_comparisons_fall_back_to_equality() {
        assert!(comparison(&LessEqual, &Boolean(true), &Boolean(true)));
        assert!(comparison(&GreaterEqual, &Boolean(false), &Null));
        assert!(!comparison(&GreaterEqual, &Boolean(true), &Boolean(false)));
    }

    #[test]
    fn arithmetic_dispatch() {
        assert_eq!(arithmetic(&Plus, &Number(1.0), &Number(2.0)), Ok(Number(3.0)));
        assert_eq!(arithmetic(&Minus, &Number(1.0), &Number(2.0)), Ok(Number(-1.0)));
        assert_eq!(arithmetic(&Mult, &Number(3.0), &Number(2.0)), Ok(Number(6.0)));
        assert_eq!(arithmetic(&Div, &Number(3.0), &Number(2.0)), Ok(Number(1.5)));
    }
}
