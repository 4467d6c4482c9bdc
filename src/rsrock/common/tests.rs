use std::fmt::Debug;

use crate::rsrock::common::lexer::{Token, tokenize};

pub fn unsafe_tokenize(program: Vec<&str>) -> Vec<Token> {
    tokenize(program.join("\n").as_ref()).expect("Failed to tokenize")
}

/// Describes how two token (or other) streams diverge, or `None` if they don't. Long streams are
/// hard to compare in a single-line assertion message, so every element gets its own line and
/// the first mismatch is called out.
pub fn stream_diff<A: PartialEq + Debug>(expected: &[A], actual: &[A]) -> Option<String> {
    if expected == actual {
        return None;
    }
    let listing = |items: &[A]| items.iter().map(|a| format!("  {:?}", a)).collect::<Vec<_>>().join("\n");
    let mismatch = expected
        .iter()
        .zip(actual.iter())
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected.len().min(actual.len()));
    Some(format!(
        "streams differ at index {} (expected {} items, got {})\nexpected:\n{}\nactual:\n{}\n",
        mismatch,
        expected.len(),
        actual.len(),
        listing(expected),
        listing(actual),
    ))
}

#[macro_export] macro_rules! assert_eq_vec {
    ($actual: expr, $expected: expr $(,)?) => {{
        if let Some(s) = $crate::rsrock::common::tests::stream_diff(&$expected, &$actual) {
            panic!("{}", s);
        }
    }}
}

#[macro_export] macro_rules! assert_msg_contains {
    ($msg: expr, $str: expr) => {{
        if !$msg.contains($str) {
            panic!("'{}' does not contain '{}'", $msg, $str)
        }
    }}
}

mod tests {
    use super::*;

    #[test]
    fn equal_streams_have_no_diff() {
        assert_eq!(stream_diff(&[1, 2], &[1, 2]), None);
    }

    #[test]
    fn diff_points_at_first_mismatch() {
        let diff = stream_diff(&["a", "b", "c"], &["a", "x", "c"]).unwrap();
        assert!(diff.starts_with("streams differ at index 1 (expected 3 items, got 3)"));
    }

    #[test]
    fn shorter_stream_differs_where_it_ends() {
        let diff = stream_diff(&[1, 2, 3], &[1, 2]).unwrap();
        assert!(diff.starts_with("streams differ at index 2 (expected 3 items, got 2)"));
    }
}
