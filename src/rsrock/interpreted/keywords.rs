//! Reserved words. All matching is case-insensitive; callers pass words in any case.

use crate::rsrock::interpreted::ast::Literal;

pub const COMMON_PREFIXES: &[&str] = &["a", "an", "the", "my", "your"];
pub const PRONOUNS: &[&str] = &[
    "it", "he", "she", "him", "her", "they", "them", "ze", "hir", "zie", "zir", "xe", "xem", "ve", "ver",
];
pub const ASSIGNMENT_VERBS: &[&str] = &["is", "are", "was", "were"];
pub const POETIC_STRING_VERBS: &[&str] = &["says"];
pub const OUTPUT_VERBS: &[&str] = &["say", "shout", "whisper", "scream"];

pub const PLUS: &[&str] = &["plus", "with"];
pub const MINUS: &[&str] = &["minus", "without"];
pub const TIMES: &[&str] = &["times", "of"];
pub const OVER: &[&str] = &["over"];
pub const IS: &[&str] = &["is"];
pub const IS_NOT: &[&str] = &["isn't", "isnt", "ain't", "aint"];
pub const HIGHER: &[&str] = &["higher", "greater", "bigger", "stronger"];
pub const LOWER: &[&str] = &["lower", "less", "smaller", "weaker"];
pub const HIGH: &[&str] = &["high", "great", "big", "strong"];
pub const LOW: &[&str] = &["low", "little", "small", "weak"];

pub const MYSTERIOUS: &[&str] = &["mysterious"];
pub const NULL: &[&str] = &["null", "nothing", "nowhere", "nobody", "empty", "gone"];
pub const TRUE: &[&str] = &["true", "right", "yes", "ok"];
pub const FALSE: &[&str] = &["false", "wrong", "no", "lies"];
// Reserved for later versions of the language.
const RESERVED: &[&str] = &["maybe", "definitely"];

const STATEMENT_WORDS: &[&str] = &[
    "listen", "put", "into", "build", "up", "knock", "down", "if", "else", "while", "until", "break",
    "continue", "take", "to", "top", "takes", "taking", "give", "back", "as", "than", "not", "and",
    "or",
];

pub fn is_one_of(word: &str, group: &[&str]) -> bool {
    let word = word.to_lowercase();
    group.iter().any(|w| *w == word)
}

/// Words that can never name a variable or a function.
pub fn is_keyword(word: &str) -> bool {
    [
        COMMON_PREFIXES, PRONOUNS, ASSIGNMENT_VERBS, POETIC_STRING_VERBS, OUTPUT_VERBS, PLUS, MINUS,
        TIMES, OVER, IS_NOT, HIGHER, LOWER, HIGH, LOW, MYSTERIOUS, NULL, TRUE, FALSE, RESERVED,
        STATEMENT_WORDS,
    ].iter().any(|group| is_one_of(word, group))
}

/// The constant a literal word stands for.
pub fn literal_for(word: &str) -> Option<Literal> {
    if is_one_of(word, MYSTERIOUS) {
        Some(Literal::Mysterious)
    } else if is_one_of(word, NULL) {
        Some(Literal::Null)
    } else if is_one_of(word, TRUE) {
        Some(Literal::Boolean(true))
    } else if is_one_of(word, FALSE) {
        Some(Literal::Boolean(false))
    } else {
        None
    }
}

/// The boolean a string stands for when compared against a boolean.
pub fn string_as_boolean(s: &str) -> Option<bool> {
    if is_one_of(s, TRUE) {
        Some(true)
    } else if is_one_of(s, FALSE) {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_ignore_case() {
        assert!(is_keyword("Put"));
        assert!(is_keyword("WHISPER"));
        assert!(is_keyword("maybe"));
        assert!(!is_keyword("Tommy"));
        assert!(!is_keyword("heart"));
    }

    #[test]
    fn literal_words() {
        assert_eq!(literal_for("Nobody"), Some(Literal::Null));
        assert_eq!(literal_for("ok"), Some(Literal::Boolean(true)));
        assert_eq!(literal_for("lies"), Some(Literal::Boolean(false)));
        assert_eq!(literal_for("mysterious"), Some(Literal::Mysterious));
        assert_eq!(literal_for("maybe"), None);
        assert_eq!(literal_for("rock"), None);
    }

    #[test]
    fn boolean_aliases() {
        assert_eq!(string_as_boolean("RIGHT"), Some(true));
        assert_eq!(string_as_boolean("wrong"), Some(false));
        assert_eq!(string_as_boolean("raw"), None);
        assert_eq!(string_as_boolean(""), None);
    }
}
