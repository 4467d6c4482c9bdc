// Character and word classification shared by the lexer, the grammar matcher and the interpreter.

pub const PUNCTUATION: &str = ".,;:?!";

pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(c)
}

/// Splits a word into its base and its trailing punctuation. A word made only of punctuation
/// (e.g. `...`) is kept whole.
pub fn split_punctuation(word: &str) -> (&str, &str) {
    let base = word.trim_end_matches(is_punctuation);
    if base.is_empty() {
        (word, "")
    } else {
        (base, &word[base.len()..])
    }
}

/// Whether a word is a numeric literal as written in source: an optional minus sign, a leading
/// digit, at most one decimal point, and commas only between two digits.
pub fn is_numeric_literal(word: &str) -> bool {
    let unsigned = word.strip_prefix('-').unwrap_or(word);
    unsigned.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false) && is_digit_group(unsigned)
}

/// Parses text that is entirely numeric into a number. Unlike literals in source, an explicit
/// leading `+` is accepted.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix('-').or_else(|| text.strip_prefix('+')).unwrap_or(text);
    if unsigned.is_empty() || !unsigned.chars().any(|c| c.is_ascii_digit()) || !is_digit_group(unsigned) {
        return None;
    }
    strip_separators(text).trim_start_matches('+').parse::<f64>().ok()
}

pub fn strip_separators(word: &str) -> String {
    word.chars().filter(|c| *c != ',').collect()
}

fn is_digit_group(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    let mut periods = 0;
    for (i, c) in chars.iter().enumerate() {
        match c {
            '0'..='9' => (),
            '.' => periods += 1,
            ',' => {
                let digit_at = |j: Option<usize>| j
                    .and_then(|j| chars.get(j))
                    .map(|c| c.is_ascii_digit())
                    .unwrap_or(false);
                if !digit_at(i.checked_sub(1)) || !digit_at(Some(i + 1)) {
                    return false;
                }
            }
            _ => return false,
        }
    }
    periods <= 1
}

pub fn normalize_linebreaks(source: &str) -> String {
    let mut result = source.replace("\r\n", "\n").replace('\r', "\n");
    if !result.ends_with('\n') {
        result.push('\n');
    }
    result
}

pub fn strip_shebang(source: &str) -> &str {
    if source.starts_with("#!") {
        source.find('\n').map(|i| &source[i + 1..]).unwrap_or("")
    } else {
        source
    }
}

pub fn count_letters(word: &str) -> usize {
    word.chars().filter(|c| c.is_alphabetic()).count()
}

pub fn is_capitalized(word: &str) -> bool {
    word.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}
