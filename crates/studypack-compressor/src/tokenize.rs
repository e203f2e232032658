//! Word tokenization
//!
//! Treebank-style: contractions split off their `n't`, runs of word
//! characters joined by `-`, `.` or `/` stay one token, and punctuation
//! becomes its own token. Callers filter to purely alphanumeric tokens, so
//! hyphenated words and decimals are dropped, not split.

use regex::Regex;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+(?:[-./]\w+)*|'\w*|[^\w\s]+").unwrap());

/// Split `text` into word and punctuation tokens
pub fn word_tokenize(text: &str) -> Vec<String> {
    let text = text.replace("n't", " n't");
    TOKEN
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// True when every character of a non-empty token is a letter or digit
pub fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}
