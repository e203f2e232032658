//! Concise-text compression of study elements

use crate::config::CompressorConfig;
use crate::error::CompressorError;
use crate::lemmatizer::Lemmatizer;
use crate::stopwords::is_stop_word;
use crate::tokenize::{is_alphanumeric, word_tokenize};
use std::collections::HashSet;
use studypack_domain::StudyElements;
use tracing::debug;

/// Appended when the digest is cut at the length ceiling
pub const ELLIPSIS: &str = "...";

const DEFINITION_PREFIX: &str = "Definition: ";

/// Deterministic digest builder
///
/// Output lines, in order:
/// 1. `Definition: <tokens>` for every definition
/// 2. `Q: <tokens> A: <tokens>` for every positional question/answer pair
/// 3. `Term: <term>` for every term not already opening a definition line
#[derive(Debug, Clone)]
pub struct Compressor {
    config: CompressorConfig,
    lemmatizer: Lemmatizer,
}

impl Compressor {
    /// Create a compressor
    pub fn new(config: CompressorConfig) -> Result<Self, CompressorError> {
        config.validate().map_err(CompressorError::Config)?;
        Ok(Self {
            config,
            lemmatizer: Lemmatizer::new(),
        })
    }

    /// The configuration in effect
    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    /// Lowercase, tokenize, drop stop words and non-alphanumeric tokens,
    /// lemmatize, and keep the first `limit` tokens
    pub fn filter_tokens(&self, text: &str, limit: usize) -> Vec<String> {
        word_tokenize(&text.to_lowercase())
            .into_iter()
            .filter(|token| is_alphanumeric(token) && !is_stop_word(token))
            .map(|token| self.lemmatizer.lemmatize(&token))
            .take(limit)
            .collect()
    }

    /// Compress `elements` into a digest of at most `max_chars` characters
    /// plus the ellipsis marker
    pub fn compress(&self, elements: &StudyElements) -> String {
        let mut lines = Vec::new();
        let mut covered_terms = HashSet::new();

        for definition in &elements.definitions {
            let tokens = self.filter_tokens(definition, self.config.definition_tokens);
            let head = tokens.first().map(String::as_str).unwrap_or_default();
            covered_terms.insert(self.lemmatizer.lemmatize(head));
            lines.push(format!("{DEFINITION_PREFIX}{}", tokens.join(" ")));
        }

        for (question, answer) in elements.questions.iter().zip(&elements.answers) {
            let q = self.filter_tokens(question, self.config.qa_tokens);
            let a = self.filter_tokens(answer, self.config.qa_tokens);
            lines.push(format!("Q: {} A: {}", q.join(" "), a.join(" ")));
        }

        for term in &elements.terms {
            if !covered_terms.contains(&self.lemmatizer.lemmatize(&term.to_lowercase())) {
                lines.push(format!("Term: {term}"));
            }
        }

        let text = lines.join("\n");
        truncate(text, self.config.max_chars)
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self {
            config: CompressorConfig::default(),
            lemmatizer: Lemmatizer::new(),
        }
    }
}

/// Compress with the default limits
pub fn compress(elements: &StudyElements) -> String {
    Compressor::default().compress(elements)
}

fn truncate(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            debug!(max_chars, "Digest exceeds ceiling, truncating");
            let mut truncated = text[..cut].to_string();
            truncated.push_str(ELLIPSIS);
            truncated
        }
        None => text,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("\\PC{0,120}", 0..40)
    }

    proptest! {
        #[test]
        fn digest_never_exceeds_ceiling(
            terms in field(),
            definitions in field(),
            questions in field(),
            answers in field(),
        ) {
            let elements = StudyElements {
                terms,
                definitions,
                examples: vec![],
                questions,
                answers,
            };
            let digest = compress(&elements);
            prop_assert!(digest.chars().count() <= 2000 + ELLIPSIS.len());
        }

        #[test]
        fn compression_is_deterministic(definitions in field()) {
            let elements = StudyElements { definitions, ..StudyElements::default() };
            prop_assert_eq!(compress(&elements), compress(&elements));
        }
    }
}
