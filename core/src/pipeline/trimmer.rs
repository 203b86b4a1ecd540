// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use itertools::Itertools;

use super::PipelineFunction;
use crate::{Language, Token};

/// Strips leading and trailing characters that are not word characters of
/// any of its languages. Tokens with nothing left are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trimmer {
    languages: Vec<Language>,
}

impl Trimmer {
    pub fn new(language: Language) -> Self {
        Self {
            languages: vec![language],
        }
    }

    /// A trimmer accepting the union of the word characters of `languages`.
    pub fn union(languages: &[Language]) -> Self {
        Self {
            languages: languages.iter().copied().unique().collect(),
        }
    }

    fn is_word_character(&self, c: char) -> bool {
        self.languages
            .iter()
            .any(|lang| lang.is_word_character(c))
    }
}

impl PipelineFunction for Trimmer {
    fn run(&self, mut token: Token) -> Option<Token> {
        let text = token.text();
        let trimmed = text.trim_matches(|c: char| !self.is_word_character(c));

        if trimmed.is_empty() {
            return None;
        }

        if trimmed.len() < text.len() {
            let trimmed = trimmed.to_string();
            token.set_text(trimmed);
        }

        Some(token)
    }

    fn label(&self) -> String {
        format!("trimmer-{}", self.languages.iter().join("-"))
    }

    fn languages(&self) -> Vec<Language> {
        self.languages.clone()
    }
}
