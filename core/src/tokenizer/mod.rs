// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::Language;

use self::script_tokenizer::ScriptTokenizer;

pub mod fields;
pub mod script;
pub mod script_tokenizer;
pub mod segmenter;
pub mod split_with_range;
pub mod stemmer;

/// A piece of text cut out of the input, possibly rewritten by the pipeline.
/// The span always refers to the bytes of the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    span: Range<usize>,
    position: usize,
}

impl Token {
    pub fn new(text: String, span: Range<usize>) -> Self {
        Self {
            text,
            span,
            position: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Length in bytes of the span in the input.
    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Index of the token in the sequence produced for its input.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tokenizer {
    #[default]
    Whitespace,
    Chinese,
    Japanese,
}

impl Tokenizer {
    /// The tokenizer for a set of languages. The first language that is not
    /// separated by whitespace decides.
    pub fn for_languages(languages: &[Language]) -> Self {
        languages
            .iter()
            .find_map(|lang| match lang {
                Language::Chinese => Some(Tokenizer::Chinese),
                Language::Japanese => Some(Tokenizer::Japanese),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn script_tokenizer(&self) -> Box<dyn ScriptTokenizer> {
        match self {
            Tokenizer::Whitespace => Box::new(script_tokenizer::Whitespace),
            Tokenizer::Chinese => Box::new(script_tokenizer::Chinese),
            Tokenizer::Japanese => Box::new(script_tokenizer::Japanese),
        }
    }

    /// Lazily tokenizes `text`. Every call starts over from the beginning.
    pub fn tokenize<'a>(&self, text: &'a str) -> impl Iterator<Item = Token> + 'a {
        self.script_tokenizer()
            .tokenize(text)
            .enumerate()
            .map(|(position, mut token)| {
                token.position = position;
                token
            })
    }
}

impl From<Language> for Tokenizer {
    fn from(language: Language) -> Self {
        Self::for_languages(&[language])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn positions_are_sequential() {
        let tokens: Vec<_> = Tokenizer::Whitespace.tokenize("a quick  fox").collect();
        let positions: Vec<_> = tokens.iter().map(|t| t.position()).collect();
        assert_eq!(positions, vec![0, 1, 2]);

        assert_eq!(tokens[2].start(), 9);
        assert_eq!(tokens[2].len(), 3);
    }

    #[test]
    fn restartable() {
        let tokenizer = Tokenizer::Chinese;
        let first: Vec<_> = tokenizer.tokenize("北京大学").collect();
        let second: Vec<_> = tokenizer.tokenize("北京大学").collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 7);
        assert_eq!(first[6].position(), 6);
    }

    #[test]
    fn choice_by_language() {
        assert_eq!(
            Tokenizer::for_languages(&[Language::English, Language::French]),
            Tokenizer::Whitespace
        );
        assert_eq!(
            Tokenizer::for_languages(&[Language::English, Language::Japanese, Language::Chinese]),
            Tokenizer::Japanese
        );
        assert_eq!(Tokenizer::from(Language::Chinese), Tokenizer::Chinese);
        assert_eq!(Tokenizer::for_languages(&[]), Tokenizer::Whitespace);
    }

    proptest! {
        #[test]
        fn spans_within_input(txt: String) {
            for tokenizer in [Tokenizer::Whitespace, Tokenizer::Chinese, Tokenizer::Japanese] {
                for token in tokenizer.tokenize(&txt) {
                    prop_assert!(token.span().end <= txt.len());
                    prop_assert!(!token.is_empty());
                    prop_assert!(txt.is_char_boundary(token.start()));
                }
            }
        }
    }
}
