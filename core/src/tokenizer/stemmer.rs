// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use std::borrow::Cow;

use tantivy::tokenizer::{TokenFilter, TokenStream};

use crate::{Language, Result};

/// Reduces words of one language to their stems.
///
/// Chinese and Japanese words are returned unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stemmer {
    language: Language,
}

impl Stemmer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn try_stem(&self, word: &str) -> Result<String> {
        match self.language.algorithm() {
            Some(algorithm) => algorithm.stem(word),
            None => Ok(word.to_string()),
        }
    }

    /// Stems `word`, falling back to the word itself if the rule program
    /// aborts.
    pub fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        let Some(algorithm) = self.language.algorithm() else {
            return Cow::Borrowed(word);
        };

        match algorithm.stem(word) {
            Ok(stem) if stem == word => Cow::Borrowed(word),
            Ok(stem) => {
                tracing::trace!(language = %self.language, word, stem, "stemmed");
                Cow::Owned(stem)
            }
            Err(err) => {
                tracing::warn!(language = %self.language, word, %err, "stemming aborted");
                Cow::Borrowed(word)
            }
        }
    }
}

impl From<Language> for Stemmer {
    fn from(language: Language) -> Self {
        Self::new(language)
    }
}

impl TokenFilter for Stemmer {
    type Tokenizer<T: tantivy::tokenizer::Tokenizer> = StemmerFilter<T>;

    fn transform<T: tantivy::tokenizer::Tokenizer>(self, tokenizer: T) -> StemmerFilter<T> {
        StemmerFilter {
            stemmer: self,
            inner: tokenizer,
        }
    }
}

#[derive(Clone)]
pub struct StemmerFilter<T> {
    stemmer: Stemmer,
    inner: T,
}

impl<T: tantivy::tokenizer::Tokenizer> tantivy::tokenizer::Tokenizer for StemmerFilter<T> {
    type TokenStream<'a> = StemmerTokenStream<T::TokenStream<'a>>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        StemmerTokenStream {
            stemmer: self.stemmer,
            tail: self.inner.token_stream(text),
        }
    }
}

pub struct StemmerTokenStream<T> {
    stemmer: Stemmer,
    tail: T,
}

impl<T: TokenStream> TokenStream for StemmerTokenStream<T> {
    fn advance(&mut self) -> bool {
        if !self.tail.advance() {
            return false;
        }

        let token = self.tail.token_mut();
        let stemmed = match self.stemmer.stem(&token.text) {
            Cow::Owned(stem) => Some(stem),
            Cow::Borrowed(_) => None,
        };
        if let Some(stem) = stemmed {
            token.text = stem;
        }

        true
    }

    fn token(&self) -> &tantivy::tokenizer::Token {
        self.tail.token()
    }

    fn token_mut(&mut self) -> &mut tantivy::tokenizer::Token {
        self.tail.token_mut()
    }
}
