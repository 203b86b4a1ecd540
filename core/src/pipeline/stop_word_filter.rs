// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use super::PipelineFunction;
use crate::{Language, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopWordFilter {
    language: Language,
}

impl StopWordFilter {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

impl PipelineFunction for StopWordFilter {
    fn run(&self, token: Token) -> Option<Token> {
        if self.language.stop_words().contains(token.text()) {
            None
        } else {
            Some(token)
        }
    }

    fn label(&self) -> String {
        format!("stopWordFilter-{}", self.language)
    }

    fn languages(&self) -> Vec<Language> {
        vec![self.language]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str) -> Token {
        Token::new(text.to_string(), 0..text.len())
    }

    #[test]
    fn removes_stop_words() {
        let filter = StopWordFilter::new(Language::German);
        assert!(filter.run(token("und")).is_none());
        assert_eq!(filter.run(token("haus")).unwrap().text(), "haus");
        assert_eq!(filter.label(), "stopWordFilter-de");
    }

    #[test]
    fn bom_prefixed_russian_entry() {
        let filter = StopWordFilter::new(Language::Russian);
        assert!(filter.run(token("\u{FEFF}а")).is_none());
        assert!(filter.run(token("а")).is_some());
    }
}
