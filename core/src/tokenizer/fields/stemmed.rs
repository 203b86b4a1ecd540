// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use tantivy::tokenizer::{BoxTokenStream, LowerCaser, SimpleTokenizer, TextAnalyzer};

use crate::tokenizer::stemmer::Stemmer;
use crate::Language;

/// Lower cases and stems words, detecting the language of the text unless
/// one is forced.
#[derive(Clone, Default)]
pub struct Stemmed {
    force_language: Option<Language>,
    analyzer: Option<TextAnalyzer>,
}

impl Stemmed {
    pub fn as_str() -> &'static str {
        "stemmed_tokenizer"
    }

    pub fn with_forced_language(lang: Language) -> Self {
        Self {
            force_language: Some(lang),
            analyzer: None,
        }
    }

    fn language(&self, text: &str) -> Option<Language> {
        self.force_language.or_else(|| {
            whatlang::detect_lang(text).and_then(|lang| Language::try_from(lang).ok())
        })
    }
}

impl tantivy::tokenizer::Tokenizer for Stemmed {
    type TokenStream<'a> = BoxTokenStream<'a>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        let builder = TextAnalyzer::builder(SimpleTokenizer::default()).filter(LowerCaser);

        let analyzer = match self.language(text) {
            Some(lang) => builder.filter(Stemmer::from(lang)).build(),
            None => builder.build(),
        };

        self.analyzer.insert(analyzer).token_stream(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tantivy::tokenizer::{TokenStream, Tokenizer as _};

    fn tokenize(tokenizer: &mut Stemmed, s: &str) -> Vec<String> {
        let mut res = Vec::new();
        let mut stream = tokenizer.token_stream(s);

        while stream.advance() {
            res.push(stream.token().text.clone());
        }

        res
    }

    #[test]
    fn forced_language() {
        let mut tokenizer = Stemmed::with_forced_language(Language::Spanish);
        assert_eq!(tokenize(&mut tokenizer, "Gatos"), vec!["gat"]);
    }

    #[test]
    fn detected_language() {
        let text = "Die Kinder spielen jeden Tag im Garten hinter den alten Häusern";
        assert_eq!(whatlang::detect_lang(text), Some(whatlang::Lang::Deu));

        let german = Stemmer::new(Language::German);
        let expected: Vec<_> = text
            .split_whitespace()
            .map(|word| german.stem(&word.to_lowercase()).into_owned())
            .collect();

        let mut tokenizer = Stemmed::default();
        let tokens = tokenize(&mut tokenizer, text);
        assert_eq!(tokens, expected);
        assert!(tokens.contains(&"haus".to_string()));
    }

    #[test]
    fn empty_text() {
        let mut tokenizer = Stemmed::default();
        assert!(tokenize(&mut tokenizer, "").is_empty());
    }
}
