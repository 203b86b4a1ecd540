// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

//! Tokenizers that can be registered for tantivy index fields.

mod pipeline;
mod stemmed;

pub use pipeline::PipelineTokenizer;
pub use stemmed::Stemmed;

/// A token stream over tokens that were all produced up front.
pub struct VecTokenStream {
    tokens: Vec<tantivy::tokenizer::Token>,
    next: usize,
}

impl VecTokenStream {
    pub fn new(tokens: Vec<tantivy::tokenizer::Token>) -> Self {
        Self { tokens, next: 0 }
    }
}

impl From<crate::Token> for tantivy::tokenizer::Token {
    fn from(token: crate::Token) -> Self {
        let span = token.span();
        let position = token.position();

        tantivy::tokenizer::Token {
            offset_from: span.start,
            offset_to: span.end,
            position,
            text: token.into_text(),
            ..Default::default()
        }
    }
}

impl tantivy::tokenizer::TokenStream for VecTokenStream {
    fn advance(&mut self) -> bool {
        if self.next < self.tokens.len() {
            self.next += 1;
            true
        } else {
            false
        }
    }

    fn token(&self) -> &tantivy::tokenizer::Token {
        assert!(self.next > 0, "advance must be called before token");
        &self.tokens[self.next - 1]
    }

    fn token_mut(&mut self) -> &mut tantivy::tokenizer::Token {
        assert!(self.next > 0, "advance must be called before token_mut");
        &mut self.tokens[self.next - 1]
    }
}
