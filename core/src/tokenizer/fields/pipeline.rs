// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use tantivy::tokenizer::BoxTokenStream;

use super::VecTokenStream;
use crate::{Language, Pipeline};

/// Runs a [`Pipeline`] over the text of a field.
#[derive(Clone, Debug, Default)]
pub struct PipelineTokenizer {
    pipeline: Pipeline,
}

impl PipelineTokenizer {
    pub fn as_str() -> &'static str {
        "pipeline_tokenizer"
    }

    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub fn for_languages(languages: &[Language]) -> Self {
        Self::new(Pipeline::for_languages(languages))
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

impl From<Pipeline> for PipelineTokenizer {
    fn from(pipeline: Pipeline) -> Self {
        Self::new(pipeline)
    }
}

impl tantivy::tokenizer::Tokenizer for PipelineTokenizer {
    type TokenStream<'a> = BoxTokenStream<'a>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        let tokens = self.pipeline.run(text).map(Into::into).collect();
        BoxTokenStream::new(VecTokenStream::new(tokens))
    }
}
