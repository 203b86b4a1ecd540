// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

//! Ordered chains of token transformations.
//!
//! A [`Pipeline`] tokenizes text and feeds every token through its stages in
//! order. A stage either passes a (possibly rewritten) token on or drops it,
//! in which case no later stage sees it.

use std::borrow::Cow;

use enum_dispatch::enum_dispatch;
use itertools::Itertools;

use crate::tokenizer::stemmer::Stemmer;
use crate::{Language, PipelineConfig, Result, Token, Tokenizer};

pub mod registry;
pub mod stop_word_filter;
pub mod trimmer;

pub use stop_word_filter::StopWordFilter;
pub use trimmer::Trimmer;

#[enum_dispatch]
pub trait PipelineFunction {
    /// Transforms a token, or drops it by returning `None`.
    fn run(&self, token: Token) -> Option<Token>;

    /// The name the function is registered under.
    fn label(&self) -> String;

    fn languages(&self) -> Vec<Language>;
}

#[enum_dispatch(PipelineFunction)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Trimmer,
    StopWordFilter,
    Stemmer,
}

impl PipelineFunction for Stemmer {
    fn run(&self, mut token: Token) -> Option<Token> {
        let stemmed = match self.stem(token.text()) {
            Cow::Owned(stem) => Some(stem),
            Cow::Borrowed(_) => None,
        };

        if let Some(stem) = stemmed {
            token.set_text(stem);
        }

        Some(token)
    }

    fn label(&self) -> String {
        format!("stemmer-{}", self.language())
    }

    fn languages(&self) -> Vec<Language> {
        vec![self.language()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    tokenizer: Tokenizer,
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            stages: Vec::new(),
        }
    }

    pub fn with_stage(mut self, stage: impl Into<Stage>) -> Self {
        self.stages.push(stage.into());
        self
    }

    pub fn push(&mut self, stage: impl Into<Stage>) {
        self.stages.push(stage.into());
    }

    /// The full pipeline for `languages`: one trimmer for the union of their
    /// word characters, every stop word filter and then every stemmer, each
    /// in the order the languages are given.
    pub fn for_languages(languages: &[Language]) -> Self {
        Self::from_config(&PipelineConfig::new(languages.to_vec()))
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        let languages: Vec<_> = config.languages.iter().copied().unique().collect();
        let mut pipeline = Self::new(Tokenizer::for_languages(&languages));

        if config.trimmer && !languages.is_empty() {
            pipeline.push(Trimmer::union(&languages));
        }

        if config.stop_words {
            for language in &languages {
                pipeline.push(StopWordFilter::new(*language));
            }
        }

        for language in &languages {
            pipeline.push(Stemmer::new(*language));
        }

        tracing::debug!(
            tokenizer = ?pipeline.tokenizer,
            stages = ?pipeline.labels(),
            "built pipeline"
        );

        pipeline
    }

    pub fn tokenizer(&self) -> Tokenizer {
        self.tokenizer
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn run_token(&self, token: Token) -> Option<Token> {
        self.stages
            .iter()
            .try_fold(token, |token, stage| stage.run(token))
    }

    /// Tokenizes `text` and runs every token through the stages, skipping
    /// the tokens a stage dropped.
    pub fn run<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Token> + 'a {
        self.tokenizer
            .tokenize(text)
            .filter_map(|token| self.run_token(token))
    }

    pub fn labels(&self) -> Vec<String> {
        self.stages.iter().map(|stage| stage.label()).collect()
    }

    /// Languages of all stages, in order of first appearance.
    pub fn languages(&self) -> Vec<Language> {
        self.stages
            .iter()
            .flat_map(|stage| stage.languages())
            .unique()
            .collect()
    }

    /// The stage labels as a json array, loadable by
    /// [`Registry::load_json`](registry::Registry::load_json).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.labels())?)
    }
}
