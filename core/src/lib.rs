// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

//! Rule based word reduction for search indexing.
//!
//! Words are reduced by the Snowball programs in [`snowball`], one per
//! supported [`Language`]. Text is split into [`Token`]s by a [`Tokenizer`]
//! and then run through a [`Pipeline`] of trimmers, stop word filters and
//! stemmers. Chinese and Japanese text is segmented instead of stemmed.

pub mod config;
pub mod language;
pub mod pipeline;
pub mod snowball;
pub mod tokenizer;

pub use config::PipelineConfig;
pub use language::Language;
pub use pipeline::{registry::Registry, Pipeline, PipelineFunction, Stage};
pub use tokenizer::{stemmer::Stemmer, Token, Tokenizer};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("slice [{bra}, {ket}) is out of bounds (limit {limit}, length {len})")]
    SliceOutOfBounds {
        bra: usize,
        ket: usize,
        limit: usize,
        len: usize,
    },

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("no pipeline function registered under {0:?}")]
    UnregisteredFunction(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid pipeline json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
