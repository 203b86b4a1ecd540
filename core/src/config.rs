// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{Language, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub languages: Vec<Language>,

    #[serde(default = "defaults::enabled")]
    pub trimmer: bool,

    #[serde(default = "defaults::enabled")]
    pub stop_words: bool,
}

pub mod defaults {
    pub fn enabled() -> bool {
        true
    }
}

impl PipelineConfig {
    pub fn new(languages: Vec<Language>) -> Self {
        Self {
            languages,
            trimmer: defaults::enabled(),
            stop_words: defaults::enabled(),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        Self::from_toml_str(&raw)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }
}
