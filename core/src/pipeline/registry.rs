// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use super::{Pipeline, PipelineFunction, Stage, StopWordFilter, Trimmer};
use crate::tokenizer::stemmer::Stemmer;
use crate::{Error, Language, Result, Tokenizer};

/// Pipeline functions by label, used to load serialized pipelines.
#[derive(Debug, Clone)]
pub struct Registry {
    functions: HashMap<String, Stage>,
}

impl Default for Registry {
    /// A registry with the trimmer, stop word filter and stemmer of every language.
    fn default() -> Self {
        let mut registry = Self::empty();
        for language in Language::iter() {
            registry.register_language(language);
        }

        tracing::debug!(functions = registry.len(), "built registry");

        registry
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Registers `function` under its label, replacing any function
    /// registered under the same label.
    pub fn register(&mut self, function: impl Into<Stage>) {
        let stage = function.into();
        self.functions.insert(stage.label(), stage);
    }

    pub fn register_language(&mut self, language: Language) {
        self.register(Trimmer::new(language));
        self.register(StopWordFilter::new(language));
        self.register(Stemmer::new(language));
    }

    /// Registers every stage of `pipeline`, which makes the combined
    /// trimmer of a multi-language pipeline loadable.
    pub fn register_pipeline(&mut self, pipeline: &Pipeline) {
        for stage in pipeline.stages() {
            self.register(stage.clone());
        }
    }

    pub fn get(&self, label: &str) -> Result<&Stage> {
        self.functions
            .get(label)
            .ok_or_else(|| Error::UnregisteredFunction(label.to_string()))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.functions.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Builds the pipeline running the functions registered under `labels`
    /// in order. The tokenizer is chosen from their languages.
    pub fn load<S: AsRef<str>>(&self, labels: &[S]) -> Result<Pipeline> {
        let stages = labels
            .iter()
            .map(|label| self.get(label.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;

        let mut pipeline = Pipeline::default();
        for stage in stages {
            pipeline.push(stage);
        }
        pipeline.tokenizer = Tokenizer::for_languages(&pipeline.languages());

        tracing::debug!(stages = labels.len(), tokenizer = ?pipeline.tokenizer, "loaded pipeline");

        Ok(pipeline)
    }

    pub fn load_json(&self, json: &str) -> Result<Pipeline> {
        let labels: Vec<String> = serde_json::from_str(json)?;
        self.load(&labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_is_registered() {
        let registry = Registry::new();
        assert_eq!(registry.len(), 3 * Language::iter().count());

        for label in ["trimmer-ru", "stopWordFilter-ja", "stemmer-pt"] {
            assert!(registry.contains(label), "{label}");
        }
    }

    #[test]
    fn unknown_label() {
        let registry = Registry::new();
        assert!(matches!(
            registry.get("stemmer-xx"),
            Err(Error::UnregisteredFunction(label)) if label == "stemmer-xx"
        ));
        assert!(registry.load(&["stemmer-fr", "nope"]).is_err());
    }

    #[test]
    fn pipeline_round_trip() {
        let pipeline = Pipeline::for_languages(&[Language::English, Language::French]);

        let mut registry = Registry::new();
        let json = pipeline.to_json().unwrap();

        // the combined trimmer is only known once the pipeline is registered
        assert!(registry.load_json(&json).is_err());

        registry.register_pipeline(&pipeline);
        let loaded = registry.load_json(&json).unwrap();
        assert_eq!(loaded, pipeline);
    }

    #[test]
    fn loaded_tokenizer_follows_languages() {
        let registry = Registry::new();
        let pipeline = registry.load(&["trimmer-ja", "stemmer-ja"]).unwrap();
        assert_eq!(pipeline.tokenizer(), Tokenizer::Japanese);

        let pipeline = registry.load::<&str>(&[]).unwrap();
        assert_eq!(pipeline.tokenizer(), Tokenizer::Whitespace);
        assert!(pipeline.stages().is_empty());
    }

    #[test]
    fn invalid_json() {
        let registry = Registry::new();
        assert!(matches!(
            registry.load_json("{\"stages\": 1}"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn register_replaces() {
        let mut registry = Registry::empty();
        assert!(registry.is_empty());

        registry.register(Stemmer::new(Language::German));
        registry.register(Stemmer::new(Language::German));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("stemmer-de").unwrap(),
            &Stage::from(Stemmer::new(Language::German))
        );
    }
}
