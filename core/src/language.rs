// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::snowball::Algorithm;
use crate::tokenizer::script::Script;
use crate::Error;

/// A language the pipeline can be configured for, named by its ISO 639-1 code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[serde(rename = "en")]
    #[strum(to_string = "en", serialize = "english")]
    English,

    #[serde(rename = "fr")]
    #[strum(to_string = "fr", serialize = "french")]
    French,

    #[serde(rename = "de")]
    #[strum(to_string = "de", serialize = "german")]
    German,

    #[serde(rename = "it")]
    #[strum(to_string = "it", serialize = "italian")]
    Italian,

    #[serde(rename = "pt")]
    #[strum(to_string = "pt", serialize = "portuguese")]
    Portuguese,

    #[serde(rename = "ru")]
    #[strum(to_string = "ru", serialize = "russian")]
    Russian,

    #[serde(rename = "es")]
    #[strum(to_string = "es", serialize = "spanish")]
    Spanish,

    #[serde(rename = "zh")]
    #[strum(to_string = "zh", serialize = "chinese")]
    Chinese,

    #[serde(rename = "ja")]
    #[strum(to_string = "ja", serialize = "japanese")]
    Japanese,
}

const DIGITS: RangeInclusive<char> = '0'..='9';

const LATIN: &[RangeInclusive<char>] = &[
    DIGITS,
    'A'..='Z',
    'a'..='z',
    '\u{AA}'..='\u{AA}',
    '\u{BA}'..='\u{BA}',
    '\u{C0}'..='\u{D6}',
    '\u{D8}'..='\u{F6}',
    '\u{F8}'..='\u{2B8}',
    '\u{2E0}'..='\u{2E4}',
    '\u{1D00}'..='\u{1D25}',
    '\u{1D2C}'..='\u{1D5C}',
    '\u{1D62}'..='\u{1D65}',
    '\u{1D6B}'..='\u{1D77}',
    '\u{1D79}'..='\u{1DBE}',
    '\u{1E00}'..='\u{1EFF}',
    '\u{2071}'..='\u{2071}',
    '\u{207F}'..='\u{207F}',
    '\u{2090}'..='\u{209C}',
    '\u{212A}'..='\u{212B}',
    '\u{2132}'..='\u{2132}',
    '\u{214E}'..='\u{214E}',
    '\u{2160}'..='\u{2188}',
    '\u{2C60}'..='\u{2C7F}',
    '\u{A722}'..='\u{A787}',
    '\u{A78B}'..='\u{A7AD}',
    '\u{A7B0}'..='\u{A7B7}',
    '\u{A7F7}'..='\u{A7FF}',
    '\u{AB30}'..='\u{AB5A}',
    '\u{AB5C}'..='\u{AB64}',
    '\u{FB00}'..='\u{FB06}',
    '\u{FF21}'..='\u{FF3A}',
    '\u{FF41}'..='\u{FF5A}',
];

const CYRILLIC: &[RangeInclusive<char>] = &[
    DIGITS,
    '\u{400}'..='\u{484}',
    '\u{487}'..='\u{52F}',
    '\u{1D2B}'..='\u{1D2B}',
    '\u{1D78}'..='\u{1D78}',
    '\u{2DE0}'..='\u{2DFF}',
    '\u{A640}'..='\u{A69F}',
    '\u{FE2E}'..='\u{FE2F}',
];

/// The characters a token of some language may start and end with.
#[derive(Debug, Clone, Copy)]
pub enum WordCharacters {
    Ranges(&'static [RangeInclusive<char>]),
    /// Whatever the script classification keeps inside a token.
    Script(fn(char) -> Script),
}

impl WordCharacters {
    pub fn contains(&self, c: char) -> bool {
        match self {
            WordCharacters::Ranges(ranges) => ranges.iter().any(|range| range.contains(&c)),
            WordCharacters::Script(classify) => {
                !matches!(classify(c), Script::Whitespace | Script::Other)
            }
        }
    }
}

fn parse_stop_words(list: &'static str) -> HashSet<&'static str> {
    list.lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .collect()
}

macro_rules! stop_words {
    ($($name:ident => $file:literal),* $(,)?) => {
        $(
            static $name: Lazy<HashSet<&'static str>> =
                Lazy::new(|| parse_stop_words(include_str!(concat!("stopwords/", $file))));
        )*
    };
}

stop_words! {
    EN_STOP_WORDS => "en.txt",
    FR_STOP_WORDS => "fr.txt",
    DE_STOP_WORDS => "de.txt",
    IT_STOP_WORDS => "it.txt",
    PT_STOP_WORDS => "pt.txt",
    RU_STOP_WORDS => "ru.txt",
    ES_STOP_WORDS => "es.txt",
    ZH_STOP_WORDS => "zh.txt",
    JA_STOP_WORDS => "ja.txt",
}

impl Language {
    /// The rule program reducing words of this language, if it has one.
    /// Chinese and Japanese tokens are segmented but never reduced.
    pub fn algorithm(&self) -> Option<Algorithm> {
        match self {
            Language::English => Some(Algorithm::English),
            Language::French => Some(Algorithm::French),
            Language::German => Some(Algorithm::German),
            Language::Italian => Some(Algorithm::Italian),
            Language::Portuguese => Some(Algorithm::Portuguese),
            Language::Russian => Some(Algorithm::Russian),
            Language::Spanish => Some(Algorithm::Spanish),
            Language::Chinese | Language::Japanese => None,
        }
    }

    /// Characters a token of this language may start and end with. Chinese
    /// and Japanese accept every character their tokenizer puts in a token.
    pub fn word_characters(&self) -> WordCharacters {
        match self {
            Language::English
            | Language::French
            | Language::German
            | Language::Italian
            | Language::Portuguese
            | Language::Spanish => WordCharacters::Ranges(LATIN),
            Language::Russian => WordCharacters::Ranges(CYRILLIC),
            Language::Chinese => WordCharacters::Script(Script::chinese),
            Language::Japanese => WordCharacters::Script(Script::japanese),
        }
    }

    pub fn is_word_character(&self, c: char) -> bool {
        self.word_characters().contains(c)
    }

    pub fn stop_words(&self) -> &'static HashSet<&'static str> {
        match self {
            Language::English => &EN_STOP_WORDS,
            Language::French => &FR_STOP_WORDS,
            Language::German => &DE_STOP_WORDS,
            Language::Italian => &IT_STOP_WORDS,
            Language::Portuguese => &PT_STOP_WORDS,
            Language::Russian => &RU_STOP_WORDS,
            Language::Spanish => &ES_STOP_WORDS,
            Language::Chinese => &ZH_STOP_WORDS,
            Language::Japanese => &JA_STOP_WORDS,
        }
    }
}

impl TryFrom<whatlang::Lang> for Language {
    type Error = Error;

    fn try_from(lang: whatlang::Lang) -> Result<Self, Self::Error> {
        match lang {
            whatlang::Lang::Eng => Ok(Language::English),
            whatlang::Lang::Fra => Ok(Language::French),
            whatlang::Lang::Deu => Ok(Language::German),
            whatlang::Lang::Ita => Ok(Language::Italian),
            whatlang::Lang::Por => Ok(Language::Portuguese),
            whatlang::Lang::Rus => Ok(Language::Russian),
            whatlang::Lang::Spa => Ok(Language::Spanish),
            whatlang::Lang::Cmn => Ok(Language::Chinese),
            whatlang::Lang::Jpn => Ok(Language::Japanese),
            lang => Err(Error::UnknownLanguage(lang.code().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn codes_round_trip() {
        for lang in Language::iter() {
            assert_eq!(Language::from_str(&lang.to_string()).unwrap(), lang);
        }

        assert_eq!(Language::from_str("French").unwrap(), Language::French);
        assert!(Language::from_str("xx").is_err());
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&[Language::German, Language::Japanese]).unwrap();
        assert_eq!(json, r#"["de","ja"]"#);

        let langs: Vec<Language> = serde_json::from_str(r#"["ru","es"]"#).unwrap();
        assert_eq!(langs, vec![Language::Russian, Language::Spanish]);
    }

    #[test]
    fn every_stop_list_is_populated() {
        for lang in Language::iter() {
            let words = lang.stop_words();
            assert!(!words.is_empty(), "{lang}");
            assert!(words.iter().all(|w| !w.trim().is_empty()));
        }

        assert!(Language::English.stop_words().contains("the"));
        assert!(Language::French.stop_words().contains("les"));
        assert!(Language::Chinese.stop_words().contains("的"));
    }

    #[test]
    fn russian_list_keeps_bom_entry() {
        let words = Language::Russian.stop_words();
        assert!(words.contains("\u{FEFF}а"));
        assert!(!words.contains("а"));
    }

    #[test]
    fn word_characters() {
        assert!(Language::French.is_word_character('é'));
        assert!(Language::French.is_word_character('7'));
        assert!(!Language::French.is_word_character('ж'));
        assert!(!Language::French.is_word_character('.'));

        assert!(Language::Russian.is_word_character('ж'));
        assert!(!Language::Russian.is_word_character('a'));

        assert!(Language::Chinese.is_word_character('京'));
        assert!(Language::Japanese.is_word_character('カ'));
        assert!(Language::Japanese.is_word_character('ー'));
        assert!(!Language::Japanese.is_word_character('。'));
    }

    #[test]
    fn cjk_word_characters_follow_script_classes() {
        for c in ['㐀', '\u{F900}', 'の', 'カ', 'é', 'ж', '_'] {
            assert!(Language::Chinese.is_word_character(c), "{c:?}");
            assert!(Language::Japanese.is_word_character(c), "{c:?}");
        }

        for c in ['、', '。', '!', ' '] {
            assert!(!Language::Chinese.is_word_character(c), "{c:?}");
            assert!(!Language::Japanese.is_word_character(c), "{c:?}");
        }
    }

    #[test]
    fn algorithms() {
        assert_eq!(Language::Spanish.algorithm(), Some(Algorithm::Spanish));
        assert_eq!(Language::Japanese.algorithm(), None);
    }

    #[test]
    fn from_whatlang() {
        assert_eq!(
            Language::try_from(whatlang::Lang::Deu).unwrap(),
            Language::German
        );
        assert!(matches!(
            Language::try_from(whatlang::Lang::Nld),
            Err(Error::UnknownLanguage(code)) if code == "nld"
        ));
    }
}
