// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

/// Character classes the CJK tokenizers segment text by.
#[derive(Debug, PartialEq, Eq, Default, Clone, Copy)]
pub enum Script {
    /// Han ideographs, including the iteration mark 々 and 〆.
    Kanji,
    Hiragana,
    /// Full and half width katakana and the prolonged sound mark.
    Katakana,
    /// Letters and digits of any other script (full width forms
    /// included), and the underscore.
    Alphanumeric,
    Whitespace,

    #[default]
    Other,
}

impl From<char> for Script {
    fn from(c: char) -> Self {
        match c {
            '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2FA1F}'
            | '々'
            | '〆' => Script::Kanji,
            '\u{3041}'..='\u{309F}' => Script::Hiragana,
            '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => {
                Script::Katakana
            }
            c if c.is_whitespace() => Script::Whitespace,
            c if c.is_alphanumeric() || c == '_' => Script::Alphanumeric,
            _ => Script::Other,
        }
    }
}

impl Script {
    pub fn is_cjk(self) -> bool {
        matches!(self, Script::Kanji | Script::Hiragana | Script::Katakana)
    }

    /// Classification used for Chinese, where kana count as ideographs.
    pub fn chinese(c: char) -> Self {
        match Script::from(c) {
            script if script.is_cjk() => Script::Kanji,
            script => script,
        }
    }

    pub fn japanese(c: char) -> Self {
        Script::from(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes() {
        assert_eq!(Script::from('京'), Script::Kanji);
        assert_eq!(Script::from('々'), Script::Kanji);
        assert_eq!(Script::from('の'), Script::Hiragana);
        assert_eq!(Script::from('カ'), Script::Katakana);
        assert_eq!(Script::from('ー'), Script::Katakana);
        assert_eq!(Script::from('ｶ'), Script::Katakana);
        assert_eq!(Script::from('Ａ'), Script::Alphanumeric);
        assert_eq!(Script::from('７'), Script::Alphanumeric);
        assert_eq!(Script::from('_'), Script::Alphanumeric);
        assert_eq!(Script::from('é'), Script::Alphanumeric);
        assert_eq!(Script::from(' '), Script::Whitespace);
        assert_eq!(Script::from('、'), Script::Other);
        assert_eq!(Script::from('!'), Script::Other);
    }

    #[test]
    fn kana_are_ideographs_in_chinese() {
        assert_eq!(Script::chinese('の'), Script::Kanji);
        assert_eq!(Script::chinese('カ'), Script::Kanji);
        assert_eq!(Script::japanese('の'), Script::Hiragana);
    }
}
