// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use super::{
    script::Script,
    segmenter::{Segment, Segmenter},
    split_with_range::SplitWithRangeExt,
    Token,
};

pub trait ScriptTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = Token> + 'a>;
}

/// Splits on whitespace and hyphens.
pub struct Whitespace;

impl ScriptTokenizer for Whitespace {
    fn tokenize<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = Token> + 'a> {
        Box::new(
            text.split_with_range(|c| c.is_whitespace() || c == '-')
                .map(|(txt, span)| Token::new(txt.to_lowercase(), span)),
        )
    }
}

/// Every ideograph of a run on its own, followed by every pair of
/// neighbouring ideographs.
pub struct Chinese;

impl ScriptTokenizer for Chinese {
    fn tokenize<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = Token> + 'a> {
        Box::new(
            text.segments_by(Script::chinese)
                .flat_map(|segment| match segment.script() {
                    Script::Kanji => {
                        let chars: Vec<_> = segment.chars().collect();
                        let mut tokens = ngrams(segment.full_text(), &chars, 1);
                        tokens.extend(ngrams(segment.full_text(), &chars, 2));
                        tokens
                    }
                    Script::Alphanumeric => vec![lowercased(&segment)],
                    _ => Vec::new(),
                }),
        )
    }
}

/// One token per run of a single script. Kanji runs are additionally split
/// into their characters, and runs of three or more into their bigrams.
pub struct Japanese;

impl ScriptTokenizer for Japanese {
    fn tokenize<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = Token> + 'a> {
        Box::new(
            text.segments_by(Script::japanese)
                .flat_map(|segment| match segment.script() {
                    Script::Kanji => {
                        let chars: Vec<_> = segment.chars().collect();
                        let mut tokens = vec![whole(&segment)];

                        if chars.len() >= 2 {
                            tokens.extend(ngrams(segment.full_text(), &chars, 1));
                        }
                        if chars.len() >= 3 {
                            tokens.extend(ngrams(segment.full_text(), &chars, 2));
                        }

                        tokens
                    }
                    Script::Hiragana | Script::Katakana => vec![whole(&segment)],
                    Script::Alphanumeric => vec![lowercased(&segment)],
                    Script::Whitespace | Script::Other => Vec::new(),
                }),
        )
    }
}

fn whole(segment: &Segment<'_>) -> Token {
    Token::new(segment.text().to_string(), segment.span())
}

fn lowercased(segment: &Segment<'_>) -> Token {
    Token::new(segment.text().to_lowercase(), segment.span())
}

/// Tokens for every window of `n` consecutive characters.
fn ngrams(full_text: &str, chars: &[(usize, char)], n: usize) -> Vec<Token> {
    chars
        .windows(n)
        .map(|window| {
            let start = window[0].0;
            let (last, c) = window[n - 1];
            let end = last + c.len_utf8();

            Token::new(full_text[start..end].to_string(), start..end)
        })
        .collect()
}
