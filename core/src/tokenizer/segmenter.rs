// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use std::ops::Range;

use super::script::Script;

/// A segment is a maximal part of a text where every character has the same script.
#[derive(Clone, Debug)]
pub struct Segment<'a> {
    full_text: &'a str,
    span: Range<usize>,
    script: Script,
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        &self.full_text[self.span.clone()]
    }

    pub fn full_text(&self) -> &'a str {
        self.full_text
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    pub fn script(&self) -> Script {
        self.script
    }

    /// The characters of the segment with their byte offsets in the full text.
    pub fn chars(&self) -> impl Iterator<Item = (usize, char)> + 'a {
        let offset = self.span.start;
        self.text()
            .char_indices()
            .map(move |(i, c)| (offset + i, c))
    }
}

pub trait Segmenter {
    fn segments(&self) -> SegmentIterator<'_>;

    /// Segments with a custom character classification.
    fn segments_by(&self, classify: fn(char) -> Script) -> SegmentIterator<'_>;
}

impl Segmenter for str {
    fn segments(&self) -> SegmentIterator<'_> {
        SegmentIterator::new(self, <Script as From<char>>::from)
    }

    fn segments_by(&self, classify: fn(char) -> Script) -> SegmentIterator<'_> {
        SegmentIterator::new(self, classify)
    }
}

impl Segmenter for String {
    fn segments(&self) -> SegmentIterator<'_> {
        self.as_str().segments()
    }

    fn segments_by(&self, classify: fn(char) -> Script) -> SegmentIterator<'_> {
        self.as_str().segments_by(classify)
    }
}

pub struct SegmentIterator<'a> {
    prev_end: usize,
    input: &'a str,
    classify: fn(char) -> Script,
}

impl<'a> SegmentIterator<'a> {
    pub fn new(input: &'a str, classify: fn(char) -> Script) -> Self {
        Self {
            input,
            prev_end: 0,
            classify,
        }
    }
}

impl<'a> Iterator for SegmentIterator<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let script = (self.classify)(self.input[self.prev_end..].chars().next()?);

        let start = self.prev_end;
        let mut end = start;

        for c in self.input[start..].chars() {
            if (self.classify)(c) != script {
                break;
            }
            end += c.len_utf8();
        }

        self.prev_end = end;

        Some(Segment {
            script,
            full_text: self.input,
            span: start..end,
        })
    }
}
