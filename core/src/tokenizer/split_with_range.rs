// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use std::ops::Range;

/// Iterator over the non-empty pieces of a string between separator
/// characters, each paired with its byte range in the string.
pub struct SplitWithRange<'a, F> {
    text: &'a str,
    pos: usize,
    is_separator: F,
}

impl<'a, F> Iterator for SplitWithRange<'a, F>
where
    F: Fn(char) -> bool,
{
    type Item = (&'a str, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;

        let rest = &text[self.pos..];
        let skipped = rest
            .find(|c: char| !(self.is_separator)(c))
            .unwrap_or(rest.len());
        let start = self.pos + skipped;

        if start >= text.len() {
            self.pos = text.len();
            return None;
        }

        let rest = &text[start..];
        let end = start + rest.find(|c: char| (self.is_separator)(c)).unwrap_or(rest.len());
        self.pos = end;

        Some((&text[start..end], start..end))
    }
}

pub trait SplitWithRangeExt {
    fn split_with_range<F>(&self, is_separator: F) -> SplitWithRange<'_, F>
    where
        F: Fn(char) -> bool;
}

impl SplitWithRangeExt for str {
    fn split_with_range<F>(&self, is_separator: F) -> SplitWithRange<'_, F>
    where
        F: Fn(char) -> bool,
    {
        SplitWithRange {
            text: self,
            pos: 0,
            is_separator,
        }
    }
}
