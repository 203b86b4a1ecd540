// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

/// Character class stored as a bitset over the code points `min..=max`.
///
/// Groupings are built in const context so every language can keep its
/// vowel sets in plain `static`s.
#[derive(Debug, Clone, Copy)]
pub struct Grouping {
    min: u32,
    max: u32,
    bits: [u8; 32],
}

impl Grouping {
    /// Panics (at compile time when used in a `static`) if `chars` is empty
    /// or spans more than 256 code points.
    pub const fn new(chars: &[char]) -> Self {
        assert!(!chars.is_empty(), "a grouping needs at least one character");

        let mut min = chars[0] as u32;
        let mut max = min;
        let mut i = 1;
        while i < chars.len() {
            let c = chars[i] as u32;
            if c < min {
                min = c;
            }
            if c > max {
                max = c;
            }
            i += 1;
        }

        assert!(max - min < 256, "a grouping can span at most 256 code points");

        let mut bits = [0u8; 32];
        let mut i = 0;
        while i < chars.len() {
            let offset = chars[i] as u32 - min;
            bits[(offset >> 3) as usize] |= 1 << (offset & 7);
            i += 1;
        }

        Self { min, max, bits }
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        let c = c as u32;
        if c < self.min || c > self.max {
            return false;
        }

        let offset = c - self.min;
        self.bits[(offset >> 3) as usize] & (1 << (offset & 7)) != 0
    }

    pub fn min(&self) -> char {
        char::from_u32(self.min).unwrap_or_default()
    }

    pub fn max(&self) -> char {
        char::from_u32(self.max).unwrap_or_default()
    }
}
