// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

//! The suffix-stripping automaton every language program runs on.
//!
//! A [`SnowballEnv`] owns the word being stemmed together with the cursor and
//! the markers delimiting the region that may be scanned (`limit_backward`,
//! `limit`) and the slice that the next replacement acts on (`bra`, `ket`).
//! An environment lives for exactly one stemming call.

pub mod algorithms;
pub mod among;
pub mod grouping;

pub use algorithms::{Algorithm, Regions};
pub use among::{Among, AmongTable, Direction, Guard, GuardFn};
pub use grouping::Grouping;

use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct SnowballEnv {
    current: Vec<char>,
    pub cursor: usize,
    pub limit: usize,
    pub limit_backward: usize,
    pub bra: usize,
    pub ket: usize,
}

impl SnowballEnv {
    pub fn new(word: &str) -> Self {
        let mut env = Self::default();
        env.set_current(word);
        env
    }

    pub fn set_current(&mut self, word: &str) {
        self.current = word.chars().collect();
        self.cursor = 0;
        self.limit = self.current.len();
        self.limit_backward = 0;
        self.bra = self.cursor;
        self.ket = self.limit;
    }

    pub fn get_current(&self) -> String {
        self.current.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// `next` in forward mode.
    #[inline]
    pub fn next(&mut self) -> bool {
        if self.cursor >= self.limit {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// `next` in backward mode.
    #[inline]
    pub fn prev(&mut self) -> bool {
        if self.cursor <= self.limit_backward {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn hop(&mut self, n: usize) -> bool {
        if self.cursor + n > self.limit {
            return false;
        }
        self.cursor += n;
        true
    }

    pub fn hop_back(&mut self, n: usize) -> bool {
        if self.cursor < self.limit_backward + n {
            return false;
        }
        self.cursor -= n;
        true
    }

    pub fn in_grouping(&mut self, grouping: &Grouping) -> bool {
        if self.cursor >= self.limit {
            return false;
        }
        if !grouping.contains(self.current[self.cursor]) {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn out_grouping(&mut self, grouping: &Grouping) -> bool {
        if self.cursor >= self.limit {
            return false;
        }
        if grouping.contains(self.current[self.cursor]) {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn in_grouping_b(&mut self, grouping: &Grouping) -> bool {
        if self.cursor <= self.limit_backward {
            return false;
        }
        if !grouping.contains(self.current[self.cursor - 1]) {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn out_grouping_b(&mut self, grouping: &Grouping) -> bool {
        if self.cursor <= self.limit_backward {
            return false;
        }
        if grouping.contains(self.current[self.cursor - 1]) {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// `gopast grouping`: leaves the cursor just after the first member.
    pub fn go_past_grouping(&mut self, grouping: &Grouping) -> bool {
        loop {
            if self.in_grouping(grouping) {
                return true;
            }
            if !self.next() {
                return false;
            }
        }
    }

    /// `gopast non-grouping`: leaves the cursor just after the first non-member.
    pub fn go_past_non_grouping(&mut self, grouping: &Grouping) -> bool {
        loop {
            if self.out_grouping(grouping) {
                return true;
            }
            if !self.next() {
                return false;
            }
        }
    }

    pub fn go_past_grouping_b(&mut self, grouping: &Grouping) -> bool {
        loop {
            if self.in_grouping_b(grouping) {
                return true;
            }
            if !self.prev() {
                return false;
            }
        }
    }

    /// `repeat goto step`: run `step` at every position from the cursor on,
    /// restarting at the position of each success, until it no longer
    /// succeeds anywhere before `limit`.
    pub fn repeat_goto<F>(&mut self, mut step: F) -> Result<()>
    where
        F: FnMut(&mut Self) -> Result<bool>,
    {
        loop {
            let start = self.cursor;

            let found = loop {
                let at = self.cursor;
                if step(self)? {
                    self.cursor = at;
                    break true;
                }
                self.cursor = at;
                if !self.next() {
                    break false;
                }
            };

            if !found {
                self.cursor = start;
                return Ok(());
            }
        }
    }

    pub fn eq_s(&mut self, s: &str) -> bool {
        let mut i = self.cursor;
        for c in s.chars() {
            if i >= self.limit || self.current[i] != c {
                return false;
            }
            i += 1;
        }
        self.cursor = i;
        true
    }

    pub fn eq_s_b(&mut self, s: &str) -> bool {
        let mut i = self.cursor;
        for c in s.chars().rev() {
            if i <= self.limit_backward || self.current[i - 1] != c {
                return false;
            }
            i -= 1;
        }
        self.cursor = i;
        true
    }

    /// Resolve the longest entry of `table` matching at the cursor.
    ///
    /// Returns the entry's result code and leaves the cursor after the match,
    /// or returns 0 with the cursor untouched.
    pub fn find_among<C>(&mut self, table: &AmongTable<C>, ctx: &mut C) -> i32 {
        debug_assert_eq!(table.direction(), Direction::Forward);

        let entries = table.entries();
        if entries.is_empty() {
            return 0;
        }

        let c = self.cursor;
        let l = self.limit;

        let mut i = 0;
        let mut j = entries.len();
        let mut common_i = 0;
        let mut common_j = 0;
        let mut first_key_inspected = false;

        loop {
            let k = i + ((j - i) >> 1);
            let mut diff: i64 = 0;
            let mut common = common_i.min(common_j);

            for &pc in entries[k].pattern().iter().skip(common) {
                if c + common == l {
                    diff = -1;
                    break;
                }
                diff = self.current[c + common] as i64 - pc as i64;
                if diff != 0 {
                    break;
                }
                common += 1;
            }

            if diff < 0 {
                j = k;
                common_j = common;
            } else {
                i = k;
                common_i = common;
            }

            if j - i <= 1 {
                // the first entry is only inspected when the search collapses onto it
                if i > 0 || j == i || first_key_inspected {
                    break;
                }
                first_key_inspected = true;
            }
        }

        loop {
            let w = &entries[i];
            let len = w.pattern().len();

            if common_i >= len {
                self.cursor = c + len;

                match w.guard() {
                    Guard::Always => return w.result(),
                    Guard::When(guard) => {
                        let accepted = guard(self, ctx);
                        self.cursor = c + len;
                        if accepted {
                            return w.result();
                        }
                    }
                }
            }

            match w.backtrack() {
                Some(next) => i = next,
                None => {
                    self.cursor = c;
                    return 0;
                }
            }
        }
    }

    /// Backward counterpart of [`SnowballEnv::find_among`], matching the
    /// characters before the cursor.
    pub fn find_among_b<C>(&mut self, table: &AmongTable<C>, ctx: &mut C) -> i32 {
        debug_assert_eq!(table.direction(), Direction::Backward);

        let entries = table.entries();
        if entries.is_empty() {
            return 0;
        }

        let c = self.cursor;
        let lb = self.limit_backward;

        let mut i = 0;
        let mut j = entries.len();
        let mut common_i = 0;
        let mut common_j = 0;
        let mut first_key_inspected = false;

        loop {
            let k = i + ((j - i) >> 1);
            let mut diff: i64 = 0;
            let mut common = common_i.min(common_j);

            for &pc in entries[k].pattern().iter().rev().skip(common) {
                if c - common == lb {
                    diff = -1;
                    break;
                }
                diff = self.current[c - common - 1] as i64 - pc as i64;
                if diff != 0 {
                    break;
                }
                common += 1;
            }

            if diff < 0 {
                j = k;
                common_j = common;
            } else {
                i = k;
                common_i = common;
            }

            if j - i <= 1 {
                if i > 0 || j == i || first_key_inspected {
                    break;
                }
                first_key_inspected = true;
            }
        }

        loop {
            let w = &entries[i];
            let len = w.pattern().len();

            if common_i >= len {
                self.cursor = c - len;

                match w.guard() {
                    Guard::Always => return w.result(),
                    Guard::When(guard) => {
                        let accepted = guard(self, ctx);
                        self.cursor = c - len;
                        if accepted {
                            return w.result();
                        }
                    }
                }
            }

            match w.backtrack() {
                Some(next) => i = next,
                None => {
                    self.cursor = c;
                    return 0;
                }
            }
        }
    }

    /// Checks `bra <= ket <= limit <= len`.
    pub fn slice_check(&self) -> Result<()> {
        if self.bra > self.ket || self.ket > self.limit || self.limit > self.current.len() {
            return Err(Error::SliceOutOfBounds {
                bra: self.bra,
                ket: self.ket,
                limit: self.limit,
                len: self.current.len(),
            });
        }

        Ok(())
    }

    /// Replace `[bra, ket)` with `s` and return the change in length.
    ///
    /// `limit` and positions at or after `ket` shift by the change, a cursor
    /// strictly inside the replaced range collapses to `bra`.
    fn replace_s(&mut self, bra: usize, ket: usize, s: &str) -> isize {
        let removed = ket - bra;
        let before = self.current.len();
        self.current.splice(bra..ket, s.chars());
        let adjustment = self.current.len() as isize - before as isize;
        debug_assert_eq!(
            adjustment,
            s.chars().count() as isize - removed as isize
        );

        self.limit = self.limit.saturating_add_signed(adjustment);

        if self.cursor >= ket {
            self.cursor = self.cursor.saturating_add_signed(adjustment);
        } else if self.cursor > bra {
            self.cursor = bra;
        }

        adjustment
    }

    pub fn slice_from(&mut self, s: &str) -> Result<()> {
        self.slice_check()?;

        let (bra, ket) = (self.bra, self.ket);
        self.replace_s(bra, ket, s);
        self.ket = bra + s.chars().count();

        Ok(())
    }

    pub fn slice_del(&mut self) -> Result<()> {
        self.slice_from("")
    }

    /// Splice `s` into `[bra, ket)`. The markers are only moved if they lie
    /// at or after `bra`.
    pub fn insert(&mut self, bra: usize, ket: usize, s: &str) -> Result<()> {
        if bra > ket || ket > self.limit || self.limit > self.current.len() {
            return Err(Error::SliceOutOfBounds {
                bra,
                ket,
                limit: self.limit,
                len: self.current.len(),
            });
        }

        let adjustment = self.replace_s(bra, ket, s);

        if bra <= self.bra {
            self.bra = self.bra.saturating_add_signed(adjustment);
        }
        if bra <= self.ket {
            self.ket = self.ket.saturating_add_signed(adjustment);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    static V: Grouping = Grouping::new(&['a', 'e', 'i', 'o', 'u']);

    fn suffixes() -> AmongTable<()> {
        AmongTable::backward(&[
            ("s", 1),
            ("es", 2),
            ("ies", 3),
            ("ses", 4),
            ("ness", 5),
            ("a", 6),
            ("ada", 7),
        ])
    }

    #[test]
    fn set_current_resets_markers() {
        let mut env = SnowballEnv::new("abc");
        env.cursor = 2;
        env.bra = 1;
        env.limit_backward = 1;

        env.set_current("hello");
        assert_eq!(env.cursor, 0);
        assert_eq!(env.limit, 5);
        assert_eq!(env.limit_backward, 0);
        assert_eq!(env.bra, 0);
        assert_eq!(env.ket, 5);
    }

    #[test]
    fn groupings_move_cursor_only_on_success() {
        let mut env = SnowballEnv::new("ab");
        assert!(!env.out_grouping(&V));
        assert_eq!(env.cursor, 0);
        assert!(env.in_grouping(&V));
        assert_eq!(env.cursor, 1);
        assert!(!env.in_grouping(&V));
        assert!(env.out_grouping(&V));
        assert!(!env.out_grouping(&V));
        assert_eq!(env.cursor, 2);

        assert!(env.out_grouping_b(&V));
        assert!(env.in_grouping_b(&V));
        assert!(!env.in_grouping_b(&V));
        assert_eq!(env.cursor, 0);
    }

    #[test]
    fn backward_scans_stop_at_limit_backward() {
        let mut env = SnowballEnv::new("aab");
        env.cursor = env.limit;
        env.limit_backward = 1;

        assert!(env.out_grouping_b(&V));
        assert!(env.in_grouping_b(&V));
        assert!(!env.in_grouping_b(&V));
        assert_eq!(env.cursor, 1);
    }

    #[test]
    fn eq_s() {
        let mut env = SnowballEnv::new("chevaux");
        assert!(!env.eq_s("cheval"));
        assert_eq!(env.cursor, 0);
        assert!(env.eq_s("chev"));
        assert_eq!(env.cursor, 4);

        env.cursor = env.limit;
        assert!(env.eq_s_b("aux"));
        assert_eq!(env.cursor, 4);
        assert!(!env.eq_s_b("x"));
    }

    #[test]
    fn find_among_b_picks_longest_match() {
        let table = suffixes();
        let cases = [
            ("cats", 1, 3),
            ("boxes", 2, 3),
            ("ponies", 3, 3),
            ("classes", 4, 4),
            ("kindness", 5, 4),
            ("panda", 6, 4),
            ("armada", 7, 3),
            ("xyz", 0, 3),
        ];

        for (word, expected, cursor) in cases {
            let mut env = SnowballEnv::new(word);
            env.cursor = env.limit;
            assert_eq!(env.find_among_b(&table, &mut ()), expected, "{word}");
            assert_eq!(env.cursor, cursor, "{word}");
        }
    }

    #[test]
    fn find_among_b_respects_limit_backward() {
        let table = suffixes();
        let mut env = SnowballEnv::new("ponies");
        env.cursor = env.limit;
        env.limit_backward = 4;

        // only "es" fits between limit_backward and the cursor
        assert_eq!(env.find_among_b(&table, &mut ()), 2);
        assert_eq!(env.cursor, 4);
    }

    #[test]
    fn find_among_inspects_first_key() {
        let table: AmongTable<()> = AmongTable::forward(&[("a", 1), ("b", 2), ("c", 3)]);

        let mut env = SnowballEnv::new("apple");
        assert_eq!(env.find_among(&table, &mut ()), 1);
        assert_eq!(env.cursor, 1);

        let mut env = SnowballEnv::new("cherry");
        assert_eq!(env.find_among(&table, &mut ()), 3);

        let mut env = SnowballEnv::new("date");
        assert_eq!(env.find_among(&table, &mut ()), 0);
        assert_eq!(env.cursor, 0);
    }

    #[test]
    fn find_among_with_empty_pattern() {
        let table: AmongTable<()> = AmongTable::forward(&[("", 4), ("I", 1), ("U", 2), ("Y", 3)]);

        for (word, expected) in [("Ia", 1), ("U", 2), ("Y", 3), ("x", 4), ("", 4)] {
            let mut env = SnowballEnv::new(word);
            assert_eq!(env.find_among(&table, &mut ()), expected, "{word:?}");
        }
    }

    #[test]
    fn find_among_shared_prefixes() {
        let table: AmongTable<()> =
            AmongTable::forward(&[("ad", 1), ("ada", 2), ("adam", 3), ("b", 4)]);

        for (word, expected, cursor) in [
            ("adx", 1, 2),
            ("adax", 2, 3),
            ("adamant", 3, 4),
            ("a", 0, 0),
            ("bad", 4, 1),
        ] {
            let mut env = SnowballEnv::new(word);
            assert_eq!(env.find_among(&table, &mut ()), expected, "{word}");
            assert_eq!(env.cursor, cursor, "{word}");
        }
    }

    #[test]
    fn rejected_guard_falls_back_along_chain() {
        fn only_long_words(env: &mut SnowballEnv, _: &mut ()) -> bool {
            env.cursor >= 3
        }

        let table: AmongTable<()> =
            AmongTable::backward(&[("s", 1), ("es", 2)]).with_guard("es", only_long_words);

        let mut env = SnowballEnv::new("goes");
        env.cursor = env.limit;
        assert_eq!(env.find_among_b(&table, &mut ()), 1);
        assert_eq!(env.cursor, 3);

        let mut env = SnowballEnv::new("houses");
        env.cursor = env.limit;
        assert_eq!(env.find_among_b(&table, &mut ()), 2);
        assert_eq!(env.cursor, 4);
    }

    #[test]
    fn rejected_guard_without_fallback_restores_cursor() {
        fn reject(_: &mut SnowballEnv, _: &mut ()) -> bool {
            false
        }

        let table: AmongTable<()> = AmongTable::backward(&[("es", 1)]).with_guard("es", reject);
        let mut env = SnowballEnv::new("goes");
        env.cursor = env.limit;
        assert_eq!(env.find_among_b(&table, &mut ()), 0);
        assert_eq!(env.cursor, 4);
    }

    #[test]
    fn slice_from_adjusts_cursor_and_limit() {
        let mut env = SnowballEnv::new("chevaux");
        env.cursor = env.limit;
        env.ket = 7;
        env.bra = 4;

        env.slice_from("al").unwrap();
        assert_eq!(env.get_current(), "cheval");
        assert_eq!(env.limit, 6);
        assert_eq!(env.cursor, 6);
        assert_eq!(env.ket, 6);

        // a cursor inside the replaced range collapses to bra
        env.bra = 1;
        env.ket = 4;
        env.cursor = 2;
        env.slice_del().unwrap();
        assert_eq!(env.get_current(), "cal");
        assert_eq!(env.cursor, 1);
        assert_eq!(env.limit, 3);
    }

    #[test]
    fn slice_check_rejects_broken_markers() {
        let mut env = SnowballEnv::new("word");
        env.bra = 3;
        env.ket = 2;
        assert!(matches!(
            env.slice_from("x"),
            Err(Error::SliceOutOfBounds { bra: 3, ket: 2, .. })
        ));
        assert_eq!(env.get_current(), "word");

        env.bra = 0;
        env.ket = 5;
        assert!(env.slice_del().is_err());
    }

    #[test]
    fn insert_shifts_markers_after_point() {
        let mut env = SnowballEnv::new("hop");
        env.bra = 1;
        env.ket = 3;
        env.insert(3, 3, "e").unwrap();
        assert_eq!(env.get_current(), "hope");
        assert_eq!(env.bra, 1);
        assert_eq!(env.ket, 4);
        assert_eq!(env.limit, 4);

        env.insert(0, 0, "x").unwrap();
        assert_eq!(env.get_current(), "xhope");
        assert_eq!(env.bra, 2);
        assert_eq!(env.ket, 5);
    }

    #[test]
    fn repeat_goto_visits_every_match() {
        let mut env = SnowballEnv::new("ayaya");
        env.repeat_goto(|env| {
            env.bra = env.cursor;
            if !env.eq_s("y") {
                return Ok(false);
            }
            env.ket = env.cursor;
            env.slice_from("Y")?;
            Ok(true)
        })
        .unwrap();

        assert_eq!(env.get_current(), "aYaYa");
        // left at the start of the last successful scan
        assert_eq!(env.cursor, 3);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Slice { bra: usize, ket: usize, with: String },
        Insert { at: usize, with: String },
        Cursor(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..12, 0usize..12, "[a-z]{0,3}").prop_map(|(a, b, with)| Op::Slice {
                bra: a.min(b),
                ket: a.max(b),
                with
            }),
            (0usize..12, "[a-z]{0,3}").prop_map(|(at, with)| Op::Insert { at, with }),
            (0usize..12).prop_map(Op::Cursor),
        ]
    }

    proptest! {
        #[test]
        fn slice_ops_preserve_ordering(word in "[a-z]{0,10}", ops in prop::collection::vec(op(), 0..16)) {
            let mut env = SnowballEnv::new(&word);
            env.cursor = env.limit;

            for op in ops {
                match op {
                    Op::Slice { bra, ket, with } => {
                        env.bra = bra.min(env.limit);
                        env.ket = ket.min(env.limit);
                        env.slice_from(&with).unwrap();
                    }
                    Op::Insert { at, with } => {
                        let at = at.min(env.limit);
                        env.bra = env.bra.min(env.ket);
                        env.insert(at, at, &with).unwrap();
                    }
                    Op::Cursor(c) => env.cursor = c.min(env.limit),
                }

                prop_assert!(env.bra <= env.ket);
                prop_assert!(env.ket <= env.limit);
                prop_assert!(env.limit <= env.len());
                prop_assert!(env.cursor <= env.limit);
            }
        }
    }
}
