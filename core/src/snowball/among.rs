// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use super::SnowballEnv;

/// Extra condition evaluated after an entry's pattern matched.
pub type GuardFn<C> = fn(&mut SnowballEnv, &mut C) -> bool;

pub enum Guard<C> {
    Always,
    When(GuardFn<C>),
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Guard<C> {}

impl<C> std::fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Guard::Always => f.write_str("Always"),
            Guard::When(_) => f.write_str("When(..)"),
        }
    }
}

/// The direction a table is matched in. Backward tables are matched against
/// the characters before the cursor, right to left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug)]
pub struct Among<C> {
    pattern: Vec<char>,
    backtrack: Option<usize>,
    result: i32,
    guard: Guard<C>,
}

impl<C> Among<C> {
    pub fn pattern(&self) -> &[char] {
        &self.pattern
    }

    /// Index of the longest other entry that is a prefix (forward) or
    /// suffix (backward) of this one.
    pub fn backtrack(&self) -> Option<usize> {
        self.backtrack
    }

    pub fn result(&self) -> i32 {
        self.result
    }

    pub fn guard(&self) -> Guard<C> {
        self.guard
    }
}

/// A compiled set of candidate patterns for one rule site.
///
/// Rows are given in any order as `(pattern, result)` pairs. Compilation sorts
/// them the way the resolver in [`SnowballEnv::find_among`] expects and links
/// every entry to its fallback.
#[derive(Debug)]
pub struct AmongTable<C> {
    direction: Direction,
    entries: Vec<Among<C>>,
}

impl<C> AmongTable<C> {
    pub fn forward(rows: &[(&str, i32)]) -> Self {
        Self::compile(Direction::Forward, rows)
    }

    pub fn backward(rows: &[(&str, i32)]) -> Self {
        Self::compile(Direction::Backward, rows)
    }

    fn compile(direction: Direction, rows: &[(&str, i32)]) -> Self {
        debug_assert!(!rows.is_empty());

        let mut entries: Vec<_> = rows
            .iter()
            .map(|(pattern, result)| {
                debug_assert!(*result > 0, "result codes must be positive");
                Among {
                    pattern: pattern.chars().collect(),
                    backtrack: None,
                    result: *result,
                    guard: Guard::Always,
                }
            })
            .collect();

        match direction {
            Direction::Forward => entries.sort_by(|a, b| a.pattern.cmp(&b.pattern)),
            Direction::Backward => {
                entries.sort_by(|a, b| a.pattern.iter().rev().cmp(b.pattern.iter().rev()))
            }
        }

        debug_assert!(
            entries.windows(2).all(|w| w[0].pattern != w[1].pattern),
            "duplicate among pattern"
        );

        for k in 0..entries.len() {
            let target = &entries[k].pattern;
            let mut best: Option<usize> = None;

            for (j, candidate) in entries.iter().enumerate() {
                if candidate.pattern.len() >= target.len() {
                    continue;
                }

                let shares = match direction {
                    Direction::Forward => target.starts_with(&candidate.pattern),
                    Direction::Backward => target.ends_with(&candidate.pattern),
                };

                if shares
                    && best.map_or(true, |b| entries[b].pattern.len() < candidate.pattern.len())
                {
                    best = Some(j);
                }
            }

            entries[k].backtrack = best;
        }

        Self { direction, entries }
    }

    /// Attach a guard to the entry whose pattern is `pattern`.
    pub fn with_guard(mut self, pattern: &str, guard: GuardFn<C>) -> Self {
        let pattern: Vec<char> = pattern.chars().collect();

        if let Some(entry) = self.entries.iter_mut().find(|e| e.pattern == pattern) {
            entry.guard = Guard::When(guard);
        } else {
            debug_assert!(false, "guard attached to a pattern that is not in the table");
        }

        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn entries(&self) -> &[Among<C>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
