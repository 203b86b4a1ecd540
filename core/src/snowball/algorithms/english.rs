// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

//! Porter2, the second English algorithm by Martin Porter.

use once_cell::sync::Lazy;

use super::{attempt, backwards, find_suffix, run, Regions, Table};
use crate::snowball::{Grouping, SnowballEnv};
use crate::Result;

static V: Grouping = Grouping::new(&['a', 'e', 'i', 'o', 'u', 'y']);

static V_WXY: Grouping = Grouping::new(&['a', 'e', 'i', 'o', 'u', 'y', 'w', 'x', 'Y']);

static VALID_LI: Grouping =
    Grouping::new(&['c', 'd', 'e', 'g', 'h', 'k', 'm', 'n', 'r', 't']);

static INVARIANTS: Lazy<Table> = Lazy::new(|| {
    Table::forward(&[
        ("skis", 1),
        ("skies", 2),
        ("dying", 3),
        ("lying", 4),
        ("tying", 5),
        ("idly", 6),
        ("gently", 7),
        ("ugly", 8),
        ("early", 9),
        ("only", 10),
        ("singly", 11),
        ("sky", 12),
        ("news", 12),
        ("howe", 12),
        ("atlas", 12),
        ("cosmos", 12),
        ("bias", 12),
        ("andes", 12),
    ])
});

const SPECIAL_FORMS: [&str; 11] = [
    "ski", "sky", "die", "lie", "tie", "idl", "gentl", "ugli", "earli", "onli", "singl",
];

static R1_PREFIXES: Lazy<Table> =
    Lazy::new(|| Table::forward(&[("gener", 1), ("commun", 1), ("arsen", 1)]));

static APOSTROPHE: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("'", 1), ("'s", 1), ("'s'", 1)]));

static STEP_1A: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("sses", 1),
        ("ied", 2),
        ("ies", 2),
        ("s", 3),
        ("us", 4),
        ("ss", 4),
    ])
});

static STEP_1B: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("eed", 1),
        ("eedly", 1),
        ("ed", 2),
        ("edly", 2),
        ("ing", 2),
        ("ingly", 2),
    ])
});

static STEP_1B_TAIL: Lazy<Table> = Lazy::new(|| {
    let doubles = ["bb", "dd", "ff", "gg", "mm", "nn", "pp", "rr", "tt"];

    let mut rows = vec![("", 3), ("at", 1), ("bl", 1), ("iz", 1)];
    rows.extend(doubles.into_iter().map(|double| (double, 2)));

    Table::backward(&rows)
});

static STEP_2: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("tional", 1),
        ("enci", 2),
        ("anci", 3),
        ("abli", 4),
        ("entli", 5),
        ("izer", 6),
        ("ization", 6),
        ("ational", 7),
        ("ation", 7),
        ("ator", 7),
        ("alism", 8),
        ("aliti", 8),
        ("alli", 8),
        ("fulness", 9),
        ("ousli", 10),
        ("ousness", 10),
        ("iveness", 11),
        ("iviti", 11),
        ("biliti", 12),
        ("bli", 12),
        ("fulli", 13),
        ("lessli", 14),
        ("ogi", 15),
        ("li", 16),
    ])
});

const STEP_2_REPLACEMENTS: [&str; 14] = [
    "tion", "ence", "ance", "able", "ent", "ize", "ate", "al", "ful", "ous", "ive", "ble", "ful",
    "less",
];

static STEP_3: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("tional", 1),
        ("ational", 2),
        ("alize", 3),
        ("icate", 4),
        ("iciti", 4),
        ("ical", 4),
        ("ful", 5),
        ("ness", 5),
        ("ative", 6),
    ])
});

static STEP_4: Lazy<Table> = Lazy::new(|| {
    let deleted = [
        "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ism",
        "ate", "iti", "ous", "ive", "ize",
    ];

    let mut rows: Vec<_> = deleted.into_iter().map(|suffix| (suffix, 1)).collect();
    rows.push(("ion", 2));

    Table::backward(&rows)
});

static STEP_5: Lazy<Table> = Lazy::new(|| Table::backward(&[("e", 1), ("l", 2)]));

static INVARIANT_SUFFIXED: Lazy<Table> = Lazy::new(|| {
    Table::backward(
        &[
            "inning", "outing", "canning", "herring", "earring", "proceed", "exceed", "succeed",
        ]
        .map(|word| (word, 1)),
    )
});

/// Words whose stem is fixed regardless of the rules.
fn exception1(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    env.bra = env.cursor;
    let among_var = env.find_among(&INVARIANTS, r);
    if among_var == 0 {
        return Ok(false);
    }
    env.ket = env.cursor;
    if env.cursor < env.limit {
        return Ok(false);
    }

    if let Some(form) = SPECIAL_FORMS.get(among_var as usize - 1) {
        env.slice_from(form)?;
    }

    Ok(true)
}

/// Returns whether a consonantal `y` was marked.
fn prelude(env: &mut SnowballEnv) -> Result<bool> {
    let start = env.cursor;
    let mut y_found = false;

    env.bra = env.cursor;
    if env.eq_s("'") {
        env.ket = env.cursor;
        env.slice_del()?;
    }
    env.cursor = start;

    env.bra = env.cursor;
    if env.eq_s("y") {
        env.ket = env.cursor;
        env.slice_from("Y")?;
        y_found = true;
    }
    env.cursor = start;

    env.repeat_goto(|env| {
        if !env.in_grouping(&V) {
            return Ok(false);
        }
        env.bra = env.cursor;
        if !env.eq_s("y") {
            return Ok(false);
        }
        env.ket = env.cursor;
        env.slice_from("Y")?;
        y_found = true;
        Ok(true)
    })?;
    env.cursor = start;

    Ok(y_found)
}

fn mark_regions(env: &mut SnowballEnv) -> Regions {
    let mut r = Regions::unset(env);
    r.pv = 0;
    let start = env.cursor;

    let r1_found = env.find_among(&R1_PREFIXES, &mut r) != 0 || {
        env.cursor = start;
        env.go_past_grouping(&V) && env.go_past_non_grouping(&V)
    };
    if r1_found {
        r.p1 = env.cursor;
        if env.go_past_grouping(&V) && env.go_past_non_grouping(&V) {
            r.p2 = env.cursor;
        }
    }
    env.cursor = start;

    r
}

/// A short syllable ends at the cursor.
fn short_v(env: &mut SnowballEnv) -> bool {
    let v = env.limit - env.cursor;
    if env.out_grouping_b(&V_WXY) && env.in_grouping_b(&V) && env.out_grouping_b(&V) {
        env.cursor = env.limit - v;
        return true;
    }

    env.cursor = env.limit - v;
    let found = env.out_grouping_b(&V)
        && env.in_grouping_b(&V)
        && env.cursor == env.limit_backward;
    env.cursor = env.limit - v;

    found
}

fn step_1a(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    attempt(env, |env| {
        if find_suffix(env, &APOSTROPHE, r) == 0 {
            return Ok(false);
        }
        env.slice_del()?;
        Ok(true)
    })?;

    match find_suffix(env, &STEP_1A, r) {
        1 => env.slice_from("ss")?,
        2 => {
            let v = env.limit - env.cursor;
            if env.hop_back(2) {
                env.cursor = env.limit - v;
                env.slice_from("i")?;
            } else {
                env.cursor = env.limit - v;
                env.slice_from("ie")?;
            }
        }
        3 => {
            // keep the s of "gas" and "this"
            if !env.prev() || !env.go_past_grouping_b(&V) {
                return Ok(false);
            }
            env.slice_del()?;
        }
        4 => {}
        _ => return Ok(false),
    }

    Ok(true)
}

fn step_1b(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    match find_suffix(env, &STEP_1B, r) {
        1 => {
            if !r.r1(env) {
                return Ok(false);
            }
            env.slice_from("ee")?;
        }
        2 => {
            let v = env.limit - env.cursor;
            if !env.go_past_grouping_b(&V) {
                return Ok(false);
            }
            env.cursor = env.limit - v;
            env.slice_del()?;

            let v = env.limit - env.cursor;
            let among_var = env.find_among_b(&STEP_1B_TAIL, r);
            env.cursor = env.limit - v;

            match among_var {
                1 => {
                    let c = env.cursor;
                    env.insert(c, c, "e")?;
                    env.cursor = c;
                }
                2 => {
                    env.ket = env.cursor;
                    if !env.prev() {
                        return Ok(false);
                    }
                    env.bra = env.cursor;
                    env.slice_del()?;
                }
                3 => {
                    if env.cursor != r.p1 || !short_v(env) {
                        return Ok(false);
                    }
                    let c = env.cursor;
                    env.insert(c, c, "e")?;
                    env.cursor = c;
                }
                _ => return Ok(false),
            }
        }
        _ => return Ok(false),
    }

    Ok(true)
}

fn step_1c(env: &mut SnowballEnv) -> Result<bool> {
    env.ket = env.cursor;
    let v = env.limit - env.cursor;
    if !env.eq_s_b("y") {
        env.cursor = env.limit - v;
        if !env.eq_s_b("Y") {
            return Ok(false);
        }
    }
    env.bra = env.cursor;

    if !env.out_grouping_b(&V) || env.cursor == env.limit_backward {
        return Ok(false);
    }
    env.slice_from("i")?;

    Ok(true)
}

fn step_2(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let among_var = find_suffix(env, &STEP_2, r);
    if among_var == 0 || !r.r1(env) {
        return Ok(false);
    }

    match among_var {
        15 => {
            if !env.eq_s_b("l") {
                return Ok(false);
            }
            env.slice_from("og")?;
        }
        16 => {
            if !env.in_grouping_b(&VALID_LI) {
                return Ok(false);
            }
            env.slice_del()?;
        }
        n => match STEP_2_REPLACEMENTS.get(n as usize - 1) {
            Some(replacement) => env.slice_from(replacement)?,
            None => return Ok(false),
        },
    }

    Ok(true)
}

fn step_3(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let among_var = find_suffix(env, &STEP_3, r);
    if among_var == 0 || !r.r1(env) {
        return Ok(false);
    }

    match among_var {
        1 => env.slice_from("tion")?,
        2 => env.slice_from("ate")?,
        3 => env.slice_from("al")?,
        4 => env.slice_from("ic")?,
        5 => env.slice_del()?,
        6 => {
            if !r.r2(env) {
                return Ok(false);
            }
            env.slice_del()?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}

fn step_4(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let among_var = find_suffix(env, &STEP_4, r);
    if among_var == 0 || !r.r2(env) {
        return Ok(false);
    }

    if among_var == 2 {
        let v = env.limit - env.cursor;
        if !env.eq_s_b("s") {
            env.cursor = env.limit - v;
            if !env.eq_s_b("t") {
                return Ok(false);
            }
        }
    }
    env.slice_del()?;

    Ok(true)
}

fn step_5(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    match find_suffix(env, &STEP_5, r) {
        1 => {
            if !r.r2(env) && !(r.r1(env) && !short_v(env)) {
                return Ok(false);
            }
            env.slice_del()?;
        }
        2 => {
            if !r.r2(env) || !env.eq_s_b("l") {
                return Ok(false);
            }
            env.slice_del()?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}

/// Whole words that only look suffixed.
fn exception2(env: &mut SnowballEnv, r: &mut Regions) -> bool {
    find_suffix(env, &INVARIANT_SUFFIXED, r) != 0 && env.cursor == env.limit_backward
}

fn postlude(env: &mut SnowballEnv) -> Result<()> {
    env.repeat_goto(|env| {
        env.bra = env.cursor;
        if !env.eq_s("Y") {
            return Ok(false);
        }
        env.ket = env.cursor;
        env.slice_from("y")?;
        Ok(true)
    })
}

pub(super) fn regions(env: &mut SnowballEnv) -> Result<Regions> {
    prelude(env)?;

    Ok(mark_regions(env))
}

pub(super) fn stem(env: &mut SnowballEnv) -> Result<()> {
    let mut scratch = Regions::default();
    if exception1(env, &mut scratch)? {
        return Ok(());
    }

    env.cursor = 0;
    if !env.hop(3) {
        return Ok(());
    }
    env.cursor = 0;

    let y_found = prelude(env)?;
    let mut r = mark_regions(env);

    backwards(env);
    run(env, |env| step_1a(env, &mut r))?;

    let v = env.limit - env.cursor;
    if !exception2(env, &mut r) {
        env.cursor = env.limit - v;
        run(env, |env| step_1b(env, &mut r))?;
        run(env, step_1c)?;
        run(env, |env| step_2(env, &mut r))?;
        run(env, |env| step_3(env, &mut r))?;
        run(env, |env| step_4(env, &mut r))?;
        run(env, |env| step_5(env, &mut r))?;
    }

    env.cursor = env.limit_backward;
    if y_found {
        postlude(env)?;
    }

    Ok(())
}
