// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use once_cell::sync::Lazy;

use super::{attempt, backwards, find_suffix, replace_each, run, Regions, Table};
use crate::snowball::{Grouping, SnowballEnv};
use crate::Result;

static V: Grouping = Grouping::new(&['a', 'e', 'i', 'o', 'u', 'y', 'ä', 'ö', 'ü']);

static S_ENDING: Grouping =
    Grouping::new(&['b', 'd', 'f', 'g', 'h', 'k', 'l', 'm', 'n', 'r', 't']);

static ST_ENDING: Grouping = Grouping::new(&['b', 'd', 'f', 'g', 'h', 'k', 'l', 'm', 'n', 't']);

static POSTLUDE: Lazy<Table> = Lazy::new(|| {
    Table::forward(&[
        ("", 6),
        ("U", 2),
        ("Y", 1),
        ("ä", 3),
        ("ö", 4),
        ("ü", 5),
    ])
});

static STEP_1: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("em", 1),
        ("ern", 1),
        ("er", 1),
        ("e", 2),
        ("en", 2),
        ("es", 2),
        ("s", 3),
    ])
});

static STEP_2: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("en", 1), ("er", 1), ("est", 1), ("st", 2)]));

static STEP_3: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("end", 1),
        ("ung", 1),
        ("ig", 2),
        ("ik", 2),
        ("isch", 2),
        ("lich", 3),
        ("heit", 3),
        ("keit", 4),
    ])
});

static AFTER_KEIT: Lazy<Table> = Lazy::new(|| Table::backward(&[("lich", 1), ("ig", 1)]));

fn prelude(env: &mut SnowballEnv) -> Result<()> {
    let start = env.cursor;
    loop {
        env.bra = env.cursor;
        if env.eq_s("ß") {
            env.ket = env.cursor;
            env.slice_from("ss")?;
            continue;
        }
        if !env.next() {
            break;
        }
    }
    env.cursor = start;

    env.repeat_goto(|env| {
        if !env.in_grouping(&V) {
            return Ok(false);
        }
        env.bra = env.cursor;
        let after_vowel = env.cursor;

        for (letter, marked) in [("u", "U"), ("y", "Y")] {
            env.cursor = after_vowel;
            if env.eq_s(letter) {
                env.ket = env.cursor;
                if env.in_grouping(&V) {
                    env.slice_from(marked)?;
                    return Ok(true);
                }
            }
        }

        Ok(false)
    })
}

fn mark_regions(env: &mut SnowballEnv) -> Regions {
    let mut r = Regions::unset(env);
    r.pv = 0;
    let start = env.cursor;

    // R1 never starts before the fourth letter
    if !env.hop(3) {
        return r;
    }
    let x = env.cursor;
    env.cursor = start;

    if !(env.go_past_grouping(&V) && env.go_past_non_grouping(&V)) {
        env.cursor = start;
        return r;
    }
    r.p1 = env.cursor.max(x);

    if env.go_past_grouping(&V) && env.go_past_non_grouping(&V) {
        r.p2 = env.cursor;
    }
    env.cursor = start;

    r
}

fn delete_s_before_nis(env: &mut SnowballEnv) -> Result<bool> {
    env.ket = env.cursor;
    if !env.eq_s_b("s") {
        return Ok(false);
    }
    env.bra = env.cursor;
    if !env.eq_s_b("nis") {
        return Ok(false);
    }
    env.slice_del()?;

    Ok(true)
}

fn step_1(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let among_var = find_suffix(env, &STEP_1, r);
    if among_var == 0 || !r.r1(env) {
        return Ok(false);
    }

    match among_var {
        1 => env.slice_del()?,
        2 => {
            env.slice_del()?;
            attempt(env, delete_s_before_nis)?;
        }
        3 => {
            if !env.in_grouping_b(&S_ENDING) {
                return Ok(false);
            }
            env.slice_del()?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}

fn step_2(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let among_var = find_suffix(env, &STEP_2, r);
    if among_var == 0 || !r.r1(env) {
        return Ok(false);
    }

    match among_var {
        1 => env.slice_del()?,
        2 => {
            if !env.in_grouping_b(&ST_ENDING) || !env.hop_back(3) {
                return Ok(false);
            }
            env.slice_del()?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}

/// `not 'e' R2 delete` on the current slice.
fn delete_unless_after_e(env: &mut SnowballEnv, r: &Regions) -> Result<bool> {
    let v = env.limit - env.cursor;
    if env.eq_s_b("e") {
        return Ok(false);
    }
    env.cursor = env.limit - v;
    if !r.r2(env) {
        return Ok(false);
    }
    env.slice_del()?;

    Ok(true)
}

fn step_3(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let among_var = find_suffix(env, &STEP_3, r);
    if among_var == 0 || !r.r2(env) {
        return Ok(false);
    }

    match among_var {
        1 => {
            env.slice_del()?;
            attempt(env, |env| {
                env.ket = env.cursor;
                if !env.eq_s_b("ig") {
                    return Ok(false);
                }
                env.bra = env.cursor;
                delete_unless_after_e(env, r)
            })?;
        }
        2 => return delete_unless_after_e(env, r),
        3 => {
            env.slice_del()?;
            attempt(env, |env| {
                env.ket = env.cursor;
                let v = env.limit - env.cursor;
                if !env.eq_s_b("er") {
                    env.cursor = env.limit - v;
                    if !env.eq_s_b("en") {
                        return Ok(false);
                    }
                }
                env.bra = env.cursor;
                if !r.r1(env) {
                    return Ok(false);
                }
                env.slice_del()?;
                Ok(true)
            })?;
        }
        4 => {
            env.slice_del()?;
            attempt(env, |env| {
                if find_suffix(env, &AFTER_KEIT, r) == 0 || !r.r2(env) {
                    return Ok(false);
                }
                env.slice_del()?;
                Ok(true)
            })?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}

pub(super) fn regions(env: &mut SnowballEnv) -> Result<Regions> {
    prelude(env)?;
    env.cursor = 0;

    Ok(mark_regions(env))
}

pub(super) fn stem(env: &mut SnowballEnv) -> Result<()> {
    let mut r = regions(env)?;

    backwards(env);
    run(env, |env| step_1(env, &mut r))?;
    run(env, |env| step_2(env, &mut r))?;
    run(env, |env| step_3(env, &mut r))?;

    env.cursor = env.limit_backward;
    replace_each(env, &POSTLUDE, &["y", "u", "a", "o", "u"], &mut r)
}
