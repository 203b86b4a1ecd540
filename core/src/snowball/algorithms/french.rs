// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use once_cell::sync::Lazy;

use super::{
    attempt, backwards, find_suffix, find_suffix_within, mark_r1_r2, replace_each, run,
    with_limit_backward, Regions, Table,
};
use crate::snowball::{Grouping, SnowballEnv};
use crate::Result;

static V: Grouping = Grouping::new(&[
    'a', 'e', 'i', 'o', 'u', 'y', 'â', 'à', 'ë', 'é', 'è', 'ê', 'ï', 'î', 'ô', 'û', 'ù',
]);

static KEEP_WITH_S: Grouping = Grouping::new(&['a', 'i', 'o', 'u', 'è', 's']);

static RV_EXCEPTIONS: Lazy<Table> =
    Lazy::new(|| Table::forward(&[("col", 1), ("par", 1), ("tap", 1)]));

static POSTLUDE: Lazy<Table> =
    Lazy::new(|| Table::forward(&[("", 4), ("I", 1), ("U", 2), ("Y", 3)]));

static STANDARD: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("ance", 1),
        ("iqUe", 1),
        ("isme", 1),
        ("able", 1),
        ("iste", 1),
        ("eux", 1),
        ("ances", 1),
        ("iqUes", 1),
        ("ismes", 1),
        ("ables", 1),
        ("istes", 1),
        ("atrice", 2),
        ("ateur", 2),
        ("ation", 2),
        ("atrices", 2),
        ("ateurs", 2),
        ("ations", 2),
        ("logie", 3),
        ("logies", 3),
        ("usion", 4),
        ("ution", 4),
        ("usions", 4),
        ("utions", 4),
        ("ence", 5),
        ("ences", 5),
        ("ement", 6),
        ("ements", 6),
        ("ité", 7),
        ("ités", 7),
        ("if", 8),
        ("ive", 8),
        ("ifs", 8),
        ("ives", 8),
        ("eaux", 9),
        ("aux", 10),
        ("euse", 11),
        ("euses", 11),
        ("issement", 12),
        ("issements", 12),
        ("amment", 13),
        ("emment", 14),
        ("ment", 15),
        ("ments", 15),
    ])
});

static AFTER_EMENT: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("iv", 1),
        ("eus", 2),
        ("abl", 3),
        ("iqU", 3),
        ("ièr", 4),
        ("Ièr", 4),
    ])
});

static AFTER_ITE: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("abil", 1), ("ic", 2), ("iv", 3)]));

static I_VERB: Lazy<Table> = Lazy::new(|| {
    Table::backward(
        &[
            "îmes", "ît", "îtes", "i", "ie", "ies", "ir", "ira", "irai", "iraIent", "irais",
            "irait", "iras", "irent", "irez", "iriez", "irions", "irons", "iront", "is",
            "issaIent", "issais", "issait", "issant", "issante", "issantes", "issants", "isse",
            "issent", "isses", "issez", "issiez", "issions", "issons", "it",
        ]
        .map(|suffix| (suffix, 1)),
    )
});

static VERB: Lazy<Table> = Lazy::new(|| {
    let deleted = [
        "é", "ée", "ées", "és", "èrent", "er", "era", "erai", "eraIent", "erais", "erait",
        "eras", "erez", "eriez", "erions", "erons", "eront", "ez", "iez",
    ];
    let before_e = [
        "âmes", "ât", "âtes", "a", "ai", "aIent", "ais", "ait", "ant", "ante", "antes", "ants",
        "as", "asse", "assent", "asses", "assiez", "assions",
    ];

    let rows: Vec<_> = std::iter::once(("ions", 1))
        .chain(deleted.into_iter().map(|suffix| (suffix, 2)))
        .chain(before_e.into_iter().map(|suffix| (suffix, 3)))
        .collect();

    Table::backward(&rows)
});

static RESIDUAL: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("ion", 1),
        ("ier", 2),
        ("ière", 2),
        ("Ier", 2),
        ("Ière", 2),
        ("e", 3),
        ("ë", 4),
    ])
});

static DOUBLES: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[("enn", 1), ("onn", 1), ("ett", 1), ("ell", 1), ("eill", 1)])
});

/// Mark vowels that act as consonants by upper-casing them.
fn prelude(env: &mut SnowballEnv) -> Result<()> {
    env.repeat_goto(|env| {
        let start = env.cursor;

        if env.in_grouping(&V) {
            env.bra = env.cursor;
            let after_vowel = env.cursor;

            for (letter, marked) in [("u", "U"), ("i", "I")] {
                env.cursor = after_vowel;
                if env.eq_s(letter) {
                    env.ket = env.cursor;
                    if env.in_grouping(&V) {
                        env.slice_from(marked)?;
                        return Ok(true);
                    }
                }
            }

            env.cursor = after_vowel;
            if env.eq_s("y") {
                env.ket = env.cursor;
                env.slice_from("Y")?;
                return Ok(true);
            }
        }

        env.cursor = start;
        env.bra = env.cursor;
        if env.eq_s("y") {
            env.ket = env.cursor;
            if env.in_grouping(&V) {
                env.slice_from("Y")?;
                return Ok(true);
            }
        }

        env.cursor = start;
        if env.eq_s("q") {
            env.bra = env.cursor;
            if env.eq_s("u") {
                env.ket = env.cursor;
                env.slice_from("U")?;
                return Ok(true);
            }
        }

        Ok(false)
    })
}

fn mark_regions(env: &mut SnowballEnv) -> Regions {
    let mut r = Regions::unset(env);
    let start = env.cursor;

    let rv_found = (env.in_grouping(&V) && env.in_grouping(&V) && env.next())
        || {
            env.cursor = start;
            env.find_among(&RV_EXCEPTIONS, &mut r) != 0
        }
        || {
            env.cursor = start;
            env.next() && env.go_past_grouping(&V)
        };
    if rv_found {
        r.pv = env.cursor;
    }

    env.cursor = start;
    mark_r1_r2(env, &V, &mut r);
    env.cursor = start;

    r
}

fn before_ic(env: &mut SnowballEnv, r: &Regions) -> Result<bool> {
    env.ket = env.cursor;
    if !env.eq_s_b("ic") {
        return Ok(false);
    }
    env.bra = env.cursor;

    if r.r2(env) {
        env.slice_del()
    } else {
        env.slice_from("iqU")
    }?;

    Ok(true)
}

/// `(R2 delete) or (R1 <- 'eux')`
fn eux(env: &mut SnowballEnv, r: &Regions) -> Result<bool> {
    if r.r2(env) {
        env.slice_del()?;
    } else if r.r1(env) {
        env.slice_from("eux")?;
    } else {
        return Ok(false);
    }

    Ok(true)
}

fn standard_suffix(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let among_var = find_suffix(env, &STANDARD, r);
    if among_var == 0 {
        return Ok(false);
    }

    match among_var {
        1 => {
            if !r.r2(env) {
                return Ok(false);
            }
            env.slice_del()?;
        }
        2 => {
            if !r.r2(env) {
                return Ok(false);
            }
            env.slice_del()?;
            attempt(env, |env| before_ic(env, r))?;
        }
        3 => {
            if !r.r2(env) {
                return Ok(false);
            }
            env.slice_from("log")?;
        }
        4 => {
            if !r.r2(env) {
                return Ok(false);
            }
            env.slice_from("u")?;
        }
        5 => {
            if !r.r2(env) {
                return Ok(false);
            }
            env.slice_from("ent")?;
        }
        6 => {
            if !r.rv(env) {
                return Ok(false);
            }
            env.slice_del()?;

            attempt(env, |env| match find_suffix(env, &AFTER_EMENT, r) {
                1 => {
                    if !r.r2(env) {
                        return Ok(false);
                    }
                    env.slice_del()?;
                    env.ket = env.cursor;
                    if !env.eq_s_b("at") {
                        return Ok(false);
                    }
                    env.bra = env.cursor;
                    if !r.r2(env) {
                        return Ok(false);
                    }
                    env.slice_del()?;
                    Ok(true)
                }
                2 => eux(env, r),
                3 => {
                    if !r.r2(env) {
                        return Ok(false);
                    }
                    env.slice_del()?;
                    Ok(true)
                }
                4 => {
                    if !r.rv(env) {
                        return Ok(false);
                    }
                    env.slice_from("i")?;
                    Ok(true)
                }
                _ => Ok(false),
            })?;
        }
        7 => {
            if !r.r2(env) {
                return Ok(false);
            }
            env.slice_del()?;

            attempt(env, |env| {
                let among_var = find_suffix(env, &AFTER_ITE, r);
                match among_var {
                    1 | 2 => {
                        if r.r2(env) {
                            env.slice_del()?;
                        } else if among_var == 1 {
                            env.slice_from("abl")?;
                        } else {
                            env.slice_from("iqU")?;
                        }
                        Ok(true)
                    }
                    3 => {
                        if !r.r2(env) {
                            return Ok(false);
                        }
                        env.slice_del()?;
                        Ok(true)
                    }
                    _ => Ok(false),
                }
            })?;
        }
        8 => {
            if !r.r2(env) {
                return Ok(false);
            }
            env.slice_del()?;

            attempt(env, |env| {
                env.ket = env.cursor;
                if !env.eq_s_b("at") {
                    return Ok(false);
                }
                env.bra = env.cursor;
                if !r.r2(env) {
                    return Ok(false);
                }
                env.slice_del()?;
                before_ic(env, r)
            })?;
        }
        9 => env.slice_from("eau")?,
        10 => {
            if !r.r1(env) {
                return Ok(false);
            }
            env.slice_from("al")?;
        }
        11 => return eux(env, r),
        12 => {
            if !r.r1(env) || !env.out_grouping_b(&V) {
                return Ok(false);
            }
            env.slice_del()?;
        }
        // the replacements below still hand the word to the verb steps
        13 => {
            if r.rv(env) {
                env.slice_from("ant")?;
            }
            return Ok(false);
        }
        14 => {
            if r.rv(env) {
                env.slice_from("ent")?;
            }
            return Ok(false);
        }
        15 => {
            let v = env.limit - env.cursor;
            let vowel_in_rv = env.in_grouping_b(&V) && r.rv(env);
            env.cursor = env.limit - v;
            if vowel_in_rv {
                env.slice_del()?;
            }
            return Ok(false);
        }
        _ => return Ok(false),
    }

    Ok(true)
}

fn i_verb_suffix(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let pv = r.pv;

    with_limit_backward(env, pv, |env| {
        if find_suffix(env, &I_VERB, r) == 0 || !env.out_grouping_b(&V) {
            return Ok(false);
        }
        env.slice_del()?;

        Ok(true)
    })
}

fn verb_suffix(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let pv = r.pv;

    with_limit_backward(env, pv, |env| {
        match find_suffix(env, &VERB, r) {
            1 => {
                if !r.r2(env) {
                    return Ok(false);
                }
                env.slice_del()?;
            }
            2 => env.slice_del()?,
            3 => {
                env.slice_del()?;
                attempt(env, |env| {
                    env.ket = env.cursor;
                    if !env.eq_s_b("e") {
                        return Ok(false);
                    }
                    env.bra = env.cursor;
                    env.slice_del()?;
                    Ok(true)
                })?;
            }
            _ => return Ok(false),
        }

        Ok(true)
    })
}

fn residual_suffix(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    attempt(env, |env| {
        env.ket = env.cursor;
        if !env.eq_s_b("s") {
            return Ok(false);
        }
        env.bra = env.cursor;

        let v = env.limit - env.cursor;
        if !env.out_grouping_b(&KEEP_WITH_S) {
            return Ok(false);
        }
        env.cursor = env.limit - v;
        env.slice_del()?;

        Ok(true)
    })?;

    let pv = r.pv;
    let among_var = find_suffix_within(env, pv, &RESIDUAL, r);
    let eq_within_rv = |env: &mut SnowballEnv, s: &str| {
        let limit_backward = env.limit_backward;
        env.limit_backward = pv;
        let found = env.eq_s_b(s);
        env.limit_backward = limit_backward;
        found
    };

    match among_var {
        1 => {
            if !r.r2(env) {
                return Ok(false);
            }
            let v = env.limit - env.cursor;
            if !eq_within_rv(env, "s") {
                env.cursor = env.limit - v;
                if !eq_within_rv(env, "t") {
                    return Ok(false);
                }
            }
            env.slice_del()?;
        }
        2 => env.slice_from("i")?,
        3 => env.slice_del()?,
        4 => {
            if !eq_within_rv(env, "gu") {
                return Ok(false);
            }
            env.slice_del()?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}

fn un_double(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let v = env.limit - env.cursor;
    if env.find_among_b(&DOUBLES, r) == 0 {
        return Ok(false);
    }
    env.cursor = env.limit - v;

    env.ket = env.cursor;
    if !env.prev() {
        return Ok(false);
    }
    env.bra = env.cursor;
    env.slice_del()?;

    Ok(true)
}

fn un_accent(env: &mut SnowballEnv) -> Result<bool> {
    let mut consonants = 0;
    while env.out_grouping_b(&V) {
        consonants += 1;
    }
    if consonants == 0 {
        return Ok(false);
    }

    env.ket = env.cursor;
    let v = env.limit - env.cursor;
    if !env.eq_s_b("é") {
        env.cursor = env.limit - v;
        if !env.eq_s_b("è") {
            return Ok(false);
        }
    }
    env.bra = env.cursor;
    env.slice_from("e")?;

    Ok(true)
}

fn remove_suffixes(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let v = env.limit - env.cursor;
    if standard_suffix(env, r)? {
        return Ok(true);
    }

    env.cursor = env.limit - v;
    if i_verb_suffix(env, r)? {
        return Ok(true);
    }

    env.cursor = env.limit - v;
    verb_suffix(env, r)
}

pub(super) fn regions(env: &mut SnowballEnv) -> Result<Regions> {
    prelude(env)?;
    env.cursor = 0;

    Ok(mark_regions(env))
}

pub(super) fn stem(env: &mut SnowballEnv) -> Result<()> {
    let mut r = regions(env)?;

    backwards(env);

    run(env, |env| {
        let v = env.limit - env.cursor;
        if remove_suffixes(env, &mut r)? {
            env.cursor = env.limit - v;
            attempt(env, |env| {
                env.ket = env.cursor;
                let v = env.limit - env.cursor;
                if env.eq_s_b("Y") {
                    env.bra = env.cursor;
                    env.slice_from("i")?;
                    return Ok(true);
                }
                env.cursor = env.limit - v;
                if env.eq_s_b("ç") {
                    env.bra = env.cursor;
                    env.slice_from("c")?;
                    return Ok(true);
                }
                Ok(false)
            })?;
            return Ok(true);
        }

        env.cursor = env.limit - v;
        residual_suffix(env, &mut r)
    })?;
    run(env, |env| un_double(env, &mut r))?;
    run(env, un_accent)?;

    env.cursor = env.limit_backward;
    replace_each(env, &POSTLUDE, &["i", "u", "y"], &mut r)
}

#[cfg(test)]
mod tests {
    use super::super::Algorithm;

    fn stem(word: &str) -> String {
        Algorithm::French.stem(word).unwrap()
    }

    #[test]
    fn plural_aux() {
        assert_eq!(stem("chevaux"), "cheval");
    }

    #[test]
    fn adverb_with_doubled_consonant() {
        assert_eq!(stem("continuellement"), "continuel");
    }

    #[test]
    fn verb_ending() {
        assert_eq!(stem("chanterions"), "chant");
    }

    #[test]
    fn adverb_after_iqu() {
        assert_eq!(stem("automatiquement"), "automat");
        assert_eq!(stem("politiquement"), "polit");
        assert_eq!(stem("magnifiquement"), "magnif");
    }

    #[test]
    fn bare_ic_before_ement_is_kept() {
        assert_eq!(stem("fcuzzeatricements"), "fcuzzeatric");
    }

    #[test]
    fn rv_exception_prefix() {
        // "tap" opens RV after the third letter, so "-is" stays
        assert_eq!(stem("tapis"), "tapis");
    }

    #[test]
    fn consonantal_y_is_restored() {
        assert_eq!(stem("yeux"), "yeux");
    }

    #[test]
    fn regions() {
        let r = Algorithm::French.regions("chevaux").unwrap();
        assert_eq!((r.pv, r.p1, r.p2), (3, 4, 7));
    }
}
