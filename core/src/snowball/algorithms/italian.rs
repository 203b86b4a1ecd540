// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use once_cell::sync::Lazy;

use super::{
    attempt, backwards, find_suffix, find_suffix_within, mark_r1_r2, mark_rv, remove_at_in_r2,
    replace_each, run, Regions, Table,
};
use crate::snowball::{Grouping, SnowballEnv};
use crate::Result;

static V: Grouping = Grouping::new(&['a', 'e', 'i', 'o', 'u', 'à', 'è', 'ì', 'ò', 'ù']);

static AEIO: Grouping = Grouping::new(&['a', 'e', 'i', 'o', 'à', 'è', 'ì', 'ò']);

static CG: Grouping = Grouping::new(&['c', 'g']);

static ACUTE: Lazy<Table> = Lazy::new(|| {
    Table::forward(&[
        ("", 7),
        ("qu", 6),
        ("á", 1),
        ("é", 2),
        ("í", 3),
        ("ó", 4),
        ("ú", 5),
    ])
});

static POSTLUDE: Lazy<Table> = Lazy::new(|| Table::forward(&[("", 3), ("I", 1), ("U", 2)]));

static PRONOUNS: Lazy<Table> = Lazy::new(|| {
    Table::backward(
        &[
            "ci", "gli", "la", "le", "li", "lo", "mi", "ne", "si", "ti", "vi", "sene", "gliela",
            "gliele", "glieli", "glielo", "gliene", "mela", "mele", "meli", "melo", "mene", "tela",
            "tele", "teli", "telo", "tene", "cela", "cele", "celi", "celo", "cene", "vela", "vele",
            "veli", "velo", "vene",
        ]
        .map(|pronoun| (pronoun, 1)),
    )
});

static BEFORE_PRONOUN: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[("ando", 1), ("endo", 1), ("ar", 2), ("er", 2), ("ir", 2)])
});

static STANDARD: Lazy<Table> = Lazy::new(|| {
    let deleted = [
        "anza", "anze", "ico", "ici", "ica", "ice", "iche", "ichi", "ismo", "ismi", "abile",
        "abili", "ibile", "ibili", "ista", "iste", "isti", "istà", "istè", "istì", "oso", "osi",
        "osa", "ose", "mente", "atrice", "atrici", "ante", "anti",
    ];

    let mut rows: Vec<_> = deleted.into_iter().map(|suffix| (suffix, 1)).collect();
    rows.extend([
        ("azione", 2),
        ("azioni", 2),
        ("atore", 2),
        ("atori", 2),
        ("logia", 3),
        ("logie", 3),
        ("uzione", 4),
        ("uzioni", 4),
        ("usione", 4),
        ("usioni", 4),
        ("enza", 5),
        ("enze", 5),
        ("amento", 6),
        ("amenti", 6),
        ("imento", 6),
        ("imenti", 6),
        ("amente", 7),
        ("ità", 8),
        ("ivo", 9),
        ("ivi", 9),
        ("iva", 9),
        ("ive", 9),
    ]);

    Table::backward(&rows)
});

static AFTER_AMENTE: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("iv", 1), ("os", 2), ("ic", 2), ("abil", 2)]));

static AFTER_ITA: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("abil", 1), ("ic", 1), ("iv", 1)]));

static VERB: Lazy<Table> = Lazy::new(|| {
    Table::backward(
        &[
            "ammo", "ando", "ano", "are", "arono", "asse", "assero", "assi", "assimo", "ata",
            "ate", "ati", "ato", "ava", "avamo", "avano", "avate", "avi", "avo", "emmo", "enda",
            "ende", "endi", "endo", "erà", "erai", "eranno", "ere", "erebbe", "erebbero", "erei",
            "eremmo", "eremo", "ereste", "eresti", "erete", "erò", "erono", "essero", "ete",
            "eva", "evamo", "evano", "evate", "evi", "evo", "Yamo", "iamo", "immo", "irà", "irai",
            "iranno", "ire", "irebbe", "irebbero", "irei", "iremmo", "iremo", "ireste", "iresti",
            "irete", "irò", "irono", "isca", "iscano", "isce", "isci", "isco", "iscono", "issero",
            "ita", "ite", "iti", "ito", "iva", "ivamo", "ivano", "ivate", "ivi", "ivo", "ar",
            "ir", "ono", "uta", "ute", "uti", "uto",
        ]
        .map(|suffix| (suffix, 1)),
    )
});

fn prelude(env: &mut SnowballEnv, r: &mut Regions) -> Result<()> {
    let start = env.cursor;
    replace_each(env, &ACUTE, &["à", "è", "ì", "ò", "ù", "qU"], r)?;
    env.cursor = start;

    env.repeat_goto(|env| {
        if !env.in_grouping(&V) {
            return Ok(false);
        }
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

        Ok(false)
    })
}

fn mark_regions(env: &mut SnowballEnv) -> Regions {
    let mut r = Regions::unset(env);
    let start = env.cursor;

    if let Some(pv) = mark_rv(env, &V) {
        r.pv = pv;
    }

    env.cursor = start;
    mark_r1_r2(env, &V, &mut r);
    env.cursor = start;

    r
}

fn attached_pronoun(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    if find_suffix(env, &PRONOUNS, r) == 0 {
        return Ok(false);
    }

    match env.find_among_b(&BEFORE_PRONOUN, r) {
        1 if r.rv(env) => env.slice_del()?,
        2 if r.rv(env) => env.slice_from("e")?,
        _ => return Ok(false),
    }

    Ok(true)
}

fn delete_in_r2(env: &mut SnowballEnv, r: &Regions) -> Result<bool> {
    if !r.r2(env) {
        return Ok(false);
    }
    env.slice_del()?;

    Ok(true)
}

fn delete_ic_in_r2(env: &mut SnowballEnv, r: &Regions) -> Result<bool> {
    env.ket = env.cursor;
    if !env.eq_s_b("ic") {
        return Ok(false);
    }
    env.bra = env.cursor;

    delete_in_r2(env, r)
}

fn standard_suffix(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let among_var = find_suffix(env, &STANDARD, r);

    match among_var {
        1 => return delete_in_r2(env, r),
        2 => {
            if !delete_in_r2(env, r)? {
                return Ok(false);
            }
            attempt(env, |env| delete_ic_in_r2(env, r))?;
        }
        3 | 4 | 5 => {
            if !r.r2(env) {
                return Ok(false);
            }
            env.slice_from(["log", "u", "ente"][among_var as usize - 3])?;
        }
        6 => {
            if !r.rv(env) {
                return Ok(false);
            }
            env.slice_del()?;
        }
        7 => {
            if !r.r1(env) {
                return Ok(false);
            }
            env.slice_del()?;
            attempt(env, |env| {
                let among_var = find_suffix(env, &AFTER_AMENTE, r);
                if among_var == 0 || !delete_in_r2(env, r)? {
                    return Ok(false);
                }
                if among_var == 1 {
                    return remove_at_in_r2(env, r);
                }
                Ok(true)
            })?;
        }
        8 => {
            if !delete_in_r2(env, r)? {
                return Ok(false);
            }
            attempt(env, |env| {
                if find_suffix(env, &AFTER_ITA, r) == 0 {
                    return Ok(false);
                }
                delete_in_r2(env, r)
            })?;
        }
        9 => {
            if !delete_in_r2(env, r)? {
                return Ok(false);
            }
            attempt(env, |env| {
                Ok(remove_at_in_r2(env, r)? && delete_ic_in_r2(env, r)?)
            })?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}

fn verb_suffix(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let pv = r.pv;
    if find_suffix_within(env, pv, &VERB, r) == 0 {
        return Ok(false);
    }
    env.slice_del()?;

    Ok(true)
}

fn vowel_suffix(env: &mut SnowballEnv, r: &Regions) -> Result<()> {
    attempt(env, |env| {
        env.ket = env.cursor;
        if !env.in_grouping_b(&AEIO) {
            return Ok(false);
        }
        env.bra = env.cursor;
        if !r.rv(env) {
            return Ok(false);
        }
        env.slice_del()?;

        env.ket = env.cursor;
        if !env.eq_s_b("i") {
            return Ok(false);
        }
        env.bra = env.cursor;
        if !r.rv(env) {
            return Ok(false);
        }
        env.slice_del()?;

        Ok(true)
    })?;

    attempt(env, |env| {
        env.ket = env.cursor;
        if !env.eq_s_b("h") {
            return Ok(false);
        }
        env.bra = env.cursor;
        if !env.in_grouping_b(&CG) || !r.rv(env) {
            return Ok(false);
        }
        env.slice_del()?;

        Ok(true)
    })
}

pub(super) fn regions(env: &mut SnowballEnv) -> Result<Regions> {
    let mut scratch = Regions::default();
    prelude(env, &mut scratch)?;
    env.cursor = 0;

    Ok(mark_regions(env))
}

pub(super) fn stem(env: &mut SnowballEnv) -> Result<()> {
    let mut r = regions(env)?;

    backwards(env);
    run(env, |env| attached_pronoun(env, &mut r))?;
    run(env, |env| {
        let v = env.limit - env.cursor;
        if standard_suffix(env, &mut r)? {
            return Ok(true);
        }
        env.cursor = env.limit - v;
        verb_suffix(env, &mut r)
    })?;
    run(env, |env| vowel_suffix(env, &r).map(|()| true))?;

    env.cursor = env.limit_backward;
    replace_each(env, &POSTLUDE, &["i", "u"], &mut r)
}

#[cfg(test)]
mod tests {
    use super::super::Algorithm;

    fn stem(word: &str) -> String {
        Algorithm::Italian.stem(word).unwrap()
    }

    #[test]
    fn plural_vowel() {
        assert_eq!(stem("gatti"), "gatt");
    }

    #[test]
    fn participle() {
        assert_eq!(stem("abbandonata"), "abbandon");
    }

    #[test]
    fn infinitive_with_pronoun() {
        assert_eq!(stem("mangiarlo"), "mang");
    }

    #[test]
    fn acute_accent_becomes_grave() {
        // "città" and "cittá" reduce alike
        assert_eq!(stem("cittá"), stem("città"));
    }

    #[test]
    fn regions() {
        let r = Algorithm::Italian.regions("abbandonata").unwrap();
        assert_eq!((r.pv, r.p1, r.p2), (4, 2, 5));
    }
}
