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

static V: Grouping = Grouping::new(&['a', 'e', 'i', 'o', 'u', 'á', 'é', 'í', 'ó', 'ú', 'ü']);

static POSTLUDE: Lazy<Table> = Lazy::new(|| {
    Table::forward(&[
        ("", 6),
        ("á", 1),
        ("é", 2),
        ("í", 3),
        ("ó", 4),
        ("ú", 5),
    ])
});

static PRONOUNS: Lazy<Table> = Lazy::new(|| {
    Table::backward(
        &[
            "me", "se", "sela", "selo", "selas", "selos", "la", "le", "lo", "las", "les", "los",
            "nos",
        ]
        .map(|pronoun| (pronoun, 1)),
    )
});

static BEFORE_PRONOUN: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("iéndo", 1),
        ("ándo", 2),
        ("ár", 3),
        ("ér", 4),
        ("ír", 5),
        ("ando", 6),
        ("iendo", 6),
        ("ar", 6),
        ("er", 6),
        ("ir", 6),
        ("yendo", 7),
    ])
});

static STANDARD: Lazy<Table> = Lazy::new(|| {
    let deleted = [
        "anza", "anzas", "ico", "ica", "icos", "icas", "ismo", "ismos", "able", "ables", "ible",
        "ibles", "ista", "istas", "oso", "osa", "osos", "osas", "amiento", "amientos",
        "imiento", "imientos",
    ];
    let before_ic = [
        "adora", "ador", "ación", "adoras", "adores", "aciones", "ante", "antes", "ancia",
        "ancias",
    ];

    let mut rows: Vec<_> = deleted.into_iter().map(|suffix| (suffix, 1)).collect();
    rows.extend(before_ic.into_iter().map(|suffix| (suffix, 2)));
    rows.extend([
        ("logía", 3),
        ("logías", 3),
        ("ución", 4),
        ("uciones", 4),
        ("encia", 5),
        ("encias", 5),
        ("amente", 6),
        ("mente", 7),
        ("idad", 8),
        ("idades", 8),
        ("iva", 9),
        ("ivo", 9),
        ("ivas", 9),
        ("ivos", 9),
    ]);

    Table::backward(&rows)
});

static AFTER_AMENTE: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("iv", 1), ("os", 2), ("ic", 2), ("ad", 2)]));

static AFTER_MENTE: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("ante", 1), ("able", 1), ("ible", 1)]));

static AFTER_IDAD: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("abil", 1), ("ic", 1), ("iv", 1)]));

static Y_VERB: Lazy<Table> = Lazy::new(|| {
    Table::backward(
        &[
            "ya", "ye", "yan", "yen", "yeron", "yendo", "yo", "yó", "yas", "yes", "yais", "yamos",
        ]
        .map(|suffix| (suffix, 1)),
    )
});

static VERB: Lazy<Table> = Lazy::new(|| {
    let after_gu = ["en", "es", "éis", "emos"];
    let deleted = [
        "arían", "arías", "arán", "arás", "aríais", "aría", "aréis", "aríamos", "aremos", "ará",
        "aré", "erían", "erías", "erán", "erás", "eríais", "ería", "eréis", "eríamos", "eremos",
        "erá", "eré", "irían", "irías", "irán", "irás", "iríais", "iría", "iréis", "iríamos",
        "iremos", "irá", "iré", "aba", "ada", "ida", "ía", "ara", "iera", "ad", "ed", "id",
        "ase", "iese", "aste", "iste", "an", "aban", "ían", "aran", "ieran", "asen", "iesen",
        "aron", "ieron", "ado", "ido", "ando", "iendo", "ió", "ar", "er", "ir", "as", "abas",
        "adas", "idas", "ías", "aras", "ieras", "ases", "ieses", "ís", "áis", "abais", "íais",
        "arais", "ierais", "aseis", "ieseis", "asteis", "isteis", "ados", "idos", "amos",
        "ábamos", "íamos", "imos", "áramos", "iéramos", "iésemos", "ásemos",
    ];

    let mut rows: Vec<_> = after_gu.into_iter().map(|suffix| (suffix, 1)).collect();
    rows.extend(deleted.into_iter().map(|suffix| (suffix, 2)));

    Table::backward(&rows)
});

static RESIDUAL: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("os", 1),
        ("a", 1),
        ("o", 1),
        ("á", 1),
        ("í", 1),
        ("ó", 1),
        ("e", 2),
        ("é", 2),
    ])
});

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

    let among_var = env.find_among_b(&BEFORE_PRONOUN, r);
    if among_var == 0 || !r.rv(env) {
        return Ok(false);
    }

    let unaccented = match among_var {
        1 => "iendo",
        2 => "ando",
        3 => "ar",
        4 => "er",
        5 => "ir",
        6 => {
            env.slice_del()?;
            return Ok(true);
        }
        7 => {
            if !env.eq_s_b("u") {
                return Ok(false);
            }
            env.slice_del()?;
            return Ok(true);
        }
        _ => return Ok(false),
    };

    // the accent sat on the verb only because of the pronoun
    env.bra = env.cursor;
    env.slice_from(unaccented)?;

    Ok(true)
}

fn delete_in_r2(env: &mut SnowballEnv, r: &Regions) -> Result<bool> {
    if !r.r2(env) {
        return Ok(false);
    }
    env.slice_del()?;

    Ok(true)
}

fn standard_suffix(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let among_var = find_suffix(env, &STANDARD, r);

    match among_var {
        1 => return delete_in_r2(env, r),
        2 => {
            if !delete_in_r2(env, r)? {
                return Ok(false);
            }
            attempt(env, |env| {
                env.ket = env.cursor;
                if !env.eq_s_b("ic") {
                    return Ok(false);
                }
                env.bra = env.cursor;
                delete_in_r2(env, r)
            })?;
        }
        3 | 4 | 5 => {
            if !r.r2(env) {
                return Ok(false);
            }
            env.slice_from(["log", "u", "ente"][among_var as usize - 3])?;
        }
        6 => {
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
        7 | 8 => {
            if !delete_in_r2(env, r)? {
                return Ok(false);
            }
            let table: &Table = if among_var == 7 {
                &*AFTER_MENTE
            } else {
                &*AFTER_IDAD
            };
            attempt(env, |env| {
                if find_suffix(env, table, r) == 0 {
                    return Ok(false);
                }
                delete_in_r2(env, r)
            })?;
        }
        9 => {
            if !delete_in_r2(env, r)? {
                return Ok(false);
            }
            attempt(env, |env| remove_at_in_r2(env, r))?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}

fn y_verb_suffix(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let pv = r.pv;
    if find_suffix_within(env, pv, &Y_VERB, r) == 0 || !env.eq_s_b("u") {
        return Ok(false);
    }
    env.slice_del()?;

    Ok(true)
}

fn verb_suffix(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let pv = r.pv;

    match find_suffix_within(env, pv, &VERB, r) {
        1 => {
            attempt(env, |env| {
                if !env.eq_s_b("u") {
                    return Ok(false);
                }
                let v = env.limit - env.cursor;
                let before_g = env.eq_s_b("g");
                env.cursor = env.limit - v;
                Ok(before_g)
            })?;
            env.bra = env.cursor;
            env.slice_del()?;
        }
        2 => env.slice_del()?,
        _ => return Ok(false),
    }

    Ok(true)
}

fn residual_suffix(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    match find_suffix(env, &RESIDUAL, r) {
        1 => {
            if !r.rv(env) {
                return Ok(false);
            }
            env.slice_del()?;
        }
        2 => {
            if !r.rv(env) {
                return Ok(false);
            }
            env.slice_del()?;
            attempt(env, |env| {
                env.ket = env.cursor;
                if !env.eq_s_b("u") {
                    return Ok(false);
                }
                env.bra = env.cursor;
                let v = env.limit - env.cursor;
                if !env.eq_s_b("g") {
                    return Ok(false);
                }
                env.cursor = env.limit - v;
                if !r.rv(env) {
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
    Ok(mark_regions(env))
}

pub(super) fn stem(env: &mut SnowballEnv) -> Result<()> {
    let mut r = mark_regions(env);

    backwards(env);
    run(env, |env| attached_pronoun(env, &mut r))?;
    run(env, |env| {
        let v = env.limit - env.cursor;
        if standard_suffix(env, &mut r)? {
            return Ok(true);
        }
        env.cursor = env.limit - v;
        if y_verb_suffix(env, &mut r)? {
            return Ok(true);
        }
        env.cursor = env.limit - v;
        verb_suffix(env, &mut r)
    })?;
    run(env, |env| residual_suffix(env, &mut r))?;

    env.cursor = env.limit_backward;
    replace_each(env, &POSTLUDE, &["a", "e", "i", "o", "u"], &mut r)
}

#[cfg(test)]
mod tests {
    use super::super::Algorithm;

    fn stem(word: &str) -> String {
        Algorithm::Spanish.stem(word).unwrap()
    }

    #[test]
    fn plural_noun() {
        assert_eq!(stem("gatos"), "gat");
    }

    #[test]
    fn gerund() {
        assert_eq!(stem("comiendo"), "com");
    }

    #[test]
    fn attached_pronoun_drops_accent() {
        assert_eq!(stem("haciéndolo"), "hac");
    }

    #[test]
    fn adverb() {
        assert_eq!(stem("rápidamente"), "rapid");
    }

    #[test]
    fn regions() {
        let r = Algorithm::Spanish.regions("gatos").unwrap();
        assert_eq!((r.pv, r.p1, r.p2), (3, 3, 5));
    }
}
