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

static V: Grouping = Grouping::new(&[
    'a', 'e', 'i', 'o', 'u', 'á', 'é', 'í', 'ó', 'ú', 'â', 'ê', 'ô',
]);

// nasal vowels are spelled as a vowel followed by '~' while stemming
static PRELUDE: Lazy<Table> = Lazy::new(|| Table::forward(&[("", 3), ("ã", 1), ("õ", 2)]));

static POSTLUDE: Lazy<Table> = Lazy::new(|| Table::forward(&[("", 3), ("a~", 1), ("o~", 2)]));

static STANDARD: Lazy<Table> = Lazy::new(|| {
    let deleted = [
        "eza", "ezas", "ico", "ica", "icos", "icas", "ismo", "ismos", "ável", "ível", "ista",
        "istas", "oso", "osa", "osos", "osas", "amento", "amentos", "imento", "imentos",
        "adora", "ador", "aça~o", "adoras", "adores", "aço~es", "ante", "antes", "ância",
    ];

    let mut rows: Vec<_> = deleted.into_iter().map(|suffix| (suffix, 1)).collect();
    rows.extend([
        ("logia", 2),
        ("logias", 2),
        ("uça~o", 3),
        ("uço~es", 3),
        ("ência", 4),
        ("ências", 4),
        ("amente", 5),
        ("mente", 6),
        ("idade", 7),
        ("idades", 7),
        ("iva", 8),
        ("ivo", 8),
        ("ivas", 8),
        ("ivos", 8),
        ("ira", 9),
        ("iras", 9),
    ]);

    Table::backward(&rows)
});

static AFTER_AMENTE: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("iv", 1), ("os", 2), ("ic", 2), ("ad", 2)]));

static AFTER_MENTE: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("ante", 1), ("avel", 1), ("ível", 1)]));

static AFTER_IDADE: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("abil", 1), ("ic", 1), ("iv", 1)]));

static VERB: Lazy<Table> = Lazy::new(|| {
    Table::backward(
        &[
            "ada", "ida", "ia", "aria", "eria", "iria", "ará", "ara", "erá", "era", "irá", "ira",
            "ava", "asse", "esse", "isse", "aste", "este", "iste", "ei", "arei", "erei", "irei",
            "am", "iam", "ariam", "eriam", "iriam", "aram", "eram", "iram", "avam", "em", "arem",
            "erem", "irem", "assem", "essem", "issem", "ado", "ido", "ando", "endo", "indo",
            "ara~o", "era~o", "ira~o", "ar", "er", "ir", "as", "adas", "idas", "ias", "arias",
            "erias", "irias", "arás", "aras", "erás", "eras", "irás", "iras", "avas", "es",
            "ardes", "erdes", "irdes", "ares", "eres", "ires", "asses", "esses", "isses", "astes",
            "estes", "istes", "is", "ais", "eis", "íeis", "aríeis", "eríeis", "iríeis", "áreis",
            "areis", "éreis", "ereis", "íreis", "ireis", "ásseis", "ésseis", "ísseis", "áveis",
            "ados", "idos", "ámos", "amos", "íamos", "aríamos", "eríamos", "iríamos", "áramos",
            "éramos", "íramos", "ávamos", "emos", "aremos", "eremos", "iremos", "ássemos",
            "êssemos", "íssemos", "imos", "armos", "ermos", "irmos", "eu", "iu", "ou",
        ]
        .map(|suffix| (suffix, 1)),
    )
});

static RESIDUAL: Lazy<Table> = Lazy::new(|| {
    Table::backward(
        &["os", "a", "i", "o", "á", "í", "ó"].map(|suffix| (suffix, 1)),
    )
});

static RESIDUAL_FORM: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("e", 1), ("é", 1), ("ê", 1), ("ç", 2)]));

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
        2 | 3 | 4 => {
            if !r.r2(env) {
                return Ok(false);
            }
            env.slice_from(["log", "u", "ente"][among_var as usize - 2])?;
        }
        5 => {
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
        6 | 7 => {
            if !delete_in_r2(env, r)? {
                return Ok(false);
            }
            let table: &Table = if among_var == 6 {
                &*AFTER_MENTE
            } else {
                &*AFTER_IDADE
            };
            attempt(env, |env| {
                if find_suffix(env, table, r) == 0 {
                    return Ok(false);
                }
                delete_in_r2(env, r)
            })?;
        }
        8 => {
            if !delete_in_r2(env, r)? {
                return Ok(false);
            }
            attempt(env, |env| remove_at_in_r2(env, r))?;
        }
        9 => {
            // -eira and -eiras are rarely verbal
            if !r.rv(env) || !env.eq_s_b("e") {
                return Ok(false);
            }
            env.slice_from("ir")?;
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

/// `['i'] test 'c' RV delete`
fn i_after_c(env: &mut SnowballEnv, r: &Regions) -> Result<bool> {
    env.ket = env.cursor;
    if !env.eq_s_b("i") {
        return Ok(false);
    }
    env.bra = env.cursor;

    let v = env.limit - env.cursor;
    if !env.eq_s_b("c") {
        return Ok(false);
    }
    env.cursor = env.limit - v;

    if !r.rv(env) {
        return Ok(false);
    }
    env.slice_del()?;

    Ok(true)
}

fn residual_suffix(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    if find_suffix(env, &RESIDUAL, r) == 0 || !r.rv(env) {
        return Ok(false);
    }
    env.slice_del()?;

    Ok(true)
}

fn residual_form(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    match find_suffix(env, &RESIDUAL_FORM, r) {
        1 => {
            if !r.rv(env) {
                return Ok(false);
            }
            env.slice_del()?;

            env.ket = env.cursor;
            let v = env.limit - env.cursor;
            let softened = [("u", "g"), ("i", "c")].into_iter().any(|(vowel, before)| {
                env.cursor = env.limit - v;
                if !env.eq_s_b(vowel) {
                    return false;
                }
                env.bra = env.cursor;
                let w = env.limit - env.cursor;
                let found = env.eq_s_b(before);
                env.cursor = env.limit - w;
                found
            });
            if !softened || !r.rv(env) {
                return Ok(false);
            }
            env.slice_del()?;
        }
        2 => env.slice_from("c")?,
        _ => return Ok(false),
    }

    Ok(true)
}

fn prelude(env: &mut SnowballEnv, r: &mut Regions) -> Result<()> {
    let start = env.cursor;
    replace_each(env, &PRELUDE, &["a~", "o~"], r)?;
    env.cursor = start;

    Ok(())
}

pub(super) fn regions(env: &mut SnowballEnv) -> Result<Regions> {
    let mut scratch = Regions::default();
    prelude(env, &mut scratch)?;

    Ok(mark_regions(env))
}

pub(super) fn stem(env: &mut SnowballEnv) -> Result<()> {
    let mut r = regions(env)?;

    backwards(env);
    run(env, |env| {
        let v = env.limit - env.cursor;

        let removed = standard_suffix(env, &mut r)? || {
            env.cursor = env.limit - v;
            verb_suffix(env, &mut r)?
        };
        if removed {
            env.cursor = env.limit - v;
            run(env, |env| i_after_c(env, &r))?;
            return Ok(true);
        }

        env.cursor = env.limit - v;
        residual_suffix(env, &mut r)
    })?;
    run(env, |env| residual_form(env, &mut r))?;

    env.cursor = env.limit_backward;
    replace_each(env, &POSTLUDE, &["ã", "õ"], &mut r)
}

#[cfg(test)]
mod tests {
    use super::super::Algorithm;

    fn stem(word: &str) -> String {
        Algorithm::Portuguese.stem(word).unwrap()
    }

    #[test]
    fn plural_noun() {
        assert_eq!(stem("gatos"), "gat");
    }

    #[test]
    fn participle() {
        assert_eq!(stem("chegada"), "cheg");
    }

    #[test]
    fn adverb() {
        assert_eq!(stem("felizmente"), "feliz");
    }

    #[test]
    fn cedilla_is_dropped_after_verb_suffix() {
        assert_eq!(stem("começar"), "comec");
    }

    #[test]
    fn eira_keeps_ir() {
        assert_eq!(stem("brasileira"), "brasileir");
    }

    #[test]
    fn future_after_ir() {
        assert_eq!(stem("partira"), "part");
        assert_eq!(stem("partiras"), "part");
    }

    #[test]
    fn logia_in_r2() {
        assert_eq!(stem("antropologia"), "antropolog");
        assert_eq!(stem("antropologias"), "antropolog");
        // only the unaccented spelling is a suffix; "-a" goes as a residual
        assert_eq!(stem("amiglogía"), "amiglogí");
    }

    #[test]
    fn nasal_vowels_survive() {
        assert_eq!(stem("mãe"), "mã");
        assert!(!Algorithm::Portuguese.stem("pão").unwrap().contains('~'));
    }
}
