// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

use once_cell::sync::Lazy;

use super::{attempt, backwards, find_suffix, replace_each, run, with_limit_backward, Regions, Table};
use crate::snowball::{Grouping, SnowballEnv};
use crate::Result;

static V: Grouping = Grouping::new(&['а', 'е', 'и', 'о', 'у', 'ы', 'э', 'ю', 'я']);

static YO: Lazy<Table> = Lazy::new(|| Table::forward(&[("", 2), ("ё", 1)]));

static PERFECTIVE_GERUND: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("в", 1),
        ("вши", 1),
        ("вшись", 1),
        ("ив", 2),
        ("ивши", 2),
        ("ившись", 2),
        ("ыв", 2),
        ("ывши", 2),
        ("ывшись", 2),
    ])
});

static ADJECTIVE: Lazy<Table> = Lazy::new(|| {
    Table::backward(
        &[
            "ее", "ие", "ые", "ое", "ими", "ыми", "ей", "ий", "ый", "ой", "ем", "им", "ым", "ом",
            "его", "ого", "ему", "ому", "их", "ых", "ую", "юю", "ая", "яя", "ою", "ею",
        ]
        .map(|suffix| (suffix, 1)),
    )
});

static PARTICIPLE: Lazy<Table> = Lazy::new(|| {
    Table::backward(&[
        ("ем", 1),
        ("нн", 1),
        ("вш", 1),
        ("ющ", 1),
        ("щ", 1),
        ("ивш", 2),
        ("ывш", 2),
        ("ующ", 2),
    ])
});

static REFLEXIVE: Lazy<Table> = Lazy::new(|| Table::backward(&[("ся", 1), ("сь", 1)]));

static VERB: Lazy<Table> = Lazy::new(|| {
    let after_a = [
        "ла", "на", "ете", "йте", "ли", "й", "л", "ем", "н", "ло", "но", "ет", "ют", "ны", "ть",
        "ешь", "нно",
    ];
    let deleted = [
        "ила", "ыла", "ена", "ейте", "уйте", "ите", "или", "ыли", "ей", "уй", "ил", "ыл", "им",
        "ым", "ен", "ило", "ыло", "ено", "ят", "ует", "уют", "ит", "ыт", "ены", "ить", "ыть",
        "ишь", "ую", "ю",
    ];

    let mut rows: Vec<_> = after_a.into_iter().map(|suffix| (suffix, 1)).collect();
    rows.extend(deleted.into_iter().map(|suffix| (suffix, 2)));

    Table::backward(&rows)
});

static NOUN: Lazy<Table> = Lazy::new(|| {
    Table::backward(
        &[
            "а", "ев", "ов", "ие", "ье", "е", "иями", "ями", "ами", "еи", "ии", "и", "ией", "ей",
            "ой", "ий", "й", "иям", "ям", "ием", "ем", "ам", "ом", "о", "у", "ах", "иях", "ях",
            "ы", "ь", "ию", "ью", "ю", "ия", "ья", "я",
        ]
        .map(|suffix| (suffix, 1)),
    )
});

static DERIVATIONAL: Lazy<Table> = Lazy::new(|| Table::backward(&[("ост", 1), ("ость", 1)]));

static TIDY_UP: Lazy<Table> =
    Lazy::new(|| Table::backward(&[("ейш", 1), ("ейше", 1), ("н", 2), ("ь", 3)]));

fn mark_regions(env: &mut SnowballEnv) -> Regions {
    let mut r = Regions::unset(env);
    let start = env.cursor;

    if env.go_past_grouping(&V) {
        r.pv = env.cursor;

        if env.go_past_non_grouping(&V) {
            r.p1 = env.cursor;

            if env.go_past_grouping(&V) && env.go_past_non_grouping(&V) {
                r.p2 = env.cursor;
            }
        }
    }
    env.cursor = start;

    r
}

/// The slice matched after an `а` or `я`, which stays.
fn delete_after_a(env: &mut SnowballEnv) -> Result<bool> {
    let v = env.limit - env.cursor;
    if !env.eq_s_b("а") {
        env.cursor = env.limit - v;
        if !env.eq_s_b("я") {
            return Ok(false);
        }
    }
    env.slice_del()?;

    Ok(true)
}

fn delete_matched(
    env: &mut SnowballEnv,
    table: &Table,
    r: &mut Regions,
) -> Result<bool> {
    match find_suffix(env, table, r) {
        1 => delete_after_a(env),
        2 => {
            env.slice_del()?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn adjectival(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    if find_suffix(env, &ADJECTIVE, r) == 0 {
        return Ok(false);
    }
    env.slice_del()?;

    attempt(env, |env| delete_matched(env, &PARTICIPLE, r))?;

    Ok(true)
}

fn delete_any(env: &mut SnowballEnv, table: &Table, r: &mut Regions) -> Result<bool> {
    if find_suffix(env, table, r) == 0 {
        return Ok(false);
    }
    env.slice_del()?;

    Ok(true)
}

fn inflection(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    let v = env.limit - env.cursor;
    if delete_matched(env, &PERFECTIVE_GERUND, r)? {
        return Ok(true);
    }
    env.cursor = env.limit - v;

    attempt(env, |env| delete_any(env, &REFLEXIVE, r))?;

    let v = env.limit - env.cursor;
    if adjectival(env, r)? {
        return Ok(true);
    }
    env.cursor = env.limit - v;
    if delete_matched(env, &VERB, r)? {
        return Ok(true);
    }
    env.cursor = env.limit - v;
    delete_any(env, &NOUN, r)
}

fn tidy_up(env: &mut SnowballEnv, r: &mut Regions) -> Result<bool> {
    match find_suffix(env, &TIDY_UP, r) {
        1 => {
            env.slice_del()?;
            env.ket = env.cursor;
            if !env.eq_s_b("н") {
                return Ok(false);
            }
            env.bra = env.cursor;
            if !env.eq_s_b("н") {
                return Ok(false);
            }
            env.slice_del()?;
        }
        2 => {
            if !env.eq_s_b("н") {
                return Ok(false);
            }
            env.slice_del()?;
        }
        3 => env.slice_del()?,
        _ => return Ok(false),
    }

    Ok(true)
}

pub(super) fn regions(env: &mut SnowballEnv) -> Result<Regions> {
    let mut scratch = Regions::default();
    replace_each(env, &YO, &["е"], &mut scratch)?;
    env.cursor = 0;

    Ok(mark_regions(env))
}

pub(super) fn stem(env: &mut SnowballEnv) -> Result<()> {
    let mut r = regions(env)?;

    backwards(env);
    let pv = r.pv;
    with_limit_backward(env, pv, |env| {
        run(env, |env| inflection(env, &mut r))?;
        attempt(env, |env| {
            env.ket = env.cursor;
            if !env.eq_s_b("и") {
                return Ok(false);
            }
            env.bra = env.cursor;
            env.slice_del()?;
            Ok(true)
        })?;
        run(env, |env| {
            if find_suffix(env, &DERIVATIONAL, &mut r) == 0 || !r.r2(env) {
                return Ok(false);
            }
            env.slice_del()?;
            Ok(true)
        })?;
        run(env, |env| tidy_up(env, &mut r))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::Algorithm;

    fn stem(word: &str) -> String {
        Algorithm::Russian.stem(word).unwrap()
    }

    #[test]
    fn noun_ending() {
        assert_eq!(stem("книги"), "книг");
    }

    #[test]
    fn adjective_ending() {
        assert_eq!(stem("красивая"), "красив");
    }

    #[test]
    fn verb_ending_after_a() {
        assert_eq!(stem("делаешь"), "дела");
    }

    #[test]
    fn yo_is_folded() {
        assert_eq!(stem("ёлка"), "елк");
    }

    #[test]
    fn derivational_needs_r2() {
        assert_eq!(stem("гордость"), "гордост");
    }

    #[test]
    fn double_n_is_tidied() {
        assert_eq!(stem("длинный"), "длин");
    }

    #[test]
    fn regions() {
        let r = Algorithm::Russian.regions("гордость").unwrap();
        assert_eq!((r.pv, r.p1, r.p2), (2, 3, 6));

        // no vowel at all
        let r = Algorithm::Russian.regions("вств").unwrap();
        assert_eq!((r.pv, r.p1, r.p2), (4, 4, 4));
    }
}
