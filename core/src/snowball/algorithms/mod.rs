// Neos is an open source web search engine.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is originated from Stract, which is licensed under the GNU Affero General Public License.

//! Rule programs for the supported languages.
//!
//! Each program follows the published Snowball algorithm of its language:
//! a prelude, the computation of the regions, the ordered suffix steps run
//! backwards from the end of the word and a postlude.

mod english;
mod french;
mod german;
mod italian;
mod portuguese;
mod russian;
mod spanish;

use super::{AmongTable, Grouping, SnowballEnv};
use crate::Result;

/// Region boundaries of a word.
///
/// A suffix may only be removed when it starts at or after the boundary of
/// the region its rule consults. Boundaries a language has no use for are 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub pv: usize,
    pub p1: usize,
    pub p2: usize,
}

impl Regions {
    fn unset(env: &SnowballEnv) -> Self {
        Self {
            pv: env.limit,
            p1: env.limit,
            p2: env.limit,
        }
    }

    #[inline]
    fn rv(&self, env: &SnowballEnv) -> bool {
        self.pv <= env.cursor
    }

    #[inline]
    fn r1(&self, env: &SnowballEnv) -> bool {
        self.p1 <= env.cursor
    }

    #[inline]
    fn r2(&self, env: &SnowballEnv) -> bool {
        self.p2 <= env.cursor
    }
}

type Table = AmongTable<Regions>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    English,
    French,
    German,
    Italian,
    Portuguese,
    Russian,
    Spanish,
}

impl Algorithm {
    pub fn stem(&self, word: &str) -> Result<String> {
        let mut env = SnowballEnv::new(word);

        match self {
            Algorithm::English => english::stem(&mut env)?,
            Algorithm::French => french::stem(&mut env)?,
            Algorithm::German => german::stem(&mut env)?,
            Algorithm::Italian => italian::stem(&mut env)?,
            Algorithm::Portuguese => portuguese::stem(&mut env)?,
            Algorithm::Russian => russian::stem(&mut env)?,
            Algorithm::Spanish => spanish::stem(&mut env)?,
        }

        Ok(env.get_current())
    }

    /// The regions computed for `word` after the prelude has run.
    pub fn regions(&self, word: &str) -> Result<Regions> {
        let mut env = SnowballEnv::new(word);

        match self {
            Algorithm::English => english::regions(&mut env),
            Algorithm::French => french::regions(&mut env),
            Algorithm::German => german::regions(&mut env),
            Algorithm::Italian => italian::regions(&mut env),
            Algorithm::Portuguese => portuguese::regions(&mut env),
            Algorithm::Russian => russian::regions(&mut env),
            Algorithm::Spanish => spanish::regions(&mut env),
        }
    }
}

/// RV as defined for Spanish, Italian and Portuguese: after the next vowel
/// when the second letter is a consonant, after the next consonant when the
/// first two letters are vowels, otherwise after the third letter.
fn mark_rv(env: &mut SnowballEnv, v: &Grouping) -> Option<usize> {
    let start = env.cursor;

    if env.in_grouping(v) {
        let after_first = env.cursor;
        if env.out_grouping(v) && env.go_past_grouping(v) {
            return Some(env.cursor);
        }

        env.cursor = after_first;
        if env.in_grouping(v) && env.go_past_non_grouping(v) {
            return Some(env.cursor);
        }
    }

    env.cursor = start;
    if env.out_grouping(v) {
        let after_first = env.cursor;
        if env.out_grouping(v) && env.go_past_grouping(v) {
            return Some(env.cursor);
        }

        env.cursor = after_first;
        if env.in_grouping(v) && env.next() {
            return Some(env.cursor);
        }
    }

    None
}

/// R1 and R2: each starts after the first non-vowel following a vowel,
/// R2 searched from the start of R1.
fn mark_r1_r2(env: &mut SnowballEnv, v: &Grouping, regions: &mut Regions) {
    if !(env.go_past_grouping(v) && env.go_past_non_grouping(v)) {
        return;
    }
    regions.p1 = env.cursor;

    if !(env.go_past_grouping(v) && env.go_past_non_grouping(v)) {
        return;
    }
    regions.p2 = env.cursor;
}

/// `[substring]` in backward mode: match `table` before the cursor and set
/// the slice around the match.
fn find_suffix(env: &mut SnowballEnv, table: &Table, regions: &mut Regions) -> i32 {
    env.ket = env.cursor;
    let among_var = env.find_among_b(table, regions);
    if among_var != 0 {
        env.bra = env.cursor;
    }

    among_var
}

/// `setlimit tomark mark for ([substring])`: like [`find_suffix`] without
/// crossing `mark`.
fn find_suffix_within(
    env: &mut SnowballEnv,
    mark: usize,
    table: &Table,
    regions: &mut Regions,
) -> i32 {
    if env.cursor < mark {
        return 0;
    }

    let limit_backward = env.limit_backward;
    env.limit_backward = mark;
    let among_var = find_suffix(env, table, regions);
    env.limit_backward = limit_backward;

    among_var
}

/// Switch to backward mode over the whole word.
fn backwards(env: &mut SnowballEnv) {
    env.limit_backward = env.cursor;
    env.cursor = env.limit;
}

/// Run `f` with `limit_backward` raised to `mark` (`setlimit tomark mark for f`).
fn with_limit_backward<F>(env: &mut SnowballEnv, mark: usize, f: F) -> Result<bool>
where
    F: FnOnce(&mut SnowballEnv) -> Result<bool>,
{
    if env.cursor < mark {
        return Ok(false);
    }

    let limit_backward = env.limit_backward;
    env.limit_backward = mark;
    let res = f(env);
    env.limit_backward = limit_backward;

    res
}

/// `repeat ( [substring] among ( ... '' (next) ) )`: result `i` replaces the
/// matched characters with `replacements[i - 1]`, any other result skips one
/// character.
fn replace_each(
    env: &mut SnowballEnv,
    table: &Table,
    replacements: &[&str],
    regions: &mut Regions,
) -> Result<()> {
    loop {
        let v = env.cursor;
        env.bra = env.cursor;

        let among_var = env.find_among(table, regions);
        if among_var == 0 {
            env.cursor = v;
            return Ok(());
        }
        env.ket = env.cursor;

        match replacements.get(among_var as usize - 1) {
            Some(replacement) => env.slice_from(replacement)?,
            None => {
                if !env.next() {
                    env.cursor = v;
                    return Ok(());
                }
            }
        }
    }
}

/// `['at'] R2 delete` following `-iv`, shared by the Romance programs.
fn remove_at_in_r2(env: &mut SnowballEnv, regions: &Regions) -> Result<bool> {
    env.ket = env.cursor;
    if !env.eq_s_b("at") {
        return Ok(false);
    }
    env.bra = env.cursor;
    if !regions.r2(env) {
        return Ok(false);
    }
    env.slice_del()?;

    Ok(true)
}

/// Run `step` as a `try`: on failure the cursor goes back to where it was,
/// counted from `limit`.
fn attempt<F>(env: &mut SnowballEnv, step: F) -> Result<()>
where
    F: FnOnce(&mut SnowballEnv) -> Result<bool>,
{
    let v = env.limit - env.cursor;
    if !step(env)? {
        env.cursor = env.limit - v;
    }

    Ok(())
}

/// Run `step` as a `do`: the cursor goes back to where it was, counted from
/// `limit`, whatever the outcome.
fn run<F>(env: &mut SnowballEnv, step: F) -> Result<bool>
where
    F: FnOnce(&mut SnowballEnv) -> Result<bool>,
{
    let v = env.limit - env.cursor;
    let res = step(env);
    env.cursor = env.limit - v;

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [Algorithm; 7] = [
        Algorithm::English,
        Algorithm::French,
        Algorithm::German,
        Algorithm::Italian,
        Algorithm::Portuguese,
        Algorithm::Russian,
        Algorithm::Spanish,
    ];

    #[test]
    fn empty_word() {
        for algorithm in ALL {
            assert_eq!(algorithm.stem("").unwrap(), "", "{algorithm:?}");
            assert_eq!(algorithm.regions("").unwrap(), Regions::default());
        }
    }

    #[test]
    fn single_letters_are_kept() {
        for algorithm in ALL {
            for word in ["a", "b", "x", "я"] {
                assert_eq!(algorithm.stem(word).unwrap(), word, "{algorithm:?}");
            }
        }
    }

    #[test]
    fn romance_rv() {
        static V: Grouping = Grouping::new(&['a', 'e', 'i', 'o', 'u']);

        // consonant as second letter: after the next vowel
        let mut env = SnowballEnv::new("olivo");
        assert_eq!(mark_rv(&mut env, &V), Some(3));
        // two leading vowels: after the next consonant
        let mut env = SnowballEnv::new("aureo");
        assert_eq!(mark_rv(&mut env, &V), Some(3));
        // consonant-vowel: after the third letter
        let mut env = SnowballEnv::new("macho");
        assert_eq!(mark_rv(&mut env, &V), Some(3));
        // consonant-consonant: after the next vowel
        let mut env = SnowballEnv::new("trabajo");
        assert_eq!(mark_rv(&mut env, &V), Some(3));
        let mut env = SnowballEnv::new("ma");
        assert_eq!(mark_rv(&mut env, &V), None);
    }

    #[test]
    fn r1_r2() {
        static V: Grouping = Grouping::new(&['a', 'e', 'i', 'o', 'u', 'y']);

        let mut env = SnowballEnv::new("beautiful");
        let mut regions = Regions::unset(&env);
        mark_r1_r2(&mut env, &V, &mut regions);
        assert_eq!((regions.p1, regions.p2), (5, 7));

        let mut env = SnowballEnv::new("beauty");
        let mut regions = Regions::unset(&env);
        mark_r1_r2(&mut env, &V, &mut regions);
        assert_eq!((regions.p1, regions.p2), (5, 6));
    }

    proptest! {
        #[test]
        fn regions_are_ordered(word in "[a-zà-ÿ]{0,14}|[а-яё]{0,14}") {
            for algorithm in ALL {
                let regions = algorithm.regions(&word).unwrap();
                // preludes may spell one letter with two
                let len = 2 * word.chars().count();

                prop_assert!(regions.pv <= len);
                prop_assert!(regions.p1 <= regions.p2);
                prop_assert!(regions.p2 <= len);
            }
        }

        #[test]
        fn stemming_is_deterministic(word in "[a-zà-ÿ]{0,14}|[а-яё]{0,14}") {
            for algorithm in ALL {
                let first = algorithm.stem(&word).unwrap();
                let second = algorithm.stem(&word).unwrap();
                prop_assert_eq!(first, second);
            }
        }

        #[test]
        fn stems_are_never_longer_than_twice_the_word(word in "[a-zà-ÿ]{0,14}") {
            for algorithm in ALL {
                let stem = algorithm.stem(&word).unwrap();
                prop_assert!(stem.chars().count() <= 2 * word.chars().count() + 1);
            }
        }
    }

    fn rust_stemmer(algorithm: Algorithm) -> rust_stemmers::Stemmer {
        rust_stemmers::Stemmer::create(match algorithm {
            Algorithm::English => rust_stemmers::Algorithm::English,
            Algorithm::French => rust_stemmers::Algorithm::French,
            Algorithm::German => rust_stemmers::Algorithm::German,
            Algorithm::Italian => rust_stemmers::Algorithm::Italian,
            Algorithm::Portuguese => rust_stemmers::Algorithm::Portuguese,
            Algorithm::Russian => rust_stemmers::Algorithm::Russian,
            Algorithm::Spanish => rust_stemmers::Algorithm::Spanish,
        })
    }

    fn same_as_rust_stemmers(algorithm: Algorithm, word: &str) -> Result<(), TestCaseError> {
        let ours = algorithm.stem(word).unwrap();
        let theirs = rust_stemmer(algorithm).stem(word).into_owned();
        prop_assert_eq!(ours, theirs, "{:?} {:?}", algorithm, word);
        Ok(())
    }

    const WORDS: &[(Algorithm, &[&str])] = &[
        (
            Algorithm::English,
            &[
                "generously", "running", "nationalities", "caresses", "hopefulness", "ponies",
                "agreed", "skies", "dying", "news", "communication", "relational", "sensibility",
            ],
        ),
        (
            Algorithm::French,
            &[
                "automatiquement", "politiquement", "magnifiquement", "continuellement",
                "chanterions", "majestueusement", "nationalité", "finissaient", "chevaux",
                "joyeuse", "biologie", "acceptables", "grandissement",
            ],
        ),
        (
            Algorithm::German,
            &[
                "häuser", "ergebnisse", "gelegenheiten", "aufeinanderfolgenden", "schönheit",
                "freundlichkeit", "kategorisch", "spielenden", "straße", "ordnungen",
            ],
        ),
        (
            Algorithm::Italian,
            &[
                "abbandonata", "nazionalità", "velocemente", "cantando", "giornalista",
                "arrivederci", "ragazze", "biologia", "amichevole", "riconoscimento",
            ],
        ),
        (
            Algorithm::Portuguese,
            &[
                "partira", "partiras", "antropologia", "amiglogía", "brasileira", "felizmente",
                "chegada", "informações", "possibilidades", "começar", "corações", "amavam",
            ],
        ),
        (
            Algorithm::Russian,
            &[
                "красивая", "делаешь", "гордость", "длинный", "вкусненького", "читавшись",
                "остановились", "бесконечности", "величайшее", "деревьями",
            ],
        ),
        (
            Algorithm::Spanish,
            &[
                "gatos", "rápidamente", "organización", "biologías", "corriendo", "habíamos",
                "posibilidades", "cantaremos", "relojes", "actividad",
            ],
        ),
    ];

    #[test]
    fn word_lists_match_rust_stemmers() {
        for (algorithm, words) in WORDS {
            for word in *words {
                same_as_rust_stemmers(*algorithm, word).unwrap();
            }
        }
    }

    const ENGLISH_SUFFIXES: &[&str] = &[
        "", "s", "es", "ies", "ied", "ed", "eed", "ing", "ly", "ation", "ational", "ness",
        "fulness", "ousness", "iveness", "alism", "aliti", "biliti", "ization", "ize", "ful",
        "ative", "ible", "ement", "ent", "ism", "ion", "logi", "li", "y", "e", "ll",
    ];

    const FRENCH_SUFFIXES: &[&str] = &[
        "", "ement", "ements", "iquement", "icement", "ablement", "ivement", "ité", "ités",
        "abilité", "ation", "ations", "atrice", "ateur", "logie", "ance", "ence", "eux",
        "euse", "issement", "amment", "emment", "ment", "if", "ive", "eaux", "aux", "erions",
        "issons", "irait", "ions", "ées", "ez", "ent", "ier", "ière", "e", "es", "s",
    ];

    const GERMAN_SUFFIXES: &[&str] = &[
        "", "em", "ern", "er", "e", "en", "es", "s", "est", "st", "end", "ung", "ig", "ik",
        "isch", "lich", "heit", "keit", "ungen", "lichkeit", "igkeit",
    ];

    const ITALIAN_SUFFIXES: &[&str] = &[
        "", "amento", "amenti", "azione", "azioni", "atrice", "logia", "uzione", "enza", "ità",
        "ivo", "iva", "mente", "abile", "ando", "endo", "are", "ere", "ire", "ato", "ita",
        "issimo", "ista", "osi", "e", "i", "o", "a", "che", "ghi", "iamo",
    ];

    const PORTUGUESE_SUFFIXES: &[&str] = &[
        "", "ira", "iras", "logia", "logias", "ação", "ações", "amento", "mente", "amente",
        "idade", "idades", "ivo", "iva", "ência", "ava", "aram", "ando", "ado", "ida", "ia",
        "eza", "ismo", "ável", "ível", "ista", "oso", "os", "a", "e", "i", "o", "ção",
    ];

    const RUSSIAN_SUFFIXES: &[&str] = &[
        "", "ость", "ами", "ями", "ий", "ый", "ая", "ого", "ему", "ешь", "ить", "ал", "ивш",
        "ывшись", "ейш", "ейше", "нн", "ь", "и", "ов", "ения", "ск", "ующий",
    ];

    const SPANISH_SUFFIXES: &[&str] = &[
        "", "amiento", "imientos", "ación", "aciones", "logía", "logías", "ución", "encia",
        "amente", "mente", "idad", "ivo", "iva", "ando", "iendo", "ar", "er", "ir", "aba",
        "ían", "aremos", "ye", "os", "a", "e", "o", "ión", "able", "ible",
    ];

    proptest! {
        #[test]
        fn english_matches_rust_stemmers(
            prefix in "[a-z]{1,7}",
            suffix in prop::sample::select(ENGLISH_SUFFIXES),
        ) {
            same_as_rust_stemmers(Algorithm::English, &format!("{prefix}{suffix}"))?;
        }

        #[test]
        fn french_matches_rust_stemmers(
            prefix in "[a-zéèêàâîôûç]{1,7}",
            suffix in prop::sample::select(FRENCH_SUFFIXES),
        ) {
            same_as_rust_stemmers(Algorithm::French, &format!("{prefix}{suffix}"))?;
        }

        #[test]
        fn german_matches_rust_stemmers(
            prefix in "[a-zäöü]{1,7}",
            suffix in prop::sample::select(GERMAN_SUFFIXES),
        ) {
            same_as_rust_stemmers(Algorithm::German, &format!("{prefix}{suffix}"))?;
        }

        #[test]
        fn italian_matches_rust_stemmers(
            prefix in "[a-zàèéìòù]{1,7}",
            suffix in prop::sample::select(ITALIAN_SUFFIXES),
        ) {
            same_as_rust_stemmers(Algorithm::Italian, &format!("{prefix}{suffix}"))?;
        }

        #[test]
        fn portuguese_matches_rust_stemmers(
            prefix in "[a-zãõçáéíóúâêô]{1,7}",
            suffix in prop::sample::select(PORTUGUESE_SUFFIXES),
        ) {
            same_as_rust_stemmers(Algorithm::Portuguese, &format!("{prefix}{suffix}"))?;
        }

        // ё is left out: it is folded into е before stemming
        #[test]
        fn russian_matches_rust_stemmers(
            prefix in "[а-я]{1,7}",
            suffix in prop::sample::select(RUSSIAN_SUFFIXES),
        ) {
            same_as_rust_stemmers(Algorithm::Russian, &format!("{prefix}{suffix}"))?;
        }

        #[test]
        fn spanish_matches_rust_stemmers(
            prefix in "[a-záéíóúñü]{1,7}",
            suffix in prop::sample::select(SPANISH_SUFFIXES),
        ) {
            same_as_rust_stemmers(Algorithm::Spanish, &format!("{prefix}{suffix}"))?;
        }
    }
}
