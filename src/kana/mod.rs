pub mod tables;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::KanaflashError;
use tables::{
    BASIC_HIRAGANA, BASIC_KATAKANA, DAKUTEN_HIRAGANA, DAKUTEN_KATAKANA, YOON_HIRAGANA,
    YOON_KATAKANA,
};

/// Writing system a character belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Hiragana,
    Katakana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Basic,
    Yoon,
    Dakuten,
    Handakuten,
}

/// Which scripts a random draw may pull from
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFilter {
    #[default]
    Hiragana,
    Katakana,
    Both,
}

impl ScriptFilter {
    pub fn display_name(&self) -> &'static str {
        match self {
            ScriptFilter::Hiragana => "Hiragana",
            ScriptFilter::Katakana => "Katakana",
            ScriptFilter::Both => "Hiragana & Katakana",
        }
    }

    fn includes(&self, script: Script) -> bool {
        matches!(
            (self, script),
            (ScriptFilter::Both, _)
                | (ScriptFilter::Hiragana, Script::Hiragana)
                | (ScriptFilter::Katakana, Script::Katakana)
        )
    }
}

/// A single flashcard: the kana glyph and its Hepburn reading.
///
/// Values only ever come from the static tables, so they are `Copy` and
/// compare by glyph and romaji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct KanaCharacter {
    pub glyph: &'static str,
    pub romaji: &'static str,
    pub script: Script,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Characters are read back from their glyph alone, resolved against the tables.
impl<'de> Deserialize<'de> for KanaCharacter {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let glyph = String::deserialize(d)?;
        find_by_glyph(&glyph).ok_or_else(|| D::Error::custom(format!("unknown kana: {glyph}")))
    }
}

fn tables_for(script: Script) -> [&'static [KanaCharacter]; 3] {
    match script {
        Script::Hiragana => [BASIC_HIRAGANA, DAKUTEN_HIRAGANA, YOON_HIRAGANA],
        Script::Katakana => [BASIC_KATAKANA, DAKUTEN_KATAKANA, YOON_KATAKANA],
    }
}

/// Collect the pool a random session draws from.
///
/// Order is fixed: hiragana before katakana, and within a script the basic
/// table, then dakuten/handakuten, then yōon.
pub fn all_characters_of_script(
    filter: ScriptFilter,
    include_yoon: bool,
    include_dakuten_handakuten: bool,
) -> Vec<KanaCharacter> {
    let mut pool = Vec::new();

    for script in [Script::Hiragana, Script::Katakana] {
        if !filter.includes(script) {
            continue;
        }
        let [basic, dakuten, yoon] = tables_for(script);
        pool.extend_from_slice(basic);
        if include_dakuten_handakuten {
            pool.extend_from_slice(dakuten);
        }
        if include_yoon {
            pool.extend_from_slice(yoon);
        }
    }

    pool
}

/// Every character in the dataset, in table order
pub fn all_kana() -> impl Iterator<Item = &'static KanaCharacter> {
    [Script::Hiragana, Script::Katakana]
        .into_iter()
        .flat_map(tables_for)
        .flat_map(|table| table.iter())
}

pub fn find_by_glyph(glyph: &str) -> Option<KanaCharacter> {
    all_kana().find(|k| k.glyph == glyph).copied()
}

/// Parse a user supplied list such as `"あ,い う"` into dataset entries,
/// keeping the given order and dropping repeats.
pub fn resolve_glyphs(input: &str) -> Result<Vec<KanaCharacter>, KanaflashError> {
    let mut resolved: Vec<KanaCharacter> = Vec::new();

    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let character =
            find_by_glyph(token).ok_or_else(|| KanaflashError::UnknownGlyph(token.to_string()))?;
        if !resolved.contains(&character) {
            resolved.push(character);
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashSet;

    #[test]
    fn test_table_sizes() {
        assert_eq!(BASIC_HIRAGANA.len(), 46);
        assert_eq!(BASIC_KATAKANA.len(), 46);
        assert_eq!(DAKUTEN_HIRAGANA.len(), 25);
        assert_eq!(DAKUTEN_KATAKANA.len(), 25);
        assert_eq!(YOON_HIRAGANA.len(), 33);
        assert_eq!(YOON_KATAKANA.len(), 33);
    }

    #[test]
    fn test_glyphs_are_unique() {
        let glyphs: HashSet<&str> = all_kana().map(|k| k.glyph).collect();
        assert_eq!(glyphs.len(), all_kana().count());
    }

    #[test]
    fn test_tables_carry_their_script() {
        for k in BASIC_HIRAGANA.iter().chain(YOON_HIRAGANA) {
            assert_eq!(k.script, Script::Hiragana);
        }
        for k in BASIC_KATAKANA.iter().chain(DAKUTEN_KATAKANA) {
            assert_eq!(k.script, Script::Katakana);
        }
    }

    #[test]
    fn test_basic_hiragana_only() {
        let pool = all_characters_of_script(ScriptFilter::Hiragana, false, false);
        assert_eq!(pool.len(), 46);
        assert_eq!(pool[0].glyph, "あ");
        assert!(pool.iter().all(|k| k.category == Some(Category::Basic)));
    }

    #[test]
    fn test_katakana_with_everything() {
        let pool = all_characters_of_script(ScriptFilter::Katakana, true, true);
        assert_eq!(pool.len(), 46 + 25 + 33);
        // dakuten block comes before yōon
        assert_eq!(pool[46].glyph, "ガ");
        assert_eq!(pool[46 + 25].glyph, "キャ");
        assert!(pool.iter().all(|k| k.script == Script::Katakana));
    }

    #[test]
    fn test_both_scripts_hiragana_first() {
        let pool = all_characters_of_script(ScriptFilter::Both, false, true);
        assert_eq!(pool.len(), 2 * (46 + 25));
        assert_eq!(pool[0].script, Script::Hiragana);
        assert_eq!(pool[46 + 25].glyph, "ア");
    }

    #[test]
    fn test_yoon_without_dakuten() {
        let pool = all_characters_of_script(ScriptFilter::Hiragana, true, false);
        assert_eq!(pool.len(), 46 + 33);
        assert_eq!(pool[46].glyph, "きゃ");
    }

    #[test]
    fn test_pool_is_deterministic() {
        let a = all_characters_of_script(ScriptFilter::Both, true, true);
        let b = all_characters_of_script(ScriptFilter::Both, true, true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_find_by_glyph() {
        let shi = find_by_glyph("し").unwrap();
        assert_eq!(shi.romaji, "shi");
        assert_eq!(shi.script, Script::Hiragana);

        assert_eq!(find_by_glyph("ぴょ").unwrap().romaji, "pyo");
        assert!(find_by_glyph("x").is_none());
    }

    #[test]
    fn test_resolve_glyphs_mixed_separators() {
        let chars = resolve_glyphs("あ, い う,,カ").unwrap();
        let glyphs: Vec<&str> = chars.iter().map(|k| k.glyph).collect();
        assert_eq!(glyphs, vec!["あ", "い", "う", "カ"]);
    }

    #[test]
    fn test_resolve_glyphs_drops_repeats() {
        let chars = resolve_glyphs("あ あ い").unwrap();
        assert_eq!(chars.len(), 2);
    }

    #[test]
    fn test_resolve_glyphs_unknown() {
        assert_matches!(
            resolve_glyphs("あ,zz"),
            Err(KanaflashError::UnknownGlyph(ref g)) if g == "zz"
        );
    }

    #[test]
    fn test_resolve_glyphs_empty_input() {
        assert!(resolve_glyphs("  ").unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_from_glyph() {
        let k: KanaCharacter = serde_json::from_str(r#""ぴょ""#).unwrap();
        assert_eq!(k.romaji, "pyo");
        assert_eq!(k.script, Script::Hiragana);
        assert!(serde_json::from_str::<KanaCharacter>(r#""q""#).is_err());
        assert!(serde_json::from_str::<KanaCharacter>("7").is_err());
    }

    #[test]
    fn test_script_filter_display_name() {
        assert_eq!(ScriptFilter::Both.display_name(), "Hiragana & Katakana");
        assert_eq!(ScriptFilter::Katakana.to_string(), "Katakana");
    }
}
