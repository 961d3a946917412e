//! Colors are read from the full normalized text (past the family token).
//! Several matches are joined with `/` in table order.

use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use crate::parser::text::{family_token_end, ExtractionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Pt,
    En,
}

/// `(pattern, canonical color, language)`. Portuguese words are removed from
/// the label once a color is known; English ones are often part of a variety
/// name ("Red Naomi") and stay.
pub const COLORS: &[(&str, &str, Lang)] = &[
    ("VERMELH[OA]S?", "VERMELHO", Lang::Pt),
    ("RED", "VERMELHO", Lang::En),
    ("BRANC[OA]S?", "BRANCO", Lang::Pt),
    ("WHITE", "BRANCO", Lang::En),
    ("AMAREL[OA]S?", "AMARELO", Lang::Pt),
    ("YELLOW", "AMARELO", Lang::En),
    ("ROSA", "ROSA", Lang::Pt),
    ("PINK", "ROSA", Lang::En),
    ("LARANJA", "LARANJA", Lang::Pt),
    ("ORANGE", "LARANJA", Lang::En),
    ("LIL[AÁ]S", "LILÁS", Lang::Pt),
    ("LILAC", "LILÁS", Lang::En),
    ("ROX[OA]S?", "ROXO", Lang::Pt),
    ("PURPLE", "ROXO", Lang::En),
    ("AZUL", "AZUL", Lang::Pt),
    ("BLUE", "AZUL", Lang::En),
    ("VERDE", "VERDE", Lang::Pt),
    ("GREEN", "VERDE", Lang::En),
    ("SALM[AÃ]O", "SALMÃO", Lang::Pt),
    ("SALMON", "SALMÃO", Lang::En),
    ("CREME", "CREME", Lang::Pt),
    ("CREAM", "CREME", Lang::En),
    ("BORD[OÔ]", "BORDÔ", Lang::Pt),
    ("MIST[OA]S?|SORTID[OA]S?", "MISTO", Lang::Pt),
    ("MIX", "MISTO", Lang::En),
];

static COLOR_RES: LazyLock<Vec<(Regex, &'static str, Lang)>> = LazyLock::new(|| {
    COLORS
        .iter()
        .map(|(pat, name, lang)| {
            let re = Regex::new(&format!(r"\b(?:{})\b", pat)).unwrap();
            (re, *name, *lang)
        })
        .collect()
});

/// All color patterns as one alternation, for rules that look for numbers
/// next to a color word.
pub fn alternation() -> String {
    COLORS.iter().map(|(pat, _, _)| *pat).join("|")
}

/// Canonical colors named in `text` past its first token.
pub fn colors_in(text: &str) -> Vec<&'static str> {
    let offset = family_token_end(text);
    COLOR_RES
        .iter()
        .filter(|(re, _, _)| re.find_at(text, offset).is_some())
        .map(|(_, name, _)| *name)
        .unique()
        .collect()
}

/// Pattern-based color, looked up on the untouched text.
pub fn extract(state: &ExtractionState) -> Option<String> {
    let found = colors_in(state.original());
    if found.is_empty() {
        None
    } else {
        Some(found.join("/"))
    }
}

/// Drops Portuguese color words from `remaining`, keeping the family token.
pub fn strip_portuguese(state: &mut ExtractionState) -> Vec<String> {
    COLOR_RES
        .iter()
        .filter(|(_, _, lang)| *lang == Lang::Pt)
        .flat_map(|(re, _, _)| state.remove_after_family(re))
        .collect()
}
