//! Text cleanup applied to every raw description before anything else looks at
//! it. The result is uppercase, single-spaced and stable under re-application.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Word-level corrections, applied in order. No replacement may itself match a
/// pattern of this table.
pub const CORRECTIONS: &[(&str, &str)] = &[
    // families
    (r"\bGERBERRA\b", "GERBERA"),
    (r"\bGERBEA\b", "GERBERA"),
    (r"\bORQUIDIA\b", "ORQUÍDEA"),
    (r"\bORQUIDEA\b", "ORQUÍDEA"),
    (r"\bCRISANTEMO\b", "CRISÂNTEMO"),
    (r"\bCRISANTHEMO\b", "CRISÂNTEMO"),
    (r"\bALSTROMERIA\b", "ALSTROEMÉRIA"),
    (r"\bALSTROEMERIA\b", "ALSTROEMÉRIA"),
    (r"\bLISIANTUS\b", "LISIANTHUS"),
    (r"\bKALANCHOE?\b", "KALANCHOË"),
    (r"\bANTURIO\b", "ANTÚRIO"),
    (r"\bHORTENCIA\b", "HORTÊNSIA"),
    (r"\bHORTENSIA\b", "HORTÊNSIA"),
    (r"\bGYPSOPHILA\b", "GIPSOFILA"),
    // varieties and colors
    (r"\bBCO\b", "BRANCO"),
    (r"\bBCA\b", "BRANCA"),
    (r"\bVERM\b", "VERMELHO"),
    (r"\bVERMELH\b", "VERMELHO"),
    (r"\bAMAR\b", "AMARELO"),
    (r"\bLARANJ\b", "LARANJA"),
    (r"\bLILAS\b", "LILÁS"),
    (r"\bSALMAO\b", "SALMÃO"),
    // units and qualifiers
    (r"\bDI[AÂ]M(?:ETRO)?\b", "DIAM"),
    (r"\bCMS\b", "CM"),
    (r"\bMINIMO\b", "MIN"),
    (r"\bMÍNIMO\b", "MIN"),
    (r"\bMAXIMO\b", "MAX"),
    (r"\bMÁXIMO\b", "MAX"),
    (r"\bHST\b", "HT"),
    (r"\bHTS\b", "HT"),
    (r"\bFLORES\b", "FLS"),
    (r"\bFL\b", "FLS"),
    (r"\bGRS\b", "GR"),
];

static CORRECTION_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    CORRECTIONS
        .iter()
        .map(|(pat, rep)| (Regex::new(pat).unwrap(), *rep))
        .collect()
});

static GLUED_QUALIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(MIN|MAX|DIAM)(\d)").unwrap());
static COMPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([<>])\s*(\d)").unwrap());
static PLUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^\d.,])(\d+(?:[.,]\d+)*(?:/\d+)?)\s*\++").unwrap()
});
static REPEATED_MIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bMIN(?:\s+MIN)+\b").unwrap());
static POTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bPOTE\s*(\d+)\b").unwrap());
static CUIA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bCUIA\s*(\d+)\b").unwrap());
static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub fn normalize(raw: &str) -> String {
    // accented keywords and corrections are written precomposed
    let composed: String = raw.to_uppercase().nfc().collect();
    let mut text = scrub_punctuation(&composed);

    for (re, rep) in CORRECTION_RES.iter() {
        if re.is_match(&text) {
            text = re.replace_all(&text, *rep).into_owned();
        }
    }

    text = GLUED_QUALIFIER_RE.replace_all(&text, "$1 $2").into_owned();
    text = COMPARATOR_RE.replace_all(&text, "$1 $2").into_owned();
    // "11+" means "at least 11"; rewriting it keeps one surface form per quantity
    text = PLUS_RE.replace_all(&text, "${1}MIN $2 ").into_owned();
    text = text.replace('+', " ");
    text = REPEATED_MIN_RE.replace_all(&text, "MIN").into_owned();
    text = POTE_RE.replace_all(&text, "P$1").into_owned();
    text = CUIA_RE.replace_all(&text, "C$1").into_owned();

    SPACES_RE.replace_all(text.trim(), " ").into_owned()
}

/// `text` with its diacritics removed: `Lírio` becomes `Lirio`, `Ç` becomes `C`.
pub fn strip_accents(text: &str) -> String {
    text.nfd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect()
}

/// Drops noise characters. `.` and `,` survive only between two digits.
fn scrub_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| match c {
            '"' | '\'' | '*' | '_' | '#' | ';' | '|' | '!' | '?' => ' ',
            '.' | ',' => {
                let prev = i.checked_sub(1).and_then(|j| chars.get(j));
                let next = chars.get(i + 1);
                if prev.is_some_and(char::is_ascii_digit) && next.is_some_and(char::is_ascii_digit)
                {
                    c
                } else {
                    ' '
                }
            }
            c if c.is_whitespace() => ' ',
            c => c,
        })
        .collect()
}
