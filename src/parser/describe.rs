//! Builds the commercial description from whatever the extractors left in
//! `remaining`.
//!
//! The text is tidied token by token (structural unit/qualifier tokens and
//! empty fragments go), re-capitalized, abbreviations are expanded, and
//! immediately repeated words are collapsed. Structural tokens must never
//! survive into the label; tests and a debug assertion hold that line.

use std::sync::LazyLock;

use regex::Regex;

/// Tokens that are kept fully uppercase.
pub const KEEP_UPPERCASE: &[&str] = &["LED", "XL", "XXL", "II", "III", "IV", "UV", "PVC", "MDF"];

/// Lowercase connectives, unless they open the label.
pub const CONNECTIVES: &[&str] = &[
    "DE", "DA", "DO", "DAS", "DOS", "E", "COM", "EM", "NA", "NO", "NAS", "NOS", "PARA", "OF",
    "THE", "AND",
];

/// Unit and qualifier tokens whose values are already structured attributes.
pub const STRUCTURAL_TOKENS: &[&str] = &[
    "CM", "MM", "MIN", "MAX", "DIAM", "HASTES", "HAST", "HT", "HA", "H", "FLS", "F", "GRAMAS",
    "GRAMS", "GRAM", "GRA", "GR", "G", "C", "P",
];

/// Abbreviation expansions, applied in order on the capitalized label.
pub const EXPANSIONS: &[(&str, &str)] = &[
    // compound names first, before their parts are touched
    (r"\bBOCA DE LE[AÃ]O\b", "Boca de Leão"),
    (r"\bCOPO[- ]DE[- ]LEITE\b", "Copo-de-Leite"),
    (r"\bAVE DO PARA[IÍ]SO\b", "Ave do Paraíso"),
    (r"\bCOSTELA DE AD[AÃ]O\b", "Costela de Adão"),
    (r"\bLANCA DE S[AÃ]O JORGE\b", "Lança de São Jorge"),
    // families
    (r"\bGERB(?:ERA)?\b", "Gérbera"),
    (r"\bORQU?\b", "Orquídea"),
    (r"\bCRIS\b", "Crisântemo"),
    (r"\bALST\b", "Alstroeméria"),
    (r"\bLISI\b", "Lisianthus"),
    (r"\bKALA\b", "Kalanchoë"),
    (r"\bANTU\b", "Antúrio"),
    (r"\bHORT\b", "Hortênsia"),
    (r"\bTULI\b", "Tulipa"),
    (r"\bGIRA\b", "Girassol"),
    (r"\bGIPS\b", "Gipsofila"),
    (r"\bLIRIO\b", "Lírio"),
    (r"\bBEGONIA\b", "Begônia"),
    // varieties and packaging words
    (r"\bPHAL\b", "Phalaenopsis"),
    (r"\bDEND\b", "Dendrobium"),
    (r"\bSUC\b", "Suculenta"),
    (r"\bBUQUE\b", "Buquê"),
    (r"\bTERRARIO\b", "Terrário"),
    (r"\bCOLECAO\b", "Coleção"),
    (r"\bCERAMICA\b", "Cerâmica"),
];

static EXPANSION_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    EXPANSIONS
        .iter()
        .map(|(pat, rep)| (Regex::new(&format!("(?i){}", pat)).unwrap(), *rep))
        .collect()
});

/// Families whose display name spans several words, keyed by product base.
pub const FAMILY_LABELS: &[(&str, &str)] = &[
    ("boca", "Boca de Leão"),
    ("copo", "Copo-de-Leite"),
    ("ave", "Ave do Paraíso"),
    ("costela", "Costela de Adão"),
    ("lanca", "Lança de São Jorge"),
];

/// Brackets around a token do not change what it is: `(CM)` is still `CM`.
pub fn is_structural(token: &str) -> bool {
    let upper = token
        .trim_matches(|c: char| matches!(c, '(' | ')' | '[' | ']'))
        .to_uppercase();
    STRUCTURAL_TOKENS.contains(&upper.as_str())
}

/// Tokens of `label` that should have been captured structurally.
pub fn leaked_tokens(label: &str) -> Vec<&str> {
    label.split_whitespace().filter(|t| is_structural(t)).collect()
}

pub fn describe(remaining: &str) -> String {
    let tokens: Vec<String> = remaining.split_whitespace().filter_map(tidy_token).collect();
    let capitalized = tokens
        .iter()
        .enumerate()
        .map(|(i, t)| capitalize(t, i == 0))
        .collect::<Vec<_>>()
        .join(" ");

    let mut expanded = capitalized;
    for (re, rep) in EXPANSION_RES.iter() {
        if re.is_match(&expanded) {
            expanded = re.replace_all(&expanded, *rep).into_owned();
        }
    }

    let mut words: Vec<&str> = expanded.split_whitespace().collect();
    words.dedup_by(|a, b| a.to_lowercase() == b.to_lowercase());
    let label = words.join(" ");

    debug_assert!(
        leaked_tokens(&label).is_empty(),
        "structural token in label {:?}",
        label
    );
    label
}

/// Display name for a product base, e.g. `gerbera` -> `Gérbera`.
pub fn family_label(product_base: &str) -> String {
    if let Some((_, label)) = FAMILY_LABELS.iter().find(|(base, _)| *base == product_base) {
        return label.to_string();
    }
    let label = describe(product_base);
    if label.is_empty() {
        capitalize(product_base, true)
    } else {
        label
    }
}

/// The description without its leading family name.
pub fn variety(description: &str, family: &str) -> Option<String> {
    let rest = match description.strip_prefix(family) {
        Some(rest) if rest.is_empty() || rest.starts_with(' ') => rest,
        _ => description.split_once(' ').map_or("", |(_, rest)| rest),
    };
    let rest = rest.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

/// Drops fragments with no letters or digits, stray edge slashes and dashes,
/// unbalanced parentheses and structural tokens.
fn tidy_token(token: &str) -> Option<String> {
    if !token.chars().any(char::is_alphanumeric) {
        return None;
    }
    let mut t = token
        .trim_matches(|c: char| matches!(c, '/' | '-' | ',' | ':'))
        .to_string();
    let open = t.matches('(').count();
    let close = t.matches(')').count();
    if open != close {
        t.retain(|c| c != '(' && c != ')');
    }
    if t.is_empty() || is_structural(&t) {
        return None;
    }
    Some(t)
}

fn capitalize(token: &str, first: bool) -> String {
    if token.chars().any(|c| c.is_ascii_digit()) || !token.chars().any(char::is_alphabetic) {
        return token.to_string();
    }
    let upper = token.to_uppercase();
    if KEEP_UPPERCASE.contains(&upper.as_str()) {
        return upper;
    }
    if !first && CONNECTIVES.contains(&upper.as_str()) {
        return token.to_lowercase();
    }
    let mut out = String::with_capacity(token.len());
    let mut seen_letter = false;
    for c in token.to_lowercase().chars() {
        if !seen_letter && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            seen_letter = true;
        } else {
            out.push(c);
        }
    }
    out
}
