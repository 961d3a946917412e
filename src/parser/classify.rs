use crate::model::ProductType;
use crate::parser::normalize::strip_accents;

/// Truncated or unaccented family tokens seen in trade strings, mapped to the
/// full key. Lookup ignores accents on both sides, so `gérbera` and `gerbera`
/// share one key.
pub const BASE_CORRECTIONS: &[(&str, &str)] = &[
    ("gerb", "gerbera"),
    ("lirio", "lírio"),
    ("orq", "orquídea"),
    ("orqu", "orquídea"),
    ("cris", "crisântemo"),
    ("alst", "alstroeméria"),
    ("lisi", "lisianthus"),
    ("kala", "kalanchoë"),
    ("antu", "antúrio"),
    ("hort", "hortênsia"),
    ("tuli", "tulipa"),
    ("gira", "girassol"),
    ("gips", "gipsofila"),
];

/// Tokens that mark a cut-flower family. Order is the tie-break.
pub const FLOWER_KEYWORDS: &[&str] = &[
    "ROSA",
    "GERBERA",
    "GERB",
    "LÍRIO",
    "LIRIO",
    "CRISÂNTEMO",
    "CRIS",
    "ALSTROEMÉRIA",
    "ALST",
    "LISIANTHUS",
    "LISI",
    "TULIPA",
    "GIRASSOL",
    "CRAVO",
    "CRAVINA",
    "GIPSOFILA",
    "ASTER",
    "SOLIDAGO",
    "STATICE",
    "GÉRBERA",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub product_base: String,
    pub product_type: ProductType,
    /// The flower keyword that decided `FLOR`, if any.
    pub keyword: Option<&'static str>,
}

pub fn classify(text: &str, code: &str) -> Classification {
    let first = text
        .split_whitespace()
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let product_base = base_key(first);

    let keyword = FLOWER_KEYWORDS.iter().copied().find(|kw| {
        text.split_whitespace()
            .any(|token| token.to_lowercase() == kw.to_lowercase())
    });
    let product_type = if keyword.is_some() {
        ProductType::Flor
    } else {
        ProductType::Planta
    };

    tracing::trace!(code, product_base = %product_base, ?product_type, ?keyword, "classified");

    Classification {
        product_base,
        product_type,
        keyword,
    }
}

fn base_key(first: String) -> String {
    let folded = strip_accents(&first);
    BASE_CORRECTIONS
        .iter()
        .find(|(short, full)| *short == folded || strip_accents(full) == folded)
        .map_or(first, |(_, full)| full.to_string())
}
