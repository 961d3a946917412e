//! Stem and flower counts. The forms are tried in a fixed order and the first
//! one that matches claims its span; orphaned unit tokens are swept afterwards.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::{Measure, Qualifier};
use crate::parser::rules::{first_match, following, group, preceding, Consume, Hit, Rule};
use crate::parser::text::ExtractionState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Counts {
    pub stems: Option<Measure>,
    pub flowers: Option<Measure>,
}

static COMPARATOR_STEMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<|>)\s*(\d+)\s*(?:HASTES|HAST|HT|HA)\b").unwrap());
static STEMS_AND_FLOWERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\b(\d+)\s*|\b)(?:HAST|HT|HA)\s*(\d+(?:/\d+)?)(?:\s*(?:FLS|F)\b)?").unwrap()
});
static MIN_FLOWERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bMIN\s*(\d+(?:/\d+)?)\s*(?:FLS|F)\b").unwrap());
static FLOWERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+(?:/\d+)?)\s*(?:FLS|F)\b").unwrap());
static STEMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+(?:/\d+)?)\s*(?:HASTES|HAST|HT|HA|H)\b").unwrap());
static MIN_STEMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bMIN\s*(\d+)\s*(?:HASTES|HAST|HT|HA|H)\b").unwrap());
static STEMS_MIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:HASTES|HAST|HT|HA|H)\s+MIN\s*(\d+)\b").unwrap());

static ORPHAN_UNITS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d+(?:HASTES|HAST|HT|HA|H|FLS)\b|\b(?:HASTES|HAST|HT|HA|FLS)\b").unwrap()
});
static HEIGHT_OR_WEIGHT_UNIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:CM|C|MM|GRAMAS|GRAMS|GR|G)\b").unwrap());

fn is_qualified(before: &str) -> bool {
    ["MIN", "MAX", "<", ">"]
        .iter()
        .any(|q| before.strip_suffix(q).is_some_and(|r| r.is_empty() || r.ends_with(' ')))
}

fn comparator_stems(caps: &Captures<'_>, _: &str) -> Option<Counts> {
    Some(Counts {
        stems: Some(Measure::with_token(group(caps, 1), group(caps, 2)?)),
        flowers: None,
    })
}

fn stems_and_flowers(caps: &Captures<'_>, text: &str) -> Option<Counts> {
    let end = caps.get(0)?.end();
    // "10 HT 070 CM" is ten stems at 70 cm, not seventy flowers
    if HEIGHT_OR_WEIGHT_UNIT_RE.is_match(following(text, end)) {
        return None;
    }
    Some(Counts {
        stems: Some(Measure::bare(group(caps, 1).unwrap_or("1"))),
        flowers: Some(Measure::bare(group(caps, 2)?)),
    })
}

fn min_flowers(caps: &Captures<'_>, _: &str) -> Option<Counts> {
    Some(Counts {
        stems: None,
        flowers: Some(Measure::qualified(Qualifier::Min, group(caps, 1)?)),
    })
}

fn flowers(caps: &Captures<'_>, text: &str) -> Option<Counts> {
    if is_qualified(preceding(text, caps.get(0)?.start())) {
        return None;
    }
    Some(Counts {
        stems: None,
        flowers: Some(Measure::bare(group(caps, 1)?)),
    })
}

fn stems(caps: &Captures<'_>, text: &str) -> Option<Counts> {
    if is_qualified(preceding(text, caps.get(0)?.start())) {
        return None;
    }
    Some(Counts {
        stems: Some(Measure::bare(group(caps, 1)?)),
        flowers: None,
    })
}

fn min_stems(caps: &Captures<'_>, _: &str) -> Option<Counts> {
    Some(Counts {
        stems: Some(Measure::qualified(Qualifier::Min, group(caps, 1)?)),
        flowers: None,
    })
}

pub static RULES: &[Rule<Counts>] = &[
    Rule {
        name: "stems.comparator",
        pattern: &COMPARATOR_STEMS_RE,
        consume: Consume::Whole,
        build: comparator_stems,
    },
    Rule {
        name: "stems.with_flowers",
        pattern: &STEMS_AND_FLOWERS_RE,
        consume: Consume::Whole,
        build: stems_and_flowers,
    },
    Rule {
        name: "flowers.min",
        pattern: &MIN_FLOWERS_RE,
        consume: Consume::Whole,
        build: min_flowers,
    },
    Rule {
        name: "flowers.bare",
        pattern: &FLOWERS_RE,
        consume: Consume::Whole,
        build: flowers,
    },
    Rule {
        name: "stems.bare",
        pattern: &STEMS_RE,
        consume: Consume::Whole,
        build: stems,
    },
    Rule {
        name: "stems.min_before",
        pattern: &MIN_STEMS_RE,
        consume: Consume::Whole,
        build: min_stems,
    },
    Rule {
        name: "stems.min_after",
        pattern: &STEMS_MIN_RE,
        consume: Consume::Whole,
        build: min_stems,
    },
];

pub fn extract(state: &mut ExtractionState) -> Option<Hit<Counts>> {
    let hit = first_match(RULES, state);
    let swept = state.remove_where(&ORPHAN_UNITS_RE);
    if !swept.is_empty() {
        tracing::trace!(?swept, "orphan count units removed");
    }
    hit
}
