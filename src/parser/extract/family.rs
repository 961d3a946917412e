//! Gerbera descriptions carry a bare `<N`/`>N` that is a stem count when a
//! height follows it and a flower diameter otherwise. This pass settles that
//! before the generic extractors get a chance to misread it.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::Measure;
use crate::parser::rules::{
    ends_with_token, first_match, following, group, preceding, Consume, Hit, Rule,
};
use crate::parser::text::ExtractionState;

/// Product bases that need the pre-pass.
pub const FAMILIES: &[&str] = &["gerbera"];

#[derive(Debug, Clone, PartialEq)]
pub enum FamilyHit {
    Stems(Measure),
    Diameter(Measure),
}

static STEMS_BEFORE_HEIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((<|>|\bMIN)\s*(\d+))\s+\d{2,3}\s*(?:CM|C)\b").unwrap()
});
static BARE_COMPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([<>])\s*(\d+(?:/\d+)?)").unwrap());
static DIAM_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bDIAM\b").unwrap());
static UNIT_OR_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d|(?:HASTES|HAST|HT|HA|H|FLS|F|CM|C|GRAMAS|GR|G)\b)").unwrap()
});

fn stems_before_height(caps: &Captures<'_>, text: &str) -> Option<FamilyHit> {
    let start = caps.get(0)?.start();
    if ends_with_token(preceding(text, start), "DIAM") {
        return None;
    }
    Some(FamilyHit::Stems(Measure::with_token(
        group(caps, 2),
        group(caps, 3)?,
    )))
}

fn bare_comparator(caps: &Captures<'_>, text: &str) -> Option<FamilyHit> {
    let m = caps.get(0)?;
    // an explicit DIAM is left to the diameter extractor
    if DIAM_TOKEN_RE.is_match(text) {
        return None;
    }
    if UNIT_OR_NUMBER_RE.is_match(following(text, m.end())) {
        return None;
    }
    Some(FamilyHit::Diameter(Measure::with_token(
        group(caps, 1),
        group(caps, 2)?,
    )))
}

pub static RULES: &[Rule<FamilyHit>] = &[
    Rule {
        name: "family.stems_before_height",
        pattern: &STEMS_BEFORE_HEIGHT_RE,
        consume: Consume::Group(1),
        build: stems_before_height,
    },
    Rule {
        name: "family.bare_comparator_diameter",
        pattern: &BARE_COMPARATOR_RE,
        consume: Consume::Whole,
        build: bare_comparator,
    },
];

pub fn applies_to(product_base: &str) -> bool {
    FAMILIES.contains(&product_base)
}

pub fn extract(state: &mut ExtractionState) -> Option<Hit<FamilyHit>> {
    if !applies_to(state.product_base()) {
        return None;
    }
    first_match(RULES, state)
}
