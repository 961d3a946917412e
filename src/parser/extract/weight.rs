use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::{Measure, Qualifier};
use crate::parser::rules::{first_match, group, Consume, Hit, Rule};
use crate::parser::text::ExtractionState;

/// A unit-less trailing `MIN N` is a weight only from this value up; smaller
/// numbers are stem or flower counts.
pub const MIN_UNITLESS_WEIGHT: u32 = 5;

static GRAMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\b(MIN)\s*)?\b(\d+(?:[.,]\d+)?)\s*(?:GRAMAS|GRAMS|GRAM|GRA|GR|G)\b").unwrap()
});
static TRAILING_MIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bMIN\s*(\d+)\s*$").unwrap());

fn grams(caps: &Captures<'_>, _: &str) -> Option<Measure> {
    Some(Measure::with_token(group(caps, 1), group(caps, 2)?))
}

fn trailing_min(caps: &Captures<'_>, _: &str) -> Option<Measure> {
    let value = group(caps, 1)?;
    let n: u32 = value.parse().ok()?;
    (n >= MIN_UNITLESS_WEIGHT).then(|| Measure::qualified(Qualifier::Min, value))
}

pub static RULES: &[Rule<Measure>] = &[
    Rule {
        name: "weight.grams",
        pattern: &GRAMS_RE,
        consume: Consume::Whole,
        build: grams,
    },
    Rule {
        name: "weight.trailing_min",
        pattern: &TRAILING_MIN_RE,
        consume: Consume::Whole,
        build: trailing_min,
    },
];

pub fn extract(state: &mut ExtractionState) -> Option<Hit<Measure>> {
    first_match(RULES, state)
}
