use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::{Measure, Qualifier};
use crate::parser::extract::color;
use crate::parser::rules::{first_match, group, splits_decimal, Consume, Hit, Rule};
use crate::parser::text::ExtractionState;

static MAX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bMAX\s*(\d+(?:[.,]\d+)?)\s*(?:CM|C)\b").unwrap());
static MIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bMIN\s*(\d+(?:[.,]\d+)?)\s*(?:CM|C)\b").unwrap());
static COMPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<|>)\s*(\d+(?:[.,]\d+)?)\s*(?:CM|C)\b").unwrap());
static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\s*-\s*\d+\s*(?:CM|C)\b").unwrap());
static BARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+(?:[.,]\d+)?)\s*(?:CM|C)\b").unwrap());
static TRAILING_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\s*-\s*\d+$").unwrap());
static BEFORE_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(\d{{2,3}})\s+(?:{})\b", color::alternation())).unwrap()
});
static AFTER_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\s+(\d{{2,3}})\b", color::alternation())).unwrap()
});
static TRAILING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(\d{2,3})$").unwrap());

fn max(caps: &Captures<'_>, _: &str) -> Option<Measure> {
    Some(Measure::qualified(Qualifier::Max, group(caps, 1)?))
}

fn min(caps: &Captures<'_>, _: &str) -> Option<Measure> {
    Some(Measure::qualified(Qualifier::Min, group(caps, 1)?))
}

fn comparator(caps: &Captures<'_>, _: &str) -> Option<Measure> {
    Some(Measure::with_token(group(caps, 1), group(caps, 2)?))
}

fn first_number(caps: &Captures<'_>, text: &str) -> Option<Measure> {
    let number = caps.get(1)?;
    if splits_decimal(text, number.start()) {
        return None;
    }
    Some(Measure::bare(number.as_str()))
}

pub static RULES: &[Rule<Measure>] = &[
    Rule {
        name: "height.max",
        pattern: &MAX_RE,
        consume: Consume::Whole,
        build: max,
    },
    Rule {
        name: "height.min",
        pattern: &MIN_RE,
        consume: Consume::Whole,
        build: min,
    },
    Rule {
        name: "height.comparator",
        pattern: &COMPARATOR_RE,
        consume: Consume::Whole,
        build: comparator,
    },
    Rule {
        name: "height.range",
        pattern: &RANGE_RE,
        consume: Consume::Whole,
        build: first_number,
    },
    Rule {
        name: "height.bare",
        pattern: &BARE_RE,
        consume: Consume::Whole,
        build: first_number,
    },
    Rule {
        name: "height.trailing_range",
        pattern: &TRAILING_RANGE_RE,
        consume: Consume::Whole,
        build: first_number,
    },
    Rule {
        name: "height.before_color",
        pattern: &BEFORE_COLOR_RE,
        consume: Consume::Group(1),
        build: first_number,
    },
    Rule {
        name: "height.after_color",
        pattern: &AFTER_COLOR_RE,
        consume: Consume::Group(1),
        build: first_number,
    },
    Rule {
        name: "height.trailing_number",
        pattern: &TRAILING_NUMBER_RE,
        consume: Consume::Group(1),
        build: first_number,
    },
];

pub fn extract(state: &mut ExtractionState) -> Option<Hit<Measure>> {
    first_match(RULES, state)
}
