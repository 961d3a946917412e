use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::Measure;
use crate::parser::extract::family;
use crate::parser::overrides;
use crate::parser::rules::{first_match, group, Consume, Hit, Rule};
use crate::parser::text::ExtractionState;

static DIAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bDIAM\s*(?:(<|>|MIN|MAX)\s*)?(\d+(?:[.,]\d+)?(?:/\d+)?)(?:\s*CM\b)?").unwrap()
});

fn diam(caps: &Captures<'_>, _: &str) -> Option<Measure> {
    Some(Measure::with_token(group(caps, 1), group(caps, 2)?))
}

pub static RULES: &[Rule<Measure>] = &[Rule {
    name: "diameter.diam",
    pattern: &DIAM_RE,
    consume: Consume::Whole,
    build: diam,
}];

/// Textual `DIAM` first; gerbera codes fall back to the code's diameter class.
pub fn extract(state: &mut ExtractionState) -> Option<Hit<Measure>> {
    if let Some(hit) = first_match(RULES, state) {
        return Some(hit);
    }
    if !family::applies_to(state.product_base()) {
        return None;
    }
    overrides::diameter_by_code(state.code()).map(|value| Hit {
        rule: "diameter.code_table",
        value,
        removed: String::new(),
    })
}
