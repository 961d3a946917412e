use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::PackagingType;
use crate::parser::rules::{first_match, group, Consume, Hit, Rule};
use crate::parser::text::ExtractionState;

#[derive(Debug, Clone, PartialEq)]
pub struct Packaging {
    pub kind: PackagingType,
    pub pot_number: Option<String>,
}

static CUIA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bC(\d+)\b").unwrap());
static POTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bP(\d+)\b").unwrap());
static BUQUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:BUQUE|BUQUÊ|BOUQUET)\b").unwrap());
static BANDEJA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:BANDEJA|TRAY)\b").unwrap());
static TERRARIO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:TERRARIO|TERRÁRIO|TERRARIUM)\b").unwrap());

fn cuia(caps: &Captures<'_>, _: &str) -> Option<Packaging> {
    Some(Packaging {
        kind: PackagingType::Cuia,
        pot_number: group(caps, 1).map(str::to_string),
    })
}

fn pote(caps: &Captures<'_>, _: &str) -> Option<Packaging> {
    Some(Packaging {
        kind: PackagingType::Pote,
        pot_number: group(caps, 1).map(str::to_string),
    })
}

fn keyword(kind: PackagingType) -> Option<Packaging> {
    Some(Packaging {
        kind,
        pot_number: None,
    })
}

fn buque(_: &Captures<'_>, _: &str) -> Option<Packaging> {
    keyword(PackagingType::Buque)
}

fn bandeja(_: &Captures<'_>, _: &str) -> Option<Packaging> {
    keyword(PackagingType::Bandeja)
}

fn terrario(_: &Captures<'_>, _: &str) -> Option<Packaging> {
    keyword(PackagingType::Terrario)
}

// Packaging words stay in the label ("Buquê Misto"), only dimensioned
// containers are consumed.
pub static RULES: &[Rule<Packaging>] = &[
    Rule {
        name: "packaging.cuia",
        pattern: &CUIA_RE,
        consume: Consume::Whole,
        build: cuia,
    },
    Rule {
        name: "packaging.pote",
        pattern: &POTE_RE,
        consume: Consume::Whole,
        build: pote,
    },
    Rule {
        name: "packaging.buque",
        pattern: &BUQUE_RE,
        consume: Consume::Nothing,
        build: buque,
    },
    Rule {
        name: "packaging.bandeja",
        pattern: &BANDEJA_RE,
        consume: Consume::Nothing,
        build: bandeja,
    },
    Rule {
        name: "packaging.terrario",
        pattern: &TERRARIO_RE,
        consume: Consume::Nothing,
        build: terrario,
    },
];

pub fn extract(state: &mut ExtractionState) -> Option<Hit<Packaging>> {
    first_match(RULES, state)
}
