use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::CommercialGrade;
use crate::parser::rules::{Consume, Hit, Rule};
use crate::parser::text::ExtractionState;

static PREMIUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bPREMIUM\b").unwrap());
static DECORADO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bDECORAD[OA]S?\b").unwrap());
static COLECAO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:COLE[CÇ][AÃ]O|COLLECTION)\b").unwrap());
static COLOURS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bCOLOU?RS\b").unwrap());

fn premium(_: &Captures<'_>, _: &str) -> Option<CommercialGrade> {
    Some(CommercialGrade::Premium)
}

fn decorado(_: &Captures<'_>, _: &str) -> Option<CommercialGrade> {
    Some(CommercialGrade::Decorado)
}

fn colecao(_: &Captures<'_>, _: &str) -> Option<CommercialGrade> {
    Some(CommercialGrade::Colecao)
}

fn colours(_: &Captures<'_>, _: &str) -> Option<CommercialGrade> {
    Some(CommercialGrade::Colours)
}

pub static RULES: &[Rule<CommercialGrade>] = &[
    Rule {
        name: "grade.premium",
        pattern: &PREMIUM_RE,
        consume: Consume::Nothing,
        build: premium,
    },
    Rule {
        name: "grade.decorado",
        pattern: &DECORADO_RE,
        consume: Consume::Nothing,
        build: decorado,
    },
    Rule {
        name: "grade.colecao",
        pattern: &COLECAO_RE,
        consume: Consume::Nothing,
        build: colecao,
    },
    Rule {
        name: "grade.colours",
        pattern: &COLOURS_RE,
        consume: Consume::Nothing,
        build: colours,
    },
];

/// Grade keywords are looked up on the untouched text and stay in the label.
pub fn extract(state: &ExtractionState) -> Option<Hit<CommercialGrade>> {
    RULES.iter().find_map(|rule| {
        rule.find(state.original()).map(|(value, _)| Hit {
            rule: rule.name,
            value,
            removed: String::new(),
        })
    })
}
