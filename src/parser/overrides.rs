//! Per-code lookup data. The entries encode auction-house knowledge about
//! specific product codes; they are kept as opaque data and must not be
//! generalized without checking with someone who knows the catalog.

use tracing::debug;

use crate::model::{Measure, Qualifier};

/// Color by code prefix, checked in order. Only used when the description
/// itself names no color.
pub const COLOR_BY_PREFIX: &[(&str, &str)] = &[
    ("00068", "ROSA"),
    ("00050", "LARANJA"),
    ("00072", "AMARELO"),
    ("00095", "BRANCO"),
    ("00110", "VERMELHO"),
    ("00143", "LILÁS"),
    ("00157", "VERDE"),
];

/// Codes whose last group is `04` are red.
pub const RED_SUFFIX: &str = ".04";
/// Block `00120.` is white unless the code ends in `.02`, which is yellow.
pub const WHITE_BLOCK: (&str, &str) = ("00120.", "BRANCO");
pub const WHITE_BLOCK_EXCEPTION: (&str, &str) = (".02", "AMARELO");
/// Block `00130.` is sold as mixed colors.
pub const MIXED_BLOCK: (&str, &str) = ("00130.", "MISTO");

/// Gerbera diameter classes encoded in the second code group.
pub const DIAMETER_BY_CODE: &[(&str, Option<Qualifier>, &str)] = &[
    (".080.", Some(Qualifier::Lt), "10"),
    (".081.", None, "10/12"),
    (".082.", Some(Qualifier::Gt), "12"),
    (".083.", Some(Qualifier::Min), "12"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    Pattern,
    Prefix,
    Suffix,
    BlockDefault,
}

/// Picks the final color. A color found in the text always wins; the code
/// tables are only consulted when it is absent.
pub fn resolve_color(code: &str, from_text: Option<String>) -> Option<(String, ColorSource)> {
    if let Some(color) = from_text {
        return Some((color, ColorSource::Pattern));
    }
    let resolved = color_by_code(code);
    if let Some((color, source)) = &resolved {
        debug!(code, color = %color, ?source, "color from code override");
    }
    resolved
}

fn color_by_code(code: &str) -> Option<(String, ColorSource)> {
    if let Some((_, color)) = COLOR_BY_PREFIX.iter().find(|(p, _)| code.starts_with(p)) {
        return Some((color.to_string(), ColorSource::Prefix));
    }
    if code.ends_with(RED_SUFFIX) {
        return Some(("VERMELHO".to_string(), ColorSource::Suffix));
    }
    if code.starts_with(WHITE_BLOCK.0) {
        let color = if code.ends_with(WHITE_BLOCK_EXCEPTION.0) {
            WHITE_BLOCK_EXCEPTION.1
        } else {
            WHITE_BLOCK.1
        };
        return Some((color.to_string(), ColorSource::BlockDefault));
    }
    if code.starts_with(MIXED_BLOCK.0) {
        return Some((MIXED_BLOCK.1.to_string(), ColorSource::BlockDefault));
    }
    None
}

pub fn diameter_by_code(code: &str) -> Option<Measure> {
    DIAMETER_BY_CODE
        .iter()
        .find(|(needle, _, _)| code.contains(needle))
        .map(|(_, qualifier, value)| Measure {
            qualifier: *qualifier,
            value: value.to_string(),
        })
}
