pub mod classify;
pub mod describe;
pub mod extract;
pub mod normalize;
pub mod overrides;
pub mod rules;
pub mod text;

use tracing::debug;

use crate::model::{ParsedAttributes, RawRecord};
use extract::{color, RuleTrace};
use overrides::ColorSource;
use text::ExtractionState;

/// Result of running one record through the engine, with the bookkeeping the
/// caller needs for ids and statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub attributes: ParsedAttributes,
    pub normalized: String,
    pub family_label: String,
    pub color_source: Option<ColorSource>,
    pub trace: Vec<RuleTrace>,
}

/// normalize → classify → extractors → overrides → description.
pub fn parse_record(record: &RawRecord) -> ParseOutcome {
    let normalized = normalize::normalize(&record.description);
    let class = classify::classify(&normalized, &record.code);
    let mut state = ExtractionState::new(&record.code, &class.product_base, &normalized);

    let found = extract::extract_all(&mut state);

    let resolved = overrides::resolve_color(state.code(), found.color.clone());
    if resolved.is_some() {
        let stripped = color::strip_portuguese(&mut state);
        if !stripped.is_empty() {
            debug!(?stripped, "color words removed from label");
        }
    }
    let (color, color_source) = resolved.unzip();

    let family_label = describe::family_label(&class.product_base);
    let mut description = describe::describe(state.remaining());
    if description.is_empty() {
        description = family_label.clone();
    }
    let variety = describe::variety(&description, &family_label);

    debug!(
        code = state.code(),
        base = %class.product_base,
        description = %description,
        rules = found.trace.len(),
        "record parsed"
    );

    let attributes = ParsedAttributes {
        product_base: class.product_base,
        variety,
        product_type: class.product_type,
        packaging_type: found.packaging.as_ref().map(|p| p.kind),
        pot_number: found.packaging.and_then(|p| p.pot_number),
        stem_count: found.stems,
        flower_count: found.flowers,
        height_cm: found.height,
        diameter_cm: found.diameter,
        weight_grams: found.weight,
        color,
        commercial_grade: found.grade,
        source_code: state.code().to_string(),
        original_description: record.description.trim().to_string(),
        commercial_description: description,
    };

    ParseOutcome {
        attributes,
        normalized,
        family_label,
        color_source,
        trace: found.trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommercialGrade, PackagingType, ProductType};

    fn parse(code: &str, description: &str) -> ParseOutcome {
        parse_record(&RawRecord::new(code, description))
    }

    fn shown(m: &Option<crate::model::Measure>) -> Option<String> {
        m.as_ref().map(|m| m.to_string())
    }

    #[test]
    fn gerbera_stem_count_and_diameter() {
        let out = parse("00071.080.000.00.00", "GERB STANZA <10 050 CM DIAM < 10");
        let a = &out.attributes;
        assert_eq!(a.product_base, "gerbera");
        assert_eq!(a.product_type, ProductType::Flor);
        assert_eq!(a.packaging_type, None);
        assert_eq!(shown(&a.diameter_cm).as_deref(), Some("< 10"));
        assert_eq!(shown(&a.stem_count).as_deref(), Some("< 10"));
        assert_eq!(shown(&a.height_cm).as_deref(), Some("050"));
        assert_eq!(a.commercial_description, "Gérbera Stanza");
        assert_eq!(a.variety.as_deref(), Some("Stanza"));
    }

    #[test]
    fn rose_in_cuia() {
        let out = parse("00001.000.000.00.00", "ROSA VERMELHA C12 070 CM");
        let a = &out.attributes;
        assert_eq!(a.packaging_type, Some(PackagingType::Cuia));
        assert_eq!(a.pot_number.as_deref(), Some("12"));
        assert_eq!(shown(&a.height_cm).as_deref(), Some("070"));
        assert_eq!(a.color.as_deref(), Some("VERMELHO"));
        assert_eq!(a.commercial_description, "Rosa");
        assert_eq!(a.variety, None);
    }

    #[test]
    fn text_color_beats_prefix_override() {
        let out = parse("00050.000.000.00.00", "LIRIO BRANCO 2 HT 4/5 FLS");
        let a = &out.attributes;
        assert_eq!(a.color.as_deref(), Some("BRANCO"));
        assert_eq!(out.color_source, Some(ColorSource::Pattern));
        assert_eq!(shown(&a.stem_count).as_deref(), Some("2"));
        assert_eq!(shown(&a.flower_count).as_deref(), Some("4/5"));
        assert_eq!(a.commercial_description, "Lírio");
    }

    #[test]
    fn decomposed_accents_still_classify() {
        let out = parse("1", "LI\u{301}RIO BRANCO");
        let a = &out.attributes;
        assert_eq!(out.normalized, "LÍRIO BRANCO");
        assert_eq!(a.product_base, "lírio");
        assert_eq!(a.product_type, ProductType::Flor);
        assert_eq!(a.color.as_deref(), Some("BRANCO"));
        assert_eq!(a.commercial_description, "Lírio");
    }

    #[test]
    fn accented_gerbera_gets_the_family_pass() {
        let out = parse("1", "GÉRBERA STANZA <10 050 CM DIAM < 10");
        let a = &out.attributes;
        assert_eq!(a.product_base, "gerbera");
        assert_eq!(shown(&a.stem_count).as_deref(), Some("< 10"));
        assert_eq!(shown(&a.diameter_cm).as_deref(), Some("< 10"));
        assert_eq!(a.commercial_description, "Gérbera Stanza");
    }

    #[test]
    fn decimal_height_and_bracketed_units() {
        let a = parse("1", "ROSA 2,5 CM").attributes;
        assert_eq!(shown(&a.height_cm).as_deref(), Some("2,5"));
        assert_eq!(a.commercial_description, "Rosa");

        let a = parse("1", "ROSA (CM) 60 CM").attributes;
        assert_eq!(shown(&a.height_cm).as_deref(), Some("60"));
        assert_eq!(a.commercial_description, "Rosa");
    }

    #[test]
    fn prefix_override_when_text_has_no_color() {
        let out = parse("00068.001.000.00.00", "KALANCHOE P11");
        let a = &out.attributes;
        assert_eq!(a.color.as_deref(), Some("ROSA"));
        assert_eq!(out.color_source, Some(ColorSource::Prefix));
        assert_eq!(a.product_type, ProductType::Planta);
        assert_eq!(a.packaging_type, Some(PackagingType::Pote));
        assert_eq!(a.pot_number.as_deref(), Some("11"));
        assert_eq!(a.commercial_description, "Kalanchoë");
    }

    #[test]
    fn english_color_stays_in_label() {
        let out = parse("00001.000.000.00.00", "ROSA RED NAOMI VERMELHA 060 CM PREMIUM");
        let a = &out.attributes;
        assert_eq!(a.color.as_deref(), Some("VERMELHO"));
        assert_eq!(a.commercial_description, "Rosa Red Naomi Premium");
        assert_eq!(a.variety.as_deref(), Some("Red Naomi Premium"));
        assert_eq!(a.commercial_grade, Some(CommercialGrade::Premium));
    }

    #[test]
    fn keeps_original_and_normalized_text() {
        let out = parse(" 00001.000.000.00.00 ", "  rosa vermelha 11+ ");
        assert_eq!(out.attributes.original_description, "rosa vermelha 11+");
        assert_eq!(out.attributes.source_code, "00001.000.000.00.00");
        assert_eq!(out.normalized, "ROSA VERMELHA MIN 11");
    }

    #[test]
    fn qualified_values_have_the_legacy_shape() {
        for (code, desc) in [
            ("00071.080.000.00.00", "GERB STANZA <10 050 CM DIAM < 10"),
            ("1", "ROSA MAX 60 CM MIN 5 HT"),
            ("1", "MUSGO MIN 300 GR"),
            ("1", "LIRIO MIN 11 FLS > 40 CM"),
        ] {
            let a = parse(code, desc).attributes;
            for m in [
                &a.stem_count,
                &a.flower_count,
                &a.height_cm,
                &a.diameter_cm,
                &a.weight_grams,
            ]
            .into_iter()
            .flatten()
            {
                let s = m.to_string();
                let value = ["< ", "> ", "MIN ", "MAX "]
                    .iter()
                    .find_map(|q| s.strip_prefix(q))
                    .unwrap_or(&s);
                assert!(
                    value.chars().next().is_some_and(|c| c.is_ascii_digit()),
                    "{:?} in {:?}",
                    s,
                    desc
                );
            }
        }
    }
}
