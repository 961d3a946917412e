pub mod color;
pub mod diameter;
pub mod family;
pub mod grade;
pub mod height;
pub mod packaging;
pub mod stems;
pub mod weight;

use crate::model::{CommercialGrade, Measure};
use crate::parser::rules::Hit;
use crate::parser::text::ExtractionState;
use family::FamilyHit;
use packaging::Packaging;

/// One rule that claimed something, with the text it took from `remaining`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTrace {
    pub rule: &'static str,
    pub removed: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    pub packaging: Option<Packaging>,
    pub diameter: Option<Measure>,
    pub stems: Option<Measure>,
    pub flowers: Option<Measure>,
    pub weight: Option<Measure>,
    pub height: Option<Measure>,
    /// Color read from the text only; code overrides come later.
    pub color: Option<String>,
    pub grade: Option<CommercialGrade>,
    pub trace: Vec<RuleTrace>,
}

impl Extracted {
    fn keep<T>(&mut self, hit: Option<Hit<T>>) -> Option<T> {
        let hit = hit?;
        self.trace.push(RuleTrace {
            rule: hit.rule,
            removed: hit.removed,
        });
        Some(hit.value)
    }
}

/// Runs every extractor in its fixed order. Each one sees `remaining` as the
/// previous ones left it.
pub fn extract_all(state: &mut ExtractionState) -> Extracted {
    let mut out = Extracted::default();

    let packaging_hit = packaging::extract(state);
    out.packaging = out.keep(packaging_hit);

    let family_hit = family::extract(state);
    match out.keep(family_hit) {
        Some(FamilyHit::Stems(m)) => out.stems = Some(m),
        Some(FamilyHit::Diameter(m)) => out.diameter = Some(m),
        None => {}
    }

    if out.diameter.is_none() {
        let diameter_hit = diameter::extract(state);
        out.diameter = out.keep(diameter_hit);
    }

    let stems_hit = stems::extract(state);
    if let Some(counts) = out.keep(stems_hit) {
        // a stem count settled by the family pass stands
        out.stems = out.stems.take().or(counts.stems);
        out.flowers = counts.flowers;
    }

    let weight_hit = weight::extract(state);
    out.weight = out.keep(weight_hit);

    let height_hit = height::extract(state);
    out.height = out.keep(height_hit);

    out.color = color::extract(state);

    let grade_hit = grade::extract(state);
    out.grade = out.keep(grade_hit);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PackagingType;
    use crate::parser::normalize::normalize;

    fn run(code: &str, base: &str, raw: &str) -> (Extracted, String) {
        let mut st = ExtractionState::new(code, base, &normalize(raw));
        let out = extract_all(&mut st);
        (out, st.remaining().to_string())
    }

    fn shown(m: &Option<Measure>) -> Option<String> {
        m.as_ref().map(|m| m.to_string())
    }

    #[test]
    fn gerbera_stems_and_diameter() {
        let (out, rest) = run(
            "00071.080.000.00.00",
            "gerbera",
            "GERB STANZA <10 050 CM DIAM < 10",
        );
        assert_eq!(out.packaging, None);
        assert_eq!(shown(&out.stems).as_deref(), Some("< 10"));
        assert_eq!(shown(&out.diameter).as_deref(), Some("< 10"));
        assert_eq!(shown(&out.height).as_deref(), Some("050"));
        assert_eq!(rest, "GERB STANZA");
    }

    #[test]
    fn cuia_height_and_color() {
        let (out, rest) = run("00001.000.000.00.00", "rosa", "ROSA VERMELHA C12 070 CM");
        let packaging = out.packaging.unwrap();
        assert_eq!(packaging.kind, PackagingType::Cuia);
        assert_eq!(packaging.pot_number.as_deref(), Some("12"));
        assert_eq!(shown(&out.height).as_deref(), Some("070"));
        assert_eq!(out.color.as_deref(), Some("VERMELHO"));
        assert_eq!(rest, "ROSA VERMELHA");
    }

    #[test]
    fn numeric_spans_are_claimed_once() {
        let (out, rest) = run("1", "lírio", "LIRIO BRANCO 2 HT 4/5 FLS 070 CM");
        assert_eq!(shown(&out.stems).as_deref(), Some("2"));
        assert_eq!(shown(&out.flowers).as_deref(), Some("4/5"));
        assert_eq!(shown(&out.height).as_deref(), Some("070"));
        assert_eq!(out.diameter, None);
        assert_eq!(rest, "LIRIO BRANCO");
    }

    #[test]
    fn trace_lists_rules_in_run_order() {
        let (out, _) = run("1", "rosa", "ROSA VERMELHA C12 070 CM PREMIUM");
        let rules: Vec<_> = out.trace.iter().map(|t| t.rule).collect();
        assert_eq!(rules, vec!["packaging.cuia", "height.bare", "grade.premium"]);
        assert_eq!(out.trace[0].removed, "C12");
    }

    #[test]
    fn plus_idiom_is_counted_once() {
        let (out, rest) = run("1", "lírio", "LIRIO 11+ FLS");
        assert_eq!(shown(&out.flowers).as_deref(), Some("MIN 11"));
        assert_eq!(out.weight, None);
        assert_eq!(rest, "LIRIO");
    }
}
