use std::collections::BTreeMap;

use crate::parser::overrides::ColorSource;
use crate::parser::ParseOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleMetric {
    pub hits: usize,
    pub removed_chars: usize,
}

/// Per-rule counters for a run: which rules claimed records and how much text
/// they took out of `remaining`, plus attribute fill counts.
#[derive(Debug, Default)]
pub struct RuleStats {
    records: usize,
    rules: BTreeMap<&'static str, RuleMetric>,
    filled: BTreeMap<&'static str, usize>,
    colors_by_source: BTreeMap<&'static str, usize>,
}

fn source_name(source: ColorSource) -> &'static str {
    match source {
        ColorSource::Pattern => "pattern",
        ColorSource::Prefix => "code prefix",
        ColorSource::Suffix => "code suffix",
        ColorSource::BlockDefault => "code block",
    }
}

impl RuleStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &ParseOutcome) {
        self.records += 1;
        for t in &outcome.trace {
            let m = self.rules.entry(t.rule).or_default();
            m.hits += 1;
            m.removed_chars += t.removed.chars().count();
        }

        let a = &outcome.attributes;
        let present = [
            ("variety", a.variety.is_some()),
            ("packaging", a.packaging_type.is_some()),
            ("pot_number", a.pot_number.is_some()),
            ("stems", a.stem_count.is_some()),
            ("flowers", a.flower_count.is_some()),
            ("height", a.height_cm.is_some()),
            ("diameter", a.diameter_cm.is_some()),
            ("weight", a.weight_grams.is_some()),
            ("color", a.color.is_some()),
            ("grade", a.commercial_grade.is_some()),
        ];
        for (name, is_set) in present {
            let n = self.filled.entry(name).or_default();
            if is_set {
                *n += 1;
            }
        }

        if let Some(source) = outcome.color_source {
            *self.colors_by_source.entry(source_name(source)).or_default() += 1;
        }
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn rule(&self, name: &str) -> Option<RuleMetric> {
        self.rules.get(name).copied()
    }

    pub fn filled(&self, attribute: &str) -> usize {
        self.filled.get(attribute).copied().unwrap_or(0)
    }

    /// Colors that came from the code tables rather than the text.
    pub fn colors_from_overrides(&self) -> usize {
        self.colors_by_source
            .iter()
            .filter(|(name, _)| **name != source_name(ColorSource::Pattern))
            .map(|(_, n)| n)
            .sum()
    }

    pub fn report(&self) {
        println!("  rules ({} records):", self.records);
        for (name, m) in &self.rules {
            println!(
                "    {:<32} {:>7} hits  {:>9} chars removed",
                name, m.hits, m.removed_chars
            );
        }
        println!("  fill rates:");
        for (name, n) in &self.filled {
            println!("    {:<12} {:>7}  ({:.1}%)", name, n, self.percent(*n));
        }
        println!("  colors by source:");
        for (name, n) in &self.colors_by_source {
            println!("    {:<12} {:>7}", name, n);
        }
    }

    fn percent(&self, n: usize) -> f64 {
        if self.records == 0 {
            0.0
        } else {
            n as f64 * 100.0 / self.records as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawRecord;
    use crate::parser::parse_record;

    #[test]
    fn counts_rules_fill_and_overrides() {
        let mut stats = RuleStats::new();
        for (code, desc) in [
            ("00001.000.000.00.00", "ROSA VERMELHA C12 070 CM"),
            ("00001.000.000.00.00", "ROSA BRANCA C14 060 CM"),
            ("00068.001.000.00.00", "KALANCHOE P11"),
        ] {
            stats.record(&parse_record(&RawRecord::new(code, desc)));
        }

        assert_eq!(stats.records(), 3);
        assert_eq!(
            stats.rule("packaging.cuia"),
            Some(RuleMetric {
                hits: 2,
                removed_chars: 6
            })
        );
        assert_eq!(stats.rule("packaging.pote").map(|m| m.hits), Some(1));
        assert_eq!(stats.rule("height.bare").map(|m| m.hits), Some(2));
        assert_eq!(stats.filled("height"), 2);
        assert_eq!(stats.filled("color"), 3);
        assert_eq!(stats.filled("grade"), 0);
        assert_eq!(stats.colors_from_overrides(), 1);
    }
}
