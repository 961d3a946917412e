//! Groups parsed records into base products and commercial sets.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::model::{BaseProduct, CommercialSet};
use crate::parser::ParseOutcome;
use crate::slug::SlugRegistry;

pub const STATUS_ACTIVE: &str = "active";

/// Owns the two output collections for one run. The slug registry and the
/// timestamp are handed in so a run is reproducible.
#[derive(Debug)]
pub struct Catalog {
    slugs: SlugRegistry,
    now: DateTime<Utc>,
    base_index: HashMap<String, usize>,
    products: Vec<BaseProduct>,
    sets: Vec<CommercialSet>,
}

impl Catalog {
    pub fn new(slugs: SlugRegistry, now: DateTime<Utc>) -> Self {
        Catalog {
            slugs,
            now,
            base_index: HashMap::new(),
            products: Vec::new(),
            sets: Vec::new(),
        }
    }

    /// Adds one record. The first record of a product base creates its
    /// `BaseProduct`; every record creates exactly one `CommercialSet`.
    pub fn push(&mut self, outcome: ParseOutcome) -> &CommercialSet {
        let ParseOutcome {
            attributes: a,
            normalized,
            family_label,
            ..
        } = outcome;

        let base_idx = match self.base_index.get(&a.product_base) {
            Some(&idx) => idx,
            None => {
                let id = self.slugs.slug(&a.product_base);
                debug!(id = %id, base = %a.product_base, "new base product");
                self.products.push(BaseProduct {
                    id,
                    product_base: a.product_base.clone(),
                    product_type: a.product_type,
                    description: family_label,
                    status: STATUS_ACTIVE.to_string(),
                    galeria_principal: Vec::new(),
                    created_at: self.now,
                    updated_at: self.now,
                });
                let idx = self.products.len() - 1;
                self.base_index.insert(a.product_base.clone(), idx);
                idx
            }
        };
        let produto_id = self.products[base_idx].id.clone();

        self.sets.push(CommercialSet {
            id: self.slugs.slug(&normalized),
            produto_id,
            variety: a.variety,
            commercial_grade: a.commercial_grade,
            product_type: a.product_type,
            packaging_type: a.packaging_type,
            pot_number: a.pot_number,
            stem_count: a.stem_count,
            flower_count: a.flower_count,
            height_cm: a.height_cm,
            diameter_cm: a.diameter_cm,
            weight_grams: a.weight_grams,
            color: a.color,
            source_code: a.source_code,
            commercial_description: a.commercial_description,
            original_description: a.original_description,
            preco_venda_sugerido: 0.0,
            historico_precos: Vec::new(),
            imagens: Vec::new(),
            ativo: true,
            created_at: self.now,
            updated_at: self.now,
        });
        &self.sets[self.sets.len() - 1]
    }

    pub fn products(&self) -> &[BaseProduct] {
        &self.products
    }

    pub fn sets(&self) -> &[CommercialSet] {
        &self.sets
    }

    pub fn into_parts(self) -> (Vec<BaseProduct>, Vec<CommercialSet>) {
        (self.products, self.sets)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeZone;

    use super::*;
    use crate::model::{ProductType, RawRecord};
    use crate::parser::parse_record;

    fn catalog() -> Catalog {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Catalog::new(SlugRegistry::new(), now)
    }

    fn push(cat: &mut Catalog, code: &str, desc: &str) -> CommercialSet {
        cat.push(parse_record(&RawRecord::new(code, desc))).clone()
    }

    #[test]
    fn same_description_twice_shares_the_base() {
        let mut cat = catalog();
        let a = push(&mut cat, "00001.000.000.00.00", "ROSA VERMELHA C12 070 CM");
        let b = push(&mut cat, "00001.000.000.00.01", "ROSA VERMELHA C12 070 CM");

        assert_eq!(a.id, "rosa-vermelha-c12-070-cm");
        assert_eq!(b.id, "rosa-vermelha-c12-070-cm-1");
        assert_eq!(a.produto_id, "rosa");
        assert_eq!(b.produto_id, "rosa");
        assert_eq!(cat.products().len(), 1);
        assert_eq!(cat.sets().len(), 2);
    }

    #[test]
    fn first_seen_base_wins() {
        let mut cat = catalog();
        push(&mut cat, "1", "GERB STANZA 050 CM");
        push(&mut cat, "2", "GERBERA MINI LARANJA");
        let (products, sets) = cat.into_parts();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "gerbera");
        assert_eq!(products[0].description, "Gérbera");
        assert_eq!(products[0].product_type, ProductType::Flor);
        assert_eq!(products[0].status, STATUS_ACTIVE);
        assert!(sets.iter().all(|s| s.produto_id == "gerbera"));
    }

    #[test]
    fn accent_variants_share_the_base() {
        let mut cat = catalog();
        let a = push(&mut cat, "1", "LIRIO BRANCO");
        let b = push(&mut cat, "2", "LÍRIO AMARELO");
        let c = push(&mut cat, "3", "GERBERA MIX");
        let d = push(&mut cat, "4", "GÉRBERA MIX");
        assert_eq!(cat.products().len(), 2);
        assert_eq!(a.produto_id, "lirio");
        assert_eq!(b.produto_id, "lirio");
        assert_eq!(c.produto_id, "gerbera");
        assert_eq!(d.produto_id, "gerbera");
    }

    #[test]
    fn placeholder_commerce_fields() {
        let mut cat = catalog();
        let set = push(&mut cat, "00068.001.000.00.00", "KALANCHOE P11");
        assert_eq!(set.preco_venda_sugerido, 0.0);
        assert!(set.historico_precos.is_empty());
        assert!(set.imagens.is_empty());
        assert!(set.ativo);
        assert_eq!(set.created_at, set.updated_at);
        assert_eq!(set.color.as_deref(), Some("ROSA"));
    }

    #[test]
    fn base_and_set_slugs_never_collide() {
        let mut cat = catalog();
        for (code, desc) in [
            ("1", "ROSA"),
            ("2", "ROSA"),
            ("3", "LIRIO BRANCO"),
            ("4", "LIRIO"),
            ("5", "ORQUIDEA PHAL P12"),
        ] {
            push(&mut cat, code, desc);
        }
        let mut seen = HashSet::new();
        for id in cat
            .products()
            .iter()
            .map(|p| &p.id)
            .chain(cat.sets().iter().map(|s| &s.id))
        {
            assert!(!id.is_empty());
            assert!(seen.insert(id.clone()), "duplicate slug {}", id);
        }
        assert_eq!(cat.products()[0].id, "rosa");
        assert_eq!(cat.sets()[0].id, "rosa-1");
    }

    #[test]
    fn wire_names() {
        let mut cat = catalog();
        push(&mut cat, "00001.000.000.00.00", "ROSA VERMELHA C12 070 CM");
        let (products, sets) = cat.into_parts();
        let p = serde_json::to_value(&products[0]).unwrap();
        assert_eq!(p["produto_base"], "rosa");
        assert_eq!(p["tipo_produto"], "FLOR");
        assert_eq!(p["descricao"], "Rosa");
        assert_eq!(p["galeria_principal"], serde_json::json!([]));
        let s = serde_json::to_value(&sets[0]).unwrap();
        assert_eq!(s["tipo_embalagem"], "CUIA");
        assert_eq!(s["numero_pote"], "12");
        assert_eq!(s["altura_cm"], "070");
        assert_eq!(s["cor"], "VERMELHO");
        assert_eq!(s["codigo_veiling"], "00001.000.000.00.00");
        assert_eq!(s["variedade"], serde_json::Value::Null);
        assert_eq!(s["ativo"], true);
    }
}
