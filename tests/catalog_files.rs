use std::fs;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use serde_json::Value;

use veiling_catalog::input;
use veiling_catalog::output::{self, PRODUCTS_FILE, SETS_FILE};
use veiling_catalog::parser::describe::leaked_tokens;
use veiling_catalog::{parse_record, Catalog, SlugRegistry};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample.csv")
}

fn build_catalog() -> Catalog {
    let batch = input::read_path(&fixture()).unwrap();
    assert_eq!(batch.records.len(), 8);
    assert_eq!(batch.dropped, 1);

    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let mut catalog = Catalog::new(SlugRegistry::new(), now);
    for record in &batch.records {
        catalog.push(parse_record(record));
    }
    catalog
}

fn read_json(path: &Path) -> Vec<Value> {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn set_by_code<'a>(sets: &'a [Value], code: &str) -> &'a Value {
    sets.iter()
        .find(|s| s["codigo_veiling"] == code)
        .unwrap_or_else(|| panic!("no set for {}", code))
}

#[test]
fn fixture_round_trip_through_files() {
    let (products, sets) = build_catalog().into_parts();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");

    let written = output::write_catalog(&out, &products, &sets).unwrap();
    assert_eq!(written.products, out.join(PRODUCTS_FILE));
    assert_eq!(written.sets, out.join(SETS_FILE));

    let products = read_json(&written.products);
    let sets = read_json(&written.sets);
    assert_eq!(products.len(), 7);
    assert_eq!(sets.len(), 8);

    let ids: Vec<&str> = products.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(
        ids,
        vec!["rosa", "gerbera", "lirio", "kalanchoe", "crisantemo", "buque", "orquidea"]
    );
    assert!(products.iter().all(|p| p["status"] == "active"));
    assert_eq!(products[1]["descricao"], "Gérbera");

    assert_eq!(sets[0]["id"], "rosa-vermelha-c12-070-cm");
    assert_eq!(sets[1]["id"], "rosa-vermelha-c12-070-cm-1");
    assert_eq!(sets[0]["produto_id"], sets[1]["produto_id"]);
}

#[test]
fn fixture_attributes() {
    let (_, sets) = build_catalog().into_parts();
    let sets: Vec<Value> = sets
        .iter()
        .map(|s| serde_json::to_value(s).unwrap())
        .collect();

    let gerbera = set_by_code(&sets, "00071.080.000.00.00");
    assert_eq!(gerbera["numero_hastes"], "< 10");
    assert_eq!(gerbera["diametro_flor_cm"], "< 10");
    assert_eq!(gerbera["altura_cm"], "050");
    assert_eq!(gerbera["tipo_embalagem"], Value::Null);

    let lirio = set_by_code(&sets, "00050.000.000.00.00");
    assert_eq!(lirio["cor"], "BRANCO");
    assert_eq!(lirio["numero_hastes"], "2");
    assert_eq!(lirio["numero_flores"], "4/5");

    let kalanchoe = set_by_code(&sets, "00068.001.000.00.00");
    assert_eq!(kalanchoe["cor"], "ROSA");
    assert_eq!(kalanchoe["tipo_produto"], "PLANTA");

    let cris = set_by_code(&sets, "00120.000.000.00.02");
    assert_eq!(cris["cor"], "AMARELO");
    assert_eq!(cris["numero_hastes"], "MIN 5");

    let buque = set_by_code(&sets, "00130.000.000.00.00");
    assert_eq!(buque["tipo_embalagem"], "BUQUE");
    assert_eq!(buque["cor"], "MISTO");
    assert_eq!(buque["gramas"], "MIN 20");

    let orquidea = set_by_code(&sets, "00010.000.000.00.04");
    assert_eq!(orquidea["cor"], "VERMELHO");
    assert_eq!(orquidea["tipo_embalagem"], "POTE");
    assert_eq!(orquidea["numero_pote"], "12");
    assert_eq!(orquidea["numero_hastes"], "2");
    assert_eq!(orquidea["nivel_comercial"], "PREMIUM");
    assert_eq!(
        orquidea["descricao_comercial"],
        "Orquídea Phalaenopsis Premium"
    );

    for s in &sets {
        let label = s["descricao_comercial"].as_str().unwrap();
        assert!(!label.is_empty());
        assert!(leaked_tokens(label).is_empty(), "leak in {:?}", label);
    }
}
