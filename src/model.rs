use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// One `code;description` line as handed over by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub code: String,
    pub description: String,
}

impl RawRecord {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        RawRecord {
            code: code.into(),
            description: description.into(),
        }
    }

    /// Records without a code or a description never reach extraction.
    pub fn is_well_formed(&self) -> bool {
        !self.code.trim().is_empty() && !self.description.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Lt,
    Gt,
    Min,
    Max,
}

impl Qualifier {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "<" => Some(Qualifier::Lt),
            ">" => Some(Qualifier::Gt),
            "MIN" => Some(Qualifier::Min),
            "MAX" => Some(Qualifier::Max),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Qualifier::Lt => "<",
            Qualifier::Gt => ">",
            Qualifier::Min => "MIN",
            Qualifier::Max => "MAX",
        }
    }
}

/// A numeric attribute as it appears in the trade string: the digits are kept
/// verbatim (`"050"`, `"4/5"`) and the qualifier, when present, is rendered in
/// front of them separated by one space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measure {
    pub qualifier: Option<Qualifier>,
    pub value: String,
}

impl Measure {
    pub fn bare(value: impl Into<String>) -> Self {
        Measure {
            qualifier: None,
            value: value.into(),
        }
    }

    pub fn qualified(qualifier: Qualifier, value: impl Into<String>) -> Self {
        Measure {
            qualifier: Some(qualifier),
            value: value.into(),
        }
    }

    /// Builds a measure from an optional qualifier token (`"<"`, `"MIN"`, ...).
    pub fn with_token(token: Option<&str>, value: impl Into<String>) -> Self {
        Measure {
            qualifier: token.and_then(Qualifier::parse),
            value: value.into(),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.qualifier {
            Some(q) => write!(f, "{} {}", q.as_str(), self.value),
            None => f.write_str(&self.value),
        }
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProductType {
    #[serde(rename = "FLOR")]
    Flor,
    #[serde(rename = "PLANTA")]
    Planta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackagingType {
    Pote,
    Cuia,
    Buque,
    Bandeja,
    Terrario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommercialGrade {
    #[serde(rename = "PREMIUM")]
    Premium,
    #[serde(rename = "DECORADO")]
    Decorado,
    #[serde(rename = "COLEÇÃO")]
    Colecao,
    #[serde(rename = "COLOURS")]
    Colours,
}

/// Everything the engine learns about one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedAttributes {
    pub product_base: String,
    pub variety: Option<String>,
    pub product_type: ProductType,
    pub packaging_type: Option<PackagingType>,
    pub pot_number: Option<String>,
    pub stem_count: Option<Measure>,
    pub flower_count: Option<Measure>,
    pub height_cm: Option<Measure>,
    pub diameter_cm: Option<Measure>,
    pub weight_grams: Option<Measure>,
    pub color: Option<String>,
    pub commercial_grade: Option<CommercialGrade>,
    pub source_code: String,
    pub original_description: String,
    pub commercial_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseProduct {
    pub id: String,
    #[serde(rename = "produto_base")]
    pub product_base: String,
    #[serde(rename = "tipo_produto")]
    pub product_type: ProductType,
    #[serde(rename = "descricao")]
    pub description: String,
    pub status: String,
    pub galeria_principal: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Price history entries are owned by the application; the engine only emits
/// the empty list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceEntry {
    pub preco: f64,
    pub data: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommercialSet {
    pub id: String,
    pub produto_id: String,
    #[serde(rename = "variedade")]
    pub variety: Option<String>,
    #[serde(rename = "nivel_comercial")]
    pub commercial_grade: Option<CommercialGrade>,
    #[serde(rename = "tipo_produto")]
    pub product_type: ProductType,
    #[serde(rename = "tipo_embalagem")]
    pub packaging_type: Option<PackagingType>,
    #[serde(rename = "numero_pote")]
    pub pot_number: Option<String>,
    #[serde(rename = "numero_hastes")]
    pub stem_count: Option<Measure>,
    #[serde(rename = "numero_flores")]
    pub flower_count: Option<Measure>,
    #[serde(rename = "altura_cm")]
    pub height_cm: Option<Measure>,
    #[serde(rename = "diametro_flor_cm")]
    pub diameter_cm: Option<Measure>,
    #[serde(rename = "gramas")]
    pub weight_grams: Option<Measure>,
    #[serde(rename = "cor")]
    pub color: Option<String>,
    #[serde(rename = "codigo_veiling")]
    pub source_code: String,
    #[serde(rename = "descricao_comercial")]
    pub commercial_description: String,
    #[serde(rename = "descricao_original")]
    pub original_description: String,
    pub preco_venda_sugerido: f64,
    pub historico_precos: Vec<PriceEntry>,
    pub imagens: Vec<String>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
