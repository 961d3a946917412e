use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::{CatalogError, Result};
use crate::model::{BaseProduct, CommercialSet};

pub const PRODUCTS_FILE: &str = "produtos.json";
pub const SETS_FILE: &str = "conjuntos_comerciais.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub products: PathBuf,
    pub sets: PathBuf,
}

/// Writes both collections as pretty JSON arrays under `dir`, creating it if
/// needed.
pub fn write_catalog(
    dir: &Path,
    products: &[BaseProduct],
    sets: &[CommercialSet],
) -> Result<Written> {
    fs::create_dir_all(dir).map_err(|source| CatalogError::Output {
        path: dir.to_path_buf(),
        source,
    })?;
    let written = Written {
        products: dir.join(PRODUCTS_FILE),
        sets: dir.join(SETS_FILE),
    };
    write_json(&written.products, "base products", products)?;
    write_json(&written.sets, "commercial sets", sets)?;
    info!(
        products = products.len(),
        sets = sets.len(),
        dir = %dir.display(),
        "catalog written"
    );
    Ok(written)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, what: &'static str, value: &T) -> Result<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|source| CatalogError::Json { what, source })?;
    fs::write(path, json).map_err(|source| CatalogError::Output {
        path: path.to_path_buf(),
        source,
    })
}
