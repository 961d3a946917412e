use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

/// Run settings: built-in defaults, then `veiling.toml` if present, then
/// `VEILING_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub progress_every: usize,
    pub chunk_size: usize,
    pub parallel: bool,
    pub output_dir: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder().add_source(File::with_name("veiling").required(false)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let settings = builder
            .add_source(Environment::with_prefix("VEILING").try_parsing(true))
            .set_default("progress_every", 1000_i64)?
            .set_default("chunk_size", 500_i64)?
            .set_default("parallel", true)?
            .set_default("output_dir", "out")?
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            progress_every: 1000,
            chunk_size: 500,
            parallel: true,
            output_dir: PathBuf::from("out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use config::FileFormat;

    #[test]
    fn defaults_without_sources() {
        let s = Settings::from_builder(Config::builder()).unwrap();
        assert_eq!(s.chunk_size, Settings::default().chunk_size);
        assert_eq!(s.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn file_values_override_defaults() {
        let builder = Config::builder().add_source(File::from_str(
            "progress_every = 10\nparallel = false\noutput_dir = \"dist\"",
            FileFormat::Toml,
        ));
        let s = Settings::from_builder(builder).unwrap();
        assert_eq!(s.progress_every, 10);
        assert!(!s.parallel);
        assert_eq!(s.output_dir, PathBuf::from("dist"));
        assert_eq!(s.chunk_size, 500);
    }

    #[test]
    fn bad_value_is_an_error() {
        let builder =
            Config::builder().add_source(File::from_str("chunk_size = \"abc\"", FileFormat::Toml));
        let err = Settings::from_builder(builder).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)), "{:?}", err);
    }
}
