use std::path::PathBuf;

use crate::schema::year_column;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "Production_Crops_E_Americas.csv";

/// Where and how to read the raw dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub path: PathBuf,
    /// Encoding label, e.g. `latin1` or `utf-8`. See `loader::resolve_encoding`.
    pub encoding: String,
    pub separator: u8,
}

impl LoaderConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_FILE),
            encoding: "latin1".to_string(),
            separator: b',',
        }
    }
}

/// Markers identifying year columns in the wide table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReshapeConfig {
    pub year_prefix: String,
    pub flag_suffix: String,
}

impl Default for ReshapeConfig {
    fn default() -> Self {
        Self {
            year_prefix: year_column::PREFIX.to_string(),
            flag_suffix: year_column::FLAG_SUFFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.path, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.encoding, "latin1");
        assert_eq!(config.separator, b',');
    }

    #[test]
    fn loader_builders() {
        let config = LoaderConfig::new("data/crops.tsv")
            .with_encoding("utf-8")
            .with_separator(b'\t');
        assert_eq!(config.path, PathBuf::from("data/crops.tsv"));
        assert_eq!(config.encoding, "utf-8");
        assert_eq!(config.separator, b'\t');
    }
}
