// src/core/config.rs

use crate::core::common::OxiclustError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of representative points per cluster.
pub const DEFAULT_REPRESENT_POINTS: usize = 5;

/// Default shrink factor applied to representative points.
pub const DEFAULT_COMPRESSION: f64 = 0.5;

/// Parameters of a CURE run.
///
/// Missing keys in a TOML file fall back to the defaults, so a file holding
/// only `number_cluster = 3` is a complete configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CureConfig {
    /// Number of clusters the engine stops at.
    pub number_cluster: usize,
    /// Upper bound on representative points kept per cluster.
    pub number_represent_points: usize,
    /// How far representatives are pulled toward the mean, usually in `[0, 1]`.
    pub compression: f64,
}

/// Builder for `CureConfig`. `build` validates the result.
#[derive(Debug, Clone, Default)]
pub struct CureConfigBuilder {
    number_cluster: Option<usize>,
    number_represent_points: Option<usize>,
    compression: Option<f64>,
}

impl CureConfigBuilder {
    /// Creates a new CureConfigBuilder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of clusters to allocate
    pub fn number_cluster(mut self, number_cluster: usize) -> Self {
        self.number_cluster = Some(number_cluster);
        self
    }

    /// Sets the number of representative points per cluster
    pub fn number_represent_points(mut self, number_represent_points: usize) -> Self {
        self.number_represent_points = Some(number_represent_points);
        self
    }

    /// Sets the compression factor
    pub fn compression(mut self, compression: f64) -> Self {
        self.compression = Some(compression);
        self
    }

    /// Builds the CureConfig instance with validation
    pub fn build(self) -> Result<CureConfig, OxiclustError> {
        let defaults = CureConfig::default();
        let config = CureConfig {
            number_cluster: self.number_cluster.unwrap_or(defaults.number_cluster),
            number_represent_points: self
                .number_represent_points
                .unwrap_or(defaults.number_represent_points),
            compression: self.compression.unwrap_or(defaults.compression),
        };

        config.validate()?;
        Ok(config)
    }
}

impl Default for CureConfig {
    fn default() -> Self {
        Self {
            number_cluster: 1,
            number_represent_points: DEFAULT_REPRESENT_POINTS,
            compression: DEFAULT_COMPRESSION,
        }
    }
}

impl CureConfig {
    /// Creates a new CureConfigBuilder for fluent configuration
    pub fn builder() -> CureConfigBuilder {
        CureConfigBuilder::new()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `OxiclustError::InvalidArgument` naming the first bad parameter.
    pub fn validate(&self) -> Result<(), OxiclustError> {
        if self.number_cluster == 0 {
            return Err(OxiclustError::invalid_argument(
                "number_cluster",
                "amount of clusters should be greater than 0",
            ));
        }

        if self.number_represent_points == 0 {
            return Err(OxiclustError::invalid_argument(
                "number_represent_points",
                "amount of representatives should be greater than 0",
            ));
        }

        if !(self.compression >= 0.0 && self.compression.is_finite()) {
            return Err(OxiclustError::invalid_argument(
                "compression",
                format!("compression should be a non-negative number, got {}", self.compression),
            ));
        }

        Ok(())
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `OxiclustError::Configuration` if the file cannot be parsed,
    /// `OxiclustError::InvalidArgument` if it holds invalid values.
    pub fn load_from_file(path: &Path) -> Result<Self, OxiclustError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config: Self = toml::from_str(&contents).map_err(|e| {
                    OxiclustError::Configuration(format!(
                        "Failed to parse config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;

                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(OxiclustError::Io(e)),
        }
    }

    /// Loads configuration from an optional TOML file path.
    ///
    /// If `optional_path` is `None`, or the file doesn't exist, the default
    /// configuration is returned.
    pub fn load_or_default(optional_path: Option<&Path>) -> Result<Self, OxiclustError> {
        match optional_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = CureConfig::default();
        assert_eq!(config.number_cluster, 1);
        assert_eq!(config.number_represent_points, 5);
        assert_eq!(config.compression, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = CureConfig::builder()
            .number_cluster(4)
            .number_represent_points(3)
            .compression(0.2)
            .build()
            .unwrap();
        assert_eq!(config, CureConfig { number_cluster: 4, number_represent_points: 3, compression: 0.2 });
    }

    #[test]
    fn test_builder_rejects_each_bad_parameter() {
        let cases = [
            (CureConfig::builder().number_cluster(0), "number_cluster"),
            (CureConfig::builder().number_represent_points(0), "number_represent_points"),
            (CureConfig::builder().compression(-0.1), "compression"),
            (CureConfig::builder().compression(f64::NAN), "compression"),
        ];
        for (builder, expected) in cases {
            match builder.build() {
                Err(OxiclustError::InvalidArgument { parameter, .. }) => assert_eq!(parameter, expected),
                other => panic!("Expected InvalidArgument for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_load_from_file_with_partial_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "number_cluster = 3\ncompression = 0.25").unwrap();

        let config = CureConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.number_cluster, 3);
        assert_eq!(config.number_represent_points, DEFAULT_REPRESENT_POINTS);
        assert_eq!(config.compression, 0.25);
    }

    #[test]
    fn test_load_from_file_errors() {
        let mut garbage = NamedTempFile::new().unwrap();
        writeln!(garbage, "number_cluster = \"many\"").unwrap();
        assert!(matches!(
            CureConfig::load_from_file(garbage.path()),
            Err(OxiclustError::Configuration(_))
        ));

        let mut invalid = NamedTempFile::new().unwrap();
        writeln!(invalid, "number_represent_points = 0").unwrap();
        assert!(matches!(
            CureConfig::load_from_file(invalid.path()),
            Err(OxiclustError::InvalidArgument { parameter: "number_represent_points", .. })
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert_eq!(CureConfig::load_or_default(Some(&missing)).unwrap(), CureConfig::default());
        assert_eq!(CureConfig::load_or_default(None).unwrap(), CureConfig::default());
    }
}
