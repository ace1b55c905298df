use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BitopError, Result};

fn default_namespace() -> String {
    String::from("minuteman")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BitopConfig {
    /// Prefix of every key minted by a client
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Probe and write filter candidates with one batched store call each
    #[serde(default)]
    pub batch_probes: bool,
}

impl Default for BitopConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            batch_probes: false,
        }
    }
}

impl BitopConfig {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_batch_probes(mut self, batch: bool) -> Self {
        self.batch_probes = batch;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.namespace.is_empty() {
            return Err(BitopError::InvalidNamespace);
        }
        Ok(())
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: BitopConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| BitopError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BitopConfig::default();
        assert_eq!(config.namespace, "minuteman");
        assert!(!config.batch_probes);
    }

    #[test]
    fn test_from_yaml_str() {
        let config = BitopConfig::from_yaml_str("namespace: ev\nbatch_probes: true\n").unwrap();
        assert_eq!(config, BitopConfig::new("ev").with_batch_probes(true));

        let config = BitopConfig::from_yaml_str("namespace: ev\n").unwrap();
        assert!(!config.batch_probes);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = BitopConfig::from_yaml_str("namespace: ev\nttl: 10\n").unwrap_err();
        assert!(matches!(err, BitopError::ConfigParse(_)));
    }

    #[test]
    fn test_empty_namespace_rejected() {
        let err = BitopConfig::from_yaml_str("namespace: ''\n").unwrap_err();
        assert!(matches!(err, BitopError::InvalidNamespace));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "namespace: events").unwrap();

        let config = BitopConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.namespace, "events");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BitopConfig::from_yaml_file(dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, BitopError::ConfigRead { .. }));
    }
}
