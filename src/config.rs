use crate::types::Config;
use anyhow::Result;
use std::fs;
use std::path::Path;

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load `config.yaml` if present, otherwise fall back to defaults. All
    /// fields are defaulted, so a partial file is also fine.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{Config, DedupePolicy, TieBreak};

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let cfg: Config = serde_yaml::from_str("counting:\n  tie_break: exterior_first\n")
            .expect("partial config should parse");
        assert_eq!(cfg.counting.tie_break, TieBreak::ExteriorFirst);
        assert_eq!(cfg.counting.dedupe, DedupePolicy::ConsecutiveCollapse);
        assert!(cfg.counting.use_both_diagonals);
        assert_eq!(cfg.input.session_path, "detections.json");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let cfg: Config = serde_yaml::from_str("{}").expect("empty config should parse");
        assert_eq!(cfg.logging.level, "info");
    }
}
