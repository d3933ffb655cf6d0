use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorConfig {
    /// Diagram file, relative to the diagrams directory.
    pub diagram: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Floor registry read from `floors.yaml`, keyed by floor number:
///
/// ```yaml
/// "4":
///   diagram: Floor4.svg
///   name: Fourth floor
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FloorsConfig {
    #[serde(flatten)]
    pub floors: BTreeMap<String, FloorConfig>,
}

impl FloorsConfig {
    pub fn new() -> Self {
        Self {
            floors: BTreeMap::new(),
        }
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path)?;

        // Handle empty file
        if contents.trim().is_empty() {
            return Ok(Self::new());
        }

        let config: FloorsConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn get_floor(&self, floor: &str) -> Option<&FloorConfig> {
        self.floors.get(floor)
    }

    pub fn diagram_path(&self, diagrams_dir: &str, floor: &str) -> Option<PathBuf> {
        self.get_floor(floor)
            .map(|f| Path::new(diagrams_dir).join(&f.diagram))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_floors_yaml() {
        let yaml = r#"
"4":
  diagram: Floor4.svg
  name: Fourth floor
"5":
  diagram: floors/Floor5.svg
"#;
        let config: FloorsConfig = serde_yaml::from_str(yaml).unwrap();

        let floors: Vec<_> = config.floors.keys().map(String::as_str).collect();
        assert_eq!(floors, vec!["4", "5"]);
        assert_eq!(
            config.get_floor("4").and_then(|f| f.name.as_deref()),
            Some("Fourth floor")
        );
        assert_eq!(
            config.diagram_path("diagrams", "5"),
            Some(Path::new("diagrams").join("floors/Floor5.svg"))
        );
        assert!(config.get_floor("6").is_none());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let config = FloorsConfig::load_from_file("does-not-exist.yaml").unwrap();
        assert!(config.floors.is_empty());
    }
}
