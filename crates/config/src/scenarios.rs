//! Scenario catalog
//!
//! Scripted borrower profiles used to open a practice call. The built-in
//! catalog is embedded YAML; `ScenarioCatalog::load` reads a replacement
//! catalog with the same shape from disk.

use collection_sim_core::{Message, TurnRole};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::ConfigError;

const BUILTIN_SCENARIOS: &str = include_str!("../data/scenarios.yaml");

static BUILTIN_CATALOG: Lazy<ScenarioCatalog> = Lazy::new(|| {
    ScenarioCatalog::from_yaml(BUILTIN_SCENARIOS).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Built-in scenario catalog is invalid");
        ScenarioCatalog::default()
    })
});

/// A scripted borrower profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Lookup key, e.g. "job_loss"
    pub key: String,
    /// Human readable name
    pub name: String,
    /// Short label for menus
    #[serde(default)]
    pub menu_label: String,
    /// What the trainee should expect from this borrower
    pub description: String,
    /// How the borrower behaves
    pub persona: String,
    /// Transcript played before the trainee takes over
    pub starter: Vec<Message>,
}

impl Scenario {
    /// Menu label, falling back to the name
    pub fn label(&self) -> &str {
        if self.menu_label.is_empty() {
            &self.name
        } else {
            &self.menu_label
        }
    }

    /// Content of the system banner, if the script has one
    pub fn banner(&self) -> Option<&str> {
        self.starter
            .iter()
            .find(|m| m.role == TurnRole::System)
            .map(|m| m.content.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    scenarios: Vec<Scenario>,
}

/// Ordered, read-only collection of scenarios
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// The catalog embedded in the crate
    pub fn builtin() -> &'static ScenarioCatalog {
        &BUILTIN_CATALOG
    }

    /// Load a catalog from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::FileNotFound(format!("{}: {}", path.as_ref().display(), e))
        })?;
        let catalog = Self::from_yaml(&content)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            scenarios = catalog.len(),
            "Loaded scenario catalog"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        let catalog = Self {
            scenarios: file.scenarios,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            if scenario.key.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "scenarios[].key".to_string(),
                    message: format!("Scenario '{}' has an empty key", scenario.name),
                });
            }
            if !seen.insert(scenario.key.as_str()) {
                return Err(ConfigError::DuplicateScenario(scenario.key.clone()));
            }
            if scenario.starter.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("scenarios.{}.starter", scenario.key),
                    message: "Starter transcript cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Scenario keys in declaration order
    pub fn keys(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.key.as_str()).collect()
    }

    pub fn get(&self, key: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

/// Canned borrower input offered as a one-click reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickReply {
    pub label: &'static str,
    pub text: &'static str,
}

pub const QUICK_REPLIES: [QuickReply; 4] = [
    QuickReply {
        label: "Job Loss",
        text: "I lost my job recently and cannot pay.",
    },
    QuickReply {
        label: "Medical",
        text: "I have a medical emergency.",
    },
    QuickReply {
        label: "Refusal",
        text: "Stop calling me, I will not pay!",
    },
    QuickReply {
        label: "Constraint",
        text: "I have financial constraints right now.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = ScenarioCatalog::builtin();
        assert_eq!(
            catalog.keys(),
            vec!["job_loss", "strategic_default", "medical_emergency"]
        );

        for scenario in catalog.iter() {
            assert_eq!(scenario.starter.len(), 5);
            assert_eq!(scenario.starter[0].role, TurnRole::System);
            assert_eq!(
                scenario.starter.last().map(|m| m.role),
                Some(TurnRole::Borrower)
            );
        }
    }

    #[test]
    fn test_scenario_lookup() {
        let catalog = ScenarioCatalog::builtin();
        let scenario = catalog.get("strategic_default").unwrap();
        assert_eq!(scenario.name, "Strategic Avoidance");
        assert_eq!(scenario.persona, "Aggressive, dismissive, evasive.");
        assert!(scenario.banner().unwrap().contains("DPD: 60 Days"));

        assert!(catalog.get("lottery_win").is_none());
    }

    #[test]
    fn test_label_falls_back_to_name() {
        let yaml = r#"
scenarios:
  - key: custom
    name: Custom Borrower
    description: test
    persona: calm
    starter:
      - role: borrower
        content: Hello?
"#;
        let catalog = ScenarioCatalog::from_yaml(yaml).unwrap();
        assert_eq!(catalog.get("custom").unwrap().label(), "Custom Borrower");
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let yaml = r#"
scenarios:
  - key: dup
    name: A
    description: a
    persona: a
    starter: [{role: borrower, content: hi}]
  - key: dup
    name: B
    description: b
    persona: b
    starter: [{role: borrower, content: hi}]
"#;
        assert!(matches!(
            ScenarioCatalog::from_yaml(yaml),
            Err(ConfigError::DuplicateScenario(key)) if key == "dup"
        ));
    }

    #[test]
    fn test_empty_starter_rejected() {
        let yaml = r#"
scenarios:
  - key: silent
    name: Silent
    description: s
    persona: s
    starter: []
"#;
        assert!(ScenarioCatalog::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let yaml = r#"
scenarios:
  - key: odd
    name: Odd
    description: o
    persona: o
    starter: [{role: supervisor, content: hi}]
"#;
        assert!(matches!(
            ScenarioCatalog::from_yaml(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenarios.yaml");
        std::fs::write(&path, BUILTIN_SCENARIOS).unwrap();

        let catalog = ScenarioCatalog::load(&path).unwrap();
        assert_eq!(&catalog, ScenarioCatalog::builtin());

        assert!(matches!(
            ScenarioCatalog::load(dir.path().join("missing.yaml")),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_quick_replies() {
        assert_eq!(QUICK_REPLIES.len(), 4);
        assert!(QUICK_REPLIES.iter().all(|q| !q.text.is_empty()));
    }
}
