use crate::{error::Result, validation::Constraints};
use serde::{Deserialize, Serialize};

/// Names of the templates each view is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateNames {
    pub input: String,
    pub list: String,
    pub item: String,
}

impl Default for TemplateNames {
    fn default() -> Self {
        Self {
            input: "project-input".to_string(),
            list: "project-list".to_string(),
            item: "single-project".to_string(),
        }
    }
}

/// Validation rules for the new-item form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRules {
    pub title: Constraints,
    pub description: Constraints,
    pub people: Constraints,
}

impl Default for InputRules {
    fn default() -> Self {
        Self {
            title: Constraints::required(),
            description: Constraints::required().with_min_length(5),
            people: Constraints::required().with_range(1.0, 5.0),
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub name: String,
    /// Identifier of the element the top-level views attach to
    pub host_id: String,
    pub templates: TemplateNames,
    pub rules: InputRules,
}

impl BoardConfig {
    /// Parses a configuration, filling omitted fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Project Board".to_string(),
            host_id: "app".to_string(),
            templates: TemplateNames::default(),
            rules: InputRules::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.host_id, "app");
        assert_eq!(config.templates.item, "single-project");
        assert_eq!(config.rules.description.min_length, Some(5));
        assert_eq!(config.rules.people.max, Some(5.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BoardConfig::from_json(
            r#"{"host_id": "root", "rules": {"people": {"required": true, "min": 1, "max": 10}}}"#,
        )
        .unwrap();

        assert_eq!(config.host_id, "root");
        assert_eq!(config.templates, TemplateNames::default());
        assert_eq!(config.rules.people.max, Some(10.0));
        assert_eq!(config.rules.title, Constraints::required());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            BoardConfig::from_json("{not json"),
            Err(BoardError::SerializationError(_))
        ));
    }
}
