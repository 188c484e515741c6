//! Loading [`GenerationConfig`] documents.
//!
//! Both formats use the form field names (`noStore`, `maxAge`, `sMaxAge`,
//! ...). Every field is optional, but unknown fields are rejected.
//!
//! ```yaml
//! cacheability: public
//! immutable: true
//! maxAge:
//!   amount: 365
//!   unit: days
//!   enabled: true
//! ```

use cachectl::GenerationConfig;

use crate::error::ConfigError;

/// Deserializes a configuration from YAML.
pub fn from_yaml(yaml: &str) -> Result<GenerationConfig, ConfigError> {
    Ok(serde_saphyr::from_str(yaml)?)
}

/// Deserializes a configuration from JSON.
pub fn from_json(json: &str) -> Result<GenerationConfig, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

/// Serializes a configuration to pretty JSON, as a form would store it.
pub fn to_json(config: &GenerationConfig) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cachectl::{Cacheability, TimeUnit};

    #[test]
    fn test_yaml() {
        let yaml = r#"
cacheability: public
immutable: true
maxAge:
  amount: 365
  unit: days
  enabled: true
"#;
        let config = from_yaml(yaml).expect("failed to deserialize");
        assert_eq!(config.cacheability, Cacheability::Public);
        assert!(config.immutable);
        assert_eq!(config.max_age.unit, TimeUnit::Days);
        assert_eq!(cachectl::generate(&config), "public, immutable, max-age=31536000");
    }

    #[test]
    fn test_json_round_trip() {
        let config = GenerationConfig::default().no_store(true).no_transform(true);
        let json = to_json(&config).unwrap();
        assert!(json.contains("\"noStore\": true"));
        assert_eq!(from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_bad_unit() {
        let err = from_json(r#"{"maxAge": {"amount": 1, "unit": "weeks"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(from_yaml("maxAge:\n  amount: -5\n").is_err());
    }

    #[test]
    fn test_misspelled_field_rejected() {
        let yaml = "cacheability: public\nnoStroe: true\nmaxAge: {amount: 1, unit: days, enabled: true}\n";
        assert!(matches!(from_yaml(yaml), Err(ConfigError::Yaml(_))));

        let json = r#"{"maxAge": {"amount": 1, "unit": "days", "enable": true}}"#;
        assert!(matches!(from_json(json), Err(ConfigError::Json(_))));
    }
}
