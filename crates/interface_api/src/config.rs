//! API configuration

use serde::Deserialize;

use core_kernel::CoreError;
use form_model::ReportFieldsDefinition;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Optional path to a JSON report-fields definition; the compiled-in
    /// allow-lists are used when unset
    pub report_fields_path: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            report_fields_path: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Loads the report-fields definition this deployment should use.
    pub fn load_report_fields(&self) -> Result<ReportFieldsDefinition, CoreError> {
        match &self.report_fields_path {
            Some(path) => ReportFieldsDefinition::from_path(path),
            None => Ok(ReportFieldsDefinition::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert!(config.report_fields_path.is_none());
    }

    #[test]
    fn test_builtin_report_fields_without_path() {
        let config = ApiConfig::default();
        let definition = config.load_report_fields().unwrap();
        assert!(!definition.get("ec_registration").is_empty());
    }
}
