#![deny(missing_docs)]

//! # Configuration
//!
//! Installation settings for the documentation endpoint and the two documents.
//! Loadable from YAML or JSON; at least one document must be configured.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Top-level installation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsConfig {
    /// URL segment the docs are mounted under (no slashes).
    #[serde(default = "default_path")]
    pub path: String,
    /// Whether `/` also redirects to the UI.
    #[serde(default)]
    pub forward_root: bool,
    /// Whether UI assets are served next to the documents.
    #[serde(default = "default_true")]
    pub provide_ui: bool,
    /// Swagger 2.0 document settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swagger: Option<DocumentConfig>,
    /// OpenAPI 3.0 document settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openapi: Option<DocumentConfig>,
}

fn default_path() -> String {
    "apidocs".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            forward_root: false,
            provide_ui: true,
            swagger: None,
            openapi: None,
        }
    }
}

impl DocsConfig {
    /// Parses settings from YAML text.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parses settings from JSON text.
    pub fn from_json_str(content: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads settings from a `.json` file or, for any other extension, a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Sets the Swagger 2.0 document.
    pub fn with_swagger(mut self, document: DocumentConfig) -> Self {
        self.swagger = Some(document);
        self
    }

    /// Sets the OpenAPI 3.0 document.
    pub fn with_openapi(mut self, document: DocumentConfig) -> Self {
        self.openapi = Some(document);
        self
    }

    /// Sets the mount path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets root forwarding.
    pub fn with_forward_root(mut self, forward_root: bool) -> Self {
        self.forward_root = forward_root;
        self
    }

    /// Sets whether UI assets are served.
    pub fn with_provide_ui(mut self, provide_ui: bool) -> Self {
        self.provide_ui = provide_ui;
        self
    }

    /// Checks the settings are usable.
    pub fn validate(&self) -> AppResult<()> {
        if self.swagger.is_none() && self.openapi.is_none() {
            return Err(AppError::Config(
                "Swagger or OpenApi must be specified".to_string(),
            ));
        }
        let trimmed = self.path.trim_matches('/');
        if trimmed.is_empty() {
            return Err(AppError::Config("Docs path must not be empty".to_string()));
        }
        Ok(())
    }

    /// The mount path without surrounding slashes.
    pub fn normalized_path(&self) -> &str {
        self.path.trim_matches('/')
    }

    /// The document the UI loads by default.
    pub fn default_file(&self) -> &'static str {
        if self.openapi.is_some() {
            "openapi.json"
        } else {
            "swagger.json"
        }
    }
}

/// Settings for one dialect document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// The `info` block.
    pub info: Information,
    /// Author-declared schemas, seeded before any route registers.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Value>,
}

impl DocumentConfig {
    /// A document with the given info and no declared schemas.
    pub fn new(info: Information) -> Self {
        Self {
            info,
            definitions: IndexMap::new(),
        }
    }

    /// Declares a schema by name.
    pub fn with_definition(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.definitions.insert(name.into(), schema);
        self
    }
}

/// Document `info` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Information {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Terms of service URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    /// Contact details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

impl Information {
    /// Creates an info block with required fields.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            terms_of_service: None,
            contact: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the terms of service URL.
    pub fn with_terms_of_service(mut self, terms: impl Into<String>) -> Self {
        self.terms_of_service = Some(terms.into());
        self
    }

    /// Sets contact details.
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }
}

/// Contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Person or organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_requires_a_document() {
        let err = DocsConfig::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration Error: Swagger or OpenApi must be specified"
        );
    }

    #[test]
    fn test_yaml_defaults() {
        let yaml = r#"
swagger:
  info:
    title: Pets
    version: "1.0"
    termsOfService: http://example.com/terms
    contact:
      email: pets@example.com
  definitions:
    petUuid:
      type: string
      format: uuid
"#;
        let config = DocsConfig::from_yaml_str(yaml).unwrap();
        config.validate().unwrap();

        assert_eq!(config.path, "apidocs");
        assert!(!config.forward_root);
        assert!(config.provide_ui);
        assert_eq!(config.default_file(), "swagger.json");

        let swagger = config.swagger.unwrap();
        assert_eq!(
            swagger.info.terms_of_service.as_deref(),
            Some("http://example.com/terms")
        );
        assert_eq!(
            swagger.definitions["petUuid"],
            json!({ "type": "string", "format": "uuid" })
        );
    }

    #[test]
    fn test_openapi_is_default_file() {
        let info = Information::new("Pets", "1.0");
        let config = DocsConfig::default()
            .with_swagger(DocumentConfig::new(info.clone()))
            .with_openapi(DocumentConfig::new(info));
        assert_eq!(config.default_file(), "openapi.json");
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let content = json!({
            "path": "/docs/",
            "forwardRoot": true,
            "openapi": { "info": { "title": "t", "version": "2" } }
        });
        write!(file, "{}", content).unwrap();

        let config = DocsConfig::from_path(file.path()).unwrap();
        assert!(config.forward_root);
        assert_eq!(config.normalized_path(), "docs");
        assert_eq!(config.openapi.unwrap().info.version, "2");
    }

    #[test]
    fn test_info_serialization_skips_missing() {
        let info = Information::new("Pets", "1.0").with_description("All the pets");
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({ "title": "Pets", "version": "1.0", "description": "All the pets" })
        );
    }
}
