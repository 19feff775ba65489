//! 配置表单与扩展元数据类型

use serde::{Deserialize, Serialize};

/// Input type of a configuration field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Single choice from [`ConfigField::options`].
    Dropdown,
}

/// One choice in a dropdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigOption {
    /// Label shown to the user.
    pub name: String,
    /// Value stored when the option is picked.
    pub value: String,
}

impl ConfigOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A field of a configuration form rendered by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigField {
    /// Machine-readable key the value is stored under.
    pub name: String,
    /// Human-readable label.
    pub friendly_name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Choices for [`FieldType::Dropdown`]; empty for text fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ConfigOption>,
}

impl ConfigField {
    /// Required text field.
    pub fn text(name: &str, friendly_name: &str) -> Self {
        Self {
            name: name.to_string(),
            friendly_name: friendly_name.to_string(),
            field_type: FieldType::Text,
            required: true,
            description: None,
            options: Vec::new(),
        }
    }

    /// Required dropdown field.
    pub fn dropdown(name: &str, friendly_name: &str, options: Vec<ConfigOption>) -> Self {
        Self {
            field_type: FieldType::Dropdown,
            options,
            ..Self::text(name, friendly_name)
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Extension metadata shown in the host's extension list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionMetadata {
    pub display_name: String,
    pub version: String,
    pub author: String,
    pub website: String,
}

/// A package offered by the panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageOption {
    pub name: String,
    pub id: String,
}

/// Package catalog plus the static yes/no choices used by the product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCatalog {
    pub packages: Vec<PackageOption>,
    pub auto_ssl: Vec<ConfigOption>,
    pub reseller: Vec<ConfigOption>,
}

impl PackageCatalog {
    pub fn new(packages: Vec<PackageOption>) -> Self {
        Self {
            packages,
            auto_ssl: yes_no_options(),
            reseller: yes_no_options(),
        }
    }

    /// Catalog without packages, used when the panel could not be queried.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn package_options(&self) -> Vec<ConfigOption> {
        self.packages
            .iter()
            .map(|p| ConfigOption::new(p.name.clone(), p.id.clone()))
            .collect()
    }
}

fn yes_no_options() -> Vec<ConfigOption> {
    vec![ConfigOption::new("Yes", "1"), ConfigOption::new("No", "0")]
}
