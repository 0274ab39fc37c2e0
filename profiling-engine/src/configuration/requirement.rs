// Configuration Requirements
// Declared, unbound algorithm parameters and the raw settings supplied for them

use crate::resources::ResourceReference;

use serde::{Deserialize, Serialize};

/// A CSV-like file the algorithm should read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInputSetting {
    /// Id of the registered file input
    pub id: i64,
    pub file_name: String,
    #[serde(default = "default_separator")]
    pub separator: char,
    #[serde(default = "default_quote_char")]
    pub quote_char: char,
    #[serde(default = "default_header")]
    pub header: bool,
}

fn default_separator() -> char {
    ','
}

fn default_quote_char() -> char {
    '"'
}

fn default_header() -> bool {
    true
}

impl FileInputSetting {
    pub fn new(id: i64, file_name: impl Into<String>) -> Self {
        Self {
            id,
            file_name: file_name.into(),
            separator: default_separator(),
            quote_char: default_quote_char(),
            header: default_header(),
        }
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }
}

/// A table reachable through a registered database connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInputSetting {
    /// Id of the registered table input
    pub id: i64,
    pub table: String,
    pub database_connection_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConnectionSetting {
    /// Id of the registered database connection
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// One raw value supplied for a requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConfigurationSetting {
    String { value: String },
    Boolean { value: bool },
    Integer { value: i64 },
    ListBox { selected: String },
    /// Several options ticked at once
    CheckBox { selected: Vec<String> },
    FileInput(FileInputSetting),
    TableInput(TableInputSetting),
    DatabaseConnection(DatabaseConnectionSetting),
}

impl ConfigurationSetting {
    pub fn string(value: impl Into<String>) -> Self {
        ConfigurationSetting::String {
            value: value.into(),
        }
    }

    pub fn boolean(value: bool) -> Self {
        ConfigurationSetting::Boolean { value }
    }

    pub fn integer(value: i64) -> Self {
        ConfigurationSetting::Integer { value }
    }

    pub fn list_box(selected: impl Into<String>) -> Self {
        ConfigurationSetting::ListBox {
            selected: selected.into(),
        }
    }

    pub fn check_box<S: Into<String>>(selected: impl IntoIterator<Item = S>) -> Self {
        ConfigurationSetting::CheckBox {
            selected: selected.into_iter().map(Into::into).collect(),
        }
    }

    /// Short name of the setting type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigurationSetting::String { .. } => "string",
            ConfigurationSetting::Boolean { .. } => "boolean",
            ConfigurationSetting::Integer { .. } => "integer",
            ConfigurationSetting::ListBox { .. } => "list box",
            ConfigurationSetting::CheckBox { .. } => "check box",
            ConfigurationSetting::FileInput(_) => "file input",
            ConfigurationSetting::TableInput(_) => "table input",
            ConfigurationSetting::DatabaseConnection(_) => "database connection",
        }
    }

    /// External resource this setting refers to, if any
    pub fn resource_reference(&self) -> Option<ResourceReference> {
        match self {
            ConfigurationSetting::FileInput(file) => Some(ResourceReference::FileInput(file.id)),
            ConfigurationSetting::TableInput(table) => {
                Some(ResourceReference::TableInput(table.id))
            }
            ConfigurationSetting::DatabaseConnection(connection) => {
                Some(ResourceReference::DatabaseConnection(connection.id))
            }
            _ => None,
        }
    }
}

/// The value shape a requirement declares
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum RequirementShape {
    String,
    Boolean,
    Integer,
    /// A choice among the declared options
    ListBox { options: Vec<String> },
    /// Any subset of the declared options, per setting
    CheckBox { options: Vec<String> },
    FileInput,
    TableInput,
    DatabaseConnection,
}

impl RequirementShape {
    pub fn name(&self) -> &'static str {
        match self {
            RequirementShape::String => "string",
            RequirementShape::Boolean => "boolean",
            RequirementShape::Integer => "integer",
            RequirementShape::ListBox { .. } => "list box",
            RequirementShape::CheckBox { .. } => "check box",
            RequirementShape::FileInput => "file input",
            RequirementShape::TableInput => "table input",
            RequirementShape::DatabaseConnection => "database connection",
        }
    }
}

/// A declared parameter together with the settings supplied for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationRequirement {
    pub identifier: String,
    #[serde(flatten)]
    pub shape: RequirementShape,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub settings: Vec<ConfigurationSetting>,
}

fn default_required() -> bool {
    true
}

impl ConfigurationRequirement {
    pub fn new(identifier: impl Into<String>, shape: RequirementShape) -> Self {
        Self {
            identifier: identifier.into(),
            shape,
            required: true,
            settings: Vec::new(),
        }
    }

    pub fn string(identifier: impl Into<String>) -> Self {
        Self::new(identifier, RequirementShape::String)
    }

    pub fn boolean(identifier: impl Into<String>) -> Self {
        Self::new(identifier, RequirementShape::Boolean)
    }

    pub fn integer(identifier: impl Into<String>) -> Self {
        Self::new(identifier, RequirementShape::Integer)
    }

    pub fn list_box(identifier: impl Into<String>, options: Vec<String>) -> Self {
        Self::new(identifier, RequirementShape::ListBox { options })
    }

    pub fn check_box(identifier: impl Into<String>, options: Vec<String>) -> Self {
        Self::new(identifier, RequirementShape::CheckBox { options })
    }

    pub fn file_input(identifier: impl Into<String>) -> Self {
        Self::new(identifier, RequirementShape::FileInput)
    }

    pub fn table_input(identifier: impl Into<String>) -> Self {
        Self::new(identifier, RequirementShape::TableInput)
    }

    pub fn database_connection(identifier: impl Into<String>) -> Self {
        Self::new(identifier, RequirementShape::DatabaseConnection)
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_setting(mut self, setting: ConfigurationSetting) -> Self {
        self.settings.push(setting);
        self
    }

    pub fn with_settings(
        mut self,
        settings: impl IntoIterator<Item = ConfigurationSetting>,
    ) -> Self {
        self.settings.extend(settings);
        self
    }

    /// All external resources referenced by the settings
    pub fn resource_references(&self) -> impl Iterator<Item = ResourceReference> + '_ {
        self.settings
            .iter()
            .filter_map(ConfigurationSetting::resource_reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_from_json() {
        let json = r#"{
            "identifier": "INPUT",
            "shape": "fileInput",
            "settings": [
                { "type": "fileInput", "id": 3, "fileName": "people.csv", "separator": ";" }
            ]
        }"#;

        let requirement: ConfigurationRequirement = serde_json::from_str(json).unwrap();
        assert_eq!(requirement.identifier, "INPUT");
        assert_eq!(requirement.shape, RequirementShape::FileInput);
        assert!(requirement.required);

        match &requirement.settings[0] {
            ConfigurationSetting::FileInput(file) => {
                assert_eq!(file.file_name, "people.csv");
                assert_eq!(file.separator, ';');
                assert!(file.header);
            }
            other => panic!("unexpected setting {:?}", other),
        }
    }

    #[test]
    fn test_list_box_shape_from_json() {
        let json = r#"{
            "identifier": "ORDER",
            "shape": "listBox",
            "options": ["asc", "desc"],
            "required": false,
            "settings": [{ "type": "listBox", "selected": "desc" }]
        }"#;

        let requirement: ConfigurationRequirement = serde_json::from_str(json).unwrap();
        assert_eq!(
            requirement.shape,
            RequirementShape::ListBox {
                options: vec!["asc".to_string(), "desc".to_string()]
            }
        );
        assert!(!requirement.required);
    }

    #[test]
    fn test_check_box_shape_from_json() {
        let json = r#"{
            "identifier": "COLUMNS",
            "shape": "checkBox",
            "options": ["id", "name", "email"],
            "settings": [
                { "type": "checkBox", "selected": ["id", "email"] },
                { "type": "checkBox", "selected": [] }
            ]
        }"#;

        let requirement: ConfigurationRequirement = serde_json::from_str(json).unwrap();
        assert_eq!(requirement.shape.name(), "check box");
        assert_eq!(
            requirement.settings,
            vec![
                ConfigurationSetting::check_box(["id", "email"]),
                ConfigurationSetting::CheckBox { selected: vec![] },
            ]
        );
    }

    #[test]
    fn test_resource_references() {
        let requirement = ConfigurationRequirement::file_input("INPUT")
            .with_setting(ConfigurationSetting::FileInput(FileInputSetting::new(1, "a.csv")))
            .with_setting(ConfigurationSetting::FileInput(FileInputSetting::new(2, "b.csv")));

        let references: Vec<_> = requirement.resource_references().collect();
        assert_eq!(
            references,
            vec![ResourceReference::FileInput(1), ResourceReference::FileInput(2)]
        );

        let plain = ConfigurationRequirement::string("NAME")
            .with_setting(ConfigurationSetting::string("x"));
        assert_eq!(plain.resource_references().count(), 0);
    }
}
