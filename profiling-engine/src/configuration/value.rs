// Configuration Values
// Bound, typed configuration values ready to be applied to an algorithm

use crate::capability::Capability;
use crate::configuration::requirement::{
    DatabaseConnectionSetting, FileInputSetting, TableInputSetting,
};

/// A value built from a requirement, applied once to one algorithm
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationValue {
    String {
        identifier: String,
        values: Vec<String>,
    },
    Boolean {
        identifier: String,
        values: Vec<bool>,
    },
    Integer {
        identifier: String,
        values: Vec<i64>,
    },
    ListBox {
        identifier: String,
        selected: Vec<String>,
    },
    /// One selection of options per setting
    CheckBox {
        identifier: String,
        selected: Vec<Vec<String>>,
    },
    FileInput {
        identifier: String,
        files: Vec<FileInputSetting>,
    },
    TableInput {
        identifier: String,
        tables: Vec<TableInputSetting>,
    },
    DatabaseConnection {
        identifier: String,
        connections: Vec<DatabaseConnectionSetting>,
    },
}

impl ConfigurationValue {
    pub fn identifier(&self) -> &str {
        match self {
            ConfigurationValue::String { identifier, .. }
            | ConfigurationValue::Boolean { identifier, .. }
            | ConfigurationValue::Integer { identifier, .. }
            | ConfigurationValue::ListBox { identifier, .. }
            | ConfigurationValue::CheckBox { identifier, .. }
            | ConfigurationValue::FileInput { identifier, .. }
            | ConfigurationValue::TableInput { identifier, .. }
            | ConfigurationValue::DatabaseConnection { identifier, .. } => identifier,
        }
    }

    /// Name of the value kind, as used in "does not accept <kind> configuration values"
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigurationValue::String { .. } => "string",
            ConfigurationValue::Boolean { .. } => "boolean",
            ConfigurationValue::Integer { .. } => "integer",
            ConfigurationValue::ListBox { .. } => "list box",
            ConfigurationValue::CheckBox { .. } => "check box",
            ConfigurationValue::FileInput { .. } => "file input",
            ConfigurationValue::TableInput { .. } => "table input",
            ConfigurationValue::DatabaseConnection { .. } => "database connection",
        }
    }

    /// The capability an algorithm must implement to accept this value
    pub fn required_capability(&self) -> Capability {
        match self {
            ConfigurationValue::String { .. } => Capability::StringConfiguration,
            ConfigurationValue::Boolean { .. } => Capability::BooleanConfiguration,
            ConfigurationValue::Integer { .. } => Capability::IntegerConfiguration,
            ConfigurationValue::ListBox { .. } => Capability::ListBoxConfiguration,
            ConfigurationValue::CheckBox { .. } => Capability::CheckBoxConfiguration,
            ConfigurationValue::FileInput { .. } => Capability::FileInputConfiguration,
            ConfigurationValue::TableInput { .. } => Capability::TableInputConfiguration,
            ConfigurationValue::DatabaseConnection { .. } => {
                Capability::DatabaseConnectionConfiguration
            }
        }
    }
}
