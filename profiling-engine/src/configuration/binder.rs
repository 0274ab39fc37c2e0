// Configuration Binder
// Builds configuration values from requirements and applies them through capability handles

use crate::algorithm::Algorithm;
use crate::capability::{CapabilityAnalyzer, CapabilityHandle, CapabilitySet};
use crate::configuration::requirement::{
    ConfigurationRequirement, ConfigurationSetting, RequirementShape,
};
use crate::configuration::value::ConfigurationValue;
use crate::error::{EngineError, EngineResult};
use crate::resources::{Input, ResourceResolver};

/// Binds requirements onto one algorithm and collects the inputs they reference
pub struct ConfigurationBinder<'r> {
    resolver: &'r dyn ResourceResolver,
    inputs: Vec<Input>,
}

impl<'r> ConfigurationBinder<'r> {
    pub fn new(resolver: &'r dyn ResourceResolver) -> Self {
        Self {
            resolver,
            inputs: Vec::new(),
        }
    }

    /// Build the typed value for a requirement from its raw settings
    pub fn build(requirement: &ConfigurationRequirement) -> EngineResult<ConfigurationValue> {
        if requirement.required && requirement.settings.is_empty() {
            return Err(EngineError::configuration(format!(
                "no value given for required {} requirement",
                requirement.shape.name()
            ))
            .with_requirement(&requirement.identifier));
        }

        let identifier = requirement.identifier.clone();

        let value = match &requirement.shape {
            RequirementShape::String => ConfigurationValue::String {
                identifier,
                values: collect_settings(requirement, |setting| match setting {
                    ConfigurationSetting::String { value } => Some(value.clone()),
                    _ => None,
                })?,
            },
            RequirementShape::Boolean => ConfigurationValue::Boolean {
                identifier,
                values: collect_settings(requirement, |setting| match setting {
                    ConfigurationSetting::Boolean { value } => Some(*value),
                    _ => None,
                })?,
            },
            RequirementShape::Integer => ConfigurationValue::Integer {
                identifier,
                values: collect_settings(requirement, |setting| match setting {
                    ConfigurationSetting::Integer { value } => Some(*value),
                    _ => None,
                })?,
            },
            RequirementShape::ListBox { options } => {
                let selected = collect_settings(requirement, |setting| match setting {
                    ConfigurationSetting::ListBox { selected } => Some(selected.clone()),
                    _ => None,
                })?;

                if let Some(unknown) = selected.iter().find(|s| !options.contains(s)) {
                    return Err(EngineError::configuration(format!(
                        "'{}' is not one of the options: {}",
                        unknown,
                        options.join(", ")
                    ))
                    .with_requirement(&requirement.identifier));
                }

                ConfigurationValue::ListBox {
                    identifier,
                    selected,
                }
            }
            RequirementShape::CheckBox { options } => {
                let selected = collect_settings(requirement, |setting| match setting {
                    ConfigurationSetting::CheckBox { selected } => Some(selected.clone()),
                    _ => None,
                })?;

                if let Some(unknown) = selected.iter().flatten().find(|s| !options.contains(s)) {
                    return Err(EngineError::configuration(format!(
                        "'{}' is not one of the options: {}",
                        unknown,
                        options.join(", ")
                    ))
                    .with_requirement(&requirement.identifier));
                }

                ConfigurationValue::CheckBox {
                    identifier,
                    selected,
                }
            }
            RequirementShape::FileInput => ConfigurationValue::FileInput {
                identifier,
                files: collect_settings(requirement, |setting| match setting {
                    ConfigurationSetting::FileInput(file) => Some(file.clone()),
                    _ => None,
                })?,
            },
            RequirementShape::TableInput => ConfigurationValue::TableInput {
                identifier,
                tables: collect_settings(requirement, |setting| match setting {
                    ConfigurationSetting::TableInput(table) => Some(table.clone()),
                    _ => None,
                })?,
            },
            RequirementShape::DatabaseConnection => ConfigurationValue::DatabaseConnection {
                identifier,
                connections: collect_settings(requirement, |setting| match setting {
                    ConfigurationSetting::DatabaseConnection(connection) => {
                        Some(connection.clone())
                    }
                    _ => None,
                })?,
            },
        };

        Ok(value)
    }

    /// Resolve every file, table or database connection the requirement refers to
    pub fn resolve_inputs(
        &mut self,
        requirement: &ConfigurationRequirement,
    ) -> EngineResult<usize> {
        let mut resolved = 0;

        for reference in requirement.resource_references() {
            let input = self.resolver.resolve(&reference).map_err(|e| {
                EngineError::configuration(format!("could not resolve {}", reference))
                    .with_requirement(&requirement.identifier)
                    .with_source(e)
            })?;
            self.inputs.push(input);
            resolved += 1;
        }

        Ok(resolved)
    }

    /// Apply a value to the algorithm, provided it has the matching capability
    pub fn apply(
        value: &ConfigurationValue,
        algorithm: &mut dyn Algorithm,
        capabilities: &CapabilitySet,
    ) -> EngineResult<()> {
        let capability = value.required_capability();
        let rejected = || {
            EngineError::configuration(format!(
                "algorithm does not accept {} configuration values",
                value.kind_name()
            ))
            .with_requirement(value.identifier())
            .with_capability(capability)
        };

        if !capabilities.has(capability) {
            return Err(rejected());
        }

        let Some(handle) = CapabilityAnalyzer::implements(algorithm, capability) else {
            return Err(rejected());
        };

        let applied = match (value, handle) {
            (
                ConfigurationValue::String { identifier, values },
                CapabilityHandle::StringConfiguration(target),
            ) => target.set_string_configuration_value(identifier, values),
            (
                ConfigurationValue::Boolean { identifier, values },
                CapabilityHandle::BooleanConfiguration(target),
            ) => target.set_boolean_configuration_value(identifier, values),
            (
                ConfigurationValue::Integer { identifier, values },
                CapabilityHandle::IntegerConfiguration(target),
            ) => target.set_integer_configuration_value(identifier, values),
            (
                ConfigurationValue::ListBox {
                    identifier,
                    selected,
                },
                CapabilityHandle::ListBoxConfiguration(target),
            ) => target.set_list_box_configuration_value(identifier, selected),
            (
                ConfigurationValue::CheckBox {
                    identifier,
                    selected,
                },
                CapabilityHandle::CheckBoxConfiguration(target),
            ) => target.set_check_box_configuration_value(identifier, selected),
            (
                ConfigurationValue::FileInput { identifier, files },
                CapabilityHandle::FileInputConfiguration(target),
            ) => target.set_file_input_configuration_value(identifier, files),
            (
                ConfigurationValue::TableInput { identifier, tables },
                CapabilityHandle::TableInputConfiguration(target),
            ) => target.set_table_input_configuration_value(identifier, tables),
            (
                ConfigurationValue::DatabaseConnection {
                    identifier,
                    connections,
                },
                CapabilityHandle::DatabaseConnectionConfiguration(target),
            ) => target.set_database_connection_configuration_value(identifier, connections),
            _ => return Err(rejected()),
        };

        applied.map_err(|e| {
            EngineError::configuration(format!(
                "algorithm rejected {} configuration value",
                value.kind_name()
            ))
            .with_requirement(value.identifier())
            .with_capability(capability)
            .with_source(e)
        })
    }

    /// Build and resolve every requirement, then apply the values in order.
    ///
    /// The first failure aborts; values applied before it are not rolled back.
    pub fn bind_all(
        &mut self,
        requirements: &[ConfigurationRequirement],
        algorithm: &mut dyn Algorithm,
        capabilities: &CapabilitySet,
    ) -> EngineResult<Vec<ConfigurationValue>> {
        let mut values = Vec::with_capacity(requirements.len());

        for requirement in requirements {
            values.push(Self::build(requirement)?);
            self.resolve_inputs(requirement)?;
        }

        for value in &values {
            Self::apply(value, &mut *algorithm, capabilities)?;
        }

        Ok(values)
    }

    /// Inputs resolved so far
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn into_inputs(self) -> Vec<Input> {
        self.inputs
    }
}

fn collect_settings<T>(
    requirement: &ConfigurationRequirement,
    extract: impl Fn(&ConfigurationSetting) -> Option<T>,
) -> EngineResult<Vec<T>> {
    requirement
        .settings
        .iter()
        .map(|setting| {
            extract(setting).ok_or_else(|| {
                EngineError::configuration(format!(
                    "{} requirement cannot take a {} setting",
                    requirement.shape.name(),
                    setting.type_name()
                ))
                .with_requirement(&requirement.identifier)
            })
        })
        .collect()
}
