// Algorithm Contracts
// The executable algorithm trait and the optional capability traits it may implement

use crate::configuration::{DatabaseConnectionSetting, FileInputSetting, TableInputSetting};
use crate::progress::ProgressReceiver;
use crate::results::receiver::{
    BasicStatisticsResultReceiver, ConditionalUniqueColumnCombinationResultReceiver,
    FunctionalDependencyResultReceiver, InclusionDependencyResultReceiver,
    OrderDependencyResultReceiver, UniqueColumnCombinationResultReceiver,
};
use crate::results::router::CouldNotReceiveResult;
use crate::temp_files::{TempFileError, TempFileGenerator};

use std::sync::Arc;
use thiserror::Error;

/// Errors an algorithm raises from its execute call
#[derive(Debug, Error)]
pub enum AlgorithmExecutionError {
    #[error("Algorithm failed: {0}")]
    Failed(String),

    #[error("Result could not be delivered: {0}")]
    ResultDelivery(#[from] CouldNotReceiveResult),

    #[error("Temp file error: {0}")]
    TempFile(#[from] TempFileError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors an algorithm raises while accepting a configuration value
#[derive(Debug, Error)]
pub enum AlgorithmConfigurationError {
    #[error("Unknown configuration identifier: {0}")]
    UnknownIdentifier(String),

    #[error("Invalid value for '{identifier}': {reason}")]
    InvalidValue { identifier: String, reason: String },
}

/// A pluggable profiling algorithm.
///
/// Only `execute` is mandatory. Every optional capability is exposed through
/// an `as_*` accessor that returns `None` unless the algorithm overrides it
/// to hand out itself as the capability trait object.
pub trait Algorithm: Send {
    /// Run the algorithm to completion. This call blocks.
    fn execute(&mut self) -> Result<(), AlgorithmExecutionError>;

    fn as_functional_dependency(&mut self) -> Option<&mut dyn FunctionalDependencyAlgorithm> {
        None
    }

    fn as_inclusion_dependency(&mut self) -> Option<&mut dyn InclusionDependencyAlgorithm> {
        None
    }

    fn as_unique_column_combination(
        &mut self,
    ) -> Option<&mut dyn UniqueColumnCombinationAlgorithm> {
        None
    }

    fn as_conditional_unique_column_combination(
        &mut self,
    ) -> Option<&mut dyn ConditionalUniqueColumnCombinationAlgorithm> {
        None
    }

    fn as_order_dependency(&mut self) -> Option<&mut dyn OrderDependencyAlgorithm> {
        None
    }

    fn as_basic_statistics(&mut self) -> Option<&mut dyn BasicStatisticsAlgorithm> {
        None
    }

    fn as_string_parameter(&mut self) -> Option<&mut dyn StringParameterAlgorithm> {
        None
    }

    fn as_boolean_parameter(&mut self) -> Option<&mut dyn BooleanParameterAlgorithm> {
        None
    }

    fn as_integer_parameter(&mut self) -> Option<&mut dyn IntegerParameterAlgorithm> {
        None
    }

    fn as_list_box_parameter(&mut self) -> Option<&mut dyn ListBoxParameterAlgorithm> {
        None
    }

    fn as_check_box_parameter(&mut self) -> Option<&mut dyn CheckBoxParameterAlgorithm> {
        None
    }

    fn as_file_input_parameter(&mut self) -> Option<&mut dyn FileInputParameterAlgorithm> {
        None
    }

    fn as_table_input_parameter(&mut self) -> Option<&mut dyn TableInputParameterAlgorithm> {
        None
    }

    fn as_database_connection_parameter(
        &mut self,
    ) -> Option<&mut dyn DatabaseConnectionParameterAlgorithm> {
        None
    }

    fn as_temp_file(&mut self) -> Option<&mut dyn TempFileAlgorithm> {
        None
    }

    fn as_progress_estimating(&mut self) -> Option<&mut dyn ProgressEstimatingAlgorithm> {
        None
    }
}

// Result-producing capabilities

pub trait FunctionalDependencyAlgorithm {
    fn set_result_receiver(&mut self, receiver: Arc<dyn FunctionalDependencyResultReceiver>);
}

pub trait InclusionDependencyAlgorithm {
    fn set_result_receiver(&mut self, receiver: Arc<dyn InclusionDependencyResultReceiver>);
}

pub trait UniqueColumnCombinationAlgorithm {
    fn set_result_receiver(&mut self, receiver: Arc<dyn UniqueColumnCombinationResultReceiver>);
}

pub trait ConditionalUniqueColumnCombinationAlgorithm {
    fn set_result_receiver(
        &mut self,
        receiver: Arc<dyn ConditionalUniqueColumnCombinationResultReceiver>,
    );
}

pub trait OrderDependencyAlgorithm {
    fn set_result_receiver(&mut self, receiver: Arc<dyn OrderDependencyResultReceiver>);
}

pub trait BasicStatisticsAlgorithm {
    fn set_result_receiver(&mut self, receiver: Arc<dyn BasicStatisticsResultReceiver>);
}

// Configuration-accepting capabilities

pub trait StringParameterAlgorithm {
    fn set_string_configuration_value(
        &mut self,
        identifier: &str,
        values: &[String],
    ) -> Result<(), AlgorithmConfigurationError>;
}

pub trait BooleanParameterAlgorithm {
    fn set_boolean_configuration_value(
        &mut self,
        identifier: &str,
        values: &[bool],
    ) -> Result<(), AlgorithmConfigurationError>;
}

pub trait IntegerParameterAlgorithm {
    fn set_integer_configuration_value(
        &mut self,
        identifier: &str,
        values: &[i64],
    ) -> Result<(), AlgorithmConfigurationError>;
}

pub trait ListBoxParameterAlgorithm {
    fn set_list_box_configuration_value(
        &mut self,
        identifier: &str,
        selected: &[String],
    ) -> Result<(), AlgorithmConfigurationError>;
}

pub trait CheckBoxParameterAlgorithm {
    fn set_check_box_configuration_value(
        &mut self,
        identifier: &str,
        selected: &[Vec<String>],
    ) -> Result<(), AlgorithmConfigurationError>;
}

pub trait FileInputParameterAlgorithm {
    fn set_file_input_configuration_value(
        &mut self,
        identifier: &str,
        files: &[FileInputSetting],
    ) -> Result<(), AlgorithmConfigurationError>;
}

pub trait TableInputParameterAlgorithm {
    fn set_table_input_configuration_value(
        &mut self,
        identifier: &str,
        tables: &[TableInputSetting],
    ) -> Result<(), AlgorithmConfigurationError>;
}

pub trait DatabaseConnectionParameterAlgorithm {
    fn set_database_connection_configuration_value(
        &mut self,
        identifier: &str,
        connections: &[DatabaseConnectionSetting],
    ) -> Result<(), AlgorithmConfigurationError>;
}

// Instrumentation capabilities

pub trait TempFileAlgorithm {
    fn set_temp_file_generator(&mut self, generator: Arc<dyn TempFileGenerator>);
}

pub trait ProgressEstimatingAlgorithm {
    fn set_progress_receiver(&mut self, receiver: Arc<dyn ProgressReceiver>);
}
