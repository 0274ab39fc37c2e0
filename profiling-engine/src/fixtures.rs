// Test Fixtures
// Small algorithms and collaborators shared by the unit tests

use crate::algorithm::{
    Algorithm, AlgorithmConfigurationError, AlgorithmExecutionError, BooleanParameterAlgorithm,
    CheckBoxParameterAlgorithm, FileInputParameterAlgorithm, FunctionalDependencyAlgorithm,
    IntegerParameterAlgorithm, ProgressEstimatingAlgorithm, StringParameterAlgorithm,
    TempFileAlgorithm, UniqueColumnCombinationAlgorithm,
};
use crate::configuration::FileInputSetting;
use crate::error::{EngineError, EngineResult};
use crate::progress::ProgressReceiver;
use crate::results::model::{
    BasicStatistic, ColumnCombination, ColumnIdentifier, ConditionalUniqueColumnCombination,
    FunctionalDependency, InclusionDependency, OrderDependency, UniqueColumnCombination,
};
use crate::results::receiver::{
    FunctionalDependencyResultReceiver, UniqueColumnCombinationResultReceiver,
};
use crate::results::router::{CouldNotReceiveResult, ResultSink};
use crate::storage::models::Execution;
use crate::storage::ExecutionStore;
use crate::temp_files::TempFileGenerator;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Implements no capabilities
#[derive(Default)]
pub struct PlainAlgorithm;

impl Algorithm for PlainAlgorithm {
    fn execute(&mut self) -> Result<(), AlgorithmExecutionError> {
        Ok(())
    }
}

/// Produces one functional dependency, uses a temp file and reports progress
#[derive(Default)]
pub struct DependencyDiscovery {
    receiver: Option<Arc<dyn FunctionalDependencyResultReceiver>>,
    temp_files: Option<Arc<dyn TempFileGenerator>>,
    progress: Option<Arc<dyn ProgressReceiver>>,
    executed: Arc<AtomicBool>,
}

impl DependencyDiscovery {
    /// Share the executed flag with the caller
    pub fn tracked(executed: Arc<AtomicBool>) -> Self {
        Self {
            executed,
            ..Self::default()
        }
    }
}

impl Algorithm for DependencyDiscovery {
    fn execute(&mut self) -> Result<(), AlgorithmExecutionError> {
        self.executed.store(true, Ordering::SeqCst);

        if let Some(temp_files) = &self.temp_files {
            let path = temp_files.create_temp_file()?;
            std::fs::write(path, "a,b\n1,2\n")?;
        }

        if let Some(progress) = &self.progress {
            progress.update_progress(0.5);
        }

        if let Some(receiver) = &self.receiver {
            receiver.receive_functional_dependency(FunctionalDependency {
                determinant: ColumnCombination::new(vec![ColumnIdentifier::new("people", "id")]),
                dependant: ColumnIdentifier::new("people", "name"),
            })?;
        }

        if let Some(progress) = &self.progress {
            progress.update_progress(1.0);
        }

        Ok(())
    }

    fn as_functional_dependency(&mut self) -> Option<&mut dyn FunctionalDependencyAlgorithm> {
        Some(self)
    }

    fn as_temp_file(&mut self) -> Option<&mut dyn TempFileAlgorithm> {
        Some(self)
    }

    fn as_progress_estimating(&mut self) -> Option<&mut dyn ProgressEstimatingAlgorithm> {
        Some(self)
    }
}

impl FunctionalDependencyAlgorithm for DependencyDiscovery {
    fn set_result_receiver(&mut self, receiver: Arc<dyn FunctionalDependencyResultReceiver>) {
        self.receiver = Some(receiver);
    }
}

impl TempFileAlgorithm for DependencyDiscovery {
    fn set_temp_file_generator(&mut self, generator: Arc<dyn TempFileGenerator>) {
        self.temp_files = Some(generator);
    }
}

impl ProgressEstimatingAlgorithm for DependencyDiscovery {
    fn set_progress_receiver(&mut self, receiver: Arc<dyn ProgressReceiver>) {
        self.progress = Some(receiver);
    }
}

/// Accepts string, boolean, integer, check box and file input values; produces one UCC
#[derive(Default)]
pub struct ConfigurableAlgorithm {
    pub strings: HashMap<String, Vec<String>>,
    pub booleans: HashMap<String, Vec<bool>>,
    pub integers: HashMap<String, Vec<i64>>,
    pub check_boxes: HashMap<String, Vec<Vec<String>>>,
    pub files: Vec<FileInputSetting>,
    receiver: Option<Arc<dyn UniqueColumnCombinationResultReceiver>>,
}

impl Algorithm for ConfigurableAlgorithm {
    fn execute(&mut self) -> Result<(), AlgorithmExecutionError> {
        if let Some(receiver) = &self.receiver {
            receiver.receive_unique_column_combination(UniqueColumnCombination {
                column_combination: ColumnCombination::new(vec![ColumnIdentifier::new(
                    "people", "id",
                )]),
            })?;
        }
        Ok(())
    }

    fn as_unique_column_combination(
        &mut self,
    ) -> Option<&mut dyn UniqueColumnCombinationAlgorithm> {
        Some(self)
    }

    fn as_string_parameter(&mut self) -> Option<&mut dyn StringParameterAlgorithm> {
        Some(self)
    }

    fn as_boolean_parameter(&mut self) -> Option<&mut dyn BooleanParameterAlgorithm> {
        Some(self)
    }

    fn as_integer_parameter(&mut self) -> Option<&mut dyn IntegerParameterAlgorithm> {
        Some(self)
    }

    fn as_check_box_parameter(&mut self) -> Option<&mut dyn CheckBoxParameterAlgorithm> {
        Some(self)
    }

    fn as_file_input_parameter(&mut self) -> Option<&mut dyn FileInputParameterAlgorithm> {
        Some(self)
    }
}

impl UniqueColumnCombinationAlgorithm for ConfigurableAlgorithm {
    fn set_result_receiver(&mut self, receiver: Arc<dyn UniqueColumnCombinationResultReceiver>) {
        self.receiver = Some(receiver);
    }
}

impl StringParameterAlgorithm for ConfigurableAlgorithm {
    fn set_string_configuration_value(
        &mut self,
        identifier: &str,
        values: &[String],
    ) -> Result<(), AlgorithmConfigurationError> {
        self.strings.insert(identifier.to_string(), values.to_vec());
        Ok(())
    }
}

impl BooleanParameterAlgorithm for ConfigurableAlgorithm {
    fn set_boolean_configuration_value(
        &mut self,
        identifier: &str,
        values: &[bool],
    ) -> Result<(), AlgorithmConfigurationError> {
        self.booleans.insert(identifier.to_string(), values.to_vec());
        Ok(())
    }
}

impl IntegerParameterAlgorithm for ConfigurableAlgorithm {
    fn set_integer_configuration_value(
        &mut self,
        identifier: &str,
        values: &[i64],
    ) -> Result<(), AlgorithmConfigurationError> {
        if identifier != "MAX_LHS" {
            return Err(AlgorithmConfigurationError::UnknownIdentifier(
                identifier.to_string(),
            ));
        }
        self.integers.insert(identifier.to_string(), values.to_vec());
        Ok(())
    }
}

impl CheckBoxParameterAlgorithm for ConfigurableAlgorithm {
    fn set_check_box_configuration_value(
        &mut self,
        identifier: &str,
        selected: &[Vec<String>],
    ) -> Result<(), AlgorithmConfigurationError> {
        self.check_boxes.insert(identifier.to_string(), selected.to_vec());
        Ok(())
    }
}

impl FileInputParameterAlgorithm for ConfigurableAlgorithm {
    fn set_file_input_configuration_value(
        &mut self,
        _identifier: &str,
        files: &[FileInputSetting],
    ) -> Result<(), AlgorithmConfigurationError> {
        self.files.extend_from_slice(files);
        Ok(())
    }
}

/// Declares FD results and temp files, then fails
#[derive(Default)]
pub struct FailingAlgorithm {
    temp_files: Option<Arc<dyn TempFileGenerator>>,
}

impl Algorithm for FailingAlgorithm {
    fn execute(&mut self) -> Result<(), AlgorithmExecutionError> {
        if let Some(temp_files) = &self.temp_files {
            temp_files.create_temp_file()?;
        }
        Err(AlgorithmExecutionError::Failed("boom".to_string()))
    }

    fn as_functional_dependency(&mut self) -> Option<&mut dyn FunctionalDependencyAlgorithm> {
        Some(self)
    }

    fn as_temp_file(&mut self) -> Option<&mut dyn TempFileAlgorithm> {
        Some(self)
    }
}

impl FunctionalDependencyAlgorithm for FailingAlgorithm {
    fn set_result_receiver(&mut self, _receiver: Arc<dyn FunctionalDependencyResultReceiver>) {}
}

impl TempFileAlgorithm for FailingAlgorithm {
    fn set_temp_file_generator(&mut self, generator: Arc<dyn TempFileGenerator>) {
        self.temp_files = Some(generator);
    }
}

/// Creates a temp file, then panics
#[derive(Default)]
pub struct PanickingAlgorithm {
    temp_files: Option<Arc<dyn TempFileGenerator>>,
}

impl Algorithm for PanickingAlgorithm {
    fn execute(&mut self) -> Result<(), AlgorithmExecutionError> {
        if let Some(temp_files) = &self.temp_files {
            temp_files.create_temp_file()?;
        }
        panic!("index out of bounds");
    }

    fn as_temp_file(&mut self) -> Option<&mut dyn TempFileAlgorithm> {
        Some(self)
    }
}

impl TempFileAlgorithm for PanickingAlgorithm {
    fn set_temp_file_generator(&mut self, generator: Arc<dyn TempFileGenerator>) {
        self.temp_files = Some(generator);
    }
}

/// Sends a malformed result and ignores the rejection
#[derive(Default)]
pub struct CarelessAlgorithm {
    receiver: Option<Arc<dyn FunctionalDependencyResultReceiver>>,
}

impl Algorithm for CarelessAlgorithm {
    fn execute(&mut self) -> Result<(), AlgorithmExecutionError> {
        if let Some(receiver) = &self.receiver {
            let _ = receiver.receive_functional_dependency(FunctionalDependency {
                determinant: ColumnCombination::new(vec![ColumnIdentifier::new("", "id")]),
                dependant: ColumnIdentifier::new("people", ""),
            });
        }
        Ok(())
    }

    fn as_functional_dependency(&mut self) -> Option<&mut dyn FunctionalDependencyAlgorithm> {
        Some(self)
    }
}

impl FunctionalDependencyAlgorithm for CarelessAlgorithm {
    fn set_result_receiver(&mut self, receiver: Arc<dyn FunctionalDependencyResultReceiver>) {
        self.receiver = Some(receiver);
    }
}

/// Accepts every result but fails to flush on close
#[derive(Default)]
pub struct UnflushableSink;

impl ResultSink for UnflushableSink {
    fn receive_functional_dependency(
        &mut self,
        _result: FunctionalDependency,
    ) -> Result<(), CouldNotReceiveResult> {
        Ok(())
    }

    fn receive_inclusion_dependency(
        &mut self,
        _result: InclusionDependency,
    ) -> Result<(), CouldNotReceiveResult> {
        Ok(())
    }

    fn receive_unique_column_combination(
        &mut self,
        _result: UniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResult> {
        Ok(())
    }

    fn receive_conditional_unique_column_combination(
        &mut self,
        _result: ConditionalUniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResult> {
        Ok(())
    }

    fn receive_order_dependency(
        &mut self,
        _result: OrderDependency,
    ) -> Result<(), CouldNotReceiveResult> {
        Ok(())
    }

    fn receive_basic_statistic(
        &mut self,
        _result: BasicStatistic,
    ) -> Result<(), CouldNotReceiveResult> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), CouldNotReceiveResult> {
        Err(std::io::Error::other("flush failed: disk full").into())
    }
}

/// Store that always fails
pub struct FailingExecutionStore;

#[async_trait]
impl ExecutionStore for FailingExecutionStore {
    async fn store(&self, _execution: &Execution) -> EngineResult<()> {
        Err(EngineError::storage("disk full"))
    }
}
