use profiling_engine::results::model::{
    BasicStatistic, ColumnCombination, ColumnIdentifier, UniqueColumnCombination,
};
use profiling_engine::{
    progress_channel, Algorithm, AlgorithmExecutionError, AlgorithmConfigurationError,
    AlgorithmRegistry, BasicStatisticsAlgorithm, ConfigurationRequirement, ConfigurationSetting,
    EngineConfig, ExecutionEvent, ExecutionOrchestrator, FileInputParameterAlgorithm,
    FileInputSetting, InMemoryResourceResolver, JsonExecutionStore, ProgressEstimatingAlgorithm,
    ProgressReceiver, UniqueColumnCombinationAlgorithm,
};
use profiling_engine::results::{
    BasicStatisticsResultReceiver, UniqueColumnCombinationResultReceiver,
};

use color_eyre::eyre::eyre;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Counts distinct values per column and reports single-column UCCs
#[derive(Default)]
struct ColumnStatistics {
    files: Vec<FileInputSetting>,
    statistics: Option<Arc<dyn BasicStatisticsResultReceiver>>,
    uniques: Option<Arc<dyn UniqueColumnCombinationResultReceiver>>,
    progress: Option<Arc<dyn ProgressReceiver>>,
}

impl ColumnStatistics {
    fn profile_file(&self, file: &FileInputSetting) -> Result<(), AlgorithmExecutionError> {
        let content = fs::read_to_string(&file.file_name)?;
        let mut rows: Vec<Vec<String>> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split(file.separator).map(str::to_string).collect())
            .collect();

        if rows.is_empty() {
            return Ok(());
        }

        let table = Path::new(&file.file_name)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| file.file_name.clone());

        let header: Vec<String> = if file.header {
            rows.remove(0)
        } else {
            (0..rows[0].len()).map(|i| format!("column{}", i + 1)).collect()
        };

        for (index, name) in header.iter().enumerate() {
            let column = ColumnIdentifier::new(&table, name.trim_matches(file.quote_char));
            let distinct: HashSet<&str> = rows
                .iter()
                .filter_map(|row| row.get(index).map(String::as_str))
                .collect();

            if let Some(statistics) = &self.statistics {
                statistics.receive_basic_statistic(BasicStatistic {
                    statistic_name: "distinct".to_string(),
                    value: serde_json::json!(distinct.len()),
                    columns: vec![column.clone()],
                })?;
            }

            if distinct.len() == rows.len() {
                if let Some(uniques) = &self.uniques {
                    uniques.receive_unique_column_combination(UniqueColumnCombination {
                        column_combination: ColumnCombination::new(vec![column]),
                    })?;
                }
            }
        }

        Ok(())
    }
}

impl Algorithm for ColumnStatistics {
    fn execute(&mut self) -> Result<(), AlgorithmExecutionError> {
        let total = self.files.len().max(1) as f32;
        for (done, file) in self.files.iter().enumerate() {
            self.profile_file(file)?;
            if let Some(progress) = &self.progress {
                progress.update_progress((done + 1) as f32 / total);
            }
        }
        Ok(())
    }

    fn as_basic_statistics(&mut self) -> Option<&mut dyn BasicStatisticsAlgorithm> {
        Some(self)
    }

    fn as_unique_column_combination(
        &mut self,
    ) -> Option<&mut dyn UniqueColumnCombinationAlgorithm> {
        Some(self)
    }

    fn as_file_input_parameter(&mut self) -> Option<&mut dyn FileInputParameterAlgorithm> {
        Some(self)
    }

    fn as_progress_estimating(&mut self) -> Option<&mut dyn ProgressEstimatingAlgorithm> {
        Some(self)
    }
}

impl BasicStatisticsAlgorithm for ColumnStatistics {
    fn set_result_receiver(&mut self, receiver: Arc<dyn BasicStatisticsResultReceiver>) {
        self.statistics = Some(receiver);
    }
}

impl UniqueColumnCombinationAlgorithm for ColumnStatistics {
    fn set_result_receiver(&mut self, receiver: Arc<dyn UniqueColumnCombinationResultReceiver>) {
        self.uniques = Some(receiver);
    }
}

impl FileInputParameterAlgorithm for ColumnStatistics {
    fn set_file_input_configuration_value(
        &mut self,
        identifier: &str,
        files: &[FileInputSetting],
    ) -> Result<(), AlgorithmConfigurationError> {
        if identifier != "INPUT_FILES" {
            return Err(AlgorithmConfigurationError::UnknownIdentifier(
                identifier.to_string(),
            ));
        }
        self.files = files.to_vec();
        Ok(())
    }
}

impl ProgressEstimatingAlgorithm for ColumnStatistics {
    fn set_progress_receiver(&mut self, receiver: Arc<dyn ProgressReceiver>) {
        self.progress = Some(receiver);
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let workspace = tempfile::tempdir()?;
    let config = EngineConfig::with_root(workspace.path()).with_result_path_prefix("demo");

    // Sample input and a manifest pointing at the registered factory
    let csv = workspace.path().join("people.csv");
    fs::write(&csv, "id,name,city\n1,Ada,London\n2,Grace,Arlington\n3,Alan,London\n")?;

    fs::create_dir_all(&config.algorithms_dir)?;
    fs::write(
        config.algorithms_dir.join("column-statistics.json"),
        r#"{
            "fileName": "column-statistics",
            "name": "Column Statistics",
            "factory": "column-statistics"
        }"#,
    )?;

    let mut registry = AlgorithmRegistry::new();
    registry.register_default::<ColumnStatistics>("column-statistics");
    let found = registry.scan_dir(&config.algorithms_dir)?;
    println!("✓ Registered {} algorithm(s)", found);

    let descriptor = registry
        .find("column-statistics")
        .cloned()
        .ok_or_else(|| eyre!("column-statistics manifest was not registered"))?;
    let csv_path = csv.to_string_lossy().to_string();

    let mut resolver = InMemoryResourceResolver::new();
    resolver.register_file(1, &csv_path);

    let requirements = vec![ConfigurationRequirement::file_input("INPUT_FILES").with_setting(
        ConfigurationSetting::FileInput(FileInputSetting::new(1, &csv_path)),
    )];

    let store = JsonExecutionStore::new(&config.executions_dir);
    let (tx, mut rx) = progress_channel();

    let orchestrator = ExecutionOrchestrator::from_config(
        &config,
        Arc::new(registry),
        Arc::new(resolver),
        Arc::new(store.clone()),
    )
    .with_progress(tx);

    let elapsed = orchestrator.run(&descriptor, &requirements).await?;
    println!("✓ Ran {} in {:?}", descriptor.name, elapsed);

    let mut execution_id = None;
    while let Ok(event) = rx.try_recv() {
        match event {
            ExecutionEvent::ProgressUpdated { progress } => {
                println!("  progress {:.0}%", progress * 100.0)
            }
            ExecutionEvent::ResultReceived { kind } => println!("  result {}", kind),
            ExecutionEvent::ExecutionStored { execution_id: id } => execution_id = Some(id),
            ExecutionEvent::Log { level, message } => println!("  [{:?}] {}", level, message),
            _ => {}
        }
    }

    if let Some(id) = execution_id {
        let execution = store.load(id).await?;
        println!("\n✓ Stored execution {}", execution.id);
        for record in &execution.results {
            let path = config.results_dir.join(&record.file_name);
            let lines = fs::read_to_string(path)?.lines().count();
            println!("  {} ({} lines)", record.file_name, lines);
        }
    }

    Ok(())
}
