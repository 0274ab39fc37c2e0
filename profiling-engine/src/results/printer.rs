// Result Printer
// Result sink writing one JSON line per result to a file per result kind

use crate::results::model::{
    result_file_name, BasicStatistic, ConditionalUniqueColumnCombination, FunctionalDependency,
    InclusionDependency, OrderDependency, ResultKind, UniqueColumnCombination,
};
use crate::results::router::{CouldNotReceiveResult, ResultSink};

use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes results to `<directory>/<prefix>_<kind>`
pub struct ResultPrinter {
    directory: PathBuf,
    prefix: String,
    writers: HashMap<ResultKind, BufWriter<File>>,
    closed: bool,
}

impl ResultPrinter {
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
            writers: HashMap::new(),
            closed: false,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the artifact for one result kind
    pub fn result_path(&self, kind: ResultKind) -> PathBuf {
        self.directory.join(result_file_name(&self.prefix, kind))
    }

    fn write<T: Serialize>(
        &mut self,
        kind: ResultKind,
        result: &T,
    ) -> Result<(), CouldNotReceiveResult> {
        if self.closed {
            return Err(CouldNotReceiveResult::SinkClosed);
        }

        if !self.writers.contains_key(&kind) {
            fs::create_dir_all(&self.directory)?;
            let file = File::create(self.result_path(kind))?;
            self.writers.insert(kind, BufWriter::new(file));
        }

        let line = serde_json::to_string(result)?;
        if let Some(writer) = self.writers.get_mut(&kind) {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}

impl ResultSink for ResultPrinter {
    fn receive_functional_dependency(
        &mut self,
        result: FunctionalDependency,
    ) -> Result<(), CouldNotReceiveResult> {
        self.write(ResultKind::Fd, &result)
    }

    fn receive_inclusion_dependency(
        &mut self,
        result: InclusionDependency,
    ) -> Result<(), CouldNotReceiveResult> {
        self.write(ResultKind::Ind, &result)
    }

    fn receive_unique_column_combination(
        &mut self,
        result: UniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResult> {
        self.write(ResultKind::Ucc, &result)
    }

    fn receive_conditional_unique_column_combination(
        &mut self,
        result: ConditionalUniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResult> {
        self.write(ResultKind::Cucc, &result)
    }

    fn receive_order_dependency(
        &mut self,
        result: OrderDependency,
    ) -> Result<(), CouldNotReceiveResult> {
        self.write(ResultKind::Od, &result)
    }

    fn receive_basic_statistic(
        &mut self,
        result: BasicStatistic,
    ) -> Result<(), CouldNotReceiveResult> {
        self.write(ResultKind::Stat, &result)
    }

    fn close(&mut self) -> Result<(), CouldNotReceiveResult> {
        self.closed = true;

        let mut first_error = None;
        for (_, mut writer) in self.writers.drain() {
            if let Err(e) = writer.flush() {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::model::{ColumnCombination, ColumnIdentifier};
    use tempfile::TempDir;

    fn ucc(column: &str) -> UniqueColumnCombination {
        UniqueColumnCombination {
            column_combination: ColumnCombination::new(vec![ColumnIdentifier::new("t", column)]),
        }
    }

    #[test]
    fn test_writes_one_line_per_result() {
        let temp = TempDir::new().unwrap();
        let mut printer = ResultPrinter::new(temp.path().join("results"), "run1");

        printer.receive_unique_column_combination(ucc("id")).unwrap();
        printer.receive_unique_column_combination(ucc("email")).unwrap();
        printer.close().unwrap();

        let path = printer.result_path(ResultKind::Ucc);
        assert!(path.ends_with("run1_ucc"));

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: UniqueColumnCombination = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, ucc("id"));
    }

    #[test]
    fn test_files_are_opened_lazily() {
        let temp = TempDir::new().unwrap();
        let mut printer = ResultPrinter::new(temp.path(), "run2");

        printer.receive_unique_column_combination(ucc("id")).unwrap();
        printer.close().unwrap();

        assert!(printer.result_path(ResultKind::Ucc).exists());
        assert!(!printer.result_path(ResultKind::Fd).exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_close_flushes_every_writer_and_reports_failure() {
        let temp = TempDir::new().unwrap();
        let mut printer = ResultPrinter::new(temp.path(), "run4");

        // writes to /dev/full buffer fine but fail on flush
        std::os::unix::fs::symlink("/dev/full", printer.result_path(ResultKind::Fd)).unwrap();

        printer
            .receive_functional_dependency(FunctionalDependency {
                determinant: ColumnCombination::new(vec![ColumnIdentifier::new("t", "a")]),
                dependant: ColumnIdentifier::new("t", "b"),
            })
            .unwrap();
        printer.receive_unique_column_combination(ucc("id")).unwrap();

        let err = printer.close().unwrap_err();
        assert!(matches!(err, CouldNotReceiveResult::Io(_)));

        let content = fs::read_to_string(printer.result_path(ResultKind::Ucc)).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_closed_printer_refuses_results() {
        let temp = TempDir::new().unwrap();
        let mut printer = ResultPrinter::new(temp.path(), "run3");
        printer.close().unwrap();

        let err = printer.receive_unique_column_combination(ucc("id")).unwrap_err();
        assert!(matches!(err, CouldNotReceiveResult::SinkClosed));
    }
}
