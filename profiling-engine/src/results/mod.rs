// Results Module
// Result model, per-kind receivers, the router and the bundled result sinks

pub mod cache;
pub mod model;
pub mod printer;
pub mod receiver;
pub mod router;

// Re-export key types
pub use cache::ResultCache;
pub use model::{
    result_file_name, BasicStatistic, ColumnCombination, ColumnCondition, ColumnIdentifier,
    ColumnPermutation, ComparisonOperator, ConditionalUniqueColumnCombination,
    FunctionalDependency, InclusionDependency, OrderDependency, OrderType, ProfilingResult,
    ResultKind, UniqueColumnCombination,
};
pub use printer::ResultPrinter;
pub use receiver::{
    BasicStatisticsResultReceiver, ConditionalUniqueColumnCombinationResultReceiver,
    FunctionalDependencyResultReceiver, InclusionDependencyResultReceiver,
    OrderDependencyResultReceiver, UniqueColumnCombinationResultReceiver,
};
pub use router::{CouldNotReceiveResult, DeliveryFailure, ResultRouter, ResultSink};
