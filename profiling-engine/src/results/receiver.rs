// Result Receivers
// Per-kind delivery contracts handed to result-producing algorithms

use crate::results::model::{
    BasicStatistic, ConditionalUniqueColumnCombination, FunctionalDependency,
    InclusionDependency, OrderDependency, UniqueColumnCombination,
};
use crate::results::router::CouldNotReceiveResult;

pub trait FunctionalDependencyResultReceiver: Send + Sync {
    fn receive_functional_dependency(
        &self,
        result: FunctionalDependency,
    ) -> Result<(), CouldNotReceiveResult>;
}

pub trait InclusionDependencyResultReceiver: Send + Sync {
    fn receive_inclusion_dependency(
        &self,
        result: InclusionDependency,
    ) -> Result<(), CouldNotReceiveResult>;
}

pub trait UniqueColumnCombinationResultReceiver: Send + Sync {
    fn receive_unique_column_combination(
        &self,
        result: UniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResult>;
}

pub trait ConditionalUniqueColumnCombinationResultReceiver: Send + Sync {
    fn receive_conditional_unique_column_combination(
        &self,
        result: ConditionalUniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResult>;
}

pub trait OrderDependencyResultReceiver: Send + Sync {
    fn receive_order_dependency(&self, result: OrderDependency)
        -> Result<(), CouldNotReceiveResult>;
}

pub trait BasicStatisticsResultReceiver: Send + Sync {
    fn receive_basic_statistic(&self, result: BasicStatistic) -> Result<(), CouldNotReceiveResult>;
}
