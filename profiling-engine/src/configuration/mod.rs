// Configuration Module
// Requirements, bound values, and the binder that applies them to algorithms

pub mod binder;
pub mod requirement;
pub mod value;

// Re-export key types
pub use binder::ConfigurationBinder;
pub use requirement::{
    ConfigurationRequirement, ConfigurationSetting, DatabaseConnectionSetting, FileInputSetting,
    RequirementShape, TableInputSetting,
};
pub use value::ConfigurationValue;
