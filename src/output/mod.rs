pub mod formatters;

pub use formatters::{formatter_for, ConsoleFormatter, CsvFormatter, DevicePlan, JsonFormatter, ModelInfo, PlanFormatter};
