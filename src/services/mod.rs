pub mod plan_service;

pub use plan_service::{PlanService, PlannedDevice};
