//! HeartScope Common Types
//!
//! Shared types for the prediction service client: request/response records,
//! liveness probe outcome, and risk band interpretation.

pub mod health;
pub mod prediction;
pub mod report;
pub mod risk;

pub use health::HealthStatus;
pub use prediction::{FieldBounds, FieldViolation, PredictionInput, PredictionResult, RiskPercentage};
pub use report::RiskReport;
pub use risk::{clinical_action_advised, RiskLevel, CLINICAL_ACTION_THRESHOLD};
