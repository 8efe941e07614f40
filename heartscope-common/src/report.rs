//! Assessment report produced after a successful prediction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::prediction::{PredictionInput, PredictionResult};
use crate::risk::{clinical_action_advised, RiskLevel};

/// A prediction result together with its interpretation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub id: Uuid,
    pub assessed_at: DateTime<Utc>,
    pub input: PredictionInput,
    pub risk_percentage: f64,
    pub level: RiskLevel,
    pub clinical_action_advised: bool,
    /// Raw service response.
    pub result: PredictionResult,
}

impl RiskReport {
    /// Build a report from an already-parsed risk percentage.
    pub fn new(input: PredictionInput, result: PredictionResult, risk_percentage: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            assessed_at: Utc::now(),
            input,
            risk_percentage,
            level: RiskLevel::from_percentage(risk_percentage),
            clinical_action_advised: clinical_action_advised(risk_percentage),
            result,
        }
    }

    /// One-paragraph summary, percentage rounded to one decimal.
    pub fn summary(&self) -> String {
        format!(
            "The model indicates a {:.1}% probability of underlying cardiovascular conditions ({}). {}",
            self.risk_percentage,
            self.level.label(),
            self.level.interpretation()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::RiskPercentage;

    fn result(pct: &str) -> PredictionResult {
        PredictionResult {
            risk_percentage: RiskPercentage::Text(pct.to_string()),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_report_derives_level_and_action() {
        let report = RiskReport::new(PredictionInput::default(), result("63.2"), 63.2);
        assert_eq!(report.level, RiskLevel::High);
        assert!(report.clinical_action_advised);
        assert!(report.summary().starts_with("The model indicates a 63.2% probability"));
    }

    #[test]
    fn test_reports_get_distinct_ids() {
        let a = RiskReport::new(PredictionInput::default(), result("10"), 10.0);
        let b = RiskReport::new(PredictionInput::default(), result("10"), 10.0);
        assert_ne!(a.id, b.id);
        assert_eq!(a.level, RiskLevel::Optimal);
        assert!(!a.clinical_action_advised);
    }
}
