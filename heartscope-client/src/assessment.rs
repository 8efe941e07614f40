//! Risk assessment flow: warm-up probe, then prediction.

use heartscope_common::{HealthStatus, PredictionInput, RiskReport};

use crate::error::{OutcomeError, Result};
use crate::gateway::PredictionService;

/// Run a full assessment against `service`.
///
/// The health probe is issued first so a sleeping backend starts waking up;
/// its outcome is logged and otherwise ignored. Prediction failures are
/// returned unchanged.
pub async fn assess<S>(service: &S, input: PredictionInput) -> Result<RiskReport>
where
    S: PredictionService + ?Sized,
{
    match service.health().await {
        HealthStatus::Ok { .. } => tracing::debug!("Prediction service is awake"),
        HealthStatus::Error { message } => {
            tracing::warn!("Warm-up probe failed, continuing with prediction: {}", message)
        }
    }

    let result = service.predict(&input).await?;

    let risk_percentage = result.risk_percentage().map_err(|e| {
        OutcomeError::unknown(format!(
            "Invalid risk_percentage {:?}: {}",
            result.risk_percentage, e
        ))
    })?;

    // Percentages must be finite and within 0..=100 ("NaN" and "inf" parse as f64).
    if !risk_percentage.is_finite() || !(0.0..=100.0).contains(&risk_percentage) {
        return Err(OutcomeError::unknown(format!(
            "Invalid risk_percentage {:?}: outside 0..=100",
            result.risk_percentage
        )));
    }

    let report = RiskReport::new(input, result, risk_percentage);

    tracing::info!(
        report_id = %report.id,
        risk_percentage = report.risk_percentage,
        level = %report.level,
        "Assessment complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use heartscope_common::{PredictionResult, RiskLevel, RiskPercentage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeService {
        health: HealthStatus,
        predict: Result<PredictionResult>,
        health_calls: AtomicUsize,
        predict_calls: AtomicUsize,
    }

    impl FakeService {
        fn new(health: HealthStatus, predict: Result<PredictionResult>) -> Self {
            Self {
                health,
                predict,
                health_calls: AtomicUsize::new(0),
                predict_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PredictionService for FakeService {
        async fn health(&self) -> HealthStatus {
            self.health_calls.fetch_add(1, Ordering::SeqCst);
            self.health.clone()
        }

        async fn predict(&self, _input: &PredictionInput) -> Result<PredictionResult> {
            self.predict_calls.fetch_add(1, Ordering::SeqCst);
            self.predict.clone()
        }
    }

    fn ok_health() -> HealthStatus {
        HealthStatus::Ok {
            data: serde_json::Value::Null,
        }
    }

    fn result(pct: RiskPercentage) -> PredictionResult {
        PredictionResult {
            risk_percentage: pct,
            extra: serde_json::Map::new(),
        }
    }

    #[tokio::test]
    async fn test_assess_builds_report() {
        let service = FakeService::new(ok_health(), Ok(result(RiskPercentage::Text("81.4".into()))));

        let report = assess(&service, PredictionInput::default()).await.unwrap();

        assert_eq!(report.risk_percentage, 81.4);
        assert_eq!(report.level, RiskLevel::Critical);
        assert!(report.clinical_action_advised);
        assert_eq!(service.health_calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.predict_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_warm_up_does_not_abort() {
        let service = FakeService::new(
            HealthStatus::Error {
                message: "Unable to connect to the prediction server".to_string(),
            },
            Ok(result(RiskPercentage::Number(12.0))),
        );

        let report = assess(&service, PredictionInput::default()).await.unwrap();
        assert_eq!(report.level, RiskLevel::Optimal);
        assert_eq!(service.predict_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_prediction_error_propagates_unchanged() {
        let service = FakeService::new(ok_health(), Err(OutcomeError::Timeout));

        let err = assess(&service, PredictionInput::default()).await.unwrap_err();
        assert_eq!(err, OutcomeError::Timeout);
    }

    #[tokio::test]
    async fn test_unparseable_percentage_is_unknown_error() {
        let service = FakeService::new(ok_health(), Ok(result(RiskPercentage::Text("high".into()))));

        let err = assess(&service, PredictionInput::default()).await.unwrap_err();
        assert_eq!(err.kind(), "unknown_error");
        assert!(err.to_string().contains("Invalid risk_percentage"));
    }

    #[tokio::test]
    async fn test_out_of_range_percentage_is_unknown_error() {
        let cases = [
            RiskPercentage::Text("NaN".into()),
            RiskPercentage::Text("inf".into()),
            RiskPercentage::Number(-1.0),
            RiskPercentage::Number(150.0),
            RiskPercentage::Text("100.5".into()),
        ];

        for pct in cases {
            let service = FakeService::new(ok_health(), Ok(result(pct.clone())));

            let err = assess(&service, PredictionInput::default()).await.unwrap_err();
            assert_eq!(err.kind(), "unknown_error", "accepted {:?}", pct);
            assert!(err.to_string().contains("outside 0..=100"));
        }
    }

    #[tokio::test]
    async fn test_boundary_percentages_are_accepted() {
        for (pct, level) in [(0.0, RiskLevel::Optimal), (100.0, RiskLevel::Critical)] {
            let service = FakeService::new(ok_health(), Ok(result(RiskPercentage::Number(pct))));

            let report = assess(&service, PredictionInput::default()).await.unwrap();
            assert_eq!(report.level, level);
        }
    }

    #[tokio::test]
    async fn test_assess_through_trait_object() {
        let service: Box<dyn PredictionService> =
            Box::new(FakeService::new(ok_health(), Ok(result(RiskPercentage::Number(30.0)))));

        let report = assess(service.as_ref(), PredictionInput::default()).await.unwrap();
        assert_eq!(report.level, RiskLevel::Moderate);
    }
}
