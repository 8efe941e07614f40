//! Request gateway for the remote prediction service.
//!
//! This module defines the `PredictionService` trait that the assessment flow
//! talks to, the HTTP-backed `RequestGateway` implementing it, and the
//! classification of transport failures into `OutcomeError`.

mod classify;
mod client;

pub use classify::{classify, TransportFailure};
pub use client::{RequestGateway, DEFAULT_TIMEOUT};

use async_trait::async_trait;
use heartscope_common::{HealthStatus, PredictionInput, PredictionResult};

use crate::error::Result;

/// Calls exposed by the prediction service.
///
/// Each call is independent: implementations keep no per-call state, so
/// overlapping calls may complete in any order.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Liveness probe. Never fails; failures are reported in the returned status.
    async fn health(&self) -> HealthStatus;

    /// Submit patient attributes and return the service response verbatim.
    async fn predict(&self, input: &PredictionInput) -> Result<PredictionResult>;
}
