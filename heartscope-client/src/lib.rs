//! HeartScope client - request gateway for the remote cardiovascular risk
//! prediction service.

pub mod assessment;
pub mod config;
pub mod error;
pub mod gateway;

pub use assessment::assess;
pub use config::{ApiConfig, Config, LoggingConfig};
pub use error::{OutcomeError, Result};
pub use gateway::{classify, PredictionService, RequestGateway, TransportFailure, DEFAULT_TIMEOUT};
