//! Prediction request and response types for the remote risk service.

use serde::{Deserialize, Serialize};

/// Patient attributes submitted to `POST /predict`.
///
/// Field names match the wire format of the prediction service. The gateway
/// forwards these as-is; range checks belong to whoever collects the values
/// (see [`PredictionInput::validate`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    /// Age in years.
    pub age: u32,
    /// Biological sex code: 1 = female, 2 = male.
    pub gender: u8,
    /// Height in centimetres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// Systolic blood pressure (mmHg).
    pub ap_hi: i32,
    /// Diastolic blood pressure (mmHg).
    pub ap_lo: i32,
    /// Cholesterol band: 1 normal, 2 above normal, 3 well above normal.
    pub cholesterol: u8,
    /// Glucose band, same coding as cholesterol.
    pub gluc: u8,
    pub smoke: u8,
    pub alco: u8,
    pub active: u8,
}

impl Default for PredictionInput {
    fn default() -> Self {
        Self {
            age: 50,
            gender: 1,
            height: 165.0,
            weight: 70.0,
            ap_hi: 120,
            ap_lo: 80,
            cholesterol: 1,
            gluc: 1,
            smoke: 0,
            alco: 0,
            active: 1,
        }
    }
}

/// Inclusive bounds accepted by the input form for a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
}

impl FieldBounds {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A field whose value falls outside its [`FieldBounds`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub value: f64,
    pub bounds: FieldBounds,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {} is outside {}..={}",
            self.field, self.value, self.bounds.min, self.bounds.max
        )
    }
}

impl PredictionInput {
    /// Per-field bounds, in wire order.
    pub const BOUNDS: [(&'static str, FieldBounds); 11] = [
        ("age", FieldBounds::new(1.0, 100.0)),
        ("gender", FieldBounds::new(1.0, 2.0)),
        ("height", FieldBounds::new(1.0, 250.0)),
        ("weight", FieldBounds::new(1.0, 300.0)),
        ("ap_hi", FieldBounds::new(60.0, 250.0)),
        ("ap_lo", FieldBounds::new(40.0, 180.0)),
        ("cholesterol", FieldBounds::new(1.0, 3.0)),
        ("gluc", FieldBounds::new(1.0, 3.0)),
        ("smoke", FieldBounds::new(0.0, 1.0)),
        ("alco", FieldBounds::new(0.0, 1.0)),
        ("active", FieldBounds::new(0.0, 1.0)),
    ];

    fn values(&self) -> [f64; 11] {
        [
            f64::from(self.age),
            f64::from(self.gender),
            self.height,
            self.weight,
            f64::from(self.ap_hi),
            f64::from(self.ap_lo),
            f64::from(self.cholesterol),
            f64::from(self.gluc),
            f64::from(self.smoke),
            f64::from(self.alco),
            f64::from(self.active),
        ]
    }

    /// Check every field against the form bounds.
    ///
    /// Returns all violations rather than stopping at the first one, so a
    /// caller can report the whole form at once.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let violations: Vec<FieldViolation> = Self::BOUNDS
            .iter()
            .zip(self.values())
            .filter(|((_, bounds), value)| !bounds.contains(*value))
            .map(|((field, bounds), value)| FieldViolation {
                field,
                value,
                bounds: *bounds,
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Risk percentage as sent by the service: either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RiskPercentage {
    Number(f64),
    Text(String),
}

impl RiskPercentage {
    pub fn value(&self) -> Result<f64, std::num::ParseFloatError> {
        match self {
            RiskPercentage::Number(n) => Ok(*n),
            RiskPercentage::Text(s) => s.trim().parse(),
        }
    }
}

/// Response of `POST /predict`.
///
/// Only `risk_percentage` is required; every other field the service sends is
/// kept in `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub risk_percentage: RiskPercentage,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PredictionResult {
    /// Parse `risk_percentage` as a float.
    pub fn risk_percentage(&self) -> Result<f64, std::num::ParseFloatError> {
        self.risk_percentage.value()
    }
}
