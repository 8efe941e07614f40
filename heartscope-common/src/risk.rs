//! Risk band interpretation of a predicted percentage.

use serde::{Deserialize, Serialize};

/// Percentage above which a consultation is recommended.
pub const CLINICAL_ACTION_THRESHOLD: f64 = 50.0;

/// Band a risk percentage falls into.
///
/// Upper bounds are exclusive: 25.0 is `Moderate`, 80.0 is `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Below 25%.
    Optimal,
    /// 25% up to 50%.
    Moderate,
    /// 50% up to 80%.
    High,
    /// 80% and above.
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Optimal,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    pub fn from_percentage(pct: f64) -> Self {
        if pct < 25.0 {
            RiskLevel::Optimal
        } else if pct < 50.0 {
            RiskLevel::Moderate
        } else if pct < 80.0 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Optimal => "Optimal Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::Critical => "Critical Risk",
        }
    }

    /// Hex colour used for the band in reports.
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Optimal => "#10b981",
            RiskLevel::Moderate => "#f59e0b",
            RiskLevel::High => "#ef4444",
            RiskLevel::Critical => "#b91c1c",
        }
    }

    pub fn interpretation(&self) -> &'static str {
        match self {
            RiskLevel::Optimal => {
                "Values are within the normal statistical range, indicating strong cardiovascular health markers."
            }
            RiskLevel::Moderate => {
                "Some risk factors are present. Preventative lifestyle adjustments may reduce future risk."
            }
            RiskLevel::High => {
                "Multiple correlating risk factors detected. Clinical attention and diagnostic follow-up are advised."
            }
            RiskLevel::Critical => {
                "Critical threshold reached. Immediate clinical correlation is necessary to address high-risk indicators."
            }
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the percentage exceeds the observational threshold.
pub fn clinical_action_advised(pct: f64) -> bool {
    pct > CLINICAL_ACTION_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskLevel::from_percentage(0.0), RiskLevel::Optimal);
        assert_eq!(RiskLevel::from_percentage(24.99), RiskLevel::Optimal);
        assert_eq!(RiskLevel::from_percentage(25.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_percentage(49.9), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_percentage(50.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_percentage(79.99), RiskLevel::High);
        assert_eq!(RiskLevel::from_percentage(80.0), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_percentage(100.0), RiskLevel::Critical);
    }

    #[test]
    fn test_clinical_action_is_strictly_above_fifty() {
        assert!(!clinical_action_advised(50.0));
        assert!(clinical_action_advised(50.1));
        assert!(!clinical_action_advised(12.0));
    }

    #[test]
    fn test_labels_and_colors_are_distinct() {
        let labels: std::collections::HashSet<_> =
            RiskLevel::ALL.iter().map(|l| l.label()).collect();
        let colors: std::collections::HashSet<_> =
            RiskLevel::ALL.iter().map(|l| l.color()).collect();
        assert_eq!(labels.len(), 4);
        assert_eq!(colors.len(), 4);
        assert_eq!(RiskLevel::High.to_string(), "High Risk");
    }

    #[test]
    fn test_risk_level_serialization() {
        let json = serde_json::to_string(&RiskLevel::Critical).unwrap();
        assert_eq!(json, r#""critical""#);
    }
}
