//! BMI computation
//!
//! Thresholds are lower-bound-inclusive and user-visible; do not adjust
//! them without a clinical review.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BMI classification bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    /// Classify a BMI value: <18.5 Underweight, <25 Normal, <30 Overweight,
    /// else Obese.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute BMI rounded to 1 decimal, with its category.
///
/// Returns `None` when height is zero or either value is non-finite
/// (guarded division instead of a NaN reaching the user).
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> Option<(f64, BmiCategory)> {
    if !height_cm.is_finite() || !weight_kg.is_finite() || height_cm == 0.0 {
        return None;
    }
    let h_m = height_cm / 100.0;
    let bmi = weight_kg / (h_m * h_m);
    if !bmi.is_finite() {
        return None;
    }
    let rounded = (bmi * 10.0).round() / 10.0;
    Some((rounded, BmiCategory::from_bmi(rounded)))
}
