//! BMI engine: computation and classification.
//!
//! Everything here is pure. Inputs are kilograms and meters; callers holding
//! centimeters convert with [`cm_to_m`] first.

use crate::{BmiCategory, Error, Result};

/// Lower bound (inclusive) of the "Normal weight" band
pub const NORMAL_WEIGHT_MIN: f64 = 18.5;
/// Lower bound (inclusive) of the "Overweight" band
pub const OVERWEIGHT_MIN: f64 = 25.0;
/// Lower bound (inclusive) of the "Obesity" band
pub const OBESITY_MIN: f64 = 30.0;

/// Compute BMI and its category
///
/// ## Rules
///
/// 1. **Validation**: weight and height must be finite and strictly positive,
///    otherwise [`Error::InvalidMeasurement`].
/// 2. **Computation**: `weight_kg / (height_m * height_m)`. A result that is
///    not finite and positive is also [`Error::InvalidMeasurement`].
/// 3. **Classification**: see [`classify`].
///
pub fn compute(weight_kg: f64, height_m: f64) -> Result<(f64, BmiCategory)> {
    validate_positive("weight", weight_kg)?;
    validate_positive("height", height_m)?;

    let bmi = weight_kg / (height_m * height_m);
    // Extreme inputs can underflow to 0 or overflow to infinity
    validate_positive("BMI", bmi)?;
    let category = classify(bmi);

    tracing::debug!(weight_kg, height_m, bmi, %category, "Computed BMI");

    Ok((bmi, category))
}

/// Classify a BMI value
///
/// Bands are half-open with an inclusive lower bound, checked lowest first:
/// - `< 18.5` → Underweight
/// - `18.5 ..< 25` → Normal weight
/// - `25 ..< 30` → Overweight
/// - `>= 30` → Obesity
pub fn classify(bmi: f64) -> BmiCategory {
    if bmi < NORMAL_WEIGHT_MIN {
        BmiCategory::Underweight
    } else if bmi < OVERWEIGHT_MIN {
        BmiCategory::NormalWeight
    } else if bmi < OBESITY_MIN {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obesity
    }
}

/// Convert a height in centimeters to meters
pub fn cm_to_m(height_cm: f64) -> f64 {
    height_cm / 100.0
}

fn validate_positive(name: &str, value: f64) -> Result<()> {
    // NaN fails `> 0.0`, so it is rejected here as well
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidMeasurement(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}
