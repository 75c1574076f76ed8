//! Core domain types for the BMI tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - BMI categories and their stored labels
//! - Pending measurements (computed, not yet saved)
//! - Saved measurement records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format of the `date_time` column and of timestamps shown to the user
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Surrogate key assigned by the store
pub type RecordId = i64;

// ============================================================================
// Category Types
// ============================================================================

/// Standard BMI category
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obesity,
}

impl BmiCategory {
    /// All categories, lowest BMI band first
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::NormalWeight,
        BmiCategory::Overweight,
        BmiCategory::Obesity,
    ];

    /// Label as shown to the user and stored in `bmi_category`
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obesity => "Obesity",
        }
    }

    /// Inverse of [`BmiCategory::label`]; exact match only
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Measurement Types
// ============================================================================

/// A successful calculation awaiting an optional save.
///
/// Only the engine builds these, so `bmi_value` and `category` always agree
/// with `weight_kg` and `height_m`. The presentation layer owns the value
/// between "calculate" and "save"; nothing in the core retains it.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingMeasurement {
    pub(crate) weight_kg: f64,
    pub(crate) height_m: f64,
    pub(crate) bmi_value: f64,
    pub(crate) category: BmiCategory,
}

impl PendingMeasurement {
    /// Validate inputs and compute BMI; see [`crate::engine::compute`]
    pub fn new(weight_kg: f64, height_m: f64) -> crate::Result<Self> {
        let (bmi_value, category) = crate::engine::compute(weight_kg, height_m)?;
        Ok(Self {
            weight_kg,
            height_m,
            bmi_value,
            category,
        })
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_m(&self) -> f64 {
        self.height_m
    }

    pub fn bmi_value(&self) -> f64 {
        self.bmi_value
    }

    pub fn category(&self) -> BmiCategory {
        self.category
    }
}

/// A saved measurement, as read back from the store
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MeasurementRecord {
    pub record_id: RecordId,
    pub timestamp: NaiveDateTime,
    pub weight_kg: f64,
    pub height_m: f64,
    pub bmi_value: f64,
    pub bmi_category: BmiCategory,
}

impl MeasurementRecord {
    /// Timestamp in the stored `YYYY-MM-DD HH:MM:SS` form
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}
