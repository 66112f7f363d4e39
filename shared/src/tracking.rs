//! Tracking helpers
//!
//! Derived values for diary entries: portion nutrients, sleep duration and
//! quality, and the daily calorie budget.

use crate::metabolic::calculate_weight_change;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

// ============================================================================
// Portions
// ============================================================================

/// Nutrient density of a food, per 100 g
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientsPer100g {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Nutrients of an eaten portion, rounded to whole units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortionNutrients {
    pub calories: i32,
    pub protein: i32,
    pub fat: i32,
    pub carbs: i32,
}

/// Scale per-100 g values to a portion of `grams`
pub fn scale_nutrients(per_100g: NutrientsPer100g, grams: f64) -> PortionNutrients {
    let scale = |value: f64| round_half_up(value * grams / 100.0) as i32;
    PortionNutrients {
        calories: scale(per_100g.calories),
        protein: scale(per_100g.protein),
        fat: scale(per_100g.fat),
        carbs: scale(per_100g.carbs),
    }
}

// ============================================================================
// Sleep
// ============================================================================

/// Sleep duration in whole hours (half hours round up)
pub fn sleep_duration_hours(bed_time: DateTime<Utc>, wake_time: DateTime<Utc>) -> i32 {
    let hours = (wake_time - bed_time).num_seconds() as f64 / 3600.0;
    round_half_up(hours) as i32
}

/// Score assumed for logs without a quality rating
pub const DEFAULT_SLEEP_SCORE: f64 = 3.0;

/// Sleep quality bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SleepQuality {
    /// Bucket a 1-5 score (fractional averages allowed)
    pub fn from_score(score: f64) -> Self {
        if score >= 4.0 {
            SleepQuality::Excellent
        } else if score >= 3.0 {
            SleepQuality::Good
        } else if score >= 2.0 {
            SleepQuality::Fair
        } else {
            SleepQuality::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SleepQuality::Excellent => "excellent",
            SleepQuality::Good => "good",
            SleepQuality::Fair => "fair",
            SleepQuality::Poor => "poor",
        }
    }

    /// Display label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            SleepQuality::Excellent => "优秀",
            SleepQuality::Good => "良好",
            SleepQuality::Fair => "一般",
            SleepQuality::Poor => "较差",
        }
    }
}

impl fmt::Display for SleepQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Average quality score; missing ratings count as [`DEFAULT_SLEEP_SCORE`].
/// Returns `None` for an empty slice.
pub fn average_sleep_quality(scores: &[Option<i32>]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let total: f64 = scores
        .iter()
        .map(|score| score.map(f64::from).unwrap_or(DEFAULT_SLEEP_SCORE))
        .sum();
    Some(total / scores.len() as f64)
}

// ============================================================================
// Daily budget
// ============================================================================

/// One day's calorie budget against a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBudget {
    pub target: i32,
    pub consumed: i32,
    pub burned: i32,
    /// consumed - burned
    pub net: i32,
    /// target - net; negative when over budget
    pub remaining: i32,
    /// 0..=100
    pub progress_percent: f64,
    pub over_budget: bool,
    /// consumed - (tdee + burned); negative means a deficit
    pub energy_balance: i32,
    pub projected_weight_change_kg: f64,
}

impl DailyBudget {
    pub fn compute(target: i32, tdee: i32, consumed: i32, burned: i32) -> Self {
        let net = consumed - burned;
        let remaining = target - net;
        let progress_percent = if target <= 0 {
            0.0
        } else {
            (f64::from(net) / f64::from(target) * 100.0).clamp(0.0, 100.0)
        };
        let energy_balance = consumed - (tdee + burned);

        Self {
            target,
            consumed,
            burned,
            net,
            remaining,
            progress_percent,
            over_budget: remaining < 0,
            energy_balance,
            projected_weight_change_kg: calculate_weight_change(f64::from(energy_balance)),
        }
    }
}
