//! Metabolic calculations
//!
//! Converts biometrics, activity level and exercise into energy budgets
//! and body-composition classifications.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: every calculation is stateless and deterministic
//! 2. **No validation**: physiological ranges are checked by callers
//!    (see [`crate::validation`]); degenerate inputs propagate
//!    mathematically
//! 3. **Integer energy**: all kcal values are rounded to whole numbers

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Energy stored in one kilogram of adipose tissue (kcal)
pub const KCAL_PER_KG_FAT: f64 = 7700.0;

/// MET used for exercise labels missing from the catalogue
pub const DEFAULT_MET: f64 = 5.0;

/// Daily deficit/surplus applied for a weight goal (kcal/day)
pub const DEFAULT_CALORIE_ADJUSTMENT: i32 = 500;

/// Lowest daily target allowed while reducing weight (kcal/day)
pub const MINIMUM_REDUCING_TARGET: i32 = 1200;

/// Round half-way values towards positive infinity.
///
/// Matches the rounding of the stored historical values, which differs
/// from `f64::round` for negative halves.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

// ============================================================================
// Profile Types
// ============================================================================

/// Gender used by the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(ParseError::UnknownGender(s.to_string())),
        }
    }
}

/// Activity level tiers for TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Exercise 1-3 days/week
    Light,
    /// Exercise 3-5 days/week
    Moderate,
    /// Exercise 6-7 days/week
    Active,
    /// Daily training or physical work
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::Active => "Hard exercise 6-7 days/week",
            ActivityLevel::VeryActive => "Daily training or physical job",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| ParseError::UnknownActivityLevel(s.to_string()))
    }
}

// ============================================================================
// BMR, TDEE and Daily Target
// ============================================================================

/// Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Men: 10 × weight(kg) + 6.25 × height(cm) - 5 × age + 5
/// Women: 10 × weight(kg) + 6.25 × height(cm) - 5 × age - 161
pub fn calculate_bmr(gender: Gender, age_years: u32, height_cm: f64, weight_kg: f64) -> i32 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    let bmr = match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    };
    round_half_up(bmr) as i32
}

/// Total Daily Energy Expenditure: BMR × activity multiplier
pub fn calculate_tdee(bmr: i32, activity_level: ActivityLevel) -> i32 {
    round_half_up(f64::from(bmr) * activity_level.multiplier()) as i32
}

/// Deficit/surplus rule for turning TDEE into a daily target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaloriePolicy {
    /// kcal/day removed when reducing, added when gaining
    pub adjustment_kcal: i32,
    /// Floor for a reducing target
    pub minimum_target_kcal: i32,
}

impl Default for CaloriePolicy {
    fn default() -> Self {
        Self {
            adjustment_kcal: DEFAULT_CALORIE_ADJUSTMENT,
            minimum_target_kcal: MINIMUM_REDUCING_TARGET,
        }
    }
}

/// Direction of a weight goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalDirection {
    Reduce,
    Gain,
    Maintain,
}

impl GoalDirection {
    pub fn from_weights(current_weight_kg: f64, target_weight_kg: f64) -> Self {
        if current_weight_kg > target_weight_kg {
            GoalDirection::Reduce
        } else if current_weight_kg < target_weight_kg {
            GoalDirection::Gain
        } else {
            GoalDirection::Maintain
        }
    }
}

/// Daily calorie target with the default 500 kcal / 1200 kcal rule
pub fn calculate_daily_calorie_target(tdee: i32, current_weight_kg: f64, target_weight_kg: f64) -> i32 {
    calculate_daily_calorie_target_with_policy(
        tdee,
        current_weight_kg,
        target_weight_kg,
        CaloriePolicy::default(),
    )
}

/// Daily calorie target under a custom policy
///
/// - reducing: `max(tdee - adjustment, minimum)`
/// - gaining: `tdee + adjustment`, no ceiling
/// - maintaining: `tdee`
pub fn calculate_daily_calorie_target_with_policy(
    tdee: i32,
    current_weight_kg: f64,
    target_weight_kg: f64,
    policy: CaloriePolicy,
) -> i32 {
    match GoalDirection::from_weights(current_weight_kg, target_weight_kg) {
        GoalDirection::Reduce => (tdee - policy.adjustment_kcal).max(policy.minimum_target_kcal),
        GoalDirection::Gain => tdee + policy.adjustment_kcal,
        GoalDirection::Maintain => tdee,
    }
}

// ============================================================================
// BMI
// ============================================================================

/// BMI category (Chinese adult cut-offs: 18.5 / 24 / 28)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Half-open BMI range `[min, max)` of this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::Normal => (18.5, 24.0),
            BmiCategory::Overweight => (24.0, 28.0),
            BmiCategory::Obese => (28.0, f64::INFINITY),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }

    /// Display label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "偏瘦",
            BmiCategory::Normal => "正常",
            BmiCategory::Overweight => "偏胖",
            BmiCategory::Obese => "肥胖",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// BMI rounded to one decimal: weight(kg) / height(m)²
///
/// A zero height yields an infinite or NaN result.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_half_up(weight_kg / (height_m * height_m) * 10.0) / 10.0
}

/// Classify a BMI value. Lower bounds are inclusive.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 24.0 {
        BmiCategory::Normal
    } else if bmi < 28.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

// ============================================================================
// Exercise
// ============================================================================

/// An exercise with its metabolic equivalent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetEntry {
    /// Canonical label
    pub label: &'static str,
    /// English alias accepted on input
    pub slug: &'static str,
    pub met: f64,
}

/// Canonical MET catalogue
pub const MET_TABLE: &[MetEntry] = &[
    MetEntry { label: "跑步", slug: "running", met: 8.0 },
    MetEntry { label: "快走", slug: "walking", met: 4.5 },
    MetEntry { label: "慢走", slug: "slow_walking", met: 3.5 },
    MetEntry { label: "游泳", slug: "swimming", met: 7.0 },
    MetEntry { label: "骑行", slug: "cycling", met: 6.0 },
    MetEntry { label: "瑜伽", slug: "yoga", met: 3.0 },
    MetEntry { label: "力量训练", slug: "strength", met: 5.0 },
    MetEntry { label: "跳绳", slug: "rope_jumping", met: 10.0 },
    MetEntry { label: "爬楼梯", slug: "stair_climbing", met: 8.0 },
    MetEntry { label: "打篮球", slug: "basketball", met: 6.5 },
    MetEntry { label: "打羽毛球", slug: "badminton", met: 5.5 },
    MetEntry { label: "跳舞", slug: "dancing", met: 4.5 },
];

/// Short ball-game labels used by some clients
const LABEL_ALIASES: &[(&str, &str)] = &[("篮球", "打篮球"), ("羽毛球", "打羽毛球")];

/// Look up an exercise by canonical label, alias or English slug
pub fn find_exercise(label: &str) -> Option<&'static MetEntry> {
    let label = label.trim();
    let canonical = LABEL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == label)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(label);

    MET_TABLE
        .iter()
        .find(|entry| entry.label == canonical || entry.slug.eq_ignore_ascii_case(canonical))
}

/// MET value for a label, [`DEFAULT_MET`] when unknown
pub fn met_value(label: &str) -> f64 {
    find_exercise(label).map(|entry| entry.met).unwrap_or(DEFAULT_MET)
}

/// Calories burned: MET × weight(kg) × hours
pub fn calculate_exercise_calories(label: &str, duration_minutes: f64, weight_kg: f64) -> i32 {
    let hours = duration_minutes / 60.0;
    round_half_up(met_value(label) * weight_kg * hours) as i32
}

// ============================================================================
// Goal projection
// ============================================================================

/// Days needed to close the weight gap at a constant daily deficit
///
/// Returns `None` when the deficit is zero (or the result is not finite).
pub fn calculate_days_to_goal(
    current_weight_kg: f64,
    target_weight_kg: f64,
    daily_calorie_deficit: f64,
) -> Option<i64> {
    let weight_diff = (current_weight_kg - target_weight_kg).abs();
    let days = (weight_diff * KCAL_PER_KG_FAT / daily_calorie_deficit.abs()).ceil();
    days.is_finite().then_some(days as i64)
}

/// Weight change (kg) implied by a net calorie balance; positive = gain
pub fn calculate_weight_change(net_calories: f64) -> f64 {
    net_calories / KCAL_PER_KG_FAT
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    // =========================================================================
    // BMR / TDEE
    // =========================================================================

    #[test]
    fn test_bmr_male() {
        assert_eq!(calculate_bmr(Gender::Male, 30, 175.0, 80.0), 1749);
    }

    #[test]
    fn test_bmr_female() {
        assert_eq!(calculate_bmr(Gender::Female, 25, 165.0, 60.0), 1345);
    }

    #[test]
    fn test_bmr_degenerate_inputs_propagate() {
        // -5 × 0 ... only the sex constant remains
        assert_eq!(calculate_bmr(Gender::Male, 0, 0.0, 0.0), 5);
        assert_eq!(calculate_bmr(Gender::Female, 0, 0.0, 0.0), -161);
    }

    #[rstest]
    #[case(ActivityLevel::Sedentary, 2099)]
    #[case(ActivityLevel::Light, 2405)]
    #[case(ActivityLevel::Moderate, 2711)]
    #[case(ActivityLevel::Active, 3017)]
    #[case(ActivityLevel::VeryActive, 3323)]
    fn test_tdee_tiers(#[case] level: ActivityLevel, #[case] expected: i32) {
        assert_eq!(calculate_tdee(1749, level), expected);
    }

    #[test]
    fn test_tdee_female_light() {
        assert_eq!(calculate_tdee(1345, ActivityLevel::Light), 1849);
    }

    // =========================================================================
    // Daily target
    // =========================================================================

    #[test]
    fn test_daily_target_reducing() {
        assert_eq!(calculate_daily_calorie_target(2711, 80.0, 70.0), 2211);
    }

    #[test]
    fn test_daily_target_floor() {
        assert_eq!(calculate_daily_calorie_target(1000, 80.0, 70.0), 1200);
        assert_eq!(calculate_daily_calorie_target(1650, 60.0, 55.0), 1200);
    }

    #[test]
    fn test_daily_target_gaining_and_maintaining() {
        assert_eq!(calculate_daily_calorie_target(2000, 55.0, 60.0), 2500);
        assert_eq!(calculate_daily_calorie_target(2000, 60.0, 60.0), 2000);
    }

    #[test]
    fn test_daily_target_custom_policy() {
        let policy = CaloriePolicy {
            adjustment_kcal: 300,
            minimum_target_kcal: 1500,
        };
        assert_eq!(calculate_daily_calorie_target_with_policy(2000, 80.0, 70.0, policy), 1700);
        assert_eq!(calculate_daily_calorie_target_with_policy(1700, 80.0, 70.0, policy), 1500);
        assert_eq!(calculate_daily_calorie_target_with_policy(2000, 50.0, 70.0, policy), 2300);
    }

    // =========================================================================
    // BMI
    // =========================================================================

    #[test]
    fn test_bmi_one_decimal() {
        let bmi = calculate_bmi(70.0, 175.0);
        assert_eq!(bmi, 22.9);
        assert_eq!(classify_bmi(bmi), BmiCategory::Normal);
    }

    #[test]
    fn test_bmi_zero_height_is_not_finite() {
        assert!(!calculate_bmi(70.0, 0.0).is_finite());
    }

    #[rstest]
    #[case(17.0, BmiCategory::Underweight)]
    #[case(18.4, BmiCategory::Underweight)]
    #[case(18.5, BmiCategory::Normal)]
    #[case(23.9, BmiCategory::Normal)]
    #[case(24.0, BmiCategory::Overweight)]
    #[case(27.9, BmiCategory::Overweight)]
    #[case(28.0, BmiCategory::Obese)]
    #[case(40.0, BmiCategory::Obese)]
    fn test_bmi_categories(#[case] bmi: f64, #[case] expected: BmiCategory) {
        assert_eq!(classify_bmi(bmi), expected);
    }

    #[test]
    fn test_bmi_category_labels() {
        assert_eq!(BmiCategory::Underweight.label(), "偏瘦");
        assert_eq!(BmiCategory::Obese.label(), "肥胖");
        assert_eq!(BmiCategory::Overweight.to_string(), "overweight");
    }

    // =========================================================================
    // Exercise
    // =========================================================================

    #[test]
    fn test_exercise_calories_running() {
        assert_eq!(calculate_exercise_calories("跑步", 30.0, 80.0), 320);
    }

    #[test]
    fn test_exercise_calories_unknown_defaults() {
        assert_eq!(calculate_exercise_calories("冲浪", 30.0, 80.0), 200);
    }

    #[rstest]
    #[case("running", 8.0)]
    #[case("Running", 8.0)]
    #[case(" 跳绳 ", 10.0)]
    #[case("篮球", 6.5)]
    #[case("badminton", 5.5)]
    #[case("football", DEFAULT_MET)]
    fn test_met_aliases(#[case] label: &str, #[case] expected: f64) {
        assert_eq!(met_value(label), expected);
    }

    // =========================================================================
    // Goal projection
    // =========================================================================

    #[test]
    fn test_days_to_goal() {
        assert_eq!(calculate_days_to_goal(80.0, 70.0, 500.0), Some(154));
        // Sign of the deficit and direction of the goal do not matter
        assert_eq!(calculate_days_to_goal(70.0, 80.0, -500.0), Some(154));
        assert_eq!(calculate_days_to_goal(80.0, 79.5, 700.0), Some(6));
    }

    #[test]
    fn test_days_to_goal_zero_deficit() {
        assert_eq!(calculate_days_to_goal(80.0, 70.0, 0.0), None);
    }

    #[test]
    fn test_weight_change() {
        assert_eq!(calculate_weight_change(7700.0), 1.0);
        assert_eq!(calculate_weight_change(-3850.0), -0.5);
        assert_eq!(calculate_weight_change(0.0), 0.0);
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn test_parse_labels() {
        assert_eq!("very_active".parse::<ActivityLevel>(), Ok(ActivityLevel::VeryActive));
        assert_eq!(" Female ".parse::<Gender>(), Ok(Gender::Female));
        assert!("extreme".parse::<ActivityLevel>().is_err());
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&ActivityLevel::VeryActive).unwrap();
        assert_eq!(json, "\"very_active\"");
        let gender: Gender = serde_json::from_str("\"male\"").unwrap();
        assert_eq!(gender, Gender::Male);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: calculations are idempotent
        #[test]
        fn prop_idempotent(
            age in 1u32..100,
            height in 100.0f64..220.0,
            weight in 30.0f64..200.0,
        ) {
            let first = calculate_bmr(Gender::Female, age, height, weight);
            let second = calculate_bmr(Gender::Female, age, height, weight);
            prop_assert_eq!(first, second);
            prop_assert_eq!(calculate_bmi(weight, height), calculate_bmi(weight, height));
        }

        /// Property: every calculator function is deterministic
        #[test]
        fn prop_every_calculation_is_deterministic(
            bmr in 800i32..4000,
            tier in 0usize..5,
            current in 30.0f64..200.0,
            target in 30.0f64..200.0,
            bmi in 0.0f64..80.0,
            exercise in 0usize..=MET_TABLE.len(),
            minutes in 0.0f64..300.0,
            deficit in -1500.0f64..1500.0,
            net in -20000.0f64..20000.0,
        ) {
            let level = ActivityLevel::ALL[tier];
            prop_assert_eq!(calculate_tdee(bmr, level), calculate_tdee(bmr, level));

            let tdee = calculate_tdee(bmr, level);
            prop_assert_eq!(
                calculate_daily_calorie_target(tdee, current, target),
                calculate_daily_calorie_target(tdee, current, target)
            );

            prop_assert_eq!(classify_bmi(bmi), classify_bmi(bmi));

            // One past the table end exercises the default MET fallback
            let label = MET_TABLE.get(exercise).map_or("攀岩", |entry| entry.label);
            prop_assert_eq!(
                calculate_exercise_calories(label, minutes, current),
                calculate_exercise_calories(label, minutes, current)
            );

            prop_assert_eq!(
                calculate_days_to_goal(current, target, deficit),
                calculate_days_to_goal(current, target, deficit)
            );
            prop_assert_eq!(calculate_weight_change(net), calculate_weight_change(net));
        }

        /// Property: heavier = higher BMR
        #[test]
        fn prop_bmr_increases_with_weight(
            age in 18u32..80,
            height in 140.0f64..210.0,
            weight in 40.0f64..150.0,
        ) {
            let lighter = calculate_bmr(Gender::Male, age, height, weight);
            let heavier = calculate_bmr(Gender::Male, age, height, weight + 1.0);
            prop_assert!(heavier > lighter);
        }

        /// Property: TDEE never below a positive BMR
        #[test]
        fn prop_tdee_at_least_bmr(bmr in 800i32..4000, tier in 0usize..5) {
            let level = ActivityLevel::ALL[tier];
            prop_assert!(calculate_tdee(bmr, level) >= bmr);
        }

        /// Property: a reducing target never falls below the floor
        #[test]
        fn prop_reducing_target_floor(
            tdee in -1000i32..5000,
            current in 50.0f64..150.0,
            loss in 0.1f64..40.0,
        ) {
            let target = calculate_daily_calorie_target(tdee, current, current - loss);
            prop_assert!(target >= MINIMUM_REDUCING_TARGET);
        }

        /// Property: every finite BMI lands in the category whose range contains it
        #[test]
        fn prop_bmi_category_range(bmi in 0.0f64..80.0) {
            let (min, max) = classify_bmi(bmi).range();
            prop_assert!(bmi >= min && bmi < max);
        }

        /// Property: weight change is linear in calories
        #[test]
        fn prop_weight_change_linear(a in -20000.0f64..20000.0, b in -20000.0f64..20000.0) {
            let combined = calculate_weight_change(a + b);
            let separate = calculate_weight_change(a) + calculate_weight_change(b);
            prop_assert!((combined - separate).abs() < 1e-9);
        }
    }
}
