//! Diet Assistant WASM Module
//!
//! Browser bindings for the metabolic calculator so the client can preview
//! targets without a round trip. `calculate_daily_calorie_target` uses the
//! default 500/1200 kcal policy; servers with custom `nutrition` settings
//! are mirrored by `calculate_daily_calorie_target_with_policy`.

use diet_assistant_shared::{metabolic, ActivityLevel, CaloriePolicy, Gender, ParseError, MET_TABLE};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js(err: ParseError) -> JsError {
    JsError::new(&err.to_string())
}

fn parse_gender(gender: &str) -> Result<Gender, ParseError> {
    gender.parse()
}

fn parse_activity(activity_level: &str) -> Result<ActivityLevel, ParseError> {
    activity_level.parse()
}

/// BMR (Mifflin-St Jeor); `gender` is "male" or "female"
#[wasm_bindgen]
pub fn calculate_bmr(gender: &str, age: u32, height_cm: f64, weight_kg: f64) -> Result<i32, JsError> {
    let gender = parse_gender(gender).map_err(to_js)?;
    Ok(metabolic::calculate_bmr(gender, age, height_cm, weight_kg))
}

/// TDEE for an activity level such as "moderate" or "very_active"
#[wasm_bindgen]
pub fn calculate_tdee(bmr: i32, activity_level: &str) -> Result<i32, JsError> {
    let level = parse_activity(activity_level).map_err(to_js)?;
    Ok(metabolic::calculate_tdee(bmr, level))
}

#[wasm_bindgen]
pub fn calculate_daily_calorie_target(tdee: i32, current_weight_kg: f64, target_weight_kg: f64) -> i32 {
    metabolic::calculate_daily_calorie_target(tdee, current_weight_kg, target_weight_kg)
}

/// Daily target with an explicit adjustment and reducing floor
#[wasm_bindgen]
pub fn calculate_daily_calorie_target_with_policy(
    tdee: i32,
    current_weight_kg: f64,
    target_weight_kg: f64,
    adjustment_kcal: i32,
    minimum_target_kcal: i32,
) -> i32 {
    let policy = CaloriePolicy {
        adjustment_kcal,
        minimum_target_kcal,
    };
    metabolic::calculate_daily_calorie_target_with_policy(
        tdee,
        current_weight_kg,
        target_weight_kg,
        policy,
    )
}

/// BMI rounded to one decimal
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    metabolic::calculate_bmi(weight_kg, height_cm)
}

/// Chinese category label for a BMI value
#[wasm_bindgen]
pub fn bmi_category_label(bmi: f64) -> String {
    metabolic::classify_bmi(bmi).label().to_string()
}

/// Calories burned; unknown exercise names fall back to MET 5.0
#[wasm_bindgen]
pub fn calculate_exercise_calories(exercise_type: &str, duration_minutes: f64, weight_kg: f64) -> i32 {
    metabolic::calculate_exercise_calories(exercise_type, duration_minutes, weight_kg)
}

/// `undefined` when the deficit is zero
#[wasm_bindgen]
pub fn calculate_days_to_goal(
    current_weight_kg: f64,
    target_weight_kg: f64,
    daily_calorie_deficit: f64,
) -> Option<i32> {
    metabolic::calculate_days_to_goal(current_weight_kg, target_weight_kg, daily_calorie_deficit)
        .and_then(|days| i32::try_from(days).ok())
}

#[wasm_bindgen]
pub fn calculate_weight_change(net_calories: f64) -> f64 {
    metabolic::calculate_weight_change(net_calories)
}

#[derive(Serialize)]
struct ExerciseOption {
    label: &'static str,
    slug: &'static str,
    met: f64,
}

/// The MET catalogue as a JSON array of `{label, slug, met}`
#[wasm_bindgen]
pub fn exercise_catalogue_json() -> String {
    let options: Vec<ExerciseOption> = MET_TABLE
        .iter()
        .map(|e| ExerciseOption {
            label: e.label,
            slug: e.slug,
            met: e.met,
        })
        .collect();
    serde_json::to_string(&options).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr_and_tdee_chain() {
        let bmr = calculate_bmr("male", 30, 175.0, 80.0).unwrap();
        assert_eq!(bmr, 1749);
        assert_eq!(calculate_tdee(bmr, "moderate").unwrap(), 2711);
        assert_eq!(calculate_daily_calorie_target(2711, 80.0, 70.0), 2211);
    }

    #[test]
    fn test_daily_target_with_custom_policy() {
        assert_eq!(calculate_daily_calorie_target_with_policy(2000, 80.0, 70.0, 300, 1500), 1700);
        assert_eq!(calculate_daily_calorie_target_with_policy(1600, 80.0, 70.0, 300, 1500), 1500);
        assert_eq!(calculate_daily_calorie_target_with_policy(2000, 60.0, 70.0, 300, 1500), 2300);
        assert_eq!(
            calculate_daily_calorie_target_with_policy(2711, 80.0, 70.0, 500, 1200),
            calculate_daily_calorie_target(2711, 80.0, 70.0)
        );
    }

    #[test]
    fn test_labels_are_parsed_case_insensitively() {
        assert!(parse_gender("Female").is_ok());
        assert!(parse_activity("very_active").is_ok());
        assert!(parse_gender("other").is_err());
        assert!(parse_activity("couch").is_err());
    }

    #[test]
    fn test_bmi() {
        assert_eq!(calculate_bmi(70.0, 175.0), 22.9);
        assert_eq!(bmi_category_label(22.9), "正常");
    }

    #[test]
    fn test_days_to_goal() {
        assert_eq!(calculate_days_to_goal(80.0, 70.0, 500.0), Some(154));
        assert_eq!(calculate_days_to_goal(80.0, 70.0, 0.0), None);
    }

    #[test]
    fn test_exercise_catalogue_json() {
        let json: serde_json::Value = serde_json::from_str(&exercise_catalogue_json()).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), MET_TABLE.len());
        assert_eq!(entries[0]["label"], "跑步");
        assert_eq!(calculate_exercise_calories("跑步", 30.0, 80.0), 320);
    }
}
