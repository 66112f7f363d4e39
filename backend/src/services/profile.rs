//! Profile service - business logic for user profiles
//!
//! A profile stores the biometrics behind the daily calorie target. The
//! BMR, TDEE and target are computed on every write and stored with it.

use crate::error::ApiError;
use crate::repositories::{ProfileRecord, ProfileRepository, UpsertProfile, WeightRepository};
use crate::services::{decimal_to_f64, f64_to_decimal};
use diet_assistant_shared::{
    calculate_bmi, calculate_bmr, calculate_daily_calorie_target_with_policy,
    calculate_days_to_goal, calculate_tdee, classify_bmi, ActivityLevel, CaloriePolicy,
    CreateProfileRequest, CreateProfileResponse, Gender, GoalDirection, ProfileInsightsResponse,
    ProfileResponse,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Calculator outputs for a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyPlan {
    pub bmr: i32,
    pub tdee: i32,
    pub daily_calorie_target: i32,
}

/// Profile service for user profile operations
pub struct ProfileService;

impl ProfileService {
    /// Create or replace the caller's profile
    pub async fn create_profile(
        db: &PgPool,
        user_id: Uuid,
        req: CreateProfileRequest,
        policy: CaloriePolicy,
    ) -> Result<CreateProfileResponse, ApiError> {
        req.validate()?;

        let plan = Self::plan(&req, policy);

        let record = ProfileRepository::upsert(
            db,
            UpsertProfile {
                user_id,
                gender: req.gender.to_string(),
                age: req.age as i32,
                height_cm: f64_to_decimal(req.height_cm),
                initial_weight_kg: f64_to_decimal(req.initial_weight_kg),
                target_weight_kg: f64_to_decimal(req.target_weight_kg),
                activity_level: req.activity_level.to_string(),
                bmr: plan.bmr,
                tdee: plan.tdee,
                daily_calorie_target: plan.daily_calorie_target,
                meal_settings: req.meal_settings,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(
            user_id = %user_id,
            bmr = plan.bmr,
            tdee = plan.tdee,
            target = plan.daily_calorie_target,
            "Profile saved"
        );

        Ok(CreateProfileResponse {
            bmr: plan.bmr,
            tdee: plan.tdee,
            daily_calorie_target: plan.daily_calorie_target,
            profile: Self::to_response(record)?,
        })
    }

    /// Get the caller's profile
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
        Self::find_profile(db, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))
    }

    /// Get the caller's profile if one exists
    pub async fn find_profile(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<ProfileResponse>, ApiError> {
        ProfileRepository::find_by_user(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(Self::to_response)
            .transpose()
    }

    /// Progress towards the target weight, based on the latest weigh-in
    pub async fn get_insights(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<ProfileInsightsResponse, ApiError> {
        let profile = Self::get_profile(db, user_id).await?;

        let latest = WeightRepository::get_latest(db, user_id)
            .await
            .map_err(ApiError::Internal)?;
        let current_weight_kg = latest
            .map(|w| decimal_to_f64(&w.weight_kg))
            .unwrap_or(profile.initial_weight_kg);

        Ok(Self::compute_insights(&profile, current_weight_kg))
    }

    /// BMR -> TDEE -> daily target for a request
    pub fn plan(req: &CreateProfileRequest, policy: CaloriePolicy) -> EnergyPlan {
        let bmr = calculate_bmr(req.gender, req.age, req.height_cm, req.initial_weight_kg);
        let tdee = calculate_tdee(bmr, req.activity_level);
        let daily_calorie_target = calculate_daily_calorie_target_with_policy(
            tdee,
            req.initial_weight_kg,
            req.target_weight_kg,
            policy,
        );

        EnergyPlan {
            bmr,
            tdee,
            daily_calorie_target,
        }
    }

    /// Insights for a profile at a given current weight
    pub fn compute_insights(
        profile: &ProfileResponse,
        current_weight_kg: f64,
    ) -> ProfileInsightsResponse {
        let bmi = calculate_bmi(current_weight_kg, profile.height_cm);
        let category = classify_bmi(bmi);
        let direction = GoalDirection::from_weights(current_weight_kg, profile.target_weight_kg);
        let daily_calorie_deficit = profile.tdee - profile.daily_calorie_target;

        let days_to_goal = match direction {
            GoalDirection::Maintain => None,
            _ => calculate_days_to_goal(
                current_weight_kg,
                profile.target_weight_kg,
                f64::from(daily_calorie_deficit),
            ),
        };

        ProfileInsightsResponse {
            current_weight_kg,
            target_weight_kg: profile.target_weight_kg,
            bmi,
            bmi_category: category,
            bmi_category_label: category.label().to_string(),
            weight_to_goal_kg: ((current_weight_kg - profile.target_weight_kg) * 10.0).round() / 10.0,
            direction,
            daily_calorie_deficit,
            days_to_goal,
        }
    }

    fn to_response(record: ProfileRecord) -> Result<ProfileResponse, ApiError> {
        let gender: Gender = record
            .gender
            .parse()
            .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;
        let activity_level: ActivityLevel = record
            .activity_level
            .parse()
            .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;

        Ok(ProfileResponse {
            user_id: record.user_id.to_string(),
            gender,
            age: record.age.max(0) as u32,
            height_cm: decimal_to_f64(&record.height_cm),
            initial_weight_kg: decimal_to_f64(&record.initial_weight_kg),
            target_weight_kg: decimal_to_f64(&record.target_weight_kg),
            activity_level,
            bmr: record.bmr,
            tdee: record.tdee,
            daily_calorie_target: record.daily_calorie_target,
            meal_settings: record.meal_settings,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use diet_assistant_shared::BmiCategory;

    fn request() -> CreateProfileRequest {
        CreateProfileRequest {
            gender: Gender::Male,
            age: 30,
            height_cm: 175.0,
            initial_weight_kg: 80.0,
            target_weight_kg: 70.0,
            activity_level: ActivityLevel::Moderate,
            meal_settings: None,
        }
    }

    fn profile(plan: EnergyPlan) -> ProfileResponse {
        let req = request();
        ProfileResponse {
            user_id: Uuid::new_v4().to_string(),
            gender: req.gender,
            age: req.age,
            height_cm: req.height_cm,
            initial_weight_kg: req.initial_weight_kg,
            target_weight_kg: req.target_weight_kg,
            activity_level: req.activity_level,
            bmr: plan.bmr,
            tdee: plan.tdee,
            daily_calorie_target: plan.daily_calorie_target,
            meal_settings: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_plan_reducing_profile() {
        let plan = ProfileService::plan(&request(), CaloriePolicy::default());
        assert_eq!(
            plan,
            EnergyPlan {
                bmr: 1749,
                tdee: 2711,
                daily_calorie_target: 2211,
            }
        );
    }

    #[test]
    fn test_plan_respects_policy() {
        let policy = CaloriePolicy {
            adjustment_kcal: 300,
            minimum_target_kcal: 1500,
        };
        let plan = ProfileService::plan(&request(), policy);
        assert_eq!(plan.daily_calorie_target, 2411);
    }

    #[test]
    fn test_insights_at_initial_weight() {
        let plan = ProfileService::plan(&request(), CaloriePolicy::default());
        let insights = ProfileService::compute_insights(&profile(plan), 80.0);

        assert_eq!(insights.bmi, 26.1);
        assert_eq!(insights.bmi_category, BmiCategory::Overweight);
        assert_eq!(insights.bmi_category_label, "偏胖");
        assert_eq!(insights.weight_to_goal_kg, 10.0);
        assert_eq!(insights.direction, GoalDirection::Reduce);
        assert_eq!(insights.daily_calorie_deficit, 500);
        assert_eq!(insights.days_to_goal, Some(154));
    }

    #[test]
    fn test_insights_goal_reached() {
        let plan = ProfileService::plan(&request(), CaloriePolicy::default());
        let insights = ProfileService::compute_insights(&profile(plan), 70.0);

        assert_eq!(insights.direction, GoalDirection::Maintain);
        assert_eq!(insights.days_to_goal, None);
        assert_eq!(insights.weight_to_goal_kg, 0.0);
    }
}
