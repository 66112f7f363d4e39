//! User profile repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Profile record from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub gender: String,
    pub age: i32,
    pub height_cm: Decimal,
    pub initial_weight_kg: Decimal,
    pub target_weight_kg: Decimal,
    pub activity_level: String,
    pub bmr: i32,
    pub tdee: i32,
    pub daily_calorie_target: i32,
    pub meal_settings: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a profile
#[derive(Debug, Clone)]
pub struct UpsertProfile {
    pub user_id: Uuid,
    pub gender: String,
    pub age: i32,
    pub height_cm: Decimal,
    pub initial_weight_kg: Decimal,
    pub target_weight_kg: Decimal,
    pub activity_level: String,
    pub bmr: i32,
    pub tdee: i32,
    pub daily_calorie_target: i32,
    pub meal_settings: Option<String>,
}

/// Profile repository
pub struct ProfileRepository;

impl ProfileRepository {
    /// Find the profile of a user
    pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRecord>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT user_id, gender, age, height_cm, initial_weight_kg, target_weight_kg,
                   activity_level, bmr, tdee, daily_calorie_target, meal_settings,
                   created_at, updated_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Insert a profile, or replace every field of an existing one
    pub async fn upsert(pool: &PgPool, input: UpsertProfile) -> Result<ProfileRecord> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            INSERT INTO user_profiles (user_id, gender, age, height_cm, initial_weight_kg,
                                       target_weight_kg, activity_level, bmr, tdee,
                                       daily_calorie_target, meal_settings)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id) DO UPDATE SET
                gender = EXCLUDED.gender,
                age = EXCLUDED.age,
                height_cm = EXCLUDED.height_cm,
                initial_weight_kg = EXCLUDED.initial_weight_kg,
                target_weight_kg = EXCLUDED.target_weight_kg,
                activity_level = EXCLUDED.activity_level,
                bmr = EXCLUDED.bmr,
                tdee = EXCLUDED.tdee,
                daily_calorie_target = EXCLUDED.daily_calorie_target,
                meal_settings = EXCLUDED.meal_settings,
                updated_at = NOW()
            RETURNING user_id, gender, age, height_cm, initial_weight_kg, target_weight_kg,
                      activity_level, bmr, tdee, daily_calorie_target, meal_settings,
                      created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.gender)
        .bind(input.age)
        .bind(input.height_cm)
        .bind(input.initial_weight_kg)
        .bind(input.target_weight_kg)
        .bind(&input.activity_level)
        .bind(input.bmr)
        .bind(input.tdee)
        .bind(input.daily_calorie_target)
        .bind(&input.meal_settings)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }
}
