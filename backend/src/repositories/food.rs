//! Food catalogue repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Food record from the database; nutrients are per 100 g
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FoodRecord {
    pub id: Uuid,
    pub name: String,
    pub calories_per_100g: Decimal,
    pub protein_per_100g: Decimal,
    pub fat_per_100g: Decimal,
    pub carbs_per_100g: Decimal,
    pub serving_size: Option<String>,
    pub serving_grams: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a food
#[derive(Debug, Clone)]
pub struct CreateFood {
    pub name: String,
    pub calories_per_100g: Decimal,
    pub protein_per_100g: Decimal,
    pub fat_per_100g: Decimal,
    pub carbs_per_100g: Decimal,
    pub serving_size: Option<String>,
    pub serving_grams: Option<Decimal>,
}

/// Food repository
pub struct FoodRepository;

impl FoodRepository {
    /// Case-insensitive substring search on the food name
    pub async fn search(pool: &PgPool, query: &str, limit: i64) -> Result<Vec<FoodRecord>> {
        let records = sqlx::query_as::<_, FoodRecord>(
            r#"
            SELECT id, name, calories_per_100g, protein_per_100g, fat_per_100g,
                   carbs_per_100g, serving_size, serving_grams, created_at
            FROM foods
            WHERE POSITION(LOWER($1) IN LOWER(name)) > 0
            ORDER BY name
            LIMIT $2
            "#,
        )
        .bind(query)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Find a food by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<FoodRecord>> {
        let record = sqlx::query_as::<_, FoodRecord>(
            r#"
            SELECT id, name, calories_per_100g, protein_per_100g, fat_per_100g,
                   carbs_per_100g, serving_size, serving_grams, created_at
            FROM foods
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Insert a food; returns `None` when a food with the same name exists
    pub async fn insert(pool: &PgPool, input: CreateFood) -> Result<Option<FoodRecord>> {
        let record = sqlx::query_as::<_, FoodRecord>(
            r#"
            INSERT INTO foods (name, calories_per_100g, protein_per_100g, fat_per_100g,
                               carbs_per_100g, serving_size, serving_grams)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name, calories_per_100g, protein_per_100g, fat_per_100g,
                      carbs_per_100g, serving_size, serving_grams, created_at
            "#,
        )
        .bind(&input.name)
        .bind(input.calories_per_100g)
        .bind(input.protein_per_100g)
        .bind(input.fat_per_100g)
        .bind(input.carbs_per_100g)
        .bind(&input.serving_size)
        .bind(input.serving_grams)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Number of foods in the catalogue
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM foods")
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }
}
