//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod exercise;
pub mod food;
pub mod food_log;
pub mod profile;
pub mod sleep;
pub mod weight;

pub use exercise::{CreateExerciseLog, ExerciseLogRecord, ExerciseRepository};
pub use food::{CreateFood, FoodRecord, FoodRepository};
pub use food_log::{CreateFoodLog, FoodLogRecord, FoodLogRepository, FoodTotals};
pub use profile::{ProfileRecord, ProfileRepository, UpsertProfile};
pub use sleep::{CreateSleepLog, SleepLogRecord, SleepRepository};
pub use weight::{CreateWeightLog, WeightLogRecord, WeightRepository};
