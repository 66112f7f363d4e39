//! Built-in food catalogue
//!
//! Common Chinese staples with per-100g nutrients and a typical serving.

use crate::repositories::{CreateFood, FoodRepository};
use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, info};

/// A catalogue entry; nutrients are per 100 g
#[derive(Debug, Clone, Copy)]
pub struct SeedFood {
    pub name: &'static str,
    pub calories: i64,
    pub protein: i64,
    pub fat: i64,
    pub carbs: i64,
    pub serving_size: &'static str,
    pub serving_grams: i64,
}

const fn food(
    name: &'static str,
    calories: i64,
    protein: i64,
    fat: i64,
    carbs: i64,
    serving_size: &'static str,
    serving_grams: i64,
) -> SeedFood {
    SeedFood {
        name,
        calories,
        protein,
        fat,
        carbs,
        serving_size,
        serving_grams,
    }
}

pub const SEED_FOODS: &[SeedFood] = &[
    // Staples
    food("米饭", 116, 3, 0, 26, "一碗", 150),
    food("白米饭", 116, 3, 0, 26, "一碗", 150),
    food("面条", 137, 5, 1, 28, "一碗", 200),
    food("馒头", 221, 7, 1, 47, "一个", 100),
    food("面包", 265, 9, 3, 50, "一片", 40),
    food("包子", 227, 7, 3, 44, "一个", 80),
    // Meat and fish
    food("鸡胸肉", 165, 31, 4, 0, "一块", 150),
    food("猪肉", 242, 17, 19, 0, "一份", 100),
    food("牛肉", 250, 26, 15, 0, "一份", 100),
    food("羊肉", 203, 19, 14, 0, "一份", 100),
    food("鱼肉", 206, 22, 13, 0, "一条", 200),
    // Eggs
    food("鸡蛋", 147, 13, 10, 1, "一个", 50),
    food("煮鸡蛋", 155, 13, 11, 1, "一个", 50),
    // Vegetables
    food("西兰花", 34, 3, 0, 7, "一份", 100),
    food("番茄", 18, 1, 0, 4, "一个", 150),
    food("黄瓜", 15, 1, 0, 3, "一根", 100),
    food("白菜", 13, 1, 0, 2, "一份", 100),
    food("菠菜", 23, 3, 0, 4, "一份", 100),
    food("胡萝卜", 41, 1, 0, 10, "一根", 100),
    // Fruit
    food("苹果", 52, 0, 0, 14, "一个", 150),
    food("香蕉", 89, 1, 0, 23, "一根", 120),
    food("橙子", 47, 1, 0, 12, "一个", 130),
    food("西瓜", 30, 1, 0, 8, "一块", 200),
    food("葡萄", 69, 1, 0, 18, "一串", 100),
    // Dairy
    food("牛奶", 61, 3, 3, 5, "一杯", 250),
    food("酸奶", 61, 3, 3, 5, "一杯", 200),
    // Snacks
    food("薯片", 536, 7, 35, 50, "一包", 50),
    food("巧克力", 546, 5, 31, 61, "一块", 40),
    food("饼干", 435, 7, 14, 71, "一包", 50),
    // Drinks
    food("可乐", 43, 0, 0, 11, "一罐", 330),
    food("橙汁", 45, 1, 0, 11, "一杯", 250),
    // Fast food
    food("汉堡", 295, 17, 14, 25, "一个", 200),
    food("披萨", 266, 11, 10, 33, "一片", 120),
    food("炸鸡", 290, 18, 18, 15, "一块", 100),
];

impl SeedFood {
    pub fn to_create(&self) -> CreateFood {
        CreateFood {
            name: self.name.to_string(),
            calories_per_100g: Decimal::from(self.calories),
            protein_per_100g: Decimal::from(self.protein),
            fat_per_100g: Decimal::from(self.fat),
            carbs_per_100g: Decimal::from(self.carbs),
            serving_size: Some(self.serving_size.to_string()),
            serving_grams: Some(Decimal::from(self.serving_grams)),
        }
    }
}

/// Insert the catalogue when the foods table is empty.
///
/// Returns the number of rows inserted; 0 when foods already exist.
pub async fn seed_foods(pool: &PgPool) -> Result<usize> {
    let existing = FoodRepository::count(pool).await?;
    if existing > 0 {
        info!(existing, "Food catalogue already populated, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for food in SEED_FOODS {
        if FoodRepository::insert(pool, food.to_create()).await?.is_some() {
            debug!(name = food.name, "Seeded food");
            inserted += 1;
        }
    }

    info!(inserted, "Food catalogue seeded");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_has_33_unique_foods() {
        assert_eq!(SEED_FOODS.len(), 33);
        let names: HashSet<_> = SEED_FOODS.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), SEED_FOODS.len());
    }

    #[test]
    fn test_catalogue_values_are_plausible() {
        for food in SEED_FOODS {
            assert!(food.calories > 0 && food.calories < 900, "{}", food.name);
            assert!(food.serving_grams > 0, "{}", food.name);
            // Macros can't outweigh the food itself
            assert!(food.protein + food.fat + food.carbs <= 100, "{}", food.name);
        }
    }

    #[test]
    fn test_to_create_keeps_serving() {
        let rice = SEED_FOODS[0].to_create();
        assert_eq!(rice.name, "米饭");
        assert_eq!(rice.calories_per_100g, Decimal::from(116));
        assert_eq!(rice.serving_size.as_deref(), Some("一碗"));
        assert_eq!(rice.serving_grams, Some(Decimal::from(150)));
    }
}
