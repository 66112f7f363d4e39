//! AI advisor service
//!
//! Chat with a nutritionist or trainer persona, meal plans, food photo
//! recognition and advice on a food before eating it. All replies are in
//! Simplified Chinese.

use crate::error::ApiError;
use crate::llm::{ChatMessage, CompletionRequest, JsonSchemaFormat, LlmClient, LlmError};
use crate::repositories::{FoodLogRepository, ProfileRepository};
use crate::services::day_bounds;
use chrono::Utc;
use diet_assistant_shared::{
    AdvisorKind, ChatRequest, ChatResponse, FoodAdviceRequest, FoodAdviceResponse,
    MealPlanRequest, MealPlanResponse, RecognizeFoodRequest, RecognizeFoodResponse,
    RecognizedFood,
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

const NUTRITIONIST_PROMPT: &str = "You are a professional registered dietitian. \
Give practical, evidence-based advice on diet, calories and nutrition for weight management. \
Keep answers concise and friendly. Always reply in Simplified Chinese.";

const TRAINER_PROMPT: &str = "You are a professional fitness coach. \
Give safe, practical advice on exercise, training plans and recovery for weight management. \
Keep answers concise and encouraging. Always reply in Simplified Chinese.";

const MEAL_PLAN_PROMPT: &str = "You are a professional dietitian who writes one-day meal plans. \
Split the day into breakfast, lunch, dinner and one snack, list foods with approximate grams and \
calories, and make the total match the requested calories. Reply in Simplified Chinese.";

const RECOGNITION_PROMPT: &str = "You are a food recognition assistant. Identify every visible food \
in the image, estimate each food's weight in grams and give a confidence between 0 and 1. \
Use Chinese food names. Respond with JSON only.";

const FOOD_ADVICE_PROMPT: &str = "You are a professional dietitian. The user is about to eat a food. \
Based on their daily target and what they have eaten today, say whether they should eat it, its \
nutritional pros and cons, a healthier alternative if it is not a good fit, and the best time to \
eat it. Be brief and friendly, at most 150 Chinese characters, in Simplified Chinese.";

const RECOGNITION_USER_PROMPT: &str = "请识别这张图片中的食物";

/// Returned when food advice cannot be generated
pub const ADVICE_FALLBACK: &str = "分析失败，请稍后重试";

/// Returned when the model answers with nothing usable
pub const ADVICE_EMPTY: &str = "暂无建议";

#[derive(Debug, Deserialize)]
struct RecognitionPayload {
    foods: Vec<RecognitionItem>,
}

#[derive(Debug, Deserialize)]
struct RecognitionItem {
    name: String,
    confidence: f64,
    #[serde(alias = "estimatedGrams")]
    estimated_grams: f64,
}

/// AI advisor service
pub struct AdvisorService;

impl AdvisorService {
    /// Answer a question as a nutritionist or trainer
    pub async fn chat(llm: &dyn LlmClient, req: ChatRequest) -> Result<ChatResponse, ApiError> {
        req.validate()?;

        let system = match req.advisor {
            AdvisorKind::Nutritionist => NUTRITIONIST_PROMPT,
            AdvisorKind::Trainer => TRAINER_PROMPT,
        };
        let request = CompletionRequest::new(vec![
            ChatMessage::system(system),
            ChatMessage::user(req.message.trim()),
        ]);

        let reply = llm.complete(&request).await.map_err(map_llm_error)?;

        info!(advisor = %req.advisor, chars = reply.chars().count(), "Advisor replied");

        Ok(ChatResponse {
            advisor: req.advisor,
            reply,
        })
    }

    /// Recommend a one-day meal plan for a calorie target
    pub async fn recommend_meal_plan(
        llm: &dyn LlmClient,
        req: MealPlanRequest,
    ) -> Result<MealPlanResponse, ApiError> {
        req.validate()?;

        let mut prompt = format!("我的每日目标热量是{}千卡，请为我推荐一天的饮食计划。", req.target_calories);
        if let Some(preferences) = req.preferences.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            prompt.push_str(&format!("\n饮食偏好：{}", preferences));
        }

        let request = CompletionRequest::new(vec![
            ChatMessage::system(MEAL_PLAN_PROMPT),
            ChatMessage::user(prompt),
        ]);

        let plan = llm.complete(&request).await.map_err(map_llm_error)?;

        Ok(MealPlanResponse {
            target_calories: req.target_calories,
            plan,
        })
    }

    /// Recognize foods in a photo
    ///
    /// Model and parsing failures are reported in the response body with
    /// `success = false`.
    pub async fn recognize_food(
        llm: &dyn LlmClient,
        req: RecognizeFoodRequest,
    ) -> Result<RecognizeFoodResponse, ApiError> {
        req.validate()?;

        let request = CompletionRequest::new(vec![
            ChatMessage::system(RECOGNITION_PROMPT),
            ChatMessage::user_with_image(RECOGNITION_USER_PROMPT, req.image_url.clone()),
        ])
        .with_json_schema(recognition_schema());

        let result = llm
            .complete(&request)
            .await
            .and_then(|content| Self::parse_recognition(&content));

        Ok(match result {
            Ok(foods) => {
                info!(count = foods.len(), "Foods recognized");
                RecognizeFoodResponse {
                    success: true,
                    foods,
                    error: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "Food recognition failed");
                RecognizeFoodResponse {
                    success: false,
                    foods: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        })
    }

    /// Advice on a food given today's intake and the caller's target
    pub async fn food_advice(
        db: &PgPool,
        llm: &dyn LlmClient,
        user_id: Uuid,
        req: FoodAdviceRequest,
    ) -> Result<FoodAdviceResponse, ApiError> {
        req.validate()?;

        let profile = ProfileRepository::find_by_user(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

        let (start, end) = day_bounds(Utc::now().date_naive());
        let totals = FoodLogRepository::daily_totals(db, user_id, start, end)
            .await
            .map_err(ApiError::Internal)?;
        let consumed_today = i32::try_from(totals.calories).unwrap_or(i32::MAX);
        let daily_target = profile.daily_calorie_target;

        let advice =
            Self::advise(llm, &req.food_name, req.calories, daily_target, consumed_today).await;

        Ok(FoodAdviceResponse {
            advice,
            daily_target,
            consumed_today,
        })
    }

    /// Ask for advice; never fails, falls back to a fixed message
    pub async fn advise(
        llm: &dyn LlmClient,
        food_name: &str,
        calories: i32,
        daily_target: i32,
        consumed_today: i32,
    ) -> String {
        let prompt = format!(
            "食物：{}\n热量：{}千卡\n我的每日目标：{}千卡\n今日已摄入：{}千卡\n剩余额度：{}千卡\n\n请给我建议。",
            food_name,
            calories,
            daily_target,
            consumed_today,
            daily_target - consumed_today
        );
        let request = CompletionRequest::new(vec![
            ChatMessage::system(FOOD_ADVICE_PROMPT),
            ChatMessage::user(prompt),
        ])
        .with_max_tokens(400);

        match llm.complete(&request).await {
            Ok(advice) => advice,
            Err(LlmError::EmptyResponse) => ADVICE_EMPTY.to_string(),
            Err(e) => {
                warn!(error = %e, food = food_name, "Food advice failed");
                ADVICE_FALLBACK.to_string()
            }
        }
    }

    /// Parse the model's JSON answer into recognized foods
    fn parse_recognition(content: &str) -> Result<Vec<RecognizedFood>, LlmError> {
        let payload: RecognitionPayload = serde_json::from_str(strip_code_fence(content))
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        Ok(payload
            .foods
            .into_iter()
            .filter(|f| !f.name.trim().is_empty())
            .map(|f| RecognizedFood {
                name: f.name.trim().to_string(),
                confidence: f.confidence.clamp(0.0, 1.0),
                estimated_grams: f.estimated_grams.max(0.0),
            })
            .collect())
    }
}

fn map_llm_error(error: LlmError) -> ApiError {
    match error {
        LlmError::Disabled => ApiError::ServiceUnavailable("AI advisor is disabled".to_string()),
        other => ApiError::Upstream(other.to_string()),
    }
}

/// Some models wrap JSON in a markdown fence even when asked not to
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn recognition_schema() -> JsonSchemaFormat {
    JsonSchemaFormat {
        name: "food_recognition".to_string(),
        schema: serde_json::json!({
            "type": "object",
            "properties": {
                "foods": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string", "description": "Chinese food name"},
                            "confidence": {"type": "number", "description": "0-1"},
                            "estimated_grams": {"type": "number", "description": "Estimated weight in grams"}
                        },
                        "required": ["name", "confidence", "estimated_grams"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["foods"],
            "additionalProperties": false
        }),
    }
}
