use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::api_types::{ApiErrorBody, GenerateRequest, GenerateResponse};
use crate::config::AiConfig;

pub const SUGGESTION_APOLOGY: &str =
    "Xin lỗi, hiện tại Nana không thể kết nối với trí tuệ nhân tạo.";
pub const CHAT_APOLOGY: &str = "Xin lỗi, mình đang gặp chút trục trặc khi suy nghĩ câu trả lời.";

/// What the suggestion prompt knows about the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileContext {
    pub nickname: String,
    pub goal: String,
    pub daily_calorie_target: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_calories: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub advice: String,
}

impl Recommendation {
    /// The zero-result answer returned when the generative service fails.
    pub fn apology() -> Self {
        Self {
            dishes: Vec::new(),
            advice: SUGGESTION_APOLOGY.to_string(),
        }
    }
}

#[async_trait]
pub trait Assistant: Send + Sync {
    async fn suggest(
        &self,
        ctx: &ProfileContext,
        ingredients: &[String],
    ) -> anyhow::Result<Recommendation>;
    async fn chat(&self, message: &str) -> anyhow::Result<String>;
}

/// Either the model's answer or the fixed fallback, flagged.
#[derive(Debug, Clone, PartialEq)]
pub struct Degradable<T> {
    pub value: T,
    pub degraded: bool,
}

pub async fn suggest_or_apologize(
    assistant: &dyn Assistant,
    ctx: &ProfileContext,
    ingredients: &[String],
) -> Degradable<Recommendation> {
    match assistant.suggest(ctx, ingredients).await {
        Ok(value) => Degradable {
            value,
            degraded: false,
        },
        Err(e) => {
            warn!(error = %e, "suggestion failed, answering with apology");
            Degradable {
                value: Recommendation::apology(),
                degraded: true,
            }
        }
    }
}

pub async fn chat_or_apologize(assistant: &dyn Assistant, message: &str) -> Degradable<String> {
    match assistant.chat(message).await {
        Ok(value) => Degradable {
            value,
            degraded: false,
        },
        Err(e) => {
            warn!(error = %e, "chat failed, answering with apology");
            Degradable {
                value: CHAT_APOLOGY.to_string(),
                degraded: true,
            }
        }
    }
}

pub fn suggestion_prompt(ctx: &ProfileContext, ingredients: &[String]) -> String {
    let target = ctx
        .daily_calorie_target
        .map(|kcal| format!(" (khoảng {kcal:.0} kcal mỗi ngày)"))
        .unwrap_or_default();
    format!(
        "Với các nguyên liệu: \"{}\". Hãy gợi ý các món ăn làm từ các nguyên liệu trên cho {} \
         có mục tiêu \"{}\"{}. Trả lời bằng JSON đúng dạng \
         {{\"dishes\": [{{\"name\": string, \"description\": string, \"estimated_calories\": number}}], \
         \"advice\": string}}, ngắn gọn.",
        ingredients.join(", "),
        ctx.nickname,
        ctx.goal,
        target
    )
}

pub fn chat_prompt(message: &str) -> String {
    format!("Người dùng hỏi: \"{message}\". Hãy trả lời ngắn gọn, thân thiện và hữu ích.")
}

/// Gemini `generateContent` over REST.
pub struct GeminiClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, cfg: &AiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build gemini http client")?;
        Ok(Self {
            client,
            api_url: cfg.gemini_api_url.trim_end_matches('/').to_string(),
            api_key,
            model: cfg.gemini_model.clone(),
        })
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<String> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.api_url, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .context("gemini unreachable")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or(text);
            return Err(anyhow!("gemini error ({}): {}", status.as_u16(), detail));
        }

        let parsed: GenerateResponse = response.json().await.context("malformed gemini response")?;
        parsed.text().ok_or_else(|| anyhow!("gemini returned no text"))
    }
}

#[async_trait]
impl Assistant for GeminiClient {
    async fn suggest(
        &self,
        ctx: &ProfileContext,
        ingredients: &[String],
    ) -> anyhow::Result<Recommendation> {
        let request = GenerateRequest::prompt(suggestion_prompt(ctx, ingredients)).expecting_json();
        let text = self.generate(&request).await?;
        debug!(chars = text.len(), "suggestion received");
        parse_recommendation(&text)
    }

    async fn chat(&self, message: &str) -> anyhow::Result<String> {
        self.generate(&GenerateRequest::prompt(chat_prompt(message))).await
    }
}

/// Accepts bare JSON or JSON wrapped in a fenced code block.
pub fn parse_recommendation(text: &str) -> anyhow::Result<Recommendation> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    serde_json::from_str(body.trim()).context("recommendation is not valid JSON")
}

/// Used when no API key is configured; every call degrades.
pub struct DisabledAssistant;

#[async_trait]
impl Assistant for DisabledAssistant {
    async fn suggest(&self, _: &ProfileContext, _: &[String]) -> anyhow::Result<Recommendation> {
        Err(anyhow!("generative service not configured"))
    }

    async fn chat(&self, _: &str) -> anyhow::Result<String> {
        Err(anyhow!("generative service not configured"))
    }
}
