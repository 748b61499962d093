//! Generative-AI collaborator
//!
//! [`Intelligence`] is the seam the engine depends on. Text endpoints never
//! fail: they fall back to a fixed message. The occupancy-sheet endpoint
//! returns an error so the caller can leave room state untouched.

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use shared::models::{AiAnalysis, Member, SheetRow};

/// Fallback summary when note analysis is impossible
pub const ANALYSIS_FAILED_SUMMARY: &str = "無法連接至 AI 服務，請確認網路連線。";

#[async_trait]
pub trait Intelligence: Send + Sync {
    /// Extract dietary restrictions, requests and tags from staff notes
    async fn analyze_member_notes(&self, notes: &str) -> AiAnalysis;

    async fn generate_welcome_message(&self, member: &Member) -> String;

    /// Three short observations about today's numbers
    async fn generate_daily_briefing(&self, stats: Option<&Value>) -> String;

    /// Parse a photographed occupancy sheet (base64 JPEG) into rows
    async fn analyze_occupancy_image(&self, image_base64: &str) -> ClientResult<Vec<SheetRow>>;

    async fn generate_kitchen_advice(&self, date: &str, meal_stats: &Value) -> String;
}

/// REST client for the `generateContent` API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    text_model: String,
    vision_model: String,
}

impl GeminiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.gemini_base_url.clone(),
            api_key: config.gemini_api_key.clone(),
            text_model: config.text_model.clone(),
            vision_model: config.vision_model.clone(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// POST a request body and return the first candidate's text
    async fn generate(&self, model: &str, body: Value) -> ClientResult<String> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ClientError::NotConfigured("gemini_api_key".to_string()))?;

        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await?;
        extract_text(&payload)
    }

    async fn generate_text(&self, system: &str, prompt: String) -> ClientResult<String> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": system }] },
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        self.generate(&self.text_model, body).await
    }
}

/// `candidates[0].content.parts[0].text`
fn extract_text(payload: &Value) -> ClientResult<String> {
    payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ClientError::InvalidResponse("empty candidate".to_string()))
}

fn analysis_schema() -> Value {
    let list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "dietaryRestrictions": list,
            "specialRequests": list,
            "tags": list,
            "summary": { "type": "STRING" },
            "suggestedActions": list,
        },
        "required": ["dietaryRestrictions", "specialRequests", "tags", "summary", "suggestedActions"],
    })
}

fn sheet_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "roomCode": { "type": "STRING", "description": "房號" },
                "guestName": { "type": "STRING", "description": "房客姓名" },
                "checkInDate": { "type": "STRING", "description": "入住日期 (YYYY-MM-DD)" },
                "adults": { "type": "INTEGER", "description": "大人人數" },
                "children": { "type": "INTEGER", "description": "小孩人數" },
                "stayDurationInfo": { "type": "STRING", "description": "天數資訊，如 '2泊', '續住'。若無則留空。" },
            },
            "required": ["roomCode", "guestName", "checkInDate", "adults", "children"],
        },
    })
}

const SHEET_PROMPT: &str = "你是一位專業的資料錄入員。請分析這張訂房報表：\n\
1. 精準辨識房號：如 201, 尊1 等。\n\
2. 入住天數：若看到 '2泊', '3天2夜', '續住'，請填入 stayDurationInfo。\n\
3. 忽略飲食禁忌：不要提取任何關於食物的要求。\n\
4. 嚴格遵守 JSON Array 格式。";

#[async_trait]
impl Intelligence for GeminiClient {
    async fn analyze_member_notes(&self, notes: &str) -> AiAnalysis {
        if notes.trim().is_empty() {
            return AiAnalysis {
                summary: "無足夠資料進行分析。".to_string(),
                ..Default::default()
            };
        }

        let body = json!({
            "systemInstruction": { "parts": [{ "text": "你是一位頂級管家，負責整理客戶資料。請使用繁體中文。" }] },
            "contents": [{ "parts": [{ "text": format!("分析以下豪華露營客戶筆記： \"{notes}\"") }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": analysis_schema(),
            },
        });

        let parsed = match self.generate(&self.text_model, body).await {
            Ok(text) => serde_json::from_str::<AiAnalysis>(&text).map_err(ClientError::from),
            Err(e) => Err(e),
        };

        parsed.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Member note analysis failed");
            AiAnalysis {
                tags: vec!["分析失敗".to_string()],
                summary: ANALYSIS_FAILED_SUMMARY.to_string(),
                ..Default::default()
            }
        })
    }

    async fn generate_welcome_message(&self, member: &Member) -> String {
        let prompt = format!("為會員 {} 寫一段溫暖的迎賓詞。", member.name);
        self.generate_text("你是愛上喜翁的總管。語氣要優雅且富有詩意。請使用繁體中文。", prompt)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Welcome message generation failed");
                format!("親愛的 {} 您好，歡迎回到愛上喜翁。", member.name)
            })
    }

    async fn generate_daily_briefing(&self, stats: Option<&Value>) -> String {
        let Some(stats) = stats else {
            return "數據不足。".to_string();
        };
        let prompt = format!("根據數據生成營運簡報： {stats}");
        self.generate_text("你是營運總監，提供 3 個精簡的觀察重點。請使用繁體中文。", prompt)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Daily briefing generation failed");
                "今日營運數據正常，請注意山區天氣。".to_string()
            })
    }

    async fn analyze_occupancy_image(&self, image_base64: &str) -> ClientResult<Vec<SheetRow>> {
        let body = json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": "image/jpeg", "data": image_base64 } },
                    { "text": SHEET_PROMPT },
                ],
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": sheet_schema(),
            },
        });

        let text = self.generate(&self.vision_model, body).await.map_err(|e| {
            tracing::error!(error = %e, "Occupancy sheet analysis failed");
            e
        })?;
        let rows: Vec<SheetRow> = serde_json::from_str(&text)?;
        tracing::info!(rows = rows.len(), "Occupancy sheet analyzed");
        Ok(rows)
    }

    async fn generate_kitchen_advice(&self, date: &str, meal_stats: &Value) -> String {
        let prompt = format!("今日日期: {date}, 統計: {meal_stats}");
        self.generate_text("你是行政主廚，提供專業的備料建議。請使用繁體中文。", prompt)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Kitchen advice generation failed");
                "連線問題，請直接參考統計數據。".to_string()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_client() -> GeminiClient {
        let config = ClientConfig::default()
            .with_gemini_key("test-key")
            .with_gemini_base_url("http://127.0.0.1:9")
            .with_timeout(2);
        GeminiClient::new(&config).unwrap()
    }

    fn member(name: &str) -> Member {
        Member {
            id: 1,
            name: name.to_string(),
            location: String::new(),
            phone: String::new(),
            email: String::new(),
            birthday: None,
            tier: Default::default(),
            join_date: "2025-01-01".to_string(),
            total_visits: 0,
            total_spend: 0.0,
            tags: vec![],
            dietary_restrictions: vec![],
            special_requests: vec![],
            preferences: String::new(),
            history: vec![],
            notes: String::new(),
        }
    }

    #[test]
    fn test_extract_text() {
        let payload = json!({
            "candidates": [{ "content": { "parts": [{ "text": "[]" }] } }]
        });
        assert_eq!(extract_text(&payload).unwrap(), "[]");

        let empty = json!({ "candidates": [] });
        assert!(matches!(extract_text(&empty), Err(ClientError::InvalidResponse(_))));
    }

    #[test]
    fn test_sheet_rows_deserialize_from_camel_case() {
        let text = r#"[{"roomCode":"尊1","guestName":"王小明","checkInDate":"2025-03-01","adults":4,"children":1,"stayDurationInfo":"2泊"}]"#;
        let rows: Vec<SheetRow> = serde_json::from_str(text).unwrap();
        assert_eq!(rows[0].room_code, "尊1");
        assert_eq!(rows[0].children, 1);
        assert_eq!(rows[0].stay_duration_info.as_deref(), Some("2泊"));
    }

    #[tokio::test]
    async fn test_empty_notes_skip_the_network() {
        let analysis = offline_client().analyze_member_notes("   ").await;
        assert_eq!(analysis.summary, "無足夠資料進行分析。");
        assert!(analysis.tags.is_empty());
    }

    #[tokio::test]
    async fn test_text_endpoints_fall_back_when_offline() {
        let client = offline_client();

        let analysis = client.analyze_member_notes("不吃牛，喜歡紅酒").await;
        assert_eq!(analysis.tags, vec!["分析失敗".to_string()]);
        assert_eq!(analysis.summary, ANALYSIS_FAILED_SUMMARY);

        let welcome = client.generate_welcome_message(&member("林小姐")).await;
        assert_eq!(welcome, "親愛的 林小姐 您好，歡迎回到愛上喜翁。");

        assert_eq!(client.generate_daily_briefing(None).await, "數據不足。");
    }

    #[tokio::test]
    async fn test_sheet_analysis_surfaces_errors() {
        let client = offline_client();
        assert!(client.analyze_occupancy_image("aGVsbG8=").await.is_err());

        let unconfigured = GeminiClient::new(&ClientConfig::default()).unwrap();
        let err = unconfigured.analyze_occupancy_image("aGVsbG8=").await.unwrap_err();
        assert!(matches!(err, ClientError::NotConfigured(_)));
    }
}
