//! Gemini API連携
//!
//! プロンプトと画像をgenerateContentエンドポイントへ送信し、
//! モデルの生テキストレスポンスを返す

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::decoder::DecodedImage;
use crate::error::{ObjectAiError, Result};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// Gemini APIクライアント
///
/// APIキーとモデル名は構築時に注入する。グローバル状態は持たない
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// クライアントを構築
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key
    /// * `model` - モデル名（例: "gemini-2.5-flash"）
    /// * `timeout` - リクエストタイムアウト
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ObjectAiError::ApiCall(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 画像解析を実行
    ///
    /// プロンプトと画像（inline_data）を1リクエストで送信する。
    /// リトライは行わない
    ///
    /// # Arguments
    /// * `prompt` - 解析指示プロンプト
    /// * `image` - デコード済み画像
    ///
    /// # Returns
    /// 最初の候補の先頭パートのテキスト
    pub async fn generate(&self, prompt: &str, image: &DecodedImage) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: STANDARD.encode(&image.bytes),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                response_mime_type: "application/json".to_string(),
            },
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ObjectAiError::ApiCall(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ObjectAiError::ApiCall(format!(
                "API error: {}: {}",
                status, body
            )));
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ObjectAiError::ApiCall(e.to_string()))?;

        payload
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| ObjectAiError::ApiCall("Empty response".to_string()))
    }
}
