//! HTTP APIサーバ
//!
//! エンドポイント:
//! - GET  /            サーバ情報
//! - GET  /api/health  ヘルスチェック
//! - POST /api/analyze 画像解析
//!
//! リクエストごとの処理は 検証 → デコード → プロンプト生成 →
//! API呼び出し → 正規化 の直列パイプライン。エラーはすべて
//! ハンドラ境界でHTTPステータスへ変換する

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use object_ai_common::{build_analyze_prompt, normalize_response, AnalysisResult};

use crate::config::Config;
use crate::decoder;
use crate::error::{ObjectAiError, Result};
use crate::gemini::GeminiClient;

/// 共有状態
///
/// リクエスト間で共有する読み取り専用の状態。可変状態は持たない
pub struct AppState {
    client: Option<GeminiClient>,
    model: String,
    api_configured: bool,
}

impl AppState {
    /// 設定から状態を構築
    ///
    /// APIキーが未設定でもサーバは起動する（healthで確認可能、
    /// analyzeは500を返す）
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = match config.get_api_key() {
            Ok(key) => Some(GeminiClient::new(key, config.model.clone(), timeout)?),
            Err(_) => None,
        };

        Ok(Self {
            api_configured: client.is_some(),
            model: config.model.clone(),
            client,
        })
    }
}

/// 解析リクエスト
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub object_name: Option<String>,
}

/// 解析成功レスポンス
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub result: AnalysisResult,
}

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// ルータを構築
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/health", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// サーバを起動
pub async fn serve(config: &Config, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| ObjectAiError::Config(format!("バインドアドレスが不正です: {}", e)))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "online",
        "message": "Object Recognition API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "api_configured": state.api_configured,
        "model": state.model,
    }))
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    match run_analysis(&state, request).await {
        Ok(result) => Json(AnalyzeResponse {
            success: true,
            result,
        })
        .into_response(),
        Err(err) => {
            tracing::error!("analyze error: {}", err);
            error_response(&err)
        }
    }
}

/// 解析パイプライン本体
async fn run_analysis(state: &AppState, request: AnalyzeRequest) -> Result<AnalysisResult> {
    let (image, object_name) = match (request.image, request.object_name) {
        (Some(image), Some(object_name)) if !image.is_empty() && !object_name.is_empty() => {
            (image, object_name)
        }
        _ => return Err(ObjectAiError::MissingFields),
    };

    let decoded = decoder::decode_base64_image(&image)?;

    let client = state.client.as_ref().ok_or(ObjectAiError::MissingApiKey)?;

    let prompt = build_analyze_prompt(&object_name);
    let response_text = client.generate(&prompt, &decoded).await?;

    Ok(normalize_response(&response_text))
}

/// エラーをHTTPレスポンスへ変換
///
/// リクエスト不備（フィールド欠落・画像不正）は400、それ以外は
/// すべて500に落とす
fn error_response(err: &ObjectAiError) -> Response {
    let (status, message) = match err {
        ObjectAiError::MissingFields
        | ObjectAiError::ImageDecode(_)
        | ObjectAiError::ImageFormat(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Server error: {}", err),
        ),
    };

    (
        status,
        Json(ErrorResponse {
            success: false,
            error: message,
        }),
    )
        .into_response()
}
