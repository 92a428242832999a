use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObjectAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`object-ai config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("Missing required fields: image and object_name")]
    MissingFields,

    #[error("Invalid base64 image data: {0}")]
    ImageDecode(String),

    #[error("Invalid image format: {0}")]
    ImageFormat(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error(transparent)]
    Common(#[from] object_ai_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ObjectAiError>;
