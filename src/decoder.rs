//! 画像デコードモジュール
//!
//! Base64文字列（Data URLプレフィックス対応）を検証済みの
//! 画像バイト列へデコードする

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{ObjectAiError, Result};

/// デコード済み画像
///
/// bytesは画像として読み込めることを検証済み
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl DecodedImage {
    /// バイト列から生成
    ///
    /// MIMEタイプはバイト列から推定する
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_bytes_with_mime(bytes, None)
    }

    fn from_bytes_with_mime(bytes: Vec<u8>, mime_type: Option<String>) -> Result<Self> {
        image::load_from_memory(&bytes)
            .map_err(|e| ObjectAiError::ImageFormat(e.to_string()))?;

        let mime_type = mime_type.unwrap_or_else(|| {
            image::guess_format(&bytes)
                .map(|f| f.to_mime_type().to_string())
                .unwrap_or_else(|_| "image/jpeg".to_string())
        });

        Ok(Self { bytes, mime_type })
    }
}

/// Data URLプレフィックスを除去
///
/// 最初のカンマまで（カンマを含む）を取り除く。カンマが無い場合は
/// 入力全体をBase64ペイロードとみなす
///
/// # Arguments
/// * `input` - "data:image/png;base64,iVBOR..." 形式、または素のBase64
///
/// # Returns
/// Base64ペイロード部分
pub fn strip_data_url_prefix(input: &str) -> &str {
    match input.split_once(',') {
        Some((_, payload)) => payload,
        None => input,
    }
}

/// Data URLからMIMEタイプを抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,..." 形式のData URL
///
/// # Returns
/// MIMEタイプ（例: "image/jpeg"）、Data URL形式でない場合はNone
pub fn extract_mime_type_from_data_url(data_url: &str) -> Option<&str> {
    if !data_url.contains(',') {
        return None;
    }
    data_url.split(':').nth(1).and_then(|s| s.split(';').next())
}

/// Base64画像文字列をデコードして検証
///
/// Data URLプレフィックスを除去し、Base64デコード後のバイト列が
/// 画像として読み込めることを確認する
///
/// # Arguments
/// * `input` - Base64文字列（`data:<mime>;base64,`プレフィックス可）
///
/// # Returns
/// * `Ok(DecodedImage)` - デコード成功
/// * `Err(ImageDecode)` - Base64として不正
/// * `Err(ImageFormat)` - 画像として読み込めない
pub fn decode_base64_image(input: &str) -> Result<DecodedImage> {
    let payload = strip_data_url_prefix(input);

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| ObjectAiError::ImageDecode(e.to_string()))?;

    let mime_type = extract_mime_type_from_data_url(input).map(str::to_string);

    DecodedImage::from_bytes_with_mime(bytes, mime_type)
}
