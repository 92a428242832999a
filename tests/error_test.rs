//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use object_ai_rust::decoder;
use object_ai_rust::error::ObjectAiError;

/// 不正なBase64のデコード
#[test]
fn test_decode_invalid_base64() {
    let result = decoder::decode_base64_image("not valid base64 at all!!!");
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, ObjectAiError::ImageDecode(_)));
}

/// Base64としては正しいが画像でないデータ
#[test]
fn test_decode_non_image_payload() {
    let result = decoder::decode_base64_image("aGVsbG8gd29ybGQ=");
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, ObjectAiError::ImageFormat(_)));
}

/// ObjectAiErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ObjectAiError::Config("テスト設定エラー".to_string()),
        ObjectAiError::MissingFields,
        ObjectAiError::ImageDecode("bad padding".to_string()),
        ObjectAiError::ImageFormat("unsupported format".to_string()),
        ObjectAiError::ApiCall("API error: 403".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// バリデーションエラーが必須フィールド名を含むこと
#[test]
fn test_missing_fields_message() {
    let err = ObjectAiError::MissingFields;
    let display = format!("{}", err);

    assert!(display.contains("image"));
    assert!(display.contains("object_name"));
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let err = ObjectAiError::MissingApiKey;
    let display = format!("{}", err);

    assert!(display.contains("APIキー"));
    assert!(display.contains("object-ai config"));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = ObjectAiError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ObjectAiError = io_err.into();

    assert!(matches!(err, ObjectAiError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: ObjectAiError = json_err.into();

    assert!(matches!(err, ObjectAiError::JsonParse(_)));
}

/// common::Errorからの変換
#[test]
fn test_common_error_conversion() {
    let common_err = object_ai_common::Error::Parse("パースエラー".to_string());
    let err: ObjectAiError = common_err.into();

    assert!(matches!(err, ObjectAiError::Common(_)));
}

/// エラーチェーン（透過的エラー）
#[test]
fn test_error_chain_transparent() {
    let common_err = object_ai_common::Error::Parse("JSONが見つかりません".to_string());
    let err: ObjectAiError = common_err.into();

    // 透過的エラーなのでメッセージがそのまま表示される
    let display = format!("{}", err);
    assert!(display.contains("JSONが見つかりません"));
}
