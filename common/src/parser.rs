//! モデルレスポンスの正規化
//!
//! Geminiの自由形式テキストからJSONオブジェクトを抽出し、
//! 固定スキーマのAnalysisResultへ正規化する。
//! 抽出・パースに失敗した場合はキーワードヒューリスティックへ
//! フォールバックするため、この処理は失敗しない

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::{AnalysisResult, Confidence};

/// descriptionフィールド欠落時のプレースホルダ
pub const NO_DESCRIPTION: &str = "No description available";

/// フォールバック時のdescription最大文字数
const FALLBACK_DESCRIPTION_LIMIT: usize = 500;

/// 肯定キーワード（部分一致、いずれか1つで暫定found=true）
const FOUND_KEYWORDS: &[&str] = &["yes", "found", "present", "visible", "see", "true"];

/// 否定キーワード（いずれか1つでfound=false。肯定キーワードを常に上書き）
const NOT_FOUND_KEYWORDS: &[&str] = &["no", "not found", "absent", "cannot", "false"];

/// レスポンステキストから最初の平衡`{...}`スパンを抽出
///
/// 最初の`{`から対応する`}`までを深さカウントで走査する。
/// JSON文字列リテラル内の括弧とエスケープシーケンスは無視する。
///
/// # Arguments
/// * `text` - モデルの生レスポンス
///
/// # Returns
/// 抽出されたJSONオブジェクト文字列。`{`が無い、または対応する
/// `}`が見つからない場合はNone
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// レスポンスを厳密にパース
///
/// JSONスパンを抽出してパースし、固定スキーマへ強制変換する
///
/// # Arguments
/// * `response` - モデルの生レスポンス
///
/// # Returns
/// * `Ok(AnalysisResult)` - パース成功
/// * `Err` - JSONスパンが無い、またはパース失敗
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult> {
    let json_str =
        extract_json_object(response).ok_or_else(|| Error::Parse("JSONが見つかりません".into()))?;
    let value: Value = serde_json::from_str(json_str)?;
    let map = value
        .as_object()
        .ok_or_else(|| Error::Parse("JSONオブジェクトではありません".into()))?;
    Ok(coerce_result(map))
}

/// モデルレスポンスをAnalysisResultへ正規化
///
/// 厳密パースを試み、失敗時はキーワードヒューリスティックで
/// フォールバック結果を合成する。必ず5フィールドすべてが埋まった
/// 結果を返す
pub fn normalize_response(response: &str) -> AnalysisResult {
    match parse_analysis_response(response) {
        Ok(result) => result,
        Err(_) => fallback_result(response),
    }
}

/// フォールバック結果を合成
///
/// テキスト全体を小文字化して肯定キーワードを走査し、次に
/// 否定キーワードを走査する。否定が1つでもあればfound=false
///
/// # Arguments
/// * `text` - モデルの生レスポンス
///
/// # Returns
/// confidence=medium、descriptionは先頭500文字のフォールバック結果
pub fn fallback_result(text: &str) -> AnalysisResult {
    let lower = text.to_lowercase();

    let mut found = FOUND_KEYWORDS.iter().any(|k| lower.contains(k));
    if NOT_FOUND_KEYWORDS.iter().any(|k| lower.contains(k)) {
        found = false;
    }

    let description: String = text.chars().take(FALLBACK_DESCRIPTION_LIMIT).collect();
    let location = if found { "See description" } else { "Not applicable" };

    AnalysisResult {
        found,
        confidence: Confidence::Medium,
        description,
        location: location.to_string(),
        additional_objects: Vec::new(),
    }
}

/// パース済みJSONオブジェクトを固定スキーマへ強制変換
///
/// 欠落・型不一致のフィールドはすべてデフォルト値で埋める:
/// - found: 真偽値化（欠落・偽値はfalse）
/// - confidence: 3値以外はmedium
/// - description: 欠落時はプレースホルダ
/// - location: 欠落時は"Unknown"
/// - additional_objects: 文字列配列でなければ空
pub fn coerce_result(map: &Map<String, Value>) -> AnalysisResult {
    let additional_objects = map
        .get("additional_objects")
        .and_then(Value::as_array)
        .and_then(|items| {
            items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .unwrap_or_default();

    AnalysisResult {
        found: map.get("found").map(value_truthy).unwrap_or(false),
        confidence: map
            .get("confidence")
            .and_then(Value::as_str)
            .and_then(Confidence::parse)
            .unwrap_or_default(),
        description: get_string(map, "description").unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        location: get_string(map, "location").unwrap_or_else(|| "Unknown".to_string()),
        additional_objects,
    }
}

/// JSON値の真偽値化
///
/// 偽とみなす値: null / false / 0 / 空文字列 / 空配列 / 空オブジェクト
fn value_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn get_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    let value = map.get(key)?;
    if let Some(s) = value.as_str() {
        return Some(s.to_string());
    }
    if value.is_null() {
        return None;
    }
    Some(value.to_string())
}
