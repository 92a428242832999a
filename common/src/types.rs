//! 解析結果の型定義
//!
//! サーバとCLIで共有される型:
//! - Confidence: 判定信頼度
//! - AnalysisResult: 正規化済みの最終出力

use serde::{Deserialize, Serialize};

/// 判定信頼度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    #[default]
    Medium,
    Low,
}

impl Confidence {
    /// 文字列から変換
    ///
    /// 小文字の "high" / "medium" / "low" の完全一致のみ受け付ける。
    /// それ以外はNone
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// AI解析結果（正規化済み）
///
/// 5フィールドすべてが必ず埋まった状態でのみ呼び出し元へ返す
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub found: bool,
    pub confidence: Confidence,
    pub description: String,
    pub location: String,
    pub additional_objects: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_result_default() {
        let result = AnalysisResult::default();
        assert_eq!(result.found, false);
        assert_eq!(result.confidence, Confidence::Medium);
        assert_eq!(result.description, "");
        assert!(result.additional_objects.is_empty());
    }

    #[test]
    fn test_analysis_result_serialize() {
        let result = AnalysisResult {
            found: true,
            confidence: Confidence::High,
            description: "赤いリンゴがテーブルの上にある".to_string(),
            location: "center of the image".to_string(),
            additional_objects: vec!["table".to_string(), "knife".to_string()],
        };

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"found\":true"));
        assert!(json.contains("\"confidence\":\"high\""));
        assert!(json.contains("\"additional_objects\":[\"table\",\"knife\"]"));
    }

    #[test]
    fn test_analysis_result_deserialize() {
        let json = r#"{
            "found": true,
            "confidence": "low",
            "description": "a cat",
            "location": "bottom left",
            "additional_objects": ["sofa"]
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert!(result.found);
        assert_eq!(result.confidence, Confidence::Low);
        assert_eq!(result.description, "a cat");
        assert_eq!(result.location, "bottom left");
        assert_eq!(result.additional_objects, vec!["sofa"]);
    }

    #[test]
    fn test_analysis_result_deserialize_missing_fields() {
        // フィールド欠落時はデフォルト値で埋まることを確認
        let json = r#"{"found": true}"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert!(result.found);
        assert_eq!(result.confidence, Confidence::Medium); // デフォルト値
        assert_eq!(result.description, ""); // デフォルト値
        assert!(result.additional_objects.is_empty()); // デフォルト値
    }

    #[test]
    fn test_analysis_result_roundtrip() {
        let original = AnalysisResult {
            found: false,
            confidence: Confidence::Medium,
            description: "no bicycle in this image".to_string(),
            location: "Not applicable".to_string(),
            additional_objects: vec!["road".to_string(), "tree".to_string()],
        };

        let json = serde_json::to_string(&original).expect("シリアライズ失敗");
        let restored: AnalysisResult = serde_json::from_str(&json).expect("デシリアライズ失敗");

        assert_eq!(original.found, restored.found);
        assert_eq!(original.confidence, restored.confidence);
        assert_eq!(original.description, restored.description);
        assert_eq!(original.location, restored.location);
        assert_eq!(original.additional_objects, restored.additional_objects);
    }

    // =============================================
    // Confidence テスト
    // =============================================

    #[test]
    fn test_confidence_default() {
        assert_eq!(Confidence::default(), Confidence::Medium);
    }

    #[test]
    fn test_confidence_parse_valid() {
        assert_eq!(Confidence::parse("high"), Some(Confidence::High));
        assert_eq!(Confidence::parse("medium"), Some(Confidence::Medium));
        assert_eq!(Confidence::parse("low"), Some(Confidence::Low));
    }

    #[test]
    fn test_confidence_parse_invalid() {
        // 大文字や未知の値は受け付けない
        assert_eq!(Confidence::parse("High"), None);
        assert_eq!(Confidence::parse("HIGH"), None);
        assert_eq!(Confidence::parse("very high"), None);
        assert_eq!(Confidence::parse(""), None);
    }

    #[test]
    fn test_confidence_serialize_lowercase() {
        let json = serde_json::to_string(&Confidence::High).expect("シリアライズ失敗");
        assert_eq!(json, r#""high""#);
    }

    #[test]
    fn test_confidence_as_str() {
        assert_eq!(Confidence::High.as_str(), "high");
        assert_eq!(Confidence::Medium.as_str(), "medium");
        assert_eq!(Confidence::Low.as_str(), "low");
    }
}
