//! プロンプト生成モジュール
//!
//! サーバとCLIで共有されるプロンプト生成ロジック:
//! - build_analyze_prompt: オブジェクト探索用プロンプト

/// 解析プロンプト生成（オブジェクト探索用）
///
/// 指定オブジェクトの有無を判定させ、AnalysisResultと同形の
/// JSONオブジェクトのみで応答するようモデルへ指示する。
/// 空のオブジェクト名もそのまま埋め込む（拒否しない）
///
/// # Arguments
/// * `object_name` - 探索対象のオブジェクト名
///
/// # Returns
/// 解析用のプロンプト文字列
pub fn build_analyze_prompt(object_name: &str) -> String {
    format!(
        r#"Analyze this image carefully and determine if there is a "{object_name}" present in the image.

Respond ONLY in valid JSON format with the following structure (no additional text before or after):
{{
    "found": true or false,
    "confidence": "high" or "medium" or "low",
    "description": "brief description of what you see related to the object or why it wasn't found",
    "location": "specific location in the image where the object is found, or 'Not applicable' if not found",
    "additional_objects": ["list", "of", "other", "notable", "objects"]
}}

Be precise and accurate in your analysis. Only set "found" to true if you are confident the {object_name} is actually present in the image."#
    )
}
