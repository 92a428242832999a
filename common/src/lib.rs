//! Object AI Common Library
//!
//! サーバとCLIで共有される型とユーティリティ

pub mod error;
pub mod parser;
pub mod prompts;
pub mod types;

pub use error::{Error, Result};
pub use parser::{extract_json_object, normalize_response, parse_analysis_response};
pub use prompts::build_analyze_prompt;
pub use types::{AnalysisResult, Confidence};
