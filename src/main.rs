use clap::Parser;
use object_ai_rust::{cli, config, decoder, error, gemini, server};

use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Serve { host, port } => {
            tracing_subscriber::fmt::init();

            let host = host.unwrap_or_else(|| config.host.clone());
            let port = port.unwrap_or(config.port);

            if config.get_api_key().is_err() {
                println!("⚠️  APIキーが未設定です。`object-ai config --set-api-key YOUR_KEY` で設定するか、GEMINI_API_KEY を指定してください\n");
            }

            println!("🚀 object-ai-rust - APIサーバ起動\n");
            println!("📍 http://{}:{}", host, port);
            println!("🔗 POST http://{}:{}/api/analyze\n", host, port);

            server::serve(&config, &host, port).await?;
        }

        Commands::Analyze {
            image,
            object_name,
            output,
        } => {
            println!("🔍 object-ai-rust - 画像解析\n");

            // 1. 画像読み込み
            println!("[1/3] 画像を読み込み中...");
            let bytes = std::fs::read(&image)?;
            let decoded = decoder::DecodedImage::from_bytes(bytes)?;
            println!(
                "✔ {} ({} bytes, {})\n",
                image.display(),
                decoded.bytes.len(),
                decoded.mime_type
            );

            // 2. AI解析
            println!("[2/3] AI解析中...");
            let api_key = config.get_api_key()?;
            let client = gemini::GeminiClient::new(
                api_key,
                config.model.clone(),
                Duration::from_secs(config.timeout_seconds),
            )?;
            let prompt = object_ai_common::build_analyze_prompt(&object_name);
            let response_text = client.generate(&prompt, &decoded).await?;

            if cli.verbose {
                let preview: String = response_text.chars().take(500).collect();
                println!("  レスポンス: {}", preview);
            }
            println!("✔ 解析完了\n");

            // 3. 正規化と出力
            println!("[3/3] 結果を正規化中...");
            let result = object_ai_common::normalize_response(&response_text);
            let json = serde_json::to_string_pretty(&result)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &json)?;
                    println!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", json),
            }

            println!("\n✅ 解析完了");
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  バインド先: {}:{}", config.host, config.port);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  APIキー: {}",
                    if config.api_key.is_some() {
                        "設定済み"
                    } else {
                        "未設定"
                    }
                );
            }
        }
    }

    Ok(())
}
