use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "object-ai")]
#[command(about = "Gemini連携オブジェクト認識APIサーバ", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// APIサーバを起動
    Serve {
        /// バインドするホスト（デフォルト: 設定ファイルの値）
        #[arg(long)]
        host: Option<String>,

        /// バインドするポート（デフォルト: 設定ファイルの値）
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// 画像ファイルを1枚解析してJSONを出力
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 探索対象のオブジェクト名
        #[arg(short, long)]
        object_name: String,

        /// 出力JSONファイル（デフォルト: 標準出力）
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,
    },

    /// 設定の表示・変更
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
