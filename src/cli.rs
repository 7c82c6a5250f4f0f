use clap::{Args, Parser, Subcommand};
use mapa_common::TileTheme;
use std::path::PathBuf;

use crate::pipeline::{DEFAULT_INPUT, DEFAULT_OUTPUT};

#[derive(Parser)]
#[command(name = "mapa")]
#[command(about = "地点一覧Excelからアイコン付きインタラクティブ地図(HTML)を生成", long_about = None)]
pub struct Cli {
    /// 省略時は `render` を既定値で実行
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（省略時は ~/.config/mapa/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 地点一覧から地図HTMLを生成
    Render(RenderArgs),

    /// アイコン対応表とアイコンファイルを確認
    Icons {
        /// アイコンフォルダ（省略時は設定値）
        #[arg(long)]
        icons_dir: Option<PathBuf>,
    },

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// デフォルト設定をファイルに書き出す
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args, Clone, Debug)]
pub struct RenderArgs {
    /// 入力Excelファイル
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// 出力HTMLファイル
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// シート名（省略時は先頭シート）
    #[arg(long)]
    pub sheet: Option<String>,

    /// アイコンフォルダ
    #[arg(long)]
    pub icons_dir: Option<PathBuf>,

    /// 初期ズーム
    #[arg(short, long)]
    pub zoom: Option<u8>,

    /// 背景タイル (CartoDB.VoyagerLabelsUnder/CartoDB.Voyager/CartoDB.Positron/CartoDB.DarkMatter/OpenStreetMap)
    #[arg(long)]
    pub tiles: Option<TileTheme>,

    /// ページタイトル
    #[arg(short, long)]
    pub title: Option<String>,

    /// 入力値をエスケープせずにHTMLとして埋め込む（信頼できる入力のみ）
    #[arg(long)]
    pub trusted_html: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sheet: None,
            icons_dir: None,
            zoom: None,
            tiles: None,
            title: None,
            trusted_html: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["mapa"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_render_defaults() {
        let cli = Cli::try_parse_from(["mapa", "render"]).unwrap();
        match cli.command {
            Some(Commands::Render(args)) => {
                assert_eq!(args.input, PathBuf::from("Locais - Manaus.xlsx"));
                assert_eq!(args.output, PathBuf::from("mapa.html"));
                assert!(args.tiles.is_none());
            }
            _ => panic!("render expected"),
        }
    }

    #[test]
    fn test_render_options() {
        let cli = Cli::try_parse_from([
            "mapa", "render", "pontos.xlsx", "-o", "out/pontos.html", "--tiles", "CartoDB.Positron",
            "--zoom", "10", "--trusted-html", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Render(args)) => {
                assert_eq!(args.input, PathBuf::from("pontos.xlsx"));
                assert_eq!(args.output, PathBuf::from("out/pontos.html"));
                assert_eq!(args.tiles, Some(TileTheme::Positron));
                assert_eq!(args.zoom, Some(10));
                assert!(args.trusted_html);
            }
            _ => panic!("render expected"),
        }
    }

    #[test]
    fn test_unknown_tiles_rejected() {
        assert!(Cli::try_parse_from(["mapa", "render", "--tiles", "Stamen"]).is_err());
    }
}
