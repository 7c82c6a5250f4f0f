//! 地点一覧Excelからインタラクティブ地図(HTML)を生成する
//!
//! ## 処理フロー
//! 1. Excel読み込み（loader）
//! 2. 座標の正規化（mapa_common::normalizer）
//! 3. アイコン解決・マーカー作成（builder）
//! 4. サイドバー生成・HTML出力（pipeline）

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod icon_assets;
pub mod inventory;
pub mod loader;
pub mod pipeline;

pub use builder::{build_markers, BuildContext, BuildReport, Diagnostic};
pub use config::Config;
pub use error::{MapaError, Result};
pub use pipeline::{render_map, RenderOptions, RenderReport};
