use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapaError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    /// 入力Excelを読み込めない
    #[error("読み込みエラー ({}): {message}", .path.display())]
    Load { path: PathBuf, message: String },

    #[error("地点データがありません: {0}")]
    EmptyDataset(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    /// 共通ライブラリのエラー（座標フォーマット・列不足など）
    #[error(transparent)]
    Common(#[from] mapa_common::Error),
}

impl MapaError {
    pub fn load(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        MapaError::Load {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MapaError>;
