//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 座標を数値に変換できない（行番号はExcel上の行）
    #[error("Format error: row {row}, column '{column}': cannot parse '{value}' as a coordinate")]
    Format {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Missing column: '{0}'")]
    MissingColumn(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
