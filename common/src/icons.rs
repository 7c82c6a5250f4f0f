//! アイコン対応表
//!
//! 凡例（カテゴリ）→ アイコン画像パス。起動時に一度だけ構築し、以後は変更しない。
//! パスの存在確認は呼び出し側で行う。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 対応表に無いカテゴリに使うアイコン
pub const DEFAULT_ICON_PATH: &str = "icons/default.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconTable {
    #[serde(default)]
    icons: HashMap<String, String>,
    #[serde(default = "default_icon_path")]
    default_icon: String,
}

fn default_icon_path() -> String {
    DEFAULT_ICON_PATH.to_string()
}

impl Default for IconTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl IconTable {
    /// 組み込みの対応表
    pub fn builtin() -> Self {
        let icons = [
            ("Ponto Turístico", "ponto_turistico.png"),
            ("Hospital", "hospital.png"),
            ("Restaurante", "restaurante.png"),
            ("Local do Evento", "local_evento.png"),
            ("Sede da Defesa Civil", "defesa.png"),
            ("Hotel", "hotel.png"),
            ("Aeroporto", "aeroporto.png"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            icons,
            default_icon: default_icon_path(),
        }
    }

    pub fn new(icons: HashMap<String, String>, default_icon: impl Into<String>) -> Self {
        Self {
            icons,
            default_icon: default_icon.into(),
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        Ok(table)
    }

    /// カテゴリからアイコンパスを取得（未登録・未入力はデフォルト）
    pub fn resolve(&self, category: Option<&str>) -> &str {
        category
            .and_then(|c| self.icons.get(c.trim()))
            .map(|p| p.as_str())
            .unwrap_or(&self.default_icon)
    }

    pub fn default_icon(&self) -> &str {
        &self.default_icon
    }

    /// 登録済みカテゴリ（名前順）
    pub fn categories(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .icons
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort();
        entries
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
