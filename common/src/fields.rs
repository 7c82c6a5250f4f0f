//! 列名マッピング
//!
//! 入力Excelの列名はファイルごとに揺れがある（`Localização` / `description` 等）。
//! 必須列は1つの名前、任意列は候補リストで指定し、ヘッダに最初に見つかった列を使う。

use crate::error::Result;
use crate::types::RawTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    pub latitude: String,
    pub longitude: String,
    pub name: String,
    /// 凡例（アイコン選択に使う）
    pub category: String,
    /// 説明列の候補
    pub description: Vec<String>,
    /// 写真列の候補
    pub photo: Vec<String>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            latitude: "LATITUDE".into(),
            longitude: "LONGITUDE".into(),
            name: "name".into(),
            category: "Legenda".into(),
            description: vec!["Localização".into(), "description".into()],
            photo: vec!["foto".into(), "Foto".into(), "photo".into()],
        }
    }
}

impl FieldMapping {
    /// JSON文字列から読み込み（未指定の項目はデフォルト）
    pub fn from_json(json: &str) -> Result<Self> {
        let mapping: Self = serde_json::from_str(json)?;
        Ok(mapping)
    }

    /// 必須列（緯度・経度・名前・凡例）
    pub fn required_columns(&self) -> [&str; 4] {
        [
            self.latitude.as_str(),
            self.longitude.as_str(),
            self.name.as_str(),
            self.category.as_str(),
        ]
    }

    /// 説明列として使う列名
    pub fn description_column<'a>(&'a self, table: &RawTable) -> Option<&'a str> {
        first_present(&self.description, table)
    }

    /// 写真列として使う列名
    pub fn photo_column<'a>(&'a self, table: &RawTable) -> Option<&'a str> {
        first_present(&self.photo, table)
    }
}

fn first_present<'a>(candidates: &'a [String], table: &RawTable) -> Option<&'a str> {
    candidates
        .iter()
        .find(|c| table.has_column(c))
        .map(|c| c.as_str())
}
