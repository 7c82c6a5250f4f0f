//! 地点データの型定義
//!
//! - RawTable / RawRow: Excelから読み込んだままの表
//! - PlaceRecord: 座標を数値化した地点
//! - Marker: 地図に配置するマーカー（アイコン・ポップアップ付き）
//! - SidebarEntry: サイドバーの一覧項目

use std::collections::HashMap;

/// 読み込んだ表の1行（空セルは含まない）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// データ行のインデックス（0始まり、ヘッダ行は含まない）
    pub index: usize,
    /// ヘッダ行のExcel上の位置（0始まり）。ヘッダより上の空行の分だけずれる
    pub header_row: usize,
    pub cells: HashMap<String, String>,
}

impl RawRow {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            header_row: 0,
            cells: HashMap::new(),
        }
    }

    /// ヘッダ行の位置を設定（ビルダー形式）
    pub fn at_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }

    /// セル値を設定（ビルダー形式）
    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.cells.insert(column.to_string(), value.to_string());
        self
    }

    /// 空白のみのセルは未入力として扱う
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    /// Excel上の行番号（1始まり）
    pub fn sheet_row(&self) -> usize {
        self.header_row + self.index + 2
    }
}

/// 読み込んだ表全体
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 座標を正規化済みの地点
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceRecord {
    pub row_index: usize,

    pub name: String,

    pub latitude: f64,

    pub longitude: f64,

    /// 凡例（Legenda）
    pub category: Option<String>,

    pub description: Option<String>,

    /// 写真のパスまたはURL
    pub photo_reference: Option<String>,
}

impl PlaceRecord {
    /// 入力順に割り当てるマーカーID
    pub fn marker_id(&self) -> String {
        format!("marker_{}", self.row_index)
    }
}

/// 地図に配置するマーカー
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub place: PlaceRecord,
    /// MapDocumentに登録したアイコンのキー
    pub icon_key: String,
    pub popup_html: String,
}

impl Marker {
    pub fn sidebar_entry(&self) -> SidebarEntry {
        SidebarEntry {
            name: self.place.name.clone(),
            marker_id: self.id.clone(),
            latitude: self.place.latitude,
            longitude: self.place.longitude,
        }
    }
}

/// サイドバーの一覧項目
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarEntry {
    pub name: String,
    pub marker_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_blank_cell_is_missing() {
        let row = RawRow::new(0).with("name", "Teatro").with("foto", "   ");
        assert_eq!(row.get("name"), Some("Teatro"));
        assert_eq!(row.get("foto"), None);
        assert_eq!(row.get("Legenda"), None);
    }

    #[test]
    fn test_sheet_row() {
        assert_eq!(RawRow::new(0).sheet_row(), 2);
        assert_eq!(RawRow::new(9).sheet_row(), 11);
        // ヘッダが3行目にある表
        assert_eq!(RawRow::new(1).at_header_row(2).sheet_row(), 5);
    }

    #[test]
    fn test_marker_id_uses_row_index() {
        let place = PlaceRecord {
            row_index: 7,
            ..Default::default()
        };
        assert_eq!(place.marker_id(), "marker_7");
    }
}
