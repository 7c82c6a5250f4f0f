//! 座標正規化モジュール
//!
//! 小数点にカンマを使う表記（`-3,10`）をピリオドに置換してf64に変換する。
//! 行ごとの遅延処理ではなく、表全体を一括で変換する（地図の中心計算で列全体を使うため）。

use crate::error::{Error, Result};
use crate::fields::FieldMapping;
use crate::types::{PlaceRecord, RawRow, RawTable};

/// ロケール表記の小数を変換
///
/// すべての `,` を `.` に置換してからパースする。NaN・無限大は不可。
///
/// # Examples
/// ```
/// use mapa_common::normalize_decimal;
///
/// assert_eq!(normalize_decimal("-3,10"), Some(-3.10));
/// assert_eq!(normalize_decimal("abc"), None);
/// ```
pub fn normalize_decimal(raw: &str) -> Option<f64> {
    let replaced = raw.trim().replace(',', ".");
    replaced.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 表全体を地点リストに変換
///
/// 必須列が無い場合は `MissingColumn`、座標が変換できない行があれば `Format` で失敗する。
pub fn normalize_table(table: &RawTable, mapping: &FieldMapping) -> Result<Vec<PlaceRecord>> {
    for column in mapping.required_columns() {
        if !table.has_column(column) {
            return Err(Error::MissingColumn(column.to_string()));
        }
    }

    let description_column = mapping.description_column(table);
    let photo_column = mapping.photo_column(table);

    table
        .rows
        .iter()
        .map(|row| {
            Ok(PlaceRecord {
                row_index: row.index,
                name: row.get(&mapping.name).unwrap_or_default().trim().to_string(),
                latitude: coordinate(row, &mapping.latitude)?,
                longitude: coordinate(row, &mapping.longitude)?,
                category: optional(row, Some(mapping.category.as_str())),
                description: optional(row, description_column),
                photo_reference: optional(row, photo_column),
            })
        })
        .collect()
}

fn coordinate(row: &RawRow, column: &str) -> Result<f64> {
    let raw = row.get(column).unwrap_or_default();
    normalize_decimal(raw).ok_or_else(|| Error::Format {
        row: row.sheet_row(),
        column: column.to_string(),
        value: raw.to_string(),
    })
}

fn optional(row: &RawRow, column: Option<&str>) -> Option<String> {
    column
        .and_then(|c| row.get(c))
        .map(|v| v.trim().to_string())
}

/// 地図の中心（全地点の緯度・経度の算術平均）
pub fn map_center(places: &[PlaceRecord]) -> Option<(f64, f64)> {
    if places.is_empty() {
        return None;
    }
    let n = places.len() as f64;
    let lat = places.iter().map(|p| p.latitude).sum::<f64>() / n;
    let lon = places.iter().map(|p| p.longitude).sum::<f64>() / n;
    Some((lat, lon))
}
