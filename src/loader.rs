//! 地点一覧Excelの読み込み
//!
//! 1行目をヘッダとして、各行を「列名 → セル文字列」に変換する。
//! 列の検証はここでは行わない（normalizerで行う）。

use crate::error::{MapaError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use mapa_common::{RawRow, RawTable};
use std::path::Path;

/// 先頭シートを読み込む
pub fn load_table(path: &Path) -> Result<RawTable> {
    load_table_from_sheet(path, None)
}

/// シート名を指定して読み込む（Noneは先頭シート）
pub fn load_table_from_sheet(path: &Path, sheet: Option<&str>) -> Result<RawTable> {
    if !path.exists() {
        return Err(MapaError::load(path, "ファイルが存在しません"));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| MapaError::load(path, e))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| MapaError::load(path, "シートがありません"))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| MapaError::load(path, format!("シート '{}': {}", sheet_name, e)))?;

    // 範囲は最初の非空セルから始まるので、ヘッダより上の空行分を覚えておく
    let header_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    Ok(table_from_rows(range.rows(), header_row))
}

/// セル行の並びから表を組み立てる（header_rowはヘッダ行のExcel上の位置、0始まり）
fn table_from_rows<'a>(
    mut rows: impl Iterator<Item = &'a [Data]>,
    header_row: usize,
) -> RawTable {
    let headers: Vec<String> = match rows.next() {
        Some(first) => first
            .iter()
            .map(|c| cell_text(c).map(|s| s.trim().to_string()).unwrap_or_default())
            .collect(),
        None => return RawTable::default(),
    };

    let mut table_rows = Vec::new();
    for (index, row) in rows.enumerate() {
        let mut raw = RawRow::new(index).at_header_row(header_row);
        for (header, cell) in headers.iter().zip(row.iter()) {
            if header.is_empty() {
                continue;
            }
            if let Some(text) = cell_text(cell) {
                raw.cells.insert(header.clone(), text);
            }
        }

        // 完全な空行は読み飛ばす
        if !raw.cells.is_empty() {
            table_rows.push(raw);
        }
    }

    RawTable {
        headers: headers.into_iter().filter(|h| !h.is_empty()).collect(),
        rows: table_rows,
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
