//! 地図生成の一括処理
//!
//! 読み込み → 座標正規化 → マーカー作成 → サイドバー生成 → HTML出力。
//! 出力ファイルは最後に1回だけ書き込む（途中で失敗した場合は何も出力しない）。

use crate::builder::{build_markers, BuildContext, BuildReport, Diagnostic};
use crate::config::Config;
use crate::error::{MapaError, Result};
use crate::loader;
use indicatif::{ProgressBar, ProgressStyle};
use mapa_common::{
    generate_sidebar, map_center, normalize_table, MapDocument, SidebarEntry, SidebarOptions,
    TileTheme,
};
use std::path::PathBuf;

/// 既定の入力ファイル
pub const DEFAULT_INPUT: &str = "Locais - Manaus.xlsx";
/// 既定の出力ファイル
pub const DEFAULT_OUTPUT: &str = "mapa.html";

/// 1回の生成の入出力指定
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// シート名（Noneは先頭シート）
    pub sheet: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sheet: None,
        }
    }
}

/// 生成結果
#[derive(Debug)]
pub struct RenderReport {
    pub output: PathBuf,
    /// 入力の地点数
    pub total_places: usize,
    /// 地図に配置したマーカーID（入力順）
    pub marker_ids: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub center: (f64, f64),
}

/// 入力Excelから地図HTMLを生成
pub fn render_map(options: &RenderOptions, config: &Config) -> Result<RenderReport> {
    let tiles = config.tile_theme()?;
    let icons = config.icon_table()?;

    // 1. 読み込み
    println!("[1/4] 地点データを読み込み中...");
    let table = loader::load_table_from_sheet(&options.input, options.sheet.as_deref())?;
    let places = normalize_table(&table, &config.fields)?;
    let center = map_center(&places)
        .ok_or_else(|| MapaError::EmptyDataset(options.input.display().to_string()))?;
    println!("✔ {}件の地点を検出\n", places.len());

    // 2. マーカー作成
    println!("[2/4] マーカーを作成中...");
    let context = BuildContext {
        icons,
        icons_dir: config.icons_dir.clone(),
        labels: config.labels.clone(),
        trusted_html: config.trusted_html,
    };
    let progress = ProgressBar::new(places.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("  {bar:30} {pos}/{len}") {
        progress.set_style(style);
    }
    let report = build_markers(&places, &context, &progress);
    progress.finish_and_clear();
    println!(
        "✔ {}件のマーカーを作成（除外: {}件）\n",
        report.markers.len(),
        report.diagnostics.len()
    );

    // 3. 地図の組み立て
    println!("[3/4] 地図を組み立て中...");
    let document = assemble_document(center, &report, tiles, config);

    // 4. 保存
    println!("[4/4] HTMLを保存中...");
    if let Some(parent) = options.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&options.output, document.render())?;
    println!("✔ 地図を保存: {}", options.output.display());

    Ok(RenderReport {
        output: options.output.clone(),
        total_places: places.len(),
        marker_ids: report.markers.iter().map(|m| m.id.clone()).collect(),
        diagnostics: report.diagnostics,
        center,
    })
}

/// マーカー・アイコン・サイドバーから地図ドキュメントを作る
pub fn assemble_document(
    center: (f64, f64),
    report: &BuildReport,
    tiles: TileTheme,
    config: &Config,
) -> MapDocument {
    let mut document = MapDocument::new(center, config.zoom_start, tiles);
    document.title = config.title.clone();

    for icon in &report.icons {
        document.add_icon(icon.clone());
    }
    for marker in &report.markers {
        document.add_marker(marker.clone());
    }

    let entries: Vec<SidebarEntry> = report.markers.iter().map(|m| m.sidebar_entry()).collect();
    let sidebar_options = SidebarOptions {
        focus_zoom: config.focus_zoom,
        popup_delay_ms: config.popup_delay_ms,
        labels: config.labels.clone(),
        trusted: config.trusted_html,
    };
    document.add_html(generate_sidebar(&entries, &sidebar_options));

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapa_common::{IconDefinition, Marker, PlaceRecord};

    fn marker(index: usize, name: &str) -> Marker {
        let place = PlaceRecord {
            row_index: index,
            name: name.to_string(),
            latitude: -3.0 - index as f64 / 10.0,
            longitude: -60.0,
            ..Default::default()
        };
        Marker {
            id: place.marker_id(),
            popup_html: format!("<b>{}</b>", name),
            place,
            icon_key: "k1".to_string(),
        }
    }

    #[test]
    fn test_assemble_document() {
        let report = BuildReport {
            markers: vec![marker(0, "Teatro"), marker(2, "Hospital X")],
            icons: vec![IconDefinition::new("k1", "data:image/png;base64,AAAA")],
            diagnostics: vec![],
        };
        let config = Config::default();
        let document = assemble_document((-3.1, -60.0), &report, TileTheme::Positron, &config);

        assert_eq!(document.markers().len(), 2);
        assert_eq!(document.icons().len(), 1);
        assert_eq!(document.zoom, 12);

        let html = document.render();
        assert!(html.contains("light_all"));
        assert!(html.contains("<title>Mapa</title>"));
        assert!(html.contains("id=\"sidebar\""));
        assert!(html.contains("'marker_2'"));
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.input, PathBuf::from("Locais - Manaus.xlsx"));
        assert_eq!(options.output, PathBuf::from("mapa.html"));
        assert!(options.sheet.is_none());
    }
}
