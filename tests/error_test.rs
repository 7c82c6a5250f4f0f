//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use mapa_rust::error::MapaError;
use mapa_rust::loader;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを読み込んだ場合
#[test]
fn test_load_nonexistent_file() {
    let result = loader::load_table(Path::new("/nonexistent/path/Locais.xlsx"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, MapaError::Load { .. }));
    assert!(err.to_string().contains("Locais.xlsx"));
}

/// Excelでないファイルを読み込んだ場合
#[test]
fn test_load_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("locais.txt");
    std::fs::write(&path, "name;LATITUDE").unwrap();

    let err = loader::load_table(&path).unwrap_err();
    assert!(matches!(err, MapaError::Load { .. }));
}

/// ヘッダのみのExcel（地点0件）
#[test]
fn test_header_only_workbook_is_empty_dataset() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("vazio.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["name", "Legenda", "LATITUDE", "LONGITUDE"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    workbook.save(&input).unwrap();

    let options = mapa_rust::RenderOptions {
        input,
        output: dir.path().join("mapa.html"),
        sheet: None,
    };
    let err = mapa_rust::render_map(&options, &mapa_rust::Config::default()).unwrap_err();
    assert!(matches!(err, MapaError::EmptyDataset(_)));
    assert!(!options.output.exists());
}

/// 必須列が無い場合
#[test]
fn test_missing_required_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("sem_legenda.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["name", "LATITUDE", "LONGITUDE"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_string(1, 0, "Teatro").unwrap();
    sheet.write_string(1, 1, "-3,1").unwrap();
    sheet.write_string(1, 2, "-60,0").unwrap();
    workbook.save(&input).unwrap();

    let options = mapa_rust::RenderOptions {
        input,
        output: dir.path().join("mapa.html"),
        sheet: None,
    };
    let err = mapa_rust::render_map(&options, &mapa_rust::Config::default()).unwrap_err();
    assert!(matches!(
        err,
        MapaError::Common(mapa_common::Error::MissingColumn(ref c)) if c == "Legenda"
    ));
}

/// MapaErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        MapaError::Config("テスト設定エラー".to_string()),
        MapaError::FileNotFound("config.json".to_string()),
        MapaError::load("Locais.xlsx", "壊れています"),
        MapaError::EmptyDataset("Locais.xlsx".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: MapaError = io_err.into();

    assert!(matches!(err, MapaError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: MapaError = json_err.into();

    assert!(matches!(err, MapaError::JsonParse(_)));
}

/// common::Errorは透過的に表示される
#[test]
fn test_common_error_transparent() {
    let common_err = mapa_common::Error::Format {
        row: 3,
        column: "LATITUDE".to_string(),
        value: "sul".to_string(),
    };
    let err: MapaError = common_err.into();

    assert!(matches!(err, MapaError::Common(_)));
    let display = format!("{}", err);
    assert!(display.starts_with("Format error"));
    assert!(display.contains("sul"));
}
