//! アイコン一覧の確認
//!
//! 対応表の各アイコンが存在するか、アイコンフォルダに未使用の画像がないかを調べる。

use crate::error::{MapaError, Result};
use mapa_common::IconTable;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 対応表の1項目
#[derive(Debug, Clone, PartialEq)]
pub struct IconStatus {
    /// カテゴリ（既定アイコンはNone）
    pub category: Option<String>,
    pub path: PathBuf,
    pub exists: bool,
}

#[derive(Debug, Clone, Default)]
pub struct IconInventory {
    pub entries: Vec<IconStatus>,
    /// どのカテゴリからも参照されていない画像
    pub unused: Vec<PathBuf>,
}

impl IconInventory {
    pub fn missing_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.exists).count()
    }
}

/// アイコンフォルダ直下の画像を列挙（ファイル名順）
pub fn scan_icon_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(MapaError::FileNotFound(dir.display().to_string()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(2) // icons/default.png 形式まで
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("png"))
                .unwrap_or(false)
        })
        .collect();

    files.sort();
    Ok(files)
}

/// 対応表とアイコンフォルダを照合
pub fn check_icons(table: &IconTable, icons_dir: &Path) -> Result<IconInventory> {
    let resolve = |p: &str| {
        let path = Path::new(p);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            icons_dir.join(path)
        }
    };

    let mut entries: Vec<IconStatus> = table
        .categories()
        .into_iter()
        .map(|(category, path)| {
            let path = resolve(path);
            IconStatus {
                category: Some(category.to_string()),
                exists: path.is_file(),
                path,
            }
        })
        .collect();

    let default_path = resolve(table.default_icon());
    entries.push(IconStatus {
        category: None,
        exists: default_path.is_file(),
        path: default_path,
    });

    let unused = scan_icon_dir(icons_dir)?
        .into_iter()
        .filter(|file| !entries.iter().any(|e| same_file(&e.path, file)))
        .collect();

    Ok(IconInventory { entries, unused })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
