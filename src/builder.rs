//! マーカー作成モジュール
//!
//! 地点ごとにアイコンを解決・読み込み、ポップアップを組み立ててマーカーを作る。
//! アイコンが無い・読めない地点は診断メッセージを出して除外し、残りの地点は処理を続ける。

use crate::icon_assets::IconCache;
use indicatif::ProgressBar;
use mapa_common::{popup_html, IconDefinition, IconTable, Labels, Marker, PlaceRecord};
use std::path::{Path, PathBuf};

/// マーカー作成の設定
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub icons: IconTable,
    /// アイコンの相対パスの基準
    pub icons_dir: PathBuf,
    pub labels: Labels,
    pub trusted_html: bool,
}

impl BuildContext {
    /// 対応表のパスを基準ディレクトリで解決
    pub fn icon_path(&self, category: Option<&str>) -> PathBuf {
        let icon = Path::new(self.icons.resolve(category));
        if icon.is_absolute() {
            icon.to_path_buf()
        } else {
            self.icons_dir.join(icon)
        }
    }
}

/// 除外した地点の診断
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// アイコンファイルが存在しない
    IconMissing {
        name: String,
        category: String,
        path: PathBuf,
    },
    /// アイコン画像を読み込めない
    IconLoad {
        name: String,
        path: PathBuf,
        message: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::IconMissing { name, category, path } => write!(
                f,
                "アイコンが見つかりません: {} ({}): {}",
                category,
                name,
                path.display()
            ),
            Diagnostic::IconLoad { name, path, message } => write!(
                f,
                "アイコンの読み込みに失敗: {} ({}): {}",
                name,
                path.display(),
                message
            ),
        }
    }
}

/// マーカー作成結果
#[derive(Debug, Default)]
pub struct BuildReport {
    /// 入力順のマーカー
    pub markers: Vec<Marker>,
    /// 使用したアイコン（初出順、重複なし）
    pub icons: Vec<IconDefinition>,
    pub diagnostics: Vec<Diagnostic>,
}

/// 全地点のマーカーを作成
pub fn build_markers(
    places: &[PlaceRecord],
    context: &BuildContext,
    progress: &ProgressBar,
) -> BuildReport {
    let mut report = BuildReport::default();
    let mut cache = IconCache::new();

    for place in places {
        progress.inc(1);

        match build_marker(place, context, &mut cache, &mut report.icons) {
            Ok(marker) => report.markers.push(marker),
            Err(diagnostic) => {
                progress.suspend(|| tracing::warn!("{}", diagnostic));
                report.diagnostics.push(diagnostic);
            }
        }
    }

    report
}

fn build_marker(
    place: &PlaceRecord,
    context: &BuildContext,
    cache: &mut IconCache,
    icons: &mut Vec<IconDefinition>,
) -> Result<Marker, Diagnostic> {
    let category = place.category.as_deref();
    let path = context.icon_path(category);

    // 既定アイコンへの差し替えはしない（対応表の結果そのものが無ければ除外）
    if !path.exists() {
        return Err(Diagnostic::IconMissing {
            name: place.name.clone(),
            category: category.unwrap_or_default().to_string(),
            path,
        });
    }

    let asset = cache.get_or_load(&path).map_err(|e| Diagnostic::IconLoad {
        name: place.name.clone(),
        path: path.clone(),
        message: e.to_string(),
    })?;

    if !icons.iter().any(|i| i.key == asset.key) {
        icons.push(IconDefinition::new(asset.key.clone(), asset.data_uri.clone()));
    }

    Ok(Marker {
        id: place.marker_id(),
        place: place.clone(),
        icon_key: asset.key.clone(),
        popup_html: popup_html(place, &context.labels, context.trusted_html),
    })
}
