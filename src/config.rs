use crate::error::{MapaError, Result};
use mapa_common::{FieldMapping, IconTable, Labels, TileTheme};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 入力Excelの列名
    pub fields: FieldMapping,
    /// 凡例 → アイコン
    pub icons: IconTable,
    /// アイコン対応表のJSONファイル（指定時は `icons` より優先）
    pub icons_file: Option<PathBuf>,
    /// アイコンの相対パスの基準ディレクトリ
    pub icons_dir: PathBuf,
    /// 背景タイル（例: CartoDB.VoyagerLabelsUnder）
    pub tiles: String,
    pub zoom_start: u8,
    /// サイドバーから選択したときのズーム
    pub focus_zoom: u8,
    pub popup_delay_ms: u32,
    pub title: String,
    pub labels: Labels,
    /// 入力値をHTMLとしてそのまま埋め込む（信頼できる入力のみ）
    pub trusted_html: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fields: FieldMapping::default(),
            icons: IconTable::builtin(),
            icons_file: None,
            icons_dir: PathBuf::from("."),
            tiles: TileTheme::default().to_string(),
            zoom_start: 12,
            focus_zoom: 14,
            popup_delay_ms: 500,
            title: "Mapa".into(),
            labels: Labels::default(),
            trusted_html: false,
        }
    }
}

impl Config {
    /// ユーザー設定を読み込み（無ければデフォルト）
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// 指定ファイルから読み込み
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MapaError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.tile_theme()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MapaError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("mapa").join("config.json"))
    }

    /// 使用するアイコン対応表
    pub fn icon_table(&self) -> Result<IconTable> {
        match &self.icons_file {
            Some(path) => Ok(IconTable::from_file(path)?),
            None => Ok(self.icons.clone()),
        }
    }

    pub fn tile_theme(&self) -> Result<TileTheme> {
        self.tiles.parse().map_err(MapaError::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.zoom_start, 12);
        assert_eq!(config.focus_zoom, 14);
        assert_eq!(config.tile_theme().unwrap(), TileTheme::VoyagerLabelsUnder);
        assert!(!config.trusted_html);
        assert_eq!(config.icons.resolve(Some("Hotel")), "hotel.png");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.zoom_start = 10;
        config.tiles = "CartoDB.Positron".into();
        config.save_to(&path).expect("保存失敗");

        let loaded = Config::load_from(&path).expect("読み込み失敗");
        assert_eq!(loaded.zoom_start, 10);
        assert_eq!(loaded.tile_theme().unwrap(), TileTheme::Positron);
        assert_eq!(loaded.icons, config.icons);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"fields": {"category": "Tipo"}}"#).unwrap();

        let config = Config::load_from(&path).expect("読み込み失敗");
        assert_eq!(config.fields.category, "Tipo");
        assert_eq!(config.fields.latitude, "LATITUDE");
        assert_eq!(config.zoom_start, 12);
    }

    #[test]
    fn test_unknown_tiles_rejected() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"tiles": "Stamen.Toner"}"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, MapaError::Config(_)));
    }

    #[test]
    fn test_icons_file_overrides_table() {
        let dir = tempdir().expect("Failed to create temp dir");
        let icons_path = dir.path().join("icones.json");
        std::fs::write(&icons_path, r#"{"icons": {"Escola": "escola.png"}}"#).unwrap();

        let config = Config {
            icons_file: Some(icons_path),
            ..Default::default()
        };
        let table = config.icon_table().expect("対応表の読み込み失敗");
        assert_eq!(table.resolve(Some("Escola")), "escola.png");
        assert_eq!(table.resolve(Some("Hotel")), mapa_common::DEFAULT_ICON_PATH);

        assert_eq!(Config::default().icon_table().unwrap(), IconTable::builtin());
    }

    #[test]
    fn test_icons_file_not_found() {
        let config = Config {
            icons_file: Some(PathBuf::from("/nonexistent/icones.json")),
            ..Default::default()
        };
        let err = config.icon_table().unwrap_err();
        assert!(matches!(err, MapaError::Common(mapa_common::Error::Io(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::load_from(Path::new("/nonexistent/mapa/config.json")).unwrap_err();
        assert!(matches!(err, MapaError::FileNotFound(_)));
    }
}
