//! アイコン画像の読み込み
//!
//! 画像をRGBAに変換してPNGに再エンコードし、data URIとしてHTMLに埋め込む。
//! 一時ファイルを介さないので、行ごとに同じファイルを上書きすることはない。

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// 読み込み済みアイコン
#[derive(Debug, Clone, PartialEq)]
pub struct IconAsset {
    /// PNGのSHA-256（先頭12桁）。同じ画像は同じキーになる
    pub key: String,
    pub data_uri: String,
    pub width: u32,
    pub height: u32,
}

/// 画像を読み込んでRGBA PNGのdata URIにする
pub fn load_icon(path: &Path) -> Result<IconAsset, image::ImageError> {
    let buffer = image::open(path)?.to_rgba8();
    let (width, height) = buffer.dimensions();
    let rgba = DynamicImage::ImageRgba8(buffer);

    let mut png = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    let digest = hex::encode(Sha256::digest(&png));

    Ok(IconAsset {
        key: digest[..12].to_string(),
        data_uri: format!("data:image/png;base64,{}", STANDARD.encode(&png)),
        width,
        height,
    })
}

/// 1回の実行中に読み込んだアイコンのキャッシュ（パス単位）
#[derive(Debug, Default)]
pub struct IconCache {
    loaded: HashMap<PathBuf, IconAsset>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み込み済みならキャッシュから返す。失敗はキャッシュしない
    pub fn get_or_load(&mut self, path: &Path) -> Result<&IconAsset, image::ImageError> {
        if !self.loaded.contains_key(path) {
            let asset = load_icon(path)?;
            tracing::debug!("アイコン読み込み: {} ({}x{})", path.display(), asset.width, asset.height);
            self.loaded.insert(path.to_path_buf(), asset);
        }
        Ok(&self.loaded[path])
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}
