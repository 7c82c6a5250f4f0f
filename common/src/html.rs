//! HTML断片の生成
//!
//! ポップアップ本文とエスケープ処理。入力Excelの値はそのまま埋め込まず、
//! `trusted` 指定がない限りエスケープする。

use crate::types::PlaceRecord;
use serde::{Deserialize, Serialize};

/// 画面に表示する文言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub description_unavailable: String,
    pub photo_alt: String,
    pub search_title: String,
    pub search_placeholder: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            description_unavailable: "description unavailable".into(),
            photo_alt: "Foto do Local".into(),
            search_title: "Pesquisa".into(),
            search_placeholder: "Buscar por nome".into(),
        }
    }
}

/// HTMLテキスト・属性値のエスケープ
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `<script>` 内に置けるJS文字列リテラル
///
/// JSON文字列はJSの文字列リテラルとしても有効。`</script>` で閉じられないよう `</` を退避する。
pub fn js_string(value: &str) -> String {
    let quoted = serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""));
    quoted.replace("</", "<\\/")
}

/// 埋め込み方針（エスケープするか、信頼済みとしてそのまま使うか）
pub(crate) fn embed(value: &str, trusted: bool) -> String {
    if trusted {
        value.to_string()
    } else {
        escape_html(value)
    }
}

/// ポップアップ本文を生成
///
/// 名前（太字）、説明（無ければ既定文言）、写真があれば `<img>`。
pub fn popup_html(place: &PlaceRecord, labels: &Labels, trusted: bool) -> String {
    let description = place
        .description
        .as_deref()
        .unwrap_or(&labels.description_unavailable);

    let mut html = format!(
        "<b>{}</b><br>\n<p>{}</p>\n",
        embed(&place.name, trusted),
        embed(description, trusted)
    );

    if let Some(photo) = place.photo_reference.as_deref() {
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" style=\"width:100%; height:auto;\">",
            embed(photo, trusted),
            escape_html(&labels.photo_alt)
        ));
    }

    html
}
