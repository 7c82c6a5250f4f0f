//! 検索サイドバーの生成
//!
//! 地図左側に固定表示するパネル。項目クリックで地図を移動してポップアップを開き、
//! 入力欄で名前の部分一致（大文字小文字無視）による絞り込みを行う。
//! 項目の並びはマーカーの作成順（＝入力行の順）のまま。

use crate::html::{embed, escape_html, Labels};
use crate::types::SidebarEntry;

/// サイドバーの設定
#[derive(Debug, Clone)]
pub struct SidebarOptions {
    /// 項目クリック時のズーム
    pub focus_zoom: u8,
    /// 地図移動の完了を待ってからポップアップを開くまでの時間
    pub popup_delay_ms: u32,
    pub labels: Labels,
    pub trusted: bool,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            focus_zoom: 14,
            popup_delay_ms: 500,
            labels: Labels::default(),
            trusted: false,
        }
    }
}

const PANEL_STYLE: &str = "width: 300px; height: 100%; position: absolute; top: 0; left: 0; \
background-color: #f8f9fa; box-shadow: 2px 0 5px rgba(0, 0, 0, 0.1); overflow-y: scroll; \
z-index: 9999; padding: 10px;";

const INPUT_STYLE: &str = "width: 100%; padding: 8px; margin-bottom: 15px; border-radius: 4px; \
border: 1px solid #ccc; transition: 0.3s;";

const ITEM_STYLE: &str = "padding: 8px; margin-bottom: 5px; border-radius: 4px; cursor: pointer; \
transition: 0.3s; background-color: #f1f1f1;";

/// サイドバーのHTML/JS断片を生成
pub fn generate_sidebar(entries: &[SidebarEntry], options: &SidebarOptions) -> String {
    let mut html = String::new();

    html.push_str(&format!("<div id=\"sidebar\" style=\"{}\">\n", PANEL_STYLE));
    html.push_str(&format!(
        "    <h2 style=\"font-family: Arial, sans-serif; color: #007bff;\">{}</h2>\n",
        escape_html(&options.labels.search_title)
    ));
    html.push_str(&format!(
        "    <input type=\"text\" id=\"search\" placeholder=\"{}\" style=\"{}\">\n",
        escape_html(&options.labels.search_placeholder),
        INPUT_STYLE
    ));
    html.push_str("    <ul id=\"points-list\" style=\"list-style-type: none; padding-left: 10px;\">\n");

    for entry in entries {
        html.push_str(&format!(
            "        <li data-marker-id=\"{id}\" onclick=\"centerMap({lat}, {lng}, '{id}')\" style=\"{style}\"><b>{name}</b></li>\n",
            id = escape_html(&entry.marker_id),
            lat = entry.latitude,
            lng = entry.longitude,
            style = ITEM_STYLE,
            name = embed(&entry.name, options.trusted),
        ));
    }

    html.push_str("    </ul>\n</div>\n");
    html.push_str(&sidebar_script(options));
    html
}

fn sidebar_script(options: &SidebarOptions) -> String {
    format!(
        r#"<script>
    function centerMap(lat, lng, markerId) {{
        map.setView([lat, lng], {zoom});
        setTimeout(function() {{
            var marker = markers[markerId];
            if (marker) {{
                marker.openPopup();
            }}
        }}, {delay});
    }}

    document.getElementById('search').addEventListener('input', function() {{
        var searchText = this.value.toLowerCase();
        var items = document.querySelectorAll('#points-list li');
        items.forEach(function(item) {{
            var name = item.innerText.toLowerCase();
            item.style.display = name.includes(searchText) ? '' : 'none';
        }});
    }});
</script>
"#,
        zoom = options.focus_zoom,
        delay = options.popup_delay_ms,
    )
}
