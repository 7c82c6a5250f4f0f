//! 地図ドキュメント（Leaflet HTML）の組み立て
//!
//! マーカー・アイコン・サイドバーを1つのHTMLにまとめる。
//! 出力は入力順だけで決まり、同じ入力からは同じHTMLが得られる。

use crate::html::{escape_html, js_string};
use crate::types::Marker;

const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.css";
const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.js";

const CARTO_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";
const OSM_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// 背景タイルのテーマ
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TileTheme {
    #[default]
    VoyagerLabelsUnder,
    Voyager,
    Positron,
    DarkMatter,
    OpenStreetMap,
}

impl TileTheme {
    pub fn url(&self) -> &'static str {
        match self {
            TileTheme::VoyagerLabelsUnder => {
                "https://{s}.basemaps.cartocdn.com/rastertiles/voyager_labels_under/{z}/{x}/{y}{r}.png"
            }
            TileTheme::Voyager => "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png",
            TileTheme::Positron => "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
            TileTheme::DarkMatter => "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
            TileTheme::OpenStreetMap => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            TileTheme::OpenStreetMap => OSM_ATTRIBUTION,
            _ => CARTO_ATTRIBUTION,
        }
    }

    fn subdomains(&self) -> &'static str {
        match self {
            TileTheme::OpenStreetMap => "abc",
            _ => "abcd",
        }
    }

    fn max_zoom(&self) -> u8 {
        match self {
            TileTheme::OpenStreetMap => 19,
            _ => 20,
        }
    }
}

impl std::str::FromStr for TileTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "cartodbvoyagerlabelsunder" | "voyagerlabelsunder" => Ok(TileTheme::VoyagerLabelsUnder),
            "cartodbvoyager" | "voyager" => Ok(TileTheme::Voyager),
            "cartodbpositron" | "positron" => Ok(TileTheme::Positron),
            "cartodbdarkmatter" | "darkmatter" => Ok(TileTheme::DarkMatter),
            "openstreetmap" | "osm" => Ok(TileTheme::OpenStreetMap),
            _ => Err(format!(
                "Unknown tiles: {}. Use CartoDB.VoyagerLabelsUnder, CartoDB.Voyager, CartoDB.Positron, CartoDB.DarkMatter or OpenStreetMap",
                s
            )),
        }
    }
}

impl std::fmt::Display for TileTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileTheme::VoyagerLabelsUnder => write!(f, "CartoDB.VoyagerLabelsUnder"),
            TileTheme::Voyager => write!(f, "CartoDB.Voyager"),
            TileTheme::Positron => write!(f, "CartoDB.Positron"),
            TileTheme::DarkMatter => write!(f, "CartoDB.DarkMatter"),
            TileTheme::OpenStreetMap => write!(f, "OpenStreetMap"),
        }
    }
}

/// マーカー用アイコンの定義（L.icon）
#[derive(Debug, Clone, PartialEq)]
pub struct IconDefinition {
    /// JS変数名に使うキー
    pub key: String,
    /// 画像URL（data URIまたはパス）
    pub url: String,
    pub size: (u32, u32),
    pub anchor: (i32, i32),
    pub popup_anchor: (i32, i32),
}

impl IconDefinition {
    /// 25x25、下中央付近にアンカー、ポップアップはアイコンの上
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
            size: (25, 25),
            anchor: (15, 30),
            popup_anchor: (0, -30),
        }
    }
}

/// 地図ドキュメント
#[derive(Debug, Clone)]
pub struct MapDocument {
    pub title: String,
    pub center: (f64, f64),
    pub zoom: u8,
    pub tiles: TileTheme,
    pub popup_max_width: u32,
    icons: Vec<IconDefinition>,
    markers: Vec<Marker>,
    html_children: Vec<String>,
}

impl MapDocument {
    pub fn new(center: (f64, f64), zoom: u8, tiles: TileTheme) -> Self {
        Self {
            title: "Mapa".to_string(),
            center,
            zoom,
            tiles,
            popup_max_width: 300,
            icons: Vec::new(),
            markers: Vec::new(),
            html_children: Vec::new(),
        }
    }

    /// アイコンを登録（同じキーは1回だけ）
    pub fn add_icon(&mut self, icon: IconDefinition) {
        if !self.has_icon(&icon.key) {
            self.icons.push(icon);
        }
    }

    pub fn has_icon(&self, key: &str) -> bool {
        self.icons.iter().any(|i| i.key == key)
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// ルート直下にHTML断片をそのまま追加
    pub fn add_html(&mut self, html: impl Into<String>) {
        self.html_children.push(html.into());
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn icons(&self) -> &[IconDefinition] {
        &self.icons
    }

    /// HTML文字列に変換
    pub fn render(&self) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"utf-8\" />\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\" />\n", LEAFLET_CSS));
        html.push_str(&format!("<script src=\"{}\"></script>\n", LEAFLET_JS));
        html.push_str(
            "<style>\n\
             html, body {width: 100%; height: 100%; margin: 0; padding: 0;}\n\
             #map {position: absolute; top: 0; bottom: 0; right: 0; left: 0;}\n\
             </style>\n",
        );
        html.push_str("</head>\n<body>\n");
        html.push_str("<div id=\"map\"></div>\n");
        html.push_str("<script>\n");
        html.push_str(&self.map_script());
        html.push_str("</script>\n");

        for child in &self.html_children {
            html.push_str(child);
            if !child.ends_with('\n') {
                html.push('\n');
            }
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn map_script(&self) -> String {
        let mut js = String::new();

        js.push_str(&format!(
            "var map = L.map('map', {{center: [{}, {}], zoom: {}}});\n",
            self.center.0, self.center.1, self.zoom
        ));
        js.push_str(&format!(
            "L.tileLayer({}, {{attribution: {}, subdomains: {}, maxZoom: {}}}).addTo(map);\n",
            js_string(self.tiles.url()),
            js_string(self.tiles.attribution()),
            js_string(self.tiles.subdomains()),
            self.tiles.max_zoom()
        ));
        js.push_str("var markers = {};\n");

        for icon in &self.icons {
            js.push_str(&format!(
                "var {} = L.icon({{iconUrl: {}, iconSize: [{}, {}], iconAnchor: [{}, {}], popupAnchor: [{}, {}]}});\n",
                icon_var(&icon.key),
                js_string(&icon.url),
                icon.size.0,
                icon.size.1,
                icon.anchor.0,
                icon.anchor.1,
                icon.popup_anchor.0,
                icon.popup_anchor.1
            ));
        }

        for marker in &self.markers {
            js.push_str(&format!(
                "markers[{}] = L.marker([{}, {}], {{icon: {}}}).bindPopup({}, {{maxWidth: {}}}).addTo(map);\n",
                js_string(&marker.id),
                marker.place.latitude,
                marker.place.longitude,
                icon_var(&marker.icon_key),
                js_string(&marker.popup_html),
                self.popup_max_width
            ));
        }

        js
    }
}

/// アイコンキーをJS識別子に変換
fn icon_var(key: &str) -> String {
    let ident: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("icon_{}", ident)
}
