//! Mapa Common Library
//!
//! 地点データの型、座標正規化、アイコン対応表、地図HTMLの生成

pub mod types;
pub mod error;
pub mod fields;
pub mod normalizer;
pub mod icons;
pub mod html;
pub mod sidebar;
pub mod document;

pub use types::{Marker, PlaceRecord, RawRow, RawTable, SidebarEntry};
pub use error::{Error, Result};
pub use fields::FieldMapping;
pub use normalizer::{map_center, normalize_decimal, normalize_table};
pub use icons::{IconTable, DEFAULT_ICON_PATH};
pub use html::{escape_html, js_string, popup_html, Labels};
pub use sidebar::{generate_sidebar, SidebarOptions};
pub use document::{IconDefinition, MapDocument, TileTheme};
