//! Widget placement: zone → section → area.

use scenepub_types::WidgetId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetAlignSystem {
    #[serde(default)]
    pub inner: WidgetZone,
    #[serde(default)]
    pub outer: WidgetZone,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetZone {
    #[serde(default)]
    pub left: WidgetSection,
    #[serde(default)]
    pub center: WidgetSection,
    #[serde(default)]
    pub right: WidgetSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetSection {
    #[serde(default)]
    pub top: WidgetArea,
    #[serde(default)]
    pub middle: WidgetArea,
    #[serde(default)]
    pub bottom: WidgetArea,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetArea {
    #[serde(default)]
    pub widget_ids: Vec<WidgetId>,
    #[serde(default)]
    pub align: WidgetAlignment,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetAlignment {
    #[default]
    Start,
    Centered,
    End,
}

impl WidgetAlignSystem {
    /// Publish form. Areas without widgets are dropped, and so is any section,
    /// zone or system left with nothing in it.
    pub fn to_json(&self) -> Option<JsonValue> {
        object([("inner", self.inner.to_json()), ("outer", self.outer.to_json())])
    }
}

impl WidgetZone {
    fn to_json(&self) -> Option<JsonValue> {
        object([
            ("left", self.left.to_json()),
            ("center", self.center.to_json()),
            ("right", self.right.to_json()),
        ])
    }
}

impl WidgetSection {
    fn to_json(&self) -> Option<JsonValue> {
        object([
            ("top", self.top.to_json()),
            ("middle", self.middle.to_json()),
            ("bottom", self.bottom.to_json()),
        ])
    }
}

impl WidgetArea {
    fn to_json(&self) -> Option<JsonValue> {
        if self.widget_ids.is_empty() {
            return None;
        }
        Some(json!({ "widgetIds": self.widget_ids, "align": self.align }))
    }
}

fn object<const N: usize>(entries: [(&str, Option<JsonValue>); N]) -> Option<JsonValue> {
    let map: Map<String, JsonValue> = entries
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
        .collect();
    (!map.is_empty()).then_some(JsonValue::Object(map))
}
