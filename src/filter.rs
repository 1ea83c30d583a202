use std::borrow::Cow;

use serde_json::{Map, Value};

/// Which attribute keys survive into DOT output for one kind of item.
///
/// `required` keys are part of the item's structure and are rendered
/// elsewhere (ids, endpoint references); `unsupported` keys are layout and
/// drawing metadata that never renders; `sentinels` suppress a key when its
/// value equals a placeholder the layout engine injected.
pub struct FilterRules {
    pub required: &'static [&'static str],
    pub unsupported: &'static [&'static str],
    pub sentinels: &'static [(&'static str, &'static str)],
}

pub const NODE_RULES: FilterRules = FilterRules {
    required: &["_gvid", "name"],
    unsupported: &["_draw_", "_ldraw_", "_gvid", "subgraphs", "edges", "nodes"],
    // `\N` means "no custom label": Graphviz's default-label placeholder.
    sentinels: &[("label", "\\N")],
};

pub const EDGE_RULES: FilterRules = FilterRules {
    required: &["_gvid", "tail", "head"],
    unsupported: &["_draw_", "_ldraw_", "_hdraw_", "_tdraw_", "_hldraw_", "_tldraw_", "_gvid"],
    sentinels: &[],
};

impl FilterRules {
    fn keeps(&self, key: &str, value: &Value) -> bool {
        let excluded = |set: &[&str]| set.iter().any(|k| *k == key);
        if excluded(self.required) || excluded(self.unsupported) {
            return false;
        }
        !self
            .sentinels
            .iter()
            .any(|(k, v)| *k == key && value.as_str() == Some(v))
    }
}

/// Render the filtered attributes as `[k1="v1",k2="v2"]`, preserving the
/// input document's key order. An empty result elides the brackets entirely.
pub fn attr_block(attrs: &Map<String, Value>, rules: &FilterRules) -> String {
    let rendered: Vec<String> = attrs
        .iter()
        .filter(|(key, value)| rules.keeps(key, value))
        .map(|(key, value)| format!("{key}=\"{}\"", value_text(value)))
        .collect();

    if rendered.is_empty() {
        String::new()
    } else {
        format!("[{}]", rendered.join(","))
    }
}

// Values are assumed to already be DOT-safe strings; no escaping is done.
// Non-string values (drawing ops aside, rare in practice) render as their
// compact JSON text.
fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}
