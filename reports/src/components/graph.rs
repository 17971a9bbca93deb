//! Graph visualization container component
//!
//! The layout engine (vis-network) draws into `#network`. Every themed
//! surface and every node's detail panel is embedded as JSON so theme
//! switches and clicks resolve without a round trip.

use std::collections::BTreeMap;

use crate::components::icons::{ICON_GRAPH, Icon};
use crate::types::{DetailPanel, Theme, ThemedSurfaces};
use leptos::prelude::*;
use serde_json::{Map, Value, json};

/// Container for the relationship graph.
#[component]
pub fn GraphContainer(
    /// Surfaces per theme (empty before the first analysis)
    surfaces: Vec<ThemedSurfaces>,
    /// Detail panel per account id
    details: BTreeMap<String, DetailPanel>,
    /// Theme the page opens with
    theme: Theme,
) -> impl IntoView {
    if surfaces.is_empty() {
        return view! {
            <div class="panel graph-panel">
                <h3><Icon path=ICON_GRAPH class="icon-sm" />"Transaction Graph"</h3>
                <div class="graph-empty">
                    "Upload a transactions CSV to see the relationship graph."
                </div>
            </div>
        }
        .into_any();
    }

    let node_count = surfaces.first().map(|s| s.graph.nodes.len()).unwrap_or(0);
    let flagged = surfaces.first().map(|s| s.graph.flagged_count()).unwrap_or(0);
    let script_content = format!(
        "window.__RINGSCOPE = {};",
        script_json(&bootstrap_payload(&surfaces, &details, theme))
    );

    view! {
        <div class="panel graph-panel">
            <h3>
                <Icon path=ICON_GRAPH class="icon-sm" />
                "Transaction Graph"
                <span class="muted">{format!("{} accounts, {} flagged", node_count, flagged)}</span>
            </h3>
            <div id="network" data-theme=theme.as_str()></div>
            <script>{script_content}</script>
        </div>
    }
    .into_any()
}

/// Build the object read by `dashboard_bootstrap.js`.
fn bootstrap_payload(
    surfaces: &[ThemedSurfaces],
    details: &BTreeMap<String, DetailPanel>,
    theme: Theme,
) -> Value {
    let mut graphs = Map::new();
    let mut rings = Map::new();
    for surface in surfaces {
        let key = surface.theme.as_str().to_string();
        graphs.insert(
            key.clone(),
            serde_json::to_value(&surface.graph).unwrap_or(Value::Null),
        );
        rings.insert(
            key,
            serde_json::to_value(&surface.rings).unwrap_or(Value::Array(vec![])),
        );
    }

    json!({
        "theme": theme.as_str(),
        "graphs": graphs,
        "rings": rings,
        "details": serde_json::to_value(details).unwrap_or(Value::Null),
    })
}

/// Serialize for inline `<script>` use: `<`, `>` and `&` only occur inside
/// JSON strings, where their `\u` escapes are equivalent.
fn script_json(value: &Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_json_neutralizes_closing_tags() {
        let value = json!({ "id": "</script><b>&" });
        let out = script_json(&value);
        assert!(!out.contains("</script>"));
        let back: Value = serde_json::from_str(&out).expect("still valid JSON");
        assert_eq!(back["id"], "</script><b>&");
    }
}
