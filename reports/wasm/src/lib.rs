//! Browser binding of the ringscope dashboard.
//!
//! JS owns the DOM and the vis-network instance; this module owns the state.
//! Every call takes one user action, runs it through the same
//! [`DashboardApp`] the CLI uses, and returns the resulting effects as JSON
//! (`start_upload`, `schedule_settle`, `navigate`). After any call the page
//! re-reads [`WasmDashboard::view`] and, when it changed, [`WasmDashboard::graph`].

use ringscope::dashboard::{Dashboard, DashboardApp, DashboardOptions};
use ringscope::error::{PreferenceError, RenderError, TransportError};
use ringscope::events::{Effect, UploadOutcome, ViewEvent};
use ringscope::layout::LayoutEngine;
use ringscope::theme::PreferenceStore;
use ringscope_report::types::VisualGraph;
use serde::Serialize;
use tracing::debug;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

// ============================================================================
// Browser seams
// ============================================================================

/// Preferences in `window.localStorage`. Looked up on every access; private
/// browsing or a sandboxed frame surfaces as [`PreferenceError::Unavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStoragePreferences;

impl LocalStoragePreferences {
    fn storage() -> Result<web_sys::Storage, PreferenceError> {
        let window =
            web_sys::window().ok_or_else(|| PreferenceError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|_| PreferenceError::Unavailable("localStorage access denied".into()))?
            .ok_or_else(|| PreferenceError::Unavailable("localStorage missing".into()))
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| PreferenceError::Unavailable(format!("cannot read {key}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| PreferenceError::Unavailable(format!("cannot write {key}")))
    }
}

/// What vis-network's `new vis.Network(el, data, options)` wants.
#[derive(Debug, Serialize)]
struct NetworkData<'a> {
    nodes: &'a [ringscope_report::types::StyledNode],
    edges: &'a [ringscope_report::types::StyledEdge],
    options: &'a ringscope_report::types::LayoutOptions,
}

/// Keeps the last accepted graph serialized for the page to hand to vis-network.
#[derive(Debug, Default)]
pub struct BrowserSurface {
    network_json: Option<String>,
    dot: Option<String>,
    active: bool,
}

impl BrowserSurface {
    pub fn network_json(&self) -> Option<&str> {
        self.network_json.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl LayoutEngine for BrowserSurface {
    fn display(&mut self, graph: &VisualGraph) -> Result<(), RenderError> {
        let data = NetworkData {
            nodes: &graph.nodes,
            edges: &graph.edges,
            options: &graph.options,
        };
        let json =
            serde_json::to_string(&data).map_err(|e| RenderError::Rejected(e.to_string()))?;
        self.network_json = Some(json);
        self.dot = Some(graph.to_dot());
        Ok(())
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

// ============================================================================
// WASM Exports
// ============================================================================

#[wasm_bindgen]
pub struct WasmDashboard {
    app: DashboardApp<BrowserSurface>,
}

#[wasm_bindgen]
impl WasmDashboard {
    /// Dashboard with localStorage preferences and the page's endpoints.
    #[wasm_bindgen(constructor)]
    pub fn new(upload_url: Option<String>, download_url: Option<String>) -> WasmDashboard {
        let defaults = DashboardOptions::default();
        let options = DashboardOptions {
            upload_url: upload_url.unwrap_or(defaults.upload_url),
            download_url: download_url.unwrap_or(defaults.download_url),
            ..defaults
        };
        Self::with_preferences(Box::new(LocalStoragePreferences), options)
    }

    /// File input changed.
    #[wasm_bindgen(js_name = chooseFile)]
    pub fn choose_file(&mut self, file_name: Option<String>) -> Result<String, JsValue> {
        self.dispatch(ViewEvent::FileChosen { file_name })
    }

    /// Form submitted; the effects carry the sequence number for `uploadFinished`.
    pub fn submit(&mut self) -> Result<String, JsValue> {
        self.dispatch(ViewEvent::Submit)
    }

    /// `fetch` resolved with a body.
    #[wasm_bindgen(js_name = uploadFinished)]
    pub fn upload_finished(&mut self, seq: u32, body: &str) -> Result<String, JsValue> {
        self.dispatch(ViewEvent::UploadFinished {
            seq: u64::from(seq),
            outcome: UploadOutcome::decode(body),
        })
    }

    /// `fetch` rejected or answered with an error status.
    #[wasm_bindgen(js_name = uploadFailed)]
    pub fn upload_failed(
        &mut self,
        seq: u32,
        status: Option<u16>,
        message: String,
    ) -> Result<String, JsValue> {
        let url = self.app.dashboard().options().upload_url.clone();
        let error = match status {
            Some(status) => TransportError::Status { url, status },
            None => TransportError::Request { url, message },
        };
        self.dispatch(ViewEvent::UploadFinished {
            seq: u64::from(seq),
            outcome: UploadOutcome::TransportError(error),
        })
    }

    /// vis-network `click` with `params.nodes`.
    #[wasm_bindgen(js_name = selectNodes)]
    pub fn select_nodes(&mut self, selected_node_ids: Vec<String>) -> Result<String, JsValue> {
        self.dispatch(ViewEvent::NodesSelected { selected_node_ids })
    }

    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&mut self) -> Result<String, JsValue> {
        self.dispatch(ViewEvent::ThemeToggled)
    }

    /// A `schedule_settle` timer fired.
    pub fn settle(&mut self, generation: u32) -> Result<String, JsValue> {
        self.dispatch(ViewEvent::SettleElapsed {
            generation: u64::from(generation),
        })
    }

    pub fn download(&mut self) -> Result<String, JsValue> {
        self.dispatch(ViewEvent::DownloadRequested)
    }

    /// Redraw the stored analysis after a render failure.
    #[wasm_bindgen(js_name = retryRender)]
    pub fn retry_render(&mut self) -> Result<String, JsValue> {
        let dashboard = self.app.dashboard_mut();
        dashboard.retry_render().map_err(to_js)?;
        effects_json(&dashboard.take_effects())
    }

    /// Current view state as JSON.
    pub fn view(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.app.dashboard().view()).map_err(to_js)
    }

    /// `{nodes, edges, options}` of the graph on screen, if any.
    pub fn graph(&self) -> Option<String> {
        self.app
            .dashboard()
            .surface()
            .network_json()
            .map(str::to_string)
    }

    /// DOT of the graph on screen, for the "export" menu.
    #[wasm_bindgen(js_name = toDot)]
    pub fn to_dot(&self) -> Option<String> {
        self.app.dashboard().surface().dot.clone()
    }
}

impl WasmDashboard {
    pub fn with_preferences(prefs: Box<dyn PreferenceStore>, options: DashboardOptions) -> Self {
        let dashboard = Dashboard::new(BrowserSurface::default(), prefs, options);
        Self {
            app: DashboardApp::new(dashboard),
        }
    }

    pub fn app(&self) -> &DashboardApp<BrowserSurface> {
        &self.app
    }

    fn dispatch(&mut self, event: ViewEvent) -> Result<String, JsValue> {
        let effects = self.app.dispatch(event).map_err(to_js)?;
        debug!(effects = effects.len(), "wasm dispatch");
        effects_json(&effects)
    }
}

fn effects_json(effects: &[Effect]) -> Result<String, JsValue> {
    serde_json::to_string(effects).map_err(to_js)
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringscope::theme::MemoryPreferences;
    use serde_json::Value;

    const PAYLOAD: &str = r#"{
        "analysis": {
            "suspicious_accounts": [{"account_id": "B", "suspicion_score": 0.9, "ring_id": "R1", "detected_patterns": ["fan-out"]}],
            "fraud_rings": [{"ring_id": "R1", "pattern_type": "layering", "risk_score": 0.8, "member_accounts": ["B"]}],
            "summary": {"total_accounts_analyzed": 3, "suspicious_accounts_flagged": 1, "fraud_rings_detected": 1, "processing_time_seconds": 0.01}
        },
        "graph": {"nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}], "edges": [{"from": "A", "to": "B"}, {"from": "B", "to": "C"}]}
    }"#;

    fn dashboard() -> WasmDashboard {
        WasmDashboard::with_preferences(
            Box::new(MemoryPreferences::new()),
            DashboardOptions::default(),
        )
    }

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).expect("valid json")
    }

    fn upload(d: &mut WasmDashboard) -> Value {
        let effects = parse(&d.submit().expect("submit"));
        assert_eq!(effects[0]["effect"], "start_upload");
        let seq = effects[0]["seq"].as_u64().expect("seq") as u32;
        parse(&d.upload_finished(seq, PAYLOAD).expect("finish"))
    }

    #[test]
    fn upload_flow_produces_settle_ticket_and_graph() {
        let mut d = dashboard();
        let effects = upload(&mut d);
        assert_eq!(effects[0]["effect"], "schedule_settle");
        assert_eq!(effects[0]["interval_ms"], 700);

        let graph = parse(&d.graph().expect("graph drawn"));
        assert_eq!(graph["nodes"].as_array().map(Vec::len), Some(3));
        assert_eq!(graph["edges"][0]["arrows"]["to"]["enabled"], true);
        assert_eq!(graph["options"]["physics"]["solver"], "forceAtlas2Based");
        assert!(d.to_dot().is_some_and(|dot| dot.contains("digraph ringscope")));

        let generation = effects[0]["generation"].as_u64().expect("generation") as u32;
        d.settle(generation).expect("settle");
        let view = parse(&d.view().expect("view"));
        assert_eq!(view["loading"], false);
        assert_eq!(view["surface_active"], true);
        assert!(d.app().dashboard().surface().is_active());
    }

    #[test]
    fn node_click_fills_detail_panel() {
        let mut d = dashboard();
        upload(&mut d);
        d.select_nodes(vec!["B".into()]).expect("select");
        let view = parse(&d.view().expect("view"));
        assert_eq!(view["detail"]["kind"], "flagged");
        assert_eq!(view["detail"]["patterns"], "fan-out");

        d.select_nodes(vec![]).expect("empty click");
        let view = parse(&d.view().expect("view"));
        assert_eq!(view["detail"]["account_id"], "B");
    }

    #[test]
    fn theme_toggle_redraws_with_light_labels() {
        let mut d = dashboard();
        upload(&mut d);
        d.toggle_theme().expect("toggle");
        let graph = parse(&d.graph().expect("graph"));
        assert_eq!(graph["nodes"][0]["font"]["color"], "#000000");
        let view = parse(&d.view().expect("view"));
        assert_eq!(view["theme"], "light");
        assert_eq!(view["rings"][0]["style"]["background"], "#e5e7eb");
    }

    #[test]
    fn failed_fetch_hides_loader() {
        let mut d = dashboard();
        d.submit().expect("submit");
        d.upload_failed(1, Some(502), "Bad Gateway".into())
            .expect("handled");
        let view = parse(&d.view().expect("view"));
        assert_eq!(view["loading"], false);
        assert_eq!(view["notice"]["kind"], "transport");
        assert_eq!(view["notice"]["retryable"], true);
    }

    #[test]
    fn download_navigates_to_endpoint() {
        let mut d = dashboard();
        let effects = parse(&d.download().expect("download"));
        assert_eq!(effects[0]["effect"], "navigate");
        assert_eq!(effects[0]["url"], "/download");
    }
}
