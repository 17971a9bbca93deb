//! # ringscope-report
//!
//! Leptos SSR renderer for fraud-ring dashboards.
//!
//! This crate owns the view model of the dashboard (styled graph
//! descriptions, ring cards, detail panels, counters) and turns a
//! [`types::StaticDashboard`] into a self-contained HTML page using
//! [Leptos](https://leptos.dev/) server-side rendering.
//!
//! ## Features
//!
//! - **Layout-engine ready** - [`types::VisualGraph`] serializes to the
//!   node/edge shape vis-network consumes, and to DOT for graphviz
//! - **Both themes embedded** - the page switches dark/light client-side
//!   using surfaces pre-rendered by the engine
//! - **Type-Safe** - Full Rust type safety from data to HTML
//!
//! ## Quick Start
//!
//! ```rust
//! use ringscope_report::{render_dashboard, JsAssets, types::StaticDashboard};
//!
//! let dashboard = StaticDashboard {
//!     file_label: "Choose CSV File".into(),
//!     ..Default::default()
//! };
//!
//! let html = render_dashboard(&dashboard, &JsAssets::default());
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - View-model types shared with the engine and the WASM binding
//! - [`components`] - Leptos UI components
//! - [`styles`] - CSS constants

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod components;
pub mod styles;
pub mod types;

use components::DashboardDocument;
use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;
use types::StaticDashboard;

/// Default CDN location of the vis-network standalone bundle.
pub const VIS_NETWORK_CDN: &str =
    "https://unpkg.com/vis-network@9/standalone/umd/vis-network.min.js";

/// Render a complete HTML dashboard page.
///
/// # Arguments
///
/// * `dashboard` - Pre-rendered dashboard content
/// * `js_assets` - Location of the layout engine script
///
/// # Returns
///
/// A complete HTML document as a `String`, including `<!DOCTYPE html>`.
pub fn render_dashboard(dashboard: &StaticDashboard, js_assets: &JsAssets) -> String {
    let doc = view! {
        <DashboardDocument dashboard=dashboard.clone() js_assets=js_assets.clone() />
    };

    let html = doc.to_html();

    // Leptos doesn't include DOCTYPE, so we add it
    format!("<!DOCTYPE html>\n{}", html)
}

/// JavaScript asset paths for graph visualization.
///
/// The dashboard uses [vis-network](https://visjs.github.io/vis-network/) as
/// its force-directed layout engine. The path may be a CDN URL, a local
/// bundled file, or empty (the graph area then shows a placeholder message).
///
/// # Example
///
/// ```rust
/// use ringscope_report::{JsAssets, VIS_NETWORK_CDN};
///
/// let assets = JsAssets { vis_network_path: VIS_NETWORK_CDN.into() };
/// let offline = JsAssets::default();
/// assert!(offline.vis_network_path.is_empty());
/// # let _ = assets;
/// ```
#[derive(Clone, Default, Debug)]
pub struct JsAssets {
    /// Path to vis-network.min.js
    pub vis_network_path: String,
}

impl JsAssets {
    /// Assets pointing at the public CDN.
    pub fn cdn() -> Self {
        Self {
            vis_network_path: VIS_NETWORK_CDN.into(),
        }
    }
}
