//! Root document component - the complete HTML page
//!
//! Header with theme toggle, upload form, counters, then the graph next to
//! the detail panel and ring list.

use super::{
    DetailPanelView, GraphContainer, ICON_FOLDER, ICON_GRAPH, ICON_MOON, ICON_SUN, Icon,
    NoticeBanner, RingList, SummaryPanel,
};
use crate::JsAssets;
use crate::styles::{CSP, DASHBOARD_CSS};
use crate::types::{StaticDashboard, Theme};
use leptos::prelude::*;

/// The complete HTML document for the dashboard
#[component]
pub fn DashboardDocument(dashboard: StaticDashboard, js_assets: JsAssets) -> impl IntoView {
    let StaticDashboard {
        theme,
        file_label,
        counters,
        surfaces,
        details,
        selected,
        notice,
        upload_url,
        download_url,
    } = dashboard;

    let body_class = match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };
    let hero_class = if counters.is_some() {
        "hero-text hidden"
    } else {
        "hero-text"
    };
    let rings = surfaces
        .iter()
        .find(|s| s.theme == theme)
        .map(|s| s.rings.clone())
        .unwrap_or_default();

    view! {
        <html>
            <head>
                <meta charset="UTF-8" />
                <meta http-equiv="Content-Security-Policy" content=CSP />
                <title>"Ringscope - Fraud Ring Dashboard"</title>
                <style>{DASHBOARD_CSS}</style>
            </head>
            <body class=body_class>
                <header class="app-header">
                    <div class="app-title">
                        <Icon path=ICON_GRAPH />
                        "Ringscope"
                    </div>
                    <button class="theme-toggle" id="themeToggle" data-role="theme-toggle" title="Toggle light/dark mode">
                        <span class="theme-icon-light"><Icon path=ICON_SUN size="18" /></span>
                        <span class="theme-icon-dark"><Icon path=ICON_MOON size="18" /></span>
                    </button>
                </header>

                <UploadForm file_label=file_label upload_url=upload_url download_url=download_url />

                {notice.map(|notice| view! { <NoticeBanner notice=notice /> })}

                <div class=hero_class>
                    <h1>"Follow the money"</h1>
                    <p>"Upload a transactions CSV to map accounts, flag suspicious activity and surface fraud rings."</p>
                </div>

                <SummaryPanel counters=counters />

                <div class="workspace">
                    <GraphContainer surfaces=surfaces details=details theme=theme />
                    <aside>
                        <DetailPanelView panel=selected />
                        <RingList cards=rings />
                    </aside>
                </div>

                <div class="loader" id="loader">
                    <span>"Analyzing transactions..."</span>
                </div>

                <DashboardScripts js_assets=js_assets />
            </body>
        </html>
    }
}

/// File chooser, submit and download actions.
#[component]
pub fn UploadForm(file_label: String, upload_url: String, download_url: String) -> impl IntoView {
    view! {
        <form id="uploadForm" class="upload-form" action=upload_url method="post" enctype="multipart/form-data">
            <label class="file-label">
                <Icon path=ICON_FOLDER size="16" />
                <span id="fileName">{file_label}</span>
                <input type="file" id="fileInput" name="file" accept=".csv" />
            </label>
            <button class="btn" type="submit">"Analyze"</button>
            <button class="btn" type="button" id="downloadBtn" data-href=download_url>
                "Download results"
            </button>
        </form>
    }
}

/// Layout engine and page scripts
#[component]
fn DashboardScripts(js_assets: JsAssets) -> impl IntoView {
    let has_engine = !js_assets.vis_network_path.is_empty();

    view! {
        // Engine first; the bootstrap falls back to a static message without it
        {has_engine.then(|| view! {
            <script src=js_assets.vis_network_path.clone()></script>
        })}
        <script>{include_str!("../../dashboard_bootstrap.js")}</script>
    }
}
