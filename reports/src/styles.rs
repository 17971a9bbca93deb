//! CSS styles for the dashboard page.
//!
//! Dark is the default palette; `body.light` switches every surface to the
//! light palette. Ring cards and graph nodes carry their own inline colors
//! (they are re-rendered per theme), so this sheet only covers the chrome.
//!
//! # Customization
//!
//! ```rust
//! use ringscope_report::styles::DASHBOARD_CSS;
//!
//! let my_css = ".ring-card { font-size: 14px; }";
//! let combined = format!("{}\n{}", DASHBOARD_CSS, my_css);
//! ```

/// Complete CSS for the dashboard.
pub const DASHBOARD_CSS: &str = r#"
:root {
    --bg: #0b1120;
    --bg-panel: #111827;
    --text: #e5e7eb;
    --text-dim: #9ca3af;
    --border: rgba(148, 163, 184, 0.2);
    --accent: #3b82f6;
    --danger: #ef4444;
    --font: 'Segoe UI', system-ui, sans-serif;
}

body.light {
    --bg: #f3f4f6;
    --bg-panel: #ffffff;
    --text: #111827;
    --text-dim: #4b5563;
    --border: rgba(17, 24, 39, 0.15);
}

*, *::before, *::after {
    box-sizing: border-box;
}

body {
    font-family: var(--font);
    background: var(--bg);
    color: var(--text);
    margin: 0;
    min-height: 100vh;
    line-height: 1.5;
}

.app-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 16px 24px;
    border-bottom: 1px solid var(--border);
}

.app-title {
    font-size: 20px;
    font-weight: 600;
    display: flex;
    gap: 8px;
    align-items: center;
}

.theme-toggle {
    background: transparent;
    border: 1px solid var(--border);
    color: var(--text);
    border-radius: 999px;
    padding: 6px 10px;
    cursor: pointer;
}

body.light .theme-icon-dark,
body:not(.light) .theme-icon-light {
    display: none;
}

.upload-form {
    display: flex;
    gap: 12px;
    align-items: center;
    padding: 16px 24px;
}

.file-label {
    display: inline-flex;
    gap: 6px;
    align-items: center;
    padding: 8px 14px;
    border: 1px dashed var(--border);
    border-radius: 6px;
    cursor: pointer;
}

.file-label input {
    display: none;
}

.btn {
    background: var(--accent);
    color: #ffffff;
    border: none;
    border-radius: 6px;
    padding: 8px 16px;
    cursor: pointer;
}

.hero-text {
    padding: 48px 24px;
    text-align: center;
    color: var(--text-dim);
}

.hero-text.hidden {
    display: none;
}

.summary-grid {
    display: grid;
    grid-template-columns: repeat(4, minmax(0, 1fr));
    gap: 12px;
    padding: 0 24px;
}

.counter {
    background: var(--bg-panel);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 12px 16px;
}

.counter-value {
    font-size: 24px;
    font-weight: 600;
}

.counter-label {
    color: var(--text-dim);
    font-size: 12px;
    text-transform: uppercase;
}

.workspace {
    display: grid;
    grid-template-columns: minmax(0, 3fr) minmax(260px, 1fr);
    gap: 16px;
    padding: 16px 24px;
}

.panel {
    background: var(--bg-panel);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 16px;
}

.panel h3 {
    margin: 0 0 12px 0;
    display: flex;
    gap: 8px;
    align-items: center;
    font-size: 15px;
}

#network {
    height: 560px;
    opacity: 0.2;
    transition: opacity 0.4s ease;
}

#network.active {
    opacity: 1;
}

.graph-empty,
.muted {
    color: var(--text-dim);
    font-size: 13px;
}

.detail-panel strong {
    display: block;
    margin-bottom: 4px;
}

.detail-clean {
    color: #059669;
}

.ring-members {
    font-family: 'JetBrains Mono', monospace;
    font-size: 12px;
    word-break: break-all;
}

.notice {
    margin: 16px 24px 0 24px;
    padding: 12px 16px;
    border-radius: 8px;
    border: 1px solid var(--danger);
    color: var(--danger);
}

.loader {
    position: fixed;
    inset: 0;
    display: none;
    align-items: center;
    justify-content: center;
    background: rgba(0, 0, 0, 0.6);
}

.loader.active {
    display: flex;
}

@media (max-width: 900px) {
    .summary-grid {
        grid-template-columns: repeat(2, minmax(0, 1fr));
    }
    .workspace {
        grid-template-columns: 1fr;
    }
}
"#;

/// Content-Security-Policy for the dashboard page.
///
/// Scripts may come from the page itself or unpkg (vis-network); the upload
/// form posts back to the serving origin.
pub const CSP: &str = "default-src 'self'; img-src 'self' data:; style-src 'self' 'unsafe-inline'; script-src 'self' 'unsafe-inline' https://unpkg.com; connect-src 'self'; form-action 'self';";
