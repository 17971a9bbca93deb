//! # ringscope
//!
//! **Fraud-ring dashboards** - turn the output of a transaction-graph fraud
//! analysis into an interactive view: a styled relationship graph, a list of
//! fraud rings, per-account details, all kept on one theme.
//!
//! ## Features
//!
//! - **Node classification** - accounts flagged by the analysis render red, the rest blue
//! - **Ring summaries** - pattern, risk and member path of every detected ring
//! - **Detail panel** - suspicion score, ring and patterns of the selected account
//! - **Theme sync** - dark/light persisted, graph and ring list rebuilt together
//! - **Stale-safe uploads** - every upload is sequenced; late responses are dropped
//! - **HTML export** - self-contained dashboard pages via `ringscope-report`
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust
//! use ringscope::dashboard::{Dashboard, DashboardOptions};
//! use ringscope::layout::HeadlessSurface;
//! use ringscope::theme::MemoryPreferences;
//! use ringscope::types::AnalysisResult;
//!
//! let payload = r#"{
//!   "analysis": {
//!     "suspicious_accounts": [{"account_id": "B", "suspicion_score": 0.9, "ring_id": "R1", "detected_patterns": ["fan-out"]}],
//!     "fraud_rings": [{"ring_id": "R1", "pattern_type": "layering", "risk_score": 0.8, "member_accounts": ["B"]}],
//!     "summary": {"total_accounts_analyzed": 3, "suspicious_accounts_flagged": 1, "fraud_rings_detected": 1, "processing_time_seconds": 0.01}
//!   },
//!   "graph": {"nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}], "edges": [{"from": "A", "to": "B"}, {"from": "B", "to": "C"}]}
//! }"#;
//!
//! let mut dashboard = Dashboard::new(
//!     HeadlessSurface::new(),
//!     Box::new(MemoryPreferences::new()),
//!     DashboardOptions::default(),
//! );
//! dashboard.load(AnalysisResult::from_json(payload)?)?;
//!
//! let panel = dashboard.select(&["B".to_string()]).cloned().unwrap();
//! assert_eq!(panel.body_lines()[0], "Suspicion Score: 0.9");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! ringscope upload transactions.csv --out dashboard.html
//! ringscope render analysis.json --format dot > graph.dot
//! ringscope inspect analysis.json ACC_00123
//! ringscope rings analysis.json
//! ringscope check analysis.json
//! ringscope theme toggle
//! ringscope download
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Payload data model and decoding.
pub mod types;

/// Typed errors.
pub mod error;

/// Single-slot analysis store.
pub mod store;

/// Suspicious-set membership.
pub mod classifier;

/// Styled graph rendering.
pub mod graph;

/// Ring card rendering.
pub mod rings;

/// Node selection to detail panel.
pub mod selection;

/// Theme state and preference stores.
pub mod theme;

/// Layout engine seam and settle tickets.
pub mod layout;

/// View events, effects and the event bus.
pub mod events;

/// Dashboard application state.
pub mod dashboard;

/// Upload transport and orchestration.
pub mod upload;

/// Referential integrity diagnostics.
pub mod integrity;

/// `.ringscope/config.toml` loading.
pub mod config;

// ============================================================================
// Terminal
// ============================================================================

pub mod colors;

#[cfg(feature = "cli")]
pub mod progress;

#[cfg(feature = "cli")]
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use dashboard::{Dashboard, DashboardApp, DashboardOptions, DashboardView};
pub use error::{DashboardError, PayloadError, PreferenceError, RenderError, TransportError};
pub use events::{Effect, UploadOutcome, ViewEvent};
pub use layout::{HeadlessSurface, LayoutEngine};
pub use theme::{PreferenceStore, ThemeSynchronizer};
pub use types::AnalysisResult;

pub use ringscope_report::types::{DetailPanel, RingCard, Theme, VisualGraph};
