//! View-model types for the fraud-ring dashboard.
//!
//! These types describe what ends up on screen. They're designed to be:
//!
//! - **Serializable** - node/edge descriptions use the field names a
//!   vis-network `DataSet` expects, so the JSON can be handed to the layout
//!   engine unchanged
//! - **Theme-explicit** - every themed value is derived from a [`Theme`]
//!   passed in, never from ambient state
//! - **Clone-friendly** - components take owned copies
//!
//! # Example
//!
//! ```rust
//! use ringscope_report::types::{DetailPanel, Theme};
//!
//! let panel = DetailPanel::Clean { account_id: "ACC_7".into() };
//! assert!(panel.is_clean());
//! assert_eq!(Theme::default().toggled(), Theme::Light);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Theme
// ============================================================================

/// Two-valued display theme. `Dark` is the initial state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark palette (default)
    #[default]
    Dark,
    /// Light palette
    Light,
}

impl Theme {
    /// Both themes, dark first.
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Stable lowercase name, also the persisted preference value.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Node label color for this theme.
    pub fn label_color(self) -> &'static str {
        match self {
            Theme::Dark => "#ffffff",
            Theme::Light => "#000000",
        }
    }

    /// Ring card palette for this theme.
    pub fn card_style(self) -> CardStyle {
        match self {
            Theme::Dark => CardStyle {
                background: "#1f2937".into(),
                color: "#ffffff".into(),
                border: None,
            },
            Theme::Light => CardStyle {
                background: "#e5e7eb".into(),
                color: "#111".into(),
                border: Some("1px solid #ccc".into()),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names neither theme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseThemeError(pub String);

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme '{}' (expected 'dark' or 'light')", self.0)
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

// ============================================================================
// Visual graph (layout engine input)
// ============================================================================

/// Fill of accounts in the suspicious set.
pub const FLAGGED_FILL: &str = "#ef4444";
/// Outline of accounts in the suspicious set.
pub const FLAGGED_BORDER: &str = "#7f1d1d";
/// Fill of every other account.
pub const NORMAL_FILL: &str = "#3b82f6";
/// Outline of every other account.
pub const NORMAL_BORDER: &str = "#1e40af";

/// Fill/border color pair of a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeColor {
    /// Fill color
    pub background: String,
    /// Outline color
    pub border: String,
}

impl NodeColor {
    pub fn flagged() -> Self {
        Self {
            background: FLAGGED_FILL.into(),
            border: FLAGGED_BORDER.into(),
        }
    }

    pub fn normal() -> Self {
        Self {
            background: NORMAL_FILL.into(),
            border: NORMAL_BORDER.into(),
        }
    }

    /// The color pair is the only suspicion marker a styled node carries.
    pub fn is_flagged(&self) -> bool {
        self.background == FLAGGED_FILL && self.border == FLAGGED_BORDER
    }
}

/// Label font of a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFont {
    /// Font size in pixels
    pub size: u32,
    /// Label color (theme-dependent)
    pub color: String,
    /// Font family
    pub face: String,
    /// Horizontal alignment
    pub align: String,
}

/// One account as the layout engine should draw it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyledNode {
    /// Account id (also the selection key)
    pub id: String,
    /// Text drawn inside the node
    pub label: String,
    /// Node shape
    pub shape: String,
    /// Node size
    pub size: u32,
    /// Label font
    pub font: NodeFont,
    /// Outline width
    #[serde(rename = "borderWidth")]
    pub border_width: u32,
    /// Fill/border pair
    pub color: NodeColor,
}

impl StyledNode {
    pub fn is_flagged(&self) -> bool {
        self.color.is_flagged()
    }
}

/// Arrow head toggle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowHead {
    /// Whether the arrow head is drawn
    pub enabled: bool,
}

/// Arrow configuration of an edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeArrows {
    /// Arrow head at the target end
    pub to: ArrowHead,
}

/// Curve smoothing of an edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSmooth {
    /// Smoothing type, e.g. `dynamic`
    #[serde(rename = "type")]
    pub kind: String,
}

/// One directed relationship as the layout engine should draw it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyledEdge {
    /// Source account id
    pub from: String,
    /// Target account id
    pub to: String,
    /// Arrow configuration
    pub arrows: EdgeArrows,
    /// Stroke width
    pub width: f32,
    /// Stroke color
    pub color: String,
    /// Curve smoothing
    pub smooth: EdgeSmooth,
}

/// Physics settings forwarded to the layout engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicsOptions {
    /// Force-directed placement on/off
    pub enabled: bool,
    /// Solver name
    pub solver: String,
}

/// Interaction settings forwarded to the layout engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionOptions {
    /// Highlight nodes on hover
    pub hover: bool,
    /// Highlight connected edges on hover
    #[serde(rename = "hoverConnectedEdges")]
    pub hover_connected_edges: bool,
}

/// Engine options that travel with a [`VisualGraph`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Physics configuration
    pub physics: PhysicsOptions,
    /// Interaction configuration
    pub interaction: InteractionOptions,
}

/// Complete styled graph description for one theme.
///
/// Positions are never part of it; placement is the layout engine's job.
///
/// # Example
///
/// ```rust
/// use ringscope_report::types::{Theme, VisualGraph};
///
/// let graph = VisualGraph::empty(Theme::Dark);
/// let dot = graph.to_dot();
/// assert!(dot.starts_with("digraph ringscope"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualGraph {
    /// Theme the description was built for
    pub theme: Theme,
    /// Styled nodes, in payload order
    pub nodes: Vec<StyledNode>,
    /// Styled edges, in payload order
    pub edges: Vec<StyledEdge>,
    /// Layout engine options
    pub options: LayoutOptions,
}

impl VisualGraph {
    /// A graph with no nodes or edges and default engine options.
    pub fn empty(theme: Theme) -> Self {
        Self {
            theme,
            nodes: Vec::new(),
            edges: Vec::new(),
            options: LayoutOptions {
                physics: PhysicsOptions {
                    enabled: true,
                    solver: "forceAtlas2Based".into(),
                },
                interaction: InteractionOptions {
                    hover: true,
                    hover_connected_edges: true,
                },
            },
        }
    }

    /// Look up a styled node by account id.
    pub fn node(&self, id: &str) -> Option<&StyledNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Number of flagged nodes.
    pub fn flagged_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_flagged()).count()
    }

    /// Convert to DOT for graphviz, using the graph's own colors.
    ///
    /// Dark graphs get a dark background so the white labels stay readable.
    pub fn to_dot(&self) -> String {
        let mut dot = String::with_capacity(self.nodes.len() * 120 + self.edges.len() * 60);

        dot.push_str("digraph ringscope {\n");
        match self.theme {
            Theme::Dark => dot.push_str(
                "  graph [layout=neato, overlap=false, splines=true, bgcolor=\"#0f1115\"];\n",
            ),
            Theme::Light => {
                dot.push_str("  graph [layout=neato, overlap=false, splines=true];\n")
            }
        }
        dot.push_str("  node [shape=circle, style=filled, fixedsize=true, width=0.8];\n");
        dot.push_str("  edge [arrowsize=0.7];\n\n");

        for node in &self.nodes {
            dot.push_str(&format!(
                "  \"{}\" [label=\"{}\", fillcolor=\"{}\", color=\"{}\", fontcolor=\"{}\", fontname=\"{}\", fontsize={}, penwidth={}];\n",
                escape_dot_string(&node.id),
                escape_dot_string(&node.label),
                node.color.background,
                node.color.border,
                node.font.color,
                escape_dot_string(&node.font.face),
                node.font.size,
                node.border_width,
            ));
        }

        if !self.edges.is_empty() {
            dot.push('\n');
        }
        for edge in &self.edges {
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\" [color=\"{}\", penwidth={}];\n",
                escape_dot_string(&edge.from),
                escape_dot_string(&edge.to),
                edge.color,
                edge.width,
            ));
        }

        dot.push_str("}\n");
        dot
    }
}

/// Escape special characters for DOT string literals.
fn escape_dot_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

// ============================================================================
// Ring list
// ============================================================================

/// Palette of a ring card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStyle {
    /// Card background
    pub background: String,
    /// Text color
    pub color: String,
    /// Optional CSS border shorthand
    pub border: Option<String>,
}

impl CardStyle {
    /// Inline CSS for the card element.
    pub fn css(&self) -> String {
        let mut css = format!(
            "margin-bottom:12px;padding:8px;border-radius:6px;background:{};color:{};",
            self.background, self.color
        );
        if let Some(border) = &self.border {
            css.push_str(&format!("border:{};", border));
        }
        css
    }
}

/// One fraud ring, ready for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingCard {
    /// Ring identifier
    pub ring_id: String,
    /// Pattern type, upper-cased
    pub pattern_label: String,
    /// Risk score as given by the analysis
    pub risk_score: f64,
    /// Members joined in traversal order: `A → B → C`
    pub members_path: String,
    /// Number of member accounts
    pub member_count: usize,
    /// Theme palette
    pub style: CardStyle,
}

impl RingCard {
    /// `Risk: <score>` line.
    pub fn risk_label(&self) -> String {
        format!("Risk: {}", self.risk_score)
    }
}

// ============================================================================
// Detail panel
// ============================================================================

/// Marker shown for accounts outside the suspicious set.
pub const CLEAN_MARKER: &str = "Clean Account";

/// Content of the single account detail panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailPanel {
    /// Account found in the suspicious set
    Flagged {
        /// Selected account
        account_id: String,
        /// Suspicion score as given
        suspicion_score: f64,
        /// Ring the account belongs to
        ring_id: String,
        /// Detected patterns, already joined for display
        patterns: String,
    },
    /// Account not in the suspicious set
    Clean {
        /// Selected account
        account_id: String,
    },
}

impl DetailPanel {
    /// The selected account id.
    pub fn account_id(&self) -> &str {
        match self {
            DetailPanel::Flagged { account_id, .. } | DetailPanel::Clean { account_id } => {
                account_id
            }
        }
    }

    /// True for the clean fallback.
    pub fn is_clean(&self) -> bool {
        matches!(self, DetailPanel::Clean { .. })
    }

    /// Lines after the account id heading.
    pub fn body_lines(&self) -> Vec<String> {
        match self {
            DetailPanel::Flagged {
                suspicion_score,
                ring_id,
                patterns,
                ..
            } => vec![
                format!("Suspicion Score: {}", suspicion_score),
                format!("Ring: {}", ring_id),
                format!("Patterns: {}", patterns),
            ],
            DetailPanel::Clean { .. } => vec![CLEAN_MARKER.to_string()],
        }
    }
}

// ============================================================================
// Summary counters and notices
// ============================================================================

/// Counters shown above the graph, taken verbatim from the analysis.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryCounters {
    /// Accounts in the analyzed graph
    pub total_accounts_analyzed: u64,
    /// Accounts flagged as suspicious
    pub suspicious_accounts_flagged: u64,
    /// Fraud rings detected
    pub fraud_rings_detected: u64,
    /// Server-side processing time
    pub processing_time_seconds: f64,
}

/// Kind of a user-visible error notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// The upload request failed
    Transport,
    /// The response could not be decoded
    MalformedPayload,
    /// The layout engine rejected the graph
    Render,
}

/// Error state shown instead of a stuck loading indicator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorNotice {
    /// What failed
    pub kind: NoticeKind,
    /// Human-readable detail
    pub message: String,
    /// Whether retrying makes sense
    pub retryable: bool,
}

impl ErrorNotice {
    /// Short heading for the notice.
    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Transport => "Upload failed",
            NoticeKind::MalformedPayload => "Unreadable analysis response",
            NoticeKind::Render => "Graph could not be drawn",
        }
    }
}

// ============================================================================
// Static dashboard (SSR input)
// ============================================================================

/// Graph and ring list rendered for one theme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemedSurfaces {
    /// Theme of both surfaces
    pub theme: Theme,
    /// Graph description
    pub graph: VisualGraph,
    /// Ring cards
    pub rings: Vec<RingCard>,
}

/// Everything [`crate::render_dashboard`] needs to produce a self-contained page.
///
/// `surfaces` normally holds one entry per theme so the page can switch
/// themes without a round trip; `details` holds the detail panel of every
/// node so clicks resolve client-side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticDashboard {
    /// Theme the page opens with
    pub theme: Theme,
    /// Label next to the file chooser
    pub file_label: String,
    /// Counters, absent before the first analysis
    pub counters: Option<SummaryCounters>,
    /// Pre-rendered surfaces, one per theme
    pub surfaces: Vec<ThemedSurfaces>,
    /// Detail panel per account id
    pub details: BTreeMap<String, DetailPanel>,
    /// Panel shown on load (last selection)
    pub selected: Option<DetailPanel>,
    /// Pending error notice
    pub notice: Option<ErrorNotice>,
    /// Target of the upload form
    pub upload_url: String,
    /// Target of the download button
    pub download_url: String,
}

impl StaticDashboard {
    /// Surfaces for `theme`, if rendered.
    pub fn surfaces_for(&self, theme: Theme) -> Option<&ThemedSurfaces> {
        self.surfaces.iter().find(|s| s.theme == theme)
    }
}
