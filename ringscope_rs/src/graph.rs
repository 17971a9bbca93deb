//! Graph renderer: analysis result + theme -> styled [`VisualGraph`].
//!
//! Pure and idempotent. Fill/border colors depend only on the suspicion
//! flag, label color only on the theme, edge style on neither. No positions
//! are computed here; that belongs to the layout engine.

use ringscope_report::types::{
    ArrowHead, EdgeArrows, EdgeSmooth, NodeColor, NodeFont, StyledEdge, StyledNode, Theme,
    VisualGraph,
};
use tracing::debug;

use crate::classifier::{Classification, SuspicionIndex};
use crate::types::{AccountNode, AnalysisResult, RelationshipEdge};

pub const NODE_SHAPE: &str = "circle";
pub const NODE_SIZE: u32 = 28;
pub const NODE_BORDER_WIDTH: u32 = 2;
pub const LABEL_FONT_SIZE: u32 = 12;
pub const LABEL_FONT_FACE: &str = "Segoe UI";

pub const EDGE_WIDTH: f32 = 1.5;
pub const EDGE_COLOR: &str = "#64748b";
pub const EDGE_SMOOTHING: &str = "dynamic";

/// Build the styled description of `result` for `theme`.
pub fn render(result: &AnalysisResult, theme: Theme) -> VisualGraph {
    let index = SuspicionIndex::build(result);
    let mut graph = VisualGraph::empty(theme);

    graph.nodes = result
        .graph
        .nodes
        .iter()
        .map(|node| styled_node(node, index.classify(node), theme))
        .collect();
    graph.edges = result.graph.edges.iter().map(styled_edge).collect();

    debug!(
        theme = %theme,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        flagged = graph.flagged_count(),
        "rendered visual graph"
    );
    graph
}

fn styled_node(node: &AccountNode, class: Classification, theme: Theme) -> StyledNode {
    let color = if class.suspicious {
        NodeColor::flagged()
    } else {
        NodeColor::normal()
    };

    StyledNode {
        id: node.id.clone(),
        label: node.display_label().to_string(),
        shape: NODE_SHAPE.into(),
        size: NODE_SIZE,
        font: NodeFont {
            size: LABEL_FONT_SIZE,
            color: theme.label_color().into(),
            face: LABEL_FONT_FACE.into(),
            align: "center".into(),
        },
        border_width: NODE_BORDER_WIDTH,
        color,
    }
}

fn styled_edge(edge: &RelationshipEdge) -> StyledEdge {
    StyledEdge {
        from: edge.source.clone(),
        to: edge.target.clone(),
        arrows: EdgeArrows {
            to: ArrowHead { enabled: true },
        },
        width: EDGE_WIDTH,
        color: EDGE_COLOR.into(),
        smooth: EdgeSmooth {
            kind: EDGE_SMOOTHING.into(),
        },
    }
}
