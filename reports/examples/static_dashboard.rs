//! Dashboard page with a tiny hand-built graph.
//!
//! Run with: `cargo run --example static_dashboard`

use std::collections::BTreeMap;

use ringscope_report::{
    JsAssets, render_dashboard,
    types::{
        ArrowHead, DetailPanel, EdgeArrows, EdgeSmooth, NodeColor, NodeFont, RingCard,
        StaticDashboard, StyledEdge, StyledNode, SummaryCounters, Theme, ThemedSurfaces,
        VisualGraph,
    },
};

fn node(id: &str, flagged: bool, theme: Theme) -> StyledNode {
    StyledNode {
        id: id.into(),
        label: id.into(),
        shape: "circle".into(),
        size: 28,
        font: NodeFont {
            size: 12,
            color: theme.label_color().into(),
            face: "Segoe UI".into(),
            align: "center".into(),
        },
        border_width: 2,
        color: if flagged {
            NodeColor::flagged()
        } else {
            NodeColor::normal()
        },
    }
}

fn edge(from: &str, to: &str) -> StyledEdge {
    StyledEdge {
        from: from.into(),
        to: to.into(),
        arrows: EdgeArrows {
            to: ArrowHead { enabled: true },
        },
        width: 1.5,
        color: "#64748b".into(),
        smooth: EdgeSmooth {
            kind: "dynamic".into(),
        },
    }
}

fn main() {
    let surfaces = Theme::ALL
        .iter()
        .map(|&theme| {
            let mut graph = VisualGraph::empty(theme);
            graph.nodes = vec![node("A", false, theme), node("B", true, theme), node("C", false, theme)];
            graph.edges = vec![edge("A", "B"), edge("B", "C")];
            ThemedSurfaces {
                theme,
                graph,
                rings: vec![RingCard {
                    ring_id: "R1".into(),
                    pattern_label: "LAYERING".into(),
                    risk_score: 0.8,
                    members_path: "B".into(),
                    member_count: 1,
                    style: theme.card_style(),
                }],
            }
        })
        .collect();

    let mut details = BTreeMap::new();
    details.insert(
        "B".to_string(),
        DetailPanel::Flagged {
            account_id: "B".into(),
            suspicion_score: 0.9,
            ring_id: "R1".into(),
            patterns: "fan-out".into(),
        },
    );
    for id in ["A", "C"] {
        details.insert(id.to_string(), DetailPanel::Clean { account_id: id.into() });
    }

    let dashboard = StaticDashboard {
        theme: Theme::Dark,
        file_label: "transactions.csv".into(),
        counters: Some(SummaryCounters {
            total_accounts_analyzed: 3,
            suspicious_accounts_flagged: 1,
            fraud_rings_detected: 1,
            processing_time_seconds: 0.01,
        }),
        surfaces,
        details,
        upload_url: "/upload".into(),
        download_url: "/download".into(),
        ..Default::default()
    };

    let html = render_dashboard(&dashboard, &JsAssets::cdn());
    let output_path = "dashboard.html";
    std::fs::write(output_path, &html).expect("Failed to write dashboard");

    println!("Dashboard written to: {}", output_path);
    println!("Size: {} bytes", html.len());
}
