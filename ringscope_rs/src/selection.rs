//! Selection controller: selected node id -> detail panel.
//!
//! A miss is never an error; any id outside the suspicious set (including
//! ids the graph does not even contain) gets the clean panel.

use std::collections::{BTreeMap, HashMap};

use ringscope_report::types::DetailPanel;

use crate::types::{AccountId, AnalysisResult, SuspiciousAccount};

/// Joins detected patterns in the panel.
pub const PATTERN_SEPARATOR: &str = ", ";

/// Detail panel for `node_id`.
pub fn on_select(result: &AnalysisResult, node_id: &str) -> DetailPanel {
    panel_for(node_id, result.suspicious_account(node_id))
}

/// The id a selection event acts on: the first one, if any.
pub fn primary_selection(selected_node_ids: &[AccountId]) -> Option<&str> {
    selected_node_ids.first().map(String::as_str)
}

/// Panels for every node in the graph, keyed by id.
///
/// Same result as calling [`on_select`] per node, with one pass over the
/// suspicious accounts instead of one per node.
pub fn detail_index(result: &AnalysisResult) -> BTreeMap<String, DetailPanel> {
    let mut by_id: HashMap<&str, &SuspiciousAccount> = HashMap::new();
    for account in &result.suspicious_accounts {
        by_id.entry(account.account_id.as_str()).or_insert(account);
    }

    result
        .graph
        .nodes
        .iter()
        .map(|node| {
            let panel = panel_for(&node.id, by_id.get(node.id.as_str()).copied());
            (node.id.clone(), panel)
        })
        .collect()
}

fn panel_for(node_id: &str, account: Option<&SuspiciousAccount>) -> DetailPanel {
    match account {
        Some(account) => DetailPanel::Flagged {
            account_id: node_id.to_string(),
            suspicion_score: account.suspicion_score,
            ring_id: account.ring_id.clone(),
            patterns: account.detected_patterns.join(PATTERN_SEPARATOR),
        },
        None => DetailPanel::Clean {
            account_id: node_id.to_string(),
        },
    }
}
