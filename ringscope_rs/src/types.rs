//! Analysis payload data model.
//!
//! Everything here mirrors what the upstream fraud-analysis service sends.
//! Nothing is validated on the way in: cross-references (suspicious account
//! -> node, ring member -> suspicious account) are assumed, and lookups that
//! miss degrade gracefully downstream. See [`crate::integrity`] for an
//! explicit diagnostic.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PayloadError;
use ringscope_report::types::SummaryCounters;

/// Account identifier, unique within one payload.
pub type AccountId = String;

/// One participant in the relationship graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountNode {
    pub id: AccountId,
    /// Display label; the id is shown when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl AccountNode {
    pub fn new(id: impl Into<AccountId>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// Directed relationship between two accounts. Parallel edges are allowed.
///
/// The service names the endpoints `from`/`to`; `source`/`target` are
/// accepted as well. Any other field lands in `attributes`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    #[serde(alias = "from")]
    pub source: AccountId,
    #[serde(alias = "to")]
    pub target: AccountId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl RelationshipEdge {
    pub fn new(source: impl Into<AccountId>, target: impl Into<AccountId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            attributes: Map::new(),
        }
    }
}

/// An account flagged by the upstream analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuspiciousAccount {
    pub account_id: AccountId,
    pub suspicion_score: f64,
    pub ring_id: String,
    pub detected_patterns: Vec<String>,
}

/// A group of suspicious accounts sharing a collusion pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FraudRing {
    pub ring_id: String,
    pub pattern_type: String,
    pub risk_score: f64,
    /// Members in traversal order.
    pub member_accounts: Vec<AccountId>,
}

/// Informational counters, trusted as given.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_accounts_analyzed: u64,
    pub suspicious_accounts_flagged: u64,
    pub fraud_rings_detected: u64,
    pub processing_time_seconds: f64,
}

impl From<&AnalysisSummary> for SummaryCounters {
    fn from(summary: &AnalysisSummary) -> Self {
        SummaryCounters {
            total_accounts_analyzed: summary.total_accounts_analyzed,
            suspicious_accounts_flagged: summary.suspicious_accounts_flagged,
            fraud_rings_detected: summary.fraud_rings_detected,
            processing_time_seconds: summary.processing_time_seconds,
        }
    }
}

/// Nodes and edges of the analyzed graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPayload {
    pub nodes: Vec<AccountNode>,
    pub edges: Vec<RelationshipEdge>,
}

/// The `analysis` half of an upload response (everything but the graph).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: AnalysisSummary,
    pub suspicious_accounts: Vec<SuspiciousAccount>,
    pub fraud_rings: Vec<FraudRing>,
}

/// Wire shape of the upload endpoint: `{ analysis, graph }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub analysis: AnalysisReport,
    pub graph: GraphPayload,
}

impl UploadResponse {
    /// Merge both halves into one aggregate.
    pub fn into_result(self) -> AnalysisResult {
        AnalysisResult {
            summary: self.analysis.summary,
            suspicious_accounts: self.analysis.suspicious_accounts,
            fraud_rings: self.analysis.fraud_rings,
            graph: self.graph,
        }
    }
}

/// Aggregate root: one complete analysis.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: AnalysisSummary,
    pub suspicious_accounts: Vec<SuspiciousAccount>,
    pub fraud_rings: Vec<FraudRing>,
    pub graph: GraphPayload,
}

impl AnalysisResult {
    /// Decode either the upload wire shape (`{analysis, graph}`) or a flat
    /// aggregate (as written by `ringscope render --format json`).
    pub fn from_json(body: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(body)?;
        if value.get("analysis").is_some() {
            let response: UploadResponse = serde_json::from_value(value)?;
            Ok(response.into_result())
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }

    /// First suspicious-account entry for `account_id`.
    pub fn suspicious_account(&self, account_id: &str) -> Option<&SuspiciousAccount> {
        self.suspicious_accounts
            .iter()
            .find(|a| a.account_id == account_id)
    }

    pub fn ring(&self, ring_id: &str) -> Option<&FraudRing> {
        self.fraud_rings.iter().find(|r| r.ring_id == ring_id)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const WIRE: &str = r##"{
        "analysis": {
            "suspicious_accounts": [
                {"account_id": "B", "suspicion_score": 90.0, "detected_patterns": ["cycle_length_3"], "ring_id": "RING_001"}
            ],
            "fraud_rings": [
                {"ring_id": "RING_001", "member_accounts": ["A", "B", "C"], "pattern_type": "cycle", "risk_score": 95.0}
            ],
            "summary": {
                "total_accounts_analyzed": 3,
                "suspicious_accounts_flagged": 1,
                "fraud_rings_detected": 1,
                "processing_time_seconds": 0.02
            }
        },
        "graph": {
            "nodes": [
                {"id": "A", "label": "A", "color": "#3498db"},
                {"id": "B", "label": "B", "color": "red"}
            ],
            "edges": [{"from": "A", "to": "B", "amount": 120.5}]
        }
    }"##;

    #[test]
    fn decodes_upload_wire_shape() {
        let result = AnalysisResult::from_json(WIRE).expect("decode");
        assert_eq!(result.summary.total_accounts_analyzed, 3);
        assert_eq!(result.graph.nodes.len(), 2);
        assert_eq!(result.graph.edges[0].source, "A");
        assert_eq!(result.graph.edges[0].target, "B");
        assert_eq!(result.graph.edges[0].attributes["amount"], 120.5);
        assert_eq!(result.fraud_rings[0].member_accounts, vec!["A", "B", "C"]);
    }

    #[test]
    fn decodes_flat_aggregate() {
        let flat = serde_json::to_string(&fixtures::sample_result()).expect("encode");
        let result = AnalysisResult::from_json(&flat).expect("decode");
        assert_eq!(result, fixtures::sample_result());
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let body = r#"{"analysis": {"suspicious_accounts": [], "fraud_rings": []}, "graph": {"nodes": [], "edges": []}}"#;
        let err = AnalysisResult::from_json(body).expect_err("summary missing");
        assert!(err.to_string().contains("malformed analysis payload"));
        assert!(AnalysisResult::from_json("<html>502</html>").is_err());
    }

    #[test]
    fn lookups_return_first_match() {
        let result = fixtures::sample_result();
        assert_eq!(result.suspicious_account("B").map(|a| a.suspicion_score), Some(0.9));
        assert!(result.suspicious_account("A").is_none());
        assert_eq!(result.ring("R1").map(|r| r.risk_score), Some(0.8));
        assert_eq!(result.graph.nodes[0].display_label(), "A");
    }
}
