//! Referential integrity diagnostics for analysis payloads.
//!
//! The dashboard never validates what it stores; a dangling reference just
//! degrades to a clean panel or an unflagged node. This module makes those
//! gaps visible on demand (`ringscope check`).

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::types::AnalysisResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum Violation {
    /// A suspicious account names a node the graph does not have.
    UnknownSuspiciousAccount { account_id: String },
    /// A ring lists a member with no suspicious entry for that ring.
    RingMemberNotSuspicious { ring_id: String, account_id: String },
    /// A suspicious account points at a ring that does not exist.
    UnknownRing { account_id: String, ring_id: String },
    DuplicateRingId { ring_id: String },
    DuplicateNode { account_id: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnknownSuspiciousAccount { account_id } => {
                write!(f, "suspicious account {account_id} is not a graph node")
            }
            Violation::RingMemberNotSuspicious {
                ring_id,
                account_id,
            } => write!(
                f,
                "ring {ring_id} lists {account_id}, which is not flagged for that ring"
            ),
            Violation::UnknownRing {
                account_id,
                ring_id,
            } => write!(f, "{account_id} references unknown ring {ring_id}"),
            Violation::DuplicateRingId { ring_id } => write!(f, "ring id {ring_id} is repeated"),
            Violation::DuplicateNode { account_id } => {
                write!(f, "node {account_id} appears more than once")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub violations: Vec<Violation>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Every broken cross-reference in `result`, in payload order.
pub fn check(result: &AnalysisResult) -> IntegrityReport {
    let mut violations = Vec::new();

    let mut nodes = HashSet::new();
    for node in &result.graph.nodes {
        if !nodes.insert(node.id.as_str()) {
            violations.push(Violation::DuplicateNode {
                account_id: node.id.clone(),
            });
        }
    }

    let mut rings = HashSet::new();
    for ring in &result.fraud_rings {
        if !rings.insert(ring.ring_id.as_str()) {
            violations.push(Violation::DuplicateRingId {
                ring_id: ring.ring_id.clone(),
            });
        }
    }

    // account -> rings it is flagged in
    let mut flagged: HashMap<&str, HashSet<&str>> = HashMap::new();
    for account in &result.suspicious_accounts {
        if !nodes.contains(account.account_id.as_str()) {
            violations.push(Violation::UnknownSuspiciousAccount {
                account_id: account.account_id.clone(),
            });
        }
        // Accounts outside any ring are reported with an empty ring id
        if !account.ring_id.is_empty() && !rings.contains(account.ring_id.as_str()) {
            violations.push(Violation::UnknownRing {
                account_id: account.account_id.clone(),
                ring_id: account.ring_id.clone(),
            });
        }
        flagged
            .entry(account.account_id.as_str())
            .or_default()
            .insert(account.ring_id.as_str());
    }

    for ring in &result.fraud_rings {
        for member in &ring.member_accounts {
            let in_ring = flagged
                .get(member.as_str())
                .is_some_and(|ids| ids.contains(ring.ring_id.as_str()));
            if !in_ring {
                violations.push(Violation::RingMemberNotSuspicious {
                    ring_id: ring.ring_id.clone(),
                    account_id: member.clone(),
                });
            }
        }
    }

    IntegrityReport { violations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::sample_result;
    use crate::types::{AccountNode, FraudRing, SuspiciousAccount};

    #[test]
    fn sample_is_clean() {
        assert!(check(&sample_result()).is_clean());
    }

    #[test]
    fn reports_dangling_suspicious_account() {
        let mut result = sample_result();
        result.suspicious_accounts.push(SuspiciousAccount {
            account_id: "Z".into(),
            suspicion_score: 0.4,
            ring_id: "R1".into(),
            detected_patterns: vec![],
        });
        assert_eq!(
            check(&result).violations,
            vec![Violation::UnknownSuspiciousAccount {
                account_id: "Z".into()
            }]
        );
    }

    #[test]
    fn reports_ring_member_without_matching_entry() {
        let mut result = sample_result();
        result.fraud_rings[0].member_accounts.push("A".into());
        result.fraud_rings.push(FraudRing {
            ring_id: "R2".into(),
            pattern_type: "cycle".into(),
            risk_score: 50.0,
            member_accounts: vec!["B".into()],
        });

        let report = check(&result);
        assert_eq!(report.violations.len(), 2);
        assert!(report.violations.contains(&Violation::RingMemberNotSuspicious {
            ring_id: "R1".into(),
            account_id: "A".into(),
        }));
        // B is flagged, but for R1 only
        assert!(report.violations.contains(&Violation::RingMemberNotSuspicious {
            ring_id: "R2".into(),
            account_id: "B".into(),
        }));
    }

    #[test]
    fn reports_duplicates_and_unknown_rings() {
        let mut result = sample_result();
        result.graph.nodes.push(AccountNode::new("A"));
        result.fraud_rings.push(result.fraud_rings[0].clone());
        result.suspicious_accounts[0].ring_id = "R7".into();

        let text: Vec<String> = check(&result)
            .violations
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(text.contains(&"node A appears more than once".to_string()));
        assert!(text.contains(&"ring id R1 is repeated".to_string()));
        assert!(text.contains(&"B references unknown ring R7".to_string()));
    }
}
