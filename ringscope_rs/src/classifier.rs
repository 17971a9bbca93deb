//! Node classification: is an account in the suspicious set?
//!
//! Build a [`SuspicionIndex`] once per render and classify every node
//! against it; membership is a hash lookup.

use std::collections::HashSet;

use crate::types::{AccountNode, AnalysisResult};

/// Classification outcome for one node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub suspicious: bool,
}

/// Set of suspicious account ids borrowed from one result.
#[derive(Debug, Default)]
pub struct SuspicionIndex<'a> {
    ids: HashSet<&'a str>,
}

impl<'a> SuspicionIndex<'a> {
    pub fn build(result: &'a AnalysisResult) -> Self {
        let ids = result
            .suspicious_accounts
            .iter()
            .map(|a| a.account_id.as_str())
            .collect();
        Self { ids }
    }

    pub fn classify(&self, node: &AccountNode) -> Classification {
        Classification {
            suspicious: self.contains(&node.id),
        }
    }

    pub fn contains(&self, account_id: &str) -> bool {
        self.ids.contains(account_id)
    }

    /// Distinct suspicious ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// One-off classification. Builds a fresh index; prefer [`SuspicionIndex`] in loops.
pub fn classify(node: &AccountNode, result: &AnalysisResult) -> Classification {
    SuspicionIndex::build(result).classify(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SuspiciousAccount;
    use crate::types::fixtures::sample_result;

    #[test]
    fn flags_exactly_the_suspicious_ids() {
        let result = sample_result();
        let index = SuspicionIndex::build(&result);

        let flagged: Vec<&str> = result
            .graph
            .nodes
            .iter()
            .filter(|n| index.classify(n).suspicious)
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(flagged, vec!["B"]);
    }

    #[test]
    fn agrees_with_linear_membership_for_every_node() {
        let mut result = sample_result();
        result.suspicious_accounts.push(SuspiciousAccount {
            account_id: "ghost".into(),
            suspicion_score: 0.1,
            ring_id: "R9".into(),
            detected_patterns: vec![],
        });
        result.graph.nodes.push(AccountNode::new("ghost"));
        let index = SuspicionIndex::build(&result);

        for node in &result.graph.nodes {
            let expected = result
                .suspicious_accounts
                .iter()
                .any(|a| a.account_id == node.id);
            assert_eq!(index.classify(node).suspicious, expected, "node {}", node.id);
            assert_eq!(classify(node, &result).suspicious, expected);
        }
    }

    #[test]
    fn duplicate_entries_collapse() {
        let mut result = sample_result();
        let dup = result.suspicious_accounts[0].clone();
        result.suspicious_accounts.push(dup);
        assert_eq!(SuspicionIndex::build(&result).len(), 1);
    }

    #[test]
    fn empty_result_flags_nothing() {
        let result = AnalysisResult::default();
        let index = SuspicionIndex::build(&result);
        assert!(index.is_empty());
        assert!(!index.classify(&AccountNode::new("A")).suspicious);
    }
}
