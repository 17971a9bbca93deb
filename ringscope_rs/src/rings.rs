//! Ring summary view: fraud rings -> themed [`RingCard`]s, payload order kept.

use ringscope_report::types::{RingCard, Theme};

use crate::types::FraudRing;

/// Joins members in traversal order.
pub const MEMBER_SEPARATOR: &str = " → ";

/// Rebuild the whole ring list for `theme`.
pub fn render(rings: &[FraudRing], theme: Theme) -> Vec<RingCard> {
    let style = theme.card_style();
    rings
        .iter()
        .map(|ring| RingCard {
            ring_id: ring.ring_id.clone(),
            pattern_label: ring.pattern_type.to_uppercase(),
            risk_score: ring.risk_score,
            members_path: ring.member_accounts.join(MEMBER_SEPARATOR),
            member_count: ring.member_accounts.len(),
            style: style.clone(),
        })
        .collect()
}
