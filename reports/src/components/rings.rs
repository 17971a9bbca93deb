//! Fraud ring list component
//!
//! Renders ring cards in the order the analysis produced them; cards carry
//! their own themed inline style.

use crate::components::icons::{ICON_WARNING_CIRCLE, Icon};
use crate::types::RingCard;
use leptos::prelude::*;

/// Ordered list of detected fraud rings.
///
/// # Props
///
/// * `cards` - Ring cards, already styled for the active theme
///
/// # Display
///
/// Each card shows, one per line: ring id, upper-cased pattern type,
/// `Risk: <score>` and the member path `A → B → C`.
#[component]
pub fn RingList(cards: Vec<RingCard>) -> impl IntoView {
    let count = cards.len();

    view! {
        <div class="panel">
            <h3>
                <Icon path=ICON_WARNING_CIRCLE color="#e67e22" />
                "Fraud Rings"
                <span class="count-badge">{count.to_string()}</span>
            </h3>
            <div id="ringList">
                {if cards.is_empty() {
                    view! { <p class="muted">"No fraud rings detected"</p> }.into_any()
                } else {
                    cards.into_iter().map(|card| {
                        view! { <RingCardView card=card /> }
                    }).collect::<Vec<_>>().into_any()
                }}
            </div>
        </div>
    }
}

/// A single ring card.
#[component]
pub fn RingCardView(card: RingCard) -> impl IntoView {
    let risk = card.risk_label();

    view! {
        <div class="ring-card" style=card.style.css() data-ring-id=card.ring_id.clone()>
            <strong>{card.ring_id.clone()}</strong>
            <br />
            {card.pattern_label}
            <br />
            {risk}
            <br />
            <span class="ring-members">{card.members_path}</span>
        </div>
    }
}
