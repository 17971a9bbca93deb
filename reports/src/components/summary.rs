//! Summary counters panel

use crate::components::icons::{ICON_SQUARES_FOUR, Icon};
use crate::types::SummaryCounters;
use leptos::prelude::*;

/// Four counters from the analysis summary, shown as given.
///
/// Before the first analysis every counter reads `-`.
#[component]
pub fn SummaryPanel(counters: Option<SummaryCounters>) -> impl IntoView {
    let (accounts, suspicious, rings, time) = match &counters {
        Some(c) => (
            c.total_accounts_analyzed.to_string(),
            c.suspicious_accounts_flagged.to_string(),
            c.fraud_rings_detected.to_string(),
            c.processing_time_seconds.to_string(),
        ),
        None => ("-".into(), "-".into(), "-".into(), "-".into()),
    };

    view! {
        <section class="summary-grid" aria-label="Analysis summary">
            <Counter id="accounts" label="Accounts analyzed" value=accounts />
            <Counter id="suspicious" label="Suspicious accounts" value=suspicious />
            <Counter id="rings" label="Fraud rings" value=rings />
            <Counter id="time" label="Processing time (s)" value=time />
        </section>
    }
}

#[component]
fn Counter(id: &'static str, label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="counter">
            <div class="counter-label">
                <Icon path=ICON_SQUARES_FOUR size="12" />
                " "
                {label}
            </div>
            <div class="counter-value" id=id>{value}</div>
        </div>
    }
}
