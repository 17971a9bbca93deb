//! Selected account panel.

use leptos::prelude::*;

use crate::types::DetailPanel;

/// The single account detail panel. Empty until a node is selected.
#[component]
pub fn DetailPanelView(panel: Option<DetailPanel>) -> impl IntoView {
    let body = match panel {
        None => view! {
            <p class="muted">"Click a node in the graph to inspect the account."</p>
        }
        .into_any(),
        Some(panel) => {
            let class = if panel.is_clean() {
                "detail-body detail-clean"
            } else {
                "detail-body detail-flagged"
            };
            let account_id = panel.account_id().to_string();
            view! {
                <div class=class>
                    <strong>{account_id}</strong>
                    {panel.body_lines().into_iter().map(|line| {
                        view! { <div>{line}</div> }
                    }).collect::<Vec<_>>()}
                </div>
            }
            .into_any()
        }
    };

    view! {
        <div class="panel detail-panel">
            <h3>"Selected Account"</h3>
            <div id="selectedAccount">{body}</div>
        </div>
    }
}
