//! Error notice banner.

use leptos::prelude::*;

use crate::components::icons::{ICON_WARNING_CIRCLE, Icon};
use crate::types::ErrorNotice;

/// Banner for a failed upload or render; offers a retry hint when the failure is retryable.
#[component]
pub fn NoticeBanner(notice: ErrorNotice) -> impl IntoView {
    let title = notice.title();
    let retry = notice
        .retryable
        .then(|| view! { <span class="muted">" Submit the file again to retry."</span> });

    view! {
        <div class="notice" role="alert">
            <Icon path=ICON_WARNING_CIRCLE size="16" color="#ef4444" />
            <strong>{title}</strong>
            ": "
            {notice.message}
            {retry}
        </div>
    }
}
