//! Leptos UI components for rendering the dashboard page.
//!
//! Each component is a Leptos `#[component]` function; they are composed by
//! [`DashboardDocument`] and can be reused for custom layouts.
//!
//! # Component Hierarchy
//!
//! ```text
//! DashboardDocument
//! ├── UploadForm
//! ├── NoticeBanner (transport / payload / render errors)
//! ├── SummaryPanel (counters)
//! └── workspace
//!     ├── GraphContainer (vis-network target + embedded surfaces)
//!     └── sidebar
//!         ├── DetailPanelView
//!         └── RingList
//!             └── RingCardView
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use leptos::prelude::*;
//! use ringscope_report::components::RingList;
//!
//! view! { <RingList cards=cards /> }
//! ```

mod detail;
mod document;
mod graph;
mod icons;
mod notice;
mod rings;
mod summary;

pub use detail::DetailPanelView;
pub use document::{DashboardDocument, UploadForm};
pub use graph::GraphContainer;
pub use icons::*;
pub use notice::NoticeBanner;
pub use rings::{RingCardView, RingList};
pub use summary::SummaryPanel;
