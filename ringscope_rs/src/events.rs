//! View events, side effects, and a small typed event bus.
//!
//! UI adapters (CLI, WASM page, tests) translate raw input into
//! [`ViewEvent`]s. The dashboard answers with [`Effect`]s the adapter must
//! carry out (start an HTTP upload, arm a timer, navigate).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{DashboardError, TransportError};
use crate::layout::SettleTicket;
use crate::types::{AccountId, AnalysisResult};

/// How an upload ended, as seen by the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Success(Arc<AnalysisResult>),
    TransportError(TransportError),
    /// Body arrived but did not decode.
    MalformedPayload(String),
}

impl UploadOutcome {
    /// Decode a response body.
    pub fn decode(body: &str) -> Self {
        match AnalysisResult::from_json(body) {
            Ok(result) => Self::Success(Arc::new(result)),
            Err(e) => Self::MalformedPayload(e.to_string()),
        }
    }

    pub fn from_response(response: Result<String, TransportError>) -> Self {
        match response {
            Ok(body) => Self::decode(&body),
            Err(e) => Self::TransportError(e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Input to the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    FileChosen { file_name: Option<String> },
    Submit,
    UploadFinished { seq: u64, outcome: UploadOutcome },
    NodesSelected { selected_node_ids: Vec<AccountId> },
    ThemeToggled,
    SettleElapsed { generation: u64 },
    DownloadRequested,
}

/// Discriminant of a [`ViewEvent`], used to route handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    FileChosen,
    Submit,
    UploadFinished,
    NodesSelected,
    ThemeToggled,
    SettleElapsed,
    DownloadRequested,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::FileChosen,
        EventKind::Submit,
        EventKind::UploadFinished,
        EventKind::NodesSelected,
        EventKind::ThemeToggled,
        EventKind::SettleElapsed,
        EventKind::DownloadRequested,
    ];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::FileChosen => "file_chosen",
            EventKind::Submit => "submit",
            EventKind::UploadFinished => "upload_finished",
            EventKind::NodesSelected => "nodes_selected",
            EventKind::ThemeToggled => "theme_toggled",
            EventKind::SettleElapsed => "settle_elapsed",
            EventKind::DownloadRequested => "download_requested",
        };
        f.write_str(name)
    }
}

impl ViewEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ViewEvent::FileChosen { .. } => EventKind::FileChosen,
            ViewEvent::Submit => EventKind::Submit,
            ViewEvent::UploadFinished { .. } => EventKind::UploadFinished,
            ViewEvent::NodesSelected { .. } => EventKind::NodesSelected,
            ViewEvent::ThemeToggled => EventKind::ThemeToggled,
            ViewEvent::SettleElapsed { .. } => EventKind::SettleElapsed,
            ViewEvent::DownloadRequested => EventKind::DownloadRequested,
        }
    }
}

/// Work the adapter has to perform on behalf of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Send the chosen file; answer with `UploadFinished { seq, .. }`.
    StartUpload { seq: u64 },
    /// Answer with `SettleElapsed` after the interval.
    ScheduleSettle(SettleTicket),
    /// Point the browser (or downloader) at this URL.
    Navigate { url: String },
}

type Handler<C> = Box<dyn FnMut(&mut C, &ViewEvent) -> Result<(), DashboardError> + Send + Sync>;

/// Handlers keyed by [`EventKind`], run in registration order.
pub struct EventBus<C> {
    handlers: HashMap<EventKind, Vec<Handler<C>>>,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<C> fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(String, usize)> = self
            .handlers
            .iter()
            .map(|(k, v)| (k.to_string(), v.len()))
            .collect();
        counts.sort();
        f.debug_struct("EventBus").field("handlers", &counts).finish()
    }
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut C, &ViewEvent) -> Result<(), DashboardError> + Send + Sync + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Run every handler registered for the event's kind. Stops at the first error.
    pub fn dispatch(&mut self, ctx: &mut C, event: &ViewEvent) -> Result<(), DashboardError> {
        if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
            for handler in handlers.iter_mut() {
                handler(ctx, event)?;
            }
        }
        Ok(())
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_classifies_bodies() {
        assert!(!UploadOutcome::decode("{}").is_success());
        assert!(matches!(
            UploadOutcome::decode("not json"),
            UploadOutcome::MalformedPayload(_)
        ));
        assert!(matches!(
            UploadOutcome::from_response(Err(TransportError::NoResults)),
            UploadOutcome::TransportError(TransportError::NoResults)
        ));
    }

    #[test]
    fn bus_routes_by_kind_in_order() {
        let mut bus: EventBus<Vec<String>> = EventBus::new();
        bus.on(EventKind::ThemeToggled, |log, _| {
            log.push("first".into());
            Ok(())
        });
        bus.on(EventKind::ThemeToggled, |log, _| {
            log.push("second".into());
            Ok(())
        });
        bus.on(EventKind::Submit, |log, _| {
            log.push("submit".into());
            Ok(())
        });

        let mut log = Vec::new();
        bus.dispatch(&mut log, &ViewEvent::ThemeToggled).expect("dispatch");
        assert_eq!(log, vec!["first", "second"]);
        assert_eq!(bus.handler_count(EventKind::ThemeToggled), 2);
        assert_eq!(bus.handler_count(EventKind::DownloadRequested), 0);
    }

    #[test]
    fn bus_stops_at_first_error() {
        let mut bus: EventBus<u32> = EventBus::new();
        bus.on(EventKind::Submit, |_, _| Err(DashboardError::NoUploadIssued));
        bus.on(EventKind::Submit, |count, _| {
            *count += 1;
            Ok(())
        });
        let mut count = 0;
        assert!(bus.dispatch(&mut count, &ViewEvent::Submit).is_err());
        assert_eq!(count, 0);
    }

    #[test]
    fn effects_serialize_tagged() {
        let json = serde_json::to_value(Effect::StartUpload { seq: 4 }).expect("encode");
        assert_eq!(json["effect"], "start_upload");
        assert_eq!(json["seq"], 4);
    }
}
