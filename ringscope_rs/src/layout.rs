//! Layout engine seam.
//!
//! The force-directed simulation itself runs outside this crate (vis-network
//! in the browser). The engine only needs somewhere to hand a finished
//! [`VisualGraph`] and a way to flip the surface's `active` marker once the
//! settle interval has passed.

use ringscope_report::types::VisualGraph;
use serde::Serialize;
use std::time::Duration;
use tracing::trace;

use crate::error::RenderError;

/// Delay between handing a graph to the layout engine and marking it settled.
pub const DEFAULT_SETTLE_INTERVAL_MS: u64 = 700;

/// Something that can draw a [`VisualGraph`].
pub trait LayoutEngine: Send + Sync {
    /// Replace whatever is drawn with `graph`.
    fn display(&mut self, graph: &VisualGraph) -> Result<(), RenderError>;

    /// Toggle the settled/visible marker.
    fn set_active(&mut self, active: bool);
}

/// Settle timer request. Fires once; a ticket whose generation no longer
/// matches the store is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SettleTicket {
    pub generation: u64,
    pub interval_ms: u64,
}

impl SettleTicket {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// In-process surface for the CLI, static export and tests.
#[derive(Debug, Default, Clone)]
pub struct HeadlessSurface {
    graph: Option<VisualGraph>,
    active: bool,
    displays: usize,
    node_limit: Option<usize>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject graphs with more than `limit` nodes.
    pub fn with_node_limit(limit: usize) -> Self {
        Self {
            node_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Last graph accepted.
    pub fn graph(&self) -> Option<&VisualGraph> {
        self.graph.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// How many graphs were accepted so far.
    pub fn display_count(&self) -> usize {
        self.displays
    }

    pub fn set_node_limit(&mut self, limit: Option<usize>) {
        self.node_limit = limit;
    }
}

impl LayoutEngine for HeadlessSurface {
    fn display(&mut self, graph: &VisualGraph) -> Result<(), RenderError> {
        if let Some(limit) = self.node_limit
            && graph.nodes.len() > limit
        {
            return Err(RenderError::Rejected(format!(
                "{} nodes exceed the surface limit of {limit}",
                graph.nodes.len()
            )));
        }
        trace!(nodes = graph.nodes.len(), "headless surface took graph");
        self.graph = Some(graph.clone());
        self.displays += 1;
        Ok(())
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
