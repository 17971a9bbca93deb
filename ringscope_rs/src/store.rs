//! Analysis result store: one slot, replaced wholesale.
//!
//! The store never validates what it is given and never merges. Each `set`
//! bumps a generation counter so timers armed for an older result can tell
//! they are stale.

use std::sync::Arc;

use crate::types::AnalysisResult;

#[derive(Debug, Default)]
pub struct AnalysisStore {
    current: Option<Arc<AnalysisResult>>,
    generation: u64,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current result. Returns the new generation.
    pub fn set(&mut self, result: impl Into<Arc<AnalysisResult>>) -> u64 {
        self.current = Some(result.into());
        self.generation += 1;
        self.generation
    }

    pub fn get(&self) -> Option<&AnalysisResult> {
        self.current.as_deref()
    }

    /// Shared handle to the current result, for readers outside the dashboard.
    pub fn snapshot(&self) -> Option<Arc<AnalysisResult>> {
        self.current.clone()
    }

    /// 0 until the first `set`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }
}
