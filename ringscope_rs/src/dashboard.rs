//! Dashboard application state.
//!
//! [`Dashboard`] is the single writer of the analysis store and the only
//! place the view fields (counters, graph, ring list, detail panel, loader,
//! notices) change. [`DashboardApp`] wires it to an [`EventBus`] so adapters
//! only ever deal in [`ViewEvent`]s and [`Effect`]s.

use std::sync::Arc;

use ringscope_report::types::{
    DetailPanel, ErrorNotice, NoticeKind, RingCard, StaticDashboard, SummaryCounters, Theme,
    ThemedSurfaces, VisualGraph,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{DashboardError, RenderError};
use crate::events::{Effect, EventBus, EventKind, UploadOutcome, ViewEvent};
use crate::layout::{DEFAULT_SETTLE_INTERVAL_MS, LayoutEngine, SettleTicket};
use crate::selection;
use crate::store::AnalysisStore;
use crate::theme::{PreferenceStore, ThemeSynchronizer, render_surfaces};
use crate::types::{AccountId, AnalysisResult};

/// File chooser label when nothing is chosen.
pub const DEFAULT_FILE_LABEL: &str = "Choose CSV File";

/// Knobs the adapter hands to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOptions {
    pub settle_interval_ms: u64,
    pub upload_url: String,
    pub download_url: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            settle_interval_ms: DEFAULT_SETTLE_INTERVAL_MS,
            upload_url: "/upload".into(),
            download_url: "/download".into(),
        }
    }
}

/// Everything a surface shows, in one serializable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub theme: Theme,
    pub file_label: String,
    pub hero_visible: bool,
    pub loading: bool,
    pub surface_active: bool,
    pub counters: Option<SummaryCounters>,
    pub graph: Option<VisualGraph>,
    pub rings: Vec<RingCard>,
    pub detail: Option<DetailPanel>,
    pub notice: Option<ErrorNotice>,
}

impl DashboardView {
    fn initial(theme: Theme) -> Self {
        Self {
            theme,
            file_label: DEFAULT_FILE_LABEL.into(),
            hero_visible: true,
            loading: false,
            surface_active: false,
            counters: None,
            graph: None,
            rings: Vec::new(),
            detail: None,
            notice: None,
        }
    }
}

/// What `finish_upload` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadDisposition {
    /// Stored and rendered.
    Applied,
    /// Older than what is shown, or superseded by a newer submit.
    Discarded,
    /// Failure surfaced as a notice.
    Failed,
}

pub struct Dashboard<L: LayoutEngine> {
    store: AnalysisStore,
    theme: ThemeSynchronizer,
    surface: L,
    view: DashboardView,
    options: DashboardOptions,
    issued_seq: u64,
    resolved_seq: u64,
    outbox: Vec<Effect>,
}

impl<L: LayoutEngine> std::fmt::Debug for Dashboard<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("theme", &self.view.theme)
            .field("generation", &self.store.generation())
            .field("issued_seq", &self.issued_seq)
            .field("resolved_seq", &self.resolved_seq)
            .finish_non_exhaustive()
    }
}

impl<L: LayoutEngine> Dashboard<L> {
    pub fn new(surface: L, prefs: Box<dyn PreferenceStore>, options: DashboardOptions) -> Self {
        let theme = ThemeSynchronizer::new(prefs);
        let view = DashboardView::initial(theme.theme());
        Self {
            store: AnalysisStore::new(),
            theme,
            surface,
            view,
            options,
            issued_seq: 0,
            resolved_seq: 0,
            outbox: Vec::new(),
        }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn store(&self) -> &AnalysisStore {
        &self.store
    }

    pub fn surface(&self) -> &L {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut L {
        &mut self.surface
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    /// Drain pending effects.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.outbox)
    }

    pub fn choose_file(&mut self, file_name: Option<&str>) {
        self.view.file_label = file_name
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILE_LABEL)
            .to_string();
    }

    /// Show the loader and ask the adapter to send the file.
    /// Returns the sequence number the response must carry.
    pub fn begin_upload(&mut self) -> u64 {
        self.issued_seq += 1;
        self.view.loading = true;
        self.view.hero_visible = false;
        self.view.notice = None;
        info!(seq = self.issued_seq, "upload issued");
        self.outbox.push(Effect::StartUpload {
            seq: self.issued_seq,
        });
        self.issued_seq
    }

    /// Apply the outcome of upload `seq`.
    ///
    /// A success replaces the store and redraws counters, graph and ring
    /// list from that one result. A render failure keeps the stored result
    /// and is returned as an error after the notice is set.
    ///
    /// Responses at or below the newest resolved sequence number, whether
    /// that one succeeded or failed, are discarded.
    pub fn finish_upload(
        &mut self,
        seq: u64,
        outcome: UploadOutcome,
    ) -> Result<UploadDisposition, DashboardError> {
        if seq <= self.resolved_seq || seq > self.issued_seq {
            warn!(
                seq,
                resolved = self.resolved_seq,
                issued = self.issued_seq,
                "discarding stale upload response"
            );
            return Ok(UploadDisposition::Discarded);
        }

        match outcome {
            UploadOutcome::Success(result) => {
                self.resolved_seq = seq;
                let generation = self.store.set(result);
                info!(seq, generation, "analysis stored");
                self.view.detail = None;
                self.view.notice = None;
                self.redraw()?;
                Ok(UploadDisposition::Applied)
            }
            UploadOutcome::TransportError(e) if seq == self.issued_seq => {
                warn!(seq, "upload failed: {e}");
                self.resolved_seq = seq;
                self.fail(NoticeKind::Transport, e.to_string());
                Ok(UploadDisposition::Failed)
            }
            UploadOutcome::MalformedPayload(message) if seq == self.issued_seq => {
                warn!(seq, "malformed analysis response: {message}");
                self.resolved_seq = seq;
                self.fail(NoticeKind::MalformedPayload, message);
                Ok(UploadDisposition::Failed)
            }
            _ => {
                debug!(seq, issued = self.issued_seq, "failure superseded by newer upload");
                Ok(UploadDisposition::Discarded)
            }
        }
    }

    /// Run an already decoded result through the upload path (local files,
    /// saved payloads).
    pub fn load(
        &mut self,
        result: impl Into<Arc<AnalysisResult>>,
    ) -> Result<UploadDisposition, DashboardError> {
        let seq = self.begin_upload();
        self.outbox.retain(|e| *e != Effect::StartUpload { seq });
        self.finish_upload(seq, UploadOutcome::Success(result.into()))
    }

    /// Update the detail panel from a selection event. An empty selection,
    /// or one before any analysis is loaded, leaves the panel alone.
    pub fn select(&mut self, selected_node_ids: &[AccountId]) -> Option<&DetailPanel> {
        let Some(node_id) = selection::primary_selection(selected_node_ids) else {
            return self.view.detail.as_ref();
        };
        let Some(result) = self.store.get() else {
            debug!(node_id, "selection ignored, nothing loaded");
            return self.view.detail.as_ref();
        };
        let panel = selection::on_select(result, node_id);
        debug!(node_id, clean = panel.is_clean(), "node selected");
        self.view.detail = Some(panel);
        self.view.detail.as_ref()
    }

    /// Flip the theme and rebuild counters, graph and ring list together.
    pub fn toggle_theme(&mut self) -> Result<Theme, DashboardError> {
        let change = self.theme.toggle(&self.store);
        self.view.theme = change.theme;
        if let Some(surfaces) = change.surfaces {
            self.show(surfaces)?;
        }
        Ok(change.theme)
    }

    /// Settle timer fired.
    pub fn settle(&mut self, generation: u64) {
        if generation != self.store.generation() || !self.store.is_loaded() {
            debug!(generation, current = self.store.generation(), "stale settle ignored");
            return;
        }
        self.surface.set_active(true);
        self.view.surface_active = true;
        if self.resolved_seq == self.issued_seq {
            self.view.loading = false;
        }
    }

    /// Redraw the stored result after a render failure.
    /// `Ok(false)` when nothing is stored.
    pub fn retry_render(&mut self) -> Result<bool, DashboardError> {
        if !self.store.is_loaded() {
            return Ok(false);
        }
        self.view.notice = None;
        self.redraw()?;
        Ok(true)
    }

    pub fn request_download(&mut self) {
        self.outbox.push(Effect::Navigate {
            url: self.options.download_url.clone(),
        });
    }

    /// Self-contained snapshot for the static HTML page: both themes and
    /// every node's detail panel precomputed.
    pub fn export(&self) -> StaticDashboard {
        let (surfaces, details): (Vec<ThemedSurfaces>, _) = match self.store.get() {
            Some(result) => (
                Theme::ALL
                    .iter()
                    .map(|theme| render_surfaces(result, *theme))
                    .collect(),
                selection::detail_index(result),
            ),
            None => Default::default(),
        };
        StaticDashboard {
            theme: self.view.theme,
            file_label: self.view.file_label.clone(),
            counters: self.view.counters.clone(),
            surfaces,
            details,
            selected: self.view.detail.clone(),
            notice: self.view.notice.clone(),
            upload_url: self.options.upload_url.clone(),
            download_url: self.options.download_url.clone(),
        }
    }

    /// Shared handle to the stored result.
    pub fn snapshot(&self) -> Option<Arc<AnalysisResult>> {
        self.store.snapshot()
    }

    fn redraw(&mut self) -> Result<(), DashboardError> {
        let Some(result) = self.store.get() else {
            return Ok(());
        };
        let surfaces = render_surfaces(result, self.theme.theme());
        self.show(surfaces)
    }

    /// Present `surfaces` with the stored result's counters. A successful
    /// pass lifts an earlier render failure notice.
    fn show(&mut self, surfaces: ThemedSurfaces) -> Result<(), DashboardError> {
        let counters = self
            .store
            .get()
            .map(|result| SummaryCounters::from(&result.summary));
        self.present(surfaces)?;
        self.view.counters = counters;
        if self
            .view
            .notice
            .as_ref()
            .is_some_and(|notice| notice.kind == NoticeKind::Render)
        {
            self.view.notice = None;
        }
        Ok(())
    }

    fn present(&mut self, surfaces: ThemedSurfaces) -> Result<(), DashboardError> {
        self.surface.set_active(false);
        self.view.surface_active = false;

        if let Err(e) = self.surface.display(&surfaces.graph) {
            self.render_failed(&e);
            return Err(e.into());
        }

        self.view.graph = Some(surfaces.graph);
        self.view.rings = surfaces.rings;
        self.outbox.push(Effect::ScheduleSettle(SettleTicket {
            generation: self.store.generation(),
            interval_ms: self.options.settle_interval_ms,
        }));
        Ok(())
    }

    fn render_failed(&mut self, err: &RenderError) {
        warn!("render pass failed, analysis kept for retry: {err}");
        self.view.graph = None;
        self.view.rings.clear();
        self.view.counters = None;
        self.fail(NoticeKind::Render, err.to_string());
    }

    fn fail(&mut self, kind: NoticeKind, message: String) {
        self.view.loading = false;
        self.view.notice = Some(ErrorNotice {
            kind,
            message,
            retryable: true,
        });
    }
}

/// [`Dashboard`] behind an [`EventBus`].
pub struct DashboardApp<L: LayoutEngine + 'static> {
    dashboard: Dashboard<L>,
    bus: EventBus<Dashboard<L>>,
}

impl<L: LayoutEngine + 'static> std::fmt::Debug for DashboardApp<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardApp")
            .field("dashboard", &self.dashboard)
            .field("bus", &self.bus)
            .finish()
    }
}

impl<L: LayoutEngine + 'static> DashboardApp<L> {
    pub fn new(dashboard: Dashboard<L>) -> Self {
        let mut bus = EventBus::new();
        register_core_handlers(&mut bus);
        Self { dashboard, bus }
    }

    pub fn dashboard(&self) -> &Dashboard<L> {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard<L> {
        &mut self.dashboard
    }

    /// Extra handlers run after the core ones.
    pub fn bus_mut(&mut self) -> &mut EventBus<Dashboard<L>> {
        &mut self.bus
    }

    /// Handle one event and return the effects it produced.
    pub fn dispatch(&mut self, event: ViewEvent) -> Result<Vec<Effect>, DashboardError> {
        debug!(kind = %event.kind(), "dispatch");
        let outcome = self.bus.dispatch(&mut self.dashboard, &event);
        let effects = self.dashboard.take_effects();
        outcome.map(|()| effects)
    }
}

fn register_core_handlers<L: LayoutEngine + 'static>(bus: &mut EventBus<Dashboard<L>>) {
    for kind in EventKind::ALL {
        bus.on(kind, |dashboard: &mut Dashboard<L>, event: &ViewEvent| {
            match event {
                ViewEvent::FileChosen { file_name } => dashboard.choose_file(file_name.as_deref()),
                ViewEvent::Submit => {
                    dashboard.begin_upload();
                }
                ViewEvent::UploadFinished { seq, outcome } => {
                    dashboard.finish_upload(*seq, outcome.clone())?;
                }
                ViewEvent::NodesSelected { selected_node_ids } => {
                    dashboard.select(selected_node_ids);
                }
                ViewEvent::ThemeToggled => {
                    dashboard.toggle_theme()?;
                }
                ViewEvent::SettleElapsed { generation } => dashboard.settle(*generation),
                ViewEvent::DownloadRequested => dashboard.request_download(),
            }
            Ok(())
        });
    }
}
