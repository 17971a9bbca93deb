//! Async driver for the upload cycle.
//!
//! The dashboard sits behind a `tokio::sync::RwLock`; the write guard is
//! taken around each dispatch and released before the network await, so
//! several uploads may be in flight while selections and theme toggles keep
//! being served.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::{AnalysisTransport, UploadFile};
use crate::dashboard::DashboardApp;
use crate::error::DashboardError;
use crate::events::{Effect, UploadOutcome, ViewEvent};
use crate::layout::LayoutEngine;

/// Result of one submit: the sequence number it ran under and the effects
/// the response produced (usually one settle ticket).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    pub seq: u64,
    pub effects: Vec<Effect>,
}

pub struct UploadOrchestrator<T, L: LayoutEngine + 'static> {
    transport: T,
    app: Arc<RwLock<DashboardApp<L>>>,
}

impl<T: AnalysisTransport, L: LayoutEngine + 'static> UploadOrchestrator<T, L> {
    pub fn new(transport: T, app: Arc<RwLock<DashboardApp<L>>>) -> Self {
        Self { transport, app }
    }

    pub fn app(&self) -> Arc<RwLock<DashboardApp<L>>> {
        Arc::clone(&self.app)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Upload `file` and apply the response.
    pub async fn submit(&self, file: UploadFile) -> Result<SubmitReport, DashboardError> {
        let seq = {
            let mut app = self.app.write().await;
            app.dispatch(ViewEvent::FileChosen {
                file_name: Some(file.file_name.clone()),
            })?;
            app.dispatch(ViewEvent::Submit)?
                .into_iter()
                .find_map(|effect| match effect {
                    Effect::StartUpload { seq } => Some(seq),
                    _ => None,
                })
                .ok_or(DashboardError::NoUploadIssued)?
        };

        let outcome = UploadOutcome::from_response(self.transport.upload(&file).await);
        debug!(seq, success = outcome.is_success(), "upload returned");

        let effects = self
            .app
            .write()
            .await
            .dispatch(ViewEvent::UploadFinished { seq, outcome })?;
        Ok(SubmitReport { seq, effects })
    }

    /// Submit, then wait out the settle interval so the loader is hidden
    /// before returning.
    pub async fn submit_and_settle(&self, file: UploadFile) -> Result<SubmitReport, DashboardError> {
        let report = self.submit(file).await?;
        run_settle_timers(&self.app, &report.effects).await?;
        Ok(report)
    }
}

/// Sleep through every settle ticket in `effects` and deliver `SettleElapsed`.
pub async fn run_settle_timers<L: LayoutEngine + 'static>(
    app: &RwLock<DashboardApp<L>>,
    effects: &[Effect],
) -> Result<(), DashboardError> {
    for effect in effects {
        if let Effect::ScheduleSettle(ticket) = effect {
            tokio::time::sleep(ticket.interval()).await;
            app.write().await.dispatch(ViewEvent::SettleElapsed {
                generation: ticket.generation,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardOptions};
    use crate::error::TransportError;
    use crate::layout::HeadlessSurface;
    use crate::theme::MemoryPreferences;
    use crate::types::fixtures::{other_result, sample_result};
    use ringscope_report::types::NoticeKind;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    type Reply = Result<String, TransportError>;

    /// Answers each file name from a oneshot the test controls.
    #[derive(Default)]
    struct FakeTransport {
        pending: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    }

    impl FakeTransport {
        fn expect(&self, file_name: &str) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            if let Ok(mut pending) = self.pending.lock() {
                pending.insert(file_name.to_string(), rx);
            }
            tx
        }
    }

    impl AnalysisTransport for FakeTransport {
        fn upload(&self, file: &UploadFile) -> impl Future<Output = Reply> + Send {
            let rx = self
                .pending
                .lock()
                .ok()
                .and_then(|mut pending| pending.remove(&file.file_name));
            async move {
                match rx {
                    Some(rx) => rx.await.unwrap_or(Err(TransportError::NoResults)),
                    None => Err(TransportError::NoResults),
                }
            }
        }
    }

    /// Answers everything with the same body.
    struct StaticTransport(Reply);

    impl AnalysisTransport for StaticTransport {
        fn upload(&self, _file: &UploadFile) -> impl Future<Output = Reply> + Send {
            let reply = self.0.clone();
            async move { reply }
        }
    }

    fn app() -> Arc<RwLock<DashboardApp<HeadlessSurface>>> {
        Arc::new(RwLock::new(DashboardApp::new(Dashboard::new(
            HeadlessSurface::new(),
            Box::new(MemoryPreferences::new()),
            DashboardOptions::default(),
        ))))
    }

    fn body(result: &crate::types::AnalysisResult) -> Reply {
        Ok(serde_json::to_string(result).expect("encode"))
    }

    fn csv(name: &str) -> UploadFile {
        UploadFile::new(name, b"transaction_id,sender_id,receiver_id\n".to_vec())
    }

    #[tokio::test(start_paused = true)]
    async fn submit_and_settle_hides_loader() {
        let orchestrator = UploadOrchestrator::new(StaticTransport(body(&sample_result())), app());
        let report = orchestrator
            .submit_and_settle(csv("tx.csv"))
            .await
            .expect("submit");
        assert_eq!(report.seq, 1);

        let app = orchestrator.app();
        let app = app.read().await;
        let view = app.dashboard().view();
        assert_eq!(view.file_label, "tx.csv");
        assert!(!view.loading);
        assert!(view.surface_active);
        assert_eq!(view.rings.len(), 1);
    }

    #[tokio::test]
    async fn transport_failure_becomes_retryable_notice() {
        let failure = Err(TransportError::Status {
            url: "http://127.0.0.1:5000/upload".into(),
            status: 500,
        });
        let orchestrator = UploadOrchestrator::new(StaticTransport(failure), app());
        let report = orchestrator.submit(csv("tx.csv")).await.expect("handled");
        assert!(report.effects.is_empty());

        let app = orchestrator.app();
        let app = app.read().await;
        let view = app.dashboard().view();
        assert!(!view.loading);
        assert_eq!(view.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Transport));
    }

    #[tokio::test]
    async fn malformed_body_becomes_notice() {
        let orchestrator = UploadOrchestrator::new(StaticTransport(Ok("oops".into())), app());
        orchestrator.submit(csv("tx.csv")).await.expect("handled");
        let app = orchestrator.app();
        let app = app.read().await;
        assert_eq!(
            app.dashboard().view().notice.as_ref().map(|n| n.kind),
            Some(NoticeKind::MalformedPayload)
        );
    }

    #[tokio::test]
    async fn late_response_from_older_upload_is_discarded() {
        let transport = FakeTransport::default();
        let first_tx = transport.expect("first.csv");
        let second_tx = transport.expect("second.csv");
        let orchestrator = UploadOrchestrator::new(transport, app());
        let (second_done_tx, second_done_rx) = oneshot::channel::<()>();

        let first = orchestrator.submit(csv("first.csv"));
        let second = async {
            let report = orchestrator.submit(csv("second.csv")).await;
            let _ = second_done_tx.send(());
            report
        };
        let driver = async {
            let _ = second_tx.send(body(&other_result()));
            let _ = second_done_rx.await;
            let _ = first_tx.send(body(&sample_result()));
        };

        let (first, second, ()) = tokio::join!(first, second, driver);
        let first = first.expect("first handled");
        let second = second.expect("second handled");
        assert_eq!((first.seq, second.seq), (1, 2));
        assert!(first.effects.is_empty(), "stale response must not redraw");

        let app = orchestrator.app();
        let app = app.read().await;
        let dashboard = app.dashboard();
        assert_eq!(dashboard.store().get(), Some(&other_result()));
        assert_eq!(dashboard.store().generation(), 1);
        assert_eq!(dashboard.surface().display_count(), 1);
    }

    #[tokio::test]
    async fn selection_is_served_while_upload_in_flight() {
        let transport = FakeTransport::default();
        let tx = transport.expect("slow.csv");
        let app = app();
        let orchestrator = UploadOrchestrator::new(transport, Arc::clone(&app));

        let upload = orchestrator.submit(csv("slow.csv"));
        let interact = async {
            app.write()
                .await
                .dispatch(ViewEvent::ThemeToggled)
                .expect("toggle");
            let _ = tx.send(body(&sample_result()));
        };
        let (report, ()) = tokio::join!(upload, interact);
        report.expect("handled");

        let app = app.read().await;
        let view = app.dashboard().view();
        assert_eq!(view.graph.as_ref().map(|g| g.theme), Some(view.theme));
    }
}
