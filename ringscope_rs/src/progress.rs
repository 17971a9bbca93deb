//! Terminal loading indicator.
//!
//! [`Loader`] is the CLI's counterpart of the dashboard loader: it spins while
//! an upload or download is in flight and resolves from the final
//! [`DashboardView`], either a ready line with the counters or the notice.

use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::dashboard::DashboardView;

pub struct Loader {
    bar: ProgressBar,
}

impl Loader {
    /// Loader for an analysis upload of `file_name`.
    pub fn upload(file_name: &str) -> Self {
        Self::start(format!("Analyzing {file_name}..."))
    }

    /// Loader for fetching the stored results.
    pub fn download() -> Self {
        Self::start("Downloading results...".to_string())
    }

    /// Draws nothing when stderr is not a terminal.
    fn start(message: String) -> Self {
        if !std::io::stderr().is_terminal() {
            return Self::hidden();
        }
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_strings(&["◐", "◓", "◑", "◒"])
            .template("{spinner:.red} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn writing(&self, path: &Path) {
        self.bar.set_message(format!("Writing {}...", path.display()));
    }

    /// Stop on the state the dashboard settled in. `false` when it shows a notice.
    pub fn settle(&self, view: &DashboardView, elapsed: Duration) -> bool {
        match &view.notice {
            Some(notice) => {
                self.fail(&format!("{}: {}", notice.title(), notice.message));
                false
            }
            None => {
                self.bar.finish_and_clear();
                eprintln!("{} {}", style("✓").green().bold(), ready_line(view, elapsed));
                true
            }
        }
    }

    pub fn fail(&self, message: &str) {
        self.bar.finish_and_clear();
        eprintln!("{} {}", style("✗").red().bold(), message);
    }

    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// `✓ Wrote <path>` on stderr.
pub fn wrote(path: &Path) {
    eprintln!("{} Wrote {}", style("✓").green().bold(), path.display());
}

fn ready_line(view: &DashboardView, elapsed: Duration) -> String {
    let mut line = format!("Analysis ready in {}", format_duration(elapsed));
    if let Some(counters) = &view.counters {
        let flagged = usize::try_from(counters.suspicious_accounts_flagged).unwrap_or(usize::MAX);
        let rings = usize::try_from(counters.fraud_rings_detected).unwrap_or(usize::MAX);
        line.push_str(&format!(
            ": {} flagged, {}",
            format_count(flagged, "account", "accounts"),
            format_count(rings, "ring", "rings")
        ));
    }
    line
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}

pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardOptions};
    use crate::layout::HeadlessSurface;
    use crate::theme::MemoryPreferences;
    use crate::types::fixtures::sample_result;

    fn loaded_view() -> DashboardView {
        let mut d = Dashboard::new(
            HeadlessSurface::new(),
            Box::new(MemoryPreferences::new()),
            DashboardOptions::default(),
        );
        d.load(sample_result()).expect("load");
        d.view().clone()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(700)), "700ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1.5m");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "ring", "rings"), "1 ring");
        assert_eq!(format_count(3, "ring", "rings"), "3 rings");
    }

    #[test]
    fn test_ready_line_reports_counters() {
        let line = ready_line(&loaded_view(), Duration::from_millis(700));
        assert_eq!(line, "Analysis ready in 700ms: 1 account flagged, 1 ring");
    }

    #[test]
    fn test_settle_follows_notice() {
        let loader = Loader::hidden();
        let mut view = loaded_view();
        assert!(loader.settle(&view, Duration::ZERO));

        view.notice = Some(ringscope_report::types::ErrorNotice {
            kind: ringscope_report::types::NoticeKind::Transport,
            message: "connection refused".into(),
            retryable: true,
        });
        assert!(!loader.settle(&view, Duration::ZERO));
    }
}
