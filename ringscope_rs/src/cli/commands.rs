//! Command handlers.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context as _, Result, anyhow, bail};
use ringscope_report::types::{DetailPanel, RingCard, Theme};
use ringscope_report::{JsAssets, render_dashboard};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{Cli, Command, RenderFormat, ThemeAction};
use crate::colors::Painter;
use crate::config::RingscopeConfig;
use crate::dashboard::{Dashboard, DashboardApp, DashboardView};
use crate::error::TransportError;
use crate::integrity;
use crate::layout::HeadlessSurface;
use crate::progress::{self, Loader, format_count};
use crate::theme::{FilePreferences, MemoryPreferences, PreferenceStore, ThemeSynchronizer};
use crate::types::AnalysisResult;
use crate::upload::{HttpTransport, UploadFile, UploadOrchestrator};

/// Resolved global options.
pub struct Context {
    pub painter: Painter,
    pub config: RingscopeConfig,
    pub prefs_path: Option<PathBuf>,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        let config = match &cli.config {
            Some(path) => RingscopeConfig::load_from_path(path),
            None => RingscopeConfig::load(Path::new(".")),
        };
        let prefs_path = cli.prefs.clone().or_else(|| config.preferences_path());
        Self {
            painter: Painter::new(cli.color),
            config,
            prefs_path,
        }
    }

    fn preferences(&self) -> Box<dyn PreferenceStore> {
        match &self.prefs_path {
            Some(path) => Box::new(FilePreferences::new(path)),
            None => {
                warn!("No preference location available, theme changes will not persist");
                Box::new(MemoryPreferences::new())
            }
        }
    }

    /// Dashboard with the saved theme, or `theme` without touching the saved one.
    fn dashboard(&self, theme: Option<Theme>) -> Dashboard<HeadlessSurface> {
        let prefs: Box<dyn PreferenceStore> = match theme {
            Some(theme) => Box::new(MemoryPreferences::with_theme(theme)),
            None => self.preferences(),
        };
        Dashboard::new(
            HeadlessSurface::new(),
            prefs,
            self.config.dashboard_options(),
        )
    }

    fn with_server(&self, server: Option<&str>) -> RingscopeConfig {
        let mut config = self.config.clone();
        if let Some(base) = server {
            config.server.base_url = base.to_string();
        }
        config
    }
}

pub async fn run(cli: Cli) -> Result<ExitCode> {
    let ctx = Context::from_cli(&cli);
    match cli.command {
        Command::Upload {
            csv,
            server,
            out,
            save_payload,
        } => {
            run_upload(
                &ctx,
                &csv,
                server.as_deref(),
                out.as_deref(),
                save_payload.as_deref(),
            )
            .await
        }
        Command::Render {
            payload,
            out,
            format,
            theme,
            vis_network,
        } => run_render(&ctx, &payload, out.as_deref(), format, theme, vis_network),
        Command::Inspect {
            payload,
            account,
            json,
        } => run_inspect(&ctx, &payload, &account, json),
        Command::Rings {
            payload,
            theme,
            json,
        } => run_rings(&ctx, &payload, theme, json),
        Command::Check { payload, json } => run_check(&ctx, &payload, json),
        Command::Theme { action } => run_theme(&ctx, action.unwrap_or(ThemeAction::Show)),
        Command::Download { server, out } => run_download(&ctx, server.as_deref(), &out).await,
    }
}

fn read_payload(path: &Path) -> Result<AnalysisResult> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read payload {}", path.display()))?;
    AnalysisResult::from_json(&body).with_context(|| format!("{} is not an analysis", path.display()))
}

fn loaded_dashboard(
    ctx: &Context,
    payload: &Path,
    theme: Option<Theme>,
) -> Result<Dashboard<HeadlessSurface>> {
    let result = read_payload(payload)?;
    let mut dashboard = ctx.dashboard(theme);
    dashboard.load(result)?;
    Ok(dashboard)
}

fn write_or_print(out: Option<&Path>, content: &str) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            progress::wrote(path);
        }
        None => print!("{content}"),
    }
    Ok(())
}

async fn run_upload(
    ctx: &Context,
    csv: &Path,
    server: Option<&str>,
    out: Option<&Path>,
    save_payload: Option<&Path>,
) -> Result<ExitCode> {
    let config = ctx.with_server(server);
    let file = UploadFile::from_path(csv)?;
    let transport = HttpTransport::from_config(&config.server)?;

    let dashboard = Dashboard::new(
        HeadlessSurface::new(),
        ctx.preferences(),
        config.dashboard_options(),
    );
    let app = Arc::new(RwLock::new(DashboardApp::new(dashboard)));
    let orchestrator = UploadOrchestrator::new(transport, Arc::clone(&app));

    let loader = Loader::upload(&file.file_name);
    let started = Instant::now();
    let report = orchestrator.submit_and_settle(file).await;
    let app = app.read().await;
    let dashboard = app.dashboard();
    let view = dashboard.view();

    if let Err(e) = report {
        loader.fail(&e.to_string());
        bail!("upload could not be rendered: {e}");
    }
    if !loader.settle(view, started.elapsed()) {
        return Ok(ExitCode::FAILURE);
    }

    print_view(&ctx.painter, view);

    if let Some(path) = save_payload
        && let Some(result) = dashboard.snapshot()
    {
        let body = serde_json::to_string_pretty(result.as_ref())?;
        write_or_print(Some(path), &body)?;
    }
    if let Some(path) = out {
        let html = render_dashboard(&dashboard.export(), &JsAssets::cdn());
        write_or_print(Some(path), &html)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn run_render(
    ctx: &Context,
    payload: &Path,
    out: Option<&Path>,
    format: RenderFormat,
    theme: Option<Theme>,
    vis_network: Option<String>,
) -> Result<ExitCode> {
    let dashboard = loaded_dashboard(ctx, payload, theme)?;
    let content = match format {
        RenderFormat::Html => {
            let assets = match vis_network {
                Some(path) => JsAssets {
                    vis_network_path: path,
                },
                None => JsAssets::cdn(),
            };
            render_dashboard(&dashboard.export(), &assets)
        }
        RenderFormat::Dot => dashboard
            .view()
            .graph
            .as_ref()
            .map(|graph| graph.to_dot())
            .ok_or_else(|| anyhow!("nothing rendered"))?,
        RenderFormat::Json => {
            let view = dashboard.view();
            let mut body = serde_json::to_string_pretty(&serde_json::json!({
                "theme": view.theme,
                "graph": view.graph,
                "rings": view.rings,
            }))?;
            body.push('\n');
            body
        }
    };
    debug!(format = ?format, bytes = content.len(), "rendered");
    write_or_print(out, &content)?;
    Ok(ExitCode::SUCCESS)
}

fn run_inspect(ctx: &Context, payload: &Path, account: &str, json: bool) -> Result<ExitCode> {
    let mut dashboard = loaded_dashboard(ctx, payload, None)?;
    let panel = dashboard
        .select(&[account.to_string()])
        .cloned()
        .ok_or_else(|| anyhow!("no detail panel for {account}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&panel)?);
    } else {
        print_panel(&ctx.painter, &panel);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_rings(ctx: &Context, payload: &Path, theme: Option<Theme>, json: bool) -> Result<ExitCode> {
    let dashboard = loaded_dashboard(ctx, payload, theme)?;
    let rings = &dashboard.view().rings;
    if json {
        println!("{}", serde_json::to_string_pretty(rings)?);
    } else {
        print_rings(&ctx.painter, rings);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_check(ctx: &Context, payload: &Path, json: bool) -> Result<ExitCode> {
    let result = read_payload(payload)?;
    let report = integrity::check(&result);
    let p = &ctx.painter;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_clean() {
        println!("{}", p.status_ok("No broken references"));
    } else {
        for violation in &report.violations {
            println!("{}", p.status_warn(&violation.to_string()));
        }
        println!(
            "{}",
            p.status_error(&format_count(report.violations.len(), "problem", "problems"))
        );
    }

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_theme(ctx: &Context, action: ThemeAction) -> Result<ExitCode> {
    let Some(path) = &ctx.prefs_path else {
        bail!("no preference file location; pass --prefs PATH");
    };
    let mut sync = ThemeSynchronizer::new(Box::new(FilePreferences::new(path)));

    match action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            sync.toggle(&Default::default());
        }
        ThemeAction::Set { theme } => {
            if sync.theme() != theme {
                sync.toggle(&Default::default());
            }
        }
    }

    // toggle() only logs write failures
    let stored = FilePreferences::new(path)
        .get(crate::theme::THEME_PREFERENCE_KEY)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if !matches!(action, ThemeAction::Show) && stored.as_deref() != Some(sync.theme().as_str()) {
        bail!("could not save theme to {}", path.display());
    }
    println!("{}", sync.theme());
    Ok(ExitCode::SUCCESS)
}

async fn run_download(ctx: &Context, server: Option<&str>, out: &Path) -> Result<ExitCode> {
    let config = ctx.with_server(server);
    let transport = HttpTransport::from_config(&config.server)?;

    let loader = Loader::download();
    match transport.download().await {
        Ok(body) => {
            loader.writing(out);
            let written = write_or_print(Some(out), &body);
            loader.clear();
            written?;
            Ok(ExitCode::SUCCESS)
        }
        Err(TransportError::NoResults) => {
            loader.fail("No analysis available yet; upload a CSV first");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            loader.fail(&e.to_string());
            Err(e.into())
        }
    }
}

// ============================================================================
// Terminal formatting
// ============================================================================

fn print_view(p: &Painter, view: &DashboardView) {
    if let Some(counters) = &view.counters {
        println!("{}", p.header("Summary"));
        println!(
            "  Accounts analyzed:   {}",
            p.number(counters.total_accounts_analyzed)
        );
        println!(
            "  Suspicious flagged:  {}",
            p.number(counters.suspicious_accounts_flagged)
        );
        println!("  Fraud rings:         {}", p.number(counters.fraud_rings_detected));
        println!(
            "  Processing time:     {}s",
            p.number(counters.processing_time_seconds)
        );
        println!();
    }
    if let Some(graph) = &view.graph {
        println!(
            "{} {} nodes, {} edges, {} flagged",
            p.header("Graph"),
            p.number(graph.nodes.len()),
            p.number(graph.edges.len()),
            p.flagged(&graph.flagged_count().to_string()),
        );
        println!();
    }
    print_rings(p, &view.rings);
}

fn print_rings(p: &Painter, rings: &[RingCard]) {
    if rings.is_empty() {
        println!("{}", p.dim("No fraud rings detected"));
        return;
    }
    println!(
        "{}",
        p.header(&format!(
            "Fraud rings ({})",
            format_count(rings.len(), "ring", "rings")
        ))
    );
    for card in rings {
        println!(
            "  {} {}  {}  Risk: {}",
            p.swatch("■", &card.style.background),
            p.ring(&card.ring_id),
            p.pattern(&card.pattern_label),
            p.risk(card.risk_score)
        );
        println!("    {}", card.members_path);
    }
}

fn print_panel(p: &Painter, panel: &DetailPanel) {
    let id = if panel.is_clean() {
        p.clean(panel.account_id())
    } else {
        p.flagged(panel.account_id())
    };
    println!("{} {}", p.header("Account"), id);
    for line in panel.body_lines() {
        println!("  {line}");
    }
}
