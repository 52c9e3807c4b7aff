//! Subcommand implementations

use std::io::Write;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Serialize;
use ui_flame_chart::{check_scrollbar_sync, FlameChart, FlameChartModel, FlameChartStyle, FLAME_CHART_CSS};
use crate::args::{Cli, Command};
use crate::consts::{APP_DIR_NAME, APP_ORGANIZATION, APP_QUALIFIER, STYLE_FILE_NAME};

pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let style = load_style(cli.style.as_deref())?;

    match &cli.command {
        Command::Summary { profile, json } => summary(profile, *json, out),
        Command::Render { profile, output, zoom, zoom_at, scroll } => {
            let options = RenderOptions {
                width: cli.width,
                height: cli.height,
                zoom: *zoom,
                zoom_at: *zoom_at,
                scroll: *scroll,
            };
            render(profile, output, style, &options, out)
        }
        Command::CheckCss { stylesheet } => check_css(stylesheet.as_deref(), &style, out),
        Command::Style => {
            let toml = style.to_toml_string().context("Failed to serialize style")?;
            write!(out, "{toml}")?;
            Ok(())
        }
    }
}

/// `--style` if given, else `style.toml` in the config dir, else the defaults
fn load_style(path: Option<&Path>) -> Result<FlameChartStyle> {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => default_style_path().filter(|p| p.is_file()),
    };

    match path {
        Some(path) => {
            let style = FlameChartStyle::load(&path)
                .with_context(|| format!("Failed to load style from {}", path.display()))?;
            tracing::info!("[STYLE] loaded {}", path.display());
            Ok(style)
        }
        None => Ok(FlameChartStyle::default()),
    }
}

fn default_style_path() -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_DIR_NAME)?;
    Some(proj_dirs.config_dir().join(STYLE_FILE_NAME))
}

fn read_model(path: &Path) -> Result<FlameChartModel> {
    let profile = profiling::read_profile(path)
        .with_context(|| format!("Failed to load profile {}", path.display()))?;
    Ok(FlameChartModel::build(&profile))
}

#[derive(Debug, Serialize, PartialEq)]
struct ProfileSummary {
    end_time: f64,
    blocks: usize,
    threads: Vec<ThreadSummary>,
    counters: Vec<CounterSummary>,
}

#[derive(Debug, Serialize, PartialEq)]
struct ThreadSummary {
    name: String,
    pid: u64,
    tid: u64,
    rows: usize,
    blocks: usize,
}

#[derive(Debug, Serialize, PartialEq)]
struct CounterSummary {
    name: String,
    tracks: Vec<String>,
    points: usize,
}

impl ProfileSummary {
    fn new(model: &FlameChartModel) -> Self {
        Self {
            end_time: model.end_time,
            blocks: model.block_count(),
            threads: model
                .block_sections
                .iter()
                .map(|s| ThreadSummary {
                    name: s.name.clone(),
                    pid: s.pid,
                    tid: s.tid,
                    rows: s.row_count(),
                    blocks: s.block_count(),
                })
                .collect(),
            counters: model
                .time_series_sections
                .iter()
                .map(|s| CounterSummary {
                    name: s.name.clone(),
                    tracks: s.tracks.iter().map(|t| t.label.clone()).collect(),
                    points: s.tracks.iter().map(|t| t.points.len()).sum(),
                })
                .collect(),
        }
    }
}

fn summary(profile: &Path, json: bool, out: &mut impl Write) -> Result<()> {
    let summary = ProfileSummary::new(&read_model(profile)?);

    if json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}: {:.3}s, {} blocks", profile.display(), summary.end_time, summary.blocks)?;
    writeln!(out, "threads:")?;
    for thread in &summary.threads {
        writeln!(
            out,
            "  {} (pid {}, tid {}): {} rows, {} blocks",
            thread.name, thread.pid, thread.tid, thread.rows, thread.blocks
        )?;
    }
    if !summary.counters.is_empty() {
        writeln!(out, "counters:")?;
        for counter in &summary.counters {
            writeln!(out, "  {} [{}]: {} points", counter.name, counter.tracks.join(", "), counter.points)?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
struct RenderOptions {
    width: f32,
    height: f32,
    zoom: f64,
    zoom_at: f32,
    scroll: f32,
}

fn render(
    profile: &Path,
    output: &Path,
    style: FlameChartStyle,
    options: &RenderOptions,
    out: &mut impl Write,
) -> Result<()> {
    let model = read_model(profile)?;
    let mut chart = FlameChart::new(model, style, options.width, options.height);
    if options.zoom != 1.0 {
        chart.zoom_at(options.zoom_at, options.zoom);
    }
    chart.scroll_by(options.scroll);

    let svg = chart.render_svg();
    std::fs::write(output, &svg).with_context(|| format!("Failed to write {}", output.display()))?;

    let range = chart.viewport().visible_time_range();
    tracing::info!("[RENDER] {:.3}s..{:.3}s -> {}", range.start, range.end, output.display());
    writeln!(out, "Wrote {} ({} bytes)", output.display(), svg.len())?;
    Ok(())
}

fn check_css(stylesheet: Option<&Path>, style: &FlameChartStyle, out: &mut impl Write) -> Result<()> {
    let (name, css) = match stylesheet {
        Some(path) => {
            let css = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read stylesheet {}", path.display()))?;
            (path.display().to_string(), css)
        }
        None => ("built-in stylesheet".to_string(), FLAME_CHART_CSS.to_string()),
    };

    check_scrollbar_sync(style.vertical_scrollbar_width, &css).with_context(|| format!("{name} failed the check"))?;
    writeln!(out, "{name}: scrollbar width {}px OK", style.vertical_scrollbar_width)?;
    Ok(())
}
