//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{error, info};

use landscape::{Benchmark, LossProjection};
use mesh_format::Bounds;
use renderer::{output_path, render_line_chart, ProjectionMode, RenderConfig, RenderStyle, Series};
use run_log::RunLog;

/// Flatten arguments that may each hold several comma- or space-separated
/// paths.
pub fn split_inputs(args: &[String]) -> Vec<PathBuf> {
    args.iter()
        .flat_map(|arg| arg.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

pub fn load_style(path: Option<&Path>) -> Result<RenderStyle> {
    match path {
        Some(path) => {
            let style = RenderStyle::from_file(path)
                .with_context(|| format!("Failed to load style {}", path.display()))?;
            info!(path = %path.display(), colormap = %style.colormap, "Loaded style");
            Ok(style)
        }
        None => Ok(RenderStyle::default()),
    }
}

pub fn render_config(
    style: Option<&Path>,
    mode: ProjectionMode,
    contour: bool,
    label_suffix: Option<String>,
) -> Result<RenderConfig> {
    Ok(RenderConfig {
        contour,
        mode,
        label_suffix,
        style: load_style(style)?,
    })
}

/// Decode and render one mesh file.
fn plot_file(path: &Path, config: &RenderConfig) -> Result<Vec<PathBuf>> {
    let grid = mesh_format::decode(path).with_context(|| format!("Failed to decode {}", path.display()))?;
    renderer::render(&grid, path, config).with_context(|| format!("Failed to render {}", path.display()))
}

/// Render every input, continuing past failures.
///
/// Returns an error naming the failure count if any input failed.
pub fn plot_files(paths: &[PathBuf], config: &RenderConfig) -> Result<()> {
    let projections = config.mode.projection_names();
    let mut failed = 0;

    for path in paths {
        for name in &projections {
            if projections.len() > 1 {
                println!("plotting {} ({}) ...", path.display(), name);
            } else {
                println!("plotting {} ...", path.display());
            }
        }

        match plot_file(path, config) {
            Ok(written) => info!(input = %path.display(), outputs = written.len(), "Plotted"),
            Err(e) => {
                let message = format!("{:#}", e);
                error!(input = %path.display(), error = %message, "Plot failed");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} inputs failed", failed, paths.len());
    }
    Ok(())
}

/// `--bounds` values, or the benchmark's default domain.
pub fn parse_bounds(values: Option<&[f64]>, benchmark: Benchmark) -> Result<Bounds> {
    match values {
        None => Ok(benchmark.default_bounds()),
        Some(&[x_min, y_min, x_max, y_max]) => Ok(Bounds::new(x_min, y_min, x_max, y_max)),
        Some(other) => bail!("--bounds takes 4 values, got {}", other.len()),
    }
}

/// Sample `benchmark` and write its mesh into `out_dir`.
pub fn generate(
    benchmark: Benchmark,
    width: usize,
    height: usize,
    bounds: Bounds,
    step: &str,
    out_dir: &Path,
) -> Result<PathBuf> {
    let projection = LossProjection::new(width, height, bounds).context("Invalid mesh layout")?;
    let path = projection
        .save(&benchmark, step, out_dir)
        .with_context(|| format!("Failed to write {} mesh into {}", benchmark, out_dir.display()))?;

    println!("generated {}", path.display());
    Ok(path)
}

/// Write `<stem>_global_best.png` and, for grouped logs, `<stem>_groups.png`
/// beside the CSV.
pub fn chart_log(csv: &Path, style: &RenderStyle) -> Result<Vec<PathBuf>> {
    let log = RunLog::read(csv).with_context(|| format!("Failed to read run log {}", csv.display()))?;
    if log.is_empty() {
        bail!("run log {} has no records", csv.display());
    }

    let to_points = |points: Vec<(u64, f64)>| -> Vec<(f64, f64)> {
        points.into_iter().map(|(s, v)| (s as f64, v)).collect()
    };

    let mut charts = vec![(
        "global_best",
        vec![Series::new("global best", to_points(log.global_best()))],
    )];
    if log.is_grouped() {
        let groups = log
            .group_series()
            .into_iter()
            .map(|g| Series::new(format!("group {}", g.group), to_points(g.points)))
            .collect();
        charts.push(("groups", groups));
    }

    let mut written = Vec::with_capacity(charts.len());
    for (label, series) in charts {
        let path = output_path(csv, label);
        println!("plotting {} ...", path.display());

        let image = render_line_chart(&series, &style.chart)?;
        std::fs::write(&path, &image.png).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), series = series.len(), "Wrote chart");
        written.push(path);
    }

    Ok(written)
}
