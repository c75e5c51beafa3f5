//! mesh-plot: render simulation mesh files and optimizer run logs.
//!
//! ```bash
//! # Heatmaps with contour overlay, one PNG beside each input
//! mesh-plot heatmap zagros_loss_0.data,zagros_loss_1.data
//!
//! # Heatmap and 3D surface
//! mesh-plot plot --mode both --label run3 "a.data b.data"
//!
//! # Sample a benchmark into a mesh file and render it
//! mesh-plot generate --benchmark rastrigin --width 300 --height 300 --render
//!
//! # Charts from a run log
//! mesh-plot log optimization.csv
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use landscape::Benchmark;
use renderer::ProjectionMode;

#[derive(Parser, Debug)]
#[command(name = "mesh-plot")]
#[command(version, about = "Render mesh files and optimizer run logs to PNG")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level
    #[arg(long, global = true, default_value = "info", env = "MESH_PLOT_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render mesh files as heatmaps and/or 3D surfaces
    #[command(alias = "plot")]
    Heatmap {
        /// Input mesh files; each argument may hold several comma- or
        /// space-separated paths
        #[arg(required = true)]
        files: Vec<String>,

        /// Projections to produce: heatmap, surface or both
        #[arg(long, default_value = "heatmap")]
        mode: ProjectionMode,

        /// Skip the contour overlay
        #[arg(long)]
        no_contour: bool,

        /// Suffix appended to output file names
        #[arg(long)]
        label: Option<String>,

        /// JSON style file
        #[arg(long, env = "MESH_PLOT_STYLE")]
        style: Option<PathBuf>,
    },

    /// Sample a benchmark objective into a mesh file
    Generate {
        /// sphere, rastrigin, ackley, griewank or dropwave
        #[arg(short, long, default_value = "sphere")]
        benchmark: Benchmark,

        #[arg(long, default_value = "200")]
        width: usize,

        #[arg(long, default_value = "200")]
        height: usize,

        /// Domain as x_min,y_min,x_max,y_max (default: the benchmark's own)
        #[arg(long, value_delimiter = ',', num_args = 4, allow_negative_numbers = true)]
        bounds: Option<Vec<f64>>,

        /// Step label written into the mesh and its file name
        #[arg(long, default_value = "0")]
        step: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Render a heatmap of the generated mesh
        #[arg(long)]
        render: bool,

        /// JSON style file
        #[arg(long, env = "MESH_PLOT_STYLE")]
        style: Option<PathBuf>,
    },

    /// Chart the best values recorded in an optimizer run log
    Log {
        /// CSV run log
        csv: PathBuf,

        /// JSON style file
        #[arg(long, env = "MESH_PLOT_STYLE")]
        style: Option<PathBuf>,
    },
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Progress lines own stdout; logs go to stderr.
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json)?;

    match cli.command {
        Commands::Heatmap {
            files,
            mode,
            no_contour,
            label,
            style,
        } => {
            let config = commands::render_config(style.as_deref(), mode, !no_contour, label)?;
            commands::plot_files(&commands::split_inputs(&files), &config)
        }
        Commands::Generate {
            benchmark,
            width,
            height,
            bounds,
            step,
            out_dir,
            render,
            style,
        } => {
            let bounds = commands::parse_bounds(bounds.as_deref(), benchmark)?;
            let path = commands::generate(benchmark, width, height, bounds, &step, &out_dir)?;
            if render {
                let config = commands::render_config(style.as_deref(), ProjectionMode::Heatmap, true, None)?;
                commands::plot_files(&[path], &config)?;
            }
            Ok(())
        }
        Commands::Log { csv, style } => {
            let style = commands::load_style(style.as_deref())?;
            commands::chart_log(&csv, &style)?;
            Ok(())
        }
    }
}
