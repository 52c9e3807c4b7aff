//! Command-line arguments for the flame chart tool

use std::path::PathBuf;
use clap::{Parser, Subcommand};

/// Render trace-event profiles (Bazel `--profile`, Chrome tracing) as flame charts
#[derive(Parser, Debug, Clone)]
#[command(name = "flame_chart")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Colored console logging at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file overriding the default chart style
    #[arg(long, value_name = "STYLE_TOML", global = true)]
    pub style: Option<PathBuf>,

    /// Chart width in pixels, scrollbar included
    #[arg(long, default_value_t = 1200.0, global = true)]
    pub width: f32,

    /// Chart height in pixels, timestamp header included
    #[arg(long, default_value_t = 600.0, global = true)]
    pub height: f32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the sections, rows and counters found in a profile
    Summary {
        #[arg(value_name = "PROFILE")]
        profile: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a profile to an SVG file
    Render {
        #[arg(value_name = "PROFILE")]
        profile: PathBuf,

        /// Output SVG path
        #[arg(short, long, value_name = "SVG_FILE")]
        output: PathBuf,

        /// Zoom factor applied around `--zoom-at` before rendering
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,

        /// Zoom anchor in pixels from the left edge
        #[arg(long, default_value_t = 0.0)]
        zoom_at: f32,

        /// Vertical scroll offset in pixels
        #[arg(long, default_value_t = 0.0)]
        scroll: f32,
    },

    /// Check that a stylesheet declares the scrollbar width the chart reserves
    CheckCss {
        /// Stylesheet to check; the built-in one when omitted
        #[arg(value_name = "CSS_FILE")]
        stylesheet: Option<PathBuf>,
    },

    /// Print the effective style as TOML
    Style,
}
