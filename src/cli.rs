use crate::report::{Smoothing, Tolerances};
use crate::{CANONICAL_PATH, MIRROR_PATH};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Snap, locate and validate GPS track data for the hike map.
#[derive(Debug, Parser)]
#[command(name = "trail-snap", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Move camp and trailhead markers onto the route at their planned mileage.
    Snap {
        #[arg(long, default_value = CANONICAL_PATH)]
        data: PathBuf,

        /// Secondary copy written after the canonical file.
        #[arg(long, default_value = MIRROR_PATH)]
        mirror: PathBuf,

        #[arg(long)]
        no_mirror: bool,

        /// JSON object mapping feature names to original [lon, lat].
        #[arg(long)]
        overrides: Option<PathBuf>,

        /// Report the snapped positions without writing any file.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the coordinate found a given number of miles along the route.
    Locate {
        #[arg(allow_negative_numbers = true)]
        miles: f64,

        #[arg(long, default_value = CANONICAL_PATH)]
        data: PathBuf,
    },

    /// Distance and elevation statistics for the whole route.
    Stats {
        #[arg(long, default_value = CANONICAL_PATH)]
        data: PathBuf,

        #[command(flatten)]
        smoothing: SmoothingArgs,
    },

    /// Elevation and distance between consecutive day stops.
    DayStats {
        #[arg(long, default_value = CANONICAL_PATH)]
        data: PathBuf,

        #[command(flatten)]
        smoothing: SmoothingArgs,
    },

    /// Replace the route path with a GPX or FIT track.
    Import {
        /// Track file (.gpx, .gpx.gz, .fit, .fit.gz) or a directory holding one.
        track: PathBuf,

        /// Hike data files to update.
        #[arg(long = "target", default_values = [CANONICAL_PATH, MIRROR_PATH])]
        targets: Vec<PathBuf>,
    },

    /// Fail if the route drifted from its source track.
    CheckSync {
        /// Track file or a directory holding one.
        track: PathBuf,

        #[arg(long, default_value = CANONICAL_PATH)]
        data: PathBuf,

        #[command(flatten)]
        tolerances: ToleranceArgs,
    },
}

#[derive(Debug, Args)]
pub struct SmoothingArgs {
    /// Moving-average window, in points.
    #[arg(long, default_value_t = Smoothing::default().window)]
    pub window: usize,

    /// Minimum elevation change counted as gain or loss, in feet.
    #[arg(long, default_value_t = Smoothing::default().threshold_ft)]
    pub threshold_ft: f64,
}

impl From<&SmoothingArgs> for Smoothing {
    fn from(args: &SmoothingArgs) -> Self {
        Smoothing {
            window: args.window,
            threshold_ft: args.threshold_ft,
        }
    }
}

#[derive(Debug, Args)]
pub struct ToleranceArgs {
    #[arg(long, default_value_t = Tolerances::default().distance_miles)]
    pub max_distance_drift: f64,

    #[arg(long, default_value_t = Tolerances::default().coordinate_degrees)]
    pub max_coordinate_drift: f64,

    #[arg(long, default_value_t = Tolerances::default().elevation_feet)]
    pub max_elevation_drift: f64,
}

impl From<&ToleranceArgs> for Tolerances {
    fn from(args: &ToleranceArgs) -> Self {
        Tolerances {
            distance_miles: args.max_distance_drift,
            coordinate_degrees: args.max_coordinate_drift,
            elevation_feet: args.max_elevation_drift,
        }
    }
}
