use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use trail_snap::cli::{Cli, Command};
use trail_snap::overrides::ManualOverrides;
use trail_snap::report::{self, RouteStats, SyncReport};
use trail_snap::{Result, Route, io, parsers, snap, units};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Snap {
            data,
            mirror,
            no_mirror,
            overrides,
            dry_run,
        } => {
            let mirror = (!no_mirror).then_some(mirror);
            run_snap(&data, mirror.as_deref(), overrides.as_deref(), dry_run)
        }
        Command::Locate { miles, data } => run_locate(&data, miles),
        Command::Stats { data, smoothing } => {
            let route = load_route(&data)?;
            println!("\n--- Route statistics for {} ---", data.display());
            RouteStats::compute(&route, (&smoothing).into()).print();
            Ok(())
        }
        Command::DayStats { data, smoothing } => {
            let hike_data = io::read_hike_data(&data)?;
            let route = Route::new(hike_data.route_path()?.to_vec())?;
            let stops = report::day_stops(&hike_data, &route);
            let legs = report::day_legs(&stops, &route, (&smoothing).into());
            println!();
            report::print_day_legs(&stops, &legs);
            Ok(())
        }
        Command::Import { track, targets } => run_import(&track, &targets),
        Command::CheckSync {
            track,
            data,
            tolerances,
        } => {
            let hike_data = io::read_hike_data(&data)?;
            let track_path = parsers::read_track(&track)?;
            let sync =
                SyncReport::compare(hike_data.route_path()?, &track_path, (&tolerances).into())?;
            sync.print();
            sync.into_result()?;
            println!("✓ {} matches {}", data.display(), track.display());
            Ok(())
        }
    }
}

fn load_route(data: &Path) -> Result<Route> {
    let hike_data = io::read_hike_data(data)?;
    Route::new(hike_data.route_path()?.to_vec())
}

fn run_snap(
    data: &Path,
    mirror: Option<&Path>,
    overrides: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let mut hike_data = io::read_hike_data(data)?;
    let route = Route::new(hike_data.route_path()?.to_vec())?;
    tracing::info!(
        "Route has {} points over {:.2} miles",
        route.path().len(),
        units::meters_to_miles(route.length_m())
    );

    let overrides = match overrides {
        Some(path) => ManualOverrides::load(path)?,
        None => ManualOverrides::default(),
    };

    let updated = snap::snap_features(&mut hike_data, &route, &overrides)?;

    if dry_run {
        tracing::info!("Dry run, not writing {}", data.display());
    } else {
        io::write_with_mirror(&hike_data, data, mirror)?;
    }

    println!("Updated waypoints:");
    for feature in &updated {
        println!(
            "- {}: {:?} -> [{}, {}] (mile {:.2})",
            feature.name, feature.original, feature.snapped[0], feature.snapped[1], feature.route_mile
        );
    }
    Ok(())
}

fn run_locate(data: &Path, miles: f64) -> Result<()> {
    let route = load_route(data)?;
    let position = route.locate_miles(miles)?;
    let reached = units::meters_to_miles(position.traversed_m);
    if (reached - miles).abs() > 1e-9 {
        tracing::warn!(
            "Mile {} is outside the route; clamped to mile {:.2}",
            miles,
            reached
        );
    }
    match position.elevation {
        Some(elevation) => println!(
            "[{:.6}, {:.6}, {:.1}] (mile {:.2})",
            position.lon, position.lat, elevation, reached
        ),
        None => println!("[{:.6}, {:.6}] (mile {:.2})", position.lon, position.lat, reached),
    }
    Ok(())
}

fn run_import(track: &Path, targets: &[PathBuf]) -> Result<()> {
    let path = parsers::read_track(track)?;
    let with_elevation = path.iter().filter(|p| p.elevation.is_some()).count();
    tracing::info!(
        "Found {} points, {} with elevation",
        path.len(),
        with_elevation
    );

    for target in targets {
        let mut hike_data = io::read_hike_data(target)?;
        tracing::info!(
            "Updating route path in {} with {} points",
            target.display(),
            path.len()
        );
        hike_data.set_route_path(path.clone());
        io::write_hike_data(&hike_data, target)?;
    }

    println!("✓ Imported {} points into {} file(s)", path.len(), targets.len());
    Ok(())
}
