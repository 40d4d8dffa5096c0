use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mallpath_lib::{
    plan_path, validate, PathPlan, PathRequest, Point, ValidationMode, VenueData, VenueGraph,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Mallpath venue data and pathfinding utilities")]
struct Cli {
    /// Venue JSON file to load instead of the bundled venue.
    #[arg(long, global = true)]
    venue: Option<PathBuf>,

    /// Load venue data despite validation issues.
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the venue data and report every issue found.
    Validate,
    /// Compute a path between two plan coordinates.
    Path {
        /// Start point as `X,Y`.
        #[arg(long = "from", value_parser = parse_point, allow_hyphen_values = true)]
        from: Point,
        /// End point as `X,Y`.
        #[arg(long = "to", value_parser = parse_point, allow_hyphen_values = true)]
        to: Point,
        /// Print the planned path as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the waypoints of the loaded venue.
    Waypoints,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mode = if cli.lenient {
        ValidationMode::Lenient
    } else {
        ValidationMode::Strict
    };

    match cli.command {
        Command::Validate => handle_validate(cli.venue.as_deref(), mode),
        Command::Path { from, to, json } => {
            handle_path(cli.venue.as_deref(), mode, PathRequest::new(from, to), json)
        }
        Command::Waypoints => handle_waypoints(cli.venue.as_deref(), mode),
    }
}

fn parse_point(raw: &str) -> std::result::Result<Point, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{raw}'"))?;
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid x coordinate '{}'", x.trim()))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid y coordinate '{}'", y.trim()))?;
    let point = Point::new(x, y);
    if !point.is_finite() {
        return Err(format!("coordinates must be finite, got '{raw}'"));
    }
    Ok(point)
}

fn venue_label(venue: Option<&Path>) -> String {
    venue
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<bundled>".to_string())
}

fn load_data(venue: Option<&Path>) -> Result<VenueData> {
    match venue {
        Some(path) => VenueData::from_path(path)
            .with_context(|| format!("failed to load venue from {}", path.display())),
        None => VenueData::bundled().context("failed to parse the bundled venue"),
    }
}

fn load_graph(venue: Option<&Path>, mode: ValidationMode) -> Result<VenueGraph> {
    let data = load_data(venue)?;
    VenueGraph::build(data, mode).with_context(|| {
        format!(
            "venue {} failed {} validation (retry with --lenient to load it anyway)",
            venue_label(venue),
            mode
        )
    })
}

fn handle_validate(venue: Option<&Path>, mode: ValidationMode) -> Result<()> {
    let data = load_data(venue)?;
    let issues = validate(&data);

    println!(
        "Venue {}: {} waypoints declared",
        venue_label(venue),
        data.waypoints.len()
    );
    if issues.is_empty() {
        println!("No issues found.");
        return Ok(());
    }

    println!("{} issue(s):", issues.len());
    for issue in &issues {
        println!("- {}", issue);
    }

    if mode == ValidationMode::Strict {
        bail!(
            "venue {} has {} validation issue(s)",
            venue_label(venue),
            issues.len()
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct PathOutput<'a> {
    #[serde(flatten)]
    plan: &'a PathPlan,
    hops: usize,
}

fn handle_path(
    venue: Option<&Path>,
    mode: ValidationMode,
    request: PathRequest,
    json: bool,
) -> Result<()> {
    let graph = load_graph(venue, mode)?;
    let plan = plan_path(&graph, &request).with_context(|| {
        format!(
            "failed to plan a path from ({}, {}) to ({}, {})",
            request.start.x, request.start.y, request.end.x, request.end.y
        )
    })?;

    if json {
        let output = PathOutput {
            plan: &plan,
            hops: plan.hop_count(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Start snapped to {} ({:.2} away)",
        plan.start.id, plan.start.distance
    );
    println!("End snapped to {} ({:.2} away)", plan.end.id, plan.end.distance);
    println!("Path ({} hops):", plan.hop_count());
    for (id, point) in plan.waypoints.iter().zip(&plan.points) {
        println!("- {} ({}, {})", id, point.x, point.y);
    }

    Ok(())
}

fn handle_waypoints(venue: Option<&Path>, mode: ValidationMode) -> Result<()> {
    let graph = load_graph(venue, mode)?;

    if let Some(name) = graph.name() {
        println!("Venue: {}", name);
    }
    println!("{} waypoints:", graph.len());
    for waypoint in graph.waypoints() {
        let position = waypoint
            .position
            .map(|p| format!("({}, {})", p.x, p.y))
            .unwrap_or_else(|| "(no coordinates)".to_string());
        println!(
            "- {} {} degree {}",
            waypoint.id,
            position,
            waypoint.neighbours.len()
        );
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_point_accepts_signed_decimals() {
        assert_eq!(parse_point("205,150").unwrap(), Point::new(205.0, 150.0));
        assert_eq!(parse_point(" -1.5 , 2e1 ").unwrap(), Point::new(-1.5, 20.0));
    }

    #[test]
    fn parse_point_rejects_malformed_input() {
        assert!(parse_point("205").unwrap_err().contains("X,Y"));
        assert!(parse_point("a,1").unwrap_err().contains("x coordinate"));
        assert!(parse_point("1,").unwrap_err().contains("y coordinate"));
        assert!(parse_point("inf,1").unwrap_err().contains("finite"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
