//! HEXARENA CLI - Inspect and trace board geometry
//!
//! Commands:
//! - board: Render the board with marked cells
//! - cube / neighbors / distance / line: Single geometry queries
//! - visible / walk / targets: Step-by-step ray traces

mod inspect;
mod render;
mod session;
mod trace;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use session::Session;

#[derive(Parser)]
#[command(name = "hexarena")]
#[command(about = "HEXARENA board geometry inspector")]
struct Cli {
    /// Board shape JSON file (default: the 4-5-6-7-6-5-4 arena)
    #[arg(long, global = true, value_name = "FILE")]
    shape: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log every ray step to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the board
    Board(render::BoardArgs),
    /// Cube coordinate of a position
    Cube(inspect::PositionArgs),
    /// Adjacent positions
    Neighbors(inspect::PositionArgs),
    /// Hex distance between two positions
    Distance(inspect::PairArgs),
    /// Whether two positions share a straight line
    Line(inspect::PairArgs),
    /// Line of sight between two positions, with the walked path
    Visible(trace::VisibleArgs),
    /// Walk a ray from a position in a direction
    Walk(trace::WalkArgs),
    /// Every position in line of sight
    Targets(trace::TargetsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging (stderr, so stdout stays parseable)
    let filter = if cli.verbose {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let session = Session::open(cli.shape.as_deref(), cli.json)?;

    match cli.command {
        Commands::Board(args) => render::run(&session, args),
        Commands::Cube(args) => inspect::run_cube(&session, args),
        Commands::Neighbors(args) => inspect::run_neighbors(&session, args),
        Commands::Distance(args) => inspect::run_distance(&session, args),
        Commands::Line(args) => inspect::run_line(&session, args),
        Commands::Visible(args) => trace::run_visible(&session, args),
        Commands::Walk(args) => trace::run_walk(&session, args),
        Commands::Targets(args) => trace::run_targets(&session, args),
    }
}
