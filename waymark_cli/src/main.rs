use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use uuid::Uuid;
use waymark_core::*;

#[derive(Parser)]
#[command(name = "waymark")]
#[command(about = "Map-anchored workout log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a workout at a map location
    Add {
        /// Workout kind
        #[arg(long, value_enum)]
        kind: KindArg,

        /// Latitude of the map click
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude of the map click
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Distance in km
        #[arg(long, allow_hyphen_values = true)]
        distance: String,

        /// Duration in minutes
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// Cadence in steps per minute (running only)
        #[arg(long, allow_hyphen_values = true)]
        cadence: Option<String>,

        /// Elevation gain in metres (cycling only)
        #[arg(long, allow_hyphen_values = true)]
        elevation: Option<String>,
    },

    /// List recorded workouts (default)
    List,

    /// Recenter the map on a workout by id
    View {
        /// Workout id as printed by `list`
        id: String,
    },

    /// Erase all workouts and persisted state
    Reset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Running,
    Cycling,
}

impl From<KindArg> for KindField {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Running => KindField::Running,
            KindArg::Cycling => KindField::Cycling,
        }
    }
}

fn main() {
    // Initialize logging
    waymark_core::logging::init();

    let cli = Cli::parse();

    // Validation failures and the like are blocking notices, not panics
    if let Err(e) = run(cli) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let workouts_path = data_dir.join("workouts.json");

    match cli.command {
        Some(Commands::Add {
            kind,
            lat,
            lng,
            distance,
            duration,
            cadence,
            elevation,
        }) => {
            let form = WorkoutForm {
                kind: kind.into(),
                distance,
                duration,
                cadence: cadence.unwrap_or_default(),
                elevation: elevation.unwrap_or_default(),
            };
            cmd_add(&config, &workouts_path, Coordinates::new(lat, lng), &form)
        }
        Some(Commands::List) | None => cmd_list(&config, &workouts_path),
        Some(Commands::View { id }) => cmd_view(&config, &workouts_path, &id),
        Some(Commands::Reset) => cmd_reset(&config, &workouts_path),
    }
}

fn cmd_add(
    config: &Config,
    workouts_path: &Path,
    click: Coordinates,
    form: &WorkoutForm,
) -> Result<()> {
    let mut controller =
        SessionController::open(ConsoleMap, workouts_path, config.map.zoom_level)?;
    controller.map_ready(config.map.start_coordinates());

    controller.handle_map_click(click)?;
    let workout = controller.submit(form)?;

    println!();
    println!("✓ Workout logged!");
    println!("  [{}] {}", workout.id(), workout);
    Ok(())
}

fn cmd_list(config: &Config, workouts_path: &Path) -> Result<()> {
    let controller =
        SessionController::open(ConsoleMap, workouts_path, config.map.zoom_level)?;

    if controller.workouts().is_empty() {
        println!("No workouts recorded yet.");
        return Ok(());
    }

    for workout in controller.workouts() {
        println!("[{}] {}", workout.id(), workout);
    }
    Ok(())
}

fn cmd_view(config: &Config, workouts_path: &Path, id: &str) -> Result<()> {
    let mut controller =
        SessionController::open(ConsoleMap, workouts_path, config.map.zoom_level)?;
    controller.map_ready(config.map.start_coordinates());

    // An unknown or malformed id is a defensive no-op, not an error
    let found = Uuid::parse_str(id)
        .ok()
        .is_some_and(|id| controller.focus_workout(&id));

    if !found {
        println!("No workout found with id {id}");
    }
    Ok(())
}

fn cmd_reset(config: &Config, workouts_path: &Path) -> Result<()> {
    let mut controller =
        SessionController::open(ConsoleMap, workouts_path, config.map.zoom_level)?;
    controller.reset()?;

    println!("✓ All workouts cleared.");
    Ok(())
}
