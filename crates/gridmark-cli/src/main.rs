//! gridmark CLI - mark map grid cells against a snapshot file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gridmark::prelude::*;
use gridmark::{sample_seed, Place};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridmark")]
#[command(author, version, about = "Mark cells of a map grid and keep them in a snapshot")]
struct Cli {
    /// JSON config file (default: built-in Singapore grid)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot file (.csv or .json), overrides the config
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Cell size in kilometres, overrides the config
    #[arg(long, global = true)]
    cell_size: Option<f64>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the lattice cells in row-major order
    Lattice {
        /// Only print the number of cells
        #[arg(long)]
        count: bool,
    },

    /// Print the address of the cell enclosing a coordinate
    Address {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },

    /// Mark one cell by address
    Mark {
        /// Cell address, e.g. 1.2689_103.8216
        address: String,

        /// State to apply (gold, blue, unset)
        #[arg(long, default_value = "gold")]
        state: String,
    },

    /// Mark every cell of the rectangle spanned by two corners
    #[command(alias = "range")]
    MarkRange {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,

        /// State to apply; use "unset" to revert the range
        #[arg(long, default_value = "gold")]
        state: String,
    },

    /// Mark the built-in sample cells
    Seed {
        #[arg(long, default_value = "gold")]
        state: String,
    },

    /// Remove every mark from the snapshot
    Clear,

    /// Show the marks in the snapshot
    Show,

    /// Look up a place in a gazetteer file
    Search {
        /// Free-text place name
        query: String,

        /// CSV gazetteer with name,lat,lon,address columns
        #[arg(short, long)]
        gazetteer: PathBuf,
    },

    /// Render the grid and marks as GeoJSON
    Render {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave unmarked cells out
        #[arg(long)]
        skip_unset: bool,

        /// Place a marker at the result of this search
        #[arg(long, requires = "gazetteer")]
        search: Option<String>,

        /// CSV gazetteer used by --search
        #[arg(short, long)]
        gazetteer: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Lattice { count } => list_lattice(config, count),
        Commands::Address { lat, lon } => print_address(config, lat, lon),
        Commands::Mark { address, state } => {
            let address = CellAddress::parse(&address)?;
            let state = CellState::parse(&state)?;
            mutate(config, Command::SetCell { address, state })
        }
        Commands::MarkRange {
            lat1,
            lon1,
            lat2,
            lon2,
            state,
        } => mutate(
            config,
            Command::MarkRange {
                a: LatLon::new(lat1, lon1),
                b: LatLon::new(lat2, lon2),
                state: CellState::parse(&state)?,
            },
        ),
        Commands::Seed { state } => mutate(
            config,
            Command::Seed {
                addresses: sample_seed()?,
                state: CellState::parse(&state)?,
            },
        ),
        Commands::Clear => mutate(config, Command::Clear),
        Commands::Show => show(config),
        Commands::Search { query, gazetteer } => search(config, &query, &gazetteer),
        Commands::Render {
            output,
            skip_unset,
            search,
            gazetteer,
        } => render(
            config,
            output.as_deref(),
            skip_unset,
            search.as_deref(),
            gazetteer.as_deref(),
        ),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(cli: &Cli) -> Result<GridConfig> {
    let mut config = match &cli.config {
        Some(path) => GridConfig::from_file(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?,
        None => GridConfig::default(),
    };

    if let Some(snapshot) = &cli.snapshot {
        config.snapshot_path = snapshot.clone();
    }
    if let Some(cell_size) = cli.cell_size {
        config.cell_size_km = cell_size;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Start a session and pull in the saved marks, if any
fn open_session(config: GridConfig) -> Result<GridSession> {
    let mut session = GridSession::new(config).context("Failed to start session")?;
    let outcome = session.apply(Command::Load);
    report(&outcome.notice);
    if outcome.notice.level == NoticeLevel::Error {
        bail!("{}", outcome.notice);
    }
    Ok(session)
}

/// Apply one command and save when it changed anything
fn mutate(config: GridConfig, command: Command) -> Result<()> {
    let mut session = open_session(config)?;

    let outcome = session.apply(command);
    report(&outcome.notice);
    if outcome.notice.level == NoticeLevel::Error {
        bail!("{}", outcome.notice);
    }

    if outcome.changed {
        let saved = session.apply(Command::Save);
        report(&saved.notice);
        if saved.notice.level == NoticeLevel::Error {
            bail!("{}", saved.notice);
        }
    }
    Ok(())
}

fn report(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success | NoticeLevel::Info => eprintln!("{}", notice),
        NoticeLevel::Warning => eprintln!("Warning: {}", notice),
        NoticeLevel::Error => eprintln!("Error: {}", notice),
    }
}

fn list_lattice(config: GridConfig, count: bool) -> Result<()> {
    let grid = Grid::new(config.region, config.cell_size_km)?;
    if count {
        println!("{}", grid.cell_count());
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for cell in grid.cells() {
        let [[south, west], [north, east]] = cell.bounds();
        writeln!(out, "{}\t{}\t{}\t{}\t{}", cell.address, south, west, north, east)
            .context("Failed to write to stdout")?;
    }
    Ok(())
}

fn print_address(config: GridConfig, lat: f64, lon: f64) -> Result<()> {
    let grid = Grid::new(config.region, config.cell_size_km)?;
    let address = grid.address_of(lat, lon);

    println!("{}", address);
    if !grid.contains_address(&address) {
        eprintln!("Warning: ({}, {}) is outside the grid", lat, lon);
    }
    Ok(())
}

fn show(config: GridConfig) -> Result<()> {
    let session = open_session(config)?;
    let store = session.store();

    for (address, state) in store.iter() {
        println!("{}\t{}", address, state);
    }

    let counts = store.count_by_state();
    let summary: Vec<String> = counts
        .iter()
        .map(|(state, n)| format!("{} {}", n, state))
        .collect();
    eprintln!(
        "{} of {} cells marked{}",
        store.len(),
        session.lattice().len(),
        if summary.is_empty() {
            String::new()
        } else {
            format!(" ({})", summary.join(", "))
        }
    );
    Ok(())
}

fn geocoded_session(config: GridConfig, gazetteer: &Path) -> Result<GridSession> {
    let geocoder = GazetteerGeocoder::from_file(gazetteer)
        .with_context(|| format!("Failed to read gazetteer '{}'", gazetteer.display()))?;
    Ok(open_session(config)?.with_geocoder(geocoder))
}

fn search(config: GridConfig, query: &str, gazetteer: &Path) -> Result<()> {
    let mut session = geocoded_session(config, gazetteer)?;

    let place: Place = session.search(query)?;
    let address = session.grid().address_of(place.lat, place.lon);
    println!(
        "{}\t{}\t{}\t{}",
        place.lat,
        place.lon,
        address,
        place.display_address
    );
    println!("state\t{}", session.store().get_state(&address));
    Ok(())
}

fn render(
    config: GridConfig,
    output: Option<&Path>,
    skip_unset: bool,
    search: Option<&str>,
    gazetteer: Option<&Path>,
) -> Result<()> {
    let mut session = match gazetteer {
        Some(path) => geocoded_session(config, path)?,
        None => open_session(config)?,
    };

    if let Some(query) = search {
        let outcome = session.apply(Command::Search {
            query: query.to_string(),
        });
        report(&outcome.notice);
    }

    let renderer = GeoJsonRenderer { skip_unset };
    let text = renderer.render_to_string(&session.scene())?;

    if let Some(path) = output {
        std::fs::write(path, &text)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        eprintln!("Wrote map to '{}'", path.display());
    } else {
        io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?;
    }
    Ok(())
}
