use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sapper_core::*;
use web_time::{Instant, SystemTime, UNIX_EPOCH};

mod map;

/// Plays Minesweeper boards using only what a player could see.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::WarnLevel>,

    /// Map to play, read from stdin when absent or `-`
    #[arg(conflicts_with = "rows")]
    map: Option<PathBuf>,

    /// Generate a board with this many rows instead of reading a map
    #[arg(long, requires_all = ["columns", "mines"])]
    rows: Option<Coord>,

    /// Columns of the generated board
    #[arg(long, requires = "rows")]
    columns: Option<Coord>,

    /// Mines on the generated board
    #[arg(long, requires = "rows")]
    mines: Option<CellCount>,

    /// Seed for the generated board
    #[arg(short, long)]
    seed: Option<u64>,

    /// Solver settings as a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every decision as a JSON line
    #[arg(long)]
    json: bool,

    /// Print the board after every move
    #[arg(long)]
    show_steps: bool,
}

/// Session that prints the board after each reveal.
struct ShowSteps(PlayEngine);

impl Session for ShowSteps {
    fn reveal(&mut self, coords: Coord2) -> sapper_core::Result<RevealOutcome> {
        let outcome = self.0.reveal(coords)?;
        println!("{}", self.0.render());
        Ok(outcome)
    }

    fn snapshot(&self) -> Snapshot {
        self.0.snapshot()
    }

    fn state(&self) -> EngineState {
        self.0.state()
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SolverConfig::default(),
    };
    log::debug!("solver config: {config:?}");

    let map = load_map(&args)?;
    let mut engine = PlayEngine::new(map.layout);
    if let Some(start) = map.first_click {
        log::debug!("first click at {start:?}");
        engine.reveal(start).context("revealing the first click")?;
        if args.show_steps {
            println!("{}", engine.render());
        }
    }

    let mut solver = Solver::new(config);
    let observe = |decision: &Decision, outcome: RevealOutcome| {
        log::debug!("{decision:?} -> {outcome:?}");
        if args.json {
            match serde_json::to_string(decision) {
                Ok(line) => println!("{line}"),
                Err(err) => log::error!("could not serialize {decision:?}: {err}"),
            }
        }
    };

    let started = Instant::now();
    let state = if args.show_steps {
        let mut session = ShowSteps(engine);
        let state = autoplay(&mut session, &mut solver, observe)?;
        engine = session.0;
        state
    } else {
        autoplay(&mut engine, &mut solver, observe)?
    };
    log::info!("game finished in {:?}", started.elapsed());

    let won = state == EngineState::Won;
    println!("{}", if won { "YOU WIN!" } else { "GAME OVER!" });
    println!("{} {}", engine.visit_count(), engine.step_count());

    Ok(if won { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn load_config(path: &Path) -> Result<SolverConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn load_map(args: &Args) -> Result<map::Map> {
    if let (Some(rows), Some(columns), Some(mines)) = (args.rows, args.columns, args.mines) {
        let seed = args.seed.unwrap_or_else(clock_seed);
        let config = GameConfig::new((rows, columns), mines);
        let start = (config.size.0 / 2, config.size.1 / 2);
        log::info!("generating {config:?} with seed {seed}");

        let layout = RandomLayoutGenerator::new(seed, start, StartTile::AlwaysZero).generate(config);
        return Ok(map::Map {
            layout,
            first_click: Some(start),
        });
    }

    let text = match args.map.as_deref() {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).with_context(|| format!("reading map {}", path.display()))?
        }
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("reading map from stdin")?;
            text
        }
    };
    map::parse(&text)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}
