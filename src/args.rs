//! # Command Line Arguments and Seed Files
//!
//! This module provides command line argument parsing and seed input for the simulation.
//! It handles:
//!
//! - Parsing command line arguments for generations, world size, seed pattern and output
//! - Sanitizing the requested world size, falling back to 80x40 on malformed input
//! - Loading seeds from JSON seed files or plain-text grids, and exporting generations back
//!   to the JSON format
//!
//! None of the failures here stop the program: a bad world size or an unreadable seed file
//! is reported and replaced with a default.
//!
//! ## Example Usage
//!
//! ```no_run
//! use clap::Parser;
//! use gol_console::args::{self, Args};
//!
//! let args = Args::parse();
//! let seed = args::resolve_seed(&args);
//! println!("world is {}", seed.size);
//! ```

use std::{
    collections::{BTreeMap, HashSet},
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::SeedError,
    model::{Cell, Coord, Generation, State, WorldSize},
    patterns,
    render::Glyphs,
};

/// Command line arguments for the Game of Life simulation.
///
/// ## Examples
///
/// ```bash
/// # Random 80x40 world for 10 generations
/// cargo run
///
/// # Pulsar on a 30x30 world for 100 generations
/// cargo run -- -g 100 -w 30x30 -s pulsar
///
/// # Load a seed file and keep the final generation
/// cargo run -- -f seeds/spaceships.json --export final.json
/// ```
#[derive(Parser, Debug)]
#[command(
    version,
    about = "A simplified implementation of Conway's Game of Life.",
    after_help = "ConwaysGameOfLife"
)]
pub struct Args {
    /// Amount of generations the simulation should run
    #[arg(short = 'g', long, default_value_t = 10)]
    pub generations: usize,

    /// Starting seed pattern. If omitted or unknown, a randomized seed will be used
    ///
    /// Known patterns: block, blinker, toad, beacon, glider, gliders, pulsar, penta,
    /// r-pentomino, gosper.
    #[arg(short = 's', long)]
    pub seed: Option<String>,

    /// Size of the world in terms of width and height, e.g. 80x40
    #[arg(short = 'w', long, visible_alias = "world-size", default_value = "80x40")]
    pub worldsize: String,

    /// Load the starting seed from a file
    ///
    /// Files ending in `.json` use the seed file format; any other file is read as a text
    /// grid where `alive_symbol` marks live cells. Takes precedence over `--seed` and
    /// `--worldsize` when it loads successfully.
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Pause between generations, in milliseconds
    #[arg(short = 'd', long, default_value_t = 200)]
    pub delay_ms: u64,

    /// Stop between generations once this many milliseconds have passed
    #[arg(long)]
    pub time_budget_ms: Option<u64>,

    /// Seed for the random population, for reproducible runs
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// Symbol representing alive cells, in output and in text grids
    #[arg(short = 'a', long, default_value_t = 'X')]
    pub alive_symbol: char,

    /// Symbol representing dead cells
    #[arg(long, default_value_t = '-')]
    pub dead_symbol: char,

    /// Symbol representing border cells
    #[arg(long, default_value_t = '#')]
    pub border_symbol: char,

    /// Do not clear the console before each generation
    #[arg(long)]
    pub no_clear: bool,

    /// Log filter, e.g. `debug` or `gol_console=trace`. `RUST_LOG` takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the final generation to this path as a JSON seed file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Args {
    pub fn glyphs(&self) -> Glyphs {
        Glyphs {
            border: self.border_symbol,
            alive: self.alive_symbol,
            dead: self.dead_symbol,
        }
    }
}

/// Starting point of a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub size: WorldSize,
    /// Initially alive coordinates; `None` requests a random population.
    pub alive: Option<HashSet<Coord>>,
}

/// Parses a world size of the form `<width>x<height>`.
///
/// Malformed input, a zero width or height, or a world with more than
/// [`WorldSize::MAX_CELLS`] cells is reported and replaced with [`WorldSize::DEFAULT`].
pub fn parse_world_size(arg: &str) -> WorldSize {
    let parsed = arg.split_once('x').and_then(|(w, h)| {
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if digits(w) && digits(h) {
            Some((w.parse::<usize>().ok()?, h.parse::<usize>().ok()?))
        } else {
            None
        }
    });

    match parsed {
        Some((0, _)) | Some((_, 0)) => {
            warn!(
                input = arg,
                default = %WorldSize::DEFAULT,
                "Both width and height needs to have positive values above zero"
            );
            WorldSize::DEFAULT
        }
        Some((width, height)) if !WorldSize::new(width, height).is_supported() => {
            warn!(
                input = arg,
                max_cells = WorldSize::MAX_CELLS,
                default = %WorldSize::DEFAULT,
                "World size is too large"
            );
            WorldSize::DEFAULT
        }
        Some((width, height)) => WorldSize::new(width, height),
        None => {
            warn!(
                input = arg,
                default = %WorldSize::DEFAULT,
                "World size should contain width and height, separated by 'x'. Ex: '80x40'"
            );
            WorldSize::DEFAULT
        }
    }
}

/// Works out the world size and initial population from the arguments.
///
/// A seed file that loads wins; otherwise the world size comes from `--worldsize` and the
/// population from the `--seed` pattern, or is left to randomization.
pub fn resolve_seed(args: &Args) -> Seed {
    if let Some(path) = &args.file {
        match import_seed(path, args.alive_symbol) {
            Ok(seed) => {
                info!(
                    path = %path.display(),
                    world = %seed.size,
                    alive = seed.alive.as_ref().map_or(0, HashSet::len),
                    "loaded seed file"
                );
                return seed;
            }
            Err(err) => warn!(
                path = %path.display(),
                %err,
                "could not load seed file, make sure it exists and is well-formed"
            ),
        }
    }

    let size = parse_world_size(&args.worldsize);
    let alive = args.seed.as_deref().and_then(|name| {
        let alive = patterns::get_pattern(name, size);
        if alive.is_none() {
            warn!(pattern = name, "unknown seed pattern, using a randomized seed");
        }
        alive
    });
    Seed { size, alive }
}

/// Loads a seed from `path`, choosing the format by extension.
///
/// # Errors
///
/// Returns [`SeedError`] if the file cannot be read or does not describe a valid world.
pub fn import_seed(path: &Path, alive_symbol: char) -> Result<Seed, SeedError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let content = fs::read_to_string(path)?;
    if is_json {
        parse_seed_json(&content)
    } else {
        parse_text_grid(&content, alive_symbol)
    }
}

/// On-disk seed format.
///
/// `population` maps `"(row, col)"` keys to `null` for border cells or to the cell's state
/// and neighbour coordinates. Files are read with raw `String` keys and written with
/// [`CellKey`]s so exported cells appear in row-major order.
#[derive(Debug, Serialize, Deserialize)]
struct SeedFile<K: Ord> {
    world_size: (usize, usize),
    population: BTreeMap<K, Option<SeedCell>>,
}

/// Population key ordered like [`Coord`] and written as `"(row, col)"`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct CellKey(Coord);

impl Serialize for CellKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SeedCell {
    state: SeedState,
    #[serde(default)]
    neighbours: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SeedState {
    #[serde(alias = "Alive", alias = "ALIVE", alias = "X")]
    Alive,
    #[serde(alias = "Dead", alias = "DEAD", alias = "-")]
    Dead,
}

fn parse_key(key: &str) -> Result<Coord, SeedError> {
    let invalid = || SeedError::InvalidKey(key.to_string());
    let (row, col) = key
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .and_then(|s| s.split_once(','))
        .ok_or_else(invalid)?;
    let row = row.trim().parse().map_err(|_| invalid())?;
    let col = col.trim().parse().map_err(|_| invalid())?;
    Ok(Coord::new(row, col))
}

/// Parses the JSON seed format.
///
/// Stored neighbour lists are ignored; they are recomputed from the world size.
pub fn parse_seed_json(content: &str) -> Result<Seed, SeedError> {
    let file: SeedFile<String> = serde_json::from_str(content)?;
    let (width, height) = file.world_size;
    if width == 0 || height == 0 {
        return Err(SeedError::ZeroSize);
    }
    let size = WorldSize::new(width, height);
    if !size.is_supported() {
        return Err(SeedError::TooLarge { width, height });
    }

    let mut alive = HashSet::new();
    let mut on_border = 0usize;
    for (key, cell) in &file.population {
        let coord = parse_key(key)?;
        if !size.contains(coord) {
            return Err(SeedError::OutOfBounds {
                row: coord.row,
                col: coord.col,
                width,
                height,
            });
        }
        if let Some(SeedCell {
            state: SeedState::Alive,
            ..
        }) = cell
        {
            if size.is_interior(coord) {
                alive.insert(coord);
            } else {
                on_border += 1;
            }
        }
    }

    if on_border > 0 {
        warn!(count = on_border, "ignoring live cells placed on the border");
    }
    Ok(Seed {
        size,
        alive: Some(alive),
    })
}

/// Parses a text grid describing the interior of the world.
///
/// Each line is a row and `alive_symbol` marks live cells; empty lines are skipped. The
/// world gets a one-cell border around the grid, so a `w x h` grid yields a
/// `(w + 2) x (h + 2)` world.
pub fn parse_text_grid(content: &str, alive_symbol: char) -> Result<Seed, SeedError> {
    let lines: Vec<&str> = content.lines().filter(|line| !line.is_empty()).collect();
    let Some(first) = lines.first() else {
        return Err(SeedError::EmptyGrid);
    };

    let width = first.chars().count();
    for (row, line) in lines.iter().enumerate() {
        let len = line.chars().count();
        if len != width {
            return Err(SeedError::RaggedRow {
                row,
                len,
                expected: width,
            });
        }
    }

    let alive = lines
        .iter()
        .enumerate()
        .flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .filter(|&(_, ch)| ch == alive_symbol)
                .map(move |(col, _)| Coord::new(row + 1, col + 1))
        })
        .collect();

    let size = WorldSize::new(width.saturating_add(2), lines.len().saturating_add(2));
    if !size.is_supported() {
        return Err(SeedError::TooLarge {
            width: size.width,
            height: size.height,
        });
    }
    Ok(Seed {
        size,
        alive: Some(alive),
    })
}

/// Writes `generation` to `path` in the JSON seed format.
pub fn export_seed(generation: &Generation, path: &Path) -> Result<(), SeedError> {
    let size = generation.size();
    let population = generation
        .iter()
        .map(|(coord, cell)| {
            let value = match cell {
                Cell::Border => None,
                Cell::Interior { state, neighbours } => Some(SeedCell {
                    state: match state {
                        State::Alive => SeedState::Alive,
                        State::Dead => SeedState::Dead,
                    },
                    neighbours: neighbours.iter().map(|n| (n.row, n.col)).collect(),
                }),
            };
            (CellKey(coord), value)
        })
        .collect();

    let file: SeedFile<CellKey> = SeedFile {
        world_size: (size.width, size.height),
        population,
    };
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &file)?;
    writer.flush()?;
    Ok(())
}
