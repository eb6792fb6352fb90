//! Conway's Game of Life on a bounded console grid.
//!
//! The [`model`] module holds the world and the update rule, [`simulation`] drives it for a
//! number of generations and [`render`] turns generations into text. [`args`] and
//! [`patterns`] supply the initial population.

pub mod args;
pub mod error;
pub mod logging;
pub mod model;
pub mod patterns;
pub mod render;
pub mod simulation;

pub use error::SeedError;
pub use model::{Cell, Coord, Generation, State, WorldSize};
pub use render::{ConsoleSink, Glyphs, Sink, Symbol};
pub use simulation::{RunSummary, Simulation};
