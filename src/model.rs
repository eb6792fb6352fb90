//! # Game of Life World Model
//!
//! This module holds the data model and the generation-update engine for Conway's Game of Life
//! on a bounded rectangle. It provides:
//!
//! - [`WorldSize`] and [`Coord`] describing the fixed rectangular coordinate space
//! - [`Cell`], a tagged variant separating the inert border from simulated interior cells
//! - [`Generation`], one complete snapshot of the world, and [`Generation::tick`] which
//!   produces the next snapshot
//!
//! ## Algorithm
//!
//! The world is a `width x height` rectangle whose outermost ring of cells is a border.
//! Border cells carry no state and never change; they simply count as dead for their
//! interior neighbours. Every interior cell stores the coordinates of its 8 neighbours,
//! computed once when the world is populated.
//!
//! A tick visits every coordinate in row-major order and applies the standard rule:
//! - **Survival**: a live cell with 2 or 3 live neighbours stays alive
//! - **Birth**: a dead cell with exactly 3 live neighbours becomes alive
//! - **Death**: every other cell is dead in the next generation
//!
//! Neighbour counts are always read from the current generation while the next one is
//! written into a fresh buffer, so births and deaths happen simultaneously.
//!
//! ## Example Usage
//!
//! ```
//! use std::collections::HashSet;
//! use gol_console::model::{Coord, Generation, State, WorldSize};
//!
//! let size = WorldSize::new(7, 7);
//! let blinker: HashSet<Coord> = [(3, 2), (3, 3), (3, 4)].into_iter().map(Coord::from).collect();
//! let first = Generation::from_alive(size, &blinker);
//! let second = first.next();
//! assert_eq!(second.state(Coord::new(2, 3)), Some(State::Alive));
//! assert_eq!(second.next(), first);
//! ```

use std::{collections::HashSet, fmt};

use rand::Rng;

use crate::render::{NullSink, Sink, Symbol};

/// Neighbour offsets as `(row, column)` deltas.
///
/// Order: west, south-west, south, south-east, east, north-east, north, north-west.
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Upper bound (inclusive) of the uniform draw used for random population.
const RANDOM_DRAW_MAX: u32 = 20;

/// A random draw strictly above this value yields a live cell (4 in 21 odds).
const RANDOM_ALIVE_ABOVE: u32 = 16;

/// A `(row, column)` position in the world.
///
/// Ordering is row-major, which is also the rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The 8 surrounding coordinates in [`NEIGHBOUR_OFFSETS`] order.
    ///
    /// Only meaningful for interior coordinates, whose neighbours always fall inside the
    /// world (possibly on the border).
    pub fn neighbours(self) -> [Coord; 8] {
        NEIGHBOUR_OFFSETS.map(|(dr, dc)| {
            Coord::new(
                self.row.wrapping_add_signed(dr),
                self.col.wrapping_add_signed(dc),
            )
        })
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Dimensions of the world, border included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldSize {
    pub width: usize,
    pub height: usize,
}

impl WorldSize {
    /// Size used whenever the requested one is malformed.
    pub const DEFAULT: WorldSize = WorldSize::new(80, 40);

    /// Largest number of cells (border included) a world may have.
    pub const MAX_CELLS: usize = 1 << 20;

    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells, border included, saturating at `usize::MAX`.
    pub const fn cell_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Whether both dimensions are positive and the cell count stays within
    /// [`WorldSize::MAX_CELLS`].
    pub const fn is_supported(&self) -> bool {
        match self.width.checked_mul(self.height) {
            Some(cells) => cells > 0 && cells <= Self::MAX_CELLS,
            None => false,
        }
    }

    pub const fn contains(&self, coord: Coord) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    /// Whether `coord` lies on the outermost ring of the world.
    ///
    /// Worlds narrower or shorter than 3 cells consist of border cells only.
    pub const fn is_border(&self, coord: Coord) -> bool {
        coord.row == 0
            || coord.col == 0
            || coord.row + 1 == self.height
            || coord.col + 1 == self.width
    }

    pub const fn is_interior(&self, coord: Coord) -> bool {
        self.contains(coord) && !self.is_border(coord)
    }

    /// Number of simulated (non-border) cells.
    pub const fn interior_count(&self) -> usize {
        self.width.saturating_sub(2) * self.height.saturating_sub(2)
    }

    /// Every coordinate of the world in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Coord::new(row, col)))
    }

    const fn index(&self, coord: Coord) -> usize {
        coord.row * self.width + coord.col
    }
}

impl Default for WorldSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for WorldSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// State of an interior cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Alive,
    Dead,
}

impl State {
    pub const fn is_alive(self) -> bool {
        matches!(self, State::Alive)
    }

    /// Applies the Game of Life rule to a cell in this state.
    ///
    /// # Arguments
    ///
    /// * `alive_neighbours` - Number of live cells among the 8 neighbours
    ///
    /// # Returns
    ///
    /// The state of the cell in the next generation:
    /// - `Alive` with 2 or 3 live neighbours survives
    /// - `Dead` with exactly 3 live neighbours is born
    /// - everything else is `Dead`
    pub const fn next(self, alive_neighbours: usize) -> State {
        match (self, alive_neighbours) {
            (State::Alive, 2 | 3) => State::Alive, // Survival
            (State::Dead, 3) => State::Alive,      // Birth
            _ => State::Dead,                      // Under/overpopulation or stays dead
        }
    }

    pub const fn symbol(self) -> Symbol {
        match self {
            State::Alive => Symbol::Alive,
            State::Dead => Symbol::Dead,
        }
    }
}

impl From<bool> for State {
    fn from(alive: bool) -> Self {
        if alive { State::Alive } else { State::Dead }
    }
}

/// A single cell of a [`Generation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Non-simulated cell on the world's outer ring. Always counts as dead.
    Border,
    /// Simulated cell with its state and fixed neighbour coordinates.
    Interior {
        state: State,
        neighbours: [Coord; 8],
    },
}

impl Cell {
    fn interior(coord: Coord, state: State) -> Self {
        Cell::Interior {
            state,
            neighbours: coord.neighbours(),
        }
    }

    /// The cell's state, or `None` for border cells.
    pub const fn state(&self) -> Option<State> {
        match self {
            Cell::Border => None,
            Cell::Interior { state, .. } => Some(*state),
        }
    }

    pub const fn is_alive(&self) -> bool {
        matches!(
            self,
            Cell::Interior {
                state: State::Alive,
                ..
            }
        )
    }

    pub const fn symbol(&self) -> Symbol {
        match self {
            Cell::Border => Symbol::Border,
            Cell::Interior { state, .. } => state.symbol(),
        }
    }
}

/// One complete snapshot of the world.
///
/// Holds exactly one [`Cell`] per coordinate of the `width x height` rectangle, stored in
/// row-major order. A generation is never mutated after construction; [`Generation::tick`]
/// always builds a new one, and the set of coordinates (and which of them are border cells)
/// is identical for every generation derived from the same initial one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    size: WorldSize,
    cells: Vec<Cell>,
}

impl Generation {
    /// Populates the initial generation.
    ///
    /// Border cells get no state. With a seed, an interior cell is alive iff its coordinate is
    /// in the seed set. Without one, each interior cell is alive when a uniform draw from
    /// `0..=20` exceeds 16, giving a sparse random field with roughly 4/21 of cells alive.
    ///
    /// # Arguments
    ///
    /// * `size` - World dimensions, border included
    /// * `seed` - Initially alive coordinates, or `None` to randomize
    /// * `rng` - Source of randomness, only consulted when `seed` is `None`
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{SeedableRng, rngs::StdRng};
    /// use gol_console::model::{Generation, WorldSize};
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let generation = Generation::populate(WorldSize::new(10, 10), None, &mut rng);
    /// assert_eq!(generation.iter().count(), 100);
    /// ```
    pub fn populate<R: Rng>(
        size: WorldSize,
        seed: Option<&HashSet<Coord>>,
        rng: &mut R,
    ) -> Self {
        match seed {
            Some(alive) => Self::from_alive(size, alive),
            None => Self::build(size, |_| {
                State::from(rng.gen_range(0..=RANDOM_DRAW_MAX) > RANDOM_ALIVE_ABOVE)
            }),
        }
    }

    /// Populates a generation from an explicit set of live coordinates.
    ///
    /// Coordinates outside the interior are ignored.
    pub fn from_alive(size: WorldSize, alive: &HashSet<Coord>) -> Self {
        Self::build(size, |coord| State::from(alive.contains(&coord)))
    }

    fn build(size: WorldSize, mut state_of: impl FnMut(Coord) -> State) -> Self {
        let cells = size
            .coords()
            .map(|coord| {
                if size.is_border(coord) {
                    Cell::Border
                } else {
                    Cell::interior(coord, state_of(coord))
                }
            })
            .collect();
        Self { size, cells }
    }

    pub fn size(&self) -> WorldSize {
        self.size
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        if self.size.contains(coord) {
            self.cells.get(self.size.index(coord))
        } else {
            None
        }
    }

    /// State at `coord`; `None` for border cells and coordinates outside the world.
    pub fn state(&self, coord: Coord) -> Option<State> {
        self.cell(coord).and_then(Cell::state)
    }

    /// All cells with their coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.size.coords().zip(self.cells.iter())
    }

    /// Coordinates of every live cell in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(coord, _)| coord)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Counts the live cells among `neighbours` in this generation.
    ///
    /// Border cells and coordinates outside the world contribute nothing.
    pub fn count_alive_neighbours(&self, neighbours: &[Coord]) -> usize {
        neighbours
            .iter()
            .filter(|&&coord| self.cell(coord).is_some_and(Cell::is_alive))
            .count()
    }

    /// Computes the next generation.
    ///
    /// Every coordinate is visited in row-major order. The visited cell's current symbol is
    /// forwarded to `sink` (with [`Sink::end_row`] after the last column of each row) so a
    /// renderer can draw this generation while the next one is being computed. The sink only
    /// observes; it has no influence on the result.
    ///
    /// # Returns
    ///
    /// A new generation with the same size, the same border cells and the same neighbour
    /// lists, where each interior state is `state.next(alive_neighbours)` counted against
    /// `self`. `self` is left untouched.
    pub fn tick<S: Sink + ?Sized>(&self, sink: &mut S) -> Generation {
        let last_col = self.size.width.saturating_sub(1);
        let cells = self
            .iter()
            .map(|(coord, cell)| {
                sink.cell(coord, cell.symbol());
                if coord.col == last_col {
                    sink.end_row();
                }
                match *cell {
                    Cell::Border => Cell::Border,
                    Cell::Interior { state, neighbours } => Cell::Interior {
                        state: state.next(self.count_alive_neighbours(&neighbours)),
                        neighbours,
                    },
                }
            })
            .collect();

        Generation {
            size: self.size,
            cells,
        }
    }

    /// Computes the next generation without rendering it.
    pub fn next(&self) -> Generation {
        self.tick(&mut NullSink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FrameSink;
    use rand::{SeedableRng, rngs::StdRng};

    fn seed(cells: &[(usize, usize)]) -> HashSet<Coord> {
        cells.iter().copied().map(Coord::from).collect()
    }

    fn alive(generation: &Generation) -> Vec<(usize, usize)> {
        generation.alive_cells().map(|c| (c.row, c.col)).collect()
    }

    #[test]
    fn rule_matches_conway_for_every_count() {
        for count in 0..=8 {
            let survives = State::Alive.next(count) == State::Alive;
            let born = State::Dead.next(count) == State::Alive;
            assert_eq!(survives, count == 2 || count == 3, "alive with {count}");
            assert_eq!(born, count == 3, "dead with {count}");
        }
    }

    #[test]
    fn border_is_outer_ring() {
        let size = WorldSize::new(5, 4);
        let generation = Generation::from_alive(size, &HashSet::new());
        for (coord, cell) in generation.iter() {
            let on_edge = coord.row == 0 || coord.col == 0 || coord.row == 3 || coord.col == 4;
            assert_eq!(*cell == Cell::Border, on_edge, "{coord}");
        }
        assert_eq!(size.interior_count(), 6);
    }

    #[test]
    fn neighbours_follow_fixed_offsets() {
        let neighbours = Coord::new(3, 5).neighbours();
        let expected = [(3, 4), (4, 4), (4, 5), (4, 6), (3, 6), (2, 6), (2, 5), (2, 4)];
        assert_eq!(neighbours, expected.map(Coord::from));
    }

    #[test]
    fn every_interior_neighbour_exists_in_world() {
        for size in [WorldSize::new(3, 3), WorldSize::new(4, 9), WorldSize::new(12, 5)] {
            let generation = Generation::from_alive(size, &HashSet::new());
            for (_, cell) in generation.iter() {
                if let Cell::Interior { neighbours, .. } = cell {
                    assert!(neighbours.iter().all(|&n| generation.cell(n).is_some()));
                }
            }
        }
    }

    #[test]
    fn supported_sizes_are_bounded() {
        assert!(WorldSize::DEFAULT.is_supported());
        assert!(WorldSize::new(1, 1).is_supported());
        assert!(!WorldSize::new(0, 5).is_supported());
        assert!(!WorldSize::new(usize::MAX, 3).is_supported());
        assert_eq!(WorldSize::new(usize::MAX, 3).cell_count(), usize::MAX);
        assert!(!WorldSize::new(WorldSize::MAX_CELLS + 1, 1).is_supported());
    }

    #[test]
    fn degenerate_worlds_have_no_interior() {
        for (w, h) in [(1, 1), (2, 2), (1, 7), (9, 2)] {
            let generation = Generation::from_alive(WorldSize::new(w, h), &seed(&[(0, 0), (1, 1)]));
            assert_eq!(generation.iter().count(), w * h);
            assert!(generation.iter().all(|(_, cell)| *cell == Cell::Border));
            assert_eq!(generation.next(), generation);
        }
    }

    #[test]
    fn seed_outside_interior_is_ignored() {
        let generation = Generation::from_alive(WorldSize::new(5, 5), &seed(&[(0, 2), (2, 2), (9, 9)]));
        assert_eq!(alive(&generation), vec![(2, 2)]);
    }

    #[test]
    fn border_neighbours_never_count() {
        let generation = Generation::from_alive(WorldSize::new(3, 3), &seed(&[(1, 1)]));
        let corner = Coord::new(1, 1);
        assert_eq!(generation.count_alive_neighbours(&corner.neighbours()), 0);
    }

    #[test]
    fn counts_only_live_interior_neighbours() {
        let generation =
            Generation::from_alive(WorldSize::new(6, 6), &seed(&[(1, 1), (1, 2), (2, 1), (3, 3), (4, 4)]));
        assert_eq!(generation.count_alive_neighbours(&Coord::new(2, 2).neighbours()), 4);
        assert_eq!(generation.count_alive_neighbours(&Coord::new(1, 1).neighbours()), 2);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let size = WorldSize::new(7, 7);
        let horizontal = Generation::from_alive(size, &seed(&[(3, 2), (3, 3), (3, 4)]));

        let vertical = horizontal.next();
        assert_eq!(alive(&vertical), vec![(2, 3), (3, 3), (4, 3)]);

        let back = vertical.next();
        assert_eq!(back, horizontal);
    }

    #[test]
    fn block_is_still_life() {
        let block = Generation::from_alive(WorldSize::new(6, 6), &seed(&[(2, 2), (2, 3), (3, 2), (3, 3)]));
        let mut current = block.clone();
        for _ in 0..5 {
            current = current.next();
            assert_eq!(current, block);
        }
    }

    #[test]
    fn tick_leaves_input_untouched() {
        let size = WorldSize::new(7, 7);
        let horizontal = Generation::from_alive(size, &seed(&[(3, 2), (3, 3), (3, 4)]));
        let snapshot = horizontal.clone();
        let _ = horizontal.next();
        assert_eq!(horizontal, snapshot);
    }

    #[test]
    fn tick_keeps_border_and_neighbour_lists() {
        let mut rng = StdRng::seed_from_u64(11);
        let first = Generation::populate(WorldSize::new(9, 6), None, &mut rng);
        let mut current = first.clone();
        for _ in 0..4 {
            current = current.next();
            for ((c0, before), (c1, after)) in first.iter().zip(current.iter()) {
                assert_eq!(c0, c1);
                match (before, after) {
                    (Cell::Border, Cell::Border) => {}
                    (
                        Cell::Interior { neighbours: n0, .. },
                        Cell::Interior { neighbours: n1, .. },
                    ) => assert_eq!(n0, n1),
                    _ => panic!("cell kind changed at {c0}"),
                }
            }
        }
    }

    #[test]
    fn tick_forwards_current_generation_to_sink() {
        let generation = Generation::from_alive(WorldSize::new(4, 3), &seed(&[(1, 1)]));
        let mut sink = FrameSink::default();
        let _ = generation.tick(&mut sink);
        assert_eq!(sink.into_frames(), vec!["####\n#X-#\n####\n".to_string()]);
    }

    #[test]
    fn random_population_is_about_four_in_twenty_one() {
        let mut rng = StdRng::seed_from_u64(2024);
        let size = WorldSize::new(402, 402);
        let generation = Generation::populate(size, None, &mut rng);
        let fraction = generation.population() as f64 / size.interior_count() as f64;
        assert!((fraction - 4.0 / 21.0).abs() < 0.01, "fraction {fraction}");
    }

    #[test]
    fn seeded_population_ignores_rng() {
        let mut rng = StdRng::seed_from_u64(1);
        let generation = Generation::populate(WorldSize::new(5, 5), Some(&HashSet::new()), &mut rng);
        assert_eq!(generation.population(), 0);
    }
}
