//! Built-in seed catalog.
//!
//! Patterns are stored as `(row, col)` offsets from their top-left corner and placed centred
//! in the world.

use std::collections::HashSet;

use tracing::warn;

use crate::model::{Coord, WorldSize};

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Height and width of the pattern's bounding box.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }

    /// Places the pattern centred in `size`.
    ///
    /// Cells that would fall on the border or outside the world are dropped.
    pub fn place(&self, size: WorldSize) -> HashSet<Coord> {
        let (height, width) = self.extent();
        let top = size.height.saturating_sub(height) / 2;
        let left = size.width.saturating_sub(width) / 2;

        let placed: HashSet<Coord> = self
            .cells
            .iter()
            .map(|&(r, c)| Coord::new(top + r, left + c))
            .filter(|&coord| size.is_interior(coord))
            .collect();

        let dropped = self.cells.len() - placed.len();
        if dropped > 0 {
            warn!(
                pattern = self.name,
                world = %size,
                dropped,
                "pattern does not fit inside the world; some cells were dropped"
            );
        }
        placed
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "gliders",
        cells: &[
            // North-west bound
            (0, 0), (0, 1), (0, 2), (1, 0), (2, 1),
            // North-east bound
            (0, 9), (0, 10), (0, 11), (1, 11), (2, 10),
            // South-west bound
            (9, 1), (10, 0), (11, 0), (11, 1), (11, 2),
            // South-east bound
            (9, 10), (10, 11), (11, 9), (11, 10), (11, 11),
        ],
    },
    Pattern {
        name: "pulsar",
        cells: &[
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "penta",
        cells: &[
            (0, 2), (0, 7),
            (1, 0), (1, 1), (1, 3), (1, 4), (1, 5), (1, 6), (1, 8), (1, 9),
            (2, 2), (2, 7),
        ],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "gosper",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

/// Looks up a pattern by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name.trim()))
}

/// Live cells of the named pattern placed in a world of `size`, or `None` for unknown names.
pub fn get_pattern(name: &str, size: WorldSize) -> Option<HashSet<Coord>> {
    find(name).map(|pattern| pattern.place(size))
}
