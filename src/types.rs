//! Core data types for the flood engine.
//!
//! The board uses flat `Vec` storage with row-major layout:
//! `cells[y * width + x]` is the strain at column `x`, row `y`.

/// A strain (color) index in `[0, strains)`.
pub type Strain = u8;

/// Orthogonal neighbour offsets. No diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A fixed-size grid of strains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Strain>,
}

impl Board {
    /// Create a board with every cell set to `fill`.
    pub fn new(width: usize, height: usize, fill: Strain) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Wrap existing row-major cells. `cells.len()` must equal `width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Strain>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline(always)]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline(always)]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> Strain {
        self.cells[self.index(x, y)]
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, strain: Strain) {
        let i = self.index(x, y);
        self.cells[i] = strain;
    }

    /// Signed so callers can probe one step past the edge.
    #[inline(always)]
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// In-bounds orthogonal neighbours of `(x, y)`.
    pub fn neighbors4(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        DIRECTIONS.iter().filter_map(move |&(dx, dy)| {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            self.in_bounds(nx, ny).then_some((nx as usize, ny as usize))
        })
    }

    /// Linear indices of the in-bounds orthogonal neighbours of cell `index`.
    pub fn neighbor_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let (x, y) = self.coords(index);
        self.neighbors4(x, y).map(move |(nx, ny)| self.index(nx, ny))
    }

    /// True when every cell holds the same strain.
    pub fn is_uniform(&self) -> bool {
        self.cells.windows(2).all(|w| w[0] == w[1])
    }

    /// Count cells holding `strain`.
    pub fn count(&self, strain: Strain) -> usize {
        self.cells.iter().filter(|&&c| c == strain).count()
    }
}
