use std::collections::HashSet;

use tile_twister_core::{Cell, CellIndex, CellMove, Floor, CELLS_PER_FLOOR, MAX_FLOORS};

/// Dense, fixed-length storage of every cell in a level.
///
/// Floors are contiguous 256-cell windows. The length never changes after
/// construction; transforms only relocate records and flip visibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    cells: Vec<Cell>,
    floor_count: u32,
}

impl CellGrid {
    pub(crate) fn blank(floor_count: u32) -> Self {
        assert_floor_count(floor_count);
        Self {
            cells: vec![Cell::default(); (floor_count * CELLS_PER_FLOOR) as usize],
            floor_count,
        }
    }

    pub(crate) fn from_cells(cells: Vec<Cell>) -> Self {
        let per_floor = CELLS_PER_FLOOR as usize;
        assert!(
            cells.len() % per_floor == 0,
            "grid length {} is not a multiple of {per_floor}",
            cells.len()
        );
        let floor_count = u32::try_from(cells.len() / per_floor).unwrap_or(u32::MAX);
        assert_floor_count(floor_count);
        Self { cells, floor_count }
    }

    /// Number of floors stored in the grid.
    #[must_use]
    pub fn floor_count(&self) -> u32 {
        self.floor_count
    }

    /// Total number of cells across all floors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; a grid holds at least one floor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the index addresses a stored cell.
    #[must_use]
    pub fn contains(&self, index: CellIndex) -> bool {
        index.as_usize() < self.cells.len()
    }

    /// Reports whether the floor exists in this level.
    #[must_use]
    pub fn has_floor(&self, floor: Floor) -> bool {
        floor.get() < self.floor_count
    }

    /// Record stored at the provided index.
    ///
    /// # Panics
    ///
    /// Panics when the index lies outside the grid.
    #[must_use]
    pub fn cell(&self, index: CellIndex) -> Cell {
        self.check(index);
        self.cells[index.as_usize()]
    }

    /// All cell records in index order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The 256-cell window of a single floor.
    ///
    /// # Panics
    ///
    /// Panics when the floor does not exist.
    #[must_use]
    pub fn floor(&self, floor: Floor) -> &[Cell] {
        self.check_floor(floor);
        let start = floor.base().as_usize();
        &self.cells[start..start + CELLS_PER_FLOOR as usize]
    }

    pub(crate) fn set(&mut self, index: CellIndex, cell: Cell) {
        self.check(index);
        self.cells[index.as_usize()] = cell;
    }

    pub(crate) fn exchange(&mut self, first: CellIndex, second: CellIndex) {
        self.check(first);
        self.check(second);
        self.cells.swap(first.as_usize(), second.as_usize());
    }

    /// Snapshots every source before writing any destination.
    pub(crate) fn remap(&mut self, moves: &[CellMove]) -> usize {
        assert!(is_permutation(moves), "remap must permute its cells");
        let staged: Vec<(CellIndex, Cell)> = moves
            .iter()
            .map(|mv| (mv.to, self.cell(mv.from)))
            .collect();
        for (to, cell) in &staged {
            self.set(*to, *cell);
        }
        staged.len()
    }

    pub(crate) fn reveal(&mut self, index: CellIndex) -> bool {
        self.check(index);
        self.cells[index.as_usize()].reveal()
    }

    pub(crate) fn check(&self, index: CellIndex) {
        assert!(
            self.contains(index),
            "cell index {} outside grid of {} cells",
            index.get(),
            self.cells.len()
        );
    }

    pub(crate) fn check_floor(&self, floor: Floor) {
        assert!(
            self.has_floor(floor),
            "floor {} outside level of {} floors",
            floor.get(),
            self.floor_count
        );
    }
}

fn assert_floor_count(floor_count: u32) {
    assert!(
        (1..=MAX_FLOORS).contains(&floor_count),
        "levels hold between 1 and {MAX_FLOORS} floors, got {floor_count}"
    );
}

fn is_permutation(moves: &[CellMove]) -> bool {
    let sources: HashSet<CellIndex> = moves.iter().map(|mv| mv.from).collect();
    let destinations: HashSet<CellIndex> = moves.iter().map(|mv| mv.to).collect();
    sources.len() == moves.len() && sources == destinations
}
