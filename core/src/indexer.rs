//! Floor-local index arithmetic for every grid transform.
//!
//! The coordinate functions take and return `(row, column)` pairs within a
//! single floor. The generators turn them into the exact index pairs or moves
//! a transform has to process, so callers never iterate over cells they are
//! expected to skip.

use crate::{
    CellIndex, CellMove, DiagonalAxis, Floor, FloorShift, Half, Quadrant, QuarterCycle, Region,
    Spin, Transform, FLOOR_SIDE, QUADRANT_SIDE,
};

const LAST: u32 = FLOOR_SIDE - 1;

/// Reflects a position across the horizontal midline.
#[must_use]
pub const fn mirror_horizontal(row: u32, column: u32) -> (u32, u32) {
    (LAST - row, column)
}

/// Reflects a position across the vertical midline.
#[must_use]
pub const fn mirror_vertical(row: u32, column: u32) -> (u32, u32) {
    (row, LAST - column)
}

/// Moves a position into the diagonally opposite quadrant.
///
/// Top-left pairs with bottom-right and bottom-left with top-right. The
/// position inside the quadrant is kept, so quadrants move as blocks.
#[must_use]
pub const fn diagonal_swap(row: u32, column: u32) -> (u32, u32) {
    (
        (row + QUADRANT_SIDE) % FLOOR_SIDE,
        (column + QUADRANT_SIDE) % FLOOR_SIDE,
    )
}

/// Slot a position moves to when its quadrant follows `cycle`.
#[must_use]
pub const fn quarter_rotation_target(row: u32, column: u32, cycle: QuarterCycle) -> (u32, u32) {
    let from = Quadrant::of(row, column);
    let (from_row, from_column) = from.origin();
    let (to_row, to_column) = cycle.destination(from).origin();
    (row - from_row + to_row, column - from_column + to_column)
}

/// Position after rotating the whole floor by a quarter turn.
#[must_use]
pub const fn rotate_quarter_turn(row: u32, column: u32, spin: Spin) -> (u32, u32) {
    match spin {
        Spin::Right => (column, LAST - row),
        Spin::Left => (LAST - column, row),
    }
}

/// Floor reached by a floor change, or `None` when it would leave the level.
#[must_use]
pub fn floor_change(floor: Floor, shift: FloorShift, floor_count: u32) -> Option<Floor> {
    floor
        .shifted(shift)
        .filter(|destination| destination.get() < floor_count)
}

/// Index permutation performed by a floor-scoped transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloorRemap {
    /// Row `r` trades with row `15 - r`.
    HorizontalMirror,
    /// Column `c` trades with column `15 - c`.
    VerticalMirror,
    /// Quadrants trade with their diagonal opposite.
    Diagonal,
    /// Quadrants move one slot along the cycle.
    Quarter(QuarterCycle),
    /// The floor turns by ninety degrees.
    Rotate(Spin),
}

impl FloorRemap {
    /// Permutation applied by the transform, or `None` when it is not floor-scoped.
    #[must_use]
    pub const fn of(transform: Transform) -> Option<Self> {
        match transform {
            Transform::HorizontalMirror => Some(Self::HorizontalMirror),
            Transform::VerticalMirror => Some(Self::VerticalMirror),
            Transform::Diagonal => Some(Self::Diagonal),
            Transform::QuarterRotation(cycle) => Some(Self::Quarter(cycle)),
            Transform::FloorRotate(spin) => Some(Self::Rotate(spin)),
            Transform::FloorChange(_) => None,
        }
    }

    /// Destination of the cell currently stored at `index`.
    #[must_use]
    pub const fn apply(self, index: CellIndex) -> CellIndex {
        let (row, column) = (index.row(), index.column());
        let (row, column) = match self {
            Self::HorizontalMirror => mirror_horizontal(row, column),
            Self::VerticalMirror => mirror_vertical(row, column),
            Self::Diagonal => diagonal_swap(row, column),
            Self::Quarter(cycle) => quarter_rotation_target(row, column, cycle),
            Self::Rotate(spin) => rotate_quarter_turn(row, column, spin),
        };
        CellIndex::from_parts(index.floor(), row, column)
    }
}

/// Index pairs swapped by a horizontal mirror, one per top-half cell.
pub fn pairs_for_horizontal_mirror(floor: Floor) -> impl Iterator<Item = (CellIndex, CellIndex)> {
    paired(
        Region::Half {
            floor,
            half: Half::Top,
        },
        FloorRemap::HorizontalMirror,
    )
}

/// Index pairs swapped by a vertical mirror, one per left-half cell.
pub fn pairs_for_vertical_mirror(floor: Floor) -> impl Iterator<Item = (CellIndex, CellIndex)> {
    paired(
        Region::Half {
            floor,
            half: Half::Left,
        },
        FloorRemap::VerticalMirror,
    )
}

/// Index pairs swapped when one diagonal pair of quadrants trades places.
pub fn pairs_for_diagonal(
    floor: Floor,
    axis: DiagonalAxis,
) -> impl Iterator<Item = (CellIndex, CellIndex)> {
    let quadrant = match axis {
        DiagonalAxis::Main => Quadrant::TopLeft,
        DiagonalAxis::Anti => Quadrant::BottomLeft,
    };
    paired(Region::Quadrant { floor, quadrant }, FloorRemap::Diagonal)
}

fn paired(region: Region, remap: FloorRemap) -> impl Iterator<Item = (CellIndex, CellIndex)> {
    region.indices().map(move |index| (index, remap.apply(index)))
}

/// Relocation of one whole quadrant during a quarter rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuadrantBlock {
    /// Floor the block lives on.
    pub floor: Floor,
    /// Slot the block leaves.
    pub from: Quadrant,
    /// Slot the block arrives at.
    pub to: Quadrant,
}

impl QuadrantBlock {
    /// Cell relocations making up the block move, preserving the inner pattern.
    pub fn moves(self) -> impl Iterator<Item = CellMove> {
        let (from_row, from_column) = self.from.origin();
        let (to_row, to_column) = self.to.origin();
        let floor = self.floor;
        Region::Quadrant {
            floor,
            quadrant: self.from,
        }
        .indices()
        .map(move |index| {
            let row = index.row() - from_row + to_row;
            let column = index.column() - from_column + to_column;
            CellMove::new(index, CellIndex::from_parts(floor, row, column))
        })
    }
}

/// The four quadrant blocks moved by a quarter rotation.
pub fn quadrant_blocks_for_rotation(
    floor: Floor,
    cycle: QuarterCycle,
) -> impl Iterator<Item = QuadrantBlock> {
    Quadrant::ALL.into_iter().map(move |from| QuadrantBlock {
        floor,
        from,
        to: cycle.destination(from),
    })
}

/// Every cell relocation performed by a quarter rotation.
pub fn moves_for_quarter_rotation(
    floor: Floor,
    cycle: QuarterCycle,
) -> impl Iterator<Item = CellMove> {
    quadrant_blocks_for_rotation(floor, cycle).flat_map(QuadrantBlock::moves)
}

/// Every cell relocation performed by a quarter turn of the whole floor.
pub fn moves_for_floor_rotation(floor: Floor, spin: Spin) -> impl Iterator<Item = CellMove> {
    let remap = FloorRemap::Rotate(spin);
    Region::Floor(floor)
        .indices()
        .map(move |index| CellMove::new(index, remap.apply(index)))
}
