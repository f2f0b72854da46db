#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tile Twister engine.
//!
//! This crate defines the vocabulary that connects the level world, the
//! transform animation system, and adapters. The transform system submits
//! [`Command`] values describing grid and presentation mutations, the world
//! executes those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values that adapters react to (redraws, sound cues). The pure
//! index arithmetic used by every transform lives in [`indexer`].

use std::{ops::Range, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub mod indexer;

/// Number of cells along each edge of a floor.
pub const FLOOR_SIDE: u32 = 16;

/// Number of cells along each edge of a quadrant.
pub const QUADRANT_SIDE: u32 = FLOOR_SIDE / 2;

/// Number of cells stored per floor.
pub const CELLS_PER_FLOOR: u32 = FLOOR_SIDE * FLOOR_SIDE;

/// Largest number of floors a level may contain.
pub const MAX_FLOORS: u32 = 10;

/// Kinds of cells that may appear in a level, each with a one-character code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CellKind {
    /// Walkable floor without any behaviour.
    Empty,
    /// Impassable wall.
    Wall,
    /// Cell the player starts the level on.
    Departure,
    /// Cell the player must reach to clear the level.
    Arrival,
    /// Trigger that mirrors the floor across its horizontal midline.
    HorizontalMirror,
    /// Trigger that mirrors the floor across its vertical midline.
    VerticalMirror,
    /// Trigger that exchanges diagonally opposite quadrants.
    Diagonal,
    /// Trigger that moves every quadrant to its neighbouring slot.
    QuarterRotation,
    /// Trigger that rotates the floor a quarter turn counter-clockwise.
    RotateLeft,
    /// Trigger that rotates the floor a quarter turn clockwise.
    RotateRight,
    /// Staircase leading to the floor above.
    StairsUp,
    /// Staircase leading to the floor below.
    StairsDown,
    /// Elevator leading to the floor above.
    ElevatorUp,
    /// Elevator leading to the floor below.
    ElevatorDown,
    /// Animated hazard without a dedicated transform.
    Trap,
}

impl CellKind {
    /// Every kind in code-table order.
    pub const ALL: [CellKind; 15] = [
        Self::Empty,
        Self::Wall,
        Self::Departure,
        Self::Arrival,
        Self::HorizontalMirror,
        Self::VerticalMirror,
        Self::Diagonal,
        Self::QuarterRotation,
        Self::RotateLeft,
        Self::RotateRight,
        Self::StairsUp,
        Self::StairsDown,
        Self::ElevatorUp,
        Self::ElevatorDown,
        Self::Trap,
    ];

    /// One-character code used by level layouts.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => 'W',
            Self::Departure => 'D',
            Self::Arrival => 'A',
            Self::HorizontalMirror => 'H',
            Self::VerticalMirror => 'V',
            Self::Diagonal => 'X',
            Self::QuarterRotation => 'Q',
            Self::RotateLeft => 'L',
            Self::RotateRight => 'R',
            Self::StairsUp => '>',
            Self::StairsDown => '<',
            Self::ElevatorUp => '^',
            Self::ElevatorDown => 'v',
            Self::Trap => 'T',
        }
    }

    /// Resolves a one-character code back into a kind.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Reports whether stepping onto the cell plays a transform animation.
    #[must_use]
    pub const fn is_animated(self) -> bool {
        !matches!(
            self,
            Self::Empty | Self::Wall | Self::Departure | Self::Arrival
        )
    }
}

/// A single cell record: its kind and whether the player has revealed it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    kind: CellKind,
    visible: bool,
}

impl Cell {
    /// Creates a cell with explicit visibility.
    #[must_use]
    pub const fn new(kind: CellKind, visible: bool) -> Self {
        Self { kind, visible }
    }

    /// Creates a cell the player has not uncovered yet.
    #[must_use]
    pub const fn hidden(kind: CellKind) -> Self {
        Self::new(kind, false)
    }

    /// Creates a cell that is already uncovered.
    #[must_use]
    pub const fn revealed(kind: CellKind) -> Self {
        Self::new(kind, true)
    }

    /// Kind of the cell.
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    /// Whether the cell has been uncovered.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Uncovers the cell, returning `true` when the flag changed.
    pub fn reveal(&mut self) -> bool {
        let changed = !self.visible;
        self.visible = true;
        changed
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::hidden(CellKind::Empty)
    }
}

/// Zero-based floor number within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Floor(u32);

impl Floor {
    /// Creates a new floor number.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric floor value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Linear index of the floor's first cell.
    #[must_use]
    pub const fn base(&self) -> CellIndex {
        CellIndex::new(self.0 * CELLS_PER_FLOOR)
    }

    /// Reports whether the provided index lies on this floor.
    #[must_use]
    pub const fn contains(&self, index: CellIndex) -> bool {
        index.get() / CELLS_PER_FLOOR == self.0
    }

    /// Floor reached by following the shift, or `None` below the ground floor.
    #[must_use]
    pub const fn shifted(self, shift: FloorShift) -> Option<Self> {
        match self.0.checked_add_signed(shift.delta()) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

/// Linear address of a cell: `floor * 256 + row * 16 + column`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex(u32);

impl CellIndex {
    /// Wraps a raw linear index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Composes an index from its floor, row and column.
    ///
    /// # Panics
    ///
    /// Panics when `row` or `column` fall outside the floor.
    #[must_use]
    pub const fn from_parts(floor: Floor, row: u32, column: u32) -> Self {
        assert!(
            row < FLOOR_SIDE && column < FLOOR_SIDE,
            "cell outside floor"
        );
        Self(floor.get() * CELLS_PER_FLOOR + row * FLOOR_SIDE + column)
    }

    /// Retrieves the raw linear index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Linear index usable against cell slices.
    #[must_use]
    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Floor holding the cell.
    #[must_use]
    pub const fn floor(&self) -> Floor {
        Floor(self.0 / CELLS_PER_FLOOR)
    }

    /// Row of the cell within its floor.
    #[must_use]
    pub const fn row(&self) -> u32 {
        (self.0 % CELLS_PER_FLOOR) / FLOOR_SIDE
    }

    /// Column of the cell within its floor.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.0 % FLOOR_SIDE
    }

    /// Same row and column on another floor.
    #[must_use]
    pub const fn on_floor(&self, floor: Floor) -> Self {
        Self::from_parts(floor, self.row(), self.column())
    }
}

/// One half of a floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Half {
    /// Rows 0 through 7.
    Top,
    /// Rows 8 through 15.
    Bottom,
    /// Columns 0 through 7.
    Left,
    /// Columns 8 through 15.
    Right,
}

impl Half {
    /// Half on the other side of the shared midline.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// One 8x8 block of a floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// Rows 0-7, columns 0-7.
    TopLeft,
    /// Rows 0-7, columns 8-15.
    TopRight,
    /// Rows 8-15, columns 0-7.
    BottomLeft,
    /// Rows 8-15, columns 8-15.
    BottomRight,
}

impl Quadrant {
    /// All quadrants in reading order.
    pub const ALL: [Quadrant; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Quadrant containing the provided floor-local position.
    #[must_use]
    pub const fn of(row: u32, column: u32) -> Self {
        match (row < QUADRANT_SIDE, column < QUADRANT_SIDE) {
            (true, true) => Self::TopLeft,
            (true, false) => Self::TopRight,
            (false, true) => Self::BottomLeft,
            (false, false) => Self::BottomRight,
        }
    }

    /// Row and column of the quadrant's upper-left cell.
    #[must_use]
    pub const fn origin(self) -> (u32, u32) {
        match self {
            Self::TopLeft => (0, 0),
            Self::TopRight => (0, QUADRANT_SIDE),
            Self::BottomLeft => (QUADRANT_SIDE, 0),
            Self::BottomRight => (QUADRANT_SIDE, QUADRANT_SIDE),
        }
    }
}

/// Contiguous rectangular set of cells on a single floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Every cell on the floor.
    Floor(Floor),
    /// Half of a floor.
    Half {
        /// Floor the half belongs to.
        floor: Floor,
        /// Which half is addressed.
        half: Half,
    },
    /// One quadrant of a floor.
    Quadrant {
        /// Floor the quadrant belongs to.
        floor: Floor,
        /// Which quadrant is addressed.
        quadrant: Quadrant,
    },
}

impl Region {
    /// Floor the region lies on.
    #[must_use]
    pub const fn floor(&self) -> Floor {
        match *self {
            Self::Floor(floor) => floor,
            Self::Half { floor, .. } | Self::Quadrant { floor, .. } => floor,
        }
    }

    /// Row and column ranges covered by the region.
    #[must_use]
    pub fn bounds(&self) -> (Range<u32>, Range<u32>) {
        let full = 0..FLOOR_SIDE;
        let low = 0..QUADRANT_SIDE;
        let high = QUADRANT_SIDE..FLOOR_SIDE;
        match *self {
            Self::Floor(_) => (full.clone(), full),
            Self::Half { half, .. } => match half {
                Half::Top => (low, full),
                Half::Bottom => (high, full),
                Half::Left => (full, low),
                Half::Right => (full, high),
            },
            Self::Quadrant { quadrant, .. } => {
                let (row, column) = quadrant.origin();
                (row..row + QUADRANT_SIDE, column..column + QUADRANT_SIDE)
            }
        }
    }

    /// Cell indices covered by the region in row-major order.
    pub fn indices(&self) -> impl Iterator<Item = CellIndex> {
        let floor = self.floor();
        let (rows, columns) = self.bounds();
        rows.flat_map(move |row| {
            columns
                .clone()
                .map(move |column| CellIndex::from_parts(floor, row, column))
        })
    }
}

/// Direction of a quarter turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spin {
    /// Counter-clockwise, sign `-1`.
    Left,
    /// Clockwise, sign `+1`.
    Right,
}

impl Spin {
    /// Resolves a signed direction, rejecting zero.
    #[must_use]
    pub const fn from_sign(sign: i32) -> Option<Self> {
        if sign > 0 {
            Some(Self::Right)
        } else if sign < 0 {
            Some(Self::Left)
        } else {
            None
        }
    }

    /// Signed direction, `+1` for clockwise.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Direction of a floor change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorShift {
    /// Towards the floor above.
    Up,
    /// Towards the floor below.
    Down,
}

impl FloorShift {
    /// Signed floor delta.
    #[must_use]
    pub const fn delta(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Order in which quadrants trade places during a quarter rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuarterCycle {
    /// Top-left to top-right, top-right to bottom-right, and so on.
    Clockwise,
    /// Top-left to bottom-left, bottom-left to bottom-right, and so on.
    CounterClockwise,
}

impl QuarterCycle {
    /// Slot the quadrant occupies once the cycle completes.
    #[must_use]
    pub const fn destination(self, from: Quadrant) -> Quadrant {
        match (self, from) {
            (Self::Clockwise, Quadrant::TopLeft) => Quadrant::TopRight,
            (Self::Clockwise, Quadrant::TopRight) => Quadrant::BottomRight,
            (Self::Clockwise, Quadrant::BottomRight) => Quadrant::BottomLeft,
            (Self::Clockwise, Quadrant::BottomLeft) => Quadrant::TopLeft,
            (Self::CounterClockwise, Quadrant::TopLeft) => Quadrant::BottomLeft,
            (Self::CounterClockwise, Quadrant::BottomLeft) => Quadrant::BottomRight,
            (Self::CounterClockwise, Quadrant::BottomRight) => Quadrant::TopRight,
            (Self::CounterClockwise, Quadrant::TopRight) => Quadrant::TopLeft,
        }
    }
}

/// Pairing of diagonally opposite quadrants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagonalAxis {
    /// Top-left with bottom-right.
    Main,
    /// Bottom-left with top-right.
    Anti,
}

/// Every timed rearrangement the engine can animate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transform {
    /// Swap rows across the horizontal midline.
    HorizontalMirror,
    /// Swap columns across the vertical midline.
    VerticalMirror,
    /// Exchange diagonally opposite quadrants.
    Diagonal,
    /// Move every quadrant, unrotated, to its neighbouring slot.
    QuarterRotation(QuarterCycle),
    /// Rotate the whole floor by ninety degrees.
    FloorRotate(Spin),
    /// Leave the current floor for an adjacent one.
    FloorChange(FloorShift),
}

impl Transform {
    /// Short human-readable name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HorizontalMirror => "horizontal-mirror",
            Self::VerticalMirror => "vertical-mirror",
            Self::Diagonal => "diagonal",
            Self::QuarterRotation(_) => "quarter-rotation",
            Self::FloorRotate(Spin::Left) => "rotate-left",
            Self::FloorRotate(Spin::Right) => "rotate-right",
            Self::FloorChange(FloorShift::Up) => "floor-up",
            Self::FloorChange(FloorShift::Down) => "floor-down",
        }
    }

    /// Reports whether the transform only ever touches its own floor.
    #[must_use]
    pub const fn is_floor_scoped(&self) -> bool {
        !matches!(self, Self::FloorChange(_))
    }
}

/// Highlight colours applied to quadrants while they are about to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tint {
    /// First alternating highlight.
    Primary,
    /// Second alternating highlight.
    Secondary,
}

/// Audio cues announced by transforms for an external audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// A grid transform begins.
    Transform,
    /// The player bumps into stairs or an elevator.
    Collision,
    /// The level switches to another floor.
    FloorSwitch,
}

/// Monotonic wall-clock instant measured in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from a millisecond count.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Millisecond count of the timestamp.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`, saturating at zero.
    #[must_use]
    pub const fn since(&self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    /// Timestamp shifted forward by the provided duration.
    #[must_use]
    pub fn after(&self, duration: Duration) -> Self {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(millis))
    }
}

/// Relocation of a single cell used by buffered remaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellMove {
    /// Index the cell is read from.
    pub from: CellIndex,
    /// Index the cell is written to.
    pub to: CellIndex,
}

impl CellMove {
    /// Creates a new relocation.
    #[must_use]
    pub const fn new(from: CellIndex, to: CellIndex) -> Self {
        Self { from, to }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Overwrites a single cell record.
    PlaceCell {
        /// Index of the cell to overwrite.
        index: CellIndex,
        /// Record written into the grid.
        cell: Cell,
    },
    /// Moves the player directly, discarding any staged relocation.
    PlacePlayer {
        /// Cell the player occupies afterwards.
        index: CellIndex,
    },
    /// Swaps two cell records.
    ExchangeCells {
        /// First cell of the pair.
        first: CellIndex,
        /// Second cell of the pair.
        second: CellIndex,
    },
    /// Applies a permutation whose sources and destinations may overlap.
    ///
    /// Every source is read before any destination is written.
    RemapCells {
        /// Relocations making up the permutation.
        moves: Vec<CellMove>,
    },
    /// Sets the opacity of every cell in a region.
    SetOpacity {
        /// Cells affected.
        region: Region,
        /// Opacity in the range 0.0..=1.0.
        opacity: f32,
    },
    /// Sets or clears the highlight tint of every cell in a region.
    SetTint {
        /// Cells affected.
        region: Region,
        /// Tint to apply, `None` clears it.
        tint: Option<Tint>,
    },
    /// Displaces every cell in a region, measured in cells.
    SetOffset {
        /// Cells affected.
        region: Region,
        /// Displacement from the resting position.
        offset: Vec2,
    },
    /// Sets the visual rotation of a whole floor.
    SetFloorSpin {
        /// Floor affected.
        floor: Floor,
        /// Rotation in degrees, positive is clockwise.
        degrees: f32,
    },
    /// Restores opacity, tint, offset and spin of a floor to rest.
    ResetPresentation {
        /// Floor affected.
        floor: Floor,
    },
    /// Records where the player will stand once the transform commits.
    StagePlayer {
        /// Pending player cell.
        index: CellIndex,
    },
    /// Moves the player to the staged cell, if any.
    CommitPlayer,
    /// Changes the floor being displayed.
    SwitchFloor {
        /// Floor displayed afterwards.
        floor: Floor,
    },
}

/// Events broadcast by the world and the transform system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Two cell records traded places.
    CellsExchanged {
        /// First cell of the pair.
        first: CellIndex,
        /// Second cell of the pair.
        second: CellIndex,
    },
    /// A buffered permutation was written.
    CellsRemapped {
        /// Number of cells written.
        count: usize,
    },
    /// Presentation of a floor changed.
    PresentationChanged {
        /// Floor affected.
        floor: Floor,
    },
    /// A player relocation was staged.
    PlayerStaged {
        /// Pending player cell.
        index: CellIndex,
    },
    /// The player moved to a new cell.
    PlayerRelocated {
        /// Cell occupied before the commit.
        from: CellIndex,
        /// Cell occupied after the commit.
        to: CellIndex,
    },
    /// A cell was uncovered.
    CellRevealed {
        /// Cell that became visible.
        index: CellIndex,
    },
    /// The displayed floor changed.
    FloorSwitched {
        /// Floor displayed before.
        from: Floor,
        /// Floor displayed after.
        to: Floor,
    },
    /// An audio cue should play.
    SoundCue {
        /// Cue to play.
        cue: Cue,
    },
    /// The grid should be drawn again.
    RedrawRequested {
        /// Floor currently displayed.
        floor: Floor,
    },
    /// A transform animation was created.
    TransformStarted {
        /// Transform being animated.
        transform: Transform,
        /// Floor the transform was started on.
        floor: Floor,
    },
    /// A transform animation executed one phase step.
    TransformStepped {
        /// Transform being animated.
        transform: Transform,
        /// Step that was executed.
        step: u32,
    },
    /// A transform animation reached its terminal step.
    TransformFinished {
        /// Transform that completed.
        transform: Transform,
    },
}
