use glam::Vec2;
use tile_twister_core::{CellIndex, Floor, Region, Tint, CELLS_PER_FLOOR};

/// Transient drawing state of one cell slot.
///
/// Presentation belongs to the index, not to the record stored there, so
/// it stays put when transforms relocate cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPresentation {
    opacity: f32,
    tint: Option<Tint>,
    offset: Vec2,
}

impl CellPresentation {
    const REST: Self = Self {
        opacity: 1.0,
        tint: None,
        offset: Vec2::ZERO,
    };

    /// Opacity in the range 0.0..=1.0.
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Highlight applied to the slot, if any.
    #[must_use]
    pub const fn tint(&self) -> Option<Tint> {
        self.tint
    }

    /// Displacement from the resting position, measured in cells.
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Reports whether the slot is drawn exactly as at rest.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        *self == Self::REST
    }
}

impl Default for CellPresentation {
    fn default() -> Self {
        Self::REST
    }
}

/// Presentation layer for every slot of the level.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    cells: Vec<CellPresentation>,
    spins: Vec<f32>,
}

impl Presentation {
    pub(crate) fn new(floor_count: u32) -> Self {
        Self {
            cells: vec![CellPresentation::REST; (floor_count * CELLS_PER_FLOOR) as usize],
            spins: vec![0.0; floor_count as usize],
        }
    }

    /// Drawing state of a single slot.
    #[must_use]
    pub fn cell(&self, index: CellIndex) -> CellPresentation {
        self.cells[index.as_usize()]
    }

    /// Visual rotation of a floor in degrees, positive is clockwise.
    #[must_use]
    pub fn floor_spin(&self, floor: Floor) -> f32 {
        self.spins[floor.get() as usize]
    }

    /// Reports whether every slot on the floor, and the floor itself, is at rest.
    #[must_use]
    pub fn is_at_rest(&self, floor: Floor) -> bool {
        self.floor_spin(floor) == 0.0
            && Region::Floor(floor)
                .indices()
                .all(|index| self.cell(index).is_at_rest())
    }

    pub(crate) fn set_opacity(&mut self, region: Region, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        self.update(region, |slot| slot.opacity = opacity);
    }

    pub(crate) fn set_tint(&mut self, region: Region, tint: Option<Tint>) {
        self.update(region, |slot| slot.tint = tint);
    }

    pub(crate) fn set_offset(&mut self, region: Region, offset: Vec2) {
        self.update(region, |slot| slot.offset = offset);
    }

    pub(crate) fn set_spin(&mut self, floor: Floor, degrees: f32) {
        self.spins[floor.get() as usize] = degrees;
    }

    pub(crate) fn reset(&mut self, floor: Floor) {
        self.update(Region::Floor(floor), |slot| *slot = CellPresentation::REST);
        self.set_spin(floor, 0.0);
    }

    fn update(&mut self, region: Region, mut change: impl FnMut(&mut CellPresentation)) {
        for index in region.indices() {
            change(&mut self.cells[index.as_usize()]);
        }
    }
}
