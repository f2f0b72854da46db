use glam::Vec2;
use log::debug;
use tile_twister_core::{
    indexer::{self, FloorRemap, QuadrantBlock},
    Command, Floor, QuarterCycle, Region,
};

use crate::step::{ramp, StepContext};

const LAST_SLIDE: u32 = 39;
const REMAP: u32 = 40;

/// Slides every quadrant towards its destination slot, then performs the
/// buffered four-way remap once the slide has covered the full distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct QuarterPhases {
    floor: Floor,
    cycle: QuarterCycle,
}

impl QuarterPhases {
    pub(crate) const STEP_COUNT: u32 = REMAP + 1;

    pub(crate) fn plan(floor: Floor, cycle: QuarterCycle) -> Self {
        Self { floor, cycle }
    }

    pub(crate) fn floor(&self) -> Floor {
        self.floor
    }

    pub(crate) fn perform(&self, step: u32, ctx: &mut StepContext<'_>) {
        match step {
            0..=LAST_SLIDE => {
                let progress = ramp(step, 0, LAST_SLIDE);
                for block in indexer::quadrant_blocks_for_rotation(self.floor, self.cycle) {
                    ctx.submit(Command::SetOffset {
                        region: Region::Quadrant {
                            floor: self.floor,
                            quadrant: block.from,
                        },
                        offset: slide_distance(block) * progress,
                    });
                }
            }
            REMAP => {
                let moves: Vec<_> =
                    indexer::moves_for_quarter_rotation(self.floor, self.cycle).collect();
                debug!(
                    "rotating quadrants on floor {} ({:?})",
                    self.floor.get(),
                    self.cycle
                );
                ctx.submit(Command::RemapCells { moves });
                ctx.stage_remapped_player(self.floor, FloorRemap::Quarter(self.cycle));
                ctx.submit(Command::ResetPresentation { floor: self.floor });
            }
            _ => {}
        }
    }
}

/// Full displacement of a block, `x` along columns and `y` along rows.
fn slide_distance(block: QuadrantBlock) -> Vec2 {
    let (from_row, from_column) = block.from.origin();
    let (to_row, to_column) = block.to.origin();
    Vec2::new(
        to_column as f32 - from_column as f32,
        to_row as f32 - from_row as f32,
    )
}
