use log::debug;
use tile_twister_core::{
    indexer::{self, FloorRemap},
    Command, Floor, Spin,
};

use crate::step::{ramp, StepContext};

const LAST_SPIN: u32 = 17;
const REMAP: u32 = 18;
const QUARTER_TURN_DEGREES: f32 = 90.0;

/// Spins the floor visually in small increments, then commits the discrete
/// quarter-turn remap and drops the visual rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RotatePhases {
    floor: Floor,
    spin: Spin,
}

impl RotatePhases {
    pub(crate) const STEP_COUNT: u32 = REMAP + 1;

    pub(crate) fn plan(floor: Floor, spin: Spin) -> Self {
        Self { floor, spin }
    }

    pub(crate) fn floor(&self) -> Floor {
        self.floor
    }

    pub(crate) fn perform(&self, step: u32, ctx: &mut StepContext<'_>) {
        match step {
            0..=LAST_SPIN => {
                let degrees = self.spin.sign() as f32
                    * QUARTER_TURN_DEGREES
                    * ramp(step, 0, LAST_SPIN);
                ctx.submit(Command::SetFloorSpin {
                    floor: self.floor,
                    degrees,
                });
            }
            REMAP => {
                debug!("turning floor {} {:?}", self.floor.get(), self.spin);
                let moves = indexer::moves_for_floor_rotation(self.floor, self.spin).collect();
                ctx.submit(Command::RemapCells { moves });
                ctx.stage_remapped_player(self.floor, FloorRemap::Rotate(self.spin));
                ctx.submit(Command::ResetPresentation { floor: self.floor });
            }
            _ => {}
        }
    }
}
