use log::debug;
use tile_twister_core::{indexer, CellIndex, Command, Cue, Floor, FloorShift, Region};

use crate::step::{ramp, StepContext};

const COLLISION: u32 = 0;
const FADE_OUT: (u32, u32) = (10, 24);
const SWITCH: u32 = 25;
const FADE_IN: (u32, u32) = (26, 40);
const RESTORE: u32 = 41;

/// Cross-fades from the origin floor to an adjacent one and hands the
/// displayed floor over at the midpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FloorChangePhases {
    origin: Floor,
    destination: Floor,
}

impl FloorChangePhases {
    pub(crate) const STEP_COUNT: u32 = RESTORE + 1;

    /// # Panics
    ///
    /// Panics when the shift would leave the level.
    pub(crate) fn plan(origin: Floor, shift: FloorShift, floor_count: u32) -> Self {
        let Some(destination) = indexer::floor_change(origin, shift, floor_count) else {
            panic!(
                "no floor {shift:?} from floor {} in a level of {floor_count} floors",
                origin.get()
            );
        };
        Self {
            origin,
            destination,
        }
    }

    pub(crate) fn origin(&self) -> Floor {
        self.origin
    }

    pub(crate) fn destination(&self) -> Floor {
        self.destination
    }

    pub(crate) fn perform(&self, step: u32, ctx: &mut StepContext<'_>) {
        match step {
            COLLISION => ctx.cue(Cue::Collision),
            s if (FADE_OUT.0..=FADE_OUT.1).contains(&s) => {
                if s == FADE_OUT.0 {
                    ctx.cue(Cue::FloorSwitch);
                }
                ctx.set_opacity(
                    Region::Floor(self.origin),
                    1.0 - ramp(s, FADE_OUT.0, FADE_OUT.1),
                );
            }
            SWITCH => self.switch(ctx),
            s if (FADE_IN.0..=FADE_IN.1).contains(&s) => {
                ctx.set_opacity(
                    Region::Floor(self.destination),
                    ramp(s, FADE_IN.0, FADE_IN.1),
                );
            }
            RESTORE => ctx.set_opacity(Region::Floor(self.origin), 1.0),
            _ => {}
        }
    }

    fn switch(&self, ctx: &mut StepContext<'_>) {
        debug!(
            "switching from floor {} to floor {}",
            self.origin.get(),
            self.destination.get()
        );
        ctx.set_opacity(Region::Floor(self.destination), 0.0);
        ctx.submit(Command::SwitchFloor {
            floor: self.destination,
        });
        let player = ctx.player();
        if self.origin.contains(player) {
            ctx.stage_player(landing_cell(player, self.destination));
        }
    }
}

/// Same row and column as the departure cell, one floor over.
fn landing_cell(player: CellIndex, destination: Floor) -> CellIndex {
    player.on_floor(destination)
}
