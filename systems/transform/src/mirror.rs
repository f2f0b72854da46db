//! Horizontal and vertical mirror phases.
//!
//! Both mirrors fade one half of the floor out, then the other, swap every
//! mirrored pair while nothing is visible, and fade the halves back in in
//! reverse order.

use log::debug;
use tile_twister_core::{
    indexer::{self, FloorRemap},
    CellIndex, Command, Cue, Floor, Half, Region, QUADRANT_SIDE,
};

use crate::step::{ramp, StepContext};

const FADE_OUT_NEAR: (u32, u32) = (10, 14);
const SNAP_NEAR: u32 = 15;
const FADE_OUT_FAR: (u32, u32) = (16, 20);
const SWAP: u32 = 21;
const FADE_IN_FAR: (u32, u32) = (22, 26);
const SNAP_FAR: u32 = 27;
const FADE_IN_NEAR: (u32, u32) = (28, 32);
const SETTLE: u32 = 33;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MirrorAxis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MirrorPhases {
    axis: MirrorAxis,
    floor: Floor,
    near: Half,
}

impl MirrorPhases {
    pub(crate) const STEP_COUNT: u32 = SETTLE + 1;

    /// The near half is the one holding the player, top or left otherwise.
    pub(crate) fn plan(axis: MirrorAxis, floor: Floor, player: CellIndex) -> Self {
        let on_floor = floor.contains(player);
        let near = match axis {
            MirrorAxis::Horizontal if on_floor && player.row() >= QUADRANT_SIDE => Half::Bottom,
            MirrorAxis::Horizontal => Half::Top,
            MirrorAxis::Vertical if on_floor && player.column() >= QUADRANT_SIDE => Half::Right,
            MirrorAxis::Vertical => Half::Left,
        };
        Self { axis, floor, near }
    }

    pub(crate) fn floor(&self) -> Floor {
        self.floor
    }

    pub(crate) fn perform(&self, step: u32, ctx: &mut StepContext<'_>) {
        let near = self.half(self.near);
        let far = self.half(self.near.opposite());
        match step {
            0 => ctx.cue(Cue::Transform),
            s if in_phase(s, FADE_OUT_NEAR) => {
                ctx.set_opacity(near, 1.0 - ramp(s, FADE_OUT_NEAR.0, FADE_OUT_NEAR.1));
            }
            SNAP_NEAR => ctx.set_opacity(near, 0.0),
            s if in_phase(s, FADE_OUT_FAR) => {
                ctx.set_opacity(far, 1.0 - ramp(s, FADE_OUT_FAR.0, FADE_OUT_FAR.1));
            }
            SWAP => {
                self.swap(ctx);
                ctx.set_opacity(Region::Floor(self.floor), 0.0);
            }
            s if in_phase(s, FADE_IN_FAR) => {
                ctx.set_opacity(far, ramp(s, FADE_IN_FAR.0, FADE_IN_FAR.1));
            }
            SNAP_FAR => {
                ctx.set_opacity(far, 1.0);
                ctx.set_opacity(near, 0.0);
            }
            s if in_phase(s, FADE_IN_NEAR) => {
                ctx.set_opacity(near, ramp(s, FADE_IN_NEAR.0, FADE_IN_NEAR.1));
            }
            SETTLE => ctx.submit(Command::ResetPresentation { floor: self.floor }),
            _ => {}
        }
    }

    fn swap(&self, ctx: &mut StepContext<'_>) {
        let (pairs, remap): (Vec<_>, _) = match self.axis {
            MirrorAxis::Horizontal => (
                indexer::pairs_for_horizontal_mirror(self.floor).collect(),
                FloorRemap::HorizontalMirror,
            ),
            MirrorAxis::Vertical => (
                indexer::pairs_for_vertical_mirror(self.floor).collect(),
                FloorRemap::VerticalMirror,
            ),
        };
        debug!(
            "mirroring {} pairs on floor {} ({:?})",
            pairs.len(),
            self.floor.get(),
            self.axis
        );
        for (first, second) in pairs {
            ctx.submit(Command::ExchangeCells { first, second });
        }
        ctx.stage_remapped_player(self.floor, remap);
    }

    fn half(&self, half: Half) -> Region {
        Region::Half {
            floor: self.floor,
            half,
        }
    }
}

fn in_phase(step: u32, (first, last): (u32, u32)) -> bool {
    (first..=last).contains(&step)
}
