use log::debug;
use tile_twister_core::{
    indexer::{self, FloorRemap},
    CellIndex, Command, Cue, DiagonalAxis, Floor, Quadrant, Region, Tint,
};

use crate::step::StepContext;

const SWAP_MAIN: u32 = 3;
const SWAP_ANTI: u32 = 9;
const LAST_HIGHLIGHT: u32 = 10;
const SETTLE: u32 = 11;

/// Blinks the diagonal quadrant pairs in alternating colours and swaps
/// each pair as a block partway through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DiagonalPhases {
    floor: Floor,
}

impl DiagonalPhases {
    pub(crate) const STEP_COUNT: u32 = SETTLE + 1;

    pub(crate) fn plan(floor: Floor) -> Self {
        Self { floor }
    }

    pub(crate) fn floor(&self) -> Floor {
        self.floor
    }

    pub(crate) fn perform(&self, step: u32, ctx: &mut StepContext<'_>) {
        if step == 0 {
            ctx.cue(Cue::Transform);
        }
        if step <= LAST_HIGHLIGHT {
            self.highlight(step, ctx);
        }
        match step {
            SWAP_MAIN => self.swap(DiagonalAxis::Main, ctx),
            SWAP_ANTI => self.swap(DiagonalAxis::Anti, ctx),
            SETTLE => ctx.submit(Command::ResetPresentation { floor: self.floor }),
            _ => {}
        }
    }

    fn highlight(&self, step: u32, ctx: &mut StepContext<'_>) {
        let (main, anti) = if step % 2 == 0 {
            (Tint::Primary, Tint::Secondary)
        } else {
            (Tint::Secondary, Tint::Primary)
        };
        for quadrant in Quadrant::ALL {
            let tint = match axis_of(quadrant) {
                DiagonalAxis::Main => main,
                DiagonalAxis::Anti => anti,
            };
            ctx.submit(Command::SetTint {
                region: Region::Quadrant {
                    floor: self.floor,
                    quadrant,
                },
                tint: Some(tint),
            });
        }
    }

    fn swap(&self, axis: DiagonalAxis, ctx: &mut StepContext<'_>) {
        debug!("swapping {axis:?} quadrants on floor {}", self.floor.get());
        for (first, second) in indexer::pairs_for_diagonal(self.floor, axis) {
            ctx.submit(Command::ExchangeCells { first, second });
        }
        let player = ctx.player();
        if self.floor.contains(player) && axis_of_cell(player) == axis {
            ctx.stage_remapped_player(self.floor, FloorRemap::Diagonal);
        }
    }
}

fn axis_of(quadrant: Quadrant) -> DiagonalAxis {
    match quadrant {
        Quadrant::TopLeft | Quadrant::BottomRight => DiagonalAxis::Main,
        Quadrant::TopRight | Quadrant::BottomLeft => DiagonalAxis::Anti,
    }
}

fn axis_of_cell(index: CellIndex) -> DiagonalAxis {
    axis_of(Quadrant::of(index.row(), index.column()))
}
