#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for Tile Twister.
//!
//! The world owns the cell grid, its presentation layer, the player tracker
//! and the displayed floor. It is mutated exclusively through [`apply`]; the
//! transform system borrows it mutably for the span of one tick and hands it
//! straight back.

use log::{debug, trace};
use tile_twister_core::{Cell, CellIndex, Command, Event, Floor};

mod grid;
mod player;
mod presentation;

pub use grid::CellGrid;
pub use player::PlayerTracker;
pub use presentation::{CellPresentation, Presentation};

/// Represents one loaded level.
#[derive(Clone, Debug)]
pub struct World {
    grid: CellGrid,
    presentation: Presentation,
    player: PlayerTracker,
    current_floor: Floor,
}

impl World {
    /// Creates a level of hidden empty cells with the player on cell 0.
    ///
    /// # Panics
    ///
    /// Panics unless `floor_count` lies in `1..=MAX_FLOORS`.
    #[must_use]
    pub fn new(floor_count: u32) -> Self {
        let grid = CellGrid::blank(floor_count);
        Self::assemble(grid, CellIndex::new(0), Floor::new(0))
    }

    /// Creates a level from a complete cell list.
    ///
    /// # Panics
    ///
    /// Panics when the list is not a whole number of floors, holds too many
    /// floors, or when the player or floor lie outside it.
    #[must_use]
    pub fn from_cells(cells: Vec<Cell>, player: CellIndex, current_floor: Floor) -> Self {
        Self::assemble(CellGrid::from_cells(cells), player, current_floor)
    }

    fn assemble(grid: CellGrid, player: CellIndex, current_floor: Floor) -> Self {
        grid.check(player);
        grid.check_floor(current_floor);
        Self {
            presentation: Presentation::new(grid.floor_count()),
            player: PlayerTracker::new(player),
            current_floor,
            grid,
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// # Panics
///
/// Panics when the command addresses a cell or floor outside the level.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceCell { index, cell } => {
            world.grid.set(index, cell);
        }
        Command::PlacePlayer { index } => {
            world.grid.check(index);
            let from = world.player.place(index);
            out_events.push(Event::PlayerRelocated { from, to: index });
        }
        Command::ExchangeCells { first, second } => {
            world.grid.exchange(first, second);
            out_events.push(Event::CellsExchanged { first, second });
        }
        Command::RemapCells { moves } => {
            let count = world.grid.remap(&moves);
            debug!("remapped {count} cells");
            out_events.push(Event::CellsRemapped { count });
        }
        Command::SetOpacity { region, opacity } => {
            world.grid.check_floor(region.floor());
            world.presentation.set_opacity(region, opacity);
            presentation_changed(region.floor(), out_events);
        }
        Command::SetTint { region, tint } => {
            world.grid.check_floor(region.floor());
            world.presentation.set_tint(region, tint);
            presentation_changed(region.floor(), out_events);
        }
        Command::SetOffset { region, offset } => {
            world.grid.check_floor(region.floor());
            world.presentation.set_offset(region, offset);
            presentation_changed(region.floor(), out_events);
        }
        Command::SetFloorSpin { floor, degrees } => {
            world.grid.check_floor(floor);
            world.presentation.set_spin(floor, degrees);
            presentation_changed(floor, out_events);
        }
        Command::ResetPresentation { floor } => {
            world.grid.check_floor(floor);
            world.presentation.reset(floor);
            presentation_changed(floor, out_events);
        }
        Command::StagePlayer { index } => {
            world.grid.check(index);
            world.player.set_pending(index);
            out_events.push(Event::PlayerStaged { index });
        }
        Command::CommitPlayer => {
            let Some((from, to)) = world.player.commit() else {
                trace!("no staged player relocation to commit");
                return;
            };
            debug!("player moved from {} to {}", from.get(), to.get());
            out_events.push(Event::PlayerRelocated { from, to });
            if world.grid.reveal(to) {
                out_events.push(Event::CellRevealed { index: to });
            }
        }
        Command::SwitchFloor { floor } => {
            world.grid.check_floor(floor);
            let from = std::mem::replace(&mut world.current_floor, floor);
            if from != floor {
                debug!(
                    "displayed floor switched from {} to {}",
                    from.get(),
                    floor.get()
                );
                out_events.push(Event::FloorSwitched { from, to: floor });
            }
        }
    }
}

fn presentation_changed(floor: Floor, out_events: &mut Vec<Event>) {
    out_events.push(Event::PresentationChanged { floor });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tile_twister_core::{Cell, CellIndex, Floor};

    use super::{CellGrid, CellPresentation, Presentation, World};

    /// Provides read-only access to the cell grid.
    #[must_use]
    pub fn grid(world: &World) -> &CellGrid {
        &world.grid
    }

    /// Record stored at the provided index.
    #[must_use]
    pub fn cell(world: &World, index: CellIndex) -> Cell {
        world.grid.cell(index)
    }

    /// The 256 records of one floor.
    #[must_use]
    pub fn floor_cells(world: &World, floor: Floor) -> &[Cell] {
        world.grid.floor(floor)
    }

    /// Number of floors in the level.
    #[must_use]
    pub fn floor_count(world: &World) -> u32 {
        world.grid.floor_count()
    }

    /// Cell the player currently occupies.
    #[must_use]
    pub fn player(world: &World) -> CellIndex {
        world.player.get()
    }

    /// Destination staged by the running transform, if any.
    #[must_use]
    pub fn pending_player(world: &World) -> Option<CellIndex> {
        world.player.pending()
    }

    /// Floor currently displayed.
    #[must_use]
    pub fn current_floor(world: &World) -> Floor {
        world.current_floor
    }

    /// Provides read-only access to the presentation layer.
    #[must_use]
    pub fn presentation(world: &World) -> &Presentation {
        &world.presentation
    }

    /// Drawing state of one slot.
    #[must_use]
    pub fn cell_presentation(world: &World, index: CellIndex) -> CellPresentation {
        world.grid.check(index);
        world.presentation.cell(index)
    }
}
