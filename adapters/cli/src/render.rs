use std::fmt::Write as _;

use tile_twister_core::{CellIndex, Floor, FLOOR_SIDE};
use tile_twister_world::{query, World};

const PLAYER: char = '@';
const HIDDEN: char = '#';

/// Draws one floor as a grid of cell codes.
///
/// Hidden cells print as `#` and the player's cell as `@`.
pub(crate) fn floor_to_ascii(world: &World, floor: Floor) -> String {
    let player = query::player(world);
    let mut out = String::with_capacity(((FLOOR_SIDE + 1) * FLOOR_SIDE) as usize);
    for row in 0..FLOOR_SIDE {
        for column in 0..FLOOR_SIDE {
            let index = CellIndex::from_parts(floor, row, column);
            let cell = query::cell(world, index);
            out.push(if index == player {
                PLAYER
            } else if cell.is_visible() {
                cell.kind().code()
            } else {
                HIDDEN
            });
        }
        out.push('\n');
    }
    out
}

/// Floor header followed by its grid.
pub(crate) fn labelled(world: &World, label: &str) -> String {
    let floor = query::current_floor(world);
    let mut out = String::new();
    let _ = writeln!(out, "{label} (floor {}):", floor.get());
    out.push_str(&floor_to_ascii(world, floor));
    out
}
