//! Deterministic level generation for demonstration runs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tile_twister_core::{Cell, CellIndex, CellKind, Floor, CELLS_PER_FLOOR, FLOOR_SIDE};
use tile_twister_world::World;

const WALL_CHANCE: f64 = 0.2;
const ANIMATED_CHANCE: f64 = 0.05;
const VISIBLE_CHANCE: f64 = 0.6;

/// Parameters for a generated level.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LevelSpec {
    pub(crate) floors: u32,
    pub(crate) floor: u32,
    pub(crate) seed: u64,
    pub(crate) trigger: CellKind,
}

/// Builds a random level and stands the player on a revealed trigger cell.
pub(crate) fn generate(spec: LevelSpec) -> World {
    let mut rng = ChaCha8Rng::seed_from_u64(spec.seed);
    let animated: Vec<CellKind> = CellKind::ALL
        .into_iter()
        .filter(|kind| kind.is_animated())
        .collect();

    let mut cells: Vec<Cell> = (0..spec.floors * CELLS_PER_FLOOR)
        .map(|_| {
            let roll: f64 = rng.gen();
            let kind = if roll < ANIMATED_CHANCE {
                animated[rng.gen_range(0..animated.len())]
            } else if roll < ANIMATED_CHANCE + WALL_CHANCE {
                CellKind::Wall
            } else {
                CellKind::Empty
            };
            Cell::new(kind, rng.gen_bool(VISIBLE_CHANCE))
        })
        .collect();

    for floor in 0..spec.floors {
        let departure = random_cell(&mut rng, Floor::new(floor));
        let arrival = random_cell(&mut rng, Floor::new(floor));
        cells[departure.as_usize()] = Cell::revealed(CellKind::Departure);
        cells[arrival.as_usize()] = Cell::new(CellKind::Arrival, false);
    }

    let floor = Floor::new(spec.floor);
    let player = random_cell(&mut rng, floor);
    cells[player.as_usize()] = Cell::revealed(spec.trigger);

    World::from_cells(cells, player, floor)
}

fn random_cell(rng: &mut ChaCha8Rng, floor: Floor) -> CellIndex {
    CellIndex::from_parts(
        floor,
        rng.gen_range(0..FLOOR_SIDE),
        rng.gen_range(0..FLOOR_SIDE),
    )
}
