use glam::Vec2;
use tile_twister_core::{
    Cell, CellIndex, CellKind, Command, Cue, Event, Floor, FloorShift, QuarterCycle, Spin,
    Timestamp, Tint, Transform,
};
use tile_twister_system_transform::{EngineConfig, TransformAnimation};
use tile_twister_world::{query, World};

struct Driver {
    animation: TransformAnimation,
    now: Timestamp,
    events: Vec<Event>,
}

impl Driver {
    fn start(transform: Transform, world: &World) -> Self {
        let now = Timestamp::from_millis(0);
        Self {
            animation: TransformAnimation::start(transform, world, now, &EngineConfig::default()),
            now,
            events: Vec::new(),
        }
    }

    fn run_steps(&mut self, world: &mut World, count: u32) {
        let interval = self.animation.state().clock().interval();
        let target = self.animation.state().step() + count;
        while self.animation.state().step() < target {
            self.now = self.now.after(interval);
            self.animation.advance(self.now, world, &mut self.events);
        }
    }

    fn finish(&mut self, world: &mut World) {
        let remaining = self.animation.step_count() - self.animation.state().step();
        self.run_steps(world, remaining);
        assert!(self.animation.is_finished());
    }
}

fn patterned_world(floor_count: u32, player: CellIndex) -> World {
    let cells = (0..floor_count * 256)
        .map(|raw| {
            let slot = raw as usize;
            Cell::new(
                CellKind::ALL[(slot * 5 + slot / 16) % CellKind::ALL.len()],
                true,
            )
        })
        .collect();
    World::from_cells(cells, player, player.floor())
}

fn opacity(world: &World, row: u32, column: u32) -> f32 {
    query::cell_presentation(world, CellIndex::from_parts(Floor::new(0), row, column)).opacity()
}

fn close(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < 1e-5
}

#[test]
fn mirror_fades_the_player_half_first_and_swaps_while_dark() {
    let player = CellIndex::from_parts(Floor::new(0), 12, 3);
    let mut world = patterned_world(1, player);
    let original = query::grid(&world).clone();
    let mut driver = Driver::start(Transform::HorizontalMirror, &world);

    driver.run_steps(&mut world, 11);
    assert!(close(opacity(&world, 12, 3), 0.8));
    assert!(close(opacity(&world, 3, 3), 1.0));

    driver.run_steps(&mut world, 5);
    assert!(close(opacity(&world, 12, 3), 0.0));
    assert!(close(opacity(&world, 3, 3), 1.0));

    driver.run_steps(&mut world, 5);
    assert!(close(opacity(&world, 3, 3), 0.0));
    assert_eq!(
        query::grid(&world),
        &original,
        "nothing moves before the swap"
    );

    driver.run_steps(&mut world, 1);
    let mirrored = CellIndex::from_parts(Floor::new(0), 3, 3);
    assert_eq!(query::cell(&world, mirrored), original.cell(player));
    assert_eq!(query::player(&world), player, "commit waits for the end");
    assert_eq!(query::pending_player(&world), Some(mirrored));

    driver.run_steps(&mut world, 6);
    assert!(close(opacity(&world, 3, 3), 1.0), "far half is back first");
    assert!(close(opacity(&world, 12, 3), 0.0));

    driver.finish(&mut world);
    assert_eq!(query::player(&world), mirrored);
    assert!(query::presentation(&world).is_at_rest(Floor::new(0)));
    assert_eq!(
        driver.events.first(),
        Some(&Event::SoundCue { cue: Cue::Transform })
    );
}

#[test]
fn diagonal_blinks_and_swaps_one_axis_at_a_time() {
    let player = CellIndex::new(0);
    let mut world = patterned_world(1, player);
    let original = query::grid(&world).clone();
    let top_right = CellIndex::from_parts(Floor::new(0), 0, 8);
    let tint =
        |world: &World, index: u32| query::cell_presentation(world, CellIndex::new(index)).tint();
    let mut driver = Driver::start(Transform::Diagonal, &world);

    driver.run_steps(&mut world, 1);
    assert_eq!(tint(&world, 0), Some(Tint::Primary));
    assert_eq!(tint(&world, 8), Some(Tint::Secondary));

    driver.run_steps(&mut world, 1);
    assert_eq!(tint(&world, 0), Some(Tint::Secondary));
    assert_eq!(tint(&world, 8), Some(Tint::Primary));

    driver.run_steps(&mut world, 2);
    assert_eq!(
        query::cell(&world, CellIndex::new(136)),
        original.cell(player)
    );
    assert_eq!(query::cell(&world, top_right), original.cell(top_right));
    assert_eq!(query::pending_player(&world), Some(CellIndex::new(136)));

    driver.run_steps(&mut world, 6);
    assert_eq!(
        query::cell(&world, CellIndex::from_parts(Floor::new(0), 8, 0)),
        original.cell(top_right)
    );

    driver.finish(&mut world);
    assert_eq!(tint(&world, 0), None);
    assert_eq!(query::player(&world), CellIndex::new(136));
}

#[test]
fn quarter_rotation_slides_blocks_then_remaps() {
    let player = CellIndex::new(0);
    let mut world = patterned_world(1, player);
    let original = query::grid(&world).clone();
    let mut driver = Driver::start(
        Transform::QuarterRotation(QuarterCycle::CounterClockwise),
        &world,
    );

    driver.run_steps(&mut world, 20);
    let top_left = query::cell_presentation(&world, CellIndex::new(0)).offset();
    assert_eq!(top_left, Vec2::new(0.0, 4.0), "top-left slides down");
    let bottom_right = query::cell_presentation(&world, CellIndex::new(255)).offset();
    assert_eq!(bottom_right, Vec2::new(0.0, -4.0), "bottom-right slides up");
    assert_eq!(query::grid(&world), &original);

    driver.finish(&mut world);
    assert_eq!(
        query::cell(&world, CellIndex::new(128)),
        original.cell(player)
    );
    assert_eq!(query::player(&world), CellIndex::new(128));
    assert!(query::presentation(&world).is_at_rest(Floor::new(0)));
}

#[test]
fn floor_rotation_spins_to_a_quarter_turn_before_remapping() {
    let mut world = patterned_world(1, CellIndex::new(0));
    let original = query::grid(&world).clone();
    let mut driver = Driver::start(Transform::FloorRotate(Spin::Left), &world);

    driver.run_steps(&mut world, 9);
    assert!(close(
        query::presentation(&world).floor_spin(Floor::new(0)),
        -45.0,
    ));

    driver.run_steps(&mut world, 9);
    assert!(close(
        query::presentation(&world).floor_spin(Floor::new(0)),
        -90.0,
    ));
    assert_eq!(query::grid(&world), &original);

    driver.finish(&mut world);
    assert_eq!(query::presentation(&world).floor_spin(Floor::new(0)), 0.0);
    assert_eq!(query::player(&world), CellIndex::new(240));
    assert_eq!(
        query::cell(&world, CellIndex::new(240)),
        original.cell(CellIndex::new(0))
    );
}

#[test]
fn floor_change_switches_the_displayed_floor_at_the_midpoint() {
    let player = CellIndex::from_parts(Floor::new(1), 6, 2);
    let mut world = patterned_world(3, player);
    let mut driver = Driver::start(Transform::FloorChange(FloorShift::Down), &world);
    let origin_opacity = |world: &World| query::cell_presentation(world, player).opacity();
    let landing = player.on_floor(Floor::new(0));

    driver.run_steps(&mut world, 25);
    assert_eq!(query::current_floor(&world), Floor::new(1));
    assert!(close(origin_opacity(&world), 0.0));

    driver.run_steps(&mut world, 1);
    assert_eq!(query::current_floor(&world), Floor::new(0));
    assert_eq!(query::pending_player(&world), Some(landing));
    assert!(close(
        query::cell_presentation(&world, landing).opacity(),
        0.0,
    ));

    driver.finish(&mut world);
    assert_eq!(query::player(&world), landing);
    assert!(close(origin_opacity(&world), 1.0));
    assert!(close(
        query::cell_presentation(&world, landing).opacity(),
        1.0,
    ));

    let cues: Vec<Cue> = driver
        .events
        .iter()
        .filter_map(|event| match event {
            Event::SoundCue { cue } => Some(*cue),
            _ => None,
        })
        .collect();
    assert_eq!(cues, vec![Cue::Collision, Cue::FloorSwitch]);
}

#[test]
fn abandoning_before_the_swap_leaves_the_grid_alone() {
    let player = CellIndex::new(40);
    let mut world = patterned_world(1, player);
    let original = query::grid(&world).clone();
    let mut driver = Driver::start(Transform::VerticalMirror, &world);

    driver.run_steps(&mut world, 12);
    driver.animation.abandon(&mut world, &mut driver.events);

    assert_eq!(query::grid(&world), &original);
    assert_eq!(query::player(&world), player);
    assert!(query::presentation(&world).is_at_rest(Floor::new(0)));
}

#[test]
fn abandoning_after_the_swap_commits_the_player() {
    let player = CellIndex::from_parts(Floor::new(0), 2, 5);
    let mut world = patterned_world(1, player);
    let original = query::grid(&world).clone();
    let mut driver = Driver::start(Transform::VerticalMirror, &world);

    driver.run_steps(&mut world, 24);
    driver.animation.abandon(&mut world, &mut driver.events);

    let mirrored = CellIndex::from_parts(Floor::new(0), 2, 10);
    assert_eq!(query::player(&world), mirrored);
    assert_eq!(query::cell(&world, mirrored), original.cell(player));
    assert_eq!(query::pending_player(&world), None);
    assert!(query::presentation(&world).is_at_rest(Floor::new(0)));
}

#[test]
fn abandoning_a_floor_change_restores_both_floors() {
    let player = CellIndex::from_parts(Floor::new(0), 9, 9);
    let mut world = patterned_world(2, player);
    let mut driver = Driver::start(Transform::FloorChange(FloorShift::Up), &world);

    driver.run_steps(&mut world, 30);
    driver.animation.abandon(&mut world, &mut driver.events);

    assert_eq!(query::current_floor(&world), Floor::new(1));
    assert_eq!(query::player(&world), player.on_floor(Floor::new(1)));
    assert!(query::presentation(&world).is_at_rest(Floor::new(0)));
    assert!(query::presentation(&world).is_at_rest(Floor::new(1)));
}

#[test]
fn placing_the_player_mid_transform_cancels_the_staged_move() {
    let player = CellIndex::from_parts(Floor::new(0), 2, 5);
    let mut world = patterned_world(1, player);
    let mut driver = Driver::start(Transform::HorizontalMirror, &world);

    driver.run_steps(&mut world, 22);
    assert!(query::pending_player(&world).is_some());
    let placed = CellIndex::new(5);
    tile_twister_world::apply(
        &mut world,
        Command::PlacePlayer { index: placed },
        &mut driver.events,
    );

    driver.finish(&mut world);
    assert_eq!(query::player(&world), placed);
    assert_eq!(query::pending_player(&world), None);
}
