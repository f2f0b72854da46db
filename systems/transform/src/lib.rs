#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Timed, multi-phase grid transform animations.
//!
//! A [`TransformAnimation`] is a step-counted state machine. The caller lends
//! it the [`World`] on every tick through [`TransformAnimation::advance`];
//! when the [`AnimationClock`] says a step is due the variant executes the
//! phase for its current step, submitting commands against the world, and the
//! shared scaffolding commits the staged player cell once the terminal step
//! has run. [`Director`] wraps this for controllers that only know which
//! cell the player stepped on.

use log::{info, trace, warn};
use tile_twister_core::{
    CellKind, Command, Event, Floor, FloorShift, QuarterCycle, Spin, Timestamp, Transform,
};
use tile_twister_world::{self as world, query, World};

mod clock;
mod config;
mod diagonal;
mod director;
mod floor_change;
mod mirror;
mod quarter;
mod rotate;
mod step;

pub use clock::AnimationClock;
pub use config::{ConfigError, EngineConfig};
pub use director::{Director, TransformError};

use diagonal::DiagonalPhases;
use floor_change::FloorChangePhases;
use mirror::{MirrorAxis, MirrorPhases};
use quarter::QuarterPhases;
use rotate::RotatePhases;
use step::StepContext;

/// Maps the cell the player stepped on to the transform it plays.
///
/// Animated kinds without a dedicated transform fall back to the horizontal
/// mirror; static kinds play nothing.
#[must_use]
pub const fn select_transform(kind: CellKind) -> Option<Transform> {
    match kind {
        CellKind::VerticalMirror => Some(Transform::VerticalMirror),
        CellKind::StairsUp | CellKind::ElevatorUp => Some(Transform::FloorChange(FloorShift::Up)),
        CellKind::StairsDown | CellKind::ElevatorDown => {
            Some(Transform::FloorChange(FloorShift::Down))
        }
        CellKind::Diagonal => Some(Transform::Diagonal),
        CellKind::RotateLeft => Some(Transform::FloorRotate(Spin::Left)),
        CellKind::RotateRight => Some(Transform::FloorRotate(Spin::Right)),
        CellKind::QuarterRotation => {
            Some(Transform::QuarterRotation(QuarterCycle::CounterClockwise))
        }
        other if other.is_animated() => Some(Transform::HorizontalMirror),
        _ => None,
    }
}

/// Progress record shared by every transform variant.
///
/// The staged player cell is not kept here; it lives in the world's player
/// tracker and is read back when the terminal step commits it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationState {
    step: u32,
    clock: AnimationClock,
    finished: bool,
}

impl AnimationState {
    /// Next step to execute; equals the step count once finished.
    #[must_use]
    pub const fn step(&self) -> u32 {
        self.step
    }

    /// Clock gating the next step.
    #[must_use]
    pub const fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Whether the terminal step has run.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phases {
    Mirror(MirrorPhases),
    Diagonal(DiagonalPhases),
    Quarter(QuarterPhases),
    Rotate(RotatePhases),
    FloorChange(FloorChangePhases),
}

impl Phases {
    fn plan(transform: Transform, floor: Floor, world: &World) -> Self {
        let player = query::player(world);
        match transform {
            Transform::HorizontalMirror => {
                Self::Mirror(MirrorPhases::plan(MirrorAxis::Horizontal, floor, player))
            }
            Transform::VerticalMirror => {
                Self::Mirror(MirrorPhases::plan(MirrorAxis::Vertical, floor, player))
            }
            Transform::Diagonal => Self::Diagonal(DiagonalPhases::plan(floor)),
            Transform::QuarterRotation(cycle) => Self::Quarter(QuarterPhases::plan(floor, cycle)),
            Transform::FloorRotate(spin) => Self::Rotate(RotatePhases::plan(floor, spin)),
            Transform::FloorChange(shift) => Self::FloorChange(FloorChangePhases::plan(
                floor,
                shift,
                query::floor_count(world),
            )),
        }
    }

    fn step_count(&self) -> u32 {
        match self {
            Self::Mirror(_) => MirrorPhases::STEP_COUNT,
            Self::Diagonal(_) => DiagonalPhases::STEP_COUNT,
            Self::Quarter(_) => QuarterPhases::STEP_COUNT,
            Self::Rotate(_) => RotatePhases::STEP_COUNT,
            Self::FloorChange(_) => FloorChangePhases::STEP_COUNT,
        }
    }

    fn perform(&self, step: u32, ctx: &mut StepContext<'_>) {
        match self {
            Self::Mirror(phases) => phases.perform(step, ctx),
            Self::Diagonal(phases) => phases.perform(step, ctx),
            Self::Quarter(phases) => phases.perform(step, ctx),
            Self::Rotate(phases) => phases.perform(step, ctx),
            Self::FloorChange(phases) => phases.perform(step, ctx),
        }
    }

    fn floors(&self) -> Vec<Floor> {
        match self {
            Self::Mirror(phases) => vec![phases.floor()],
            Self::Diagonal(phases) => vec![phases.floor()],
            Self::Quarter(phases) => vec![phases.floor()],
            Self::Rotate(phases) => vec![phases.floor()],
            Self::FloorChange(phases) => vec![phases.origin(), phases.destination()],
        }
    }
}

/// One running transform on one floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformAnimation {
    transform: Transform,
    floor: Floor,
    state: AnimationState,
    phases: Phases,
}

impl TransformAnimation {
    /// Prepares a transform on the displayed floor; the first step is due one
    /// interval after `now`.
    ///
    /// # Panics
    ///
    /// Panics when a floor change would leave the level.
    #[must_use]
    pub fn start(
        transform: Transform,
        world: &World,
        now: Timestamp,
        config: &EngineConfig,
    ) -> Self {
        let floor = query::current_floor(world);
        let phases = Phases::plan(transform, floor, world);
        Self {
            transform,
            floor,
            state: AnimationState {
                step: 0,
                clock: AnimationClock::new(config.step_interval(transform), now),
                finished: false,
            },
            phases,
        }
    }

    /// Transform being animated.
    #[must_use]
    pub const fn transform(&self) -> Transform {
        self.transform
    }

    /// Floor the transform was started on.
    #[must_use]
    pub const fn floor(&self) -> Floor {
        self.floor
    }

    /// Shared progress record.
    #[must_use]
    pub const fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Number of steps the variant runs before finishing.
    #[must_use]
    pub fn step_count(&self) -> u32 {
        self.phases.step_count()
    }

    /// Whether the terminal step has run.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.state.finished
    }

    /// Advances by at most one step and requests a redraw.
    ///
    /// A late tick still executes a single step; missed time is not caught up.
    /// Calls after the animation finished do nothing.
    pub fn advance(&mut self, now: Timestamp, world: &mut World, out_events: &mut Vec<Event>) {
        if self.state.finished {
            return;
        }

        if self.state.clock.is_due(now) {
            let step = self.state.step;
            let mut ctx = StepContext::new(world, out_events);
            self.phases.perform(step, &mut ctx);
            self.state.clock.mark(now);
            self.state.step += 1;
            out_events.push(Event::TransformStepped {
                transform: self.transform,
                step,
            });

            if self.state.step >= self.phases.step_count() {
                world::apply(world, Command::CommitPlayer, out_events);
                self.state.finished = true;
                info!(
                    "{} on floor {} finished after {} steps",
                    self.transform.name(),
                    self.floor.get(),
                    self.state.step
                );
                out_events.push(Event::TransformFinished {
                    transform: self.transform,
                });
            }
        } else {
            trace!(
                "{} waiting at step {}",
                self.transform.name(),
                self.state.step
            );
        }

        out_events.push(Event::RedrawRequested {
            floor: query::current_floor(world),
        });
    }

    /// Stops a transform before its terminal step and resynchronises the world.
    ///
    /// Index remaps happen atomically inside single steps, so the grid is
    /// always a valid permutation; this restores presentation on every floor
    /// the transform touched and commits any staged player cell.
    pub fn abandon(self, world: &mut World, out_events: &mut Vec<Event>) {
        if self.state.finished {
            return;
        }
        warn!(
            "{} abandoned at step {} of {}",
            self.transform.name(),
            self.state.step,
            self.phases.step_count()
        );
        for floor in self.phases.floors() {
            world::apply(world, Command::ResetPresentation { floor }, out_events);
        }
        world::apply(world, Command::CommitPlayer, out_events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_follows_the_cell_code_table() {
        let table = [
            ('V', Some(Transform::VerticalMirror)),
            ('>', Some(Transform::FloorChange(FloorShift::Up))),
            ('^', Some(Transform::FloorChange(FloorShift::Up))),
            ('<', Some(Transform::FloorChange(FloorShift::Down))),
            ('v', Some(Transform::FloorChange(FloorShift::Down))),
            ('X', Some(Transform::Diagonal)),
            ('L', Some(Transform::FloorRotate(Spin::Left))),
            ('R', Some(Transform::FloorRotate(Spin::Right))),
            (
                'Q',
                Some(Transform::QuarterRotation(QuarterCycle::CounterClockwise)),
            ),
            ('H', Some(Transform::HorizontalMirror)),
            ('T', Some(Transform::HorizontalMirror)),
            ('W', None),
            ('.', None),
            ('D', None),
            ('A', None),
        ];
        for (code, expected) in table {
            let kind = CellKind::from_code(code).expect("known code");
            assert_eq!(select_transform(kind), expected, "code {code:?}");
        }
    }

    #[test]
    fn step_counts_match_the_phase_tables() {
        let world = World::new(2);
        let config = EngineConfig::default();
        let now = Timestamp::from_millis(0);
        let expected = [
            (Transform::HorizontalMirror, 34),
            (Transform::VerticalMirror, 34),
            (Transform::Diagonal, 12),
            (Transform::QuarterRotation(QuarterCycle::Clockwise), 41),
            (Transform::FloorRotate(Spin::Right), 19),
            (Transform::FloorChange(FloorShift::Up), 42),
        ];
        for (transform, steps) in expected {
            let animation = TransformAnimation::start(transform, &world, now, &config);
            assert_eq!(animation.step_count(), steps, "{}", transform.name());
        }
    }

    #[test]
    fn early_ticks_only_redraw() {
        let mut world = World::new(1);
        let config = EngineConfig::default();
        let mut animation = TransformAnimation::start(
            Transform::HorizontalMirror,
            &world,
            Timestamp::from_millis(1_000),
            &config,
        );
        let mut events = Vec::new();

        animation.advance(Timestamp::from_millis(1_020), &mut world, &mut events);

        assert_eq!(animation.state().step(), 0);
        assert_eq!(
            events,
            vec![Event::RedrawRequested {
                floor: Floor::new(0)
            }]
        );
    }

    #[test]
    fn finished_animations_report_every_step_as_run() {
        let mut world = World::new(1);
        let config = EngineConfig::default();
        let transform = Transform::HorizontalMirror;
        let interval = config.step_interval(transform);
        let mut now = Timestamp::from_millis(0);
        let mut animation = TransformAnimation::start(transform, &world, now, &config);
        let mut events = Vec::new();

        while !animation.is_finished() {
            now = now.after(interval);
            animation.advance(now, &mut world, &mut events);
        }

        assert_eq!(animation.state().step(), 34);
        assert_eq!(animation.state().step(), animation.step_count());
        assert_eq!(
            events.iter().rev().nth(1),
            Some(&Event::TransformFinished { transform })
        );
    }

    #[test]
    fn late_ticks_execute_a_single_step() {
        let mut world = World::new(1);
        let config = EngineConfig::default();
        let mut animation = TransformAnimation::start(
            Transform::Diagonal,
            &world,
            Timestamp::from_millis(0),
            &config,
        );
        let mut events = Vec::new();

        animation.advance(Timestamp::from_millis(5_000), &mut world, &mut events);

        assert_eq!(animation.state().step(), 1);
        assert_eq!(
            animation.state().clock().last_step(),
            Timestamp::from_millis(5_000)
        );
        assert!(!animation.is_finished());
    }
}
