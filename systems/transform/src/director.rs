use log::info;
use thiserror::Error;
use tile_twister_core::{CellKind, Event, Timestamp, Transform};
use tile_twister_world::{query, World};

use crate::{select_transform, EngineConfig, TransformAnimation};

/// Reasons a transform could not be started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Another transform still holds the level.
    #[error("{} is still running", .0.name())]
    Busy(Transform),
    /// The cell does not animate.
    #[error("cell `{}` does not trigger a transform", .0.code())]
    Inert(CellKind),
}

/// Runs at most one transform at a time against a level.
#[derive(Clone, Debug, Default)]
pub struct Director {
    config: EngineConfig,
    active: Option<TransformAnimation>,
}

impl Director {
    /// Creates a director using the provided step intervals.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// Step intervals used for new transforms.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Transform currently holding the level, if any.
    #[must_use]
    pub fn active(&self) -> Option<&TransformAnimation> {
        self.active.as_ref()
    }

    /// Reports whether a transform is running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    /// Starts the transform played by the cell the player stepped on.
    pub fn trigger(
        &mut self,
        kind: CellKind,
        now: Timestamp,
        world: &World,
        out_events: &mut Vec<Event>,
    ) -> Result<Transform, TransformError> {
        let transform = select_transform(kind).ok_or(TransformError::Inert(kind))?;
        self.start(transform, now, world, out_events)?;
        Ok(transform)
    }

    /// Starts a specific transform on the displayed floor.
    pub fn start(
        &mut self,
        transform: Transform,
        now: Timestamp,
        world: &World,
        out_events: &mut Vec<Event>,
    ) -> Result<(), TransformError> {
        if let Some(active) = &self.active {
            return Err(TransformError::Busy(active.transform()));
        }
        let animation = TransformAnimation::start(transform, world, now, &self.config);
        info!(
            "{} started on floor {}",
            transform.name(),
            animation.floor().get()
        );
        out_events.push(Event::TransformStarted {
            transform,
            floor: animation.floor(),
        });
        self.active = Some(animation);
        Ok(())
    }

    /// Advances the running transform and releases it once finished.
    pub fn tick(&mut self, now: Timestamp, world: &mut World, out_events: &mut Vec<Event>) {
        let Some(animation) = self.active.as_mut() else {
            return;
        };
        animation.advance(now, world, out_events);
        if animation.is_finished() {
            self.active = None;
        }
    }

    /// Abandons the running transform, resynchronising the level.
    pub fn abandon(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        if let Some(animation) = self.active.take() {
            animation.abandon(world, out_events);
            out_events.push(Event::RedrawRequested {
                floor: query::current_floor(world),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use tile_twister_core::FloorShift;

    use super::*;

    #[test]
    fn static_cells_do_not_start_anything() {
        let world = World::new(1);
        let mut director = Director::default();
        let mut events = Vec::new();
        let result = director.trigger(
            CellKind::Wall,
            Timestamp::from_millis(0),
            &world,
            &mut events,
        );
        assert_eq!(result, Err(TransformError::Inert(CellKind::Wall)));
        assert!(!director.is_busy());
        assert!(events.is_empty());
    }

    #[test]
    fn second_transform_is_refused_while_busy() {
        let world = World::new(2);
        let mut director = Director::default();
        let mut events = Vec::new();
        let now = Timestamp::from_millis(0);

        let started = director.trigger(CellKind::ElevatorUp, now, &world, &mut events);
        assert_eq!(started, Ok(Transform::FloorChange(FloorShift::Up)));

        let refused = director.trigger(CellKind::RotateLeft, now, &world, &mut events);
        assert_eq!(
            refused,
            Err(TransformError::Busy(Transform::FloorChange(FloorShift::Up)))
        );
        assert_eq!(
            refused.unwrap_err().to_string(),
            "floor-up is still running"
        );
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn inert_error_names_the_cell_code() {
        assert_eq!(
            TransformError::Inert(CellKind::Arrival).to_string(),
            "cell `A` does not trigger a transform"
        );
    }
}
