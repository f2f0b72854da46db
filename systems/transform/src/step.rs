use tile_twister_core::{indexer::FloorRemap, CellIndex, Command, Cue, Event, Floor, Region};
use tile_twister_world::{self as world, query, World};

/// Mutable handles lent to a variant for the duration of one step.
pub(crate) struct StepContext<'a> {
    world: &'a mut World,
    events: &'a mut Vec<Event>,
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(world: &'a mut World, events: &'a mut Vec<Event>) -> Self {
        Self { world, events }
    }

    pub(crate) fn submit(&mut self, command: Command) {
        world::apply(self.world, command, self.events);
    }

    pub(crate) fn cue(&mut self, cue: Cue) {
        self.events.push(Event::SoundCue { cue });
    }

    pub(crate) fn player(&self) -> CellIndex {
        query::player(self.world)
    }

    pub(crate) fn stage_player(&mut self, index: CellIndex) {
        self.submit(Command::StagePlayer { index });
    }

    /// Stages the player's destination when the remap moves the player's cell.
    pub(crate) fn stage_remapped_player(&mut self, floor: Floor, remap: FloorRemap) {
        let player = self.player();
        if floor.contains(player) {
            self.stage_player(remap.apply(player));
        }
    }

    pub(crate) fn set_opacity(&mut self, region: Region, opacity: f32) {
        self.submit(Command::SetOpacity { region, opacity });
    }
}

/// Fraction of a phase completed after `step`, reaching 1.0 on `last`.
pub(crate) fn ramp(step: u32, first: u32, last: u32) -> f32 {
    debug_assert!(first <= step && step <= last);
    (step - first + 1) as f32 / (last - first + 1) as f32
}
