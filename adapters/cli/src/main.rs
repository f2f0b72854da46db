#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a single Tile Twister transform on a
//! generated level and prints the displayed floor before and after.

mod level;
mod render;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info};
use tile_twister_core::{indexer, CellKind, Event, Floor, Timestamp, Transform, MAX_FLOORS};
use tile_twister_system_transform::{select_transform, Director, EngineConfig};
use tile_twister_world::query;

use level::LevelSpec;

/// Plays a grid transform on a generated level.
#[derive(Debug, Parser)]
#[command(name = "tile-twister", version, about)]
struct CliArgs {
    /// Code of the cell the player steps on, for example `H`, `X` or `>`.
    #[arg(long, default_value_t = 'H')]
    transform: char,
    /// Number of floors in the generated level.
    #[arg(long, default_value_t = 3)]
    floors: u32,
    /// Floor the player starts on.
    #[arg(long, default_value_t = 0)]
    floor: u32,
    /// Seed for level generation.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Milliseconds between simulated frames.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
    /// TOML file overriding the step intervals.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the floor after every step that moves cells.
    #[arg(long)]
    frames: bool,
}

/// Entry point for the Tile Twister command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let trigger = CellKind::from_code(args.transform)
        .with_context(|| format!("unknown cell code `{}`", args.transform))?;
    validate(&args, trigger)?;
    let config = load_config(args.config.as_ref())?;

    let mut world = level::generate(LevelSpec {
        floors: args.floors,
        floor: args.floor,
        seed: args.seed,
        trigger,
    });
    print!("{}", render::labelled(&world, "before"));

    let mut director = Director::new(config);
    let mut events = Vec::new();
    let mut now = Timestamp::from_millis(0);
    let transform = director.trigger(trigger, now, &world, &mut events)?;
    if let Some(active) = director.active() {
        debug!(
            "{} runs {} steps, one every {:?}",
            transform.name(),
            active.step_count(),
            director.config().step_interval(transform)
        );
    }

    let tick = Duration::from_millis(args.tick_ms.max(1));
    let mut frames = 0u64;
    while director.is_busy() {
        now = now.after(tick);
        frames += 1;
        let seen = events.len();
        director.tick(now, &mut world, &mut events);
        if args.frames && moved_cells(&events[seen..]) {
            print!("{}", render::labelled(&world, &format!("frame {frames}")));
        }
    }

    debug!("{} events over {frames} frames", events.len());
    info!("{} completed at {} ms", transform.name(), now.as_millis());
    print!("{}", render::labelled(&world, "after"));
    println!(
        "{} took {frames} frames, player on cell {}",
        transform.name(),
        query::player(&world).get()
    );
    Ok(())
}

fn validate(args: &CliArgs, trigger: CellKind) -> Result<()> {
    if args.floors == 0 || args.floors > MAX_FLOORS {
        bail!("--floors must lie in 1..={MAX_FLOORS}, got {}", args.floors);
    }
    if args.floor >= args.floors {
        bail!(
            "--floor {} is outside a level of {} floors",
            args.floor,
            args.floors
        );
    }
    if let Some(Transform::FloorChange(shift)) = select_transform(trigger) {
        let origin = Floor::new(args.floor);
        if indexer::floor_change(origin, shift, args.floors).is_none() {
            bail!(
                "`{}` would leave the level from floor {}",
                trigger.code(),
                args.floor
            );
        }
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    EngineConfig::from_toml_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn moved_cells(events: &[Event]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            Event::CellsExchanged { .. } | Event::CellsRemapped { .. } | Event::FloorSwitched { .. }
        )
    })
}
