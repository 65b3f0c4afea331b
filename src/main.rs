//! Maskmotion headless demo.
//!
//! A step-based 2D motion/collision/path simulation using:
//! - **bevy_ecs** for entity-component-system architecture
//! - **configparser** for INI-backed settings
//! - **clap** for the command line
//!
//! The demo builds a small room with a wall row, a ball pulled down by
//! ramping gravity, a block placed at a random grid spot, and a patroller
//! reversing along a waypoint path, then runs a fixed number of ticks and
//! logs where everything ended up.
//!
//! # Main Loop
//!
//! 1. Parse the command line and load `config.ini`
//! 2. Build the ECS world: room bounds, object registry, path store
//! 3. Register observers and (optionally) the debug-draw consumer thread
//! 4. Run the tick loop: paths, motion integration, collision events,
//!    debug overlays
//! 5. Log the final entity positions
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=info cargo run --release -- --ticks 300 --debug
//! ```

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use maskmotion::components::collisionmask::CollisionMask;
use maskmotion::components::mapposition::MapPosition;
use maskmotion::components::motion::Motion;
use maskmotion::components::objectkind::ObjectKind;
use maskmotion::components::pathfollow::{EndAction, PathFollower};
use maskmotion::events::collision::observe_log_collision;
use maskmotion::events::path::observe_log_path_finished;
use maskmotion::math::Vec2;
use maskmotion::resources::debugdraw::DebugDrawBridge;
use maskmotion::resources::debugmode::DebugMode;
use maskmotion::resources::objectregistry::{ObjectRegistry, ObjectSpec};
use maskmotion::resources::pathstore::{Path, PathStore};
use maskmotion::resources::room::Room;
use maskmotion::resources::simconfig::SimConfig;
use maskmotion::resources::worldtick::WorldTick;
use maskmotion::systems::collision::collision_events;
use maskmotion::systems::debugdraw::debug_draw_overlays;
use maskmotion::systems::motion::motion_step;
use maskmotion::systems::path::path_follow;
use maskmotion::systems::time::advance_world_tick;

/// Maskmotion headless simulation demo
#[derive(Parser)]
#[command(version, about = "Step-based 2D motion, collision and path simulation")]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Override the number of simulation ticks to run.
    #[arg(long)]
    ticks: Option<u32>,

    /// Override the seed used for random placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Load additional paths from a JSON file.
    #[arg(long, value_name = "PATH")]
    paths: Option<PathBuf>,

    /// Emit debug-draw overlay commands to the log.
    #[arg(long)]
    debug: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = SimConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let mut world = World::new();
    world.insert_resource(Room::new(
        f64::from(config.room_width),
        f64::from(config.room_height),
    ));
    world.insert_resource(WorldTick::default());

    let mut registry = ObjectRegistry::default();
    registry.register("wall", ObjectSpec::new(true, CollisionMask::rectangle(64.0, 16.0)));
    registry.register("block", ObjectSpec::new(true, CollisionMask::rectangle(32.0, 32.0)));
    registry.register("ball", ObjectSpec::new(true, CollisionMask::rectangle(16.0, 16.0)));
    registry.register(
        "patroller",
        ObjectSpec::new(false, CollisionMask::aabb_only(16.0, 16.0)),
    );

    let mut paths = PathStore::default();
    let mut patrol = Path::new();
    patrol.add_node(0.0, 0.0, 1.0);
    patrol.add_node(200.0, 0.0, 1.0);
    patrol.add_node(200.0, 120.0, 1.0);
    paths.insert("patrol", patrol);
    if let Some(file) = &cli.paths {
        match paths.load_from_file(file) {
            Ok(count) => log::info!("{} extra path(s) available", count),
            Err(e) => log::warn!("{}", e),
        }
    }

    if cli.debug {
        world.insert_resource(DebugMode {});
        let (bridge, rx) = DebugDrawBridge::channel();
        world.insert_resource(bridge);
        std::thread::spawn(move || {
            for cmd in rx.iter() {
                log::debug!("draw {:?}", cmd);
            }
        });
    }

    world.spawn(Observer::new(observe_log_collision));
    world.spawn(Observer::new(observe_log_path_finished));

    // A floor of walls near the bottom of the room.
    let floor_y = f64::from(config.room_height) - 48.0;
    for i in 0..(config.room_width / 64 + 1) {
        world.spawn((
            ObjectKind("wall"),
            MapPosition::new(f64::from(i) * 64.0, floor_y),
            registry
                .mask_template("wall")
                .expect("wall kind is registered"),
        ));
    }

    // A block at a random grid spot in the upper half.
    let mut rng = fastrand::Rng::with_seed(config.seed);
    let half_room = Room::new(
        f64::from(config.room_width),
        f64::from(config.room_height) / 2.0,
    );
    let mut block_position = MapPosition::new(0.0, 0.0);
    block_position.randomize(&half_room, &mut rng, 32.0, 32.0);
    world.spawn((
        ObjectKind("block"),
        block_position,
        registry
            .mask_template("block")
            .expect("block kind is registered"),
    ));

    // A ball dropping under ramping gravity onto the floor.
    let mut ball_motion = Motion::new();
    ball_motion.set_gravity(1.0);
    ball_motion.set_gravity_acceleration(1.02);
    world.spawn((
        ObjectKind("ball"),
        MapPosition::new(f64::from(config.room_width) / 2.0, 32.0),
        ball_motion,
        registry
            .mask_template("ball")
            .expect("ball kind is registered"),
    ));

    // A patroller bouncing along the waypoint path.
    let patrol = paths
        .get("patrol")
        .expect("patrol path is registered")
        .clone();
    world.spawn((
        ObjectKind("patroller"),
        MapPosition::new(32.0, 64.0),
        PathFollower::start(
            "patrol",
            &patrol,
            2.0,
            EndAction::Reverse,
            false,
            Vec2::new(32.0, 64.0),
        ),
        registry
            .mask_template("patroller")
            .expect("patroller kind is registered"),
    ));

    world.insert_resource(registry);
    world.insert_resource(paths);

    let mut update = Schedule::default();
    update.add_systems(path_follow);
    update.add_systems(motion_step.after(path_follow));
    update.add_systems(collision_events.after(motion_step));
    update.add_systems(debug_draw_overlays.after(collision_events));

    log::info!(
        "running {} ticks in a {}x{} room",
        config.ticks,
        config.room_width,
        config.room_height
    );
    for _ in 0..config.ticks {
        advance_world_tick(&mut world);
        update.run(&mut world);
    }

    let ticks = world.resource::<WorldTick>().tick;
    log::info!("simulation finished after {} ticks", ticks);
    let mut query = world.query::<(Entity, &ObjectKind, &MapPosition)>();
    for (entity, kind, position) in query.iter(&world) {
        log::info!(
            "{:?} {} at ({:.1}, {:.1})",
            entity,
            kind.name(),
            position.pos.x,
            position.pos.y
        );
    }
}
