//! walkabout — a party of four crossing a small island.
//!
//! The player walks to a destination with three followers in tow, a
//! villager wanders through the grass and a guard patrols on a scripted route.  Then the
//! party gathers, boards the boat, sails along the coast and lands.
//! Positions are printed once per second of ticks; `RUST_LOG=debug`
//! shows the engine's own state changes.

use anyhow::{Result, bail};
use log::info;

use tw_behavior::{MoveType, WorldHooks};
use tw_core::{CharacterRef, Direction, EngineConfig, EntityId, MapId, Tick, VehicleKind};
use tw_map::TileMap;
use tw_mobility::{ActorStore, VehicleState};
use tw_route::{ExternalCall, parse_route};
use tw_sim::{PlayerInput, World, WorldBuilder, WorldObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64 = 7;
const SETTLE_MAX:  u64 = 3_000;

const ISLAND: [&str; 12] = [
    "~~~~~~~~~~~~~~~~~~~~",
    "~..................~",
    "~..\"\"\"\"....###.....~",
    "~..\"\"\"\"....#.......~",
    "~.........##.......~",
    "~..................~",
    "~.....\"\"...........~",
    "~..................~",
    "~~~~~~~~~......~~~~~",
    "~~~~~~~~~~.....~~~~~",
    "~~~~~~~~~~~~~~~~~~~~",
    "~~~~~~~~~~~~~~~~~~~~",
];

const GUARD_ROUTE: &str = "\
repeat
skippable
move right
move right
move right
wait 30
turn left
move left
move left
move left
wait 30
sound guard_whistle   # heard across the square
";

// ── Hooks ─────────────────────────────────────────────────────────────────────

/// Logs every notification and counts the ones the demo reports on.
#[derive(Default)]
struct IslandHooks {
    touches:   usize,
    bumps:     usize,
    whistles:  usize,
}

impl WorldHooks for IslandHooks {
    fn on_touch_front(&mut self, who: CharacterRef, x: i32, y: i32) {
        if who.is_player() {
            self.bumps += 1;
            info!("player bumped into ({x}, {y})");
        }
    }

    fn on_touch_here(&mut self, who: CharacterRef, _x: i32, _y: i32) {
        if who.is_player() {
            self.touches += 1;
        }
    }

    fn on_external(&mut self, who: CharacterRef, call: &ExternalCall) {
        if let ExternalCall::PlaySound(name) = call {
            self.whistles += 1;
            info!("{who} plays {name}");
        }
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints the party once per snapshot.
struct PartyPrinter {
    snapshots: usize,
}

impl WorldObserver for PartyPrinter {
    fn on_snapshot(&mut self, tick: Tick, actors: &ActorStore) {
        self.snapshots += 1;
        let p = &actors.player.character;
        let chain: Vec<String> = actors
            .followers
            .followers
            .iter()
            .map(|f| format!("({},{})", f.character.x, f.character.y))
            .collect();
        let state = match actors.player.vehicle_state {
            VehicleState::Walking => "walking".to_string(),
            VehicleState::Boarding(k) => format!("boarding {}", k.as_str()),
            VehicleState::Driving(k) => format!("driving {}", k.as_str()),
            VehicleState::Alighting(k) => format!("leaving {}", k.as_str()),
        };
        println!(
            "{:>6} | player ({:>2},{:>2}) {:<6} {:<16} | party {}",
            tick.0,
            p.x,
            p.y,
            p.direction.to_string(),
            state,
            chain.join(" "),
        );
    }
}

// ── Steps ─────────────────────────────────────────────────────────────────────

fn settle(world: &mut World<TileMap, IslandHooks>, obs: &mut PartyPrinter, what: &str) -> Result<()> {
    if !world.settle(SETTLE_MAX, obs) {
        bail!("{what} did not settle within {SETTLE_MAX} ticks");
    }
    Ok(())
}

fn walk_to(world: &mut World<TileMap, IslandHooks>, obs: &mut PartyPrinter, x: i32, y: i32) -> Result<()> {
    println!("-- walk to ({x}, {y})");
    world.step(&PlayerInput::destination(x, y), obs);
    settle(world, obs, "walk")
}

fn hold(world: &mut World<TileMap, IslandHooks>, obs: &mut PartyPrinter, d: Direction, steps: u32) -> Result<()> {
    println!("-- hold {d} for {steps} steps");
    for _ in 0..steps {
        world.step(&PlayerInput::toward(d), obs);
        settle(world, obs, "step")?;
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== walkabout — tilewalk movement engine ===");

    let map = TileMap::from_ascii(MapId(1), &ISLAND)?;
    let config = EngineConfig {
        seed: SEED,
        snapshot_interval_ticks: 60,
        ..EngineConfig::default()
    };
    let fps = config.frames_per_second;

    let mut world = WorldBuilder::new(config, map)
        .hooks(IslandHooks::default())
        .player_at(2, 5)
        .player_facing(Direction::Right)
        .followers(&["ana", "bo", "cy"])
        .entity(4, 2, MoveType::Random)
        .entity_with_route(13, 6, parse_route(GUARD_ROUTE)?)
        .vehicle(VehicleKind::Boat, MapId(1), 16, 8)
        .build()?;
    println!(
        "Island {}x{}  |  followers {}  |  entities {}  |  {fps} ticks/s",
        ISLAND[0].len(),
        ISLAND.len(),
        world.store.followers.len(),
        world.store.entities.len(),
    );
    println!();

    let mut obs = PartyPrinter { snapshots: 0 };

    // 1. Stroll through the grass to the shore.
    walk_to(&mut world, &mut obs, 16, 7)?;

    // 2. Gather the party on the player before boarding.
    println!("-- gather");
    world.gather_followers();
    settle(&mut world, &mut obs, "gather")?;

    // 3. Board the boat moored just south.
    world.store.player.character.set_direction(Direction::Down);
    if !world.get_on_off_vehicle() {
        bail!("could not board the boat");
    }
    settle(&mut world, &mut obs, "boarding")?;
    println!("-- aboard: {:?}", world.store.player.vehicle_state);

    // The villager stops to watch the boat leave.
    world.lock_entity(EntityId(0))?;

    // 4. Sail east along the coast, then land back on the beach.
    hold(&mut world, &mut obs, Direction::Right, 2)?;
    world.store.player.character.set_direction(Direction::Up);
    if !world.get_on_off_vehicle() {
        bail!("could not land");
    }
    settle(&mut world, &mut obs, "alighting")?;
    println!("-- ashore: {:?}", world.store.player.vehicle_state);

    // 5. Let the island idle for a few seconds.
    world.run_secs(5, &PlayerInput::idle(), &mut obs);

    println!();
    println!("Play time:        {} ({})", world.clock, world.now());
    println!("Snapshots:        {}", obs.snapshots);
    println!("Touch-here calls: {}", world.hooks.touches);
    println!("Bumps:            {}", world.hooks.bumps);
    println!("Guard whistles:   {}", world.hooks.whistles);

    let boat = &world.store.vehicle(VehicleKind::Boat).character;
    println!("Boat moored at:   ({}, {})", boat.x, boat.y);

    println!();
    println!("Save record:");
    println!("{}", world.record().to_json()?);

    Ok(())
}
