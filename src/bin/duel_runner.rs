//! Headless Duel Runner
//!
//! Steps the strategy against a synthetic enemy wave with a toy kinematic
//! integrator and outputs a JSON episode summary. Useful for eyeballing
//! policy behavior and for parameter sweeps without a simulation host.

use clap::Parser;
use serde::Serialize;

use arc_arena::core::config::{AvoidanceMode, NavigationMode, StrategyConfig};
use arc_arena::core::types::{normalize_angle, Point, UnitId};
use arc_arena::model::{
    ActionKind, Building, BuildingKind, Faction, GameConstants, Lane, Minion, MinionKind, Wizard,
    World,
};
use arc_arena::strategy::{Strategy, TickStrategy};

/// Headless Duel Runner - synthetic episodes for policy inspection
#[derive(Parser, Debug)]
#[command(name = "duel_runner")]
#[command(about = "Run the strategy against a synthetic wave and output an episode summary")]
struct Args {
    /// Lane to fight down: top, middle, or bottom
    #[arg(long, default_value = "middle")]
    lane: String,

    /// Routing strategy: waypoints or tiles
    #[arg(long, default_value = "waypoints")]
    navigation: String,

    /// Avoidance mechanism: spring or ring
    #[arg(long, default_value = "ring")]
    avoidance: String,

    /// Ticks to simulate
    #[arg(long, default_value_t = 2000)]
    ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log every decision to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct EpisodeResult {
    ticks_run: u64,
    lane: String,
    seed: u64,
    final_position: (f64, f64),
    final_life: f64,
    distance_travelled: f64,
    skills_learned: usize,
    move_commands: u64,
    turn_commands: u64,
    cast_commands: u64,
    melee_commands: u64,
}

fn parse_lane(name: &str) -> Lane {
    match name {
        "top" => Lane::Top,
        "bottom" => Lane::Bottom,
        _ => Lane::Middle,
    }
}

fn my_wizard(game: &GameConstants) -> Wizard {
    Wizard {
        id: UnitId(1),
        position: Point::new(0.05 * game.map_size, 0.95 * game.map_size),
        angle: 0.0,
        radius: 35.0,
        faction: Faction::Academy,
        life: 100.0,
        max_life: 100.0,
        mana: 100.0,
        max_mana: 100.0,
        vision_range: 600.0,
        cast_range: 500.0,
        skills: Vec::new(),
        remaining_action_cooldown: 0,
        cooldown_period: 60,
        is_me: true,
    }
}

fn enemy_wave(game: &GameConstants) -> (Vec<Minion>, Vec<Building>) {
    let minions = (0..3)
        .map(|i| Minion {
            id: UnitId(100 + i),
            position: Point::new(
                0.55 * game.map_size + 60.0 * i as f64,
                0.45 * game.map_size - 60.0 * i as f64,
            ),
            angle: std::f64::consts::PI * 0.75,
            radius: 25.0,
            faction: Faction::Renegades,
            kind: if i == 2 { MinionKind::FetishBlowdart } else { MinionKind::OrcWoodcutter },
            life: 100.0,
            max_life: 100.0,
            remaining_action_cooldown: 0,
            cooldown_period: 60,
        })
        .collect();
    let buildings = vec![Building {
        id: UnitId(200),
        position: Point::new(0.9 * game.map_size, 0.1 * game.map_size),
        angle: 0.0,
        radius: 100.0,
        faction: Faction::Renegades,
        kind: BuildingKind::FactionBase,
        life: 1000.0,
        max_life: 1000.0,
        attack_range: 800.0,
        damage: 48.0,
        remaining_action_cooldown: 0,
        cooldown_period: 240,
    }];
    (minions, buildings)
}

/// Apply one command to the agent with a crude kinematic model
fn integrate(me: &mut Wizard, command: &arc_arena::model::Command, game: &GameConstants) -> f64 {
    const MAX_TURN: f64 = 0.1;
    if let Some(turn) = command.turn {
        me.angle = normalize_angle(me.angle + turn.clamp(-MAX_TURN, MAX_TURN));
    }
    let speed = command.speed.unwrap_or(0.0);
    let strafe = command.strafe_speed.unwrap_or(0.0);
    let forward = Point::new(me.angle.cos(), me.angle.sin());
    let sideways = Point::new(-me.angle.sin(), me.angle.cos());
    let before = me.position;
    let mut next = me.position + forward * speed + sideways * strafe;
    next.x = next.x.clamp(0.0, game.map_size);
    next.y = next.y.clamp(0.0, game.map_size);
    me.position = next;
    before.distance_to(next)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::random());

    let game = GameConstants::default();
    let mut config = StrategyConfig::default();
    config.lane = Some(parse_lane(&args.lane));
    config.navigation = match args.navigation.as_str() {
        "tiles" => NavigationMode::TileGraph,
        _ => NavigationMode::WaypointList,
    };
    config.avoidance = match args.avoidance.as_str() {
        "spring" => AvoidanceMode::SpringForce,
        _ => AvoidanceMode::RingSample,
    };

    let mut strategy = match Strategy::with_seed(config, seed) {
        Ok(strategy) => strategy,
        Err(e) => {
            eprintln!("Failed to build strategy: {}", e);
            std::process::exit(1);
        }
    };

    let mut me = my_wizard(&game);
    let (minions, buildings) = enemy_wave(&game);
    let mut world = World {
        tick_index: 0,
        wizards: vec![me.clone()],
        minions,
        buildings,
        trees: Vec::new(),
        bonuses: Vec::new(),
    };

    let mut distance_travelled = 0.0;
    let mut move_commands = 0u64;
    let mut turn_commands = 0u64;
    let mut cast_commands = 0u64;
    let mut melee_commands = 0u64;

    for tick in 0..args.ticks {
        world.tick_index = tick;
        world.wizards[0] = me.clone();

        let command = strategy.decide(&me, &world, &game);

        if command.speed.is_some() || command.strafe_speed.is_some() {
            move_commands += 1;
        }
        if command.turn.is_some() {
            turn_commands += 1;
        }
        match command.action {
            Some(ActionKind::Staff) => melee_commands += 1,
            Some(_) => cast_commands += 1,
            None => {}
        }

        // The host grants a new skill every 500 ticks of requests.
        if tick > 0 && tick % 500 == 0 {
            if let Some(skill) = command.skill_to_learn {
                me.skills.push(skill);
            }
        }

        distance_travelled += integrate(&mut me, &command, &game);

        // Minions shamble toward the agent; cooldowns run down.
        for minion in &mut world.minions {
            let step = (me.position - minion.position).normalized() * 1.5;
            minion.position = minion.position + step;
            minion.angle = minion.position.angle_of_segment_to(me.position);
            minion.remaining_action_cooldown = minion.remaining_action_cooldown.saturating_sub(1);
        }

        if args.verbose {
            eprintln!(
                "[{}] pos=({:.0},{:.0}) angle={:.2} action={:?}",
                tick, me.position.x, me.position.y, me.angle, command.action
            );
        }
    }

    let result = EpisodeResult {
        ticks_run: args.ticks,
        lane: args.lane,
        seed,
        final_position: (me.position.x, me.position.y),
        final_life: me.life,
        distance_travelled,
        skills_learned: me.skills.len(),
        move_commands,
        turn_commands,
        cast_commands,
        melee_commands,
    };

    if args.format == "text" {
        println!("Episode over after {} ticks (seed {})", result.ticks_run, result.seed);
        println!(
            "  final position ({:.0}, {:.0}), {:.0} units travelled",
            result.final_position.0, result.final_position.1, result.distance_travelled
        );
        println!(
            "  {} moves, {} turns, {} casts, {} melee swings, {} skills learned",
            result.move_commands,
            result.turn_commands,
            result.cast_commands,
            result.melee_commands,
            result.skills_learned
        );
    } else {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize result: {}", e),
        }
    }
}
