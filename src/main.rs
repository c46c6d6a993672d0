//! Headless harness: loads a level and config, plays a scripted run at a
//! fixed frame rate and prints the HUD and combat log.
//!
//! Usage: `grid-crawler [config.json] [level.txt]`

use std::env;
use std::fs;

use anyhow::{Context, Result};
use tracing::{debug, info};

use grid_crawler::constants::{HARNESS_DURATION_SECONDS, HARNESS_FRAME_DT, HARNESS_INTENT_INTERVAL};
use grid_crawler::{GameConfig, GameEngine, GameState, PlayerIntent, TileMap};

const DEMO_LEVEL: &str = "\
#########
#...E...#
#.##.##.#
#.#...#.#
#.......#
#.#.|.#.#
#.##.##.#
#...P..E#
#########";

/// Turn to face the room, then alternate advancing and swinging.
const DEMO_SCRIPT: &str = "wwfwfff dwwafff aawfff ddwfff";

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        None => GameConfig::default(),
    };
    let map = match args.next() {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("reading level {path}"))?;
            TileMap::parse(&text).with_context(|| format!("parsing level {path}"))?
        }
        None => TileMap::parse(DEMO_LEVEL).context("parsing built-in level")?,
    };

    let mut engine = GameEngine::from_level(config, map);
    engine.start_new_game();
    info!(enemies = engine.enemy_count(), "run started");

    let script = PlayerIntent::parse_script(DEMO_SCRIPT);
    let mut intents = script.iter().copied().cycle();
    let frames = (HARNESS_DURATION_SECONDS / HARNESS_FRAME_DT).round() as u32;
    let mut until_intent = 0.0;

    for _ in 0..frames {
        until_intent -= HARNESS_FRAME_DT;
        if until_intent <= 0.0 {
            until_intent += HARNESS_INTENT_INTERVAL;
            if let Some(intent) = intents.next() {
                let result = engine.handle_intent(intent);
                debug!(?intent, ?result, "intent");
            }
        }

        for event in engine.tick(HARNESS_FRAME_DT) {
            debug!(?event, "event");
        }

        if engine.state() == GameState::Dead {
            break;
        }
        if engine.enemy_count() == 0 {
            info!("level cleared");
            engine.debug_set_end();
            break;
        }
    }

    info!(state = ?engine.state(), time = %engine.clock().timestamp(), "run finished");

    let ui = engine.ui();
    println!("{}", ui.status.render_line());
    println!();
    print!("{}", ui.minimap.render_ascii());
    println!();
    for line in ui.log.entries() {
        println!("{line}");
    }

    Ok(())
}
