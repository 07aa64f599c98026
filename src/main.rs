//! Craft Minigames headless demo
//!
//! Runs one session with a scripted player on a fixed timestep and prints the
//! graded result.
//!
//! Usage: `minigame-demo [grid|cylinder] [seed] [settings.json]`

use craft_minigames::consts::*;
use craft_minigames::sim::{PuzzleAction, PuzzleEngine};
use craft_minigames::{MinigameController, MinigameSettings, ResultBook};

/// Session length given to the scripted player
const DEMO_DURATION: f32 = 20.0;
/// Render frame time fed to the accumulator (60 Hz display)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Seconds between scripted inputs, roughly human pace
const INPUT_COOLDOWN: f32 = 0.25;

/// Scripted player: picks at most one action when its cooldown allows
struct AutoPlayer {
    cooldown: f32,
}

impl AutoPlayer {
    fn new() -> Self {
        Self { cooldown: 0.0 }
    }

    fn decide(&mut self, puzzle: &PuzzleEngine, dt: f32) -> Option<PuzzleAction> {
        self.cooldown = (self.cooldown - dt).max(0.0);
        if self.cooldown > 0.0 {
            return None;
        }

        let action = match puzzle {
            PuzzleEngine::Grid(grid) => {
                let size = grid.size();
                (0..size * size)
                    .map(|i| (i % size, i / size))
                    .find(|&(x, y)| grid.cell(x, y).is_some_and(|c| c != 0))
                    .map(|(x, y)| PuzzleAction::Rotate { x, y })
            }
            // Wait for the marker to drift well inside the window
            PuzzleEngine::Cylinder(cylinder) => (cylinder.offset_to_target().abs()
                <= cylinder.tolerance() * 0.5)
                .then_some(PuzzleAction::Strike),
        };

        if action.is_some() {
            self.cooldown = INPUT_COOLDOWN;
        }
        action
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let kind_name = args.first().map(String::as_str).unwrap_or("grid");
    let mut settings = match args.get(2) {
        Some(path) => MinigameSettings::load_or_default(path),
        None => MinigameSettings::default(),
    };
    if let Some(seed) = args.get(1) {
        match seed.parse::<u64>() {
            Ok(seed) => settings.seed = Some(seed),
            Err(_) => log::warn!("Ignoring non-numeric seed {:?}", seed),
        }
    }

    let mut controller = match MinigameController::new(settings, ResultBook::new()) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("Invalid settings: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = controller.start_named(kind_name, "demo-1", DEMO_DURATION) {
        eprintln!("Cannot start minigame: {}", e);
        std::process::exit(2);
    }

    let mut player = AutoPlayer::new();
    let mut accumulator = 0.0;
    let mut frames = 0u32;

    while controller.is_active() {
        accumulator += FRAME_DT;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let action = controller.puzzle().and_then(|p| player.decide(p, SIM_DT));
            if let Some(action) = action {
                controller.submit_action(action);
            }
            controller.tick(SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        frames += 1;
        if frames % 60 == 0 {
            if let Some(snap) = controller.snapshot() {
                log::info!(
                    "t-{:.1}s performance {:.2} progress {:?}",
                    snap.time_remaining,
                    snap.performance,
                    snap.progress
                );
            }
        }
    }

    let book = controller.sink();
    let Some(last) = &book.last else {
        println!("Session ended without a result");
        return;
    };
    println!(
        "{} session {}: {:?} after {:.1}s, performance {:.2} -> {}",
        last.kind, last.session_id, last.reason, last.elapsed, last.performance, last.tier
    );
    match book.entries(last.kind).iter().position(|e| e.session_id == last.session_id) {
        Some(i) => println!("Ranked #{} on the {} board", i + 1, last.kind),
        None => println!("Not good enough for the {} board", last.kind),
    }
}
