//! Scripted input source driving headless sessions.

use hero_battle_core::{ActionCommand, Direction, FrameInput, ULTIMATE_ENERGY_MAX};
use hero_battle_rendering::{InputSource, Scene};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Frames a chosen heading is held before a new one is picked.
const HEADING_FRAMES: u32 = 45;

/// One in this many frames switches to another hero.
const SWITCH_ODDS: u32 = 240;

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Deterministic stand-in for a player.
///
/// Fires the ultimate once charged, otherwise the first ready ability while
/// enemies are present, and wanders around the arena. The same seed always
/// produces the same inputs for the same scenes.
#[derive(Debug)]
pub(crate) struct Autopilot {
    rng: ChaCha8Rng,
    remaining: u64,
    heading: Vec<Direction>,
    held: u32,
}

impl Autopilot {
    /// Creates an autopilot that stops after `frames` inputs.
    pub(crate) fn new(seed: u64, frames: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            remaining: frames,
            heading: Vec::new(),
            held: 0,
        }
    }

    fn choose_action(&mut self, scene: &Scene) -> Option<ActionCommand> {
        let hud = scene.hud.active_hero.as_ref()?;
        if hud.ultimate_energy >= ULTIMATE_ENERGY_MAX {
            return Some(ActionCommand::CastUltimate);
        }
        if self.rng.gen_ratio(1, SWITCH_ODDS) {
            let offset = if self.rng.gen_bool(0.5) { 1 } else { -1 };
            return Some(ActionCommand::SwitchHero { offset });
        }
        if scene.hud.enemy_count == 0 {
            return None;
        }
        hud.cooldowns
            .iter()
            .position(|cooldown| cooldown.remaining == 0)
            .map(|slot| ActionCommand::CastAbility { slot })
    }

    fn steer(&mut self) -> Vec<Direction> {
        if self.held == 0 {
            self.heading.clear();
            let axes = self.rng.gen_range(0..=2);
            for _ in 0..axes {
                let direction = DIRECTIONS[self.rng.gen_range(0..DIRECTIONS.len())];
                if !self.heading.contains(&direction) {
                    self.heading.push(direction);
                }
            }
            self.held = HEADING_FRAMES;
        }
        self.held -= 1;
        self.heading.clone()
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, scene: &Scene) -> Option<FrameInput> {
        if self.remaining == 0 || scene.state.is_over() {
            return None;
        }
        self.remaining -= 1;

        Some(FrameInput {
            action: self.choose_action(scene),
            movement: self.steer(),
            restart: false,
        })
    }
}
