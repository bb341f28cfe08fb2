//! Match engine: lifecycle, command routing and queries
//!
//! [`Engine`] owns one [`GameState`] and is the only thing collaborators
//! (renderers, input layers, drivers) talk to. Time only moves when
//! [`Engine::tick`] is called; [`FrameClock`] turns variable frame times into
//! fixed steps.

use super::item::{Item, ItemKind};
use super::player::Player;
use super::snapshot::MatchSnapshot;
use super::state::{GamePhase, GameState, Platform, Side};
use super::tick::{self, Command};
use super::weapon::Projectile;
use crate::consts::*;
use crate::settings::Settings;

/// Two-player match engine
#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
}

impl Engine {
    /// New match with a fixed seed and default drop interval
    pub fn new(seed: u64) -> Self {
        let mut engine = Self {
            state: GameState::new(seed),
        };
        engine.initialize();
        engine
    }

    pub fn with_settings(settings: &Settings) -> Self {
        let mut engine = Self::new(settings.resolve_seed());
        engine.state.spawner.interval_ms = settings.item_drop_interval_ms;
        engine
    }

    /// Place both players at their spawns and build the arena
    pub fn initialize(&mut self) {
        self.state.reinitialize();
        log::info!("Match initialized (seed {})", self.state.seed);
    }

    /// Begin periodic item drops
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::Playing {
            log::warn!("start() ignored while {:?}", self.state.phase);
            return;
        }
        self.state.spawner.start(self.state.time_ms);
        log::info!(
            "Match started, dropping items every {:.0} ms",
            self.state.spawner.interval_ms
        );
    }

    /// Flip between Playing and Paused; no effect once the match is over
    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Playing => {
                self.state.phase = GamePhase::Paused;
                self.state.spawner.stop();
                log::info!("Paused");
            }
            GamePhase::Paused => {
                self.state.phase = GamePhase::Playing;
                self.state.spawner.start(self.state.time_ms);
                log::info!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    /// Start over from the initial layout and resume drops
    pub fn reset(&mut self) {
        self.initialize();
        self.start();
    }

    /// Advance the match by `dt` seconds; negative or non-finite `dt` is ignored
    pub fn tick(&mut self, dt: f64) {
        log::trace!("tick {} dt={:.4}", self.state.time_ticks, dt);
        tick::tick(&mut self.state, dt);
    }

    /// Deliver a command to player 0 or 1; other indices are ignored
    pub fn command(&mut self, player: usize, command: Command) {
        let Some(side) = Side::from_index(player) else {
            log::warn!("Ignoring {:?} for unknown player {}", command, player);
            return;
        };
        tick::apply_command(&mut self.state, side, command);
    }

    /// Drop a specific item from the sky at `x`; only while the match runs
    pub fn drop_item(&mut self, kind: ItemKind, x: f64) -> Option<u32> {
        if self.state.phase != GamePhase::Playing {
            return None;
        }
        let x = x.clamp(0.0, WORLD_WIDTH - kind.size().x);
        Some(tick::drop_item(&mut self.state, kind, x))
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn time_ms(&self) -> f64 {
        self.state.time_ms
    }

    pub fn player(&self, side: Side) -> &Player {
        self.state.player(side)
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.state.players
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.state.projectiles
    }

    pub fn items(&self) -> &[Item] {
        &self.state.items
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.state.platforms
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner
    }

    /// 0 while undecided, otherwise the winning player's number
    pub fn winner_code(&self) -> u8 {
        self.state.winner.map_or(0, Side::number)
    }

    pub fn is_drop_timer_running(&self) -> bool {
        self.state.spawner.is_running()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(&self.state)
    }
}

/// Fixed-step accumulator for drivers with variable frame times
#[derive(Debug, Clone)]
pub struct FrameClock {
    fixed_dt: f64,
    max_substeps: u32,
    accumulator: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(fixed_dt: f64, max_substeps: u32) -> Self {
        Self {
            fixed_dt,
            max_substeps,
            accumulator: 0.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.fixed_dt, settings.max_substeps)
    }

    /// Feed one frame's elapsed time and run the fixed ticks it covers
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, engine: &mut Engine, frame_dt: f64) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.fixed_dt && substeps < self.max_substeps {
            engine.tick(self.fixed_dt);
            self.accumulator -= self.fixed_dt;
            substeps += 1;
        }
        substeps
    }

    /// Drop leftover time, e.g. after a pause
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
