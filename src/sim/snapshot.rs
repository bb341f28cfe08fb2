//! Read-only view of a match for renderers, HUDs and logs

use serde::Serialize;

use super::item::Item;
use super::player::{Player, PlayerState};
use super::state::{Color, GamePhase, GameState, Platform, Side, TerrainType};
use super::vector::Vector2D;
use super::weapon::{Projectile, WeaponKind};

/// Per-player fields a HUD needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub side: Side,
    /// Top-left corner
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub hp: i32,
    pub max_hp: i32,
    pub state: PlayerState,
    pub facing_right: bool,
    pub grounded: bool,
    pub invisible: bool,
    pub terrain: TerrainType,
    pub weapon: WeaponKind,
    /// Remaining shots, -1 for infinite
    pub ammo: i32,
    pub adrenaline: bool,
    pub color: Color,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            side: player.side(),
            position: player.pos,
            velocity: player.vel,
            hp: player.hp(),
            max_hp: player.max_hp(),
            state: player.state(),
            facing_right: player.facing_right(),
            grounded: player.is_grounded(),
            invisible: player.is_invisible(),
            terrain: player.terrain(),
            weapon: player.weapon().kind(),
            ammo: player.weapon().ammo().as_count(),
            adrenaline: player.has_adrenaline(),
            color: player.color,
        }
    }
}

/// Everything observable about a match at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub phase: GamePhase,
    pub time_ms: f64,
    pub ticks: u64,
    /// 0 while undecided, otherwise 1 or 2
    pub winner: u8,
    pub players: Vec<PlayerView>,
    pub projectiles: Vec<Projectile>,
    pub items: Vec<Item>,
    pub platforms: Vec<Platform>,
}

impl MatchSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            time_ms: state.time_ms,
            ticks: state.time_ticks,
            winner: state.winner.map_or(0, Side::number),
            players: state.players.iter().map(PlayerView::from).collect(),
            projectiles: state.projectiles.clone(),
            items: state.items.clone(),
            platforms: state.platforms.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
