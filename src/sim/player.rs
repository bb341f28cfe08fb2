//! Player entity: movement, health, status effects and attack throttling
//!
//! A player only moves itself and tracks its own timers. Platform contact,
//! terrain, damage from other players and item effects are applied by the
//! engine through the methods here.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{Color, Side, TerrainType};
use super::vector::Vector2D;
use super::weapon::{Muzzle, Projectile, Weapon};
use crate::consts::*;

/// Visible player state, recomputed every update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Standing,
    Moving,
    Jumping,
    Crouching,
    Attacking,
}

/// Timed speed/heal buff
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Adrenaline {
    pub active: bool,
    pub end_ms: f64,
    /// Time of the last heal pulse
    pub last_heal_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    side: Side,
    pub color: Color,
    /// Top-left corner of the hitbox
    pub pos: Vector2D,
    pub vel: Vector2D,
    hp: i32,
    state: PlayerState,
    facing_right: bool,
    moving_left: bool,
    moving_right: bool,
    crouching: bool,
    grounded: bool,
    terrain: TerrainType,
    weapon: Weapon,
    /// Last accepted attack command; `None` until the first one
    last_attack_ms: Option<f64>,
    adrenaline: Adrenaline,
}

impl Player {
    pub fn new(side: Side, pos: Vector2D, color: Color) -> Self {
        Self {
            side,
            color,
            pos,
            vel: Vector2D::ZERO,
            hp: PLAYER_MAX_HP,
            state: PlayerState::Standing,
            facing_right: true,
            moving_left: false,
            moving_right: false,
            crouching: false,
            grounded: false,
            terrain: TerrainType::Ground,
            weapon: Weapon::default(),
            last_attack_ms: None,
            adrenaline: Adrenaline::default(),
        }
    }

    /// Advance kinematics and timers, then refresh the visible state
    pub fn update(&mut self, now_ms: f64, dt: f64) {
        self.update_physics(dt);
        self.update_adrenaline(now_ms);
        self.refresh_state();
    }

    fn update_physics(&mut self, dt: f64) {
        if !self.crouching {
            let speed = self.current_speed();
            if self.moving_left {
                self.vel.x = -speed;
            } else if self.moving_right {
                self.vel.x = speed;
            } else {
                self.vel.x *= FRICTION;
                if self.vel.x.abs() < FRICTION_STOP_SPEED {
                    self.vel.x = 0.0;
                }
            }
        }

        if !self.grounded {
            self.vel.y += GRAVITY * dt;
        }

        self.pos += self.vel * dt;

        // Side walls
        let max_x = WORLD_WIDTH - PLAYER_WIDTH;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = 0.0;
        } else if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x = 0.0;
        }

        // World floor; leaving the ground is decided by the engine
        let floor_y = GROUND_LEVEL - PLAYER_HEIGHT;
        if self.pos.y >= floor_y {
            self.pos.y = floor_y;
            self.vel.y = 0.0;
            self.grounded = true;
        }
    }

    fn update_adrenaline(&mut self, now_ms: f64) {
        if !self.adrenaline.active {
            return;
        }
        if now_ms >= self.adrenaline.end_ms {
            self.adrenaline.active = false;
            log::debug!("{:?} adrenaline wore off", self.side);
            return;
        }
        if now_ms - self.adrenaline.last_heal_ms >= ADRENALINE_HEAL_INTERVAL_MS {
            self.heal(ADRENALINE_HEAL);
            self.adrenaline.last_heal_ms = now_ms;
        }
    }

    /// Recompute the visible state from the movement flags
    ///
    /// Attacking is only ever set by [`Player::attack`] and lasts until the
    /// next update.
    fn refresh_state(&mut self) {
        self.state = if self.crouching {
            PlayerState::Crouching
        } else if !self.grounded {
            PlayerState::Jumping
        } else if self.moving_left || self.moving_right {
            PlayerState::Moving
        } else {
            PlayerState::Standing
        };
    }

    pub fn move_left(&mut self) {
        if self.crouching {
            return;
        }
        self.moving_left = true;
        self.facing_right = false;
    }

    pub fn move_right(&mut self) {
        if self.crouching {
            return;
        }
        self.moving_right = true;
        self.facing_right = true;
    }

    pub fn stop_moving(&mut self) {
        self.moving_left = false;
        self.moving_right = false;
    }

    pub fn jump(&mut self) {
        if self.crouching || !self.grounded {
            return;
        }
        self.vel.y = PLAYER_JUMP_SPEED;
        self.grounded = false;
    }

    /// Crouch in place; only possible on the ground
    ///
    /// Crouching drops any held direction so that a crouching player is never
    /// also moving.
    pub fn crouch(&mut self) {
        if !self.grounded {
            return;
        }
        self.crouching = true;
        self.stop_moving();
        self.vel.x = 0.0;
    }

    pub fn stop_crouching(&mut self) {
        self.crouching = false;
    }

    /// Player-level attack throttle
    ///
    /// Returns `true` when the attack is accepted; the weapon's own cooldown
    /// is checked separately by whoever resolves the attack.
    pub fn attack(&mut self, now_ms: f64) -> bool {
        if self
            .last_attack_ms
            .is_some_and(|last| now_ms - last < PLAYER_ATTACK_INTERVAL_MS)
        {
            return false;
        }
        self.last_attack_ms = Some(now_ms);
        self.state = PlayerState::Attacking;
        true
    }

    /// Fire the equipped weapon if it is a ranged one
    pub fn fire_weapon(&mut self, now_ms: f64) -> Option<Projectile> {
        let muzzle = Muzzle {
            body: self.rect(),
            facing_right: self.facing_right,
            owner: self.side,
        };
        self.weapon.fire(now_ms, &muzzle)
    }

    /// Negative amounts are ignored
    pub fn take_damage(&mut self, damage: i32) {
        self.hp = self.hp.saturating_sub(damage.max(0)).clamp(0, PLAYER_MAX_HP);
    }

    /// Negative amounts are ignored
    pub fn heal(&mut self, amount: i32) {
        self.hp = self.hp.saturating_add(amount.max(0)).clamp(0, PLAYER_MAX_HP);
    }

    /// Start (or restart) the adrenaline buff for `duration_ms`
    pub fn apply_adrenaline(&mut self, now_ms: f64, duration_ms: f64) {
        self.adrenaline = Adrenaline {
            active: true,
            end_ms: now_ms + duration_ms,
            last_heal_ms: now_ms,
        };
    }

    /// Base speed with terrain and buff multipliers applied
    pub fn current_speed(&self) -> f64 {
        let mut speed = PLAYER_SPEED;
        if self.terrain == TerrainType::Ice {
            speed *= ICE_SPEED_MULTIPLIER;
        }
        if self.adrenaline.active {
            speed *= ADRENALINE_SPEED_MULTIPLIER;
        }
        speed
    }

    pub fn set_weapon(&mut self, weapon: Weapon) {
        log::debug!("{:?} equipped {:?}", self.side, weapon.kind());
        self.weapon = weapon;
    }

    pub(crate) fn weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapon
    }

    pub(crate) fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    pub(crate) fn set_terrain(&mut self, terrain: TerrainType) {
        self.terrain = terrain;
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        PLAYER_MAX_HP
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn is_moving(&self) -> bool {
        self.moving_left || self.moving_right
    }

    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Hidden from projectiles and melee while crouching on grass
    pub fn is_invisible(&self) -> bool {
        self.crouching && self.terrain == TerrainType::Grass
    }

    pub fn terrain(&self) -> TerrainType {
        self.terrain
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn adrenaline(&self) -> Adrenaline {
        self.adrenaline
    }

    pub fn has_adrenaline(&self) -> bool {
        self.adrenaline.active
    }

    pub fn size(&self) -> Vector2D {
        Vector2D::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size())
    }

    pub fn center(&self) -> Vector2D {
        self.rect().center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grounded_player() -> Player {
        let mut p = Player::new(
            Side::One,
            Vector2D::new(200.0, GROUND_LEVEL - PLAYER_HEIGHT),
            Color::BLUE,
        );
        p.set_grounded(true);
        p
    }

    #[test]
    fn test_state_machine() {
        let mut p = grounded_player();
        p.update(0.0, SIM_DT);
        assert_eq!(p.state(), PlayerState::Standing);

        p.move_right();
        p.update(16.0, SIM_DT);
        assert_eq!(p.state(), PlayerState::Moving);

        p.stop_moving();
        p.jump();
        p.update(32.0, SIM_DT);
        assert_eq!(p.state(), PlayerState::Jumping);
    }

    #[test]
    fn test_attacking_lasts_until_next_update() {
        let mut p = grounded_player();
        assert!(p.attack(1000.0));
        assert_eq!(p.state(), PlayerState::Attacking);

        p.update(1001.0, SIM_DT);
        assert_eq!(p.state(), PlayerState::Standing);

        // Airborne attacker falls back to Jumping
        p.jump();
        assert!(p.attack(2000.0));
        assert_eq!(p.state(), PlayerState::Attacking);
        p.update(2001.0, SIM_DT);
        assert_eq!(p.state(), PlayerState::Jumping);
    }

    #[test]
    fn test_extreme_amounts_saturate() {
        let mut p = grounded_player();
        p.take_damage(30);
        p.heal(i32::MAX);
        assert_eq!(p.hp(), PLAYER_MAX_HP);

        p.take_damage(i32::MAX);
        assert_eq!(p.hp(), 0);

        // Negative amounts do nothing
        p.heal(20);
        p.take_damage(-50);
        assert_eq!(p.hp(), 20);
        p.heal(i32::MIN);
        assert_eq!(p.hp(), 20);
        p.take_damage(i32::MIN);
        assert_eq!(p.hp(), 20);
    }

    #[test]
    fn test_attack_throttle() {
        let mut p = grounded_player();
        assert!(p.attack(0.0));
        assert!(!p.attack(PLAYER_ATTACK_INTERVAL_MS - 1.0));
        assert!(p.attack(PLAYER_ATTACK_INTERVAL_MS));
    }

    #[test]
    fn test_horizontal_speed_and_friction() {
        let mut p = grounded_player();
        p.move_right();
        p.update(0.0, SIM_DT);
        assert_eq!(p.vel.x, PLAYER_SPEED);
        assert!(p.facing_right());

        p.stop_moving();
        p.update(16.0, SIM_DT);
        assert!((p.vel.x - PLAYER_SPEED * FRICTION).abs() < 1e-9);

        for i in 0..30 {
            p.update(32.0 + i as f64 * 16.0, SIM_DT);
        }
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn test_speed_multipliers_stack() {
        let mut p = grounded_player();
        p.set_terrain(TerrainType::Ice);
        assert!((p.current_speed() - PLAYER_SPEED * ICE_SPEED_MULTIPLIER).abs() < 1e-9);

        p.apply_adrenaline(0.0, ADRENALINE_DURATION_MS);
        let expected = PLAYER_SPEED * ICE_SPEED_MULTIPLIER * ADRENALINE_SPEED_MULTIPLIER;
        assert!((p.current_speed() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_crouch_rules() {
        let mut p = grounded_player();
        p.move_left();
        p.update(0.0, SIM_DT);
        assert!(p.vel.x < 0.0);

        p.crouch();
        assert!(p.is_crouching());
        assert!(!p.is_moving());
        assert_eq!(p.vel.x, 0.0);

        // Blocked while crouched
        p.move_right();
        p.jump();
        p.update(16.0, SIM_DT);
        assert_eq!(p.vel.x, 0.0);
        assert_eq!(p.vel.y, 0.0);
        assert_eq!(p.state(), PlayerState::Crouching);

        p.stop_crouching();
        p.move_right();
        assert!(p.is_moving());
    }

    #[test]
    fn test_crouch_requires_ground_and_grass_hides() {
        let mut airborne = Player::new(Side::Two, Vector2D::new(500.0, 100.0), Color::RED);
        airborne.crouch();
        assert!(!airborne.is_crouching());

        let mut p = grounded_player();
        p.set_terrain(TerrainType::Grass);
        assert!(!p.is_invisible());
        p.crouch();
        assert!(p.is_invisible());
        p.set_terrain(TerrainType::Ice);
        assert!(!p.is_invisible());
    }

    #[test]
    fn test_gravity_and_floor() {
        let mut p = Player::new(Side::One, Vector2D::new(200.0, 600.0), Color::BLUE);
        p.update(0.0, SIM_DT);
        assert!(p.vel.y > 0.0);

        for i in 0..120 {
            p.update(i as f64 * 16.0, SIM_DT);
        }
        assert!(p.is_grounded());
        assert_eq!(p.rect().bottom(), GROUND_LEVEL);
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn test_side_walls_clamp() {
        let mut p = grounded_player();
        p.pos.x = 2.0;
        p.move_left();
        p.update(0.0, SIM_DT);
        assert_eq!(p.pos.x, 0.0);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn test_adrenaline_heals_then_expires() {
        let mut p = grounded_player();
        p.take_damage(50);
        p.apply_adrenaline(0.0, ADRENALINE_DURATION_MS);

        p.update(999.0, SIM_DT);
        assert_eq!(p.hp(), 50);
        p.update(1000.0, SIM_DT);
        assert_eq!(p.hp(), 55);
        p.update(1500.0, SIM_DT);
        assert_eq!(p.hp(), 55);
        p.update(2000.0, SIM_DT);
        assert_eq!(p.hp(), 60);

        p.update(ADRENALINE_DURATION_MS, SIM_DT);
        assert!(!p.has_adrenaline());
        let hp = p.hp();
        p.update(ADRENALINE_DURATION_MS + 5000.0, SIM_DT);
        assert_eq!(p.hp(), hp);
        assert_eq!(p.current_speed(), PLAYER_SPEED);
    }

    #[test]
    fn test_adrenaline_restarts() {
        let mut p = grounded_player();
        p.apply_adrenaline(0.0, ADRENALINE_DURATION_MS);
        p.apply_adrenaline(8000.0, ADRENALINE_DURATION_MS);
        p.update(12_000.0, SIM_DT);
        assert!(p.has_adrenaline());
        assert_eq!(p.adrenaline().end_ms, 18_000.0);
    }

    proptest! {
        #[test]
        fn hp_stays_in_range(
            ops in proptest::collection::vec((any::<bool>(), any::<i32>()), 0..60)
        ) {
            let mut p = grounded_player();
            for (damage, amount) in ops {
                if damage {
                    p.take_damage(amount);
                } else {
                    p.heal(amount);
                }
                prop_assert!(p.hp() >= 0 && p.hp() <= p.max_hp());
            }
        }

        #[test]
        fn crouching_never_moves(cmds in proptest::collection::vec(0u8..6, 0..80)) {
            let mut p = grounded_player();
            for (i, cmd) in cmds.into_iter().enumerate() {
                match cmd {
                    0 => p.move_left(),
                    1 => p.move_right(),
                    2 => p.stop_moving(),
                    3 => p.crouch(),
                    4 => p.stop_crouching(),
                    _ => p.jump(),
                }
                p.update(i as f64 * 16.0, SIM_DT);
                if p.is_crouching() {
                    prop_assert!(!p.is_moving());
                    prop_assert_eq!(p.vel.x, 0.0);
                }
            }
        }
    }
}
