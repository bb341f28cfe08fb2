//! Simulation tick and command handling
//!
//! One call to [`tick`] runs the whole pipeline in a fixed order:
//! player kinematics, player/platform contact, projectile and item advance,
//! projectile hits, then the win check. Commands are applied between ticks
//! through [`apply_command`].

use rand::Rng;

use super::collision::{Contact, circle_rect_overlap, classify_contact};
use super::item::{Item, ItemKind};
use super::player::Player;
use super::state::{GamePhase, GameState, Platform, Side, TerrainType};
use super::vector::Vector2D;
use crate::consts::*;

/// Edge-triggered player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeftPressed,
    MoveLeftReleased,
    MoveRightPressed,
    MoveRightReleased,
    JumpPressed,
    /// Crouch and try to grab a nearby item
    CrouchPressed,
    CrouchReleased,
    AttackPressed,
}

/// What an attack command ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Rejected by the player-level attack throttle
    Throttled,
    /// Weapon cooling down or out of ammo
    NotReady,
    /// Melee swing with no valid target
    Missed,
    /// Melee swing landed for `damage`
    Hit { damage: i32 },
    /// Ranged weapon launched a projectile
    Fired { projectile_id: u32 },
}

/// Advance the match by `dt` seconds; negative or non-finite steps are ignored
pub fn tick(state: &mut GameState, dt: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Ignoring tick with invalid dt {}", dt);
        return;
    }

    state.time_ticks += 1;
    state.time_ms += dt * 1000.0;
    let now = state.time_ms;

    // Item drops that came due since the last tick
    for _ in 0..state.spawner.poll(now) {
        spawn_random_item(state);
    }

    // 1. Player kinematics and timers
    for player in state.players.iter_mut().filter(|p| p.is_alive()) {
        player.update(now, dt);
    }

    // 2. Player vs platforms
    let platforms = &state.platforms;
    for player in state.players.iter_mut() {
        resolve_player_platforms(player, platforms);
    }

    // 3. Projectiles
    for projectile in state.projectiles.iter_mut() {
        projectile.update(dt);
    }
    state.projectiles.retain(|p| p.is_valid(now));

    // 4. Items
    advance_items(state, dt);
    state.items.retain(|i| i.is_valid(now));

    // 5. Projectile vs players
    resolve_projectile_hits(state);

    // 6. Projectile vs platforms
    let platforms = &state.platforms;
    state.projectiles.retain(|p| {
        !platforms
            .iter()
            .any(|platform| circle_rect_overlap(p.pos, p.radius, &platform.rect))
    });

    // 7. Win check
    check_winner(state);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Route a command to a player; ignored unless the match is running
pub fn apply_command(state: &mut GameState, side: Side, command: Command) {
    if state.phase != GamePhase::Playing {
        log::trace!("Ignoring {:?} for {:?} while {:?}", command, side, state.phase);
        return;
    }

    let player = state.player_mut(side);
    if !player.is_alive() {
        return;
    }
    match command {
        Command::MoveLeftPressed => player.move_left(),
        Command::MoveRightPressed => player.move_right(),
        Command::MoveLeftReleased | Command::MoveRightReleased => player.stop_moving(),
        Command::JumpPressed => player.jump(),
        Command::CrouchPressed => {
            player.crouch();
            try_pickup(state, side);
        }
        Command::CrouchReleased => player.stop_crouching(),
        Command::AttackPressed => {
            resolve_attack(state, side);
        }
    }
}

/// Resolve an attack command for `side`
///
/// The player's own throttle runs first; melee weapons then need range,
/// facing, a visible target and an elapsed weapon cooldown. Ranged weapons
/// hand back a projectile that joins the live set.
pub fn resolve_attack(state: &mut GameState, side: Side) -> AttackOutcome {
    let now = state.time_ms;
    let attacker = state.player_mut(side);
    if !attacker.attack(now) {
        return AttackOutcome::Throttled;
    }

    if attacker.weapon().kind().is_melee() {
        return resolve_melee(state, side, now);
    }

    match attacker.fire_weapon(now) {
        Some(projectile) => {
            let projectile_id = state.spawn_projectile(projectile);
            AttackOutcome::Fired { projectile_id }
        }
        None => AttackOutcome::NotReady,
    }
}

fn resolve_melee(state: &mut GameState, side: Side, now: f64) -> AttackOutcome {
    let [one, two] = &mut state.players;
    let (attacker, defender) = match side {
        Side::One => (one, two),
        Side::Two => (two, one),
    };

    if !attacker.weapon().can_attack(now) {
        return AttackOutcome::NotReady;
    }

    let from = attacker.center();
    let to = defender.center();
    let in_range = from.distance_to(to) <= attacker.weapon().attack_range();
    let facing = if attacker.facing_right() {
        to.x > from.x
    } else {
        to.x < from.x
    };

    if !in_range || !facing || defender.is_invisible() || !defender.is_alive() {
        return AttackOutcome::Missed;
    }

    if !attacker.weapon_mut().strike(now) {
        return AttackOutcome::NotReady;
    }
    let damage = attacker.weapon().damage();
    defender.take_damage(damage);
    log::debug!(
        "{:?} hit {:?} with {:?} for {} (hp {})",
        side,
        defender.side(),
        attacker.weapon().kind(),
        damage,
        defender.hp()
    );
    AttackOutcome::Hit { damage }
}

/// Try to grab one item within reach of `side`; returns what was picked up
pub fn try_pickup(state: &mut GameState, side: Side) -> Option<ItemKind> {
    let now = state.time_ms;
    let reach = state.player(side).rect().expanded(PICKUP_REACH);
    let player = &mut state.players[side.index()];

    let picked = state
        .items
        .iter_mut()
        .filter(|item| item.is_valid(now) && item.rect().overlaps(&reach))
        .find_map(|item| item.try_pickup(player, now).then_some(item.kind));

    if picked.is_some() {
        state.items.retain(|i| i.is_valid(now));
    }
    picked
}

/// Drop one random item from the sky
pub fn spawn_random_item(state: &mut GameState) -> u32 {
    let kind = ItemKind::ALL[state.rng.random_range(0..ItemKind::ALL.len())];
    let x = state
        .rng
        .random_range(ITEM_DROP_MARGIN..WORLD_WIDTH - ITEM_DROP_MARGIN);
    drop_item(state, kind, x)
}

/// Drop a specific item at horizontal position `x`
pub fn drop_item(state: &mut GameState, kind: ItemKind, x: f64) -> u32 {
    let item = Item::new(kind, Vector2D::new(x, ITEM_DROP_HEIGHT), state.time_ms);
    let id = state.spawn_item(item);
    log::debug!("Dropped {:?} (item {}) at x={:.0}", kind, id, x);
    id
}

/// Push a player out of any platform it overlaps and settle its ground state
fn resolve_player_platforms(player: &mut Player, platforms: &[Platform]) {
    let size = player.size();
    let mut landed = false;

    for platform in platforms {
        let rect = &platform.rect;
        match classify_contact(&player.rect(), player.vel, rect) {
            Some(Contact::FromAbove) => {
                player.pos.y = rect.top() - size.y;
                player.vel.y = 0.0;
                landed = true;
            }
            Some(Contact::FromBelow) => {
                player.pos.y = rect.bottom();
                player.vel.y = 0.0;
            }
            Some(Contact::LeftSide) => {
                player.pos.x = rect.left() - size.x;
                player.vel.x = 0.0;
            }
            Some(Contact::RightSide) => {
                player.pos.x = rect.right();
                player.vel.x = 0.0;
            }
            None => {}
        }
    }

    if landed || is_supported(player, platforms) {
        if player.vel.y > 0.0 {
            player.vel.y = 0.0;
        }
        // Inside the floor band: stand on the floor line, not above it
        if player.rect().bottom() >= GROUND_LEVEL - GROUND_SNAP_TOLERANCE {
            player.pos.y = GROUND_LEVEL - size.y;
        }
        player.set_grounded(true);
        player.set_terrain(terrain_under(player, platforms));
    } else {
        player.set_grounded(false);
        player.set_terrain(TerrainType::Ground);
    }
}

/// Feet resting on (or just above) the world floor or a platform top
///
/// Rising players are never supported, so a jump is not cancelled by the
/// tolerance band on its first frames.
fn is_supported(player: &Player, platforms: &[Platform]) -> bool {
    if player.vel.y < 0.0 {
        return false;
    }

    let body = player.rect();
    if body.bottom() >= GROUND_LEVEL - GROUND_SNAP_TOLERANCE {
        return true;
    }

    platforms.iter().any(|platform| {
        body.overlaps_horizontally(&platform.rect)
            && body.bottom() >= platform.rect.top()
            && body.bottom() <= platform.rect.top() + PLATFORM_STAND_TOLERANCE
    })
}

/// Terrain of the first platform the player is standing on
fn terrain_under(player: &Player, platforms: &[Platform]) -> TerrainType {
    let body = player.rect();
    platforms
        .iter()
        .find(|platform| {
            let rect = &platform.rect;
            body.overlaps_horizontally(rect)
                && body.bottom() >= rect.top() - TERRAIN_PROBE_ABOVE
                && body.bottom() <= rect.bottom() + TERRAIN_PROBE_BELOW
        })
        .map(|platform| platform.terrain)
        .unwrap_or_default()
}

fn advance_items(state: &mut GameState, dt: f64) {
    let platforms = &state.platforms;
    for item in state.items.iter_mut() {
        if item.grounded {
            continue;
        }
        item.update(dt);
        let body = item.rect();
        if let Some(platform) = platforms.iter().find(|p| body.overlaps(&p.rect)) {
            item.land_on(platform.rect.top());
        }
    }
}

/// Each projectile damages at most one non-owner, visible, living player
fn resolve_projectile_hits(state: &mut GameState) {
    let players = &mut state.players;
    state.projectiles.retain(|projectile| {
        let target = players.iter_mut().find(|player| {
            player.side() != projectile.owner
                && player.is_alive()
                && !player.is_invisible()
                && circle_rect_overlap(projectile.pos, projectile.radius, &player.rect())
        });

        match target {
            Some(player) => {
                player.take_damage(projectile.damage);
                log::debug!(
                    "Projectile {} from {:?} hit {:?} for {} (hp {})",
                    projectile.id,
                    projectile.owner,
                    player.side(),
                    projectile.damage,
                    player.hp()
                );
                false
            }
            None => true,
        }
    });
}

fn check_winner(state: &mut GameState) {
    if state.winner.is_some() {
        return;
    }

    let Some(loser) = Side::BOTH
        .into_iter()
        .find(|side| !state.player(*side).is_alive())
    else {
        return;
    };

    let winner = loser.opponent();
    state.winner = Some(winner);
    state.phase = GamePhase::GameOver;
    state.spawner.stop();
    log::info!(
        "Game over: player {} wins at {:.1}s",
        winner.number(),
        state.time_ms / 1000.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::weapon::{AmmoKind, Projectile, Weapon, WeaponKind};
    use proptest::prelude::*;

    /// Match with item drops off and both players settled on the ground
    fn settled_state() -> GameState {
        let mut state = GameState::new(42);
        tick(&mut state, SIM_DT);
        state
    }

    fn place(state: &mut GameState, side: Side, x: f64, y: f64) {
        let p = state.player_mut(side);
        p.pos = Vector2D::new(x, y);
        p.vel = Vector2D::ZERO;
    }

    fn run(state: &mut GameState, seconds: f64) {
        let steps = (seconds / SIM_DT).ceil() as usize;
        for _ in 0..steps {
            tick(state, SIM_DT);
        }
    }

    #[test]
    fn test_players_grounded_after_first_tick() {
        let state = settled_state();
        for side in Side::BOTH {
            let p = state.player(side);
            assert!(p.is_grounded());
            assert_eq!(p.terrain(), TerrainType::Ground);
            assert_eq!(p.rect().bottom(), GROUND_LEVEL);
        }
    }

    #[test]
    fn test_fist_hits_once_then_throttled() {
        let mut state = settled_state();
        let y = GROUND_LEVEL - PLAYER_HEIGHT;
        place(&mut state, Side::One, 500.0, y);
        place(&mut state, Side::Two, 540.0, y);

        let outcome = resolve_attack(&mut state, Side::One);
        assert_eq!(outcome, AttackOutcome::Hit { damage: FIST_DAMAGE });
        assert_eq!(state.player(Side::Two).hp(), PLAYER_MAX_HP - FIST_DAMAGE);

        // Same instant: player throttle rejects it
        assert_eq!(resolve_attack(&mut state, Side::One), AttackOutcome::Throttled);

        // Past the throttle, still inside the fist cooldown
        run(&mut state, 0.2);
        assert_eq!(resolve_attack(&mut state, Side::One), AttackOutcome::NotReady);
        assert_eq!(state.player(Side::Two).hp(), PLAYER_MAX_HP - FIST_DAMAGE);
    }

    #[test]
    fn test_melee_requires_facing_and_range() {
        let mut state = settled_state();
        let y = GROUND_LEVEL - PLAYER_HEIGHT;

        // Player one faces right by default; target behind
        place(&mut state, Side::One, 500.0, y);
        place(&mut state, Side::Two, 460.0, y);
        assert_eq!(resolve_attack(&mut state, Side::One), AttackOutcome::Missed);

        // Target in front but out of fist range
        place(&mut state, Side::Two, 600.0, y);
        run(&mut state, 0.15);
        assert_eq!(resolve_attack(&mut state, Side::One), AttackOutcome::Missed);

        // Knife reaches further
        state
            .player_mut(Side::One)
            .set_weapon(Weapon::new(WeaponKind::Knife));
        place(&mut state, Side::Two, 555.0, y);
        run(&mut state, 0.15);
        assert_eq!(
            resolve_attack(&mut state, Side::One),
            AttackOutcome::Hit { damage: KNIFE_DAMAGE }
        );
    }

    #[test]
    fn test_stealth_blocks_melee_and_projectiles() {
        let mut state = settled_state();
        // Player two crouches on the centre grass platform
        place(&mut state, Side::Two, 600.0, 600.0 - PLAYER_HEIGHT);
        run(&mut state, 0.05);
        assert_eq!(state.player(Side::Two).terrain(), TerrainType::Grass);
        apply_command(&mut state, Side::Two, Command::CrouchPressed);
        assert!(state.player(Side::Two).is_invisible());

        // Melee from the platform edge
        place(&mut state, Side::One, 560.0, 600.0 - PLAYER_HEIGHT);
        run(&mut state, 0.05);
        assert_eq!(resolve_attack(&mut state, Side::One), AttackOutcome::Missed);

        // A bullet through the hidden player's box
        let target = state.player(Side::Two).center();
        let bullet = Projectile::new(
            target,
            Vector2D::new(1.0, 0.0),
            RIFLE_DAMAGE,
            AmmoKind::Bullet,
            Side::One,
            state.time_ms,
        );
        state.spawn_projectile(bullet);
        tick(&mut state, SIM_DT);
        assert_eq!(state.player(Side::Two).hp(), PLAYER_MAX_HP);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_ice_speed() {
        let mut state = settled_state();
        // Left mid platform is ice
        place(&mut state, Side::One, 150.0, 500.0 - PLAYER_HEIGHT);
        run(&mut state, 0.05);
        assert!(state.player(Side::One).is_grounded());
        assert_eq!(state.player(Side::One).terrain(), TerrainType::Ice);

        apply_command(&mut state, Side::One, Command::MoveRightPressed);
        tick(&mut state, SIM_DT);
        let vx = state.player(Side::One).vel.x;
        assert!((vx - PLAYER_SPEED * ICE_SPEED_MULTIPLIER).abs() < 1e-9);
    }

    #[test]
    fn test_airborne_terrain_resets_to_ground() {
        let mut state = settled_state();
        place(&mut state, Side::One, 150.0, 500.0 - PLAYER_HEIGHT);
        run(&mut state, 0.05);
        assert_eq!(state.player(Side::One).terrain(), TerrainType::Ice);

        apply_command(&mut state, Side::One, Command::JumpPressed);
        tick(&mut state, SIM_DT);
        let p = state.player(Side::One);
        assert!(!p.is_grounded());
        assert_eq!(p.terrain(), TerrainType::Ground);
    }

    #[test]
    fn test_landing_on_platform() {
        let mut state = settled_state();
        place(&mut state, Side::One, 900.0, 380.0);
        run(&mut state, 1.0);
        let p = state.player(Side::One);
        assert!(p.is_grounded());
        assert_eq!(p.rect().bottom(), 500.0);
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn test_head_bump_from_below() {
        let mut state = settled_state();
        // Under the centre platform (450..750, 600..620); jump straight up
        place(&mut state, Side::Two, 550.0, GROUND_LEVEL - PLAYER_HEIGHT);
        tick(&mut state, SIM_DT);
        apply_command(&mut state, Side::Two, Command::JumpPressed);

        let mut bumped = false;
        for _ in 0..60 {
            tick(&mut state, SIM_DT);
            let p = state.player(Side::Two);
            assert!(p.rect().top() >= 620.0 - 1e-9, "player passed through the platform");
            if p.rect().top() == 620.0 {
                bumped = true;
            }
        }
        assert!(bumped);
    }

    #[test]
    fn test_side_contact_stops_player() {
        // Walking into the left edge of the ice platform (100..300, 500..520)
        let mut p = Player::new(
            Side::One,
            Vector2D::new(70.0, 480.0),
            crate::sim::state::Color::BLUE,
        );
        p.vel = Vector2D::new(200.0, 0.0);
        resolve_player_platforms(&mut p, &crate::sim::state::arena_layout());
        assert_eq!(p.pos.x, 100.0 - PLAYER_WIDTH);
        assert_eq!(p.vel.x, 0.0);
        assert!(!p.is_grounded());
    }

    #[test]
    fn test_projectile_never_hits_owner() {
        let mut state = settled_state();
        let center = state.player(Side::One).center();
        let shot = Projectile::new(
            center,
            Vector2D::ZERO,
            50,
            AmmoKind::Bullet,
            Side::One,
            state.time_ms,
        );
        state.spawn_projectile(shot);
        run(&mut state, 0.5);
        assert_eq!(state.player(Side::One).hp(), PLAYER_MAX_HP);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_rifle_shot_hits_opponent_once() {
        let mut state = settled_state();
        let y = GROUND_LEVEL - PLAYER_HEIGHT;
        place(&mut state, Side::One, 300.0, y);
        place(&mut state, Side::Two, 500.0, y);
        state
            .player_mut(Side::One)
            .set_weapon(Weapon::new(WeaponKind::Rifle));

        let outcome = resolve_attack(&mut state, Side::One);
        assert!(matches!(outcome, AttackOutcome::Fired { .. }));
        assert_eq!(state.projectiles.len(), 1);

        run(&mut state, 0.5);
        assert_eq!(state.player(Side::Two).hp(), PLAYER_MAX_HP - RIFLE_DAMAGE);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_ball_arcs_and_dies_on_platform() {
        let mut state = settled_state();
        // Player two out of the way on the far side
        place(&mut state, Side::Two, 1100.0, 300.0 - PLAYER_HEIGHT);
        place(&mut state, Side::One, 200.0, GROUND_LEVEL - PLAYER_HEIGHT);
        state
            .player_mut(Side::One)
            .set_weapon(Weapon::new(WeaponKind::Ball));
        assert!(matches!(
            resolve_attack(&mut state, Side::One),
            AttackOutcome::Fired { .. }
        ));

        let mut last_vy = state.projectiles[0].vel.y;
        let mut ticks = 0;
        while !state.projectiles.is_empty() {
            tick(&mut state, SIM_DT);
            ticks += 1;
            if let Some(ball) = state.projectiles.first() {
                assert!(ball.vel.y > last_vy);
                last_vy = ball.vel.y;
            }
            assert!(ticks < 600, "ball never landed");
        }
        assert_eq!(state.player(Side::Two).hp(), PLAYER_MAX_HP);
    }

    /// Column 300..350 has nothing above the floor
    const OPEN_COLUMN_X: f64 = 300.0;

    #[test]
    fn test_bandage_pickup() {
        let mut state = settled_state();
        let x = OPEN_COLUMN_X;
        place(&mut state, Side::One, x, GROUND_LEVEL - PLAYER_HEIGHT);
        drop_item(&mut state, ItemKind::Bandage, x + 10.0);
        run(&mut state, 2.0);
        assert!(state.items[0].grounded);

        state.player_mut(Side::One).take_damage(20);
        apply_command(&mut state, Side::One, Command::CrouchPressed);
        assert_eq!(state.player(Side::One).hp(), PLAYER_MAX_HP);
        assert!(state.items.is_empty());

        // A second bandage at full health stays on the floor
        drop_item(&mut state, ItemKind::Bandage, x + 10.0);
        apply_command(&mut state, Side::One, Command::CrouchReleased);
        run(&mut state, 2.0);
        apply_command(&mut state, Side::One, Command::CrouchPressed);
        assert_eq!(state.items.len(), 1);
        assert!(state.items[0].is_valid(state.time_ms));
    }

    #[test]
    fn test_pickup_takes_one_item_and_skips_refusals() {
        let mut state = settled_state();
        let x = OPEN_COLUMN_X;
        place(&mut state, Side::One, x, GROUND_LEVEL - PLAYER_HEIGHT);
        drop_item(&mut state, ItemKind::Medkit, x);
        drop_item(&mut state, ItemKind::Sniper, x);
        drop_item(&mut state, ItemKind::Knife, x + 10.0);
        run(&mut state, 2.0);

        // Full health: medkit refused, sniper taken, knife left alone
        assert_eq!(try_pickup(&mut state, Side::One), Some(ItemKind::Sniper));
        assert_eq!(state.player(Side::One).weapon().kind(), WeaponKind::Sniper);
        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn test_items_land_and_expire() {
        let mut state = settled_state();
        drop_item(&mut state, ItemKind::Adrenaline, 600.0);
        run(&mut state, 2.0);
        let item = &state.items[0];
        assert!(item.grounded);
        // First surface below x=600 is the wide upper platform
        assert_eq!(item.rect().bottom(), 400.0);

        run(&mut state, ITEM_LIFETIME_MS / 1000.0);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_periodic_drops() {
        let mut state = settled_state();
        state.spawner.start(state.time_ms);
        run(&mut state, ITEM_DROP_INTERVAL_MS / 1000.0 * 3.0 + 0.1);
        assert_eq!(state.items.len(), 3);
        for item in &state.items {
            assert!(item.pos.x >= ITEM_DROP_MARGIN);
            assert!(item.pos.x < WORLD_WIDTH - ITEM_DROP_MARGIN);
        }
    }

    #[test]
    fn test_win_check() {
        let mut state = settled_state();
        state.spawner.start(state.time_ms);
        state.player_mut(Side::Two).take_damage(PLAYER_MAX_HP);
        tick(&mut state, SIM_DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.winner, Some(Side::One));
        assert!(!state.spawner.is_running());

        // Frozen: no more ticks or commands
        let t = state.time_ms;
        tick(&mut state, SIM_DT);
        assert_eq!(state.time_ms, t);
        apply_command(&mut state, Side::One, Command::MoveRightPressed);
        assert!(!state.player(Side::One).is_moving());
    }

    #[test]
    fn test_double_knockout_goes_to_player_two() {
        let mut state = settled_state();
        state.spawner.start(state.time_ms);
        state.player_mut(Side::One).take_damage(PLAYER_MAX_HP);
        state.player_mut(Side::Two).take_damage(PLAYER_MAX_HP);
        tick(&mut state, SIM_DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.winner, Some(Side::Two));
        assert!(!state.spawner.is_running());
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut state = settled_state();
        run(&mut state, 1.0);
        let before_ms = state.time_ms;
        let before_ticks = state.time_ticks;
        let pos = state.player(Side::One).pos;

        tick(&mut state, -10.0);
        tick(&mut state, f64::NAN);
        tick(&mut state, f64::INFINITY);
        assert_eq!(state.time_ms, before_ms);
        assert_eq!(state.time_ticks, before_ticks);

        tick(&mut state, SIM_DT);
        assert!(state.time_ms > before_ms);
        let p = state.player(Side::One);
        assert_eq!(p.pos, pos);
        assert!(p.pos.x.is_finite() && p.pos.y.is_finite());
    }

    proptest! {
        #[test]
        fn projectiles_expire_within_lifetime(vx in -5.0f64..5.0, vy in -5.0f64..5.0) {
            let mut state = settled_state();
            // Slow shot high above everything; nothing to hit
            let shot = Projectile::new(
                Vector2D::new(600.0, 100.0),
                Vector2D::new(vx, vy),
                1,
                AmmoKind::Bullet,
                Side::One,
                state.time_ms,
            );
            state.spawn_projectile(shot);
            run(&mut state, PROJECTILE_LIFETIME_MS / 1000.0 + 0.05);
            prop_assert!(state.projectiles.is_empty());
        }
    }
}
